// ==========================================
// 保管箱排布表转换工具 - 转换编排器
// ==========================================
// 流程: 表头定位 → 列结构重建 → 分组提取 → 宽表转长表 → 宽深补全 → 拼接
// 纯内存计算, 不做文件 I/O
// ==========================================

use crate::config::TransformConfig;
use crate::domain::{
    Block, Group, HeaderLayout, HeaderTriple, RawSheet, ReferenceMap, TransformWarning,
};
use crate::engine::assembler::{Assembler, OutputTable};
use crate::engine::enricher::Enricher;
use crate::engine::error::{TransformError, TransformResult};
use crate::engine::group_extractor::GroupExtractor;
use crate::engine::header_locator::{detect_blocks, HeaderLocator, HeaderMarkers};
use crate::engine::pivot::{RowPivoter, SizeConversion};
use crate::engine::schema::{ColumnSchema, SchemaReconstructor};
use std::ops::Range;
use tracing::{info, instrument, warn};

/// 转换结果
#[derive(Debug, Clone)]
pub struct TransformOutput {
    pub table: OutputTable,
    /// 实际使用的表头（多区块模式下每块一个）
    pub headers: Vec<HeaderTriple>,
    pub groups: Vec<Group>,
    pub warnings: Vec<TransformWarning>,
}

/// 一个表头 + 数据行区间
struct Region {
    header: HeaderTriple,
    rows: Range<usize>,
    block: Option<Block>,
}

/// 已解析区域
struct ResolvedRegion {
    region: Region,
    schema: ColumnSchema,
    groups: Vec<Group>,
}

pub struct SheetTransformer {
    config: TransformConfig,
}

impl SheetTransformer {
    pub fn new(config: TransformConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &TransformConfig {
        &self.config
    }

    /// 执行转换
    ///
    /// # 参数
    /// - sheet: 原始表格
    /// - reference: 参考表（Enriched 模式补全 / MultiBlock 锚点）
    /// - header_override: 显式表头行号, 提供时按单表头处理
    #[instrument(skip_all, fields(mode = %self.config.mode, layout = %self.config.layout))]
    pub fn transform(
        &self,
        sheet: &RawSheet,
        reference: Option<&ReferenceMap>,
        header_override: Option<HeaderTriple>,
    ) -> TransformResult<TransformOutput> {
        self.config.validate()?;
        let mut warnings = Vec::new();

        // === 步骤 1: 表头定位 ===
        let regions = match (header_override, self.config.layout) {
            (Some(header), _) => vec![self.override_region(sheet, header)?],
            (None, HeaderLayout::Single) => {
                let header = self.locator().locate(sheet)?;
                vec![Region {
                    header,
                    rows: header.data_start()..sheet.height(),
                    block: None,
                }]
            }
            (None, HeaderLayout::MultiBlock) => self.block_regions(sheet, reference, &mut warnings)?,
        };

        // === 步骤 2-3: 列结构重建 + 分组提取 ===
        let reconstructor =
            SchemaReconstructor::new(&self.config.index_marker, &self.config.size_marker);
        let mut resolved = Vec::with_capacity(regions.len());
        for region in regions {
            let schema = reconstructor.reconstruct(sheet, region.header);
            let extracted = GroupExtractor.extract(&schema);
            warnings.extend(extracted.warnings);

            if extracted.groups.is_empty() {
                if let Some(block) = region.block {
                    warn!(start = block.start, end = block.end, "区块未找到分组");
                    warnings.push(TransformWarning::BlockWithoutGroups {
                        start: block.start,
                        end: block.end,
                    });
                }
            }
            resolved.push(ResolvedRegion {
                region,
                schema,
                groups: extracted.groups,
            });
        }

        let groups: Vec<Group> = resolved.iter().flat_map(|r| r.groups.clone()).collect();
        info!(
            headers = resolved.len(),
            groups = groups.len(),
            "分组提取完成"
        );
        if groups.is_empty() {
            return Err(TransformError::NoGroupsFound);
        }

        // === 步骤 4: 宽表转长表 ===
        let pivoter = RowPivoter::new(
            self.config.mode,
            SizeConversion {
                margin_mm: self.config.size_margin_mm,
                scale: self.config.size_scale,
            },
        );
        let mut batches = Vec::new();
        for r in &resolved {
            batches.extend(pivoter.pivot(sheet, &r.schema, &r.groups, r.region.rows.clone()));
        }

        // === 步骤 5: 宽深补全 ===
        if self.config.mode.is_enriched() {
            let empty = ReferenceMap::new();
            let enricher =
                Enricher::new(reference.unwrap_or(&empty), self.config.default_attributes());
            for batch in batches.iter_mut() {
                warnings.extend(enricher.enrich(&mut batch.records));
            }
        }

        // === 步骤 6: 拼接 ===
        let table = Assembler.assemble(self.config.mode, batches)?;
        info!(rows = table.len(), warnings = warnings.len(), "转换完成");

        Ok(TransformOutput {
            table,
            headers: resolved.iter().map(|r| r.region.header).collect(),
            groups,
            warnings,
        })
    }

    fn locator(&self) -> HeaderLocator {
        HeaderLocator::new(
            HeaderMarkers {
                index_marker: self.config.index_marker.clone(),
                size_marker: self.config.size_marker.clone(),
                min_count: self.config.marker_min_count,
            },
            self.config.max_scan_rows,
        )
    }

    fn override_region(&self, sheet: &RawSheet, header: HeaderTriple) -> TransformResult<Region> {
        if header.h2 >= sheet.height() {
            return Err(TransformError::InvalidHeaderRows(format!(
                "表头行 {} 超出表格范围（共 {} 行）",
                header,
                sheet.height()
            )));
        }
        Ok(Region {
            header,
            rows: header.data_start()..sheet.height(),
            block: None,
        })
    }

    fn block_regions(
        &self,
        sheet: &RawSheet,
        reference: Option<&ReferenceMap>,
        warnings: &mut Vec<TransformWarning>,
    ) -> TransformResult<Vec<Region>> {
        let blocks = match reference {
            Some(map) => detect_blocks(sheet, map.keys()),
            None => Vec::new(),
        };
        if blocks.is_empty() {
            return Err(TransformError::HeaderNotFound {
                scanned: sheet.height(),
            });
        }

        let mut regions = Vec::new();
        for block in blocks {
            if !block.has_data_rows() {
                warn!(start = block.start, end = block.end, "区块行数不足, 跳过");
                warnings.push(TransformWarning::BlockTooShort {
                    start: block.start,
                    end: block.end,
                });
                continue;
            }
            let header = block.header();
            regions.push(Region {
                header,
                rows: header.data_start()..block.end + 1,
                block: Some(block),
            });
        }
        Ok(regions)
    }
}
