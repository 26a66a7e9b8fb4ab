// ==========================================
// 保管箱排布表转换工具 - 宽表转长表
// ==========================================
// 对每个 (分组, 类型): 取 № 列与 размер 列, 逐行清洗、换算、过滤
// 行排除规则（静默）:
//   1. № 非数值 / 空
//   2. размер 无数字（Enriched）或为空（Raw）
//   3. № 为 0 或负数
// ==========================================

use crate::domain::{Group, Height, LeafKind, RawSheet, Record, TransformMode};
use crate::engine::schema::{ColumnHandle, ColumnSchema};
use crate::importer::data_cleaner::DataCleaner;
use crate::importer::sheet_importer_trait::DataCleaner as DataCleanerTrait;
use std::ops::Range;
use tracing::{debug, trace};

/// 单个 (分组, 类型) 的输出批次
#[derive(Debug, Clone, PartialEq)]
pub struct PivotBatch {
    pub group: Group,
    pub type_label: String,
    pub records: Vec<Record>,
}

/// 尺寸换算参数
#[derive(Debug, Clone, Copy)]
pub struct SizeConversion {
    pub margin_mm: f64,
    pub scale: f64,
}

pub struct RowPivoter {
    mode: TransformMode,
    conversion: SizeConversion,
    cleaner: DataCleaner,
}

impl RowPivoter {
    pub fn new(mode: TransformMode, conversion: SizeConversion) -> Self {
        Self {
            mode,
            conversion,
            cleaner: DataCleaner,
        }
    }

    /// 对所有分组执行转换
    ///
    /// # 参数
    /// - rows: 数据行区间（不含表头）
    ///
    /// # 返回
    /// - 非空批次, 顺序: 分组顺序 → 类型在列中的出现顺序
    pub fn pivot(
        &self,
        sheet: &RawSheet,
        schema: &ColumnSchema,
        groups: &[Group],
        rows: Range<usize>,
    ) -> Vec<PivotBatch> {
        let mut batches = Vec::new();

        for group in groups {
            for type_label in schema.types_for_group(&group.label) {
                let index_col = schema.column_for(type_label, &group.label, LeafKind::Index);
                let size_col = schema.column_for(type_label, &group.label, LeafKind::Size);

                let (index_col, size_col) = match (index_col, size_col) {
                    (Some(i), Some(s)) => (i, s),
                    _ => {
                        debug!(
                            group = %group.label,
                            type_label = %type_label,
                            "缺少 № 或 размер 列, 跳过"
                        );
                        continue;
                    }
                };

                let records =
                    self.pivot_pair(sheet, index_col, size_col, rows.clone(), group.nst, type_label);
                if records.is_empty() {
                    continue;
                }

                debug!(
                    group = %group.label,
                    type_label = %type_label,
                    rows = records.len(),
                    "分组类型转换完成"
                );
                batches.push(PivotBatch {
                    group: group.clone(),
                    type_label: type_label.to_string(),
                    records,
                });
            }
        }

        batches
    }

    fn pivot_pair(
        &self,
        sheet: &RawSheet,
        index_col: ColumnHandle,
        size_col: ColumnHandle,
        rows: Range<usize>,
        nst: i64,
        type_label: &str,
    ) -> Vec<Record> {
        rows.filter_map(|row| {
            let record = self.build_record(
                sheet.cell(row, index_col.index()),
                sheet.cell(row, size_col.index()),
                nst,
                type_label,
            );
            if record.is_none() {
                trace!(row = row, "行已排除");
            }
            record
        })
        .collect()
    }

    /// 单行构建
    pub fn build_record(
        &self,
        index_cell: Option<&str>,
        size_cell: Option<&str>,
        nst: i64,
        type_label: &str,
    ) -> Option<Record> {
        let index = index_cell.and_then(|v| self.cleaner.parse_number(v))?;
        let size_text = self.cleaner.normalize_null(size_cell)?;

        let height = match self.mode {
            TransformMode::Enriched => {
                let size_mm = self.cleaner.extract_size_mm(&size_text)?;
                Height::Centimeters(self.cleaner.convert_size(
                    size_mm,
                    self.conversion.margin_mm,
                    self.conversion.scale,
                ))
            }
            TransformMode::Raw => Height::Raw(size_text),
        };

        // 0 为"无箱位"占位
        if index <= 0.0 {
            return None;
        }
        let nsafe = index.trunc() as i64;
        if nsafe <= 0 {
            return None;
        }

        Some(Record {
            nst,
            nsafe,
            height,
            attributes: None,
            type_label: type_label.to_string(),
        })
    }
}
