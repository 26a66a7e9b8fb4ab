// ==========================================
// 保管箱排布表转换工具 - 表头定位器
// ==========================================
// 单表头: 首个同时含 ≥N 个 "№" 与 ≥N 个 "размер" 的行为叶子行 h2
// 多区块: 任一单元格等于参考表键的行为区块起点
// ==========================================

use crate::domain::{Block, HeaderTriple, RawSheet};
use crate::engine::error::{TransformError, TransformResult};
use std::collections::HashSet;
use tracing::debug;

/// 表头定位参数
#[derive(Debug, Clone)]
pub struct HeaderMarkers {
    pub index_marker: String,
    pub size_marker: String,
    pub min_count: usize,
}

pub struct HeaderLocator {
    markers: HeaderMarkers,
    max_scan_rows: usize,
}

impl HeaderLocator {
    pub fn new(markers: HeaderMarkers, max_scan_rows: usize) -> Self {
        Self {
            markers,
            max_scan_rows,
        }
    }

    /// 叶子行判定
    fn is_leaf_row(&self, sheet: &RawSheet, row: usize) -> bool {
        let (mut index_hits, mut size_hits) = (0usize, 0usize);
        for value in sheet.row_values(row) {
            let value = value.trim();
            if value == self.markers.index_marker {
                index_hits += 1;
            } else if value == self.markers.size_marker {
                size_hits += 1;
            }
        }
        index_hits >= self.markers.min_count && size_hits >= self.markers.min_count
    }

    /// 定位单个三行表头
    ///
    /// 首个命中行若不足以在其上方容纳两行表头, 视为失败（不继续向下扫描）。
    pub fn locate(&self, sheet: &RawSheet) -> TransformResult<HeaderTriple> {
        let scanned = self.max_scan_rows.min(sheet.height());
        let leaf_row = (0..scanned)
            .find(|&row| self.is_leaf_row(sheet, row))
            .ok_or(TransformError::HeaderNotFound { scanned })?;

        let triple =
            HeaderTriple::ending_at(leaf_row).ok_or(TransformError::HeaderNotFound { scanned })?;
        debug!(header = %triple, "表头定位完成");
        Ok(triple)
    }
}

/// 按锚点行切分区块
///
/// 锚点行: 任一单元格（TRIM 后）等于 valid_keys 中的某个键。
pub fn detect_blocks<'a, I>(sheet: &RawSheet, valid_keys: I) -> Vec<Block>
where
    I: IntoIterator<Item = &'a str>,
{
    let keys: HashSet<&str> = valid_keys.into_iter().collect();
    let starts: Vec<usize> = (0..sheet.height())
        .filter(|&row| sheet.row_values(row).any(|v| keys.contains(v.trim())))
        .collect();

    let last_row = sheet.height().saturating_sub(1);
    let blocks: Vec<Block> = starts
        .iter()
        .enumerate()
        .map(|(i, &start)| Block {
            start,
            end: starts.get(i + 1).map(|next| next - 1).unwrap_or(last_row),
        })
        .collect();

    debug!(blocks = blocks.len(), "区块识别完成");
    blocks
}
