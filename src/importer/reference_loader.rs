// ==========================================
// 保管箱排布表转换工具 - 参考表加载器
// ==========================================
// 必需列: Type, Width, Depth（第一行为表头）
// 重复 Type: 后出现者覆盖
// ==========================================

use crate::domain::{RawSheet, ReferenceMap, TransformWarning, TypeAttributes};
use crate::importer::data_cleaner::DataCleaner;
use crate::importer::error::{ImportError, ImportResult};
use crate::importer::file_parser::UniversalFileParser;
use crate::importer::sheet_importer_trait::DataCleaner as DataCleanerTrait;
use std::path::Path;
use tracing::{info, warn};

pub const COLUMN_TYPE: &str = "Type";
pub const COLUMN_WIDTH: &str = "Width";
pub const COLUMN_DEPTH: &str = "Depth";

/// 参考表加载结果
#[derive(Debug, Clone, Default)]
pub struct LoadedReference {
    pub map: ReferenceMap,
    pub warnings: Vec<TransformWarning>,
}

pub struct ReferenceLoader {
    cleaner: DataCleaner,
}

impl Default for ReferenceLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl ReferenceLoader {
    pub fn new() -> Self {
        Self {
            cleaner: DataCleaner,
        }
    }

    /// 从文件加载参考表
    pub fn load<P: AsRef<Path>>(&self, path: P) -> ImportResult<LoadedReference> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(ImportError::MissingReferenceFile(path.display().to_string()));
        }

        let sheet = UniversalFileParser.parse(path, None)?;
        let loaded = self.from_sheet(&sheet, &path.display().to_string())?;

        info!(
            file = %path.display(),
            entries = loaded.map.len(),
            skipped = loaded.warnings.len(),
            "参考表加载完成"
        );
        Ok(loaded)
    }

    /// 从已解析表格构建参考表
    pub fn from_sheet(&self, sheet: &RawSheet, source: &str) -> ImportResult<LoadedReference> {
        let headers: Vec<Option<&str>> = (0..sheet.width()).map(|c| sheet.cell(0, c)).collect();
        let find = |name: &str| headers.iter().position(|h| *h == Some(name));

        let (type_col, width_col, depth_col) =
            match (find(COLUMN_TYPE), find(COLUMN_WIDTH), find(COLUMN_DEPTH)) {
                (Some(t), Some(w), Some(d)) => (t, w, d),
                (t, w, d) => {
                    let missing = [(COLUMN_TYPE, t), (COLUMN_WIDTH, w), (COLUMN_DEPTH, d)]
                        .iter()
                        .filter(|(_, idx)| idx.is_none())
                        .map(|(name, _)| name.to_string())
                        .collect();
                    return Err(ImportError::SchemaViolation {
                        file: source.to_string(),
                        missing,
                    });
                }
            };

        let mut loaded = LoadedReference::default();
        for row in 1..sheet.height() {
            let type_label = match sheet.cell(row, type_col) {
                Some(t) => t,
                None => continue,
            };

            let width = sheet.cell(row, width_col).and_then(|v| self.cleaner.parse_number(v));
            let depth = sheet.cell(row, depth_col).and_then(|v| self.cleaner.parse_number(v));

            match (width, depth) {
                (Some(width), Some(depth)) => {
                    loaded.map.insert(type_label, TypeAttributes { width, depth });
                }
                _ => {
                    let reason = format!("类型 '{}' 的 Width/Depth 不是数值", type_label);
                    warn!(row = row, type_label = %type_label, "参考表行已跳过: Width/Depth 非数值");
                    loaded
                        .warnings
                        .push(TransformWarning::ReferenceRowSkipped { row, reason });
                }
            }
        }

        Ok(loaded)
    }
}
