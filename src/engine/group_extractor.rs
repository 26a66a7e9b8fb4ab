// ==========================================
// 保管箱排布表转换工具 - 分组提取器
// ==========================================
// 规则: 选中列的第 1 级标签, 首次出现顺序, 去重,
//       首段数字为 nst; 无数字的标签跳过并告警（非致命）
// ==========================================

use crate::domain::{Group, TransformWarning};
use crate::engine::schema::ColumnSchema;
use crate::importer::data_cleaner::first_digit_run;
use tracing::warn;

/// 分组提取结果
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExtractedGroups {
    pub groups: Vec<Group>,
    pub warnings: Vec<TransformWarning>,
}

pub struct GroupExtractor;

impl GroupExtractor {
    /// 从列结构提取分组
    pub fn extract(&self, schema: &ColumnSchema) -> ExtractedGroups {
        self.extract_labels(schema.selected().map(|(_, c)| c.group_label.as_deref()))
    }

    /// 从标签序列提取分组
    pub fn extract_labels<'a, I>(&self, labels: I) -> ExtractedGroups
    where
        I: IntoIterator<Item = Option<&'a str>>,
    {
        let mut result = ExtractedGroups::default();
        let mut rejected: Vec<&str> = Vec::new();

        for label in labels.into_iter().flatten() {
            if result.groups.iter().any(|g| g.label == label) || rejected.contains(&label) {
                continue;
            }

            let digits = match first_digit_run(label) {
                Some(d) => d,
                None => {
                    warn!(label = %label, "跳过不含数字的分组");
                    rejected.push(label);
                    result.warnings.push(TransformWarning::GroupWithoutTag {
                        label: label.to_string(),
                    });
                    continue;
                }
            };

            match digits.parse::<i64>() {
                Ok(nst) => result.groups.push(Group {
                    label: label.to_string(),
                    nst,
                }),
                Err(_) => {
                    warn!(label = %label, digits = %digits, "分组编号超出范围, 跳过");
                    rejected.push(label);
                    result.warnings.push(TransformWarning::GroupTagOutOfRange {
                        label: label.to_string(),
                        digits: digits.to_string(),
                    });
                }
            }
        }

        result
    }
}
