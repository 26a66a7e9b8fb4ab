// ==========================================
// 保管箱排布表转换工具 - 数据清洗器实现
// ==========================================
// 职责: NULL 标准化 / 编号数值解析 / 尺寸数字提取与换算
// ==========================================

use crate::importer::sheet_importer_trait::DataCleaner as DataCleanerTrait;
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::trace;

static DIGIT_RUN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[0-9]+").expect("数字匹配正则非法"));

/// 文本中第一段连续数字
pub fn first_digit_run(value: &str) -> Option<&str> {
    DIGIT_RUN.find(value).map(|m| m.as_str())
}

/// 保留一位小数
pub fn round_to_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

pub struct DataCleaner;

impl DataCleanerTrait for DataCleaner {
    fn normalize_null(&self, value: Option<&str>) -> Option<String> {
        value.and_then(|v| {
            let trimmed = v.trim();
            if trimmed.is_empty() {
                None
            } else {
                Some(trimmed.to_string())
            }
        })
    }

    fn parse_number(&self, value: &str) -> Option<f64> {
        value
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
    }

    fn extract_size_mm(&self, value: &str) -> Option<f64> {
        let digits = first_digit_run(value)?;
        // 超长数字串按浮点解析, 溢出为无穷时排除
        let size_mm = digits.parse::<f64>().ok().filter(|v| v.is_finite());
        if size_mm.is_none() {
            trace!(digits = %digits, "尺寸数字超出范围, 跳过");
        }
        size_mm
    }

    fn convert_size(&self, size_mm: f64, margin_mm: f64, scale: f64) -> f64 {
        round_to_tenth((size_mm - margin_mm) / scale)
    }
}
