// ==========================================
// 保管箱排布表转换工具 - 导入 Trait
// ==========================================
// 职责: 定义文件解析与单元格清洗接口（不包含实现）
// ==========================================

use crate::domain::RawSheet;
use crate::importer::error::ImportResult;
use std::path::Path;

// ==========================================
// FileParser Trait
// ==========================================
// 用途: 文件 → 原始表格
// 实现者: ExcelParser, CsvParser
pub trait FileParser: Send + Sync {
    /// 解析文件为 RawSheet
    ///
    /// # 参数
    /// - file_path: 文件路径
    /// - sheet_name: 工作表名（CSV 忽略; None 取第一张）
    ///
    /// # 返回
    /// - Ok(RawSheet): 行列号与源文件一致的单元格网格
    /// - Err: 文件不存在、格式错误
    fn parse_to_sheet(&self, file_path: &Path, sheet_name: Option<&str>)
        -> ImportResult<RawSheet>;
}

// ==========================================
// DataCleaner Trait
// ==========================================
// 用途: 单元格数值清洗（宽表转长表阶段）
// 实现者: DataCleanerImpl
pub trait DataCleaner: Send + Sync {
    /// 标准化 NULL 值（空字符串/空白 → None）
    fn normalize_null(&self, value: Option<&str>) -> Option<String>;

    /// 解析编号单元格为数值
    ///
    /// # 返回
    /// - Some(f64): 有限数值
    /// - None: 空值 / 非数值 / NaN / 无穷
    fn parse_number(&self, value: &str) -> Option<f64>;

    /// 提取尺寸文本中的第一段连续数字（毫米）
    ///
    /// # 示例
    /// - "303" → Some(303.0)
    /// - "h=303мм" → Some(303.0)
    /// - "нет" → None
    fn extract_size_mm(&self, value: &str) -> Option<f64>;

    /// 尺寸换算: round((size_mm − margin) / scale, 1)
    fn convert_size(&self, size_mm: f64, margin_mm: f64, scale: f64) -> f64;
}
