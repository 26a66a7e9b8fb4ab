// ==========================================
// 保管箱排布表转换工具 - 写出层
// ==========================================
// 职责: 转换结果写出为 Excel / CSV
// ==========================================

pub mod writer;

pub use writer::{CsvTableWriter, OutputFormat, TableWriter, UniversalTableWriter, XlsxTableWriter};
