// ==========================================
// 保管箱排布表转换工具 - 导入层
// ==========================================
// 职责: 外部文件读取, 生成内部表格与参考表
// 支持: Excel, CSV
// ==========================================

// 模块声明
pub mod data_cleaner;
pub mod error;
pub mod file_parser;
pub mod reference_loader;
pub mod sheet_importer_trait;

// 重导出核心类型
pub use data_cleaner::DataCleaner as DataCleanerImpl;
pub use error::{ImportError, ImportResult};
pub use file_parser::{CsvParser, ExcelParser, UniversalFileParser};
pub use reference_loader::{LoadedReference, ReferenceLoader};

// 重导出 Trait 接口
pub use sheet_importer_trait::{DataCleaner, FileParser};
