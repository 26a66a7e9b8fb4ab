// ==========================================
// 保管箱排布表转换工具 - 引擎层
// ==========================================
// 职责: 表头识别与宽表转长表, 纯内存计算
// 流程: HeaderLocator → SchemaReconstructor → GroupExtractor
//       → RowPivoter → Enricher → Assembler
// ==========================================

pub mod assembler;
pub mod enricher;
pub mod error;
pub mod group_extractor;
pub mod header_locator;
pub mod orchestrator;
pub mod pivot;
pub mod schema;

// 重导出核心引擎
pub use assembler::{Assembler, OutputTable, OutputValue};
pub use enricher::Enricher;
pub use error::{ErrorKind, TransformError, TransformResult};
pub use group_extractor::{ExtractedGroups, GroupExtractor};
pub use header_locator::{detect_blocks, HeaderLocator, HeaderMarkers};
pub use orchestrator::{SheetTransformer, TransformOutput};
pub use pivot::{PivotBatch, RowPivoter, SizeConversion};
pub use schema::{ColumnHandle, ColumnLabel, ColumnSchema, SchemaReconstructor};
