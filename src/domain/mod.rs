// ==========================================
// 保管箱排布表转换工具 - 领域层
// ==========================================
// 职责: 表格/表头/记录等核心数据结构
// ==========================================

pub mod record;
pub mod sheet;
pub mod types;

// 重导出核心类型
pub use record::{Group, Height, Record, ReferenceMap, TransformWarning, TypeAttributes};
pub use sheet::{Block, HeaderTriple, RawSheet};
pub use types::{HeaderLayout, LeafKind, TransformMode};
