// ==========================================
// 保管箱排布表转换工具 - 核心库
// ==========================================
// 输入: 三级表头（类型 / 分组 / № + размер）的宽表
// 输出: (nst, nsafe, height, Width, Depth, Type) 长表
// ==========================================

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 表格与记录
pub mod domain;

// 配置层 - 转换参数
pub mod config;

// 导入层 - 文件与参考表
pub mod importer;

// 引擎层 - 表头识别与宽表转长表
pub mod engine;

// 写出层 - Excel / CSV
pub mod exporter;

// API 层 - 文件级接口
pub mod api;

// 日志系统
pub mod logging;

// ==========================================
// 重导出核心类型
// ==========================================

pub use domain::{
    Block, Group, HeaderLayout, HeaderTriple, Height, RawSheet, Record, ReferenceMap,
    TransformMode, TransformWarning, TypeAttributes,
};

pub use config::TransformConfig;

pub use engine::{ErrorKind, SheetTransformer, TransformError, TransformOutput, TransformResult};

pub use api::{TransformApi, TransformReport, TransformRequest};

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "保管箱排布表转换工具";
