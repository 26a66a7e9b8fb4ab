// ==========================================
// 保管箱排布表转换工具 - 配置层
// ==========================================
// 职责: 转换参数与默认常量, 支持 JSON 文件覆写
// ==========================================

pub mod transform_config;

pub use transform_config::{defaults, TransformConfig};
