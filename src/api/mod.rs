// ==========================================
// 保管箱排布表转换工具 - API 层
// ==========================================
// 职责: 面向调用方的文件级接口
// ==========================================

pub mod transform_api;

pub use transform_api::{
    colocated_reference_path, default_output_path, TransformApi, TransformReport,
    TransformRequest,
};
