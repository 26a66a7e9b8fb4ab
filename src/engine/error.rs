// ==========================================
// 保管箱排布表转换工具 - 转换引擎错误类型
// ==========================================
// 致命错误统一上抛到 main, 由顶层处理器输出并设置退出码
// ==========================================

use crate::importer::error::ImportError;
use std::fmt;
use thiserror::Error;

/// 转换错误类型
#[derive(Error, Debug)]
pub enum TransformError {
    #[error("未能在前 {scanned} 行内找到包含 '№' 与 'размер' 的表头行")]
    HeaderNotFound { scanned: usize },

    #[error("表头行号非法: {0}")]
    InvalidHeaderRows(String),

    #[error("未找到任何分组")]
    NoGroupsFound,

    #[error("未生成任何数据行")]
    NoDataProduced,

    #[error("结果写出失败 ({path}): {message}")]
    ExportError { path: String, message: String },

    #[error(transparent)]
    Import(#[from] ImportError),
}

/// 错误类别（用于顶层报告）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    HeaderNotFound,
    InvalidHeaderRows,
    MissingReferenceFile,
    SchemaViolation,
    NoGroupsFound,
    NoDataProduced,
    Input,
    Config,
    Export,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ErrorKind::HeaderNotFound => "HeaderNotFound",
            ErrorKind::InvalidHeaderRows => "InvalidHeaderRows",
            ErrorKind::MissingReferenceFile => "MissingReferenceFile",
            ErrorKind::SchemaViolation => "SchemaViolation",
            ErrorKind::NoGroupsFound => "NoGroupsFound",
            ErrorKind::NoDataProduced => "NoDataProduced",
            ErrorKind::Input => "Input",
            ErrorKind::Config => "Config",
            ErrorKind::Export => "Export",
        };
        write!(f, "{}", name)
    }
}

impl TransformError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            TransformError::HeaderNotFound { .. } => ErrorKind::HeaderNotFound,
            TransformError::InvalidHeaderRows(_) => ErrorKind::InvalidHeaderRows,
            TransformError::NoGroupsFound => ErrorKind::NoGroupsFound,
            TransformError::NoDataProduced => ErrorKind::NoDataProduced,
            TransformError::ExportError { .. } => ErrorKind::Export,
            TransformError::Import(err) => match err {
                ImportError::MissingReferenceFile(_) => ErrorKind::MissingReferenceFile,
                ImportError::SchemaViolation { .. } => ErrorKind::SchemaViolation,
                ImportError::ConfigReadError { .. } => ErrorKind::Config,
                _ => ErrorKind::Input,
            },
        }
    }
}

/// Result 类型别名
pub type TransformResult<T> = Result<T, TransformError>;
