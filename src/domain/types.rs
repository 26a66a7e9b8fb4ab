// ==========================================
// 保管箱排布表转换工具 - 领域类型定义
// ==========================================
// 职责: 转换模式 / 表头布局 / 叶子列类型
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ==========================================
// 转换模式 (Transform Mode)
// ==========================================
// Enriched: 尺寸换算 + 宽深补全
// Raw: 尺寸原样输出, 不补全宽深
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransformMode {
    #[default]
    Enriched,
    Raw,
}

impl TransformMode {
    /// 输出列（固定顺序）
    pub fn output_columns(&self) -> &'static [&'static str] {
        match self {
            TransformMode::Enriched => &["nst", "nsafe", "height", "Width", "Depth", "Type"],
            TransformMode::Raw => &["nst", "nsafe", "height", "Type"],
        }
    }

    pub fn is_enriched(&self) -> bool {
        matches!(self, TransformMode::Enriched)
    }
}

impl fmt::Display for TransformMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransformMode::Enriched => write!(f, "ENRICHED"),
            TransformMode::Raw => write!(f, "RAW"),
        }
    }
}

impl FromStr for TransformMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "ENRICHED" => Ok(TransformMode::Enriched),
            "RAW" => Ok(TransformMode::Raw),
            other => Err(format!("未知转换模式: {}（可选 enriched / raw）", other)),
        }
    }
}

// ==========================================
// 表头布局 (Header Layout)
// ==========================================
// Single: 整表一个三行表头
// MultiBlock: 按锚点行切分为多个区块, 每块自带三行表头
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum HeaderLayout {
    #[default]
    Single,
    MultiBlock,
}

impl fmt::Display for HeaderLayout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HeaderLayout::Single => write!(f, "SINGLE"),
            HeaderLayout::MultiBlock => write!(f, "MULTI_BLOCK"),
        }
    }
}

// ==========================================
// 叶子列类型 (Leaf Kind)
// ==========================================
// 第三级表头: "№" → Index, "размер" → Size
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LeafKind {
    Index,
    Size,
    Other,
}

impl LeafKind {
    pub fn is_selected(&self) -> bool {
        !matches!(self, LeafKind::Other)
    }
}

impl fmt::Display for LeafKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LeafKind::Index => write!(f, "INDEX"),
            LeafKind::Size => write!(f, "SIZE"),
            LeafKind::Other => write!(f, "OTHER"),
        }
    }
}
