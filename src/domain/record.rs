// ==========================================
// 保管箱排布表转换工具 - 输出记录与参考表
// ==========================================
// Record: 一行输出 (nst, nsafe, height, Width, Depth, Type)
// ReferenceMap: Type → (Width, Depth)
// TransformWarning: 非致命告警
// ==========================================

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// 分组（第二级表头）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Group {
    pub label: String,
    pub nst: i64,
}

/// 高度值
#[derive(Debug, Clone, PartialEq)]
pub enum Height {
    /// 换算后的厘米值（保留一位小数）
    Centimeters(f64),
    /// 原始尺寸文本
    Raw(String),
}

impl fmt::Display for Height {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Height::Centimeters(v) => write!(f, "{}", v),
            Height::Raw(s) => write!(f, "{}", s),
        }
    }
}

/// 类型属性（宽/深）
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TypeAttributes {
    pub width: f64,
    pub depth: f64,
}

/// 输出记录
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    pub nst: i64,
    pub nsafe: i64,
    pub height: Height,
    /// Raw 模式下为 None
    pub attributes: Option<TypeAttributes>,
    pub type_label: String,
}

// ==========================================
// ReferenceMap - 类型参考表
// ==========================================
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReferenceMap {
    entries: HashMap<String, TypeAttributes>,
}

impl ReferenceMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// 重复键: 后写覆盖
    pub fn insert(&mut self, type_label: impl Into<String>, attributes: TypeAttributes) {
        self.entries.insert(type_label.into(), attributes);
    }

    pub fn get(&self, type_label: &str) -> Option<TypeAttributes> {
        self.entries.get(type_label).copied()
    }

    pub fn contains_key(&self, type_label: &str) -> bool {
        self.entries.contains_key(type_label)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(|k| k.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<(String, TypeAttributes)> for ReferenceMap {
    fn from_iter<I: IntoIterator<Item = (String, TypeAttributes)>>(iter: I) -> Self {
        let mut map = ReferenceMap::new();
        for (k, v) in iter {
            map.insert(k, v);
        }
        map
    }
}

// ==========================================
// TransformWarning - 非致命告警
// ==========================================
#[derive(Debug, Clone, PartialEq)]
pub enum TransformWarning {
    /// 分组标签不含数字
    GroupWithoutTag { label: String },
    /// 分组标签数字超出整数范围
    GroupTagOutOfRange { label: String, digits: String },
    /// 类型在参考表中不存在, 使用默认宽深
    UnmappedType {
        type_label: String,
        nst: i64,
        nsafe: i64,
    },
    /// 参考表行被跳过
    ReferenceRowSkipped { row: usize, reason: String },
    /// 区块行数不足以容纳表头和数据
    BlockTooShort { start: usize, end: usize },
    /// 区块内未找到任何分组
    BlockWithoutGroups { start: usize, end: usize },
}

impl fmt::Display for TransformWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransformWarning::GroupWithoutTag { label } => {
                write!(f, "跳过不含数字的分组: '{}'", label)
            }
            TransformWarning::GroupTagOutOfRange { label, digits } => {
                write!(f, "跳过编号超出范围的分组: '{}'（{}）", label, digits)
            }
            TransformWarning::UnmappedType {
                type_label,
                nst,
                nsafe,
            } => write!(
                f,
                "类型 '{}' 不在参考表中, 使用默认宽深 (nst={}, nsafe={})",
                type_label, nst, nsafe
            ),
            TransformWarning::ReferenceRowSkipped { row, reason } => {
                write!(f, "参考表第 {} 行已跳过: {}", row, reason)
            }
            TransformWarning::BlockTooShort { start, end } => {
                write!(f, "区块 [{}, {}] 行数不足, 已跳过", start, end)
            }
            TransformWarning::BlockWithoutGroups { start, end } => {
                write!(f, "区块 [{}, {}] 未找到分组", start, end)
            }
        }
    }
}
