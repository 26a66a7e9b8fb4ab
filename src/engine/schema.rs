// ==========================================
// 保管箱排布表转换工具 - 三级列结构重建
// ==========================================
// 输入: RawSheet + HeaderTriple
// 输出: ColumnSchema（每列 类型/分组/叶子 三级标签 + 列掩码 + 类型化查找表）
// ==========================================
// 合并单元格: 第 0、1 级空白单元格继承左侧标签,
// 但若本列更高一级出现过显式标签则不继承; 首列与第 2 级不填充
// ==========================================

use crate::domain::{HeaderTriple, LeafKind, RawSheet};
use std::collections::HashMap;
use tracing::debug;

/// 列句柄（列号）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ColumnHandle(usize);

impl ColumnHandle {
    pub fn index(&self) -> usize {
        self.0
    }
}

/// 单列的三级标签
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnLabel {
    pub type_label: Option<String>,
    pub group_label: Option<String>,
    pub leaf_label: Option<String>,
    pub leaf_kind: LeafKind,
}

#[derive(Debug, Clone, Copy)]
struct LookupEntry {
    handle: ColumnHandle,
    exact: bool,
}

/// 三级列结构
#[derive(Debug, Clone, Default)]
pub struct ColumnSchema {
    columns: Vec<ColumnLabel>,
    lookup: HashMap<(String, String, LeafKind), LookupEntry>,
}

impl ColumnSchema {
    pub fn columns(&self) -> &[ColumnLabel] {
        &self.columns
    }

    /// 列掩码: 叶子为 № 或 размер 的列为 true
    pub fn mask(&self) -> Vec<bool> {
        self.columns.iter().map(|c| c.leaf_kind.is_selected()).collect()
    }

    /// 被选中的列（列序）
    pub fn selected(&self) -> impl Iterator<Item = (ColumnHandle, &ColumnLabel)> {
        self.columns
            .iter()
            .enumerate()
            .filter(|(_, c)| c.leaf_kind.is_selected())
            .map(|(i, c)| (ColumnHandle(i), c))
    }

    pub fn selected_count(&self) -> usize {
        self.selected().count()
    }

    /// 某分组下出现的类型（去重, 保持列序）
    pub fn types_for_group(&self, group_label: &str) -> Vec<&str> {
        let mut types: Vec<&str> = Vec::new();
        for (_, column) in self.selected() {
            if column.group_label.as_deref() != Some(group_label) {
                continue;
            }
            if let Some(t) = column.type_label.as_deref() {
                if !types.contains(&t) {
                    types.push(t);
                }
            }
        }
        types
    }

    /// (类型, 分组, 叶子类型) → 列
    pub fn column_for(&self, type_label: &str, group_label: &str, kind: LeafKind) -> Option<ColumnHandle> {
        self.lookup
            .get(&(type_label.to_string(), group_label.to_string(), kind))
            .map(|e| e.handle)
    }
}

/// 列结构重建器
pub struct SchemaReconstructor {
    index_marker: String,
    size_marker: String,
}

impl SchemaReconstructor {
    pub fn new(index_marker: impl Into<String>, size_marker: impl Into<String>) -> Self {
        Self {
            index_marker: index_marker.into(),
            size_marker: size_marker.into(),
        }
    }

    fn classify(&self, leaf: Option<&str>) -> LeafKind {
        match leaf {
            Some(l) if l.contains(self.index_marker.as_str()) => LeafKind::Index,
            Some(l) if l.contains(self.size_marker.as_str()) => LeafKind::Size,
            _ => LeafKind::Other,
        }
    }

    fn is_exact(&self, leaf: Option<&str>, kind: LeafKind) -> bool {
        match kind {
            LeafKind::Index => leaf == Some(self.index_marker.as_str()),
            LeafKind::Size => leaf == Some(self.size_marker.as_str()),
            LeafKind::Other => false,
        }
    }

    pub fn reconstruct(&self, sheet: &RawSheet, header: HeaderTriple) -> ColumnSchema {
        let width = sheet.width();
        let read_row = |row: usize| -> Vec<Option<String>> {
            (0..width).map(|c| sheet.cell(row, c).map(str::to_string)).collect()
        };

        let mut type_row = read_row(header.h0);
        let mut group_row = read_row(header.h1);
        let leaf_row = read_row(header.h2);

        let mut control = vec![true; width];
        fill_merged_labels(&mut type_row, &mut control);
        fill_merged_labels(&mut group_row, &mut control);

        let mut schema = ColumnSchema::default();
        for (col, ((type_label, group_label), leaf_label)) in type_row
            .into_iter()
            .zip(group_row)
            .zip(leaf_row)
            .enumerate()
        {
            let leaf_kind = self.classify(leaf_label.as_deref());
            if leaf_kind.is_selected() {
                if let (Some(t), Some(g)) = (&type_label, &group_label) {
                    let entry = LookupEntry {
                        handle: ColumnHandle(col),
                        exact: self.is_exact(leaf_label.as_deref(), leaf_kind),
                    };
                    schema
                        .lookup
                        .entry((t.clone(), g.clone(), leaf_kind))
                        .and_modify(|existing| {
                            if entry.exact && !existing.exact {
                                *existing = entry;
                            }
                        })
                        .or_insert(entry);
                }
            }
            schema.columns.push(ColumnLabel {
                type_label,
                group_label,
                leaf_label,
                leaf_kind,
            });
        }

        debug!(
            header = %header,
            columns = schema.columns.len(),
            selected = schema.selected_count(),
            "列结构重建完成"
        );
        schema
    }
}

/// 合并表头向右填充
///
/// control[i] 为 false 表示本列在更高一级已出现显式标签。
fn fill_merged_labels(row: &mut [Option<String>], control: &mut [bool]) {
    let mut last = match row.first() {
        Some(first) => first.clone(),
        None => return,
    };
    for i in 1..row.len() {
        if !control[i] {
            last = row[i].clone();
        }
        if row[i].is_none() {
            row[i] = last.clone();
        } else {
            control[i] = false;
            last = row[i].clone();
        }
    }
}
