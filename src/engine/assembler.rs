// ==========================================
// 保管箱排布表转换工具 - 结果拼接
// ==========================================
// 按批次顺序拼接为单一表格, 列顺序固定
// ==========================================

use crate::domain::{Height, Record, TransformMode};
use crate::engine::error::{TransformError, TransformResult};
use crate::engine::pivot::PivotBatch;

/// 输出单元格
#[derive(Debug, Clone, PartialEq)]
pub enum OutputValue {
    Integer(i64),
    Number(f64),
    Text(String),
}

impl OutputValue {
    /// 文本形式（CSV 写出）
    pub fn to_text(&self) -> String {
        match self {
            OutputValue::Integer(v) => v.to_string(),
            OutputValue::Number(v) => v.to_string(),
            OutputValue::Text(s) => s.clone(),
        }
    }
}

/// 输出表格
#[derive(Debug, Clone, PartialEq)]
pub struct OutputTable {
    pub mode: TransformMode,
    pub records: Vec<Record>,
}

impl OutputTable {
    pub fn columns(&self) -> &'static [&'static str] {
        self.mode.output_columns()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// 按列顺序展开
    pub fn rows(&self) -> impl Iterator<Item = Vec<OutputValue>> + '_ {
        self.records.iter().map(move |r| {
            let height = match &r.height {
                Height::Centimeters(v) => OutputValue::Number(*v),
                Height::Raw(s) => OutputValue::Text(s.clone()),
            };
            let mut row = vec![
                OutputValue::Integer(r.nst),
                OutputValue::Integer(r.nsafe),
                height,
            ];
            if self.mode.is_enriched() {
                let (width, depth) = r
                    .attributes
                    .map(|a| (OutputValue::Number(a.width), OutputValue::Number(a.depth)))
                    .unwrap_or((OutputValue::Text(String::new()), OutputValue::Text(String::new())));
                row.push(width);
                row.push(depth);
            }
            row.push(OutputValue::Text(r.type_label.clone()));
            row
        })
    }
}

pub struct Assembler;

impl Assembler {
    /// 拼接全部批次
    pub fn assemble(&self, mode: TransformMode, batches: Vec<PivotBatch>) -> TransformResult<OutputTable> {
        let records: Vec<Record> = batches.into_iter().flat_map(|b| b.records).collect();
        if records.is_empty() {
            return Err(TransformError::NoDataProduced);
        }
        Ok(OutputTable { mode, records })
    }
}
