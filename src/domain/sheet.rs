// ==========================================
// 保管箱排布表转换工具 - 原始表格模型
// ==========================================
// RawSheet: 无类型单元格网格（行号/列号与源工作表一致, 0 起）
// HeaderTriple: 三行表头行号
// Block: 多区块模式下的行区间
// ==========================================

use std::fmt;
use std::str::FromStr;

/// 原始表格（只读）
///
/// 单元格在载入时已 TRIM, 空白单元格为 None。
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawSheet {
    rows: Vec<Vec<Option<String>>>,
    width: usize,
}

impl RawSheet {
    /// 由行数据构建, 短行补齐为矩形
    pub fn from_rows(mut rows: Vec<Vec<Option<String>>>) -> Self {
        let width = rows.iter().map(|r| r.len()).max().unwrap_or(0);
        for row in rows.iter_mut() {
            row.resize(width, None);
            for cell in row.iter_mut() {
                *cell = normalize_cell(cell.take());
            }
        }
        Self { rows, width }
    }

    /// 由文本行构建（空串视为空单元格）
    pub fn from_text_rows<S: AsRef<str>>(rows: &[Vec<S>]) -> Self {
        Self::from_rows(
            rows.iter()
                .map(|r| r.iter().map(|c| Some(c.as_ref().to_string())).collect())
                .collect(),
        )
    }

    pub fn height(&self) -> usize {
        self.rows.len()
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn row(&self, row: usize) -> Option<&[Option<String>]> {
        self.rows.get(row).map(|r| r.as_slice())
    }

    pub fn cell(&self, row: usize, col: usize) -> Option<&str> {
        self.rows
            .get(row)
            .and_then(|r| r.get(col))
            .and_then(|c| c.as_deref())
    }

    /// 某行的非空值
    pub fn row_values(&self, row: usize) -> impl Iterator<Item = &str> {
        self.rows
            .get(row)
            .into_iter()
            .flat_map(|r| r.iter().filter_map(|c| c.as_deref()))
    }
}

fn normalize_cell(cell: Option<String>) -> Option<String> {
    cell.and_then(|v| {
        let trimmed = v.trim();
        if trimmed.is_empty() {
            None
        } else if trimmed.len() == v.len() {
            Some(v)
        } else {
            Some(trimmed.to_string())
        }
    })
}

// ==========================================
// HeaderTriple - 三行表头
// ==========================================
// h0: 类型行, h1: 分组行, h2: 叶子行（№ / размер）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeaderTriple {
    pub h0: usize,
    pub h1: usize,
    pub h2: usize,
}

impl HeaderTriple {
    /// 严格递增校验
    pub fn new(h0: usize, h1: usize, h2: usize) -> Result<Self, String> {
        if h0 < h1 && h1 < h2 {
            Ok(Self { h0, h1, h2 })
        } else {
            Err(format!("表头行号必须严格递增: {},{},{}", h0, h1, h2))
        }
    }

    /// 以叶子行为基准的连续三行
    pub fn ending_at(h2: usize) -> Option<Self> {
        if h2 < 2 {
            return None;
        }
        Some(Self {
            h0: h2 - 2,
            h1: h2 - 1,
            h2,
        })
    }

    /// 以类型行为基准的连续三行
    pub fn starting_at(h0: usize) -> Self {
        Self {
            h0,
            h1: h0 + 1,
            h2: h0 + 2,
        }
    }

    /// 数据起始行
    pub fn data_start(&self) -> usize {
        self.h2 + 1
    }
}

impl fmt::Display for HeaderTriple {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{},{}", self.h0, self.h1, self.h2)
    }
}

impl FromStr for HeaderTriple {
    type Err = String;

    /// 解析 "H0,H1,H2"
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split(',').map(|p| p.trim()).collect();
        if parts.len() != 3 {
            return Err(format!("表头行号格式应为 H0,H1,H2, 实际: {}", s));
        }
        let mut nums = [0usize; 3];
        for (slot, part) in nums.iter_mut().zip(parts.iter()) {
            *slot = part
                .parse::<usize>()
                .map_err(|_| format!("表头行号不是非负整数: {}", part))?;
        }
        HeaderTriple::new(nums[0], nums[1], nums[2])
    }
}

// ==========================================
// Block - 多区块模式的行区间（闭区间）
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Block {
    pub start: usize,
    pub end: usize,
}

impl Block {
    pub fn header(&self) -> HeaderTriple {
        HeaderTriple::starting_at(self.start)
    }

    pub fn len(&self) -> usize {
        self.end + 1 - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.end < self.start
    }

    /// 三行表头之后至少一行数据
    pub fn has_data_rows(&self) -> bool {
        self.len() > 3
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_rows_pads_and_trims() {
        let sheet = RawSheet::from_rows(vec![
            vec![Some("  a ".to_string())],
            vec![None, Some("   ".to_string()), Some("c".to_string())],
        ]);
        assert_eq!(sheet.width(), 3);
        assert_eq!(sheet.height(), 2);
        assert_eq!(sheet.cell(0, 0), Some("a"));
        assert_eq!(sheet.cell(0, 2), None);
        assert_eq!(sheet.cell(1, 1), None);
        assert_eq!(sheet.cell(1, 2), Some("c"));
        assert_eq!(sheet.cell(9, 9), None);
    }

    #[test]
    fn test_header_triple_parse() {
        let triple: HeaderTriple = "3, 4,5".parse().unwrap();
        assert_eq!(triple, HeaderTriple { h0: 3, h1: 4, h2: 5 });
        assert_eq!(triple.data_start(), 6);

        assert!("3,4".parse::<HeaderTriple>().is_err());
        assert!("5,4,3".parse::<HeaderTriple>().is_err());
        assert!("a,b,c".parse::<HeaderTriple>().is_err());
    }

    #[test]
    fn test_header_triple_ending_at() {
        assert_eq!(HeaderTriple::ending_at(1), None);
        assert_eq!(
            HeaderTriple::ending_at(2),
            Some(HeaderTriple { h0: 0, h1: 1, h2: 2 })
        );
    }

    #[test]
    fn test_block_bounds() {
        let block = Block { start: 40, end: 43 };
        assert_eq!(block.len(), 4);
        assert!(block.has_data_rows());
        assert_eq!(block.header(), HeaderTriple { h0: 40, h1: 41, h2: 42 });

        let short = Block { start: 0, end: 2 };
        assert!(!short.has_data_rows());
    }
}
