// ==========================================
// 保管箱排布表转换工具 - 文件解析器实现
// ==========================================
// 阶段 0: 文件读取与解析（无表头, 保留原始行列号）
// 支持: Excel (.xlsx/.xlsm/.xls/.xlsb/.ods) / CSV (.csv)
// ==========================================

use crate::domain::RawSheet;
use crate::importer::error::{ImportError, ImportResult};
use crate::importer::sheet_importer_trait::FileParser;
use calamine::{open_workbook_auto, Data, Reader};
use csv::ReaderBuilder;
use std::fs::File;
use std::path::Path;
use tracing::debug;

const EXCEL_EXTENSIONS: &[&str] = &["xlsx", "xlsm", "xls", "xlsb", "ods"];

fn extension_of(path: &Path) -> String {
    path.extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase()
}

fn ensure_exists(path: &Path) -> ImportResult<()> {
    if !path.exists() {
        return Err(ImportError::FileNotFound(path.display().to_string()));
    }
    Ok(())
}

// ==========================================
// CSV Parser 实现
// ==========================================
pub struct CsvParser;

impl FileParser for CsvParser {
    fn parse_to_sheet(&self, file_path: &Path, _sheet_name: Option<&str>) -> ImportResult<RawSheet> {
        ensure_exists(file_path)?;

        let ext = extension_of(file_path);
        if ext != "csv" {
            return Err(ImportError::UnsupportedFormat(ext));
        }

        // 无表头读取, 表头位置由引擎识别
        let file = File::open(file_path)?;
        let mut reader = ReaderBuilder::new()
            .has_headers(false)
            .flexible(true) // 允许行长度不一致
            .from_reader(file);

        let mut rows = Vec::new();
        for result in reader.records() {
            let record = result?;
            rows.push(record.iter().map(|v| Some(v.to_string())).collect());
        }

        let sheet = RawSheet::from_rows(rows);
        debug!(rows = sheet.height(), cols = sheet.width(), "CSV 解析完成");
        Ok(sheet)
    }
}

// ==========================================
// Excel Parser 实现
// ==========================================
pub struct ExcelParser;

impl ExcelParser {
    fn cell_to_text(cell: &Data) -> Option<String> {
        match cell {
            Data::Empty | Data::Error(_) => None,
            other => Some(other.to_string()),
        }
    }
}

impl FileParser for ExcelParser {
    fn parse_to_sheet(&self, file_path: &Path, sheet_name: Option<&str>) -> ImportResult<RawSheet> {
        ensure_exists(file_path)?;

        let ext = extension_of(file_path);
        if !EXCEL_EXTENSIONS.contains(&ext.as_str()) {
            return Err(ImportError::UnsupportedFormat(ext));
        }

        let mut workbook = open_workbook_auto(file_path)?;

        let sheet_names = workbook.sheet_names();
        let target = match sheet_name {
            Some(name) => sheet_names
                .iter()
                .find(|n| n.as_str() == name)
                .cloned()
                .ok_or_else(|| ImportError::ExcelParseError(format!("工作表不存在: {}", name)))?,
            None => sheet_names
                .first()
                .cloned()
                .ok_or_else(|| ImportError::ExcelParseError("Excel 文件无工作表".to_string()))?,
        };

        let range = workbook.worksheet_range(&target)?;

        // calamine 的 Range 从第一个非空单元格开始, 需补齐前导行列
        let (row_offset, col_offset) = range
            .start()
            .map(|(r, c)| (r as usize, c as usize))
            .unwrap_or((0, 0));

        let mut rows: Vec<Vec<Option<String>>> = vec![Vec::new(); row_offset];
        for data_row in range.rows() {
            let mut row = vec![None; col_offset];
            row.extend(data_row.iter().map(Self::cell_to_text));
            rows.push(row);
        }

        let sheet = RawSheet::from_rows(rows);
        debug!(
            sheet = %target,
            rows = sheet.height(),
            cols = sheet.width(),
            "Excel 解析完成"
        );
        Ok(sheet)
    }
}

// ==========================================
// 通用文件解析器（根据扩展名自动选择）
// ==========================================
pub struct UniversalFileParser;

impl UniversalFileParser {
    pub fn parse<P: AsRef<Path>>(&self, file_path: P, sheet_name: Option<&str>) -> ImportResult<RawSheet> {
        let path = file_path.as_ref();
        let ext = extension_of(path);

        match ext.as_str() {
            "csv" => CsvParser.parse_to_sheet(path, sheet_name),
            e if EXCEL_EXTENSIONS.contains(&e) => ExcelParser.parse_to_sheet(path, sheet_name),
            _ => {
                ensure_exists(path)?;
                Err(ImportError::UnsupportedFormat(ext))
            }
        }
    }
}

impl FileParser for UniversalFileParser {
    fn parse_to_sheet(&self, file_path: &Path, sheet_name: Option<&str>) -> ImportResult<RawSheet> {
        self.parse(file_path, sheet_name)
    }
}
