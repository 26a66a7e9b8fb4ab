// ==========================================
// 保管箱排布表转换工具 - 结果写出
// ==========================================
// 支持: Excel (.xlsx) / CSV (.csv), 按扩展名选择
// 单行表头 + 每条记录一行
// ==========================================

use crate::engine::assembler::{OutputTable, OutputValue};
use crate::engine::error::{TransformError, TransformResult};
use std::path::Path;
use tracing::info;

fn export_error(path: &Path, message: impl ToString) -> TransformError {
    TransformError::ExportError {
        path: path.display().to_string(),
        message: message.to_string(),
    }
}

/// 写出接口
pub trait TableWriter {
    fn write(&self, table: &OutputTable, path: &Path) -> TransformResult<()>;
}

// ==========================================
// CSV Writer
// ==========================================
pub struct CsvTableWriter;

impl TableWriter for CsvTableWriter {
    fn write(&self, table: &OutputTable, path: &Path) -> TransformResult<()> {
        let mut writer = csv::Writer::from_path(path).map_err(|e| export_error(path, e))?;

        writer
            .write_record(table.columns())
            .map_err(|e| export_error(path, e))?;
        for row in table.rows() {
            let texts: Vec<String> = row.iter().map(OutputValue::to_text).collect();
            writer.write_record(&texts).map_err(|e| export_error(path, e))?;
        }
        writer.flush().map_err(|e| export_error(path, e))?;
        Ok(())
    }
}

// ==========================================
// XLSX Writer
// ==========================================
pub struct XlsxTableWriter;

impl TableWriter for XlsxTableWriter {
    fn write(&self, table: &OutputTable, path: &Path) -> TransformResult<()> {
        let mut book = umya_spreadsheet::new_file();
        let sheet = book
            .get_sheet_mut(&0)
            .ok_or_else(|| export_error(path, "无法创建工作表"))?;

        // umya 坐标为 (列, 行), 从 1 开始
        for (col, name) in table.columns().iter().enumerate() {
            sheet
                .get_cell_mut((col as u32 + 1, 1))
                .set_value_string(name.to_string());
        }
        for (row_idx, row) in table.rows().enumerate() {
            let excel_row = row_idx as u32 + 2;
            for (col, value) in row.into_iter().enumerate() {
                let cell = sheet.get_cell_mut((col as u32 + 1, excel_row));
                match value {
                    OutputValue::Integer(v) => {
                        cell.set_value_number(v as f64);
                    }
                    OutputValue::Number(v) => {
                        cell.set_value_number(v);
                    }
                    OutputValue::Text(s) => {
                        cell.set_value_string(s);
                    }
                }
            }
        }

        umya_spreadsheet::writer::xlsx::write(&book, path).map_err(|e| export_error(path, e))?;
        Ok(())
    }
}

// ==========================================
// 通用写出器（根据扩展名自动选择）
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Csv,
    Xlsx,
}

impl OutputFormat {
    pub fn from_path(path: &Path) -> TransformResult<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_lowercase();
        match ext.as_str() {
            "csv" => Ok(OutputFormat::Csv),
            "xlsx" => Ok(OutputFormat::Xlsx),
            other => Err(export_error(
                path,
                format!("输出格式不支持: '{}'（仅支持 .xlsx/.csv）", other),
            )),
        }
    }
}

pub struct UniversalTableWriter;

impl TableWriter for UniversalTableWriter {
    fn write(&self, table: &OutputTable, path: &Path) -> TransformResult<()> {
        match OutputFormat::from_path(path)? {
            OutputFormat::Csv => CsvTableWriter.write(table, path)?,
            OutputFormat::Xlsx => XlsxTableWriter.write(table, path)?,
        }
        info!(path = %path.display(), rows = table.len(), "结果已写出");
        Ok(())
    }
}
