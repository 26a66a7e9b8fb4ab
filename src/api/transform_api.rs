// ==========================================
// 保管箱排布表转换工具 - 转换 API
// ==========================================
// 职责: 文件级编排（路径解析 → 加载 → 转换 → 写出）
// 致命错误直接上抛, 不写出部分结果
// ==========================================

use crate::config::TransformConfig;
use crate::domain::{Group, HeaderTriple, TransformWarning};
use crate::engine::error::TransformResult;
use crate::engine::orchestrator::SheetTransformer;
use crate::exporter::{OutputFormat, TableWriter, UniversalTableWriter};
use crate::importer::{ReferenceLoader, UniversalFileParser};
use std::path::{Path, PathBuf};
use tracing::{info, instrument};

/// 转换请求
#[derive(Debug, Clone)]
pub struct TransformRequest {
    pub input_path: PathBuf,
    /// None: 输入文件名 + 后缀
    pub output_path: Option<PathBuf>,
    pub header_override: Option<HeaderTriple>,
    /// None: 输入文件同目录下的 reference_file_name
    pub reference_path: Option<PathBuf>,
}

impl TransformRequest {
    pub fn new(input_path: impl Into<PathBuf>) -> Self {
        Self {
            input_path: input_path.into(),
            output_path: None,
            header_override: None,
            reference_path: None,
        }
    }
}

/// 转换报告
#[derive(Debug, Clone)]
pub struct TransformReport {
    pub output_path: PathBuf,
    pub rows_written: usize,
    pub headers: Vec<HeaderTriple>,
    pub groups: Vec<Group>,
    pub warnings: Vec<TransformWarning>,
}

/// 默认输出路径: <stem><suffix>.<ext>
///
/// CSV 输入保持 .csv, 其他表格格式（xlsm/xls/xlsb/ods）统一写出为 .xlsx
///
/// # 示例
/// - "data/1803.xlsx" + "_transformed" → "data/1803_transformed.xlsx"
/// - "data/1803.xlsm" + "_transformed" → "data/1803_transformed.xlsx"
pub fn default_output_path(input: &Path, suffix: &str) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_default();
    let file_name = match input.extension() {
        Some(ext) if ext.to_string_lossy().eq_ignore_ascii_case("csv") => {
            format!("{}{}.{}", stem, suffix, ext.to_string_lossy())
        }
        Some(_) => format!("{}{}.xlsx", stem, suffix),
        None => format!("{}{}", stem, suffix),
    };
    input.with_file_name(file_name)
}

/// 参考表路径: 与输入文件同目录
pub fn colocated_reference_path(input: &Path, file_name: &str) -> PathBuf {
    input.with_file_name(file_name)
}

pub struct TransformApi {
    config: TransformConfig,
}

impl TransformApi {
    pub fn new(config: TransformConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &TransformConfig {
        &self.config
    }

    #[instrument(skip_all, fields(input = %request.input_path.display()))]
    pub fn run(&self, request: &TransformRequest) -> TransformResult<TransformReport> {
        self.config.validate()?;
        let output_path = request
            .output_path
            .clone()
            .unwrap_or_else(|| default_output_path(&request.input_path, &self.config.output_suffix));
        // 先校验输出格式, 避免转换后才失败
        OutputFormat::from_path(&output_path)?;

        // === 输入表格 ===
        let sheet =
            UniversalFileParser.parse(&request.input_path, self.config.sheet_name.as_deref())?;
        info!(rows = sheet.height(), cols = sheet.width(), "输入表格加载完成");

        // === 参考表 ===
        let mut warnings = Vec::new();
        let reference = if self.config.needs_reference() {
            let reference_path = request.reference_path.clone().unwrap_or_else(|| {
                colocated_reference_path(&request.input_path, &self.config.reference_file_name)
            });
            let loaded = ReferenceLoader::new().load(&reference_path)?;
            warnings.extend(loaded.warnings);
            Some(loaded.map)
        } else {
            None
        };

        // === 转换 ===
        let output = SheetTransformer::new(self.config.clone()).transform(
            &sheet,
            reference.as_ref(),
            request.header_override,
        )?;
        warnings.extend(output.warnings);

        // === 写出 ===
        UniversalTableWriter.write(&output.table, &output_path)?;

        Ok(TransformReport {
            output_path,
            rows_written: output.table.len(),
            headers: output.headers,
            groups: output.groups,
            warnings,
        })
    }
}
