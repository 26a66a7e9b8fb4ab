// ==========================================
// 保管箱排布表转换工具 - 转换配置
// ==========================================
// 存储: JSON 文件（全部字段可选, 缺省取默认值）
// ==========================================

use crate::domain::types::{HeaderLayout, TransformMode};
use crate::domain::TypeAttributes;
use crate::importer::error::{ImportError, ImportResult};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// 默认配置常量
pub mod defaults {
    /// 表头自动定位的最大扫描行数
    pub const MAX_SCAN_ROWS: usize = 50;
    /// 叶子行中每种标记的最少出现次数
    pub const MARKER_MIN_COUNT: usize = 3;
    pub const INDEX_MARKER: &str = "№";
    pub const SIZE_MARKER: &str = "размер";
    /// 构造余量（毫米）
    pub const SIZE_MARGIN_MM: f64 = 3.0;
    /// 毫米 → 厘米
    pub const SIZE_SCALE: f64 = 10.0;
    /// 参考表缺失类型时的默认宽深
    pub const DEFAULT_WIDTH: f64 = 26.0;
    pub const DEFAULT_DEPTH: f64 = 39.0;
    pub const REFERENCE_FILE_NAME: &str = "reference.xlsx";
    pub const OUTPUT_SUFFIX: &str = "_transformed";
}

/// 转换配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransformConfig {
    pub max_scan_rows: usize,
    pub marker_min_count: usize,
    pub index_marker: String,
    pub size_marker: String,

    pub mode: TransformMode,
    pub layout: HeaderLayout,

    pub size_margin_mm: f64,
    pub size_scale: f64,

    pub default_width: f64,
    pub default_depth: f64,

    /// 参考表文件名（与输入文件同目录）
    pub reference_file_name: String,
    /// 默认输出文件名后缀
    pub output_suffix: String,
    /// 读取的工作表名, 缺省取第一张
    pub sheet_name: Option<String>,
}

impl Default for TransformConfig {
    fn default() -> Self {
        Self {
            max_scan_rows: defaults::MAX_SCAN_ROWS,
            marker_min_count: defaults::MARKER_MIN_COUNT,
            index_marker: defaults::INDEX_MARKER.to_string(),
            size_marker: defaults::SIZE_MARKER.to_string(),
            mode: TransformMode::default(),
            layout: HeaderLayout::default(),
            size_margin_mm: defaults::SIZE_MARGIN_MM,
            size_scale: defaults::SIZE_SCALE,
            default_width: defaults::DEFAULT_WIDTH,
            default_depth: defaults::DEFAULT_DEPTH,
            reference_file_name: defaults::REFERENCE_FILE_NAME.to_string(),
            output_suffix: defaults::OUTPUT_SUFFIX.to_string(),
            sheet_name: None,
        }
    }
}

impl TransformConfig {
    /// 从 JSON 文件加载
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> ImportResult<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(ImportError::FileNotFound(path.display().to_string()));
        }
        let raw = fs::read_to_string(path)?;
        let config = Self::from_json_str(&raw).map_err(|e| ImportError::ConfigReadError {
            key: path.display().to_string(),
            message: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// 校验取值范围
    ///
    /// # 规则
    /// - size_scale: 有限且 > 0
    /// - size_margin_mm / default_width / default_depth: 有限
    /// - max_scan_rows / marker_min_count: ≥ 1
    /// - index_marker / size_marker / output_suffix: 非空
    pub fn validate(&self) -> ImportResult<()> {
        let invalid = |key: &str, message: String| {
            Err(ImportError::ConfigReadError {
                key: key.to_string(),
                message,
            })
        };

        if !self.size_scale.is_finite() || self.size_scale <= 0.0 {
            return invalid("size_scale", format!("必须为正的有限数, 实际: {}", self.size_scale));
        }
        for (key, value) in [
            ("size_margin_mm", self.size_margin_mm),
            ("default_width", self.default_width),
            ("default_depth", self.default_depth),
        ] {
            if !value.is_finite() {
                return invalid(key, format!("必须为有限数, 实际: {}", value));
            }
        }
        for (key, value) in [
            ("max_scan_rows", self.max_scan_rows),
            ("marker_min_count", self.marker_min_count),
        ] {
            if value == 0 {
                return invalid(key, "必须 ≥ 1".to_string());
            }
        }
        for (key, value) in [
            ("index_marker", &self.index_marker),
            ("size_marker", &self.size_marker),
            ("output_suffix", &self.output_suffix),
        ] {
            if value.trim().is_empty() {
                return invalid(key, "不能为空".to_string());
            }
        }
        Ok(())
    }

    pub fn from_json_str(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }

    /// 参考表缺失类型时使用的宽深
    pub fn default_attributes(&self) -> TypeAttributes {
        TypeAttributes {
            width: self.default_width,
            depth: self.default_depth,
        }
    }

    /// 是否需要加载参考表
    ///
    /// Enriched 模式用于补全, MultiBlock 布局用于锚点识别。
    pub fn needs_reference(&self) -> bool {
        self.mode.is_enriched() || self.layout == HeaderLayout::MultiBlock
    }
}
