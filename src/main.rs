// ==========================================
// 保管箱排布表转换工具 - 命令行入口
// ==========================================
// 所有致命错误在此统一输出并设置退出码
// ==========================================

use clap::Parser;
use safe_layout_pivot::config::TransformConfig;
use safe_layout_pivot::domain::{HeaderLayout, HeaderTriple, TransformMode};
use safe_layout_pivot::{logging, TransformApi, TransformError, TransformRequest};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "将三级表头的保管箱排布表转换为长表 (nst, nsafe, height, Width, Depth, Type)"
)]
struct Args {
    /// 输入文件（.xlsx/.xls/.csv 等）
    input: PathBuf,

    /// 输出文件（.xlsx/.csv）, 缺省为 <输入文件名>_transformed.<扩展名>
    output: Option<PathBuf>,

    /// 显式表头行号 H0,H1,H2（0 起）, 跳过自动定位
    #[arg(long, value_name = "H0,H1,H2")]
    headers: Option<HeaderTriple>,

    /// 转换模式: enriched（换算 + 宽深）/ raw（原样尺寸）
    #[arg(long)]
    mode: Option<TransformMode>,

    /// 按参考表锚点行切分多个区块
    #[arg(long)]
    multi_block: bool,

    /// 参考表路径, 缺省为输入文件同目录下的 reference.xlsx
    #[arg(long)]
    reference: Option<PathBuf>,

    /// JSON 配置文件
    #[arg(long)]
    config: Option<PathBuf>,

    /// 工作表名, 缺省取第一张
    #[arg(long)]
    sheet: Option<String>,

    /// 输出诊断信息
    #[arg(short, long)]
    verbose: bool,
}

fn build_config(args: &Args) -> Result<TransformConfig, TransformError> {
    let mut config = match &args.config {
        Some(path) => TransformConfig::from_json_file(path)?,
        None => TransformConfig::default(),
    };
    if let Some(mode) = args.mode {
        config.mode = mode;
    }
    if args.multi_block {
        config.layout = HeaderLayout::MultiBlock;
    }
    if let Some(sheet) = &args.sheet {
        config.sheet_name = Some(sheet.clone());
    }
    config.validate()?;
    Ok(config)
}

fn run(args: &Args) -> Result<(), TransformError> {
    let config = build_config(args)?;
    let request = TransformRequest {
        input_path: args.input.clone(),
        output_path: args.output.clone(),
        header_override: args.headers,
        reference_path: args.reference.clone(),
    };

    let report = TransformApi::new(config).run(&request)?;

    if args.verbose {
        let headers: Vec<String> = report.headers.iter().map(|h| h.to_string()).collect();
        eprintln!("→ 表头行: {}", headers.join(" | "));
        let groups: Vec<String> = report
            .groups
            .iter()
            .map(|g| format!("{}({})", g.label, g.nst))
            .collect();
        eprintln!("→ 分组 {} 个: {}", groups.len(), groups.join(", "));
        for warning in &report.warnings {
            eprintln!("⚠️ {}", warning);
        }
    }

    println!(
        "✅ 已处理 {} 行, 保存到 '{}'（告警 {} 条）",
        report.rows_written,
        report.output_path.display(),
        report.warnings.len()
    );
    Ok(())
}

fn main() -> ExitCode {
    let args = Args::parse();
    logging::init(args.verbose);

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("❌ 错误 [{}]: {}", err.kind(), err);
            ExitCode::FAILURE
        }
    }
}
