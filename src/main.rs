// ==========================================
// HTS 关税计算系统 - 命令行入口
// ==========================================
// 用法:
//   hts-tariff <line_items.csv> <参考文件...> [--out <结果.csv>] [--config <配置.json>] [--log-json]
// 输出: 未指定 --out 时以 JSON 打印输出表到 stdout
// ==========================================

use anyhow::{bail, Context, Result};
use hts_tariff::config::{ConfigManager, TariffSettings};
use hts_tariff::engine::{OutputTable, RecalcRequest, TariffCalculator};
use hts_tariff::importer::{LineItemReader, ReferenceImporter};
use hts_tariff::{export, logging};
use std::path::PathBuf;
use tracing::{info, warn};

const USAGE: &str = "用法: hts-tariff <line_items.csv> <参考文件...> [--out <结果.csv>] [--config <配置.json>] [--log-json]";

#[derive(Debug, Default)]
struct CliArgs {
    line_items: PathBuf,
    reference_files: Vec<PathBuf>,
    out: Option<PathBuf>,
    config: Option<PathBuf>,
    log_json: bool,
}

fn parse_args() -> Result<CliArgs> {
    let mut args = std::env::args().skip(1);
    let mut positional = Vec::new();
    let mut parsed = CliArgs::default();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--out" => {
                let value = args.next().context("--out 缺少文件路径")?;
                parsed.out = Some(PathBuf::from(value));
            }
            "--config" => {
                let value = args.next().context("--config 缺少文件路径")?;
                parsed.config = Some(PathBuf::from(value));
            }
            "--log-json" => parsed.log_json = true,
            "-h" | "--help" => bail!(USAGE),
            _ => positional.push(PathBuf::from(arg)),
        }
    }

    let mut positional = positional.into_iter();
    parsed.line_items = match positional.next() {
        Some(path) => path,
        None => bail!(USAGE),
    };
    parsed.reference_files = positional.collect();
    Ok(parsed)
}

fn main() -> Result<()> {
    let args = parse_args()?;

    if args.log_json {
        logging::init_json();
    } else {
        logging::init();
    }

    info!("{} v{}", hts_tariff::APP_NAME, hts_tariff::VERSION);

    // 加载配置
    let config = ConfigManager::load_default(args.config.as_deref()).context("加载配置失败")?;
    let settings = TariffSettings::from_reader(&config).context("配置值无效")?;
    info!(config = %config.get_config_snapshot()?, "生效配置");

    // 构建参考表
    let build = ReferenceImporter::new(settings.clone()).build_from_paths(&args.reference_files);
    info!(
        report = %serde_json::to_string(&build.report)?,
        "参考表构建报告"
    );

    // 读取明细并计算
    let line_items = LineItemReader
        .read_csv(&args.line_items)
        .with_context(|| format!("读取明细文件失败: {}", args.line_items.display()))?;

    let calculator = TariffCalculator::new(&settings);
    let report = calculator.evaluate_batch(&RecalcRequest::new(&build.table, &line_items));
    if let Some(notice) = report.failure_notice() {
        warn!("{}", notice);
    }

    let table = OutputTable::from_report(&report);
    match &args.out {
        Some(path) => export::write_output_csv(&table, path)
            .with_context(|| format!("导出结果失败: {}", path.display()))?,
        None => println!("{}", serde_json::to_string_pretty(&table.rows)?),
    }

    info!(total = report.total_tariffs_and_fees_usd, "处理完成");
    Ok(())
}
