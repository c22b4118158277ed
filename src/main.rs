// ==========================================
// 木材生产排班计划 - 命令行入口
// ==========================================
// 用法:
//   wood-planner <workbook.xlsx|csv目录> <起始日期 YYYY-MM-DD> <规格=长度>... \
//       [--config <config.json>] [--out <导出目录>] \
//       [--sharing SHARED_LINE|INDEPENDENT] [--skip-weekends]
// 示例:
//   wood-planner plan.xlsx 2026-10-19 19x75=1000 22x100=2500 --out ./out
// ==========================================

use anyhow::{bail, Context, Result};
use chrono::NaiveDate;
use std::path::PathBuf;
use std::collections::HashMap;
use wood_planner::config::ConfigManager;
use wood_planner::domain::{CalendarSharing, PlanResult, WorkItem, YieldRatio};
use wood_planner::engine::{CalendarModel, LoadSummarizer, PlanOrchestrator};
use wood_planner::export::export_plan;
use wood_planner::importer::WorkbookLoader;
use wood_planner::logging;

struct CliArgs {
    input: PathBuf,
    start_date: NaiveDate,
    items: Vec<WorkItem>,
    config: Option<PathBuf>,
    out: Option<PathBuf>,
    sharing: Option<CalendarSharing>,
    skip_weekends: bool,
}

fn usage() -> String {
    "用法: wood-planner <workbook.xlsx|csv目录> <起始日期 YYYY-MM-DD> <规格=长度>... \
     [--config <path>] [--out <dir>] [--sharing SHARED_LINE|INDEPENDENT] [--skip-weekends]"
        .to_string()
}

fn parse_args() -> Result<CliArgs> {
    let mut positional = Vec::new();
    let mut config = None;
    let mut out = None;
    let mut sharing = None;
    let mut skip_weekends = false;

    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--config" => config = Some(PathBuf::from(args.next().context("--config 缺少路径")?)),
            "--out" => out = Some(PathBuf::from(args.next().context("--out 缺少目录")?)),
            "--sharing" => {
                let raw = args.next().context("--sharing 缺少取值")?;
                sharing = Some(
                    CalendarSharing::parse(&raw)
                        .with_context(|| format!("未知的日历共享策略: {}", raw))?,
                );
            }
            "--skip-weekends" => skip_weekends = true,
            "-h" | "--help" => bail!(usage()),
            _ => positional.push(arg),
        }
    }

    if positional.len() < 3 {
        bail!(usage());
    }

    let input = PathBuf::from(&positional[0]);
    let start_date = NaiveDate::parse_from_str(positional[1].trim(), "%Y-%m-%d")
        .with_context(|| format!("起始日期格式错误: {}", positional[1]))?;

    let mut items = Vec::new();
    for raw in &positional[2..] {
        let (batch, length) = raw
            .split_once('=')
            .with_context(|| format!("工单格式应为 规格=长度: {}", raw))?;
        let length: f64 = length
            .trim()
            .parse()
            .with_context(|| format!("长度无法解析: {}", raw))?;
        items.push(WorkItem::new(batch.trim(), length));
    }

    Ok(CliArgs {
        input,
        start_date,
        items,
        config,
        out,
        sharing,
        skip_weekends,
    })
}

fn print_yields(yields: &HashMap<String, YieldRatio>, items: &[WorkItem]) {
    println!("良率:");
    let mut seen = Vec::new();
    for item in items {
        if seen.contains(&item.batch_id.as_str()) {
            continue;
        }
        seen.push(item.batch_id.as_str());
        match yields.get(&item.batch_id) {
            Some(y) if y.is_usable() => println!(
                "  {:<12} {:>8.2}%  ({:.3} / {:.3} m3)",
                item.batch_id,
                y.pct(),
                y.qualifying_volume,
                y.total_volume
            ),
            Some(_) => println!("  {:<12} 无合格产出", item.batch_id),
            None => println!("  {:<12} 无历史数据", item.batch_id),
        }
    }
    println!();
}

fn print_plan(plan: &PlanResult, calendar: &CalendarModel) {
    println!("计划编号: {}  起始日期: {}  日历策略: {}", plan.run_id, plan.start_date, plan.sharing);
    if let Some(finish) = plan.finish_date() {
        println!("总工时: {:.3}h  完工日期: {}", plan.total_hours(), finish);
    }
    println!();
    println!(
        "{:<12} {:>12} {:>8} {:>14} {:>12} {:>10} {:>12} {:>12}",
        "规格", "需求(m)", "良率%", "投料(m)", "体积(m3)", "工时(h)", "开始", "结束"
    );
    for s in &plan.summaries {
        println!(
            "{:<12} {:>12.1} {:>8.2} {:>14.1} {:>12.3} {:>10.3} {:>12} {:>12}",
            s.batch_id,
            s.requested_length,
            s.yield_pct,
            s.adjusted_length,
            s.required_volume,
            s.required_hours,
            s.first_date.map(|d| d.to_string()).unwrap_or_else(|| "-".to_string()),
            s.last_date.map(|d| d.to_string()).unwrap_or_else(|| "-".to_string()),
        );
    }

    if !plan.skipped.is_empty() {
        println!();
        println!("未排工单:");
        for s in &plan.skipped {
            println!("  {} ({} m): {}", s.batch_id, s.requested_length, s.reason);
        }
    }

    println!();
    println!("每日负荷:");
    for day in LoadSummarizer::daily_load(&plan.schedule) {
        let items: Vec<String> = day
            .items
            .iter()
            .map(|(batch, hours)| format!("{}={:.2}h", batch, hours))
            .collect();
        let utilization = LoadSummarizer::utilization(&day, calendar.capacity_on(day.date));
        println!(
            "  {} {:>6.2}h {:>6.1}%  {}",
            day.date,
            day.total_hours,
            utilization * 100.0,
            items.join(", ")
        );
    }
}

fn main() -> Result<()> {
    logging::init();

    let args = parse_args()?;
    tracing::info!("{} v{}", wood_planner::APP_NAME, wood_planner::VERSION);

    let mut config = ConfigManager::load(args.config.as_deref())?.into_config();
    if let Some(sharing) = args.sharing {
        config.calendar_sharing = sharing;
    }
    if args.skip_weekends {
        config.skip_weekends = true;
    }

    let input = WorkbookLoader::new(config.workbook.clone())
        .load(&args.input)
        .with_context(|| format!("导入失败: {}", args.input.display()))?;

    let calendar = CalendarModel::new(
        &input.template,
        input.holidays.clone(),
        config.calendar_policy(),
    );
    let orchestrator = PlanOrchestrator::new(config);
    print_yields(&orchestrator.yields(&input), &args.items);

    let plan = orchestrator.plan(&input, &args.items, args.start_date)?;
    print_plan(&plan, &calendar);

    if let Some(out) = &args.out {
        let files = export_plan(out, &plan)?;
        println!();
        for f in files {
            println!("已导出: {}", f.display());
        }
    }

    Ok(())
}
