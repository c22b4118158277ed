// ==========================================
// 木材生产排班计划 - 计划导出
// ==========================================
// 输出:
//   summary.csv     工单汇总
//   schedule.csv    逐班次排班
//   daily_load.csv  每日每规格工时
//   plan.json       完整计划结果
// ==========================================

use crate::domain::schedule::{DailyLoad, ItemSummary, PlanResult, ScheduledItemEntry};
use crate::engine::load_summary::LoadSummarizer;
use crate::export::error::ExportResult;
use chrono::NaiveDate;
use serde::Serialize;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::info;

pub const SUMMARY_FILE: &str = "summary.csv";
pub const SCHEDULE_FILE: &str = "schedule.csv";
pub const DAILY_LOAD_FILE: &str = "daily_load.csv";
pub const PLAN_JSON_FILE: &str = "plan.json";

// ==========================================
// CSV 行结构（列顺序即导出列顺序）
// ==========================================

#[derive(Debug, Serialize)]
struct SummaryRow<'a> {
    batch_id: &'a str,
    requested_length: f64,
    yield_pct: f64,
    adjusted_length: f64,
    required_volume: f64,
    required_hours: f64,
    first_date: Option<NaiveDate>,
    last_date: Option<NaiveDate>,
}

#[derive(Debug, Serialize)]
struct ScheduleRow<'a> {
    batch_id: &'a str,
    date: NaiveDate,
    weekday: String,
    shift_name: &'a str,
    capacity_hours: f64,
    hours_used: f64,
    quantity_used: Option<f64>,
}

#[derive(Debug, Serialize)]
struct DailyLoadRow<'a> {
    date: NaiveDate,
    batch_id: &'a str,
    hours: f64,
    day_total_hours: f64,
}

// ==========================================
// 写入器
// ==========================================

pub fn write_summary_csv<W: Write>(writer: W, summaries: &[ItemSummary]) -> ExportResult<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    for s in summaries {
        wtr.serialize(SummaryRow {
            batch_id: &s.batch_id,
            requested_length: s.requested_length,
            yield_pct: s.yield_pct,
            adjusted_length: s.adjusted_length,
            required_volume: s.required_volume,
            required_hours: s.required_hours,
            first_date: s.first_date,
            last_date: s.last_date,
        })?;
    }
    wtr.flush()?;
    Ok(())
}

pub fn write_schedule_csv<W: Write>(writer: W, schedule: &[ScheduledItemEntry]) -> ExportResult<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    for item in schedule {
        let e = &item.entry;
        wtr.serialize(ScheduleRow {
            batch_id: &item.batch_id,
            date: e.date,
            weekday: e.weekday.to_string(),
            shift_name: &e.shift_name,
            capacity_hours: e.capacity_hours,
            hours_used: e.hours_used,
            quantity_used: e.quantity_used,
        })?;
    }
    wtr.flush()?;
    Ok(())
}

pub fn write_daily_load_csv<W: Write>(writer: W, load: &[DailyLoad]) -> ExportResult<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    for day in load {
        for (batch_id, hours) in &day.items {
            wtr.serialize(DailyLoadRow {
                date: day.date,
                batch_id,
                hours: *hours,
                day_total_hours: day.total_hours,
            })?;
        }
    }
    wtr.flush()?;
    Ok(())
}

pub fn write_plan_json<W: Write>(writer: W, plan: &PlanResult) -> ExportResult<()> {
    serde_json::to_writer_pretty(writer, plan)?;
    Ok(())
}

/// 导出全部文件到目录（自动创建）, 返回写出的文件路径
pub fn export_plan(dir: &Path, plan: &PlanResult) -> ExportResult<Vec<PathBuf>> {
    fs::create_dir_all(dir)?;

    let summary_path = dir.join(SUMMARY_FILE);
    write_summary_csv(File::create(&summary_path)?, &plan.summaries)?;

    let schedule_path = dir.join(SCHEDULE_FILE);
    write_schedule_csv(File::create(&schedule_path)?, &plan.schedule)?;

    let load_path = dir.join(DAILY_LOAD_FILE);
    let load = LoadSummarizer::daily_load(&plan.schedule);
    write_daily_load_csv(File::create(&load_path)?, &load)?;

    let json_path = dir.join(PLAN_JSON_FILE);
    write_plan_json(File::create(&json_path)?, plan)?;

    info!(dir = %dir.display(), run_id = %plan.run_id, "计划已导出");
    Ok(vec![summary_path, schedule_path, load_path, json_path])
}
