// ==========================================
// 木材生产排班计划 - 排班结果领域模型
// ==========================================
// 红线: 排班记录一次生成, 之后只读
// ==========================================

use crate::domain::types::CalendarSharing;
use chrono::{NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

// ==========================================
// ScheduleEntry - 单个班次的占用记录
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleEntry {
    pub date: NaiveDate,              // 日期
    pub weekday: Weekday,             // 星期
    pub shift_name: String,           // 班次
    pub capacity_hours: f64,          // 班次时长
    pub hours_used: f64,              // 占用工时 (0, capacity_hours]
    pub quantity_used: Option<f64>,   // 按工时比例分摊的投料长度
}

impl ScheduleEntry {
    /// "Mon/Early" 形式的星期-班次标签
    pub fn weekday_shift_name(&self) -> String {
        format!("{}/{}", self.weekday, self.shift_name)
    }
}

// ==========================================
// ScheduledItemEntry - 带工单归属的排班记录
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduledItemEntry {
    pub batch_id: String,
    #[serde(flatten)]
    pub entry: ScheduleEntry,
}

// ==========================================
// ItemSummary - 工单汇总
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemSummary {
    pub batch_id: String,
    pub requested_length: f64,
    pub yield_ratio: f64,
    pub yield_pct: f64,
    pub adjusted_length: f64,
    pub required_volume: f64,
    pub required_hours: f64,
    pub first_date: Option<NaiveDate>, // 首个占用日期 (零需求时为空)
    pub last_date: Option<NaiveDate>,  // 最后占用日期
    pub entry_count: usize,
}

// ==========================================
// SkippedItem - 未排工单
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkippedItem {
    pub batch_id: String,
    pub requested_length: f64,
    pub reason: String,
}

// ==========================================
// DailyLoad - 日负荷
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyLoad {
    pub date: NaiveDate,
    pub total_hours: f64,
    pub items: Vec<(String, f64)>, // (batch_id, 当日工时), 按首次出现顺序
}

// ==========================================
// PlanResult - 一次计划运行的完整输出
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanResult {
    pub run_id: String,
    pub start_date: NaiveDate,
    pub sharing: CalendarSharing,
    pub summaries: Vec<ItemSummary>,
    pub schedule: Vec<ScheduledItemEntry>,
    pub skipped: Vec<SkippedItem>,
}

impl PlanResult {
    /// 排班总工时
    pub fn total_hours(&self) -> f64 {
        self.schedule.iter().map(|e| e.entry.hours_used).sum()
    }

    /// 最后一个占用日期
    pub fn finish_date(&self) -> Option<NaiveDate> {
        self.schedule.iter().map(|e| e.entry.date).max()
    }

    /// 某工单的排班记录
    pub fn entries_for<'a>(&'a self, batch_id: &'a str) -> impl Iterator<Item = &'a ScheduleEntry> + 'a {
        self.schedule
            .iter()
            .filter(move |e| e.batch_id == batch_id)
            .map(|e| &e.entry)
    }
}
