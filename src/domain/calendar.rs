// ==========================================
// 木材生产排班计划 - 日历领域模型
// ==========================================
// 职责: 班次定义、周模板、节假日集合、日历策略
// ==========================================

use chrono::{NaiveDate, Weekday};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

// ==========================================
// ShiftDefinition - 班次定义
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShiftDefinition {
    pub weekday: Weekday,    // 星期
    pub shift_name: String,  // 班次名称
    pub capacity_hours: f64, // 班次时长 (h, >= 0)
    #[serde(default)]
    pub sequence: u32,       // 当日班次顺序
}

impl ShiftDefinition {
    pub fn new(weekday: Weekday, shift_name: impl Into<String>, capacity_hours: f64) -> Self {
        Self {
            weekday,
            shift_name: shift_name.into(),
            capacity_hours,
            sequence: 0,
        }
    }

    pub fn with_sequence(mut self, sequence: u32) -> Self {
        self.sequence = sequence;
        self
    }
}

// ==========================================
// CalendarTemplate - 周模板
// ==========================================
// 以 7 天为周期重复
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CalendarTemplate {
    pub shifts: Vec<ShiftDefinition>,
}

impl CalendarTemplate {
    pub fn new(shifts: Vec<ShiftDefinition>) -> Self {
        Self { shifts }
    }

    /// 每天一个同名班次、同样时长
    pub fn uniform(shift_name: &str, hours_per_day: f64) -> Self {
        let shifts = [
            Weekday::Mon,
            Weekday::Tue,
            Weekday::Wed,
            Weekday::Thu,
            Weekday::Fri,
            Weekday::Sat,
            Weekday::Sun,
        ]
        .into_iter()
        .map(|d| ShiftDefinition::new(d, shift_name, hours_per_day))
        .collect();
        Self { shifts }
    }

    pub fn with_shift(mut self, shift: ShiftDefinition) -> Self {
        self.shifts.push(shift);
        self
    }

    /// 某一星期的班次（按 sequence 排序, 相同 sequence 保持录入顺序）
    pub fn shifts_for(&self, weekday: Weekday) -> Vec<&ShiftDefinition> {
        let mut day: Vec<&ShiftDefinition> =
            self.shifts.iter().filter(|s| s.weekday == weekday).collect();
        // sort_by_key 为稳定排序
        day.sort_by_key(|s| s.sequence);
        day
    }

    /// 模板总周产能（不考虑周末策略）
    pub fn total_weekly_hours(&self) -> f64 {
        self.shifts
            .iter()
            .map(|s| s.capacity_hours.max(0.0))
            .sum()
    }
}

// ==========================================
// HolidaySet - 节假日
// ==========================================
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HolidaySet {
    dates: BTreeSet<NaiveDate>,
}

impl HolidaySet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, date: NaiveDate) -> bool {
        self.dates.insert(date)
    }

    pub fn contains(&self, date: &NaiveDate) -> bool {
        self.dates.contains(date)
    }

    pub fn len(&self) -> usize {
        self.dates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &NaiveDate> {
        self.dates.iter()
    }
}

impl FromIterator<NaiveDate> for HolidaySet {
    fn from_iter<I: IntoIterator<Item = NaiveDate>>(iter: I) -> Self {
        Self {
            dates: iter.into_iter().collect(),
        }
    }
}

// ==========================================
// CalendarPolicy - 日历跳过策略
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarPolicy {
    pub skip_weekends: bool, // 周六/周日一律停产
    pub skip_holidays: bool, // 节假日停产
}

impl Default for CalendarPolicy {
    fn default() -> Self {
        Self {
            skip_weekends: false,
            skip_holidays: true,
        }
    }
}
