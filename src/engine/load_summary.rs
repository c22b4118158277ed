// ==========================================
// 木材生产排班计划 - 日负荷汇总
// ==========================================
// 职责: 排班记录 → 每日总工时 / 每日各规格工时
// ==========================================

use crate::domain::schedule::{DailyLoad, ScheduledItemEntry};
use chrono::NaiveDate;
use std::collections::BTreeMap;

pub struct LoadSummarizer;

impl LoadSummarizer {
    /// 按日期汇总（日期升序; 当日规格按首次出现顺序）
    pub fn daily_load(schedule: &[ScheduledItemEntry]) -> Vec<DailyLoad> {
        let mut by_date: BTreeMap<NaiveDate, Vec<(String, f64)>> = BTreeMap::new();

        for item in schedule {
            let day = by_date.entry(item.entry.date).or_default();
            match day.iter_mut().find(|(batch, _)| *batch == item.batch_id) {
                Some((_, hours)) => *hours += item.entry.hours_used,
                None => day.push((item.batch_id.clone(), item.entry.hours_used)),
            }
        }

        by_date
            .into_iter()
            .map(|(date, items)| DailyLoad {
                date,
                total_hours: items.iter().map(|(_, h)| h).sum(),
                items,
            })
            .collect()
    }

    /// 每日占用率 = 当日已用工时 / 当日可用工时
    pub fn utilization(load: &DailyLoad, capacity_hours: f64) -> f64 {
        if capacity_hours <= 0.0 {
            return 0.0;
        }
        load.total_hours / capacity_hours
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::schedule::ScheduleEntry;
    use chrono::Datelike;

    fn entry(batch: &str, date: NaiveDate, shift: &str, hours: f64) -> ScheduledItemEntry {
        ScheduledItemEntry {
            batch_id: batch.to_string(),
            entry: ScheduleEntry {
                date,
                weekday: date.weekday(),
                shift_name: shift.to_string(),
                capacity_hours: 8.0,
                hours_used: hours,
                quantity_used: None,
            },
        }
    }

    #[test]
    fn test_daily_load_groups_by_date_and_item() {
        let d1 = NaiveDate::from_ymd_opt(2026, 10, 19).unwrap();
        let d2 = NaiveDate::from_ymd_opt(2026, 10, 20).unwrap();
        let schedule = vec![
            entry("A", d1, "Early", 8.0),
            entry("A", d1, "Late", 2.0),
            entry("B", d1, "Late", 4.0),
            entry("B", d2, "Early", 3.0),
        ];

        let load = LoadSummarizer::daily_load(&schedule);
        assert_eq!(load.len(), 2);
        assert_eq!(load[0].date, d1);
        assert!((load[0].total_hours - 14.0).abs() < 1e-12);
        assert_eq!(
            load[0].items,
            vec![("A".to_string(), 10.0), ("B".to_string(), 4.0)]
        );
        assert_eq!(load[1].items, vec![("B".to_string(), 3.0)]);

        assert!((LoadSummarizer::utilization(&load[0], 16.0) - 0.875).abs() < 1e-12);
        assert_eq!(LoadSummarizer::utilization(&load[0], 0.0), 0.0);
    }

    #[test]
    fn test_empty_schedule() {
        assert!(LoadSummarizer::daily_load(&[]).is_empty());
    }
}
