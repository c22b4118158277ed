// ==========================================
// 木材生产排班计划 - 班次分配引擎
// ==========================================
// 职责: 沿日历模型向前逐班次消耗工时, 直到需求满足
// 输入: 需求工时 + 日历模型 + 起始日期/游标 + 可选投料长度
// 输出: 按时间顺序的 ScheduleEntry 列表
// 红线: 不输出 0 工时记录; 单班次占用不超过该班次时长
// 红线: 周产能为 0 或超出前瞻上限时返回错误, 不允许死循环
// ==========================================

use crate::domain::schedule::ScheduleEntry;
use crate::engine::calendar_model::{CalendarCursor, CalendarModel};
use crate::engine::error::{EngineError, EngineResult};
use chrono::{Datelike, Days, NaiveDate};
use tracing::{debug, instrument, warn};

/// 工时比较容差
pub const ALLOCATION_EPSILON: f64 = 1e-9;

/// 默认前瞻上限: 5 年
pub const DEFAULT_MAX_LOOKAHEAD_DAYS: u32 = 1826;

// ==========================================
// ShiftAllocator - 班次分配引擎
// ==========================================
pub struct ShiftAllocator {
    max_lookahead_days: u32,
}

impl Default for ShiftAllocator {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_LOOKAHEAD_DAYS)
    }
}

impl ShiftAllocator {
    pub fn new(max_lookahead_days: u32) -> Self {
        Self { max_lookahead_days }
    }

    pub fn max_lookahead_days(&self) -> u32 {
        self.max_lookahead_days
    }

    /// 从起始日期分配（独立时间线）
    ///
    /// # 参数
    /// - `required_hours`: 需求工时
    /// - `calendar`: 日历模型
    /// - `start_date`: 起始日期
    /// - `total_required_quantity`: 投料长度, 提供时按工时比例分摊到各班次
    pub fn allocate(
        &self,
        required_hours: f64,
        calendar: &CalendarModel,
        start_date: NaiveDate,
        total_required_quantity: Option<f64>,
    ) -> EngineResult<Vec<ScheduleEntry>> {
        let mut cursor = CalendarCursor::new(start_date);
        self.allocate_from_cursor(required_hours, calendar, &mut cursor, total_required_quantity)
    }

    /// 从游标位置继续分配（单条产线）
    ///
    /// 游标所在班次只剩 `capacity - consumed_hours` 可用;
    /// 分配结束后游标停在最后一个被占用的班次上。
    /// 返回错误时游标保持不变。
    #[instrument(skip(self, calendar, cursor), fields(
        start_date = %cursor.date,
        weekly_capacity = calendar.weekly_capacity_hours()
    ))]
    pub fn allocate_from_cursor(
        &self,
        required_hours: f64,
        calendar: &CalendarModel,
        cursor: &mut CalendarCursor,
        total_required_quantity: Option<f64>,
    ) -> EngineResult<Vec<ScheduleEntry>> {
        if !required_hours.is_finite() || required_hours < 0.0 {
            return Err(EngineError::InvalidRequest(format!(
                "需求工时必须为非负数: {}",
                required_hours
            )));
        }

        let mut entries = Vec::new();
        if required_hours <= ALLOCATION_EPSILON {
            return Ok(entries);
        }

        if !calendar.has_capacity() {
            warn!("班次模板周产能为 0");
            return Err(EngineError::EmptyCalendar);
        }

        let limit_date = cursor
            .origin
            .checked_add_days(Days::new(u64::from(self.max_lookahead_days)))
            .unwrap_or(NaiveDate::MAX);

        let mut next_cursor = *cursor;
        let mut allocated_hours = 0.0;

        for slot in calendar.slots_from_position(cursor.date, cursor.shift_index) {
            let remaining = required_hours - allocated_hours;
            if remaining <= ALLOCATION_EPSILON {
                break;
            }

            if slot.date > limit_date {
                warn!(
                    limit_date = %limit_date,
                    remaining_hours = remaining,
                    "超出日历前瞻上限"
                );
                return Err(EngineError::CalendarExhausted {
                    limit_date,
                    remaining_hours: remaining,
                });
            }

            let already_used = next_cursor.consumed_in(&slot);
            let available = slot.shift.capacity_hours - already_used;
            if available <= ALLOCATION_EPSILON {
                continue;
            }

            let usable = available.min(remaining);
            if usable <= 0.0 {
                break;
            }

            entries.push(ScheduleEntry {
                date: slot.date,
                weekday: slot.date.weekday(),
                shift_name: slot.shift.shift_name.clone(),
                capacity_hours: slot.shift.capacity_hours,
                hours_used: usable,
                quantity_used: total_required_quantity.map(|q| q * usable / required_hours),
            });
            allocated_hours += usable;

            next_cursor.date = slot.date;
            next_cursor.shift_index = slot.shift_index;
            next_cursor.consumed_hours = already_used + usable;

            if allocated_hours >= required_hours - ALLOCATION_EPSILON {
                break;
            }
        }

        // 日期溢出导致序列提前结束
        let remaining = required_hours - allocated_hours;
        if remaining > ALLOCATION_EPSILON {
            return Err(EngineError::CalendarExhausted {
                limit_date,
                remaining_hours: remaining,
            });
        }

        debug!(
            entries = entries.len(),
            allocated_hours,
            end_date = %next_cursor.date,
            "班次分配完成"
        );

        *cursor = next_cursor;
        Ok(entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::calendar::{CalendarPolicy, CalendarTemplate, HolidaySet, ShiftDefinition};
    use chrono::Weekday;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn mon_tue_template() -> CalendarTemplate {
        CalendarTemplate::default()
            .with_shift(ShiftDefinition::new(Weekday::Mon, "Day", 8.0))
            .with_shift(ShiftDefinition::new(Weekday::Tue, "Day", 8.0))
            .with_shift(ShiftDefinition::new(Weekday::Wed, "Day", 0.0))
            .with_shift(ShiftDefinition::new(Weekday::Thu, "Day", 0.0))
            .with_shift(ShiftDefinition::new(Weekday::Fri, "Day", 0.0))
            .with_shift(ShiftDefinition::new(Weekday::Sat, "Day", 0.0))
            .with_shift(ShiftDefinition::new(Weekday::Sun, "Day", 0.0))
    }

    fn model(template: &CalendarTemplate) -> CalendarModel {
        CalendarModel::new(template, HolidaySet::new(), CalendarPolicy::default())
    }

    #[test]
    fn test_wednesday_start_skips_to_next_monday() {
        let calendar = model(&mon_tue_template());
        // 2026-10-21 为周三
        let entries = ShiftAllocator::default()
            .allocate(10.0, &calendar, ymd(2026, 10, 21), None)
            .unwrap();

        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].date, ymd(2026, 10, 26));
        assert_eq!(entries[0].weekday, Weekday::Mon);
        assert!((entries[0].hours_used - 8.0).abs() < 1e-12);
        assert_eq!(entries[1].date, ymd(2026, 10, 27));
        assert!((entries[1].hours_used - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_zero_requirement_returns_empty() {
        let calendar = model(&CalendarTemplate::uniform("Day", 0.0));
        let entries = ShiftAllocator::default()
            .allocate(0.0, &calendar, ymd(2026, 10, 19), Some(0.0))
            .unwrap();
        assert!(entries.is_empty());
    }

    #[test]
    fn test_empty_calendar_fails() {
        let calendar = model(&CalendarTemplate::uniform("Day", 0.0));
        let err = ShiftAllocator::default()
            .allocate(5.0, &calendar, ymd(2026, 10, 19), None)
            .unwrap_err();
        assert_eq!(err, EngineError::EmptyCalendar);
    }

    #[test]
    fn test_calendar_exhausted() {
        let calendar = model(&CalendarTemplate::uniform("Day", 1.0));
        let err = ShiftAllocator::new(10)
            .allocate(100.0, &calendar, ymd(2026, 10, 19), None)
            .unwrap_err();
        match err {
            EngineError::CalendarExhausted {
                limit_date,
                remaining_hours,
            } => {
                assert_eq!(limit_date, ymd(2026, 10, 29));
                // 19..=29 共 11 天, 每天 1h
                assert!((remaining_hours - 89.0).abs() < 1e-9);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_invalid_hours() {
        let calendar = model(&CalendarTemplate::uniform("Day", 8.0));
        assert!(matches!(
            ShiftAllocator::default().allocate(-1.0, &calendar, ymd(2026, 10, 19), None),
            Err(EngineError::InvalidRequest(_))
        ));
        assert!(matches!(
            ShiftAllocator::default().allocate(f64::NAN, &calendar, ymd(2026, 10, 19), None),
            Err(EngineError::InvalidRequest(_))
        ));
    }

    #[test]
    fn test_entries_respect_capacity_and_sum() {
        let template = CalendarTemplate::uniform("Early", 7.5)
            .with_shift(ShiftDefinition::new(Weekday::Wed, "Late", 3.25).with_sequence(1));
        let calendar = model(&template);
        let required = 47.123_456;

        let entries = ShiftAllocator::default()
            .allocate(required, &calendar, ymd(2026, 10, 19), Some(1000.0))
            .unwrap();

        let total: f64 = entries.iter().map(|e| e.hours_used).sum();
        assert!((total - required).abs() < 1e-9);

        let quantity: f64 = entries.iter().filter_map(|e| e.quantity_used).sum();
        assert!((quantity - 1000.0).abs() < 1e-6);

        for e in &entries {
            assert!(e.hours_used > 0.0);
            assert!(e.hours_used <= e.capacity_hours + 1e-12);
        }
        for pair in entries.windows(2) {
            assert!(pair[0].date <= pair[1].date);
        }
    }

    #[test]
    fn test_cursor_resumes_inside_partially_used_shift() {
        let calendar = model(&CalendarTemplate::uniform("Day", 8.0));
        let allocator = ShiftAllocator::default();
        let mut cursor = CalendarCursor::new(ymd(2026, 10, 19));

        let first = allocator
            .allocate_from_cursor(10.0, &calendar, &mut cursor, None)
            .unwrap();
        assert_eq!(first.len(), 2);
        assert_eq!(cursor.date, ymd(2026, 10, 20));
        assert!((cursor.consumed_hours - 2.0).abs() < 1e-12);

        let second = allocator
            .allocate_from_cursor(7.0, &calendar, &mut cursor, None)
            .unwrap();
        assert_eq!(second.len(), 2);
        assert_eq!(second[0].date, ymd(2026, 10, 20));
        assert!((second[0].hours_used - 6.0).abs() < 1e-12);
        assert_eq!(second[1].date, ymd(2026, 10, 21));
        assert!((second[1].hours_used - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_cursor_unchanged_on_error() {
        let calendar = model(&CalendarTemplate::uniform("Day", 1.0));
        let allocator = ShiftAllocator::new(3);
        let mut cursor = CalendarCursor::new(ymd(2026, 10, 19));
        let before = cursor;

        assert!(allocator
            .allocate_from_cursor(50.0, &calendar, &mut cursor, None)
            .is_err());
        assert_eq!(cursor, before);
    }
}
