// ==========================================
// 木材生产排班计划 - 日历模型
// ==========================================
// 职责: 周模板 - 节假日 - 周末 → 按需生成的班次序列
// 红线: 序列惰性生成, 只展开消费者实际需要的天数
// 顺序: (日期, 当日班次顺序) 严格递增
// ==========================================

use crate::domain::calendar::{CalendarPolicy, CalendarTemplate, HolidaySet, ShiftDefinition};
use crate::domain::types::is_weekend;
use chrono::{Datelike, NaiveDate, Weekday};

// ==========================================
// CalendarSlot - 一个具体日期上的班次
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CalendarSlot<'a> {
    pub date: NaiveDate,
    pub shift_index: usize, // 当日第几个可用班次
    pub shift: &'a ShiftDefinition,
}

// ==========================================
// CalendarCursor - 日历游标
// ==========================================
// 单条产线模式下跨工单保留: 记录上一个工单停下的班次及已占用工时
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CalendarCursor {
    pub origin: NaiveDate,     // 本次运行起始日期（前瞻上限的基准）
    pub date: NaiveDate,       // 当前日期
    pub shift_index: usize,    // 当前班次
    pub consumed_hours: f64,   // 当前班次已被占用的工时
}

impl CalendarCursor {
    pub fn new(start: NaiveDate) -> Self {
        Self {
            origin: start,
            date: start,
            shift_index: 0,
            consumed_hours: 0.0,
        }
    }

    /// 该班次在游标处已被占用的工时
    pub fn consumed_in(&self, slot: &CalendarSlot<'_>) -> f64 {
        if slot.date == self.date && slot.shift_index == self.shift_index {
            self.consumed_hours
        } else {
            0.0
        }
    }
}

// ==========================================
// CalendarModel - 日历模型
// ==========================================
#[derive(Debug, Clone)]
pub struct CalendarModel {
    days: [Vec<ShiftDefinition>; 7], // 按周一..周日索引, 只保留产能 > 0 的班次
    holidays: HolidaySet,
    policy: CalendarPolicy,
    weekly_capacity_hours: f64,
}

impl CalendarModel {
    /// 构建日历模型
    ///
    /// 当日班次按 sequence 排序, 相同 sequence 保持模板录入顺序;
    /// 产能为 0 的班次没有可消费的工时, 直接丢弃。
    pub fn new(template: &CalendarTemplate, holidays: HolidaySet, policy: CalendarPolicy) -> Self {
        let mut days: [Vec<ShiftDefinition>; 7] = Default::default();

        for weekday in ALL_WEEKDAYS {
            days[weekday.num_days_from_monday() as usize] = template
                .shifts_for(weekday)
                .into_iter()
                .filter(|s| s.capacity_hours.is_finite() && s.capacity_hours > 0.0)
                .cloned()
                .collect();
        }

        let weekly_capacity_hours = ALL_WEEKDAYS
            .iter()
            .filter(|d| !(policy.skip_weekends && is_weekend(**d)))
            .flat_map(|d| days[d.num_days_from_monday() as usize].iter())
            .map(|s| s.capacity_hours)
            .sum();

        Self {
            days,
            holidays,
            policy,
            weekly_capacity_hours,
        }
    }

    pub fn policy(&self) -> CalendarPolicy {
        self.policy
    }

    pub fn holidays(&self) -> &HolidaySet {
        &self.holidays
    }

    /// 周有效产能（已扣除周末策略, 不扣节假日）
    pub fn weekly_capacity_hours(&self) -> f64 {
        self.weekly_capacity_hours
    }

    /// 周产能为 0 时任何需求都无法满足
    pub fn has_capacity(&self) -> bool {
        self.weekly_capacity_hours > 0.0
    }

    /// 是否为工作日（不考虑模板是否有班次）
    pub fn is_working_day(&self, date: NaiveDate) -> bool {
        if self.policy.skip_holidays && self.holidays.contains(&date) {
            return false;
        }
        if self.policy.skip_weekends && is_weekend(date.weekday()) {
            return false;
        }
        true
    }

    /// 某日可用班次（非工作日为空）
    pub fn shifts_on(&self, date: NaiveDate) -> &[ShiftDefinition] {
        if !self.is_working_day(date) {
            return &[];
        }
        &self.days[date.weekday().num_days_from_monday() as usize]
    }

    /// 某日可用工时
    pub fn capacity_on(&self, date: NaiveDate) -> f64 {
        self.shifts_on(date).iter().map(|s| s.capacity_hours).sum()
    }

    /// 从某日第一个班次开始的无限序列
    pub fn slots_from(&self, start: NaiveDate) -> CalendarSlots<'_> {
        self.slots_from_position(start, 0)
    }

    /// 从指定日期的指定班次开始的无限序列
    pub fn slots_from_position(&self, date: NaiveDate, shift_index: usize) -> CalendarSlots<'_> {
        CalendarSlots {
            model: self,
            date: Some(date),
            shift_index,
        }
    }
}

const ALL_WEEKDAYS: [Weekday; 7] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
    Weekday::Sun,
];

// ==========================================
// CalendarSlots - 惰性班次序列
// ==========================================
pub struct CalendarSlots<'a> {
    model: &'a CalendarModel,
    date: Option<NaiveDate>,
    shift_index: usize,
}

impl<'a> Iterator for CalendarSlots<'a> {
    type Item = CalendarSlot<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        // 周产能为 0 时不存在下一个班次, 直接结束而不是空转
        if !self.model.has_capacity() {
            return None;
        }

        loop {
            let date = self.date?;
            let shifts = self.model.shifts_on(date);

            if let Some(shift) = shifts.get(self.shift_index) {
                let slot = CalendarSlot {
                    date,
                    shift_index: self.shift_index,
                    shift,
                };
                self.shift_index += 1;
                return Some(slot);
            }

            self.date = date.succ_opt();
            self.shift_index = 0;
        }
    }
}
