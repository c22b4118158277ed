// ==========================================
// 木材生产排班计划 - 领域类型定义
// ==========================================
// 职责: 日历共享策略、星期解析等基础类型
// ==========================================

use chrono::Weekday;
use serde::{Deserialize, Serialize};
use std::fmt;

// ==========================================
// 日历共享策略 (Calendar Sharing)
// ==========================================
// 多个工单在同一次运行中如何使用日历
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CalendarSharing {
    /// 单条产线: 后一工单从前一工单停下的班次继续
    #[default]
    SharedLine,
    /// 独立时间线: 每个工单都从起始日期重新开始
    Independent,
}

impl fmt::Display for CalendarSharing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CalendarSharing::SharedLine => write!(f, "SHARED_LINE"),
            CalendarSharing::Independent => write!(f, "INDEPENDENT"),
        }
    }
}

impl CalendarSharing {
    /// 从字符串解析（大小写、连字符不敏感）
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_uppercase().replace('-', "_").as_str() {
            "SHARED_LINE" | "SHARED" => Some(CalendarSharing::SharedLine),
            "INDEPENDENT" => Some(CalendarSharing::Independent),
            _ => None,
        }
    }
}

// ==========================================
// 星期工具
// ==========================================

/// 解析星期标签
///
/// 支持: "Mon" / "Monday" / "mon" 以及 1..=7 (1 = 周一)
pub fn parse_weekday(raw: &str) -> Option<Weekday> {
    let value = raw.trim();
    if value.is_empty() {
        return None;
    }

    if let Ok(n) = value.parse::<u32>() {
        return match n {
            1 => Some(Weekday::Mon),
            2 => Some(Weekday::Tue),
            3 => Some(Weekday::Wed),
            4 => Some(Weekday::Thu),
            5 => Some(Weekday::Fri),
            6 => Some(Weekday::Sat),
            7 => Some(Weekday::Sun),
            _ => None,
        };
    }

    value.parse::<Weekday>().ok()
}

/// 是否为周末（周六/周日）
#[inline]
pub fn is_weekend(weekday: Weekday) -> bool {
    matches!(weekday, Weekday::Sat | Weekday::Sun)
}
