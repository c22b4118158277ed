// ==========================================
// 木材生产排班计划 - 领域模型层
// ==========================================
// 职责: 定义领域实体与类型
// 红线: 不含文件读写逻辑, 不含引擎逻辑
// ==========================================

pub mod calendar;
pub mod production;
pub mod schedule;
pub mod types;

// 重导出核心类型
pub use calendar::{CalendarPolicy, CalendarTemplate, HolidaySet, ShiftDefinition};
pub use production::{
    BatchYieldRecord, ItemSpec, Requirement, ThroughputSpec, WorkItem, YieldRatio,
};
pub use schedule::{
    DailyLoad, ItemSummary, PlanResult, ScheduleEntry, ScheduledItemEntry, SkippedItem,
};
pub use types::CalendarSharing;
