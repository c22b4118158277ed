// ==========================================
// 木材生产排班计划 - 核心库
// ==========================================
// 流程: 历史良率 → 需求换算 → 班次日历分配 → 排班表
// 定位: 单产线、单次贪心分配, 不做优化求解
// ==========================================

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 实体与类型
pub mod domain;

// 引擎层 - 计算规则
pub mod engine;

// 导入层 - 工作簿 / CSV
pub mod importer;

// 导出层 - CSV / JSON
pub mod export;

// 配置层 - 计划参数
pub mod config;

// 日志系统
pub mod logging;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域类型
pub use domain::{
    BatchYieldRecord, CalendarPolicy, CalendarSharing, CalendarTemplate, DailyLoad, HolidaySet,
    ItemSpec, ItemSummary, PlanResult, Requirement, ScheduleEntry, ScheduledItemEntry,
    ShiftDefinition, SkippedItem, ThroughputSpec, WorkItem, YieldRatio,
};

// 引擎
pub use engine::{
    CalendarModel, EngineError, LoadSummarizer, PlanOrchestrator, PlanningInput,
    RequirementTranslator, ShiftAllocator, YieldCalculator,
};

// 配置 / 导入
pub use config::{ConfigManager, PlannerConfig};
pub use importer::WorkbookLoader;

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "木材生产排班计划";
