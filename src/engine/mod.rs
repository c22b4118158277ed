// ==========================================
// 木材生产排班计划 - 引擎层
// ==========================================
// 职责: 良率计算、需求换算、日历模型、班次分配
// 红线: 引擎为纯计算, 不读写文件
// ==========================================

pub mod calendar_model;
pub mod error;
pub mod load_summary;
pub mod orchestrator;
pub mod requirement_translator;
pub mod shift_allocator;
pub mod yield_calculator;

// 重导出核心引擎
pub use calendar_model::{CalendarCursor, CalendarModel, CalendarSlot, CalendarSlots};
pub use error::{EngineError, EngineResult};
pub use load_summary::LoadSummarizer;
pub use orchestrator::{PlanOrchestrator, PlanningInput};
pub use requirement_translator::RequirementTranslator;
pub use shift_allocator::{ShiftAllocator, ALLOCATION_EPSILON, DEFAULT_MAX_LOOKAHEAD_DAYS};
pub use yield_calculator::YieldCalculator;
