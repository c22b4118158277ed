// ==========================================
// 木材生产排班计划 - 导出层
// ==========================================
// 职责: 计划结果 → CSV / JSON
// ==========================================

pub mod error;
pub mod writer;

pub use error::{ExportError, ExportResult};
pub use writer::{
    export_plan, write_daily_load_csv, write_plan_json, write_schedule_csv, write_summary_csv,
    DAILY_LOAD_FILE, PLAN_JSON_FILE, SCHEDULE_FILE, SUMMARY_FILE,
};
