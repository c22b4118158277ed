// ==========================================
// 木材生产排班计划 - 引擎错误类型
// ==========================================
// 工具: thiserror 派生宏
// 红线: 不允许静默除零或死循环, 一律返回结构化错误
// ==========================================

use chrono::NaiveDate;
use thiserror::Error;

/// 引擎层错误类型
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EngineError {
    // ===== 需求换算 =====
    #[error("良率无效: yield_ratio={yield_ratio}, requested_length={requested_length}（该规格无可用良率数据）")]
    InvalidYield {
        yield_ratio: f64,
        requested_length: f64,
    },

    #[error("设备产能无效: speed={speed}, availability={availability_fraction}")]
    InvalidThroughput {
        speed: f64,
        availability_fraction: f64,
    },

    #[error("需求无效: {0}")]
    InvalidRequest(String),

    #[error("规格不存在: batch_id={0}")]
    UnknownBatch(String),

    // ===== 日历分配 =====
    #[error("班次模板周产能为 0，无法分配工时")]
    EmptyCalendar,

    #[error("日历前瞻上限已到: limit={limit_date}, 未分配工时={remaining_hours:.4}h")]
    CalendarExhausted {
        limit_date: NaiveDate,
        remaining_hours: f64,
    },
}

impl EngineError {
    /// 是否只影响单个工单（其余工单可继续排产）
    pub fn is_item_level(&self) -> bool {
        matches!(
            self,
            EngineError::InvalidYield { .. }
                | EngineError::InvalidRequest(_)
                | EngineError::UnknownBatch(_)
        )
    }
}

/// Result 类型别名
pub type EngineResult<T> = Result<T, EngineError>;
