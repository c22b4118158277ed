use crate::config::error::{ConfigError, ConfigResult};
use crate::domain::calendar::CalendarPolicy;
use crate::domain::production::ThroughputSpec;
use crate::domain::types::CalendarSharing;
use crate::engine::shift_allocator::DEFAULT_MAX_LOOKAHEAD_DAYS;
use serde::{Deserialize, Serialize};

/// 计划参数（持久化对象）
///
/// 存储位置：JSON 文件（默认 `<config_dir>/wood-planner/config.json`）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlannerConfig {
    /// 目标质量等级（良率分子）
    pub target_grade: String,

    /// 设备速度（m/min）
    pub speed_m_per_min: f64,

    /// 有效作业率（0~100）
    pub availability_pct: f64,

    /// 周六/周日一律停产（与模板是否排班无关）
    pub skip_weekends: bool,

    /// 节假日停产
    pub skip_holidays: bool,

    /// 日历前瞻上限（天）
    pub max_lookahead_days: u32,

    /// 多工单日历共享策略
    pub calendar_sharing: CalendarSharing,

    /// 工作簿表名
    pub workbook: WorkbookConfig,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            target_grade: "Q1".to_string(),
            speed_m_per_min: 70.0,
            availability_pct: 100.0,
            skip_weekends: false,
            skip_holidays: true,
            max_lookahead_days: DEFAULT_MAX_LOOKAHEAD_DAYS,
            calendar_sharing: CalendarSharing::SharedLine,
            workbook: WorkbookConfig::default(),
        }
    }
}

impl PlannerConfig {
    /// 校验配置值
    pub fn validate(&self) -> ConfigResult<()> {
        if self.target_grade.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                key: "target_grade".to_string(),
                value: self.target_grade.clone(),
                message: "目标等级不能为空".to_string(),
            });
        }
        if !self.speed_m_per_min.is_finite() || self.speed_m_per_min <= 0.0 {
            return Err(ConfigError::InvalidValue {
                key: "speed_m_per_min".to_string(),
                value: self.speed_m_per_min.to_string(),
                message: "速度必须为正数".to_string(),
            });
        }
        if !self.availability_pct.is_finite()
            || self.availability_pct <= 0.0
            || self.availability_pct > 100.0
        {
            return Err(ConfigError::InvalidValue {
                key: "availability_pct".to_string(),
                value: self.availability_pct.to_string(),
                message: "作业率必须在 (0, 100] 之间".to_string(),
            });
        }
        if self.max_lookahead_days == 0 {
            return Err(ConfigError::InvalidValue {
                key: "max_lookahead_days".to_string(),
                value: "0".to_string(),
                message: "前瞻上限必须大于 0".to_string(),
            });
        }
        Ok(())
    }

    pub fn throughput(&self) -> ThroughputSpec {
        ThroughputSpec::from_percent(self.speed_m_per_min, self.availability_pct)
    }

    pub fn calendar_policy(&self) -> CalendarPolicy {
        CalendarPolicy {
            skip_weekends: self.skip_weekends,
            skip_holidays: self.skip_holidays,
        }
    }
}

/// 工作簿表名（缺省值与现场 Excel 模板一致）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkbookConfig {
    pub yield_sheet: String,
    pub item_sheet: String,
    pub hours_sheet: String,
    pub shift_sheet: String,
    pub holiday_sheet: String,
}

impl Default for WorkbookConfig {
    fn default() -> Self {
        Self {
            yield_sheet: "Table".to_string(),
            item_sheet: "Item Sizes per meter".to_string(),
            hours_sheet: "Hours per day".to_string(),
            shift_sheet: "Shifts".to_string(),
            holiday_sheet: "Holidays".to_string(),
        }
    }
}
