// ==========================================
// 木材生产排班计划 - 配置层
// ==========================================
// 职责: 计划参数的加载、校验与保存
// 存储: JSON 文件
// ==========================================

pub mod config_manager;
pub mod error;
pub mod planner_config;

// 重导出核心配置类型
pub use config_manager::{default_config_path, ConfigManager, CONFIG_PATH_ENV};
pub use error::{ConfigError, ConfigResult};
pub use planner_config::{PlannerConfig, WorkbookConfig};
