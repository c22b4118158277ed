// ==========================================
// 木材生产排班计划 - 配置管理器
// ==========================================
// 职责: 配置加载、校验、保存
// 存储: JSON 文件
// 查找顺序: 显式路径 > WOOD_PLANNER_CONFIG > 用户配置目录 > 内置默认值
// ==========================================

use crate::config::error::{ConfigError, ConfigResult};
use crate::config::planner_config::PlannerConfig;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// 配置文件路径环境变量
pub const CONFIG_PATH_ENV: &str = "WOOD_PLANNER_CONFIG";

// ==========================================
// ConfigManager - 配置管理器
// ==========================================
#[derive(Debug, Clone)]
pub struct ConfigManager {
    path: Option<PathBuf>,
    config: PlannerConfig,
}

impl ConfigManager {
    /// 仅使用内置默认值
    pub fn with_defaults() -> Self {
        Self {
            path: None,
            config: PlannerConfig::default(),
        }
    }

    /// 从指定文件加载（文件必须存在）
    pub fn load_from_path<P: AsRef<Path>>(path: P) -> ConfigResult<Self> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;

        let config: PlannerConfig =
            serde_json::from_str(&raw).map_err(|e| ConfigError::ParseError {
                path: path.display().to_string(),
                message: e.to_string(),
            })?;
        config.validate()?;

        info!(path = %path.display(), "已加载配置文件");
        Ok(Self {
            path: Some(path.to_path_buf()),
            config,
        })
    }

    /// 按默认查找顺序加载
    ///
    /// 默认路径下没有文件时返回内置默认值；
    /// 显式指定（参数或环境变量）的文件不存在时报错。
    pub fn load(explicit: Option<&Path>) -> ConfigResult<Self> {
        if let Some(path) = explicit {
            return Self::load_from_path(path);
        }

        if let Ok(path) = std::env::var(CONFIG_PATH_ENV) {
            let trimmed = path.trim();
            if !trimmed.is_empty() {
                return Self::load_from_path(trimmed);
            }
        }

        match default_config_path() {
            Some(path) if path.is_file() => Self::load_from_path(path),
            _ => {
                debug!("未找到配置文件，使用内置默认值");
                Ok(Self::with_defaults())
            }
        }
    }

    /// 保存到指定文件（自动创建父目录）
    pub fn save_to_path<P: AsRef<Path>>(&self, path: P) -> ConfigResult<()> {
        let path = path.as_ref();
        self.config.validate()?;

        let write_err = |e: std::io::Error| ConfigError::WriteError {
            path: path.display().to_string(),
            message: e.to_string(),
        };

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(write_err)?;
            }
        }

        let json = serde_json::to_string_pretty(&self.config).map_err(|e| {
            ConfigError::WriteError {
                path: path.display().to_string(),
                message: e.to_string(),
            }
        })?;
        fs::write(path, json).map_err(write_err)?;

        info!(path = %path.display(), "配置已保存");
        Ok(())
    }

    pub fn config(&self) -> &PlannerConfig {
        &self.config
    }

    /// 修改配置（修改后重新校验）
    pub fn update<F>(&mut self, f: F) -> ConfigResult<()>
    where
        F: FnOnce(&mut PlannerConfig),
    {
        let mut next = self.config.clone();
        f(&mut next);
        next.validate()?;
        self.config = next;
        Ok(())
    }

    /// 配置来源文件（内置默认值时为 None）
    pub fn source_path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn into_config(self) -> PlannerConfig {
        self.config
    }
}

/// 默认配置文件路径: `<config_dir>/wood-planner/config.json`
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("wood-planner").join("config.json"))
}
