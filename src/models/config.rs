// 应用配置结构，可执行文件同目录下的 config.json，所有字段都有默认值
use crate::core::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;

/// 日志级别
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }
}

/// 日志输出格式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

/// 日志输出目标
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogOutput {
    #[default]
    Console,
    File,
    Both,
}

/// 日志配置
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct LogConfig {
    #[serde(default)]
    pub level: LogLevel,
    #[serde(default)]
    pub format: LogFormat,
    #[serde(default)]
    pub output: LogOutput,
    /// 日志目录，为空时使用用户数据目录
    #[serde(default)]
    pub file_path: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub log: LogConfig,
    /// 输入框宽度上限：20 个汉字 / 40 个英文字符
    #[serde(default = "default_input_max_weight")]
    pub input_max_weight: usize,
    /// 托盘菜单标签宽度上限
    #[serde(default = "default_display_max_weight")]
    pub display_max_weight: usize,
    /// 提交成功提示的恢复延迟（秒）
    #[serde(default = "default_status_reset_secs")]
    pub status_reset_secs: u64,
}

fn default_input_max_weight() -> usize {
    40
}

fn default_display_max_weight() -> usize {
    40
}

fn default_status_reset_secs() -> u64 {
    2
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            log: LogConfig::default(),
            input_max_weight: default_input_max_weight(),
            display_max_weight: default_display_max_weight(),
            status_reset_secs: default_status_reset_secs(),
        }
    }
}

impl AppConfig {
    /// 提交成功提示的显示时长
    pub fn status_reset_delay(&self) -> Duration {
        Duration::from_secs(self.status_reset_secs)
    }

    /// 读取配置文件，文件不存在时返回默认配置
    pub fn load(path: &Path) -> AppResult<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path).map_err(|e| AppError::io(path, e))?;
        Ok(serde_json::from_str(&content)?)
    }
}
