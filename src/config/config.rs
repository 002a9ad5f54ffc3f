use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// 规整器配置
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct NormalizerConfig {
    /// 最大嵌套层级
    pub max_depth: usize,
    /// 保存前是否创建父目录
    pub create_parent_dirs: bool,
}

impl Default for NormalizerConfig {
    fn default() -> Self {
        Self {
            max_depth: 64,
            create_parent_dirs: true,
        }
    }
}

/// 日志配置
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct LoggingConfig {
    /// 日志级别
    pub level: String,
    /// 结构化日志格式
    pub structured: bool,
    /// 日志文件路径
    pub log_dir: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".into(),
            structured: false,
            log_dir: None,
        }
    }
}

/// 应用配置
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    /// 应用名称
    pub app_name: String,
    /// 规整器配置
    pub normalizer: NormalizerConfig,
    /// 日志配置
    pub logging: LoggingConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            app_name: "cfgutil".into(),
            normalizer: NormalizerConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl AppConfig {
    /// 创建开发环境配置
    pub fn development() -> Self {
        let mut config = Self::default();
        config.logging.level = "debug".into();
        config
    }
}
