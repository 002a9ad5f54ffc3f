//! 错误处理模块
//!
//! 定义配置规整过程中的错误类型。加载与保存操作在边界处把这些错误
//! 记录为日志并转换为安全的返回值，不会向调用方传播。

use std::path::PathBuf;
use thiserror::Error;

/// 配置规整错误类型
#[derive(Error, Debug)]
pub enum NormalizeError {
    /// 内容格式错误（YAML 无法解析或结构不受支持）
    #[error("YAML 内容无效 '{}': {message}", .path.display())]
    MalformedContent { path: PathBuf, message: String },

    /// 资源不存在
    #[error("资源不存在: {}", .path.display())]
    ResourceUnavailable { path: PathBuf },

    /// IO 错误
    #[error("IO 错误 '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// 嵌套层级超过上限
    #[error("嵌套层级超过上限 {limit}")]
    DepthExceeded { limit: usize },

    /// 不支持的值
    #[error("不支持的值: {0}")]
    Unsupported(String),

    /// 序列化错误
    #[error("序列化错误: {0}")]
    Serialization(String),
}

impl NormalizeError {
    /// 将读取文件时的 IO 错误分类
    pub fn from_io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        match source.kind() {
            std::io::ErrorKind::NotFound => NormalizeError::ResourceUnavailable { path },
            _ => NormalizeError::Io { path, source },
        }
    }
}

impl From<serde_yaml::Error> for NormalizeError {
    fn from(e: serde_yaml::Error) -> Self {
        NormalizeError::Serialization(e.to_string())
    }
}

/// 结果类型别名
pub type Result<T> = std::result::Result<T, NormalizeError>;
