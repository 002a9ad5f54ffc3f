//! cfgutil - YAML 配置段工具
//!
//! 在嵌套映射与可按路径寻址的配置树之间相互转换，并以容错方式读写
//! YAML 配置文件：配置缺失或损坏时退回默认值，而不是让宿主进程崩溃。

pub mod config;
pub mod error;
pub mod loader_docs;
pub mod models;
pub mod observability;
pub mod services;

pub use error::{NormalizeError, Result};
pub use models::{ConfigNode, ConfigValue, FlatMap, FlatValue, Scalar, Value};
pub use services::ConfigNormalizer;
