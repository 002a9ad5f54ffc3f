//! 服务层模块
//!
//! 配置规整服务与 YAML 编解码。

pub mod normalizer;
pub mod yaml;

pub use normalizer::ConfigNormalizer;

use crate::config::NormalizerConfig;

/// 创建配置规整器
pub fn create_normalizer(config: NormalizerConfig) -> ConfigNormalizer {
    ConfigNormalizer::new(config)
}
