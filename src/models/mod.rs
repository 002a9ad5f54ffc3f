//! 数据模型模块
//!
//! 配置树、嵌套映射与通用交换值。

pub mod flat_map;
pub mod node;
pub mod ordered_map;
pub mod scalar;
pub mod value;

pub use flat_map::{FlatMap, FlatValue};
pub use node::{ConfigNode, ConfigValue, PATH_SEPARATOR};
pub use ordered_map::OrderedMap;
pub use scalar::Scalar;
pub use value::Value;
