//! 交换值
//!
//! 调用方传入的通用对象，按标签区分为标量、映射或配置段。

use crate::error::NormalizeError;
use crate::models::flat_map::{FlatMap, FlatValue};
use crate::models::node::ConfigNode;
use crate::models::scalar::{Scalar, impl_from_scalar};

/// 通用交换值
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// 标量
    Scalar(Scalar),
    /// 嵌套映射
    Mapping(FlatMap),
    /// 配置段
    Section(ConfigNode),
}

impl Value {
    pub fn is_section(&self) -> bool {
        matches!(self, Value::Section(_))
    }
}

impl_from_scalar!(Value::Scalar);

impl From<FlatMap> for Value {
    fn from(map: FlatMap) -> Self {
        Value::Mapping(map)
    }
}

impl From<ConfigNode> for Value {
    fn from(node: ConfigNode) -> Self {
        Value::Section(node)
    }
}

/// 从 JSON 值转换
///
/// 对象中的 `null` 条目会被忽略；列表只能包含标量。
impl TryFrom<serde_json::Value> for Value {
    type Error = NormalizeError;

    fn try_from(value: serde_json::Value) -> Result<Self, Self::Error> {
        match value {
            serde_json::Value::Object(object) => json_object_to_map(object).map(Value::Mapping),
            other => json_to_scalar(other).map(Value::Scalar),
        }
    }
}

fn json_object_to_map(
    object: serde_json::Map<String, serde_json::Value>,
) -> Result<FlatMap, NormalizeError> {
    let mut map = FlatMap::new();
    for (key, value) in object {
        match value {
            serde_json::Value::Null => continue,
            serde_json::Value::Object(child) => {
                map.insert(key, FlatValue::Map(json_object_to_map(child)?));
            }
            other => {
                map.insert(key, FlatValue::Scalar(json_to_scalar(other)?));
            }
        }
    }
    Ok(map)
}

fn json_to_scalar(value: serde_json::Value) -> Result<Scalar, NormalizeError> {
    match value {
        serde_json::Value::Bool(b) => Ok(Scalar::Boolean(b)),
        serde_json::Value::String(s) => Ok(Scalar::String(s)),
        serde_json::Value::Number(n) => match n.as_i64() {
            Some(i) => Ok(Scalar::Integer(i)),
            None => n
                .as_f64()
                .map(Scalar::Float)
                .ok_or_else(|| NormalizeError::Unsupported(format!("数字 {}", n))),
        },
        serde_json::Value::Array(items) => items
            .into_iter()
            .map(json_to_scalar)
            .collect::<Result<Vec<_>, _>>()
            .map(Scalar::List),
        serde_json::Value::Null => Err(NormalizeError::Unsupported("null".into())),
        serde_json::Value::Object(_) => Err(NormalizeError::Unsupported("列表中的对象".into())),
    }
}
