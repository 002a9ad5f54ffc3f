use crate::models::ordered_map::OrderedMap;
use crate::models::scalar::{Scalar, impl_from_scalar};
use serde::Serialize;

/// 嵌套映射中的值：标量或下一层映射
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FlatValue {
    Scalar(Scalar),
    Map(FlatMap),
}

impl_from_scalar!(FlatValue::Scalar);

impl From<FlatMap> for FlatValue {
    fn from(map: FlatMap) -> Self {
        FlatValue::Map(map)
    }
}

/// 通用交换格式：有序的字符串键映射
pub type FlatMap = OrderedMap<FlatValue>;
