//! 配置节点
//!
//! 以点号分隔路径寻址的配置树。子节点按值持有，因此结构上不可能出现环。

use crate::models::flat_map::{FlatMap, FlatValue};
use crate::models::ordered_map::OrderedMap;
use crate::models::scalar::{Scalar, impl_from_scalar};
use serde::Serialize;

/// 路径分隔符
pub const PATH_SEPARATOR: char = '.';

/// 拆分路径，忽略空段
fn segments(path: &str) -> impl Iterator<Item = &str> {
    path.split(PATH_SEPARATOR).filter(|s| !s.is_empty())
}

/// 节点下的值：标量或子配置段
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ConfigValue {
    Scalar(Scalar),
    Section(ConfigNode),
}

impl ConfigValue {
    pub fn as_scalar(&self) -> Option<&Scalar> {
        match self {
            ConfigValue::Scalar(s) => Some(s),
            ConfigValue::Section(_) => None,
        }
    }

    pub fn as_section(&self) -> Option<&ConfigNode> {
        match self {
            ConfigValue::Section(node) => Some(node),
            ConfigValue::Scalar(_) => None,
        }
    }

    /// 确保值为配置段，标量会被替换为空配置段
    fn ensure_section(&mut self) -> &mut ConfigNode {
        match self {
            ConfigValue::Section(node) => node,
            ConfigValue::Scalar(_) => {
                *self = ConfigValue::Section(ConfigNode::new());
                self.ensure_section()
            }
        }
    }
}

impl_from_scalar!(ConfigValue::Scalar);

impl From<ConfigNode> for ConfigValue {
    fn from(node: ConfigNode) -> Self {
        ConfigValue::Section(node)
    }
}

/// 配置段（配置树节点）
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ConfigNode {
    children: OrderedMap<ConfigValue>,
}

impl ConfigNode {
    /// 创建空配置段
    pub fn new() -> Self {
        Self::default()
    }

    /// 直接子节点数量
    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    /// 按插入顺序遍历直接子节点
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ConfigValue)> {
        self.children.iter()
    }

    /// 获取路径上的值；空路径返回 `None`
    pub fn get(&self, path: &str) -> Option<&ConfigValue> {
        let segments: Vec<&str> = segments(path).collect();
        let (last, parents) = segments.split_last()?;
        let mut node = self;
        for segment in parents {
            node = node.children.get(segment)?.as_section()?;
        }
        node.children.get(last)
    }

    /// 获取路径上的配置段；空路径返回自身
    pub fn section(&self, path: &str) -> Option<&ConfigNode> {
        let mut node = self;
        for segment in segments(path) {
            node = node.children.get(segment)?.as_section()?;
        }
        Some(node)
    }

    fn section_mut(&mut self, path: &str) -> Option<&mut ConfigNode> {
        let mut node = self;
        for segment in segments(path) {
            node = match node.children.get_mut(segment) {
                Some(ConfigValue::Section(child)) => child,
                _ => return None,
            };
        }
        Some(node)
    }

    pub fn contains(&self, path: &str) -> bool {
        self.get(path).is_some()
    }

    pub fn is_section(&self, path: &str) -> bool {
        matches!(self.get(path), Some(ConfigValue::Section(_)))
    }

    /// 设置路径上的值
    ///
    /// 中间配置段不存在时自动创建，途经的标量会被替换为配置段。
    /// 空路径不做任何修改。
    pub fn set(&mut self, path: &str, value: impl Into<ConfigValue>) {
        let segments: Vec<&str> = segments(path).collect();
        let Some((last, parents)) = segments.split_last() else {
            return;
        };
        let mut node = self;
        for segment in parents {
            node = node
                .children
                .get_or_insert_with(segment, || ConfigValue::Section(ConfigNode::new()))
                .ensure_section();
        }
        node.children.insert(*last, value.into());
    }

    /// 创建（或获取已有的）配置段
    pub fn create_section(&mut self, path: &str) -> &mut ConfigNode {
        let mut node = self;
        for segment in segments(path) {
            node = node
                .children
                .get_or_insert_with(segment, || ConfigValue::Section(ConfigNode::new()))
                .ensure_section();
        }
        node
    }

    /// 移除路径上的值
    pub fn remove(&mut self, path: &str) -> Option<ConfigValue> {
        let segments: Vec<&str> = segments(path).collect();
        let (last, parents) = segments.split_last()?;
        let parent = self.section_mut(&parents.join(&PATH_SEPARATOR.to_string()))?;
        parent.children.remove(last)
    }

    pub fn get_scalar(&self, path: &str) -> Option<&Scalar> {
        self.get(path).and_then(ConfigValue::as_scalar)
    }

    pub fn get_string(&self, path: &str) -> Option<&str> {
        self.get_scalar(path).and_then(Scalar::as_str)
    }

    pub fn get_i64(&self, path: &str) -> Option<i64> {
        self.get_scalar(path).and_then(Scalar::as_i64)
    }

    pub fn get_f64(&self, path: &str) -> Option<f64> {
        self.get_scalar(path).and_then(Scalar::as_f64)
    }

    pub fn get_bool(&self, path: &str) -> Option<bool> {
        self.get_scalar(path).and_then(Scalar::as_bool)
    }

    pub fn get_list(&self, path: &str) -> Option<&[Scalar]> {
        self.get_scalar(path).and_then(Scalar::as_list)
    }

    /// 返回键列表
    ///
    /// `deep` 为 true 时按深度优先顺序返回树中所有完整路径（包含配置段本身）。
    pub fn keys(&self, deep: bool) -> Vec<String> {
        self.values(deep).into_iter().map(|(path, _)| path).collect()
    }

    /// 返回路径与值的列表，规则同 [`ConfigNode::keys`]
    pub fn values(&self, deep: bool) -> Vec<(String, &ConfigValue)> {
        let mut out = Vec::new();
        self.collect_values("", deep, &mut out);
        out
    }

    fn collect_values<'a>(
        &'a self,
        prefix: &str,
        deep: bool,
        out: &mut Vec<(String, &'a ConfigValue)>,
    ) {
        for (key, value) in self.children.iter() {
            let path = if prefix.is_empty() {
                key.to_string()
            } else {
                format!("{}{}{}", prefix, PATH_SEPARATOR, key)
            };
            out.push((path.clone(), value));
            if deep {
                if let ConfigValue::Section(child) = value {
                    child.collect_values(&path, deep, out);
                }
            }
        }
    }

    /// 递归导出为嵌套映射
    pub fn to_flat_map(&self) -> FlatMap {
        self.children
            .iter()
            .map(|(key, value)| {
                let value = match value {
                    ConfigValue::Scalar(s) => FlatValue::Scalar(s.clone()),
                    ConfigValue::Section(child) => FlatValue::Map(child.to_flat_map()),
                };
                (key, value)
            })
            .collect()
    }
}
