//! 配置规整服务
//!
//! 在通用交换结构与可按路径寻址的配置树之间转换，并以容错方式读写 YAML
//! 文件：所有失败都记录日志并转换为 `None`、默认值、空映射或空操作，
//! 不会向调用方传播。
//!
//! 日志通过 `tracing` 当前的分发器输出，调用方可用
//! `tracing::subscriber::with_default` 指定接收端。

use crate::config::NormalizerConfig;
use crate::error::{NormalizeError, Result};
use crate::models::{ConfigNode, FlatMap, FlatValue, Value};
use crate::services::yaml;
use std::path::Path;
use tracing::{debug, error, warn};

/// 配置规整器
#[derive(Debug, Clone, Default)]
pub struct ConfigNormalizer {
    config: NormalizerConfig,
}

impl ConfigNormalizer {
    /// 创建新的规整器
    pub fn new(config: NormalizerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &NormalizerConfig {
        &self.config
    }

    /// 读取并解析 YAML 文件，返回分类后的错误
    pub fn try_load(&self, path: impl AsRef<Path>) -> Result<ConfigNode> {
        let path = path.as_ref();
        let bytes = std::fs::read(path).map_err(|e| NormalizeError::from_io(path, e))?;
        let text = String::from_utf8(bytes).map_err(|e| NormalizeError::MalformedContent {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        let map = yaml::parse(&text, self.config.max_depth, path)?;
        self.build_section_from_map(&map)
    }

    /// 从文件加载配置
    ///
    /// 内容无效时记录 warn，文件不存在或读取失败时记录 debug，均返回 `None`。
    pub fn load_from_file(&self, path: impl AsRef<Path>) -> Option<ConfigNode> {
        let path = path.as_ref();
        match self.try_load(path) {
            Ok(node) => Some(node),
            Err(e) => {
                report_load_failure(path, &e);
                None
            }
        }
    }

    /// 解析内存中的 YAML 文本
    pub fn parse_str(&self, text: &str) -> Result<ConfigNode> {
        let map = yaml::parse(text, self.config.max_depth, Path::new("<string>"))?;
        self.build_section_from_map(&map)
    }

    /// 解析内存中的 YAML 文本，失败时记录日志并返回 `None`
    pub fn load_from_str(&self, text: &str) -> Option<ConfigNode> {
        match self.parse_str(text) {
            Ok(node) => Some(node),
            Err(e) => {
                report_load_failure(Path::new("<string>"), &e);
                None
            }
        }
    }

    /// 从文件加载配置，失败时原样返回 `fallback`
    pub fn load_or_default(&self, path: impl AsRef<Path>, fallback: ConfigNode) -> ConfigNode {
        self.load_from_file(path).unwrap_or(fallback)
    }

    /// 保存配置到文件
    ///
    /// 任一参数缺失时记录 error 并直接返回；写入失败同样只记录 error。
    pub fn save(&self, node: Option<&ConfigNode>, path: Option<&Path>) {
        let (node, path) = match (node, path) {
            (Some(node), Some(path)) => (node, path),
            (node, path) => {
                let missing = match (node.is_none(), path.is_none()) {
                    (true, true) => "node and path",
                    (true, false) => "node",
                    _ => "path",
                };
                error!(
                    missing,
                    path = ?path,
                    "Failed to save YAML: got invalid parameters"
                );
                return;
            }
        };

        let text = match yaml::to_string(&node.to_flat_map()) {
            Ok(text) => text,
            Err(e) => {
                error!(path = %path.display(), error = %e, "Failed to serialize configuration");
                return;
            }
        };

        if let Err(e) = self.write_file(path, &text) {
            let name = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default();
            error!(
                file = %name,
                path = %path.display(),
                error = %e,
                "Failed to save file '{}' to '{}'",
                name,
                path.display()
            );
        }
    }

    fn write_file(&self, path: &Path, text: &str) -> std::io::Result<()> {
        if self.config.create_parent_dirs {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent)?;
            }
        }
        std::fs::write(path, text)
    }

    /// 导出 `path` 处配置段的嵌套映射
    ///
    /// 空路径表示整棵树；节点缺失或目标不是配置段时返回空映射。
    pub fn to_flat_map(&self, node: Option<&ConfigNode>, path: &str) -> FlatMap {
        node.and_then(|n| n.section(path))
            .map(ConfigNode::to_flat_map)
            .unwrap_or_default()
    }

    /// 从通用值导出嵌套映射
    ///
    /// 配置段递归导出，映射原样返回，其它情况返回空映射。
    pub fn value_to_flat_map(&self, value: Option<&Value>) -> FlatMap {
        match value {
            Some(Value::Section(node)) => node.to_flat_map(),
            Some(Value::Mapping(map)) => map.clone(),
            Some(Value::Scalar(_)) | None => FlatMap::new(),
        }
    }

    /// 将通用值转换为配置段；已经是配置段时原样返回
    pub fn to_section(&self, value: Value) -> Result<ConfigNode> {
        match value {
            Value::Section(node) => Ok(node),
            other => self.build_section_from_map(&self.value_to_flat_map(Some(&other))),
        }
    }

    /// 由嵌套映射递归构建配置段
    ///
    /// 键通过路径接口写入，`"a.b"` 形式的键会生成嵌套配置段。
    /// 嵌套层级超过 `max_depth` 时返回 [`NormalizeError::DepthExceeded`]。
    pub fn build_section_from_map(&self, map: &FlatMap) -> Result<ConfigNode> {
        self.build_at_depth(map, 0)
    }

    fn build_at_depth(&self, map: &FlatMap, depth: usize) -> Result<ConfigNode> {
        if depth > self.config.max_depth {
            return Err(NormalizeError::DepthExceeded {
                limit: self.config.max_depth,
            });
        }

        let mut node = ConfigNode::new();
        for (key, value) in map.iter() {
            match value {
                FlatValue::Map(child) => node.set(key, self.build_at_depth(child, depth + 1)?),
                FlatValue::Scalar(scalar) => node.set(key, scalar.clone()),
            }
        }
        Ok(node)
    }

    /// 将整棵配置树序列化为 YAML 文本
    pub fn to_text(&self, node: &ConfigNode) -> String {
        match yaml::to_string(&self.to_flat_map(Some(node), "")) {
            Ok(text) => text,
            Err(e) => {
                error!(error = %e, "Failed to serialize configuration");
                String::new()
            }
        }
    }
}

fn report_load_failure(path: &Path, err: &NormalizeError) {
    match err {
        NormalizeError::ResourceUnavailable { .. } => {
            debug!(path = %path.display(), "Failed to find given file");
        }
        NormalizeError::Io { source, .. } => {
            debug!(
                path = %path.display(),
                error = %source,
                "An IO error occurred when trying to load file"
            );
        }
        other => {
            warn!(path = %path.display(), error = %other, "YAML in file is invalid");
        }
    }
}
