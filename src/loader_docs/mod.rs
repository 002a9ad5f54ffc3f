//! 加载器文档模块
//!
//! 以声明方式为加载器类型附加属性文档（属性名 + 描述的有序列表），
//! 并在启动时登记到注册表中。这里不包含任何加载逻辑。
//!
//! ```
//! use cfgutil::loader_docs;
//! use cfgutil::loader_docs::{LoaderDocRegistry, LoaderDocs};
//!
//! struct ArenaLoader;
//!
//! loader_docs!(ArenaLoader {
//!     "name" => "Display name of the arena",
//!     "spawn.x" => "Spawn X coordinate",
//! });
//!
//! let mut registry = LoaderDocRegistry::new();
//! registry.register::<ArenaLoader>();
//! assert_eq!(ArenaLoader::loader_docs().len(), 2);
//! assert!(registry.get("ArenaLoader").is_some());
//! ```

use crate::models::ConfigNode;
use serde::Serialize;

/// 单个属性的文档
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LoaderDoc {
    /// 属性名（可以是点号分隔的路径）
    pub attribute: &'static str,
    /// 描述
    pub description: &'static str,
}

impl LoaderDoc {
    pub const fn new(attribute: &'static str, description: &'static str) -> Self {
        Self {
            attribute,
            description,
        }
    }
}

/// 带有属性文档的加载器类型
pub trait LoaderDocs {
    /// 按声明顺序返回全部属性文档
    fn loader_docs() -> &'static [LoaderDoc];
}

/// 为加载器类型声明属性文档
#[macro_export]
macro_rules! loader_docs {
    ($loader:ty { $($attribute:literal => $description:literal),* $(,)? }) => {
        impl $crate::loader_docs::LoaderDocs for $loader {
            fn loader_docs() -> &'static [$crate::loader_docs::LoaderDoc] {
                const DOCS: &[$crate::loader_docs::LoaderDoc] = &[
                    $($crate::loader_docs::LoaderDoc::new($attribute, $description)),*
                ];
                DOCS
            }
        }
    };
}

/// 加载器文档注册表
#[derive(Debug, Clone, Default)]
pub struct LoaderDocRegistry {
    entries: Vec<(&'static str, &'static [LoaderDoc])>,
}

impl LoaderDocRegistry {
    /// 创建空注册表
    pub fn new() -> Self {
        Self::default()
    }

    /// 登记加载器类型；同名类型再次登记时覆盖原条目
    pub fn register<T: LoaderDocs>(&mut self) -> &mut Self {
        let name = short_type_name::<T>();
        let docs = T::loader_docs();
        match self.entries.iter_mut().find(|(n, _)| *n == name) {
            Some(entry) => entry.1 = docs,
            None => self.entries.push((name, docs)),
        }
        self
    }

    /// 按类型短名查找
    pub fn get(&self, name: &str) -> Option<&'static [LoaderDoc]> {
        self.entries
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, docs)| *docs)
    }

    /// 按登记顺序遍历
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &'static [LoaderDoc])> + '_ {
        self.entries.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// 导出为配置段：`<类型名>.<属性名>: 描述`
    pub fn to_section(&self) -> ConfigNode {
        let mut node = ConfigNode::new();
        for (name, docs) in &self.entries {
            let section = node.create_section(name);
            for doc in docs.iter() {
                section.set(doc.attribute, doc.description);
            }
        }
        node
    }
}

/// 去掉模块路径与泛型参数后的类型名
fn short_type_name<T: ?Sized>() -> &'static str {
    let full = std::any::type_name::<T>();
    let base = full.split('<').next().unwrap_or(full);
    base.rsplit("::").next().unwrap_or(base)
}

#[cfg(test)]
mod tests {
    use super::*;

    struct WarpLoader;
    struct KitLoader;
    struct Empty;

    crate::loader_docs!(WarpLoader {
        "name" => "Name of the warp",
        "location.world" => "World the warp points to",
        "location.x" => "X coordinate",
    });

    crate::loader_docs!(KitLoader {
        "items" => "Items handed out",
    });

    crate::loader_docs!(Empty {});

    #[test]
    fn test_docs_keep_declaration_order() {
        let attributes: Vec<&str> = WarpLoader::loader_docs()
            .iter()
            .map(|d| d.attribute)
            .collect();
        assert_eq!(attributes, vec!["name", "location.world", "location.x"]);
        assert!(Empty::loader_docs().is_empty());
    }

    #[test]
    fn test_registry_lookup() {
        let mut registry = LoaderDocRegistry::new();
        registry.register::<WarpLoader>().register::<KitLoader>();

        assert_eq!(registry.len(), 2);
        assert_eq!(registry.get("KitLoader").map(<[LoaderDoc]>::len), Some(1));
        assert!(registry.get("Missing").is_none());

        let names: Vec<&str> = registry.iter().map(|(name, _)| name).collect();
        assert_eq!(names, vec!["WarpLoader", "KitLoader"]);
    }

    #[test]
    fn test_register_twice_replaces() {
        let mut registry = LoaderDocRegistry::new();
        registry.register::<KitLoader>().register::<KitLoader>();
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_to_section() {
        let mut registry = LoaderDocRegistry::new();
        registry.register::<WarpLoader>();

        let node = registry.to_section();
        assert_eq!(
            node.get_string("WarpLoader.location.world"),
            Some("World the warp points to")
        );
        assert!(node.is_section("WarpLoader.location"));
    }

    #[test]
    fn test_short_type_name() {
        assert_eq!(short_type_name::<WarpLoader>(), "WarpLoader");
        assert_eq!(short_type_name::<Vec<u8>>(), "Vec");
    }
}
