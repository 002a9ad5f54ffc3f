//! YAML 编解码
//!
//! 在 YAML 文本与 [`FlatMap`] 之间转换。解析交给 `serde_yaml`，这里只负责
//! 结构检查：顶层必须是映射，列表只能包含标量，嵌套层级不得超过上限。

use crate::error::{NormalizeError, Result};
use crate::models::{FlatMap, FlatValue, Scalar};
use serde_yaml::Value as Yaml;
use std::path::Path;

/// 解析 YAML 文档
///
/// 空文档得到空映射。`origin` 仅用于错误信息。
pub fn parse(text: &str, max_depth: usize, origin: &Path) -> Result<FlatMap> {
    let malformed = |message: String| NormalizeError::MalformedContent {
        path: origin.to_path_buf(),
        message,
    };

    let document: Yaml = serde_yaml::from_str(text).map_err(|e| malformed(e.to_string()))?;
    match untag(document) {
        Yaml::Null => Ok(FlatMap::new()),
        Yaml::Mapping(mapping) => mapping_to_flat(mapping, 0, max_depth).map_err(|e| match e {
            ConvertError::Depth => NormalizeError::DepthExceeded { limit: max_depth },
            ConvertError::Structure(message) => malformed(message),
        }),
        _ => Err(malformed("顶层不是映射".into())),
    }
}

/// 将映射序列化为 YAML 文本；空映射得到空字符串
pub fn to_string(map: &FlatMap) -> Result<String> {
    if map.is_empty() {
        return Ok(String::new());
    }
    Ok(serde_yaml::to_string(map)?)
}

enum ConvertError {
    Depth,
    Structure(String),
}

fn untag(value: Yaml) -> Yaml {
    match value {
        Yaml::Tagged(tagged) => untag(tagged.value),
        other => other,
    }
}

fn mapping_to_flat(
    mapping: serde_yaml::Mapping,
    depth: usize,
    max_depth: usize,
) -> std::result::Result<FlatMap, ConvertError> {
    if depth > max_depth {
        return Err(ConvertError::Depth);
    }

    let mut map = FlatMap::new();
    for (key, value) in mapping {
        let key = key_to_string(untag(key))?;
        match untag(value) {
            // null 表示未设置
            Yaml::Null => continue,
            Yaml::Mapping(child) => {
                map.insert(key, FlatValue::Map(mapping_to_flat(child, depth + 1, max_depth)?));
            }
            other => {
                map.insert(key, FlatValue::Scalar(to_scalar(other)?));
            }
        }
    }
    Ok(map)
}

fn key_to_string(key: Yaml) -> std::result::Result<String, ConvertError> {
    match key {
        Yaml::String(s) => Ok(s),
        Yaml::Number(n) => Ok(n.to_string()),
        Yaml::Bool(b) => Ok(b.to_string()),
        Yaml::Null => Ok("null".to_string()),
        _ => Err(ConvertError::Structure("映射键必须是标量".into())),
    }
}

fn to_scalar(value: Yaml) -> std::result::Result<Scalar, ConvertError> {
    match value {
        Yaml::Bool(b) => Ok(Scalar::Boolean(b)),
        Yaml::String(s) => Ok(Scalar::String(s)),
        Yaml::Number(n) => match n.as_i64() {
            Some(i) => Ok(Scalar::Integer(i)),
            None => n
                .as_f64()
                .map(Scalar::Float)
                .ok_or_else(|| ConvertError::Structure(format!("无法表示的数字 {}", n))),
        },
        Yaml::Sequence(items) => items
            .into_iter()
            .map(|item| to_scalar(untag(item)))
            .collect::<std::result::Result<Vec<_>, _>>()
            .map(Scalar::List),
        Yaml::Null => Err(ConvertError::Structure("列表中不能包含 null".into())),
        Yaml::Mapping(_) => Err(ConvertError::Structure("列表中不能包含映射".into())),
        Yaml::Tagged(tagged) => to_scalar(untag(tagged.value)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn origin() -> &'static Path {
        Path::new("test.yml")
    }

    #[test]
    fn test_parse_nested_document() {
        let map = parse(
            "world:\n  name: lobby\n  spawn:\n    x: 10\n    y: 64.5\n  pvp: false\nflags: [a, b]\n",
            64,
            origin(),
        )
        .unwrap();

        assert_eq!(map.keys().collect::<Vec<_>>(), vec!["world", "flags"]);
        let Some(FlatValue::Map(world)) = map.get("world") else {
            panic!("world should be a map");
        };
        assert_eq!(world.keys().collect::<Vec<_>>(), vec!["name", "spawn", "pvp"]);
        assert_eq!(world.get("pvp"), Some(&FlatValue::from(false)));
        assert_eq!(map.get("flags"), Some(&FlatValue::from(Scalar::from(vec!["a", "b"]))));
    }

    #[test]
    fn test_empty_document() {
        assert!(parse("", 64, origin()).unwrap().is_empty());
        assert!(parse("# only a comment\n", 64, origin()).unwrap().is_empty());
    }

    #[test]
    fn test_null_values_skipped() {
        let map = parse("a: ~\nb: 1\n", 64, origin()).unwrap();
        assert_eq!(map.keys().collect::<Vec<_>>(), vec!["b"]);
    }

    #[test]
    fn test_non_string_keys() {
        let map = parse("1: one\ntrue: yes\n", 64, origin()).unwrap();
        assert_eq!(map.keys().collect::<Vec<_>>(), vec!["1", "true"]);
    }

    #[test]
    fn test_top_level_scalar_is_malformed() {
        let err = parse("just text", 64, origin()).unwrap_err();
        assert!(matches!(err, NormalizeError::MalformedContent { .. }));
    }

    #[test]
    fn test_mapping_in_list_is_malformed() {
        let err = parse("items:\n  - name: a\n", 64, origin()).unwrap_err();
        assert!(matches!(err, NormalizeError::MalformedContent { .. }));
    }

    #[test]
    fn test_syntax_error_is_malformed() {
        let err = parse("a: [1, 2\nb: }", 64, origin()).unwrap_err();
        assert!(matches!(err, NormalizeError::MalformedContent { .. }));
    }

    #[test]
    fn test_depth_limit() {
        let text = "a:\n  b:\n    c: 1\n";
        assert!(parse(text, 2, origin()).is_ok());
        assert!(matches!(
            parse(text, 1, origin()),
            Err(NormalizeError::DepthExceeded { limit: 1 })
        ));
    }

    #[test]
    fn test_to_string_preserves_order() {
        let mut inner = FlatMap::new();
        inner.insert("z", FlatValue::from(1));
        inner.insert("a", FlatValue::from("text"));
        let mut map = FlatMap::new();
        map.insert("second", FlatValue::from(true));
        map.insert("first", FlatValue::Map(inner));

        let text = to_string(&map).unwrap();
        assert_eq!(text, "second: true\nfirst:\n  z: 1\n  a: text\n");
    }

    #[test]
    fn test_to_string_empty() {
        assert_eq!(to_string(&FlatMap::new()).unwrap(), "");
    }
}
