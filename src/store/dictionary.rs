//! Translation dictionary: a tree of nested namespaces with string leaves.
//!
//! Dictionaries are parsed from JSON documents whose values are either
//! strings or nested objects; nothing else carries meaning for the
//! translator. Keys are addressed with dot-joined paths ("nav.home").

use anyhow::{bail, Context, Result};
use regex::Regex;
use std::collections::HashMap;
use std::sync::OnceLock;
use tracing::warn;

/// One node of the translation tree.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Leaf(String),
    Branch(HashMap<String, Node>),
}

/// The full translation tree for one language.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Dictionary {
    root: HashMap<String, Node>,
}

/// Placeholder pattern for interpolation ({{name}})
static PLACEHOLDER_REGEX: OnceLock<Regex> = OnceLock::new();

fn placeholder_regex() -> &'static Regex {
    PLACEHOLDER_REGEX
        .get_or_init(|| Regex::new(r"\{\{\s*([A-Za-z0-9_]+)\s*\}\}").unwrap())
}

impl Dictionary {
    /// Build a dictionary from a parsed JSON document.
    ///
    /// The root must be an object. String values become leaves, objects
    /// become branches; values of any other type are skipped with a
    /// warning.
    pub fn from_value(value: serde_json::Value) -> Result<Dictionary> {
        match value {
            serde_json::Value::Object(map) => Ok(Dictionary {
                root: convert_object("", map),
            }),
            other => bail!(
                "Dictionary root must be a JSON object, got {}",
                json_type_name(&other)
            ),
        }
    }

    /// Parse a dictionary from raw JSON bytes.
    pub fn from_slice(bytes: &[u8]) -> Result<Dictionary> {
        let value: serde_json::Value =
            serde_json::from_slice(bytes).context("Dictionary is not valid JSON")?;
        Self::from_value(value)
    }

    /// Resolve a dot-path key to a leaf string.
    ///
    /// Returns `None` when any segment is missing, when the path ends on a
    /// branch, or when it tries to descend through a leaf.
    pub fn resolve(&self, key: &str) -> Option<&str> {
        let mut segments = key.split('.');
        let mut node = self.root.get(segments.next()?)?;

        for segment in segments {
            match node {
                Node::Branch(children) => node = children.get(segment)?,
                Node::Leaf(_) => return None,
            }
        }

        match node {
            Node::Leaf(text) => Some(text),
            Node::Branch(_) => None,
        }
    }

    /// All dot-joined leaf paths, sorted. Used for completeness checks.
    pub fn leaf_keys(&self) -> Vec<String> {
        let mut keys = Vec::new();
        collect_leaf_keys("", &self.root, &mut keys);
        keys.sort();
        keys
    }

    /// Number of leaf strings in the tree.
    pub fn len(&self) -> usize {
        let mut keys = Vec::new();
        collect_leaf_keys("", &self.root, &mut keys);
        keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_empty()
    }
}

/// Substitute `{{name}}` placeholders from `params`.
///
/// Placeholders without a matching parameter are left verbatim.
pub fn interpolate(template: &str, params: &HashMap<String, String>) -> String {
    if params.is_empty() {
        return template.to_string();
    }

    placeholder_regex()
        .replace_all(template, |caps: &regex::Captures| {
            match params.get(&caps[1]) {
                Some(value) => value.clone(),
                None => caps[0].to_string(),
            }
        })
        .into_owned()
}

fn convert_object(
    path: &str,
    map: serde_json::Map<String, serde_json::Value>,
) -> HashMap<String, Node> {
    let mut converted = HashMap::with_capacity(map.len());

    for (key, value) in map {
        let child_path = if path.is_empty() {
            key.clone()
        } else {
            format!("{}.{}", path, key)
        };

        match value {
            serde_json::Value::String(text) => {
                converted.insert(key, Node::Leaf(text));
            }
            serde_json::Value::Object(children) => {
                let branch = Node::Branch(convert_object(&child_path, children));
                converted.insert(key, branch);
            }
            other => {
                warn!(
                    "Ignoring non-translatable value at '{}' ({})",
                    child_path,
                    json_type_name(&other)
                );
            }
        }
    }

    converted
}

fn collect_leaf_keys(path: &str, nodes: &HashMap<String, Node>, out: &mut Vec<String>) {
    for (key, node) in nodes {
        let child_path = if path.is_empty() {
            key.clone()
        } else {
            format!("{}.{}", path, key)
        };

        match node {
            Node::Leaf(_) => out.push(child_path),
            Node::Branch(children) => collect_leaf_keys(&child_path, children, out),
        }
    }
}

fn json_type_name(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "boolean",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}
