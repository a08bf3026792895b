// Tree value model over serde_json::Value.
// Mappings and sequences are the containers; sequence indices are exposed as
// stringified child names so both can be walked with the same step tokens.
use serde_json::Value;
use std::fmt;

use crate::error::MoveError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    Null,
    Bool,
    Number,
    String,
    Object,
    Array,
}

impl ValueKind {
    pub fn of(v: &Value) -> Self {
        match v {
            Value::Null => ValueKind::Null,
            Value::Bool(_) => ValueKind::Bool,
            Value::Number(_) => ValueKind::Number,
            Value::String(_) => ValueKind::String,
            Value::Object(_) => ValueKind::Object,
            Value::Array(_) => ValueKind::Array,
        }
    }

    pub fn is_container(self) -> bool {
        matches!(self, ValueKind::Object | ValueKind::Array)
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ValueKind::Null => "null",
            ValueKind::Bool => "bool",
            ValueKind::Number => "number",
            ValueKind::String => "string",
            ValueKind::Object => "mapping",
            ValueKind::Array => "sequence",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChildInfo {
    pub name: String,
    pub kind: ValueKind,
    pub len: Option<usize>,
}

/// Parse a sequence child name. Only the canonical decimal form counts, so
/// `"01"` and `"+1"` never name an element.
pub fn parse_index(name: &str) -> Option<usize> {
    let idx: usize = name.parse().ok()?;
    (idx.to_string() == name).then_some(idx)
}

pub fn child<'v>(v: &'v Value, name: &str) -> Option<&'v Value> {
    match v {
        Value::Object(map) => map.get(name),
        Value::Array(arr) => parse_index(name).and_then(|i| arr.get(i)),
        _ => None,
    }
}

pub fn child_mut<'v>(v: &'v mut Value, name: &str) -> Option<&'v mut Value> {
    match v {
        Value::Object(map) => map.get_mut(name),
        Value::Array(arr) => parse_index(name).and_then(|i| arr.get_mut(i)),
        _ => None,
    }
}

pub fn has_child(v: &Value, name: &str) -> bool {
    child(v, name).is_some()
}

/// Child names in the value's native order; scalars have none.
pub fn child_names(v: &Value) -> Vec<String> {
    match v {
        Value::Object(map) => map.keys().cloned().collect(),
        Value::Array(arr) => (0..arr.len()).map(|i| i.to_string()).collect(),
        _ => Vec::new(),
    }
}

pub fn children(v: &Value) -> Vec<ChildInfo> {
    fn info(name: String, v: &Value) -> ChildInfo {
        let len = match v {
            Value::Array(a) => Some(a.len()),
            Value::Object(m) => Some(m.len()),
            _ => None,
        };
        ChildInfo { name, kind: ValueKind::of(v), len }
    }
    match v {
        Value::Object(map) => map.iter().map(|(k, c)| info(k.clone(), c)).collect(),
        Value::Array(arr) => arr.iter().enumerate().map(|(i, c)| info(i.to_string(), c)).collect(),
        _ => Vec::new(),
    }
}

/// Walk `steps` down from `root`, failing on the first missing child.
pub fn resolve<'v>(root: &'v Value, steps: &[String]) -> Result<&'v Value, MoveError> {
    steps.iter().try_fold(root, |cur, name| {
        child(cur, name).ok_or_else(|| MoveError::InvalidMoveDown(name.clone()))
    })
}

pub fn resolve_mut<'v>(root: &'v mut Value, steps: &[String]) -> Result<&'v mut Value, MoveError> {
    let mut cur = root;
    for name in steps {
        cur = child_mut(cur, name).ok_or_else(|| MoveError::InvalidMoveDown(name.clone()))?;
    }
    Ok(cur)
}
