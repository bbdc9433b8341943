use std::borrow::Cow;

use indexmap::IndexMap;
use schemars::JsonSchema;
use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use serde_json::{Map, Value};

/// Dot/index path to leaf value, in traversal order.
pub type FlatAnswers = Map<String, Value>;

/// Path to the single failure reported for it.
pub type FlatErrors = IndexMap<String, FieldError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub enum ErrorKind {
    Required,
    Type,
    Min,
    Max,
    #[serde(rename = "option")]
    InvalidOption,
    Pattern,
    MaxLength,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct FieldError {
    #[serde(rename = "type")]
    pub kind: ErrorKind,
    pub message: String,
}

impl FieldError {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Flattens `value` into `result` under `prefix`.
///
/// Arrays made only of primitives (including `null`) stay whole, so
/// multi-select answers survive as one value. Arrays holding objects or
/// arrays are split by index and their `null` holes are skipped. Objects are
/// split by key. A primitive at the empty root prefix is dropped.
pub fn flatten_object(value: &Value, prefix: &str, result: &mut FlatAnswers) {
    match value {
        Value::Array(items) if items.iter().all(is_primitive) => {
            if !prefix.is_empty() {
                result.insert(prefix.to_string(), value.clone());
            }
        }
        Value::Array(items) => {
            for (index, item) in items.iter().enumerate() {
                if item.is_null() {
                    continue;
                }
                flatten_object(item, &child_path(prefix, &index.to_string()), result);
            }
        }
        Value::Object(map) => {
            for (key, child) in map {
                flatten_object(child, &child_path(prefix, key), result);
            }
        }
        _ => {
            if !prefix.is_empty() {
                result.insert(prefix.to_string(), value.clone());
            }
        }
    }
}

pub fn flatten(value: &Value, prefix: &str) -> FlatAnswers {
    let mut result = FlatAnswers::new();
    flatten_object(value, prefix, &mut result);
    result
}

/// Rebuilds a nested tree from flat keys. Every segment becomes an object
/// key, so groups keyed by numbers (tooth codes, visit indices) come back
/// exactly as they went in. Use [`unflatten_like`] to restore structural
/// arrays.
pub fn unflatten(flat: &FlatAnswers) -> Value {
    let mut root = Map::new();
    for (path, value) in flat {
        let segments: Vec<&str> = path.split('.').collect();
        insert_path(&mut root, &segments, value.clone());
    }
    Value::Object(root)
}

/// Like [`unflatten`], but objects become arrays wherever `shape` holds an
/// array at the same path. Skipped holes come back as `null`.
pub fn unflatten_like(flat: &FlatAnswers, shape: &Value) -> Value {
    restore_arrays(unflatten(flat), shape)
}

// A shorter path that already holds a leaf is replaced by the deeper object.
fn insert_path(map: &mut Map<String, Value>, segments: &[&str], value: Value) {
    let Some((first, rest)) = segments.split_first() else {
        return;
    };
    if rest.is_empty() {
        map.insert((*first).to_string(), value);
        return;
    }
    let child = map
        .entry((*first).to_string())
        .or_insert_with(|| Value::Object(Map::new()));
    if !child.is_object() {
        *child = Value::Object(Map::new());
    }
    if let Value::Object(child_map) = child {
        insert_path(child_map, rest, value);
    }
}

fn restore_arrays(value: Value, shape: &Value) -> Value {
    match (value, shape) {
        (Value::Object(map), Value::Array(template)) => match into_items(map, template.len()) {
            Ok(items) => Value::Array(
                items
                    .into_iter()
                    .enumerate()
                    .map(|(index, child)| {
                        restore_arrays(child, template.get(index).unwrap_or(&Value::Null))
                    })
                    .collect(),
            ),
            Err(map) => Value::Object(map),
        },
        (Value::Object(map), Value::Object(template)) => Value::Object(
            map.into_iter()
                .map(|(key, child)| {
                    let shape = template.get(&key).unwrap_or(&Value::Null);
                    (key, restore_arrays(child, shape))
                })
                .collect(),
        ),
        (other, _) => other,
    }
}

/// Places index-keyed children into a vector of at least `min_len` items.
/// The map is handed back untouched when a key is not an index or when the
/// indices reach past both `min_len` and the number of entries.
fn into_items(map: Map<String, Value>, min_len: usize) -> Result<Vec<Value>, Map<String, Value>> {
    let indices: Option<Vec<usize>> = map.keys().map(String::as_str).map(parse_index).collect();
    let Some(indices) = indices else {
        return Err(map);
    };
    let len = match indices.iter().max() {
        Some(max) => match max.checked_add(1) {
            Some(end) => end.max(min_len),
            None => return Err(map),
        },
        None => min_len,
    };
    if len > min_len.max(map.len()) {
        return Err(map);
    }
    let mut items = vec![Value::Null; len];
    for (index, (_, child)) in indices.into_iter().zip(map) {
        items[index] = child;
    }
    Ok(items)
}

fn parse_index(key: &str) -> Option<usize> {
    if key.len() > 1 && key.starts_with('0') {
        return None;
    }
    key.parse().ok()
}

/// Nested view of path-keyed validation failures. A node can carry its own
/// error and children at the same time.
///
/// When serialized, a node's own error is written as `type` and `message`
/// entries beside its children. Child keys that would clash with those
/// entries, and child keys already starting with `~`, are written with one
/// extra leading `~`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ErrorTree {
    pub error: Option<FieldError>,
    pub children: IndexMap<String, ErrorTree>,
}

impl ErrorTree {
    pub fn is_empty(&self) -> bool {
        self.error.is_none() && self.children.is_empty()
    }

    /// Total number of errors in the tree.
    pub fn len(&self) -> usize {
        usize::from(self.error.is_some())
            + self.children.values().map(ErrorTree::len).sum::<usize>()
    }

    pub fn get(&self, path: &str) -> Option<&FieldError> {
        path.split('.')
            .try_fold(self, |node, segment| node.children.get(segment))?
            .error
            .as_ref()
    }

    fn insert(&mut self, path: &str, error: FieldError) {
        let node = path.split('.').fold(self, |node, segment| {
            node.children.entry(segment.to_string()).or_default()
        });
        node.error = Some(error);
    }
}

impl Serialize for ErrorTree {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let own = if self.error.is_some() { 2 } else { 0 };
        let mut map = serializer.serialize_map(Some(own + self.children.len()))?;
        if let Some(error) = &self.error {
            map.serialize_entry("type", &error.kind)?;
            map.serialize_entry("message", &error.message)?;
        }
        for (key, child) in &self.children {
            map.serialize_entry(&escape_child_key(key), child)?;
        }
        map.end()
    }
}

fn escape_child_key(key: &str) -> Cow<'_, str> {
    if matches!(key, "type" | "message") || key.starts_with('~') {
        Cow::Owned(format!("~{key}"))
    } else {
        Cow::Borrowed(key)
    }
}

/// Redistributes flat failures into a nested tree keyed by path segments.
pub fn nest_errors(errors: &FlatErrors) -> ErrorTree {
    let mut tree = ErrorTree::default();
    for (path, error) in errors {
        tree.insert(path, error.clone());
    }
    tree
}

fn is_primitive(value: &Value) -> bool {
    !matches!(value, Value::Array(_) | Value::Object(_))
}

fn child_path(prefix: &str, key: &str) -> String {
    if prefix.is_empty() {
        key.to_string()
    } else {
        format!("{prefix}.{key}")
    }
}
