//! Record normalization.
//!
//! Records in the remote collection were written by several clients over time
//! and disagree on field casing (`title` vs `Title`, `dueDay` vs `Due`). Every
//! record read from the store passes through [`normalize_item`] before anything
//! else sees it.

use serde_json::{Map, Value};

use crate::fields::Field;
use crate::task::{Task, TaskFields, TaskId};

/// Source keys probed for each field, highest priority first.
fn source_keys(field: Field) -> &'static [&'static str] {
    match field {
        Field::Title => &["title", "Title"],
        Field::DueDay => &["dueDay", "DueDay", "due", "Due"],
        Field::Detail => &["detail", "Detail"],
        Field::Finish => &["finish", "Finish"],
        Field::Priority => &["priority", "Priority"],
        Field::Category => &["category", "Category"],
    }
}

/// Map an arbitrary JSON value onto the canonical record shape.
///
/// Never fails: missing and falsy values become empty strings, and input that
/// is not an object produces an empty record.
pub fn normalize_item(raw: &Value) -> Task {
    let empty = Map::new();
    let item = raw.as_object().unwrap_or(&empty);

    let mut fields = TaskFields::default();
    for field in Field::ALL {
        *fields.get_mut(field) = first_truthy(item, source_keys(field)).unwrap_or_default();
    }

    Task {
        id: first_truthy(item, &["id"]).and_then(TaskId::new),
        fields,
    }
}

fn first_truthy(item: &Map<String, Value>, keys: &[&str]) -> Option<String> {
    keys.iter().find_map(|key| item.get(*key).and_then(truthy_text))
}

/// Text of a truthy value. `null`, `false`, `0` and `""` are falsy.
fn truthy_text(value: &Value) -> Option<String> {
    match value {
        Value::Null | Value::Bool(false) => None,
        Value::Bool(true) => Some("true".to_string()),
        Value::String(s) if s.is_empty() => None,
        Value::String(s) => Some(s.clone()),
        Value::Number(n) if n.as_f64() == Some(0.0) => None,
        Value::Number(n) => Some(n.to_string()),
        other => Some(other.to_string()),
    }
}
