//! Task record and draft types.
//!
//! A `Task` is the canonical shape every remote record is normalized into. The
//! remote store assigns ids, so a record that has never been saved carries none.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::fields::Field;

/// Opaque identifier assigned by the remote store.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskId(String);

impl TaskId {
    /// Wrap a raw id; only the empty string is treated as absent.
    pub fn new(raw: impl Into<String>) -> Option<Self> {
        let raw = raw.into();
        if raw.is_empty() {
            None
        } else {
            Some(TaskId(raw))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The six editable fields, with their wire names. This is the request body
/// for both create and update.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskFields {
    pub title: String,
    pub due_day: String,
    pub detail: String,
    pub finish: String,
    pub priority: String,
    pub category: String,
}

impl TaskFields {
    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::Title => &self.title,
            Field::DueDay => &self.due_day,
            Field::Detail => &self.detail,
            Field::Finish => &self.finish,
            Field::Priority => &self.priority,
            Field::Category => &self.category,
        }
    }

    pub fn get_mut(&mut self, field: Field) -> &mut String {
        match field {
            Field::Title => &mut self.title,
            Field::DueDay => &mut self.due_day,
            Field::Detail => &mut self.detail,
            Field::Finish => &mut self.finish,
            Field::Priority => &mut self.priority,
            Field::Category => &mut self.category,
        }
    }
}

/// A canonical task record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<TaskId>,
    #[serde(flatten)]
    pub fields: TaskFields,
}

/// The record handed to the form. `Empty` starts a new task; `Editing` seeds
/// the form from a fetched record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Draft {
    Empty,
    Editing(Task),
}

impl Draft {
    /// Id of the record being edited, if the draft targets a stored task.
    pub fn target(&self) -> Option<&TaskId> {
        match self {
            Draft::Empty => None,
            Draft::Editing(task) => task.id.as_ref(),
        }
    }

    /// Initial working-copy values for the form.
    pub fn seed(&self) -> TaskFields {
        match self {
            Draft::Empty => TaskFields::default(),
            Draft::Editing(task) => task.fields.clone(),
        }
    }
}
