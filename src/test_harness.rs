//! In-memory collaborators for controller tests.

use std::cell::RefCell;
use std::sync::{Mutex, MutexGuard};

use serde_json::{json, Value};

use crate::api::TaskStore;
use crate::error::ApiError;
use crate::surface::{Notice, Surface};
use crate::task::{TaskFields, TaskId};

/// A request seen by [`MemoryStore`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    List,
    Get(String),
    Create(TaskFields),
    Update(String, TaskFields),
    Delete(String),
}

/// Fake remote collection that records every call.
#[derive(Default)]
pub struct MemoryStore {
    records: RefCell<Vec<Value>>,
    calls: RefCell<Vec<Call>>,
    fail_next: RefCell<Option<ApiError>>,
}

impl MemoryStore {
    pub fn with_records(records: Vec<Value>) -> Self {
        Self {
            records: RefCell::new(records),
            ..Self::default()
        }
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.borrow().clone()
    }

    pub fn clear_calls(&self) {
        self.calls.borrow_mut().clear();
    }

    pub fn records(&self) -> Vec<Value> {
        self.records.borrow().clone()
    }

    /// Make the next call answer with a non-success status.
    pub fn fail_next_with_status(&self, status: u16) {
        *self.fail_next.borrow_mut() = Some(ApiError::Status {
            method: "TEST",
            url: "memory://Tasks".to_string(),
            status,
        });
    }

    /// Make the next call fail before reaching the server.
    pub fn fail_next_with_transport(&self) {
        *self.fail_next.borrow_mut() = Some(ApiError::Transport {
            method: "TEST",
            url: "memory://Tasks".to_string(),
            message: "connection refused".to_string(),
        });
    }

    fn record(&self, call: Call) -> Result<(), ApiError> {
        self.calls.borrow_mut().push(call);
        match self.fail_next.borrow_mut().take() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    fn position(&self, id: &TaskId) -> Option<usize> {
        self.records
            .borrow()
            .iter()
            .position(|r| r.get("id").and_then(Value::as_str) == Some(id.as_str()))
    }

    fn not_found(id: &TaskId) -> ApiError {
        ApiError::Status {
            method: "TEST",
            url: format!("memory://Tasks/{id}"),
            status: 404,
        }
    }

    fn with_id(id: &str, fields: &TaskFields) -> Value {
        let mut value = serde_json::to_value(fields).unwrap_or_else(|_| json!({}));
        value["id"] = json!(id);
        value
    }
}

impl TaskStore for MemoryStore {
    fn list(&self) -> Result<Vec<Value>, ApiError> {
        self.record(Call::List)?;
        Ok(self.records())
    }

    fn get(&self, id: &TaskId) -> Result<Value, ApiError> {
        self.record(Call::Get(id.to_string()))?;
        let idx = self.position(id).ok_or_else(|| Self::not_found(id))?;
        Ok(self.records.borrow()[idx].clone())
    }

    fn create(&self, fields: &TaskFields) -> Result<Value, ApiError> {
        self.record(Call::Create(fields.clone()))?;
        let next = self
            .records
            .borrow()
            .iter()
            .filter_map(|r| r.get("id").and_then(Value::as_str).and_then(|s| s.parse::<u64>().ok()))
            .max()
            .unwrap_or(0)
            + 1;
        let record = Self::with_id(&next.to_string(), fields);
        self.records.borrow_mut().push(record.clone());
        Ok(record)
    }

    fn update(&self, id: &TaskId, fields: &TaskFields) -> Result<Value, ApiError> {
        self.record(Call::Update(id.to_string(), fields.clone()))?;
        let idx = self.position(id).ok_or_else(|| Self::not_found(id))?;
        let record = Self::with_id(id.as_str(), fields);
        self.records.borrow_mut()[idx] = record.clone();
        Ok(record)
    }

    fn delete(&self, id: &TaskId) -> Result<(), ApiError> {
        self.record(Call::Delete(id.to_string()))?;
        let idx = self.position(id).ok_or_else(|| Self::not_found(id))?;
        self.records.borrow_mut().remove(idx);
        Ok(())
    }
}

/// [`MemoryStore`] behind a lock, for code that sends requests from worker threads.
#[derive(Default)]
pub struct SharedMemoryStore(Mutex<MemoryStore>);

impl SharedMemoryStore {
    pub fn with_records(records: Vec<Value>) -> Self {
        Self(Mutex::new(MemoryStore::with_records(records)))
    }

    pub fn inner(&self) -> MutexGuard<'_, MemoryStore> {
        self.0.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl TaskStore for SharedMemoryStore {
    fn list(&self) -> Result<Vec<Value>, ApiError> {
        self.inner().list()
    }

    fn get(&self, id: &TaskId) -> Result<Value, ApiError> {
        self.inner().get(id)
    }

    fn create(&self, fields: &TaskFields) -> Result<Value, ApiError> {
        self.inner().create(fields)
    }

    fn update(&self, id: &TaskId, fields: &TaskFields) -> Result<Value, ApiError> {
        self.inner().update(id, fields)
    }

    fn delete(&self, id: &TaskId) -> Result<(), ApiError> {
        self.inner().delete(id)
    }
}

/// Surface that records every request and answers confirmations with a fixed reply.
#[derive(Debug)]
pub struct RecordingSurface {
    pub confirm_reply: bool,
    pub opened: usize,
    pub closed: usize,
    pub prompts: Vec<String>,
    pub notices: Vec<Notice>,
    /// Interleaved log of open/close requests, for ordering assertions.
    pub events: Vec<&'static str>,
}

impl Default for RecordingSurface {
    fn default() -> Self {
        Self {
            confirm_reply: true,
            opened: 0,
            closed: 0,
            prompts: Vec::new(),
            notices: Vec::new(),
            events: Vec::new(),
        }
    }
}

impl RecordingSurface {
    pub fn declining() -> Self {
        Self {
            confirm_reply: false,
            ..Self::default()
        }
    }
}

impl Surface for RecordingSurface {
    fn open_modal(&mut self) {
        self.opened += 1;
        self.events.push("open");
    }

    fn close_modal(&mut self) {
        self.closed += 1;
        self.events.push("close");
    }

    fn confirm(&mut self, prompt: &str) -> bool {
        self.prompts.push(prompt.to_string());
        self.confirm_reply
    }

    fn notify(&mut self, notice: Notice) {
        self.notices.push(notice);
    }
}
