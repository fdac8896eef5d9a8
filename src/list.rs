//! Task list controller.
//!
//! Owns the cached list of tasks and the active draft. The list is never the
//! source of truth: it is replaced wholesale from the remote collection after
//! every mutation.
//!
//! Each network-bound operation comes in two halves so a front end can run the
//! request wherever it likes: an *issue* half that returns a [`Ticket`] and an
//! *apply* half that consumes the response. The synchronous methods compose the
//! two around a [`TaskStore`].

use serde_json::Value;

use crate::api::TaskStore;
use crate::error::ApiError;
use crate::normalize::normalize_item;
use crate::sequence::{Applied, Sequencer, Ticket};
use crate::surface::{Notice, Surface};
use crate::task::{Draft, Task, TaskId};

pub const DELETE_FAILED: &str = "Failed to delete the task.";

#[derive(Debug, Default)]
pub struct ListController {
    tasks: Vec<Task>,
    draft: Option<Draft>,
    refreshes: Sequencer,
    edits: Sequencer,
}

impl ListController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cached tasks in store response order.
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn get(&self, id: &TaskId) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id.as_ref() == Some(id))
    }

    /// The draft handed to the form, if any.
    pub fn draft(&self) -> Option<&Draft> {
        self.draft.as_ref()
    }

    // ---- refresh ----

    /// Start a list read. Any earlier refresh still in flight becomes stale.
    pub fn issue_refresh(&mut self) -> Ticket {
        self.refreshes.issue()
    }

    /// Apply a list read. On failure the cached list is left untouched.
    pub fn apply_refresh(&mut self, ticket: Ticket, result: Result<Vec<Value>, ApiError>) -> Result<Applied, ApiError> {
        if !self.refreshes.is_current(ticket) {
            tracing::debug!(?ticket, "dropping superseded list response");
            return Ok(Applied::Superseded);
        }
        match result {
            Ok(items) => {
                self.tasks = items.iter().map(normalize_item).collect();
                tracing::info!(count = self.tasks.len(), "task list refreshed");
                Ok(Applied::Current)
            }
            Err(e) => {
                tracing::warn!("failed to load tasks: {e}");
                Err(e)
            }
        }
    }

    /// Read the whole collection and replace the cached list.
    pub fn refresh(&mut self, store: &dyn TaskStore) -> Result<Applied, ApiError> {
        let ticket = self.issue_refresh();
        let result = store.list();
        self.apply_refresh(ticket, result)
    }

    // ---- create / edit ----

    /// Start a new task: empty draft, modal open.
    pub fn begin_create(&mut self, surface: &mut dyn Surface) {
        self.edits.invalidate();
        self.draft = Some(Draft::Empty);
        surface.open_modal();
    }

    /// Start fetching a record for editing.
    pub fn issue_edit(&mut self) -> Ticket {
        self.edits.issue()
    }

    /// Apply a fetched record: it becomes the draft and the modal is requested.
    /// On failure the draft is left as it was and the modal stays closed.
    pub fn apply_edit(
        &mut self,
        ticket: Ticket,
        result: Result<Value, ApiError>,
        surface: &mut dyn Surface,
    ) -> Result<Applied, ApiError> {
        if !self.edits.is_current(ticket) {
            tracing::debug!(?ticket, "dropping superseded record response");
            return Ok(Applied::Superseded);
        }
        match result {
            Ok(raw) => {
                let task = normalize_item(&raw);
                tracing::debug!(id = ?task.id, "loaded task for editing");
                self.draft = Some(Draft::Editing(task));
                surface.open_modal();
                Ok(Applied::Current)
            }
            Err(e) => {
                tracing::warn!("failed to load task for editing: {e}");
                Err(e)
            }
        }
    }

    /// Fetch one record and make it the active draft.
    pub fn begin_edit(
        &mut self,
        store: &dyn TaskStore,
        id: &TaskId,
        surface: &mut dyn Surface,
    ) -> Result<Applied, ApiError> {
        let ticket = self.issue_edit();
        let result = store.get(id);
        self.apply_edit(ticket, result, surface)
    }

    // ---- delete ----

    /// Ask for confirmation. Returns the id to delete, or `None` if declined.
    pub fn request_delete(&self, id: &TaskId, surface: &mut dyn Surface) -> Option<TaskId> {
        let title = self.get(id).map(|t| t.fields.title.as_str()).unwrap_or("");
        let prompt = if title.is_empty() {
            format!("Delete task #{id}?")
        } else {
            format!("Delete task #{id} \"{title}\"?")
        };
        if surface.confirm(&prompt) {
            Some(id.clone())
        } else {
            tracing::debug!(%id, "delete declined");
            None
        }
    }

    /// Apply a delete response. `on_deleted` runs only on success and is where
    /// the caller refreshes the list.
    pub fn apply_delete(
        &mut self,
        result: Result<(), ApiError>,
        surface: &mut dyn Surface,
        on_deleted: impl FnOnce(&mut Self),
    ) -> Result<(), ApiError> {
        match result {
            Ok(()) => {
                on_deleted(self);
                Ok(())
            }
            Err(e) => {
                tracing::warn!("failed to delete task: {e}");
                surface.notify(Notice::Failure(DELETE_FAILED.to_string()));
                Err(e)
            }
        }
    }

    /// Confirm, delete, and refresh. Returns `Ok(false)` when declined.
    pub fn delete(&mut self, store: &dyn TaskStore, id: &TaskId, surface: &mut dyn Surface) -> Result<bool, ApiError> {
        let Some(id) = self.request_delete(id, surface) else {
            return Ok(false);
        };
        let result = store.delete(&id);
        self.apply_delete(result, surface, |list| {
            // Refresh failures are logged inside refresh; the delete itself succeeded.
            let _ = list.refresh(store);
        })?;
        Ok(true)
    }
}
