//! Edit/create form controller.
//!
//! Holds a working copy of the six editable fields. Loading a [`Draft`] decides
//! the mode: a draft that targets a stored record saves with update semantics,
//! anything else saves as a new record.
//!
//! Every load starts a new form session with its own [`Ticket`]. A save that
//! completes after its session was closed or replaced still triggers the list
//! refresh but leaves the current form alone.

use serde_json::Value;

use crate::api::TaskStore;
use crate::error::{ApiError, AppError};
use crate::fields::Field;
use crate::sequence::{Applied, Sequencer, Ticket};
use crate::surface::{Notice, Surface};
use crate::task::{Draft, TaskFields, TaskId};

pub const TITLE_NEW: &str = "New Task";
pub const TITLE_MODIFY: &str = "Modify Task";

pub const REQUIRED_FIELDS: &str = "Title and Due Day are required.";
pub const SAVE_REJECTED: &str = "Failed to save the task.";
pub const SAVE_UNREACHABLE: &str = "Error while contacting the task service.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormState {
    Idle,
    Editing,
}

/// Save semantics derived from the loaded draft.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode {
    Create,
    Update(TaskId),
}

/// A validated save, ready to send.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    /// Form session the submission was taken from.
    pub ticket: Ticket,
    pub mode: Mode,
    pub fields: TaskFields,
}

impl Submission {
    pub fn send(&self, store: &dyn TaskStore) -> Result<Value, ApiError> {
        match &self.mode {
            Mode::Create => store.create(&self.fields),
            Mode::Update(id) => store.update(id, &self.fields),
        }
    }
}

#[derive(Debug)]
pub struct FormController {
    state: FormState,
    mode: Mode,
    working: TaskFields,
    sessions: Sequencer,
    session: Ticket,
}

impl Default for FormController {
    fn default() -> Self {
        let mut sessions = Sequencer::new();
        let session = sessions.issue();
        Self {
            state: FormState::Idle,
            mode: Mode::Create,
            working: TaskFields::default(),
            sessions,
            session,
        }
    }
}

impl FormController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> FormState {
        self.state
    }

    pub fn mode(&self) -> &Mode {
        &self.mode
    }

    pub fn fields(&self) -> &TaskFields {
        &self.working
    }

    /// Dialog title for the current mode.
    pub fn title(&self) -> &'static str {
        match self.mode {
            Mode::Create => TITLE_NEW,
            Mode::Update(_) => TITLE_MODIFY,
        }
    }

    /// Replace the working copy from a new draft and start editing.
    pub fn load(&mut self, draft: &Draft) {
        self.mode = match draft.target() {
            Some(id) => Mode::Update(id.clone()),
            None => Mode::Create,
        };
        self.working = draft.seed();
        self.state = FormState::Editing;
        self.session = self.sessions.issue();
    }

    /// Change one field of the working copy. No validation happens here.
    pub fn set_field(&mut self, field: Field, value: impl Into<String>) {
        *self.working.get_mut(field) = value.into();
    }

    /// Validate and package the working copy. A missing title or due day
    /// raises a validation notice and nothing is returned to send.
    pub fn prepare_save(&self, surface: &mut dyn Surface) -> Result<Option<Submission>, AppError> {
        if self.state == FormState::Idle {
            tracing::debug!("save requested with no open form");
            return Ok(None);
        }
        if self.working.title.is_empty() || self.working.due_day.is_empty() {
            surface.notify(Notice::Validation(REQUIRED_FIELDS.to_string()));
            return Err(AppError::Validation(REQUIRED_FIELDS.to_string()));
        }
        Ok(Some(Submission {
            ticket: self.session,
            mode: self.mode.clone(),
            fields: self.working.clone(),
        }))
    }

    /// Apply a save response. On success `on_saved` runs (the list refresh),
    /// then the modal is closed if `ticket` is still the open session. On
    /// failure the form stays open with its working copy intact.
    pub fn apply_save(
        &mut self,
        ticket: Ticket,
        result: Result<Value, ApiError>,
        surface: &mut dyn Surface,
        on_saved: impl FnOnce(),
    ) -> Result<Applied, ApiError> {
        match result {
            Ok(_) => {
                tracing::info!(?ticket, "task saved");
                on_saved();
                if !self.sessions.is_current(ticket) {
                    tracing::debug!(?ticket, "save finished for a form that is no longer open");
                    return Ok(Applied::Superseded);
                }
                self.state = FormState::Idle;
                surface.close_modal();
                Ok(Applied::Current)
            }
            Err(e) => {
                tracing::warn!("failed to save task: {e}");
                let message = if e.is_status() { SAVE_REJECTED } else { SAVE_UNREACHABLE };
                surface.notify(Notice::Failure(message.to_string()));
                Err(e)
            }
        }
    }

    /// Validate, send, and apply in one step. Returns `Ok(false)` when the
    /// form was idle and nothing happened.
    pub fn save(
        &mut self,
        store: &dyn TaskStore,
        surface: &mut dyn Surface,
        on_saved: impl FnOnce(),
    ) -> Result<bool, AppError> {
        let Some(submission) = self.prepare_save(surface)? else {
            return Ok(false);
        };
        let result = submission.send(store);
        self.apply_save(submission.ticket, result, surface, on_saved)?;
        Ok(true)
    }

    /// Request the modal be hidden without saving. The working copy stays
    /// until the next draft is loaded.
    pub fn close(&mut self, surface: &mut dyn Surface) {
        self.state = FormState::Idle;
        self.sessions.invalidate();
        surface.close_modal();
    }
}
