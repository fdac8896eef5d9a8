//! The boundary between the controllers and whatever draws them.
//!
//! Controllers never own modal visibility. They ask a [`Surface`] to open or
//! close it, to confirm a destructive action, and to show one-shot notices.

use std::fmt;

/// A one-shot, user-visible message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    /// Required input was missing; nothing was sent.
    Validation(String),
    /// A request failed.
    Failure(String),
    /// Informational feedback.
    Info(String),
}

impl Notice {
    pub fn message(&self) -> &str {
        match self {
            Notice::Validation(m) | Notice::Failure(m) | Notice::Info(m) => m,
        }
    }

    pub fn is_error(&self) -> bool {
        !matches!(self, Notice::Info(_))
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// UI port used by the list and form controllers.
pub trait Surface {
    /// Request that the task form be shown.
    fn open_modal(&mut self);

    /// Request that the task form be hidden.
    fn close_modal(&mut self);

    /// Synchronous yes/no question.
    fn confirm(&mut self, prompt: &str) -> bool;

    /// Fire-and-forget notification.
    fn notify(&mut self, notice: Notice);
}
