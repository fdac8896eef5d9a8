//! Background request dispatch for the terminal user interface.
//!
//! Each request runs on its own worker thread so the event loop never blocks
//! on the network. Completions are queued and drained by the event loop,
//! which hands them to the controllers. Requests may complete in any order;
//! the controllers' tickets decide which responses still count.

use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::Arc;
use std::thread;

use serde_json::Value;

use crate::api::TaskStore;
use crate::error::ApiError;
use crate::form::Submission;
use crate::sequence::Ticket;
use crate::task::TaskId;

/// Store handle shared with worker threads.
pub type SharedStore = Arc<dyn TaskStore + Send + Sync>;

/// A request to run off the event loop.
#[derive(Debug)]
pub enum Job {
    List(Ticket),
    Get(Ticket, TaskId),
    Save(Submission),
    Delete(TaskId),
}

/// The outcome of a [`Job`], carrying its ticket where one was issued.
/// A save carries the ticket of the form session it was taken from.
#[derive(Debug)]
pub enum Completion {
    Listed(Ticket, Result<Vec<Value>, ApiError>),
    Fetched(Ticket, Result<Value, ApiError>),
    Saved(Ticket, Result<Value, ApiError>),
    Deleted(Result<(), ApiError>),
}

pub struct Dispatcher {
    store: SharedStore,
    tx: Sender<Completion>,
    rx: Receiver<Completion>,
    in_flight: usize,
}

impl Dispatcher {
    pub fn new(store: SharedStore) -> Self {
        let (tx, rx) = mpsc::channel();
        Self {
            store,
            tx,
            rx,
            in_flight: 0,
        }
    }

    /// Start `job` on a worker thread.
    pub fn submit(&mut self, job: Job) {
        tracing::debug!(?job, "dispatching request");
        self.in_flight += 1;
        let store = Arc::clone(&self.store);
        let tx = self.tx.clone();
        thread::spawn(move || {
            let completion = execute(store.as_ref(), job);
            // The receiver only goes away when the UI has exited.
            let _ = tx.send(completion);
        });
    }

    /// Next finished request, if any. Never blocks.
    pub fn poll(&mut self) -> Option<Completion> {
        let completion = self.rx.try_recv().ok()?;
        self.in_flight = self.in_flight.saturating_sub(1);
        Some(completion)
    }

    /// Requests submitted but not yet drained.
    pub fn in_flight(&self) -> usize {
        self.in_flight
    }
}

fn execute(store: &dyn TaskStore, job: Job) -> Completion {
    match job {
        Job::List(ticket) => Completion::Listed(ticket, store.list()),
        Job::Get(ticket, id) => Completion::Fetched(ticket, store.get(&id)),
        Job::Save(submission) => Completion::Saved(submission.ticket, submission.send(store)),
        Job::Delete(id) => Completion::Deleted(store.delete(&id)),
    }
}
