//! In-memory log store.
//!
//! # Responsibility
//! - Provide add/insert/remove/get/list over the session's logs.
//! - Assign ids, canonical units and default timestamps on creation.
//!
//! # Invariants
//! - `id` is unique across stored logs at all times.
//! - Removing an unknown id is a no-op.
//! - `list()` preserves insertion order.

use crate::clock::{Clock, SystemClock};
use crate::model::log::{InvalidLogError, Log, LogDraft, LogId};
use log::{debug, info};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::sync::Arc;
use uuid::Uuid;

pub type RepoResult<T> = Result<T, RepoError>;

/// Store error for import-style writes.
#[derive(Debug, Clone, PartialEq)]
pub enum RepoError {
    Validation(InvalidLogError),
    DuplicateId(LogId),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::DuplicateId(id) => write!(f, "log already exists: {id}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::DuplicateId(_) => None,
        }
    }
}

impl From<InvalidLogError> for RepoError {
    fn from(value: InvalidLogError) -> Self {
        Self::Validation(value)
    }
}

/// Canonical log collection for one session.
pub struct LogStore {
    logs: Vec<Log>,
    clock: Arc<dyn Clock>,
}

impl Default for LogStore {
    fn default() -> Self {
        Self::new(Arc::new(SystemClock))
    }
}

impl LogStore {
    /// Creates an empty store that defaults timestamps from `clock`.
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            logs: Vec::new(),
            clock,
        }
    }

    /// Validates `draft` and stores the completed log.
    ///
    /// # Errors
    /// - `MissingType` / `MissingValue` when required fields are absent.
    /// - `ValueMismatch` / `InvalidAmount` when the value does not fit the type.
    pub fn add(&mut self, draft: LogDraft) -> Result<Log, InvalidLogError> {
        let kind = draft.kind.ok_or(InvalidLogError::MissingType)?;
        let value = draft.value.ok_or(InvalidLogError::MissingValue(kind))?;
        let timestamp = draft.timestamp.unwrap_or_else(|| self.clock.now());

        let log = Log::with_id(self.fresh_id(), kind, value, timestamp)?.with_notes(draft.notes);
        self.logs.push(log.clone());

        info!(
            "event=log_create module=store status=ok type={} log_id={} total={}",
            log.kind(),
            log.id(),
            self.logs.len()
        );
        Ok(log)
    }

    /// Stores an already complete log, keeping its id.
    ///
    /// # Errors
    /// - `DuplicateId` when a log with the same id is already stored.
    pub fn insert(&mut self, log: Log) -> RepoResult<LogId> {
        let id = log.id();
        if self.contains(id) {
            return Err(RepoError::DuplicateId(id));
        }
        self.logs.push(log);
        debug!("event=log_insert module=store status=ok log_id={id}");
        Ok(id)
    }

    /// Removes the log with `id`; returns whether anything was removed.
    pub fn remove(&mut self, id: LogId) -> bool {
        let before = self.logs.len();
        self.logs.retain(|log| log.id() != id);
        let removed = self.logs.len() != before;
        info!(
            "event=log_delete module=store status={} log_id={id}",
            if removed { "ok" } else { "noop" }
        );
        removed
    }

    pub fn get(&self, id: LogId) -> Option<Log> {
        self.logs.iter().find(|log| log.id() == id).cloned()
    }

    pub fn contains(&self, id: LogId) -> bool {
        self.logs.iter().any(|log| log.id() == id)
    }

    /// Owned snapshot of every stored log in insertion order.
    pub fn list(&self) -> Vec<Log> {
        self.logs.clone()
    }

    /// Borrowed view for read-only derivations inside the core.
    pub(crate) fn as_slice(&self) -> &[Log] {
        &self.logs
    }

    pub fn len(&self) -> usize {
        self.logs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.logs.is_empty()
    }

    fn fresh_id(&self) -> LogId {
        loop {
            let id = Uuid::new_v4();
            if !self.contains(id) {
                return id;
            }
        }
    }
}
