//! Per-fetch view state and navigation tickets.
//!
//! # Responsibility
//! - Replace ambient loading/error flags with one explicit state per fetch.
//! - Let callers abandon in-flight fetches when they navigate away.
//!
//! # Invariants
//! - A ticket is current until a newer view opens or the caller navigates.
//! - Settling through a stale ticket always yields `Abandoned`.

use crate::model::employee::EmployeeId;
use crate::source::SourceError;
use serde::Serialize;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

pub type DirectoryResult<T> = Result<T, DirectoryError>;

/// Error surfaced to view consumers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "detail", rename_all = "snake_case")]
pub enum DirectoryError {
    /// Detail lookup for an id the source does not know.
    EmployeeNotFound(EmployeeId),
    /// Source failed; carries the rendered source error.
    Unavailable(String),
}

impl Display for DirectoryError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmployeeNotFound(id) => write!(f, "employee not found: {id}"),
            Self::Unavailable(message) => write!(f, "directory source unavailable: {message}"),
        }
    }
}

impl Error for DirectoryError {}

impl From<SourceError> for DirectoryError {
    fn from(value: SourceError) -> Self {
        Self::Unavailable(value.to_string())
    }
}

/// State of one fetch slot.
#[derive(Debug, Clone, PartialEq)]
pub enum FetchState<T> {
    Loading,
    Ready(T),
    Failed(DirectoryError),
    /// Fetch finished after the caller navigated away.
    Abandoned,
}

impl<T> FetchState<T> {
    pub fn from_result(result: DirectoryResult<T>) -> Self {
        match result {
            Ok(value) => Self::Ready(value),
            Err(err) => Self::Failed(err),
        }
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, Self::Ready(_))
    }

    pub fn as_ready(&self) -> Option<&T> {
        match self {
            Self::Ready(value) => Some(value),
            _ => None,
        }
    }

    pub fn into_ready(self) -> Option<T> {
        match self {
            Self::Ready(value) => Some(value),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&DirectoryError> {
        match self {
            Self::Failed(err) => Some(err),
            _ => None,
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> FetchState<U> {
        match self {
            Self::Loading => FetchState::Loading,
            Self::Ready(value) => FetchState::Ready(f(value)),
            Self::Failed(err) => FetchState::Failed(err),
            Self::Abandoned => FetchState::Abandoned,
        }
    }
}

/// Source of view tickets shared between a service and its caller.
#[derive(Debug, Clone, Default)]
pub struct Navigation {
    generation: Arc<AtomicU64>,
}

impl Navigation {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a new view; every older ticket becomes stale.
    pub fn begin_view(&self) -> ViewTicket {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        ViewTicket {
            generation,
            current: Arc::clone(&self.generation),
        }
    }

    /// Leaves the current view without opening another one.
    pub fn navigate_away(&self) {
        self.generation.fetch_add(1, Ordering::SeqCst);
    }
}

/// Identifies the view a fetch was started for.
#[derive(Debug, Clone)]
pub struct ViewTicket {
    generation: u64,
    current: Arc<AtomicU64>,
}

impl ViewTicket {
    pub fn is_current(&self) -> bool {
        self.current.load(Ordering::SeqCst) == self.generation
    }

    /// Delivers `state` only while this ticket is current.
    pub fn settle<T>(&self, state: FetchState<T>) -> FetchState<T> {
        if self.is_current() {
            state
        } else {
            FetchState::Abandoned
        }
    }

    /// Settles both slots of a joined view against one generation check, so
    /// a view is never half delivered and half abandoned.
    pub fn settle_pair<A, B>(
        &self,
        first: FetchState<A>,
        second: FetchState<B>,
    ) -> (FetchState<A>, FetchState<B>) {
        if self.is_current() {
            (first, second)
        } else {
            (FetchState::Abandoned, FetchState::Abandoned)
        }
    }
}
