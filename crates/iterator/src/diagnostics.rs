//! Side channel for iterator misuse.
//!
//! Misuse such as nexting an iterator that only supports lookup mode is a bug
//! in whatever assembled the tree, not a runtime condition. The iterator
//! reports it to a [`DiagnosticSink`] and carries on with an "exhausted"
//! result so the caller's loop still terminates.

use crate::iterator::IteratorType;
use std::sync::{Arc, Mutex, PoisonError};
use thiserror::Error;

/// Invalid use of an iterator by the code driving it.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum UsageError {
    /// `next` was called on an iterator that cannot enumerate.
    #[error("nexting an un-nextable iterator ({iterator} #{uid})")]
    NotNextable {
        /// Type of the offending iterator.
        iterator: IteratorType,
        /// Unique id of the offending iterator.
        uid: u64,
    },
}

/// Receives misuse reports. Reporting is fire-and-forget.
pub trait DiagnosticSink: Send + Sync {
    fn report(&self, error: &UsageError);
}

pub type SharedSink = Arc<dyn DiagnosticSink>;

/// Default sink: emits an `error` level tracing event.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn report(&self, error: &UsageError) {
        match error {
            UsageError::NotNextable { iterator, uid } => {
                tracing::error!(iterator = %iterator, uid, %error, "iterator misuse");
            }
        }
    }
}

pub fn default_sink() -> SharedSink {
    Arc::new(TracingSink)
}

/// Sink that keeps every report, for assertions in tests.
#[derive(Debug, Default)]
pub struct RecordingSink {
    reports: Mutex<Vec<UsageError>>,
}

impl RecordingSink {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn reports(&self) -> Vec<UsageError> {
        self.reports.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }

    pub fn len(&self) -> usize {
        self.reports.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl DiagnosticSink for RecordingSink {
    fn report(&self, error: &UsageError) {
        self.reports.lock().unwrap_or_else(PoisonError::into_inner).push(error.clone());
    }
}
