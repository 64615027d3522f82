use core::any::Any;
use core::cell::RefCell;
use core::fmt;
use core::panic::AssertUnwindSafe;
use std::panic::catch_unwind;

use thiserror::Error;
use vc_host::AccessError;

// -----------------------------------------------------------------------------
// SnapshotError

/// A member-level failure.
///
/// None of these abort a snapshot, they are collected by a
/// [`DiagnosticSink`] and surfaced as log lines.
#[derive(Debug, Error, Clone, PartialEq)]
#[non_exhaustive]
pub enum SnapshotError {
    #[error("failed to read `{type_name}.{member}`: {source}")]
    Access {
        type_name: String,
        member: String,
        #[source]
        source: AccessError,
    },

    #[error("no extraction strategy understood `{type_name}.{member}`")]
    Extraction { type_name: String, member: String },

    #[error("`{type_name}.{member}` is nested deeper than {limit} levels")]
    DepthLimit {
        type_name: String,
        member: String,
        limit: usize,
    },

    #[error("cannot encode `{path}`: {reason}")]
    Conversion { path: String, reason: String },

    #[error("handler `{handler}` panicked on `{type_name}`: {message}")]
    Handler {
        handler: String,
        type_name: String,
        message: String,
    },
}

// -----------------------------------------------------------------------------
// DiagnosticSink

/// Collects the [`SnapshotError`]s of a single serialization call.
///
/// Every recorded error is also logged: conversion failures and handler
/// panics at `warn`, the rest at `debug`.
#[derive(Default)]
pub struct DiagnosticSink {
    entries: RefCell<Vec<SnapshotError>>,
}

impl DiagnosticSink {
    #[inline]
    pub const fn new() -> Self {
        Self {
            entries: RefCell::new(Vec::new()),
        }
    }

    pub fn record(&self, error: SnapshotError) {
        match &error {
            SnapshotError::Conversion { .. } | SnapshotError::Handler { .. } => {
                log::warn!("{error}");
            }
            _ => log::debug!("{error}"),
        }
        self.entries.borrow_mut().push(error);
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }

    /// Removes and returns everything recorded so far.
    #[inline]
    pub fn take(&self) -> Vec<SnapshotError> {
        self.entries.take()
    }
}

impl fmt::Debug for DiagnosticSink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.entries.borrow().iter()).finish()
    }
}

// -----------------------------------------------------------------------------
// Containment

/// Runs one host access, converting a panic into [`AccessError::Panicked`].
///
/// Host adapters may assert on state that only exists mid-simulation;
/// such a panic must not unwind past the member being read.
///
/// # Examples
///
/// ```
/// use vc_host::AccessError;
/// use vc_snapshot::contain;
///
/// let ok = contain(|| Ok::<_, AccessError>(3));
/// assert_eq!(ok, Ok(3));
///
/// let err = contain::<i32>(|| panic!("runner is not running"));
/// assert_eq!(err, Err(AccessError::Panicked("runner is not running".into())));
/// ```
pub fn contain<T>(f: impl FnOnce() -> Result<T, AccessError>) -> Result<T, AccessError> {
    match catch_unwind(AssertUnwindSafe(f)) {
        Ok(result) => result,
        Err(payload) => Err(AccessError::Panicked(panic_message(&*payload))),
    }
}

pub(crate) fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(msg) = payload.downcast_ref::<&'static str>() {
        (*msg).to_owned()
    } else if let Some(msg) = payload.downcast_ref::<String>() {
        msg.clone()
    } else {
        "unknown panic payload".to_owned()
    }
}
