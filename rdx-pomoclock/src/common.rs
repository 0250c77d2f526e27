//! Contains common, primitive types shared across the scheduler.
//!
//! Tasks are opaque to the scheduler: it never looks inside an identifier,
//! it only keeps them in order. A distinct type keeps them from being mixed
//! up with round indices or counts.

use serde::Deserialize;
use std::fmt;

/// Identifies a task queued alongside a pomodoro session.
///
/// Identifiers are caller-chosen integers. Duplicates are allowed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize)]
#[serde(transparent)]
pub struct TaskId(pub i64);

impl From<i64> for TaskId {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
