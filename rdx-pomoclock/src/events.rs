//! Defines the events emitted by the scheduler.
//!
//! Each state-changing or informational operation emits exactly one event.
//! The event is handed to the notifier as its `Display` rendering and is
//! also broadcast, strongly typed, to every `subscribe_events` receiver.

use crate::common::TaskId;
use std::fmt;
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SchedulerEvent {
    /// `start` passed its precondition and is reinitializing the session.
    Starting,
    /// `stop` (or teardown) cancelled periodic dispatch.
    Stopping,
    /// `reset` is reinitializing the session.
    Resetting,
    /// A work round began.
    RoundStarted { round: u16, duration: Duration },
    /// A break began. `long` is set for the break after the last round.
    BreakStarted {
        round: u16,
        long: bool,
        duration: Duration,
    },
    /// Answer to a remaining-time query.
    TimeRemaining { remaining: Duration },
    TaskAdded { id: TaskId },
    /// A task was taken off the head of the queue.
    TaskFinished { id: TaskId, remaining: usize },
}

impl fmt::Display for SchedulerEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Starting => write!(f, "starting..."),
            Self::Stopping => write!(f, "stopping..."),
            Self::Resetting => write!(f, "resetting..."),
            Self::RoundStarted { round, .. } => write!(f, "starting round {round}..."),
            Self::BreakStarted { round, long, .. } => {
                let kind = if *long { "long break" } else { "break" };
                write!(f, "starting {kind} {round}...")
            }
            Self::TimeRemaining { remaining } => {
                let secs = remaining.as_secs();
                write!(f, "{} mins, {} secs left...", secs / 60, secs % 60)
            }
            Self::TaskAdded { id } => write!(f, "adding task {id}..."),
            Self::TaskFinished { id, remaining } => {
                write!(f, "finishing task {id}..., {remaining} still remaining...")
            }
        }
    }
}
