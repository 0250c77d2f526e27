//! # Pomoclock
//!
//! A single-session pomodoro interval scheduler for Rust.
//!
//! Pomoclock alternates fixed-length work rounds and breaks, extends the break
//! after the last round of each cycle into a long break, and keeps a FIFO of
//! task identifiers alongside the session. It is a library: a front-end owns
//! the process loop, calls into the scheduler, and receives text
//! notifications from it.
//!
//! ## Core Concepts
//!
//! - **Cycle**: `rounds` rounds, each followed by a break. The break after the
//!   last round is a long break, then the cycle wraps to round 0.
//! - **Ticker**: A background Tokio task that fires once the active interval's
//!   duration has passed. There is never more than one per session.
//! - **Notifications**: Every operation that changes or reports state emits one
//!   `SchedulerEvent`, delivered as text to an optional notifier callback and,
//!   strongly typed, to `subscribe_events` receivers.
//! - **Task queue**: Opaque task ids in FIFO order. A session cannot start
//!   with an empty queue.
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use pomoclock::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     // 1. A 5s round, 2s break, 4s long break, 3 rounds per cycle.
//!     let scheduler = IntervalScheduler::from_secs(5, 2, 4, 3)?;
//!
//!     // 2. Print every notification.
//!     scheduler.set_notifier(|text| println!("{text}")).await;
//!
//!     // 3. Queue a task, then start the first round.
//!     scheduler.add_task(TaskId(1)).await;
//!     scheduler.start().await?;
//!
//!     tokio::time::sleep(std::time::Duration::from_secs(30)).await;
//!     scheduler.shutdown().await;
//!     Ok(())
//! }
//! ```

pub const ENGINE_NAME: &str = "Pomoclock";
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod common;
pub mod components;
pub mod config;
pub mod engine;
pub mod error;
pub mod events;

/// A prelude module for easy importing of the most common Pomoclock types.
pub mod prelude {
    pub use crate::common::TaskId;
    pub use crate::components::cycle::IntervalState;
    pub use crate::config::PomodoroConfig;
    pub use crate::engine::{IntervalScheduler, Notifier};
    pub use crate::error::{Result, SchedulerError};
    pub use crate::events::SchedulerEvent;
}
