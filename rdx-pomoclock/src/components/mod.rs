//! Contains the building blocks the scheduler is assembled from.
//!
//! This module provides the pure round/break state machine, the elapsed-time
//! accumulator, the periodic-dispatch resource, and the task queue. The
//! `IntervalScheduler` owns one of each and drives them together.

pub mod cycle;
pub(crate) mod stopwatch;
pub mod task;
pub(crate) mod ticker;
