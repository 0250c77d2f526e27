//! The scheduler that drives a pomodoro session.

use crate::common::TaskId;
use crate::components::cycle::{ActiveInterval, Cycle, IntervalState};
use crate::components::stopwatch::Stopwatch;
use crate::components::task::TaskQueue;
use crate::components::ticker::Ticker;
use crate::config::PomodoroConfig;
use crate::error::{Result, SchedulerError};
use crate::events::SchedulerEvent;
use std::sync::{Arc, Weak};
use std::time::Duration;
use tokio::sync::{broadcast, Mutex};
use tracing::{debug, info, trace};

/// A callback that receives every notification as human-readable text.
pub type Notifier = Box<dyn FnMut(&str) + Send>;

const EVENT_CHANNEL_CAPACITY: usize = 64;

/// The main pomodoro scheduler.
///
/// This struct is the session's single point of control. It sequences rounds
/// and breaks, measures the active interval, dispatches the interval-elapsed
/// event from a background ticker, and tracks the session's task queue.
///
/// The scheduler is a cheap handle that can be cloned and shared across
/// tasks. All state lives behind one mutex, so API calls and the ticker's
/// fires never interleave partially. None of the operations wait for an
/// interval to elapse.
///
/// Operations must be called from within a Tokio runtime.
#[derive(Clone)]
pub struct IntervalScheduler {
    session: Arc<Mutex<Session>>,
    event_sender: broadcast::Sender<SchedulerEvent>,
}

/// The mutable state block of a session, owned by the scheduler.
struct Session {
    cycle: Cycle,
    tasks: TaskQueue,
    stopwatch: Stopwatch,
    ticker: Ticker,
    /// Bumped on every arming; fires carrying an older epoch are stale.
    epoch: u64,
    notifier: Option<Notifier>,
    event_sender: broadcast::Sender<SchedulerEvent>,
    this: Weak<Mutex<Session>>,
    disposed: bool,
}

// Core implementation block for internal logic.
impl Session {
    fn start(&mut self) -> Result<()> {
        self.ensure_live()?;
        if self.tasks.is_empty() {
            return Err(SchedulerError::InvalidState("no tasks added".to_string()));
        }
        self.stop_ticking();
        self.emit(SchedulerEvent::Starting);
        self.restart_cycle();
        Ok(())
    }

    fn stop(&mut self) {
        if self.disposed {
            return;
        }
        self.stop_ticking();
        self.emit(SchedulerEvent::Stopping);
        self.cycle.reset();
        self.stopwatch.reset();
    }

    fn reset(&mut self) -> Result<()> {
        self.ensure_live()?;
        self.stop_ticking();
        self.emit(SchedulerEvent::Resetting);
        self.restart_cycle();
        Ok(())
    }

    fn shutdown(&mut self) {
        if self.disposed {
            return;
        }
        self.stop();
        self.disposed = true;
        info!("Session shut down.");
    }

    fn remaining_time(&mut self) -> Duration {
        let remaining = self
            .cycle
            .interval_duration()
            .saturating_sub(self.stopwatch.elapsed());
        self.emit(SchedulerEvent::TimeRemaining { remaining });
        remaining
    }

    fn add_task(&mut self, id: TaskId) {
        self.emit(SchedulerEvent::TaskAdded { id });
        self.tasks.enqueue(id);
    }

    fn finish_task(&mut self) -> Result<TaskId> {
        let id = self.tasks.dequeue()?;
        self.emit(SchedulerEvent::TaskFinished {
            id,
            remaining: self.tasks.len(),
        });
        Ok(id)
    }

    /// Called by the ticker each time the active interval's period elapses.
    fn on_interval_elapsed(&mut self, epoch: u64) {
        if self.ticker.epoch() != Some(epoch) {
            trace!(epoch, "Dropping stale interval fire.");
            return;
        }
        self.begin_next_interval();
    }

    fn restart_cycle(&mut self) {
        self.cycle.reset();
        self.begin_next_interval();
    }

    fn begin_next_interval(&mut self) {
        self.stop_ticking();
        let interval = self.cycle.advance();
        let duration = self.cycle.interval_duration();
        let event = match interval {
            ActiveInterval::Round { round } => {
                info!(round, ?duration, "Round started.");
                SchedulerEvent::RoundStarted { round, duration }
            }
            ActiveInterval::Break { round, long } => {
                info!(round, long, ?duration, "Break started.");
                SchedulerEvent::BreakStarted {
                    round,
                    long,
                    duration,
                }
            }
        };
        self.emit(event);
        self.start_ticking(duration);
    }

    fn start_ticking(&mut self, period: Duration) {
        self.epoch += 1;
        let session = self.this.clone();
        self.ticker.arm(self.epoch, period, move |epoch| {
            let session = session.clone();
            async move {
                if let Some(session) = session.upgrade() {
                    session.lock().await.on_interval_elapsed(epoch);
                }
            }
        });
        self.stopwatch.restart();
    }

    /// Disarms the ticker before freezing the stopwatch.
    fn stop_ticking(&mut self) {
        self.ticker.disarm();
        self.stopwatch.stop();
    }

    fn ensure_live(&self) -> Result<()> {
        if self.disposed {
            return Err(SchedulerError::InvalidState(
                "session has been shut down".to_string(),
            ));
        }
        Ok(())
    }

    fn emit(&mut self, event: SchedulerEvent) {
        let text = event.to_string();
        debug!(notification = %text);
        if let Some(notifier) = self.notifier.as_mut() {
            notifier(&text);
        }
        self.event_sender.send(event).ok();
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        self.ticker.disarm();
    }
}

impl IntervalScheduler {
    /// Creates an idle scheduler with an empty task queue.
    ///
    /// Fails with `InvalidConfig` if any duration or the round count is zero.
    pub fn new(config: PomodoroConfig) -> Result<Self> {
        config.validate()?;
        let (event_sender, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        let session = Arc::new_cyclic(|this| {
            Mutex::new(Session {
                cycle: Cycle::new(config),
                tasks: TaskQueue::new(),
                stopwatch: Stopwatch::default(),
                ticker: Ticker::Unarmed,
                epoch: 0,
                notifier: None,
                event_sender: event_sender.clone(),
                this: this.clone(),
                disposed: false,
            })
        });
        Ok(Self {
            session,
            event_sender,
        })
    }

    /// Shorthand for [`IntervalScheduler::new`] with durations in seconds.
    pub fn from_secs(
        round_secs: u64,
        break_secs: u64,
        long_break_secs: u64,
        rounds: u16,
    ) -> Result<Self> {
        Self::new(PomodoroConfig::new(
            round_secs,
            break_secs,
            long_break_secs,
            rounds,
        ))
    }
}

// Public API implementation block.
impl IntervalScheduler {
    /// Starts the session from round 0.
    ///
    /// Any running interval is cancelled first, so calling `start` on a
    /// running session restarts it. Fails with `InvalidState` if no tasks
    /// are queued or the session has been shut down.
    pub async fn start(&self) -> Result<()> {
        self.session.lock().await.start()
    }

    /// Cancels the active interval and returns the session to idle.
    ///
    /// No interval-elapsed event is handled after this returns. Does
    /// nothing once the session has been shut down.
    pub async fn stop(&self) {
        self.session.lock().await.stop()
    }

    /// Restarts the session from round 0.
    ///
    /// Unlike [`start`](Self::start), this does not require queued tasks.
    pub async fn reset(&self) -> Result<()> {
        self.session.lock().await.reset()
    }

    /// Returns how much of the active interval is left, saturating at zero.
    ///
    /// While idle this is the full round duration.
    pub async fn remaining_time(&self) -> Duration {
        self.session.lock().await.remaining_time()
    }

    /// Appends a task to the tail of the queue.
    pub async fn add_task(&self, id: impl Into<TaskId>) {
        self.session.lock().await.add_task(id.into())
    }

    /// Removes the oldest task and returns it.
    ///
    /// Fails with `EmptyQueue` if there is nothing to finish.
    pub async fn finish_task(&self) -> Result<TaskId> {
        self.session.lock().await.finish_task()
    }

    /// Installs the notification callback, replacing any previous one.
    pub async fn set_notifier(&self, notifier: impl FnMut(&str) + Send + 'static) {
        self.session.lock().await.notifier = Some(Box::new(notifier));
    }

    /// Removes the notification callback.
    pub async fn clear_notifier(&self) {
        self.session.lock().await.notifier = None;
    }

    /// Stops the session for good. Calling it again does nothing.
    ///
    /// Dropping the last handle releases the ticker as well, without a
    /// notification.
    pub async fn shutdown(&self) {
        self.session.lock().await.shutdown()
    }

    /// The interval currently in progress.
    pub async fn state(&self) -> IntervalState {
        self.session.lock().await.cycle.state()
    }

    pub async fn is_running(&self) -> bool {
        self.session.lock().await.ticker.is_armed()
    }

    pub async fn task_count(&self) -> usize {
        self.session.lock().await.tasks.len()
    }

    /// A snapshot of the queued tasks, oldest first.
    pub async fn tasks(&self) -> Vec<TaskId> {
        self.session.lock().await.tasks.iter().copied().collect()
    }

    pub async fn config(&self) -> PomodoroConfig {
        self.session.lock().await.cycle.config().clone()
    }

    /// Subscribes to the `SchedulerEvent` stream.
    pub fn subscribe_events(&self) -> broadcast::Receiver<SchedulerEvent> {
        self.event_sender.subscribe()
    }
}
