//! The periodic-dispatch resource behind the scheduler.
//!
//! An armed ticker is a spawned task that fires its callback every `period`
//! until it is disarmed. Arming always disarms first, so there is at most
//! one live ticker per owner and fires never overlap.

use std::future::Future;
use std::time::Duration;
use tokio::sync::broadcast;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tracing::trace;

/// First deadline used when `now + period` is not representable.
const FAR_FUTURE: Duration = Duration::from_secs(86_400 * 365 * 30);

#[derive(Debug, Default)]
pub(crate) enum Ticker {
    #[default]
    Unarmed,
    Armed(ArmedTicker),
}

#[derive(Debug)]
pub(crate) struct ArmedTicker {
    epoch: u64,
    shutdown_tx: broadcast::Sender<()>,
    handle: JoinHandle<()>,
}

impl Ticker {
    /// Replaces any armed ticker with a new one that calls `on_fire(epoch)`
    /// every `period`, the first time one `period` from now.
    ///
    /// Must be called from within a Tokio runtime. `period` must be non-zero.
    pub(crate) fn arm<F, Fut>(&mut self, epoch: u64, period: Duration, mut on_fire: F)
    where
        F: FnMut(u64) -> Fut + Send + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        self.disarm();

        let (shutdown_tx, mut shutdown_rx) = broadcast::channel(1);
        let now = Instant::now();
        let start = now
            .checked_add(period)
            .unwrap_or_else(|| now + FAR_FUTURE);
        let mut ticker = interval_at(start, period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        let handle = tokio::spawn(async move {
            loop {
                tokio::select! {
                    biased;
                    _ = shutdown_rx.recv() => break,
                    _ = ticker.tick() => on_fire(epoch).await,
                }
            }
            trace!(epoch, "Ticker task exited.");
        });

        *self = Ticker::Armed(ArmedTicker {
            epoch,
            shutdown_tx,
            handle,
        });
    }

    /// Cancels the armed ticker, if any. Returns `true` if one was armed.
    ///
    /// A fire already in flight may still run, but it carries a stale epoch.
    pub(crate) fn disarm(&mut self) -> bool {
        match std::mem::take(self) {
            Ticker::Armed(armed) => {
                armed.shutdown_tx.send(()).ok();
                drop(armed.handle);
                true
            }
            Ticker::Unarmed => false,
        }
    }

    /// The epoch of the armed ticker, `None` when unarmed.
    pub(crate) fn epoch(&self) -> Option<u64> {
        match self {
            Ticker::Armed(armed) => Some(armed.epoch),
            Ticker::Unarmed => None,
        }
    }

    pub(crate) fn is_armed(&self) -> bool {
        matches!(self, Ticker::Armed(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    fn recorder() -> (Arc<Mutex<Vec<u64>>>, impl FnMut(u64) -> std::future::Ready<()> + Send) {
        let fired = Arc::new(Mutex::new(Vec::new()));
        let sink = fired.clone();
        let on_fire = move |epoch| {
            sink.lock().unwrap().push(epoch);
            std::future::ready(())
        };
        (fired, on_fire)
    }

    #[tokio::test(start_paused = true)]
    async fn fires_periodically_until_disarmed() {
        let (fired, on_fire) = recorder();
        let mut ticker = Ticker::Unarmed;
        ticker.arm(1, Duration::from_secs(2), on_fire);
        assert_eq!(ticker.epoch(), Some(1));

        tokio::time::sleep(Duration::from_millis(6_500)).await;
        assert_eq!(*fired.lock().unwrap(), vec![1, 1, 1]);

        assert!(ticker.disarm());
        assert!(!ticker.is_armed());
        tokio::time::sleep(Duration::from_secs(10)).await;
        assert_eq!(fired.lock().unwrap().len(), 3);
        assert!(!ticker.disarm());
    }

    #[tokio::test(start_paused = true)]
    async fn unrepresentable_deadline_is_pushed_far_out() {
        let (fired, on_fire) = recorder();
        let mut ticker = Ticker::Unarmed;
        ticker.arm(1, Duration::MAX, on_fire);
        assert!(ticker.is_armed());

        tokio::time::sleep(Duration::from_secs(86_400)).await;
        assert!(fired.lock().unwrap().is_empty());
        assert!(ticker.disarm());
    }

    #[tokio::test(start_paused = true)]
    async fn rearming_replaces_the_previous_ticker() {
        let (fired, on_fire) = recorder();
        let mut ticker = Ticker::Unarmed;
        ticker.arm(1, Duration::from_secs(1), on_fire);

        let (refired, on_refire) = recorder();
        ticker.arm(2, Duration::from_secs(1), on_refire);

        tokio::time::sleep(Duration::from_millis(2_500)).await;
        assert!(fired.lock().unwrap().is_empty());
        assert_eq!(*refired.lock().unwrap(), vec![2, 2]);
    }
}
