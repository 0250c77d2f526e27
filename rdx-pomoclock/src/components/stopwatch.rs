//! Elapsed-time accumulator for the active interval.

use std::time::Duration;
use tokio::time::Instant;

/// Measures time since the current interval began.
///
/// Built on `tokio::time::Instant` so that a paused runtime clock drives it.
#[derive(Debug, Default)]
pub(crate) struct Stopwatch {
    started_at: Option<Instant>,
    accumulated: Duration,
}

impl Stopwatch {
    /// Zeroes the accumulator and starts measuring from now.
    pub(crate) fn restart(&mut self) {
        self.accumulated = Duration::ZERO;
        self.started_at = Some(Instant::now());
    }

    /// Freezes the accumulator at its current value.
    pub(crate) fn stop(&mut self) {
        if let Some(started_at) = self.started_at.take() {
            self.accumulated += started_at.elapsed();
        }
    }

    pub(crate) fn reset(&mut self) {
        self.started_at = None;
        self.accumulated = Duration::ZERO;
    }

    pub(crate) fn elapsed(&self) -> Duration {
        match self.started_at {
            Some(started_at) => self.accumulated + started_at.elapsed(),
            None => self.accumulated,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn stop_freezes_and_restart_zeroes() {
        let mut watch = Stopwatch::default();
        assert_eq!(watch.elapsed(), Duration::ZERO);

        watch.restart();
        tokio::time::advance(Duration::from_secs(3)).await;
        assert_eq!(watch.elapsed(), Duration::from_secs(3));

        watch.stop();
        tokio::time::advance(Duration::from_secs(10)).await;
        assert_eq!(watch.elapsed(), Duration::from_secs(3));

        watch.restart();
        assert_eq!(watch.elapsed(), Duration::ZERO);

        watch.reset();
        tokio::time::advance(Duration::from_secs(1)).await;
        assert_eq!(watch.elapsed(), Duration::ZERO);
    }
}
