//! The round/break state machine.
//!
//! `Cycle` is pure: it knows nothing about clocks or dispatch. The engine
//! asks it which interval comes next and how long that interval lasts.
//!
//! ```text
//! Idle -> InRound(0) -> InBreak(0) -> InRound(1) -> ... -> InBreak(n-1, long) -> InRound(0)
//! ```

use crate::config::PomodoroConfig;
use std::time::Duration;

/// Which interval of the cycle is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntervalState {
    /// Never started, or stopped and waiting for a start.
    Idle,
    InRound { round: u16 },
    /// The break that follows round `round`.
    InBreak { round: u16, long: bool },
}

/// An interval that has just begun. Unlike [`IntervalState`] it is never idle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActiveInterval {
    Round { round: u16 },
    Break { round: u16, long: bool },
}

impl From<ActiveInterval> for IntervalState {
    fn from(interval: ActiveInterval) -> Self {
        match interval {
            ActiveInterval::Round { round } => IntervalState::InRound { round },
            ActiveInterval::Break { round, long } => IntervalState::InBreak { round, long },
        }
    }
}

#[derive(Debug, Clone)]
pub(crate) struct Cycle {
    config: PomodoroConfig,
    state: IntervalState,
}

impl Cycle {
    pub(crate) fn new(config: PomodoroConfig) -> Self {
        Self {
            config,
            state: IntervalState::Idle,
        }
    }

    pub(crate) fn state(&self) -> IntervalState {
        self.state
    }

    pub(crate) fn config(&self) -> &PomodoroConfig {
        &self.config
    }

    /// Returns to `Idle`; the next round started will be round 0.
    pub(crate) fn reset(&mut self) {
        self.state = IntervalState::Idle;
    }

    /// Moves to the next interval: a break after a round, a round after
    /// anything else. Returns the interval that began.
    pub(crate) fn advance(&mut self) -> ActiveInterval {
        let next = match self.state {
            IntervalState::InRound { round } => ActiveInterval::Break {
                round,
                long: self.is_last_round(round),
            },
            IntervalState::Idle | IntervalState::InBreak { .. } => ActiveInterval::Round {
                round: self.next_round(),
            },
        };
        self.state = next.into();
        next
    }

    /// Length of the active interval. `Idle` resolves to a round, since the
    /// first thing a start does is begin one.
    pub(crate) fn interval_duration(&self) -> Duration {
        match self.state {
            IntervalState::Idle | IntervalState::InRound { .. } => self.config.round_duration(),
            IntervalState::InBreak { round, .. } if self.is_last_round(round) => {
                self.config.long_break_duration()
            }
            IntervalState::InBreak { .. } => self.config.break_duration(),
        }
    }

    fn next_round(&self) -> u16 {
        match self.state {
            IntervalState::Idle => 0,
            IntervalState::InRound { round } | IntervalState::InBreak { round, .. } => {
                ((u32::from(round) + 1) % u32::from(self.config.rounds)) as u16
            }
        }
    }

    fn is_last_round(&self, round: u16) -> bool {
        u32::from(round) + 1 == u32::from(self.config.rounds)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cycle(rounds: u16) -> Cycle {
        Cycle::new(PomodoroConfig::new(5, 2, 4, rounds))
    }

    #[test]
    fn round_indices_wrap_at_the_cycle_length() {
        let mut cycle = cycle(3);
        let mut rounds = Vec::new();
        for _ in 0..14 {
            if let ActiveInterval::Round { round } = cycle.advance() {
                rounds.push(round);
            }
        }
        assert_eq!(rounds, vec![0, 1, 2, 0, 1, 2, 0]);
    }

    #[test]
    fn only_the_break_after_the_last_round_is_long() {
        let mut cycle = cycle(3);
        let mut breaks = Vec::new();
        for _ in 0..12 {
            if let ActiveInterval::Break { round, long } = cycle.advance() {
                breaks.push((round, long, cycle.interval_duration().as_secs()));
            }
        }
        assert_eq!(
            breaks,
            vec![
                (0, false, 2),
                (1, false, 2),
                (2, true, 4),
                (0, false, 2),
                (1, false, 2),
                (2, true, 4),
            ]
        );
    }

    #[test]
    fn single_round_cycle_always_takes_the_long_break() {
        let mut cycle = cycle(1);
        assert_eq!(cycle.advance(), ActiveInterval::Round { round: 0 });
        assert_eq!(cycle.advance(), ActiveInterval::Break { round: 0, long: true });
        assert_eq!(cycle.advance(), ActiveInterval::Round { round: 0 });
    }

    #[test]
    fn idle_resolves_to_the_round_duration() {
        let cycle = cycle(3);
        assert_eq!(cycle.state(), IntervalState::Idle);
        assert_eq!(cycle.interval_duration(), Duration::from_secs(5));
    }

    #[test]
    fn reset_restarts_from_round_zero() {
        let mut cycle = cycle(3);
        cycle.advance();
        cycle.advance();
        cycle.advance();
        assert_eq!(cycle.state(), IntervalState::InRound { round: 1 });
        cycle.reset();
        assert_eq!(cycle.advance(), ActiveInterval::Round { round: 0 });
    }

    #[test]
    fn largest_cycle_does_not_overflow() {
        let mut cycle = cycle(u16::MAX);
        cycle.state = IntervalState::InBreak {
            round: u16::MAX - 1,
            long: true,
        };
        assert_eq!(cycle.advance(), ActiveInterval::Round { round: 0 });
    }
}
