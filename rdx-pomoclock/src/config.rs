//! Defines the configuration of a pomodoro session.
//!
//! The configuration is fixed once a scheduler is constructed. It can be
//! built in code, or loaded with the `config` crate from an optional TOML
//! file layered under `POMO_*` environment variables
//! (e.g. `POMO_ROUND_SECS=1500`).

use crate::error::{Result, SchedulerError};
use config::builder::DefaultState;
use config::{ConfigBuilder, Environment, File};
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

/// Durations and cycle length for one pomodoro session.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PomodoroConfig {
    /// Length of a work round, in seconds.
    #[serde(default = "default_round_secs")]
    pub round_secs: u64,

    /// Length of a regular break, in seconds.
    #[serde(default = "default_break_secs")]
    pub break_secs: u64,

    /// Length of the break that follows the last round of a cycle, in seconds.
    #[serde(default = "default_long_break_secs")]
    pub long_break_secs: u64,

    /// Number of rounds in a full cycle.
    #[serde(default = "default_rounds")]
    pub rounds: u16,
}

impl PomodoroConfig {
    pub fn new(round_secs: u64, break_secs: u64, long_break_secs: u64, rounds: u16) -> Self {
        Self {
            round_secs,
            break_secs,
            long_break_secs,
            rounds,
        }
    }

    /// Loads a configuration from an optional TOML file, with `POMO_*`
    /// environment variables taking precedence. Missing keys fall back to
    /// the defaults. The result is validated.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut builder = config::Config::builder();
        if let Some(path) = path {
            builder = builder.add_source(File::from(path).required(false));
        }
        builder = builder.add_source(Environment::with_prefix("POMO").try_parsing(true));
        Self::extract(builder)
    }

    pub(crate) fn extract(builder: ConfigBuilder<DefaultState>) -> Result<Self> {
        let config: Self = builder.build()?.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Rejects zero-length intervals and an empty cycle.
    pub fn validate(&self) -> Result<()> {
        let positive = [
            ("round_secs", self.round_secs),
            ("break_secs", self.break_secs),
            ("long_break_secs", self.long_break_secs),
            ("rounds", u64::from(self.rounds)),
        ];
        for (key, value) in positive {
            if value == 0 {
                return Err(SchedulerError::InvalidConfig {
                    key,
                    message: "must be greater than zero".to_string(),
                });
            }
        }
        Ok(())
    }

    pub fn round_duration(&self) -> Duration {
        Duration::from_secs(self.round_secs)
    }

    pub fn break_duration(&self) -> Duration {
        Duration::from_secs(self.break_secs)
    }

    pub fn long_break_duration(&self) -> Duration {
        Duration::from_secs(self.long_break_secs)
    }
}

// --- Default value functions for serde ---

fn default_round_secs() -> u64 {
    25 * 60
}

fn default_break_secs() -> u64 {
    5 * 60
}

fn default_long_break_secs() -> u64 {
    15 * 60
}

fn default_rounds() -> u16 {
    4
}

impl Default for PomodoroConfig {
    fn default() -> Self {
        Self {
            round_secs: default_round_secs(),
            break_secs: default_break_secs(),
            long_break_secs: default_long_break_secs(),
            rounds: default_rounds(),
        }
    }
}
