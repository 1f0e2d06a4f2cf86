//! Core configuration for quizreel-animation-core.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Time source used by loops that derive a phase from "now".
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClockSource {
    /// Scheduler time (frames × dt). Reproducible across renders.
    #[default]
    Simulated,
    /// Real elapsed time since the scheduler was created.
    WallClock,
}

/// Configuration for scheduler stepping.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Simulated frames per second used by `Scheduler::step_frame`.
    pub frame_rate: f32,

    /// Clock read by phase-driven loops (floating animation).
    pub clock: ClockSource,

    /// Maximum events retained per tick; extra events are dropped.
    pub max_events_per_tick: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            frame_rate: 60.0,
            clock: ClockSource::Simulated,
            max_events_per_tick: 4096,
        }
    }
}

impl Config {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.frame_rate.is_finite() || self.frame_rate <= 0.0 {
            return Err(ConfigError::InvalidFrameRate {
                value: self.frame_rate,
            });
        }
        Ok(())
    }

    /// Seconds per simulated frame.
    #[inline]
    pub fn frame_dt(&self) -> f32 {
        1.0 / self.frame_rate
    }

    /// Parse a (possibly partial) JSON config; missing fields use defaults.
    pub fn from_json_str(s: &str) -> Result<Self, ConfigError> {
        let cfg: Config = serde_json::from_str(s).map_err(|e| ConfigError::Parse {
            reason: e.to_string(),
        })?;
        cfg.validate()?;
        Ok(cfg)
    }
}
