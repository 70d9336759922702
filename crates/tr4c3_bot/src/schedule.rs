//! When the bot runs its next cycle.
//!
//! Three schedule shapes are supported: a random whole-minute interval (the
//! standalone bot's default), a fixed interval, and a cron expression.

use chrono::{DateTime, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use std::time::Duration;
use tr4c3_error::ConfigError;

/// Types of cycle schedules.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type")]
pub enum ScheduleType {
    /// Uniformly random whole number of minutes in `min_minutes..=max_minutes`
    RandomInterval {
        /// Shortest wait in minutes
        min_minutes: u64,
        /// Longest wait in minutes
        max_minutes: u64,
    },

    /// Fixed interval in seconds
    Interval {
        /// Interval duration in seconds
        seconds: u64,
    },

    /// Cron expression (7 fields: sec min hour day month weekday year)
    ///
    /// Example: "0 0 * * * * *" = top of every hour
    Cron {
        /// Cron expression string
        expression: String,
    },
}

impl Default for ScheduleType {
    fn default() -> Self {
        Self::RandomInterval {
            min_minutes: 5,
            max_minutes: 10,
        }
    }
}

impl ScheduleType {
    /// Reject schedules that can never fire or would spin.
    pub fn validate(&self) -> Result<(), ConfigError> {
        match self {
            ScheduleType::RandomInterval {
                min_minutes,
                max_minutes,
            } => {
                if *min_minutes == 0 {
                    return Err(ConfigError::new("RandomInterval min_minutes must be at least 1"));
                }
                if min_minutes > max_minutes {
                    return Err(ConfigError::new(format!(
                        "RandomInterval min_minutes ({}) exceeds max_minutes ({})",
                        min_minutes, max_minutes
                    )));
                }
                Ok(())
            }
            ScheduleType::Interval { seconds } => {
                if *seconds == 0 {
                    return Err(ConfigError::new("Interval seconds must be at least 1"));
                }
                Ok(())
            }
            ScheduleType::Cron { expression } => cron::Schedule::from_str(expression)
                .map(|_| ())
                .map_err(|e| {
                    ConfigError::new(format!("Invalid cron expression {:?}: {}", expression, e))
                }),
        }
    }

    /// Wait before the next cycle, measured from `now`.
    ///
    /// Returns `None` when the schedule has no future firing or the cron
    /// expression does not parse.
    pub fn next_delay<R: Rng + ?Sized>(&self, now: DateTime<Utc>, rng: &mut R) -> Option<Duration> {
        match self {
            ScheduleType::RandomInterval {
                min_minutes,
                max_minutes,
            } => {
                let (low, high) = if min_minutes <= max_minutes {
                    (*min_minutes, *max_minutes)
                } else {
                    (*max_minutes, *min_minutes)
                };
                let minutes = rng.gen_range(low..=high);
                Some(Duration::from_secs(minutes * 60))
            }
            ScheduleType::Interval { seconds } => Some(Duration::from_secs(*seconds)),
            ScheduleType::Cron { expression } => {
                let schedule = cron::Schedule::from_str(expression).ok()?;
                let next = schedule.after(&now).next()?;
                Some((next - now).to_std().unwrap_or(Duration::ZERO))
            }
        }
    }
}
