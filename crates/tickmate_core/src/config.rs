//! Calendar configuration supplied by the host application.
//!
//! # Responsibility
//! - Carry the day-rollover and week-start preferences into the calculator.
//! - Validate preference ranges before any offset arithmetic runs.
//!
//! # Invariants
//! - `rollover_minutes_after_midnight < 1440` (strictly inside one day).
//! - `week_start_day` is a Sunday-based weekday index in `0..=6`.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Minutes in one day; the rollover shift must stay below this.
pub const MINUTES_PER_DAY: u32 = 24 * 60;

/// Configuration validation failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Rollover shift is a full day or more.
    RolloverOutOfRange(u32),
    /// Week start is not a Sunday-based weekday index.
    WeekStartOutOfRange(u8),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::RolloverOutOfRange(minutes) => write!(
                f,
                "rollover of {minutes} minutes must be below {MINUTES_PER_DAY}"
            ),
            Self::WeekStartOutOfRange(day) => {
                write!(f, "week start day {day} must be in 0..=6 (0 = Sunday)")
            }
        }
    }
}

impl Error for ConfigError {}

/// User preferences governing logical-day and week arithmetic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarConfig {
    /// How far past midnight the user's "today" extends (e.g. 180 = 3:00 AM).
    pub rollover_minutes_after_midnight: u32,
    /// First day of the logical week, Sunday-based (0 = Sunday .. 6 = Saturday).
    pub week_start_day: u8,
}

impl CalendarConfig {
    /// Checks preference ranges.
    ///
    /// # Errors
    /// - `RolloverOutOfRange` when the shift reaches a full day.
    /// - `WeekStartOutOfRange` when the weekday index is above 6.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.rollover_minutes_after_midnight >= MINUTES_PER_DAY {
            return Err(ConfigError::RolloverOutOfRange(
                self.rollover_minutes_after_midnight,
            ));
        }
        if self.week_start_day > 6 {
            return Err(ConfigError::WeekStartOutOfRange(self.week_start_day));
        }
        Ok(())
    }
}

impl Default for CalendarConfig {
    /// Midnight rollover, Monday week start.
    fn default() -> Self {
        Self {
            rollover_minutes_after_midnight: 0,
            week_start_day: 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{CalendarConfig, ConfigError, MINUTES_PER_DAY};

    #[test]
    fn default_config_is_valid() {
        assert!(CalendarConfig::default().validate().is_ok());
    }

    #[test]
    fn rejects_full_day_rollover() {
        let config = CalendarConfig {
            rollover_minutes_after_midnight: MINUTES_PER_DAY,
            ..CalendarConfig::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::RolloverOutOfRange(MINUTES_PER_DAY))
        );
    }

    #[test]
    fn rejects_weekday_index_above_saturday() {
        let config = CalendarConfig {
            week_start_day: 7,
            ..CalendarConfig::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::WeekStartOutOfRange(7)));
    }

    #[test]
    fn three_am_rollover_is_valid() {
        let config = CalendarConfig {
            rollover_minutes_after_midnight: 180,
            ..CalendarConfig::default()
        };
        assert!(config.validate().is_ok());
    }
}
