//! Cycle configuration: the caller-owned input state for every calculation.
//!
//! A [`CycleConfig`] is validated once when it is built (or deserialized) and
//! is never mutated by the calculator. Logging a new period means building a
//! new config.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::types::{CycleLength, PeriodDuration};

/// Reasons a cycle configuration is rejected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("Cycle length must be at least 1 day")]
    ZeroCycleLength,

    #[error("Period duration must be at least 1 day")]
    ZeroPeriodDuration,

    /// Recorded period end precedes the period start.
    #[error("Period end ({end}) is before period start ({start})")]
    PeriodEndBeforeStart { start: NaiveDate, end: NaiveDate },

    /// A period end was given with no period start to anchor it.
    #[error("Period end date requires a period start date")]
    PeriodEndWithoutStart,

    /// The menstrual phase would not fit inside a single cycle.
    #[error("Period of {period_days} days does not fit in a {cycle_length}-day cycle")]
    PeriodExceedsCycle { period_days: i64, cycle_length: u16 },
}

/// The minimal state needed to compute phase data for any date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "RawCycleConfig", into = "RawCycleConfig")]
pub struct CycleConfig {
    start_date:      Option<NaiveDate>,
    period_end_date: Option<NaiveDate>,
    cycle_length:    CycleLength,
    period_duration: PeriodDuration,
}

impl CycleConfig {
    /// A tracked cycle starting on `start_date` with default lengths.
    pub fn new(start_date: NaiveDate) -> Self {
        Self {
            start_date: Some(start_date),
            ..Self::default()
        }
    }

    /// No period logged yet. Every day/phase query on this config reports
    /// a missing start date.
    pub fn untracked() -> Self {
        Self::default()
    }

    /// Builds a config from raw parts, running every validation rule.
    ///
    /// # Errors
    /// Returns a `ConfigError` describing the first rule that fails.
    pub fn from_parts(
        start_date: Option<NaiveDate>,
        period_end_date: Option<NaiveDate>,
        cycle_length_days: u16,
        period_duration_days: u16,
    ) -> Result<Self, ConfigError> {
        let config = Self {
            start_date,
            period_end_date,
            cycle_length: CycleLength::new(cycle_length_days)?,
            period_duration: PeriodDuration::new(period_duration_days)?,
        };
        config.validate()?;
        Ok(config)
    }

    /// Replaces the cycle length.
    ///
    /// # Errors
    /// Fails if the length is zero or shorter than the period.
    pub fn with_cycle_length(self, days: u16) -> Result<Self, ConfigError> {
        let config = Self {
            cycle_length: CycleLength::new(days)?,
            ..self
        };
        config.validate()?;
        Ok(config)
    }

    /// Replaces the default period duration.
    ///
    /// # Errors
    /// Fails if the duration is zero or longer than the cycle.
    pub fn with_period_duration(self, days: u16) -> Result<Self, ConfigError> {
        let config = Self {
            period_duration: PeriodDuration::new(days)?,
            ..self
        };
        config.validate()?;
        Ok(config)
    }

    /// Records the last bleeding day of the current period.
    ///
    /// # Errors
    /// Fails if no start date is set, if `end` precedes it, or if the
    /// period would be longer than the cycle.
    pub fn with_period_end(self, end: NaiveDate) -> Result<Self, ConfigError> {
        let config = Self {
            period_end_date: Some(end),
            ..self
        };
        config.validate()?;
        Ok(config)
    }

    pub const fn start_date(&self) -> Option<NaiveDate> {
        self.start_date
    }

    pub const fn period_end_date(&self) -> Option<NaiveDate> {
        self.period_end_date
    }

    pub const fn cycle_length(&self) -> CycleLength {
        self.cycle_length
    }

    pub const fn period_duration(&self) -> PeriodDuration {
        self.period_duration
    }

    pub const fn is_tracked(&self) -> bool {
        self.start_date.is_some()
    }

    /// Length in days of the recorded current period, if an end date is set
    pub fn recorded_period_days(&self) -> Option<i64> {
        match (self.start_date, self.period_end_date) {
            (Some(start), Some(end)) => Some((end - start).num_days() + 1),
            _ => None,
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        let cycle_length = self.cycle_length.get();

        if self.period_duration.get() > cycle_length {
            return Err(reject(ConfigError::PeriodExceedsCycle {
                period_days: i64::from(self.period_duration.get()),
                cycle_length,
            }));
        }

        match (self.start_date, self.period_end_date) {
            (None, Some(_)) => Err(reject(ConfigError::PeriodEndWithoutStart)),
            (Some(start), Some(end)) if end < start => {
                Err(reject(ConfigError::PeriodEndBeforeStart { start, end }))
            }
            (Some(start), Some(end)) => {
                let period_days = (end - start).num_days() + 1;
                if period_days > i64::from(cycle_length) {
                    return Err(reject(ConfigError::PeriodExceedsCycle {
                        period_days,
                        cycle_length,
                    }));
                }
                Ok(())
            }
            (_, None) => Ok(()),
        }
    }
}

fn reject(error: ConfigError) -> ConfigError {
    tracing::debug!(%error, "rejected cycle config");
    error
}

/// Wire form of [`CycleConfig`]; lengths default to 28/5 when omitted.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawCycleConfig {
    #[serde(default)]
    start_date:           Option<NaiveDate>,
    #[serde(default)]
    period_end_date:      Option<NaiveDate>,
    #[serde(default = "default_cycle_length")]
    cycle_length_days:    u16,
    #[serde(default = "default_period_duration")]
    period_duration_days: u16,
}

fn default_cycle_length() -> u16 {
    CycleLength::default().get()
}

fn default_period_duration() -> u16 {
    PeriodDuration::default().get()
}

impl TryFrom<RawCycleConfig> for CycleConfig {
    type Error = ConfigError;

    fn try_from(raw: RawCycleConfig) -> Result<Self, Self::Error> {
        Self::from_parts(
            raw.start_date,
            raw.period_end_date,
            raw.cycle_length_days,
            raw.period_duration_days,
        )
    }
}

impl From<CycleConfig> for RawCycleConfig {
    fn from(config: CycleConfig) -> Self {
        Self {
            start_date:           config.start_date,
            period_end_date:      config.period_end_date,
            cycle_length_days:    config.cycle_length.get(),
            period_duration_days: config.period_duration.get(),
        }
    }
}
