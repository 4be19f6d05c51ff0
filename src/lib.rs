//! Cycle-day, phase and fertile-window calculations for menstrual cycle
//! tracking.
//!
//! Given a [`CycleConfig`] (the start of the most recent period plus cycle
//! and period lengths) and a query date, the calculator answers which cycle
//! day the date is, which [`Phase`] it falls in, when the next period is
//! projected and where the fertile window lies.
//!
//! The fertile window is a fixed calendar offset from the period start, not a
//! medical prediction.
//!
//! ```
//! use chrono::NaiveDate;
//! use cycle_phase::{CycleConfig, Phase, cycle_day_of, phase_of};
//!
//! let start = NaiveDate::from_ymd_opt(2025, 9, 1).unwrap();
//! let config = CycleConfig::new(start);
//! let today = NaiveDate::from_ymd_opt(2025, 9, 13).unwrap();
//!
//! let day = cycle_day_of(today, &config).unwrap();
//! assert_eq!(day.get(), 13);
//! assert_eq!(phase_of(day.get(), &config).unwrap(), Phase::Follicular);
//! ```

mod calculator;
mod calendar;
mod config;
mod consts;
mod phase;
mod prelude;
mod range;
mod types;

pub use calculator::{
    CyclePosition, PhaseResult, cycle_day_of, cycle_position, days_until_next_period, evaluate,
    fertile_window, is_fertile, next_period, phase_of, phase_on, upcoming_periods,
};
pub use calendar::{DayPhase, month_phases};
pub use config::{ConfigError, CycleConfig};
pub use consts::*;
pub use phase::{Phase, PhaseBoundaries, UnknownPhase};
pub use range::{DateRange, RangeError};
pub use types::{CycleDay, CycleLength, PeriodDuration};

use chrono::NaiveDate;

/// Errors returned by the calculator.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CycleError {
    /// A cycle day outside `1..=cycle_length` reached the phase table.
    /// Always a bug in the caller's day computation.
    #[error("Cycle day {day} is outside 1..={cycle_length}")]
    OutOfRange { day: u16, cycle_length: u16 },

    /// No period start has been logged; the cycle is untracked.
    #[error("No cycle start date configured")]
    MissingStartDate,

    #[error(transparent)]
    InvalidConfig(#[from] ConfigError),

    #[error(transparent)]
    InvalidRange(#[from] RangeError),

    #[error("Invalid calendar month: {year}-{month:02}")]
    InvalidMonth { year: i32, month: u32 },

    /// Date arithmetic ran past chrono's supported range.
    #[error("Adding {days} days to {date} leaves the supported date range")]
    DateOverflow { date: NaiveDate, days: u64 },
}
