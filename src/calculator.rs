//! Cycle-day, phase and projection calculations.
//!
//! Every function here is pure: the reference date is always an argument and
//! nothing reads the system clock, so results depend only on the inputs.

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::consts::{FERTILE_WINDOW_END_OFFSET, FERTILE_WINDOW_START_OFFSET};
use crate::phase::{Phase, PhaseBoundaries};
use crate::types::{CycleDay, CycleLength};
use crate::{CycleConfig, CycleError, DateRange};

/// Where a date sits in the cycle, or `Indeterminate` if no period has been
/// logged yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CyclePosition {
    Day(CycleDay),
    Indeterminate,
}

impl CyclePosition {
    pub const fn day(self) -> Option<CycleDay> {
        match self {
            Self::Day(day) => Some(day),
            Self::Indeterminate => None,
        }
    }

    pub const fn is_indeterminate(self) -> bool {
        matches!(self, Self::Indeterminate)
    }
}

/// Everything the calculator knows about one date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PhaseResult {
    pub cycle_day:        CycleDay,
    pub phase:            Phase,
    pub next_period_date: NaiveDate,
    pub fertile_window:   DateRange,
}

/// 1-indexed day of `query` within its cycle.
///
/// Dates before the start date map onto the equivalent day of a preceding
/// cycle, so the result is always in `1..=cycle_length`.
///
/// # Errors
/// Returns `CycleError::MissingStartDate` for an untracked config.
pub fn cycle_day_of(query: NaiveDate, config: &CycleConfig) -> Result<CycleDay, CycleError> {
    let start = start_of(config)?;
    cycle_day_at(days_between(start, query), config.cycle_length())
}

/// Like [`cycle_day_of`], but reports an untracked config as
/// [`CyclePosition::Indeterminate`] instead of an error.
pub fn cycle_position(query: NaiveDate, config: &CycleConfig) -> CyclePosition {
    match cycle_day_of(query, config) {
        Ok(day) => CyclePosition::Day(day),
        Err(_) => CyclePosition::Indeterminate,
    }
}

/// Phase of a cycle day using the configured default period duration.
///
/// # Errors
/// Returns `CycleError::OutOfRange` if `cycle_day` is outside
/// `1..=cycle_length`.
pub fn phase_of(cycle_day: u16, config: &CycleConfig) -> Result<Phase, CycleError> {
    PhaseBoundaries::new(config.period_duration().get(), config.cycle_length()).phase_for(cycle_day)
}

/// Phase of a calendar date.
///
/// Within the current cycle a recorded period end date decides the menstrual
/// phase: exactly `start..=period_end` is menstrual. Earlier and later cycles
/// have no recorded end and use the default period duration.
///
/// # Errors
/// Returns `CycleError::MissingStartDate` for an untracked config.
pub fn phase_on(query: NaiveDate, config: &CycleConfig) -> Result<Phase, CycleError> {
    let start = start_of(config)?;
    let delta = days_between(start, query);
    let day = cycle_day_at(delta, config.cycle_length())?;
    boundaries_at(delta, config).phase_for(day.get())
}

/// Projected start of the next period: `start + cycle_length` days.
///
/// # Errors
/// Returns `CycleError::MissingStartDate` for an untracked config, or
/// `CycleError::DateOverflow` past chrono's last representable date.
pub fn next_period(config: &CycleConfig) -> Result<NaiveDate, CycleError> {
    let start = start_of(config)?;
    add_days(start, u64::from(config.cycle_length().get()))
}

/// Fixed-offset fertile window `[start + 10, start + 17]`, both ends
/// inclusive. This is a calendar convention, not an ovulation estimate.
///
/// # Errors
/// Returns `CycleError::MissingStartDate` for an untracked config.
pub fn fertile_window(config: &CycleConfig) -> Result<DateRange, CycleError> {
    let start = start_of(config)?;
    let window = DateRange::new(
        add_days(start, FERTILE_WINDOW_START_OFFSET)?,
        add_days(start, FERTILE_WINDOW_END_OFFSET)?,
    )?;
    Ok(window)
}

/// Computes day, phase, next period and fertile window for `query`.
///
/// # Errors
/// Returns `CycleError::MissingStartDate` for an untracked config.
pub fn evaluate(query: NaiveDate, config: &CycleConfig) -> Result<PhaseResult, CycleError> {
    let result = PhaseResult {
        cycle_day:        cycle_day_of(query, config)?,
        phase:            phase_on(query, config)?,
        next_period_date: next_period(config)?,
        fertile_window:   fertile_window(config)?,
    };
    tracing::trace!(
        %query,
        cycle_day = result.cycle_day.get(),
        phase = %result.phase,
        "evaluated cycle position"
    );
    Ok(result)
}

/// Signed number of days from `today` to the projected next period.
/// Negative once the projected date has passed.
///
/// # Errors
/// Returns `CycleError::MissingStartDate` for an untracked config.
pub fn days_until_next_period(today: NaiveDate, config: &CycleConfig) -> Result<i64, CycleError> {
    Ok(days_between(today, next_period(config)?))
}

/// Whether `query` falls inside the fertile window.
///
/// # Errors
/// Returns `CycleError::MissingStartDate` for an untracked config.
pub fn is_fertile(query: NaiveDate, config: &CycleConfig) -> Result<bool, CycleError> {
    Ok(fertile_window(config)?.contains(query))
}

/// Projected bleeding days for the next `count` cycles, earliest first.
/// Each projection starts a whole number of cycles after the tracked start
/// and lasts the default period duration.
///
/// # Errors
/// Returns `CycleError::MissingStartDate` for an untracked config, or
/// `CycleError::DateOverflow` past chrono's last representable date.
pub fn upcoming_periods(config: &CycleConfig, count: u16) -> Result<Vec<DateRange>, CycleError> {
    let start = start_of(config)?;
    let cycle_length = u64::from(config.cycle_length().get());
    let last_bleeding_offset = u64::from(config.period_duration().get() - 1);

    (1..=u64::from(count))
        .map(|cycle| -> Result<DateRange, CycleError> {
            let period_start = add_days(start, cycle * cycle_length)?;
            let period_end = add_days(period_start, last_bleeding_offset)?;
            Ok(DateRange::new(period_start, period_end)?)
        })
        .collect()
}

fn start_of(config: &CycleConfig) -> Result<NaiveDate, CycleError> {
    config.start_date().ok_or(CycleError::MissingStartDate)
}

fn days_between(from: NaiveDate, to: NaiveDate) -> i64 {
    (to - from).num_days()
}

fn add_days(date: NaiveDate, days: u64) -> Result<NaiveDate, CycleError> {
    date.checked_add_days(Days::new(days))
        .ok_or(CycleError::DateOverflow { date, days })
}

/// Cycle day for a signed day offset from the start date.
fn cycle_day_at(delta: i64, cycle_length: CycleLength) -> Result<CycleDay, CycleError> {
    let offset = delta.rem_euclid(i64::from(cycle_length.get()));
    let day = u16::try_from(offset + 1).map_err(|_| CycleError::OutOfRange {
        day:          u16::MAX,
        cycle_length: cycle_length.get(),
    })?;
    CycleDay::new(day, cycle_length)
}

/// Phase table for the cycle containing `delta`. Only the current cycle
/// (`0 <= delta < cycle_length`) honours a recorded period end.
fn boundaries_at(delta: i64, config: &CycleConfig) -> PhaseBoundaries {
    let in_current_cycle = (0..i64::from(config.cycle_length().get())).contains(&delta);
    let menstrual_days = config
        .recorded_period_days()
        .filter(|_| in_current_cycle)
        .and_then(|days| u16::try_from(days).ok())
        .unwrap_or_else(|| config.period_duration().get());
    PhaseBoundaries::new(menstrual_days, config.cycle_length())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::date;
    use proptest::prelude::*;

    fn september() -> CycleConfig {
        CycleConfig::new(date(2025, 9, 1))
    }

    #[test]
    fn test_cycle_day_of_start_is_one() {
        assert_eq!(cycle_day_of(date(2025, 9, 1), &september()).unwrap().get(), 1);
        assert_eq!(cycle_day_of(date(2025, 9, 28), &september()).unwrap().get(), 28);
        assert_eq!(cycle_day_of(date(2025, 9, 29), &september()).unwrap().get(), 1);
    }

    #[test]
    fn test_cycle_day_of_before_start() {
        // One day before the start is the last day of the previous cycle
        assert_eq!(cycle_day_of(date(2025, 8, 31), &september()).unwrap().get(), 28);
        assert_eq!(cycle_day_of(date(2025, 8, 4), &september()).unwrap().get(), 1);
        assert_eq!(cycle_day_of(date(2025, 8, 3), &september()).unwrap().get(), 28);
    }

    #[test]
    fn test_cycle_day_of_untracked() {
        let result = cycle_day_of(date(2025, 9, 1), &CycleConfig::untracked());
        assert_eq!(result, Err(CycleError::MissingStartDate));
    }

    #[test]
    fn test_cycle_position() {
        let position = cycle_position(date(2025, 9, 13), &september());
        assert_eq!(position.day().map(CycleDay::get), Some(13));
        assert!(!position.is_indeterminate());

        let position = cycle_position(date(2025, 9, 13), &CycleConfig::untracked());
        assert_eq!(position, CyclePosition::Indeterminate);
        assert_eq!(position.day(), None);
    }

    #[test]
    fn test_phase_of_uses_period_duration() {
        let config = september().with_period_duration(7).unwrap();
        assert_eq!(phase_of(7, &config).unwrap(), Phase::Menstrual);
        assert_eq!(phase_of(8, &config).unwrap(), Phase::Follicular);
    }

    #[test]
    fn test_phase_of_works_without_start_date() {
        assert_eq!(phase_of(14, &CycleConfig::untracked()).unwrap(), Phase::Ovulatory);
    }

    #[test]
    fn test_phase_of_out_of_range() {
        let config = september().with_cycle_length(30).unwrap();
        assert!(phase_of(30, &config).is_ok());
        assert_eq!(
            phase_of(31, &config),
            Err(CycleError::OutOfRange {
                day:          31,
                cycle_length: 30,
            })
        );
        assert!(matches!(phase_of(0, &config), Err(CycleError::OutOfRange { .. })));
    }

    #[test]
    fn test_phase_on_recorded_period_end_shortens_menstrual() {
        let config = september().with_period_end(date(2025, 9, 3)).unwrap();
        assert_eq!(phase_on(date(2025, 9, 1), &config).unwrap(), Phase::Menstrual);
        assert_eq!(phase_on(date(2025, 9, 3), &config).unwrap(), Phase::Menstrual);
        assert_eq!(phase_on(date(2025, 9, 4), &config).unwrap(), Phase::Follicular);
        assert_eq!(phase_on(date(2025, 9, 5), &config).unwrap(), Phase::Follicular);
    }

    #[test]
    fn test_phase_on_recorded_period_end_lengthens_menstrual() {
        let config = september().with_period_end(date(2025, 9, 7)).unwrap();
        assert_eq!(phase_on(date(2025, 9, 7), &config).unwrap(), Phase::Menstrual);
        assert_eq!(phase_on(date(2025, 9, 8), &config).unwrap(), Phase::Follicular);
    }

    #[test]
    fn test_phase_on_period_end_ignored_outside_current_cycle() {
        let config = september().with_period_end(date(2025, 9, 3)).unwrap();
        // Day 4 of the previous cycle falls back to the default 5-day period
        assert_eq!(cycle_day_of(date(2025, 8, 7), &config).unwrap().get(), 4);
        assert_eq!(phase_on(date(2025, 8, 7), &config).unwrap(), Phase::Menstrual);
        // Same for day 4 of the next cycle
        assert_eq!(phase_on(date(2025, 10, 2), &config).unwrap(), Phase::Menstrual);
    }

    #[test]
    fn test_phase_on_untracked() {
        let result = phase_on(date(2025, 9, 1), &CycleConfig::untracked());
        assert_eq!(result, Err(CycleError::MissingStartDate));
    }

    #[test]
    fn test_next_period_rolls_over_year() {
        let config = CycleConfig::new(date(2025, 12, 20));
        assert_eq!(next_period(&config).unwrap(), date(2026, 1, 17));
    }

    #[test]
    fn test_next_period_leap_february() {
        let config = CycleConfig::new(date(2024, 2, 10));
        assert_eq!(next_period(&config).unwrap(), date(2024, 3, 9));
    }

    #[test]
    fn test_next_period_overflow() {
        let config = CycleConfig::new(NaiveDate::MAX);
        assert!(matches!(next_period(&config), Err(CycleError::DateOverflow { .. })));
    }

    #[test]
    fn test_fertile_window_across_month_boundary() {
        let window = fertile_window(&CycleConfig::new(date(2025, 1, 25))).unwrap();
        assert_eq!(window.dates(), (date(2025, 2, 4), date(2025, 2, 11)));
        assert_eq!(window.len_days(), 8);
    }

    #[test]
    fn test_evaluate() {
        let result = evaluate(date(2025, 9, 14), &september()).unwrap();
        assert_eq!(result.cycle_day.get(), 14);
        assert_eq!(result.phase, Phase::Ovulatory);
        assert_eq!(result.next_period_date, date(2025, 9, 29));
        assert_eq!(result.fertile_window.dates(), (date(2025, 9, 11), date(2025, 9, 18)));
    }

    #[test]
    fn test_evaluate_serde_string_format() {
        let result = evaluate(date(2025, 9, 2), &september()).unwrap();
        let json = serde_json::to_string(&result).unwrap();
        assert_eq!(
            json,
            r#"{"cycleDay":2,"phase":"menstrual","nextPeriodDate":"2025-09-29","fertileWindow":"2025-09-11/2025-09-18"}"#
        );
    }

    #[test]
    fn test_days_until_next_period() {
        assert_eq!(days_until_next_period(date(2025, 9, 20), &september()).unwrap(), 9);
        assert_eq!(days_until_next_period(date(2025, 9, 29), &september()).unwrap(), 0);
        assert_eq!(days_until_next_period(date(2025, 10, 2), &september()).unwrap(), -3);
    }

    #[test]
    fn test_is_fertile() {
        assert!(!is_fertile(date(2025, 9, 10), &september()).unwrap());
        assert!(is_fertile(date(2025, 9, 11), &september()).unwrap());
        assert!(is_fertile(date(2025, 9, 18), &september()).unwrap());
        assert!(!is_fertile(date(2025, 9, 19), &september()).unwrap());
    }

    #[test]
    fn test_upcoming_periods() {
        let periods = upcoming_periods(&september(), 2).unwrap();
        assert_eq!(periods.len(), 2);
        assert_eq!(periods[0].dates(), (date(2025, 9, 29), date(2025, 10, 3)));
        assert_eq!(periods[1].dates(), (date(2025, 10, 27), date(2025, 10, 31)));
        assert_eq!(periods[0].start(), next_period(&september()).unwrap());

        assert!(upcoming_periods(&september(), 0).unwrap().is_empty());
        assert_eq!(
            upcoming_periods(&CycleConfig::untracked(), 3),
            Err(CycleError::MissingStartDate)
        );
    }

    proptest! {
        #[test]
        fn prop_cycle_day_is_periodic(
            cycle_length in 1u16..=60,
            cycles in -20i64..=20,
            k_seed in 0u16..1000,
        ) {
            let start = date(2025, 9, 1);
            let config = CycleConfig::new(start)
                .with_period_duration(1)
                .and_then(|c| c.with_cycle_length(cycle_length))
                .unwrap();
            let k = i64::from(k_seed % cycle_length);
            let query = start + chrono::Duration::days(cycles * i64::from(cycle_length) + k);

            let day = cycle_day_of(query, &config).unwrap();
            prop_assert_eq!(i64::from(day.get()), k + 1);
        }

        #[test]
        fn prop_every_date_has_day_and_phase(offset in -5000i64..=5000, cycle_length in 21u16..=45) {
            let start = date(2025, 9, 1);
            let config = CycleConfig::new(start).with_cycle_length(cycle_length).unwrap();
            let query = start + chrono::Duration::days(offset);

            let day = cycle_day_of(query, &config).unwrap();
            prop_assert!((1..=cycle_length).contains(&day.get()));
            prop_assert!(phase_of(day.get(), &config).is_ok());
            prop_assert!(phase_on(query, &config).is_ok());
            prop_assert_eq!(evaluate(query, &config).unwrap(), evaluate(query, &config).unwrap());
        }

        #[test]
        fn prop_next_period_is_one_cycle_after_start(offset in -100_000i64..=100_000, cycle_length in 1u16..=400) {
            let start = date(2000, 1, 1) + chrono::Duration::days(offset);
            let config = CycleConfig::new(start)
                .with_period_duration(1)
                .and_then(|c| c.with_cycle_length(cycle_length))
                .unwrap();
            let next = next_period(&config).unwrap();
            prop_assert_eq!((next - start).num_days(), i64::from(cycle_length));
        }
    }
}
