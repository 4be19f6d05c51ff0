use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::calculator::{cycle_day_of, phase_on};
use crate::phase::Phase;
use crate::types::CycleDay;
use crate::{CycleConfig, CycleError};

/// One cell of a month calendar
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DayPhase {
    pub date:      NaiveDate,
    pub cycle_day: CycleDay,
    pub phase:     Phase,
}

/// Classifies every day of a calendar month, first day to last.
///
/// Days before the tracked start are classified as part of earlier cycles,
/// so every returned cell carries a phase.
///
/// # Errors
/// Returns `CycleError::InvalidMonth` if `month` is not 1-12 (or the year is
/// outside chrono's range), and `CycleError::MissingStartDate` for an
/// untracked config.
pub fn month_phases(year: i32, month: u32, config: &CycleConfig) -> Result<Vec<DayPhase>, CycleError> {
    let first = NaiveDate::from_ymd_opt(year, month, 1).ok_or(CycleError::InvalidMonth { year, month })?;

    let cells = first
        .iter_days()
        .take_while(|date| date.month() == month)
        .map(|date| -> Result<DayPhase, CycleError> {
            Ok(DayPhase {
                date,
                cycle_day: cycle_day_of(date, config)?,
                phase: phase_on(date, config)?,
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    tracing::trace!(year, month, cells = cells.len(), "classified calendar month");
    Ok(cells)
}
