use std::ops::RangeInclusive;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::consts::{FIRST_CYCLE_DAY, FOLLICULAR_END_DAY, OVULATORY_END_DAY};
use crate::types::CycleLength;
use crate::{CycleError, prelude::*};

/// Coarse classification of where in the cycle a day falls.
/// Variants are ordered the way they occur within a cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    #[display(fmt = "menstrual")]
    Menstrual,
    #[display(fmt = "follicular")]
    Follicular,
    #[display(fmt = "ovulatory")]
    Ovulatory,
    #[display(fmt = "luteal")]
    Luteal,
}

impl Phase {
    /// All phases in cycle order
    pub const ALL: [Self; 4] = [Self::Menstrual, Self::Follicular, Self::Ovulatory, Self::Luteal];

    /// The phase that follows this one; luteal wraps to menstrual
    pub const fn next(self) -> Self {
        match self {
            Self::Menstrual => Self::Follicular,
            Self::Follicular => Self::Ovulatory,
            Self::Ovulatory => Self::Luteal,
            Self::Luteal => Self::Menstrual,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown cycle phase: {0}")]
pub struct UnknownPhase(pub String);

impl FromStr for Phase {
    type Err = UnknownPhase;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Self::ALL
            .into_iter()
            .find(|phase| phase.to_string().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| UnknownPhase(trimmed.to_owned()))
    }
}

/// The last cycle day of each phase for one cycle.
///
/// Boundaries are clamped so they never decrease: a period that runs past day
/// 13 swallows the follicular phase (and past day 15, the ovulatory phase),
/// and a cycle shorter than 15 days truncates the later phases. Empty phases
/// are possible, overlaps are not.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PhaseBoundaries {
    menstrual_end:  u16,
    follicular_end: u16,
    ovulatory_end:  u16,
    cycle_length:   u16,
}

impl PhaseBoundaries {
    /// Computes boundaries for a menstrual phase of `menstrual_days` days.
    /// `menstrual_days` is clamped to the cycle length.
    pub fn new(menstrual_days: u16, cycle_length: CycleLength) -> Self {
        let length = cycle_length.get();
        let menstrual_end = menstrual_days.min(length);
        let follicular_end = menstrual_end.max(FOLLICULAR_END_DAY).min(length);
        let ovulatory_end = menstrual_end.max(OVULATORY_END_DAY).min(length);
        Self {
            menstrual_end,
            follicular_end,
            ovulatory_end,
            cycle_length: length,
        }
    }

    pub const fn cycle_length(&self) -> u16 {
        self.cycle_length
    }

    /// Classifies a cycle day.
    ///
    /// # Errors
    /// Returns `CycleError::OutOfRange` if `day` is outside `1..=cycle_length`.
    pub fn phase_for(&self, day: u16) -> Result<Phase, CycleError> {
        if !(FIRST_CYCLE_DAY..=self.cycle_length).contains(&day) {
            return Err(CycleError::OutOfRange {
                day,
                cycle_length: self.cycle_length,
            });
        }
        let phase = if day <= self.menstrual_end {
            Phase::Menstrual
        } else if day <= self.follicular_end {
            Phase::Follicular
        } else if day <= self.ovulatory_end {
            Phase::Ovulatory
        } else {
            Phase::Luteal
        };
        Ok(phase)
    }

    /// Cycle days covered by `phase`, or `None` when clamping left it empty
    pub fn range_of(&self, phase: Phase) -> Option<RangeInclusive<u16>> {
        let (first, last) = match phase {
            Phase::Menstrual => (Some(FIRST_CYCLE_DAY), self.menstrual_end),
            Phase::Follicular => (self.menstrual_end.checked_add(1), self.follicular_end),
            Phase::Ovulatory => (self.follicular_end.checked_add(1), self.ovulatory_end),
            Phase::Luteal => (self.ovulatory_end.checked_add(1), self.cycle_length),
        };
        let first = first?;
        (first <= last).then_some(first..=last)
    }
}
