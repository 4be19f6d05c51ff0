use crate::config::ConfigError;
use crate::consts::{DEFAULT_CYCLE_LENGTH_DAYS, DEFAULT_PERIOD_DURATION_DAYS, FIRST_CYCLE_DAY};
use crate::CycleError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::NonZeroU16;

/// Total days from one period start to the next.
/// Uses `NonZeroU16` internally, so a zero-length cycle is unrepresentable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u16", into = "u16")]
pub struct CycleLength(NonZeroU16);

impl CycleLength {
    /// Creates a new cycle length, validating that it's non-zero
    ///
    /// # Errors
    /// Returns `ConfigError::ZeroCycleLength` if the value is 0.
    pub fn new(days: u16) -> Result<Self, ConfigError> {
        NonZeroU16::new(days)
            .map(Self)
            .ok_or(ConfigError::ZeroCycleLength)
    }

    /// Returns the number of days as u16
    #[inline]
    pub const fn get(self) -> u16 {
        self.0.get()
    }
}

impl Default for CycleLength {
    fn default() -> Self {
        Self(NonZeroU16::MIN.saturating_add(DEFAULT_CYCLE_LENGTH_DAYS - 1))
    }
}

impl TryFrom<u16> for CycleLength {
    type Error = ConfigError;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<CycleLength> for u16 {
    fn from(length: CycleLength) -> Self {
        length.0.get()
    }
}

impl fmt::Display for CycleLength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Default number of bleeding days, used when no period end date is recorded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u16", into = "u16")]
pub struct PeriodDuration(NonZeroU16);

impl PeriodDuration {
    /// Creates a new period duration, validating that it's non-zero
    ///
    /// # Errors
    /// Returns `ConfigError::ZeroPeriodDuration` if the value is 0.
    pub fn new(days: u16) -> Result<Self, ConfigError> {
        NonZeroU16::new(days)
            .map(Self)
            .ok_or(ConfigError::ZeroPeriodDuration)
    }

    #[inline]
    pub const fn get(self) -> u16 {
        self.0.get()
    }
}

impl Default for PeriodDuration {
    fn default() -> Self {
        Self(NonZeroU16::MIN.saturating_add(DEFAULT_PERIOD_DURATION_DAYS - 1))
    }
}

impl TryFrom<u16> for PeriodDuration {
    type Error = ConfigError;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<PeriodDuration> for u16 {
    fn from(duration: PeriodDuration) -> Self {
        duration.0.get()
    }
}

impl fmt::Display for PeriodDuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A 1-indexed day within a cycle, guaranteed to be in `1..=cycle_length`
/// for the cycle length it was validated against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u16", into = "u16")]
pub struct CycleDay(NonZeroU16);

impl CycleDay {
    /// Creates a new cycle day, validating it against the cycle length
    ///
    /// # Errors
    /// Returns `CycleError::OutOfRange` if the value is 0 or exceeds `cycle_length`.
    pub fn new(day: u16, cycle_length: CycleLength) -> Result<Self, CycleError> {
        match NonZeroU16::new(day) {
            Some(non_zero) if day <= cycle_length.get() => Ok(Self(non_zero)),
            _ => Err(CycleError::OutOfRange {
                day,
                cycle_length: cycle_length.get(),
            }),
        }
    }

    /// Returns the day number as u16
    #[inline]
    pub const fn get(self) -> u16 {
        self.0.get()
    }

    /// Whether this is the first day of the cycle (the period start)
    #[inline]
    pub const fn is_first(self) -> bool {
        self.0.get() == FIRST_CYCLE_DAY
    }
}

impl TryFrom<u16> for CycleDay {
    type Error = CycleError;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        // No cycle length in scope, so only the lower bound can be checked
        NonZeroU16::new(value)
            .map(Self)
            .ok_or(CycleError::OutOfRange {
                day: value,
                cycle_length: u16::MAX,
            })
    }
}

impl From<CycleDay> for u16 {
    fn from(day: CycleDay) -> Self {
        day.0.get()
    }
}

impl fmt::Display for CycleDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cycle_length_default() {
        assert_eq!(CycleLength::default().get(), 28);
    }

    #[test]
    fn test_cycle_length_rejects_zero() {
        assert!(matches!(
            CycleLength::new(0),
            Err(ConfigError::ZeroCycleLength)
        ));
        assert!(CycleLength::new(1).is_ok());
        assert!(CycleLength::new(u16::MAX).is_ok());
    }

    #[test]
    fn test_cycle_length_serde() {
        let length = CycleLength::new(30).unwrap();
        let json = serde_json::to_string(&length).unwrap();
        assert_eq!(json, "30");

        let parsed: CycleLength = serde_json::from_str(&json).unwrap();
        assert_eq!(length, parsed);

        let result: Result<CycleLength, _> = serde_json::from_str("0");
        assert!(result.is_err());
    }

    #[test]
    fn test_period_duration_default() {
        assert_eq!(PeriodDuration::default().get(), 5);
    }

    #[test]
    fn test_period_duration_rejects_zero() {
        assert!(matches!(
            PeriodDuration::new(0),
            Err(ConfigError::ZeroPeriodDuration)
        ));
        let value: u16 = PeriodDuration::new(7).unwrap().into();
        assert_eq!(value, 7);
    }

    #[test]
    fn test_cycle_day_bounds() {
        let length = CycleLength::new(28).unwrap();
        assert!(CycleDay::new(1, length).is_ok());
        assert!(CycleDay::new(28, length).is_ok());
        assert!(matches!(
            CycleDay::new(0, length),
            Err(CycleError::OutOfRange {
                day: 0,
                cycle_length: 28
            })
        ));
        assert!(matches!(
            CycleDay::new(29, length),
            Err(CycleError::OutOfRange {
                day: 29,
                cycle_length: 28
            })
        ));
    }

    #[test]
    fn test_cycle_day_is_first() {
        let length = CycleLength::default();
        assert!(CycleDay::new(1, length).unwrap().is_first());
        assert!(!CycleDay::new(2, length).unwrap().is_first());
    }

    #[test]
    fn test_cycle_day_display_and_ordering() {
        let length = CycleLength::default();
        let d1 = CycleDay::new(3, length).unwrap();
        let d2 = CycleDay::new(14, length).unwrap();
        assert_eq!(d2.to_string(), "14");
        assert!(d1 < d2);
    }

    #[test]
    fn test_cycle_day_try_from_u16() {
        let day: CycleDay = 15.try_into().unwrap();
        assert_eq!(day.get(), 15);

        let result: Result<CycleDay, _> = 0.try_into();
        assert!(result.is_err());
    }
}
