/// Cycle length assumed when none is configured
pub const DEFAULT_CYCLE_LENGTH_DAYS: u16 = 28;

/// Menstrual phase length assumed when no period end date is recorded
pub const DEFAULT_PERIOD_DURATION_DAYS: u16 = 5;

/// First cycle day of every cycle
pub const FIRST_CYCLE_DAY: u16 = 1;

/// Last cycle day of the follicular phase (unless the period runs longer)
pub const FOLLICULAR_END_DAY: u16 = 13;

/// Last cycle day of the ovulatory phase (unless the period runs longer)
pub const OVULATORY_END_DAY: u16 = 15;

/// Offset in days from the period start to the first fertile day
pub const FERTILE_WINDOW_START_OFFSET: u64 = 10;

/// Offset in days from the period start to the last fertile day (inclusive)
pub const FERTILE_WINDOW_END_OFFSET: u64 = 17;

/// Calendar date format used for display and parsing (ISO 8601)
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Range separator (ISO 8601 interval format)
pub const RANGE_SEPARATOR: char = '/';
