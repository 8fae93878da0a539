/// Day-key derivation
///
/// Every completion lookup and insert goes through [`DayKey::derive`], so the
/// string form of a (habit, calendar day) pair is produced in exactly one place.
/// Calendar days are local-calendar dates with no time component.

use std::fmt;

use chrono::{Days, Local, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::domain::{DomainError, HabitId};

/// Number of days in the trailing week window
pub const WEEK_LEN: u8 = 7;

/// Offset of "today" within the trailing week
pub const TODAY_OFFSET: u8 = WEEK_LEN - 1;

const DAY_FORMAT: &str = "%Y-%m-%d";

/// Canonical identifier for a (habit, calendar day) pair
///
/// Encoded as `"{habit_id}-{YYYY-MM-DD}"`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DayKey(String);

impl DayKey {
    /// Derive the key for a habit on a given calendar day
    pub fn derive(habit_id: &HabitId, day: NaiveDate) -> Self {
        Self(format!("{}-{}", habit_id, canonical_day(day)))
    }

    /// Derive the key for a habit at a position in the trailing week
    ///
    /// Offset 6 is `today`, offset 0 is six days before it.
    pub fn for_offset(habit_id: &HabitId, today: NaiveDate, offset: u8) -> Result<Self, DomainError> {
        Ok(Self::derive(habit_id, date_for_offset(today, offset)?))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DayKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Format a calendar day as `YYYY-MM-DD`
pub fn canonical_day(day: NaiveDate) -> String {
    day.format(DAY_FORMAT).to_string()
}

/// Parse a `YYYY-MM-DD` calendar day
pub fn parse_day(s: &str) -> Result<NaiveDate, DomainError> {
    NaiveDate::parse_from_str(s.trim(), DAY_FORMAT)
        .map_err(|_| DomainError::InvalidDate(format!("'{}' is not a valid YYYY-MM-DD date", s.trim())))
}

/// Resolve a trailing-week offset to its calendar day
///
/// Offsets must be in `0..=6`; anything else is a caller bug and is rejected
/// rather than clamped.
pub fn date_for_offset(today: NaiveDate, offset: u8) -> Result<NaiveDate, DomainError> {
    if offset >= WEEK_LEN {
        return Err(DomainError::InvalidArgument(format!(
            "Day offset must be between 0 and {}, got {}",
            TODAY_OFFSET, offset
        )));
    }

    today
        .checked_sub_days(Days::new(u64::from(TODAY_OFFSET - offset)))
        .ok_or_else(|| DomainError::InvalidDate(format!("No calendar day {} days before {}", TODAY_OFFSET - offset, today)))
}

/// The seven calendar days ending on and including `today`, oldest first
pub fn trailing_week(today: NaiveDate) -> Result<Vec<NaiveDate>, DomainError> {
    (0..WEEK_LEN).map(|offset| date_for_offset(today, offset)).collect()
}

/// Today's date on the host's local calendar
///
/// This is the only place the process clock is turned into a calendar day.
pub fn local_today() -> NaiveDate {
    Local::now().date_naive()
}
