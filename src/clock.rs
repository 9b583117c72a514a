//! Business-timezone clock and date parsing.
//!
//! The calculation functions never read wall-clock time. Callers resolve
//! "today" through a [`BusinessClock`] pinned to the business timezone and
//! pass the resulting date in.

use chrono::{DateTime, FixedOffset, NaiveDate, Utc};

use crate::error::{EngineError, EngineResult};

/// Resolves calendar dates in a fixed business timezone.
///
/// # Example
///
/// ```
/// use chrono::{NaiveDate, TimeZone, Utc};
/// use leave_engine::clock::BusinessClock;
///
/// let clock = BusinessClock::kst();
/// // 16:00 UTC is already the next morning in Seoul.
/// let instant = Utc.with_ymd_and_hms(2024, 6, 19, 16, 0, 0).unwrap();
/// assert_eq!(clock.date_of(instant), NaiveDate::from_ymd_opt(2024, 6, 20).unwrap());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BusinessClock {
    offset: FixedOffset,
}

impl BusinessClock {
    /// Creates a clock for the given offset.
    pub fn new(offset: FixedOffset) -> Self {
        Self { offset }
    }

    /// Korea Standard Time (UTC+9).
    pub fn kst() -> Self {
        Self::new(FixedOffset::east_opt(9 * 3600).expect("UTC+9 is a valid offset"))
    }

    /// The offset this clock resolves dates in.
    pub fn offset(&self) -> FixedOffset {
        self.offset
    }

    /// Today's date in the business timezone.
    pub fn today(&self) -> NaiveDate {
        self.date_of(Utc::now())
    }

    /// The business-timezone calendar date of an instant.
    pub fn date_of(&self, instant: DateTime<Utc>) -> NaiveDate {
        instant.with_timezone(&self.offset).date_naive()
    }

    /// Parses a date supplied by a caller.
    ///
    /// Accepts `YYYY-MM-DD`, or an RFC 3339 timestamp which is converted into
    /// the business timezone before taking its date. Anything else is an
    /// [`EngineError::InvalidDate`] naming `field`.
    pub fn parse_date(&self, field: &str, value: &str) -> EngineResult<NaiveDate> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(EngineError::InvalidDate {
                field: field.to_string(),
                value: value.to_string(),
                message: "date is empty".to_string(),
            });
        }

        match NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
            Ok(date) => Ok(date),
            Err(date_err) => DateTime::parse_from_rfc3339(trimmed)
                .map(|dt| dt.with_timezone(&self.offset).date_naive())
                .map_err(|_| EngineError::InvalidDate {
                    field: field.to_string(),
                    value: value.to_string(),
                    message: date_err.to_string(),
                }),
        }
    }
}

impl Default for BusinessClock {
    fn default() -> Self {
        Self::kst()
    }
}
