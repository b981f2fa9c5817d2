//! Clock adapter pinned to a calendar date.

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};
use mockable::Clock;

/// [`Clock`] that always reports local noon on a fixed date.
///
/// Used to evaluate statuses as of a chosen day instead of the wall clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock {
    noon: NaiveDateTime,
}

impl FixedClock {
    /// Creates a clock reporting local noon on `date`.
    #[must_use]
    pub fn on(date: NaiveDate) -> Self {
        let noon = NaiveTime::from_hms_opt(12, 0, 0).unwrap_or(NaiveTime::MIN);
        Self {
            noon: date.and_time(noon),
        }
    }

    /// Returns the pinned calendar date.
    #[must_use]
    pub const fn date(&self) -> NaiveDate {
        self.noon.date()
    }
}

impl Clock for FixedClock {
    fn local(&self) -> DateTime<Local> {
        Local
            .from_local_datetime(&self.noon)
            .earliest()
            .unwrap_or_else(|| Local.from_utc_datetime(&self.noon))
    }

    fn utc(&self) -> DateTime<Utc> {
        self.local().with_timezone(&Utc)
    }
}
