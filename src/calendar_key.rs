//! Calendar keys identify a day's balance record.

use std::{fmt::Display, str::FromStr};

use time::{Date, OffsetDateTime, UtcOffset, macros::format_description};

use crate::Error;

/// A calendar date formatted as `YYYY-MM-DD`, the unique identifier for a
/// day's balance record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CalendarKey(Date);

impl CalendarKey {
    /// Create a key for `date`.
    pub fn new(date: Date) -> Self {
        Self(date)
    }

    /// The key for the calendar date of `now` as seen from `offset`.
    pub fn from_instant(now: OffsetDateTime, offset: UtcOffset) -> Self {
        Self(now.to_offset(offset).date())
    }

    /// The key for the day before this one.
    ///
    /// # Errors
    /// Returns [Error::InvalidCalendarKey] if this key is the earliest
    /// representable date.
    pub fn previous(&self) -> Result<Self, Error> {
        self.0
            .previous_day()
            .map(Self)
            .ok_or_else(|| Error::InvalidCalendarKey(self.to_string()))
    }

    /// The date this key refers to.
    pub fn date(&self) -> Date {
        self.0
    }
}

impl Display for CalendarKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{:04}-{:02}-{:02}",
            self.0.year(),
            u8::from(self.0.month()),
            self.0.day()
        )
    }
}

impl FromStr for CalendarKey {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Date::parse(s, format_description!("[year]-[month]-[day]"))
            .map(Self)
            .map_err(|_| Error::InvalidCalendarKey(s.to_owned()))
    }
}

/// The keys for today and yesterday, in that order.
pub fn today_and_yesterday(
    now: OffsetDateTime,
    offset: UtcOffset,
) -> Result<(CalendarKey, CalendarKey), Error> {
    let today = CalendarKey::from_instant(now, offset);
    let yesterday = today.previous()?;

    Ok((today, yesterday))
}
