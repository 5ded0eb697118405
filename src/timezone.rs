use time::{OffsetDateTime, UtcOffset};
use time_tz::{Offset, TimeZone};

use crate::Error;

/// The UTC offset in effect at `instant` for a canonical timezone name, e.g.
/// "Pacific/Auckland" or "UTC".
pub fn get_offset_at(
    canonical_timezone: &str,
    instant: OffsetDateTime,
) -> Result<UtcOffset, Error> {
    time_tz::timezones::get_by_name(canonical_timezone)
        .map(|tz| tz.get_offset_utc(&instant).to_utc())
        .ok_or_else(|| Error::InvalidTimezone(canonical_timezone.to_owned()))
}
