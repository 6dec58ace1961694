use crate::ParseError;
use chrono::{NaiveDate, NaiveTime, TimeZone, Utc};
use chrono_tz::America::New_York;

/// Upstream start times are converted against Eastern *standard* time, even
/// in summer, so daylight-time games read one hour early. Downstream
/// consumers depend on that fixed one-hour shift, so the zone is resolved on
/// a fixed winter date rather than the game's own date.
// Unconfirmed whether the shift is intended upstream; do not "fix" silently.
const REFERENCE_DATE: (i32, u32, u32) = (1900, 1, 1);

/// Convert a UTC `HH:MM:SS` time of day into an Eastern 12-hour `H:MM`
/// string. The AM/PM suffix is dropped.
///
/// ```
/// assert_eq!(mlb_api::time::to_eastern_clock("23:05:00").unwrap(), "6:05");
/// ```
pub fn to_eastern_clock(raw: &str) -> Result<String, ParseError> {
    let time = NaiveTime::parse_from_str(raw.trim(), "%H:%M:%S")
        .map_err(|_| ParseError::Time(raw.to_owned()))?;

    let (y, m, d) = REFERENCE_DATE;
    let date = NaiveDate::from_ymd_opt(y, m, d).ok_or_else(|| ParseError::Time(raw.to_owned()))?;
    let eastern = Utc.from_utc_datetime(&date.and_time(time)).with_timezone(&New_York);

    // %-I: 12-hour clock, 1..=12, no padding.
    Ok(eastern.format("%-I:%M").to_string())
}
