//! Time related utils.
//!
//! Every signed request carries a timestamp in the bank's configured time
//! zone. The header timestamp and the one embedded in the string to sign
//! must be the same value, so signers format a single instant once and use
//! it for both.

use chrono::TimeZone;
use chrono_tz::Tz;

/// DateTime in the bank's time zone.
pub type DateTime = chrono::DateTime<Tz>;

/// The default time zone used when none is configured.
pub const DEFAULT_TIMEZONE: Tz = chrono_tz::Asia::Jakarta;

/// Create a datetime of the current instant in the given time zone.
pub fn now_in(tz: Tz) -> DateTime {
    chrono::Utc::now().with_timezone(&tz)
}

/// Format a datetime into the bank's timestamp format:
/// `YYYY-MM-DDTHH:mm:ss.mmm±HHMM`.
///
/// Milliseconds are always three digits and the UTC offset carries no colon,
/// e.g. `2024-01-01T10:00:00.000+0700`.
pub fn format_timestamp(t: &DateTime) -> String {
    t.format("%Y-%m-%dT%H:%M:%S%.3f%z").to_string()
}

/// Create a datetime from date and time components in the given zone.
///
/// Intended for pinning the signing time in tests.
pub fn datetime_in(
    tz: Tz,
    year: i32,
    month: u32,
    day: u32,
    hour: u32,
    min: u32,
    sec: u32,
) -> Option<DateTime> {
    tz.with_ymd_and_hms(year, month, day, hour, min, sec)
        .single()
}
