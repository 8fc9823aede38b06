//! Human-readable time formatting
//!
//! Provides consistent duration and date display formatting for episode
//! listings and the player's progress labels.

use chrono::{DateTime, Datelike, Utc};

/// Portuguese month abbreviations used by `format_published_date`
const MONTHS_PT_BR: [&str; 12] = [
    "jan", "fev", "mar", "abr", "mai", "jun", "jul", "ago", "set", "out", "nov", "dez",
];

/// Format a duration in seconds as `HH:MM:SS`.
///
/// Fractional seconds are truncated. Negative, NaN and infinite inputs
/// render as `00:00:00`. Hours are not wrapped, so a 100 hour duration
/// renders as `100:00:00`.
///
/// # Examples
///
/// ```
/// use podcastr_common::human_time::format_duration;
///
/// assert_eq!(format_duration(0.0), "00:00:00");
/// assert_eq!(format_duration(3661.0), "01:01:01");
/// assert_eq!(format_duration(5400.7), "01:30:00");
/// ```
pub fn format_duration(seconds: f64) -> String {
    let total = if seconds.is_finite() && seconds > 0.0 {
        seconds.floor() as u64
    } else {
        0
    };

    let hours = total / 3600;
    let minutes = (total % 3600) / 60;
    let secs = total % 60;

    format!("{:02}:{:02}:{:02}", hours, minutes, secs)
}

/// Format a publication timestamp as `d MMM yy` with Portuguese month names.
///
/// # Examples
///
/// ```
/// use chrono::{TimeZone, Utc};
/// use podcastr_common::human_time::format_published_date;
///
/// let dt = Utc.with_ymd_and_hms(2021, 1, 8, 16, 0, 0).unwrap();
/// assert_eq!(format_published_date(&dt), "8 jan 21");
/// ```
pub fn format_published_date(published_at: &DateTime<Utc>) -> String {
    let month = MONTHS_PT_BR[published_at.month0() as usize];
    format!(
        "{} {} {:02}",
        published_at.day(),
        month,
        published_at.year().rem_euclid(100)
    )
}
