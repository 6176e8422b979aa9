//! Daily countdown formatting

use crate::model::DAILY_PERIOD_SECS;

/// Seconds until the daily bonus can be claimed again.
///
/// Non-positive means it is ready now.
pub fn daily_remaining(last_daily: i64, now: i64) -> i64 {
    DAILY_PERIOD_SECS - (now - last_daily)
}

/// `HH:MM:SS`, hours are not wrapped at 24
pub fn fmt_hms(seconds: i64) -> String {
    let seconds = seconds.max(0);
    format!(
        "{:02}:{:02}:{:02}",
        seconds / 3600,
        (seconds % 3600) / 60,
        seconds % 60
    )
}

/// Countdown label shown next to the daily button
pub fn daily_label(last_daily: i64, now: i64) -> String {
    let remaining = daily_remaining(last_daily, now);
    if remaining > 0 {
        format!("Daily in: {}", fmt_hms(remaining))
    } else {
        "Daily: ready".to_string()
    }
}
