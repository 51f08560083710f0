//! Duration formatting for track lengths and playback positions.
//!
//! Two labelling policies exist and are kept separate on purpose; the
//! configured [`TimeFormat`] picks exactly one of them.

use chrono::DateTime;
use clap::ValueEnum;

/// Duration label policy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum TimeFormat {
    /// `HH:MM:SS`, from the UTC wall-clock reading of the millisecond value.
    Clock,
    /// `1h 2m 3s`, leading zero units omitted.
    #[default]
    Compact,
}

impl TimeFormat {
    /// Format a millisecond duration with this policy
    pub fn format(self, milliseconds: u64) -> String {
        match self {
            TimeFormat::Clock => format_clock(milliseconds),
            TimeFormat::Compact => format_compact(milliseconds),
        }
    }
}

/// Convert milliseconds to `HH:MM:SS` via UTC wall-clock time.
///
/// Durations of a day or more wrap around, as a wall clock does. Values
/// outside chrono's representable range render as `--:--:--`.
pub fn format_clock(milliseconds: u64) -> String {
    i64::try_from(milliseconds)
        .ok()
        .and_then(DateTime::from_timestamp_millis)
        .map(|dt| dt.format("%H:%M:%S").to_string())
        .unwrap_or_else(|| "--:--:--".to_string())
}

/// Convert milliseconds to compact units, e.g. `1h 2m 3s`, `5m 0s`, `30s`.
///
/// Seconds are rounded to the nearest whole second before splitting. A unit is
/// omitted when it and every unit to its left are zero, so durations under
/// half a second produce an empty string.
pub fn format_compact(milliseconds: u64) -> String {
    let total_seconds = milliseconds.saturating_add(500) / 1000;
    let hours = total_seconds / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let seconds = total_seconds % 60;

    let mut units = Vec::with_capacity(3);
    if hours > 0 {
        units.push(format!("{}h", hours));
    }
    if hours > 0 || minutes > 0 {
        units.push(format!("{}m", minutes));
    }
    if hours > 0 || minutes > 0 || seconds > 0 {
        units.push(format!("{}s", seconds));
    }
    units.join(" ")
}
