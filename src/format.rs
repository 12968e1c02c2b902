/// Granularity hint for [`format_duration`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DurationStyle {
    /// Two-unit form: `3d 4h`, `2h 15m`, `5m 30s`, `45s`.
    #[default]
    Short,
    /// Fractional hours when at least an hour: `4.5 hours`.
    Hours,
    /// Fractional days when at least a day: `2.3 days`.
    Days,
}

/// Render a duration in milliseconds as a human string.
///
/// Non-positive and non-finite input renders as the `"0s"` sentinel.
pub fn format_duration(ms: f64, style: DurationStyle) -> String {
    if !ms.is_finite() || ms <= 0.0 {
        return "0s".to_string();
    }

    let seconds = (ms / 1000.0).floor() as i64;
    let minutes = seconds / 60;
    let hours = minutes / 60;
    let days = hours / 24;

    match style {
        DurationStyle::Days if days > 0 => {
            return format!("{:.1} days", ms / 86_400_000.0);
        }
        DurationStyle::Hours if hours > 0 => {
            return format!("{:.1} hours", ms / 3_600_000.0);
        }
        _ => {}
    }

    if days > 0 {
        format!("{days}d {}h", hours % 24)
    } else if hours > 0 {
        format!("{hours}h {}m", minutes % 60)
    } else if minutes > 0 {
        format!("{minutes}m {}s", seconds % 60)
    } else {
        format!("{seconds}s")
    }
}
