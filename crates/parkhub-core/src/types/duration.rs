//! Human-readable duration formatting.
//!
//! Store-generated notification text and UI surfaces must render the same
//! wording for the same minute count, so the conversion lives here rather
//! than being duplicated per consumer.

/// Format a minute count as a short human-readable string.
///
/// Under an hour renders minutes (`"30 mins"`, `"1 min"`); exact hours
/// render hours (`"1 hr"`, `"2 hrs"`); everything else renders the
/// compact combined form (`"1h 30m"`).
pub fn format_duration(minutes: u32) -> String {
    if minutes < 60 {
        let unit = if minutes == 1 { "min" } else { "mins" };
        return format!("{minutes} {unit}");
    }
    let hours = minutes / 60;
    let remainder = minutes % 60;
    if remainder == 0 {
        let unit = if hours == 1 { "hr" } else { "hrs" };
        return format!("{hours} {unit}");
    }
    format!("{hours}h {remainder}m")
}
