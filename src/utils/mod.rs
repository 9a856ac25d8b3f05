use std::time::Duration;

/// Formats an elapsed time as `H:MM:SS` for console output. Sub-second
/// remainders are dropped.
pub fn format_duration(duration: Duration) -> String {
    let total = duration.as_secs();
    let hours = total / 3600;
    let minutes = (total % 3600) / 60;
    let seconds = total % 60;
    format!("{}:{:02}:{:02}", hours, minutes, seconds)
}
