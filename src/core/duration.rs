use crate::error::{Error, Result};
use regex::Regex;
use std::time::Duration;

/// Parses the compact ISO-8601 duration encoding the Data API uses for
/// video lengths (`PT1H2M3S`, any field omissible, fractional seconds
/// allowed).
///
/// Fails with [`Error::MalformedDuration`] when the `PT` marker is
/// missing, a designator outside `H`/`M`/`S` appears (larger units such
/// as `D` are rejected, not truncated), a count is non-numeric or does
/// not fit in `u64` seconds, or no field is present at all.
pub fn parse_duration(input: &str) -> Result<Duration> {
    let re = Regex::new(r"^PT(?:(\d+)H)?(?:(\d+)M)?(?:(\d+)(?:\.(\d+))?S)?$")
        .expect("duration pattern is valid");

    let captures = re
        .captures(input)
        .ok_or_else(|| Error::MalformedDuration(input.to_string()))?;

    // "PT" alone matches the pattern but encodes nothing.
    if captures.get(1).is_none() && captures.get(2).is_none() && captures.get(3).is_none() {
        return Err(Error::MalformedDuration(input.to_string()));
    }

    let field = |index: usize| -> Result<u64> {
        match captures.get(index) {
            Some(count) => count
                .as_str()
                .parse()
                .map_err(|_| Error::MalformedDuration(input.to_string())),
            None => Ok(0),
        }
    };

    let hours = field(1)?;
    let minutes = field(2)?;
    let whole_seconds = field(3)?;

    let seconds = hours
        .checked_mul(3600)
        .and_then(|h| minutes.checked_mul(60)?.checked_add(h))
        .and_then(|hm| hm.checked_add(whole_seconds))
        .ok_or_else(|| Error::MalformedDuration(input.to_string()))?;

    let nanos = match captures.get(4) {
        Some(frac) => {
            // Scale the fractional digits to nanoseconds, e.g. "5" -> 500ms.
            let digits: String = frac.as_str().chars().take(9).collect();
            let scale = 10u32.pow(9 - digits.len() as u32);
            digits.parse::<u32>().unwrap_or(0) * scale
        }
        None => 0,
    };

    Ok(Duration::new(seconds, nanos))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_duration() {
        assert_eq!(
            parse_duration("PT1H2M3S").unwrap(),
            Duration::from_secs(3600 + 120 + 3)
        );
    }

    #[test]
    fn test_minutes_and_seconds() {
        assert_eq!(parse_duration("PT4M3S").unwrap(), Duration::from_secs(243));
    }

    #[test]
    fn test_seconds_only() {
        assert_eq!(parse_duration("PT30S").unwrap(), Duration::from_secs(30));
    }

    #[test]
    fn test_minutes_only() {
        assert_eq!(parse_duration("PT15M").unwrap(), Duration::from_secs(900));
    }

    #[test]
    fn test_hours_only() {
        assert_eq!(parse_duration("PT2H").unwrap(), Duration::from_secs(7200));
    }

    #[test]
    fn test_zero_duration() {
        assert_eq!(parse_duration("PT0S").unwrap(), Duration::ZERO);
    }

    #[test]
    fn test_fractional_seconds() {
        assert_eq!(
            parse_duration("PT1.5S").unwrap(),
            Duration::from_millis(1500)
        );
    }

    #[test]
    fn test_missing_marker_fails() {
        assert!(matches!(
            parse_duration("1H2M3S"),
            Err(Error::MalformedDuration(_))
        ));
        assert!(matches!(
            parse_duration("4M3S"),
            Err(Error::MalformedDuration(_))
        ));
    }

    #[test]
    fn test_bare_marker_fails() {
        assert!(matches!(parse_duration("PT"), Err(Error::MalformedDuration(_))));
        assert!(matches!(parse_duration(""), Err(Error::MalformedDuration(_))));
    }

    #[test]
    fn test_larger_units_are_rejected_not_truncated() {
        assert!(matches!(
            parse_duration("P1DT12H"),
            Err(Error::MalformedDuration(_))
        ));
        assert!(matches!(
            parse_duration("P2W"),
            Err(Error::MalformedDuration(_))
        ));
    }

    #[test]
    fn test_unknown_designator_fails() {
        assert!(matches!(
            parse_duration("PT5X"),
            Err(Error::MalformedDuration(_))
        ));
    }

    #[test]
    fn test_overflowing_count_fails_instead_of_wrapping_to_zero() {
        assert!(matches!(
            parse_duration("PT99999999999999999999999S"),
            Err(Error::MalformedDuration(_))
        ));
    }

    #[test]
    fn test_overflowing_hours_fail_instead_of_panicking() {
        assert!(matches!(
            parse_duration("PT18000000000000000000H"),
            Err(Error::MalformedDuration(_))
        ));
        assert!(matches!(
            parse_duration("PT18446744073709551615H"),
            Err(Error::MalformedDuration(_))
        ));
    }

    #[test]
    fn test_non_numeric_count_fails() {
        assert!(matches!(
            parse_duration("PTxS"),
            Err(Error::MalformedDuration(_))
        ));
    }

    #[test]
    fn test_out_of_order_fields_fail() {
        assert!(matches!(
            parse_duration("PT3S2M"),
            Err(Error::MalformedDuration(_))
        ));
    }
}
