// SPDX-License-Identifier: MIT

//! Free-form duration text parsing.
//!
//! Legacy clients wrote durations as free text ("45 min", "30:00");
//! newer clients write a structured minute count at the log boundary.
//! This parser remains as the compatibility shim for the old data.

/// Extract a whole-minute count from free-form duration text.
///
/// A colon-separated `M:SS` value is minutes plus rounded seconds
/// ("45:30" is 46). Otherwise the first run of decimal digits anywhere
/// in the string is taken as minutes. No digits, or a digit run too
/// large for `u32`, yields `None`; callers treat that as 0.
pub fn parse_minutes(text: &str) -> Option<u32> {
    let trimmed = text.trim();

    if let Some((minutes, seconds)) = trimmed.split_once(':') {
        if let (Ok(minutes), Ok(seconds)) =
            (minutes.trim().parse::<u32>(), seconds.trim().parse::<u32>())
        {
            let fractional = (f64::from(seconds) / 60.0).round() as u32;
            return minutes.checked_add(fractional);
        }
    }

    first_digit_run(trimmed)
}

fn first_digit_run(text: &str) -> Option<u32> {
    let digits: String = text
        .chars()
        .skip_while(|c| !c.is_ascii_digit())
        .take_while(|c| c.is_ascii_digit())
        .collect();

    if digits.is_empty() {
        return None;
    }
    digits.parse().ok()
}
