//! Loose date/time expression normalization.
//!
//! Accepts the handful of literal formats users actually type — slash dates,
//! compact digit runs, clock times with or without colons — and resolves them
//! to one canonical absolute timestamp. Everything else is rejected as a
//! plain `None` so callers branch without error machinery.

use std::sync::OnceLock;

use chrono::{NaiveDate, NaiveTime};
use regex::Regex;

use nudge_core::CanonicalTimestamp;

fn slash_date_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^(\d{4})/(\d{1,2})/(\d{1,2})$").expect("valid regex"))
}

fn compact_date_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^(\d{4})(\d{2})(\d{2})$").expect("valid regex"))
}

fn colon_time_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN
        .get_or_init(|| Regex::new(r"^(\d{1,2})(?::(\d{1,2})(?::(\d{1,2}))?)?$").expect("valid regex"))
}

fn compact_time_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^(\d{2})(\d{2})(\d{2})?$").expect("valid regex"))
}

fn capture_number<T: std::str::FromStr>(text: Option<&str>, fallback: T) -> Option<T> {
    match text {
        Some(digits) => digits.parse().ok(),
        None => Some(fallback),
    }
}

/// Parses a slash-delimited (`YYYY/M/D`) or compact (`YYYYMMDD`) date token.
///
/// Structurally valid but calendar-invalid dates (2025/02/30) fall out of
/// `from_ymd_opt` as `None` rather than panicking.
fn parse_date_token(token: &str) -> Option<NaiveDate> {
    let captures = slash_date_pattern()
        .captures(token)
        .or_else(|| compact_date_pattern().captures(token))?;
    let year: i32 = captures.get(1)?.as_str().parse().ok()?;
    let month: u32 = captures.get(2)?.as_str().parse().ok()?;
    let day: u32 = captures.get(3)?.as_str().parse().ok()?;
    if !(1..=12).contains(&month) || !(1..=31).contains(&day) {
        return None;
    }
    NaiveDate::from_ymd_opt(year, month, day)
}

/// Parses a time token: `HHMM`, `HHMMSS`, `H`, `H:MM`, or `H:MM:SS`.
///
/// The compact form is tried first so a four-digit run reads as a clock time
/// here; whether a four-digit token is a date or a time is decided purely by
/// token position in [`normalize`], never inside this function.
fn parse_time_token(token: &str) -> Option<NaiveTime> {
    let (hour, minute, second) = if let Some(captures) = compact_time_pattern().captures(token) {
        let hour = captures.get(1)?.as_str().parse().ok()?;
        let minute = captures.get(2)?.as_str().parse().ok()?;
        let second = capture_number(captures.get(3).map(|m| m.as_str()), 0)?;
        (hour, minute, second)
    } else if let Some(captures) = colon_time_pattern().captures(token) {
        let hour = captures.get(1)?.as_str().parse().ok()?;
        let minute = capture_number(captures.get(2).map(|m| m.as_str()), 0)?;
        let second = capture_number(captures.get(3).map(|m| m.as_str()), 0)?;
        (hour, minute, second)
    } else {
        return None;
    };
    NaiveTime::from_hms_opt(hour, minute, second)
}

/// Parses the time half of a date+time pair: `HHMM`, `HHMMSS`, `H:MM`, or
/// `H:MM:SS`. A bare hour is a valid time only as a stand-alone token, so it
/// is rejected here.
fn parse_paired_time_token(token: &str) -> Option<NaiveTime> {
    if let Some(captures) = colon_time_pattern().captures(token) {
        captures.get(2)?;
    }
    parse_time_token(token)
}

/// Normalizes a loose date/time expression into the canonical timestamp.
///
/// The trimmed input is split on the first whitespace run into at most two
/// tokens and dispatched in fixed priority order:
///
/// 1. single slash-delimited date → midnight of that date
/// 2. single compact `YYYYMMDD` date → midnight of that date
/// 3. single time expression → that time on `reference`
/// 4. date token + time token (`HHMM`, `HHMMSS`, `H:MM`, `H:MM:SS`; a bare
///    hour does not pair) → combined timestamp
///
/// Out-of-range fields, more than two tokens, or a two-token input whose
/// second token is not a recognizable time are all rejected — there is no
/// fallback from the two-token rules to the single-token ones.
pub fn normalize(text: &str, reference: NaiveDate) -> Option<CanonicalTimestamp> {
    let mut tokens = text.trim().split_whitespace();
    let first = tokens.next()?;
    let second = tokens.next();
    if tokens.next().is_some() {
        return None;
    }

    let datetime = match second {
        Some(time_token) => {
            let date = parse_date_token(first)?;
            let time = parse_paired_time_token(time_token)?;
            date.and_time(time)
        }
        None => match parse_date_token(first) {
            Some(date) => date.and_time(NaiveTime::MIN),
            None => reference.and_time(parse_time_token(first)?),
        },
    };
    Some(CanonicalTimestamp::from_datetime(datetime))
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::normalize;

    fn reference() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 9, 5).expect("valid reference date")
    }

    fn normalized(text: &str) -> Option<String> {
        normalize(text, reference()).map(|stamp| stamp.into_string())
    }

    #[test]
    fn unit_slash_date_resolves_to_zero_padded_midnight() {
        assert_eq!(normalized("2025/9/1").as_deref(), Some("2025/09/01 00:00:00"));
        assert_eq!(normalized("2025/09/01").as_deref(), Some("2025/09/01 00:00:00"));
        assert_eq!(normalized("2025/12/31").as_deref(), Some("2025/12/31 00:00:00"));
    }

    #[test]
    fn unit_compact_date_resolves_to_midnight() {
        assert_eq!(normalized("20250901").as_deref(), Some("2025/09/01 00:00:00"));
    }

    #[test]
    fn unit_time_only_resolves_on_reference_date() {
        assert_eq!(normalized("13:30").as_deref(), Some("2025/09/05 13:30:00"));
        assert_eq!(normalized("9").as_deref(), Some("2025/09/05 09:00:00"));
        assert_eq!(normalized("1330").as_deref(), Some("2025/09/05 13:30:00"));
        assert_eq!(normalized("133005").as_deref(), Some("2025/09/05 13:30:05"));
        assert_eq!(normalized("7:5:3").as_deref(), Some("2025/09/05 07:05:03"));
    }

    #[test]
    fn unit_date_and_time_pair_combines() {
        assert_eq!(
            normalized("2025/09/02 13:1").as_deref(),
            Some("2025/09/02 13:01:00")
        );
        assert_eq!(
            normalized("20250902 1301").as_deref(),
            Some("2025/09/02 13:01:00")
        );
        assert_eq!(
            normalized("20250902 130159").as_deref(),
            Some("2025/09/02 13:01:59")
        );
    }

    #[test]
    fn unit_four_digit_token_position_decides_date_versus_time() {
        // A lone four-digit run is a clock time; the same shape after a date
        // token is still a clock time, and a four-digit first token is never
        // a date.
        assert_eq!(normalized("1330").as_deref(), Some("2025/09/05 13:30:00"));
        assert_eq!(normalized("1330 1330"), None);
    }

    #[test]
    fn unit_rejects_calendar_invalid_dates() {
        assert_eq!(normalized("2025/02/30"), None);
        assert_eq!(normalized("2025/13/01"), None);
        assert_eq!(normalized("2025/00/10"), None);
        assert_eq!(normalized("20250231"), None);
        assert_eq!(normalized("2025/04/31"), None);
    }

    #[test]
    fn unit_rejects_out_of_range_times() {
        assert_eq!(normalized("24:00"), None);
        assert_eq!(normalized("12:60"), None);
        assert_eq!(normalized("2460"), None);
        assert_eq!(normalized("12:30:61"), None);
    }

    #[test]
    fn unit_rejects_unrecognized_shapes() {
        assert_eq!(normalized(""), None);
        assert_eq!(normalized("   "), None);
        assert_eq!(normalized("tomorrow"), None);
        assert_eq!(normalized("2025-09-01"), None);
        assert_eq!(normalized("130"), None);
        assert_eq!(normalized("2025/09/01 13:30 00"), None);
    }

    #[test]
    fn regression_bare_hour_second_token_is_rejected() {
        // `H` is a valid stand-alone time but never the time half of a
        // date+time pair.
        assert_eq!(normalized("20250901 13"), None);
        assert_eq!(normalized("2025/09/01 9"), None);
        assert_eq!(normalized("9").as_deref(), Some("2025/09/05 09:00:00"));
        assert_eq!(
            normalized("20250901 13:00").as_deref(),
            Some("2025/09/01 13:00:00")
        );
    }

    #[test]
    fn regression_two_token_junk_time_never_falls_back_to_single_token_rules() {
        // The date alone would normalize, but a junk second token rejects the
        // whole input.
        assert_eq!(normalized("2025/09/01 noon"), None);
        assert_eq!(normalized("20250901 13:30pm"), None);
    }

    #[test]
    fn functional_whitespace_runs_and_padding_are_tolerated() {
        assert_eq!(
            normalized("  20250901   1330  ").as_deref(),
            Some("2025/09/01 13:30:00")
        );
    }
}
