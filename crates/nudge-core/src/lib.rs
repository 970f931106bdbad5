//! Foundational time utilities shared across Nudge crates.
//!
//! Provides the canonical reminder timestamp representation and the
//! reference-date helper used by intake normalization.

pub mod time_format;

pub use time_format::{
    local_reference_date, CanonicalTimestamp, CANONICAL_TIMESTAMP_FORMAT,
};

#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, NaiveTime};

    use super::*;

    #[test]
    fn canonical_timestamp_is_zero_padded() {
        let date = NaiveDate::from_ymd_opt(2025, 9, 1).expect("valid date");
        let time = NaiveTime::from_hms_opt(8, 5, 0).expect("valid time");
        let stamp = CanonicalTimestamp::from_datetime(date.and_time(time));
        assert_eq!(stamp.as_str(), "2025/09/01 08:05:00");
    }

    #[test]
    fn local_reference_date_is_stable_within_a_call() {
        let first = local_reference_date();
        let second = local_reference_date();
        // Midnight rollover between the two calls is the only way these
        // differ; a one-day delta is still acceptable here.
        let delta = (second - first).num_days();
        assert!((0..=1).contains(&delta));
    }
}
