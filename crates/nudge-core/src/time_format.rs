use chrono::{Local, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// Canonical reminder timestamp layout: `YYYY/MM/DD HH:MM:SS`, 24-hour,
/// zero-padded.
pub const CANONICAL_TIMESTAMP_FORMAT: &str = "%Y/%m/%d %H:%M:%S";

/// A fully-resolved absolute timestamp in the canonical layout.
///
/// Constructed only from a validated calendar datetime, so holding one is
/// proof the text inside is well-formed. Intake code never assembles the
/// string by hand.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CanonicalTimestamp(String);

impl CanonicalTimestamp {
    pub fn from_datetime(value: NaiveDateTime) -> Self {
        Self(value.format(CANONICAL_TIMESTAMP_FORMAT).to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl std::fmt::Display for CanonicalTimestamp {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter.write_str(&self.0)
    }
}

/// Returns the current local calendar date.
///
/// Time-of-day-only inputs resolve "today" against this value at
/// normalization time, not at storage time.
pub fn local_reference_date() -> NaiveDate {
    Local::now().date_naive()
}
