//! Recurrence frequency extraction from free text.

use serde::{Deserialize, Serialize};

/// Recognized unit keywords, longest variants first so `個月` and `個小時`
/// are never mis-split into their shorter substrings.
const UNIT_KEYWORDS: [(&str, FrequencyUnit); 7] = [
    ("個月", FrequencyUnit::Month),
    ("月", FrequencyUnit::Month),
    ("天", FrequencyUnit::Day),
    ("個小時", FrequencyUnit::Hour),
    ("小時", FrequencyUnit::Hour),
    ("時", FrequencyUnit::Hour),
    ("分", FrequencyUnit::Minute),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
/// Time unit of a recurrence interval.
pub enum FrequencyUnit {
    Minute,
    Hour,
    Day,
    Month,
}

impl FrequencyUnit {
    /// Canonical keyword used when rendering a frequency back to text.
    pub fn storage_suffix(self) -> &'static str {
        match self {
            Self::Minute => "分",
            Self::Hour => "小時",
            Self::Day => "天",
            Self::Month => "個月",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
/// A reminder's recurrence: one-shot or every `magnitude` units.
pub enum Frequency {
    None,
    Every { magnitude: u32, unit: FrequencyUnit },
}

impl Frequency {
    /// Text written to the reminder store's frequency column.
    pub fn storage_text(&self) -> String {
        match self {
            Self::None => "none".to_string(),
            Self::Every { magnitude, unit } => {
                format!("{magnitude}{}", unit.storage_suffix())
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Result of scanning a frequency turn.
pub enum FrequencyOutcome {
    /// A frequency (possibly `Frequency::None`) was resolved.
    Parsed(Frequency),
    /// A unit keyword matched but the text before it is not a positive
    /// integer; the turn should be retried.
    InvalidMagnitude,
}

/// Scans `text` for the first unit keyword in fixed priority order.
///
/// On a match, the substring preceding the keyword is the magnitude and must
/// parse as a positive integer. No keyword anywhere is the valid "no
/// recurrence" outcome, distinct from a parse failure.
pub fn extract_frequency(text: &str) -> FrequencyOutcome {
    for (keyword, unit) in UNIT_KEYWORDS {
        let Some(index) = text.find(keyword) else {
            continue;
        };
        let magnitude_text = text[..index].trim();
        return match magnitude_text.parse::<u32>() {
            Ok(magnitude) if magnitude > 0 => {
                FrequencyOutcome::Parsed(Frequency::Every { magnitude, unit })
            }
            _ => FrequencyOutcome::InvalidMagnitude,
        };
    }
    FrequencyOutcome::Parsed(Frequency::None)
}
