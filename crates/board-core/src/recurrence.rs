//! Recurrence tags and their display labels.
//!
//! A recurrence tag is purely descriptive: nothing in the board regenerates
//! tasks from it. The label formatter is total and side-effect free; whatever
//! a client stored, it returns a sensible string.

use chrono::{DateTime, Datelike, Utc};
use serde::{Deserialize, Serialize};

/// Descriptive recurrence tag attached to a task.
///
/// Unlike [`crate::TaskStatus`], the set is open: an unrecognised tag round
/// trips verbatim instead of being coerced, because nothing downstream
/// branches on it beyond display.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Recurrence {
    /// Repeats every day.
    Daily,
    /// Repeats on the anchor date's weekday.
    Weekly,
    /// Repeats on the anchor date's day of month.
    Monthly,
    /// Repeats on the anchor date's month and day.
    Yearly,
    /// A tag this deployment does not recognise, preserved verbatim.
    Other(String),
}

impl Recurrence {
    /// Raw tag as stored on the wire.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Daily => "daily",
            Self::Weekly => "weekly",
            Self::Monthly => "monthly",
            Self::Yearly => "yearly",
            Self::Other(raw) => raw.as_str(),
        }
    }

    /// Human-readable label for the tag, anchored on `anchor` when present.
    ///
    /// Without an anchor date the raw tag is returned unformatted. An
    /// unrecognised tag is returned unchanged either way.
    #[must_use]
    pub fn label(&self, anchor: Option<DateTime<Utc>>) -> String {
        let Some(anchor) = anchor else {
            return self.as_str().to_owned();
        };
        match self {
            Self::Daily => "Daily".to_owned(),
            Self::Weekly => format!("Weekly on {}", anchor.format("%A")),
            Self::Monthly => {
                let day = anchor.day();
                format!("Monthly on {day}{}", ordinal_suffix(day))
            }
            Self::Yearly => {
                let day = anchor.day();
                format!(
                    "Yearly on {} {day}{}",
                    anchor.format("%B"),
                    ordinal_suffix(day)
                )
            }
            Self::Other(raw) => raw.clone(),
        }
    }
}

impl From<String> for Recurrence {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "daily" => Self::Daily,
            "weekly" => Self::Weekly,
            "monthly" => Self::Monthly,
            "yearly" => Self::Yearly,
            _ => Self::Other(raw),
        }
    }
}

impl From<Recurrence> for String {
    fn from(tag: Recurrence) -> Self {
        match tag {
            Recurrence::Other(raw) => raw,
            known => known.as_str().to_owned(),
        }
    }
}

impl std::fmt::Display for Recurrence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// English ordinal suffix for a day of month.
///
/// Days 11 through 13 always take `th`; otherwise the last digit decides.
#[must_use]
pub const fn ordinal_suffix(day: u32) -> &'static str {
    if day % 100 >= 11 && day % 100 <= 13 {
        return "th";
    }
    match day % 10 {
        1 => "st",
        2 => "nd",
        3 => "rd",
        _ => "th",
    }
}
