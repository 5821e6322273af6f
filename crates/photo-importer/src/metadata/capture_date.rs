use std::fmt;

use chrono::NaiveDate;

/// Capture date of a file as reported by the metadata tool, normalised to
/// `YYYY-MM-DD`.
///
/// The textual form is kept even when it is not a real calendar date
/// (e.g. `2023-02-30`), so folder naming can fall back to it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CaptureDate {
    raw: String,
    date: Option<NaiveDate>,
}

impl CaptureDate {
    pub const FORMAT: &'static str = "%Y-%m-%d";

    pub fn parse(raw: &str) -> Self {
        Self {
            raw: raw.to_string(),
            date: NaiveDate::parse_from_str(raw, Self::FORMAT).ok(),
        }
    }

    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            raw: date.format(Self::FORMAT).to_string(),
            date: Some(date),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// `None` when the textual date is not a valid calendar date.
    pub fn date(&self) -> Option<NaiveDate> {
        self.date
    }
}

impl fmt::Display for CaptureDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}
