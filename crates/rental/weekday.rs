use crate::error::{RentalError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// Indexed by weekday number, 0 = Sunday.
static ENGLISH: [&str; 7] = [
    "Sunday",
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
];

static INDONESIAN: [&str; 7] = [
    "Minggu", "Senin", "Selasa", "Rabu", "Kamis", "Jumat", "Sabtu",
];

/// Language of the weekday labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Locale {
    #[default]
    #[serde(rename = "en")]
    English,
    #[serde(rename = "id")]
    Indonesian,
}

impl Locale {
    pub fn labels(&self) -> &'static [&'static str; 7] {
        match self {
            Locale::English => &ENGLISH,
            Locale::Indonesian => &INDONESIAN,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Locale::English => "en",
            Locale::Indonesian => "id",
        }
    }
}

impl FromStr for Locale {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "en" => Ok(Locale::English),
            "id" => Ok(Locale::Indonesian),
            other => Err(format!("unknown locale `{}`, expected en|id", other)),
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Label for a weekday number. Anything outside 0-6 is a data error.
pub fn weekday_label(weekday: i64, locale: Locale) -> Result<&'static str> {
    usize::try_from(weekday)
        .ok()
        .and_then(|i| locale.labels().get(i).copied())
        .ok_or(RentalError::UnknownWeekday(weekday))
}
