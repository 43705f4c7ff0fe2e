// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Lookups with a remote-first, local-fallback policy.
//!
//! Every lookup tries the configured [`EphemerisSource`] once. On any failure
//! the local calculation is used instead and a [`Notice`] explains why. There
//! is no retry and no caching.

use chrono::{DateTime, NaiveDate, Utc};
use rand::Rng;
use serde::Serialize;
use tracing::{debug, warn};

use crate::birth_moon::{self, BirthMoonReport};
use crate::config::EphemerisConfig;
use crate::ephemeris::{EphemerisSource, HttpEphemeris};
use crate::error::{Error, Result};
use crate::events::{self, SpaceEvent};
use crate::lunation::{JulianDay, Lunation, LunarPhase};
use crate::moon_times::{self, MoonTimes};
use crate::notice::Notice;
use crate::phases::MoonPhase;

/// Where a value came from.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Origin {
    Remote,
    Local,
}

/// A value plus its provenance and an optional user-facing notice.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Resolved<T> {
    pub value: T,
    pub origin: Origin,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notice: Option<Notice>,
}

impl<T> Resolved<T> {
    fn remote(value: T) -> Self {
        Self {
            value,
            origin: Origin::Remote,
            notice: None,
        }
    }

    fn local(value: T) -> Self {
        Self {
            value,
            origin: Origin::Local,
            notice: None,
        }
    }

    /// `true` when the value was computed locally after a failed remote call.
    pub fn is_fallback(&self) -> bool {
        self.origin == Origin::Local && self.notice.is_some()
    }

    /// Transform the value, keeping origin and notice.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Resolved<U> {
        Resolved {
            value: f(self.value),
            origin: self.origin,
            notice: self.notice,
        }
    }
}

/// Everything shown on the "today" view.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TodayReport {
    /// e.g. `"Thursday, October 15, 2026"`.
    pub heading: String,
    pub date: NaiveDate,
    pub phase: MoonPhase,
    pub times: MoonTimes,
    pub julian_day: JulianDay,
    pub lunation: i64,
    pub origin: Origin,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notice: Option<Notice>,
}

/// Entry point for all date-driven lookups.
#[derive(Debug, Default)]
pub struct Almanac {
    source: Option<Box<dyn EphemerisSource>>,
}

impl Almanac {
    /// An almanac that only uses local calculations.
    #[must_use]
    pub fn offline() -> Self {
        Self::default()
    }

    /// An almanac backed by `source`.
    #[must_use]
    pub fn with_source(source: impl EphemerisSource + 'static) -> Self {
        Self {
            source: Some(Box::new(source)),
        }
    }

    /// Build from configuration; offline unless a remote lookup is configured.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be constructed.
    pub fn from_config(config: &EphemerisConfig) -> Result<Self> {
        if !config.is_usable() {
            debug!("no remote ephemeris configured, using local calculations");
            return Ok(Self::offline());
        }
        Ok(Self::with_source(HttpEphemeris::from_config(config)?))
    }

    /// Whether a remote source is attached.
    pub fn has_source(&self) -> bool {
        self.source.is_some()
    }

    /// Moon phase at `instant`.
    pub async fn moon_phase(&self, instant: DateTime<Utc>) -> Resolved<MoonPhase> {
        let local = || MoonPhase::from_phase(LunarPhase::at(instant));
        let Some(source) = &self.source else {
            return Resolved::local(local());
        };

        match source.lunar_phase(instant.date_naive()).await {
            Ok(phase) => Resolved::remote(MoonPhase::from_phase(phase)),
            Err(err) => fallback(
                source.name(),
                err,
                local(),
                "Could not fetch moon phase data",
                "Showing the locally calculated phase instead.",
            ),
        }
    }

    /// Upcoming events starting at `today`.
    pub async fn upcoming_events(&self, today: NaiveDate) -> Resolved<Vec<SpaceEvent>> {
        let Some(source) = &self.source else {
            return Resolved::local(events::upcoming_events(today));
        };

        match source.upcoming_events(today).await {
            Ok(list) => Resolved::remote(list),
            Err(err) => fallback(
                source.name(),
                err,
                events::upcoming_events(today),
                "Failed to load upcoming space events",
                "Showing the built-in event list instead.",
            ),
        }
    }

    /// The "today" view for `now`.
    ///
    /// Moon times always come from the local phase, even when the displayed
    /// phase is remote.
    pub async fn todays_moon<R: Rng>(&self, now: DateTime<Utc>, rng: &mut R) -> TodayReport {
        let resolved = self.moon_phase(now).await;
        let times = moon_times::moonrise_and_moonset(now, rng);

        TodayReport {
            heading: now.format("%A, %B %-d, %Y").to_string(),
            date: now.date_naive(),
            phase: resolved.value,
            times,
            julian_day: JulianDay::from_utc(now),
            lunation: Lunation::at(now).number,
            origin: resolved.origin,
            notice: resolved.notice,
        }
    }

    /// The birth-moon view for a `YYYY-MM-DD` input.
    ///
    /// # Errors
    ///
    /// Only input errors ([`Error::MissingBirthdate`], [`Error::InvalidDate`]);
    /// remote failures fall back.
    pub async fn birth_moon<R: Rng>(&self, input: &str, rng: &mut R) -> Result<BirthMoonReport> {
        let date = birth_moon::parse_birthdate(input)?;
        let instant = birth_moon::lookup_instant(date);

        let resolved = match birth_moon::pinned_phase(date) {
            Some(phase) => Resolved::local(phase),
            None => self.moon_phase(instant).await,
        };
        let times = moon_times::moonrise_and_moonset(instant, rng);

        Ok(BirthMoonReport {
            date,
            share_text: birth_moon::share_text(&resolved.value),
            phase: resolved.value,
            times,
            historical_note: birth_moon::historical_note(date),
            origin: resolved.origin,
            notice: resolved.notice,
        })
    }
}

fn fallback<T>(
    source: &str,
    err: Error,
    value: T,
    title: &str,
    description: &str,
) -> Resolved<T> {
    if let Error::SourceUnavailable(what) = &err {
        debug!(source, what = %what, "remote lookup not configured, using local data");
        return Resolved::local(value);
    }
    warn!(source, error = %err, "remote lookup failed, falling back to local data");
    Resolved {
        value,
        origin: Origin::Local,
        notice: Some(Notice::error(title).with_description(description)),
    }
}
