// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Remote ephemeris sources.
//!
//! [`EphemerisSource`] is the seam between the [`Almanac`](crate::Almanac)
//! and anything that can answer "what is the phase on this date" or "what is
//! coming up". [`HttpEphemeris`] is the only production implementation.

use async_trait::async_trait;
use chrono::NaiveDate;
use serde::Deserialize;
use std::fmt;
use tracing::debug;

use crate::config::EphemerisConfig;
use crate::error::{Error, Result};
use crate::events::{end_of_month, SpaceEvent};
use crate::lunation::LunarPhase;

/// A remote provider of lunar phases and sky events.
#[async_trait]
pub trait EphemerisSource: Send + Sync + fmt::Debug {
    /// Short name used in logs.
    fn name(&self) -> &str;

    /// Phase of the moon on `date`.
    ///
    /// Implementations return [`Error::SourceUnavailable`] when they are not
    /// set up to answer; the caller treats that as "not configured" rather
    /// than as a failure.
    async fn lunar_phase(&self, date: NaiveDate) -> Result<LunarPhase>;

    /// Events from `from` to the end of its month.
    async fn upcoming_events(&self, from: NaiveDate) -> Result<Vec<SpaceEvent>>;
}

#[derive(Debug, Deserialize)]
struct PhasePayload {
    phase: Option<f64>,
}

/// HTTP/JSON ephemeris client.
///
/// Phase requests are `GET {phase_url}?sstr=moon&cad=1&date=YYYY-MM-DD&api_key=…`
/// and expect `{"phase": <0..=1>}`. Event requests are
/// `GET {events_url}?start=…&end=…` and expect a JSON array of events.
pub struct HttpEphemeris {
    client: reqwest::Client,
    phase_url: String,
    events_url: Option<String>,
    api_key: Option<String>,
}

impl fmt::Debug for HttpEphemeris {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpEphemeris")
            .field("phase_url", &self.phase_url)
            .field("events_url", &self.events_url)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

impl HttpEphemeris {
    /// Build a client from configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be constructed.
    pub fn from_config(config: &EphemerisConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout())
            .user_agent(concat!("lunarium/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self {
            client,
            phase_url: config.phase_url.clone(),
            events_url: config.events_url.clone(),
            api_key: config.api_key.clone(),
        })
    }

    async fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        url: &str,
        query: &[(&str, &str)],
    ) -> Result<T> {
        let response = self.client.get(url).query(query).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(Error::HttpStatus {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }
        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| Error::invalid_response(e.to_string()))
    }
}

#[async_trait]
impl EphemerisSource for HttpEphemeris {
    fn name(&self) -> &str {
        "http"
    }

    async fn lunar_phase(&self, date: NaiveDate) -> Result<LunarPhase> {
        let Some(api_key) = self.api_key.as_deref() else {
            return Err(Error::SourceUnavailable("moon phase (no api_key)".into()));
        };
        let day = date.format("%Y-%m-%d").to_string();
        debug!(url = %self.phase_url, %day, "requesting moon phase");

        let payload: PhasePayload = self
            .get_json(
                &self.phase_url,
                &[("sstr", "moon"), ("cad", "1"), ("date", day.as_str()), ("api_key", api_key)],
            )
            .await?;
        let fraction = payload
            .phase
            .ok_or_else(|| Error::invalid_response("missing numeric 'phase' field"))?;
        LunarPhase::from_fraction(fraction)
    }

    async fn upcoming_events(&self, from: NaiveDate) -> Result<Vec<SpaceEvent>> {
        let Some(url) = self.events_url.as_deref() else {
            return Err(Error::SourceUnavailable("events (no events_url)".into()));
        };
        let start = from.format("%Y-%m-%d").to_string();
        let end = end_of_month(from).format("%Y-%m-%d").to_string();
        debug!(%url, %start, %end, "requesting upcoming events");

        self.get_json(url, &[("start", start.as_str()), ("end", end.as_str())]).await
    }
}
