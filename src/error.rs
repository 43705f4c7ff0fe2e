// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Error types for lunarium.
//!
//! Nothing in the library is fatal to the user: remote failures are caught by
//! [`Almanac`](crate::Almanac) and turned into a local fallback plus a
//! [`Notice`](crate::Notice). The variants below exist so that the fallback
//! path can log *why* it was taken.

use thiserror::Error;

/// The main error type for lunarium operations.
#[derive(Error, Debug)]
pub enum Error {
    // === Remote ephemeris ===
    /// Transport-level HTTP failure (connect, TLS, timeout, body decode).
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The ephemeris service answered with a non-success status.
    #[error("ephemeris service at {url} returned status {status}")]
    HttpStatus {
        /// HTTP status code.
        status: u16,
        /// Requested URL (without the API key).
        url: String,
    },

    /// The ephemeris service answered, but the payload was unusable.
    #[error("invalid ephemeris response: {message}")]
    InvalidResponse {
        /// What was wrong with the payload.
        message: String,
    },

    /// A phase fraction outside `[0, 1]` (or not finite).
    #[error("phase fraction {0} is outside [0, 1]")]
    PhaseOutOfRange(f64),

    /// The requested data has no remote source configured.
    #[error("no remote source for {0}")]
    SourceUnavailable(String),

    // === User input ===
    /// No birthdate was supplied.
    #[error("Please select your birthdate")]
    MissingBirthdate,

    /// The supplied date could not be parsed.
    #[error("invalid date '{input}', expected YYYY-MM-DD")]
    InvalidDate {
        /// The rejected input.
        input: String,
    },

    /// A catalog lookup by name found nothing.
    #[error("unknown {kind} '{name}'")]
    UnknownName {
        /// Which catalog was searched.
        kind: &'static str,
        /// The name that was looked up.
        name: String,
    },

    // === Configuration ===
    /// Failed to load configuration.
    #[error("failed to load configuration: {0}")]
    ConfigLoad(Box<figment::Error>),

    /// Configuration validation failed.
    #[error("invalid configuration: {message}")]
    ConfigValidation {
        /// Description of the validation failure.
        message: String,
    },

    // === Serialization / IO ===
    /// JSON serialization/deserialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// File system operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// A specialized Result type for lunarium operations.
pub type Result<T> = std::result::Result<T, Error>;

impl From<figment::Error> for Error {
    fn from(err: figment::Error) -> Self {
        Self::ConfigLoad(Box::new(err))
    }
}

impl Error {
    /// Create an invalid-response error.
    #[must_use]
    pub fn invalid_response(message: impl Into<String>) -> Self {
        Self::InvalidResponse {
            message: message.into(),
        }
    }

    /// Create an invalid-date error for the given input.
    #[must_use]
    pub fn invalid_date(input: impl Into<String>) -> Self {
        Self::InvalidDate {
            input: input.into(),
        }
    }

    /// Create an unknown-name error for a catalog lookup.
    #[must_use]
    pub fn unknown_name(kind: &'static str, name: impl Into<String>) -> Self {
        Self::UnknownName {
            kind,
            name: name.into(),
        }
    }

    /// Whether this error comes from user input rather than a remote source.
    #[must_use]
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            Self::MissingBirthdate | Self::InvalidDate { .. } | Self::UnknownName { .. }
        )
    }
}
