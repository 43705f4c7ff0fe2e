// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Lunarium
//!
//! Moon-phase lookups, birth-moon reports, constellation facts and upcoming
//! sky events.
//!
//! # Core types
//!
//! - [`LunarPhase`]: position within the synodic cycle as a fraction in `[0, 1)`.
//! - [`MoonPhase`]: one of the eight catalog records, carrying a date's
//!   illumination and moon age.
//! - [`JulianDay`]: continuous day count, as a [`qtty::Days`] quantity.
//! - [`Almanac`]: date-driven lookups that try a remote [`EphemerisSource`]
//!   and fall back to the local calculation.
//! - [`View`]: the navigable pages and path routing.
//!
//! # Fallback
//!
//! Remote failures never surface as errors. Each lookup returns a
//! [`Resolved`] value whose [`Origin`] says where it came from and whose
//! optional [`Notice`] tells the user why the local value is shown.
//!
//! ```
//! use chrono::{TimeZone, Utc};
//! use lunarium::{LunarPhase, MoonPhase, PhaseName};
//!
//! let new_moon = Utc.with_ymd_and_hms(2000, 1, 6, 18, 14, 0).unwrap();
//! let phase = MoonPhase::from_phase(LunarPhase::at(new_moon));
//! assert_eq!(phase.name, PhaseName::NewMoon);
//! assert_eq!(phase.illumination, 0.0);
//! ```

pub mod almanac;
pub mod birth_moon;
pub mod cli;
pub mod config;
pub mod constellations;
pub mod ephemeris;
pub mod error;
pub mod events;
pub mod logging;
pub mod lunation;
pub mod moon_times;
pub mod notice;
pub mod phases;
pub mod views;

// ── Re-exports ────────────────────────────────────────────────────────────

pub use almanac::{Almanac, Origin, Resolved, TodayReport};
pub use birth_moon::BirthMoonReport;
pub use config::Config;
pub use constellations::Constellation;
pub use ephemeris::{EphemerisSource, HttpEphemeris};
pub use error::{Error, Result};
pub use events::{EventKind, SpaceEvent};
pub use logging::{init_logging, Verbosity};
pub use lunation::{JulianDay, Lunation, LunarPhase, SYNODIC_MONTH};
pub use moon_times::{ClockTime, Meridiem, MoonTimes};
pub use notice::{Notice, NoticeLevel};
pub use phases::{MoonPhase, PhaseName};
pub use views::{View, NAVIGATION};
