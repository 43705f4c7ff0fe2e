// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Decorative moonrise / moonset times.
//!
//! This is **not** an astronomical model. The hour is derived from the
//! illumination and the minutes are random. The output only has to look like
//! a plausible wall-clock time.

use chrono::{DateTime, Utc};
use rand::Rng;
use serde::{Serialize, Serializer};
use std::fmt;

use crate::lunation::LunarPhase;
use crate::phases::MoonPhase;

/// AM / PM marker.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize)]
pub enum Meridiem {
    AM,
    PM,
}

impl fmt::Display for Meridiem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::AM => "AM",
            Self::PM => "PM",
        })
    }
}

/// A 12-hour clock reading, rendered as `H:MM AM|PM`.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct ClockTime {
    /// `1..=12`.
    pub hour: u8,
    /// `0..=59`.
    pub minute: u8,
    pub meridiem: Meridiem,
}

impl ClockTime {
    /// Labels AM for hours `7..=18` and PM otherwise. On a 12-hour input this
    /// means 7–12 read as AM and 1–6 as PM.
    fn from_hour(hour: u8, minute: u8) -> Self {
        let meridiem = if (7..=18).contains(&hour) {
            Meridiem::AM
        } else {
            Meridiem::PM
        };
        Self {
            hour,
            minute,
            meridiem,
        }
    }
}

impl fmt::Display for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{:02} {}", self.hour, self.minute, self.meridiem)
    }
}

impl Serialize for ClockTime {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

/// Moonrise and moonset pair.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize)]
pub struct MoonTimes {
    pub moonrise: ClockTime,
    pub moonset: ClockTime,
}

/// Placeholder rise/set times for a phase.
pub fn estimate<R: Rng>(phase: &MoonPhase, rng: &mut R) -> MoonTimes {
    let lit = phase.illumination.clamp(0.0, 1.0);
    let rise_hour = twelve_hour(((lit * 24.0) % 12.0).round() as u8);
    let set_hour = twelve_hour((rise_hour + 12) % 12);

    MoonTimes {
        moonrise: ClockTime::from_hour(rise_hour, rng.gen_range(0..60)),
        moonset: ClockTime::from_hour(set_hour, rng.gen_range(0..60)),
    }
}

/// Placeholder rise/set times for an instant, using the local phase
/// calculation.
pub fn moonrise_and_moonset<R: Rng>(instant: DateTime<Utc>, rng: &mut R) -> MoonTimes {
    estimate(&MoonPhase::from_phase(LunarPhase::at(instant)), rng)
}

/// Maps `0` (and the rounding edge `12`) onto `12`, keeps `1..=11`.
fn twelve_hour(hour: u8) -> u8 {
    match hour % 12 {
        0 => 12,
        h => h,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::phases::PhaseName;
    use chrono::{Duration, TimeZone};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn looks_like_clock(s: &str) -> bool {
        let Some((time, period)) = s.split_once(' ') else {
            return false;
        };
        let Some((h, m)) = time.split_once(':') else {
            return false;
        };
        let hour_ok = (1..=2).contains(&h.len())
            && h.parse::<u8>().is_ok_and(|h| (1..=12).contains(&h));
        let minute_ok = m.len() == 2 && m.parse::<u8>().is_ok_and(|m| m < 60);
        hour_ok && minute_ok && (period == "AM" || period == "PM")
    }

    #[test]
    fn test_clock_format() {
        let t = ClockTime {
            hour: 9,
            minute: 5,
            meridiem: Meridiem::PM,
        };
        assert_eq!(t.to_string(), "9:05 PM");
        assert!(looks_like_clock(&t.to_string()));
    }

    #[test]
    fn test_output_always_matches_pattern() {
        let mut rng = StdRng::seed_from_u64(7);
        let start = Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap();
        for step in 0..2_000 {
            let times = moonrise_and_moonset(start + Duration::hours(step * 5), &mut rng);
            assert!(looks_like_clock(&times.moonrise.to_string()), "{}", times.moonrise);
            assert!(looks_like_clock(&times.moonset.to_string()), "{}", times.moonset);
        }
    }

    #[test]
    fn test_new_moon_hours() {
        let mut rng = StdRng::seed_from_u64(1);
        let phase = MoonPhase::from_catalog(PhaseName::NewMoon);
        let times = estimate(&phase, &mut rng);
        assert_eq!(times.moonrise.hour, 12);
        assert_eq!(times.moonrise.meridiem, Meridiem::AM);
        assert_eq!(times.moonset.hour, 12);
    }

    #[test]
    fn test_hour_follows_illumination() {
        let mut rng = StdRng::seed_from_u64(2);
        // 0.25 * 24 = 6 → rise at 6 (PM), set at 6 (PM)
        let phase = MoonPhase::from_catalog(PhaseName::FirstQuarter);
        let times = estimate(&phase, &mut rng);
        assert_eq!(times.moonrise.hour, 6);
        assert_eq!(times.moonrise.meridiem, Meridiem::PM);

        // 0.375 * 24 = 9 → rise at 9 (AM)
        let phase = MoonPhase::from_catalog(PhaseName::WaxingGibbous);
        let times = estimate(&phase, &mut rng);
        assert_eq!(times.moonrise.hour, 9);
        assert_eq!(times.moonrise.meridiem, Meridiem::AM);
    }

    #[test]
    fn test_minutes_vary_with_rng() {
        let phase = MoonPhase::from_catalog(PhaseName::FullMoon);
        let minutes: std::collections::HashSet<u8> = (0..64)
            .map(|seed| estimate(&phase, &mut StdRng::seed_from_u64(seed)).moonrise.minute)
            .collect();
        assert!(minutes.len() > 1);
        assert!(minutes.iter().all(|m| *m < 60));
    }

    #[test]
    fn test_same_seed_same_output() {
        let phase = MoonPhase::from_catalog(PhaseName::WaningGibbous);
        let a = estimate(&phase, &mut StdRng::seed_from_u64(42));
        let b = estimate(&phase, &mut StdRng::seed_from_u64(42));
        assert_eq!(a, b);
    }

    #[test]
    fn test_serializes_as_strings() {
        let times = MoonTimes {
            moonrise: ClockTime::from_hour(10, 30),
            moonset: ClockTime::from_hour(10, 0),
        };
        let json = serde_json::to_value(times).unwrap();
        assert_eq!(json["moonrise"], "10:30 AM");
        assert_eq!(json["moonset"], "10:00 AM");
    }
}
