// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Date → lunar phase arithmetic.
//!
//! The phase is a deterministic function of the instant: time elapsed since
//! a reference new moon (2000-01-06T18:14:00Z), reduced modulo a 29.53-day
//! synodic month and normalised to `[0, 1)`.
//!
//! Elapsed time is reduced on **integer milliseconds** (29.53 d is exactly
//! 2 551 392 000 ms), so the phase of `t` and of `t + N` synodic months is
//! bit-for-bit identical.
//!
//! ```
//! use chrono::{TimeZone, Utc};
//! use lunarium::LunarPhase;
//!
//! let phase = LunarPhase::at(Utc.with_ymd_and_hms(2000, 1, 6, 18, 14, 0).unwrap());
//! assert_eq!(phase.index(), 0);
//! assert_eq!(phase.illumination(), 0.0);
//! ```

use chrono::{DateTime, Utc};
use qtty::Days;
use serde::{Serialize, Serializer};
use std::fmt;
use std::ops::{Add, Sub};

use crate::error::{Error, Result};

/// Mean synodic month used throughout the crate.
pub const SYNODIC_MONTH: Days = Days::new(29.53);

/// Reference new moon, 2000-01-06T18:14:00Z, as Unix milliseconds.
pub const REFERENCE_NEW_MOON_MS: i64 = 947_182_440_000;

const SYNODIC_MONTH_MS: i64 = 2_551_392_000;
const MS_PER_DAY: f64 = 86_400_000.0;

/// Number of equal-width buckets the cycle is split into.
pub const PHASE_BUCKETS: usize = 8;

/// The reference new moon as a `DateTime<Utc>`.
pub fn reference_new_moon() -> DateTime<Utc> {
    DateTime::from_timestamp_millis(REFERENCE_NEW_MOON_MS)
        .unwrap_or(DateTime::<Utc>::UNIX_EPOCH)
}

// ═══════════════════════════════════════════════════════════════════════════
// LunarPhase
// ═══════════════════════════════════════════════════════════════════════════

/// Position inside the synodic cycle, normalised to `[0, 1)`.
///
/// `0.0` is new moon, `0.5` is full moon.
#[derive(Debug, Copy, Clone, PartialEq, PartialOrd, Serialize)]
#[serde(transparent)]
pub struct LunarPhase(f64);

impl LunarPhase {
    /// New moon.
    pub const NEW: Self = Self(0.0);
    /// Full moon.
    pub const FULL: Self = Self(0.5);

    /// Phase at the given instant.
    pub fn at(instant: DateTime<Utc>) -> Self {
        let elapsed = instant.timestamp_millis() - REFERENCE_NEW_MOON_MS;
        let into_cycle = elapsed.rem_euclid(SYNODIC_MONTH_MS);
        Self(into_cycle as f64 / SYNODIC_MONTH_MS as f64)
    }

    /// Build from a fraction reported by an external source.
    ///
    /// Accepts any finite value in `[0, 1]`; `1.0` wraps to `0.0`.
    pub fn from_fraction(fraction: f64) -> Result<Self> {
        if !fraction.is_finite() || !(0.0..=1.0).contains(&fraction) {
            return Err(Error::PhaseOutOfRange(fraction));
        }
        Ok(Self(if fraction >= 1.0 { 0.0 } else { fraction }))
    }

    /// The normalised fraction in `[0, 1)`.
    #[inline]
    pub const fn fraction(&self) -> f64 {
        self.0
    }

    /// Bucket index in `0..8` (eight equal-width buckets).
    #[inline]
    pub fn index(&self) -> usize {
        ((self.0 * PHASE_BUCKETS as f64).floor() as usize) % PHASE_BUCKETS
    }

    /// Illuminated fraction of the disk: a tent over the cycle, 0 → 1 → 0.
    #[inline]
    pub fn illumination(&self) -> f64 {
        if self.0 <= 0.5 {
            self.0 * 2.0
        } else {
            (1.0 - self.0) * 2.0
        }
    }

    /// Moon age: days since the last new moon.
    #[inline]
    pub fn age(&self) -> Days {
        Days::new(self.0 * SYNODIC_MONTH.value())
    }

    /// `true` during the first half of the cycle.
    #[inline]
    pub fn is_waxing(&self) -> bool {
        self.0 < 0.5
    }
}

impl fmt::Display for LunarPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.4} of cycle", self.0)
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Lunation
// ═══════════════════════════════════════════════════════════════════════════

/// Whole synodic months since the reference new moon, plus the phase inside
/// the current one.
#[derive(Debug, Copy, Clone, PartialEq, Serialize)]
pub struct Lunation {
    /// Lunation count; negative before the reference epoch.
    pub number: i64,
    /// Phase inside this lunation.
    pub phase: LunarPhase,
}

impl Lunation {
    /// Lunation containing the given instant.
    pub fn at(instant: DateTime<Utc>) -> Self {
        let elapsed = instant.timestamp_millis() - REFERENCE_NEW_MOON_MS;
        Self {
            number: elapsed.div_euclid(SYNODIC_MONTH_MS),
            phase: LunarPhase::at(instant),
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// JulianDay
// ═══════════════════════════════════════════════════════════════════════════

/// Civil Julian Day (UTC-based, no ΔT correction).
#[derive(Debug, Copy, Clone, PartialEq, PartialOrd)]
pub struct JulianDay(Days);

impl JulianDay {
    /// 1970-01-01T00:00:00Z.
    pub const UNIX_EPOCH: Self = Self::new(2_440_587.5);

    /// J2000.0 epoch: 2000-01-01T12:00:00 (JD 2 451 545.0).
    pub const J2000: Self = Self::new(2_451_545.0);

    /// Offset between JD and MJD.
    pub const MJD_OFFSET: Days = Days::new(2_400_000.5);

    /// Create from a raw Julian Day number.
    #[inline]
    pub const fn new(value: f64) -> Self {
        Self(Days::new(value))
    }

    /// The underlying quantity in days.
    #[inline]
    pub const fn quantity(&self) -> Days {
        self.0
    }

    /// The underlying scalar value in days.
    #[inline]
    pub const fn value(&self) -> f64 {
        self.0.value()
    }

    /// Julian Day of a UTC instant.
    pub fn from_utc(datetime: DateTime<Utc>) -> Self {
        let since_epoch = Days::new(datetime.timestamp_millis() as f64 / MS_PER_DAY);
        Self::UNIX_EPOCH + since_epoch
    }

    /// Back to a UTC instant, to millisecond resolution.
    ///
    /// Returns `None` outside chrono's representable range.
    pub fn to_utc(&self) -> Option<DateTime<Utc>> {
        let ms = ((*self - Self::UNIX_EPOCH).value() * MS_PER_DAY).round() as i64;
        DateTime::from_timestamp_millis(ms)
    }

    /// Modified Julian Date (`JD − 2 400 000.5`).
    #[inline]
    pub fn to_mjd(&self) -> Days {
        self.0 - Self::MJD_OFFSET
    }

    /// The reference new moon as a Julian Day.
    pub fn reference_new_moon() -> Self {
        Self::from_utc(reference_new_moon())
    }
}

impl Add<Days> for JulianDay {
    type Output = Self;
    #[inline]
    fn add(self, rhs: Days) -> Self::Output {
        Self(self.0 + rhs)
    }
}

impl Sub for JulianDay {
    type Output = Days;
    #[inline]
    fn sub(self, rhs: Self) -> Self::Output {
        self.0 - rhs.0
    }
}

impl fmt::Display for JulianDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "JD {:.5}", self.value())
    }
}

impl Serialize for JulianDay {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_f64(self.value())
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Tests
// ═══════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn synodic() -> Duration {
        Duration::milliseconds(SYNODIC_MONTH_MS)
    }

    #[test]
    fn test_reference_epoch_matches_constant() {
        let expected = Utc.with_ymd_and_hms(2000, 1, 6, 18, 14, 0).unwrap();
        assert_eq!(reference_new_moon(), expected);
    }

    #[test]
    fn test_synodic_month_constant_is_exact_in_ms() {
        assert_eq!(
            SYNODIC_MONTH_MS as f64,
            SYNODIC_MONTH.value() * MS_PER_DAY
        );
    }

    #[test]
    fn test_phase_at_reference_is_new() {
        let phase = LunarPhase::at(reference_new_moon());
        assert_eq!(phase, LunarPhase::NEW);
        assert_eq!(phase.index(), 0);
        assert_eq!(phase.illumination(), 0.0);
        assert_eq!(phase.age(), Days::new(0.0));
    }

    #[test]
    fn test_index_in_range_for_many_dates() {
        let start = Utc.with_ymd_and_hms(1900, 1, 1, 0, 0, 0).unwrap();
        for step in 0..5_000 {
            let instant = start + Duration::hours(step * 197);
            let phase = LunarPhase::at(instant);
            assert!((0.0..1.0).contains(&phase.fraction()));
            assert!(phase.index() < PHASE_BUCKETS);
        }
    }

    #[test]
    fn test_exact_periodicity() {
        let base = Utc.with_ymd_and_hms(2024, 3, 9, 4, 30, 0).unwrap();
        let expected = LunarPhase::at(base);
        for n in [-500_i32, -12, -1, 1, 12, 100, 1_000] {
            let shifted = base + synodic() * n;
            assert_eq!(LunarPhase::at(shifted), expected, "n = {n}");
        }
    }

    #[test]
    fn test_n_months_after_reference_has_reference_index() {
        let epoch = reference_new_moon();
        let reference_index = LunarPhase::at(epoch).index();
        for n in 0..400 {
            assert_eq!(LunarPhase::at(epoch + synodic() * n).index(), reference_index);
        }
    }

    #[test]
    fn test_dates_before_epoch_are_normalised() {
        let before = reference_new_moon() - Duration::days(1);
        let phase = LunarPhase::at(before);
        assert!(phase.fraction() > 0.9);
        assert_eq!(phase.index(), 7);
    }

    #[test]
    fn test_buckets_follow_elapsed_days() {
        let epoch = reference_new_moon();
        // Midpoints of each bucket.
        for bucket in 0..PHASE_BUCKETS {
            let ms = (SYNODIC_MONTH_MS as f64 * (bucket as f64 + 0.5) / 8.0) as i64;
            let phase = LunarPhase::at(epoch + Duration::milliseconds(ms));
            assert_eq!(phase.index(), bucket);
        }
    }

    #[test]
    fn test_illumination_is_a_tent() {
        assert_eq!(LunarPhase::NEW.illumination(), 0.0);
        assert_eq!(LunarPhase::FULL.illumination(), 1.0);

        let mut previous = -1.0;
        for i in 0..=500 {
            let phase = LunarPhase::from_fraction(i as f64 / 1000.0).unwrap();
            let lit = phase.illumination();
            assert!(lit >= previous, "not rising at {i}");
            previous = lit;
        }
        for i in 501..1000 {
            let phase = LunarPhase::from_fraction(i as f64 / 1000.0).unwrap();
            let lit = phase.illumination();
            assert!(lit <= previous, "not falling at {i}");
            previous = lit;
        }
        assert!(previous < 0.01);
    }

    #[test]
    fn test_from_fraction_validates() {
        assert!(LunarPhase::from_fraction(0.25).is_ok());
        assert_eq!(LunarPhase::from_fraction(1.0).unwrap(), LunarPhase::NEW);
        assert!(matches!(
            LunarPhase::from_fraction(-0.1),
            Err(Error::PhaseOutOfRange(_))
        ));
        assert!(LunarPhase::from_fraction(1.01).is_err());
        assert!(LunarPhase::from_fraction(f64::NAN).is_err());
        assert!(LunarPhase::from_fraction(f64::INFINITY).is_err());
    }

    #[test]
    fn test_age_scales_with_synodic_month() {
        let phase = LunarPhase::from_fraction(0.5).unwrap();
        assert!((phase.age() - Days::new(14.765)).abs() < Days::new(1e-9));
    }

    #[test]
    fn test_waxing_flag() {
        assert!(LunarPhase::from_fraction(0.1).unwrap().is_waxing());
        assert!(!LunarPhase::from_fraction(0.7).unwrap().is_waxing());
    }

    #[test]
    fn test_lunation_number() {
        let epoch = reference_new_moon();
        assert_eq!(Lunation::at(epoch).number, 0);
        assert_eq!(Lunation::at(epoch + synodic() * 3 + Duration::days(1)).number, 3);
        assert_eq!(Lunation::at(epoch - Duration::days(1)).number, -1);
    }

    #[test]
    fn test_julian_day_of_reference() {
        let jd = JulianDay::reference_new_moon();
        assert!((jd.value() - 2_451_550.259_722).abs() < 1e-5);
    }

    #[test]
    fn test_julian_day_j2000() {
        let dt = Utc.with_ymd_and_hms(2000, 1, 1, 12, 0, 0).unwrap();
        assert_eq!(JulianDay::from_utc(dt), JulianDay::J2000);
        assert!((JulianDay::J2000.to_mjd() - Days::new(51_544.5)).abs() < Days::new(1e-9));
    }

    #[test]
    fn test_julian_day_utc_roundtrip() {
        let dt = Utc.with_ymd_and_hms(2026, 10, 15, 21, 7, 30).unwrap();
        let back = JulianDay::from_utc(dt).to_utc().expect("to_utc");
        assert_eq!(back, dt);
    }

    #[test]
    fn test_julian_day_arithmetic_and_display() {
        let jd = JulianDay::J2000 + Days::new(1.5);
        assert_eq!(jd - JulianDay::J2000, Days::new(1.5));
        assert_eq!(format!("{}", JulianDay::J2000), "JD 2451545.00000");
    }

    #[test]
    fn test_serialize_as_numbers() {
        let json = serde_json::to_string(&JulianDay::J2000).unwrap();
        assert_eq!(json, "2451545.0");
        let json = serde_json::to_string(&LunarPhase::FULL).unwrap();
        assert_eq!(json, "0.5");
    }
}
