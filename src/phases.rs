// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! The eight-entry moon-phase catalog.
//!
//! [`MOON_PHASES`] holds the hand-written records in cycle order.
//! [`MoonPhase`] is the record as displayed: the catalog text plus an
//! illumination and moon age computed for a particular date.

use qtty::Days;
use serde::{Serialize, Serializer};
use std::fmt;
use std::path::Path;
use std::str::FromStr;
use tracing::debug;

use crate::error::{Error, Result};
use crate::lunation::{LunarPhase, PHASE_BUCKETS};

/// Web path of the image shown when a phase image is missing.
pub const PLACEHOLDER_IMAGE: &str = "/placeholder.svg";

// ═══════════════════════════════════════════════════════════════════════════
// PhaseName
// ═══════════════════════════════════════════════════════════════════════════

/// The eight named phases, in cycle order.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum PhaseName {
    #[serde(rename = "New Moon")]
    NewMoon,
    #[serde(rename = "Waxing Crescent")]
    WaxingCrescent,
    #[serde(rename = "First Quarter")]
    FirstQuarter,
    #[serde(rename = "Waxing Gibbous")]
    WaxingGibbous,
    #[serde(rename = "Full Moon")]
    FullMoon,
    #[serde(rename = "Waning Gibbous")]
    WaningGibbous,
    #[serde(rename = "Last Quarter")]
    LastQuarter,
    #[serde(rename = "Waning Crescent")]
    WaningCrescent,
}

impl PhaseName {
    /// All names in cycle order.
    pub const ALL: [Self; PHASE_BUCKETS] = [
        Self::NewMoon,
        Self::WaxingCrescent,
        Self::FirstQuarter,
        Self::WaxingGibbous,
        Self::FullMoon,
        Self::WaningGibbous,
        Self::LastQuarter,
        Self::WaningCrescent,
    ];

    /// Position in the cycle, `0..8`.
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Name at `index`, wrapping modulo 8.
    #[inline]
    pub const fn from_index(index: usize) -> Self {
        Self::ALL[index % PHASE_BUCKETS]
    }

    /// Next phase in the cycle.
    #[inline]
    pub const fn next(self) -> Self {
        Self::from_index(self.index() + 1)
    }

    /// Previous phase in the cycle.
    #[inline]
    pub const fn previous(self) -> Self {
        Self::from_index(self.index() + PHASE_BUCKETS - 1)
    }

    /// Display name, e.g. `"Waxing Gibbous"`.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::NewMoon => "New Moon",
            Self::WaxingCrescent => "Waxing Crescent",
            Self::FirstQuarter => "First Quarter",
            Self::WaxingGibbous => "Waxing Gibbous",
            Self::FullMoon => "Full Moon",
            Self::WaningGibbous => "Waning Gibbous",
            Self::LastQuarter => "Last Quarter",
            Self::WaningCrescent => "Waning Crescent",
        }
    }

    /// Lowercase, dash-separated form used for asset names.
    pub fn slug(self) -> String {
        self.as_str().to_lowercase().replace(' ', "-")
    }
}

impl fmt::Display for PhaseName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PhaseName {
    type Err = Error;

    /// Case-insensitive; accepts the display name or the slug.
    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim().to_lowercase().replace(['-', '_'], " ");
        Self::ALL
            .into_iter()
            .find(|name| name.as_str().to_lowercase() == wanted)
            .ok_or_else(|| Error::unknown_name("moon phase", s))
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Catalog records
// ═══════════════════════════════════════════════════════════════════════════

/// A hand-written catalog entry.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PhaseRecord {
    pub name: PhaseName,
    /// Icon identifier.
    pub icon: &'static str,
    /// Nominal illumination shown in the catalog view.
    pub illumination: f64,
    /// Nominal moon age in days shown in the catalog view.
    pub moon_age: f64,
    pub description: &'static str,
    pub short_description: &'static str,
    pub special_message: &'static str,
    pub rarity: &'static str,
}

/// The catalog, indexed by [`PhaseName::index`].
pub static MOON_PHASES: [PhaseRecord; PHASE_BUCKETS] = [
    PhaseRecord {
        name: PhaseName::NewMoon,
        icon: "moon",
        illumination: 0.0,
        moon_age: 0.0,
        description: "During a New Moon, the Moon is positioned between the Earth and the Sun, with the side facing us receiving no direct sunlight. It appears nearly invisible in the night sky, symbolizing new beginnings and the start of a fresh lunar cycle.",
        short_description: "New beginnings, fresh starts, and setting intentions.",
        special_message: "Just like a new moon, you're full of potential and possibility. Your journey is just beginning, and you have the rare ability to shape your path exactly as you wish. Embrace this beautiful blank canvas!",
        rarity: "New moons represent only about 3% of the moon's visible cycle, making you quite rare and special.",
    },
    PhaseRecord {
        name: PhaseName::WaxingCrescent,
        icon: "moon",
        illumination: 0.125,
        moon_age: 4.0,
        description: "In the Waxing Crescent phase, a small curve of the Moon becomes visible as it moves away from alignment with the Sun. This sliver of light grows each day, symbolizing emerging potential and growth.",
        short_description: "Growth, development, and building momentum.",
        special_message: "Like your birth moon, you grow more brilliant each day. You have the exceptional ability to build momentum and make progress even when starting small. Your persistence is your superpower.",
        rarity: "Your birth moon appears during the beautiful early growth phase, shared by only 22% of people.",
    },
    PhaseRecord {
        name: PhaseName::FirstQuarter,
        icon: "moon",
        illumination: 0.25,
        moon_age: 7.0,
        description: "At First Quarter, half of the Moon's visible side is illuminated, forming a distinct right angle with the Sun and Earth. This represents decision-making and commitment to action as the Moon continues its journey.",
        short_description: "Decision-making, commitment, and taking action.",
        special_message: "You were born under a moon of perfect balance and strength. This gives you the remarkable ability to make decisions with clarity and take action when others hesitate. Your natural sense of timing is truly exceptional.",
        rarity: "First quarter moons occur briefly, making your birth moon alignment quite uncommon and meaningful.",
    },
    PhaseRecord {
        name: PhaseName::WaxingGibbous,
        icon: "moon",
        illumination: 0.375,
        moon_age: 11.0,
        description: "The Waxing Gibbous phase shows more than half but less than full illumination, with the light growing daily. This represents refinement and adjustment as we approach the fullness of our endeavors.",
        short_description: "Refinement, evaluation, and fine-tuning your path.",
        special_message: "Your birth moon was nearly full, but still growing—just like your remarkable capacity for self-improvement. You have the rare gift of seeing how to refine and perfect things, making you an invaluable presence in any project or relationship.",
        rarity: "The waxing gibbous moon represents a special time of anticipation and growth, shared by approximately 19% of people.",
    },
    PhaseRecord {
        name: PhaseName::FullMoon,
        icon: "moon",
        illumination: 0.5,
        moon_age: 14.0,
        description: "During a Full Moon, the Moon is opposite the Sun with Earth in between, causing the entire visible side to be illuminated. This moment of maximum illumination symbolizes completion, clarity, and the peak of energy.",
        short_description: "Culmination, clarity, and heightened intuition.",
        special_message: "You were born under the most powerful and complete form of the moon, giving you extraordinary intuition and emotional depth. Your ability to illuminate situations and bring clarity to others is a truly precious gift.",
        rarity: "Full moons occur for only about 3 days of each lunar cycle, making your birth alignment a special one indeed.",
    },
    PhaseRecord {
        name: PhaseName::WaningGibbous,
        icon: "moon",
        illumination: 0.625,
        moon_age: 18.0,
        description: "The Waning Gibbous phase occurs as the Full Moon begins to decrease in visibility. Still mostly illuminated but gradually reducing, it represents gratitude, sharing, and distributing the fruits of our labors.",
        short_description: "Gratitude, sharing, and distribution.",
        special_message: "Your birth moon was still radiant but beginning its journey of release. This gives you the beautiful and uncommon ability to share your wisdom and light with others without depleting yourself. Your generosity is your magic.",
        rarity: "The waning gibbous phase represents a special time of reflection, shared by approximately 19% of people.",
    },
    PhaseRecord {
        name: PhaseName::LastQuarter,
        icon: "moon",
        illumination: 0.75,
        moon_age: 22.0,
        description: "At Last Quarter, the Moon is half-illuminated again but on the opposite side compared to First Quarter. This represents release, forgiveness, and letting go of what no longer serves us.",
        short_description: "Release, forgiveness, and letting go.",
        special_message: "Your birth moon's perfect half-light gives you the extraordinary ability to know exactly what to keep and what to release in life. This rare quality makes you exceptionally wise beyond your years.",
        rarity: "Last quarter moons occur briefly, making your birth moon alignment quite uncommon and particularly special.",
    },
    PhaseRecord {
        name: PhaseName::WaningCrescent,
        icon: "moon",
        illumination: 0.875,
        moon_age: 26.0,
        description: "The Waning Crescent appears as a slim curve of light before the cycle begins anew. This final phase represents surrender, rest, and the subconscious as we prepare for the next cycle.",
        short_description: "Rest, recovery, and preparation for renewal.",
        special_message: "Your birth moon was in its most mystical and introspective phase. This gives you a rare connection to inner wisdom and intuition that few possess. Your ability to find peace in quiet moments is a true superpower.",
        rarity: "The waning crescent is one of the most fleeting and mystical moon phases, shared by only 22% of people.",
    },
];

/// Catalog record for a phase name.
#[inline]
pub fn record(name: PhaseName) -> &'static PhaseRecord {
    &MOON_PHASES[name.index()]
}

/// Look a record up by (case-insensitive) name or slug.
pub fn find(name: &str) -> Result<&'static PhaseRecord> {
    name.parse::<PhaseName>().map(record)
}

// ═══════════════════════════════════════════════════════════════════════════
// MoonPhase
// ═══════════════════════════════════════════════════════════════════════════

/// A catalog record with date-specific illumination and moon age.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MoonPhase {
    pub name: PhaseName,
    pub icon: &'static str,
    /// Illuminated fraction, `0.0..=1.0`.
    pub illumination: f64,
    /// Days since new moon, rounded to one decimal.
    #[serde(serialize_with = "serialize_days")]
    pub moon_age: Days,
    pub description: &'static str,
    pub short_description: &'static str,
    pub special_message: &'static str,
    pub rarity: &'static str,
}

impl MoonPhase {
    /// The record exactly as the catalog lists it.
    pub fn from_catalog(name: PhaseName) -> Self {
        let rec = record(name);
        Self::with_values(rec, rec.illumination, Days::new(rec.moon_age))
    }

    /// The record selected by a computed phase, carrying its illumination and age.
    pub fn from_phase(phase: LunarPhase) -> Self {
        let rec = record(PhaseName::from_index(phase.index()));
        Self::with_values(
            rec,
            phase.illumination(),
            Days::new(round_tenth(phase.age().value())),
        )
    }

    /// Replace the computed values, keeping the catalog text.
    #[must_use]
    pub fn with_overrides(mut self, illumination: f64, moon_age: Days) -> Self {
        self.illumination = illumination;
        self.moon_age = moon_age;
        self
    }

    fn with_values(rec: &'static PhaseRecord, illumination: f64, moon_age: Days) -> Self {
        Self {
            name: rec.name,
            icon: rec.icon,
            illumination,
            moon_age,
            description: rec.description,
            short_description: rec.short_description,
            special_message: rec.special_message,
            rarity: rec.rarity,
        }
    }

    /// Illumination as a whole percentage.
    pub fn illumination_percent(&self) -> u8 {
        (self.illumination.clamp(0.0, 1.0) * 100.0).round() as u8
    }

    /// Web path of this phase's image.
    pub fn image_path(&self) -> String {
        format!("/images/moon-phases/{}.png", self.name.slug())
    }

    /// [`image_path`](Self::image_path) if the asset exists under
    /// `asset_root`, otherwise [`PLACEHOLDER_IMAGE`].
    pub fn image_or_placeholder(&self, asset_root: &Path) -> String {
        let path = self.image_path();
        if asset_root.join(path.trim_start_matches('/')).is_file() {
            path
        } else {
            debug!(image = %path, root = %asset_root.display(), "phase image missing, using placeholder");
            PLACEHOLDER_IMAGE.to_string()
        }
    }
}

/// The full catalog in cycle order.
pub fn catalog() -> impl Iterator<Item = MoonPhase> {
    PhaseName::ALL.into_iter().map(MoonPhase::from_catalog)
}

fn round_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

pub(crate) fn serialize_days<S>(days: &Days, serializer: S) -> std::result::Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_f64(days.value())
}
