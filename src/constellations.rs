// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Constellation fact sheets.

use chrono::Month;
use serde::{Serialize, Serializer};

use crate::error::{Error, Result};

/// A static constellation entry.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Constellation {
    pub name: &'static str,
    pub description: &'static str,
    /// Principal stars, brightest-first as traditionally listed.
    pub stars: &'static [&'static str],
    /// Month the constellation is best placed for evening viewing.
    #[serde(serialize_with = "serialize_month")]
    pub best_viewed: Month,
    pub mythology: &'static str,
}

/// The five catalog entries, in display order.
pub static CONSTELLATIONS: [Constellation; 5] = [
    Constellation {
        name: "Orion",
        description: "One of the most recognizable constellations, Orion is named after a hunter in Greek mythology. It contains the bright stars Betelgeuse and Rigel.",
        stars: &["Betelgeuse", "Rigel", "Bellatrix", "Mintaka", "Alnilam", "Alnitak", "Saiph"],
        best_viewed: Month::January,
        mythology: "Orion was a giant huntsman in Greek mythology whom Zeus placed among the stars as the constellation of Orion.",
    },
    Constellation {
        name: "Ursa Major",
        description: "Also known as the Great Bear, it contains the Big Dipper asterism and is one of the most prominent constellations in the northern sky.",
        stars: &["Dubhe", "Merak", "Phecda", "Megrez", "Alioth", "Mizar", "Alkaid"],
        best_viewed: Month::April,
        mythology: "In Greek mythology, Zeus transformed a nymph named Callisto into a bear and then placed her in the sky as Ursa Major.",
    },
    Constellation {
        name: "Cassiopeia",
        description: "A distinctive W-shaped constellation easily recognizable in the northern sky, named after the vain queen Cassiopeia in Greek mythology.",
        stars: &["Schedar", "Caph", "Gamma Cassiopeiae", "Ruchbah", "Segin"],
        best_viewed: Month::November,
        mythology: "Cassiopeia was the queen of Aethiopia who boasted about her beauty, claiming she was more beautiful than the sea nymphs.",
    },
    Constellation {
        name: "Lyra",
        description: "A small constellation representing the lyre of Orpheus, it contains Vega, one of the brightest stars in the night sky.",
        stars: &["Vega", "Sheliak", "Sulafat", "Epsilon Lyrae"],
        best_viewed: Month::August,
        mythology: "Lyra represents the lyre of the legendary musician Orpheus who could charm all living things with his music.",
    },
    Constellation {
        name: "Scorpius",
        description: "A distinctive S-shaped constellation that resembles a scorpion, with the bright red star Antares marking the scorpion's heart.",
        stars: &["Antares", "Shaula", "Dschubba", "Sargas", "Jabbah"],
        best_viewed: Month::July,
        mythology: "In Greek mythology, Scorpius is the scorpion that stung and killed Orion, which is why these two constellations are never seen in the sky at the same time.",
    },
];

/// Index of a constellation by case-insensitive name.
pub fn position(name: &str) -> Result<usize> {
    let wanted = name.trim();
    CONSTELLATIONS
        .iter()
        .position(|c| c.name.eq_ignore_ascii_case(wanted))
        .ok_or_else(|| Error::unknown_name("constellation", name))
}

/// Look a constellation up by case-insensitive name.
pub fn find(name: &str) -> Result<&'static Constellation> {
    position(name).map(|i| &CONSTELLATIONS[i])
}

/// Entry after `current`, wrapping to the first.
pub fn next(current: &Constellation) -> &'static Constellation {
    step(current, 1)
}

/// Entry before `current`, wrapping to the last.
pub fn previous(current: &Constellation) -> &'static Constellation {
    step(current, CONSTELLATIONS.len() - 1)
}

fn step(current: &Constellation, by: usize) -> &'static Constellation {
    // Unknown entries behave as if they were the first one.
    let at = position(current.name).unwrap_or(0);
    &CONSTELLATIONS[(at + by) % CONSTELLATIONS.len()]
}

/// Constellations best viewed in `month`.
pub fn best_in(month: Month) -> impl Iterator<Item = &'static Constellation> {
    CONSTELLATIONS.iter().filter(move |c| c.best_viewed == month)
}

fn serialize_month<S>(month: &Month, serializer: S) -> std::result::Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(month.name())
}
