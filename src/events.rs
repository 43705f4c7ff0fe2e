// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Upcoming sky events.
//!
//! The local table is five fixed-content events dated a constant number of
//! days after "today". It is not derived from any ephemeris; it is the
//! fallback used whenever the remote source is unavailable.

use chrono::{DateTime, Datelike, Days, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{Error, Result};

/// Category tag of an event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum EventKind {
    MeteorShower,
    Eclipse,
    PlanetaryEvent,
    LunarPhase,
    SpaceStation,
    /// Any tag the local table does not know.
    Other(String),
}

impl EventKind {
    pub fn as_str(&self) -> &str {
        match self {
            Self::MeteorShower => "Meteor Shower",
            Self::Eclipse => "Eclipse",
            Self::PlanetaryEvent => "Planetary Event",
            Self::LunarPhase => "Lunar Phase",
            Self::SpaceStation => "Space Station",
            Self::Other(tag) => tag,
        }
    }
}

impl From<String> for EventKind {
    fn from(tag: String) -> Self {
        match tag.as_str() {
            "Meteor Shower" => Self::MeteorShower,
            "Eclipse" => Self::Eclipse,
            "Planetary Event" => Self::PlanetaryEvent,
            "Lunar Phase" => Self::LunarPhase,
            "Space Station" => Self::SpaceStation,
            _ => Self::Other(tag),
        }
    }
}

impl From<EventKind> for String {
    fn from(kind: EventKind) -> Self {
        kind.as_str().to_string()
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One upcoming event.
///
/// Field names follow the camelCase shape remote feeds use, so the same type
/// decodes remote payloads and encodes `--json` output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpaceEvent {
    pub title: String,
    pub date: DateTime<Utc>,
    pub description: String,
    pub image: String,
    #[serde(rename = "type")]
    pub kind: EventKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub equipment: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub full_details: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub related_events: Vec<String>,
}

impl SpaceEvent {
    /// e.g. `"October 20, 2026 at 12:00 AM"`.
    pub fn formatted_date(&self) -> String {
        self.date.format("%B %-d, %Y at %-I:%M %p").to_string()
    }
}

struct Template {
    title: &'static str,
    description: &'static str,
    image: &'static str,
    kind: EventKind,
    location: &'static str,
    equipment: &'static str,
    duration: &'static str,
    full_details: &'static str,
    related: &'static str,
}

fn templates() -> [Template; 5] {
    [
        Template {
            title: "Meteor Shower",
            description: "A spectacular meteor shower will be visible in the night sky. The best viewing time will be between midnight and dawn. Find a dark location away from city lights for optimal viewing. Expected rate: 10-20 meteors per hour at peak.",
            image: "https://static.toiimg.com/photo/77503562.cms?w=1920&h=1200",
            kind: EventKind::MeteorShower,
            location: "Visible worldwide, best in Northern Hemisphere",
            equipment: "No special equipment needed; visible with naked eye",
            duration: "Peak viewing: 2-3 hours",
            full_details: "This meteor shower happens when Earth passes through debris left by a comet. Fragments of dust and ice burn up in our atmosphere, creating bright streaks of light. For best results, let your eyes adjust to the darkness for at least 20 minutes before viewing. Bring a reclining chair or blanket for comfort.",
            related: "Moon phases may affect visibility",
        },
        Template {
            title: "Lunar Eclipse",
            description: "During this lunar eclipse, the Moon will pass through Earth's shadow, causing it to darken and potentially turn a reddish hue known as a 'blood moon'.",
            image: "https://www.baltana.com/files/wallpapers-33/Lunar-Eclipse-Astronomy-HD-Background-Wallpaper-115623.jpg?w=1920&h=1200",
            kind: EventKind::Eclipse,
            location: "Visible across Asia, Europe, Africa and parts of North America",
            equipment: "Visible with naked eye; binoculars or small telescope enhance viewing",
            duration: "Total duration: 3 hours 28 minutes",
            full_details: "This lunar eclipse occurs when the Earth comes between the Sun and the Moon, casting a shadow on the lunar surface. During totality, the Moon often appears reddish because Earth's atmosphere bends sunlight and filters out blue light. The red light reaches the Moon's surface, giving it the 'blood moon' appearance. Unlike solar eclipses, lunar eclipses are safe to view with the naked eye.",
            related: "International Space Station visible during early phase",
        },
        Template {
            title: "Saturn Opposition",
            description: "Saturn will be at its closest approach to Earth, making it fully illuminated by the Sun. This is the best time to view and photograph Saturn and its moons.",
            image: "https://images.unsplash.com/photo-1614732414444-096e5f1122d5?w=1920&h=1200",
            kind: EventKind::PlanetaryEvent,
            location: "Visible worldwide with proper equipment",
            equipment: "Medium-sized telescope required to view rings",
            duration: "Best viewing: 4-6 hours after sunset",
            full_details: "During opposition, Saturn will be at its closest point to Earth for the year, appearing at its brightest in our night sky. With even a small telescope, you can observe Saturn's famous rings and possibly spot Titan, its largest moon. The planet will rise at sunset and remain visible throughout the night. Look for it in the southeastern sky in the evening hours. Saturn takes about 29.5 years to orbit the Sun, making this annual opposition a special viewing opportunity.",
            related: "Several Saturn moons visible with good telescope",
        },
        Template {
            title: "New Moon",
            description: "The New Moon will occur when the Moon is located between the Earth and the Sun, making the lunar disk invisible from Earth. This marks the beginning of a new lunar cycle.",
            image: "https://cdn.mos.cms.futurecdn.net/dztGyajUjgmDjYYWa6YhFL.jpg?w=1920&h=1200",
            kind: EventKind::LunarPhase,
            location: "Worldwide astronomical event (moon not visible)",
            equipment: "Not observable with standard equipment",
            duration: "Exact new moon: Momentary astronomical event",
            full_details: "During a new moon, the side of the Moon facing Earth is not illuminated by the Sun, making it virtually invisible in the night sky. This creates ideal conditions for observing faint deep sky objects like galaxies and nebulae. The new moon also marks the beginning of a lunar month in many calendar systems. While not visible itself, the darkened sky during a new moon offers excellent stargazing opportunities if weather conditions are favorable.",
            related: "Excellent time for deep space observation",
        },
        Template {
            title: "International Space Station Visible",
            description: "The International Space Station will be clearly visible with the naked eye as it passes overhead. The ISS appears as a bright, fast-moving star across the night sky.",
            image: "https://images.unsplash.com/photo-1446776811953-b23d57bd21aa?w=1920&h=1200",
            kind: EventKind::SpaceStation,
            location: "Visible across major Northern Hemisphere cities",
            equipment: "Visible with naked eye; binoculars optional",
            duration: "Visibility window: 2-5 minutes",
            full_details: "The International Space Station orbits Earth at a speed of approximately 28,000 km/h (17,500 mph), completing 16 orbits per day. During this pass, the ISS will appear as a bright, non-twinkling light moving steadily across the sky. It will be visible for about 3-6 minutes depending on your location. The space station is currently home to 7 astronauts conducting scientific research in microgravity. This particular flyover offers an excellent viewing opportunity due to its high maximum elevation and evening timing.",
            related: "Possible Starlink satellite train visible same evening",
        },
    ]
}

/// Day offsets of the local events relative to today.
pub const EVENT_OFFSETS: [u64; 5] = [5, 8, 12, 15, 20];

/// The local event table, dated relative to `today` (00:00 UTC).
pub fn upcoming_events(today: NaiveDate) -> Vec<SpaceEvent> {
    templates()
        .into_iter()
        .zip(EVENT_OFFSETS)
        .map(|(t, offset)| SpaceEvent {
            title: t.title.to_string(),
            date: midnight_utc(
                today
                    .checked_add_days(Days::new(offset))
                    .unwrap_or(NaiveDate::MAX),
            ),
            description: t.description.to_string(),
            image: t.image.to_string(),
            kind: t.kind,
            location: Some(t.location.to_string()),
            equipment: Some(t.equipment.to_string()),
            duration: Some(t.duration.to_string()),
            full_details: Some(t.full_details.to_string()),
            related_events: vec![t.related.to_string()],
        })
        .collect()
}

/// Pick one event by 1-based position or case-insensitive title.
///
/// # Errors
///
/// [`Error::UnknownName`] when nothing matches.
pub fn find_event<'a>(events: &'a [SpaceEvent], key: &str) -> Result<&'a SpaceEvent> {
    let wanted = key.trim();
    let by_position = wanted
        .parse::<usize>()
        .ok()
        .and_then(|n| n.checked_sub(1))
        .and_then(|i| events.get(i));
    by_position
        .or_else(|| events.iter().find(|e| e.title.eq_ignore_ascii_case(wanted)))
        .ok_or_else(|| Error::unknown_name("event", key))
}

/// Last calendar day of `date`'s month.
pub fn end_of_month(date: NaiveDate) -> NaiveDate {
    let (year, month) = if date.month() == 12 {
        (date.year() + 1, 1)
    } else {
        (date.year(), date.month() + 1)
    };
    NaiveDate::from_ymd_opt(year, month, 1)
        .and_then(|first| first.pred_opt())
        .unwrap_or(date)
}

fn midnight_utc(date: NaiveDate) -> DateTime<Utc> {
    date.and_time(NaiveTime::MIN).and_utc()
}
