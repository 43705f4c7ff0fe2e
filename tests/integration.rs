// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

use async_trait::async_trait;
use chrono::{DateTime, Duration, NaiveDate, TimeZone, Utc};
use lunarium::{
    constellations, events, phases, Almanac, EphemerisSource, Error, JulianDay, LunarPhase,
    MoonPhase, Origin, PhaseName, SpaceEvent, View, SYNODIC_MONTH,
};
use qtty::Days;
use rand::rngs::StdRng;
use rand::SeedableRng;

fn reference() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2000, 1, 6, 18, 14, 0).unwrap()
}

fn synodic_months(n: i64) -> Duration {
    Duration::milliseconds(n * 2_551_392_000)
}

#[test]
fn index_is_always_in_range_and_periodic() {
    let start = Utc.with_ymd_and_hms(1950, 3, 1, 0, 0, 0).unwrap();
    for step in 0..2_000 {
        let instant = start + Duration::hours(step * 37);
        let phase = LunarPhase::at(instant);
        assert!(phase.index() < 8);
        assert_eq!(phase, LunarPhase::at(instant + synodic_months(1)));
    }
}

#[test]
fn reference_epoch_matches_whole_months_later() {
    let at_reference = LunarPhase::at(reference());
    assert_eq!(at_reference.index(), 0);
    for n in [-300, -1, 1, 12, 100, 1_000] {
        assert_eq!(LunarPhase::at(reference() + synodic_months(n)).index(), 0);
    }
}

#[test]
fn illumination_rises_then_falls() {
    let samples: Vec<f64> = (0..=100)
        .map(|i| {
            let offset = Duration::milliseconds(2_551_392_000 * i / 100);
            LunarPhase::at(reference() + offset).illumination()
        })
        .collect();

    assert_eq!(samples[0], 0.0);
    assert!((samples[50] - 1.0).abs() < 1e-9);
    assert!(samples[..=50].windows(2).all(|w| w[0] <= w[1]));
    assert!(samples[50..].windows(2).all(|w| w[0] >= w[1]));
}

#[test]
fn moon_age_stays_within_one_month() {
    let phase = MoonPhase::from_phase(LunarPhase::at(Utc::now()));
    assert!(phase.moon_age >= Days::new(0.0));
    assert!(phase.moon_age <= SYNODIC_MONTH);
}

#[test]
fn julian_day_of_reference_new_moon() {
    let jd = JulianDay::from_utc(reference());
    assert!((jd.value() - 2_451_550.259_722).abs() < 1e-5);
    assert_eq!(jd, JulianDay::reference_new_moon());
}

#[test]
fn catalog_lookup_and_navigation() {
    let full = phases::find("full moon").unwrap();
    assert_eq!(full.name, PhaseName::FullMoon);
    assert_eq!(full.name.next(), PhaseName::WaningGibbous);
    assert!(matches!(
        phases::find("blue moon"),
        Err(Error::UnknownName { .. })
    ));

    let orion = constellations::find("orion").unwrap();
    assert_eq!(constellations::previous(orion).name, "Scorpius");
    assert_eq!(constellations::next(orion).name, "Ursa Major");
}

#[test]
fn routing() {
    assert_eq!(View::route("/your-moon"), View::YourMoon);
    assert_eq!(View::route("/your-moon/"), View::YourMoon);
    assert_eq!(View::route("/moon"), View::NotFound);
}

#[test]
fn local_events_follow_offsets() {
    let today = NaiveDate::from_ymd_opt(2026, 10, 15).unwrap();
    let list = events::upcoming_events(today);
    assert_eq!(list.len(), events::EVENT_OFFSETS.len());
    for (event, offset) in list.iter().zip(events::EVENT_OFFSETS) {
        let days = (event.date.date_naive() - today).num_days();
        assert_eq!(days as u64, offset);
    }
}

#[derive(Debug)]
struct DownSource;

#[async_trait]
impl EphemerisSource for DownSource {
    fn name(&self) -> &str {
        "down"
    }

    async fn lunar_phase(&self, _date: NaiveDate) -> lunarium::Result<LunarPhase> {
        Err(Error::HttpStatus {
            status: 503,
            url: "http://ephemeris.invalid/phase".to_string(),
        })
    }

    async fn upcoming_events(&self, _from: NaiveDate) -> lunarium::Result<Vec<SpaceEvent>> {
        Err(Error::invalid_response("truncated body"))
    }
}

#[tokio::test]
async fn failing_source_falls_back_to_local_values() {
    let almanac = Almanac::with_source(DownSource);
    let now = Utc.with_ymd_and_hms(2026, 10, 15, 9, 30, 0).unwrap();

    let phase = almanac.moon_phase(now).await;
    assert_eq!(phase.origin, Origin::Local);
    assert!(phase.notice.is_some());
    assert_eq!(phase.value, MoonPhase::from_phase(LunarPhase::at(now)));

    let list = almanac.upcoming_events(now.date_naive()).await;
    assert!(list.is_fallback());
    assert_eq!(list.value, events::upcoming_events(now.date_naive()));
}

#[tokio::test]
async fn today_report_serializes_for_json_output() {
    let almanac = Almanac::offline();
    let now = Utc.with_ymd_and_hms(2026, 10, 15, 9, 30, 0).unwrap();
    let report = almanac
        .todays_moon(now, &mut StdRng::seed_from_u64(42))
        .await;

    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(json["heading"], "Thursday, October 15, 2026");
    assert_eq!(json["origin"], "local");
    assert!(json.get("notice").is_none());
    assert!(json["phase"]["moonAge"].is_number());
    assert!(json["times"]["moonrise"].as_str().unwrap().ends_with('M'));
}

#[tokio::test]
async fn birth_moon_for_pinned_date() {
    let almanac = Almanac::offline();
    let report = almanac
        .birth_moon("2025-03-23", &mut StdRng::seed_from_u64(1))
        .await
        .unwrap();
    assert_eq!(report.phase.name, PhaseName::WaningCrescent);
    assert_eq!(report.phase.illumination_percent(), 15);
    assert_eq!(report.phase.moon_age, Days::new(26.0));
}
