// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! `lunarium` - moon phases, birth moons, constellations and sky events.
//!
//! Lookups that fail print a notice to stderr and still exit successfully.
//! Only a broken configuration file aborts the program.

#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

use std::path::PathBuf;

use chrono::Utc;
use clap::Parser;
use serde::Serialize;

use lunarium::cli::{
    BirthCommand, Cli, Command, ConfigCommand, ConstellationsCommand, EventsCommand,
    PhasesCommand, Step,
};
use lunarium::{
    constellations, events, init_logging, phases, Almanac, Config, Constellation, MoonPhase,
    Notice, Origin, PhaseName, SpaceEvent, View,
};

type CliResult = Result<(), Box<dyn std::error::Error>>;

#[tokio::main]
async fn main() -> CliResult {
    let cli = Cli::parse();

    init_logging(cli.verbosity());

    // `config validate` loads its own file.
    let config = if cli.loads_config() {
        Config::load_from(cli.config.clone())?
    } else {
        Config::default()
    };

    let almanac = if cli.offline {
        Almanac::offline()
    } else {
        match Almanac::from_config(&config.ephemeris) {
            Ok(almanac) => almanac,
            Err(e) => {
                report(&Notice::error("Remote ephemeris disabled").with_description(e.to_string()));
                Almanac::offline()
            }
        }
    };

    let mut rng = rand::thread_rng();
    let json = |flag: bool| flag || config.display.json;

    match cli.command {
        Command::Today(cmd) => {
            let report = almanac.todays_moon(Utc::now(), &mut rng).await;
            if let Some(notice) = &report.notice {
                self::report(notice);
            }
            if json(cmd.json) {
                print_json(&report)?;
            } else {
                println!("{}", report.heading);
                println!();
                print_phase(&report.phase, &config);
                println!("Moonrise:      {}", report.times.moonrise);
                println!("Moonset:       {}", report.times.moonset);
                println!("Julian day:    {}", report.julian_day);
                println!("Lunation:      {}", report.lunation);
                print_origin(report.origin);
            }
        }
        Command::Birth(cmd) => handle_birth(&almanac, &config, &cmd, &mut rng).await?,
        Command::Phases(cmd) => handle_phases(&config, &cmd)?,
        Command::Constellations(cmd) => handle_constellations(&config, &cmd)?,
        Command::Events(cmd) => handle_events(&almanac, &config, &cmd).await?,
        Command::Route(cmd) => {
            let view = View::route(&cmd.path);
            if view == View::NotFound {
                report(
                    &Notice::error("404").with_description(format!("No view at {}", cmd.path)),
                );
                println!("Return to Home: {}", View::Landing.path());
            } else {
                println!("{} -> {}", view.path(), view.title());
            }
        }
        Command::Config(cmd) => handle_config(&config, cli.config, cmd)?,
    }

    Ok(())
}

async fn handle_birth<R: rand::Rng>(
    almanac: &Almanac,
    config: &Config,
    cmd: &BirthCommand,
    rng: &mut R,
) -> CliResult {
    let report = match almanac.birth_moon(&cmd.date, rng).await {
        Ok(report) => report,
        Err(e) => {
            self::report(&Notice::error(e.to_string()));
            return Ok(());
        }
    };
    if let Some(notice) = &report.notice {
        self::report(notice);
    }

    if cmd.json || config.display.json {
        return print_json(&report);
    }

    println!("Your birth moon: {}", report.date.format("%B %-d, %Y"));
    println!();
    print_phase(&report.phase, config);
    println!("Moonrise:      {}", report.times.moonrise);
    println!("Moonset:       {}", report.times.moonset);
    println!();
    println!("{}", report.phase.special_message);
    println!("{}", report.phase.rarity);
    println!("{}", report.historical_note);
    println!();
    println!("{}", report.share_text);
    print_origin(report.origin);
    Ok(())
}

async fn handle_events(almanac: &Almanac, config: &Config, cmd: &EventsCommand) -> CliResult {
    let today = Utc::now().date_naive();
    let resolved = almanac.upcoming_events(today).await;
    if let Some(notice) = &resolved.notice {
        report(notice);
    }
    let json = cmd.json || config.display.json;

    if let Some(key) = &cmd.details {
        let event = match events::find_event(&resolved.value, key) {
            Ok(event) => event,
            Err(e) => {
                report(&Notice::error(e.to_string()));
                return Ok(());
            }
        };
        if json {
            return print_json(event);
        }
        print_event(event);
        if let Some(details) = &event.full_details {
            println!();
            println!("{details}");
        }
        if !event.related_events.is_empty() {
            println!();
            println!("Related events:");
            for related in &event.related_events {
                println!("  - {related}");
            }
        }
        return Ok(());
    }

    if json {
        return print_json(&resolved.value);
    }
    println!("{}", View::Events.title());
    println!();
    for (position, event) in resolved.value.iter().enumerate() {
        print!("{}. ", position + 1);
        print_event(event);
        println!();
    }
    print_origin(resolved.origin);
    Ok(())
}

fn print_event(event: &SpaceEvent) {
    println!("{} [{}]", event.title, event.kind);
    println!("  {}", event.formatted_date());
    println!("  {}", event.description);
    if let Some(location) = &event.location {
        println!("  Where: {location}");
    }
    if let Some(equipment) = &event.equipment {
        println!("  Equipment: {equipment}");
    }
    if let Some(duration) = &event.duration {
        println!("  Duration: {duration}");
    }
}

fn handle_phases(config: &Config, cmd: &PhasesCommand) -> CliResult {
    let json = cmd.json || config.display.json;

    let Some(name) = &cmd.name else {
        let all: Vec<MoonPhase> = phases::catalog().collect();
        if json {
            return print_json(&all);
        }
        for phase in &all {
            println!(
                "{:<16} {:>3}%  day {:>4.1}  {}",
                phase.name,
                phase.illumination_percent(),
                phase.moon_age.value(),
                phase.short_description
            );
        }
        return Ok(());
    };

    let found = match phases::find(name) {
        Ok(record) => record.name,
        Err(e) => {
            report(&Notice::error(e.to_string()));
            return Ok(());
        }
    };
    let shown: PhaseName = match cmd.step() {
        Some(Step::Next) => found.next(),
        Some(Step::Previous) => found.previous(),
        None => found,
    };
    let phase = MoonPhase::from_catalog(shown);

    if json {
        return print_json(&phase);
    }
    print_phase(&phase, config);
    println!();
    println!("{}", phase.special_message);
    Ok(())
}

fn handle_constellations(config: &Config, cmd: &ConstellationsCommand) -> CliResult {
    let json = cmd.json || config.display.json;

    let selected: Vec<&Constellation> = match (&cmd.name, cmd.month) {
        (Some(name), _) => match constellations::find(name) {
            Ok(found) => vec![match cmd.step() {
                Some(Step::Next) => constellations::next(found),
                Some(Step::Previous) => constellations::previous(found),
                None => found,
            }],
            Err(e) => {
                report(&Notice::error(e.to_string()));
                return Ok(());
            }
        },
        (None, Some(month)) => constellations::best_in(month).collect(),
        (None, None) => constellations::CONSTELLATIONS.iter().collect(),
    };

    if json {
        return print_json(&selected);
    }
    if selected.is_empty() {
        report(&Notice::info("No constellation is at its best that month"));
        return Ok(());
    }
    for constellation in selected {
        println!(
            "{} (best viewed in {})",
            constellation.name,
            constellation.best_viewed.name()
        );
        println!("  {}", constellation.description);
        println!("  Stars: {}", constellation.stars.join(", "));
        println!("  {}", constellation.mythology);
        println!();
    }
    Ok(())
}

fn handle_config(config: &Config, global: Option<PathBuf>, cmd: ConfigCommand) -> CliResult {
    match cmd {
        ConfigCommand::Show { json } => {
            if json {
                print_json(config)?;
            } else {
                println!("Current Configuration");
                println!("=====================");
                println!();
                println!("[Ephemeris]");
                println!("  Enabled:            {}", config.ephemeris.enabled);
                println!("  Phase URL:          {}", config.ephemeris.phase_url);
                println!(
                    "  Events URL:         {}",
                    config.ephemeris.events_url.as_deref().unwrap_or("(none)")
                );
                println!(
                    "  API key:            {}",
                    if config.ephemeris.api_key.is_some() {
                        "(set)"
                    } else {
                        "(none)"
                    }
                );
                println!("  Timeout (s):        {}", config.ephemeris.timeout_secs);
                println!();
                println!("[Display]");
                println!("  JSON by default:    {}", config.display.json);
                println!(
                    "  Asset root:         {}",
                    config
                        .display
                        .asset_root
                        .as_ref()
                        .map_or_else(|| "(none)".to_string(), |p| p.display().to_string())
                );
            }
        }
        ConfigCommand::Path => {
            println!("{}", Config::default_config_path().display());
        }
        ConfigCommand::Validate { file } => {
            let path = file.or(global).unwrap_or_else(Config::default_config_path);
            println!("Validating configuration: {}", path.display());
            match Config::load_from(Some(path)) {
                Ok(_) => println!("Configuration is valid."),
                Err(e) => println!("Configuration error: {e}"),
            }
        }
    }
    Ok(())
}

fn print_phase(phase: &MoonPhase, config: &Config) {
    let image = match &config.display.asset_root {
        Some(root) => phase.image_or_placeholder(root),
        None => phase.image_path(),
    };
    println!("{} ({})", phase.name, phase.icon);
    println!("Illumination:  {}%", phase.illumination_percent());
    println!("Moon age:      {:.1} days", phase.moon_age.value());
    println!("Image:         {image}");
    println!("{}", phase.description);
}

fn print_origin(origin: Origin) {
    if origin == Origin::Remote {
        println!();
        println!("(data from remote ephemeris)");
    }
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> CliResult {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn report(notice: &Notice) {
    eprintln!("{notice}");
}
