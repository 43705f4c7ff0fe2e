// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Command-line interface for the `lunarium` binary.

mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

pub use commands::{
    parse_month, BirthCommand, ConfigCommand, ConstellationsCommand, EventsCommand,
    PhasesCommand, RouteCommand, Step, TodayCommand,
};

use crate::logging::Verbosity;

/// lunarium - what is the moon doing?
///
/// Today's moon phase, the moon on your birthday, the phase catalog,
/// constellation facts and upcoming sky events.
#[derive(Debug, Parser)]
#[command(name = "lunarium")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to custom configuration file
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Increase verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Never contact the remote ephemeris source
    #[arg(long, global = true)]
    pub offline: bool,

    /// The command to execute
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Show today's moon
    Today(TodayCommand),

    /// Show the moon on a birth date
    Birth(BirthCommand),

    /// Browse the moon phase catalog
    Phases(PhasesCommand),

    /// Browse constellations
    Constellations(ConstellationsCommand),

    /// List upcoming space events
    Events(EventsCommand),

    /// Resolve a site path to its view
    Route(RouteCommand),

    /// View or validate configuration
    #[command(subcommand)]
    Config(ConfigCommand),
}

impl Cli {
    /// Verbosity selected by `-q` / `-v`.
    #[must_use]
    pub fn verbosity(&self) -> Verbosity {
        if self.quiet {
            Verbosity::Quiet
        } else {
            match self.verbose {
                0 => Verbosity::Normal,
                1 => Verbosity::Verbose,
                _ => Verbosity::Trace,
            }
        }
    }

    /// Whether the command needs the global configuration loaded first.
    ///
    /// `config validate` loads the file it checks, so a broken default file
    /// must not stop it.
    #[must_use]
    pub fn loads_config(&self) -> bool {
        !matches!(self.command, Command::Config(ConfigCommand::Validate { .. }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Month;
    use clap::CommandFactory;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("lunarium").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_cli_verify() {
        Cli::command().debug_assert();
        assert_eq!(Cli::command().get_name(), "lunarium");
    }

    #[test]
    fn test_verbosity_flags() {
        assert_eq!(parse(&["today"]).verbosity(), Verbosity::Normal);
        assert_eq!(parse(&["-v", "today"]).verbosity(), Verbosity::Verbose);
        assert_eq!(parse(&["-vv", "today"]).verbosity(), Verbosity::Trace);
        assert_eq!(parse(&["-q", "-v", "today"]).verbosity(), Verbosity::Quiet);
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = parse(&["today", "--offline", "-c", "/tmp/l.toml"]);
        assert!(cli.offline);
        assert_eq!(cli.config, Some(PathBuf::from("/tmp/l.toml")));
    }

    #[test]
    fn test_parse_birth() {
        let cli = parse(&["birth", "1990-07-04", "--json"]);
        let Command::Birth(cmd) = cli.command else {
            panic!("expected birth");
        };
        assert_eq!(cmd.date, "1990-07-04");
        assert!(cmd.json);
    }

    #[test]
    fn test_birth_requires_date() {
        assert!(Cli::try_parse_from(["lunarium", "birth"]).is_err());
    }

    #[test]
    fn test_parse_phases_step() {
        let Command::Phases(cmd) = parse(&["phases", "full-moon", "--next"]).command else {
            panic!("expected phases");
        };
        assert_eq!(cmd.name.as_deref(), Some("full-moon"));
        assert_eq!(cmd.step(), Some(Step::Next));

        assert!(Cli::try_parse_from(["lunarium", "phases", "x", "--next", "--previous"]).is_err());
    }

    #[test]
    fn test_parse_constellations_month() {
        let Command::Constellations(cmd) = parse(&["constellations", "--month", "jan"]).command
        else {
            panic!("expected constellations");
        };
        assert_eq!(cmd.month, Some(Month::January));
        assert!(Cli::try_parse_from(["lunarium", "constellations", "--month", "13"]).is_err());
    }

    #[test]
    fn test_parse_event_details() {
        let Command::Events(cmd) = parse(&["events", "--details", "Lunar Eclipse"]).command else {
            panic!("expected events");
        };
        assert_eq!(cmd.details.as_deref(), Some("Lunar Eclipse"));
        assert!(!cmd.json);
    }

    #[test]
    fn test_validate_skips_global_config() {
        assert!(!parse(&["config", "validate", "--file", "other.toml"]).loads_config());
        assert!(!parse(&["-c", "broken.toml", "config", "validate"]).loads_config());
        assert!(parse(&["config", "show"]).loads_config());
        assert!(parse(&["today"]).loads_config());
    }

    #[test]
    fn test_parse_route_and_config() {
        let Command::Route(cmd) = parse(&["route", "/today"]).command else {
            panic!("expected route");
        };
        assert_eq!(cmd.path, "/today");

        assert!(matches!(
            parse(&["config", "show", "--json"]).command,
            Command::Config(ConfigCommand::Show { json: true })
        ));
        assert!(matches!(
            parse(&["config", "path"]).command,
            Command::Config(ConfigCommand::Path)
        ));
    }
}
