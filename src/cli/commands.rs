// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! CLI command definitions.

use std::path::PathBuf;

use chrono::Month;
use clap::{Args, Subcommand};

/// Today command arguments.
#[derive(Debug, Args)]
pub struct TodayCommand {
    /// Output as JSON
    #[arg(short, long)]
    pub json: bool,
}

/// Birth command arguments.
#[derive(Debug, Args)]
pub struct BirthCommand {
    /// Birth date as YYYY-MM-DD
    #[arg(value_name = "YYYY-MM-DD")]
    pub date: String,

    /// Output as JSON
    #[arg(short, long)]
    pub json: bool,
}

/// Direction to move from a named entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Next,
    Previous,
}

/// Phases command arguments.
#[derive(Debug, Args)]
pub struct PhasesCommand {
    /// Phase to show, e.g. "full-moon" or "Waxing Crescent"
    pub name: Option<String>,

    /// Show the phase after NAME
    #[arg(long, requires = "name", conflicts_with = "previous")]
    pub next: bool,

    /// Show the phase before NAME
    #[arg(long, requires = "name")]
    pub previous: bool,

    /// Output as JSON
    #[arg(short, long)]
    pub json: bool,
}

impl PhasesCommand {
    /// Requested step, if any.
    #[must_use]
    pub fn step(&self) -> Option<Step> {
        step(self.next, self.previous)
    }
}

/// Constellations command arguments.
#[derive(Debug, Args)]
pub struct ConstellationsCommand {
    /// Constellation to show
    pub name: Option<String>,

    /// Show the constellation after NAME
    #[arg(long, requires = "name", conflicts_with = "previous")]
    pub next: bool,

    /// Show the constellation before NAME
    #[arg(long, requires = "name")]
    pub previous: bool,

    /// Only constellations best viewed in MONTH (name or 1-12)
    #[arg(short, long, value_parser = parse_month, conflicts_with = "name")]
    pub month: Option<Month>,

    /// Output as JSON
    #[arg(short, long)]
    pub json: bool,
}

impl ConstellationsCommand {
    /// Requested step, if any.
    #[must_use]
    pub fn step(&self) -> Option<Step> {
        step(self.next, self.previous)
    }
}

/// Events command arguments.
#[derive(Debug, Args)]
pub struct EventsCommand {
    /// Show full details of one event, by title or list position (1-based)
    #[arg(short, long, value_name = "TITLE|N")]
    pub details: Option<String>,

    /// Output as JSON
    #[arg(short, long)]
    pub json: bool,
}

/// Route command arguments.
#[derive(Debug, Args)]
pub struct RouteCommand {
    /// Request path, e.g. "/today"
    pub path: String,
}

/// Configuration commands.
#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration
    Show {
        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },

    /// Show the configuration file path
    Path,

    /// Validate configuration
    Validate {
        /// Path to configuration file to validate
        #[arg(short, long)]
        file: Option<PathBuf>,
    },
}

/// Parse a month from its English name, three-letter abbreviation or number.
///
/// # Errors
///
/// Returns a message naming the rejected input.
pub fn parse_month(input: &str) -> Result<Month, String> {
    let trimmed = input.trim();
    if let Ok(number) = trimmed.parse::<u8>() {
        return Month::try_from(number).map_err(|_| format!("month number out of range: {trimmed}"));
    }
    trimmed
        .parse::<Month>()
        .map_err(|_| format!("unknown month: {trimmed}"))
}

fn step(next: bool, previous: bool) -> Option<Step> {
    match (next, previous) {
        (true, _) => Some(Step::Next),
        (false, true) => Some(Step::Previous),
        (false, false) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_month() {
        assert_eq!(parse_month("August"), Ok(Month::August));
        assert_eq!(parse_month("aug"), Ok(Month::August));
        assert_eq!(parse_month("8"), Ok(Month::August));
        assert!(parse_month("0").is_err());
        assert!(parse_month("Smarch").is_err());
    }

    #[test]
    fn test_step() {
        assert_eq!(step(false, false), None);
        assert_eq!(step(true, false), Some(Step::Next));
        assert_eq!(step(false, true), Some(Step::Previous));
    }
}
