//! Query a Spot database from the command line.
//!
//! # Overview
//!
//! `spotdb` reads a directory of survey run artifacts, pairs of `<prefix>-metadata.json` and
//! `<prefix>-report.json` files, and answers the same questions downstream reporting tools
//! ask of a Spot database. Answers are printed as JSON on stdout.
//!
//! # Usage
//!
//! **List runs:**
//! ```bash
//! spotdb runs /data/surveys
//! spotdb runs /data/surveys --since 2021-03-04T00:00:00Z
//! ```
//!
//! **Show the attribute schema:**
//! ```bash
//! spotdb schema /data/surveys            # global attributes
//! spotdb schema /data/surveys --metrics  # metric attributes
//! ```
//!
//! **Show attribute values:**
//! ```bash
//! spotdb globals /data/surveys lulesh_1614852000.0
//! spotdb profiles /data/surveys          # every run
//! spotdb channel /data/surveys timeseries
//! ```
//!
//! # Configuration
//!
//! A `spotdb.toml`, `spotdb.yml`, `spotdb.yaml` or `spotdb.json` file in the database
//! directory, or the file given with `--config`, controls aggregation:
//!
//! ```toml
//! statistic = "avg"
//! excluded_categories = ["AFFINITY", "app_data", "gpu_data"]
//! follow_links = true
//! ```
//!
//! `spotdb init` writes the defaults to a file; `spotdb validate <PATH>` checks one.
//!
//! # Diagnostics
//!
//! Candidates that could not be read as runs are counted on stderr. Use `--log-level info`
//! to list each one with its reason, or `--log-level debug` for a trace of the scan.

use clap::builder::Styles;
use clap::builder::styling::{AnsiColor, Effects};
use clap::{Parser, Subcommand};
use spotdb::Result;

mod commands;

use crate::commands::{
    ChannelArgs, DataArgs, InitArgs, RunsArgs, SchemaArgs, ValidateArgs, init_config, list_runs, show_channel, show_globals,
    show_profiles, show_schema, validate_config,
};

const CLAP_STYLES: Styles = Styles::styled()
    .header(AnsiColor::Green.on_default().effects(Effects::BOLD))
    .usage(AnsiColor::Green.on_default().effects(Effects::BOLD))
    .literal(AnsiColor::Cyan.on_default().effects(Effects::BOLD))
    .placeholder(AnsiColor::Cyan.on_default());

#[derive(Parser, Debug)]
#[command(name = "spotdb", version, about)]
#[command(styles = CLAP_STYLES)]
struct Cli {
    #[command(subcommand)]
    command: SpotSubcommand,
}

#[derive(Subcommand, Debug)]
enum SpotSubcommand {
    /// List run ids, optionally only those changed since a point in time
    Runs(RunsArgs),
    /// Show the names and types of all global or metric attributes
    Schema(SchemaArgs),
    /// Show the global attributes of runs
    Globals(DataArgs),
    /// Show the region profiles of runs
    Profiles(DataArgs),
    /// Show the records of a channel for runs
    Channel(ChannelArgs),
    /// Generate a default configuration file
    Init(InitArgs),
    /// Validate a configuration file
    Validate(ValidateArgs),
}

fn main() -> Result<()> {
    match &Cli::parse().command {
        SpotSubcommand::Runs(args) => list_runs(args),
        SpotSubcommand::Schema(args) => show_schema(args),
        SpotSubcommand::Globals(args) => show_globals(args),
        SpotSubcommand::Profiles(args) => show_profiles(args),
        SpotSubcommand::Channel(args) => show_channel(args),
        SpotSubcommand::Init(args) => init_config(args),
        SpotSubcommand::Validate(args) => validate_config(args),
    }
}
