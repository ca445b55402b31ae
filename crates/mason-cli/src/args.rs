use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::cli::{GoalCommands, OptionCommands, RunArgs, SnapshotArgs};

/// Sequential construction scheduler for the browser game's build screen
///
/// Mason keeps an ordered build sequence of (building, target level) goals
/// per managed context and works through it one goal at a time: each tick
/// it reads a snapshot of the construction screen, retires the front goal
/// once reached, and otherwise emits the page actions that order the next
/// upgrade.
#[derive(Parser)]
#[command(version, about, name = "mason")]
pub struct Args {
    /// Path to the SQLite database file. Defaults to
    /// $XDG_DATA_HOME/mason/mason.db
    #[arg(long, global = true)]
    pub database_file: Option<PathBuf>,

    /// Managed context (e.g. a village) whose plan is used
    #[arg(long, global = true, default_value = mason_core::DEFAULT_CONTEXT)]
    pub context: String,

    /// Disable colored output and use plain text
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands for the Mason CLI
///
/// - `goal` and `option` edit the stored plan
/// - `buildings`, `tick` and `run` work against a page snapshot
#[derive(Subcommand)]
pub enum Commands {
    /// Edit the build sequence
    #[command(alias = "g")]
    Goal {
        #[command(subcommand)]
        command: GoalCommands,
    },
    /// Show or change the scheduler options
    #[command(name = "option", alias = "o")]
    Options {
        #[command(subcommand)]
        command: OptionCommands,
    },
    /// List upgradable buildings from a page snapshot
    #[command(alias = "b")]
    Buildings(SnapshotArgs),
    /// Run a single tick against a page snapshot
    #[command(alias = "t")]
    Tick(SnapshotArgs),
    /// Keep ticking against a page snapshot that is re-read every tick
    Run(RunArgs),
    /// List the contexts that have a stored plan
    Contexts,
}
