// regsub/src/cli.rs
//! Command-line interface definition for `regsub`.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Top-level CLI definition.
#[derive(Parser, Debug)]
#[command(
    name = "regsub",
    version = env!("CARGO_PKG_VERSION"),
    about = "Manage a shared table of regex replacement rules",
    long_about = "regsub stores `s/pattern/replacement/` rules in a JSON table, each owned by the user who added it. New rules are rejected when they do not compile, are too broad, or overlap a rule that is already stored. Stored rules can be applied to any text.",
    arg_required_else_help = true
)]
pub struct Cli {
    /// Path to the JSON replacement table.
    #[arg(long, value_name = "FILE", env = "REGSUB_TABLE", global = true)]
    pub table: Option<PathBuf>,

    /// Path to a YAML configuration file.
    #[arg(long, value_name = "FILE", env = "REGSUB_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// User id recorded as owner and checked for edit/remove (defaults to $USER).
    #[arg(long, value_name = "ID", env = "REGSUB_USER", global = true)]
    pub user: Option<String>,

    /// Path to a custom YAML theme file.
    #[arg(long, value_name = "FILE", global = true)]
    pub theme: Option<PathBuf>,

    /// Enable debug logging.
    #[arg(long, short = 'd', global = true)]
    pub debug: bool,

    /// Suppress informational messages and logging.
    #[arg(long, short = 'q', global = true, conflicts_with = "debug")]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Add a rule from a `s/pattern/replacement/` command.
    Add {
        /// e.g. `s/colou?r/hue/`; any single character may replace `/`.
        command: String,
    },

    /// Replace the text of an existing rule; you become its owner.
    Edit {
        command: String,
    },

    /// Remove a rule by its pattern.
    #[command(visible_alias = "rm")]
    Remove {
        /// The stored pattern, optionally wrapped in backticks.
        pattern: String,
    },

    /// List every rule in table order.
    #[command(visible_alias = "ls")]
    List {
        /// Print the raw table as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Run every rule over some text.
    Apply {
        /// Text to rewrite (reads stdin if omitted).
        text: Option<String>,
    },

    /// Report how a pattern fares against every admission check.
    Check {
        pattern: String,

        /// Print the report as JSON.
        #[arg(long)]
        json: bool,
    },
}
