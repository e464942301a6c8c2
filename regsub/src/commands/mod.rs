//! Subcommand runners and the shared session they operate on.

pub mod replace;

use anyhow::{Context, Result};
use is_terminal::IsTerminal;
use log::debug;
use std::io;
use std::path::PathBuf;

use regsub_core::{JsonFileTable, RegsubConfig, RegsubError, ReplacementManager, StaticPermissions};

use crate::cli::{Cli, Commands};
use crate::ui::output_format;
use crate::ui::theme::ThemeMap;

/// Helper for printing info messages to stderr.
pub fn info_msg(msg: impl AsRef<str>, theme: &ThemeMap) {
    let stderr_supports_color = io::stderr().is_terminal();
    let _ = output_format::print_info_message(&mut io::stderr(), msg.as_ref(), theme, stderr_supports_color);
}

/// Helper for printing error messages to stderr.
pub fn error_msg(msg: impl AsRef<str>, theme: &ThemeMap) {
    let stderr_supports_color = io::stderr().is_terminal();
    let _ = output_format::print_error_message(&mut io::stderr(), msg.as_ref(), theme, stderr_supports_color);
}

/// Helper for printing warning messages to stderr.
pub fn warn_msg(msg: impl AsRef<str>, theme: &ThemeMap) {
    let stderr_supports_color = io::stderr().is_terminal();
    let _ = output_format::print_warn_message(&mut io::stderr(), msg.as_ref(), theme, stderr_supports_color);
}

/// Exit status when the table rejected the request.
pub const EXIT_REJECTED: i32 = 1;
/// Exit status for storage, configuration and environment failures.
pub const EXIT_FAILURE: i32 = 2;

/// Maps a failed run to its exit status.
pub fn exit_code(err: &anyhow::Error) -> i32 {
    match err.downcast_ref::<RegsubError>() {
        Some(e) if e.is_rejection() => EXIT_REJECTED,
        _ => EXIT_FAILURE,
    }
}

pub type FileManager = ReplacementManager<JsonFileTable, StaticPermissions>;

/// Everything a subcommand needs besides its own arguments.
#[derive(Debug)]
pub struct Session {
    pub config: RegsubConfig,
    pub table_path: PathBuf,
    pub user: Option<String>,
    pub quiet: bool,
}

impl Session {
    /// Resolves configuration, table location and user from the CLI and environment.
    ///
    /// The table path is taken from `--table`, then the config file, then the
    /// per-user default.
    pub fn from_cli(cli: &Cli) -> Result<Self> {
        let config = RegsubConfig::load_or_default(cli.config.as_deref())?;
        let table_path = match &cli.table {
            Some(path) => path.clone(),
            None => config.resolve_table_path()?,
        };
        let user = cli
            .user
            .clone()
            .or_else(|| std::env::var("USER").ok())
            .or_else(|| std::env::var("USERNAME").ok())
            .filter(|u| !u.trim().is_empty());

        debug!("Using table {} as user {:?}.", table_path.display(), user);
        Ok(Self { config, table_path, user, quiet: cli.quiet })
    }

    /// The acting user, required by commands that record or check ownership.
    pub fn user(&self) -> Result<&str> {
        self.user
            .as_deref()
            .context("Could not determine the current user; pass --user or set REGSUB_USER")
    }

    pub fn open_manager(&self) -> Result<FileManager> {
        let table = JsonFileTable::load(&self.table_path)
            .with_context(|| format!("Failed to load table {}", self.table_path.display()))?;
        Ok(ReplacementManager::with_policy(
            table,
            self.config.permissions(),
            self.config.policy(),
        ))
    }
}

/// Dispatches the parsed command line.
pub fn run(cli: Cli, theme: &ThemeMap) -> Result<()> {
    let session = Session::from_cli(&cli)?;
    match cli.command {
        Commands::Add { command } => replace::run_add(&session, &command, theme),
        Commands::Edit { command } => replace::run_edit(&session, &command, theme),
        Commands::Remove { pattern } => replace::run_remove(&session, &pattern, theme),
        Commands::List { json } => replace::run_list(&session, json, theme),
        Commands::Apply { text } => replace::run_apply(&session, text, theme),
        Commands::Check { pattern, json } => replace::run_check(&session, &pattern, json, theme),
    }
}
