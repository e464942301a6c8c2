// regsub/src/main.rs
//! regsub entry point.

use clap::Parser;
use log::LevelFilter;

use regsub::cli::Cli;
use regsub::commands::{self, EXIT_FAILURE, error_msg, exit_code};
use regsub::logger;
use regsub::ui::theme::{build_theme_map, default_theme_map};

fn main() {
    let cli = Cli::parse();

    let level = if cli.debug {
        Some(LevelFilter::Debug)
    } else if cli.quiet {
        Some(LevelFilter::Off)
    } else {
        None
    };
    logger::init_logger(level);

    let theme = match build_theme_map(cli.theme.as_deref()) {
        Ok(theme) => theme,
        Err(e) => {
            error_msg(format!("{e:#}"), &default_theme_map());
            std::process::exit(EXIT_FAILURE);
        }
    };

    if let Err(e) = commands::run(cli, &theme) {
        error_msg(format!("{e:#}"), &theme);
        std::process::exit(exit_code(&e));
    }
}
