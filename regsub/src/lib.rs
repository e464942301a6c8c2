// regsub/src/lib.rs
//! # regsub CLI
//!
//! Terminal front end for `regsub-core`: argument parsing, logging setup,
//! themed output and one runner per subcommand. The binary in `main.rs` is a
//! thin wrapper around [`commands::run`].

pub mod cli;
pub mod commands;
pub mod logger;
pub mod ui;
