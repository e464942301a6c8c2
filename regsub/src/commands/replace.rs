//! Runners for the table subcommands: add, edit, remove, list, apply, check.
//!
//! Mutating runners hold the table lock from load to persist so that two
//! concurrent invocations cannot both pass the similarity check.

use anyhow::{Context, Result};
use is_terminal::IsTerminal;
use log::info;
use std::io::{self, Read, Write};

use regsub_core::{ReplacementTable, TableLock};

use super::{Session, info_msg, warn_msg};
use crate::ui::output_format;
use crate::ui::theme::ThemeMap;

fn print_ok(theme: &ThemeMap) -> Result<()> {
    let stdout = io::stdout();
    let supports_color = stdout.is_terminal();
    output_format::print_success_message(&mut stdout.lock(), "OK", theme, supports_color)?;
    Ok(())
}

pub fn run_add(session: &Session, command: &str, theme: &ThemeMap) -> Result<()> {
    let user = session.user()?;
    let _lock = TableLock::acquire(&session.table_path)?;
    let mut manager = session.open_manager()?;

    let cmd = manager.add(command, user)?;
    if cmd.global_flag {
        warn_msg("The trailing 'g' flag is ignored; rules always replace every match.", theme);
    }
    print_ok(theme)
}

pub fn run_edit(session: &Session, command: &str, theme: &ThemeMap) -> Result<()> {
    let user = session.user()?;
    let _lock = TableLock::acquire(&session.table_path)?;
    let mut manager = session.open_manager()?;

    manager.edit(command, user)?;
    print_ok(theme)
}

pub fn run_remove(session: &Session, pattern: &str, theme: &ThemeMap) -> Result<()> {
    let user = session.user()?;
    let _lock = TableLock::acquire(&session.table_path)?;
    let mut manager = session.open_manager()?;

    let (key, entry) = manager.remove(pattern, user)?;
    if !session.quiet {
        info_msg(format!("Removed \"{}\" -> \"{}\"", key, entry.text), theme);
    }
    print_ok(theme)
}

pub fn run_list(session: &Session, json: bool, theme: &ThemeMap) -> Result<()> {
    let manager = session.open_manager()?;
    let stdout = io::stdout();
    let mut out = stdout.lock();

    if json {
        writeln!(out, "{}", manager.table().to_json()?)?;
        return Ok(());
    }

    let entries = manager.list();
    if entries.is_empty() {
        if !session.quiet {
            info_msg("No replacements stored.", theme);
        }
        return Ok(());
    }
    output_format::print_listing(&mut out, &entries, theme, stdout.is_terminal())?;
    Ok(())
}

/// Rewrites `text`, or stdin when no text is given. Stdin output keeps the
/// input's own line endings.
pub fn run_apply(session: &Session, text: Option<String>, _theme: &ThemeMap) -> Result<()> {
    let manager = session.open_manager()?;
    let stdout = io::stdout();
    let mut out = stdout.lock();

    match text {
        Some(text) => writeln!(out, "{}", manager.apply(&text)?)?,
        None => {
            let mut input = String::new();
            io::stdin()
                .read_to_string(&mut input)
                .context("Failed to read text from stdin")?;
            info!("Applying {} rules to {} bytes of stdin.", manager.table().len(), input.len());
            write!(out, "{}", manager.apply(&input)?)?;
        }
    }
    out.flush()?;
    Ok(())
}

pub fn run_check(session: &Session, pattern: &str, json: bool, theme: &ThemeMap) -> Result<()> {
    let manager = session.open_manager()?;
    let report = manager.check(pattern);
    let stdout = io::stdout();
    let mut out = stdout.lock();

    if json {
        writeln!(out, "{}", serde_json::to_string_pretty(&report)?)?;
    } else {
        output_format::print_report(&mut out, &report, theme, stdout.is_terminal())?;
    }
    Ok(())
}
