//! Writes themed status messages and listings.
//!
//! Colour is applied only when the caller says the target supports it, so the
//! same functions serve terminals, pipes and tests.

use std::io::{self, Write};

use owo_colors::OwoColorize;
use regsub_core::{PatternReport, ReplacementEntry, format_listing};

use crate::ui::theme::{ThemeEntry, ThemeMap};

/// Renders `text` with the colour configured for `entry`.
pub fn paint(text: &str, entry: ThemeEntry, theme: &ThemeMap, supports_color: bool) -> String {
    match theme.get(&entry).and_then(|style| style.fg.as_ref()) {
        Some(color) if supports_color => text.color(color.to_ansi_color()).to_string(),
        _ => text.to_string(),
    }
}

fn print_prefixed<W: Write>(
    writer: &mut W,
    prefix: &str,
    message: &str,
    entry: ThemeEntry,
    theme: &ThemeMap,
    supports_color: bool,
) -> io::Result<()> {
    writeln!(writer, "{}", paint(&format!("{prefix}{message}"), entry, theme, supports_color))
}

pub fn print_success_message<W: Write>(
    writer: &mut W,
    message: &str,
    theme: &ThemeMap,
    supports_color: bool,
) -> io::Result<()> {
    print_prefixed(writer, "", message, ThemeEntry::Success, theme, supports_color)
}

pub fn print_info_message<W: Write>(
    writer: &mut W,
    message: &str,
    theme: &ThemeMap,
    supports_color: bool,
) -> io::Result<()> {
    print_prefixed(writer, "", message, ThemeEntry::Info, theme, supports_color)
}

pub fn print_warn_message<W: Write>(
    writer: &mut W,
    message: &str,
    theme: &ThemeMap,
    supports_color: bool,
) -> io::Result<()> {
    print_prefixed(writer, "Warning: ", message, ThemeEntry::Warn, theme, supports_color)
}

pub fn print_error_message<W: Write>(
    writer: &mut W,
    message: &str,
    theme: &ThemeMap,
    supports_color: bool,
) -> io::Result<()> {
    print_prefixed(writer, "Error: ", message, ThemeEntry::Error, theme, supports_color)
}

/// One `"pattern" -> "replacement"` line per entry.
pub fn print_listing<W: Write>(
    writer: &mut W,
    entries: &[(String, ReplacementEntry)],
    theme: &ThemeMap,
    supports_color: bool,
) -> io::Result<()> {
    if !supports_color {
        return writeln!(writer, "{}", format_listing(entries));
    }
    for (pattern, entry) in entries {
        writeln!(
            writer,
            "{} -> {}",
            paint(&format!("\"{pattern}\""), ThemeEntry::Pattern, theme, supports_color),
            paint(&format!("\"{}\"", entry.text), ThemeEntry::Replacement, theme, supports_color),
        )?;
    }
    Ok(())
}

pub fn print_report<W: Write>(
    writer: &mut W,
    report: &PatternReport,
    theme: &ThemeMap,
    supports_color: bool,
) -> io::Result<()> {
    let yes_no = |flag: bool| if flag { "yes" } else { "no" };

    writeln!(writer, "{}", paint(&format!("Pattern: {}", report.pattern), ThemeEntry::Header, theme, supports_color))?;
    writeln!(writer, "Skeleton: \"{}\"", report.skeleton)?;
    match &report.invalid {
        Some(err) => writeln!(writer, "Valid: {}", paint(&format!("no ({err})"), ThemeEntry::Error, theme, supports_color))?,
        None => writeln!(writer, "Valid: yes")?,
    }
    writeln!(writer, "Too broad: {}", yes_no(report.too_broad))?;
    writeln!(writer, "Already stored: {}", yes_no(report.exists))?;
    if report.similar_to.is_empty() {
        writeln!(writer, "Similar to: none")?;
    } else {
        writeln!(writer, "Similar to:")?;
        for key in &report.similar_to {
            writeln!(writer, "  {}", paint(&format!("\"{key}\""), ThemeEntry::Pattern, theme, supports_color))?;
        }
    }
    Ok(())
}
