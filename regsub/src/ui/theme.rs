//! Colour theme for regsub's terminal output.
//!
//! Each kind of message (success, error, a listed pattern, ...) maps to an
//! optional 16-colour ANSI foreground. A YAML theme file may override any
//! subset of the defaults.

use anyhow::{Context, Result};
use owo_colors::AnsiColors;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::path::Path;
use std::str::FromStr;

pub type ThemeMap = HashMap<ThemeEntry, ThemeStyle>;

/// The logical parts of the output that can be styled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ThemeEntry {
    Header,
    Success,
    Info,
    Warn,
    Error,
    /// A stored pattern key in listings and reports.
    Pattern,
    /// Replacement text in listings.
    Replacement,
}

impl ThemeEntry {
    pub const ALL: [ThemeEntry; 7] = [
        ThemeEntry::Header,
        ThemeEntry::Success,
        ThemeEntry::Info,
        ThemeEntry::Warn,
        ThemeEntry::Error,
        ThemeEntry::Pattern,
        ThemeEntry::Replacement,
    ];
}

/// A named ANSI colour such as "red" or "brightgreen".
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(try_from = "String", into = "String")]
pub struct ThemeColor(String);

#[derive(Debug, Clone)]
pub struct ParseThemeColorError(String);

impl fmt::Display for ParseThemeColorError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "Invalid theme color '{}'; expected one of: black, red, green, yellow, blue, \
            magenta, cyan, white, or their bright variants (e.g. brightred).",
            self.0
        )
    }
}

impl std::error::Error for ParseThemeColorError {}

impl FromStr for ThemeColor {
    type Err = ParseThemeColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.to_lowercase();
        let base = lower.strip_prefix("bright").unwrap_or(&lower);
        match base {
            "black" | "red" | "green" | "yellow" | "blue" | "magenta" | "cyan" | "white" => {
                Ok(ThemeColor(lower))
            }
            _ => Err(ParseThemeColorError(s.to_string())),
        }
    }
}

impl TryFrom<String> for ThemeColor {
    type Error = ParseThemeColorError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ThemeColor> for String {
    fn from(color: ThemeColor) -> Self {
        color.0
    }
}

impl ThemeColor {
    pub fn to_ansi_color(&self) -> AnsiColors {
        match self.0.as_str() {
            "black" => AnsiColors::Black,
            "red" => AnsiColors::Red,
            "green" => AnsiColors::Green,
            "yellow" => AnsiColors::Yellow,
            "blue" => AnsiColors::Blue,
            "magenta" => AnsiColors::Magenta,
            "cyan" => AnsiColors::Cyan,
            "brightblack" => AnsiColors::BrightBlack,
            "brightred" => AnsiColors::BrightRed,
            "brightgreen" => AnsiColors::BrightGreen,
            "brightyellow" => AnsiColors::BrightYellow,
            "brightblue" => AnsiColors::BrightBlue,
            "brightmagenta" => AnsiColors::BrightMagenta,
            "brightcyan" => AnsiColors::BrightCyan,
            "brightwhite" => AnsiColors::BrightWhite,
            _ => AnsiColors::White,
        }
    }

    fn named(name: &str) -> Self {
        ThemeColor(name.to_string())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct ThemeStyle {
    pub fg: Option<ThemeColor>,
}

/// Loads the theme at `theme_path`, or the defaults when no path is given.
pub fn build_theme_map(theme_path: Option<&Path>) -> Result<ThemeMap> {
    match theme_path {
        Some(path) => load_theme_file(path),
        None => Ok(default_theme_map()),
    }
}

/// Reads a YAML theme; entries it omits keep their default colour.
pub fn load_theme_file<P: AsRef<Path>>(path: P) -> Result<ThemeMap> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read theme file {}", path.display()))?;
    let custom: ThemeMap = serde_yaml::from_str(&text)
        .with_context(|| format!("Failed to parse theme file {}", path.display()))?;

    let mut theme = default_theme_map();
    theme.extend(custom);
    Ok(theme)
}

pub fn default_theme_map() -> ThemeMap {
    ThemeEntry::ALL
        .into_iter()
        .map(|entry| {
            let color = match entry {
                ThemeEntry::Header => "brightwhite",
                ThemeEntry::Success => "green",
                ThemeEntry::Info => "cyan",
                ThemeEntry::Warn => "yellow",
                ThemeEntry::Error => "red",
                ThemeEntry::Pattern => "brightblue",
                ThemeEntry::Replacement => "magenta",
            };
            (entry, ThemeStyle { fg: Some(ThemeColor::named(color)) })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn parse_named_colors() {
        assert!("red".parse::<ThemeColor>().is_ok());
        assert!("BrightGreen".parse::<ThemeColor>().is_ok());
        assert!("unknown".parse::<ThemeColor>().is_err());
        assert!("brightpurple".parse::<ThemeColor>().is_err());
    }

    #[test]
    fn to_ansi_color_roundtrip() {
        let tc: ThemeColor = "blue".parse().unwrap();
        assert_eq!(tc.to_ansi_color(), AnsiColors::Blue);
        let tc: ThemeColor = "brightmagenta".parse().unwrap();
        assert_eq!(tc.to_ansi_color(), AnsiColors::BrightMagenta);
    }

    #[test]
    fn default_theme_covers_every_entry() {
        let theme = default_theme_map();
        for entry in ThemeEntry::ALL {
            assert!(theme.get(&entry).and_then(|s| s.fg.as_ref()).is_some());
        }
    }

    #[test]
    fn theme_file_overrides_only_listed_entries() -> Result<()> {
        let mut file = NamedTempFile::new()?;
        file.write_all(b"error:\n  fg: brightred\n")?;
        let theme = build_theme_map(Some(file.path()))?;
        assert_eq!(
            theme[&ThemeEntry::Error].fg.as_ref().map(|c| c.to_ansi_color()),
            Some(AnsiColors::BrightRed)
        );
        assert_eq!(
            theme[&ThemeEntry::Success].fg.as_ref().map(|c| c.to_ansi_color()),
            Some(AnsiColors::Green)
        );
        Ok(())
    }

    #[test]
    fn theme_file_with_bad_color_is_rejected() -> Result<()> {
        let mut file = NamedTempFile::new()?;
        file.write_all(b"error:\n  fg: chartreuse\n")?;
        assert!(build_theme_map(Some(file.path())).is_err());
        Ok(())
    }
}
