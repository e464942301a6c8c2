//! Terminal presentation: colour theme and message formatting.

pub mod output_format;
pub mod theme;
