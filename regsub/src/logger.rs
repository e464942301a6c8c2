//! Logging setup for the `regsub` binary.

use env_logger::{Builder, Env, Target};
use log::LevelFilter;

/// Initialises `env_logger` on stderr.
///
/// `RUST_LOG` is honoured (default `warn`) unless `level_override` is given,
/// in which case it replaces the global level. Calling this twice is harmless.
pub fn init_logger(level_override: Option<LevelFilter>) {
    let mut builder = Builder::from_env(Env::default().default_filter_or("warn"));
    if let Some(level) = level_override {
        builder.filter_level(level);
    }
    builder
        .target(Target::Stderr)
        .format_timestamp(None)
        .try_init()
        .ok();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repeated_initialisation_does_not_panic() {
        init_logger(Some(LevelFilter::Off));
        init_logger(Some(LevelFilter::Debug));
        init_logger(None);
    }
}
