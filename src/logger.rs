//! Logging setup.

use env_logger::{Builder, Env, Target};

/// Initialize the logging library.
///
/// Honors `RUST_LOG`, defaulting to `info`. Fails if a logger is already set.
pub fn init() -> crate::Result<()> {
    Ok(Builder::from_env(Env::default().default_filter_or("info"))
        .target(Target::Stdout)
        .try_init()?)
}
