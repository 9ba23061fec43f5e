//! Logging setup built on `tracing-subscriber`.
//!
//! Filter priority:
//!
//! 1. **`FRAMEPACE_LOG`** - a bare level (`debug`) applies to this crate only;
//!    anything with `=`, `:` or `,` is used as a full directive string
//! 2. **`RUST_LOG`** - standard tracing environment variable
//! 3. **Default** - `warn` globally, the caller's level for this crate

use std::env;
use tracing_subscriber::EnvFilter;

pub const ENV_VAR: &str = "FRAMEPACE_LOG";

/// Installs a stderr fmt subscriber. `default_level` applies to this crate
/// when neither environment variable is set.
///
/// Safe to call more than once; later calls return an error instead of
/// replacing the subscriber.
pub fn init(default_level: &str) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let directive = select_directive(
        env::var(ENV_VAR).ok().as_deref(),
        env::var("RUST_LOG").ok().as_deref(),
        default_level,
    );
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(directive))
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()?;
    Ok(())
}

/// Initialize logging for tests. Never fails, even if a subscriber is
/// already installed.
pub fn test() {
    let directive = select_directive(env::var(ENV_VAR).ok().as_deref(), None, "debug");
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(directive))
        .with_test_writer()
        .try_init();
}

fn select_directive(own: Option<&str>, rust_log: Option<&str>, default_level: &str) -> String {
    if let Some(own) = own {
        return expand_directive(own);
    }
    if let Some(rust_log) = rust_log {
        return rust_log.to_string();
    }
    expand_directive(default_level)
}

fn expand_directive(level: &str) -> String {
    if level.contains('=') || level.contains(':') || level.contains(',') {
        return level.to_string();
    }
    format!("warn,framepace={level}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_level_is_scoped_to_crate() {
        assert_eq!(expand_directive("debug"), "warn,framepace=debug");
    }

    #[test]
    fn directive_strings_pass_through() {
        assert_eq!(expand_directive("framepace=trace"), "framepace=trace");
        assert_eq!(expand_directive("info,framepace::tasks=debug"), "info,framepace::tasks=debug");
    }

    #[test]
    fn priority_order() {
        assert_eq!(
            select_directive(Some("trace"), Some("error"), "info"),
            "warn,framepace=trace"
        );
        assert_eq!(select_directive(None, Some("error"), "info"), "error");
        assert_eq!(select_directive(None, None, "info"), "warn,framepace=info");
    }

    #[test]
    fn test_init_is_idempotent() {
        test();
        test();
    }
}
