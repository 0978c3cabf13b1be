//! Log output setup

use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter (e.g. `debug`, `evergreen_scene=trace`)
pub const LOG_ENV: &str = "EVERGREEN_LOG";

/// Install a formatted `tracing` subscriber at `info` unless `EVERGREEN_LOG`
/// says otherwise. Returns false if a subscriber was already installed.
pub fn init_tracing() -> bool {
    init_tracing_with_default("info")
}

/// Like [`init_tracing`] with a custom fallback filter
pub fn init_tracing_with_default(default_filter: &str) -> bool {
    let filter =
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default_filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init()
        .is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn second_init_is_harmless() {
        init_tracing_with_default("warn");
        assert!(!init_tracing());
    }
}
