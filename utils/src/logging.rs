//! Structured logging initialization via `tracing`.

use tracing_subscriber::EnvFilter;

/// Install the global subscriber, writing to stderr so stdout carries only command
/// output.
///
/// `RUST_LOG` wins when set; otherwise `default_directive` (e.g. `"warn"`) applies.
/// Calling this twice is harmless: the second subscriber is discarded.
pub fn init_tracing(default_directive: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repeated_init_does_not_panic() {
        init_tracing("debug");
        init_tracing("warn");
        tracing::debug!("still alive");
    }
}
