use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Install the global fmt subscriber for the process.
///
/// `RUST_LOG` wins when set; otherwise `default_filter` applies
/// (e.g. `"sleuth_common=info,warn"`). Safe to call more than once:
/// later calls are no-ops, so library consumers and tests can both
/// call it freely.
pub fn init(default_filter: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    let _ = tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_is_idempotent() {
        init("info");
        init("debug");
        tracing::info!("logging initialized twice without panicking");
    }
}
