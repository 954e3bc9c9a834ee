pub mod authorization;
pub mod commands;
pub mod config;
pub mod core_state;
pub mod dashboard;
pub mod filter;
pub mod fixtures;
pub mod models;
pub mod session;
pub mod store;
pub mod validation;

use std::sync::Arc;
use tracing_subscriber::EnvFilter;

/// Install the global `tracing` subscriber.
///
/// `RUST_LOG` wins; otherwise [`config::default_log_filter`]. Safe to call
/// more than once: later calls are no-ops.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config::default_log_filter())),
        )
        .try_init();
}

/// Start the administration core: logging plus a seeded, signed-out state.
pub fn run() -> Arc<core_state::CoreState> {
    init_tracing();
    tracing::info!("{} starting v{}", config::APP_NAME, config::APP_VERSION);
    Arc::new(core_state::CoreState::new())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn run_starts_signed_out() {
        let state = run();
        assert!(state.is_locked());
        init_tracing();
    }
}
