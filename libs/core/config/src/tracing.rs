use crate::Environment;
use tracing::{debug, info};
use tracing_subscriber::{EnvFilter, prelude::*};

/// Installs color-eyre with file:line locations and without the env section.
///
/// Call before anything fallible in `main`. Repeated calls are ignored.
pub fn install_color_eyre() {
    let _ = color_eyre::config::HookBuilder::default()
        .display_location_section(true)
        .display_env_section(false)
        .install();
}

/// Initializes the global subscriber for the given environment.
///
/// `RUST_LOG` wins when set; otherwise `default_directives` is used, e.g.
/// `"info,tasker_api=debug,tower_http=debug"`.
///
/// - Production: flattened JSON lines without targets, for log shipping.
/// - Development: pretty, multi-line output.
///
/// Both install [`tracing_error::ErrorLayer`] so eyre reports carry span traces.
/// A second call is a no-op, which keeps tests that share a process happy.
pub fn init_tracing(environment: &Environment, default_directives: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives));

    let result = if environment.is_production() {
        tracing_subscriber::registry()
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_target(false)
                    .flatten_event(true),
            )
            .with(tracing_error::ErrorLayer::default())
            .with(filter)
            .try_init()
    } else {
        tracing_subscriber::registry()
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(true)
                    .with_file(false)
                    .with_line_number(false)
                    .pretty(),
            )
            .with(tracing_error::ErrorLayer::default())
            .with(filter)
            .try_init()
    };

    match result {
        Ok(()) => info!(?environment, "Tracing initialized"),
        Err(_) => debug!("Tracing already initialized, skipping"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn init_is_idempotent() {
        init_tracing(&Environment::Development, "debug");
        init_tracing(&Environment::Production, "info");
    }

    #[test]
    fn rust_log_overrides_defaults() {
        temp_env::with_var("RUST_LOG", Some("warn"), || {
            init_tracing(&Environment::Production, "trace");
        });
    }
}
