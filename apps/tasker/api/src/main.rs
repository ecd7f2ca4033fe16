use axum::Router;
use axum_helpers::{create_production_app, create_router, health_router};
use core_config::tracing::{init_tracing, install_color_eyre};
use tracing::info;

mod api;
mod config;
mod openapi;
mod state;

use config::Config;
use state::AppState;

const DEFAULT_LOG_DIRECTIVES: &str =
    "info,tasker_api=debug,domain_tasks=debug,tower_http=debug,sqlx=warn";

/// Full application router: API + docs + middleware, then `/health` and `/ready`.
fn build_app(state: &AppState) -> Router {
    let router = create_router::<openapi::ApiDoc>(
        api::routes(state),
        &state.config.cors,
        state.config.environment,
    );

    router
        .merge(health_router(state.config.app))
        .merge(api::ready_router(state.clone()))
}

#[tokio::main]
async fn main() -> eyre::Result<()> {
    // Install color-eyre first for colored error output (before any fallible operations)
    install_color_eyre();

    // Load configuration from environment variables
    let config = Config::from_env()?;

    // Initialize tracing with ErrorLayer for span trace capture
    init_tracing(&config.environment, DEFAULT_LOG_DIRECTIVES);
    info!(environment = ?config.environment, "Starting {} v{}", config.app.name, config.app.version);

    let db = database::postgres::connect_from_config_with_retry(config.database.clone(), None)
        .await
        .map_err(|e| eyre::eyre!("PostgreSQL connection failed: {}", e))?;

    if config.run_migrations {
        database::postgres::run_migrations::<migration::Migrator>(&db, config.app.name)
            .await
            .map_err(|e| eyre::eyre!("Migrations failed: {}", e))?;
    } else {
        info!("RUN_MIGRATIONS disabled, skipping migrations");
    }

    let state = AppState { config, db };
    let app = build_app(&state);

    // The cleanup future takes the pool; the server config stays borrowed here
    let AppState { config, db } = state;
    info!(
        "Starting tasker API with graceful shutdown ({:?} timeout)",
        config.server.shutdown_timeout
    );

    create_production_app(app, &config.server, async move {
        info!("Shutting down: closing database connections");
        match db.close().await {
            Ok(_) => info!("PostgreSQL connection closed successfully"),
            Err(e) => tracing::error!("Error closing PostgreSQL: {}", e),
        }
    })
    .await
    .map_err(|e| eyre::eyre!("Server error: {}", e))?;

    info!("Tasker API shutdown complete");
    Ok(())
}
