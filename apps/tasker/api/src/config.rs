use axum_helpers::CorsConfig;
use core_config::{AppInfo, FromEnv, app_info, env_flag, server::ServerConfig};

// Import database configs from the database library
use database::postgres::PostgresConfig;

pub use core_config::Environment;

/// Application-specific configuration
/// Composes shared config components from the `config` library
#[derive(Clone, Debug)]
pub struct Config {
    pub app: AppInfo,
    pub environment: Environment,
    pub server: ServerConfig,
    pub database: PostgresConfig,
    pub cors: CorsConfig,
    /// Apply pending migrations before serving (`RUN_MIGRATIONS`, default true)
    pub run_migrations: bool,
}

impl Config {
    pub fn from_env() -> eyre::Result<Self> {
        let environment = Environment::from_env();
        let server = ServerConfig::from_env()?; // HOST=0.0.0.0, PORT=8080, SHUTDOWN_TIMEOUT_SECS=30
        let database = PostgresConfig::from_env()?; // Required - will fail if not set
        let cors = CorsConfig::from_env()?; // Required - will fail if not set
        let run_migrations = env_flag("RUN_MIGRATIONS", true)?;

        Ok(Self {
            app: app_info!(),
            environment,
            server,
            database,
            cors,
            run_migrations,
        })
    }
}
