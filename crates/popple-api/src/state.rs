//! Application state wiring the karma service to its SQLite repositories.
//!
//! `KarmaService` is generic over repository traits; AppState pins it to the
//! concrete infra implementations.

use std::path::PathBuf;

use anyhow::Context;
use popple_core::service::karma::KarmaService;
use popple_infra::config::{load_app_config, resolve_database_url};
use popple_infra::filesystem::resolve_data_dir;
use popple_infra::sqlite::entity::SqliteEntityRepository;
use popple_infra::sqlite::pool::DatabasePool;
use popple_infra::sqlite::server_config::SqliteConfigRepository;
use popple_types::config::AppConfig;

/// Concrete type alias for the service generics pinned to infra implementations.
pub type ConcreteKarmaService = KarmaService<SqliteEntityRepository, SqliteConfigRepository>;

/// Shared application state used by CLI commands.
#[derive(Clone)]
pub struct AppState {
    pub karma_service: ConcreteKarmaService,
    pub config: AppConfig,
    pub data_dir: PathBuf,
    pub database_url: String,
}

impl AppState {
    /// Resolve the data directory and load its `config.toml`.
    ///
    /// Runs before tracing is initialized, since the config decides whether
    /// OpenTelemetry export is enabled.
    pub async fn load_config() -> (PathBuf, AppConfig) {
        let data_dir = resolve_data_dir();
        let config = load_app_config(&data_dir).await;
        (data_dir, config)
    }

    /// Initialize the application state: connect to DB, wire the service.
    pub async fn init(
        data_dir: PathBuf,
        config: AppConfig,
        database_url: Option<&str>,
    ) -> anyhow::Result<Self> {
        // Ensure data directory exists
        tokio::fs::create_dir_all(&data_dir)
            .await
            .with_context(|| format!("failed to create {}", data_dir.display()))?;

        let database_url = resolve_database_url(&config, &data_dir, database_url);
        let db_pool = DatabasePool::new(&database_url)
            .await
            .with_context(|| format!("failed to open database {database_url}"))?;

        let karma_service = KarmaService::new(
            SqliteEntityRepository::new(db_pool.clone()),
            SqliteConfigRepository::new(db_pool),
        );

        tracing::debug!(data_dir = %data_dir.display(), %database_url, "application state ready");

        Ok(Self {
            karma_service,
            config,
            data_dir,
            database_url,
        })
    }
}
