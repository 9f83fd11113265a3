//! SQLite server config repository implementation.

use chrono::Utc;
use popple_core::repository::config::ConfigRepository;
use popple_types::config::ServerConfig;
use popple_types::error::RepositoryError;
use sqlx::Row;

use super::pool::DatabasePool;
use super::{format_datetime, map_sqlx_error};

/// SQLite-backed implementation of `ConfigRepository`.
pub struct SqliteConfigRepository {
    pool: DatabasePool,
}

impl SqliteConfigRepository {
    /// Create a new repository backed by the given database pool.
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }
}

impl ConfigRepository for SqliteConfigRepository {
    async fn get_config(&self, server_id: &str) -> Result<ServerConfig, RepositoryError> {
        let row = sqlx::query("SELECT server_id, no_announce FROM server_configs WHERE server_id = ?")
            .bind(server_id)
            .fetch_optional(&self.pool.reader)
            .await
            .map_err(map_sqlx_error)?
            .ok_or(RepositoryError::NotFound)?;

        Ok(ServerConfig {
            server_id: row.try_get("server_id").map_err(map_sqlx_error)?,
            no_announce: row.try_get("no_announce").map_err(map_sqlx_error)?,
        })
    }

    async fn create_config(&self, server_id: &str) -> Result<(), RepositoryError> {
        let now = format_datetime(&Utc::now());

        sqlx::query(
            "INSERT INTO server_configs (server_id, no_announce, created_at, updated_at)
             VALUES (?, 0, ?, ?)",
        )
        .bind(server_id)
        .bind(&now)
        .bind(&now)
        .execute(&self.pool.writer)
        .await
        .map_err(map_sqlx_error)?;

        Ok(())
    }

    async fn put_config(&self, config: &ServerConfig) -> Result<(), RepositoryError> {
        let result = sqlx::query(
            "UPDATE server_configs SET no_announce = ?, updated_at = ? WHERE server_id = ?",
        )
        .bind(config.no_announce)
        .bind(format_datetime(&Utc::now()))
        .bind(&config.server_id)
        .execute(&self.pool.writer)
        .await
        .map_err(map_sqlx_error)?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }
}
