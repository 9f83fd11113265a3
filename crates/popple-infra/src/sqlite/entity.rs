//! SQLite entity repository implementation.
//!
//! Implements `EntityRepository` from `popple-core` using sqlx with split read/write pools.

use chrono::Utc;
use popple_core::repository::entity::EntityRepository;
use popple_types::entity::Entity;
use popple_types::error::RepositoryError;
use sqlx::Row;

use super::pool::DatabasePool;
use super::{format_datetime, map_sqlx_error};

/// SQLite-backed implementation of `EntityRepository`.
pub struct SqliteEntityRepository {
    pool: DatabasePool,
}

impl SqliteEntityRepository {
    /// Create a new repository backed by the given database pool.
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }

    async fn ranked(
        &self,
        server_id: &str,
        limit: u32,
        query: &'static str,
    ) -> Result<Vec<Entity>, RepositoryError> {
        let rows = sqlx::query(query)
            .bind(server_id)
            .bind(i64::from(limit))
            .fetch_all(&self.pool.reader)
            .await
            .map_err(map_sqlx_error)?;

        rows.iter()
            .map(|row| entity_from_row(row).map_err(map_sqlx_error))
            .collect()
    }
}

fn entity_from_row(row: &sqlx::sqlite::SqliteRow) -> Result<Entity, sqlx::Error> {
    Ok(Entity {
        server_id: row.try_get("server_id")?,
        name: row.try_get("name")?,
        karma: row.try_get("karma")?,
    })
}

// Ties rank alphabetically so the order is stable across calls.
const TOP_QUERY: &str = "SELECT server_id, name, karma FROM entities
     WHERE server_id = ? ORDER BY karma DESC, name ASC LIMIT ?";

const BOTTOM_QUERY: &str = "SELECT server_id, name, karma FROM entities
     WHERE server_id = ? ORDER BY karma ASC, name ASC LIMIT ?";

impl EntityRepository for SqliteEntityRepository {
    async fn create_entity(&self, server_id: &str, name: &str) -> Result<(), RepositoryError> {
        let now = format_datetime(&Utc::now());

        sqlx::query(
            "INSERT INTO entities (server_id, name, karma, created_at, updated_at)
             VALUES (?, ?, 0, ?, ?)",
        )
        .bind(server_id)
        .bind(name)
        .bind(&now)
        .bind(&now)
        .execute(&self.pool.writer)
        .await
        .map_err(map_sqlx_error)?;

        Ok(())
    }

    async fn add_karma(
        &self,
        server_id: &str,
        name: &str,
        delta: i64,
    ) -> Result<Entity, RepositoryError> {
        // Single statement: the increment is atomic even across connections.
        let row = sqlx::query(
            "UPDATE entities SET karma = karma + ?, updated_at = ?
             WHERE server_id = ? AND name = ?
             RETURNING server_id, name, karma",
        )
        .bind(delta)
        .bind(format_datetime(&Utc::now()))
        .bind(server_id)
        .bind(name)
        .fetch_optional(&self.pool.writer)
        .await
        .map_err(map_sqlx_error)?
        .ok_or(RepositoryError::NotFound)?;

        entity_from_row(&row).map_err(map_sqlx_error)
    }

    async fn get_entity(&self, server_id: &str, name: &str) -> Result<Entity, RepositoryError> {
        let row = sqlx::query(
            "SELECT server_id, name, karma FROM entities WHERE server_id = ? AND name = ?",
        )
        .bind(server_id)
        .bind(name)
        .fetch_optional(&self.pool.reader)
        .await
        .map_err(map_sqlx_error)?
        .ok_or(RepositoryError::NotFound)?;

        entity_from_row(&row).map_err(map_sqlx_error)
    }

    async fn top_entities(
        &self,
        server_id: &str,
        limit: u32,
    ) -> Result<Vec<Entity>, RepositoryError> {
        self.ranked(server_id, limit, TOP_QUERY).await
    }

    async fn bottom_entities(
        &self,
        server_id: &str,
        limit: u32,
    ) -> Result<Vec<Entity>, RepositoryError> {
        self.ranked(server_id, limit, BOTTOM_QUERY).await
    }
}
