//! Entity repository trait definition.

use popple_types::entity::Entity;
use popple_types::error::RepositoryError;

/// Repository trait for karma entity persistence.
///
/// Implementations live in popple-infra (e.g., SqliteEntityRepository).
/// Uses native async fn in traits (Rust 2024 edition, no async_trait macro).
pub trait EntityRepository: Send + Sync {
    /// Create an entity with zero karma.
    ///
    /// Returns `RepositoryError::Conflict` if it already exists; callers
    /// treat that as success.
    fn create_entity(
        &self,
        server_id: &str,
        name: &str,
    ) -> impl std::future::Future<Output = Result<(), RepositoryError>> + Send;

    /// Atomically add `delta` to the entity's karma and return the updated entity.
    ///
    /// Concurrent increments must not lose updates.
    fn add_karma(
        &self,
        server_id: &str,
        name: &str,
        delta: i64,
    ) -> impl std::future::Future<Output = Result<Entity, RepositoryError>> + Send;

    /// Get an entity. Returns `RepositoryError::NotFound` if it was never created.
    fn get_entity(
        &self,
        server_id: &str,
        name: &str,
    ) -> impl std::future::Future<Output = Result<Entity, RepositoryError>> + Send;

    /// The `limit` highest-karma entities of a server, best first.
    fn top_entities(
        &self,
        server_id: &str,
        limit: u32,
    ) -> impl std::future::Future<Output = Result<Vec<Entity>, RepositoryError>> + Send;

    /// The `limit` lowest-karma entities of a server, worst first.
    fn bottom_entities(
        &self,
        server_id: &str,
        limit: u32,
    ) -> impl std::future::Future<Output = Result<Vec<Entity>, RepositoryError>> + Send;
}
