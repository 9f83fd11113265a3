//! Server config repository trait definition.

use popple_types::config::ServerConfig;
use popple_types::error::RepositoryError;

/// Repository trait for per-server configuration.
pub trait ConfigRepository: Send + Sync {
    /// Get a server's config. Returns `RepositoryError::NotFound` if none was created.
    fn get_config(
        &self,
        server_id: &str,
    ) -> impl std::future::Future<Output = Result<ServerConfig, RepositoryError>> + Send;

    /// Create a default config row. `Conflict` if one exists.
    fn create_config(
        &self,
        server_id: &str,
    ) -> impl std::future::Future<Output = Result<(), RepositoryError>> + Send;

    /// Overwrite an existing config row.
    fn put_config(
        &self,
        config: &ServerConfig,
    ) -> impl std::future::Future<Output = Result<(), RepositoryError>> + Send;
}
