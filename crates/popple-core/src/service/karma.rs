//! Karma service.
//!
//! Mediates between the command layer and the persistence ports. Each public
//! operation is dispatched onto its own task and returns a [`Pending`]
//! immediately; the task performs its repository calls and writes exactly
//! one result. The service itself holds no state beyond its repository
//! handles.

use std::collections::HashSet;
use std::sync::Arc;

use popple_types::config::ServerConfig;
use popple_types::entity::{LeaderboardEntry, Levels};
use popple_types::error::{KarmaError, RepositoryError};
use tracing::{debug, warn};

use crate::repository::config::ConfigRepository;
use crate::repository::entity::EntityRepository;
use crate::service::pending::{Pending, dispatch};

/// Service orchestrating karma adjustments, lookups, leaderboards, and
/// per-server announce settings.
///
/// Generic over repository traits to maintain clean architecture --
/// popple-core never depends on popple-infra.
pub struct KarmaService<E: EntityRepository, C: ConfigRepository> {
    entities: Arc<E>,
    configs: Arc<C>,
}

impl<E: EntityRepository, C: ConfigRepository> Clone for KarmaService<E, C> {
    fn clone(&self) -> Self {
        Self {
            entities: Arc::clone(&self.entities),
            configs: Arc::clone(&self.configs),
        }
    }
}

impl<E, C> KarmaService<E, C>
where
    E: EntityRepository + 'static,
    C: ConfigRepository + 'static,
{
    /// Create a new KarmaService.
    ///
    /// - `entities`: persistence for karma entities
    /// - `configs`: persistence for per-server settings
    pub fn new(entities: E, configs: C) -> Self {
        Self {
            entities: Arc::new(entities),
            configs: Arc::new(configs),
        }
    }

    /// Access the entity repository.
    pub fn entities(&self) -> &E {
        &self.entities
    }

    /// Access the config repository.
    pub fn configs(&self) -> &C {
        &self.configs
    }

    /// Apply karma deltas to the named entities of a server.
    ///
    /// Zero deltas are skipped entirely. Every other name is created if
    /// needed (a failed create is ignored, the row may already exist) and
    /// then incremented atomically. The first failed increment aborts the
    /// remaining names; increments already applied are kept.
    ///
    /// Resolves to the new totals of the names that had non-zero deltas.
    pub fn add_karma_to_entities(
        &self,
        server_id: impl Into<String>,
        levels: Levels,
    ) -> Pending<Levels> {
        let entities = Arc::clone(&self.entities);
        let server_id = server_id.into();
        debug!(%server_id, count = levels.len(), "dispatching karma adjustment");

        dispatch("add_karma_to_entities", async move {
            let mut updated = Levels::with_capacity(levels.len());
            for (name, delta) in levels {
                if delta == 0 {
                    continue;
                }

                if let Err(e) = entities.create_entity(&server_id, &name).await {
                    debug!(%server_id, %name, error = %e, "create_entity failed, continuing");
                }

                let entity = entities
                    .add_karma(&server_id, &name, delta)
                    .await
                    .inspect_err(|e| {
                        warn!(%server_id, %name, delta, error = %e, "karma adjustment aborted");
                    })?;

                updated.insert(name, entity.karma);
            }
            Ok::<_, KarmaError>(updated)
        })
    }

    /// Fetch a server's configuration.
    ///
    /// A server that never had its config written resolves to
    /// `KarmaError::Storage(RepositoryError::NotFound)`; defaulting is left
    /// to the caller.
    pub fn get_config(&self, server_id: impl Into<String>) -> Pending<ServerConfig> {
        let configs = Arc::clone(&self.configs);
        let server_id = server_id.into();
        debug!(%server_id, "dispatching config lookup");

        dispatch("get_config", async move {
            configs
                .get_config(&server_id)
                .await
                .map_err(KarmaError::from)
        })
    }

    /// Look up the karma of each distinct name.
    ///
    /// Names that were never created read as 0. Any other storage failure
    /// fails the whole lookup.
    pub fn get_levels<I, N>(&self, server_id: impl Into<String>, names: I) -> Pending<Levels>
    where
        I: IntoIterator<Item = N>,
        N: Into<String>,
    {
        let entities = Arc::clone(&self.entities);
        let server_id = server_id.into();
        let names: HashSet<String> = names.into_iter().map(Into::into).collect();
        debug!(%server_id, count = names.len(), "dispatching level lookup");

        dispatch("get_levels", async move {
            let mut levels = Levels::with_capacity(names.len());
            for name in names {
                let karma = match entities.get_entity(&server_id, &name).await {
                    Ok(entity) => entity.karma,
                    Err(RepositoryError::NotFound) => 0,
                    Err(e) => {
                        warn!(%server_id, %name, error = %e, "level lookup aborted");
                        return Err(e.into());
                    }
                };
                levels.insert(name, karma);
            }
            Ok::<_, KarmaError>(levels)
        })
    }

    /// Rank a server's entities.
    ///
    /// `top` selects the highest-karma entities, otherwise the lowest. The
    /// repository owns ordering and tie-breaks; entries keep its order.
    pub fn get_leaderboard(
        &self,
        server_id: impl Into<String>,
        top: bool,
        limit: u32,
    ) -> Pending<Vec<LeaderboardEntry>> {
        let entities = Arc::clone(&self.entities);
        let server_id = server_id.into();
        debug!(%server_id, top, limit, "dispatching leaderboard lookup");

        dispatch("get_leaderboard", async move {
            let ranked = if top {
                entities.top_entities(&server_id, limit).await?
            } else {
                entities.bottom_entities(&server_id, limit).await?
            };
            Ok::<_, KarmaError>(ranked.into_iter().map(LeaderboardEntry::from).collect())
        })
    }

    /// Turn karma announcements on or off for a server.
    ///
    /// Creates the config row if needed (a failed create is ignored) and
    /// then writes `no_announce = !on`.
    pub fn set_announce(&self, server_id: impl Into<String>, on: bool) -> Pending<()> {
        let configs = Arc::clone(&self.configs);
        let server_id = server_id.into();
        debug!(%server_id, on, "dispatching announce update");

        dispatch("set_announce", async move {
            if let Err(e) = configs.create_config(&server_id).await {
                debug!(%server_id, error = %e, "create_config failed, continuing");
            }
            let config = ServerConfig {
                server_id,
                no_announce: !on,
            };
            configs.put_config(&config).await.map_err(KarmaError::from)
        })
    }
}
