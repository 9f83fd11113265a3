//! Karma entities and leaderboard projections.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Mapping from entity name to a karma value (a delta on input, a total on output).
///
/// The server ID is supplied once per call rather than per key.
pub type Levels = HashMap<String, i64>;

/// A named subject within a server that accumulates karma.
///
/// Identified by `(server_id, name)`. Rows are created lazily on the first
/// non-zero karma adjustment and never by lookups.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entity {
    /// Server (guild/community) the entity belongs to.
    pub server_id: String,
    /// Entity name, unique within the server.
    pub name: String,
    /// Current karma total.
    pub karma: i64,
}

impl Entity {
    /// Create an entity with zero karma.
    pub fn new(server_id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            server_id: server_id.into(),
            name: name.into(),
            karma: 0,
        }
    }
}

/// One row of a leaderboard: a transient `{name, karma}` projection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    pub name: String,
    pub karma: i64,
}

impl From<Entity> for LeaderboardEntry {
    fn from(entity: Entity) -> Self {
        Self {
            name: entity.name,
            karma: entity.karma,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_entity_starts_at_zero() {
        let entity = Entity::new("guild-1", "rust");
        assert_eq!(entity.server_id, "guild-1");
        assert_eq!(entity.name, "rust");
        assert_eq!(entity.karma, 0);
    }

    #[test]
    fn test_leaderboard_entry_drops_server_id() {
        let entity = Entity {
            server_id: "guild-1".to_string(),
            name: "ferris".to_string(),
            karma: -4,
        };
        let entry = LeaderboardEntry::from(entity);
        assert_eq!(entry.name, "ferris");
        assert_eq!(entry.karma, -4);

        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json, serde_json::json!({"name": "ferris", "karma": -4}));
    }
}
