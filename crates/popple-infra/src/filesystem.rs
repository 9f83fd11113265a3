//! Data directory layout for Popple.

use std::path::{Path, PathBuf};

/// Resolve the data directory.
///
/// `POPPLE_DATA_DIR` wins; otherwise `~/.popple`, or `./.popple` when no
/// home directory can be determined.
pub fn resolve_data_dir() -> PathBuf {
    if let Ok(dir) = std::env::var("POPPLE_DATA_DIR") {
        return PathBuf::from(dir);
    }

    if let Some(home) = dirs::home_dir() {
        return home.join(".popple");
    }

    PathBuf::from(".popple")
}

/// SQLite URL for the database file inside `data_dir`, created on first open.
pub fn default_database_url(data_dir: &Path) -> String {
    format!("sqlite://{}?mode=rwc", data_dir.join("popple.db").display())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_database_url() {
        let url = default_database_url(Path::new("/data"));
        assert_eq!(url, "sqlite:///data/popple.db?mode=rwc");
    }

    #[test]
    fn test_resolve_data_dir_is_popple_scoped() {
        let dir = resolve_data_dir();
        if std::env::var("POPPLE_DATA_DIR").is_err() {
            assert!(dir.ends_with(".popple"));
        }
    }
}
