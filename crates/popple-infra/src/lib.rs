//! Infrastructure layer for Popple.
//!
//! Contains implementations of the repository traits defined in `popple-core`
//! (SQLite storage), plus the data-directory and `config.toml` helpers used
//! by the CLI.

pub mod config;
pub mod filesystem;
pub mod sqlite;
