//! Shared domain types for Popple.
//!
//! This crate contains the domain types used across the Popple workspace:
//! karma entities, leaderboard entries, per-server configuration, and their
//! associated error types.
//!
//! Zero infrastructure dependencies -- only serde and thiserror.

pub mod config;
pub mod entity;
pub mod error;
