//! Karma business logic and repository trait definitions for Popple.
//!
//! This crate defines the "ports" (repository traits) that the infrastructure
//! layer implements, and the `KarmaService` that orchestrates them. It depends
//! only on `popple-types` -- never on `popple-infra` or any database crate.

pub mod repository;
pub mod service;
