//! Observability setup for Popple: structured logging plus optional
//! OpenTelemetry span export.

pub mod tracing_setup;
