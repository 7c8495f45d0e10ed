//! Observability support.
//!
//! Structured logging via `tracing`; the modules here only wire up the
//! subscriber. Emitting spans and events is done inline throughout the crate.

pub mod init;

pub use init::init_tracing;
