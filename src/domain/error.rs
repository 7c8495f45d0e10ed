//! Error types for the keyhints engine.
//!
//! This module defines the centralized error type [`HintsError`] and a type alias
//! [`Result`] for convenient error handling throughout the crate. All errors are
//! implemented using the `thiserror` crate for automatic `Error` trait implementation.
//!
//! Most failures in this crate are deliberately non-fatal: delivery failures at the
//! message boundary and dispatch failures on resolved targets are caught where they
//! occur, logged at debug level, and swallowed. The variants here exist for the
//! places where a caller can meaningfully react: configuration loading and surface
//! access.

use thiserror::Error;

/// The main error type for keyhints operations.
///
/// This enum consolidates the error conditions that can occur while building
/// working sets, dispatching actions, and loading configuration. Variants that
/// wrap external errors use `#[from]` for automatic conversion.
#[derive(Debug, Error)]
pub enum HintsError {
    /// Surface query or effect failed.
    ///
    /// Occurs when the surface cannot enumerate elements or when a click/focus
    /// effect is attempted on a target the surface no longer knows about (for
    /// example, an element detached between labeling and resolution).
    #[error("Surface error: {0}")]
    Surface(String),

    /// Action dispatch on a resolved target failed.
    ///
    /// Callers at the session boundary catch and log this; a failed dispatch
    /// never prevents session teardown.
    #[error("Dispatch error: {0}")]
    Dispatch(String),

    /// Message delivery across the orchestration boundary failed.
    ///
    /// The sending side treats this as transient: logged at debug level and
    /// dropped, since the receiving side is allowed to be absent.
    #[error("Delivery error: {0}")]
    Delivery(String),

    /// Configuration is invalid or missing.
    ///
    /// Occurs when a configuration file cannot be parsed or a required value
    /// is malformed. The string describes the specific problem.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Filesystem or I/O operation failed.
    ///
    /// Wraps errors from standard library I/O operations (configuration file
    /// reads). Automatically converts from `std::io::Error`.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// A specialized `Result` type for keyhints operations.
///
/// This is a type alias for `std::result::Result<T, HintsError>` that simplifies
/// function signatures throughout the codebase.
pub type Result<T> = std::result::Result<T, HintsError>;
