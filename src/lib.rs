//! Keyhints: a keyboard hint-selection engine for visual surfaces.
//!
//! Keyhints lets a user select any interactive element using only the
//! keyboard: it enumerates the clickable elements on a surface, overlays a
//! short alphabetic label ("hint") on each, narrows the candidate set as
//! keystrokes arrive, and triggers the matching element's default action the
//! moment exactly one candidate remains.
//!
//! # Architecture
//!
//! The crate follows a layered architecture pattern:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │  Orchestration layer (external)                     │  ← shortcuts, idle
//! │  shortcut bindings · idle detection · tab creation  │    detection, tabs
//! └─────────────────────────────────────────────────────┘
//!            │ InboundCommand            ▲ OutboundEvent
//! ┌─────────────────────────────────────────────────────┐
//! │  Runtime Layer (runtime/)                           │  ← command routing
//! │  - Action execution                                 │  ← precompute slot
//! │  - Debounce scheduling                              │
//! └─────────────────────────────────────────────────────┘
//!         │                    │                    │
//! ┌───────────────┐   ┌───────────────┐   ┌───────────────┐
//! │ Engine Layer  │   │ Index Layer   │   │ Dispatch      │
//! │ (engine/)     │   │ (index/)      │   │ (dispatch/)   │
//! │ - Sessions    │   │ - Enumeration │   │ - Focus/click │
//! │ - Key machine │   │ - Labels      │   │ - Tab opening │
//! │ - Filtering   │   │ - Cache       │   │               │
//! └───────────────┘   └───────────────┘   └───────────────┘
//!         │                    │                    │
//! ┌─────────────────────────────────────────────────────┐
//! │  Surface & Domain Layers                            │
//! │  - Surface trait + visibility (surface/)            │
//! │  - Candidate model, errors (domain/)                │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! # Modules
//!
//! - [`engine`]: the hint-matching state machine (sessions, key handling)
//! - [`index`]: candidate enumeration, label generation, precompute cache
//! - [`surface`]: the surface seam and the visibility predicate
//! - [`dispatch`]: default-action dispatch for resolved candidates
//! - [`runtime`]: command routing, scheduling, and the boundary protocol
//! - [`overlay`]: overlay view-model projection
//! - [`domain`]: core types and errors
//! - [`infrastructure`]: wall-clock source
//! - [`observability`]: tracing subscriber setup
//!
//! # Activation Cycle
//!
//! 1. The orchestration layer sends `ActivateHints` with an activation mode.
//! 2. The candidate index builds the labeled working set (from the precompute
//!    cache when fresh, else a fresh enumeration).
//! 3. Keystrokes narrow the set: label-prefix matching by default, free-text
//!    substring matching once a character arrives with shift held.
//! 4. When one candidate remains, dispatch performs its default action
//!    (focus for text entry, an outbound open-tab request for navigable links
//!    under the open-in-tab modes, a plain click otherwise) and the session
//!    tears down either way.
//!
//! # Example
//!
//! ```rust
//! use keyhints::engine::{ActivationMode, KeyPress};
//! use keyhints::overlay::NullOverlayHost;
//! use keyhints::runtime::{HintRuntime, InboundCommand, RecordingSink};
//! use keyhints::surface::scripted::ScriptedSurface;
//! use keyhints::Config;
//! use kurbo::Rect;
//!
//! let mut surface = ScriptedSurface::new(Rect::new(0.0, 0.0, 1280.0, 720.0));
//! surface.push_link("Home", Some("https://example.com/"));
//! surface.push_link("Docs", Some("https://example.com/docs"));
//!
//! let mut runtime = HintRuntime::new(
//!     &Config::default(),
//!     surface,
//!     RecordingSink::default(),
//!     NullOverlayHost,
//! );
//!
//! // Activate, then select the second hint ("B").
//! runtime.handle_command(
//!     &InboundCommand::ActivateHints { mode: ActivationMode::Normal },
//!     0,
//! );
//! runtime.key_pressed(&KeyPress::char('B'), 10);
//! assert!(!runtime.is_active());
//! ```

pub mod dispatch;
pub mod domain;
pub mod engine;
pub mod index;
pub mod infrastructure;
pub mod observability;
pub mod overlay;
pub mod runtime;
pub mod surface;

pub use domain::{Candidate, HintsError, Result, TargetId, TargetKind, WorkingSet};
pub use engine::{ActivationMode, HintEngine, KeyCode, KeyPress, MatchMode};
pub use runtime::{HintRuntime, InboundCommand, OutboundEvent};

/// Geometry re-export, so embedders and doctests share the crate's `Rect`.
pub use kurbo;

use std::collections::BTreeMap;

use serde::Deserialize;

/// Default cache freshness window in milliseconds.
const DEFAULT_CACHE_EXPIRY_MS: u64 = 5000;

/// Default quiet period after a surface-mutation burst in milliseconds.
const DEFAULT_MUTATION_DEBOUNCE_MS: u64 = 1000;

/// Default post-resolution settle delay in milliseconds.
const DEFAULT_SETTLE_DELAY_MS: u64 = 500;

/// Engine-side configuration.
///
/// All values have sensible defaults; embedders usually only override the
/// trace level. Timings are reference values from the observed system and
/// only affect latency, never correctness.
#[derive(Debug, Clone)]
pub struct Config {
    /// How long a precomputed enumeration stays fresh, in milliseconds.
    ///
    /// An activation inside this window consumes the cache instead of
    /// re-enumerating. Default: 5000.
    pub cache_expiry_ms: u64,

    /// Quiet period after a surface-mutation burst before the precompute
    /// fires, in milliseconds. Default: 1000.
    pub mutation_debounce_ms: u64,

    /// Delay after a resolution before the next precompute, letting the
    /// surface settle from the triggered action, in milliseconds.
    /// Default: 500.
    pub settle_delay_ms: u64,

    /// Tracing filter level.
    ///
    /// Options: `trace`, `debug`, `info`, `warn`, `error`. Default: `"info"`.
    pub trace_level: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            cache_expiry_ms: DEFAULT_CACHE_EXPIRY_MS,
            mutation_debounce_ms: DEFAULT_MUTATION_DEBOUNCE_MS,
            settle_delay_ms: DEFAULT_SETTLE_DELAY_MS,
            trace_level: None,
        }
    }
}

/// TOML shape of the configuration file. Every key is optional.
#[derive(Debug, Deserialize)]
struct RawConfig {
    cache_expiry_ms: Option<u64>,
    mutation_debounce_ms: Option<u64>,
    settle_delay_ms: Option<u64>,
    trace_level: Option<String>,
}

impl Config {
    /// Parses configuration from a string map.
    ///
    /// Orchestration layers commonly hand over configuration as flat string
    /// pairs; this extracts typed values with per-key fallback to defaults.
    /// A malformed value falls back rather than failing the load.
    ///
    /// # Example
    ///
    /// ```rust
    /// use std::collections::BTreeMap;
    /// use keyhints::Config;
    ///
    /// let mut map = BTreeMap::new();
    /// map.insert("cache_expiry_ms".to_string(), "8000".to_string());
    /// map.insert("trace_level".to_string(), "debug".to_string());
    ///
    /// let config = Config::from_map(&map);
    /// assert_eq!(config.cache_expiry_ms, 8000);
    /// assert_eq!(config.mutation_debounce_ms, 1000);
    /// ```
    #[must_use]
    pub fn from_map(map: &BTreeMap<String, String>) -> Self {
        let defaults = Self::default();

        let parse_ms = |key: &str, fallback: u64| {
            map.get(key)
                .and_then(|s| s.parse::<u64>().ok())
                .unwrap_or(fallback)
        };

        Self {
            cache_expiry_ms: parse_ms("cache_expiry_ms", defaults.cache_expiry_ms),
            mutation_debounce_ms: parse_ms("mutation_debounce_ms", defaults.mutation_debounce_ms),
            settle_delay_ms: parse_ms("settle_delay_ms", defaults.settle_delay_ms),
            trace_level: map.get("trace_level").cloned(),
        }
    }

    /// Loads configuration from a TOML file.
    ///
    /// Missing keys fall back to defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or does not parse as TOML.
    pub fn from_file(path: impl AsRef<std::path::Path>) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let raw: RawConfig =
            toml::from_str(&contents).map_err(|e| HintsError::Config(e.to_string()))?;

        let defaults = Self::default();
        Ok(Self {
            cache_expiry_ms: raw.cache_expiry_ms.unwrap_or(defaults.cache_expiry_ms),
            mutation_debounce_ms: raw
                .mutation_debounce_ms
                .unwrap_or(defaults.mutation_debounce_ms),
            settle_delay_ms: raw.settle_delay_ms.unwrap_or(defaults.settle_delay_ms),
            trace_level: raw.trace_level,
        })
    }
}

/// Initializes the engine side with configuration.
///
/// Installs the tracing subscriber (idempotent) and returns an idle
/// [`HintEngine`]. Embedders that want the full wiring (command routing,
/// scheduling, dispatch) construct a [`HintRuntime`] instead and call
/// [`observability::init_tracing`] themselves.
#[must_use]
pub fn initialize(config: &Config) -> HintEngine {
    observability::init_tracing(config);
    tracing::debug!(
        cache_expiry_ms = config.cache_expiry_ms,
        mutation_debounce_ms = config.mutation_debounce_ms,
        settle_delay_ms = config.settle_delay_ms,
        "initializing keyhints engine"
    );
    HintEngine::new(config.settle_delay_ms)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn map_parsing_falls_back_per_key() {
        let mut map = BTreeMap::new();
        map.insert("cache_expiry_ms".to_string(), "not a number".to_string());
        map.insert("settle_delay_ms".to_string(), "250".to_string());

        let config = Config::from_map(&map);
        assert_eq!(config.cache_expiry_ms, 5000);
        assert_eq!(config.settle_delay_ms, 250);
        assert_eq!(config.trace_level, None);
    }

    #[test]
    fn file_parsing_merges_with_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "mutation_debounce_ms = 2000").unwrap();
        writeln!(file, "trace_level = \"debug\"").unwrap();

        let config = Config::from_file(file.path()).unwrap();
        assert_eq!(config.mutation_debounce_ms, 2000);
        assert_eq!(config.cache_expiry_ms, 5000);
        assert_eq!(config.trace_level.as_deref(), Some("debug"));
    }

    #[test]
    fn unparseable_file_is_a_config_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "cache_expiry_ms = [this is not toml]").unwrap();

        let err = Config::from_file(file.path()).unwrap_err();
        assert!(matches!(err, HintsError::Config(_)));
    }
}
