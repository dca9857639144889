//! Ecoreport: a reactive list controller for pollution reports.
//!
//! Ecoreport keeps a list of user-submitted pollution reports correct while
//! searches, reloads, favorite toggles and deletes resolve asynchronously:
//! - Debounced, distinct-until-changed search by title and category
//! - Last-request-wins list updates, stale results are discarded
//! - Per-report in-flight guards for favorite toggles and deletes
//! - Authentication check before favorites, confirmation before deletes
//! - Favorites page (remove one, clear all) and single-report detail view
//! - JSON file catalog served by a background worker thread
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │  Line shell (main.rs)                               │  ← Entry point
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Application Layer (app/)                           │  ← Sans-IO controller
//! │  - Search debouncing                                │
//! │  - List state and request sequencing                │
//! │  - Mutation tracking                                │
//! └─────────────────────────────────────────────────────┘
//!         │                    │                    │
//! ┌───────────────┐   ┌───────────────┐   ┌───────────────┐
//! │ UI Layer      │   │ Storage Layer │   │ Worker Layer  │
//! │ (ui/)         │   │ (storage/)    │   │ (worker/)     │
//! │ - View model  │   │ - JSON I/O    │   │ - Thread      │
//! │ - Text output │   │ - Matching    │   │ - Protocol    │
//! └───────────────┘   └───────────────┘   └───────────────┘
//!         │                    │                    │
//! ┌─────────────────────────────────────────────────────┐
//! │  Infrastructure & Domain Layers                     │
//! │  - Data paths (infrastructure/)                     │
//! │  - Report, filter and errors (domain/)              │
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Observability (observability/)                     │  ← Optional
//! │  - OpenTelemetry tracing, file-based OTLP export    │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! # Configuration
//!
//! Read from `$ECOREPORT_CONFIG` or `~/.config/ecoreport/config.toml`. Every key is
//! optional:
//!
//! ```toml
//! catalog_file = "~/reports.json"
//! debounce_ms = 300
//! trace_level = "debug"
//! ```
//!
//! # Example
//!
//! ```rust
//! use ecoreport::app::{handle_event, Context, Event, FavoriteSet};
//! use ecoreport::{initialize, Config};
//! use std::time::Instant;
//!
//! let mut controller = initialize(&Config::default());
//! let mut favorites = FavoriteSet::new();
//! let mut ctx = Context {
//!     now: Instant::now(),
//!     favorites: &mut favorites,
//!     auth: &true,
//!     confirm: &mut true,
//! };
//!
//! let (_render, actions) = handle_event(&mut controller, &mut ctx, Event::Reload)?;
//! assert_eq!(actions.len(), 1);
//! assert!(controller.list().is_loading());
//! # Ok::<(), ecoreport::CatalogError>(())
//! ```

#![allow(clippy::multiple_crate_versions)]

pub mod app;
pub mod domain;
pub mod infrastructure;
pub mod storage;
pub mod worker;

pub mod ui;

pub mod observability;

pub use app::{handle_event, Action, Event, ListController};
pub use domain::{CatalogError, Category, Report, ReportId, Result, SearchFilter};

use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// File name of the catalog inside the data directory.
pub const CATALOG_FILE: &str = "reports.json";

/// Runtime configuration, loaded from TOML.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Catalog JSON file. `~` is expanded. Default: `<data dir>/reports.json`
    pub catalog_file: Option<String>,

    /// Quiet period before a filter edit is dispatched, in milliseconds.
    ///
    /// Default: 300
    pub debounce_ms: u64,

    /// Tracing level for OpenTelemetry spans.
    ///
    /// Options: `trace`, `debug`, `info`, `warn`, `error`. Default: `"info"`
    pub trace_level: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            catalog_file: None,
            debounce_ms: 300,
            trace_level: None,
        }
    }
}

impl Config {
    /// Parses configuration from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Config`] on invalid TOML or unknown keys.
    ///
    /// # Example
    ///
    /// ```rust
    /// use ecoreport::Config;
    ///
    /// let config = Config::from_toml_str("debounce_ms = 150").unwrap();
    /// assert_eq!(config.debounce_ms, 150);
    /// assert!(config.trace_level.is_none());
    /// ```
    pub fn from_toml_str(text: &str) -> Result<Self> {
        toml::from_str(text).map_err(|e| CatalogError::Config(e.to_string()))
    }

    /// Loads configuration from a file.
    ///
    /// A missing file yields the defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!(path = ?path, "no config file, using defaults");
            return Ok(Self::default());
        }
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    #[must_use]
    pub const fn debounce_window(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    /// Resolves the catalog file, defaulting to `reports.json` in `data_dir`.
    #[must_use]
    pub fn catalog_path(&self, data_dir: &Path) -> PathBuf {
        self.catalog_file.as_deref().map_or_else(
            || data_dir.join(CATALOG_FILE),
            |file| PathBuf::from(infrastructure::expand_tilde(file)),
        )
    }
}

/// Creates a controller configured from `config`.
///
/// The list starts empty and idle; post [`Event::Reload`] to fetch the collection.
#[must_use]
pub fn initialize(config: &Config) -> ListController {
    tracing::debug!(debounce_ms = config.debounce_ms, "initializing list controller");
    ListController::new(config.debounce_window())
}
