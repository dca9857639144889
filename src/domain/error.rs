//! Error types for the report catalog.
//!
//! This module defines the centralized error type [`CatalogError`] and a type alias
//! [`Result`] used throughout the crate. All errors are implemented with `thiserror`.
//!
//! None of these errors is fatal. Fetch and mutation failures are recovered by the
//! controller (generic message, cleared token, transient alert) and the user can
//! retry by re-triggering the same control.

use crate::domain::ReportId;
use thiserror::Error;

/// The main error type for catalog operations.
///
/// Consolidates failures from the storage backend, the worker thread boundary and
/// configuration loading. Variants wrapping library errors use `#[from]` so they can
/// be propagated with `?`.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Storage operation failed.
    ///
    /// Occurs when reading, parsing or writing the catalog backend fails.
    #[error("Storage error: {0}")]
    Storage(String),

    /// Filesystem or I/O operation failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// No report with the given id exists in the catalog or the visible list.
    #[error("Report not found: {0}")]
    NotFound(ReportId),

    /// A category label did not match any known pollution category.
    #[error("Unknown category: {0}")]
    UnknownCategory(String),

    /// Communication with the background worker failed.
    ///
    /// Occurs when a message cannot be serialized or the worker thread has hung up.
    #[error("Worker communication error: {0}")]
    Worker(String),

    /// Configuration is invalid or cannot be read.
    #[error("Configuration error: {0}")]
    Config(String),
}

/// A specialized `Result` type for catalog operations.
pub type Result<T> = std::result::Result<T, CatalogError>;
