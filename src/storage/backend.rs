//! Catalog backend abstraction.
//!
//! This module defines the [`Catalog`] trait: the collection service the worker
//! talks to, plus the remote half of the favorites feature. The controller never
//! calls it directly; every call happens on the worker thread in response to a
//! [`WorkerMessage`](crate::worker::WorkerMessage).
//!
//! The trait maps one method to one worker request. It is not a generic repository.

use crate::domain::{Report, ReportId, Result, SearchFilter};

/// Abstraction over the report collection and its favorites persistence.
///
/// # Implementations
///
/// - [`JsonCatalog`](crate::storage::JsonCatalog): JSON file with atomic writes
///
/// # Examples
///
/// ```no_run
/// use ecoreport::storage::{Catalog, JsonCatalog};
/// use std::path::PathBuf;
///
/// let catalog = JsonCatalog::new(PathBuf::from("/tmp/reports.json"))?;
/// let reports = catalog.fetch_all()?;
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub trait Catalog: Send {
    /// Retrieves the whole collection, ordered by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be read.
    fn fetch_all(&self) -> Result<Vec<Report>>;

    /// Retrieves the reports matching `filter`, ordered by id.
    ///
    /// An unfiltered [`SearchFilter`] yields the same result as [`Catalog::fetch_all`].
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be read.
    fn fetch_filtered(&self, filter: &SearchFilter) -> Result<Vec<Report>>;

    /// Retrieves one report.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::NotFound`](crate::domain::CatalogError::NotFound) for
    /// an unknown id, or an error if the backend cannot be read.
    fn fetch_by_id(&self, id: ReportId) -> Result<Report>;

    /// Deletes a report. Its favorite entry, if any, goes with it.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::NotFound`](crate::domain::CatalogError::NotFound) for
    /// an unknown id, or a storage error if the write fails.
    fn delete_by_id(&mut self, id: ReportId) -> Result<()>;

    /// Marks a report as favorite. Adding an existing favorite is a no-op.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::NotFound`](crate::domain::CatalogError::NotFound) if
    /// the report is not in the collection, or a storage error if the write fails.
    fn add_favorite(&mut self, id: ReportId) -> Result<()>;

    /// Unmarks a favorite. Removing a non-favorite is a no-op.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails.
    fn remove_favorite(&mut self, id: ReportId) -> Result<()>;

    /// Unmarks every favorite at once.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails. Nothing is removed in that case.
    fn clear_favorites(&mut self) -> Result<()>;

    /// Retrieves all favorited reports, ordered by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be read.
    fn favorites(&self) -> Result<Vec<Report>>;

    /// Adds or replaces reports in the collection.
    ///
    /// Used to seed an empty catalog.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails.
    fn insert(&mut self, reports: &[Report]) -> Result<()>;
}
