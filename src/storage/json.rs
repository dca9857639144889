//! JSON file-based catalog backend.
//!
//! This module provides a human-readable catalog stored in a single JSON file. It
//! uses atomic file writes (write-to-temp + rename) so a crash never leaves a
//! half-written catalog behind.
//!
//! # Performance Characteristics
//!
//! - **Read**: O(n) filtering over an in-memory copy loaded once at open
//! - **Write**: O(n) - serializes and writes the entire dataset
//! - **Best for**: a few thousand reports, infrequent writes

use crate::domain::{CatalogError, Report, ReportId, Result, SearchFilter};
use crate::storage::backend::Catalog;
use crate::storage::matching::filter_reports;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};

const FORMAT_VERSION: u32 = 1;

/// On-disk container.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct CatalogData {
    /// Format version for future migrations.
    version: u32,

    /// All reports, keyed by id.
    #[serde(default)]
    reports: BTreeMap<ReportId, Report>,

    /// Ids of favorited reports.
    #[serde(default)]
    favorites: BTreeSet<ReportId>,
}

impl Default for CatalogData {
    fn default() -> Self {
        Self {
            version: FORMAT_VERSION,
            reports: BTreeMap::new(),
            favorites: BTreeSet::new(),
        }
    }
}

/// JSON file catalog backend.
///
/// The whole dataset is kept in memory and persisted after every modification. A
/// modification whose write fails is discarded, so memory and file stay in step.
///
/// # Thread Safety
///
/// This type is `Send` but not `Sync`. It is owned by the worker thread.
///
/// # File Format
///
/// ```json
/// {
///   "version": 1,
///   "reports": {
///     "7": {
///       "id": 7,
///       "title": "Bidons abandonnés",
///       "type": "Chimique",
///       "dateObservation": "2024-05-03",
///       "latitude": 45.76,
///       "longitude": 4.83,
///       ...
///     }
///   },
///   "favorites": [7]
/// }
/// ```
pub struct JsonCatalog {
    file_path: PathBuf,
    data: CatalogData,
}

impl JsonCatalog {
    /// Opens a catalog file, or starts an empty one if it does not exist yet.
    ///
    /// Parent directories are created automatically. The file itself is only
    /// written on the first modification.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Parent directory creation fails
    /// - The file exists but contains invalid JSON
    /// - The file was written by a newer format version
    pub fn new(file_path: PathBuf) -> Result<Self> {
        tracing::debug!(path = ?file_path, "opening JSON catalog");

        if let Some(parent) = file_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let data = if file_path.exists() {
            Self::load_from_file(&file_path)?
        } else {
            tracing::debug!("catalog file missing, starting empty");
            CatalogData::default()
        };

        tracing::debug!(
            report_count = data.reports.len(),
            favorite_count = data.favorites.len(),
            "catalog opened"
        );

        Ok(Self { file_path, data })
    }

    /// Path of the backing file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.file_path
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.reports.is_empty()
    }

    fn load_from_file(path: &Path) -> Result<CatalogData> {
        let contents = std::fs::read_to_string(path)?;
        let data: CatalogData = serde_json::from_str(&contents)
            .map_err(|e| CatalogError::Storage(format!("failed to parse JSON: {e}")))?;

        if data.version > FORMAT_VERSION {
            return Err(CatalogError::Storage(format!(
                "unsupported catalog version {} (expected {FORMAT_VERSION})",
                data.version
            )));
        }

        Ok(data)
    }

    /// Writes `data` through a temporary file and an atomic rename.
    fn save_to_file(&self, data: &CatalogData) -> Result<()> {
        let json = serde_json::to_string_pretty(data)
            .map_err(|e| CatalogError::Storage(format!("failed to serialize JSON: {e}")))?;

        let tmp_path = self.file_path.with_extension("tmp");
        std::fs::write(&tmp_path, json)?;
        std::fs::rename(&tmp_path, &self.file_path)?;

        tracing::debug!(path = ?self.file_path, "catalog saved");
        Ok(())
    }

    /// Applies `change` to a copy of the data and keeps it only once it is on disk.
    ///
    /// `change` returns whether it modified anything; unmodified copies are not
    /// written. In-memory data never runs ahead of the file.
    fn commit<T>(&mut self, change: impl FnOnce(&mut CatalogData) -> Result<(bool, T)>) -> Result<T> {
        let mut next = self.data.clone();
        let (modified, value) = change(&mut next)?;
        if !modified {
            tracing::trace!("skipping save, no changes");
            return Ok(value);
        }

        self.save_to_file(&next)?;
        self.data = next;
        Ok(value)
    }
}

impl Catalog for JsonCatalog {
    fn fetch_all(&self) -> Result<Vec<Report>> {
        let _span = tracing::debug_span!("json_fetch_all").entered();

        let reports: Vec<Report> = self.data.reports.values().cloned().collect();
        tracing::debug!(count = reports.len(), "fetched reports");
        Ok(reports)
    }

    fn fetch_filtered(&self, filter: &SearchFilter) -> Result<Vec<Report>> {
        if filter.is_unfiltered() {
            return self.fetch_all();
        }
        Ok(filter_reports(self.data.reports.values(), filter))
    }

    fn fetch_by_id(&self, id: ReportId) -> Result<Report> {
        self.data
            .reports
            .get(&id)
            .cloned()
            .ok_or(CatalogError::NotFound(id))
    }

    fn delete_by_id(&mut self, id: ReportId) -> Result<()> {
        let _span = tracing::debug_span!("json_delete", report_id = id).entered();

        let was_favorite = self.commit(|data| {
            if data.reports.remove(&id).is_none() {
                return Err(CatalogError::NotFound(id));
            }
            Ok((true, data.favorites.remove(&id)))
        })?;

        tracing::debug!(was_favorite, "report deleted");
        Ok(())
    }

    fn add_favorite(&mut self, id: ReportId) -> Result<()> {
        let _span = tracing::debug_span!("json_add_favorite", report_id = id).entered();

        self.commit(|data| {
            if !data.reports.contains_key(&id) {
                return Err(CatalogError::NotFound(id));
            }
            Ok((data.favorites.insert(id), ()))
        })
    }

    fn remove_favorite(&mut self, id: ReportId) -> Result<()> {
        let _span = tracing::debug_span!("json_remove_favorite", report_id = id).entered();

        self.commit(|data| Ok((data.favorites.remove(&id), ())))
    }

    fn clear_favorites(&mut self) -> Result<()> {
        let _span = tracing::debug_span!("json_clear_favorites").entered();

        let cleared = self.commit(|data| {
            let count = data.favorites.len();
            data.favorites.clear();
            Ok((count > 0, count))
        })?;

        tracing::debug!(cleared, "favorites cleared");
        Ok(())
    }

    fn favorites(&self) -> Result<Vec<Report>> {
        Ok(self
            .data
            .favorites
            .iter()
            .filter_map(|id| self.data.reports.get(id))
            .cloned()
            .collect())
    }

    fn insert(&mut self, reports: &[Report]) -> Result<()> {
        let _span = tracing::debug_span!("json_insert", count = reports.len()).entered();

        self.commit(|data| {
            for report in reports {
                data.reports.insert(report.id, report.clone());
            }
            Ok((true, ()))
        })
    }
}
