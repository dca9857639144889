//! In-memory favorites set.

use super::collaborators::FavoritesStore;
use crate::domain::{Report, ReportId};
use std::collections::BTreeMap;

/// Favorited reports keyed by id.
///
/// Holds full reports rather than bare ids so a favorites page can be listed without
/// another fetch. Seeded from the persisted favorites at startup and kept in step by
/// the controller as remote changes settle.
#[derive(Debug, Clone, Default)]
pub struct FavoriteSet {
    reports: BTreeMap<ReportId, Report>,
}

impl FavoriteSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds the set from already persisted favorites.
    #[must_use]
    pub fn from_reports(reports: impl IntoIterator<Item = Report>) -> Self {
        Self {
            reports: reports.into_iter().map(|r| (r.id, r)).collect(),
        }
    }

    /// Favorites ordered by id.
    pub fn iter(&self) -> impl Iterator<Item = &Report> {
        self.reports.values()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.reports.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.reports.is_empty()
    }

    /// Ids of all favorites, ascending.
    #[must_use]
    pub fn ids(&self) -> Vec<ReportId> {
        self.reports.keys().copied().collect()
    }

    pub fn clear(&mut self) {
        self.reports.clear();
    }
}

impl FavoritesStore for FavoriteSet {
    fn is_member(&self, id: ReportId) -> bool {
        self.reports.contains_key(&id)
    }

    fn insert(&mut self, report: Report) {
        self.reports.insert(report.id, report);
    }

    fn remove_local(&mut self, id: ReportId) {
        self.reports.remove(&id);
    }

    fn replace_all(&mut self, reports: Vec<Report>) {
        self.reports = reports.into_iter().map(|r| (r.id, r)).collect();
    }
}
