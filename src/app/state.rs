//! List state holder.
//!
//! [`ListState`] owns the displayed report sequence, the loading flag and the optional
//! error message. It also owns the list request sequence: every fetch or search is
//! issued a monotonically increasing [`RequestId`], and only the most recently issued
//! request may settle the state. Results carrying any other id are discarded.
//!
//! # Invariant
//!
//! `is_loading()` is true exactly while a dispatched list request owns the state, i.e.
//! between [`ListState::begin_request`] and the matching settle call for the latest id.

use crate::domain::{Report, ReportId};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Message shown when an unconditional load fails.
pub const LOAD_FAILURE_MESSAGE: &str = "Failed to load pollution reports";

/// Message shown when a filtered search fails.
pub const SEARCH_FAILURE_MESSAGE: &str = "Search failed";

/// Freshness token attached to every list request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RequestId(pub u64);

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Which path issued a list request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestKind {
    /// Unconditional fetch of the whole collection.
    Load,
    /// Debounced, filtered search.
    Search,
}

impl RequestKind {
    const fn failure_message(self) -> &'static str {
        match self {
            Self::Load => LOAD_FAILURE_MESSAGE,
            Self::Search => SEARCH_FAILURE_MESSAGE,
        }
    }
}

/// Currently displayed list and its settlement status.
#[derive(Debug, Clone, Default)]
pub struct ListState {
    reports: Vec<Report>,
    is_loading: bool,
    error: Option<String>,
    last_issued: u64,
    owner: Option<(RequestId, RequestKind)>,
}

impl ListState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Reports in display order.
    #[must_use]
    pub fn reports(&self) -> &[Report] {
        &self.reports
    }

    #[must_use]
    pub const fn is_loading(&self) -> bool {
        self.is_loading
    }

    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Finds a visible report by id.
    #[must_use]
    pub fn get(&self, id: ReportId) -> Option<&Report> {
        self.reports.iter().find(|r| r.id == id)
    }

    /// Id of the request that currently owns the state, if any.
    #[must_use]
    pub fn pending_request(&self) -> Option<RequestId> {
        self.owner.map(|(id, _)| id)
    }

    /// Issues a new request id and marks the list as loading.
    ///
    /// Any request issued earlier loses ownership; its eventual result is discarded.
    pub fn begin_request(&mut self, kind: RequestKind) -> RequestId {
        self.last_issued += 1;
        let id = RequestId(self.last_issued);

        if let Some((previous, _)) = self.owner {
            tracing::debug!(superseded = %previous, request = %id, "list request superseded");
        }

        self.owner = Some((id, kind));
        self.is_loading = true;
        id
    }

    /// Applies a successful result if `id` still owns the state.
    ///
    /// Replaces the list wholesale and clears any error. Returns `false` when the
    /// result was stale and discarded.
    pub fn settle_success(&mut self, id: RequestId, reports: Vec<Report>) -> bool {
        if !self.owns(id) {
            tracing::debug!(request = %id, count = reports.len(), "discarding stale list result");
            return false;
        }

        tracing::debug!(request = %id, count = reports.len(), "list replaced");
        self.reports = reports;
        self.is_loading = false;
        self.error = None;
        self.owner = None;
        true
    }

    /// Applies a failure if `id` still owns the state.
    ///
    /// Sets a generic message for the request kind and keeps the previous reports.
    pub fn settle_failure(&mut self, id: RequestId) -> bool {
        let Some((_, kind)) = self.owner.filter(|(owner, _)| *owner == id) else {
            tracing::debug!(request = %id, "discarding stale list failure");
            return false;
        };

        self.is_loading = false;
        self.error = Some(kind.failure_message().to_string());
        self.owner = None;
        true
    }

    /// Removes a report by id. Returns whether it was present.
    pub fn prune(&mut self, id: ReportId) -> bool {
        let before = self.reports.len();
        self.reports.retain(|r| r.id != id);
        before != self.reports.len()
    }

    fn owns(&self, id: RequestId) -> bool {
        self.owner.is_some_and(|(owner, _)| owner == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Category;
    use chrono::NaiveDate;

    fn report(id: ReportId) -> Report {
        let date = NaiveDate::from_ymd_opt(2024, 5, 3).unwrap();
        Report::new(id, format!("report {id}"), Category::Other, date)
    }

    #[test]
    fn loading_tracks_ownership() {
        let mut state = ListState::new();
        assert!(!state.is_loading());

        let id = state.begin_request(RequestKind::Load);
        assert!(state.is_loading());
        assert_eq!(state.pending_request(), Some(id));

        assert!(state.settle_success(id, vec![report(1)]));
        assert!(!state.is_loading());
        assert_eq!(state.pending_request(), None);
        assert_eq!(state.reports().len(), 1);
    }

    #[test]
    fn only_latest_request_settles() {
        let mut state = ListState::new();
        let older = state.begin_request(RequestKind::Search);
        let newer = state.begin_request(RequestKind::Search);

        assert!(!state.settle_success(older, vec![report(1)]));
        assert!(state.is_loading());
        assert!(state.reports().is_empty());

        assert!(state.settle_success(newer, vec![report(2)]));
        assert!(!state.settle_failure(older));
        assert_eq!(state.error(), None);
        assert_eq!(state.reports()[0].id, 2);
    }

    #[test]
    fn failure_keeps_previous_reports() {
        let mut state = ListState::new();
        let first = state.begin_request(RequestKind::Load);
        state.settle_success(first, vec![report(1), report(2)]);

        let search = state.begin_request(RequestKind::Search);
        assert!(state.settle_failure(search));
        assert_eq!(state.error(), Some(SEARCH_FAILURE_MESSAGE));
        assert!(!state.is_loading());
        assert_eq!(state.reports().len(), 2);

        let reload = state.begin_request(RequestKind::Load);
        state.settle_success(reload, vec![report(3)]);
        assert_eq!(state.error(), None);
    }

    #[test]
    fn prune_removes_by_id() {
        let mut state = ListState::new();
        let id = state.begin_request(RequestKind::Load);
        state.settle_success(id, vec![report(1), report(2)]);

        assert!(state.prune(1));
        assert!(!state.prune(1));
        assert!(state.get(1).is_none());
        assert!(state.get(2).is_some());
    }
}
