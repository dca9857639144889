//! Per-item mutation tracker.
//!
//! Each item-level action (favorite toggle, delete) is an independent state machine
//! per report: `Idle -> Pending -> Idle`. A [`MutationToken`] exists exactly while an
//! action is pending. Tokens are keyed by `(report_id, kind)`, so different reports can
//! be busy at the same time and a favorite toggle may overlap a delete on the same
//! report, but the same action can never be pending twice for one report.

use crate::domain::ReportId;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Item-level asynchronous action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MutationKind {
    Favorite,
    Delete,
}

/// Marker for one in-flight action on one report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MutationToken {
    pub report_id: ReportId,
    pub kind: MutationKind,
}

/// Set of live mutation tokens.
#[derive(Debug, Clone, Default)]
pub struct MutationTracker {
    live: HashSet<MutationToken>,
}

impl MutationTracker {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates the token for `(report_id, kind)`.
    ///
    /// Returns `false` without changing anything if that token is already live.
    pub fn try_begin(&mut self, report_id: ReportId, kind: MutationKind) -> bool {
        let inserted = self.live.insert(MutationToken { report_id, kind });
        if inserted {
            tracing::debug!(report_id, kind = ?kind, "mutation pending");
        } else {
            tracing::debug!(report_id, kind = ?kind, "mutation already pending, ignoring");
        }
        inserted
    }

    /// Destroys the token for `(report_id, kind)`. Returns whether it was live.
    pub fn settle(&mut self, report_id: ReportId, kind: MutationKind) -> bool {
        let removed = self.live.remove(&MutationToken { report_id, kind });
        if !removed {
            tracing::warn!(report_id, kind = ?kind, "settled a mutation that was not pending");
        }
        removed
    }

    #[must_use]
    pub fn is_pending(&self, report_id: ReportId, kind: MutationKind) -> bool {
        self.live.contains(&MutationToken { report_id, kind })
    }

    /// Number of live tokens across all reports and kinds.
    #[must_use]
    pub fn len(&self) -> usize {
        self.live.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.live.is_empty()
    }
}
