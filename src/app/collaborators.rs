//! Synchronous collaborator interfaces consumed by the controller.
//!
//! Asynchronous work (collection fetches, deletes, remote favorite changes) never goes
//! through these traits; it is posted to the worker as messages and comes back as
//! responses. What remains here are the live, synchronous queries and gates the
//! controller needs at call time.

use crate::domain::{Report, ReportId};

/// Shared, authoritative favorites set.
///
/// The controller never keeps its own copy of membership. Every toggle and every view
/// model row queries [`FavoritesStore::is_member`] live.
pub trait FavoritesStore {
    /// Whether the report is currently a favorite.
    fn is_member(&self, id: ReportId) -> bool;

    /// Records a favorite after the remote add has succeeded.
    fn insert(&mut self, report: Report);

    /// Drops a favorite locally, with no remote call.
    ///
    /// Used after a remote remove succeeds and to desynchronize a deleted report.
    fn remove_local(&mut self, id: ReportId);

    /// Replaces the whole set with persisted favorites.
    ///
    /// Used after a remote clear and when resynchronizing after sign-in.
    fn replace_all(&mut self, reports: Vec<Report>);
}

/// Authentication snapshot.
pub trait AuthState {
    fn is_authenticated(&self) -> bool;
}

/// Blocking yes/no prompt shown before a destructive action.
///
/// A `false` answer aborts the action with zero side effects.
pub trait ConfirmGate {
    fn confirm(&mut self, prompt: &str) -> bool;
}

impl AuthState for bool {
    fn is_authenticated(&self) -> bool {
        *self
    }
}

impl ConfirmGate for bool {
    fn confirm(&mut self, _prompt: &str) -> bool {
        *self
    }
}
