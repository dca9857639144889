//! Reactive list controller.
//!
//! [`ListController`] ties the three sub-mechanisms together:
//!
//! - [`SearchDebouncer`] turns filter edits into throttled, distinct search requests
//! - [`ListState`] owns the visible list and discards superseded list results
//! - [`MutationTracker`] serializes favorite toggles and deletes per report
//!
//! The controller is sans-IO. Operations take the current time and collaborators as
//! arguments and return [`Action`]s; asynchronous results come back through
//! [`ListController::apply_response`]. Everything runs on one cooperative context, so
//! no locks are involved: the request sequence and the mutation tokens are the only
//! ordering guards.
//!
//! # Deleted reports
//!
//! Once a delete settles, the report id is remembered. A favorite add for that id that
//! settles afterwards is not committed to the favorites set, and a list result that was
//! produced before the delete drops the report instead of resurrecting the row. A
//! detail view showing the report switches to "not found".
//!
//! # Favorites page
//!
//! Removing a single favorite shares the favorite token with the list toggle, so a
//! row and its favorites entry can never race each other. Clearing all favorites is
//! guarded by its own flag and a confirmation.

use super::actions::{Action, Notice};
use super::collaborators::{AuthState, ConfirmGate, FavoritesStore};
use super::debounce::SearchDebouncer;
use super::detail::DetailState;
use super::state::{ListState, RequestKind};
use super::tracker::{MutationKind, MutationTracker};
use crate::domain::{Category, Report, ReportId, SearchFilter};
use crate::worker::{FavoriteChange, WorkerMessage, WorkerResponse};
use std::collections::HashSet;
use std::time::{Duration, Instant};

/// Prompt passed to the confirmation gate before a delete.
pub const DELETE_PROMPT: &str = "Are you sure you want to delete this pollution report?";

/// Prompt passed to the confirmation gate before clearing all favorites.
pub const CLEAR_FAVORITES_PROMPT: &str = "Are you sure you want to remove all favorites?";

/// Result of a favorite toggle request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleOutcome {
    /// A remote add or remove was dispatched.
    Dispatched(FavoriteChange),
    /// The user is not signed in; nothing was dispatched.
    AuthRequired,
    /// A toggle for this report is already in flight; ignored.
    AlreadyPending,
    /// The report has been deleted; ignored.
    Deleted,
}

/// Result of a delete request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    /// The delete request was dispatched.
    Dispatched,
    /// The user declined the confirmation; nothing happened.
    Cancelled,
    /// A delete for this report is already in flight; ignored.
    AlreadyPending,
}

/// Result of a clear-all-favorites request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClearOutcome {
    Dispatched,
    AuthRequired,
    Cancelled,
    /// A clear is already in flight; ignored.
    AlreadyPending,
}

/// Coordination state for the report list.
#[derive(Debug, Clone)]
pub struct ListController {
    list: ListState,
    debouncer: SearchDebouncer,
    tracker: MutationTracker,
    filter: SearchFilter,
    deleted: HashSet<ReportId>,
    clearing_favorites: bool,
    detail: Option<DetailState>,
}

impl Default for ListController {
    fn default() -> Self {
        Self::new(super::debounce::DEFAULT_DEBOUNCE_WINDOW)
    }
}

impl ListController {
    #[must_use]
    pub fn new(debounce_window: Duration) -> Self {
        Self {
            list: ListState::new(),
            debouncer: SearchDebouncer::new(debounce_window),
            tracker: MutationTracker::new(),
            filter: SearchFilter::default(),
            deleted: HashSet::new(),
            clearing_favorites: false,
            detail: None,
        }
    }

    #[must_use]
    pub const fn list(&self) -> &ListState {
        &self.list
    }

    /// Latest filter as edited by the user, dispatched or not.
    #[must_use]
    pub const fn filter(&self) -> &SearchFilter {
        &self.filter
    }

    #[must_use]
    pub const fn tracker(&self) -> &MutationTracker {
        &self.tracker
    }

    /// Deadline of the next debounced dispatch, if a filter edit is waiting.
    #[must_use]
    pub fn next_wake(&self) -> Option<Instant> {
        self.debouncer.deadline()
    }

    /// Open detail view, if any.
    #[must_use]
    pub const fn detail(&self) -> Option<&DetailState> {
        self.detail.as_ref()
    }

    #[must_use]
    pub const fn is_clearing_favorites(&self) -> bool {
        self.clearing_favorites
    }

    /// Looks a report up in the visible list, then in the open detail view.
    #[must_use]
    pub fn find_report(&self, id: ReportId) -> Option<&Report> {
        self.list.get(id).or_else(|| {
            self.detail
                .as_ref()
                .and_then(DetailState::report)
                .filter(|r| r.id == id)
        })
    }

    #[must_use]
    pub fn is_favorite_pending(&self, id: ReportId) -> bool {
        self.tracker.is_pending(id, MutationKind::Favorite)
    }

    #[must_use]
    pub fn is_delete_pending(&self, id: ReportId) -> bool {
        self.tracker.is_pending(id, MutationKind::Delete)
    }

    /// Fetches the whole collection, bypassing the debouncer.
    ///
    /// Used at startup and on explicit reload. Supersedes any search in flight, and the
    /// next settled filter is searched even if it equals the superseded one.
    pub fn load(&mut self) -> Vec<Action> {
        self.debouncer.forget_dispatched();
        let request_id = self.list.begin_request(RequestKind::Load);
        tracing::debug!(request = %request_id, "loading all reports");
        vec![Action::PostToWorker(WorkerMessage::fetch_all(request_id))]
    }

    /// Records a filter edit and (re)arms the debounce timer.
    ///
    /// Safe to call on every keystroke.
    pub fn on_filter_changed(&mut self, filter: SearchFilter, now: Instant) -> Vec<Action> {
        tracing::trace!(title = %filter.title_query, category = ?filter.category, "filter changed");
        self.filter = filter.clone();
        let deadline = self.debouncer.record(filter, now);
        vec![Action::WakeAt(deadline)]
    }

    /// Updates the title query, keeping the selected category.
    pub fn on_title_changed(&mut self, title: impl Into<String>, now: Instant) -> Vec<Action> {
        let filter = self.filter.with_title(title);
        self.on_filter_changed(filter, now)
    }

    /// Updates the category selection, keeping the title query.
    pub fn on_category_changed(&mut self, category: Option<Category>, now: Instant) -> Vec<Action> {
        let filter = self.filter.with_category(category);
        self.on_filter_changed(filter, now)
    }

    /// Dispatches the pending filter if its quiet window has elapsed.
    ///
    /// Sets the list to loading before the request leaves, so the pending state is
    /// visible immediately.
    pub fn poll(&mut self, now: Instant) -> Vec<Action> {
        let Some(filter) = self.debouncer.poll(now) else {
            return vec![];
        };

        let request_id = self.list.begin_request(RequestKind::Search);
        tracing::debug!(
            request = %request_id,
            title = %filter.title_query,
            category = ?filter.category,
            "dispatching search"
        );
        vec![Action::PostToWorker(WorkerMessage::fetch_filtered(request_id, filter))]
    }

    /// Toggles favorite membership of a report.
    ///
    /// The authentication check happens first and synchronously. Membership is read
    /// from the favorites store at call time and decides the direction: a member is
    /// removed, a non-member is added. A second toggle while one is pending for the
    /// same report is ignored.
    pub fn on_toggle_favorite(
        &mut self,
        report: &Report,
        auth: &dyn AuthState,
        favorites: &dyn FavoritesStore,
    ) -> (ToggleOutcome, Vec<Action>) {
        let _span = tracing::debug_span!("toggle_favorite", report_id = report.id).entered();

        if !auth.is_authenticated() {
            tracing::debug!("toggle rejected, not authenticated");
            return (ToggleOutcome::AuthRequired, vec![Action::RedirectToLogin]);
        }

        if self.deleted.contains(&report.id) {
            tracing::debug!("toggle ignored, report deleted");
            return (ToggleOutcome::Deleted, vec![]);
        }

        let is_member = favorites.is_member(report.id);

        if !self.tracker.try_begin(report.id, MutationKind::Favorite) {
            return (ToggleOutcome::AlreadyPending, vec![]);
        }

        let (change, message) = if is_member {
            (FavoriteChange::Remove, WorkerMessage::remove_favorite(report.id))
        } else {
            (FavoriteChange::Add, WorkerMessage::add_favorite(report.clone()))
        };

        tracing::debug!(change = ?change, "favorite change dispatched");
        (ToggleOutcome::Dispatched(change), vec![Action::PostToWorker(message)])
    }

    /// Deletes a report after explicit confirmation.
    ///
    /// A declined confirmation has no side effects. A delete already pending for the
    /// same report is ignored without prompting again.
    pub fn on_delete(&mut self, id: ReportId, confirm: &mut dyn ConfirmGate) -> (DeleteOutcome, Vec<Action>) {
        let _span = tracing::debug_span!("delete_report", report_id = id).entered();

        if self.tracker.is_pending(id, MutationKind::Delete) {
            tracing::debug!("delete already pending, ignoring");
            return (DeleteOutcome::AlreadyPending, vec![]);
        }

        if !confirm.confirm(DELETE_PROMPT) {
            tracing::debug!("delete cancelled by user");
            return (DeleteOutcome::Cancelled, vec![]);
        }

        self.tracker.try_begin(id, MutationKind::Delete);
        (
            DeleteOutcome::Dispatched,
            vec![Action::PostToWorker(WorkerMessage::delete_report(id))],
        )
    }

    /// Removes one favorite from the favorites page.
    ///
    /// Uses the same per-report token as [`ListController::on_toggle_favorite`].
    pub fn on_remove_favorite(&mut self, id: ReportId, auth: &dyn AuthState) -> (ToggleOutcome, Vec<Action>) {
        let _span = tracing::debug_span!("remove_favorite", report_id = id).entered();

        if !auth.is_authenticated() {
            return (ToggleOutcome::AuthRequired, vec![Action::RedirectToLogin]);
        }

        if !self.tracker.try_begin(id, MutationKind::Favorite) {
            return (ToggleOutcome::AlreadyPending, vec![]);
        }

        (
            ToggleOutcome::Dispatched(FavoriteChange::Remove),
            vec![Action::PostToWorker(WorkerMessage::remove_favorite(id))],
        )
    }

    /// Removes every favorite after explicit confirmation.
    pub fn on_clear_favorites(
        &mut self,
        auth: &dyn AuthState,
        confirm: &mut dyn ConfirmGate,
    ) -> (ClearOutcome, Vec<Action>) {
        let _span = tracing::debug_span!("clear_favorites").entered();

        if !auth.is_authenticated() {
            return (ClearOutcome::AuthRequired, vec![Action::RedirectToLogin]);
        }

        if self.clearing_favorites {
            tracing::debug!("clear already pending, ignoring");
            return (ClearOutcome::AlreadyPending, vec![]);
        }

        if !confirm.confirm(CLEAR_FAVORITES_PROMPT) {
            tracing::debug!("clear cancelled by user");
            return (ClearOutcome::Cancelled, vec![]);
        }

        self.clearing_favorites = true;
        (
            ClearOutcome::Dispatched,
            vec![Action::PostToWorker(WorkerMessage::clear_favorites())],
        )
    }

    /// Re-reads the persisted favorites, e.g. after signing in.
    #[must_use]
    pub fn sync_favorites(&self) -> Vec<Action> {
        tracing::debug!("syncing favorites");
        vec![Action::PostToWorker(WorkerMessage::fetch_favorites())]
    }

    /// Opens the detail view of a report and fetches it.
    pub fn open_detail(&mut self, id: ReportId) -> Vec<Action> {
        tracing::debug!(report_id = id, "opening detail");
        self.detail = Some(DetailState::loading(id));
        vec![Action::PostToWorker(WorkerMessage::fetch_report(id))]
    }

    pub fn close_detail(&mut self) {
        self.detail = None;
    }

    /// Applies a worker response.
    ///
    /// Returns whether visible state changed, plus any follow-up actions. Every item
    /// response clears its mutation token, success or failure, before anything else.
    pub fn apply_response(
        &mut self,
        response: WorkerResponse,
        favorites: &mut dyn FavoritesStore,
    ) -> (bool, Vec<Action>) {
        match response {
            WorkerResponse::ReportsLoaded { request_id, mut reports } => {
                if !self.deleted.is_empty() {
                    reports.retain(|r| !self.deleted.contains(&r.id));
                }
                (self.list.settle_success(request_id, reports), vec![])
            }
            WorkerResponse::ReportsFailed { request_id, message } => {
                let applied = self.list.settle_failure(request_id);
                if applied {
                    tracing::error!(request = %request_id, error = %message, "list request failed");
                }
                (applied, vec![])
            }
            WorkerResponse::ReportDeleted { report_id } => {
                self.tracker.settle(report_id, MutationKind::Delete);
                self.deleted.insert(report_id);
                let pruned = self.list.prune(report_id);
                favorites.remove_local(report_id);
                if let Some(detail) = self.detail.as_mut() {
                    detail.settle_missing(report_id);
                }
                tracing::debug!(report_id, pruned, "report deleted");
                (true, vec![])
            }
            WorkerResponse::DeleteFailed { report_id, message } => {
                self.tracker.settle(report_id, MutationKind::Delete);
                tracing::error!(report_id, error = %message, "delete failed");
                (true, vec![Action::Alert(Notice::DeleteFailed { report_id })])
            }
            WorkerResponse::FavoriteAdded { report } => {
                self.tracker.settle(report.id, MutationKind::Favorite);
                if self.deleted.contains(&report.id) {
                    tracing::debug!(report_id = report.id, "favorite add settled after delete, not committed");
                } else {
                    favorites.insert(report);
                }
                (true, vec![])
            }
            WorkerResponse::FavoriteRemoved { report_id } => {
                self.tracker.settle(report_id, MutationKind::Favorite);
                favorites.remove_local(report_id);
                (true, vec![])
            }
            WorkerResponse::FavoriteFailed { report_id, change, message } => {
                self.tracker.settle(report_id, MutationKind::Favorite);
                tracing::error!(report_id, change = ?change, error = %message, "favorite change failed");
                (true, vec![Action::Alert(Notice::FavoriteFailed { report_id })])
            }
            WorkerResponse::ReportFetched { report } => {
                let Some(detail) = self.detail.as_mut() else {
                    return (false, vec![]);
                };
                let applied = if self.deleted.contains(&report.id) {
                    detail.settle_missing(report.id)
                } else {
                    detail.settle_found(report)
                };
                (applied, vec![])
            }
            WorkerResponse::ReportFetchFailed { report_id, message } => {
                let applied = self.detail.as_mut().is_some_and(|d| d.settle_missing(report_id));
                if applied {
                    tracing::warn!(report_id, error = %message, "detail fetch failed");
                }
                (applied, vec![])
            }
            WorkerResponse::FavoritesLoaded { mut reports } => {
                reports.retain(|r| !self.deleted.contains(&r.id));
                tracing::debug!(count = reports.len(), "favorites synced");
                favorites.replace_all(reports);
                (true, vec![])
            }
            WorkerResponse::FavoritesSyncFailed { message } => {
                tracing::error!(error = %message, "favorites sync failed");
                (false, vec![Action::Alert(Notice::FavoritesSyncFailed)])
            }
            WorkerResponse::FavoritesCleared => {
                self.clearing_favorites = false;
                favorites.replace_all(Vec::new());
                (true, vec![])
            }
            WorkerResponse::ClearFavoritesFailed { message } => {
                self.clearing_favorites = false;
                tracing::error!(error = %message, "clear favorites failed");
                (true, vec![Action::Alert(Notice::ClearFavoritesFailed)])
            }
            WorkerResponse::Error { message } => {
                tracing::error!("Worker error: {}", message);
                (false, vec![])
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::favorites::FavoriteSet;
    use crate::app::RequestId;
    use chrono::NaiveDate;

    fn report(id: ReportId, title: &str) -> Report {
        let date = NaiveDate::from_ymd_opt(2024, 5, 3).unwrap();
        Report::new(id, title, Category::Plastic, date)
    }

    fn posted(actions: &[Action]) -> Vec<&WorkerMessage> {
        actions
            .iter()
            .filter_map(|a| match a {
                Action::PostToWorker(m) => Some(m),
                _ => None,
            })
            .collect()
    }

    fn request_id_of(actions: &[Action]) -> RequestId {
        match posted(actions).as_slice() {
            [WorkerMessage::FetchAll { request_id, .. }]
            | [WorkerMessage::FetchFiltered { request_id, .. }] => *request_id,
            other => panic!("expected one list request, got {other:?}"),
        }
    }

    #[test]
    fn load_marks_loading_and_settles() {
        let mut controller = ListController::default();
        let mut favorites = FavoriteSet::new();

        let actions = controller.load();
        assert!(controller.list().is_loading());
        let id = request_id_of(&actions);

        let (render, _) = controller.apply_response(
            WorkerResponse::ReportsLoaded { request_id: id, reports: vec![report(1, "a")] },
            &mut favorites,
        );
        assert!(render);
        assert!(!controller.list().is_loading());
        assert_eq!(controller.list().reports().len(), 1);
    }

    #[test]
    fn filter_edit_arms_timer_without_loading() {
        let t0 = Instant::now();
        let mut controller = ListController::default();

        let actions = controller.on_title_changed("plast", t0);
        assert_eq!(actions, vec![Action::WakeAt(t0 + Duration::from_millis(300))]);
        assert!(!controller.list().is_loading());
        assert_eq!(controller.filter().title_query, "plast");

        let actions = controller.poll(t0 + Duration::from_millis(300));
        assert!(controller.list().is_loading());
        match posted(&actions).as_slice() {
            [WorkerMessage::FetchFiltered { filter, .. }] => assert_eq!(filter.title_query, "plast"),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn category_edit_keeps_title() {
        let t0 = Instant::now();
        let mut controller = ListController::default();

        controller.on_title_changed("eau", t0);
        controller.on_category_changed(Some(Category::Water), t0);
        assert_eq!(controller.filter(), &SearchFilter::new("eau", Some(Category::Water)));
    }

    #[test]
    fn toggle_direction_follows_live_membership() {
        let mut controller = ListController::default();
        let mut favorites = FavoriteSet::new();
        let r = report(3, "bottles");

        let (outcome, actions) = controller.on_toggle_favorite(&r, &true, &favorites);
        assert_eq!(outcome, ToggleOutcome::Dispatched(FavoriteChange::Add));
        assert!(matches!(posted(&actions).as_slice(), [WorkerMessage::AddFavorite { .. }]));

        controller.apply_response(WorkerResponse::FavoriteAdded { report: r.clone() }, &mut favorites);
        assert!(favorites.is_member(3));
        assert!(!controller.is_favorite_pending(3));

        let (outcome, actions) = controller.on_toggle_favorite(&r, &true, &favorites);
        assert_eq!(outcome, ToggleOutcome::Dispatched(FavoriteChange::Remove));
        assert!(matches!(posted(&actions).as_slice(), [WorkerMessage::RemoveFavorite { report_id: 3, .. }]));
    }

    #[test]
    fn failed_toggle_clears_token_and_alerts() {
        let mut controller = ListController::default();
        let mut favorites = FavoriteSet::new();
        let r = report(5, "oil");

        controller.on_toggle_favorite(&r, &true, &favorites);
        assert!(controller.is_favorite_pending(5));

        let (_, actions) = controller.apply_response(
            WorkerResponse::FavoriteFailed {
                report_id: 5,
                change: FavoriteChange::Add,
                message: "offline".into(),
            },
            &mut favorites,
        );
        assert_eq!(actions, vec![Action::Alert(Notice::FavoriteFailed { report_id: 5 })]);
        assert!(!controller.is_favorite_pending(5));
        assert!(!favorites.is_member(5));
    }

    #[test]
    fn declined_delete_has_no_side_effects() {
        let mut controller = ListController::default();

        let (outcome, actions) = controller.on_delete(9, &mut false);
        assert_eq!(outcome, DeleteOutcome::Cancelled);
        assert!(actions.is_empty());
        assert!(controller.tracker().is_empty());
    }

    #[test]
    fn failed_delete_keeps_list() {
        let mut controller = ListController::default();
        let mut favorites = FavoriteSet::new();
        let id = request_id_of(&controller.load());
        controller.apply_response(
            WorkerResponse::ReportsLoaded { request_id: id, reports: vec![report(1, "a")] },
            &mut favorites,
        );

        let (outcome, _) = controller.on_delete(1, &mut true);
        assert_eq!(outcome, DeleteOutcome::Dispatched);
        assert!(controller.is_delete_pending(1));

        let (outcome, actions) = controller.on_delete(1, &mut true);
        assert_eq!(outcome, DeleteOutcome::AlreadyPending);
        assert!(actions.is_empty());

        let (_, actions) = controller.apply_response(
            WorkerResponse::DeleteFailed { report_id: 1, message: "500".into() },
            &mut favorites,
        );
        assert_eq!(actions, vec![Action::Alert(Notice::DeleteFailed { report_id: 1 })]);
        assert!(!controller.is_delete_pending(1));
        assert_eq!(controller.list().reports().len(), 1);
    }

    #[test]
    fn stale_list_result_does_not_resurrect_deleted_report() {
        let mut controller = ListController::default();
        let mut favorites = FavoriteSet::new();

        let id = request_id_of(&controller.load());
        controller.on_delete(2, &mut true);
        controller.apply_response(WorkerResponse::ReportDeleted { report_id: 2 }, &mut favorites);

        controller.apply_response(
            WorkerResponse::ReportsLoaded {
                request_id: id,
                reports: vec![report(1, "a"), report(2, "b")],
            },
            &mut favorites,
        );
        let ids: Vec<_> = controller.list().reports().iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![1]);
    }

    #[test]
    fn load_lets_the_superseded_filter_search_again() {
        let t0 = Instant::now();
        let mut controller = ListController::default();

        controller.on_title_changed("plast", t0);
        assert_eq!(posted(&controller.poll(t0 + Duration::from_millis(300))).len(), 1);

        controller.load();
        controller.on_title_changed("plast", t0 + Duration::from_millis(1000));
        assert_eq!(posted(&controller.poll(t0 + Duration::from_millis(1300))).len(), 1);
    }

    #[test]
    fn clear_favorites_is_confirmed_and_guarded() {
        let mut controller = ListController::default();
        let mut favorites = FavoriteSet::from_reports([report(1, "a"), report(2, "b")]);

        let (outcome, actions) = controller.on_clear_favorites(&true, &mut false);
        assert_eq!(outcome, ClearOutcome::Cancelled);
        assert!(actions.is_empty());

        let (outcome, actions) = controller.on_clear_favorites(&true, &mut true);
        assert_eq!(outcome, ClearOutcome::Dispatched);
        assert!(matches!(posted(&actions).as_slice(), [WorkerMessage::ClearFavorites { .. }]));
        assert!(controller.is_clearing_favorites());
        assert_eq!(controller.on_clear_favorites(&true, &mut true).0, ClearOutcome::AlreadyPending);

        let (_, actions) = controller.apply_response(
            WorkerResponse::ClearFavoritesFailed { message: "disk full".into() },
            &mut favorites,
        );
        assert_eq!(actions, vec![Action::Alert(Notice::ClearFavoritesFailed)]);
        assert_eq!(favorites.len(), 2);
        assert!(!controller.is_clearing_favorites());

        controller.on_clear_favorites(&true, &mut true);
        controller.apply_response(WorkerResponse::FavoritesCleared, &mut favorites);
        assert!(favorites.is_empty());
        assert!(!controller.is_clearing_favorites());
    }

    #[test]
    fn remove_favorite_shares_the_toggle_token() {
        let mut controller = ListController::default();
        let favorites = FavoriteSet::from_reports([report(6, "a")]);

        let (outcome, _) = controller.on_remove_favorite(6, &true);
        assert_eq!(outcome, ToggleOutcome::Dispatched(FavoriteChange::Remove));
        assert!(controller.is_favorite_pending(6));

        let (outcome, actions) = controller.on_toggle_favorite(&report(6, "a"), &true, &favorites);
        assert_eq!(outcome, ToggleOutcome::AlreadyPending);
        assert!(actions.is_empty());
    }

    #[test]
    fn detail_shows_fetched_report_until_deleted() {
        let mut controller = ListController::default();
        let mut favorites = FavoriteSet::new();

        let actions = controller.open_detail(3);
        assert!(matches!(posted(&actions).as_slice(), [WorkerMessage::FetchReport { report_id: 3, .. }]));
        assert!(controller.detail().is_some_and(DetailState::is_loading));

        controller.apply_response(WorkerResponse::ReportFetched { report: report(3, "drums") }, &mut favorites);
        assert_eq!(controller.find_report(3).map(|r| r.title.as_str()), Some("drums"));

        controller.on_delete(3, &mut true);
        controller.apply_response(WorkerResponse::ReportDeleted { report_id: 3 }, &mut favorites);
        let detail = controller.detail().unwrap();
        assert!(detail.report().is_none());
        assert_eq!(detail.error(), Some(crate::app::DETAIL_NOT_FOUND_MESSAGE));
        assert!(controller.find_report(3).is_none());
    }

    #[test]
    fn detail_fetch_failure_is_not_found() {
        let mut controller = ListController::default();
        let mut favorites = FavoriteSet::new();

        controller.open_detail(8);
        let (render, _) = controller.apply_response(
            WorkerResponse::ReportFetchFailed { report_id: 8, message: "not found: 8".into() },
            &mut favorites,
        );
        assert!(render);
        assert_eq!(controller.detail().and_then(DetailState::error), Some("Report not found"));

        controller.close_detail();
        let (render, _) = controller.apply_response(
            WorkerResponse::ReportFetched { report: report(8, "late") },
            &mut favorites,
        );
        assert!(!render);
    }

    #[test]
    fn favorites_sync_replaces_local_set() {
        let mut controller = ListController::default();
        let mut favorites = FavoriteSet::new();

        let actions = controller.sync_favorites();
        assert!(matches!(posted(&actions).as_slice(), [WorkerMessage::FetchFavorites { .. }]));

        controller.apply_response(
            WorkerResponse::FavoritesLoaded { reports: vec![report(2, "b"), report(5, "e")] },
            &mut favorites,
        );
        assert_eq!(favorites.ids(), vec![2, 5]);

        let (_, actions) = controller.apply_response(
            WorkerResponse::FavoritesSyncFailed { message: "io".into() },
            &mut favorites,
        );
        assert_eq!(actions, vec![Action::Alert(Notice::FavoritesSyncFailed)]);
        assert_eq!(favorites.len(), 2);
    }

    #[test]
    fn toggle_on_deleted_report_is_ignored() {
        let mut controller = ListController::default();
        let mut favorites = FavoriteSet::new();
        let r = report(4, "drums");

        controller.on_delete(4, &mut true);
        controller.apply_response(WorkerResponse::ReportDeleted { report_id: 4 }, &mut favorites);

        let (outcome, actions) = controller.on_toggle_favorite(&r, &true, &favorites);
        assert_eq!(outcome, ToggleOutcome::Deleted);
        assert!(actions.is_empty());
    }
}
