//! Event handling and dispatch into the controller.
//!
//! The runtime translates user input, timer wakeups and worker responses into
//! [`Event`]s and feeds them to [`handle_event`] one at a time. The handler routes each
//! event to the matching [`ListController`] operation and returns whether the view
//! should be recomputed, along with the actions to execute.
//!
//! ```text
//! User Input ─┐
//! Timer Tick ─┼─→ Event → handle_event → ListController → Actions → Runtime
//!             │                                              │
//!             └──────────── Worker Responses ←───────────────┘
//! ```

use super::collaborators::{AuthState, ConfirmGate, FavoritesStore};
use super::controller::{ClearOutcome, DeleteOutcome, ListController, ToggleOutcome};
use crate::app::Action;
use crate::domain::{CatalogError, Category, ReportId, Result, SearchFilter};
use crate::worker::WorkerResponse;
use std::time::Instant;

/// Events delivered to the controller by the runtime.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// Unconditional fetch of the whole collection (startup, manual refresh).
    Reload,

    /// The title search text changed.
    TitleChanged(String),

    /// The category selector changed. `None` means "all categories".
    CategoryChanged(Option<Category>),

    /// Both filter fields changed at once.
    FilterChanged(SearchFilter),

    /// A previously requested wakeup time may have passed.
    Tick,

    /// The favorite control of a visible report was activated.
    ToggleFavorite(ReportId),

    /// The delete control of a report was activated.
    Delete(ReportId),

    /// A favorite was removed from the favorites page.
    RemoveFavorite(ReportId),

    /// "Clear all" was activated on the favorites page.
    ClearFavorites,

    /// The user signed in; local favorites are resynchronized.
    SignedIn,

    /// The detail view of a report was opened.
    OpenDetail(ReportId),

    /// The detail view was left.
    CloseDetail,

    /// A response from the background worker.
    WorkerResponse(WorkerResponse),
}

/// Collaborators and clock reading for one event.
pub struct Context<'a> {
    /// Time at which the event is processed.
    pub now: Instant,
    pub favorites: &'a mut dyn FavoritesStore,
    pub auth: &'a dyn AuthState,
    pub confirm: &'a mut dyn ConfirmGate,
}

/// Processes an event and returns `(should_render, actions)`.
///
/// # Errors
///
/// Returns [`CatalogError::NotFound`] when a favorite toggle names a report that is
/// neither in the visible list nor in the open detail view, or when a favorites-page
/// removal names a report that is not a favorite. Guarded rejections
/// (unauthenticated user, duplicate pending action, declined confirmation) are not
/// errors, and the authentication check runs before any lookup.
pub fn handle_event(
    controller: &mut ListController,
    ctx: &mut Context<'_>,
    event: Event,
) -> Result<(bool, Vec<Action>)> {
    let _span = tracing::debug_span!("handle_event", event_type = ?event).entered();

    match event {
        Event::Reload => Ok((true, controller.load())),
        Event::TitleChanged(title) => Ok((true, controller.on_title_changed(title, ctx.now))),
        Event::CategoryChanged(category) => {
            Ok((true, controller.on_category_changed(category, ctx.now)))
        }
        Event::FilterChanged(filter) => Ok((true, controller.on_filter_changed(filter, ctx.now))),
        Event::Tick => {
            let actions = controller.poll(ctx.now);
            Ok((!actions.is_empty(), actions))
        }
        Event::ToggleFavorite(id) => {
            if !ctx.auth.is_authenticated() {
                tracing::debug!(report_id = id, "toggle rejected, not authenticated");
                return Ok((false, vec![Action::RedirectToLogin]));
            }

            let report = controller
                .find_report(id)
                .cloned()
                .ok_or(CatalogError::NotFound(id))?;

            let (outcome, actions) = controller.on_toggle_favorite(&report, ctx.auth, &*ctx.favorites);
            tracing::debug!(report_id = id, outcome = ?outcome, "toggle handled");
            Ok((matches!(outcome, ToggleOutcome::Dispatched(_)), actions))
        }
        Event::Delete(id) => {
            let (outcome, actions) = controller.on_delete(id, &mut *ctx.confirm);
            tracing::debug!(report_id = id, outcome = ?outcome, "delete handled");
            Ok((outcome == DeleteOutcome::Dispatched, actions))
        }
        Event::RemoveFavorite(id) => {
            if !ctx.auth.is_authenticated() {
                return Ok((false, vec![Action::RedirectToLogin]));
            }
            if !ctx.favorites.is_member(id) {
                return Err(CatalogError::NotFound(id));
            }

            let (outcome, actions) = controller.on_remove_favorite(id, ctx.auth);
            tracing::debug!(report_id = id, outcome = ?outcome, "favorite removal handled");
            Ok((matches!(outcome, ToggleOutcome::Dispatched(_)), actions))
        }
        Event::ClearFavorites => {
            let (outcome, actions) = controller.on_clear_favorites(ctx.auth, &mut *ctx.confirm);
            tracing::debug!(outcome = ?outcome, "clear favorites handled");
            Ok((outcome == ClearOutcome::Dispatched, actions))
        }
        Event::SignedIn => Ok((false, controller.sync_favorites())),
        Event::OpenDetail(id) => Ok((true, controller.open_detail(id))),
        Event::CloseDetail => {
            controller.close_detail();
            Ok((true, vec![]))
        }
        Event::WorkerResponse(response) => {
            Ok(controller.apply_response(response, &mut *ctx.favorites))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::favorites::FavoriteSet;
    use crate::app::RequestId;
    use crate::domain::Report;
    use crate::worker::WorkerMessage;
    use chrono::NaiveDate;
    use std::time::Duration;

    struct Harness {
        controller: ListController,
        favorites: FavoriteSet,
        signed_in: bool,
        confirm: bool,
        now: Instant,
    }

    impl Harness {
        fn new() -> Self {
            Self {
                controller: ListController::default(),
                favorites: FavoriteSet::new(),
                signed_in: true,
                confirm: true,
                now: Instant::now(),
            }
        }

        fn send(&mut self, event: Event) -> Result<(bool, Vec<Action>)> {
            let mut ctx = Context {
                now: self.now,
                favorites: &mut self.favorites,
                auth: &self.signed_in,
                confirm: &mut self.confirm,
            };
            handle_event(&mut self.controller, &mut ctx, event)
        }
    }

    fn report(id: ReportId) -> Report {
        let date = NaiveDate::from_ymd_opt(2023, 11, 20).unwrap();
        Report::new(id, format!("report {id}"), Category::Air, date)
    }

    #[test]
    fn tick_renders_only_when_a_search_leaves() {
        let mut h = Harness::new();
        h.send(Event::TitleChanged("fumée".into())).unwrap();

        let (render, actions) = h.send(Event::Tick).unwrap();
        assert!(!render);
        assert!(actions.is_empty());

        h.now += Duration::from_millis(300);
        let (render, actions) = h.send(Event::Tick).unwrap();
        assert!(render);
        assert!(matches!(actions.as_slice(), [Action::PostToWorker(WorkerMessage::FetchFiltered { .. })]));
    }

    #[test]
    fn toggle_unknown_report_is_an_error() {
        let mut h = Harness::new();
        assert!(matches!(h.send(Event::ToggleFavorite(99)), Err(CatalogError::NotFound(99))));
    }

    #[test]
    fn toggle_resolves_report_from_visible_list() {
        let mut h = Harness::new();
        h.send(Event::Reload).unwrap();
        h.send(Event::WorkerResponse(WorkerResponse::ReportsLoaded {
            request_id: RequestId(1),
            reports: vec![report(1), report(2)],
        }))
        .unwrap();

        let (render, actions) = h.send(Event::ToggleFavorite(2)).unwrap();
        assert!(render);
        match actions.as_slice() {
            [Action::PostToWorker(WorkerMessage::AddFavorite { report, .. })] => assert_eq!(report.id, 2),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn unauthenticated_toggle_redirects() {
        let mut h = Harness::new();
        h.signed_in = false;
        h.send(Event::Reload).unwrap();
        h.send(Event::WorkerResponse(WorkerResponse::ReportsLoaded {
            request_id: RequestId(1),
            reports: vec![report(42)],
        }))
        .unwrap();

        let (render, actions) = h.send(Event::ToggleFavorite(42)).unwrap();
        assert!(!render);
        assert_eq!(actions, vec![Action::RedirectToLogin]);
        assert!(h.controller.tracker().is_empty());
    }

    #[test]
    fn unauthenticated_toggle_redirects_before_lookup() {
        let mut h = Harness::new();
        h.signed_in = false;

        let (render, actions) = h.send(Event::ToggleFavorite(77)).unwrap();
        assert!(!render);
        assert_eq!(actions, vec![Action::RedirectToLogin]);
    }

    #[test]
    fn toggle_resolves_report_from_detail_view() {
        let mut h = Harness::new();
        h.send(Event::OpenDetail(12)).unwrap();
        h.send(Event::WorkerResponse(WorkerResponse::ReportFetched { report: report(12) }))
            .unwrap();

        let (_, actions) = h.send(Event::ToggleFavorite(12)).unwrap();
        assert!(matches!(actions.as_slice(), [Action::PostToWorker(WorkerMessage::AddFavorite { .. })]));
    }

    #[test]
    fn removing_a_non_favorite_is_an_error() {
        let mut h = Harness::new();
        assert!(matches!(h.send(Event::RemoveFavorite(4)), Err(CatalogError::NotFound(4))));

        h.favorites.insert(report(4));
        let (render, actions) = h.send(Event::RemoveFavorite(4)).unwrap();
        assert!(render);
        assert!(matches!(
            actions.as_slice(),
            [Action::PostToWorker(WorkerMessage::RemoveFavorite { report_id: 4, .. })]
        ));
    }

    #[test]
    fn sign_in_requests_favorites_without_render() {
        let mut h = Harness::new();
        let (render, actions) = h.send(Event::SignedIn).unwrap();
        assert!(!render);
        assert!(matches!(actions.as_slice(), [Action::PostToWorker(WorkerMessage::FetchFavorites { .. })]));
    }

    #[test]
    fn declined_delete_does_not_render() {
        let mut h = Harness::new();
        h.confirm = false;
        let (render, actions) = h.send(Event::Delete(3)).unwrap();
        assert!(!render);
        assert!(actions.is_empty());
    }
}
