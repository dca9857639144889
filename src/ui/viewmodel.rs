//! View model types representing renderable list, favorites and detail state.
//!
//! View models are immutable snapshots computed from the controller and the
//! favorites store. Favorite membership is read live from the store for every row,
//! never cached in the controller. Busy flags come from the mutation tracker, so a
//! row can show a disabled control while its toggle or delete is in flight.

use crate::app::{FavoritesStore, ListController};
use crate::domain::{Category, Report, ReportId, SearchFilter};

/// Complete list view model.
#[derive(Debug, Clone, PartialEq)]
pub struct ListViewModel {
    /// Visible reports, in list order.
    pub rows: Vec<ReportRow>,

    /// A list request is outstanding.
    pub is_loading: bool,

    /// Message of the last failed list request, cleared by the next success.
    pub error: Option<String>,

    /// Filter as currently edited by the user.
    pub search_bar: SearchBarInfo,

    /// Shown when the list is settled and empty.
    pub empty_state: Option<EmptyState>,
}

/// One visible report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportRow {
    pub id: ReportId,
    pub title: String,
    pub category: Category,
    pub observed_on: String,
    pub location: String,
    pub is_favorite: bool,

    /// A favorite toggle for this report is in flight.
    pub favorite_busy: bool,

    /// A delete for this report is in flight.
    pub delete_busy: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchBarInfo {
    pub title_query: String,
    pub category: Option<Category>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmptyState {
    pub message: String,
    pub subtitle: String,
}

impl From<&SearchFilter> for SearchBarInfo {
    fn from(filter: &SearchFilter) -> Self {
        Self {
            title_query: filter.title_query.clone(),
            category: filter.category,
        }
    }
}

/// Computes the view model for the current list.
#[must_use]
pub fn compute_viewmodel(controller: &ListController, favorites: &dyn FavoritesStore) -> ListViewModel {
    let list = controller.list();

    let rows: Vec<ReportRow> = list
        .reports()
        .iter()
        .map(|report| ReportRow {
            id: report.id,
            title: report.title.clone(),
            category: report.category,
            observed_on: report.observed_on(),
            location: report.location.clone(),
            is_favorite: favorites.is_member(report.id),
            favorite_busy: controller.is_favorite_pending(report.id),
            delete_busy: controller.is_delete_pending(report.id),
        })
        .collect();

    let empty_state = if rows.is_empty() && !list.is_loading() && list.error().is_none() {
        let subtitle = if controller.filter().is_unfiltered() {
            "No pollution has been reported yet"
        } else {
            "Try a different title or category"
        };
        Some(EmptyState {
            message: "No reports found".to_string(),
            subtitle: subtitle.to_string(),
        })
    } else {
        None
    };

    ListViewModel {
        rows,
        is_loading: list.is_loading(),
        error: list.error().map(str::to_string),
        search_bar: SearchBarInfo::from(controller.filter()),
        empty_state,
    }
}

/// Favorites page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FavoritesViewModel {
    pub rows: Vec<FavoriteRow>,

    /// A clear-all request is in flight.
    pub clearing: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FavoriteRow {
    pub id: ReportId,
    pub title: String,
    pub category: Category,
    pub observed_on: String,
    pub location: String,

    /// A removal for this favorite is in flight.
    pub busy: bool,
}

/// Detail view of one report.
#[derive(Debug, Clone, PartialEq)]
pub struct DetailViewModel {
    pub report_id: ReportId,
    pub is_loading: bool,
    pub error: Option<String>,
    pub report: Option<Report>,
    pub is_favorite: bool,
    pub favorite_busy: bool,
    pub delete_busy: bool,
}

/// Computes the favorites page, ordered by id.
#[must_use]
pub fn compute_favorites_viewmodel<'a>(
    controller: &ListController,
    favorites: impl IntoIterator<Item = &'a Report>,
) -> FavoritesViewModel {
    let rows = favorites
        .into_iter()
        .map(|report| FavoriteRow {
            id: report.id,
            title: report.title.clone(),
            category: report.category,
            observed_on: report.observed_on(),
            location: report.location.clone(),
            busy: controller.is_favorite_pending(report.id),
        })
        .collect();

    FavoritesViewModel {
        rows,
        clearing: controller.is_clearing_favorites(),
    }
}

/// Computes the detail view, if one is open.
#[must_use]
pub fn compute_detail_viewmodel(
    controller: &ListController,
    favorites: &dyn FavoritesStore,
) -> Option<DetailViewModel> {
    let detail = controller.detail()?;
    let id = detail.report_id();

    Some(DetailViewModel {
        report_id: id,
        is_loading: detail.is_loading(),
        error: detail.error().map(str::to_string),
        report: detail.report().cloned(),
        is_favorite: favorites.is_member(id),
        favorite_busy: controller.is_favorite_pending(id),
        delete_busy: controller.is_delete_pending(id),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::{FavoriteSet, RequestId};
    use crate::domain::Report;
    use crate::worker::WorkerResponse;
    use chrono::NaiveDate;

    fn loaded(reports: Vec<Report>, favorites: &mut FavoriteSet) -> ListController {
        let mut controller = ListController::default();
        controller.load();
        controller.apply_response(
            WorkerResponse::ReportsLoaded { request_id: RequestId(1), reports },
            favorites,
        );
        controller
    }

    #[test]
    fn rows_reflect_live_membership_and_busy_flags() {
        let d = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();
        let a = Report::new(1, "Sacs", Category::Plastic, d);
        let b = Report::new(2, "Huile", Category::Water, d);
        let mut favorites = FavoriteSet::from_reports([a.clone()]);
        let mut controller = loaded(vec![a, b.clone()], &mut favorites);

        controller.on_toggle_favorite(&b, &true, &favorites);
        controller.on_delete(1, &mut true);

        let vm = compute_viewmodel(&controller, &favorites);
        assert_eq!(vm.rows.len(), 2);
        assert!(vm.rows[0].is_favorite && vm.rows[0].delete_busy && !vm.rows[0].favorite_busy);
        assert!(!vm.rows[1].is_favorite && vm.rows[1].favorite_busy);
        assert_eq!(vm.rows[0].observed_on, "15 Mar 2024");
        assert!(vm.empty_state.is_none());
    }

    #[test]
    fn favorites_page_flags_pending_removals() {
        let d = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();
        let favorites = FavoriteSet::from_reports([
            Report::new(4, "Bidons", Category::Chemical, d),
            Report::new(2, "Sacs", Category::Plastic, d),
        ]);
        let mut controller = ListController::default();
        controller.on_remove_favorite(4, &true);

        let vm = compute_favorites_viewmodel(&controller, favorites.iter());
        let ids: Vec<_> = vm.rows.iter().map(|r| (r.id, r.busy)).collect();
        assert_eq!(ids, vec![(2, false), (4, true)]);
        assert!(!vm.clearing);
    }

    #[test]
    fn detail_viewmodel_follows_open_view() {
        let favorites = FavoriteSet::new();
        let mut controller = ListController::default();
        assert!(compute_detail_viewmodel(&controller, &favorites).is_none());

        controller.open_detail(9);
        let vm = compute_detail_viewmodel(&controller, &favorites).unwrap();
        assert_eq!(vm.report_id, 9);
        assert!(vm.is_loading && vm.report.is_none());
    }

    #[test]
    fn empty_state_only_when_settled() {
        let mut favorites = FavoriteSet::new();
        let mut controller = ListController::default();
        controller.load();
        assert!(compute_viewmodel(&controller, &favorites).empty_state.is_none());

        controller.apply_response(
            WorkerResponse::ReportsLoaded { request_id: RequestId(1), reports: vec![] },
            &mut favorites,
        );
        let vm = compute_viewmodel(&controller, &favorites);
        assert_eq!(vm.empty_state.map(|e| e.message), Some("No reports found".to_string()));
    }
}
