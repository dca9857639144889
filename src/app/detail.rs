//! Detail view state for a single report.
//!
//! Opening a detail view fetches the report by id, independently of the list. A
//! result for any other id than the one currently shown is ignored.

use crate::domain::{Report, ReportId};

/// Message shown when the report cannot be fetched or was deleted.
pub const DETAIL_NOT_FOUND_MESSAGE: &str = "Report not found";

#[derive(Debug, Clone, PartialEq)]
pub struct DetailState {
    report_id: ReportId,
    report: Option<Report>,
    is_loading: bool,
    error: Option<String>,
}

impl DetailState {
    /// A detail view waiting for its report.
    #[must_use]
    pub const fn loading(report_id: ReportId) -> Self {
        Self {
            report_id,
            report: None,
            is_loading: true,
            error: None,
        }
    }

    #[must_use]
    pub const fn report_id(&self) -> ReportId {
        self.report_id
    }

    #[must_use]
    pub const fn report(&self) -> Option<&Report> {
        self.report.as_ref()
    }

    #[must_use]
    pub const fn is_loading(&self) -> bool {
        self.is_loading
    }

    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Shows a fetched report. Returns `false` if it belongs to another view.
    pub fn settle_found(&mut self, report: Report) -> bool {
        if report.id != self.report_id {
            return false;
        }
        self.report = Some(report);
        self.is_loading = false;
        self.error = None;
        true
    }

    /// Marks the report as gone. Returns `false` if `report_id` is not shown here.
    pub fn settle_missing(&mut self, report_id: ReportId) -> bool {
        if report_id != self.report_id {
            return false;
        }
        self.report = None;
        self.is_loading = false;
        self.error = Some(DETAIL_NOT_FOUND_MESSAGE.to_string());
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Category;
    use chrono::NaiveDate;

    #[test]
    fn results_for_other_reports_are_ignored() {
        let date = NaiveDate::from_ymd_opt(2024, 8, 30).unwrap();
        let mut detail = DetailState::loading(4);

        assert!(!detail.settle_found(Report::new(5, "autre", Category::Other, date)));
        assert!(!detail.settle_missing(5));
        assert!(detail.is_loading());

        assert!(detail.settle_found(Report::new(4, "Eau trouble", Category::Water, date)));
        assert!(!detail.is_loading());
        assert_eq!(detail.report().map(|r| r.title.as_str()), Some("Eau trouble"));

        assert!(detail.settle_missing(4));
        assert!(detail.report().is_none());
        assert_eq!(detail.error(), Some(DETAIL_NOT_FOUND_MESSAGE));
    }
}
