//! Report filtering used by the file-backed catalog.
//!
//! The category constraint is an exact match. The title query is split on whitespace
//! and every token must fuzzy-match the lowercased title, so `"sac plage"` finds
//! "Sacs plastiques sur la plage". An empty filter keeps every report.

use crate::domain::{Report, SearchFilter};
use fuzzy_matcher::skim::SkimMatcherV2;
use fuzzy_matcher::FuzzyMatcher;

/// Compiled form of a [`SearchFilter`], reusable across many reports.
pub struct ReportMatcher<'a> {
    filter: &'a SearchFilter,
    tokens: Vec<String>,
    matcher: Option<SkimMatcherV2>,
}

impl<'a> ReportMatcher<'a> {
    #[must_use]
    pub fn new(filter: &'a SearchFilter) -> Self {
        let tokens: Vec<String> = filter
            .title()
            .map(|q| q.split_whitespace().map(str::to_lowercase).collect())
            .unwrap_or_default();

        let matcher = if tokens.is_empty() {
            None
        } else {
            Some(SkimMatcherV2::default())
        };

        Self { filter, tokens, matcher }
    }

    #[must_use]
    pub fn matches(&self, report: &Report) -> bool {
        if let Some(category) = self.filter.category {
            if report.category != category {
                return false;
            }
        }

        self.matcher.as_ref().map_or(true, |m| {
            let title_lower = report.title.to_lowercase();
            self.tokens.iter().all(|token| m.fuzzy_match(&title_lower, token).is_some())
        })
    }
}

/// Reports from `reports` that satisfy `filter`, in their original order.
#[must_use]
pub fn filter_reports<'r>(reports: impl IntoIterator<Item = &'r Report>, filter: &SearchFilter) -> Vec<Report> {
    let _span = tracing::debug_span!("filter_reports",
        title = %filter.title_query,
        category = ?filter.category
    ).entered();

    let matcher = ReportMatcher::new(filter);
    let matched: Vec<Report> = reports.into_iter().filter(|r| matcher.matches(r)).cloned().collect();

    tracing::debug!(matched = matched.len(), "filter applied");
    matched
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Category;
    use chrono::NaiveDate;

    fn sample() -> Vec<Report> {
        let d = NaiveDate::from_ymd_opt(2024, 4, 12).unwrap();
        vec![
            Report::new(1, "Sacs plastiques sur la plage", Category::Plastic, d),
            Report::new(2, "Fumée noire usine", Category::Air, d),
            Report::new(3, "Bouteilles plastique rivière", Category::Water, d),
        ]
    }

    fn ids(reports: &[Report]) -> Vec<i64> {
        reports.iter().map(|r| r.id).collect()
    }

    #[test]
    fn empty_filter_keeps_everything() {
        let reports = sample();
        assert_eq!(ids(&filter_reports(&reports, &SearchFilter::default())), vec![1, 2, 3]);
    }

    #[test]
    fn title_tokens_all_have_to_match() {
        let reports = sample();
        let filter = SearchFilter::new("plast plage", None);
        assert_eq!(ids(&filter_reports(&reports, &filter)), vec![1]);
    }

    #[test]
    fn title_match_ignores_case() {
        let reports = sample();
        let filter = SearchFilter::new("FUMÉE", None);
        assert_eq!(ids(&filter_reports(&reports, &filter)), vec![2]);
    }

    #[test]
    fn category_and_title_combine() {
        let reports = sample();
        let filter = SearchFilter::new("plastique", Some(Category::Water));
        assert_eq!(ids(&filter_reports(&reports, &filter)), vec![3]);

        let filter = SearchFilter::new("", Some(Category::Air));
        assert_eq!(ids(&filter_reports(&reports, &filter)), vec![2]);
    }
}
