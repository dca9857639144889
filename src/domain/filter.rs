//! Search filter snapshot.

use super::report::Category;
use serde::{Deserialize, Serialize};

/// Title and category constraints for a list request.
///
/// Mutated by user input and passed by value into each search request. Two filters
/// are equal iff both fields match exactly; no trimming or case folding is applied,
/// so distinct-until-changed compares exactly what the user typed.
///
/// The default (empty title, no category) is a valid filter meaning "no filtering"
/// and yields the full collection.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct SearchFilter {
    pub title_query: String,
    pub category: Option<Category>,
}

impl SearchFilter {
    #[must_use]
    pub fn new(title_query: impl Into<String>, category: Option<Category>) -> Self {
        Self {
            title_query: title_query.into(),
            category,
        }
    }

    /// Title constraint, `None` when the query is empty.
    #[must_use]
    pub fn title(&self) -> Option<&str> {
        if self.title_query.is_empty() {
            None
        } else {
            Some(&self.title_query)
        }
    }

    /// True when neither field constrains the result.
    #[must_use]
    pub fn is_unfiltered(&self) -> bool {
        self.title_query.is_empty() && self.category.is_none()
    }

    /// Copy of this filter with a different title query.
    #[must_use]
    pub fn with_title(&self, title_query: impl Into<String>) -> Self {
        Self {
            title_query: title_query.into(),
            category: self.category,
        }
    }

    /// Copy of this filter with a different category.
    #[must_use]
    pub fn with_category(&self, category: Option<Category>) -> Self {
        Self {
            title_query: self.title_query.clone(),
            category,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn equality_is_exact_on_both_fields() {
        let a = SearchFilter::new("plast", None);
        assert_eq!(a, SearchFilter::new("plast", None));
        assert_ne!(a, SearchFilter::new("Plast", None));
        assert_ne!(a, SearchFilter::new("plast ", None));
        assert_ne!(a, a.with_category(Some(Category::Plastic)));
    }

    #[test]
    fn default_is_unfiltered() {
        let filter = SearchFilter::default();
        assert!(filter.is_unfiltered());
        assert_eq!(filter.title(), None);
        assert!(!filter.with_title("eau").is_unfiltered());
    }
}
