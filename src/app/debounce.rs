//! Search debouncer.
//!
//! Turns a raw stream of filter edits into at most one dispatch per quiet period.
//! Each edit supersedes the previously recorded filter and pushes the deadline out by
//! the full window (timer reset on event). When the deadline passes, the settled filter
//! is compared with the last dispatched one and dropped if identical.
//!
//! Time is passed in by the caller, so the debouncer never sleeps or spawns timers;
//! the runtime is told when to wake via the returned deadline.

use crate::domain::SearchFilter;
use std::time::{Duration, Instant};

/// Quiet period required before a filter edit is dispatched.
pub const DEFAULT_DEBOUNCE_WINDOW: Duration = Duration::from_millis(300);

#[derive(Debug, Clone)]
struct PendingFilter {
    filter: SearchFilter,
    deadline: Instant,
}

/// Debounce and distinct-until-changed state for the search pipeline.
#[derive(Debug, Clone)]
pub struct SearchDebouncer {
    window: Duration,
    pending: Option<PendingFilter>,
    last_dispatched: Option<SearchFilter>,
}

impl Default for SearchDebouncer {
    fn default() -> Self {
        Self::new(DEFAULT_DEBOUNCE_WINDOW)
    }
}

impl SearchDebouncer {
    #[must_use]
    pub const fn new(window: Duration) -> Self {
        Self {
            window,
            pending: None,
            last_dispatched: None,
        }
    }

    #[must_use]
    pub const fn window(&self) -> Duration {
        self.window
    }

    /// Records the latest filter and returns the new dispatch deadline.
    pub fn record(&mut self, filter: SearchFilter, now: Instant) -> Instant {
        let deadline = now + self.window;
        if self.pending.is_some() {
            tracing::trace!("pending filter superseded, debounce timer reset");
        }
        self.pending = Some(PendingFilter { filter, deadline });
        deadline
    }

    /// Deadline of the filter waiting to be dispatched, if any.
    #[must_use]
    pub fn deadline(&self) -> Option<Instant> {
        self.pending.as_ref().map(|p| p.deadline)
    }

    /// Returns the filter to dispatch once the window has elapsed.
    ///
    /// Returns `None` while the window is still open, when nothing is pending, or when
    /// the settled filter equals the last dispatched one. In the last case the pending
    /// filter is consumed without a dispatch.
    pub fn poll(&mut self, now: Instant) -> Option<SearchFilter> {
        let due = self.pending.as_ref().is_some_and(|p| now >= p.deadline);
        if !due {
            return None;
        }

        let PendingFilter { filter, .. } = self.pending.take()?;

        if self.last_dispatched.as_ref() == Some(&filter) {
            tracing::debug!(title = %filter.title_query, category = ?filter.category, "filter unchanged, skipping search");
            return None;
        }

        self.last_dispatched = Some(filter.clone());
        Some(filter)
    }

    /// Drops the distinct-until-changed baseline.
    ///
    /// Called when a list request that bypasses the debouncer supersedes the last
    /// search, so the next settled filter is dispatched even if it equals that search.
    pub fn forget_dispatched(&mut self) {
        if self.last_dispatched.take().is_some() {
            tracing::trace!("dispatched filter forgotten");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WINDOW: Duration = Duration::from_millis(300);

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn dispatches_only_after_quiet_window() {
        let t0 = Instant::now();
        let mut debouncer = SearchDebouncer::new(WINDOW);

        let deadline = debouncer.record(SearchFilter::new("p", None), t0);
        assert_eq!(deadline, t0 + WINDOW);
        assert_eq!(debouncer.poll(t0 + ms(299)), None);
        assert_eq!(debouncer.poll(t0 + ms(300)), Some(SearchFilter::new("p", None)));
        assert_eq!(debouncer.deadline(), None);
    }

    #[test]
    fn each_edit_resets_the_timer_and_supersedes() {
        let t0 = Instant::now();
        let mut debouncer = SearchDebouncer::new(WINDOW);

        debouncer.record(SearchFilter::new("p", None), t0);
        debouncer.record(SearchFilter::new("pl", None), t0 + ms(200));
        let deadline = debouncer.record(SearchFilter::new("pla", None), t0 + ms(400));

        assert_eq!(debouncer.poll(t0 + ms(500)), None);
        assert_eq!(deadline, t0 + ms(700));
        assert_eq!(debouncer.poll(t0 + ms(700)), Some(SearchFilter::new("pla", None)));
        assert_eq!(debouncer.poll(t0 + ms(2000)), None);
    }

    #[test]
    fn unchanged_filter_is_not_dispatched_twice() {
        let t0 = Instant::now();
        let mut debouncer = SearchDebouncer::new(WINDOW);

        debouncer.record(SearchFilter::new("eau", None), t0);
        assert!(debouncer.poll(t0 + WINDOW).is_some());

        // type then delete back to the same text
        let t1 = t0 + ms(1000);
        debouncer.record(SearchFilter::new("eaux", None), t1);
        debouncer.record(SearchFilter::new("eau", None), t1 + ms(50));
        assert_eq!(debouncer.poll(t1 + ms(400)), None);
        assert_eq!(debouncer.deadline(), None);
    }

    #[test]
    fn forgotten_filter_can_be_dispatched_again() {
        let t0 = Instant::now();
        let mut debouncer = SearchDebouncer::new(WINDOW);

        debouncer.record(SearchFilter::new("plast", None), t0);
        assert!(debouncer.poll(t0 + WINDOW).is_some());

        debouncer.forget_dispatched();
        debouncer.record(SearchFilter::new("plast", None), t0 + ms(1000));
        assert_eq!(debouncer.poll(t0 + ms(1300)), Some(SearchFilter::new("plast", None)));
    }

    #[test]
    fn empty_filter_is_dispatchable() {
        let t0 = Instant::now();
        let mut debouncer = SearchDebouncer::new(WINDOW);

        debouncer.record(SearchFilter::default(), t0);
        assert_eq!(debouncer.poll(t0 + WINDOW), Some(SearchFilter::default()));
    }
}
