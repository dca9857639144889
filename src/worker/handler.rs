//! Worker implementation for catalog operations.
//!
//! [`CatalogWorker`] owns the [`Catalog`] backend and turns each [`WorkerMessage`]
//! into exactly one [`WorkerResponse`]. Failures never escape as errors: they become
//! the failure variant matching the request, so the controller can settle the
//! request it belongs to.

use crate::domain::{Report, ReportId, Result};
use crate::storage::{Catalog, JsonCatalog};
use crate::worker::{FavoriteChange, WorkerMessage, WorkerResponse};
use std::path::PathBuf;

/// Executes worker messages against a catalog backend.
pub struct CatalogWorker {
    catalog: Box<dyn Catalog>,
}

impl CatalogWorker {
    #[must_use]
    pub fn new(catalog: Box<dyn Catalog>) -> Self {
        Self { catalog }
    }

    /// Creates a worker backed by a JSON catalog file.
    ///
    /// # Errors
    ///
    /// Returns an error if the catalog file cannot be opened.
    pub fn open(path: PathBuf) -> Result<Self> {
        let catalog = JsonCatalog::new(path)?;
        Ok(Self::new(Box::new(catalog)))
    }

    /// Reports currently marked as favorite in the backend.
    ///
    /// Used once at startup to seed the in-memory favorites set.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be read.
    pub fn favorites(&self) -> Result<Vec<Report>> {
        self.catalog.favorites()
    }

    /// Seeds the backend when it holds no reports yet. Returns whether it seeded.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be read or written.
    pub fn seed_if_empty(&mut self, reports: &[Report]) -> Result<bool> {
        if !self.catalog.fetch_all()?.is_empty() {
            return Ok(false);
        }
        self.catalog.insert(reports)?;
        tracing::info!(count = reports.len(), "seeded empty catalog");
        Ok(true)
    }

    /// Maps a backend result to a response, logging the outcome consistently.
    fn handle_result<T>(
        operation: &str,
        result: Result<T>,
        on_success: impl FnOnce(T) -> WorkerResponse,
        on_failure: impl FnOnce(String) -> WorkerResponse,
    ) -> WorkerResponse {
        match result {
            Ok(value) => {
                tracing::debug!(operation = operation, "catalog operation successful");
                on_success(value)
            }
            Err(e) => {
                tracing::warn!(operation = operation, error = %e, "catalog operation failed");
                on_failure(format!("{operation}: {e}"))
            }
        }
    }

    fn handle_delete(&mut self, report_id: ReportId) -> WorkerResponse {
        Self::handle_result(
            "delete report",
            self.catalog.delete_by_id(report_id),
            |()| WorkerResponse::ReportDeleted { report_id },
            |message| WorkerResponse::DeleteFailed { report_id, message },
        )
    }

    fn handle_add_favorite(&mut self, report: Report) -> WorkerResponse {
        let report_id = report.id;
        Self::handle_result(
            "add favorite",
            self.catalog.add_favorite(report_id),
            |()| WorkerResponse::FavoriteAdded { report },
            |message| WorkerResponse::FavoriteFailed {
                report_id,
                change: FavoriteChange::Add,
                message,
            },
        )
    }

    fn handle_remove_favorite(&mut self, report_id: ReportId) -> WorkerResponse {
        Self::handle_result(
            "remove favorite",
            self.catalog.remove_favorite(report_id),
            |()| WorkerResponse::FavoriteRemoved { report_id },
            |message| WorkerResponse::FavoriteFailed {
                report_id,
                change: FavoriteChange::Remove,
                message,
            },
        )
    }

    /// Attaches the sender's trace context so worker spans join its trace.
    ///
    /// The returned guard must be held for the duration of the operation.
    fn attach_parent_trace_context(message: &WorkerMessage) -> Option<opentelemetry::ContextGuard> {
        use opentelemetry::trace::{SpanContext, SpanId, TraceContextExt, TraceFlags, TraceId, TraceState};

        let trace_context = message.trace_context()?;

        let trace_id = TraceId::from_hex(&trace_context.trace_id).ok()?;
        let span_id = SpanId::from_hex(&trace_context.parent_span_id).ok()?;

        let span_context = SpanContext::new(
            trace_id,
            span_id,
            TraceFlags::SAMPLED,
            true,
            TraceState::default(),
        );

        let otel_context = opentelemetry::Context::current().with_remote_span_context(span_context);
        Some(otel_context.attach())
    }

    /// Processes one message and returns its response.
    pub fn handle_message(&mut self, message: WorkerMessage) -> WorkerResponse {
        let _context_guard = Self::attach_parent_trace_context(&message);

        let span = tracing::debug_span!("worker_handle_message", operation = message.operation());
        let _guard = span.entered();

        match message {
            WorkerMessage::FetchAll { request_id, .. } => Self::handle_result(
                "fetch all",
                self.catalog.fetch_all(),
                |reports| WorkerResponse::ReportsLoaded { request_id, reports },
                |message| WorkerResponse::ReportsFailed { request_id, message },
            ),

            WorkerMessage::FetchFiltered { request_id, filter, .. } => Self::handle_result(
                "fetch filtered",
                self.catalog.fetch_filtered(&filter),
                |reports| WorkerResponse::ReportsLoaded { request_id, reports },
                |message| WorkerResponse::ReportsFailed { request_id, message },
            ),

            WorkerMessage::DeleteReport { report_id, .. } => self.handle_delete(report_id),

            WorkerMessage::AddFavorite { report, .. } => self.handle_add_favorite(report),

            WorkerMessage::RemoveFavorite { report_id, .. } => self.handle_remove_favorite(report_id),

            WorkerMessage::FetchReport { report_id, .. } => Self::handle_result(
                "fetch report",
                self.catalog.fetch_by_id(report_id),
                |report| WorkerResponse::ReportFetched { report },
                |message| WorkerResponse::ReportFetchFailed { report_id, message },
            ),

            WorkerMessage::FetchFavorites { .. } => Self::handle_result(
                "fetch favorites",
                self.catalog.favorites(),
                |reports| WorkerResponse::FavoritesLoaded { reports },
                |message| WorkerResponse::FavoritesSyncFailed { message },
            ),

            WorkerMessage::ClearFavorites { .. } => Self::handle_result(
                "clear favorites",
                self.catalog.clear_favorites(),
                |()| WorkerResponse::FavoritesCleared,
                |message| WorkerResponse::ClearFavoritesFailed { message },
            ),
        }
    }

    /// Handles a JSON-serialized message and returns the JSON-serialized response.
    ///
    /// An undecodable payload yields a [`WorkerResponse::Error`]. Returns `None` only
    /// if the response itself cannot be serialized.
    pub fn on_payload(&mut self, payload: &str) -> Option<String> {
        let response = match serde_json::from_str::<WorkerMessage>(payload) {
            Ok(message) => self.handle_message(message),
            Err(e) => {
                tracing::warn!(error = %e, "failed to deserialize worker message");
                WorkerResponse::Error {
                    message: format!("invalid worker message: {e}"),
                }
            }
        };

        match serde_json::to_string(&response) {
            Ok(payload) => Some(payload),
            Err(e) => {
                tracing::error!(error = %e, "failed to serialize worker response");
                None
            }
        }
    }
}
