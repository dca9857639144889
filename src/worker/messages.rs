//! Worker message protocol.
//!
//! Requests flow from the controller to the background worker as [`WorkerMessage`]s
//! and come back as [`WorkerResponse`]s. Both are JSON-serialized across the thread
//! boundary. Each request carries an optional [`TraceContext`] so spans opened by the
//! worker join the trace of the action that caused them.
//!
//! List responses echo the request's [`RequestId`]; the controller uses it to discard
//! results of superseded requests. Item responses echo the report id, which is enough
//! to find and clear the matching mutation token.

use crate::app::RequestId;
use crate::domain::{Report, ReportId, SearchFilter};
use serde::{Deserialize, Serialize};

/// Trace and parent span ids captured on the sending thread.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraceContext {
    /// OpenTelemetry trace id, 32 hex chars.
    pub trace_id: String,

    /// Span id of the sender, 16 hex chars.
    pub parent_span_id: String,
}

impl TraceContext {
    /// Captures the OpenTelemetry context of the current tracing span.
    ///
    /// Returns `None` when no valid span context is active, e.g. when tracing was
    /// never initialized.
    #[must_use]
    pub fn from_current() -> Option<Self> {
        use opentelemetry::trace::TraceContextExt;
        use tracing_opentelemetry::OpenTelemetrySpanExt;

        let context = tracing::Span::current().context();
        let span = context.span();
        let span_context = span.span_context();

        if !span_context.is_valid() {
            return None;
        }

        Some(Self {
            trace_id: format!("{:032x}", span_context.trace_id()),
            parent_span_id: format!("{:016x}", span_context.span_id()),
        })
    }
}

/// Direction of a favorite change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FavoriteChange {
    Add,
    Remove,
}

/// Generates constructors that attach the current trace context.
macro_rules! worker_message_builders {
    (
        $(
            $builder_name:ident($variant:ident { $($field:ident: $ty:ty),* $(,)? })
        ),* $(,)?
    ) => {
        impl WorkerMessage {
            $(
                #[doc = concat!("Creates a `", stringify!($variant), "` message with the current trace context.")]
                #[must_use]
                pub fn $builder_name($($field: $ty),*) -> Self {
                    Self::$variant {
                        $($field,)*
                        trace_context: TraceContext::from_current(),
                    }
                }
            )*
        }
    };
}

worker_message_builders! {
    fetch_all(FetchAll { request_id: RequestId }),
    fetch_filtered(FetchFiltered { request_id: RequestId, filter: SearchFilter }),
    delete_report(DeleteReport { report_id: ReportId }),
    add_favorite(AddFavorite { report: Report }),
    remove_favorite(RemoveFavorite { report_id: ReportId }),
    fetch_report(FetchReport { report_id: ReportId }),
    fetch_favorites(FetchFavorites {}),
    clear_favorites(ClearFavorites {}),
}

/// Requests sent to the worker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum WorkerMessage {
    /// Fetch the whole collection.
    FetchAll {
        request_id: RequestId,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        trace_context: Option<TraceContext>,
    },

    /// Fetch the reports matching a filter.
    FetchFiltered {
        request_id: RequestId,
        filter: SearchFilter,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        trace_context: Option<TraceContext>,
    },

    /// Delete a report from the collection.
    DeleteReport {
        report_id: ReportId,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        trace_context: Option<TraceContext>,
    },

    /// Persist a report as a favorite.
    AddFavorite {
        report: Report,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        trace_context: Option<TraceContext>,
    },

    /// Remove a persisted favorite.
    RemoveFavorite {
        report_id: ReportId,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        trace_context: Option<TraceContext>,
    },

    /// Fetch one report for the detail view.
    FetchReport {
        report_id: ReportId,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        trace_context: Option<TraceContext>,
    },

    /// Fetch the persisted favorites.
    FetchFavorites {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        trace_context: Option<TraceContext>,
    },

    /// Remove every persisted favorite.
    ClearFavorites {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        trace_context: Option<TraceContext>,
    },
}

impl WorkerMessage {
    /// Trace context attached when the message was built.
    #[must_use]
    pub fn trace_context(&self) -> Option<&TraceContext> {
        match self {
            Self::FetchAll { trace_context, .. }
            | Self::FetchFiltered { trace_context, .. }
            | Self::DeleteReport { trace_context, .. }
            | Self::AddFavorite { trace_context, .. }
            | Self::RemoveFavorite { trace_context, .. }
            | Self::FetchReport { trace_context, .. }
            | Self::FetchFavorites { trace_context }
            | Self::ClearFavorites { trace_context } => trace_context.as_ref(),
        }
    }

    /// Short operation name for logs and span names.
    #[must_use]
    pub const fn operation(&self) -> &'static str {
        match self {
            Self::FetchAll { .. } => "fetch all",
            Self::FetchFiltered { .. } => "fetch filtered",
            Self::DeleteReport { .. } => "delete report",
            Self::AddFavorite { .. } => "add favorite",
            Self::RemoveFavorite { .. } => "remove favorite",
            Self::FetchReport { .. } => "fetch report",
            Self::FetchFavorites { .. } => "fetch favorites",
            Self::ClearFavorites { .. } => "clear favorites",
        }
    }

    /// Builds the failure response this request would get from the worker.
    ///
    /// Used when the request never reaches the worker, so whatever the controller
    /// marked as pending for it still settles.
    #[must_use]
    pub fn failure_response(&self, message: String) -> WorkerResponse {
        match self {
            Self::FetchAll { request_id, .. } | Self::FetchFiltered { request_id, .. } => {
                WorkerResponse::ReportsFailed { request_id: *request_id, message }
            }
            Self::DeleteReport { report_id, .. } => WorkerResponse::DeleteFailed {
                report_id: *report_id,
                message,
            },
            Self::AddFavorite { report, .. } => WorkerResponse::FavoriteFailed {
                report_id: report.id,
                change: FavoriteChange::Add,
                message,
            },
            Self::RemoveFavorite { report_id, .. } => WorkerResponse::FavoriteFailed {
                report_id: *report_id,
                change: FavoriteChange::Remove,
                message,
            },
            Self::FetchReport { report_id, .. } => WorkerResponse::ReportFetchFailed {
                report_id: *report_id,
                message,
            },
            Self::FetchFavorites { .. } => WorkerResponse::FavoritesSyncFailed { message },
            Self::ClearFavorites { .. } => WorkerResponse::ClearFavoritesFailed { message },
        }
    }
}

/// Responses sent back by the worker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum WorkerResponse {
    /// A fetch or search succeeded.
    ReportsLoaded {
        request_id: RequestId,
        reports: Vec<Report>,
    },

    /// A fetch or search failed.
    ReportsFailed {
        request_id: RequestId,
        message: String,
    },

    /// The report was deleted from the collection.
    ReportDeleted { report_id: ReportId },

    /// The delete request failed.
    DeleteFailed { report_id: ReportId, message: String },

    /// The favorite was persisted.
    FavoriteAdded { report: Report },

    /// The favorite was removed.
    FavoriteRemoved { report_id: ReportId },

    /// A favorite change failed.
    FavoriteFailed {
        report_id: ReportId,
        change: FavoriteChange,
        message: String,
    },

    /// The detail report was found.
    ReportFetched { report: Report },

    /// The detail report could not be fetched.
    ReportFetchFailed { report_id: ReportId, message: String },

    /// Current persisted favorites.
    FavoritesLoaded { reports: Vec<Report> },

    /// The favorites could not be fetched.
    FavoritesSyncFailed { message: String },

    /// Every favorite was removed.
    FavoritesCleared,

    /// Clearing the favorites failed; nothing was removed.
    ClearFavoritesFailed { message: String },

    /// The worker could not process a request at all.
    Error { message: String },
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Category;
    use chrono::NaiveDate;

    #[test]
    fn failure_response_settles_what_the_request_started() {
        let report = Report::new(3, "Fumée", Category::Air, NaiveDate::from_ymd_opt(2024, 4, 2).unwrap());

        assert_eq!(
            WorkerMessage::fetch_filtered(RequestId(4), SearchFilter::default()).failure_response("down".into()),
            WorkerResponse::ReportsFailed { request_id: RequestId(4), message: "down".into() }
        );
        assert_eq!(
            WorkerMessage::delete_report(3).failure_response("down".into()),
            WorkerResponse::DeleteFailed { report_id: 3, message: "down".into() }
        );
        assert_eq!(
            WorkerMessage::add_favorite(report).failure_response("down".into()),
            WorkerResponse::FavoriteFailed { report_id: 3, change: FavoriteChange::Add, message: "down".into() }
        );
        assert_eq!(
            WorkerMessage::clear_favorites().failure_response("down".into()),
            WorkerResponse::ClearFavoritesFailed { message: "down".into() }
        );
    }

    #[test]
    fn messages_without_fields_round_trip() {
        let json = serde_json::to_string(&WorkerMessage::FetchFavorites { trace_context: None }).unwrap();
        let back: WorkerMessage = serde_json::from_str(&json).unwrap();
        assert_eq!(back.operation(), "fetch favorites");
        assert!(back.trace_context().is_none());
    }
}
