//! Actions representing side effects to be executed by the runtime.
//!
//! The controller never performs I/O itself. Every operation returns a `Vec<Action>`
//! that the runtime executes in order: posting requests to the background worker,
//! scheduling a debounce wakeup, surfacing a transient alert, or redirecting to login.

use crate::domain::ReportId;
use crate::worker::WorkerMessage;
use std::fmt;
use std::time::Instant;

/// Commands produced by the controller for the runtime to execute.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Posts a request to the background worker.
    ///
    /// The matching response is fed back as
    /// [`Event::WorkerResponse`](crate::app::Event::WorkerResponse).
    PostToWorker(WorkerMessage),

    /// Asks the runtime to deliver [`Event::Tick`](crate::app::Event::Tick) no earlier
    /// than the given instant.
    ///
    /// Emitted on every filter edit. Ticks delivered for an outdated deadline are
    /// harmless; the debouncer only fires once its current deadline has passed.
    WakeAt(Instant),

    /// Shows a transient, user-visible message.
    Alert(Notice),

    /// Navigates to the login screen after a guarded rejection.
    RedirectToLogin,
}

/// Transient user-visible message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notice {
    /// A delete request failed; the list is unchanged.
    DeleteFailed { report_id: ReportId },

    /// A favorite add or remove failed; membership is unchanged.
    FavoriteFailed { report_id: ReportId },

    /// Clearing all favorites failed; none were removed.
    ClearFavoritesFailed,

    /// The persisted favorites could not be read.
    FavoritesSyncFailed,
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DeleteFailed { report_id } => write!(f, "Could not delete report {report_id}"),
            Self::FavoriteFailed { report_id } => {
                write!(f, "Could not update favorites for report {report_id}")
            }
            Self::ClearFavoritesFailed => f.write_str("Could not clear favorites"),
            Self::FavoritesSyncFailed => f.write_str("Could not load favorites"),
        }
    }
}
