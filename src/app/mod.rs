//! Application layer: the reactive list controller.
//!
//! This module holds the coordination logic that keeps the visible report list
//! correct while searches, reloads, favorite toggles and deletes resolve
//! asynchronously and in any order.
//!
//! # Architecture
//!
//! ```text
//! User Input → Events → handle_event → ListController → Actions → Side Effects
//!                             ↑                                      ↓
//!                             └────────── Worker Responses ──────────┘
//! ```
//!
//! # Modules
//!
//! - [`actions`]: Side effect commands returned to the runtime
//! - [`collaborators`]: Favorites, authentication and confirmation interfaces
//! - [`controller`]: The list controller and its operation outcomes
//! - [`debounce`]: Timer-reset debounce with distinct-until-changed
//! - [`detail`]: Single-report detail view
//! - [`favorites`]: In-memory favorites store
//! - [`handler`]: Event type and dispatch
//! - [`state`]: List state holder and request sequencing
//! - [`tracker`]: Per-report mutation tokens

pub mod actions;
pub mod collaborators;
pub mod controller;
pub mod debounce;
pub mod detail;
pub mod favorites;
pub mod handler;
pub mod state;
pub mod tracker;

pub use actions::{Action, Notice};
pub use collaborators::{AuthState, ConfirmGate, FavoritesStore};
pub use controller::{
    ClearOutcome, DeleteOutcome, ListController, ToggleOutcome, CLEAR_FAVORITES_PROMPT, DELETE_PROMPT,
};
pub use debounce::{SearchDebouncer, DEFAULT_DEBOUNCE_WINDOW};
pub use detail::{DetailState, DETAIL_NOT_FOUND_MESSAGE};
pub use favorites::FavoriteSet;
pub use handler::{handle_event, Context, Event};
pub use state::{ListState, RequestId, RequestKind};
pub use tracker::{MutationKind, MutationToken, MutationTracker};
