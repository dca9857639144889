//! Presentation layer: view model and plain-text rendering.
//!
//! # Modules
//!
//! - [`viewmodel`]: Display-ready snapshots of the list, favorites and detail views
//! - [`renderer`]: Line-oriented text output

pub mod renderer;
pub mod viewmodel;

pub use renderer::{render_detail, render_favorites, render_list, render_row};
pub use viewmodel::{
    compute_detail_viewmodel, compute_favorites_viewmodel, compute_viewmodel, DetailViewModel, EmptyState,
    FavoriteRow, FavoritesViewModel, ListViewModel, ReportRow, SearchBarInfo,
};
