//! Storage layer for the report collection and persisted favorites.
//!
//! This module provides the backend the worker thread executes requests against.
//! The default backend is a JSON file; filtering happens in-process.
//!
//! # Modules
//!
//! - `backend`: [`Catalog`] trait abstraction for backend implementations
//! - `json`: JSON file-based catalog implementation
//! - `matching`: Category and fuzzy title matching

pub mod backend;
pub mod json;
pub mod matching;

pub use backend::Catalog;
pub use json::JsonCatalog;
pub use matching::{filter_reports, ReportMatcher};
