//! Domain layer for the pollution report catalog.
//!
//! Core types independent of the worker transport, the storage format and the
//! binary shell.
//!
//! # Organization
//!
//! - [`error`]: Error type and result alias
//! - [`report`]: Report model, categories and creator info
//! - [`filter`]: Search filter snapshot passed into each list request

pub mod error;
pub mod filter;
pub mod report;

pub use error::{CatalogError, Result};
pub use filter::SearchFilter;
pub use report::{Category, Coordinates, Creator, Report, ReportId};
