//! Infrastructure layer for filesystem and environment interactions.
//!
//! Resolves where the catalog, configuration and trace files live.

pub mod paths;

pub use paths::{expand_tilde, get_config_path, get_data_dir};
