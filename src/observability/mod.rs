//! OpenTelemetry-based observability with file-based trace export.
//!
//! ```text
//! tracing-opentelemetry → OpenTelemetry SDK → FileSpanExporter → RotatingWriter
//! ```
//!
//! Spans land in `ecoreport-otlp.json` inside the data directory, one OTLP/JSON
//! document per line. The file rotates at 10 MB and keeps three numbered backups.
//!
//! Trace level is controlled via:
//! 1. `RUST_LOG` environment variable (highest priority)
//! 2. `trace_level` in the configuration file
//! 3. Default: `"info"`
//!
//! # Modules
//!
//! - [`init`]: Subscriber setup
//! - [`tracer`]: Tracer provider with the file exporter
//! - [`otlp`]: OTLP JSON document model
//! - [`file_writer`]: Size-rotated line writer

pub mod file_writer;
pub mod init;
pub mod otlp;
mod tracer;

pub use init::{init_tracing, TRACE_FILE};
