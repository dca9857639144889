//! Tracing initialization and subscriber setup.

use super::tracer;
use crate::Config;
use opentelemetry::trace::TracerProvider as _;
use opentelemetry_sdk::resource::Resource;
use std::path::Path;
use tracing_opentelemetry::OpenTelemetryLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// File name of the trace output inside the data directory.
pub const TRACE_FILE: &str = "ecoreport-otlp.json";

/// Installs the global subscriber exporting spans to `<data_dir>/ecoreport-otlp.json`.
///
/// # Trace Level Resolution
///
/// 1. `RUST_LOG`, if set and valid
/// 2. `config.trace_level`
/// 3. `"info"`
///
/// Tracing is optional: if the directory cannot be created, or a subscriber is
/// already installed, this returns `false` and the program runs untraced.
///
/// # Example
///
/// ```rust
/// use ecoreport::observability::init_tracing;
/// use ecoreport::Config;
///
/// let dir = std::env::temp_dir().join("ecoreport-doc");
/// let config = Config {
///     trace_level: Some("debug".to_string()),
///     ..Default::default()
/// };
/// init_tracing(&config, &dir);
/// tracing::debug!("tracing is now active");
/// ```
pub fn init_tracing(config: &Config, data_dir: &Path) -> bool {
    if std::fs::create_dir_all(data_dir).is_err() {
        return false;
    }

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(config.trace_level.as_deref().unwrap_or("info"))
    });

    let resource = Resource::new(vec![opentelemetry::KeyValue::new("service.name", "ecoreport")]);
    let provider = tracer::create_tracer_provider(data_dir.join(TRACE_FILE), resource);
    let otel_layer = OpenTelemetryLayer::new(provider.tracer("ecoreport"));

    tracing_subscriber::registry()
        .with(filter)
        .with(otel_layer)
        .try_init()
        .is_ok()
}
