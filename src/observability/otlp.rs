//! OTLP JSON document model for exported spans.
//!
//! Each exported batch becomes one [`TraceDocument`], serialized with serde into the
//! OTLP/JSON shape collectors accept (`resourceSpans` → `scopeSpans` → `spans`). Ids
//! are lowercase hex, timestamps are nanosecond strings.

use opentelemetry::trace::{SpanId, SpanKind, Status};
use opentelemetry::{KeyValue, Value};
use opentelemetry_sdk::export::trace::SpanData;
use opentelemetry_sdk::resource::Resource;
use serde::Serialize;
use std::time::SystemTime;

/// Instrumentation scope name written into every document.
pub const SCOPE_NAME: &str = "ecoreport";

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TraceDocument {
    pub resource_spans: Vec<ResourceSpans>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceSpans {
    pub resource: ResourceRecord,
    pub scope_spans: Vec<ScopeSpans>,
}

#[derive(Debug, Serialize)]
pub struct ResourceRecord {
    pub attributes: Vec<Attribute>,
}

#[derive(Debug, Serialize)]
pub struct Scope {
    pub name: &'static str,
}

#[derive(Debug, Serialize)]
pub struct ScopeSpans {
    pub scope: Scope,
    pub spans: Vec<SpanRecord>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SpanRecord {
    pub trace_id: String,
    pub span_id: String,
    pub parent_span_id: String,
    pub name: String,
    pub kind: u8,
    pub start_time_unix_nano: String,
    pub end_time_unix_nano: String,
    pub attributes: Vec<Attribute>,
    pub events: Vec<EventRecord>,
    pub status: StatusRecord,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EventRecord {
    pub time_unix_nano: String,
    pub name: String,
    pub attributes: Vec<Attribute>,
}

#[derive(Debug, Serialize)]
pub struct StatusRecord {
    pub code: u8,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct Attribute {
    pub key: String,
    pub value: AttributeValue,
}

/// Typed attribute value. 64-bit integers are strings in OTLP/JSON.
#[derive(Debug, Serialize)]
pub enum AttributeValue {
    #[serde(rename = "boolValue")]
    Bool(bool),
    #[serde(rename = "intValue")]
    Int(String),
    #[serde(rename = "doubleValue")]
    Double(f64),
    #[serde(rename = "stringValue")]
    String(String),
}

impl From<&Value> for AttributeValue {
    fn from(value: &Value) -> Self {
        match value {
            Value::Bool(b) => Self::Bool(*b),
            Value::I64(i) => Self::Int(i.to_string()),
            Value::F64(f) => Self::Double(*f),
            Value::String(s) => Self::String(s.to_string()),
            Value::Array(_) => Self::String(value.to_string()),
        }
    }
}

impl From<&KeyValue> for Attribute {
    fn from(kv: &KeyValue) -> Self {
        Self {
            key: kv.key.to_string(),
            value: AttributeValue::from(&kv.value),
        }
    }
}

fn unix_nanos(time: SystemTime) -> String {
    time.duration_since(SystemTime::UNIX_EPOCH)
        .map(|d| d.as_nanos())
        .unwrap_or(0)
        .to_string()
}

const fn kind_code(kind: &SpanKind) -> u8 {
    match kind {
        SpanKind::Internal => 1,
        SpanKind::Server => 2,
        SpanKind::Client => 3,
        SpanKind::Producer => 4,
        SpanKind::Consumer => 5,
    }
}

impl From<&Status> for StatusRecord {
    fn from(status: &Status) -> Self {
        match status {
            Status::Unset => Self { code: 0, message: String::new() },
            Status::Ok => Self { code: 1, message: String::new() },
            Status::Error { description } => Self {
                code: 2,
                message: description.to_string(),
            },
        }
    }
}

impl From<&SpanData> for SpanRecord {
    fn from(span: &SpanData) -> Self {
        let parent_span_id = if span.parent_span_id == SpanId::INVALID {
            String::new()
        } else {
            format!("{:016x}", span.parent_span_id)
        };

        Self {
            trace_id: format!("{:032x}", span.span_context.trace_id()),
            span_id: format!("{:016x}", span.span_context.span_id()),
            parent_span_id,
            name: span.name.to_string(),
            kind: kind_code(&span.span_kind),
            start_time_unix_nano: unix_nanos(span.start_time),
            end_time_unix_nano: unix_nanos(span.end_time),
            attributes: span.attributes.iter().map(Attribute::from).collect(),
            events: span
                .events
                .iter()
                .map(|event| EventRecord {
                    time_unix_nano: unix_nanos(event.timestamp),
                    name: event.name.to_string(),
                    attributes: event.attributes.iter().map(Attribute::from).collect(),
                })
                .collect(),
            status: StatusRecord::from(&span.status),
        }
    }
}

impl TraceDocument {
    /// Builds a one-resource, one-scope document from an exported batch.
    #[must_use]
    pub fn from_batch(resource: &Resource, batch: &[SpanData]) -> Self {
        let attributes = resource
            .iter()
            .map(|(key, value)| Attribute {
                key: key.to_string(),
                value: AttributeValue::from(value),
            })
            .collect();

        Self {
            resource_spans: vec![ResourceSpans {
                resource: ResourceRecord { attributes },
                scope_spans: vec![ScopeSpans {
                    scope: Scope { name: SCOPE_NAME },
                    spans: batch.iter().map(SpanRecord::from).collect(),
                }],
            }],
        }
    }
}
