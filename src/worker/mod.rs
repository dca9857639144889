//! Background worker for catalog I/O.
//!
//! All collection fetches, deletes and remote favorite changes run here, off the
//! thread that owns the controller. Requests and responses are JSON-serialized and
//! carry trace context so worker spans join the trace that caused them.
//!
//! # Architecture
//!
//! - `messages`: Request/response protocol types with trace context propagation
//! - `handler`: Worker implementation and message processing logic
//! - `runtime`: Thread spawning and the posting handle

pub mod handler;
pub mod messages;
pub mod runtime;

pub use handler::CatalogWorker;
pub use messages::{FavoriteChange, TraceContext, WorkerMessage, WorkerResponse};
pub use runtime::{decode_response, spawn_worker, WorkerHandle};
