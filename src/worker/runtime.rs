//! Background thread hosting a [`CatalogWorker`].
//!
//! Messages travel to the thread as JSON strings over a std channel and responses
//! come back as JSON strings through a caller-supplied callback, so the two sides
//! share no state. The caller decodes responses with [`decode_response`].
//!
//! Requests are processed strictly in the order they were posted. There is no
//! timeout: a request that never completes leaves its list request or mutation
//! token pending.

use crate::domain::{CatalogError, Result};
use crate::worker::{CatalogWorker, WorkerMessage, WorkerResponse};
use std::sync::mpsc::{self, Sender};
use std::thread::JoinHandle;

/// Sending half of a running worker thread.
pub struct WorkerHandle {
    sender: Option<Sender<String>>,
    thread: Option<JoinHandle<()>>,
}

/// Runs `worker` on a named background thread.
///
/// Every response payload is passed to `on_response`. The thread exits once the
/// handle is dropped or [`WorkerHandle::shutdown`] is called.
///
/// # Errors
///
/// Returns an error if the thread cannot be spawned.
pub fn spawn_worker<F>(mut worker: CatalogWorker, mut on_response: F) -> Result<WorkerHandle>
where
    F: FnMut(String) + Send + 'static,
{
    let (sender, receiver) = mpsc::channel::<String>();

    let thread = std::thread::Builder::new()
        .name("catalog-worker".to_string())
        .spawn(move || {
            tracing::debug!("worker thread started");
            for payload in receiver {
                if let Some(response) = worker.on_payload(&payload) {
                    on_response(response);
                }
            }
            tracing::debug!("worker thread stopped");
        })?;

    Ok(WorkerHandle {
        sender: Some(sender),
        thread: Some(thread),
    })
}

/// Parses a response payload produced by the worker thread.
///
/// # Errors
///
/// Returns [`CatalogError::Worker`] if the payload is not a valid response.
pub fn decode_response(payload: &str) -> Result<WorkerResponse> {
    serde_json::from_str(payload)
        .map_err(|e| CatalogError::Worker(format!("failed to deserialize worker response: {e}")))
}

impl WorkerHandle {
    /// Serializes and queues a message for the worker thread.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Worker`] if serialization fails or the thread is gone.
    pub fn post(&self, message: &WorkerMessage) -> Result<()> {
        let _span = tracing::debug_span!("post_to_worker", operation = message.operation()).entered();

        let payload = serde_json::to_string(message)
            .map_err(|e| CatalogError::Worker(format!("failed to serialize worker message: {e}")))?;

        self.sender
            .as_ref()
            .ok_or_else(|| CatalogError::Worker("worker already shut down".to_string()))?
            .send(payload)
            .map_err(|_| CatalogError::Worker("worker thread has exited".to_string()))
    }

    /// Closes the queue and waits for queued messages to finish.
    pub fn shutdown(mut self) {
        self.stop();
    }

    fn stop(&mut self) {
        self.sender.take();
        if let Some(thread) = self.thread.take() {
            if thread.join().is_err() {
                tracing::error!("worker thread panicked");
            }
        }
    }
}

impl Drop for WorkerHandle {
    fn drop(&mut self) {
        self.stop();
    }
}
