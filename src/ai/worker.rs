//! AI Worker Thread
//!
//! Runs completion calls in a background thread so the UI never blocks.
//! Requests are handled one at a time, in arrival order, on a
//! single-threaded tokio runtime owned by the worker. Results go back to
//! the UI thread over a channel tagged with the request's kind and id.

use std::sync::mpsc::{Receiver, Sender};

use super::provider::{AiError, CompletionBackend};
use super::request::GenerationRequest;
use crate::editor::OperationKind;

/// A completion job sent to the worker
#[derive(Debug, Clone)]
pub struct AiRequest {
    pub kind: OperationKind,
    /// Unique ID for this request, used to filter stale responses
    pub request_id: u64,
    pub request: GenerationRequest,
}

/// The outcome of one completion job
#[derive(Debug, Clone, PartialEq)]
pub struct AiResponse {
    pub kind: OperationKind,
    pub request_id: u64,
    pub result: Result<String, AiError>,
}

/// Spawn the AI worker thread
///
/// The thread exits when `request_rx`'s sender is dropped or when the
/// UI side stops listening on `response_tx`.
pub fn spawn_worker<B>(
    backend: B,
    request_rx: Receiver<AiRequest>,
    response_tx: Sender<AiResponse>,
) -> std::thread::JoinHandle<()>
where
    B: CompletionBackend + Send + 'static,
{
    std::thread::spawn(move || {
        let runtime = match tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
        {
            Ok(rt) => rt,
            Err(e) => {
                // Dropping request_rx makes every later trigger fail with WorkerUnavailable
                log::error!("Failed to start AI runtime: {}", e);
                return;
            }
        };
        worker_loop(&runtime, &backend, request_rx, response_tx);
    })
}

/// Main worker loop - processes requests until the channel is closed
fn worker_loop<B: CompletionBackend>(
    runtime: &tokio::runtime::Runtime,
    backend: &B,
    request_rx: Receiver<AiRequest>,
    response_tx: Sender<AiResponse>,
) {
    while let Ok(AiRequest {
        kind,
        request_id,
        request,
    }) = request_rx.recv()
    {
        log::debug!("Running {} request {}", kind, request_id);

        let result = runtime.block_on(backend.complete(&request));
        if let Err(e) = &result {
            log::error!("{} request {} failed: {}", kind, request_id, e);
        }

        if response_tx
            .send(AiResponse {
                kind,
                request_id,
                result,
            })
            .is_err()
        {
            // Main thread disconnected
            break;
        }
    }

    log::debug!("AI worker thread shutting down");
}

#[cfg(test)]
#[path = "worker_tests.rs"]
mod worker_tests;
