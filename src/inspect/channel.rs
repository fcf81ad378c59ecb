//! Request/response channel to the runtime inspector.
//!
//! The inspector runs as its own task and answers [`InspectionRequest`]s. Each
//! request carries a correlation id echoed back in the response, and callers
//! wait a bounded time for it. On timeout the caller falls back to a snapshot
//! it passes in explicitly; nothing is cached inside the channel.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use log::{debug, warn};
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;

use super::source::RuntimeSource;
use crate::bidding::{extract_bidding_snapshot, BiddingRuntime, BiddingSnapshot, Extraction, JsonRuntime};
use crate::config::{INSPECTION_CHANNEL_CAPACITY, INSPECTION_TIMEOUT_ERROR};
use crate::error_handling::InspectionError;

/// A request for a fresh bidding snapshot.
#[derive(Debug)]
pub struct InspectionRequest {
    pub id: u64,
    pub reply: oneshot::Sender<InspectionResponse>,
}

/// The inspector's answer to one request.
#[derive(Debug, Clone)]
pub struct InspectionResponse {
    pub id: u64,
    pub extraction: Extraction,
}

/// Cloneable handle for sending inspection requests.
#[derive(Debug, Clone)]
pub struct InspectorHandle {
    tx: mpsc::Sender<InspectionRequest>,
    next_id: Arc<AtomicU64>,
}

impl InspectorHandle {
    /// Wraps the sending side of an inspection channel.
    pub fn new(tx: mpsc::Sender<InspectionRequest>) -> Self {
        Self {
            tx,
            next_id: Arc::new(AtomicU64::new(1)),
        }
    }

    /// Sends one request and waits at most `wait` for the matching response.
    ///
    /// # Errors
    ///
    /// Returns `InspectionError::Timeout` when the wait elapses,
    /// `InspectionError::Closed` when the inspector is gone, and
    /// `InspectionError::CorrelationMismatch` for a response to another request.
    pub async fn request(&self, wait: Duration) -> Result<Extraction, InspectionError> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let (reply, response) = oneshot::channel();

        let round_trip = async {
            self.tx
                .send(InspectionRequest { id, reply })
                .await
                .map_err(|_| InspectionError::Closed)?;
            let response = response.await.map_err(|_| InspectionError::Closed)?;
            if response.id != id {
                return Err(InspectionError::CorrelationMismatch {
                    expected: id,
                    got: response.id,
                });
            }
            Ok(response.extraction)
        };

        tokio::time::timeout(wait, round_trip)
            .await
            .map_err(|_| InspectionError::Timeout(wait.as_millis() as u64))?
    }

    /// Obtains a bidding snapshot, falling back when the inspector does not answer.
    ///
    /// Falls back to `last_known` when given, and otherwise to a "not detected"
    /// snapshot whose extraction error names the failure (a timeout gets
    /// its own dedicated message).
    pub async fn inspect(
        &self,
        wait: Duration,
        last_known: Option<&BiddingSnapshot>,
    ) -> BiddingSnapshot {
        match self.request(wait).await {
            Ok(extraction) => {
                if !extraction.raw_errors.is_empty() {
                    debug!("Extraction strategy errors: {:?}", extraction.raw_errors);
                }
                extraction.snapshot
            }
            Err(e) => {
                warn!("Bidding inspection failed: {}", e);
                if let Some(snapshot) = last_known {
                    warn!("Using last known bidding snapshot");
                    return snapshot.clone();
                }
                match e {
                    InspectionError::Timeout(_) => BiddingSnapshot::failed(INSPECTION_TIMEOUT_ERROR),
                    other => BiddingSnapshot::failed(other.to_string()),
                }
            }
        }
    }
}

/// Spawns an inspector task serving captures from `source`.
///
/// The task exits once every [`InspectorHandle`] has been dropped.
pub fn spawn_inspector<S: RuntimeSource>(source: S) -> (InspectorHandle, JoinHandle<()>) {
    let (tx, rx) = mpsc::channel(INSPECTION_CHANNEL_CAPACITY);
    let task = tokio::spawn(serve(Arc::new(source), rx));
    (InspectorHandle::new(tx), task)
}

async fn serve<S: RuntimeSource>(source: Arc<S>, mut rx: mpsc::Receiver<InspectionRequest>) {
    while let Some(request) = rx.recv().await {
        let source = Arc::clone(&source);
        let extraction = match tokio::task::spawn_blocking(move || inspect_once(source.as_ref())).await {
            Ok(extraction) => extraction,
            Err(e) => Extraction {
                snapshot: BiddingSnapshot::failed(format!("Inspection error: {}", e)),
                raw_errors: vec![e.to_string()],
            },
        };

        // The requester may have timed out and gone away
        if request
            .reply
            .send(InspectionResponse {
                id: request.id,
                extraction,
            })
            .is_err()
        {
            debug!("Inspection request {} abandoned before reply", request.id);
        }
    }
}

/// Captures once and runs the extraction merger on the result.
pub fn inspect_once<S: RuntimeSource + ?Sized>(source: &S) -> Extraction {
    match source.capture() {
        Ok(value) => {
            let runtime = value.and_then(JsonRuntime::from_value);
            extract_bidding_snapshot(runtime.as_ref().map(|rt| rt as &dyn BiddingRuntime))
        }
        Err(e) => {
            let message = format!("Inspection error: {:#}", e);
            Extraction {
                snapshot: BiddingSnapshot::failed(message.clone()),
                raw_errors: vec![message],
            }
        }
    }
}
