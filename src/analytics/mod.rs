//! Interaction analytics.
//!
//! Each tap appends one timestamped record to a remote spreadsheet-backed
//! endpoint. Appends are fire-and-forget: a failure is logged and surfaced
//! as a generic error, never retried, and never blocks the UI loop.

use chrono::Local;
use serde::Serialize;
use thiserror::Error;
use tokio::sync::mpsc;

/// Errors that can occur while appending an interaction record.
#[derive(Debug, Error)]
pub enum AnalyticsError {
    #[error("Interaction request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Interaction endpoint returned HTTP {status}")]
    Status { status: u16 },
}

/// One appended row: local timestamp plus a unit count.
#[derive(Debug, Clone, Serialize)]
pub struct InteractionRecord {
    pub timestamp: String,
    pub count: u32,
}

impl InteractionRecord {
    /// A single tap, stamped with the kiosk's local time.
    pub fn tap_now() -> Self {
        Self {
            timestamp: Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
            count: 1,
        }
    }
}

/// HTTP client for the interaction append endpoint.
pub struct AnalyticsClient {
    http: reqwest::Client,
    url: String,
}

impl AnalyticsClient {
    pub fn new(http: reqwest::Client, url: String) -> Self {
        Self { http, url }
    }

    /// Appends one record. The endpoint replies with success or failure
    /// only; there is no detail worth parsing out of the body.
    pub async fn append(&self, record: &InteractionRecord) -> Result<(), AnalyticsError> {
        let response = self.http.post(&self.url).json(record).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(AnalyticsError::Status {
                status: status.as_u16(),
            });
        }
        Ok(())
    }
}

/// Handle the UI uses to report taps without blocking.
#[derive(Clone)]
pub struct RecorderHandle {
    tx: mpsc::Sender<InteractionRecord>,
}

impl RecorderHandle {
    /// Queues one tap record. Returns false if the recorder is backed up
    /// or gone; the tap itself proceeds regardless.
    pub fn record_tap(&self) -> bool {
        self.tx.try_send(InteractionRecord::tap_now()).is_ok()
    }
}

/// Spawns the background recorder task on the given runtime.
///
/// `on_error` receives a generic message per failed append so the UI can
/// show it in a status line.
pub fn spawn_recorder<F>(
    runtime: &tokio::runtime::Handle,
    client: AnalyticsClient,
    on_error: F,
) -> RecorderHandle
where
    F: Fn(String) + Send + 'static,
{
    let (tx, mut rx) = mpsc::channel::<InteractionRecord>(32);
    runtime.spawn(async move {
        while let Some(record) = rx.recv().await {
            if let Err(err) = client.append(&record).await {
                tracing::warn!(%err, "Failed to append interaction record");
                on_error("Failed to record interaction".to_string());
            }
        }
    });
    RecorderHandle { tx }
}
