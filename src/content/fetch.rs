use thiserror::Error;

use crate::content::types::{ContentDocument, RemoteContent};

/// Errors that can occur while fetching remote content.
#[derive(Debug, Error)]
pub enum ContentError {
    #[error("Content request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Content endpoint returned HTTP {status}")]
    Status { status: u16 },
}

/// Performs the single content fetch for this session.
///
/// Called once at startup; there is no retry. The caller decides what a
/// failure means for the UI (the kiosk stays on the loading screen).
pub async fn fetch_content(
    client: &reqwest::Client,
    url: &str,
) -> Result<RemoteContent, ContentError> {
    tracing::info!(url, "Fetching kiosk content");

    let response = client.get(url).send().await?;
    let status = response.status();
    if !status.is_success() {
        return Err(ContentError::Status {
            status: status.as_u16(),
        });
    }

    let document: ContentDocument = response.json().await?;
    let content = RemoteContent::from_document(document);
    tracing::info!(
        buttons = content.buttons.len(),
        events = content.events.len(),
        "Kiosk content loaded"
    );
    Ok(content)
}
