//! High-level pipeline: parse markup → create document → batched append → notify.
//!
//! This module orchestrates one publish run end to end:
//!   - Refuses before any remote call when credentials are incomplete
//!   - Parses the raw markup into an ordered block sequence
//!   - Creates an empty remote document via [`DocumentStore`]
//!   - Appends all block batches sequentially, recording per-batch outcomes
//!   - Sends a single summary notification when a [`Notifier`] is supplied
//!
//! # Error Handling
//! Missing configuration and document-creation failure abort the run as
//! [`PublishError`] values. Per-batch failures and notification failures are
//! recorded in the [`PublishReport`] and never fatal: content already
//! appended is irreversible, and notification is observability only. No
//! fault crosses this boundary as a panic.
//!
//! # Navigation
//! - Main entrypoint: [`publish`]
//! - Supporting types: [`PublishReport`], [`PublishError`].

use tracing::{error, info, warn};

use crate::batch::{self, UploadOutcome};
use crate::config::Settings;
use crate::contract::{DocumentStore, NewDocument, Notifier};
use crate::markup;
use crate::notify::{self, NotificationResult};

/// Final report for one publish run.
#[derive(Debug)]
pub struct PublishReport {
    /// Shareable URL of the created document.
    pub document_url: String,
    /// One entry per attempted batch, in batch order.
    pub batches: Vec<UploadOutcome>,
    /// `None` when no notifier was supplied (webhook unset).
    pub notification: Option<NotificationResult>,
}

/// Failures that abort the run before any content is written.
#[derive(Debug)]
pub enum PublishError {
    /// Application identity, secret or container token missing; refused
    /// before any remote call.
    NotConfigured,
    /// The document-creation collaborator reported failure; no upload or
    /// notification is attempted.
    CreateFailed(String),
}

impl std::fmt::Display for PublishError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PublishError::NotConfigured => {
                write!(f, "pipeline is not fully configured; refusing to publish")
            }
            PublishError::CreateFailed(detail) => {
                write!(f, "document creation failed: {detail}")
            }
        }
    }
}

impl std::error::Error for PublishError {}

/// Publish `markup_text` as a new remote document titled `title`.
///
/// Returns the report with the document URL on success. Partial batch
/// failures and notification failures are surfaced inside the report, not
/// as errors; callers decide whether any of them should escalate.
pub async fn publish<S, N>(
    settings: &Settings,
    store: &S,
    notifier: Option<&N>,
    title: &str,
    markup_text: &str,
) -> Result<PublishReport, PublishError>
where
    S: DocumentStore,
    N: Notifier,
{
    if !settings.is_configured() {
        error!("Pipeline not configured, refusing to publish");
        return Err(PublishError::NotConfigured);
    }

    let blocks = markup::parse(markup_text);
    info!(blocks = blocks.len(), title, "Parsed markup, creating document");

    let new_doc = NewDocument {
        folder_token: &settings.folder_token,
        title,
    };
    let handle = match store.create_document(new_doc).await {
        Ok(handle) => {
            info!(
                document_id = %handle.document_id,
                url = %handle.url,
                "Document created"
            );
            handle
        }
        Err(e) => {
            error!(error = ?e, "Document creation failed");
            return Err(PublishError::CreateFailed(e.to_string()));
        }
    };

    let batches = batch::upload_blocks(
        store,
        &handle,
        &blocks,
        settings.max_batch_size,
        settings.failure_policy,
    )
    .await;

    let failed = batches.iter().filter(|o| !o.succeeded).count();
    if failed > 0 {
        warn!(
            failed,
            total = batches.len(),
            "Some block batches failed to append"
        );
    } else {
        info!(total = batches.len(), "Document content written");
    }

    let notification = match notifier {
        Some(n) => Some(notify::notify(n, title, Some(&handle.url)).await),
        None => {
            warn!("No notifier configured, skipping summary notification");
            None
        }
    };

    Ok(PublishReport {
        document_url: handle.url,
        batches,
        notification,
    })
}
