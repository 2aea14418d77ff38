//! Summary notification for a finished publish run.
//!
//! Composes a single markdown-style summary message (success or failure
//! layout) and sends it through a [`Notifier`]. Delivery failure is
//! observability, not a correctness gate: it is mapped into a
//! [`NotificationResult`] and never escalated.

use chrono::Local;
use tracing::{info, warn};

use crate::contract::{Notifier, SummaryMessage};

/// Wait bound for the notification send, in seconds.
pub const NOTIFY_TIMEOUT_SECS: u64 = 10;

/// Per-send result. Callers log it and move on; it never changes the
/// outcome of the document-creation operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationResult {
    pub delivered: bool,
    pub reason: Option<String>,
}

/// Compose the summary body for a finished run.
///
/// A present `document_url` yields the success layout: title heading, a
/// clickable link and a timestamp captured now (send time, not document
/// creation time). An absent one yields a short failure notice.
pub fn compose_summary(title: &str, document_url: Option<&str>) -> SummaryMessage {
    match document_url {
        Some(url) => {
            let timestamp = Local::now().format("%Y-%m-%d %H:%M:%S");
            SummaryMessage {
                title: "Document published".to_string(),
                text: format!(
                    "### {title}\nThe document has been created, click to view:\n[View document]({url})\n---\n> Generated: {timestamp}"
                ),
            }
        }
        None => SummaryMessage {
            title: "Document publish failed".to_string(),
            text: format!("### {title}\nDocument creation failed; no link is available."),
        },
    }
}

/// Send exactly one summary message, mapping every failure class into the
/// returned [`NotificationResult`] instead of an error.
pub async fn notify<N>(notifier: &N, title: &str, document_url: Option<&str>) -> NotificationResult
where
    N: Notifier,
{
    let message = compose_summary(title, document_url);

    match notifier.send(&message).await {
        Ok(()) => {
            info!("Summary notification delivered");
            NotificationResult {
                delivered: true,
                reason: None,
            }
        }
        Err(e) => {
            warn!(error = %e, "Summary notification failed");
            NotificationResult {
                delivered: false,
                reason: Some(e.to_string()),
            }
        }
    }
}
