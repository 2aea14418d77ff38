//! # Document-store client (CLI <-> Core)
//!
//! This module bridges the CLI workflow to the contract traits in
//! [`docpush_core::contract`]. It wires up [`DocumentStore`] and
//! [`Notifier`] for real use against a Lark-style open API: tenant token
//! fetch, document creation, block-children append and the bot webhook.
//!
//! ## Client Usage
//!
//! - Construct [`LarkClient`] from loaded [`Settings`].
//! - All transport, serialization and error mapping are encapsulated here;
//!   the wire payloads are plain serde structs built directly from core
//!   blocks, not vendor builder objects.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;

use docpush_core::block::{Block, BlockKind};
use docpush_core::config::Settings;
use docpush_core::contract::{
    DocumentHandle, DocumentStore, NewDocument, Notifier, NotifyError, StoreError, SummaryMessage,
};
use docpush_core::notify::NOTIFY_TIMEOUT_SECS;

/// Wait bound for document-store calls, in seconds.
const STORE_TIMEOUT_SECS: u64 = 30;

/// Real client for the remote document store and the bot webhook.
pub struct LarkClient {
    http: Client,
    api_base: String,
    doc_base: String,
    app_id: String,
    app_secret: String,
    webhook_url: Option<String>,
    // Tenant token fetched on first use; tokens outlive one pipeline run.
    token: Mutex<Option<String>>,
}

/// Standard response envelope of the open API: zero `code` means success.
#[derive(Debug, Deserialize)]
struct ApiEnvelope<T> {
    code: i64,
    #[serde(default)]
    msg: String,
    data: Option<T>,
}

#[derive(Serialize)]
struct TokenRequest<'a> {
    app_id: &'a str,
    app_secret: &'a str,
}

#[derive(Deserialize)]
struct TokenResponse {
    code: i64,
    #[serde(default)]
    msg: String,
    tenant_access_token: Option<String>,
}

#[derive(Serialize)]
struct CreateDocumentBody<'a> {
    folder_token: &'a str,
    title: &'a str,
}

#[derive(Debug, Deserialize)]
struct CreateDocumentData {
    document: CreatedDocument,
}

#[derive(Debug, Deserialize)]
struct CreatedDocument {
    document_id: String,
}

/// Append request against the document's root container; `index: -1` means
/// append to end.
#[derive(Serialize)]
struct AppendChildrenBody {
    children: Vec<WireBlock>,
    index: i64,
}

// Numeric block types of the docx wire format: 2 text, 3/4/5 headings
// one to three, 22 divider.
#[derive(Default, Serialize)]
struct WireBlock {
    block_type: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    text: Option<WireText>,
    #[serde(skip_serializing_if = "Option::is_none")]
    heading1: Option<WireText>,
    #[serde(skip_serializing_if = "Option::is_none")]
    heading2: Option<WireText>,
    #[serde(skip_serializing_if = "Option::is_none")]
    heading3: Option<WireText>,
    #[serde(skip_serializing_if = "Option::is_none")]
    divider: Option<WireDivider>,
}

#[derive(Default, Serialize)]
struct WireText {
    style: WireTextStyle,
    elements: Vec<WireTextElement>,
}

#[derive(Default, Serialize)]
struct WireTextStyle {}

#[derive(Serialize)]
struct WireTextElement {
    text_run: WireTextRun,
}

#[derive(Serialize)]
struct WireTextRun {
    content: String,
    text_element_style: WireTextElementStyle,
}

#[derive(Default, Serialize)]
struct WireTextElementStyle {}

#[derive(Default, Serialize)]
struct WireDivider {}

impl WireText {
    fn plain(content: &str) -> Self {
        WireText {
            style: WireTextStyle::default(),
            elements: vec![WireTextElement {
                text_run: WireTextRun {
                    content: content.to_string(),
                    text_element_style: WireTextElementStyle::default(),
                },
            }],
        }
    }
}

impl WireBlock {
    fn from_block(block: &Block) -> Self {
        match block.kind {
            BlockKind::Paragraph => WireBlock {
                block_type: 2,
                text: Some(WireText::plain(&block.text)),
                ..WireBlock::default()
            },
            BlockKind::Heading1 => WireBlock {
                block_type: 3,
                heading1: Some(WireText::plain(&block.text)),
                ..WireBlock::default()
            },
            BlockKind::Heading2 => WireBlock {
                block_type: 4,
                heading2: Some(WireText::plain(&block.text)),
                ..WireBlock::default()
            },
            BlockKind::Heading3 => WireBlock {
                block_type: 5,
                heading3: Some(WireText::plain(&block.text)),
                ..WireBlock::default()
            },
            BlockKind::Divider => WireBlock {
                block_type: 22,
                divider: Some(WireDivider::default()),
                ..WireBlock::default()
            },
        }
    }
}

impl LarkClient {
    pub fn new(settings: &Settings) -> Result<Self, StoreError> {
        let http = Client::builder()
            .timeout(Duration::from_secs(STORE_TIMEOUT_SECS))
            .build()?;
        tracing::info!(
            api_base = %settings.api_base_url,
            webhook_set = settings.webhook_url.is_some(),
            "Initialized document-store client"
        );
        Ok(LarkClient {
            http,
            api_base: settings.api_base_url.trim_end_matches('/').to_string(),
            doc_base: settings.doc_base_url.trim_end_matches('/').to_string(),
            app_id: settings.app_id.clone(),
            app_secret: settings.app_secret.clone(),
            webhook_url: settings.webhook_url.clone(),
            token: Mutex::new(None),
        })
    }

    /// Fetch (or reuse) the tenant access token used for store calls.
    async fn tenant_token(&self) -> Result<String, StoreError> {
        let mut guard = self.token.lock().await;
        if let Some(token) = guard.as_ref() {
            return Ok(token.clone());
        }

        let url = format!(
            "{}/open-apis/auth/v3/tenant_access_token/internal",
            self.api_base
        );
        tracing::info!(url = %url, "Fetching tenant access token");

        let response = self
            .http
            .post(&url)
            .json(&TokenRequest {
                app_id: &self.app_id,
                app_secret: &self.app_secret,
            })
            .send()
            .await;

        let response = match response {
            Ok(resp) => resp,
            Err(e) => {
                tracing::error!(error = ?e, "Token request failed");
                return Err(Box::new(e));
            }
        };

        let status = response.status();
        if !status.is_success() {
            tracing::error!(status = %status, "Token endpoint returned HTTP error");
            return Err(format!("token endpoint returned HTTP {status}").into());
        }

        let body: TokenResponse = response.json().await?;
        if body.code != 0 {
            tracing::error!(code = body.code, msg = %body.msg, "Token endpoint API error");
            return Err(format!("token endpoint error {}: {}", body.code, body.msg).into());
        }
        let token = body
            .tenant_access_token
            .ok_or("token endpoint returned no token")?;

        tracing::info!("Tenant access token acquired");
        *guard = Some(token.clone());
        Ok(token)
    }

    /// Check HTTP status and API envelope of a store response, returning
    /// the payload on the success path.
    async fn check_envelope<T: DeserializeOwned>(
        response: reqwest::Response,
        what: &str,
    ) -> Result<T, StoreError> {
        let status = response.status();
        if !status.is_success() {
            let text = response
                .text()
                .await
                .unwrap_or_else(|_| String::from("<failed to decode response body>"));
            tracing::error!(status = %status, body = %text, "{what} returned HTTP error");
            return Err(format!("{what} returned HTTP {status}: {text}").into());
        }

        let envelope: ApiEnvelope<T> = response.json().await?;
        if envelope.code != 0 {
            tracing::error!(code = envelope.code, msg = %envelope.msg, "{what} API error");
            return Err(format!("{what} API error {}: {}", envelope.code, envelope.msg).into());
        }
        envelope
            .data
            .ok_or_else(|| format!("{what} response carried no data").into())
    }
}

#[async_trait]
impl DocumentStore for LarkClient {
    async fn create_document<'a>(
        &self,
        req: NewDocument<'a>,
    ) -> Result<DocumentHandle, StoreError> {
        let token = self.tenant_token().await?;

        tracing::info!(title = req.title, "Creating remote document");
        let url = format!("{}/open-apis/docx/v1/documents", self.api_base);
        let response = self
            .http
            .post(&url)
            .bearer_auth(&token)
            .json(&CreateDocumentBody {
                folder_token: req.folder_token,
                title: req.title,
            })
            .send()
            .await;

        let response = match response {
            Ok(resp) => resp,
            Err(e) => {
                tracing::error!(error = ?e, "Document creation request failed");
                return Err(Box::new(e));
            }
        };

        let data: CreateDocumentData =
            Self::check_envelope(response, "document creation").await?;
        let document_id = data.document.document_id;
        let handle = DocumentHandle {
            url: format!("{}/docx/{}", self.doc_base, document_id),
            // The root container blocks append under is the document itself.
            root_block_id: document_id.clone(),
            document_id,
        };
        tracing::info!(
            document_id = %handle.document_id,
            url = %handle.url,
            "Successfully created remote document"
        );
        Ok(handle)
    }

    async fn append_blocks(
        &self,
        doc: &DocumentHandle,
        blocks: &[Block],
    ) -> Result<(), StoreError> {
        let token = self.tenant_token().await?;

        let url = format!(
            "{}/open-apis/docx/v1/documents/{}/blocks/{}/children",
            self.api_base, doc.document_id, doc.root_block_id
        );
        let body = AppendChildrenBody {
            children: blocks.iter().map(WireBlock::from_block).collect(),
            index: -1,
        };

        let response = self
            .http
            .post(&url)
            .bearer_auth(&token)
            .json(&body)
            .send()
            .await;

        let response = match response {
            Ok(resp) => resp,
            Err(e) => {
                tracing::error!(error = ?e, document_id = %doc.document_id, "Block append request failed");
                return Err(Box::new(e));
            }
        };

        let _: serde_json::Value = Self::check_envelope(response, "block append").await?;
        tracing::info!(
            document_id = %doc.document_id,
            blocks = blocks.len(),
            "Successfully appended block batch"
        );
        Ok(())
    }
}

#[derive(Serialize)]
struct WebhookBody<'a> {
    msg_type: &'a str,
    content: WebhookContent<'a>,
}

#[derive(Serialize)]
struct WebhookContent<'a> {
    title: &'a str,
    text: &'a str,
}

#[derive(Deserialize)]
struct WebhookResponse {
    code: Option<i64>,
    msg: Option<String>,
}

#[async_trait]
impl Notifier for LarkClient {
    async fn send(&self, message: &SummaryMessage) -> Result<(), NotifyError> {
        let url = match self.webhook_url.as_deref() {
            Some(url) => url,
            None => {
                return Err(NotifyError::BadResponse(
                    "webhook url not configured".to_string(),
                ))
            }
        };

        tracing::info!(url = %url, "Sending summary notification");
        let body = WebhookBody {
            msg_type: "markdown",
            content: WebhookContent {
                title: &message.title,
                text: &message.text,
            },
        };

        let response = self
            .http
            .post(url)
            .timeout(Duration::from_secs(NOTIFY_TIMEOUT_SECS))
            .json(&body)
            .send()
            .await;

        let response = match response {
            Ok(resp) => resp,
            Err(e) if e.is_timeout() => {
                tracing::error!("Notification timed out: endpoint did not respond");
                return Err(NotifyError::Timeout);
            }
            Err(e) if e.is_connect() => {
                tracing::error!(error = ?e, "Notification failed: could not connect to endpoint");
                return Err(NotifyError::Connection);
            }
            Err(e) => {
                tracing::error!(error = ?e, "Notification request failed");
                return Err(NotifyError::BadResponse(e.to_string()));
            }
        };

        let status = response.status();
        if !status.is_success() {
            tracing::error!(status = %status, "Notification endpoint returned HTTP error");
            return Err(NotifyError::BadResponse(format!("HTTP {status}")));
        }

        let parsed: WebhookResponse = response
            .json()
            .await
            .map_err(|e| NotifyError::BadResponse(e.to_string()))?;
        match parsed.code {
            Some(0) => {
                tracing::info!("Notification endpoint acknowledged delivery");
                Ok(())
            }
            Some(code) => {
                let msg = parsed.msg.unwrap_or_default();
                tracing::error!(code, msg = %msg, "Notification endpoint reported an error");
                Err(NotifyError::Api { code, msg })
            }
            None => Err(NotifyError::BadResponse(
                "response body carried no status code".to_string(),
            )),
        }
    }
}
