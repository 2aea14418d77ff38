//! Contracts between the publish pipeline and its remote collaborators.
//!
//! This module defines the two trait seams the pipeline depends on — a
//! [`DocumentStore`] that creates documents and appends block batches, and a
//! [`Notifier`] that delivers a single summary message — plus the plain data
//! types flowing across them.
//!
//! ## Mocking & Testing
//! Both traits are annotated for `mockall`, so consumers can generate
//! deterministic mocks for unit/integration tests (exported under the
//! `test-export-mocks` feature).
//!
//! ## Adding New Backends
//! - Implement the trait for your destination.
//! - Convert all meaningful upstream errors into the declared error type;
//!   no panics across the trait boundary.

use async_trait::async_trait;
use mockall::automock;

use crate::block::Block;

/// The minimum data needed to create a new remote document.
pub struct NewDocument<'a> {
    /// Target container (folder) the document is created in.
    pub folder_token: &'a str,
    /// Human-readable document title.
    pub title: &'a str,
}

/// Handle to a created remote document, returned by the creation call.
#[derive(Debug, Clone)]
pub struct DocumentHandle {
    pub document_id: String,
    /// Root container that block batches are appended under. For the Lark
    /// API this equals the document id.
    pub root_block_id: String,
    /// Shareable URL for the document.
    pub url: String,
}

/// Error type for document-store operations (simple boxed error for now).
pub type StoreError = Box<dyn std::error::Error + Send + Sync>;

/// Trait for creating remote documents and appending block content.
///
/// The implementor is responsible for authentication, transport and payload
/// serialization. Implemented by real clients and by test mocks.
#[cfg_attr(any(test, feature = "test-export-mocks"), automock)]
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Create a new, empty document in the given container.
    async fn create_document<'a>(&self, req: NewDocument<'a>)
        -> Result<DocumentHandle, StoreError>;

    /// Append `blocks` after all previously written content of `doc`
    /// (append-to-end, not positional). One remote call per invocation.
    async fn append_blocks(&self, doc: &DocumentHandle, blocks: &[Block])
        -> Result<(), StoreError>;
}

/// A composed notification body: a short title plus markdown-style text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryMessage {
    pub title: String,
    pub text: String,
}

/// Classified failure modes for a notification send.
#[derive(Debug)]
pub enum NotifyError {
    /// The endpoint did not answer within the timeout.
    Timeout,
    /// The endpoint could not be reached.
    Connection,
    /// Non-success HTTP status, or a body that was not the expected JSON.
    BadResponse(String),
    /// The endpoint answered with a non-zero application-level error code.
    Api { code: i64, msg: String },
}

impl std::fmt::Display for NotifyError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NotifyError::Timeout => write!(f, "notification send timed out"),
            NotifyError::Connection => write!(f, "could not connect to notification endpoint"),
            NotifyError::BadResponse(detail) => {
                write!(f, "unexpected notification response: {detail}")
            }
            NotifyError::Api { code, msg } => {
                write!(f, "notification endpoint returned error {code}: {msg}")
            }
        }
    }
}

impl std::error::Error for NotifyError {}

/// Trait for delivering the run summary to a messaging endpoint.
#[cfg_attr(any(test, feature = "test-export-mocks"), automock)]
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Send a single summary message. Exactly one attempt, bounded by the
    /// implementor's timeout.
    async fn send(&self, message: &SummaryMessage) -> Result<(), NotifyError>;
}
