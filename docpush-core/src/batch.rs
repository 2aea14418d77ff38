//! Batched append of blocks to a remote document.
//!
//! The block sequence is partitioned into consecutive chunks of at most
//! `max_batch_size` blocks and each chunk is submitted once via
//! [`DocumentStore::append_blocks`]. Chunk order equals append order, so the
//! final document order equals input order even though each chunk is a
//! separate remote call with append-to-end semantics.

use tracing::{error, info, warn};

use crate::block::Block;
use crate::contract::{DocumentHandle, DocumentStore};

/// Remote API limit on blocks per append call.
pub const DEFAULT_MAX_BATCH_SIZE: usize = 50;

/// What to do with the remaining batches once one fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FailurePolicy {
    /// Keep appending; failures are recorded per batch. Content already
    /// appended is irreversible, so later batches are still worth writing.
    #[default]
    BestEffort,
    /// Stop after the first failed batch.
    AbortOnFirstFailure,
}

impl From<&str> for FailurePolicy {
    fn from(s: &str) -> Self {
        match s {
            "BestEffort" | "best_effort" | "best-effort" => FailurePolicy::BestEffort,
            "AbortOnFirstFailure" | "abort_on_first_failure" | "abort" => {
                FailurePolicy::AbortOnFirstFailure
            }
            other => {
                warn!(
                    policy = other,
                    "Unknown failure policy, defaulting to BestEffort"
                );
                FailurePolicy::BestEffort
            }
        }
    }
}

/// Per-batch upload result, in batch order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadOutcome {
    pub batch_index: usize,
    pub succeeded: bool,
    pub error_detail: Option<String>,
}

/// Split `blocks` into consecutive chunks of at most `max_batch_size`,
/// preserving order with no gaps or overlaps. The last chunk may be
/// smaller. A zero size is clamped to 1.
pub fn partition(blocks: &[Block], max_batch_size: usize) -> Vec<&[Block]> {
    if max_batch_size == 0 {
        warn!("max_batch_size of 0 clamped to 1");
    }
    blocks.chunks(max_batch_size.max(1)).collect()
}

/// Append `blocks` to `doc` in order, one remote call per batch.
///
/// Each batch is attempted exactly once; retry policy is a collaborator
/// concern. Returns one outcome per attempted batch, in batch order. Under
/// [`FailurePolicy::BestEffort`] every batch is attempted regardless of
/// earlier failures; under [`FailurePolicy::AbortOnFirstFailure`] the loop
/// stops at the first failure, so the outcome list covers attempted batches
/// only.
pub async fn upload_blocks<S>(
    store: &S,
    doc: &DocumentHandle,
    blocks: &[Block],
    max_batch_size: usize,
    policy: FailurePolicy,
) -> Vec<UploadOutcome>
where
    S: DocumentStore,
{
    let batches = partition(blocks, max_batch_size);
    let mut outcomes: Vec<UploadOutcome> = Vec::with_capacity(batches.len());

    for (batch_index, batch) in batches.iter().enumerate() {
        info!(
            batch_index,
            blocks = batch.len(),
            document_id = %doc.document_id,
            "Appending block batch"
        );
        match store.append_blocks(doc, batch).await {
            Ok(()) => {
                outcomes.push(UploadOutcome {
                    batch_index,
                    succeeded: true,
                    error_detail: None,
                });
            }
            Err(e) => {
                error!(batch_index, error = ?e, "Block batch append failed");
                outcomes.push(UploadOutcome {
                    batch_index,
                    succeeded: false,
                    error_detail: Some(e.to_string()),
                });
                if policy == FailurePolicy::AbortOnFirstFailure {
                    warn!(batch_index, "Aborting remaining batches after failure");
                    break;
                }
            }
        }
    }

    outcomes
}
