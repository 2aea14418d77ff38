use std::fmt;

use tracing::{debug, info};

use crate::batch::{FailurePolicy, DEFAULT_MAX_BATCH_SIZE};

/// Default open-API endpoint base, overridable for tests or self-hosted
/// deployments.
pub const DEFAULT_API_BASE_URL: &str = "https://open.feishu.cn";
/// Default base for shareable document links.
pub const DEFAULT_DOC_BASE_URL: &str = "https://feishu.cn";

/// Runtime settings for one publish pipeline.
///
/// Passed explicitly into each stage; there is no process-wide
/// configuration state.
#[derive(Clone)]
pub struct Settings {
    pub app_id: String,
    pub app_secret: String,
    /// Container (folder) new documents are created in.
    pub folder_token: String,
    /// Absent webhook means the notification step is skipped.
    pub webhook_url: Option<String>,
    pub max_batch_size: usize,
    pub failure_policy: FailurePolicy,
    pub api_base_url: String,
    pub doc_base_url: String,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            app_id: String::new(),
            app_secret: String::new(),
            folder_token: String::new(),
            webhook_url: None,
            max_batch_size: DEFAULT_MAX_BATCH_SIZE,
            failure_policy: FailurePolicy::default(),
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            doc_base_url: DEFAULT_DOC_BASE_URL.to_string(),
        }
    }
}

impl Settings {
    /// True iff every credential needed before any remote call is present:
    /// application identity, secret and container token.
    pub fn is_configured(&self) -> bool {
        !self.app_id.is_empty() && !self.app_secret.is_empty() && !self.folder_token.is_empty()
    }

    pub fn trace_loaded(&self) {
        info!(
            app_id_set = !self.app_id.is_empty(),
            folder_token_set = !self.folder_token.is_empty(),
            webhook_set = self.webhook_url.is_some(),
            max_batch_size = self.max_batch_size,
            failure_policy = ?self.failure_policy,
            "Loaded settings"
        );
        debug!(?self, "Settings loaded (full debug)");
    }
}

// Manual impl so the secret never reaches a log line.
impl fmt::Debug for Settings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Settings")
            .field("app_id", &self.app_id)
            .field("app_secret", &"<redacted>")
            .field("folder_token", &self.folder_token)
            .field("webhook_url", &self.webhook_url)
            .field("max_batch_size", &self.max_batch_size)
            .field("failure_policy", &self.failure_policy)
            .field("api_base_url", &self.api_base_url)
            .field("doc_base_url", &self.doc_base_url)
            .finish()
    }
}
