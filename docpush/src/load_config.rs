/// `load_config` module: loads the static YAML config—including environment
/// secret injection—into the core [`Settings`].
///
/// This module is the only place where untrusted YAML is parsed and mapped
/// to rich, strongly-typed internal structs.
///
/// # Responsibilities
/// - Parse the user-supplied YAML configuration file into type-safe structs
/// - Map loosely-typed YAML keys (e.g., string failure policies) to enums
/// - Inject environment variables for secret fields (app id, app secret,
///   folder token); missing secrets yield settings that fail
///   `is_configured()` rather than a load error, so the pipeline can refuse
///   with its own explicit signal
/// - Acts as the adapter layer decoupling input schemas from the domain core
///
/// # Errors
/// All errors in this module use `anyhow::Error` for context-rich
/// diagnostics, and are surfaced at the CLI boundary.
///
use anyhow::Result;
use docpush_core::batch::{FailurePolicy, DEFAULT_MAX_BATCH_SIZE};
use docpush_core::config::Settings;
use serde::Deserialize;
use std::env;
use std::fs;
use std::path::Path;
use tracing::{error, info};

#[derive(Debug, Deserialize)]
struct RawConfig {
    #[serde(default)]
    webhook_url: Option<String>,
    #[serde(default = "default_max_batch_size")]
    max_batch_size: usize,
    #[serde(default)]
    failure_policy: Option<String>,
    #[serde(default)]
    api_base_url: Option<String>,
    #[serde(default)]
    doc_base_url: Option<String>,
}

fn default_max_batch_size() -> usize {
    DEFAULT_MAX_BATCH_SIZE
}

/// Loads a static YAML config file (no secrets) and injects required env
/// vars for secrets. Returns the settings the pipeline and client consume.
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Settings> {
    let path_ref = path.as_ref();
    info!(config_path = ?path_ref, "Loading configuration from file");

    let config_content = match fs::read_to_string(path_ref) {
        Ok(content) => {
            info!(config_path = ?path_ref, "Config file read successfully");
            content
        }
        Err(e) => {
            error!(error = ?e, config_path = ?path_ref, "Failed to read config file");
            return Err(anyhow::anyhow!(
                "Failed to read config file {:?}: {}",
                path_ref,
                e
            ));
        }
    };

    let raw: RawConfig = match serde_yaml::from_str(&config_content) {
        Ok(conf) => {
            info!(config_path = ?path_ref, "Parsed config YAML successfully");
            conf
        }
        Err(e) => {
            error!(error = ?e, config_path = ?path_ref, "Failed to parse config YAML");
            return Err(anyhow::anyhow!("Failed to parse config YAML: {e}"));
        }
    };

    let defaults = Settings::default();
    let settings = Settings {
        app_id: env::var("DOCPUSH_APP_ID").unwrap_or_default(),
        app_secret: env::var("DOCPUSH_APP_SECRET").unwrap_or_default(),
        folder_token: env::var("DOCPUSH_FOLDER_TOKEN").unwrap_or_default(),
        webhook_url: raw
            .webhook_url
            .or_else(|| env::var("DOCPUSH_WEBHOOK_URL").ok()),
        max_batch_size: raw.max_batch_size,
        failure_policy: raw
            .failure_policy
            .as_deref()
            .map(FailurePolicy::from)
            .unwrap_or_default(),
        api_base_url: raw.api_base_url.unwrap_or(defaults.api_base_url),
        doc_base_url: raw.doc_base_url.unwrap_or(defaults.doc_base_url),
    };

    settings.trace_loaded();
    Ok(settings)
}
