//! Marker creation client: one POST to the configured endpoint, no retry.

use anyhow::{anyhow, Context, Result};
use serde_json::Value;
use std::sync::Arc;
use thiserror::Error;
use url::Url;

use crate::graphql::{MarkerCreateReply, MarkerCreateRequest};
use crate::intercept::OutboundCall;
use crate::transport::Transport;

/// Operator-supplied constants: where markers go and which primary tag they
/// carry. Both must be set before use; there is no file or environment
/// configuration behind this.
#[derive(Debug, Clone)]
pub struct MarkerSettings {
    pub endpoint: Url,
    pub primary_tag_id: String,
}

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("invalid endpoint URL: {0}")]
    InvalidEndpoint(#[from] url::ParseError),
    #[error("primary tag id must not be empty")]
    EmptyPrimaryTag,
}

impl MarkerSettings {
    pub fn new(endpoint: &str, primary_tag_id: &str) -> Result<Self, SettingsError> {
        let primary_tag_id = primary_tag_id.trim();
        if primary_tag_id.is_empty() {
            return Err(SettingsError::EmptyPrimaryTag);
        }
        Ok(Self {
            endpoint: Url::parse(endpoint)?,
            primary_tag_id: primary_tag_id.to_string(),
        })
    }
}

/// Sends `SceneMarkerCreate` mutations.
///
/// One attempt per call: the outcome is logged either way and a failure is
/// returned to the caller, never retried.
pub struct MarkerClient {
    settings: MarkerSettings,
    transport: Arc<dyn Transport>,
}

impl MarkerClient {
    pub fn new(settings: MarkerSettings, transport: Arc<dyn Transport>) -> Self {
        Self {
            settings,
            transport,
        }
    }

    /// Creates a marker for `scene_id` at `seconds` from the start. Returns
    /// the new marker's identifier.
    pub async fn create(&self, scene_id: &str, seconds: u64) -> Result<String> {
        let request = MarkerCreateRequest::new(scene_id, seconds, &self.settings.primary_tag_id);
        let body = serde_json::to_string(&request).context("serialize marker request")?;
        let call = OutboundCall::new(self.settings.endpoint.as_str(), body);

        let transport = Arc::clone(&self.transport);
        let reply = tokio::task::spawn_blocking(move || transport.send(&call))
            .await
            .context("marker transport task failed")??;

        if !reply.is_success() {
            let detail = error_detail(&reply.body);
            tracing::error!(
                "error creating scene marker: HTTP {}: {}",
                reply.status,
                detail
            );
            return Err(anyhow!(
                "marker creation returned HTTP {}: {}",
                reply.status,
                detail
            ));
        }

        let parsed: MarkerCreateReply =
            serde_json::from_str(&reply.body).context("parse marker reply")?;
        let id = parsed
            .marker_id()
            .ok_or_else(|| anyhow!("marker reply carried no id: {}", reply.body))?;
        tracing::info!("scene marker created: id={}", id);
        Ok(id)
    }
}

/// Error body rendered for the log: parsed JSON when possible, raw otherwise.
fn error_detail(body: &str) -> String {
    match serde_json::from_str::<Value>(body) {
        Ok(v) => v.to_string(),
        Err(_) => body.to_string(),
    }
}
