//! `omark marker <scene-id> <timestamp>` – create a scene marker directly.

use anyhow::Result;
use std::sync::Arc;

use omark_core::marker::{MarkerClient, MarkerSettings};
use omark_core::timestamp;
use omark_core::transport::CurlTransport;

pub async fn run_marker(endpoint: &str, tag: &str, scene_id: &str, at: &str) -> Result<()> {
    let settings = MarkerSettings::new(endpoint, tag)?;
    let client = MarkerClient::new(settings, Arc::new(CurlTransport::new()));

    let seconds = timestamp::to_seconds(at);
    tracing::debug!("direct marker for scene {} at {}s", scene_id, seconds);
    let id = client.create(scene_id, seconds).await?;
    println!("Created scene marker {id} for scene {scene_id} at {at} ({seconds}s)");
    Ok(())
}
