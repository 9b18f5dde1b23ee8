//! Trigger detection and reaction: watch for the O-counter mutation, confirm
//! with the operator, create a marker at the current playback time.

use std::sync::{Arc, Mutex};
use tokio::task::JoinHandle;

use crate::confirm::Confirmer;
use crate::graphql::ObservedOperation;
use crate::intercept::{Interceptor, OutboundCall};
use crate::marker::MarkerClient;
use crate::playback::TimestampSource;
use crate::timestamp;

/// Display string used when no playback time is available.
pub const DEFAULT_TIMESTAMP: &str = "0:00";

/// Interceptor that reacts to `SceneAddO` by creating a scene marker.
///
/// The reaction (confirmation, then the marker call) runs as a detached task;
/// the observed call never waits for it. Must be used from within a tokio
/// runtime.
pub struct MarkerOnOcount {
    marker: Arc<MarkerClient>,
    timestamps: Arc<dyn TimestampSource>,
    confirmer: Arc<dyn Confirmer>,
    reactions: Mutex<Vec<JoinHandle<()>>>,
}

impl MarkerOnOcount {
    pub fn new(
        marker: Arc<MarkerClient>,
        timestamps: Arc<dyn TimestampSource>,
        confirmer: Arc<dyn Confirmer>,
    ) -> Self {
        Self {
            marker,
            timestamps,
            confirmer,
            reactions: Mutex::new(Vec::new()),
        }
    }

    /// Awaits every reaction spawned so far.
    ///
    /// Lets a short-lived caller (CLI, tests) join the fire-and-forget work
    /// before exiting. A long-lived embedder never needs to call this.
    pub async fn drain(&self) {
        let handles: Vec<JoinHandle<()>> = std::mem::take(&mut *self.reactions.lock().unwrap());
        for handle in handles {
            if let Err(e) = handle.await {
                tracing::warn!("reaction task failed: {}", e);
            }
        }
    }
}

impl Interceptor for MarkerOnOcount {
    fn observe(&self, call: &OutboundCall) {
        let operation: ObservedOperation = match serde_json::from_str(&call.body) {
            Ok(op) => op,
            Err(e) => {
                // malformed payload: log it and let the call pass through
                tracing::warn!("error parsing outbound call body: {}", e);
                return;
            }
        };
        if !operation.is_trigger() {
            return;
        }
        let Some(scene_id) = operation.scene_id() else {
            tracing::warn!("trigger mutation without a scene id, ignoring");
            return;
        };

        // Read the player time at the moment of the trigger, not after the
        // operator has answered the prompt.
        let timestamp_display = self
            .timestamps
            .current()
            .unwrap_or_else(|| DEFAULT_TIMESTAMP.to_string());
        let seconds = timestamp::to_seconds(&timestamp_display);
        tracing::debug!(
            "O-counter trigger for scene {} at {} ({}s)",
            scene_id,
            timestamp_display,
            seconds
        );

        let handle = tokio::spawn(react(
            Arc::clone(&self.marker),
            Arc::clone(&self.confirmer),
            scene_id,
            timestamp_display,
            seconds,
        ));
        self.reactions.lock().unwrap().push(handle);
    }
}

/// Detached reaction: confirm, then create. Outcomes stay on this path and
/// never reach the observed call.
async fn react(
    marker: Arc<MarkerClient>,
    confirmer: Arc<dyn Confirmer>,
    scene_id: String,
    display: String,
    seconds: u64,
) {
    let prompt = format!("Create Marker at timestamp {}?", display);
    let accepted = tokio::task::spawn_blocking(move || confirmer.confirm(&prompt))
        .await
        .unwrap_or(false);
    if !accepted {
        // declined: deliberately silent
        return;
    }
    // failure is already logged by the marker client
    let _ = marker.create(&scene_id, seconds).await;
}
