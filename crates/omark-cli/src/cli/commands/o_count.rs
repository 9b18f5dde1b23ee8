//! `omark o-count <scene-id>` – increment the O-counter through the
//! intercepted client so the marker hook can react.

use anyhow::{Context, Result};
use std::io::{self, Write};
use std::sync::Arc;

use omark_core::confirm::{AcceptAll, Confirmer};
use omark_core::graphql::AddORequest;
use omark_core::intercept::{InterceptedClient, Interceptor, OutboundCall};
use omark_core::marker::{MarkerClient, MarkerSettings};
use omark_core::playback::{FixedTimestamp, NoTimestamp, TimestampSource};
use omark_core::transport::{CurlTransport, Transport};
use omark_core::trigger::MarkerOnOcount;

/// Interactive confirmation on the controlling terminal. Runs inside the
/// reaction's blocking task, so reading stdin here is fine.
struct StdinConfirmer;

impl Confirmer for StdinConfirmer {
    fn confirm(&self, prompt: &str) -> bool {
        print!("{} [y/N] ", prompt);
        if io::stdout().flush().is_err() {
            return false;
        }
        let mut answer = String::new();
        if io::stdin().read_line(&mut answer).is_err() {
            return false;
        }
        matches!(answer.trim(), "y" | "Y" | "yes" | "Yes")
    }
}

pub async fn run_o_count(
    endpoint: &str,
    tag: &str,
    scene_id: &str,
    at: Option<&str>,
    assume_yes: bool,
) -> Result<()> {
    let settings = MarkerSettings::new(endpoint, tag)?;
    tracing::debug!("o-count for scene {} via {}", scene_id, endpoint);
    let transport: Arc<dyn Transport> = Arc::new(CurlTransport::new());

    // One client instance for the whole run; the hook is registered before
    // anything is dispatched.
    let client = InterceptedClient::new(Arc::clone(&transport), endpoint);
    let marker = Arc::new(MarkerClient::new(settings, transport));
    let timestamps: Arc<dyn TimestampSource> = match at {
        Some(display) => Arc::new(FixedTimestamp::new(display)),
        None => Arc::new(NoTimestamp),
    };
    let confirmer: Arc<dyn Confirmer> = if assume_yes {
        Arc::new(AcceptAll)
    } else {
        Arc::new(StdinConfirmer)
    };
    let hook = Arc::new(MarkerOnOcount::new(marker, timestamps, confirmer));
    client.register(Arc::clone(&hook) as Arc<dyn Interceptor>);

    let body = AddORequest::new(scene_id)
        .body()
        .context("serialize O-counter request")?;
    let reply = client
        .dispatch(OutboundCall::new(endpoint, body))
        .await
        .context("O-counter call failed")?;
    if reply.is_success() {
        println!("O-counter incremented for scene {scene_id}");
    } else {
        println!("O-counter call returned HTTP {}", reply.status);
    }

    // Join the fire-and-forget reaction before the process exits.
    hook.drain().await;
    Ok(())
}
