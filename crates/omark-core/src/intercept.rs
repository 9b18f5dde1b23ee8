//! Call observation: a client wrapper that shows each outgoing call to
//! registered hooks before transmission.
//!
//! The wrapper never suppresses or alters the real call. Inspection happens
//! exactly once, before dispatch, and the transmission is performed afterward
//! regardless of what any hook did.

use anyhow::{Context, Result};
use std::sync::{Arc, RwLock};

use crate::transport::{Transport, TransportReply};

/// One outgoing call: destination plus serialized payload.
///
/// Created by calling code, observed at the moment it is sent, discarded
/// right after. Never mutated once constructed.
#[derive(Debug, Clone)]
pub struct OutboundCall {
    pub url: String,
    pub body: String,
}

impl OutboundCall {
    pub fn new(url: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            body: body.into(),
        }
    }
}

/// Hook invoked with each outgoing call that matches the watched endpoint.
///
/// Implementations absorb their own failures; nothing a hook does may keep
/// the underlying call from being sent.
pub trait Interceptor: Send + Sync {
    fn observe(&self, call: &OutboundCall);
}

/// Client wrapper with an explicit hook-registration API.
///
/// Constructed once at startup and shared by reference. Hooks registered here
/// see each matching call before it goes out on the wire.
pub struct InterceptedClient {
    transport: Arc<dyn Transport>,
    watched: String,
    hooks: RwLock<Vec<Arc<dyn Interceptor>>>,
}

impl InterceptedClient {
    /// `watched` is the endpoint substring. Calls whose destination does not
    /// contain it are forwarded without inspection.
    pub fn new(transport: Arc<dyn Transport>, watched: impl Into<String>) -> Self {
        Self {
            transport,
            watched: watched.into(),
            hooks: RwLock::new(Vec::new()),
        }
    }

    /// Registers a hook. Called once per hook at startup; hooks are never
    /// removed.
    pub fn register(&self, hook: Arc<dyn Interceptor>) {
        self.hooks.write().unwrap().push(hook);
    }

    /// One-shot dispatch: inspect, then always perform the real call.
    pub async fn dispatch(&self, call: OutboundCall) -> Result<TransportReply> {
        self.inspect(&call);
        let transport = Arc::clone(&self.transport);
        tokio::task::spawn_blocking(move || transport.send(&call))
            .await
            .context("transport task failed")?
    }

    /// Staged path: fix the destination now, supply the payload at send time.
    pub fn stage(&self, url: impl Into<String>) -> StagedCall<'_> {
        StagedCall {
            client: self,
            url: url.into(),
        }
    }

    /// Runs hooks when the destination matches and a payload is present.
    fn inspect(&self, call: &OutboundCall) {
        if !call.url.contains(&self.watched) || call.body.is_empty() {
            return;
        }
        for hook in self.hooks.read().unwrap().iter() {
            hook.observe(call);
        }
    }
}

/// A call whose destination is fixed before the payload exists.
///
/// The destination is retained from staging until `send`, where inspection
/// happens; staging alone transmits nothing.
pub struct StagedCall<'a> {
    client: &'a InterceptedClient,
    url: String,
}

impl StagedCall<'_> {
    pub async fn send(self, body: impl Into<String>) -> Result<TransportReply> {
        self.client
            .dispatch(OutboundCall {
                url: self.url,
                body: body.into(),
            })
            .await
    }
}
