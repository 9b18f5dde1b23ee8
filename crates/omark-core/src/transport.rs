//! HTTP transmission: blocking JSON POST to a GraphQL endpoint.
//!
//! Uses the curl crate (libcurl). Runs in the current thread; call from
//! `spawn_blocking` if used from async code.

use anyhow::{Context, Result};
use std::time::Duration;

use crate::intercept::OutboundCall;

/// Transmission seam, implemented by the curl transport and by test doubles.
pub trait Transport: Send + Sync {
    /// Performs the real call: POST the payload to the call's destination.
    fn send(&self, call: &OutboundCall) -> Result<TransportReply>;
}

/// Outcome of a transmission: HTTP status plus raw response body.
///
/// Non-2xx responses are returned, not turned into errors; the caller decides
/// what a failure body means.
#[derive(Debug, Clone)]
pub struct TransportReply {
    pub status: u32,
    pub body: String,
}

impl TransportReply {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// libcurl-backed transport posting `application/json` bodies.
#[derive(Debug, Default)]
pub struct CurlTransport;

impl CurlTransport {
    pub fn new() -> Self {
        Self
    }
}

impl Transport for CurlTransport {
    fn send(&self, call: &OutboundCall) -> Result<TransportReply> {
        let mut response: Vec<u8> = Vec::new();

        let mut easy = curl::easy::Easy::new();
        easy.url(&call.url).context("invalid URL")?;
        easy.post(true)?;
        easy.post_fields_copy(call.body.as_bytes())?;
        easy.follow_location(true)?;
        easy.connect_timeout(Duration::from_secs(15))?;
        easy.timeout(Duration::from_secs(60))?;

        let mut list = curl::easy::List::new();
        list.append("Content-Type: application/json")?;
        easy.http_headers(list)?;

        {
            let mut transfer = easy.transfer();
            transfer.write_function(|data| {
                response.extend_from_slice(data);
                Ok(data.len())
            })?;
            transfer.perform().context("POST request failed")?;
        }

        let status = easy.response_code().context("no response code")?;
        Ok(TransportReply {
            status,
            body: String::from_utf8_lossy(&response).into_owned(),
        })
    }
}
