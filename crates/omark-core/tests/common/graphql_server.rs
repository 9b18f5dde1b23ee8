//! Minimal HTTP/1.1 server accepting JSON POSTs for integration tests.
//!
//! Records every request body and answers with canned GraphQL replies keyed
//! on the posted operationName.

use std::io::{Read, Write};
use std::net::{TcpListener, TcpStream};
use std::sync::{Arc, Mutex};
use std::thread;

#[derive(Debug, Clone, Copy, Default)]
pub struct GraphqlServerOptions {
    /// If true, `SceneMarkerCreate` is answered with HTTP 500 and an error body.
    pub fail_marker_create: bool,
}

/// Handle to a running server: endpoint URL plus the recorded request bodies.
pub struct GraphqlServer {
    pub url: String,
    bodies: Arc<Mutex<Vec<String>>>,
}

impl GraphqlServer {
    /// Raw request bodies in arrival order.
    pub fn bodies(&self) -> Vec<String> {
        self.bodies.lock().unwrap().clone()
    }

    /// Parsed bodies whose operationName matches.
    pub fn operations(&self, name: &str) -> Vec<serde_json::Value> {
        self.bodies()
            .iter()
            .filter_map(|body| serde_json::from_str::<serde_json::Value>(body).ok())
            .filter(|value| value["operationName"] == name)
            .collect()
    }
}

/// Starts a server in a background thread. Runs until the process exits.
pub fn start() -> GraphqlServer {
    start_with_options(GraphqlServerOptions::default())
}

pub fn start_with_options(opts: GraphqlServerOptions) -> GraphqlServer {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let port = listener.local_addr().unwrap().port();
    let bodies = Arc::new(Mutex::new(Vec::new()));
    let recorded = Arc::clone(&bodies);
    thread::spawn(move || {
        for stream in listener.incoming().flatten() {
            let recorded = Arc::clone(&recorded);
            thread::spawn(move || handle(stream, &recorded, opts));
        }
    });
    GraphqlServer {
        url: format!("http://127.0.0.1:{}/graphql", port),
        bodies,
    }
}

fn handle(mut stream: TcpStream, recorded: &Mutex<Vec<String>>, opts: GraphqlServerOptions) {
    let _ = stream.set_read_timeout(Some(std::time::Duration::from_secs(2)));
    let _ = stream.set_write_timeout(Some(std::time::Duration::from_secs(2)));

    let body = match read_request_body(&mut stream) {
        Some(body) => body,
        None => return,
    };
    recorded.lock().unwrap().push(body.clone());

    let operation = serde_json::from_str::<serde_json::Value>(&body)
        .ok()
        .and_then(|value| value["operationName"].as_str().map(String::from));

    let (status, reply) = match operation.as_deref() {
        Some("SceneMarkerCreate") if opts.fail_marker_create => (
            "500 Internal Server Error",
            r#"{"errors":[{"message":"marker rejected"}]}"#,
        ),
        Some("SceneMarkerCreate") => ("200 OK", r#"{"data":{"sceneMarkerCreate":{"id":"101"}}}"#),
        Some("SceneAddO") => ("200 OK", r#"{"data":{"sceneAddO":1}}"#),
        _ => ("200 OK", r#"{"data":null}"#),
    };
    let response = format!(
        "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        status,
        reply.len(),
        reply
    );
    let _ = stream.write_all(response.as_bytes());
}

/// Reads one request and returns its body (empty when there is none).
fn read_request_body(stream: &mut TcpStream) -> Option<String> {
    let mut raw: Vec<u8> = Vec::new();
    let mut buf = [0u8; 8192];
    let header_end = loop {
        if let Some(pos) = find_header_end(&raw) {
            break pos;
        }
        match stream.read(&mut buf) {
            Ok(0) => return None,
            Ok(n) => raw.extend_from_slice(&buf[..n]),
            Err(_) => return None,
        }
    };

    let headers = String::from_utf8_lossy(&raw[..header_end]).into_owned();
    if headers.to_ascii_lowercase().contains("100-continue") {
        let _ = stream.write_all(b"HTTP/1.1 100 Continue\r\n\r\n");
    }
    let content_length = content_length(&headers).unwrap_or(0);

    let body_start = header_end + 4;
    while raw.len() < body_start + content_length {
        match stream.read(&mut buf) {
            Ok(0) => break,
            Ok(n) => raw.extend_from_slice(&buf[..n]),
            Err(_) => break,
        }
    }
    let end = (body_start + content_length).min(raw.len());
    Some(String::from_utf8_lossy(&raw[body_start..end]).into_owned())
}

fn find_header_end(raw: &[u8]) -> Option<usize> {
    raw.windows(4).position(|window| window == b"\r\n\r\n")
}

fn content_length(headers: &str) -> Option<usize> {
    headers.lines().find_map(|line| {
        let (name, value) = line.split_once(':')?;
        name.trim()
            .eq_ignore_ascii_case("content-length")
            .then(|| value.trim().parse().ok())?
    })
}
