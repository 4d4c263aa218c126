//! Download utilities
//!
//! Blocking HTTP fetches. Callers run on the tick thread and wait for
//! the body or a failure.

use crate::core::error::{LauncherError, Result};
use reqwest::blocking::Client;
use std::time::Duration;

/// Build the shared HTTP client
pub fn http_client(timeout: Duration) -> anyhow::Result<Client> {
    let client = Client::builder()
        .timeout(timeout)
        .user_agent(concat!("gamedeck/", env!("CARGO_PKG_VERSION")))
        .build()?;
    Ok(client)
}

/// Fetch a URL into memory. Any non-2xx status is a failure.
pub fn download_bytes(client: &Client, url: &str) -> Result<Vec<u8>> {
    let response = client
        .get(url)
        .send()
        .map_err(|e| LauncherError::FetchFailed(e.to_string()))?;

    let status = response.status();
    if !status.is_success() {
        return Err(LauncherError::FetchFailed(format!("HTTP {}", status)));
    }

    let bytes = response
        .bytes()
        .map_err(|e| LauncherError::FetchFailed(e.to_string()))?;
    Ok(bytes.to_vec())
}

/// Serve exactly one canned HTTP response on a local port, returning
/// the base URL
#[cfg(test)]
pub(crate) fn serve_once(status: &'static str, body: &'static [u8]) -> String {
    use std::io::{Read, Write};

    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    std::thread::spawn(move || {
        if let Ok((mut stream, _)) = listener.accept() {
            let mut buf = [0u8; 1024];
            let _ = stream.read(&mut buf);
            let head = format!(
                "HTTP/1.1 {}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
                status,
                body.len()
            );
            let _ = stream.write_all(head.as_bytes());
            let _ = stream.write_all(body);
        }
    });
    format!("http://{}", addr)
}
