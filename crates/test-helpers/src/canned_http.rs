// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use anyhow::Result;
use std::sync::{Arc, Mutex};
use tokio::{
    io::{AsyncReadExt, AsyncWriteExt},
    net::{TcpListener, TcpStream},
};
use url::Url;

/// HTTP server on a random local port that answers every request with the same status and
/// body. Remembers the body of the last request it was sent.
#[derive(Clone)]
pub struct CannedHttp {
    url: Url,
    last_request: Arc<Mutex<Option<String>>>,
}

impl CannedHttp {
    pub async fn start(status: u16, body: impl Into<String>) -> Result<Self> {
        Self::serve(status, body.into(), 0).await
    }

    /// Announces more body than it sends, then hangs up
    pub async fn truncated(status: u16, body: impl Into<String>) -> Result<Self> {
        Self::serve(status, body.into(), 64).await
    }

    async fn serve(status: u16, body: String, missing: usize) -> Result<Self> {
        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let url = Url::parse(&format!("http://{}", listener.local_addr()?))?;
        let last_request = Arc::new(Mutex::new(None));

        let recorded = last_request.clone();
        tokio::spawn(async move {
            while let Ok((stream, _)) = listener.accept().await {
                if let Err(e) = answer(stream, status, &body, missing, &recorded).await {
                    tracing::warn!("Canned response failed: {e}");
                }
            }
        });

        Ok(Self { url, last_request })
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    pub fn last_request(&self) -> Option<String> {
        self.last_request
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }
}

async fn answer(
    mut stream: TcpStream,
    status: u16,
    body: &str,
    missing: usize,
    recorded: &Mutex<Option<String>>,
) -> Result<()> {
    let request = read_request(&mut stream).await?;
    *recorded.lock().unwrap_or_else(|e| e.into_inner()) = Some(request);

    let response = format!(
        "HTTP/1.1 {status} Canned\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{body}",
        body.len() + missing
    );
    stream.write_all(response.as_bytes()).await?;
    stream.shutdown().await?;
    Ok(())
}

/// Reads headers and a `content-length` body, returns the body
async fn read_request(stream: &mut TcpStream) -> Result<String> {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 1024];

    let header_end = loop {
        let n = stream.read(&mut chunk).await?;
        anyhow::ensure!(n > 0, "connection closed before headers ended");
        buf.extend_from_slice(&chunk[..n]);
        if let Some(pos) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
            break pos + 4;
        }
    };

    let headers = String::from_utf8_lossy(&buf[..header_end]).to_lowercase();
    let content_length = headers
        .lines()
        .find_map(|line| line.strip_prefix("content-length:"))
        .and_then(|v| v.trim().parse::<usize>().ok())
        .unwrap_or(0);

    while buf.len() < header_end + content_length {
        let n = stream.read(&mut chunk).await?;
        anyhow::ensure!(n > 0, "connection closed before body ended");
        buf.extend_from_slice(&chunk[..n]);
    }

    Ok(String::from_utf8_lossy(&buf[header_end..header_end + content_length]).into_owned())
}
