// ABOUTME: HTTP readiness polling for started containers.
// ABOUTME: Probes the mapped host port until the expected status or a deadline.

use crate::spec::HttpWait;
use http_body_util::Empty;
use hyper_util::rt::TokioIo;
use std::time::Duration;
use tokio::net::TcpStream;

/// Applied when a spec carries no startup timeout.
pub const DEFAULT_STARTUP_TIMEOUT: Duration = Duration::from_secs(60);

const POLL_INTERVAL: Duration = Duration::from_millis(500);

/// Error from the readiness wait.
#[derive(Debug, thiserror::Error)]
pub enum WaitError {
    #[error(
        "GET {path} on host port {port} did not return {status} within {secs}s (last: {last})"
    )]
    Timeout {
        path: String,
        port: u16,
        status: u16,
        secs: u64,
        last: String,
    },
}

/// Poll `GET {wait.path}` against `host:host_port` until it returns the
/// expected status or the timeout elapses. Connection failures count as
/// not-ready and are retried until the deadline. Each attempt is capped by
/// the remaining time, so a peer that accepts but never answers cannot hold
/// the wait past its deadline.
pub async fn wait_for_http(
    host: &str,
    host_port: u16,
    wait: &HttpWait,
    timeout: Duration,
) -> Result<(), WaitError> {
    let deadline = std::time::Instant::now() + timeout;
    let mut last = "no probe completed".to_string();

    loop {
        let Some(remaining) = deadline.checked_duration_since(std::time::Instant::now()) else {
            break;
        };
        if remaining.is_zero() {
            break;
        }
        match tokio::time::timeout(remaining, probe(host, host_port, &wait.path)).await {
            Ok(Ok(status)) if status == wait.expect_status => {
                tracing::debug!(path = %wait.path, port = host_port, "readiness probe passed");
                return Ok(());
            }
            Ok(Ok(status)) => {
                last = format!("HTTP {}", status);
            }
            Ok(Err(e)) => {
                last = e;
            }
            Err(_) => {
                last = "probe hung until the deadline".to_string();
                break;
            }
        }
        tokio::time::sleep(POLL_INTERVAL).await;
    }

    Err(WaitError::Timeout {
        path: wait.path.clone(),
        port: host_port,
        status: wait.expect_status,
        secs: timeout.as_secs(),
        last,
    })
}

async fn probe(host: &str, port: u16, path: &str) -> Result<u16, String> {
    let stream = TcpStream::connect((host, port))
        .await
        .map_err(|e| format!("connect failed: {}", e))?;

    let io = TokioIo::new(stream);

    let (mut sender, conn) = hyper::client::conn::http1::handshake(io)
        .await
        .map_err(|e| format!("HTTP handshake failed: {}", e))?;

    // Drive the connection until the request completes
    tokio::spawn(async move {
        if let Err(e) = conn.await {
            tracing::debug!("readiness probe connection error: {}", e);
        }
    });

    let req = hyper::Request::builder()
        .method("GET")
        .uri(path)
        .header("Host", host)
        .body(Empty::<bytes::Bytes>::new())
        .map_err(|e| format!("failed to build request: {}", e))?;

    let resp = sender
        .send_request(req)
        .await
        .map_err(|e| format!("request failed: {}", e))?;

    Ok(resp.status().as_u16())
}

#[cfg(test)]
mod tests {
    use super::*;

    // A listener that accepts connections and then never writes a byte.
    async fn silent_listener() -> (tokio::net::TcpListener, u16) {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind");
        let port = listener.local_addr().expect("local addr").port();
        (listener, port)
    }

    #[tokio::test]
    async fn silent_server_cannot_outlive_the_deadline() {
        let (listener, port) = silent_listener().await;
        tokio::spawn(async move {
            loop {
                let Ok((stream, _)) = listener.accept().await else {
                    return;
                };
                // Hold the connection open without responding.
                tokio::spawn(async move {
                    let _stream = stream;
                    tokio::time::sleep(Duration::from_secs(60)).await;
                });
            }
        });

        let wait = HttpWait::new(port, "/v1/status/leader");
        let result = tokio::time::timeout(
            Duration::from_secs(5),
            wait_for_http("127.0.0.1", port, &wait, Duration::from_secs(1)),
        )
        .await
        .expect("wait must finish at its own deadline");

        assert!(matches!(result, Err(WaitError::Timeout { .. })));
    }

    #[tokio::test]
    async fn refused_connection_times_out_with_last_outcome() {
        let (listener, port) = silent_listener().await;
        // Free the port so connections are refused.
        drop(listener);

        let wait = HttpWait::new(port, "/v1/status/leader");
        let result = wait_for_http("127.0.0.1", port, &wait, Duration::from_millis(300)).await;

        match result {
            Err(WaitError::Timeout { last, .. }) => {
                assert!(last.contains("connect failed") || last == "no probe completed");
            }
            other => panic!("expected timeout, got {:?}", other),
        }
    }
}
