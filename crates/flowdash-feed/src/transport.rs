//! Transport seam for the feed channel
//!
//! The realtime channel itself is an external collaborator: the client only
//! needs a stream of decoded `FeedEvent`s. `FeedTransport` is the seam where
//! that channel plugs in; `JsonStreamTransport` is the default wiring that
//! reads newline-delimited JSON frames from a TCP connection to the
//! configured endpoint.

use async_trait::async_trait;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::net::TcpStream;
use tokio::sync::mpsc;

use crate::error::FeedError;
use crate::events::FeedEvent;

/// Channel capacity between the transport reader and the feed client
const EVENT_BUFFER: usize = 32;

/// A source of decoded feed events
#[async_trait]
pub trait FeedTransport: Send + Sync {
    /// Open the channel and return the inbound event stream. The stream
    /// ends when the underlying connection closes or the receiver is
    /// dropped.
    async fn connect(&self, base_url: &str) -> Result<mpsc::Receiver<FeedEvent>, FeedError>;
}

/// Default transport: newline-delimited JSON frames over TCP
#[derive(Debug, Default)]
pub struct JsonStreamTransport;

impl JsonStreamTransport {
    /// Reduce a configured base URL ("http://host:port") to a socket address
    fn socket_addr(base_url: &str) -> Result<String, FeedError> {
        let stripped = base_url
            .strip_prefix("http://")
            .or_else(|| base_url.strip_prefix("https://"))
            .or_else(|| base_url.strip_prefix("ws://"))
            .unwrap_or(base_url);
        let addr = stripped.trim_end_matches('/');
        if addr.is_empty() {
            return Err(FeedError::InvalidEndpoint {
                url: base_url.to_string(),
            });
        }
        Ok(addr.to_string())
    }
}

#[async_trait]
impl FeedTransport for JsonStreamTransport {
    async fn connect(&self, base_url: &str) -> Result<mpsc::Receiver<FeedEvent>, FeedError> {
        let addr = Self::socket_addr(base_url)?;
        let stream = TcpStream::connect(&addr).await?;
        log::info!("feed transport connected to {}", addr);

        let (tx, rx) = mpsc::channel(EVENT_BUFFER);
        tokio::spawn(async move {
            let mut lines = BufReader::new(stream).lines();
            loop {
                match lines.next_line().await {
                    Ok(Some(line)) => {
                        if line.trim().is_empty() {
                            continue;
                        }
                        match serde_json::from_str::<FeedEvent>(&line) {
                            Ok(event) => {
                                log::debug!("feed frame: {}", event.label());
                                if tx.send(event).await.is_err() {
                                    // Receiver gone; the session is over
                                    break;
                                }
                            }
                            Err(e) => {
                                log::warn!("skipping undecodable feed frame: {}", e);
                            }
                        }
                    }
                    Ok(None) => {
                        log::info!("feed transport stream ended");
                        break;
                    }
                    Err(e) => {
                        log::warn!("feed transport read error: {}", e);
                        break;
                    }
                }
            }
        });

        Ok(rx)
    }
}

// ==================== Tests ====================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_socket_addr_strips_scheme_and_slash() {
        assert_eq!(
            JsonStreamTransport::socket_addr("http://localhost:4000/").unwrap(),
            "localhost:4000"
        );
        assert_eq!(
            JsonStreamTransport::socket_addr("ws://10.0.0.1:9000").unwrap(),
            "10.0.0.1:9000"
        );
        assert_eq!(
            JsonStreamTransport::socket_addr("feed.internal:4000").unwrap(),
            "feed.internal:4000"
        );
    }

    #[test]
    fn test_socket_addr_rejects_empty() {
        assert!(JsonStreamTransport::socket_addr("http://").is_err());
    }
}
