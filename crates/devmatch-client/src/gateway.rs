use std::time::Duration;

use futures_util::{SinkExt, StreamExt};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_tungstenite::tungstenite::Message;
use tracing::{debug, warn};

use devmatch_types::events::PushEvent;

use crate::error::ClientError;

/// Bound on the initial connect; a dead backend must not hang session
/// entry.
const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Live subscription to the backend's push channel, opened once per
/// browsing session and correlated to one user. From the consumer's side
/// it is a lazy, infinite, non-restartable sequence of match events.
#[derive(Debug)]
pub struct MatchSubscription {
    events: mpsc::UnboundedReceiver<PushEvent>,
    reader: JoinHandle<()>,
}

impl MatchSubscription {
    /// Open the per-session push connection. The socket URL is derived
    /// from the HTTP base URL; the user identifier rides along as a query
    /// parameter, which is how the backend correlates the channel.
    pub async fn connect(base_url: &str, user_id: &str) -> Result<Self, ClientError> {
        let ws_url = format!(
            "{}/ws?user={}",
            base_url
                .replace("http://", "ws://")
                .replace("https://", "wss://"),
            user_id
        );

        let (ws_stream, _) =
            tokio::time::timeout(CONNECT_TIMEOUT, tokio_tungstenite::connect_async(&ws_url))
                .await
                .map_err(|_| ClientError::ConnectTimeout)??;

        debug!("match channel open at {}", ws_url);

        let (mut ws_tx, mut ws_rx) = ws_stream.split();
        let (event_tx, event_rx) = mpsc::unbounded_channel();

        let reader = tokio::spawn(async move {
            while let Some(Ok(msg)) = ws_rx.next().await {
                match msg {
                    Message::Text(text) => match serde_json::from_str::<PushEvent>(&text) {
                        Ok(event) => {
                            if event_tx.send(event).is_err() {
                                break; // subscriber gone
                            }
                        }
                        Err(e) => {
                            warn!(
                                "undecodable push frame: {} -- raw: {}",
                                e,
                                &text[..text.len().min(200)]
                            );
                        }
                    },
                    Message::Ping(payload) => {
                        if ws_tx.send(Message::Pong(payload)).await.is_err() {
                            break;
                        }
                    }
                    Message::Close(_) => break,
                    _ => {}
                }
            }
            debug!("match channel closed");
        });

        Ok(Self {
            events: event_rx,
            reader,
        })
    }

    /// Next pushed event. `None` once the connection is gone for good.
    ///
    /// Cancel-safe: dropping the future loses no events.
    pub async fn next_event(&mut self) -> Option<PushEvent> {
        self.events.recv().await
    }

    /// Tear the subscription down explicitly (logout / session end) so the
    /// connection does not outlive the session.
    pub fn close(self) {
        self.reader.abort();
    }
}

impl Drop for MatchSubscription {
    fn drop(&mut self) {
        self.reader.abort();
    }
}
