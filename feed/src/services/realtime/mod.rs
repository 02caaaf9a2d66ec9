//! # Realtime Notification Channel
//!
//! WebSocket connection to the backend's Socket.IO endpoint, used only to
//! learn that a new notification exists.
//!
//! ## Lifecycle
//!
//! ```text
//! SocketIoConnector::open()
//!   └─> tokio::spawn(run_channel)      returns ChannelGuard immediately
//!         connect ─> "0{..}" ─> send "40"
//!                    "40"    ─> send 42["join", username]
//!                    "2"     ─> send "3"
//!                    42["notification", ..] ─> flag.raise()
//!
//! drop(ChannelGuard) / guard.close()
//!   └─> shutdown signal ─> send "41" + close frame, task ends
//! ```
//!
//! There is no reconnection. A dropped connection is logged and the task ends;
//! the next activation opens a fresh channel.

pub mod packet;
pub mod protocol;

use crate::app::events::{EventSink, FeedEvent};
use crate::core::error::Result;
use crate::core::service::ChannelConnector;
use futures_util::{SinkExt, StreamExt};
use protocol::ChannelProtocol;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tokio_tungstenite::{connect_async, tungstenite::Message};
use tracing::{debug, info, trace, warn};

/// "Has an unseen notification arrived since last cleared".
///
/// Cloning shares the same flag.
#[derive(Debug, Clone, Default)]
pub struct NotificationFlag(Arc<AtomicBool>);

impl NotificationFlag {
    /// Set the flag. Returns `true` only if it was previously clear.
    pub fn raise(&self) -> bool {
        !self.0.swap(true, Ordering::SeqCst)
    }

    /// Clear the flag. Returns whether it was set.
    pub fn clear(&self) -> bool {
        self.0.swap(false, Ordering::SeqCst)
    }

    pub fn is_set(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// Owns one live channel. Dropping it closes the channel.
pub struct ChannelGuard {
    username: String,
    shutdown: Option<oneshot::Sender<()>>,
    task: Option<JoinHandle<()>>,
}

impl ChannelGuard {
    /// `task` is the background connection, if the connector runs one.
    pub fn new(username: impl Into<String>, shutdown: oneshot::Sender<()>, task: Option<JoinHandle<()>>) -> Self {
        Self {
            username: username.into(),
            shutdown: Some(shutdown),
            task,
        }
    }

    /// Username the channel was opened for.
    pub fn username(&self) -> &str {
        &self.username
    }

    /// Still open: not closed by us, and the other end of the shutdown
    /// signal (owned by the connection) is still around.
    pub fn is_live(&self) -> bool {
        let listening = self.shutdown.as_ref().map_or(false, |tx| !tx.is_closed());
        listening && self.task.as_ref().map_or(true, |task| !task.is_finished())
    }

    /// Close and wait for the background task to finish its goodbye.
    pub async fn close(mut self) {
        self.signal_shutdown();
        if let Some(task) = self.task.take() {
            if let Err(e) = task.await {
                warn!(error = %e, username = %self.username, "Notification channel task failed");
            }
        }
    }

    fn signal_shutdown(&mut self) {
        if let Some(shutdown) = self.shutdown.take() {
            // Err means the task already ended on its own.
            let _ = shutdown.send(());
            debug!(username = %self.username, "Notification channel shutdown signalled");
        }
    }
}

impl Drop for ChannelGuard {
    fn drop(&mut self) {
        self.signal_shutdown();
    }
}

/// Production connector speaking Socket.IO over WebSocket.
#[derive(Debug, Clone)]
pub struct SocketIoConnector {
    socket_url: String,
}

impl SocketIoConnector {
    /// `socket_url` is the HTTP(S) base the Socket.IO server listens on.
    pub fn new(socket_url: impl Into<String>) -> Self {
        Self {
            socket_url: socket_url.into(),
        }
    }

    /// WebSocket endpoint for the Engine.IO v4 transport.
    pub fn endpoint(&self) -> String {
        let base = self
            .socket_url
            .trim_end_matches('/')
            .replacen("https://", "wss://", 1)
            .replacen("http://", "ws://", 1);
        format!("{}/socket.io/?EIO=4&transport=websocket", base)
    }
}

impl ChannelConnector for SocketIoConnector {
    fn open(&self, username: &str, flag: NotificationFlag, events: EventSink) -> ChannelGuard {
        let (shutdown_tx, shutdown_rx) = oneshot::channel();
        let endpoint = self.endpoint();
        let task_username = username.to_string();

        let task = tokio::spawn(async move {
            let result = run_channel(
                endpoint,
                task_username.clone(),
                flag,
                events.clone(),
                shutdown_rx,
            )
            .await;
            if let Err(e) = result {
                warn!(error = %e, username = %task_username, "Notification channel ended with error");
            }
            events.emit(FeedEvent::ChannelClosed(task_username));
        });

        ChannelGuard::new(username, shutdown_tx, Some(task))
    }
}

async fn run_channel(
    endpoint: String,
    username: String,
    flag: NotificationFlag,
    events: EventSink,
    mut shutdown: oneshot::Receiver<()>,
) -> Result<()> {
    info!(url = %endpoint, username = %username, "Connecting notification channel");

    let (ws_stream, response) = tokio::select! {
        _ = &mut shutdown => {
            debug!("Notification channel closed before connecting");
            return Ok(());
        }
        connected = connect_async(endpoint.as_str()) => connected?,
    };
    info!(status = ?response.status(), "Notification channel connected");

    let (mut write, mut read) = ws_stream.split();
    let mut protocol = ChannelProtocol::new(username, flag, events);

    loop {
        tokio::select! {
            _ = &mut shutdown => {
                for frame in ChannelProtocol::close_frames() {
                    let _ = write.send(Message::Text(frame)).await;
                }
                let _ = write.send(Message::Close(None)).await;
                info!("Notification channel closed by client");
                return Ok(());
            }
            msg = read.next() => match msg {
                Some(Ok(Message::Text(text))) => {
                    let outcome = protocol.on_frame(&text);
                    for reply in outcome.replies {
                        write.send(Message::Text(reply)).await?;
                    }
                    if outcome.closed {
                        info!("Notification channel closed by server");
                        return Ok(());
                    }
                }
                Some(Ok(Message::Ping(data))) => {
                    trace!(data_len = data.len(), "Received ping, sending pong");
                    write.send(Message::Pong(data)).await?;
                }
                Some(Ok(Message::Close(frame))) => {
                    info!(frame = ?frame, "Notification channel socket closed");
                    return Ok(());
                }
                Some(Ok(_)) => trace!("Ignoring non-text channel message"),
                Some(Err(e)) => return Err(e.into()),
                None => {
                    info!("Notification channel stream ended");
                    return Ok(());
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flag_raise_is_idempotent() {
        let flag = NotificationFlag::default();
        assert!(flag.raise());
        assert!(!flag.raise());
        assert!(flag.is_set());

        assert!(flag.clear());
        assert!(!flag.is_set());
        assert!(!flag.clear());
    }

    #[test]
    fn test_flag_clones_share_state() {
        let flag = NotificationFlag::default();
        let other = flag.clone();
        other.raise();
        assert!(flag.is_set());
    }

    #[test]
    fn test_endpoint_from_http_base() {
        assert_eq!(
            SocketIoConnector::new("http://localhost:4000").endpoint(),
            "ws://localhost:4000/socket.io/?EIO=4&transport=websocket"
        );
        assert_eq!(
            SocketIoConnector::new("https://feed.example.com/").endpoint(),
            "wss://feed.example.com/socket.io/?EIO=4&transport=websocket"
        );
    }

    #[test]
    fn test_guard_drop_signals_shutdown() {
        let (tx, mut rx) = oneshot::channel();
        let guard = ChannelGuard::new("alice", tx, None);
        assert!(guard.is_live());
        assert_eq!(guard.username(), "alice");

        drop(guard);
        assert!(rx.try_recv().is_ok());
    }

    #[test]
    fn test_guard_not_live_once_connection_side_gone() {
        let (tx, rx) = oneshot::channel::<()>();
        let guard = ChannelGuard::new("alice", tx, None);

        drop(rx);
        assert!(!guard.is_live());
    }

    async fn next_frame<S>(ws: &mut tokio_tungstenite::WebSocketStream<S>) -> Option<String>
    where
        S: tokio::io::AsyncRead + tokio::io::AsyncWrite + Unpin,
    {
        loop {
            match ws.next().await? {
                Ok(Message::Text(text)) => return Some(text),
                Ok(Message::Close(_)) => return Some("close".to_string()),
                Ok(_) => continue,
                Err(_) => return None,
            }
        }
    }

    #[tokio::test]
    async fn test_socket_handshake_join_pong_and_goodbye() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let (ready_tx, ready_rx) = oneshot::channel::<()>();

        let server = tokio::spawn(async move {
            let (stream, _) = listener.accept().await.unwrap();
            let mut ws = tokio_tungstenite::accept_async(stream).await.unwrap();
            let mut received = Vec::new();

            ws.send(Message::Text(
                r#"0{"sid":"s1","upgrades":[],"pingInterval":25000,"pingTimeout":20000}"#.to_string(),
            ))
            .await
            .unwrap();
            received.push(next_frame(&mut ws).await.unwrap());

            ws.send(Message::Text(r#"40{"sid":"n1"}"#.to_string())).await.unwrap();
            received.push(next_frame(&mut ws).await.unwrap());

            ws.send(Message::Text(r#"42["notification",{"from":"bob"}]"#.to_string()))
                .await
                .unwrap();
            ws.send(Message::Text("2".to_string())).await.unwrap();
            received.push(next_frame(&mut ws).await.unwrap());
            let _ = ready_tx.send(());

            while let Some(frame) = next_frame(&mut ws).await {
                let done = frame == "close";
                received.push(frame);
                if done {
                    break;
                }
            }
            received
        });

        let (events, rx) = crate::app::events::channel();
        let flag = NotificationFlag::default();
        let connector = SocketIoConnector::new(format!("http://{}", addr));
        let guard = connector.open("alice", flag.clone(), events);

        ready_rx.await.unwrap();
        assert!(flag.is_set());
        assert!(guard.is_live());

        guard.close().await;
        let frames = server.await.unwrap();

        assert_eq!(
            frames,
            vec!["40", r#"42["join","alice"]"#, "3", "41", "close"]
        );
        let seen: Vec<FeedEvent> = std::iter::from_fn(|| rx.try_recv().ok()).collect();
        assert_eq!(
            seen,
            vec![
                FeedEvent::ChannelOpened("alice".to_string()),
                FeedEvent::NotificationReceived,
                FeedEvent::ChannelClosed("alice".to_string()),
            ]
        );
    }

    #[tokio::test]
    async fn test_unreachable_server_ends_channel() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let (events, rx) = crate::app::events::channel();
        let connector = SocketIoConnector::new(format!("http://{}", addr));
        let guard = connector.open("alice", NotificationFlag::default(), events);

        assert_eq!(rx.recv().await.unwrap(), FeedEvent::ChannelClosed("alice".to_string()));
        tokio::task::yield_now().await;
        assert!(!guard.is_live());
    }

    #[tokio::test]
    async fn test_guard_close_waits_for_task() {
        let (tx, rx) = oneshot::channel::<()>();
        let (done_tx, done_rx) = oneshot::channel();
        let task = tokio::spawn(async move {
            let _ = rx.await;
            let _ = done_tx.send(());
        });

        ChannelGuard::new("alice", tx, Some(task)).close().await;
        assert!(done_rx.await.is_ok());
    }
}
