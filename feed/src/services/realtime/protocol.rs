//! # Notification Channel Protocol
//!
//! Per-connection state machine: answers the handshake, announces presence
//! once, keeps the engine alive with pongs and raises the notification flag.
//! Kept free of I/O so it can be driven frame by frame in tests.

use super::packet::{self, Packet};
use super::NotificationFlag;
use crate::app::events::{EventSink, FeedEvent};
use serde_json::Value;
use tracing::{debug, info, trace, warn};

/// Event name the server pushes for every new notification.
pub const NOTIFICATION_EVENT: &str = "notification";
/// Event name the client emits to announce its username.
pub const JOIN_EVENT: &str = "join";

/// What to do after a frame.
#[derive(Debug, Default, PartialEq)]
pub struct FrameOutcome {
    /// Frames to send back, in order.
    pub replies: Vec<String>,
    /// The server ended the session.
    pub closed: bool,
}

impl FrameOutcome {
    fn reply(frame: String) -> Self {
        Self {
            replies: vec![frame],
            closed: false,
        }
    }

    fn closed() -> Self {
        Self {
            replies: Vec::new(),
            closed: true,
        }
    }
}

pub struct ChannelProtocol {
    username: String,
    joined: bool,
    flag: NotificationFlag,
    events: EventSink,
}

impl ChannelProtocol {
    pub fn new(username: impl Into<String>, flag: NotificationFlag, events: EventSink) -> Self {
        Self {
            username: username.into(),
            joined: false,
            flag,
            events,
        }
    }

    /// Whether the join announcement has been sent on this connection.
    pub fn has_joined(&self) -> bool {
        self.joined
    }

    /// Frames to send when the client closes the channel.
    pub fn close_frames() -> Vec<String> {
        vec![packet::encode(&Packet::Disconnect)]
    }

    pub fn on_frame(&mut self, frame: &str) -> FrameOutcome {
        let packet = match packet::decode(frame) {
            Ok(packet) => packet,
            Err(e) => {
                warn!(error = %e, frame_len = frame.len(), "Ignoring undecodable channel frame");
                return FrameOutcome::default();
            }
        };

        match packet {
            Packet::Open(params) => {
                debug!(params = %params, "Engine handshake received, connecting namespace");
                FrameOutcome::reply(packet::encode(&Packet::Connect(None)))
            }
            Packet::Connect(_) => {
                if self.joined {
                    trace!("Duplicate namespace connect, join already sent");
                    return FrameOutcome::default();
                }
                self.joined = true;
                info!(username = %self.username, "Notification channel joined");
                self.events.emit(FeedEvent::ChannelOpened(self.username.clone()));
                FrameOutcome::reply(packet::encode(&Packet::event(
                    JOIN_EVENT,
                    vec![Value::String(self.username.clone())],
                )))
            }
            Packet::Ping => FrameOutcome::reply(packet::encode(&Packet::Pong)),
            Packet::Event { name, .. } if name == NOTIFICATION_EVENT => {
                if self.flag.raise() {
                    debug!("Unread notification flag raised");
                    self.events.emit(FeedEvent::NotificationReceived);
                } else {
                    trace!("Notification while flag already set");
                }
                FrameOutcome::default()
            }
            Packet::Event { name, .. } => {
                trace!(event = %name, "Ignoring channel event");
                FrameOutcome::default()
            }
            Packet::ConnectError(payload) => {
                warn!(payload = %payload, "Server refused namespace connect");
                FrameOutcome::closed()
            }
            Packet::Close | Packet::Disconnect => FrameOutcome::closed(),
            Packet::Pong | Packet::Noop | Packet::Other(_) => FrameOutcome::default(),
        }
    }
}
