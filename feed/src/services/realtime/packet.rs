//! # Socket.IO Packet Codec
//!
//! Text framing for Engine.IO v4 carrying Socket.IO v5 packets, default
//! namespace only. Binary attachments are not supported; such packets decode
//! to [`Packet::Other`] and are ignored by the channel.
//!
//! ```text
//! 0{"sid":"..."}          engine open
//! 2 / 3                   ping / pong
//! 40                      namespace connect
//! 41                      namespace disconnect
//! 42["notification",{}]   event
//! ```

use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq)]
pub enum Packet {
    /// Engine handshake with its JSON parameters.
    Open(Value),
    /// Engine close.
    Close,
    Ping,
    Pong,
    Noop,
    /// Namespace connect, with the server's payload if it sent one.
    Connect(Option<Value>),
    Disconnect,
    Event { name: String, args: Vec<Value> },
    ConnectError(Value),
    /// Anything we parse but don't act on (acks, binary, upgrade).
    Other(String),
}

#[derive(Debug, Error, PartialEq)]
pub enum PacketError {
    #[error("empty frame")]
    Empty,
    #[error("unknown packet type '{0}'")]
    UnknownType(char),
    #[error("invalid JSON payload: {0}")]
    InvalidJson(String),
    #[error("event payload must be a non-empty array starting with a name")]
    MalformedEvent,
}

impl Packet {
    pub fn event(name: &str, args: Vec<Value>) -> Self {
        Packet::Event {
            name: name.to_string(),
            args,
        }
    }
}

fn parse_json(text: &str) -> Result<Value, PacketError> {
    serde_json::from_str(text).map_err(|e| PacketError::InvalidJson(e.to_string()))
}

/// Decode one WebSocket text frame.
pub fn decode(frame: &str) -> Result<Packet, PacketError> {
    let kind = frame.chars().next().ok_or(PacketError::Empty)?;
    let rest = &frame[kind.len_utf8()..];

    match kind {
        '0' => Ok(Packet::Open(parse_json(rest)?)),
        '1' => Ok(Packet::Close),
        '2' => Ok(Packet::Ping),
        '3' => Ok(Packet::Pong),
        '4' => decode_socket(rest),
        '5' => Ok(Packet::Other(frame.to_string())),
        '6' => Ok(Packet::Noop),
        other => Err(PacketError::UnknownType(other)),
    }
}

fn decode_socket(body: &str) -> Result<Packet, PacketError> {
    let kind = body.chars().next().ok_or(PacketError::Empty)?;
    let mut rest = &body[kind.len_utf8()..];

    // "/namespace," prefix
    if rest.starts_with('/') {
        rest = match rest.find(',') {
            Some(comma) => &rest[comma + 1..],
            None => "",
        };
    }

    // ack id
    let ack_len = rest
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(rest.len());
    rest = &rest[ack_len..];

    match kind {
        '0' if rest.is_empty() => Ok(Packet::Connect(None)),
        '0' => Ok(Packet::Connect(Some(parse_json(rest)?))),
        '1' => Ok(Packet::Disconnect),
        '2' => {
            let Value::Array(mut items) = parse_json(rest)? else {
                return Err(PacketError::MalformedEvent);
            };
            if items.is_empty() {
                return Err(PacketError::MalformedEvent);
            }
            match items.remove(0) {
                Value::String(name) => Ok(Packet::Event { name, args: items }),
                _ => Err(PacketError::MalformedEvent),
            }
        }
        '4' => Ok(Packet::ConnectError(parse_json(rest).unwrap_or(Value::Null))),
        '3' | '5' | '6' => Ok(Packet::Other(body.to_string())),
        other => Err(PacketError::UnknownType(other)),
    }
}

/// Encode a packet as a WebSocket text frame.
pub fn encode(packet: &Packet) -> String {
    match packet {
        Packet::Open(params) => format!("0{}", params),
        Packet::Close => "1".to_string(),
        Packet::Ping => "2".to_string(),
        Packet::Pong => "3".to_string(),
        Packet::Noop => "6".to_string(),
        Packet::Connect(None) => "40".to_string(),
        Packet::Connect(Some(payload)) => format!("40{}", payload),
        Packet::Disconnect => "41".to_string(),
        Packet::Event { name, args } => {
            let mut items = Vec::with_capacity(args.len() + 1);
            items.push(Value::String(name.clone()));
            items.extend(args.iter().cloned());
            format!("42{}", Value::Array(items))
        }
        Packet::ConnectError(payload) => format!("44{}", payload),
        Packet::Other(raw) => format!("4{}", raw),
    }
}
