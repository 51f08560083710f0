//! Message envelopes exchanged with the gateway.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::ProtocolError;

use super::payload::{
    PositionData, QueueData, QueueUpdateData, SnapshotData, TrackPayload, TrackStartData,
    current_track,
};

/// Gateway op codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpCode {
    Dispatch = 0,
    Hello = 1,
    Identify = 2,
}

impl OpCode {
    pub fn code(self) -> u64 {
        self as u64
    }
}

/// Outer envelope of every inbound frame.
#[derive(Debug, Deserialize)]
struct RawEnvelope {
    op: u64,
    #[serde(default)]
    event: Option<String>,
    #[serde(default)]
    data: Value,
}

/// A decoded inbound message.
#[derive(Debug, Clone, PartialEq)]
pub enum Inbound {
    /// Handshake request; the client must identify.
    Hello,
    /// Server-pushed event.
    Dispatch(DispatchEvent),
    /// Any other op code; ignored by the client.
    Other(u64),
}

/// Dispatch events with their second-stage decoded payloads.
#[derive(Debug, Clone, PartialEq)]
pub enum DispatchEvent {
    Connected {
        current: Option<TrackPayload>,
        queue: Option<QueueData>,
    },
    Ready {
        current: Option<TrackPayload>,
        queue: Option<QueueData>,
    },
    Disconnected,
    TrackStart {
        current: Option<TrackPayload>,
    },
    TrackEnd,
    Position(PositionData),
    QueueUpdate {
        queue: Option<QueueData>,
    },
    /// Event tags this client does not handle. The payload is left unread.
    Unrecognized(String),
}

impl DispatchEvent {
    /// Event tag as sent on the wire
    pub fn tag(&self) -> &str {
        match self {
            DispatchEvent::Connected { .. } => "CONNECTED",
            DispatchEvent::Ready { .. } => "READY",
            DispatchEvent::Disconnected => "DISCONNECTED",
            DispatchEvent::TrackStart { .. } => "TRACK_START",
            DispatchEvent::TrackEnd => "TRACK_END",
            DispatchEvent::Position(_) => "POSITION",
            DispatchEvent::QueueUpdate { .. } => "QUEUE_UPDATE",
            DispatchEvent::Unrecognized(tag) => tag,
        }
    }

    fn decode(event: String, data: Value) -> Result<Self, ProtocolError> {
        fn payload<T: serde::de::DeserializeOwned>(
            event: &str,
            data: Value,
        ) -> Result<T, ProtocolError> {
            serde_json::from_value(data).map_err(|source| ProtocolError::InvalidPayload {
                event: event.to_string(),
                source,
            })
        }

        let decoded = match event.as_str() {
            "CONNECTED" | "READY" => {
                let snapshot: SnapshotData = payload(&event, data)?;
                let current = current_track(snapshot.current);
                let queue = snapshot.queue.map(|queue| queue.into_inner());
                if event == "CONNECTED" {
                    DispatchEvent::Connected { current, queue }
                } else {
                    DispatchEvent::Ready { current, queue }
                }
            }
            "DISCONNECTED" => DispatchEvent::Disconnected,
            "TRACK_START" => {
                let start: TrackStartData = payload(&event, data)?;
                DispatchEvent::TrackStart {
                    current: current_track(start.current),
                }
            }
            "TRACK_END" => DispatchEvent::TrackEnd,
            "POSITION" => DispatchEvent::Position(payload(&event, data)?),
            "QUEUE_UPDATE" => {
                let update: QueueUpdateData = payload(&event, data)?;
                DispatchEvent::QueueUpdate {
                    queue: update.queue.map(|queue| queue.into_inner()),
                }
            }
            _ => DispatchEvent::Unrecognized(event),
        };
        Ok(decoded)
    }
}

impl Inbound {
    /// Decode a text frame: the envelope first, then the event payload.
    pub fn decode(text: &str) -> Result<Self, ProtocolError> {
        let envelope: RawEnvelope =
            serde_json::from_str(text).map_err(ProtocolError::InvalidEnvelope)?;

        match envelope.op {
            op if op == OpCode::Hello.code() => Ok(Inbound::Hello),
            op if op == OpCode::Dispatch.code() => {
                let event = envelope.event.ok_or(ProtocolError::MissingEvent)?;
                DispatchEvent::decode(event, envelope.data).map(Inbound::Dispatch)
            }
            op => Ok(Inbound::Other(op)),
        }
    }
}

/// Identify payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdentifyData {
    pub guild_id: String,
    pub identifier: String,
}

/// Identify message (op 2), the reply to a hello.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdentifyMessage {
    pub op: u64,
    pub data: IdentifyData,
}

impl IdentifyMessage {
    pub fn new(guild_id: impl Into<String>, identifier: impl Into<String>) -> Self {
        Self {
            op: OpCode::Identify.code(),
            data: IdentifyData {
                guild_id: guild_id.into(),
                identifier: identifier.into(),
            },
        }
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}
