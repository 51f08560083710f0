//! Wire DTOs for the dashboard gateway.
//!
//! DTOs are organized by role:
//! - `envelope`: outer message envelopes and op codes
//! - `payload`: event payloads, including the JSON-in-JSON fields
//! - `conversion`: payload DTOs into domain entities
//! - `close`: application close codes sent by the gateway

pub mod close;
pub mod conversion;
pub mod envelope;
pub mod payload;

pub use close::GatewayCloseCode;
pub use envelope::{DispatchEvent, IdentifyData, IdentifyMessage, Inbound, OpCode};
pub use payload::{Encoded, PositionData, QueueData, QueueEntries, SnapshotData, TrackPayload};
