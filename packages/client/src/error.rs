//! Error types for the dashboard client.

use thiserror::Error;

use crate::protocol::GatewayCloseCode;

/// Client-specific errors
#[derive(Debug, Error)]
pub enum ClientError {
    /// Invalid configuration
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Connection error
    #[error("Connection error: {0}")]
    ConnectionError(String),

    /// The gateway closed the connection with an application close code
    #[error("Closed by gateway ({code}): {reason}")]
    Rejected {
        code: GatewayCloseCode,
        reason: String,
    },

    /// The connection dropped without a close handshake
    #[error("Connection lost")]
    ConnectionLost,
}

/// Configuration errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// The page URL could not be parsed
    #[error("Invalid page URL '{0}'")]
    InvalidPageUrl(String),

    /// The page URL has no host to connect to
    #[error("Page URL '{0}' has no host")]
    MissingHost(String),

    /// Only http and https pages have a matching WebSocket scheme
    #[error("Unsupported page scheme '{0}' (expected http or https)")]
    UnsupportedScheme(String),

    /// The cookie string cannot be sent as a request header
    #[error("Cookie string is not a valid header value")]
    InvalidCookieHeader,
}

/// Errors raised while decoding an inbound gateway message
#[derive(Debug, Error)]
pub enum ProtocolError {
    /// The frame is not a JSON envelope
    #[error("Invalid envelope: {0}")]
    InvalidEnvelope(#[source] serde_json::Error),

    /// A dispatch envelope without an event tag
    #[error("Dispatch message is missing its event tag")]
    MissingEvent,

    /// The payload of a known event does not match its schema
    #[error("Invalid payload for event '{event}': {source}")]
    InvalidPayload {
        event: String,
        #[source]
        source: serde_json::Error,
    },
}
