//! Live player dashboard client.
//!
//! Opens a single WebSocket connection to the dashboard gateway, identifies
//! itself for one guild, and mirrors the server-pushed player state (current
//! track, playback position, queue slots) onto a fixed set of display elements.

pub mod config;
pub mod cookie;
pub mod domain;
pub mod endpoint;
pub mod error;
pub mod protocol;
pub mod runner;
pub mod session;
pub mod time;
pub mod timezone;
pub mod view;

pub use config::ClientConfig;
pub use error::{ClientError, ConfigError, ProtocolError};
pub use runner::run_client;
