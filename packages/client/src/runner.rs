//! Client execution logic.
//!
//! The client opens exactly one connection. A dropped connection is reported
//! and ends the run; there is no reconnect.

use crate::{
    config::ClientConfig,
    error::ClientError,
    session::run_session,
    view::TerminalRenderer,
};

/// Run the dashboard client, printing the dashboard on every change
pub async fn run_client(config: ClientConfig) -> Result<(), ClientError> {
    tracing::info!(
        "Attempting to connect to {} for guild '{}'",
        config.websocket_url,
        config.guild_id
    );
    if config.identity.is_empty() {
        tracing::warn!("No 'identifier' cookie given; identifying with an empty identifier");
    }

    let mut renderer = TerminalRenderer::new(config.queue_slots);
    match run_session(&config, &mut renderer).await {
        Ok(()) => {
            tracing::info!("Client session ended normally");
            Ok(())
        }
        Err(ClientError::Rejected { code, reason }) => {
            tracing::error!("Gateway rejected the session: {} ({})", code, reason);
            Err(ClientError::Rejected { code, reason })
        }
        Err(e) => {
            tracing::warn!("Session ended: {}", e);
            Err(e)
        }
    }
}
