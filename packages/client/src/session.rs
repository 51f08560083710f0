//! WebSocket client session management.

use std::future::Future;

use futures_util::{SinkExt, StreamExt};
use tokio_tungstenite::{
    connect_async,
    tungstenite::{
        client::IntoClientRequest,
        http::header::COOKIE,
        protocol::{CloseFrame, Message},
    },
};

use crate::{
    config::ClientConfig,
    error::ClientError,
    protocol::{GatewayCloseCode, IdentifyMessage, Inbound},
    view::{DashboardSync, Renderer, renderer::apply_all},
};

/// Handle one inbound text frame.
///
/// Decodes the frame, applies the resulting render commands and flushes the
/// renderer once. Returns the reply to send, if any. Malformed frames are
/// logged and dropped.
pub fn handle_text<R: Renderer + ?Sized>(
    sync: &DashboardSync,
    text: &str,
    renderer: &mut R,
) -> Option<IdentifyMessage> {
    let inbound = match Inbound::decode(text) {
        Ok(inbound) => inbound,
        Err(e) => {
            tracing::warn!("Dropping malformed message: {}", e);
            return None;
        }
    };

    if let Inbound::Dispatch(event) = &inbound {
        tracing::debug!("Dispatch event '{}'", event.tag());
    }

    let reaction = sync.handle(&inbound);
    if !reaction.commands.is_empty() {
        apply_all(renderer, &reaction.commands);
    }
    reaction.reply
}

/// Outcome of a received close frame
fn close_outcome(frame: Option<CloseFrame>) -> Result<(), ClientError> {
    let Some(frame) = frame else {
        tracing::info!("Server closed the connection");
        return Ok(());
    };

    let code = GatewayCloseCode::from(u16::from(frame.code));
    let reason = frame.reason.to_string();
    if code.is_normal() {
        tracing::info!("Server closed the connection ({})", code);
        Ok(())
    } else {
        Err(ClientError::Rejected { code, reason })
    }
}

/// Run one dashboard session until Ctrl+C or until the server closes it.
pub async fn run_session<R: Renderer + ?Sized>(
    config: &ClientConfig,
    renderer: &mut R,
) -> Result<(), ClientError> {
    run_session_until(config, renderer, async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    })
    .await
}

/// Run one dashboard session until `shutdown` completes or the server closes it.
///
/// Exactly one connection is opened; inbound frames are handled one at a time,
/// to completion, in arrival order.
pub async fn run_session_until<R, F>(
    config: &ClientConfig,
    renderer: &mut R,
    shutdown: F,
) -> Result<(), ClientError>
where
    R: Renderer + ?Sized,
    F: Future<Output = ()>,
{
    let mut request = config
        .websocket_url
        .as_str()
        .into_client_request()
        .map_err(|e| ClientError::ConnectionError(e.to_string()))?;
    if let Some(cookie) = &config.cookie_header {
        request.headers_mut().insert(COOKIE, cookie.clone());
    }

    let (ws_stream, _response) = connect_async(request)
        .await
        .map_err(|e| ClientError::ConnectionError(e.to_string()))?;
    tracing::info!(
        "Connected to {} for guild '{}'",
        config.websocket_url,
        config.guild_id
    );

    let (mut write, mut read) = ws_stream.split();
    let sync = config.dashboard_sync();
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            message = read.next() => match message {
                Some(Ok(Message::Text(text))) => {
                    let Some(reply) = handle_text(&sync, &text, renderer) else {
                        continue;
                    };
                    let json = match reply.to_json() {
                        Ok(json) => json,
                        Err(e) => {
                            tracing::error!("Failed to serialize identify: {}", e);
                            continue;
                        }
                    };
                    tracing::info!("Identifying for guild '{}'", reply.data.guild_id);
                    if let Err(e) = write.send(Message::Text(json.into())).await {
                        tracing::warn!("Failed to send identify: {}", e);
                        return Err(ClientError::ConnectionLost);
                    }
                }
                Some(Ok(Message::Close(frame))) => return close_outcome(frame),
                Some(Ok(_)) => {}
                Some(Err(e)) => {
                    tracing::warn!("WebSocket read error: {}", e);
                    return Err(ClientError::ConnectionLost);
                }
                None => return Err(ClientError::ConnectionLost),
            },
            _ = &mut shutdown => {
                tracing::info!("Shutting down session");
                if let Err(e) = write.send(Message::Close(None)).await {
                    tracing::debug!("Failed to send close frame: {}", e);
                }
                return Ok(());
            }
        }
    }
}
