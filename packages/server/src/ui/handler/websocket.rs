//! WebSocket connection handler.

use std::sync::Arc;

use axum::{
    extract::{State, ws::WebSocketUpgrade},
    response::IntoResponse,
};

use crate::{
    domain::ChannelIdFactory,
    ui::{session::Session, state::AppState},
};

/// Upgrade the request and hand the socket to a fresh session.
///
/// The channel id is assigned here, before the connect use case runs.
pub async fn websocket_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    let channel_id = ChannelIdFactory::generate();
    tracing::debug!("Upgrading connection for channel '{}'", channel_id);

    ws.on_upgrade(move |socket| Session::new(channel_id, state).run(socket))
}
