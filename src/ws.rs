//! WebSocket endpoint: one task per connection, payloads relayed verbatim.

use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        State,
    },
    response::IntoResponse,
};
use futures::{sink::SinkExt, stream::StreamExt};
use tokio::sync::mpsc;

use crate::hub::Hub;
use crate::registry::ClientHandle;

/// WebSocket upgrade handler
pub async fn ws_handler(ws: WebSocketUpgrade, State(hub): State<Hub>) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_socket(socket, hub))
}

/// Handle one client connection until it closes or errors.
async fn handle_socket(socket: WebSocket, hub: Hub) {
    let (mut sender, mut receiver) = socket.split();

    let (tx, mut rx) = mpsc::unbounded_channel();
    let handle = ClientHandle::new(tx);
    let client_id = handle.id.clone();

    hub.on_connect(handle).await;

    loop {
        tokio::select! {
            // Outbound: messages fanned out to this client by the hub.
            outbound = rx.recv() => {
                match outbound {
                    Some(text) => {
                        if sender.send(Message::Text(text.into())).await.is_err() {
                            tracing::warn!(client = %client_id, "outbound send failed");
                            break;
                        }
                    }
                    // Hub pruned this client; its channel is gone.
                    None => break,
                }
            }

            // Inbound: frames from this client.
            ws_msg = receiver.next() => {
                match ws_msg {
                    Some(Ok(Message::Text(text))) => {
                        hub.on_message(&client_id, text.as_str()).await;
                    }
                    Some(Ok(Message::Close(_))) => {
                        tracing::debug!(client = %client_id, "close frame received");
                        break;
                    }
                    Some(Ok(Message::Ping(data))) => {
                        if sender.send(Message::Pong(data)).await.is_err() {
                            break;
                        }
                    }
                    Some(Ok(_)) => {}
                    Some(Err(e)) => {
                        tracing::warn!(client = %client_id, "websocket error: {}", e);
                        break;
                    }
                    None => break,
                }
            }
        }
    }

    // Every exit path lands here, clean close and error alike.
    hub.on_disconnect(&client_id).await;
}
