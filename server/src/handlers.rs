use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use futures_util::{SinkExt, StreamExt};
use tokio::sync::mpsc;
use uuid::Uuid;

use inkboard_shared::{decode_message, encode_message, WireMessage};

use crate::relay::Relay;

pub async fn ping_handler() -> impl IntoResponse {
    StatusCode::NO_CONTENT
}

pub async fn ws_handler(State(relay): State<Relay>, ws: WebSocketUpgrade) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_socket(socket, relay))
}

async fn handle_socket(socket: WebSocket, relay: Relay) {
    let (mut socket_sender, mut socket_receiver) = socket.split();
    let (tx, mut rx) = mpsc::unbounded_channel::<WireMessage>();
    let connection_id = Uuid::new_v4();

    let peers = relay.join(connection_id, tx).await;
    eprintln!("WS connected conn={connection_id} peers={peers}");

    let send_task = tokio::spawn(async move {
        while let Some(message) = rx.recv().await {
            if let Some(payload) = encode_message(&message) {
                if socket_sender.send(Message::Binary(payload)).await.is_err() {
                    break;
                }
            }
        }
    });

    while let Some(Ok(message)) = socket_receiver.next().await {
        let parsed = match message {
            Message::Text(text) => serde_json::from_str::<WireMessage>(&text).ok(),
            Message::Binary(data) => decode_message(&data),
            Message::Close(_) => break,
            _ => None,
        };
        match parsed {
            Some(wire_message) => {
                relay.broadcast_except(connection_id, wire_message).await;
            }
            None => {
                eprintln!("WS unparseable frame conn={connection_id}");
            }
        }
    }

    let peers = relay.leave(connection_id).await;
    eprintln!("WS disconnected conn={connection_id} peers={peers}");
    send_task.abort();
}
