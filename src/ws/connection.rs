//! WebSocket connection state machine.
//!
//! Handles the read/write loop for a single WebSocket connection,
//! dispatching subscription commands and forwarding filtered market
//! events.

use axum::extract::ws::{Message, WebSocket};
use futures_util::{SinkExt, StreamExt};
use tokio::sync::broadcast;

use super::messages::WsMessage;
use super::subscription::SubscriptionManager;
use crate::domain::{AccountAddress, MarketEvent};

/// Runs the read/write loop for a single WebSocket connection.
///
/// - Reads commands from the client and dispatches them.
/// - Forwards matching events from the [`broadcast::Receiver`] to the
///   client. Platform-wide events (no token address) reach every
///   connected client.
pub async fn run_connection(socket: WebSocket, mut event_rx: broadcast::Receiver<MarketEvent>) {
    let (mut ws_tx, mut ws_rx) = socket.split();
    let mut subs = SubscriptionManager::new();

    loop {
        tokio::select! {
            // Incoming message from client
            msg = ws_rx.next() => {
                match msg {
                    Some(Ok(Message::Text(text))) => {
                        let response = handle_text_message(&text, &mut subs);
                        if let Some(resp_json) = response
                            && ws_tx.send(Message::text(resp_json)).await.is_err() {
                                break;
                            }
                    }
                    Some(Ok(Message::Close(_))) | None => break,
                    _ => {}
                }
            }
            // Event from EventBus
            event = event_rx.recv() => {
                match event {
                    Ok(market_event) => {
                        let delivers = match market_event.token_address() {
                            Some(token) => subs.matches(token),
                            None => true,
                        };
                        if delivers {
                            let payload = serde_json::to_value(&market_event).unwrap_or_default();
                            let json = WsMessage::event(payload).to_json().unwrap_or_default();
                            if ws_tx.send(Message::text(json)).await.is_err() {
                                break;
                            }
                        }
                    }
                    Err(broadcast::error::RecvError::Lagged(n)) => {
                        tracing::warn!(lagged = n, "ws client lagged behind event bus");
                    }
                    Err(broadcast::error::RecvError::Closed) => break,
                }
            }
        }
    }

    tracing::debug!("ws connection closed");
}

/// Handles a text message from the client, returning an optional JSON response.
fn handle_text_message(text: &str, subs: &mut SubscriptionManager) -> Option<String> {
    let Ok(msg) = serde_json::from_str::<WsMessage>(text) else {
        return WsMessage::error(String::new(), 400, "malformed JSON").to_json();
    };

    // Parse as a command with token_addresses for subscribe/unsubscribe
    if let Some(addresses) = msg.payload.get("token_addresses").and_then(|v| v.as_array()) {
        let command = msg
            .payload
            .get("command")
            .and_then(|v| v.as_str())
            .unwrap_or("subscribe");

        match command {
            "subscribe" => {
                let mut tokens = Vec::new();
                let mut wildcard = false;
                for addr_val in addresses {
                    if let Some(s) = addr_val.as_str() {
                        if s == "*" {
                            wildcard = true;
                        } else if let Ok(token) = s.parse::<AccountAddress>() {
                            tokens.push(token);
                        }
                    }
                }
                subs.subscribe(&tokens, wildcard);
                let payload = serde_json::json!({
                    "subscribed": tokens.iter().map(ToString::to_string).collect::<Vec<_>>(),
                    "count": subs.count(),
                    "wildcard": subs.is_subscribed_all(),
                });
                return WsMessage::response(msg.id, payload).to_json();
            }
            "unsubscribe" => {
                let mut tokens = Vec::new();
                for addr_val in addresses {
                    if let Some(s) = addr_val.as_str()
                        && let Ok(token) = s.parse::<AccountAddress>()
                    {
                        tokens.push(token);
                    }
                }
                subs.unsubscribe(&tokens);
                let payload = serde_json::json!({
                    "unsubscribed": tokens.iter().map(ToString::to_string).collect::<Vec<_>>(),
                    "remaining_count": subs.count(),
                });
                return WsMessage::response(msg.id, payload).to_json();
            }
            _ => {}
        }
    }

    // Unknown command
    WsMessage::error(msg.id, 404, "unknown command").to_json()
}
