//! Market-feed wire envelope.
//!
//! Every frame on the `/ws` endpoint is one [`WsMessage`]: subscription
//! commands from the client, command responses and broadcast market
//! events from the server. The `payload` stays schemaless JSON so the
//! envelope never has to change when an event variant grows a field.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One frame on the market feed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WsMessage {
    /// Correlation ID. Clients pick it for commands and the response
    /// echoes it back; server-initiated events carry a fresh UUID.
    pub id: String,
    /// Message type discriminator.
    #[serde(rename = "type")]
    pub msg_type: WsMessageType,
    /// ISO-8601 timestamp.
    pub timestamp: DateTime<Utc>,
    /// Variant-specific payload.
    pub payload: serde_json::Value,
}

impl WsMessage {
    /// Builds a response frame answering the command with id `id`.
    #[must_use]
    pub fn response(id: String, payload: serde_json::Value) -> Self {
        Self {
            id,
            msg_type: WsMessageType::Response,
            timestamp: Utc::now(),
            payload,
        }
    }

    /// Builds a server-initiated event frame with a fresh correlation ID.
    #[must_use]
    pub fn event(payload: serde_json::Value) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            msg_type: WsMessageType::Event,
            timestamp: Utc::now(),
            payload,
        }
    }

    /// Builds an error frame. `id` echoes the offending command's ID, or
    /// is empty when the frame could not be parsed at all.
    #[must_use]
    pub fn error(id: String, code: u16, message: &str) -> Self {
        Self {
            id,
            msg_type: WsMessageType::Error,
            timestamp: Utc::now(),
            payload: serde_json::json!({ "code": code, "message": message }),
        }
    }

    /// Serializes the frame for the socket. `None` only if the payload
    /// contains a non-serializable value, which the constructors never
    /// produce.
    #[must_use]
    pub fn to_json(&self) -> Option<String> {
        serde_json::to_string(self).ok()
    }
}

/// Discriminator for market-feed frames.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum WsMessageType {
    /// Client → Server command.
    Command,
    /// Server → Client response to a command.
    Response,
    /// Server → Client broadcast event.
    Event,
    /// Server → Client error.
    Error,
}
