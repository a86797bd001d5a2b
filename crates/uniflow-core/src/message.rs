use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// An incoming event from a channel: a text message or a button tap.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IncomingMessage {
    pub id: Uuid,
    /// Channel name (e.g. "telegram").
    pub channel: String,
    /// Platform-specific user ID.
    pub sender_id: String,
    /// Human-readable sender name.
    pub sender_name: Option<String>,
    /// Message text content. Empty for button taps.
    pub text: String,
    pub timestamp: DateTime<Utc>,
    /// Platform-specific target for routing the response (e.g. Telegram chat_id).
    #[serde(default)]
    pub reply_target: Option<String>,
    /// Present when the event is an inline-button tap rather than a message.
    #[serde(default)]
    pub callback: Option<CallbackQuery>,
}

impl IncomingMessage {
    /// Build a plain text event.
    pub fn text(channel: &str, sender_id: &str, reply_target: &str, text: &str) -> Self {
        Self {
            id: Uuid::new_v4(),
            channel: channel.to_string(),
            sender_id: sender_id.to_string(),
            sender_name: None,
            text: text.to_string(),
            timestamp: Utc::now(),
            reply_target: Some(reply_target.to_string()),
            callback: None,
        }
    }

    /// Build a button-tap event.
    pub fn callback(
        channel: &str,
        sender_id: &str,
        reply_target: &str,
        callback_id: &str,
        payload: &str,
    ) -> Self {
        Self {
            callback: Some(CallbackQuery {
                id: callback_id.to_string(),
                payload: payload.to_string(),
            }),
            ..Self::text(channel, sender_id, reply_target, "")
        }
    }
}

/// A structured button tap: the opaque payload attached to the button and
/// the id the platform needs to acknowledge it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallbackQuery {
    pub id: String,
    pub payload: String,
}

/// An outgoing message to send back through a channel.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OutgoingMessage {
    pub text: String,
    /// Inline keyboard attached under the message.
    #[serde(default)]
    pub keyboard: Option<Keyboard>,
    /// Platform-specific target for routing (e.g. Telegram chat_id).
    #[serde(default)]
    pub reply_target: Option<String>,
}

/// Rows of labeled buttons, each carrying a callback payload.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Keyboard {
    pub rows: Vec<Vec<Button>>,
}

impl Keyboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a row of buttons.
    pub fn row(mut self, buttons: Vec<Button>) -> Self {
        self.rows.push(buttons);
        self
    }

    /// Every payload on the keyboard, row-major.
    pub fn payloads(&self) -> impl Iterator<Item = &str> {
        self.rows.iter().flatten().map(|b| b.payload.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Button {
    pub label: String,
    pub payload: String,
}

impl Button {
    pub fn new(label: impl Into<String>, payload: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            payload: payload.into(),
        }
    }
}
