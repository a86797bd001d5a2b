//! Message sending: text with inline keyboards, callback acknowledgements,
//! and command registration.

use super::{TelegramChannel, MAX_MESSAGE_LEN};
use crate::utils::split_message;
use tracing::{info, warn};
use uniflow_core::{error::UniflowError, message::Keyboard};

/// Render a keyboard as a Bot API `reply_markup` object.
pub(crate) fn inline_keyboard(keyboard: &Keyboard) -> serde_json::Value {
    let rows: Vec<Vec<serde_json::Value>> = keyboard
        .rows
        .iter()
        .map(|row| {
            row.iter()
                .map(|b| serde_json::json!({ "text": b.label, "callback_data": b.payload }))
                .collect()
        })
        .collect();
    serde_json::json!({ "inline_keyboard": rows })
}

impl TelegramChannel {
    /// Send a text message to a specific chat. The keyboard, if any, is
    /// attached to the last chunk.
    pub(crate) async fn send_text(
        &self,
        chat_id: i64,
        text: &str,
        keyboard: Option<&Keyboard>,
    ) -> Result<(), UniflowError> {
        let chunks = split_message(text, MAX_MESSAGE_LEN);
        let last = chunks.len().saturating_sub(1);
        let markup = keyboard.map(inline_keyboard);

        for (i, chunk) in chunks.into_iter().enumerate() {
            let mut body = serde_json::json!({
                "chat_id": chat_id,
                "text": chunk,
                "parse_mode": "Markdown",
            });
            if let (true, Some(markup)) = (i == last, markup.as_ref()) {
                body["reply_markup"] = markup.clone();
            }

            let url = format!("{}/sendMessage", self.base_url);
            let resp = self
                .client
                .post(&url)
                .json(&body)
                .send()
                .await
                .map_err(|e| UniflowError::Channel(format!("telegram send failed: {e}")))?;

            let status = resp.status();
            if !status.is_success() {
                let error_text = resp.text().await.unwrap_or_default();
                if error_text.contains("can't parse entities") {
                    warn!("Markdown parse failed, retrying as plain text: {error_text}");
                    if let Some(obj) = body.as_object_mut() {
                        obj.remove("parse_mode");
                    }
                    let plain_resp = self
                        .client
                        .post(&url)
                        .json(&body)
                        .send()
                        .await
                        .map_err(|e| {
                            UniflowError::Channel(format!("telegram send (plain) failed: {e}"))
                        })?;
                    if !plain_resp.status().is_success() {
                        let plain_err = plain_resp.text().await.unwrap_or_default();
                        return Err(UniflowError::Channel(format!(
                            "telegram send (plain fallback) failed: {plain_err}"
                        )));
                    }
                } else {
                    return Err(UniflowError::Channel(format!(
                        "telegram send failed ({status}): {error_text}"
                    )));
                }
            }
        }

        Ok(())
    }

    /// Acknowledge a button tap. An empty `text` acknowledges silently.
    pub(crate) async fn answer_callback_query(
        &self,
        callback_id: &str,
        text: &str,
    ) -> Result<(), UniflowError> {
        post_answer_callback(&self.client, &self.base_url, callback_id, text).await
    }

    /// Register bot commands with Telegram so users see an autocomplete menu.
    /// Best-effort: logs failures but does not propagate errors.
    pub(crate) async fn register_commands(&self) {
        let commands = serde_json::json!({
            "commands": [
                { "command": "start", "description": "Welcome and main menu" },
                { "command": "menu", "description": "Show the main menu" },
                { "command": "today", "description": "Tasks due today" },
                { "command": "tasks", "description": "Your active tasks" },
                { "command": "inbox", "description": "Tasks without a context" },
                { "command": "newtask", "description": "Create a task" },
                { "command": "contexts", "description": "Your contexts" },
                { "command": "newcontext", "description": "Create a context" },
                { "command": "search", "description": "Search tasks and contexts" },
                { "command": "cancel", "description": "Cancel the current dialog" },
                { "command": "help", "description": "Show available commands" },
            ]
        });

        let url = format!("{}/setMyCommands", self.base_url);
        match self.client.post(&url).json(&commands).send().await {
            Ok(resp) if resp.status().is_success() => {
                info!("registered Telegram bot commands");
            }
            Ok(resp) => {
                let body = resp.text().await.unwrap_or_default();
                warn!("failed to register Telegram bot commands: {body}");
            }
            Err(e) => {
                warn!("failed to register Telegram bot commands: {e}");
            }
        }
    }
}

/// `answerCallbackQuery` without a channel handle, for the polling task.
pub(crate) async fn post_answer_callback(
    client: &reqwest::Client,
    base_url: &str,
    callback_id: &str,
    text: &str,
) -> Result<(), UniflowError> {
    let url = format!("{base_url}/answerCallbackQuery");
    let mut body = serde_json::json!({ "callback_query_id": callback_id });
    if !text.is_empty() {
        body["text"] = serde_json::Value::String(text.to_string());
    }

    let resp = client
        .post(&url)
        .json(&body)
        .send()
        .await
        .map_err(|e| UniflowError::Channel(format!("telegram answerCallbackQuery failed: {e}")))?;

    if !resp.status().is_success() {
        let status = resp.status();
        let error_text = resp.text().await.unwrap_or_default();
        return Err(UniflowError::Channel(format!(
            "telegram answerCallbackQuery failed ({status}): {error_text}"
        )));
    }

    Ok(())
}
