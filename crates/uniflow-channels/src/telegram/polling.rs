//! Long-polling update loop and Channel trait implementation.

use super::send::post_answer_callback;
use super::types::{TgResponse, TgUpdate};
use super::TelegramChannel;
use async_trait::async_trait;
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};
use uniflow_core::{
    error::UniflowError,
    message::{CallbackQuery, IncomingMessage, OutgoingMessage},
    traits::Channel,
};
use uuid::Uuid;

#[async_trait]
impl Channel for TelegramChannel {
    fn name(&self) -> &str {
        "telegram"
    }

    async fn start(&self) -> Result<mpsc::Receiver<IncomingMessage>, UniflowError> {
        self.register_commands().await;

        let (tx, rx) = mpsc::channel(64);
        let client = self.client.clone();
        let base_url = self.base_url.clone();
        let allowed_users = self.config.allowed_users.clone();
        let last_update_id = self.last_update_id.clone();

        info!("Telegram channel starting long polling...");

        tokio::spawn(async move {
            let mut backoff_secs: u64 = 1;

            loop {
                let last = last_update_id.lock().await;
                let offset = last.map(|id| id + 1);
                drop(last);

                let mut url = format!(
                    "{base_url}/getUpdates?timeout=30&allowed_updates=[\"message\",\"callback_query\"]"
                );
                if let Some(off) = offset {
                    url.push_str(&format!("&offset={off}"));
                }

                let resp = match client
                    .get(&url)
                    .timeout(Duration::from_secs(35))
                    .send()
                    .await
                {
                    Ok(r) => r,
                    Err(e) => {
                        error!("telegram poll error (retry in {backoff_secs}s): {e}");
                        tokio::time::sleep(Duration::from_secs(backoff_secs)).await;
                        backoff_secs = (backoff_secs * 2).min(60);
                        continue;
                    }
                };

                let body: TgResponse<Vec<TgUpdate>> = match resp.json().await {
                    Ok(b) => b,
                    Err(e) => {
                        error!("telegram parse error (retry in {backoff_secs}s): {e}");
                        tokio::time::sleep(Duration::from_secs(backoff_secs)).await;
                        backoff_secs = (backoff_secs * 2).min(60);
                        continue;
                    }
                };

                if !body.ok {
                    error!(
                        "telegram API error (retry in {backoff_secs}s): {}",
                        body.description.unwrap_or_default()
                    );
                    tokio::time::sleep(Duration::from_secs(backoff_secs)).await;
                    backoff_secs = (backoff_secs * 2).min(60);
                    continue;
                }

                // Successful poll -- reset backoff.
                backoff_secs = 1;

                let updates = body.result.unwrap_or_default();

                if let Some(last_update) = updates.last() {
                    *last_update_id.lock().await = Some(last_update.update_id);
                }

                for update in updates {
                    match route_update(update, &allowed_users) {
                        Routed::Deliver(incoming) => {
                            if tx.send(incoming).await.is_err() {
                                info!("telegram channel receiver dropped, stopping poll");
                                return;
                            }
                        }
                        Routed::Dismiss(callback_id) => {
                            // Stop the client spinner on taps the bot will not handle.
                            if let Err(e) =
                                post_answer_callback(&client, &base_url, &callback_id, "").await
                            {
                                warn!("failed to dismiss callback {callback_id}: {e}");
                            }
                        }
                        Routed::Skip => {}
                    }
                }
            }
        });

        Ok(rx)
    }

    async fn send(&self, message: OutgoingMessage) -> Result<(), UniflowError> {
        let chat_id = parse_chat_id(message.reply_target.as_deref())?;
        self.send_text(chat_id, &message.text, message.keyboard.as_ref())
            .await
    }

    async fn answer_callback(&self, callback_id: &str, text: &str) -> Result<(), UniflowError> {
        self.answer_callback_query(callback_id, text).await
    }

    async fn stop(&self) -> Result<(), UniflowError> {
        info!("Telegram channel stopped");
        Ok(())
    }
}

fn parse_chat_id(target: Option<&str>) -> Result<i64, UniflowError> {
    let target =
        target.ok_or_else(|| UniflowError::Channel("no reply_target on outgoing message".into()))?;
    target
        .parse()
        .map_err(|e| UniflowError::Channel(format!("invalid telegram chat_id '{target}': {e}")))
}

/// What the polling loop does with one update.
#[derive(Debug)]
pub(crate) enum Routed {
    Deliver(IncomingMessage),
    /// A tap that is dropped but must still be acknowledged.
    Dismiss(String),
    Skip,
}

pub(crate) fn route_update(update: TgUpdate, allowed_users: &[i64]) -> Routed {
    let tap_id = update.callback_query.as_ref().map(|q| q.id.clone());
    match (to_incoming(update, allowed_users), tap_id) {
        (Some(incoming), _) => Routed::Deliver(incoming),
        (None, Some(callback_id)) => Routed::Dismiss(callback_id),
        (None, None) => Routed::Skip,
    }
}

/// Convert a raw update into an incoming event.
///
/// Returns `None` for updates the bot ignores: unsupported kinds, group
/// chats, and senders outside the allow-list.
pub(crate) fn to_incoming(update: TgUpdate, allowed_users: &[i64]) -> Option<IncomingMessage> {
    if let Some(query) = update.callback_query {
        if !allowed_users.is_empty() && !allowed_users.contains(&query.from.id) {
            warn!("ignoring button tap from unauthorized user {}", query.from.id);
            return None;
        }
        let Some(msg) = query.message else {
            debug!("telegram: callback {} has no message, dropping", query.id);
            return None;
        };
        if msg.chat.is_group() {
            debug!("telegram: ignoring group callback from chat {}", msg.chat.id);
            return None;
        }
        return Some(IncomingMessage {
            id: Uuid::new_v4(),
            channel: "telegram".to_string(),
            sender_id: query.from.id.to_string(),
            sender_name: Some(query.from.display_name()),
            text: String::new(),
            timestamp: chrono::Utc::now(),
            reply_target: Some(msg.chat.id.to_string()),
            callback: Some(CallbackQuery {
                id: query.id,
                payload: query.data.unwrap_or_default(),
            }),
        });
    }

    let msg = update.message?;
    let text = msg.text?;
    let user = msg.from?;

    // Auth check.
    if !allowed_users.is_empty() && !allowed_users.contains(&user.id) {
        warn!("ignoring message from unauthorized user {}", user.id);
        return None;
    }

    // Group chats share one keyboard between members; only private chats are served.
    if msg.chat.is_group() {
        debug!("telegram: ignoring group message from chat {}", msg.chat.id);
        return None;
    }

    Some(IncomingMessage {
        id: Uuid::new_v4(),
        channel: "telegram".to_string(),
        sender_id: user.id.to_string(),
        sender_name: Some(user.display_name()),
        text,
        timestamp: chrono::Utc::now(),
        reply_target: Some(msg.chat.id.to_string()),
        callback: None,
    })
}
