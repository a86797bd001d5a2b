//! Gateway: the event loop connecting channels to the bot.
//!
//! Events from every channel are fanned into one queue. Each event runs on
//! its own task, but events from the same sender are serialised: while one
//! is in flight, later ones are buffered and drained in arrival order.

mod sweeper;

#[cfg(test)]
mod tests;

use crate::bot::{session::SessionStore, Bot, Outcome};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{mpsc, Mutex};
use tracing::{error, info, warn};
use uniflow_core::{config::SessionConfig, message::IncomingMessage, traits::Channel};

/// Longest honoured session lifetime (one year).
const MAX_TTL_MINUTES: i64 = 60 * 24 * 365;

/// Routes events between channels and the bot.
pub struct Gateway {
    bot: Bot,
    channels: HashMap<String, Arc<dyn Channel>>,
    sessions: Arc<dyn SessionStore>,
    session_config: SessionConfig,
    /// Senders with an event in flight. Later events are buffered here.
    active_senders: Mutex<HashMap<String, Vec<IncomingMessage>>>,
}

impl Gateway {
    pub fn new(
        bot: Bot,
        channels: HashMap<String, Arc<dyn Channel>>,
        sessions: Arc<dyn SessionStore>,
        session_config: SessionConfig,
    ) -> Self {
        Self {
            bot,
            channels,
            sessions,
            session_config,
            active_senders: Mutex::new(HashMap::new()),
        }
    }

    /// Run the main event loop until Ctrl-C.
    pub async fn run(self: Arc<Self>) -> anyhow::Result<()> {
        info!(
            "UniFlow gateway running | channels: {} | session ttl: {}m",
            self.channels.keys().cloned().collect::<Vec<_>>().join(", "),
            self.session_config.ttl_minutes,
        );

        let (tx, mut rx) = mpsc::channel::<IncomingMessage>(256);

        for (name, channel) in &self.channels {
            let mut channel_rx = channel
                .start()
                .await
                .map_err(|e| anyhow::anyhow!("failed to start channel {name}: {e}"))?;
            let tx = tx.clone();
            let channel_name = name.clone();

            tokio::spawn(async move {
                while let Some(msg) = channel_rx.recv().await {
                    if tx.send(msg).await.is_err() {
                        info!("gateway receiver dropped, stopping {channel_name} forwarder");
                        break;
                    }
                }
            });

            info!("Channel started: {name}");
        }

        drop(tx);

        let sweep_handle = {
            let sessions = self.sessions.clone();
            let minutes = i64::try_from(self.session_config.ttl_minutes)
                .unwrap_or(MAX_TTL_MINUTES)
                .min(MAX_TTL_MINUTES);
            let ttl = chrono::Duration::minutes(minutes);
            let every = Duration::from_secs(self.session_config.sweep_interval_secs.max(1));
            tokio::spawn(async move {
                sweeper::session_sweeper(sessions, ttl, every).await;
            })
        };

        loop {
            tokio::select! {
                incoming = rx.recv() => {
                    let Some(incoming) = incoming else {
                        warn!("all channels closed");
                        break;
                    };
                    let gw = self.clone();
                    tokio::spawn(async move {
                        gw.dispatch_message(incoming).await;
                    });
                }
                _ = tokio::signal::ctrl_c() => {
                    info!("Received shutdown signal");
                    break;
                }
            }
        }

        self.shutdown(&sweep_handle).await;
        Ok(())
    }

    /// Handle an event now, or buffer it if its sender is busy.
    pub(crate) async fn dispatch_message(self: Arc<Self>, incoming: IncomingMessage) {
        let sender_key = format!("{}:{}", incoming.channel, incoming.sender_id);

        {
            let mut active = self.active_senders.lock().await;
            if let Some(buffer) = active.get_mut(&sender_key) {
                buffer.push(incoming);
                info!("buffered event from {sender_key} (one in flight)");
                return;
            }
            active.insert(sender_key.clone(), Vec::new());
        }

        Self::handle_isolated(&self, incoming).await;

        loop {
            let next = {
                let mut active = self.active_senders.lock().await;
                match active.get_mut(&sender_key) {
                    Some(buf) if !buf.is_empty() => Some(buf.remove(0)),
                    _ => {
                        active.remove(&sender_key);
                        None
                    }
                }
            };

            match next {
                Some(buffered) => {
                    info!("processing buffered event from {sender_key}");
                    Self::handle_isolated(&self, buffered).await;
                }
                None => break,
            }
        }
    }

    /// Handle one event on its own task so a panic cannot strand the
    /// sender's buffer entry.
    async fn handle_isolated(this: &Arc<Self>, incoming: IncomingMessage) {
        let gw = Arc::clone(this);
        let channel = incoming.channel.clone();
        if let Err(e) = tokio::spawn(async move { gw.handle_message(&incoming).await }).await {
            error!("event handler for {channel} failed: {e}");
        }
    }

    /// Run the bot and deliver its outcome: acknowledge first, then reply.
    async fn handle_message(&self, incoming: &IncomingMessage) {
        let Some(channel) = self.channels.get(&incoming.channel) else {
            error!("event from unknown channel {}", incoming.channel);
            return;
        };

        let Outcome { ack, replies } = self.bot.handle(incoming).await;

        if let Some(ack) = ack {
            if let Err(e) = channel.answer_callback(&ack.callback_id, &ack.notice).await {
                warn!("failed to acknowledge callback {}: {e}", ack.callback_id);
            }
        }

        for reply in replies {
            let msg = reply.into_outgoing(incoming.reply_target.clone());
            if let Err(e) = channel.send(msg).await {
                error!("failed to send message: {e}");
            }
        }
    }

    async fn shutdown(&self, sweep_handle: &tokio::task::JoinHandle<()>) {
        info!("Shutting down...");

        sweep_handle.abort();

        for (name, channel) in &self.channels {
            if let Err(e) = channel.stop().await {
                warn!("failed to stop channel {name}: {e}");
            }
        }

        info!("Shutdown complete.");
    }
}
