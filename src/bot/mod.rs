//! Conversational core: turns one incoming event into a callback
//! acknowledgement and a list of replies.
//!
//! Handlers never send anything themselves. The gateway acknowledges the
//! callback (when there is one) exactly once and then delivers the replies.

mod callbacks;
mod commands;
pub mod keyboards;
pub mod router;
pub mod session;
pub mod views;
mod wizard;


use crate::i18n::t;
use router::Route;
use session::SessionStore;
use std::sync::Arc;
use tracing::{error, warn};
use uniflow_core::{
    error::ServiceError,
    message::{IncomingMessage, Keyboard, OutgoingMessage},
    models::User,
    service::Service,
};

/// One outgoing message, before it is addressed.
#[derive(Debug, Clone, PartialEq)]
pub struct Reply {
    pub text: String,
    pub keyboard: Option<Keyboard>,
}

impl Reply {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            keyboard: None,
        }
    }

    pub fn with_keyboard(text: impl Into<String>, keyboard: Keyboard) -> Self {
        Self {
            text: text.into(),
            keyboard: Some(keyboard),
        }
    }

    /// Address the reply to the chat an event came from.
    pub fn into_outgoing(self, reply_target: Option<String>) -> OutgoingMessage {
        OutgoingMessage {
            text: self.text,
            keyboard: self.keyboard,
            reply_target,
        }
    }
}

/// Acknowledgement for a button tap. An empty notice acknowledges silently.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ack {
    pub callback_id: String,
    pub notice: String,
}

/// Everything the gateway must do for one event.
#[derive(Debug, Default)]
pub struct Outcome {
    pub ack: Option<Ack>,
    pub replies: Vec<Reply>,
}

/// The bot: routes events, drives wizards, and renders replies.
pub struct Bot {
    service: Service,
    sessions: Arc<dyn SessionStore>,
    lang: String,
    context_color: String,
}

/// Session key for a sender: `channel:sender_id`.
pub fn session_key(incoming: &IncomingMessage) -> String {
    format!("{}:{}", incoming.channel, incoming.sender_id)
}

impl Bot {
    pub fn new(
        service: Service,
        sessions: Arc<dyn SessionStore>,
        lang: &str,
        context_color: &str,
    ) -> Self {
        Self {
            service,
            sessions,
            lang: lang.to_string(),
            context_color: context_color.to_string(),
        }
    }

    /// Handle one event. Never fails: errors become user-facing replies.
    pub async fn handle(&self, incoming: &IncomingMessage) -> Outcome {
        let key = session_key(incoming);
        let sender = incoming.sender_id.as_str();

        match router::classify(incoming) {
            Route::Command(cmd) => {
                // Any command abandons the wizard in progress.
                let had_session = self.sessions.get(&key).is_some();
                self.sessions.end(&key);
                Outcome {
                    ack: None,
                    replies: self.run_command(&key, sender, cmd, had_session).await,
                }
            }
            Route::Callback {
                callback_id,
                callback,
            } => {
                let answered = match callback {
                    Some(cb) => self.run_callback(&key, sender, cb).await,
                    None => {
                        let payload = incoming
                            .callback
                            .as_ref()
                            .map(|c| c.payload.as_str())
                            .unwrap_or_default();
                        warn!("unrecognized callback payload from {key}: {payload:?}");
                        callbacks::Answered::notice(t("error_generic", &self.lang))
                    }
                };
                Outcome {
                    ack: Some(Ack {
                        callback_id,
                        notice: answered.notice,
                    }),
                    replies: answered.replies,
                }
            }
            Route::Text(text) => {
                let replies = match self.sessions.get(&key) {
                    Some(session) => {
                        self.continue_wizard(&key, sender, session.wizard, &text)
                            .await
                    }
                    None => vec![self.main_menu()],
                };
                Outcome {
                    ack: None,
                    replies,
                }
            }
        }
    }

    fn main_menu(&self) -> Reply {
        Reply::with_keyboard(
            t("main_menu", &self.lang),
            keyboards::main_menu(&self.lang),
        )
    }

    /// Resolve the acting user, creating it on first contact.
    async fn user(&self, external_id: &str) -> Result<User, Reply> {
        self.service
            .get_or_create_user(external_id)
            .await
            .map_err(|e| {
                self.log_failure(&e);
                Reply::text(t("error_user", &self.lang))
            })
    }

    fn log_failure(&self, e: &ServiceError) {
        error!(op = e.op, kind = %e.kind, "{e}");
    }
}
