use super::*;
use crate::bot::session::{MemorySessionStore, TaskStep, Wizard};
use crate::i18n::t;
use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex as StdMutex;
use uniflow_core::config::StorageConfig;
use uniflow_core::error::UniflowError;
use uniflow_core::message::OutgoingMessage;
use uniflow_core::service::Service;
use uniflow_memory::Store;

#[derive(Debug, Clone, PartialEq)]
enum Sent {
    Ack { callback_id: String, notice: String },
    Message { text: String, target: Option<String> },
}

/// Channel that records what the gateway sends through it.
#[derive(Default)]
struct RecordingChannel {
    sent: StdMutex<Vec<Sent>>,
    /// Number of upcoming `send` calls that panic instead of recording.
    panics_left: AtomicUsize,
}

impl RecordingChannel {
    fn sent(&self) -> Vec<Sent> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl Channel for RecordingChannel {
    fn name(&self) -> &str {
        "telegram"
    }

    async fn start(&self) -> Result<mpsc::Receiver<IncomingMessage>, UniflowError> {
        let (_tx, rx) = mpsc::channel(1);
        Ok(rx)
    }

    async fn send(&self, message: OutgoingMessage) -> Result<(), UniflowError> {
        if self
            .panics_left
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok()
        {
            panic!("send blew up");
        }
        self.sent.lock().unwrap().push(Sent::Message {
            text: message.text,
            target: message.reply_target,
        });
        Ok(())
    }

    async fn answer_callback(&self, callback_id: &str, text: &str) -> Result<(), UniflowError> {
        self.sent.lock().unwrap().push(Sent::Ack {
            callback_id: callback_id.to_string(),
            notice: text.to_string(),
        });
        Ok(())
    }

    async fn stop(&self) -> Result<(), UniflowError> {
        Ok(())
    }
}

struct Fixture {
    gateway: Arc<Gateway>,
    channel: Arc<RecordingChannel>,
    sessions: Arc<MemorySessionStore>,
    _dir: tempfile::TempDir,
}

async fn fixture() -> Fixture {
    fixture_with(RecordingChannel::default()).await
}

async fn fixture_with(channel: RecordingChannel) -> Fixture {
    let dir = tempfile::tempdir().unwrap();
    let store = Store::new(&StorageConfig {
        db_path: dir.path().join("gw.db").to_string_lossy().into_owned(),
    })
    .await
    .unwrap();
    let sessions = Arc::new(MemorySessionStore::new());
    let bot = Bot::new(
        Service::new(Arc::new(store)),
        sessions.clone(),
        "English",
        "#3B82F6",
    );
    let channel = Arc::new(channel);
    let mut channels: HashMap<String, Arc<dyn Channel>> = HashMap::new();
    channels.insert("telegram".to_string(), channel.clone());
    let gateway = Arc::new(Gateway::new(
        bot,
        channels,
        sessions.clone(),
        SessionConfig::default(),
    ));
    Fixture {
        gateway,
        channel,
        sessions,
        _dir: dir,
    }
}

#[tokio::test]
async fn test_callback_acked_once_before_replies() {
    let f = fixture().await;
    let tap = IncomingMessage::callback("telegram", "7", "chat-7", "cb-9", "menu_main");
    f.gateway.clone().dispatch_message(tap).await;

    let sent = f.channel.sent();
    assert_eq!(
        sent[0],
        Sent::Ack {
            callback_id: "cb-9".to_string(),
            notice: String::new(),
        }
    );
    let acks = sent
        .iter()
        .filter(|s| matches!(s, Sent::Ack { .. }))
        .count();
    assert_eq!(acks, 1);
    assert!(matches!(
        &sent[1],
        Sent::Message { target: Some(t), .. } if t == "chat-7"
    ));
}

#[tokio::test]
async fn test_unparsed_callback_still_acked() {
    let f = fixture().await;
    let tap = IncomingMessage::callback("telegram", "7", "chat-7", "cb-1", "nonsense");
    f.gateway.clone().dispatch_message(tap).await;

    let sent = f.channel.sent();
    assert_eq!(sent.len(), 1);
    assert!(matches!(&sent[0], Sent::Ack { callback_id, .. } if callback_id == "cb-1"));
}

#[tokio::test]
async fn test_text_is_never_acked() {
    let f = fixture().await;
    let msg = IncomingMessage::text("telegram", "7", "chat-7", "/start");
    f.gateway.clone().dispatch_message(msg).await;

    let sent = f.channel.sent();
    assert_eq!(sent.len(), 1);
    assert!(matches!(&sent[0], Sent::Message { .. }));
}

#[tokio::test]
async fn test_busy_sender_is_buffered() {
    let f = fixture().await;
    f.gateway
        .active_senders
        .lock()
        .await
        .insert("telegram:7".to_string(), Vec::new());

    let msg = IncomingMessage::text("telegram", "7", "chat-7", "/start");
    f.gateway.clone().dispatch_message(msg).await;

    assert!(f.channel.sent().is_empty());
    let active = f.gateway.active_senders.lock().await;
    assert_eq!(active.get("telegram:7").map(Vec::len), Some(1));
}

#[tokio::test]
async fn test_same_sender_events_apply_in_order() {
    let f = fixture().await;
    let first = IncomingMessage::text("telegram", "7", "chat-7", "/newtask");
    let second = IncomingMessage::text("telegram", "7", "chat-7", "Essay");

    tokio::join!(
        f.gateway.clone().dispatch_message(first),
        f.gateway.clone().dispatch_message(second),
    );

    assert!(matches!(
        f.sessions.get("telegram:7").map(|s| s.wizard),
        Some(Wizard::CreateTask {
            step: TaskStep::Description,
            ..
        })
    ));
    assert!(f.gateway.active_senders.lock().await.is_empty());
    assert_eq!(f.channel.sent().len(), 2);
}

#[tokio::test]
async fn test_unknown_channel_is_dropped() {
    let f = fixture().await;
    let msg = IncomingMessage::text("whatsapp", "7", "chat-7", "/start");
    f.gateway.clone().dispatch_message(msg).await;
    assert!(f.channel.sent().is_empty());
    assert!(f.gateway.active_senders.lock().await.is_empty());
}

#[tokio::test]
async fn test_out_of_range_schedule_tap_does_not_jam_sender() {
    let f = fixture().await;
    let tap = IncomingMessage::callback(
        "telegram",
        "7",
        "chat-7",
        "cb-2",
        "menu_schedule_9223372036854775807",
    );
    f.gateway.clone().dispatch_message(tap).await;

    assert_eq!(
        f.channel.sent(),
        vec![Sent::Ack {
            callback_id: "cb-2".to_string(),
            notice: t("error_generic", "English").to_string(),
        }]
    );
    assert!(f.gateway.active_senders.lock().await.is_empty());

    let msg = IncomingMessage::text("telegram", "7", "chat-7", "/start");
    f.gateway.clone().dispatch_message(msg).await;
    assert!(matches!(f.channel.sent().last(), Some(Sent::Message { .. })));
}

#[tokio::test]
async fn test_panicking_handler_releases_sender() {
    let f = fixture_with(RecordingChannel {
        panics_left: AtomicUsize::new(1),
        ..Default::default()
    })
    .await;

    let tap = IncomingMessage::callback("telegram", "7", "chat-7", "cb-3", "menu_main");
    f.gateway.clone().dispatch_message(tap).await;
    assert!(f.gateway.active_senders.lock().await.is_empty());
    // Acknowledged by the handler before the send panicked.
    assert_eq!(
        f.channel.sent(),
        vec![Sent::Ack {
            callback_id: "cb-3".to_string(),
            notice: String::new(),
        }]
    );

    let msg = IncomingMessage::text("telegram", "7", "chat-7", "/start");
    f.gateway.clone().dispatch_message(msg).await;
    assert_eq!(f.channel.sent().len(), 2);
    assert!(matches!(&f.channel.sent()[1], Sent::Message { .. }));
}
