//! Tests for the Telegram channel module.

use super::polling::{route_update, to_incoming, Routed};
use super::send::inline_keyboard;
use super::types::*;
use crate::utils::split_message;
use uniflow_core::message::{Button, Keyboard};

fn update(json: &str) -> TgUpdate {
    serde_json::from_str(json).unwrap()
}

#[test]
fn test_split_short_message() {
    let chunks = split_message("hello", 4096);
    assert_eq!(chunks, vec!["hello"]);
}

#[test]
fn test_split_long_message() {
    let text = "a\n".repeat(3000);
    let chunks = split_message(&text, 4096);
    assert!(chunks.len() >= 2);
    for chunk in &chunks {
        assert!(chunk.len() <= 4096);
    }
    assert_eq!(chunks.concat(), text);
}

#[test]
fn test_split_respects_char_boundaries() {
    let text = "я".repeat(3000);
    let chunks = split_message(&text, 4095);
    assert!(chunks.len() >= 2);
    assert_eq!(chunks.concat(), text);
}

#[test]
fn test_text_update_becomes_message() {
    let u = update(
        r#"{"update_id": 1, "message": {
            "message_id": 5,
            "from": {"id": 42, "first_name": "Ann", "username": "ann"},
            "chat": {"id": 42, "type": "private"},
            "text": "/today"}}"#,
    );
    let msg = to_incoming(u, &[]).unwrap();
    assert_eq!(msg.sender_id, "42");
    assert_eq!(msg.sender_name.as_deref(), Some("@ann"));
    assert_eq!(msg.text, "/today");
    assert_eq!(msg.reply_target.as_deref(), Some("42"));
    assert!(msg.callback.is_none());
}

#[test]
fn test_callback_update_becomes_callback() {
    let u = update(
        r#"{"update_id": 2, "callback_query": {
            "id": "cb-1",
            "from": {"id": 42, "first_name": "Ann"},
            "message": {"message_id": 9, "chat": {"id": 42, "type": "private"}},
            "data": "menu_today"}}"#,
    );
    let msg = to_incoming(u, &[]).unwrap();
    let cb = msg.callback.unwrap();
    assert_eq!(cb.id, "cb-1");
    assert_eq!(cb.payload, "menu_today");
    assert_eq!(msg.reply_target.as_deref(), Some("42"));
    assert!(msg.text.is_empty());
}

#[test]
fn test_unauthorized_and_group_updates_dropped() {
    let text = r#"{"update_id": 3, "message": {
        "from": {"id": 7, "first_name": "Eve"},
        "chat": {"id": 7, "type": "private"},
        "text": "hi"}}"#;
    assert!(to_incoming(update(text), &[42]).is_none());
    assert!(to_incoming(update(text), &[7]).is_some());

    let group = r#"{"update_id": 4, "message": {
        "from": {"id": 7, "first_name": "Eve"},
        "chat": {"id": -100, "type": "supergroup"},
        "text": "hi"}}"#;
    assert!(to_incoming(update(group), &[]).is_none());
}

#[test]
fn test_dropped_taps_are_dismissed() {
    let outsider = r#"{"update_id": 6, "callback_query": {
        "id": "cb-out",
        "from": {"id": 7, "first_name": "Eve"},
        "message": {"message_id": 1, "chat": {"id": 7, "type": "private"}},
        "data": "menu_main"}}"#;
    assert!(matches!(
        route_update(update(outsider), &[42]),
        Routed::Dismiss(id) if id == "cb-out"
    ));
    assert!(matches!(route_update(update(outsider), &[7]), Routed::Deliver(_)));

    let group = r#"{"update_id": 7, "callback_query": {
        "id": "cb-group",
        "from": {"id": 7, "first_name": "Eve"},
        "message": {"message_id": 1, "chat": {"id": -100, "type": "group"}},
        "data": "menu_main"}}"#;
    assert!(matches!(
        route_update(update(group), &[]),
        Routed::Dismiss(id) if id == "cb-group"
    ));

    let detached = r#"{"update_id": 8, "callback_query": {
        "id": "cb-inline",
        "from": {"id": 7, "first_name": "Eve"},
        "data": "menu_main"}}"#;
    assert!(matches!(
        route_update(update(detached), &[]),
        Routed::Dismiss(id) if id == "cb-inline"
    ));
}

#[test]
fn test_dropped_text_is_skipped() {
    let text = r#"{"update_id": 9, "message": {
        "from": {"id": 7, "first_name": "Eve"},
        "chat": {"id": 7, "type": "private"},
        "text": "hi"}}"#;
    assert!(matches!(route_update(update(text), &[42]), Routed::Skip));
}

#[test]
fn test_non_text_message_dropped() {
    let u = update(
        r#"{"update_id": 5, "message": {
            "from": {"id": 7, "first_name": "Eve"},
            "chat": {"id": 7, "type": "private"}}}"#,
    );
    assert!(to_incoming(u, &[]).is_none());
}

#[test]
fn test_tg_chat_type_defaults_when_missing() {
    let chat: TgChat = serde_json::from_str(r#"{"id": 123}"#).unwrap();
    assert_eq!(chat.chat_type, "");
    assert!(!chat.is_group());
}

#[test]
fn test_inline_keyboard_shape() {
    let kb = Keyboard::new()
        .row(vec![Button::new("Today", "menu_today"), Button::new("Inbox", "menu_inbox")])
        .row(vec![Button::new("Back", "menu_main")]);
    let markup = inline_keyboard(&kb);
    let rows = markup["inline_keyboard"].as_array().unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0][1]["text"], "Inbox");
    assert_eq!(rows[0][1]["callback_data"], "menu_inbox");
    assert_eq!(rows[1][0]["callback_data"], "menu_main");
}
