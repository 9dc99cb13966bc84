use super::polling::convert_update;
use super::send::split_message;
use super::types::TgUpdate;
use notshop_core::message::IncomingEvent;

fn update(json: serde_json::Value) -> TgUpdate {
    serde_json::from_value(json).unwrap()
}

fn text_update(user_id: i64) -> TgUpdate {
    update(serde_json::json!({
        "update_id": 10,
        "message": {
            "message_id": 5,
            "from": { "id": user_id, "first_name": "Ann", "username": "ann", "language_code": "en" },
            "chat": { "id": 777, "type": "private" },
            "text": "/start"
        }
    }))
}

fn press_update(data: Option<&str>) -> TgUpdate {
    update(serde_json::json!({
        "update_id": 11,
        "callback_query": {
            "id": "cb-1",
            "from": { "id": 42, "first_name": "Ann", "last_name": "Lee" },
            "message": {
                "message_id": 99,
                "chat": { "id": 777, "type": "private" },
                "text": "Menu"
            },
            "data": data
        }
    }))
}

#[test]
fn test_text_message_becomes_message_event() {
    let Some(IncomingEvent::Message(msg)) = convert_update(text_update(42), &[]) else {
        panic!("expected a message event");
    };
    assert_eq!(msg.channel, "telegram");
    assert_eq!(msg.sender_id, "42");
    assert_eq!(msg.sender_name.as_deref(), Some("@ann"));
    assert_eq!(msg.language_code.as_deref(), Some("en"));
    assert_eq!(msg.text, "/start");
    assert_eq!(msg.reply_target.as_deref(), Some("777"));
}

#[test]
fn test_callback_query_becomes_action_event() {
    let Some(IncomingEvent::Action(press)) = convert_update(press_update(Some("pg:menu:2")), &[])
    else {
        panic!("expected an action event");
    };
    assert_eq!(press.callback_id, "cb-1");
    assert_eq!(press.data, "pg:menu:2");
    assert_eq!(press.sender_name.as_deref(), Some("Ann Lee"));
    assert_eq!(press.reply_target.as_deref(), Some("777"));
    assert_eq!(press.message_id, Some(99));
    assert!(press.language_code.is_none());
}

#[test]
fn test_callback_without_data_ignored() {
    assert!(convert_update(press_update(None), &[]).is_none());
}

#[test]
fn test_unauthorized_users_dropped() {
    assert!(convert_update(text_update(13), &[42]).is_none());
    assert!(convert_update(text_update(42), &[42]).is_some());
    assert!(convert_update(press_update(Some("x")), &[7]).is_none());
}

#[test]
fn test_non_text_message_ignored() {
    let upd = update(serde_json::json!({
        "update_id": 12,
        "message": {
            "message_id": 6,
            "from": { "id": 1, "first_name": "Bo" },
            "chat": { "id": 1, "type": "private" }
        }
    }));
    assert!(convert_update(upd, &[]).is_none());
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
    let text = "\u{0436}".repeat(3000);
    let chunks = split_message(&text, 4095);
    assert_eq!(chunks.concat(), text);
    assert!(chunks.iter().all(|c| c.len() <= 4095));
}
