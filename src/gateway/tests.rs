use super::*;
use async_trait::async_trait;
use chrono::Utc;
use notshop_core::{error::NotshopError, message::InlineKeyboard};
use notshop_keyboard::{encode, INERT_KIND, INERT_PLACEHOLDER};
use serde_json::json;
use std::sync::Mutex;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq)]
enum Call {
    Send(OutgoingMessage),
    Edit {
        target: String,
        message_id: i64,
        text: String,
        keyboard: InlineKeyboard,
    },
    Answer {
        callback_id: String,
        text: Option<String>,
    },
}

#[derive(Default)]
struct RecordingChannel {
    calls: Mutex<Vec<Call>>,
    fail_edits: bool,
}

impl RecordingChannel {
    fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl Channel for RecordingChannel {
    fn name(&self) -> &str {
        "test"
    }

    async fn start(&self) -> Result<mpsc::Receiver<IncomingEvent>, NotshopError> {
        let (_tx, rx) = mpsc::channel(1);
        Ok(rx)
    }

    async fn send(&self, message: OutgoingMessage) -> Result<(), NotshopError> {
        self.calls.lock().unwrap().push(Call::Send(message));
        Ok(())
    }

    async fn edit_keyboard(
        &self,
        target: &str,
        message_id: i64,
        text: &str,
        keyboard: &InlineKeyboard,
    ) -> Result<(), NotshopError> {
        if self.fail_edits {
            return Err(NotshopError::Channel("edit refused".into()));
        }
        self.calls.lock().unwrap().push(Call::Edit {
            target: target.to_string(),
            message_id,
            text: text.to_string(),
            keyboard: keyboard.clone(),
        });
        Ok(())
    }

    async fn answer_action(
        &self,
        callback_id: &str,
        text: Option<&str>,
    ) -> Result<(), NotshopError> {
        self.calls.lock().unwrap().push(Call::Answer {
            callback_id: callback_id.to_string(),
            text: text.map(str::to_string),
        });
        Ok(())
    }

    async fn stop(&self) -> Result<(), NotshopError> {
        Ok(())
    }
}

fn translations() -> Translations {
    let mut tr = Translations::new("ru");
    tr.insert(
        "ru",
        json!({
            "help": "Справка",
            "menu": { "title": "Каталог", "item_selected": "Выбрано: {item}" },
            "buttons": {
                "pagination": {
                    "prev": "Назад",
                    "next": "Далее",
                    "current_page": "{current_page} из {total_pages}"
                }
            }
        }),
    );
    tr.insert(
        "en",
        json!({
            "help": "Help",
            "menu": {
                "title": "Catalogue",
                "item_selected": "Selected: {item}",
                "unavailable": "Menu unavailable"
            }
        }),
    );
    tr
}

fn menu() -> MenuConfig {
    MenuConfig {
        items: (1..=5)
            .map(|i| json!({ "text": format!("Tea #{i}"), "action": format!("item:tea{i}") }))
            .collect(),
        items_per_page: 2,
        row_width: 2,
        shape: None,
    }
}

fn gateway(channel: Arc<RecordingChannel>) -> Gateway {
    let mut channels: HashMap<String, Arc<dyn Channel>> = HashMap::new();
    channels.insert("test".to_string(), channel);
    Gateway::new(channels, Arc::new(translations()), menu())
}

fn message(text: &str, language_code: Option<&str>) -> IncomingEvent {
    IncomingEvent::Message(IncomingMessage {
        id: Uuid::new_v4(),
        channel: "test".into(),
        sender_id: "42".into(),
        sender_name: Some("@ann".into()),
        language_code: language_code.map(str::to_string),
        text: text.into(),
        timestamp: Utc::now(),
        reply_target: Some("777".into()),
    })
}

fn press(data: &str, message_id: Option<i64>) -> IncomingEvent {
    IncomingEvent::Action(ActionPress {
        id: Uuid::new_v4(),
        channel: "test".into(),
        callback_id: "cb-1".into(),
        sender_id: "42".into(),
        sender_name: None,
        language_code: Some("en".into()),
        data: data.into(),
        reply_target: Some("777".into()),
        message_id,
        timestamp: Utc::now(),
    })
}

fn answers(calls: &[Call]) -> Vec<&Call> {
    calls
        .iter()
        .filter(|c| matches!(c, Call::Answer { .. }))
        .collect()
}

// --- routing ---

#[test]
fn test_route_registered_page_token() {
    let mut router = ActionRouter::new();
    router.register("menu");
    assert_eq!(
        router.route("pg:menu:3"),
        Route::Page {
            target: "menu".into(),
            page: 3
        }
    );
}

#[test]
fn test_route_inert_tokens() {
    let router = ActionRouter::new();
    assert_eq!(router.route(INERT_PLACEHOLDER), Route::Inert);
    assert_eq!(router.route(&encode(INERT_KIND, 2).unwrap()), Route::Inert);
}

#[test]
fn test_route_items_and_garbage() {
    let mut router = ActionRouter::new();
    router.register("menu");
    assert_eq!(router.route("item:tea1"), Route::Item("tea1".into()));
    assert_eq!(router.route("item:"), Route::Unhandled);
    assert_eq!(router.route("pg:orders:2"), Route::Unhandled);
    assert_eq!(router.route("pg:menu:0"), Route::Unhandled);
    assert_eq!(router.route("hello"), Route::Unhandled);
}

// --- dispatch ---

#[tokio::test]
async fn test_menu_command_sends_keyboard() {
    let channel = Arc::new(RecordingChannel::default());
    let gw = gateway(channel.clone());

    gw.dispatch(message("/menu", Some("de"))).await;

    let calls = channel.calls();
    assert_eq!(calls.len(), 1);
    let Call::Send(reply) = &calls[0] else {
        panic!("expected a send, got {calls:?}");
    };
    // Unknown language falls back to the base locale.
    assert_eq!(reply.text, "Каталог");
    assert_eq!(reply.reply_target.as_deref(), Some("777"));
    let keyboard = reply.keyboard.as_ref().unwrap();
    let nav = keyboard.rows().last().unwrap();
    assert_eq!(nav[0].text, "1 из 3");
    assert_eq!(nav[1].text, "Далее");
}

#[tokio::test]
async fn test_plain_text_gets_help() {
    let channel = Arc::new(RecordingChannel::default());
    let gw = gateway(channel.clone());

    gw.dispatch(message("what do you sell?", Some("en-GB"))).await;

    let calls = channel.calls();
    assert_eq!(calls.len(), 1);
    let Call::Send(reply) = &calls[0] else {
        panic!("expected a send");
    };
    assert_eq!(reply.text, "Help");
    assert!(reply.keyboard.is_none());
}

#[tokio::test]
async fn test_page_press_edits_in_place() {
    let channel = Arc::new(RecordingChannel::default());
    let gw = gateway(channel.clone());

    gw.dispatch(press("pg:menu:2", Some(99))).await;

    let calls = channel.calls();
    assert_eq!(calls.len(), 2);
    let Call::Edit {
        target,
        message_id,
        text,
        keyboard,
    } = &calls[0]
    else {
        panic!("expected an edit, got {calls:?}");
    };
    assert_eq!(target, "777");
    assert_eq!(*message_id, 99);
    assert_eq!(text, "Catalogue");
    assert_eq!(keyboard.rows()[0][0].text, "Tea #3");
    assert_eq!(keyboard.rows().last().unwrap().len(), 3);

    assert_eq!(
        calls[1],
        Call::Answer {
            callback_id: "cb-1".into(),
            text: None
        }
    );
}

#[tokio::test]
async fn test_page_press_without_message_sends_new() {
    let channel = Arc::new(RecordingChannel::default());
    let gw = gateway(channel.clone());

    gw.dispatch(press("pg:menu:3", None)).await;

    let calls = channel.calls();
    let Call::Send(reply) = &calls[0] else {
        panic!("expected a send, got {calls:?}");
    };
    assert_eq!(reply.reply_target.as_deref(), Some("777"));
    assert_eq!(reply.keyboard.as_ref().unwrap().rows()[0][0].text, "Tea #5");
    assert_eq!(answers(&calls).len(), 1);
}

#[tokio::test]
async fn test_failed_edit_still_acknowledged_with_toast() {
    let channel = Arc::new(RecordingChannel {
        fail_edits: true,
        ..Default::default()
    });
    let gw = gateway(channel.clone());

    gw.dispatch(press("pg:menu:2", Some(99))).await;

    let calls = channel.calls();
    assert_eq!(
        calls,
        vec![Call::Answer {
            callback_id: "cb-1".into(),
            text: Some("Menu unavailable".into())
        }]
    );
}

#[tokio::test]
async fn test_item_press_answers_with_label() {
    let channel = Arc::new(RecordingChannel::default());
    let gw = gateway(channel.clone());

    gw.dispatch(press("item:tea4", Some(99))).await;

    assert_eq!(
        channel.calls(),
        vec![Call::Answer {
            callback_id: "cb-1".into(),
            text: Some("Selected: Tea #4".into())
        }]
    );
}

#[tokio::test]
async fn test_inert_and_unknown_presses_only_acknowledged() {
    let channel = Arc::new(RecordingChannel::default());
    let gw = gateway(channel.clone());

    gw.dispatch(press(&encode(INERT_KIND, 1).unwrap(), Some(99)))
        .await;
    gw.dispatch(press(INERT_PLACEHOLDER, Some(99))).await;
    gw.dispatch(press("garbage", Some(99))).await;

    let calls = channel.calls();
    assert_eq!(calls.len(), 3);
    assert!(calls.iter().all(|c| matches!(
        c,
        Call::Answer { text: None, .. }
    )));
}

#[tokio::test]
async fn test_unknown_channel_ignored() {
    let channel = Arc::new(RecordingChannel::default());
    let gw = gateway(channel.clone());

    let IncomingEvent::Message(mut msg) = message("/help", None) else {
        unreachable!()
    };
    msg.channel = "elsewhere".into();
    gw.dispatch(IncomingEvent::Message(msg)).await;

    assert!(channel.calls().is_empty());
}
