//! Control items: one clickable button's data before rendering.

use notshop_core::{error::NotshopError, message::InlineButton};
use serde_json::{Map, Value};

use crate::token::{INERT_PLACEHOLDER, MAX_TOKEN_LEN};

/// Button fields owned by the item itself; `extra` may not override them.
const RESERVED_KEYS: [&str; 3] = ["text", "callback_data", "url"];

/// One clickable control: a label plus where pressing it leads.
///
/// When both `action` and `link` are set, `action` wins at render time.
#[derive(Debug, Clone, PartialEq)]
pub struct ControlItem {
    text: String,
    action: Option<String>,
    link: Option<String>,
    extra: Map<String, Value>,
}

impl ControlItem {
    /// A control with a label and no destination yet.
    pub fn new(text: impl Into<String>) -> Result<Self, NotshopError> {
        let text = text.into();
        if text.is_empty() {
            return Err(NotshopError::Validation("button text is empty".into()));
        }
        Ok(Self {
            text,
            action: None,
            link: None,
            extra: Map::new(),
        })
    }

    /// A control that sends `action` back when pressed.
    pub fn action(text: impl Into<String>, action: impl Into<String>) -> Result<Self, NotshopError> {
        Self::new(text)?.with_action(action)
    }

    /// A control that opens `url`.
    pub fn link(text: impl Into<String>, url: impl Into<String>) -> Result<Self, NotshopError> {
        Ok(Self::new(text)?.with_link(url))
    }

    /// Set the callback payload. An empty payload leaves the action unset.
    pub fn with_action(mut self, action: impl Into<String>) -> Result<Self, NotshopError> {
        self.action = checked_action(action.into())?;
        Ok(self)
    }

    /// Set the link. An empty URL leaves the link unset.
    pub fn with_link(mut self, url: impl Into<String>) -> Self {
        self.link = Some(url.into()).filter(|u| !u.is_empty());
        self
    }

    /// Attach a platform decoration forwarded verbatim to the rendered button.
    ///
    /// `text`, `callback_data` and `url` are rejected: the label and the
    /// destination come only from the item.
    pub fn with_extra(mut self, key: impl Into<String>, value: Value) -> Result<Self, NotshopError> {
        let key = key.into();
        if RESERVED_KEYS.contains(&key.as_str()) {
            return Err(NotshopError::Validation(format!(
                "extra field '{key}' would override the button's own {key}"
            )));
        }
        self.extra.insert(key, value);
        Ok(self)
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn action_payload(&self) -> Option<&str> {
        self.action.as_deref()
    }

    pub fn link_url(&self) -> Option<&str> {
        self.link.as_deref()
    }

    pub fn extra(&self) -> &Map<String, Value> {
        &self.extra
    }

    /// Build from a loosely-typed record such as a config table.
    ///
    /// Recognized keys: `text` (required), `action` or `callback_data`,
    /// `link` or `url`. Every other key becomes an extra decoration.
    pub fn from_record(record: Value) -> Result<Self, NotshopError> {
        let Value::Object(mut fields) = record else {
            return Err(NotshopError::Validation(format!(
                "button record must be an object, got {}",
                kind_name(&record)
            )));
        };

        let text = match fields.remove("text") {
            Some(Value::String(text)) => text,
            Some(other) => {
                return Err(NotshopError::Validation(format!(
                    "button 'text' must be a string, got {}",
                    kind_name(&other)
                )))
            }
            None => {
                return Err(NotshopError::Validation(
                    "button record is missing 'text'".into(),
                ))
            }
        };

        let action = take_string(&mut fields, &["action", "callback_data"])?;
        let link = take_string(&mut fields, &["link", "url"])?;

        let mut item = Self::new(text)?;
        item.action = action.map(checked_action).transpose()?.flatten();
        item.link = link.filter(|l| !l.is_empty());
        // Reserved keys were consumed above.
        item.extra = fields;
        Ok(item)
    }

    /// Render into the transport's button shape.
    ///
    /// Exactly one destination is carried: the action if set, else the
    /// link. A control with neither renders as an inert button.
    pub fn to_button(&self) -> InlineButton {
        let (callback_data, url) = match (&self.action, &self.link) {
            (Some(action), _) => (Some(action.clone()), None),
            (None, Some(link)) => (None, Some(link.clone())),
            (None, None) => (Some(INERT_PLACEHOLDER.to_string()), None),
        };
        InlineButton {
            text: self.text.clone(),
            callback_data,
            url,
            extra: self.extra.clone(),
        }
    }
}

/// Bulk input accepted by the builder: a ready item or a loose record.
#[derive(Debug, Clone)]
pub enum ItemInput {
    Item(ControlItem),
    Record(Value),
}

impl ItemInput {
    /// Validate into a [`ControlItem`].
    pub fn into_item(self) -> Result<ControlItem, NotshopError> {
        match self {
            Self::Item(item) => Ok(item),
            Self::Record(record) => ControlItem::from_record(record),
        }
    }
}

impl From<ControlItem> for ItemInput {
    fn from(item: ControlItem) -> Self {
        Self::Item(item)
    }
}

impl From<Value> for ItemInput {
    fn from(record: Value) -> Self {
        Self::Record(record)
    }
}

/// Action payloads ride in `callback_data`, which shares the token size limit.
fn checked_action(action: String) -> Result<Option<String>, NotshopError> {
    if action.is_empty() {
        return Ok(None);
    }
    if action.len() > MAX_TOKEN_LEN {
        return Err(NotshopError::Validation(format!(
            "action payload is {} bytes, limit is {MAX_TOKEN_LEN}",
            action.len()
        )));
    }
    Ok(Some(action))
}

/// Remove the first non-empty alias; `null` and `""` count as absent.
fn take_string(
    fields: &mut Map<String, Value>,
    aliases: &[&str],
) -> Result<Option<String>, NotshopError> {
    let mut found = None;
    for alias in aliases {
        match fields.remove(*alias) {
            None | Some(Value::Null) => {}
            Some(Value::String(s)) => {
                if found.is_none() && !s.is_empty() {
                    found = Some(s);
                }
            }
            Some(other) => {
                return Err(NotshopError::Validation(format!(
                    "button '{alias}' must be a string, got {}",
                    kind_name(&other)
                )))
            }
        }
    }
    Ok(found)
}

fn kind_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
