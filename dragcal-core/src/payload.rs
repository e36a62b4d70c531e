//! Callback payloads from the calendar widget.
//!
//! The widget reports drops and clicks as loosely shaped JSON. The `Raw*`
//! types accept whatever it sends; `TryFrom` narrows them into the strict
//! payloads the session works with. An event click never fails to narrow: an
//! id that is not a number stages a deletion that matches nothing.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::error::{DragCalError, DragCalResult};
use crate::identifier::Identifier;
use crate::timestamp::Timestamp;

/// A date as the widget may send it: text, or epoch milliseconds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawDate {
    Millis(i64),
    Text(String),
}

impl RawDate {
    fn narrow(self) -> DragCalResult<Timestamp> {
        match self {
            RawDate::Text(text) => Timestamp::parse(&text),
            RawDate::Millis(ms) => DateTime::<Utc>::from_timestamp_millis(ms)
                .map(Timestamp::from_utc)
                .ok_or_else(|| DragCalError::InvalidPayload(format!("Date out of range: {}", ms))),
        }
    }
}

fn require_date(date: Option<RawDate>) -> DragCalResult<Timestamp> {
    date.ok_or_else(|| DragCalError::InvalidPayload("Missing 'date'".into()))?
        .narrow()
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawDrop {
    pub date: Option<RawDate>,
    pub all_day: Option<bool>,
    pub dragged_label: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawSlotClick {
    pub date: Option<RawDate>,
    pub all_day: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RawEventClick {
    pub id: Option<Value>,
}

/// A template dropped on a slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DropPayload {
    pub date: Timestamp,
    pub all_day: bool,
    pub dragged_label: String,
}

/// A click on an empty slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlotClick {
    pub date: Timestamp,
    pub all_day: bool,
}

/// A click on a placed event. `id` is None when the widget's id is not numeric.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EventClick {
    pub id: Option<Identifier>,
}

impl From<Identifier> for EventClick {
    fn from(id: Identifier) -> Self {
        EventClick { id: Some(id) }
    }
}

impl TryFrom<RawDrop> for DropPayload {
    type Error = DragCalError;

    fn try_from(raw: RawDrop) -> DragCalResult<Self> {
        Ok(DropPayload {
            date: require_date(raw.date)?,
            all_day: raw.all_day.unwrap_or(false),
            dragged_label: raw.dragged_label.unwrap_or_default(),
        })
    }
}

impl TryFrom<RawSlotClick> for SlotClick {
    type Error = DragCalError;

    fn try_from(raw: RawSlotClick) -> DragCalResult<Self> {
        Ok(SlotClick {
            date: require_date(raw.date)?,
            all_day: raw.all_day.unwrap_or(false),
        })
    }
}

impl From<RawEventClick> for EventClick {
    fn from(raw: RawEventClick) -> Self {
        let id = match raw.id {
            Some(Value::String(text)) => Identifier::parse(&text),
            Some(Value::Number(n)) => Identifier::parse(&n.to_string()),
            Some(other) => Err(DragCalError::InvalidIdentifier(other.to_string())),
            None => Err(DragCalError::InvalidPayload("Missing 'id'".into())),
        };
        let id = id
            .inspect_err(|e| debug!("event click matches nothing: {}", e))
            .ok();
        EventClick { id }
    }
}
