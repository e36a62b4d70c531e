//! Placed events and the drafts they are built from.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::identifier::Identifier;
use crate::timestamp::Timestamp;

/// An event placed on the calendar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduledEvent {
    pub title: String,
    pub start: Timestamp,
    pub all_day: bool,
    pub id: Identifier,
}

impl fmt::Display for ScheduledEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.title.is_empty() {
            write!(f, "(untitled)")
        } else {
            write!(f, "{}", self.title)
        }
    }
}

impl ScheduledEvent {
    /// Human-readable start: the date for all-day events, date and time otherwise.
    pub fn render_start(&self) -> String {
        let start = self.start.as_utc();
        if self.all_day {
            start.format("%Y-%m-%d").to_string()
        } else {
            start.format("%Y-%m-%d %H:%M").to_string()
        }
    }
}

/// Where a draft is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DraftStage {
    /// Blank form, no slot chosen yet
    #[default]
    AwaitingSlot,
    /// Slot chosen from a click, waiting for the user to type a title
    AwaitingTitle,
    /// Ready to commit
    #[serde(rename = "none")]
    Ready,
}

/// An event under construction.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Draft {
    pub title: String,
    pub start: Option<Timestamp>,
    pub all_day: bool,
    pub id: Identifier,
    pub stage: DraftStage,
}

impl Draft {
    /// Blank draft: no title, no slot, id 0.
    pub fn blank() -> Self {
        Draft::default()
    }

    /// Draft opened by clicking a slot. The title is filled in by the form.
    pub fn for_slot(start: Timestamp, all_day: bool, id: Identifier) -> Self {
        Draft {
            title: String::new(),
            start: Some(start),
            all_day,
            id,
            stage: DraftStage::AwaitingTitle,
        }
    }

    /// Draft produced by dropping a template; ready to commit straight away.
    pub fn for_drop(start: Timestamp, all_day: bool, title: String, id: Identifier) -> Self {
        Draft {
            title,
            start: Some(start),
            all_day,
            id,
            stage: DraftStage::Ready,
        }
    }

    /// Live-bound form field. No validation.
    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    /// Mark the form as submitted.
    pub fn finish(&mut self) {
        self.stage = DraftStage::Ready;
    }

    /// Strip the stage. Returns None if no slot was ever chosen.
    pub fn into_event(self) -> Option<ScheduledEvent> {
        let start = self.start?;
        Some(ScheduledEvent {
            title: self.title,
            start,
            all_day: self.all_day,
            id: self.id,
        })
    }
}
