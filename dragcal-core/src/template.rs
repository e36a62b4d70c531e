//! Draggable event templates.

use serde::{Deserialize, Serialize};

use crate::error::{DragCalError, DragCalResult};
use crate::identifier::Identifier;

/// A labeled token that can be dragged onto the calendar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventTemplate {
    pub label: String,
    pub id: String,
}

impl EventTemplate {
    pub fn new(label: impl Into<String>, id: impl Into<String>) -> Self {
        EventTemplate {
            label: label.into(),
            id: id.into(),
        }
    }
}

/// The seed list shown when nothing else is configured: "event 1" to "event 5".
pub fn default_templates() -> Vec<EventTemplate> {
    (1..=5)
        .map(|n| EventTemplate::new(format!("event {}", n), n.to_string()))
        .collect()
}

/// The unplaced templates, in display order.
///
/// Seeded once and never grown; the only mutation is [`TemplateRegistry::remove`].
#[derive(Debug, Clone, Default)]
pub struct TemplateRegistry {
    templates: Vec<EventTemplate>,
}

impl TemplateRegistry {
    /// Build a registry from a seed list. Template ids must be unique.
    pub fn new(seed: Vec<EventTemplate>) -> DragCalResult<Self> {
        for (i, template) in seed.iter().enumerate() {
            if seed[..i].iter().any(|t| t.id == template.id) {
                return Err(DragCalError::DuplicateTemplate(template.id.clone()));
            }
        }

        Ok(TemplateRegistry { templates: seed })
    }

    /// Snapshot in insertion order.
    pub fn list(&self) -> &[EventTemplate] {
        &self.templates
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }

    /// Look up a template whose id numerically equals `id`.
    pub fn get(&self, id: Identifier) -> Option<&EventTemplate> {
        self.templates.iter().find(|t| id.matches_text(&t.id))
    }

    pub fn find_by_label(&self, label: &str) -> Option<&EventTemplate> {
        self.templates.iter().find(|t| t.label == label)
    }

    /// Remove the template whose id numerically equals `id`.
    /// Returns whether anything was removed; a missing id is a no-op.
    pub fn remove(&mut self, id: Identifier) -> bool {
        let before = self.templates.len();
        self.templates.retain(|t| !id.matches_text(&t.id));
        self.templates.len() != before
    }
}
