//! The schedule store: placed events plus the single staging slot.

use serde::Serialize;

use crate::error::{DragCalError, DragCalResult};
use crate::event::{Draft, ScheduledEvent};
use crate::identifier::Identifier;
use crate::staging::Staging;
use crate::template::TemplateRegistry;

/// What a confirmed deletion actually removed. `id` is None when the clicked
/// event's id was not numeric.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeletionOutcome {
    pub id: Option<Identifier>,
    pub removed_events: usize,
    pub removed_template: bool,
}

#[derive(Debug, Clone, Default)]
pub struct ScheduleStore {
    events: Vec<ScheduledEvent>,
    staging: Staging,
}

impl ScheduleStore {
    pub fn new() -> Self {
        ScheduleStore::default()
    }

    /// Placed events in commit order.
    pub fn list(&self) -> &[ScheduledEvent] {
        &self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn staging(&self) -> &Staging {
        &self.staging
    }

    /// Append a draft as a placed event. Ids are not checked for uniqueness.
    ///
    /// Returns the committed event, or None for a draft that never got a slot.
    pub fn commit(&mut self, draft: Draft) -> Option<ScheduledEvent> {
        let event = draft.into_event()?;
        self.events.push(event.clone());
        Some(event)
    }

    // =========================================================================
    // Creation form
    // =========================================================================

    /// Stage a draft in the creation form. The draft must already have a slot.
    pub fn open_create_form(&mut self, draft: Draft) -> DragCalResult<()> {
        if draft.start.is_none() {
            return Err(DragCalError::InvalidPayload(
                "A creation form needs a slot to place the event".into(),
            ));
        }
        self.staging.open_create(draft)
    }

    pub fn set_draft_title(&mut self, title: &str) -> DragCalResult<()> {
        self.staging.draft_mut()?.set_title(title);
        Ok(())
    }

    /// Commit the staged draft and close the form.
    pub fn submit_draft(&mut self) -> DragCalResult<Option<ScheduledEvent>> {
        let mut draft = self.staging.take_draft()?;
        draft.finish();
        Ok(self.commit(draft))
    }

    pub fn cancel_draft(&mut self) -> DragCalResult<()> {
        self.staging.cancel_create()
    }

    // =========================================================================
    // Deletion prompt
    // =========================================================================

    pub fn select_for_deletion(&mut self, id: Option<Identifier>) -> DragCalResult<()> {
        self.staging.open_delete(id)
    }

    /// Remove every event with the staged id, and the template sharing it if any.
    pub fn confirm_deletion(
        &mut self,
        templates: &mut TemplateRegistry,
    ) -> DragCalResult<DeletionOutcome> {
        let id = self.staging.take_deletion()?;

        let before = self.events.len();
        let events: Vec<ScheduledEvent> = self
            .events
            .iter()
            .filter(|e| Some(e.id) != id)
            .cloned()
            .collect();
        self.events = events;

        Ok(DeletionOutcome {
            id,
            removed_events: before - self.events.len(),
            removed_template: id.is_some_and(|id| templates.remove(id)),
        })
    }

    pub fn cancel_deletion(&mut self) -> DragCalResult<()> {
        self.staging.cancel_delete()
    }

    /// Close any open modal without side effects.
    pub fn close(&mut self) {
        self.staging.close();
    }
}
