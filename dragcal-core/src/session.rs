//! A calendar session: the template registry, the schedule store, and the
//! clock that mints ids, driven by widget callbacks.

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::dragcal_config::DragCalConfig;
use crate::error::{DragCalError, DragCalResult};
use crate::event::{Draft, ScheduledEvent};
use crate::identifier::IdSource;
use crate::payload::{
    DropPayload, EventClick, RawDrop, RawEventClick, RawSlotClick, SlotClick,
};
use crate::staging::Staging;
use crate::store::{DeletionOutcome, ScheduleStore};
use crate::template::{EventTemplate, TemplateRegistry};

/// One user action, as recorded in replay scripts.
///
/// Payload-carrying variants take the widget's raw shapes and are narrowed
/// when applied.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum Interaction {
    Drop(RawDrop),
    SlotClick(RawSlotClick),
    EventClick(RawEventClick),
    SetTitle { title: String },
    Submit,
    Confirm,
    /// Cancel whichever modal is open
    Cancel,
    Close,
}

/// Snapshot handed to renderers.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct View {
    pub events: Vec<ScheduledEvent>,
    pub templates: Vec<EventTemplate>,
    pub staging: Staging,
}

pub struct Session {
    templates: TemplateRegistry,
    store: ScheduleStore,
    ids: Box<dyn IdSource>,
}

impl Session {
    pub fn new(templates: TemplateRegistry, ids: Box<dyn IdSource>) -> Self {
        Session {
            templates,
            store: ScheduleStore::new(),
            ids,
        }
    }

    pub fn from_config(config: &DragCalConfig) -> DragCalResult<Self> {
        let templates = TemplateRegistry::new(config.templates.clone())?;
        Ok(Session::new(templates, config.id_strategy.source()))
    }

    pub fn events(&self) -> &[ScheduledEvent] {
        self.store.list()
    }

    pub fn templates(&self) -> &[EventTemplate] {
        self.templates.list()
    }

    pub fn template_registry(&self) -> &TemplateRegistry {
        &self.templates
    }

    pub fn staging(&self) -> &Staging {
        self.store.staging()
    }

    pub fn view(&self) -> View {
        View {
            events: self.store.list().to_vec(),
            templates: self.templates.list().to_vec(),
            staging: self.store.staging().clone(),
        }
    }

    /// A template was dropped on a slot: commit immediately.
    pub fn on_drop(&mut self, payload: DropPayload) -> DragCalResult<ScheduledEvent> {
        let id = self.ids.next_id();
        let draft = Draft::for_drop(payload.date, payload.all_day, payload.dragged_label, id);

        let event = self.store.commit(draft).ok_or(DragCalError::InvalidTransition {
            action: "commit a draft",
            state: "no slot is chosen",
        })?;
        info!(id = %event.id, title = %event.title, start = %event.start, "placed event from drop");
        Ok(event)
    }

    /// An empty slot was clicked: open the creation form.
    pub fn on_slot_click(&mut self, click: SlotClick) -> DragCalResult<()> {
        let draft = Draft::for_slot(click.date, click.all_day, self.ids.next_id());
        debug!(id = %draft.id, start = %click.date, "opening creation form");
        self.store.open_create_form(draft).inspect_err(log_rejected)
    }

    /// A placed event was clicked: stage it for deletion.
    pub fn on_event_click(&mut self, click: EventClick) -> DragCalResult<()> {
        debug!(id = ?click.id, "staging deletion");
        self.store.select_for_deletion(click.id).inspect_err(log_rejected)
    }

    pub fn set_title(&mut self, title: &str) -> DragCalResult<()> {
        self.store.set_draft_title(title).inspect_err(log_rejected)
    }

    /// Submit the creation form. Empty titles are accepted.
    pub fn submit(&mut self) -> DragCalResult<ScheduledEvent> {
        let event = self
            .store
            .submit_draft()
            .inspect_err(log_rejected)?
            .ok_or(DragCalError::InvalidTransition {
                action: "commit a draft",
                state: "no slot is chosen",
            })?;
        info!(id = %event.id, title = %event.title, start = %event.start, "placed event from form");
        Ok(event)
    }

    pub fn confirm_deletion(&mut self) -> DragCalResult<DeletionOutcome> {
        let outcome = self
            .store
            .confirm_deletion(&mut self.templates)
            .inspect_err(log_rejected)?;
        info!(
            id = ?outcome.id,
            removed_events = outcome.removed_events,
            removed_template = outcome.removed_template,
            "deletion confirmed"
        );
        Ok(outcome)
    }

    pub fn cancel_deletion(&mut self) -> DragCalResult<()> {
        self.store.cancel_deletion().inspect_err(log_rejected)
    }

    pub fn cancel_draft(&mut self) -> DragCalResult<()> {
        self.store.cancel_draft().inspect_err(log_rejected)
    }

    /// Cancel whichever modal is open.
    pub fn cancel(&mut self) -> DragCalResult<()> {
        match self.store.staging() {
            Staging::DeleteOpen { .. } => self.cancel_deletion(),
            _ => self.cancel_draft(),
        }
    }

    /// Close any modal, discarding its draft or pending deletion.
    pub fn close(&mut self) {
        debug!(state = self.store.staging().describe(), "closing modal");
        self.store.close();
    }

    /// Narrow and apply one recorded interaction.
    pub fn apply(&mut self, interaction: Interaction) -> DragCalResult<()> {
        match interaction {
            Interaction::Drop(raw) => self.on_drop(raw.try_into()?).map(|_| ()),
            Interaction::SlotClick(raw) => self.on_slot_click(raw.try_into()?),
            Interaction::EventClick(raw) => self.on_event_click(raw.into()),
            Interaction::SetTitle { title } => self.set_title(&title),
            Interaction::Submit => self.submit().map(|_| ()),
            Interaction::Confirm => self.confirm_deletion().map(|_| ()),
            Interaction::Cancel => self.cancel(),
            Interaction::Close => {
                self.close();
                Ok(())
            }
        }
    }
}

impl Default for Session {
    fn default() -> Self {
        let config = DragCalConfig::default();
        Session::new(
            TemplateRegistry::new(config.templates).unwrap_or_default(),
            config.id_strategy.source(),
        )
    }
}

fn log_rejected(err: &DragCalError) {
    warn!("{}", err);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::identifier::{Identifier, TickClock};
    use crate::template::default_templates;
    use crate::timestamp::Timestamp;
    use serde_json::json;

    fn make_session(clock: TickClock) -> Session {
        Session::new(
            TemplateRegistry::new(default_templates()).unwrap(),
            Box::new(clock),
        )
    }

    fn make_drop(label: &str) -> DropPayload {
        DropPayload {
            date: Timestamp::parse("2024-05-01T10:00:00Z").unwrap(),
            all_day: false,
            dragged_label: label.to_string(),
        }
    }

    fn make_slot() -> SlotClick {
        SlotClick {
            date: Timestamp::parse("2024-05-03").unwrap(),
            all_day: true,
        }
    }

    #[test]
    fn test_drop_commits_immediately() {
        let mut session = make_session(TickClock::frozen(1714557600123));
        let event = session.on_drop(make_drop("event 1")).unwrap();

        assert_eq!(
            serde_json::to_value(&event).unwrap(),
            json!({
                "title": "event 1",
                "start": "2024-05-01T10:00:00.000Z",
                "allDay": false,
                "id": 1714557600123i64,
            })
        );
        assert_eq!(session.events(), &[event]);
        assert!(session.staging().is_closed());
    }

    #[test]
    fn test_id_is_taken_at_interaction_time() {
        let mut session = make_session(TickClock::stepping(100, 1));
        let first = session.on_drop(make_drop("a")).unwrap();
        let second = session.on_drop(make_drop("b")).unwrap();
        assert_eq!(first.id, Identifier::new(100));
        assert_eq!(second.id, Identifier::new(101));
    }

    #[test]
    fn test_drop_leaves_open_form_alone() {
        let mut session = make_session(TickClock::stepping(1, 1));
        session.on_slot_click(make_slot()).unwrap();
        session.set_title("typing").unwrap();

        session.on_drop(make_drop("event 2")).unwrap();
        assert_eq!(session.staging().form_title(), "typing");
        assert_eq!(session.events().len(), 1);
    }

    #[test]
    fn test_click_then_fill() {
        let mut session = make_session(TickClock::stepping(500, 1));
        session.on_slot_click(make_slot()).unwrap();

        let draft = session.staging().draft().unwrap();
        assert_eq!(draft.id, Identifier::new(500));
        assert_eq!(draft.title, "");

        session.set_title("Dentist").unwrap();
        let event = session.submit().unwrap();
        assert_eq!(event.title, "Dentist");
        assert!(event.all_day);
        assert_eq!(event.id, Identifier::new(500));
        assert!(session.staging().is_closed());
    }

    #[test]
    fn test_close_discards_draft_and_resets_title() {
        let mut session = make_session(TickClock::stepping(1, 1));
        session.on_slot_click(make_slot()).unwrap();
        session.set_title("never mind").unwrap();
        session.close();

        assert!(session.events().is_empty());
        assert_eq!(session.staging().form_title(), "");

        session.on_slot_click(make_slot()).unwrap();
        assert_eq!(session.staging().form_title(), "");
    }

    #[test]
    fn test_rejected_transition_leaves_state() {
        let mut session = make_session(TickClock::stepping(1, 1));
        session.on_slot_click(make_slot()).unwrap();

        let err = session
            .on_event_click(Identifier::new(1).into())
            .unwrap_err();
        assert!(matches!(err, DragCalError::InvalidTransition { .. }));
        assert!(session.staging().draft().is_some());
    }

    #[test]
    fn test_delete_flow_removes_event() {
        let mut session = make_session(TickClock::stepping(1000, 1));
        let keep = session.on_drop(make_drop("keep")).unwrap();
        let gone = session.on_drop(make_drop("gone")).unwrap();

        session.on_event_click(gone.id.into()).unwrap();
        let outcome = session.confirm_deletion().unwrap();

        assert_eq!(outcome.removed_events, 1);
        assert!(!outcome.removed_template);
        assert_eq!(session.events(), &[keep]);
        assert_eq!(session.templates().len(), 5);
    }

    #[test]
    fn test_cancel_dispatches_to_open_modal() {
        let mut session = make_session(TickClock::stepping(1, 1));
        let event = session.on_drop(make_drop("x")).unwrap();

        session.on_event_click(event.id.into()).unwrap();
        session.cancel().unwrap();
        assert!(session.staging().is_closed());
        assert_eq!(session.events().len(), 1);

        session.on_slot_click(make_slot()).unwrap();
        session.cancel().unwrap();
        assert!(session.staging().is_closed());
        assert_eq!(session.events().len(), 1);
    }

    #[test]
    fn test_apply_script() {
        let script = [
            json!({ "type": "drop", "date": "2024-05-01T10:00:00Z", "draggedLabel": "event 1" }),
            json!({ "type": "slot-click", "date": "2024-05-02", "allDay": true }),
            json!({ "type": "set-title", "title": "Offsite" }),
            json!({ "type": "submit" }),
            json!({ "type": "event-click", "id": "2" }),
            json!({ "type": "confirm" }),
        ];

        let mut session = make_session(TickClock::stepping(1, 1));
        for step in script {
            let interaction: Interaction = serde_json::from_value(step).unwrap();
            session.apply(interaction).unwrap();
        }

        let titles: Vec<&str> = session.events().iter().map(|e| e.title.as_str()).collect();
        assert_eq!(titles, vec!["event 1"]);
        assert!(session.template_registry().get(Identifier::new(2)).is_none());
    }

    #[test]
    fn test_non_numeric_click_deletes_nothing() {
        let mut session = make_session(TickClock::stepping(1, 1));
        session.on_drop(make_drop("keep")).unwrap();
        let before = session.view();

        let click: Interaction =
            serde_json::from_value(json!({ "type": "event-click", "id": "nope" })).unwrap();
        session.apply(click).unwrap();
        assert_eq!(
            serde_json::to_value(session.staging()).unwrap(),
            json!({ "state": "delete-open", "pendingId": null })
        );

        let outcome = session.confirm_deletion().unwrap();
        assert_eq!(outcome.removed_events, 0);
        assert!(session.staging().is_closed());
        assert_eq!(session.events(), before.events.as_slice());
        assert_eq!(session.templates(), before.templates.as_slice());
    }

    #[test]
    fn test_apply_rejects_bad_date() {
        let mut session = make_session(TickClock::frozen(1));
        let interaction: Interaction =
            serde_json::from_value(json!({ "type": "slot-click", "date": "someday" })).unwrap();
        assert!(matches!(
            session.apply(interaction),
            Err(DragCalError::InvalidPayload(_))
        ));
        assert!(session.staging().is_closed());
    }

    #[test]
    fn test_view_serializes() {
        let session = make_session(TickClock::frozen(1));
        let view = serde_json::to_value(session.view()).unwrap();
        assert_eq!(view["events"], json!([]));
        assert_eq!(view["templates"][0], json!({ "label": "event 1", "id": "1" }));
        assert_eq!(view["staging"], json!({ "state": "closed" }));
    }
}
