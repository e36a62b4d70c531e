//! Modal staging: at most one creation form or deletion prompt is open.
//!
//! ```text
//! Closed --slot click--> CreateOpen --submit/cancel--> Closed
//! Closed --event click-> DeleteOpen --confirm/cancel-> Closed
//! ```
//!
//! Any other transition is rejected and leaves the state untouched.
//! `close` is always allowed. A deletion prompt may hold no id at all when the
//! clicked event's id was not numeric; confirming it removes nothing.

use serde::{Deserialize, Serialize};

use crate::error::{DragCalError, DragCalResult};
use crate::event::Draft;
use crate::identifier::Identifier;

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "kebab-case")]
pub enum Staging {
    #[default]
    Closed,
    CreateOpen { draft: Draft },
    DeleteOpen {
        #[serde(rename = "pendingId")]
        pending_id: Option<Identifier>,
    },
}

impl Staging {
    pub fn describe(&self) -> &'static str {
        match self {
            Staging::Closed => "no form is open",
            Staging::CreateOpen { .. } => "the creation form is open",
            Staging::DeleteOpen { .. } => "the deletion prompt is open",
        }
    }

    pub fn is_closed(&self) -> bool {
        matches!(self, Staging::Closed)
    }

    pub fn draft(&self) -> Option<&Draft> {
        match self {
            Staging::CreateOpen { draft } => Some(draft),
            _ => None,
        }
    }

    /// The staged id, if the deletion prompt is open with a numeric id.
    pub fn pending_deletion(&self) -> Option<Identifier> {
        match self {
            Staging::DeleteOpen { pending_id } => *pending_id,
            _ => None,
        }
    }

    pub fn is_deleting(&self) -> bool {
        matches!(self, Staging::DeleteOpen { .. })
    }

    /// What the title field shows: the staged title, or empty when no form is open.
    pub fn form_title(&self) -> &str {
        self.draft().map_or("", |d| d.title.as_str())
    }

    pub fn open_create(&mut self, draft: Draft) -> DragCalResult<()> {
        self.require_closed("open the creation form")?;
        *self = Staging::CreateOpen { draft };
        Ok(())
    }

    pub fn open_delete(&mut self, pending_id: Option<Identifier>) -> DragCalResult<()> {
        self.require_closed("select an event for deletion")?;
        *self = Staging::DeleteOpen { pending_id };
        Ok(())
    }

    pub fn draft_mut(&mut self) -> DragCalResult<&mut Draft> {
        match self {
            Staging::CreateOpen { draft } => Ok(draft),
            other => Err(rejected("edit the title", other)),
        }
    }

    /// Close the creation form, handing back its draft.
    pub fn take_draft(&mut self) -> DragCalResult<Draft> {
        match std::mem::take(self) {
            Staging::CreateOpen { draft } => Ok(draft),
            other => {
                let err = rejected("submit the form", &other);
                *self = other;
                Err(err)
            }
        }
    }

    /// Close the deletion prompt, handing back the staged id.
    pub fn take_deletion(&mut self) -> DragCalResult<Option<Identifier>> {
        match *self {
            Staging::DeleteOpen { pending_id } => {
                *self = Staging::Closed;
                Ok(pending_id)
            }
            _ => Err(rejected("confirm a deletion", self)),
        }
    }

    /// Discard the creation form. A no-op when nothing is open.
    pub fn cancel_create(&mut self) -> DragCalResult<()> {
        if matches!(self, Staging::DeleteOpen { .. }) {
            return Err(rejected("cancel the creation form", self));
        }
        *self = Staging::Closed;
        Ok(())
    }

    /// Dismiss the deletion prompt. A no-op when nothing is open.
    pub fn cancel_delete(&mut self) -> DragCalResult<()> {
        if matches!(self, Staging::CreateOpen { .. }) {
            return Err(rejected("cancel the deletion", self));
        }
        *self = Staging::Closed;
        Ok(())
    }

    /// Close whatever is open, discarding drafts and pending deletions.
    pub fn close(&mut self) {
        *self = Staging::Closed;
    }

    fn require_closed(&self, action: &'static str) -> DragCalResult<()> {
        if self.is_closed() {
            Ok(())
        } else {
            Err(rejected(action, self))
        }
    }
}

fn rejected(action: &'static str, state: &Staging) -> DragCalError {
    DragCalError::InvalidTransition {
        action,
        state: state.describe(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::timestamp::Timestamp;

    fn make_draft() -> Draft {
        let start = Timestamp::parse("2024-05-01").unwrap();
        Draft::for_slot(start, true, Identifier::new(10))
    }

    #[test]
    fn test_create_round_trip() {
        let mut staging = Staging::Closed;
        staging.open_create(make_draft()).unwrap();
        staging.draft_mut().unwrap().set_title("Lunch");
        assert_eq!(staging.form_title(), "Lunch");

        let draft = staging.take_draft().unwrap();
        assert_eq!(draft.title, "Lunch");
        assert!(staging.is_closed());
        assert_eq!(staging.form_title(), "");
    }

    #[test]
    fn test_delete_round_trip() {
        let mut staging = Staging::Closed;
        staging.open_delete(Some(Identifier::new(3))).unwrap();
        assert_eq!(staging.pending_deletion(), Some(Identifier::new(3)));
        assert_eq!(staging.take_deletion().unwrap(), Some(Identifier::new(3)));
        assert!(staging.is_closed());
    }

    #[test]
    fn test_cannot_open_delete_over_create() {
        let mut staging = Staging::Closed;
        staging.open_create(make_draft()).unwrap();

        let err = staging.open_delete(Some(Identifier::new(3))).unwrap_err();
        assert!(matches!(err, DragCalError::InvalidTransition { .. }));
        assert_eq!(staging.draft(), Some(&make_draft()));
    }

    #[test]
    fn test_cannot_open_create_over_delete() {
        let mut staging = Staging::Closed;
        staging.open_delete(Some(Identifier::new(3))).unwrap();
        assert!(staging.open_create(make_draft()).is_err());
        assert_eq!(staging.pending_deletion(), Some(Identifier::new(3)));
    }

    #[test]
    fn test_submit_requires_open_form() {
        let mut staging = Staging::Closed;
        assert!(staging.take_draft().is_err());
        assert!(staging.is_closed());

        staging.open_delete(Some(Identifier::new(1))).unwrap();
        assert!(staging.take_draft().is_err());
        assert_eq!(staging.pending_deletion(), Some(Identifier::new(1)));
    }

    #[test]
    fn test_delete_without_id_still_opens() {
        let mut staging = Staging::Closed;
        staging.open_delete(None).unwrap();
        assert!(staging.is_deleting());
        assert_eq!(staging.pending_deletion(), None);
        assert_eq!(
            serde_json::to_value(&staging).unwrap(),
            serde_json::json!({ "state": "delete-open", "pendingId": null })
        );

        assert_eq!(staging.take_deletion().unwrap(), None);
        assert!(staging.is_closed());
    }

    #[test]
    fn test_confirm_requires_pending_deletion() {
        let mut staging = Staging::Closed;
        assert!(staging.take_deletion().is_err());
        assert!(staging.draft_mut().is_err());
    }

    #[test]
    fn test_cancels_are_noops_when_closed() {
        let mut staging = Staging::Closed;
        staging.cancel_create().unwrap();
        staging.cancel_delete().unwrap();
        assert!(staging.is_closed());
    }

    #[test]
    fn test_cancel_of_the_other_modal_is_rejected() {
        let mut staging = Staging::Closed;
        staging.open_delete(Some(Identifier::new(1))).unwrap();
        assert!(staging.cancel_create().is_err());
        assert!(!staging.is_closed());
    }

    #[test]
    fn test_close_from_anywhere() {
        let mut staging = Staging::Closed;
        staging.open_create(make_draft()).unwrap();
        staging.close();
        assert!(staging.is_closed());

        staging.open_delete(Some(Identifier::new(1))).unwrap();
        staging.close();
        assert!(staging.is_closed());
    }

    #[test]
    fn test_wire_format() {
        let staging = Staging::DeleteOpen {
            pending_id: Some(Identifier::new(2)),
        };
        assert_eq!(
            serde_json::to_value(&staging).unwrap(),
            serde_json::json!({ "state": "delete-open", "pendingId": 2 })
        );
        assert_eq!(
            serde_json::to_value(Staging::Closed).unwrap(),
            serde_json::json!({ "state": "closed" })
        );
    }
}
