use std::collections::HashSet;

use dragcal_core::identifier::TickClock;
use dragcal_core::payload::{RawDate, RawDrop, RawEventClick, RawSlotClick};
use dragcal_core::template::default_templates;
use dragcal_core::{Interaction, Session, TemplateRegistry};
use proptest::prelude::*;
use serde_json::json;

fn make_session(clock: TickClock) -> Session {
    Session::new(
        TemplateRegistry::new(default_templates()).unwrap(),
        Box::new(clock),
    )
}

fn slot_date() -> impl Strategy<Value = RawDate> {
    prop_oneof![
        (1u32..=28, 0u32..24).prop_map(|(day, hour)| RawDate::Text(format!(
            "2024-05-{:02}T{:02}:00:00Z",
            day, hour
        ))),
        (1u32..=28).prop_map(|day| RawDate::Text(format!("2024-06-{:02}", day))),
        (0i64..1_000_000_000).prop_map(|offset| RawDate::Millis(1_714_557_600_000 + offset)),
    ]
}

// Ids near both clocks below, plus text that matches nothing.
fn clicked_id() -> impl Strategy<Value = serde_json::Value> {
    prop_oneof![
        (0i64..60).prop_map(|n| json!(n)),
        (0i64..60).prop_map(|n| json!(n.to_string())),
        Just(json!("abc")),
    ]
}

fn interaction() -> impl Strategy<Value = Interaction> {
    prop_oneof![
        (slot_date(), any::<bool>(), "[a-z ]{0,8}").prop_map(|(date, all_day, label)| {
            Interaction::Drop(RawDrop {
                date: Some(date),
                all_day: Some(all_day),
                dragged_label: Some(label),
            })
        }),
        (slot_date(), any::<bool>()).prop_map(|(date, all_day)| {
            Interaction::SlotClick(RawSlotClick {
                date: Some(date),
                all_day: Some(all_day),
            })
        }),
        "[A-Za-z ]{0,12}".prop_map(|title| Interaction::SetTitle { title }),
        Just(Interaction::Submit),
        clicked_id().prop_map(|id| Interaction::EventClick(RawEventClick { id: Some(id) })),
        Just(Interaction::Confirm),
        Just(Interaction::Cancel),
        Just(Interaction::Close),
    ]
}

fn is_commit(interaction: &Interaction) -> bool {
    matches!(interaction, Interaction::Drop(_) | Interaction::Submit)
}

proptest! {
    #[test]
    fn prop_events_keep_starts_and_unique_ids(
        steps in prop::collection::vec(interaction(), 0..60)
    ) {
        let mut session = make_session(TickClock::stepping(1, 1));

        for step in steps {
            let _ = session.apply(step);

            let events = session.events();
            let ids: HashSet<i64> = events.iter().map(|e| e.id.value()).collect();
            prop_assert_eq!(ids.len(), events.len());

            for event in events {
                let wire = serde_json::to_value(event).unwrap();
                prop_assert!(wire["start"].is_string());
            }
        }
    }

    #[test]
    fn prop_each_commit_grows_by_one(
        steps in prop::collection::vec(interaction(), 0..60)
    ) {
        // Every id collides under a frozen clock.
        let mut session = make_session(TickClock::frozen(42));

        for step in steps {
            let before = session.events().len();
            let commit = is_commit(&step);
            let confirm = matches!(step, Interaction::Confirm);
            let applied = session.apply(step).is_ok();
            let after = session.events().len();

            if commit && applied {
                prop_assert_eq!(after, before + 1);
            } else if confirm {
                prop_assert!(after <= before);
            } else {
                prop_assert_eq!(after, before);
            }
        }
    }

    #[test]
    fn prop_title_resets_when_form_closes(
        steps in prop::collection::vec(interaction(), 0..40)
    ) {
        let mut session = make_session(TickClock::stepping(1, 1));

        for step in steps {
            let _ = session.apply(step);
            if session.staging().draft().is_none() {
                prop_assert_eq!(session.staging().form_title(), "");
            }
        }
    }
}
