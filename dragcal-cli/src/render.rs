//! TUI rendering traits for dragcal types.
//!
//! This module provides extension traits that add colored terminal rendering
//! to dragcal-core types using owo_colors.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use dragcal_core::store::DeletionOutcome;
use dragcal_core::{EventTemplate, ScheduledEvent, Staging};
use owo_colors::OwoColorize;

/// Extension trait for TUI rendering with colors.
pub trait Render {
    fn render(&self) -> String;
}

impl Render for ScheduledEvent {
    fn render(&self) -> String {
        let time = if self.all_day {
            "all day".to_string()
        } else {
            self.start.as_utc().format("%H:%M").to_string()
        };

        format!(
            "{} {} {}",
            format!("{:>7}", time).dimmed(),
            self,
            format!("#{}", self.id).dimmed()
        )
    }
}

impl Render for EventTemplate {
    fn render(&self) -> String {
        format!("{} {}", format!("[{}]", self.id).dimmed(), self.label.cyan())
    }
}

impl Render for Staging {
    fn render(&self) -> String {
        match self {
            Staging::Closed => "No form open".dimmed().to_string(),
            Staging::CreateOpen { draft } => {
                let start = draft
                    .start
                    .map(|s| s.to_iso_string())
                    .unwrap_or_else(|| "no slot".to_string());
                let title = if draft.title.is_empty() {
                    "(empty)".dimmed().to_string()
                } else {
                    draft.title.clone()
                };
                format!(
                    "{} {} {}\n  Title: {}",
                    "New event".yellow(),
                    start,
                    if draft.all_day { "(all day)" } else { "" },
                    title
                )
            }
            Staging::DeleteOpen {
                pending_id: Some(id),
            } => format!("{} #{}? (confirm / cancel)", "Delete".red(), id),
            Staging::DeleteOpen { pending_id: None } => format!(
                "{} an event with no numeric id? (confirm / cancel)",
                "Delete".red()
            ),
        }
    }
}

impl Render for DeletionOutcome {
    fn render(&self) -> String {
        let mut line = format!(
            "Deleted {} {}",
            self.removed_events,
            pluralize("event", self.removed_events)
        );
        if let (true, Some(id)) = (self.removed_template, self.id) {
            line.push_str(" and template ");
            line.push_str(&id.to_string());
        }
        line.red().to_string()
    }
}

/// Simple pluralization helper
fn pluralize(word: &str, count: usize) -> String {
    if count == 1 {
        word.to_string()
    } else {
        format!("{}s", word)
    }
}

/// Render placed events grouped by day, all-day events first within a day.
pub fn render_calendar(events: &[ScheduledEvent]) -> String {
    if events.is_empty() {
        return "  No events placed".dimmed().to_string();
    }

    let mut days: BTreeMap<NaiveDate, Vec<&ScheduledEvent>> = BTreeMap::new();
    for event in events {
        days.entry(event.start.as_utc().date_naive())
            .or_default()
            .push(event);
    }

    let mut lines = Vec::new();
    for (day, mut day_events) in days {
        day_events.sort_by_key(|e| (!e.all_day, e.start));
        lines.push(format!("📅 {}", day.format("%a %Y-%m-%d").bold()));
        lines.extend(day_events.iter().map(|e| format!("   {}", e.render())));
    }
    lines.join("\n")
}

pub fn render_templates(templates: &[EventTemplate]) -> String {
    if templates.is_empty() {
        return "  No templates left".dimmed().to_string();
    }

    templates
        .iter()
        .map(|t| format!("  {}", t.render()))
        .collect::<Vec<_>>()
        .join("\n")
}
