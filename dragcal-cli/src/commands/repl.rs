use std::io::{BufRead, IsTerminal};

use anyhow::{Result, anyhow, bail};
use dialoguer::Input;
use dragcal_core::payload::{RawDate, RawDrop, RawEventClick, RawSlotClick};
use dragcal_core::{Identifier, Interaction, Session, Staging, TemplateRegistry};
use owo_colors::OwoColorize;

use crate::render::{Render, render_calendar, render_templates};

const HELP: &str = "\
Commands:
  templates                            list draggable templates
  events                               list placed events
  state                                show the open form, if any
  drop <template id|label> <date> [all-day]
                                       drag a template onto a slot
  click <date> [all-day]               open the new-event form for a slot
  title <text>                         set the form title
  submit                               place the event from the form
  select <event id>                    ask to delete an event
  confirm                              delete the selected event
  cancel                               dismiss the open form
  close                                close any form
  help                                 show this message
  quit                                 leave

Dates: 2024-05-01, 2024-05-01T10:00, or 2024-05-01T10:00:00Z";

/// One line of REPL input.
#[derive(Debug, PartialEq)]
pub enum ReplCommand {
    Templates,
    Events,
    State,
    Help,
    Quit,
    Act(Interaction),
}

pub fn run(mut session: Session) -> Result<()> {
    println!("{}", "dragcal: type `help` for commands".dimmed());

    // Piped input is read line by line; a terminal gets dialoguer prompts.
    let mut piped = (!std::io::stdin().is_terminal()).then(|| std::io::stdin().lock().lines());

    loop {
        let line = match piped.as_mut() {
            Some(lines) => match lines.next() {
                Some(line) => line?,
                None => break,
            },
            None => Input::<String>::new()
                .with_prompt(prompt(session.staging()))
                .allow_empty(true)
                .interact_text()?,
        };

        let command = match parse_line(&line, session.template_registry()) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(e) => {
                eprintln!("  {}", e.to_string().red());
                continue;
            }
        };

        match command {
            ReplCommand::Quit => break,
            ReplCommand::Help => println!("{}", HELP),
            ReplCommand::Templates => println!("{}", render_templates(session.templates())),
            ReplCommand::Events => println!("{}", render_calendar(session.events())),
            ReplCommand::State => println!("  {}", session.staging().render()),
            ReplCommand::Act(interaction) => {
                if let Err(e) = act(&mut session, interaction) {
                    eprintln!("  {}", e.to_string().red());
                }
            }
        }
    }

    Ok(())
}

fn prompt(staging: &Staging) -> String {
    match staging {
        Staging::Closed => "dragcal".to_string(),
        Staging::CreateOpen { .. } => "dragcal (new event)".to_string(),
        Staging::DeleteOpen {
            pending_id: Some(id),
        } => format!("dragcal (delete #{})", id),
        Staging::DeleteOpen { pending_id: None } => "dragcal (delete)".to_string(),
    }
}

/// Apply one interaction and report what changed.
fn act(session: &mut Session, interaction: Interaction) -> Result<()> {
    match interaction {
        Interaction::Drop(raw) => {
            let event = session.on_drop(raw.try_into()?)?;
            println!("  {} {}", "Placed:".green(), event.render());
        }
        Interaction::Submit => {
            let event = session.submit()?;
            println!("  {} {}", "Placed:".green(), event.render());
        }
        Interaction::Confirm => {
            let outcome = session.confirm_deletion()?;
            println!("  {}", outcome.render());
        }
        other => {
            session.apply(other)?;
            if !session.staging().is_closed() {
                println!("  {}", session.staging().render());
            }
        }
    }
    Ok(())
}

/// Parse a REPL line. Blank lines yield `None`.
pub fn parse_line(line: &str, templates: &TemplateRegistry) -> Result<Option<ReplCommand>> {
    let line = line.trim();
    let Some((verb, rest)) = split_verb(line) else {
        return Ok(None);
    };

    let command = match verb {
        "templates" => ReplCommand::Templates,
        "events" => ReplCommand::Events,
        "state" => ReplCommand::State,
        "help" | "?" => ReplCommand::Help,
        "quit" | "exit" => ReplCommand::Quit,
        "submit" => ReplCommand::Act(Interaction::Submit),
        "confirm" => ReplCommand::Act(Interaction::Confirm),
        "cancel" => ReplCommand::Act(Interaction::Cancel),
        "close" => ReplCommand::Act(Interaction::Close),
        "title" => ReplCommand::Act(Interaction::SetTitle {
            title: rest.to_string(),
        }),
        "select" => {
            if rest.is_empty() {
                bail!("Usage: select <event id>");
            }
            ReplCommand::Act(Interaction::EventClick(RawEventClick {
                id: Some(rest.into()),
            }))
        }
        "click" => {
            let (date, all_day) = parse_slot(rest)?;
            ReplCommand::Act(Interaction::SlotClick(RawSlotClick {
                date: Some(RawDate::Text(date.to_string())),
                all_day: Some(all_day),
            }))
        }
        "drop" => {
            let mut words: Vec<&str> = rest.split_whitespace().collect();
            let all_day = words.last() == Some(&"all-day");
            if all_day {
                words.pop();
            }
            let date = words
                .pop()
                .ok_or_else(|| anyhow!("Usage: drop <template id|label> <date> [all-day]"))?;
            if words.is_empty() {
                bail!("Usage: drop <template id|label> <date> [all-day]");
            }
            let label = resolve_template(&words.join(" "), templates)?;

            ReplCommand::Act(Interaction::Drop(RawDrop {
                date: Some(RawDate::Text(date.to_string())),
                all_day: Some(all_day),
                dragged_label: Some(label),
            }))
        }
        other => bail!("Unknown command '{}'. Type `help` for commands.", other),
    };

    Ok(Some(command))
}

fn split_verb(line: &str) -> Option<(&str, &str)> {
    if line.is_empty() {
        return None;
    }
    match line.split_once(char::is_whitespace) {
        Some((verb, rest)) => Some((verb, rest.trim())),
        None => Some((line, "")),
    }
}

fn parse_slot(rest: &str) -> Result<(&str, bool)> {
    let mut words = rest.split_whitespace();
    let date = words.next().ok_or_else(|| anyhow!("Usage: click <date> [all-day]"))?;
    let all_day = match words.next() {
        None => false,
        Some("all-day") => true,
        Some(other) => bail!("Unexpected '{}'. Usage: click <date> [all-day]", other),
    };
    Ok((date, all_day))
}

/// Find the label to drop: by template id first, then by exact label.
fn resolve_template(name: &str, templates: &TemplateRegistry) -> Result<String> {
    let by_id = Identifier::parse(name).ok().and_then(|id| templates.get(id));

    by_id
        .or_else(|| templates.find_by_label(name))
        .map(|t| t.label.clone())
        .ok_or_else(|| {
            let available: Vec<_> = templates.list().iter().map(|t| t.label.as_str()).collect();
            anyhow!(
                "Template '{}' not found. Available: {}",
                name,
                available.join(", ")
            )
        })
}
