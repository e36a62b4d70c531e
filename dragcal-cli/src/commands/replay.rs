use std::path::Path;

use anyhow::{Context, Result};
use dragcal_core::{Interaction, Session};

use crate::render::{render_calendar, render_templates};

/// Apply a JSON-lines script of interactions, then print the result.
///
/// Blank lines and lines starting with `#` are skipped. The first failing
/// line aborts the replay.
pub fn run(mut session: Session, path: &Path, json: bool) -> Result<()> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;

    let applied = apply_script(&mut session, &content)?;
    tracing::debug!(applied, "replay finished");

    if json {
        println!("{}", serde_json::to_string_pretty(&session.view())?);
    } else {
        println!("{}", render_calendar(session.events()));
        println!();
        println!("Templates:");
        println!("{}", render_templates(session.templates()));
    }

    Ok(())
}

/// Returns how many interactions were applied.
pub fn apply_script(session: &mut Session, content: &str) -> Result<usize> {
    let mut applied = 0;

    for (i, line) in content.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let interaction: Interaction = serde_json::from_str(line)
            .with_context(|| format!("Line {}: not a valid interaction", i + 1))?;
        session
            .apply(interaction)
            .with_context(|| format!("Line {}", i + 1))?;
        applied += 1;
    }

    Ok(applied)
}
