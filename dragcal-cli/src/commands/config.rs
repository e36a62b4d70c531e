use anyhow::Result;
use dragcal_core::DragCalConfig;
use owo_colors::OwoColorize;

use crate::render::render_templates;

/// Print where the config lives (creating a commented default if absent)
/// and what it resolves to.
pub fn run() -> Result<()> {
    let path = DragCalConfig::config_path()?;

    if !path.exists() {
        DragCalConfig::create_default_config(&path)?;
        println!("{}", format!("Created {}", path.display()).green());
    } else {
        println!("{}", path.display());
    }

    let config = DragCalConfig::load()?;
    println!();
    println!("  port:        {}", config.port);
    println!("  id_strategy: {:?}", config.id_strategy);
    println!("  templates:");
    println!("{}", render_templates(&config.templates));

    Ok(())
}
