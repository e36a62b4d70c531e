//! dragcal configuration.

use std::path::{Path, PathBuf};

use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};

use crate::error::{DragCalError, DragCalResult};
use crate::identifier::IdStrategy;
use crate::template::{EventTemplate, default_templates};

pub const DEFAULT_PORT: u16 = 4096;

fn default_port() -> u16 {
    DEFAULT_PORT
}

/// Configuration at ~/.config/dragcal/config.toml
///
/// Every field is optional; `DRAGCAL_*` environment variables override the
/// file (e.g. `DRAGCAL_PORT=5000`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DragCalConfig {
    /// Port for dragcal-server (always bound to 127.0.0.1).
    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default)]
    pub id_strategy: IdStrategy,

    /// Templates offered for dragging when a session starts.
    #[serde(default = "default_templates")]
    pub templates: Vec<EventTemplate>,
}

impl Default for DragCalConfig {
    fn default() -> Self {
        DragCalConfig {
            port: DEFAULT_PORT,
            id_strategy: IdStrategy::default(),
            templates: default_templates(),
        }
    }
}

impl DragCalConfig {
    pub fn config_path() -> DragCalResult<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| DragCalError::Config("Could not determine config directory".into()))?
            .join("dragcal");

        Ok(config_dir.join("config.toml"))
    }

    /// Load from the default path plus environment overrides.
    /// A missing file yields defaults.
    pub fn load() -> DragCalResult<Self> {
        let path = Self::config_path()?;
        Self::build(&path, true)
    }

    /// Load from a specific file, ignoring the environment.
    pub fn load_from(path: &Path) -> DragCalResult<Self> {
        Self::build(path, false)
    }

    fn build(path: &Path, with_env: bool) -> DragCalResult<Self> {
        let mut builder = Config::builder().add_source(File::from(path).required(false));

        if with_env {
            builder = builder.add_source(Environment::with_prefix("DRAGCAL").try_parsing(true));
        }

        builder
            .build()
            .map_err(|e| DragCalError::Config(e.to_string()))?
            .try_deserialize()
            .map_err(|e| DragCalError::Config(e.to_string()))
    }

    pub fn save(&self, path: &Path) -> DragCalResult<()> {
        let content =
            toml::to_string_pretty(self).map_err(|e| DragCalError::Config(e.to_string()))?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        std::fs::write(path, content)
            .map_err(|e| DragCalError::Config(format!("Could not write config file: {e}")))?;

        Ok(())
    }

    /// Create a default config file with all options commented out.
    pub fn create_default_config(path: &Path) -> DragCalResult<()> {
        let contents = format!(
            "\
# dragcal configuration

# Port for dragcal-server:
# port = {}

# How event ids are minted: \"wall-clock\" (milliseconds, may collide within
# the same millisecond) or \"monotonic\" (never repeats):
# id_strategy = \"wall-clock\"

# Templates available for dragging (defaults to \"event 1\" .. \"event 5\"):
# [[templates]]
# label = \"Standup\"
# id = \"1\"
",
            DEFAULT_PORT
        );

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                DragCalError::Config(format!("Could not create config directory: {e}"))
            })?;
        }

        std::fs::write(path, contents)
            .map_err(|e| DragCalError::Config(format!("Could not write config file: {e}")))?;

        Ok(())
    }
}
