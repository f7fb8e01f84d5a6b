//! Settings parser for .tracelens/config.toml
//!
//! The config directory sits next to the trace file being inspected. Missing
//! or unparsable files fall back to defaults.

use serde::{Deserialize, Serialize};
use std::path::Path;
use tracelens_core::prelude::*;

const CONFIG_FILENAME: &str = "config.toml";
const TRACELENS_DIR: &str = ".tracelens";

/// Application settings (.tracelens/config.toml)
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct Settings {
    #[serde(default)]
    pub ui: UiSettings,

    #[serde(default)]
    pub behavior: BehaviorSettings,
}

/// Display settings
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct UiSettings {
    /// Width of the key column in key/value lists
    #[serde(default = "default_label_width")]
    pub label_width: u16,

    /// Show the planning timeline section
    #[serde(default = "default_true")]
    pub show_timeline: bool,

    /// Width of the task list pane
    #[serde(default = "default_task_list_width")]
    pub task_list_width: u16,
}

impl Default for UiSettings {
    fn default() -> Self {
        Self {
            label_width: default_label_width(),
            show_timeline: true,
            task_list_width: default_task_list_width(),
        }
    }
}

/// Startup behavior
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct BehaviorSettings {
    /// Task selected when the trace opens
    #[serde(default)]
    pub initial_task: usize,
}

fn default_true() -> bool {
    true
}

fn default_label_width() -> u16 {
    10
}

fn default_task_list_width() -> u16 {
    36
}

impl Settings {
    /// Reject values the layout cannot honour.
    pub fn validate(&self) -> Result<()> {
        if self.ui.label_width == 0 {
            return Err(Error::config_invalid("ui.label_width must be at least 1"));
        }
        if self.ui.task_list_width < 10 {
            return Err(Error::config_invalid(
                "ui.task_list_width must be at least 10",
            ));
        }
        Ok(())
    }
}

/// Load settings from `<base_dir>/.tracelens/config.toml`.
pub fn load_settings(base_dir: &Path) -> Settings {
    let config_path = base_dir.join(TRACELENS_DIR).join(CONFIG_FILENAME);

    if !config_path.exists() {
        debug!("No config file at {:?}, using defaults", config_path);
        return Settings::default();
    }

    let settings: Settings = match std::fs::read_to_string(&config_path) {
        Ok(content) => match toml::from_str(&content) {
            Ok(settings) => {
                debug!("Loaded settings from {:?}", config_path);
                settings
            }
            Err(e) => {
                warn!("Failed to parse {:?}: {}", config_path, e);
                return Settings::default();
            }
        },
        Err(e) => {
            warn!("Failed to read {:?}: {}", config_path, e);
            return Settings::default();
        }
    };

    match settings.validate() {
        Ok(()) => settings,
        Err(e) => {
            warn!("Ignoring {:?}: {}", config_path, e);
            Settings::default()
        }
    }
}

/// Create a commented default config in `.tracelens/`.
pub fn init_config_dir(base_dir: &Path) -> Result<()> {
    let dir = base_dir.join(TRACELENS_DIR);

    if !dir.exists() {
        std::fs::create_dir_all(&dir)
            .map_err(|e| Error::config(format!("Failed to create .tracelens dir: {}", e)))?;
    }

    let config_path = dir.join(CONFIG_FILENAME);
    if !config_path.exists() {
        let default_content = r#"# trace-lens configuration

[ui]
label_width = 10        # Key column width in key/value lists
show_timeline = true    # Show the planning timeline section
task_list_width = 36    # Width of the task list pane

[behavior]
initial_task = 0        # Task selected when a trace opens
"#;
        std::fs::write(&config_path, default_content)
            .map_err(|e| Error::config(format!("Failed to write config.toml: {}", e)))?;
        info!("Created default config at {:?}", config_path);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn write_config(base: &Path, content: &str) {
        let dir = base.join(TRACELENS_DIR);
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join(CONFIG_FILENAME), content).unwrap();
    }

    #[test]
    fn test_missing_config_uses_defaults() {
        let dir = tempdir().unwrap();
        let settings = load_settings(dir.path());
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.ui.label_width, 10);
        assert!(settings.ui.show_timeline);
    }

    #[test]
    fn test_partial_config_fills_defaults() {
        let dir = tempdir().unwrap();
        write_config(dir.path(), "[ui]\nlabel_width = 14\n");
        let settings = load_settings(dir.path());
        assert_eq!(settings.ui.label_width, 14);
        assert_eq!(settings.ui.task_list_width, 36);
        assert_eq!(settings.behavior.initial_task, 0);
    }

    #[test]
    fn test_invalid_toml_falls_back() {
        let dir = tempdir().unwrap();
        write_config(dir.path(), "[ui\nlabel_width = ");
        assert_eq!(load_settings(dir.path()), Settings::default());
    }

    #[test]
    fn test_invalid_values_fall_back() {
        let dir = tempdir().unwrap();
        write_config(dir.path(), "[ui]\nlabel_width = 0\n");
        assert_eq!(load_settings(dir.path()), Settings::default());
    }

    #[test]
    fn test_init_config_dir_round_trips() {
        let dir = tempdir().unwrap();
        init_config_dir(dir.path()).unwrap();
        assert!(dir.path().join(".tracelens/config.toml").exists());
        assert_eq!(load_settings(dir.path()), Settings::default());
    }

    #[test]
    fn test_init_config_dir_keeps_existing_file() {
        let dir = tempdir().unwrap();
        write_config(dir.path(), "[behavior]\ninitial_task = 3\n");
        init_config_dir(dir.path()).unwrap();
        assert_eq!(load_settings(dir.path()).behavior.initial_task, 3);
    }
}
