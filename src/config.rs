use serde::Deserialize;
use std::path::PathBuf;
use directories::ProjectDirs;
use anyhow::Result;
use std::fs;

#[derive(Deserialize, Debug, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub targets: TargetConfig,
}

#[derive(Deserialize, Debug, Clone)]
pub struct GeneralConfig {
    /// Terminal emulator used for Terminal=true launchers.
    #[serde(default = "default_terminal")]
    pub terminal: String,
}

fn default_terminal() -> String {
    "gnome-terminal".to_string()
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            terminal: default_terminal(),
        }
    }
}

/// Destinations used when the command line names none.
#[derive(Deserialize, Debug, Clone)]
pub struct TargetConfig {
    #[serde(default)]
    pub desktop: bool,
    #[serde(default = "default_true")]
    pub local_apps: bool,
}

fn default_true() -> bool {
    true
}

impl Default for TargetConfig {
    fn default() -> Self {
        Self {
            desktop: false,
            local_apps: default_true(),
        }
    }
}

pub fn load_config() -> Result<Config> {
    let proj_dirs = ProjectDirs::from("org", "mklaunch", "mklaunch");
    let config_path = if let Some(dirs) = &proj_dirs {
        dirs.config_dir().join("config.toml")
    } else {
        PathBuf::from("config.toml")
    };

    if !config_path.exists() {
        return Ok(Config::default());
    }

    let content = fs::read_to_string(config_path)?;
    let config: Config = toml::from_str(&content)?;
    Ok(config)
}
