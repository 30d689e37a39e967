///
/// # Configuration
///
/// Manager settings live in a `mathink.toml` file. Every field is optional;
/// missing fields take their defaults.
///
/// ```toml
/// [manager]
/// line_width = 3.0
/// ```
///
/// `init_config` writes that file with every field at its default.
///

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::errors::InkError;
use crate::path::DEFAULT_LINE_WIDTH;

pub const CONFIG_FILE_NAME: &str = "mathink.toml";

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub manager: ManagerConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
pub struct ManagerConfig {
    /// Stroke width; also pads every dirty rect the manager reports
    #[serde(default = "default_line_width")]
    pub line_width: f64,
}

impl Default for ManagerConfig {
    fn default() -> Self {
        Self {
            line_width: DEFAULT_LINE_WIDTH,
        }
    }
}

fn default_line_width() -> f64 {
    DEFAULT_LINE_WIDTH
}

impl Config {
    pub fn validate(&self) -> Result<(), InkError> {
        let width = self.manager.line_width;
        if !width.is_finite() || width <= 0.0 {
            return Err(InkError::InvalidConfig(format!(
                "line_width must be a positive number, got {}",
                width
            )));
        }
        Ok(())
    }
}

pub fn load_config(path: &Path) -> Result<Config, InkError> {
    let content = std::fs::read_to_string(path).map_err(|e| InkError::ReadFailed {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    parse_config_str(&content)
}

pub fn parse_config_str(content: &str) -> Result<Config, InkError> {
    let config: Config =
        toml::from_str(content).map_err(|e| InkError::InvalidConfig(e.to_string()))?;
    config.validate()?;
    Ok(config)
}

pub fn default_config() -> String {
    format!(
        r#"[manager]
line_width = {:.1}
"#,
        DEFAULT_LINE_WIDTH
    )
}

pub fn init_config(dir: &Path) -> Result<PathBuf, InkError> {
    let write_failed = |path: &Path, e: std::io::Error| InkError::WriteFailed {
        path: path.to_path_buf(),
        reason: e.to_string(),
    };

    std::fs::create_dir_all(dir).map_err(|e| write_failed(dir, e))?;

    let config_path = dir.join(CONFIG_FILE_NAME);
    if config_path.exists() {
        return Err(InkError::InvalidConfig(format!(
            "Config already exists at {}",
            config_path.display()
        )));
    }

    std::fs::write(&config_path, default_config()).map_err(|e| write_failed(&config_path, e))?;
    Ok(config_path)
}
