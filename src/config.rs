//! Configuration file handling.
//!
//! Reads from `~/.config/qrcraft/qrcraft.toml`

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::color::parse_color;
use crate::compose::Texture;
use crate::helper::{RenderOptions, DEFAULT_FILE_NAME};
use crate::session::Style;
use crate::symbol::QrCodeEcc;

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Width and height of the generated image in pixels.
    #[serde(default = "default_size")]
    pub size: u32,
    /// Color of the dark modules.
    #[serde(default = "default_dark_color")]
    pub dark_color: String,
    /// Color of the light modules; `transparent` is allowed.
    #[serde(default = "default_light_color")]
    pub light_color: String,
    /// One of `low`, `medium`, `quartile`, `high`.
    #[serde(default = "default_error_correction")]
    pub error_correction: String,
    /// Light border around the code, in modules.
    #[serde(default = "default_quiet_zone")]
    pub quiet_zone: u32,
    /// Preview backdrop: `none`, `dots`, `square` or `star`.
    #[serde(default = "default_texture")]
    pub texture: String,
    /// Directory downloads are written to.
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
    #[serde(default = "default_file_name")]
    pub file_name: String,
}

fn default_size() -> u32 {
    256
}

fn default_dark_color() -> String {
    "#1a56db".to_string()
}

fn default_light_color() -> String {
    "transparent".to_string()
}

fn default_error_correction() -> String {
    "high".to_string()
}

fn default_quiet_zone() -> u32 {
    4
}

fn default_texture() -> String {
    "none".to_string()
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("generated")
}

fn default_file_name() -> String {
    DEFAULT_FILE_NAME.to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            size: default_size(),
            dark_color: default_dark_color(),
            light_color: default_light_color(),
            error_correction: default_error_correction(),
            quiet_zone: default_quiet_zone(),
            texture: default_texture(),
            output_dir: default_output_dir(),
            file_name: default_file_name(),
        }
    }
}

impl Config {
    /// Load configuration from the config file.
    ///
    /// If `custom_path` is provided, load from that path.
    /// Otherwise, load from the default XDG config location.
    /// Creates a default config file if it doesn't exist (only for default path).
    pub fn load(custom_path: Option<PathBuf>) -> Result<Self> {
        match custom_path {
            Some(path) => {
                if !path.exists() {
                    anyhow::bail!("Config file not found: {}", path.display());
                }
                Self::load_from(&path)
            }
            None => {
                let path = Self::config_path()?;
                if !path.exists() {
                    let config = Config::default();
                    config.save_to(&path)?;
                    tracing::info!("Created default config: {}", path.display());
                    return Ok(config);
                }
                Self::load_from(&path)
            }
        }
    }

    /// Load configuration from an existing file.
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        tracing::info!("Loaded config from {}: {:?}", path.display(), config);
        Ok(config)
    }

    /// Save configuration to `path`, creating parent directories.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create config directory: {}", parent.display()))?;
        }

        let contents = toml::to_string_pretty(self).context("Failed to serialize config")?;

        std::fs::write(path, contents)
            .with_context(|| format!("Failed to write config file: {}", path.display()))
    }

    /// Resolve the textual settings into a render style.
    pub fn style(&self) -> Result<Style> {
        let render = RenderOptions {
            size: self.size,
            dark: parse_color(&self.dark_color).context("Invalid dark_color")?,
            light: parse_color(&self.light_color).context("Invalid light_color")?,
            ecc: self
                .error_correction
                .parse::<QrCodeEcc>()
                .context("Invalid error_correction")?,
            quiet_zone: self.quiet_zone,
        };
        let texture = self.texture.parse::<Texture>().context("Invalid texture")?;
        Ok(Style { render, texture })
    }

    /// Get the path to the config file.
    fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir().context("Could not determine config directory")?;

        Ok(config_dir.join("qrcraft").join("qrcraft.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::{DEFAULT_DARK, TRANSPARENT};

    #[test]
    fn test_default_style_matches_render_defaults() {
        let style = Config::default().style().unwrap();
        assert_eq!(style.render, RenderOptions::default());
        assert_eq!(style.render.dark, DEFAULT_DARK);
        assert_eq!(style.render.light, TRANSPARENT);
        assert_eq!(style.texture, Texture::None);
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("qrcraft.toml");
        std::fs::write(&path, "size = 512\ntexture = \"star\"\n").unwrap();

        let config = Config::load(Some(path)).unwrap();
        assert_eq!(config.size, 512);
        assert_eq!(config.file_name, "qrcode.png");
        assert_eq!(config.style().unwrap().texture, Texture::Star);
    }

    #[test]
    fn test_save_and_reload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("qrcraft.toml");
        let config = Config {
            dark_color: "#000".to_string(),
            error_correction: "medium".to_string(),
            ..Config::default()
        };
        config.save_to(&path).unwrap();
        assert_eq!(Config::load_from(&path).unwrap(), config);
    }

    #[test]
    fn test_missing_custom_path_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(Config::load(Some(dir.path().join("nope.toml"))).is_err());
    }

    #[test]
    fn test_invalid_values_are_reported() {
        let config = Config {
            dark_color: "blue".to_string(),
            ..Config::default()
        };
        assert!(config.style().is_err());

        let config = Config {
            texture: "plaid".to_string(),
            ..Config::default()
        };
        assert!(config.style().is_err());
    }
}
