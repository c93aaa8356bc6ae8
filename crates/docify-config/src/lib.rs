//! Render configuration for Docify.
//!
//! Parses `docify.toml` configuration files with serde and provides
//! auto-discovery of config files in parent directories.
//!
//! Every section is optional:
//!
//! ```toml
//! [html]
//! title = "Docify Document"
//!
//! [trailer]
//! enabled = true
//! generator = "Docify"
//! url = "https://github.com/rapidstack/Docify"
//! ```

use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "docify.toml";

/// Render configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// HTML page settings.
    pub html: HtmlConfig,
    /// Generated-by trailer settings.
    pub trailer: TrailerConfig,

    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

/// HTML page configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct HtmlConfig {
    /// Contents of the `<title>` element.
    pub title: String,
}

impl Default for HtmlConfig {
    fn default() -> Self {
        Self {
            title: "Docify Document".to_owned(),
        }
    }
}

/// Trailer configuration.
///
/// The trailer is a horizontal rule followed by a footer crediting the
/// generator, appended to the document copy before rendering.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct TrailerConfig {
    /// Whether the trailer is appended.
    pub enabled: bool,
    /// Link text of the credit line.
    pub generator: String,
    /// Link target of the credit line.
    pub url: String,
}

impl Default for TrailerConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            generator: "Docify".to_owned(),
            url: "https://github.com/rapidstack/Docify".to_owned(),
        }
    }
}

impl TrailerConfig {
    /// Trailer configuration with the trailer switched off.
    #[must_use]
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            ..Self::default()
        }
    }
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
}

/// Require a string field to be non-empty.
fn require_non_empty(value: &str, field: &str) -> Result<(), ConfigError> {
    if value.trim().is_empty() {
        return Err(ConfigError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

/// Require a URL field to use http:// or https:// scheme.
fn require_http_url(url: &str, field: &str) -> Result<(), ConfigError> {
    if !url.starts_with("http://") && !url.starts_with("https://") {
        return Err(ConfigError::Validation(format!(
            "{field} must start with http:// or https://"
        )));
    }
    Ok(())
}

impl Config {
    /// Configuration without the generated-by trailer.
    #[must_use]
    pub fn without_trailer() -> Self {
        Self {
            trailer: TrailerConfig::disabled(),
            ..Self::default()
        }
    }

    /// Load configuration from file.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `docify.toml` in current directory and parents,
    /// falling back to defaults when none is found.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist, parsing fails
    /// or the loaded values are invalid.
    pub fn load(config_path: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            return Self::load_from_file(path);
        }

        let discovered = std::env::current_dir()
            .ok()
            .and_then(|cwd| Self::discover_from(&cwd));
        match discovered {
            Some(path) => Self::load_from_file(&path),
            None => Ok(Self::default()),
        }
    }

    /// Parse and validate configuration from a TOML string.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// Called automatically after loading from file.
    pub fn validate(&self) -> Result<(), ConfigError> {
        require_non_empty(&self.html.title, "html.title")?;

        // Generator and URL only matter when the trailer is rendered
        if self.trailer.enabled {
            require_non_empty(&self.trailer.generator, "trailer.generator")?;
            require_http_url(&self.trailer.url, "trailer.url")?;
        }

        Ok(())
    }

    /// Search for config file in `start` and its parents.
    fn discover_from(start: &Path) -> Option<PathBuf> {
        let mut current = start.to_path_buf();
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.exists() {
                tracing::debug!(path = %candidate.display(), "Discovered configuration file");
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config = Self::from_toml_str(&content)?;
        config.config_path = Some(path.to_path_buf());
        tracing::debug!(path = %path.display(), "Loaded configuration");
        Ok(config)
    }
}
