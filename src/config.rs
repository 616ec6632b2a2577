//! Tool configuration.
//!
//! Handles loading, validating, and merging `site-rebrand.toml`. Stock
//! defaults are the base layer; a user file overrides only the keys it sets.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! [paths]
//! upload_dir = "uploads"     # Where banner/logo files are looked up
//! output_dir = "generated"   # Where archives (and staging dirs) are created
//!
//! [images]
//! max_size = [800, 800]      # Bounding box for optimized images
//! quality = 85               # JPEG quality (1-100)
//! require_image = false      # Fail when neither banner nor logo is given
//!
//! [fetch]
//! timeout_secs = 10
//!
//! [enhance]
//! enabled = false
//! base_url = "https://openrouter.ai/api/v1"
//! model = "meta-llama/llama-3.1-8b-instruct:free"
//! api_key_env = "OPENROUTER_API_KEY"
//! max_tokens = 500
//! timeout_secs = 30
//!
//! [pages]
//! construction_template = ""  # Replacement for the built-in construction page
//! submit_template = ""        # Replacement for the built-in submit page
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Default config file name, looked up in the working directory.
pub const CONFIG_FILE: &str = "site-rebrand.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Tool configuration loaded from `site-rebrand.toml`.
///
/// All fields have defaults. User config files need only specify the values
/// they want to override. Unknown keys are rejected.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RebrandConfig {
    /// Input and output locations.
    pub paths: PathsConfig,
    /// Image optimization settings.
    pub images: ImagesConfig,
    /// Source document retrieval.
    pub fetch: FetchConfig,
    /// Optional text enhancement for section pages.
    pub enhance: EnhanceConfig,
    /// Placeholder page overrides.
    pub pages: PagesConfig,
}

impl RebrandConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.images.quality == 0 || self.images.quality > 100 {
            return Err(ConfigError::Validation(
                "images.quality must be 1-100".into(),
            ));
        }
        if self.images.max_size[0] == 0 || self.images.max_size[1] == 0 {
            return Err(ConfigError::Validation(
                "images.max_size values must be non-zero".into(),
            ));
        }
        if self.fetch.timeout_secs == 0 {
            return Err(ConfigError::Validation(
                "fetch.timeout_secs must be non-zero".into(),
            ));
        }
        if self.enhance.enabled {
            if self.enhance.base_url.trim().is_empty() {
                return Err(ConfigError::Validation(
                    "enhance.base_url must be set when enhance.enabled = true".into(),
                ));
            }
            if self.enhance.model.trim().is_empty() {
                return Err(ConfigError::Validation(
                    "enhance.model must be set when enhance.enabled = true".into(),
                ));
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PathsConfig {
    /// Directory holding uploaded banner/logo files.
    pub upload_dir: PathBuf,
    /// Directory receiving archives. Staging directories live here too, so
    /// the final rename never crosses filesystems.
    pub output_dir: PathBuf,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            upload_dir: PathBuf::from("uploads"),
            output_dir: PathBuf::from("generated"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ImagesConfig {
    /// Bounding box `[width, height]` for optimized images.
    pub max_size: [u32; 2],
    /// JPEG encoding quality (1 = worst, 100 = best).
    pub quality: u32,
    /// Reject runs that supply neither a banner nor a logo.
    pub require_image: bool,
}

impl Default for ImagesConfig {
    fn default() -> Self {
        Self {
            max_size: [800, 800],
            quality: 85,
            require_image: false,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FetchConfig {
    /// Request timeout for HTTP sources.
    pub timeout_secs: u64,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self { timeout_secs: 10 }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EnhanceConfig {
    /// When false, section text is used verbatim.
    pub enabled: bool,
    /// Base URL of an OpenAI-compatible API (`/chat/completions` is appended).
    pub base_url: String,
    pub model: String,
    /// Name of the environment variable holding the API key.
    pub api_key_env: String,
    pub max_tokens: u32,
    pub timeout_secs: u64,
}

impl Default for EnhanceConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            base_url: "https://openrouter.ai/api/v1".to_string(),
            model: "meta-llama/llama-3.1-8b-instruct:free".to_string(),
            api_key_env: "OPENROUTER_API_KEY".to_string(),
            max_tokens: 500,
            timeout_secs: 30,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PagesConfig {
    /// HTML file replacing the built-in "under construction" page. Empty
    /// means built-in.
    pub construction_template: String,
    /// HTML file replacing the built-in root submission page.
    pub submit_template: String,
}

impl PagesConfig {
    pub fn construction_path(&self) -> Option<&Path> {
        non_empty_path(&self.construction_template)
    }

    pub fn submit_path(&self) -> Option<&Path> {
        non_empty_path(&self.submit_template)
    }
}

fn non_empty_path(value: &str) -> Option<&Path> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| Path::new(trimmed))
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
pub fn stock_defaults_value() -> Result<toml::Value, ConfigError> {
    toml::Value::try_from(RebrandConfig::default())
        .map_err(|e| ConfigError::Validation(format!("default config must serialize: {e}")))
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay replace base values entirely.
/// - Keys in base that are not in overlay are preserved.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Merge an optional overlay onto the stock defaults, then deserialize and
/// validate.
pub fn resolve_config(overlay: Option<toml::Value>) -> Result<RebrandConfig, ConfigError> {
    let base = stock_defaults_value()?;
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: RebrandConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load config from an explicit file, or from `site-rebrand.toml` in the
/// working directory when it exists.
///
/// An explicit path that does not exist is an error; a missing default file
/// just means stock defaults.
pub fn load_config(explicit: Option<&Path>) -> Result<RebrandConfig, ConfigError> {
    let overlay = match explicit {
        Some(path) => Some(read_toml(path)?),
        None => {
            let default_path = Path::new(CONFIG_FILE);
            if default_path.exists() {
                Some(read_toml(default_path)?)
            } else {
                None
            }
        }
    };
    resolve_config(overlay)
}

fn read_toml(path: &Path) -> Result<toml::Value, ConfigError> {
    let content = fs::read_to_string(path)?;
    Ok(toml::from_str(&content)?)
}

/// Returns a fully-commented stock `site-rebrand.toml`.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# site-rebrand configuration
# ==========================
# Every key is optional; the values below are the built-in defaults.

[paths]
# Directory holding the uploaded banner/logo files named on the command line.
upload_dir = "uploads"
# Directory receiving website_<id>.zip archives. Staging directories are
# created (and removed) here as well.
output_dir = "generated"

[images]
# Uploaded raster images are downscaled to fit this box. Never upscaled.
max_size = [800, 800]
# JPEG quality, 1-100.
quality = 85
# When true, a run without banner and logo is rejected.
require_image = false

[fetch]
# Timeout for http(s) sources, in seconds.
timeout_secs = 10

[enhance]
# Rewrite section text through an OpenAI-compatible chat API before
# rendering. Failures fall back to the original text.
enabled = false
base_url = "https://openrouter.ai/api/v1"
model = "meta-llama/llama-3.1-8b-instruct:free"
# Environment variable holding the API key.
api_key_env = "OPENROUTER_API_KEY"
max_tokens = 500
timeout_secs = 30

[pages]
# Optional HTML files replacing the built-in placeholder pages.
construction_template = ""
submit_template = ""
"##
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn default_config_values() {
        let config = RebrandConfig::default();
        assert_eq!(config.paths.upload_dir, PathBuf::from("uploads"));
        assert_eq!(config.paths.output_dir, PathBuf::from("generated"));
        assert_eq!(config.images.max_size, [800, 800]);
        assert_eq!(config.images.quality, 85);
        assert!(!config.images.require_image);
        assert_eq!(config.fetch.timeout_secs, 10);
        assert!(!config.enhance.enabled);
        assert!(config.pages.construction_path().is_none());
    }

    #[test]
    fn stock_toml_matches_defaults() {
        let parsed: RebrandConfig = toml::from_str(stock_config_toml()).unwrap();
        let defaults = RebrandConfig::default();
        assert_eq!(parsed.images.max_size, defaults.images.max_size);
        assert_eq!(parsed.images.quality, defaults.images.quality);
        assert_eq!(parsed.enhance.model, defaults.enhance.model);
        assert_eq!(parsed.paths.output_dir, defaults.paths.output_dir);
    }

    #[test]
    fn partial_override_keeps_other_defaults() {
        let overlay: toml::Value = toml::from_str(
            r#"
            [images]
            quality = 70
            "#,
        )
        .unwrap();
        let config = resolve_config(Some(overlay)).unwrap();
        assert_eq!(config.images.quality, 70);
        assert_eq!(config.images.max_size, [800, 800]);
        assert_eq!(config.fetch.timeout_secs, 10);
    }

    #[test]
    fn unknown_keys_rejected() {
        let overlay: toml::Value = toml::from_str(
            r#"
            [images]
            qualty = 70
            "#,
        )
        .unwrap();
        assert!(matches!(
            resolve_config(Some(overlay)),
            Err(ConfigError::Toml(_))
        ));
    }

    #[test]
    fn validation_rejects_zero_quality() {
        let mut config = RebrandConfig::default();
        config.images.quality = 0;
        assert!(matches!(config.validate(), Err(ConfigError::Validation(_))));
    }

    #[test]
    fn validation_rejects_zero_box() {
        let mut config = RebrandConfig::default();
        config.images.max_size = [0, 800];
        assert!(config.validate().is_err());
    }

    #[test]
    fn validation_requires_model_when_enhancing() {
        let mut config = RebrandConfig::default();
        config.enhance.enabled = true;
        config.enhance.model = " ".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn merge_toml_nested_tables() {
        let base: toml::Value = toml::from_str("[a]\nx = 1\ny = 2").unwrap();
        let overlay: toml::Value = toml::from_str("[a]\ny = 3\n[b]\nz = 4").unwrap();
        let merged = merge_toml(base, overlay);
        assert_eq!(merged["a"]["x"].as_integer(), Some(1));
        assert_eq!(merged["a"]["y"].as_integer(), Some(3));
        assert_eq!(merged["b"]["z"].as_integer(), Some(4));
    }

    #[test]
    fn load_explicit_file() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("custom.toml");
        fs::write(
            &path,
            "[paths]\noutput_dir = \"out\"\n[pages]\nsubmit_template = \"my-submit.html\"\n",
        )
        .unwrap();
        let config = load_config(Some(&path)).unwrap();
        assert_eq!(config.paths.output_dir, PathBuf::from("out"));
        assert_eq!(
            config.pages.submit_path(),
            Some(Path::new("my-submit.html"))
        );
    }

    #[test]
    fn load_explicit_missing_file_errors() {
        let tmp = TempDir::new().unwrap();
        let result = load_config(Some(&tmp.path().join("missing.toml")));
        assert!(matches!(result, Err(ConfigError::Io(_))));
    }
}
