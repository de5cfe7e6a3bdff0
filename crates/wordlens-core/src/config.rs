//! Configuration management for wordlens.
//!
//! Loads configuration from ${WORDLENS_HOME}/config.toml with sensible defaults.

use std::fs;
use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::engine::EngineOptions;
use crate::text::DEFAULT_WORDS_PER_MINUTE;

/// Clipboard transport configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ClipboardConfig {
    /// Try the OSC 52 escape sequence first.
    pub osc52: bool,
    /// Fall back to the native system clipboard.
    pub system: bool,
}

impl Default for ClipboardConfig {
    fn default() -> Self {
        Self {
            osc52: true,
            system: true,
        }
    }
}

/// Transform behavior configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TransformConfig {
    /// Reverse by grapheme cluster instead of by `char`.
    pub grapheme_reverse: bool,
}

/// Returns the default config template with comments.
///
/// This is embedded from default_config.toml at compile time.
/// To update, edit default_config.toml directly.
fn default_config_template() -> &'static str {
    include_str!("../default_config.toml")
}

/// Recursively merges items from source table into target table.
fn merge_items(target: &mut toml_edit::Table, source: &toml_edit::Table) {
    use toml_edit::Item;

    for (key, value) in source.iter() {
        match value {
            Item::Value(v) => {
                target[key] = Item::Value(v.clone());
            }
            Item::Table(src_table) => {
                if let Some(Item::Table(target_table)) = target.get_mut(key) {
                    merge_items(target_table, src_table);
                } else {
                    target[key] = Item::Table(src_table.clone());
                }
            }
            Item::ArrayOfTables(src_arr) => {
                target[key] = Item::ArrayOfTables(src_arr.clone());
            }
            Item::None => {}
        }
    }
}

pub mod paths {
    //! Path resolution for wordlens configuration.
    //!
    //! WORDLENS_HOME resolution order:
    //! 1. WORDLENS_HOME environment variable (if set)
    //! 2. ~/.config/wordlens (default)
    //! 3. ./.wordlens when no home directory can be determined

    use std::path::PathBuf;

    /// Returns the wordlens home directory.
    pub fn wordlens_home() -> PathBuf {
        if let Ok(home) = std::env::var("WORDLENS_HOME") {
            return PathBuf::from(home);
        }

        dirs::home_dir().map_or_else(
            || PathBuf::from(".wordlens"),
            |h| h.join(".config").join("wordlens"),
        )
    }

    /// Returns the path to the config.toml file.
    pub fn config_path() -> PathBuf {
        wordlens_home().join("config.toml")
    }
}

/// Main configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Reading speed for the reading-time estimate
    pub words_per_minute: u32,

    /// How long the copy acknowledgment stays set, in milliseconds
    pub copy_feedback_ms: u64,

    /// Clipboard transports
    #[serde(default)]
    pub clipboard: ClipboardConfig,

    /// Transform behavior
    #[serde(default)]
    pub transform: TransformConfig,
}

impl Config {
    const DEFAULT_COPY_FEEDBACK_MS: u64 = 2000;

    /// Loads configuration from the default config path.
    pub fn load() -> Result<Self> {
        Self::load_from(&paths::config_path())
    }

    /// Loads configuration from a specific path.
    /// Returns defaults if file doesn't exist.
    pub fn load_from(path: &Path) -> Result<Self> {
        let config = if path.exists() {
            let contents = fs::read_to_string(path)
                .with_context(|| format!("Failed to read config from {}", path.display()))?;
            toml::from_str(&contents)
                .with_context(|| format!("Failed to parse config from {}", path.display()))?
        } else {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            Config::default()
        };

        config
            .validate()
            .with_context(|| format!("Invalid config at {}", path.display()))?;
        Ok(config)
    }

    /// Rejects values the engine cannot work with.
    pub fn validate(&self) -> Result<()> {
        if self.words_per_minute == 0 {
            anyhow::bail!("words_per_minute must be at least 1");
        }
        Ok(())
    }

    /// Engine tunables derived from this config.
    pub fn engine_options(&self) -> EngineOptions {
        EngineOptions {
            words_per_minute: self.words_per_minute,
            copy_feedback: Duration::from_millis(self.copy_feedback_ms),
            grapheme_reverse: self.transform.grapheme_reverse,
        }
    }

    /// Creates a default config file at the given path.
    /// Returns an error if the file already exists.
    pub fn init(path: &Path) -> Result<()> {
        if path.exists() {
            anyhow::bail!("Config file already exists at {}", path.display());
        }

        Self::write_config(path, default_config_template())
    }

    /// Generates a fresh config TOML from Rust defaults.
    ///
    /// This is used by `xtask update-default-config` to keep
    /// `default_config.toml` in sync with Rust default values.
    ///
    /// Uses the embedded template for structure/comments and merges
    /// generated values from `Config::default()` into it.
    pub fn generate() -> Result<String> {
        use toml_edit::DocumentMut;

        let config = Config::default();
        let generated_toml =
            toml::to_string(&config).context("Failed to serialize default config to TOML")?;

        // Parse template as base (preserves comments)
        let mut doc: DocumentMut = default_config_template()
            .parse()
            .context("Failed to parse default config template")?;

        let generated_doc: DocumentMut = generated_toml
            .parse()
            .context("Failed to parse generated config")?;

        merge_items(doc.as_table_mut(), generated_doc.as_table());

        Ok(doc.to_string())
    }

    /// Writes config content to a file, creating parent directories as needed.
    /// Uses atomic write (temp file + rename) to prevent corruption.
    fn write_config(path: &Path, content: &str) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory {}", parent.display()))?;
        }

        let tmp_path = path.with_extension("toml.tmp");
        fs::write(&tmp_path, content)
            .with_context(|| format!("Failed to write config to {}", tmp_path.display()))?;
        fs::rename(&tmp_path, path).with_context(|| {
            format!(
                "Failed to rename {} to {}",
                tmp_path.display(),
                path.display()
            )
        })?;

        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            words_per_minute: DEFAULT_WORDS_PER_MINUTE,
            copy_feedback_ms: Self::DEFAULT_COPY_FEEDBACK_MS,
            clipboard: ClipboardConfig::default(),
            transform: TransformConfig::default(),
        }
    }
}
