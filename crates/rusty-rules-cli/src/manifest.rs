// File: src/manifest.rs
// Purpose: Form manifest parsing from form.toml

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use rusty_rules::{ConfigErrors, DisplayOptions, FieldSpec, MessageCatalog, Validator};
use serde::{Deserialize, Serialize};

/// Form manifest
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Manifest {
    pub form: FormConfig,

    #[serde(default)]
    pub options: OptionsConfig,

    #[serde(default, rename = "field")]
    pub fields: Vec<FieldSpec>,

    /// Directory relative paths are resolved against
    #[serde(skip)]
    pub base_dir: PathBuf,
}

/// Form identity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FormConfig {
    pub id: String,

    #[serde(default)]
    pub submit_button: String,

    /// Language file replacing the built-in messages (flat JSON object)
    #[serde(default)]
    pub messages: Option<PathBuf>,
}

/// How the form reports errors
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OptionsConfig {
    #[serde(default)]
    pub error_container: Option<String>,

    #[serde(default = "default_false")]
    pub real_time_checking: bool,

    #[serde(default = "default_false")]
    pub on_blur_checking: bool,

    /// Highlight failing inputs (default: true)
    #[serde(default = "default_true")]
    pub input_highlights: bool,

    #[serde(default = "default_false")]
    pub prevent_enter_key: bool,

    #[serde(default = "default_false")]
    pub test_mode: bool,
}

fn default_true() -> bool {
    true
}

fn default_false() -> bool {
    false
}

impl Default for OptionsConfig {
    fn default() -> Self {
        Self {
            error_container: None,
            real_time_checking: default_false(),
            on_blur_checking: default_false(),
            input_highlights: default_true(),
            prevent_enter_key: default_false(),
            test_mode: default_false(),
        }
    }
}

impl Manifest {
    /// Load a manifest from form.toml
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read manifest: {:?}", path))?;

        let mut manifest: Manifest = toml::from_str(&content)
            .with_context(|| format!("Failed to parse manifest: {:?}", path))?;

        manifest.base_dir = path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_default();

        tracing::debug!(form = %manifest.form.id, fields = manifest.fields.len(), "manifest loaded");
        Ok(manifest)
    }

    pub fn display_options(&self) -> DisplayOptions {
        DisplayOptions {
            form_id: self.form.id.clone(),
            submit_button_id: self.form.submit_button.clone(),
            error_container: self.options.error_container.clone(),
            real_time_checking: self.options.real_time_checking,
            on_blur_checking: self.options.on_blur_checking,
            input_highlights: self.options.input_highlights,
            prevent_enter_key: self.options.prevent_enter_key,
            test_mode: self.options.test_mode,
        }
    }

    /// Built-in messages, or the language file when one is configured
    pub fn message_catalog(&self) -> Result<MessageCatalog> {
        let Some(file) = &self.form.messages else {
            return Ok(MessageCatalog::default());
        };

        let path = self.base_dir.join(file);
        let content = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read message file: {:?}", path))?;

        MessageCatalog::from_json(&content)
            .with_context(|| format!("Failed to parse message file: {:?}", path))
    }

    /// Builds the validator; the outer error covers I/O, the inner one configuration
    pub fn validator(&self) -> Result<std::result::Result<Validator, ConfigErrors>> {
        let messages = self.message_catalog()?;
        Ok(Validator::builder()
            .fields(self.fields.iter().cloned())
            .messages(messages)
            .options(self.display_options())
            .build())
    }
}
