// File: src/options.rs
// Purpose: Presentation options accepted at construction

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Where validation errors are shown
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ErrorDisplay {
    /// Every error in one container element
    Container(String),
    /// Each field checked while typing
    RealTime,
    /// Each field checked when it loses focus
    OnBlur,
}

/// Options the presentation layer reads; the engine only validates them
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayOptions {
    #[serde(default, alias = "formId")]
    pub form_id: String,

    #[serde(default, alias = "submitButtonId")]
    pub submit_button_id: String,

    #[serde(default, alias = "errorContainer")]
    pub error_container: Option<String>,

    #[serde(default, alias = "realTimeChecking")]
    pub real_time_checking: bool,

    #[serde(default, alias = "onBlurChecking")]
    pub on_blur_checking: bool,

    /// Highlight inputs that fail (default: true)
    #[serde(default = "default_true", alias = "inputHighlights")]
    pub input_highlights: bool,

    #[serde(default, alias = "preventEnterKey")]
    pub prevent_enter_key: bool,

    /// Report without blocking submission
    #[serde(default, alias = "testMode")]
    pub test_mode: bool,
}

impl Default for DisplayOptions {
    fn default() -> Self {
        Self {
            form_id: String::new(),
            submit_button_id: String::new(),
            error_container: None,
            real_time_checking: false,
            on_blur_checking: false,
            input_highlights: default_true(),
            prevent_enter_key: false,
            test_mode: false,
        }
    }
}

fn default_true() -> bool {
    true
}

impl DisplayOptions {
    pub fn new(form_id: impl Into<String>, submit_button_id: impl Into<String>) -> Self {
        Self {
            form_id: form_id.into(),
            submit_button_id: submit_button_id.into(),
            ..Self::default()
        }
    }

    pub fn display(mut self, display: ErrorDisplay) -> Self {
        self.error_container = None;
        self.real_time_checking = false;
        self.on_blur_checking = false;
        match display {
            ErrorDisplay::Container(id) => self.error_container = Some(id),
            ErrorDisplay::RealTime => self.real_time_checking = true,
            ErrorDisplay::OnBlur => self.on_blur_checking = true,
        }
        self
    }

    /// The chosen display mode, when exactly one is set
    pub fn error_display(&self) -> Option<ErrorDisplay> {
        let container = self
            .error_container
            .as_deref()
            .map(str::trim)
            .filter(|id| !id.is_empty());

        match (container, self.real_time_checking, self.on_blur_checking) {
            (Some(id), false, false) => Some(ErrorDisplay::Container(id.to_string())),
            (None, true, false) => Some(ErrorDisplay::RealTime),
            (None, false, true) => Some(ErrorDisplay::OnBlur),
            _ => None,
        }
    }

    pub fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();
        if self.form_id.trim().is_empty() {
            errors.push(ConfigError::MissingOption("form_id"));
        }
        if self.submit_button_id.trim().is_empty() {
            errors.push(ConfigError::MissingOption("submit_button_id"));
        }
        if self.error_display().is_none() {
            errors.push(ConfigError::ErrorDisplayMode);
        }
        errors
    }
}
