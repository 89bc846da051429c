// File: src/config.rs
// Purpose: Installer configuration (selector, events, policy, class names)

use serde::{Deserialize, Serialize};

use crate::classes::FeedbackClasses;
use crate::error::{FeedbackError, Result};
use crate::host::FieldEvent;
use crate::policy::ValidationPolicy;
use crate::DEFAULT_SELECTOR;

/// Installer configuration
///
/// Every field has a default, so `{}` is a complete configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedbackConfig {
    /// CSS selector for the fields to wire (default: ".form-field__input")
    #[serde(default = "default_selector")]
    pub selector: String,

    /// Events that trigger re-validation (default: input, blur, invalid)
    #[serde(default = "default_events")]
    pub events: Vec<FieldEvent>,

    #[serde(default)]
    pub policy: ValidationPolicy,

    #[serde(default)]
    pub classes: FeedbackClasses,
}

impl Default for FeedbackConfig {
    fn default() -> Self {
        Self {
            selector: default_selector(),
            events: default_events(),
            policy: ValidationPolicy::default(),
            classes: FeedbackClasses::default(),
        }
    }
}

impl FeedbackConfig {
    /// Parse a JSON configuration and validate it
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)
            .map_err(|e| FeedbackError::Config(format!("failed to parse configuration: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    pub fn with_selector(mut self, selector: impl Into<String>) -> Self {
        self.selector = selector.into();
        self
    }

    pub fn with_policy(mut self, policy: ValidationPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_classes(mut self, classes: FeedbackClasses) -> Self {
        self.classes = classes;
        self
    }

    pub fn with_events(mut self, events: impl IntoIterator<Item = FieldEvent>) -> Self {
        self.events = events.into_iter().collect();
        self
    }

    /// Check the configuration is usable
    pub fn validate(&self) -> Result<()> {
        if self.selector.trim().is_empty() {
            return Err(FeedbackError::Config("selector must not be empty".into()));
        }

        if self.events.is_empty() {
            return Err(FeedbackError::Config("at least one event is required".into()));
        }

        for (i, event) in self.events.iter().enumerate() {
            if self.events[..i].contains(event) {
                return Err(FeedbackError::Config(format!("event `{}` listed twice", event)));
            }
        }

        let names: Vec<&str> = self.classes.iter().collect();
        for (i, name) in names.iter().enumerate() {
            if name.is_empty() || name.chars().any(char::is_whitespace) {
                return Err(FeedbackError::Config(format!(
                    "class name `{}` must be a single non-empty token",
                    name
                )));
            }
            if names[..i].contains(name) {
                return Err(FeedbackError::Config(format!(
                    "class name `{}` is used for more than one state",
                    name
                )));
            }
        }

        Ok(())
    }
}

fn default_selector() -> String {
    DEFAULT_SELECTOR.to_string()
}

fn default_events() -> Vec<FieldEvent> {
    FieldEvent::ALL.to_vec()
}
