//! Feedback policy
//!
//! The decision table mapping a validity snapshot to one feedback state.

use serde::{Deserialize, Serialize};

use crate::validity::FieldSnapshot;

/// The single state class a field carries after the handler runs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FeedbackState {
    Valid,
    Invalid,
    ValueMissing,
}

impl FeedbackState {
    pub const ALL: [FeedbackState; 3] = [
        FeedbackState::Valid,
        FeedbackState::Invalid,
        FeedbackState::ValueMissing,
    ];

    /// Default class name for this state
    pub fn as_str(&self) -> &'static str {
        match self {
            FeedbackState::Valid => "valid",
            FeedbackState::Invalid => "invalid",
            FeedbackState::ValueMissing => "valueMissing",
        }
    }
}

impl std::fmt::Display for FeedbackState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How empty and missing values are reported
///
/// `lenient()` leaves empty optional fields unclassified and folds
/// `valueMissing` into `invalid`. `strict()` classifies every field and gives
/// missing values their own `valueMissing` class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ValidationPolicy {
    /// Skip classification of a non-required field whose value is empty
    pub treat_empty_optional_as_unvalidated: bool,
    /// Report `valueMissing` as its own state instead of `invalid`
    pub mark_value_missing: bool,
}

impl ValidationPolicy {
    pub const fn lenient() -> Self {
        Self {
            treat_empty_optional_as_unvalidated: true,
            mark_value_missing: false,
        }
    }

    pub const fn strict() -> Self {
        Self {
            treat_empty_optional_as_unvalidated: false,
            mark_value_missing: true,
        }
    }
}

impl Default for ValidationPolicy {
    fn default() -> Self {
        Self::lenient()
    }
}

/// Decide which state class a field should carry
///
/// Returns `None` when the field is left unclassified.
pub fn classify(policy: &ValidationPolicy, field: &FieldSnapshot) -> Option<FeedbackState> {
    if policy.treat_empty_optional_as_unvalidated && !field.required && field.is_empty() {
        return None;
    }

    if field.validity.value_missing {
        return Some(if policy.mark_value_missing {
            FeedbackState::ValueMissing
        } else {
            FeedbackState::Invalid
        });
    }

    Some(if field.validity.valid() {
        FeedbackState::Valid
    } else {
        FeedbackState::Invalid
    })
}
