//! Validity snapshot
//!
//! Mirrors the browser's constraint-validation `ValidityState` and the bits
//! of a form control the handler reads when an event fires.

use serde::{Deserialize, Serialize};

/// Constraint-validation flags reported for a form control
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ValidityState {
    /// Required but empty
    pub value_missing: bool,
    /// Value doesn't match the control type (email, url, ...)
    pub type_mismatch: bool,
    /// Value doesn't match the `pattern` attribute
    pub pattern_mismatch: bool,
    pub too_long: bool,
    pub too_short: bool,
    pub range_underflow: bool,
    pub range_overflow: bool,
    pub step_mismatch: bool,
    /// The browser couldn't convert the input
    pub bad_input: bool,
    /// `setCustomValidity` was called with a non-empty message
    pub custom_error: bool,
}

impl ValidityState {
    /// A state with every constraint satisfied
    pub fn satisfied() -> Self {
        Self::default()
    }

    /// A state with only `valueMissing` set
    pub fn missing() -> Self {
        Self {
            value_missing: true,
            ..Self::default()
        }
    }

    /// True when no flag is set, like `validity.valid`
    pub fn valid(&self) -> bool {
        !(self.value_missing
            || self.type_mismatch
            || self.pattern_mismatch
            || self.too_long
            || self.too_short
            || self.range_underflow
            || self.range_overflow
            || self.step_mismatch
            || self.bad_input
            || self.custom_error)
    }
}

/// What the handler observes on the event target at invocation time
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FieldSnapshot {
    pub required: bool,
    pub value: String,
    pub validity: ValidityState,
}

impl FieldSnapshot {
    pub fn new(required: bool, value: impl Into<String>, validity: ValidityState) -> Self {
        Self {
            required,
            value: value.into(),
            validity,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }
}
