//! State classes
//!
//! Clear-then-set toggling of the three feedback classes on a class list.

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::policy::FeedbackState;

/// Class-list mutation, the `add`/`remove`/`contains` subset of `DOMTokenList`
pub trait ClassList {
    fn add_class(&self, name: &str) -> Result<()>;
    fn remove_class(&self, name: &str) -> Result<()>;
    fn has_class(&self, name: &str) -> bool;
}

/// Class names toggled for each feedback state
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FeedbackClasses {
    pub valid: String,
    pub invalid: String,
    pub value_missing: String,
}

impl Default for FeedbackClasses {
    fn default() -> Self {
        Self {
            valid: FeedbackState::Valid.as_str().to_string(),
            invalid: FeedbackState::Invalid.as_str().to_string(),
            value_missing: FeedbackState::ValueMissing.as_str().to_string(),
        }
    }
}

impl FeedbackClasses {
    pub fn class_for(&self, state: FeedbackState) -> &str {
        match state {
            FeedbackState::Valid => &self.valid,
            FeedbackState::Invalid => &self.invalid,
            FeedbackState::ValueMissing => &self.value_missing,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        FeedbackState::ALL.into_iter().map(move |s| self.class_for(s))
    }

    /// The state class currently present on `list`, if any
    pub fn current(&self, list: &impl ClassList) -> Option<FeedbackState> {
        FeedbackState::ALL
            .into_iter()
            .find(|&s| list.has_class(self.class_for(s)))
    }
}

/// Remove every state class from `list`, then add the one for `state`
pub fn apply_feedback(
    list: &impl ClassList,
    classes: &FeedbackClasses,
    state: Option<FeedbackState>,
) -> Result<()> {
    for class in classes.iter() {
        list.remove_class(class)?;
    }

    if let Some(state) = state {
        list.add_class(classes.class_for(state))?;
    }

    Ok(())
}
