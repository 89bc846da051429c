//! Host abstraction
//!
//! The installer and handler only see a document through these traits, so
//! the same code drives the browser (web-sys) and the in-memory document.

use std::rc::Rc;
use std::str::FromStr;

use crate::classes::ClassList;
use crate::error::{FeedbackError, Result};
use crate::validity::FieldSnapshot;

/// Events the installer listens for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldEvent {
    Input,
    Blur,
    Invalid,
}

impl FieldEvent {
    pub const ALL: [FieldEvent; 3] = [FieldEvent::Input, FieldEvent::Blur, FieldEvent::Invalid];

    /// DOM event type name
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldEvent::Input => "input",
            FieldEvent::Blur => "blur",
            FieldEvent::Invalid => "invalid",
        }
    }
}

impl FromStr for FieldEvent {
    type Err = FeedbackError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "input" => Ok(FieldEvent::Input),
            "blur" => Ok(FieldEvent::Blur),
            "invalid" => Ok(FieldEvent::Invalid),
            other => Err(FeedbackError::UnknownEvent(other.to_string())),
        }
    }
}

impl std::fmt::Display for FieldEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl serde::Serialize for FieldEvent {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> serde::Deserialize<'de> for FieldEvent {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        name.parse().map_err(serde::de::Error::custom)
    }
}

/// A form control exposing constraint-validation state and a class list
pub trait FieldElement: ClassList {
    /// Read `required`, `value` and `validity` as they are right now
    fn snapshot(&self) -> FieldSnapshot;
}

/// Callback invoked with the event target
pub type FieldCallback<F> = Rc<dyn Fn(&F)>;

/// A document (or subtree) fields can be found in and listened on
pub trait FieldHost {
    type Field: FieldElement + Clone + 'static;
    /// Registration handle; dropping it removes the listener
    type Listener;

    /// All elements matching `selector`, in document order
    ///
    /// A `None` slot stands for an element reference that could not be
    /// resolved.
    fn query_fields(&self, selector: &str) -> Result<Vec<Option<Self::Field>>>;

    fn listen(
        &self,
        field: &Self::Field,
        event: FieldEvent,
        callback: FieldCallback<Self::Field>,
    ) -> Result<Self::Listener>;

    /// Surface a warning where the page author will see it
    fn diagnostic(&self, _message: &str) {}
}
