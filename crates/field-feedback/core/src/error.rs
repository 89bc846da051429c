//! Error types

use thiserror::Error;

pub type Result<T> = std::result::Result<T, FeedbackError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FeedbackError {
    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("selector `{selector}` could not be evaluated: {reason}")]
    Selector { selector: String, reason: String },

    #[error("failed to attach `{event}` listener: {reason}")]
    Listener { event: String, reason: String },

    #[error("class list update for `{class}` failed: {reason}")]
    ClassList { class: String, reason: String },

    #[error("unknown field event `{0}`")]
    UnknownEvent(String),
}
