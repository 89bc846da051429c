// File: src/handler.rs
// Purpose: The event handler body: snapshot, classify, toggle classes

use crate::classes::{apply_feedback, FeedbackClasses};
use crate::error::Result;
use crate::host::FieldElement;
use crate::policy::{classify, FeedbackState, ValidationPolicy};

/// Recompute a field's state class from its current validity
///
/// Every call clears the three state classes before setting one, so running
/// it again with unchanged validity leaves the class list as it was.
pub fn handle_field<F: FieldElement>(
    field: &F,
    policy: &ValidationPolicy,
    classes: &FeedbackClasses,
) -> Result<Option<FeedbackState>> {
    let snapshot = field.snapshot();
    let state = classify(policy, &snapshot);
    apply_feedback(field, classes, state)?;
    Ok(state)
}
