//! Listener installer
//!
//! Wires the handler to every matching field of an injected host and hands
//! back the registrations so callers can tear them down.

use std::rc::Rc;

use crate::config::FeedbackConfig;
use crate::error::Result;
use crate::handler::handle_field;
use crate::host::{FieldCallback, FieldHost};

/// Logged when the host returns an unresolvable element reference
const MISSING_FIELD_MESSAGE: &str = "form field reference is missing; skipping it";

/// Listener registrations created by [`install_validation`]
///
/// Dropping the installation (or calling [`Installation::dispose`]) drops
/// every handle, which removes the listeners from the host.
#[must_use = "dropping the installation removes its listeners"]
pub struct Installation<L> {
    listeners: Vec<L>,
    fields: usize,
    skipped: usize,
}

impl<L> Installation<L> {
    /// Number of listeners attached
    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }

    /// Number of fields wired
    pub fn fields(&self) -> usize {
        self.fields
    }

    /// Number of missing element references that were skipped
    pub fn skipped(&self) -> usize {
        self.skipped
    }

    /// Remove every listener now
    pub fn dispose(self) {
        drop(self);
    }
}

impl<L> std::fmt::Debug for Installation<L> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Installation")
            .field("listeners", &self.listeners.len())
            .field("fields", &self.fields)
            .field("skipped", &self.skipped)
            .finish()
    }
}

/// Attach the validation handler to every field matching `config.selector`
///
/// Each field gets one listener per configured event. A selector matching
/// nothing yields an empty installation. If a registration fails, the
/// listeners attached so far are removed before the error is returned.
pub fn install_validation<H: FieldHost>(
    host: &H,
    config: &FeedbackConfig,
) -> Result<Installation<H::Listener>> {
    config.validate()?;

    let policy = config.policy;
    let classes = Rc::new(config.classes.clone());
    let callback: FieldCallback<H::Field> = Rc::new(move |field: &H::Field| {
        if let Err(e) = handle_field(field, &policy, &classes) {
            tracing::warn!("Failed to update validation classes: {}", e);
        }
    });

    let mut installation = Installation {
        listeners: Vec::new(),
        fields: 0,
        skipped: 0,
    };

    for slot in host.query_fields(&config.selector)? {
        let Some(field) = slot else {
            tracing::warn!("{}", MISSING_FIELD_MESSAGE);
            host.diagnostic(MISSING_FIELD_MESSAGE);
            installation.skipped += 1;
            continue;
        };

        for &event in &config.events {
            let listener = host.listen(&field, event, Rc::clone(&callback))?;
            installation.listeners.push(listener);
        }
        installation.fields += 1;
    }

    tracing::debug!(
        "Attached {} validation listeners to {} fields matching {}",
        installation.len(),
        installation.fields,
        config.selector
    );

    Ok(installation)
}
