//! In-memory document
//!
//! A small stand-in for the browser DOM: form fields with declared
//! constraints, class lists, listeners and synchronous event dispatch.
//! Implements [`FieldHost`] so the installer can be exercised natively.

mod constraints;
mod selector;

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use crate::classes::ClassList;
use crate::error::{FeedbackError, Result};
use crate::host::{FieldCallback, FieldElement, FieldEvent, FieldHost};
use crate::validity::{FieldSnapshot, ValidityState};

use constraints::{compile_pattern, evaluate, Constraints};
use selector::parse_selector;

/// Declaration of a field added to a [`MemoryDocument`]
#[derive(Debug, Clone)]
pub struct FieldSpec {
    tag: String,
    id: Option<String>,
    classes: Vec<String>,
    required: bool,
    input_type: String,
    pattern: Option<String>,
    min_length: Option<usize>,
    max_length: Option<usize>,
    value: String,
}

impl FieldSpec {
    fn with_tag(tag: &str, id: &str) -> Self {
        Self {
            tag: tag.to_string(),
            id: (!id.is_empty()).then(|| id.to_string()),
            classes: Vec::new(),
            required: false,
            input_type: "text".to_string(),
            pattern: None,
            min_length: None,
            max_length: None,
            value: String::new(),
        }
    }

    /// `<input type="text" id=..>`
    pub fn input(id: &str) -> Self {
        Self::with_tag("input", id)
    }

    pub fn textarea(id: &str) -> Self {
        Self::with_tag("textarea", id).input_type("textarea")
    }

    pub fn class(mut self, class: &str) -> Self {
        for name in class.split_whitespace() {
            self.classes.push(name.to_string());
        }
        self
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn input_type(mut self, input_type: &str) -> Self {
        self.input_type = input_type.to_string();
        self
    }

    pub fn pattern(mut self, pattern: &str) -> Self {
        self.pattern = Some(pattern.to_string());
        self
    }

    pub fn min_length(mut self, min: usize) -> Self {
        self.min_length = Some(min);
        self
    }

    pub fn max_length(mut self, max: usize) -> Self {
        self.max_length = Some(max);
        self
    }

    pub fn value(mut self, value: &str) -> Self {
        self.value = value.to_string();
        self
    }
}

#[derive(Debug)]
struct FieldData {
    tag: String,
    id: Option<String>,
    classes: Vec<String>,
    constraints: Constraints,
    value: String,
    custom_message: String,
    reject_class_updates: bool,
}

/// Handle to a field in a [`MemoryDocument`]; clones share the same field
#[derive(Debug, Clone)]
pub struct MemoryField {
    key: usize,
    data: Rc<RefCell<FieldData>>,
}

impl MemoryField {
    pub fn id(&self) -> Option<String> {
        self.data.borrow().id.clone()
    }

    pub fn value(&self) -> String {
        self.data.borrow().value.clone()
    }

    /// Set the value without firing any event
    pub fn set_value(&self, value: &str) {
        self.data.borrow_mut().value = value.to_string();
    }

    /// Like `setCustomValidity`; an empty message clears the custom error
    pub fn set_custom_validity(&self, message: &str) {
        self.data.borrow_mut().custom_message = message.to_string();
    }

    pub fn validity(&self) -> ValidityState {
        let data = self.data.borrow();
        evaluate(&data.constraints, &data.value, !data.custom_message.is_empty())
    }

    /// Make every later class-list mutation on this field fail
    pub fn reject_class_updates(&self, reject: bool) {
        self.data.borrow_mut().reject_class_updates = reject;
    }

    fn check_class_update(&self, name: &str) -> Result<()> {
        if self.data.borrow().reject_class_updates {
            return Err(FeedbackError::ClassList {
                class: name.to_string(),
                reason: "class list is read-only".to_string(),
            });
        }
        Ok(())
    }

    /// Shorthand for `has_class`
    pub fn has(&self, class: &str) -> bool {
        self.has_class(class)
    }

    pub fn classes(&self) -> Vec<String> {
        self.data.borrow().classes.clone()
    }
}

impl ClassList for MemoryField {
    fn add_class(&self, name: &str) -> Result<()> {
        self.check_class_update(name)?;
        let mut data = self.data.borrow_mut();
        if !data.classes.iter().any(|c| c == name) {
            data.classes.push(name.to_string());
        }
        Ok(())
    }

    fn remove_class(&self, name: &str) -> Result<()> {
        self.check_class_update(name)?;
        self.data.borrow_mut().classes.retain(|c| c != name);
        Ok(())
    }

    fn has_class(&self, name: &str) -> bool {
        self.data.borrow().classes.iter().any(|c| c == name)
    }
}

impl FieldElement for MemoryField {
    fn snapshot(&self) -> FieldSnapshot {
        let validity = self.validity();
        let data = self.data.borrow();
        FieldSnapshot::new(data.constraints.required, data.value.clone(), validity)
    }
}

struct ListenerEntry {
    id: u64,
    field: usize,
    event: FieldEvent,
    callback: FieldCallback<MemoryField>,
}

#[derive(Default)]
struct DocumentState {
    slots: Vec<Option<MemoryField>>,
    listeners: Vec<ListenerEntry>,
    next_listener: u64,
    /// Registrations still allowed before `listen` fails
    listen_budget: Option<usize>,
    diagnostics: Vec<String>,
}

/// Registration returned by [`MemoryDocument::listen`]; removes itself on drop
#[derive(Debug)]
pub struct MemoryListener {
    id: u64,
    document: Weak<RefCell<DocumentState>>,
}

impl Drop for MemoryListener {
    fn drop(&mut self) {
        if let Some(state) = self.document.upgrade() {
            state.borrow_mut().listeners.retain(|l| l.id != self.id);
        }
    }
}

/// A document holding form fields in insertion order
#[derive(Clone, Default)]
pub struct MemoryDocument {
    state: Rc<RefCell<DocumentState>>,
}

impl MemoryDocument {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_field(&self, spec: FieldSpec) -> MemoryField {
        let pattern = spec.pattern.as_deref().and_then(compile_pattern);
        let mut state = self.state.borrow_mut();
        let field = MemoryField {
            key: state.slots.len(),
            data: Rc::new(RefCell::new(FieldData {
                tag: spec.tag,
                id: spec.id,
                classes: spec.classes,
                constraints: Constraints {
                    required: spec.required,
                    input_type: spec.input_type,
                    pattern,
                    min_length: spec.min_length,
                    max_length: spec.max_length,
                },
                value: spec.value,
                custom_message: String::new(),
                reject_class_updates: false,
            })),
        };
        state.slots.push(Some(field.clone()));
        field
    }

    /// Add a slot that matches every selector but resolves to no element
    pub fn add_missing(&self) {
        self.state.borrow_mut().slots.push(None);
    }

    /// Let `n` more registrations succeed, then fail every `listen` call
    pub fn fail_listen_after(&self, n: usize) {
        self.state.borrow_mut().listen_budget = Some(n);
    }

    pub fn listener_count(&self) -> usize {
        self.state.borrow().listeners.len()
    }

    /// Listeners registered on `field`, in registration order
    pub fn listeners_on(&self, field: &MemoryField) -> Vec<FieldEvent> {
        self.state
            .borrow()
            .listeners
            .iter()
            .filter(|l| l.field == field.key)
            .map(|l| l.event)
            .collect()
    }

    /// Messages passed to [`FieldHost::diagnostic`]
    pub fn diagnostics(&self) -> Vec<String> {
        self.state.borrow().diagnostics.clone()
    }

    /// Fire `event` at `field`; returns how many listeners ran
    pub fn dispatch(&self, field: &MemoryField, event: FieldEvent) -> usize {
        let callbacks: Vec<FieldCallback<MemoryField>> = self
            .state
            .borrow()
            .listeners
            .iter()
            .filter(|l| l.field == field.key && l.event == event)
            .map(|l| Rc::clone(&l.callback))
            .collect();

        for callback in &callbacks {
            callback(field);
        }
        callbacks.len()
    }

    /// Set the value and fire `input`, as typing would
    pub fn type_value(&self, field: &MemoryField, value: &str) -> usize {
        field.set_value(value);
        self.dispatch(field, FieldEvent::Input)
    }

    /// Like `checkValidity()`: fires `invalid` when the field fails a constraint
    pub fn check_validity(&self, field: &MemoryField) -> bool {
        let valid = field.validity().valid();
        if !valid {
            self.dispatch(field, FieldEvent::Invalid);
        }
        valid
    }
}

impl FieldHost for MemoryDocument {
    type Field = MemoryField;
    type Listener = MemoryListener;

    fn query_fields(&self, selector: &str) -> Result<Vec<Option<MemoryField>>> {
        let steps = parse_selector(selector)?;
        let state = self.state.borrow();

        Ok(state
            .slots
            .iter()
            .filter(|slot| match slot {
                None => true,
                Some(field) => {
                    let data = field.data.borrow();
                    steps
                        .iter()
                        .any(|s| s.matches(&data.tag, data.id.as_deref(), &data.classes))
                }
            })
            .cloned()
            .collect())
    }

    fn listen(
        &self,
        field: &MemoryField,
        event: FieldEvent,
        callback: FieldCallback<MemoryField>,
    ) -> Result<MemoryListener> {
        let mut state = self.state.borrow_mut();
        match state.listen_budget {
            Some(0) => {
                return Err(FeedbackError::Listener {
                    event: event.to_string(),
                    reason: "listener limit reached".to_string(),
                })
            }
            Some(ref mut left) => *left -= 1,
            None => {}
        }

        let id = state.next_listener;
        state.next_listener += 1;
        state.listeners.push(ListenerEntry {
            id,
            field: field.key,
            event,
            callback,
        });

        Ok(MemoryListener {
            id,
            document: Rc::downgrade(&self.state),
        })
    }

    fn diagnostic(&self, message: &str) {
        self.state.borrow_mut().diagnostics.push(message.to_string());
    }
}
