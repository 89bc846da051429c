//! Markup contract
//!
//! The toggler only flips classes on the input. The messages live in
//! sibling spans placed after it, and the stylesheet decides which one is
//! visible. [`render_field`] produces that markup and [`FEEDBACK_CSS`] the
//! matching rules for the default class names.

use maud::{html, Markup};

/// Stylesheet revealing the message span that matches the input's state class
pub const FEEDBACK_CSS: &str = "\
.form-field__validation { display: none; }
.form-field__input.invalid ~ .form-field__validation--invalid,
.form-field__input.valid ~ .form-field__validation--valid,
.form-field__input.valueMissing ~ .form-field__validation--valueMissing { display: block; }
";

/// Message text for each sibling span
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldMessages {
    pub invalid: String,
    pub valid: String,
    pub value_missing: String,
}

impl Default for FieldMessages {
    fn default() -> Self {
        Self {
            invalid: "Please enter a valid value.".to_string(),
            valid: "Looks good.".to_string(),
            value_missing: "This field is required.".to_string(),
        }
    }
}

/// A labelled input with native constraint attributes
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldMarkup {
    pub id: String,
    pub name: String,
    pub label: String,
    /// `type` attribute; "text" when empty
    pub input_type: String,
    pub value: Option<String>,
    pub required: bool,
    pub pattern: Option<String>,
    pub min_length: Option<usize>,
    pub max_length: Option<usize>,
    pub messages: FieldMessages,
}

impl FieldMarkup {
    /// A text field whose `id` and `name` are both `name`
    pub fn new(name: impl Into<String>, label: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            id: name.clone(),
            name,
            label: label.into(),
            input_type: "text".to_string(),
            ..Default::default()
        }
    }

    pub fn input_type(mut self, input_type: impl Into<String>) -> Self {
        self.input_type = input_type.into();
        self
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn pattern(mut self, pattern: impl Into<String>) -> Self {
        self.pattern = Some(pattern.into());
        self
    }

    pub fn length(mut self, min: Option<usize>, max: Option<usize>) -> Self {
        self.min_length = min;
        self.max_length = max;
        self
    }

    pub fn messages(mut self, messages: FieldMessages) -> Self {
        self.messages = messages;
        self
    }
}

/// Render a field the validation listener can drive
pub fn render_field(field: &FieldMarkup) -> Markup {
    let input_type = if field.input_type.is_empty() {
        "text"
    } else {
        field.input_type.as_str()
    };

    html! {
        div class="form-field" {
            label class="form-field__label" for=(field.id) { (field.label) }
            input class="form-field__input"
                id=(field.id)
                name=(field.name)
                type=(input_type)
                value=[field.value.as_deref()]
                pattern=[field.pattern.as_deref()]
                minlength=[field.min_length]
                maxlength=[field.max_length]
                required[field.required];
            span class="form-field__validation form-field__validation--invalid" { (field.messages.invalid) }
            span class="form-field__validation form-field__validation--valid" { (field.messages.valid) }
            span class="form-field__validation form-field__validation--valueMissing" { (field.messages.value_missing) }
        }
    }
}
