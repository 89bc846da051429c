//! Constraint evaluation for in-memory fields
//!
//! Computes a `ValidityState` the way the browser does for text-like
//! controls: an empty value only ever triggers `valueMissing`.

use regex::Regex;

use crate::validity::ValidityState;

/// Declared constraints of an in-memory field
#[derive(Debug, Clone, Default)]
pub(crate) struct Constraints {
    pub(crate) required: bool,
    pub(crate) input_type: String,
    pub(crate) pattern: Option<Regex>,
    pub(crate) min_length: Option<usize>,
    pub(crate) max_length: Option<usize>,
}

/// Compile an HTML `pattern` attribute, which must match the whole value
///
/// Browsers ignore a pattern that does not compile, so this returns `None`.
pub(crate) fn compile_pattern(pattern: &str) -> Option<Regex> {
    match Regex::new(&format!("^(?:{})$", pattern)) {
        Ok(re) => Some(re),
        Err(e) => {
            tracing::warn!("Ignoring invalid pattern {:?}: {}", pattern, e);
            None
        }
    }
}

pub(crate) fn evaluate(constraints: &Constraints, value: &str, custom_error: bool) -> ValidityState {
    let mut state = ValidityState {
        custom_error,
        ..ValidityState::default()
    };

    if value.is_empty() {
        state.value_missing = constraints.required;
        return state;
    }

    let length = value.chars().count();
    if let Some(max) = constraints.max_length {
        state.too_long = length > max;
    }
    if let Some(min) = constraints.min_length {
        state.too_short = length < min;
    }
    if let Some(pattern) = &constraints.pattern {
        state.pattern_mismatch = !pattern.is_match(value);
    }

    state.type_mismatch = match constraints.input_type.as_str() {
        "email" => !is_email(value),
        "url" => !is_absolute_url(value),
        _ => false,
    };

    state
}

fn is_email(value: &str) -> bool {
    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.is_empty()
        && !domain.contains('@')
        && !domain.starts_with('.')
        && !domain.ends_with('.')
        && !value.chars().any(char::is_whitespace)
}

fn is_absolute_url(value: &str) -> bool {
    let Some((scheme, rest)) = value.split_once(':') else {
        return false;
    };
    let mut scheme_chars = scheme.chars();
    scheme_chars.next().is_some_and(|c| c.is_ascii_alphabetic())
        && scheme_chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
        && !rest.is_empty()
        && !value.chars().any(char::is_whitespace)
}
