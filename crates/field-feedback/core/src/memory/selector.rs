//! Compound selector matching for the in-memory document
//!
//! Supports `*`, `tag`, `#id`, `.class` and their compounds, in
//! comma-separated groups. Combinators and attribute/pseudo selectors are
//! rejected.

use crate::error::{FeedbackError, Result};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct SelectorStep {
    pub(crate) tag: Option<String>,
    pub(crate) id: Option<String>,
    pub(crate) classes: Vec<String>,
}

impl SelectorStep {
    pub(crate) fn matches(&self, tag: &str, id: Option<&str>, classes: &[String]) -> bool {
        if let Some(expected) = &self.tag {
            if !expected.eq_ignore_ascii_case(tag) {
                return false;
            }
        }
        if let Some(expected) = &self.id {
            if id != Some(expected.as_str()) {
                return false;
            }
        }
        self.classes.iter().all(|c| classes.contains(c))
    }
}

/// Parse a selector list into its compound steps
pub(crate) fn parse_selector(selector: &str) -> Result<Vec<SelectorStep>> {
    let fail = |reason: &str| FeedbackError::Selector {
        selector: selector.to_string(),
        reason: reason.to_string(),
    };

    let mut groups = Vec::new();
    for group in selector.split(',') {
        let group = group.trim();
        if group.is_empty() {
            return Err(fail("empty selector group"));
        }
        groups.push(parse_compound(group).map_err(|reason| fail(&reason))?);
    }
    Ok(groups)
}

fn parse_compound(input: &str) -> std::result::Result<SelectorStep, String> {
    let mut step = SelectorStep::default();
    let mut chars = input.chars().peekable();

    if chars.peek() == Some(&'*') {
        chars.next();
    } else if chars.peek().is_some_and(|c| is_name_char(*c)) {
        step.tag = Some(take_name(&mut chars));
    }

    while let Some(c) = chars.next() {
        match c {
            '#' | '.' => {
                let name = take_name(&mut chars);
                if name.is_empty() {
                    return Err(format!("expected a name after `{}`", c));
                }
                if c == '#' {
                    step.id = Some(name);
                } else {
                    step.classes.push(name);
                }
            }
            c if c.is_whitespace() || matches!(c, '>' | '+' | '~') => {
                return Err("combinators are not supported".to_string());
            }
            other => return Err(format!("unsupported selector syntax `{}`", other)),
        }
    }

    Ok(step)
}

fn take_name(chars: &mut std::iter::Peekable<std::str::Chars<'_>>) -> String {
    let mut name = String::new();
    while let Some(&c) = chars.peek() {
        if !is_name_char(c) {
            break;
        }
        name.push(c);
        chars.next();
    }
    name
}

fn is_name_char(c: char) -> bool {
    c.is_alphanumeric() || c == '-' || c == '_'
}
