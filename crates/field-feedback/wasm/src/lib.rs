//! Field Feedback WASM
//!
//! WebAssembly bindings that wire form fields in the page to the
//! validation-class toggler from `field-feedback-core`.
//!
//! # Example (JavaScript)
//! ```javascript
//! import init, { installValidation } from './field_feedback_wasm.js';
//!
//! await init();
//! const handles = installValidation(document, { policy: { markValueMissing: true } });
//! // later
//! handles.dispose();
//! ```

use field_feedback_core::{self as feedback, FeedbackConfig, FieldSnapshot, Installation, ValidationPolicy};
use wasm_bindgen::prelude::*;

mod host;

pub use host::{WebField, WebHost, WebListener};

/// Set panic hook for better error messages in the browser
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

fn to_js(err: feedback::FeedbackError) -> JsValue {
    JsValue::from_str(&err.to_string())
}

fn from_js_or_default<T>(value: JsValue, what: &str) -> Result<T, JsValue>
where
    T: Default + serde::de::DeserializeOwned,
{
    if value.is_undefined() || value.is_null() {
        return Ok(T::default());
    }
    serde_wasm_bindgen::from_value(value)
        .map_err(|e| JsValue::from_str(&format!("Failed to parse {}: {}", what, e)))
}

/// Listeners attached by `installValidation`
#[wasm_bindgen]
pub struct ValidationHandles {
    installation: Option<Installation<WebListener>>,
}

#[wasm_bindgen]
impl ValidationHandles {
    /// Number of listeners still attached
    pub fn count(&self) -> usize {
        self.installation.as_ref().map_or(0, Installation::len)
    }

    /// Number of fields wired
    pub fn fields(&self) -> usize {
        self.installation.as_ref().map_or(0, Installation::fields)
    }

    /// Remove every listener; safe to call more than once
    pub fn dispose(&mut self) {
        if let Some(installation) = self.installation.take() {
            installation.dispose();
        }
    }
}

/// Attach validation listeners to the fields under `root`
///
/// # Arguments
/// * `root` - a `Document` or an `Element` to search in
/// * `options` - optional configuration object, e.g.
///   `{ selector, events, policy: { treatEmptyOptionalAsUnvalidated, markValueMissing }, classes: { valid, invalid, valueMissing } }`
#[wasm_bindgen(js_name = installValidation)]
pub fn install_validation_js(root: JsValue, options: JsValue) -> Result<ValidationHandles, JsValue> {
    let host = WebHost::from_js(root)?;
    let config: FeedbackConfig = from_js_or_default(options, "options")?;
    let installation = feedback::install_validation(&host, &config).map_err(to_js)?;

    Ok(ValidationHandles {
        installation: Some(installation),
    })
}

/// Attach validation listeners to the current page's document
#[wasm_bindgen(js_name = installValidationOnDocument)]
pub fn install_validation_on_document(options: JsValue) -> Result<ValidationHandles, JsValue> {
    let host = WebHost::current().ok_or_else(|| JsValue::from_str("no document available"))?;
    let config: FeedbackConfig = from_js_or_default(options, "options")?;
    let installation = feedback::install_validation(&host, &config).map_err(to_js)?;

    Ok(ValidationHandles {
        installation: Some(installation),
    })
}

/// Compute the state class for a validity snapshot without touching the DOM
///
/// # Example (JavaScript)
/// ```javascript
/// classifyField({ required: true, value: '', validity: { valueMissing: true } });
/// // => "invalid"
/// ```
#[wasm_bindgen(js_name = classifyField)]
pub fn classify_field_js(snapshot: JsValue, policy: JsValue) -> Result<Option<String>, JsValue> {
    let snapshot: FieldSnapshot = from_js_or_default(snapshot, "field snapshot")?;
    let policy: ValidationPolicy = from_js_or_default(policy, "policy")?;
    Ok(feedback::classify(&policy, &snapshot).map(|state| state.as_str().to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use wasm_bindgen_test::*;

    fn snapshot(required: bool, value: &str, value_missing: bool) -> JsValue {
        let snapshot = FieldSnapshot::new(
            required,
            value,
            feedback::ValidityState {
                value_missing,
                ..Default::default()
            },
        );
        serde_wasm_bindgen::to_value(&snapshot).unwrap()
    }

    fn policy(policy: ValidationPolicy) -> JsValue {
        serde_wasm_bindgen::to_value(&policy).unwrap()
    }

    #[wasm_bindgen_test]
    fn test_classify_default_policy() {
        assert_eq!(
            classify_field_js(snapshot(true, "", true), JsValue::UNDEFINED).unwrap(),
            Some("invalid".to_string())
        );
        assert_eq!(
            classify_field_js(snapshot(false, "", false), JsValue::UNDEFINED).unwrap(),
            None
        );
    }

    #[wasm_bindgen_test]
    fn test_classify_strict_policy() {
        assert_eq!(
            classify_field_js(snapshot(true, "", true), policy(ValidationPolicy::strict())).unwrap(),
            Some("valueMissing".to_string())
        );
        assert_eq!(
            classify_field_js(snapshot(true, "ok", false), policy(ValidationPolicy::strict())).unwrap(),
            Some("valid".to_string())
        );
    }

    #[wasm_bindgen_test]
    fn test_bad_root_rejected() {
        assert!(install_validation_js(JsValue::from_str("body"), JsValue::UNDEFINED).is_err());
    }
}
