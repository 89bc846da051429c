// File: src/host.rs
// Purpose: web-sys implementation of the field host traits

use field_feedback_core::{
    ClassList, FeedbackError, FieldCallback, FieldElement, FieldEvent, FieldHost, FieldSnapshot,
    Result, ValidityState,
};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, Event, EventTarget, HtmlInputElement, HtmlSelectElement, HtmlTextAreaElement, NodeList};

fn js_reason(value: &JsValue) -> String {
    value.as_string().unwrap_or_else(|| format!("{:?}", value))
}

/// Where fields are looked up: a whole document or a subtree
#[derive(Debug, Clone)]
pub enum WebHost {
    Document(Document),
    Element(Element),
}

impl WebHost {
    /// Accept a `Document` or an `Element` passed from JavaScript
    pub fn from_js(root: JsValue) -> std::result::Result<Self, JsValue> {
        let root = match root.dyn_into::<Document>() {
            Ok(document) => return Ok(WebHost::Document(document)),
            Err(root) => root,
        };
        root.dyn_into::<Element>()
            .map(WebHost::Element)
            .map_err(|_| JsValue::from_str("root must be a Document or an Element"))
    }

    /// The window's document
    pub fn current() -> Option<Self> {
        web_sys::window()?.document().map(WebHost::Document)
    }

    fn query_selector_all(&self, selector: &str) -> std::result::Result<NodeList, JsValue> {
        match self {
            WebHost::Document(document) => document.query_selector_all(selector),
            WebHost::Element(element) => element.query_selector_all(selector),
        }
    }
}

/// A form control in the page
#[derive(Debug, Clone)]
pub struct WebField {
    element: Element,
}

impl WebField {
    pub fn new(element: Element) -> Self {
        Self { element }
    }
}

fn read_validity(validity: web_sys::ValidityState) -> ValidityState {
    ValidityState {
        value_missing: validity.value_missing(),
        type_mismatch: validity.type_mismatch(),
        pattern_mismatch: validity.pattern_mismatch(),
        too_long: validity.too_long(),
        too_short: validity.too_short(),
        range_underflow: validity.range_underflow(),
        range_overflow: validity.range_overflow(),
        step_mismatch: validity.step_mismatch(),
        bad_input: validity.bad_input(),
        custom_error: validity.custom_error(),
    }
}

impl ClassList for WebField {
    fn add_class(&self, name: &str) -> Result<()> {
        self.element
            .class_list()
            .add_1(name)
            .map_err(|e| FeedbackError::ClassList {
                class: name.to_string(),
                reason: js_reason(&e),
            })
    }

    fn remove_class(&self, name: &str) -> Result<()> {
        self.element
            .class_list()
            .remove_1(name)
            .map_err(|e| FeedbackError::ClassList {
                class: name.to_string(),
                reason: js_reason(&e),
            })
    }

    fn has_class(&self, name: &str) -> bool {
        self.element.class_list().contains(name)
    }
}

impl FieldElement for WebField {
    fn snapshot(&self) -> FieldSnapshot {
        if let Some(input) = self.element.dyn_ref::<HtmlInputElement>() {
            return FieldSnapshot::new(input.required(), input.value(), read_validity(input.validity()));
        }
        if let Some(textarea) = self.element.dyn_ref::<HtmlTextAreaElement>() {
            return FieldSnapshot::new(
                textarea.required(),
                textarea.value(),
                read_validity(textarea.validity()),
            );
        }
        if let Some(select) = self.element.dyn_ref::<HtmlSelectElement>() {
            return FieldSnapshot::new(select.required(), select.value(), read_validity(select.validity()));
        }

        // Not a form control: nothing to constrain
        FieldSnapshot::default()
    }
}

/// An attached event listener; removed from its element on drop
pub struct WebListener {
    target: EventTarget,
    event: FieldEvent,
    closure: Closure<dyn FnMut(Event)>,
}

impl Drop for WebListener {
    fn drop(&mut self) {
        if let Err(e) = self
            .target
            .remove_event_listener_with_callback(self.event.as_str(), self.closure.as_ref().unchecked_ref())
        {
            tracing::warn!("Failed to remove {} listener: {}", self.event, js_reason(&e));
        }
    }
}

impl FieldHost for WebHost {
    type Field = WebField;
    type Listener = WebListener;

    fn query_fields(&self, selector: &str) -> Result<Vec<Option<WebField>>> {
        let nodes = self
            .query_selector_all(selector)
            .map_err(|e| FeedbackError::Selector {
                selector: selector.to_string(),
                reason: js_reason(&e),
            })?;

        Ok((0..nodes.length())
            .map(|i| {
                nodes
                    .item(i)
                    .and_then(|node| node.dyn_into::<Element>().ok())
                    .map(WebField::new)
            })
            .collect())
    }

    fn listen(
        &self,
        field: &WebField,
        event: FieldEvent,
        callback: FieldCallback<WebField>,
    ) -> Result<WebListener> {
        let target_field = field.clone();
        let closure = Closure::<dyn FnMut(Event)>::new(move |_event: Event| {
            callback(&target_field);
        });

        let target: EventTarget = field.element.clone().into();
        target
            .add_event_listener_with_callback(event.as_str(), closure.as_ref().unchecked_ref())
            .map_err(|e| FeedbackError::Listener {
                event: event.to_string(),
                reason: js_reason(&e),
            })?;

        Ok(WebListener {
            target,
            event,
            closure,
        })
    }

    fn diagnostic(&self, message: &str) {
        web_sys::console::warn_1(&JsValue::from_str(message));
    }
}
