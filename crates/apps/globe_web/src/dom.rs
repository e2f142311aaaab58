use wasm_bindgen::JsCast;
use web_sys::{Document, HtmlElement, Window};

use crate::error::ViewerError;

pub fn window() -> Result<Window, ViewerError> {
    web_sys::window().ok_or(ViewerError::Dom("window missing".to_string()))
}

pub fn document() -> Result<Document, ViewerError> {
    window()?
        .document()
        .ok_or(ViewerError::Dom("document missing".to_string()))
}

/// Looks up `#id` as `T`.
pub fn require<T: JsCast>(document: &Document, id: &'static str) -> Result<T, ViewerError> {
    document
        .get_element_by_id(id)
        .and_then(|el| el.dyn_into::<T>().ok())
        .ok_or(ViewerError::MissingElement(id))
}

/// Like [`require`], but a missing element only disables the feature that
/// needed it.
pub fn optional<T: JsCast>(document: &Document, id: &'static str) -> Option<T> {
    match require(document, id) {
        Ok(el) => Some(el),
        Err(err) => {
            log::warn!("{err}; related controls are disabled");
            None
        }
    }
}

/// First descendant of `root` matching `selector`.
pub fn query<T: JsCast>(root: &web_sys::Element, selector: &str) -> Option<T> {
    root.query_selector(selector)
        .ok()
        .flatten()
        .and_then(|el| el.dyn_into::<T>().ok())
}

pub fn set_style(el: &HtmlElement, property: &str, value: &str) {
    if let Err(err) = el.style().set_property(property, value) {
        log::debug!("style update {property}={value} failed: {err:?}");
    }
}

pub fn set_display(el: &HtmlElement, value: &str) {
    set_style(el, "display", value);
}

pub fn viewport_size(window: &Window) -> (f64, f64) {
    let w = window
        .inner_width()
        .ok()
        .and_then(|v| v.as_f64())
        .unwrap_or(1280.0);
    let h = window
        .inner_height()
        .ok()
        .and_then(|v| v.as_f64())
        .unwrap_or(720.0);
    (w, h)
}

/// Text of the page configuration element, if present.
pub fn config_text(document: &Document, id: &'static str) -> Option<String> {
    document.get_element_by_id(id).and_then(|el| el.text_content())
}
