use gloo::timers::future::TimeoutFuture;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Element, HtmlElement, Window};

/// Retrieve the global `window` object, if running in a browser.
#[must_use]
pub fn window() -> Option<Window> {
    web_sys::window()
}

/// Retrieve the document object for DOM interactions.
#[must_use]
pub fn document() -> Option<Document> {
    window().and_then(|win| win.document())
}

/// Look up an element by id and cast it to the requested element type.
///
/// Returns `None` when the id is empty, missing, or names an element of a
/// different type.
#[must_use]
pub fn element_by_id<T: JsCast>(id: &str) -> Option<T> {
    if id.is_empty() {
        return None;
    }
    document()?
        .get_element_by_id(id)
        .and_then(|el| el.dyn_into::<T>().ok())
}

/// All elements under `root` matching `selector`, in document order.
///
/// Invalid selectors yield an empty list.
#[must_use]
pub fn query_all(root: &Element, selector: &str) -> Vec<Element> {
    let Ok(list) = root.query_selector_all(selector) else {
        log::debug!("invalid selector: {selector}");
        return Vec::new();
    };
    (0..list.length())
        .filter_map(|i| list.item(i))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect()
}

/// All HTML elements under `root` matching `selector`, in document order.
#[must_use]
pub fn query_all_html(root: &Element, selector: &str) -> Vec<HtmlElement> {
    query_all(root, selector)
        .into_iter()
        .filter_map(|el| el.dyn_into::<HtmlElement>().ok())
        .collect()
}

/// Text content of the first descendant matching `selector`, or `""`.
#[must_use]
pub fn child_text(root: &Element, selector: &str) -> String {
    root.query_selector(selector)
        .ok()
        .flatten()
        .and_then(|el| el.text_content())
        .unwrap_or_default()
}

/// Whether the user asked the platform to minimise motion.
#[must_use]
pub fn prefers_reduced_motion() -> bool {
    window()
        .and_then(|win| win.match_media("(prefers-reduced-motion: reduce)").ok().flatten())
        .is_some_and(|query| query.matches())
}

/// Convert a JavaScript value into a readable string for error reporting.
#[must_use]
pub fn js_error_message(value: &JsValue) -> String {
    value
        .as_string()
        .or_else(|| {
            value
                .dyn_ref::<js_sys::Error>()
                .map(|err| err.message().into())
        })
        .unwrap_or_else(|| format!("{value:?}"))
}

/// Run `task` on the event loop after `delay_ms`.
///
/// Timers are fire-and-forget: there is no handle to cancel them and
/// overlapping calls are not merged.
pub fn defer(delay_ms: u32, task: impl FnOnce() + 'static) {
    wasm_bindgen_futures::spawn_local(async move {
        TimeoutFuture::new(delay_ms).await;
        task();
    });
}

/// Set or clear an inline style property, ignoring failures.
pub fn set_style(el: &HtmlElement, property: &str, value: &str) {
    let style = el.style();
    let result = if value.is_empty() {
        style.remove_property(property).map(|_| ())
    } else {
        style.set_property(property, value)
    };
    if let Err(err) = result {
        log::debug!("style {property} not applied: {}", js_error_message(&err));
    }
}
