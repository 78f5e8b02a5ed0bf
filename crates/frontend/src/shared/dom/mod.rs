//! Access to the server-rendered admin table.
//!
//! The table markup belongs to the server template; these helpers only read
//! it and patch it in place.

pub mod selection;
pub mod table;
pub mod table_surface;

use contracts::shared::status_registry::BadgePatch;
use gloo_timers::future::TimeoutFuture;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys::{
    Document, Element, HtmlElement, NodeList, ScrollBehavior, ScrollIntoViewOptions,
    ScrollLogicalPosition,
};

pub fn document() -> Option<Document> {
    web_sys::window()?.document()
}

/// `[name="value"]` with quotes and backslashes escaped
pub fn attr_selector(name: &str, value: &str) -> String {
    let escaped = value.replace('\\', "\\\\").replace('"', "\\\"");
    format!("[{}=\"{}\"]", name, escaped)
}

pub fn query(selector: &str) -> Option<Element> {
    document()?.query_selector(selector).ok().flatten()
}

pub fn query_all(selector: &str) -> Vec<Element> {
    document()
        .and_then(|d| d.query_selector_all(selector).ok())
        .map(elements)
        .unwrap_or_default()
}

pub fn query_in(root: &Element, selector: &str) -> Option<Element> {
    root.query_selector(selector).ok().flatten()
}

pub fn query_all_in(root: &Element, selector: &str) -> Vec<Element> {
    root.query_selector_all(selector)
        .map(elements)
        .unwrap_or_default()
}

fn elements(list: NodeList) -> Vec<Element> {
    (0..list.length())
        .filter_map(|i| list.item(i))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect()
}

/// Trimmed text content
pub fn text_of(el: &Element) -> String {
    el.text_content().unwrap_or_default().trim().to_string()
}

pub fn set_style(el: &Element, property: &str, value: &str) {
    if let Some(el) = el.dyn_ref::<HtmlElement>() {
        let _ = el.style().set_property(property, value);
    }
}

/// Write a badge patch into `badge` (class, text and inline colors)
pub fn patch_badge(badge: &Element, patch: &BadgePatch) {
    badge.set_class_name(&patch.class_name);
    badge.set_text_content(Some(patch.text));
    set_style(badge, "background", patch.background);
    set_style(badge, "color", patch.color);
}

pub fn reload_after(delay_ms: u32) {
    spawn_local(async move {
        TimeoutFuture::new(delay_ms).await;
        if let Some(window) = web_sys::window() {
            let _ = window.location().reload();
        }
    });
}

/// Smooth scroll that centers `el` in the viewport
pub fn scroll_into_view_center(el: &Element) {
    let options = ScrollIntoViewOptions::new();
    options.set_behavior(ScrollBehavior::Smooth);
    options.set_block(ScrollLogicalPosition::Center);
    el.scroll_into_view_with_scroll_into_view_options(&options);
}

pub fn open_in_new_window(url: &str) {
    if let Some(window) = web_sys::window() {
        if let Err(e) = window.open_with_url_and_target(url, "_blank") {
            log::error!("window.open failed: {:?}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attr_selector_escapes_quotes() {
        assert_eq!(attr_selector("data-request-id", "R100"), "[data-request-id=\"R100\"]");
        assert_eq!(attr_selector("data-field", "a\"b"), "[data-field=\"a\\\"b\"]");
    }
}
