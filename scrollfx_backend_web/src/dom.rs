// Copyright 2026 the Scrollfx Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! [`Page`] over the live DOM.
//!
//! Element handles are `web_sys::Element` clones, which compare equal when
//! they refer to the same node. Mutations that the DOM rejects (an invalid
//! attribute name, say) are ignored; effects are decorative and a failed
//! style write must not take the page down.

use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;

use kurbo::Rect;
use scrollfx_core::{EffectError, Page, Viewport};
use wasm_bindgen::{JsCast as _, JsValue};
use web_sys::{
    Document, Element, HtmlElement, NodeList, ScrollBehavior, ScrollIntoViewOptions,
    ScrollLogicalPosition, Window,
};

/// A [`Page`] backed by a browser document.
#[derive(Clone)]
pub struct DomPage {
    window: Window,
    document: Document,
}

impl core::fmt::Debug for DomPage {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("DomPage")
            .field("url", &self.document.url().ok())
            .finish_non_exhaustive()
    }
}

impl DomPage {
    /// Wraps the document of `window`.
    pub fn new(window: Window) -> Result<Self, EffectError> {
        let document = window
            .document()
            .ok_or_else(|| EffectError::host("window.document", "window has no document"))?;
        Ok(Self { window, document })
    }

    /// Wraps the global window's document.
    pub fn from_global() -> Result<Self, EffectError> {
        let window =
            web_sys::window().ok_or_else(|| EffectError::host("window", "no global window"))?;
        Self::new(window)
    }

    /// The wrapped window.
    #[must_use]
    pub fn window(&self) -> &Window {
        &self.window
    }

    /// The wrapped document.
    #[must_use]
    pub fn document(&self) -> &Document {
        &self.document
    }
}

/// Best-effort text for a thrown JS value.
pub(crate) fn js_message(value: &JsValue) -> String {
    if let Some(s) = value.as_string() {
        return s;
    }
    if let Some(err) = value.dyn_ref::<js_sys::Error>() {
        return String::from(err.message());
    }
    format!("{value:?}")
}

fn elements(list: Result<NodeList, JsValue>, selector: &str) -> Vec<Element> {
    let list = match list {
        Ok(list) => list,
        Err(err) => {
            log::warn!("invalid selector {selector:?}: {}", js_message(&err));
            return Vec::new();
        }
    };
    (0..list.length())
        .filter_map(|i| list.item(i))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect()
}

impl Page for DomPage {
    type Element = Element;

    fn query_all(&self, selector: &str) -> Vec<Element> {
        elements(self.document.query_selector_all(selector), selector)
    }

    fn query_within(&self, root: &Element, selector: &str) -> Vec<Element> {
        elements(root.query_selector_all(selector), selector)
    }

    fn element_by_id(&self, id: &str) -> Option<Element> {
        self.document.get_element_by_id(id)
    }

    fn body(&self) -> Option<Element> {
        self.document.body().map(Element::from)
    }

    fn attribute(&self, el: &Element, name: &str) -> Option<String> {
        el.get_attribute(name)
    }

    fn set_attribute(&mut self, el: &Element, name: &str, value: &str) {
        let _ = el.set_attribute(name, value);
    }

    fn remove_attribute(&mut self, el: &Element, name: &str) {
        let _ = el.remove_attribute(name);
    }

    fn add_class(&mut self, el: &Element, class: &str) {
        let list = el.class_list();
        for token in class.split_whitespace() {
            let _ = list.add_1(token);
        }
    }

    fn remove_class(&mut self, el: &Element, class: &str) {
        let list = el.class_list();
        for token in class.split_whitespace() {
            let _ = list.remove_1(token);
        }
    }

    fn has_class(&self, el: &Element, class: &str) -> bool {
        el.class_list().contains(class)
    }

    fn set_style(&mut self, el: &Element, property: &str, value: &str) {
        if let Some(html) = el.dyn_ref::<HtmlElement>() {
            let _ = html.style().set_property(property, value);
        }
    }

    fn set_text(&mut self, el: &Element, text: &str) {
        el.set_text_content(Some(text));
    }

    fn text(&self, el: &Element) -> String {
        el.text_content().unwrap_or_default()
    }

    fn bounding_rect(&self, el: &Element) -> Option<Rect> {
        if !el.is_connected() {
            return None;
        }
        let r = el.get_bounding_client_rect();
        Some(Rect::new(r.left(), r.top(), r.right(), r.bottom()))
    }

    fn offset_top(&self, el: &Element) -> f64 {
        el.dyn_ref::<HtmlElement>()
            .map_or(0.0, |html| f64::from(html.offset_top()))
    }

    fn viewport(&self) -> Viewport {
        let root = self.document.document_element();
        let (width, height, scroll_height) = root.as_ref().map_or((0.0, 0.0, 0.0), |root| {
            (
                f64::from(root.client_width()),
                f64::from(root.client_height()),
                f64::from(root.scroll_height()),
            )
        });
        Viewport {
            scroll_y: self.window.scroll_y().unwrap_or(0.0),
            width,
            height,
            scroll_height,
        }
    }

    fn create_element(&mut self, tag: &str) -> Result<Element, EffectError> {
        self.document
            .create_element(tag)
            .map_err(|err| EffectError::host("document.createElement", js_message(&err)))
    }

    fn append_child(&mut self, parent: &Element, child: &Element) -> Result<(), EffectError> {
        parent
            .append_child(child)
            .map(drop)
            .map_err(|err| EffectError::host("appendChild", js_message(&err)))
    }

    fn remove(&mut self, el: &Element) {
        el.remove();
    }

    fn scroll_into_view(&mut self, el: &Element) {
        let options = ScrollIntoViewOptions::new();
        options.set_behavior(ScrollBehavior::Smooth);
        options.set_block(ScrollLogicalPosition::Start);
        el.scroll_into_view_with_scroll_into_view_options(&options);
    }
}
