// Copyright 2026 the Scrollfx Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The document contract the effects engine drives.
//!
//! Scrollfx splits page work the same way a compositor splits platform work:
//! `scrollfx_core` owns triggering, timing and formulas, and a backend
//! implements [`Page`] over a real document. `scrollfx_backend_web` provides
//! `DomPage` over `web-sys`; [`MemoryPage`](crate::memory::MemoryPage) is an
//! in-memory implementation for headless runs and tests.
//!
//! Element handles are cheap clones. A handle may outlive the element's
//! place in the document: [`Page::bounding_rect`] returns `None` for a
//! detached element, and mutations on one are allowed but invisible.

use alloc::string::String;
use alloc::vec::Vec;
use core::fmt::Debug;

use kurbo::Rect;

use crate::error::EffectError;

/// Scroll position and extents of the viewport and document.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Viewport {
    /// Vertical scroll offset of the document, in px.
    pub scroll_y: f64,
    /// Viewport width, in px.
    pub width: f64,
    /// Viewport height, in px.
    pub height: f64,
    /// Total scrollable height of the document, in px.
    pub scroll_height: f64,
}

impl Viewport {
    /// The viewport as a rect in client coordinates (origin at top-left).
    #[must_use]
    pub fn client_rect(&self) -> Rect {
        Rect::new(0.0, 0.0, self.width.max(0.0), self.height.max(0.0))
    }
}

/// A document the effects engine can query and mutate.
pub trait Page {
    /// Handle to an element in this page.
    type Element: Clone + PartialEq + Debug;

    /// All elements matching `selector`, in document order.
    fn query_all(&self, selector: &str) -> Vec<Self::Element>;

    /// Descendants of `root` matching `selector`, in document order.
    fn query_within(&self, root: &Self::Element, selector: &str) -> Vec<Self::Element>;

    /// The element with the given id, if any.
    fn element_by_id(&self, id: &str) -> Option<Self::Element>;

    /// The document body, if any.
    fn body(&self) -> Option<Self::Element>;

    /// Reads an attribute.
    fn attribute(&self, el: &Self::Element, name: &str) -> Option<String>;

    /// Writes an attribute.
    fn set_attribute(&mut self, el: &Self::Element, name: &str, value: &str);

    /// Removes an attribute.
    fn remove_attribute(&mut self, el: &Self::Element, name: &str);

    /// Adds a class.
    fn add_class(&mut self, el: &Self::Element, class: &str);

    /// Removes a class.
    fn remove_class(&mut self, el: &Self::Element, class: &str);

    /// Whether the element carries `class`.
    fn has_class(&self, el: &Self::Element, class: &str) -> bool;

    /// Sets an inline style property.
    fn set_style(&mut self, el: &Self::Element, property: &str, value: &str);

    /// Replaces the element's text content.
    fn set_text(&mut self, el: &Self::Element, text: &str);

    /// The element's text content.
    fn text(&self, el: &Self::Element) -> String;

    /// Bounding box in client (viewport) coordinates, or `None` when the
    /// element is not connected to the document.
    fn bounding_rect(&self, el: &Self::Element) -> Option<Rect>;

    /// Distance from the top of the document to the element's top, in px.
    fn offset_top(&self, el: &Self::Element) -> f64;

    /// Current scroll position and extents.
    fn viewport(&self) -> Viewport;

    /// Creates a detached element.
    fn create_element(&mut self, tag: &str) -> Result<Self::Element, EffectError>;

    /// Appends `child` to `parent`.
    fn append_child(&mut self, parent: &Self::Element, child: &Self::Element)
    -> Result<(), EffectError>;

    /// Detaches the element from the document.
    fn remove(&mut self, el: &Self::Element);

    /// Smoothly scrolls so the element's top aligns with the viewport top.
    fn scroll_into_view(&mut self, el: &Self::Element);
}
