// Copyright 2026 the Scrollfx Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! In-memory [`Page`] for headless simulation and tests.
//!
//! [`MemoryPage`] is a tiny document model: an element arena with a fixed
//! layout box per element (in document coordinates), a scroll position and a
//! viewport size. There is no layout engine; callers place boxes explicitly.
//!
//! Selector support covers what the effects use: compound selectors of a
//! tag, `#id`, `.class` and `[attr]` / `[attr="v"]` / `[attr^="v"]`, joined
//! by descendant combinators (whitespace). Attribute values must not contain
//! whitespace.

use alloc::collections::BTreeMap;
use alloc::string::{String, ToString};
use alloc::vec;
use alloc::vec::Vec;

use kurbo::Rect;

use crate::error::EffectError;
use crate::page::{Page, Viewport};

/// Handle to an element of a [`MemoryPage`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ElementId(u32);

#[derive(Clone, Debug)]
struct Node {
    tag: String,
    parent: Option<ElementId>,
    children: Vec<ElementId>,
    classes: Vec<String>,
    attributes: BTreeMap<String, String>,
    style: BTreeMap<String, String>,
    text: String,
    layout: Rect,
}

impl Node {
    fn new(tag: &str, layout: Rect) -> Self {
        Self {
            tag: tag.to_ascii_lowercase(),
            parent: None,
            children: Vec::new(),
            classes: Vec::new(),
            attributes: BTreeMap::new(),
            style: BTreeMap::new(),
            text: String::new(),
            layout,
        }
    }
}

/// An in-memory document.
#[derive(Clone, Debug)]
pub struct MemoryPage {
    nodes: Vec<Node>,
    root: ElementId,
    body: ElementId,
    scroll_y: f64,
    width: f64,
    height: f64,
    scrolled_into_view: Vec<ElementId>,
    fail_create: bool,
}

impl MemoryPage {
    /// Creates a document with an `<html>` root and an empty `<body>`,
    /// scrolled to the top of a `width × height` viewport.
    #[must_use]
    pub fn new(width: f64, height: f64) -> Self {
        let root = Node::new("html", Rect::ZERO);
        let mut body = Node::new("body", Rect::ZERO);
        body.parent = Some(ElementId(0));
        let mut page = Self {
            nodes: vec![root, body],
            root: ElementId(0),
            body: ElementId(1),
            scroll_y: 0.0,
            width,
            height,
            scrolled_into_view: Vec::new(),
            fail_create: false,
        };
        page.nodes[0].children.push(ElementId(1));
        page
    }

    /// The `<body>` element.
    #[must_use]
    pub fn body_id(&self) -> ElementId {
        self.body
    }

    /// Appends a new element under `parent` with the given layout box in
    /// document coordinates.
    pub fn add(&mut self, parent: ElementId, tag: &str, layout: Rect) -> ElementId {
        let id = self.alloc(Node::new(tag, layout));
        self.link(parent, id);
        id
    }

    /// Moves the layout box of an element.
    pub fn set_layout(&mut self, el: ElementId, layout: Rect) {
        self.node_mut(el).layout = layout;
    }

    /// Scrolls the document, clamped to the scrollable range.
    pub fn scroll_to(&mut self, y: f64) {
        let max = (self.scroll_height() - self.height).max(0.0);
        self.scroll_y = y.clamp(0.0, max);
    }

    /// Resizes the viewport.
    pub fn resize(&mut self, width: f64, height: f64) {
        self.width = width;
        self.height = height;
    }

    /// Detaches an element (and its subtree) from the document.
    pub fn detach(&mut self, el: ElementId) {
        if let Some(parent) = self.node(el).parent {
            self.node_mut(parent).children.retain(|&c| c != el);
        }
        self.node_mut(el).parent = None;
    }

    /// Whether the element is reachable from the document root.
    #[must_use]
    pub fn is_connected(&self, el: ElementId) -> bool {
        let mut cur = Some(el);
        while let Some(id) = cur {
            if id == self.root {
                return true;
            }
            cur = self.node(id).parent;
        }
        false
    }

    /// An inline style property, if set.
    #[must_use]
    pub fn style(&self, el: ElementId, property: &str) -> Option<&str> {
        self.node(el).style.get(property).map(String::as_str)
    }

    /// The element's parent, if attached.
    #[must_use]
    pub fn parent(&self, el: ElementId) -> Option<ElementId> {
        self.node(el).parent
    }

    /// Elements passed to [`Page::scroll_into_view`], oldest first.
    #[must_use]
    pub fn scrolled_into_view(&self) -> &[ElementId] {
        &self.scrolled_into_view
    }

    /// Makes [`Page::create_element`] fail, to exercise init error paths.
    pub fn fail_element_creation(&mut self, fail: bool) {
        self.fail_create = fail;
    }

    fn alloc(&mut self, node: Node) -> ElementId {
        let idx = u32::try_from(self.nodes.len()).unwrap_or(u32::MAX);
        self.nodes.push(node);
        ElementId(idx)
    }

    fn link(&mut self, parent: ElementId, child: ElementId) {
        self.detach(child);
        self.node_mut(child).parent = Some(parent);
        self.node_mut(parent).children.push(child);
    }

    fn node(&self, el: ElementId) -> &Node {
        &self.nodes[el.0 as usize]
    }

    fn node_mut(&mut self, el: ElementId) -> &mut Node {
        &mut self.nodes[el.0 as usize]
    }

    fn scroll_height(&self) -> f64 {
        self.descendants(self.root)
            .into_iter()
            .map(|id| self.node(id).layout.y1)
            .fold(self.height, f64::max)
    }

    /// Descendants of `root` (excluding it) in document order.
    fn descendants(&self, root: ElementId) -> Vec<ElementId> {
        let mut out = Vec::new();
        let mut stack: Vec<ElementId> = self.node(root).children.iter().rev().copied().collect();
        while let Some(id) = stack.pop() {
            out.push(id);
            stack.extend(self.node(id).children.iter().rev().copied());
        }
        out
    }

    fn matches(&self, el: ElementId, selector: &Selector) -> bool {
        let Some((last, rest)) = selector.parts.split_last() else {
            return false;
        };
        if !self.matches_compound(el, last) {
            return false;
        }
        let mut remaining = rest.iter().rev().peekable();
        let mut cur = self.node(el).parent;
        while let Some(id) = cur {
            let Some(compound) = remaining.peek() else {
                break;
            };
            if self.matches_compound(id, compound) {
                remaining.next();
            }
            cur = self.node(id).parent;
        }
        remaining.peek().is_none()
    }

    fn matches_compound(&self, el: ElementId, compound: &Compound) -> bool {
        let node = self.node(el);
        if let Some(tag) = &compound.tag
            && *tag != node.tag
        {
            return false;
        }
        if let Some(id) = &compound.id
            && node.attributes.get("id") != Some(id)
        {
            return false;
        }
        if !compound.classes.iter().all(|c| node.classes.contains(c)) {
            return false;
        }
        compound.attributes.iter().all(|attr| {
            let value = if attr.name == "class" {
                (!node.classes.is_empty()).then(|| node.classes.join(" "))
            } else {
                node.attributes.get(&attr.name).cloned()
            };
            match (&attr.op, value) {
                (_, None) => false,
                (AttrOp::Exists, Some(_)) => true,
                (AttrOp::Equals(v), Some(actual)) => actual == *v,
                (AttrOp::Prefix(v), Some(actual)) => actual.starts_with(v.as_str()),
            }
        })
    }
}

#[derive(Clone, Debug, PartialEq)]
enum AttrOp {
    Exists,
    Equals(String),
    Prefix(String),
}

#[derive(Clone, Debug, PartialEq)]
struct AttrSelector {
    name: String,
    op: AttrOp,
}

#[derive(Clone, Debug, Default, PartialEq)]
struct Compound {
    tag: Option<String>,
    id: Option<String>,
    classes: Vec<String>,
    attributes: Vec<AttrSelector>,
}

#[derive(Clone, Debug, PartialEq)]
struct Selector {
    parts: Vec<Compound>,
}

impl Selector {
    /// Parses the supported selector subset; `None` for anything else.
    fn parse(src: &str) -> Option<Self> {
        let parts = src
            .split_whitespace()
            .map(parse_compound)
            .collect::<Option<Vec<_>>>()?;
        (!parts.is_empty()).then_some(Self { parts })
    }
}

fn is_ident_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '-' || c == '_'
}

fn take_ident(s: &str) -> (&str, &str) {
    let end = s.find(|c: char| !is_ident_char(c)).unwrap_or(s.len());
    s.split_at(end)
}

fn unquote(v: &str) -> &str {
    v.strip_prefix('"')
        .and_then(|v| v.strip_suffix('"'))
        .or_else(|| v.strip_prefix('\'').and_then(|v| v.strip_suffix('\'')))
        .unwrap_or(v)
}

fn parse_compound(src: &str) -> Option<Compound> {
    let mut compound = Compound::default();
    let (tag, mut rest) = take_ident(src);
    if !tag.is_empty() {
        compound.tag = Some(tag.to_ascii_lowercase());
    }
    while let Some(c) = rest.chars().next() {
        match c {
            '#' | '.' => {
                let (ident, tail) = take_ident(&rest[1..]);
                if ident.is_empty() {
                    return None;
                }
                if c == '#' {
                    compound.id = Some(ident.to_string());
                } else {
                    compound.classes.push(ident.to_string());
                }
                rest = tail;
            }
            '[' => {
                let close = rest.find(']')?;
                let body = &rest[1..close];
                let attr = if let Some((name, value)) = body.split_once("^=") {
                    AttrSelector {
                        name: name.to_string(),
                        op: AttrOp::Prefix(unquote(value).to_string()),
                    }
                } else if let Some((name, value)) = body.split_once('=') {
                    AttrSelector {
                        name: name.to_string(),
                        op: AttrOp::Equals(unquote(value).to_string()),
                    }
                } else {
                    AttrSelector {
                        name: body.to_string(),
                        op: AttrOp::Exists,
                    }
                };
                compound.attributes.push(attr);
                rest = &rest[close + 1..];
            }
            _ => return None,
        }
    }
    Some(compound)
}

impl Page for MemoryPage {
    type Element = ElementId;

    fn query_all(&self, selector: &str) -> Vec<ElementId> {
        let Some(selector) = Selector::parse(selector) else {
            return Vec::new();
        };
        self.descendants(self.root)
            .into_iter()
            .filter(|&id| self.matches(id, &selector))
            .collect()
    }

    fn query_within(&self, root: &ElementId, selector: &str) -> Vec<ElementId> {
        let Some(selector) = Selector::parse(selector) else {
            return Vec::new();
        };
        self.descendants(*root)
            .into_iter()
            .filter(|&id| self.matches(id, &selector))
            .collect()
    }

    fn element_by_id(&self, id: &str) -> Option<ElementId> {
        self.descendants(self.root)
            .into_iter()
            .find(|&el| self.node(el).attributes.get("id").map(String::as_str) == Some(id))
    }

    fn body(&self) -> Option<ElementId> {
        Some(self.body)
    }

    fn attribute(&self, el: &ElementId, name: &str) -> Option<String> {
        let node = self.node(*el);
        if name == "class" {
            return (!node.classes.is_empty()).then(|| node.classes.join(" "));
        }
        node.attributes.get(name).cloned()
    }

    fn set_attribute(&mut self, el: &ElementId, name: &str, value: &str) {
        let node = self.node_mut(*el);
        if name == "class" {
            node.classes = value.split_whitespace().map(ToString::to_string).collect();
        } else {
            node.attributes.insert(name.to_string(), value.to_string());
        }
    }

    fn remove_attribute(&mut self, el: &ElementId, name: &str) {
        let node = self.node_mut(*el);
        if name == "class" {
            node.classes.clear();
        } else {
            node.attributes.remove(name);
        }
    }

    fn add_class(&mut self, el: &ElementId, class: &str) {
        let node = self.node_mut(*el);
        for c in class.split_whitespace() {
            if !node.classes.iter().any(|have| have == c) {
                node.classes.push(c.to_string());
            }
        }
    }

    fn remove_class(&mut self, el: &ElementId, class: &str) {
        let node = self.node_mut(*el);
        node.classes.retain(|have| !class.split_whitespace().any(|c| c == have));
    }

    fn has_class(&self, el: &ElementId, class: &str) -> bool {
        self.node(*el).classes.iter().any(|have| have == class)
    }

    fn set_style(&mut self, el: &ElementId, property: &str, value: &str) {
        self.node_mut(*el)
            .style
            .insert(property.to_string(), value.to_string());
    }

    fn set_text(&mut self, el: &ElementId, text: &str) {
        let node = self.node_mut(*el);
        node.text.clear();
        node.text.push_str(text);
    }

    fn text(&self, el: &ElementId) -> String {
        self.node(*el).text.clone()
    }

    fn bounding_rect(&self, el: &ElementId) -> Option<Rect> {
        if !self.is_connected(*el) {
            return None;
        }
        let layout = self.node(*el).layout;
        Some(Rect::new(
            layout.x0,
            layout.y0 - self.scroll_y,
            layout.x1,
            layout.y1 - self.scroll_y,
        ))
    }

    fn offset_top(&self, el: &ElementId) -> f64 {
        self.node(*el).layout.y0
    }

    fn viewport(&self) -> Viewport {
        Viewport {
            scroll_y: self.scroll_y,
            width: self.width,
            height: self.height,
            scroll_height: self.scroll_height(),
        }
    }

    fn create_element(&mut self, tag: &str) -> Result<ElementId, EffectError> {
        if self.fail_create {
            return Err(EffectError::host("create_element", "element creation disabled"));
        }
        Ok(self.alloc(Node::new(tag, Rect::ZERO)))
    }

    fn append_child(&mut self, parent: &ElementId, child: &ElementId) -> Result<(), EffectError> {
        let mut cur = Some(*parent);
        while let Some(id) = cur {
            if id == *child {
                return Err(EffectError::host(
                    "append_child",
                    "child is an ancestor of parent",
                ));
            }
            cur = self.node(id).parent;
        }
        self.link(*parent, *child);
        Ok(())
    }

    fn remove(&mut self, el: &ElementId) {
        self.detach(*el);
    }

    fn scroll_into_view(&mut self, el: &ElementId) {
        if !self.is_connected(*el) {
            return;
        }
        self.scrolled_into_view.push(*el);
        let top = self.node(*el).layout.y0;
        self.scroll_to(top);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page() -> (MemoryPage, ElementId, ElementId) {
        let mut page = MemoryPage::new(800.0, 600.0);
        let body = page.body_id();
        let nav = page.add(body, "nav", Rect::new(0.0, 0.0, 800.0, 50.0));
        let link = page.add(nav, "a", Rect::new(0.0, 0.0, 80.0, 50.0));
        page.set_attribute(&link, "href", "#pricing");
        let section = page.add(body, "section", Rect::new(0.0, 900.0, 800.0, 1500.0));
        page.set_attribute(&section, "id", "pricing");
        (page, link, section)
    }

    #[test]
    fn selectors_cover_descendants_and_attribute_prefixes() {
        let (page, link, section) = page();
        assert_eq!(page.query_all("nav a[href^=\"#\"]"), [link]);
        assert_eq!(page.query_all("a[href^='#']"), [link]);
        assert_eq!(page.query_all("section[id]"), [section]);
        assert_eq!(page.query_all("#pricing"), [section]);
        assert!(page.query_all("section a").is_empty());
        assert!(page.query_all("div > a").is_empty(), "unsupported syntax matches nothing");
    }

    #[test]
    fn class_attribute_and_class_list_agree() {
        let (mut page, link, _) = page();
        page.set_attribute(&link, "class", "btn  primary");
        assert!(page.has_class(&link, "primary"));
        page.add_class(&link, "active");
        assert_eq!(page.attribute(&link, "class").as_deref(), Some("btn primary active"));
        assert_eq!(page.query_all("a.btn.active"), [link]);
        page.remove_class(&link, "btn");
        assert!(!page.has_class(&link, "btn"));
    }

    #[test]
    fn bounding_rect_is_viewport_relative() {
        let (mut page, _, section) = page();
        page.scroll_to(400.0);
        assert_eq!(
            page.bounding_rect(&section),
            Some(Rect::new(0.0, 500.0, 800.0, 1100.0))
        );
        assert_eq!(page.viewport().scroll_height, 1500.0);
        page.scroll_to(10_000.0);
        assert_eq!(page.viewport().scroll_y, 900.0, "clamped to scrollable range");
    }

    #[test]
    fn detached_elements_have_no_rect() {
        let (mut page, link, _) = page();
        page.detach(link);
        assert!(!page.is_connected(link));
        assert_eq!(page.bounding_rect(&link), None);
        assert!(page.query_all("a").is_empty());
    }

    #[test]
    fn append_rejects_cycles() {
        let (mut page, link, _) = page();
        let nav = page.parent(link).unwrap();
        assert!(page.append_child(&link, &nav).is_err());
    }

    #[test]
    fn scroll_into_view_aligns_top() {
        let (mut page, _, section) = page();
        page.scroll_into_view(&section);
        assert_eq!(page.viewport().scroll_y, 900.0);
        assert_eq!(page.scrolled_into_view(), [section]);
    }
}
