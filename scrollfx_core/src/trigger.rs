// Copyright 2026 the Scrollfx Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! One-shot viewport visibility triggering.
//!
//! A [`VisibilityTrigger`] watches a list of elements. Each call to
//! [`evaluate`](VisibilityTrigger::evaluate) measures every watched element
//! against the current viewport and hands back the ones that crossed the
//! threshold, dropping them from the watch list. An element therefore fires
//! at most once no matter how often it scrolls in and out.

use alloc::vec::Vec;

use kurbo::Rect;

use crate::page::Page;

/// Fraction of `rect` that lies inside `viewport`, in `0.0..=1.0`.
///
/// A zero-area rect (e.g. an empty inline element) counts as fully visible
/// when it touches the viewport, edges included.
#[must_use]
pub fn visible_fraction(rect: Rect, viewport: Rect) -> f64 {
    let area = rect.area();
    if !area.is_finite() {
        return 0.0;
    }
    if area <= 0.0 {
        let touches = rect.x0 <= viewport.x1
            && rect.x1 >= viewport.x0
            && rect.y0 <= viewport.y1
            && rect.y1 >= viewport.y0;
        return if touches { 1.0 } else { 0.0 };
    }
    let overlap = rect.intersect(viewport);
    (overlap.area() / area).clamp(0.0, 1.0)
}

/// Whether a visible fraction satisfies `threshold`.
///
/// A threshold of zero means "any intersection": the fraction must be
/// strictly positive.
#[must_use]
pub fn meets_threshold(fraction: f64, threshold: f64) -> bool {
    if threshold <= 0.0 {
        fraction > 0.0
    } else {
        fraction >= threshold
    }
}

/// Watches elements and fires each one once when it becomes visible enough.
#[derive(Clone, Debug)]
pub struct VisibilityTrigger<E> {
    threshold: f64,
    watched: Vec<E>,
}

impl<E: Clone + PartialEq> VisibilityTrigger<E> {
    /// Creates an empty trigger with the given visible-fraction threshold.
    #[must_use]
    pub fn new(threshold: f64) -> Self {
        Self {
            threshold,
            watched: Vec::new(),
        }
    }

    /// Starts watching `el`. Watching an element twice is a no-op.
    pub fn watch(&mut self, el: E) {
        if !self.watched.contains(&el) {
            self.watched.push(el);
        }
    }

    /// Number of elements still waiting to fire.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.watched.len()
    }

    /// Whether `el` is still waiting to fire.
    #[must_use]
    pub fn is_watching(&self, el: &E) -> bool {
        self.watched.contains(el)
    }

    /// Drops every watched element.
    pub fn clear(&mut self) {
        self.watched.clear();
    }

    /// Measures every watched element and returns, in watch order, those
    /// that meet the threshold. Returned elements are no longer watched.
    ///
    /// Detached elements are skipped and stay watched.
    pub fn evaluate<P>(&mut self, page: &P) -> Vec<E>
    where
        P: Page<Element = E>,
    {
        let viewport = page.viewport().client_rect();
        let threshold = self.threshold;
        let mut fired = Vec::new();
        self.watched.retain(|el| {
            let Some(rect) = page.bounding_rect(el) else {
                return true;
            };
            if meets_threshold(visible_fraction(rect, viewport), threshold) {
                fired.push(el.clone());
                false
            } else {
                true
            }
        });
        fired
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemoryPage;

    const VIEW: Rect = Rect::new(0.0, 0.0, 1000.0, 800.0);

    #[test]
    fn fraction_of_partially_visible_rect() {
        // 100px tall, 10px inside the bottom edge.
        let rect = Rect::new(0.0, 790.0, 100.0, 890.0);
        let f = visible_fraction(rect, VIEW);
        assert!(f > 0.099_999 && f < 0.100_001, "expected 0.1, got {f}");
    }

    #[test]
    fn zero_area_rect_inside_counts_as_visible() {
        let rect = Rect::new(10.0, 10.0, 10.0, 10.0);
        assert_eq!(visible_fraction(rect, VIEW), 1.0);
        let outside = Rect::new(10.0, 900.0, 10.0, 900.0);
        assert_eq!(visible_fraction(outside, VIEW), 0.0);
    }

    #[test]
    fn zero_height_rect_wider_than_viewport_is_visible() {
        let wide = Rect::new(-100.0, 300.0, 1500.0, 300.0);
        assert_eq!(visible_fraction(wide, VIEW), 1.0);
        let on_bottom_edge = Rect::new(0.0, 800.0, 1200.0, 800.0);
        assert_eq!(visible_fraction(on_bottom_edge, VIEW), 1.0);
        let left_of_view = Rect::new(-600.0, 300.0, -1.0, 300.0);
        assert_eq!(visible_fraction(left_of_view, VIEW), 0.0);
    }

    #[test]
    fn zero_threshold_needs_actual_overlap() {
        assert!(!meets_threshold(0.0, 0.0));
        assert!(meets_threshold(0.01, 0.0));
        assert!(meets_threshold(0.1, 0.1));
        assert!(!meets_threshold(0.09, 0.1));
    }

    #[test]
    fn fires_once_and_stops_watching() {
        let mut page = MemoryPage::new(1000.0, 800.0);
        let body = page.body_id();
        let el = page.add(body, "div", Rect::new(0.0, 1000.0, 100.0, 1100.0));
        let mut trigger = VisibilityTrigger::new(0.1);
        trigger.watch(el);

        assert!(trigger.evaluate(&page).is_empty(), "below the fold");
        page.scroll_to(400.0);
        assert_eq!(trigger.evaluate(&page), [el]);
        page.scroll_to(0.0);
        page.scroll_to(400.0);
        assert!(trigger.evaluate(&page).is_empty(), "must not re-fire");
        assert_eq!(trigger.pending(), 0);
    }

    #[test]
    fn detached_elements_are_skipped_not_fatal() {
        let mut page = MemoryPage::new(1000.0, 800.0);
        let body = page.body_id();
        let el = page.add(body, "div", Rect::new(0.0, 0.0, 100.0, 100.0));
        page.detach(el);
        let mut trigger = VisibilityTrigger::new(0.1);
        trigger.watch(el);
        assert!(trigger.evaluate(&page).is_empty());
        assert!(trigger.is_watching(&el));
    }

    #[test]
    fn watching_twice_fires_once() {
        let mut page = MemoryPage::new(1000.0, 800.0);
        let body = page.body_id();
        let el = page.add(body, "div", Rect::new(0.0, 0.0, 100.0, 100.0));
        let mut trigger = VisibilityTrigger::new(0.5);
        trigger.watch(el);
        trigger.watch(el);
        assert_eq!(trigger.evaluate(&page).len(), 1);
    }
}
