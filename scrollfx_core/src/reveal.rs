// Copyright 2026 the Scrollfx Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Reveal planning for triggered elements.
//!
//! When a watched element fires, [`plan_reveal`] decides what to mark:
//! either the element itself, or each of its stagger items at
//! `index × interval` after the trigger. The engine schedules the resulting
//! [`RevealStep`]s on its timer queue and [`apply_reveal`] performs each one.

use alloc::string::String;
use alloc::vec;
use alloc::vec::Vec;

use crate::config::Markers;
use crate::page::Page;
use crate::time::Duration;

/// One element to mark as revealed, and when.
#[derive(Clone, Debug, PartialEq)]
pub struct RevealStep<E> {
    /// Element receiving the revealed class.
    pub element: E,
    /// Animation class to add alongside it, if any.
    pub animation: Option<String>,
    /// Delay after the trigger.
    pub delay: Duration,
}

/// Reads an animation attribute, treating an empty value as absent.
fn animation_of<P: Page>(page: &P, el: &P::Element, markers: &Markers) -> Option<String> {
    page.attribute(el, markers.animation_attr)
        .filter(|name| !name.trim().is_empty())
}

/// Plans the reveal of a triggered element.
///
/// With stagger items, the `k`th item (document order) is revealed after
/// `k × interval` using its own animation, else the parent's, else
/// [`Markers::default_animation`]. Without any, the element itself is
/// revealed immediately with its own animation, if it names one.
pub fn plan_reveal<P: Page>(
    page: &P,
    el: &P::Element,
    markers: &Markers,
    interval: Duration,
) -> Vec<RevealStep<P::Element>> {
    let parent_animation = animation_of(page, el, markers);
    let items = page.query_within(el, markers.stagger_item);
    if items.is_empty() {
        return vec![RevealStep {
            element: el.clone(),
            animation: parent_animation,
            delay: Duration::ZERO,
        }];
    }
    items
        .into_iter()
        .zip(0_u64..)
        .map(|(item, k)| {
            let animation = animation_of(page, &item, markers)
                .or_else(|| parent_animation.clone())
                .unwrap_or_else(|| String::from(markers.default_animation));
            RevealStep {
                element: item,
                animation: Some(animation),
                delay: interval.saturating_mul(k),
            }
        })
        .collect()
}

/// Marks an element revealed and applies its animation class.
pub fn apply_reveal<P: Page>(
    page: &mut P,
    el: &P::Element,
    animation: Option<&str>,
    markers: &Markers,
) {
    page.add_class(el, markers.revealed_class);
    if let Some(animation) = animation {
        page.add_class(el, animation);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemoryPage;
    use kurbo::Rect;

    const MARKERS: Markers = Markers::page_defaults();

    fn section(page: &mut MemoryPage) -> crate::memory::ElementId {
        let body = page.body_id();
        let el = page.add(body, "div", Rect::new(0.0, 0.0, 100.0, 100.0));
        page.add_class(&el, "animate-on-scroll");
        el
    }

    #[test]
    fn plain_element_reveals_itself() {
        let mut page = MemoryPage::new(800.0, 600.0);
        let el = section(&mut page);
        page.set_attribute(&el, "data-anim", "animate-fade");

        let steps = plan_reveal(&page, &el, &MARKERS, Duration::from_millis(120));
        assert_eq!(
            steps,
            [RevealStep {
                element: el,
                animation: Some(String::from("animate-fade")),
                delay: Duration::ZERO,
            }]
        );

        apply_reveal(&mut page, &el, steps[0].animation.as_deref(), &MARKERS);
        assert!(page.has_class(&el, "animated"));
        assert!(page.has_class(&el, "animate-fade"));
    }

    #[test]
    fn stagger_items_cascade_with_animation_fallbacks() {
        let mut page = MemoryPage::new(800.0, 600.0);
        let parent = section(&mut page);
        let mut items = Vec::new();
        for _ in 0..3 {
            let item = page.add(parent, "li", Rect::new(0.0, 0.0, 10.0, 10.0));
            page.add_class(&item, "stagger-item");
            items.push(item);
        }
        page.set_attribute(&items[1], "data-anim", "animate-slide");

        let steps = plan_reveal(&page, &parent, &MARKERS, Duration::from_millis(120));
        let delays: Vec<_> = steps.iter().map(|s| s.delay.as_millis()).collect();
        assert_eq!(delays, [0, 120, 240]);
        assert_eq!(steps[0].animation.as_deref(), Some("animate-pop"));
        assert_eq!(steps[1].animation.as_deref(), Some("animate-slide"));

        page.set_attribute(&parent, "data-anim", "animate-rise");
        let steps = plan_reveal(&page, &parent, &MARKERS, Duration::from_millis(120));
        assert_eq!(steps[0].animation.as_deref(), Some("animate-rise"));
        assert_eq!(steps[1].animation.as_deref(), Some("animate-slide"));
    }

    #[test]
    fn empty_animation_attribute_counts_as_absent() {
        let mut page = MemoryPage::new(800.0, 600.0);
        let el = section(&mut page);
        page.set_attribute(&el, "data-anim", "");
        let steps = plan_reveal(&page, &el, &MARKERS, Duration::from_millis(120));
        assert_eq!(steps[0].animation, None);
    }
}
