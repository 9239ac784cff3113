// Copyright 2026 the Scrollfx Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Stateless event-to-style mappings.
//!
//! Parallax, scroll progress, cursor glow, card tilt and nav highlighting
//! each map one input (scroll position, pointer position) to a style value.
//! Nothing here touches a [`Page`](crate::page::Page); the engine applies
//! the results.

use alloc::format;
use alloc::string::String;

use kurbo::{Point, Rect, Vec2};

/// Formats a CSS number: at most three decimals, trailing zeros trimmed,
/// negative zero and non-finite values written as `0`.
#[must_use]
pub fn css_number(value: f64) -> String {
    if !value.is_finite() {
        return String::from("0");
    }
    let mut s = format!("{value:.3}");
    if s.contains('.') {
        let trimmed = s.trim_end_matches('0').trim_end_matches('.').len();
        s.truncate(trimmed);
    }
    if s == "-0" {
        s.remove(0);
    }
    s
}

/// Parses a parallax speed attribute, falling back to `default` when it is
/// missing, empty, or not a finite number.
#[must_use]
pub fn parse_speed(raw: Option<&str>, default: f64) -> f64 {
    raw.map(str::trim)
        .filter(|s| !s.is_empty())
        .and_then(|s| s.parse::<f64>().ok())
        .filter(|v| v.is_finite())
        .unwrap_or(default)
}

/// Vertical parallax offset for a layer: `-(scroll_y × speed)`.
#[must_use]
pub fn parallax_offset(scroll_y: f64, speed: f64) -> f64 {
    -(scroll_y * speed)
}

/// CSS `transform` value for a parallax offset.
#[must_use]
pub fn parallax_transform(offset: f64) -> String {
    format!("translateY({}px)", css_number(offset))
}

/// Scroll progress in percent.
///
/// The scrollable distance is `scroll_height - viewport_height`. When the
/// document cannot scroll (distance zero or negative) the result is `0`
/// rather than a non-finite value. Overscroll is clamped to `0..=100`.
#[must_use]
pub fn progress_percent(scroll_y: f64, scroll_height: f64, viewport_height: f64) -> f64 {
    let scrollable = scroll_height - viewport_height;
    if !scrollable.is_finite() || scrollable <= 0.0 {
        return 0.0;
    }
    let pct = scroll_y / scrollable * 100.0;
    if pct.is_finite() {
        pct.clamp(0.0, 100.0)
    } else {
        0.0
    }
}

/// CSS `width` value for a progress percentage.
#[must_use]
pub fn progress_width(percent: f64) -> String {
    format!("{}%", css_number(percent))
}

/// Translation that centers a `size`-px square glow layer on the cursor,
/// relative to the host container's bounding box.
#[must_use]
pub fn glow_offset(cursor: Point, host: Rect, size: f64) -> Vec2 {
    let half = size / 2.0;
    Vec2::new(cursor.x - host.x0 - half, cursor.y - host.y0 - half)
}

/// CSS `transform` value for a glow translation.
#[must_use]
pub fn glow_transform(offset: Vec2) -> String {
    format!(
        "translate({}px, {}px)",
        css_number(offset.x),
        css_number(offset.y)
    )
}

/// Rotation of a tilted card, in degrees.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Tilt {
    /// Rotation about the horizontal axis.
    pub rotate_x: f64,
    /// Rotation about the vertical axis.
    pub rotate_y: f64,
}

impl Tilt {
    /// Tilt for a pointer at `pointer` (client coordinates) over a card
    /// occupying `card`.
    ///
    /// `rotate_x = (y - center_y) / divisor`, `rotate_y = (center_x - x) / divisor`,
    /// with `x`, `y` relative to the card's top-left corner.
    #[must_use]
    pub fn from_pointer(pointer: Point, card: Rect, divisor: f64) -> Self {
        if divisor == 0.0 {
            return Self::default();
        }
        let x = pointer.x - card.x0;
        let y = pointer.y - card.y0;
        let center_x = card.width() / 2.0;
        let center_y = card.height() / 2.0;
        Self {
            rotate_x: (y - center_y) / divisor,
            rotate_y: (center_x - x) / divisor,
        }
    }

    /// CSS `transform` value for this tilt.
    #[must_use]
    pub fn transform(&self, perspective: f64, lift: f64) -> String {
        format!(
            "perspective({}px) rotateX({}deg) rotateY({}deg) translateY({}px)",
            css_number(perspective),
            css_number(self.rotate_x),
            css_number(self.rotate_y),
            css_number(-lift),
        )
    }
}

/// CSS `transform` value for a card at rest.
#[must_use]
pub fn tilt_reset(perspective: f64) -> String {
    format!(
        "perspective({}px) rotateX(0) rotateY(0) translateY(0)",
        css_number(perspective)
    )
}

/// The current section for nav highlighting: the last section, in document
/// order, whose `top - offset` is at or above `scroll_y`.
///
/// Returns the index into `section_tops`.
#[must_use]
pub fn current_section(section_tops: &[f64], scroll_y: f64, offset: f64) -> Option<usize> {
    section_tops
        .iter()
        .enumerate()
        .filter(|&(_, &top)| scroll_y >= top - offset)
        .map(|(i, _)| i)
        .next_back()
}

/// The element id an in-page link points at: `"#pricing"` → `"pricing"`.
///
/// Returns `None` for anything that is not a non-empty fragment.
#[must_use]
pub fn fragment_target(href: &str) -> Option<&str> {
    href.strip_prefix('#').filter(|id| !id.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn css_numbers_are_short_and_stable() {
        assert_eq!(css_number(-30.000_000_000_000_004), "-30");
        assert_eq!(css_number(12.5), "12.5");
        assert_eq!(css_number(0.1234), "0.123");
        assert_eq!(css_number(-0.0), "0");
        assert_eq!(css_number(-0.0001), "0");
        assert_eq!(css_number(f64::NAN), "0");
        assert_eq!(css_number(100.0), "100");
    }

    #[test]
    fn parallax_moves_against_scroll() {
        let speed = parse_speed(Some("0.3"), 0.5);
        assert_eq!(parallax_transform(parallax_offset(100.0, speed)), "translateY(-30px)");
        assert_eq!(parallax_offset(100.0, parse_speed(None, 0.5)), -50.0);
    }

    #[test]
    fn garbage_speed_uses_default() {
        assert_eq!(parse_speed(Some("fast"), 0.5), 0.5);
        assert_eq!(parse_speed(Some(""), 0.5), 0.5);
        assert_eq!(parse_speed(Some("inf"), 0.5), 0.5);
        assert_eq!(parse_speed(Some(" 1.25 "), 0.5), 1.25);
    }

    #[test]
    fn progress_handles_unscrollable_documents() {
        assert_eq!(progress_percent(0.0, 800.0, 800.0), 0.0);
        assert_eq!(progress_percent(10.0, 500.0, 800.0), 0.0);
        assert_eq!(progress_width(progress_percent(0.0, 800.0, 800.0)), "0%");
    }

    #[test]
    fn progress_is_ratio_of_scrollable_distance() {
        assert_eq!(progress_percent(600.0, 2000.0, 800.0), 50.0);
        assert_eq!(progress_percent(5000.0, 2000.0, 800.0), 100.0);
        assert_eq!(progress_width(25.0), "25%");
    }

    #[test]
    fn glow_centers_on_cursor() {
        let host = Rect::new(0.0, 100.0, 1000.0, 700.0);
        let off = glow_offset(Point::new(300.0, 400.0), host, 256.0);
        assert_eq!(off, Vec2::new(172.0, 172.0));
        assert_eq!(glow_transform(off), "translate(172px, 172px)");
    }

    #[test]
    fn tilt_follows_pointer_offset_from_center() {
        let card = Rect::new(100.0, 100.0, 300.0, 200.0);
        // Pointer at the card's top-left corner.
        let tilt = Tilt::from_pointer(Point::new(100.0, 100.0), card, 20.0);
        assert_eq!(tilt.rotate_x, -2.5);
        assert_eq!(tilt.rotate_y, 5.0);
        assert_eq!(
            tilt.transform(1000.0, 5.0),
            "perspective(1000px) rotateX(-2.5deg) rotateY(5deg) translateY(-5px)"
        );
        let centered = Tilt::from_pointer(Point::new(200.0, 150.0), card, 20.0);
        assert_eq!(centered, Tilt::default());
    }

    #[test]
    fn tilt_reset_is_flat() {
        assert_eq!(
            tilt_reset(1000.0),
            "perspective(1000px) rotateX(0) rotateY(0) translateY(0)"
        );
    }

    #[test]
    fn current_section_is_last_passed_in_document_order() {
        let tops = [0.0, 600.0, 1200.0];
        assert_eq!(current_section(&tops, 0.0, 200.0), Some(0));
        assert_eq!(current_section(&tops, 399.0, 200.0), Some(0));
        assert_eq!(current_section(&tops, 400.0, 200.0), Some(1));
        assert_eq!(current_section(&tops, 5000.0, 200.0), Some(2));
        assert_eq!(current_section(&[900.0], 0.0, 200.0), None);
    }

    #[test]
    fn fragment_targets() {
        assert_eq!(fragment_target("#pricing"), Some("pricing"));
        assert_eq!(fragment_target("#"), None);
        assert_eq!(fragment_target("/about"), None);
    }
}
