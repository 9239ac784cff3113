// Copyright 2026 the Scrollfx Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Configuration for the [`Effects`](crate::engine::Effects) engine.
//!
//! [`EffectsConfig::page_defaults`] matches the markup conventions of a
//! Tailwind-style landing page (`.animate-on-scroll`, `.counter`,
//! `data-target`, ...). Every value can be overridden field by field.

use crate::time::Duration;

/// Selectors, attribute names and class names the engine reads from and
/// writes to the page markup.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Markers {
    /// Elements revealed when they scroll into view.
    pub reveal: &'static str,
    /// Attribute naming the animation class applied on reveal.
    pub animation_attr: &'static str,
    /// Child elements revealed one after another.
    pub stagger_item: &'static str,
    /// Class added to every revealed element.
    pub revealed_class: &'static str,
    /// Animation class for stagger items when neither child nor parent names one.
    pub default_animation: &'static str,
    /// Counter elements.
    pub counter: &'static str,
    /// Attribute holding a counter's target integer.
    pub counter_target_attr: &'static str,
    /// Parallax layers.
    pub parallax: &'static str,
    /// Attribute holding a parallax layer's speed factor.
    pub parallax_speed_attr: &'static str,
    /// Id of the hero container hosting the cursor glow.
    pub hero_id: &'static str,
    /// Elements that tilt under the pointer.
    pub tilt: &'static str,
    /// Images with a deferred source.
    pub lazy_image: &'static str,
    /// Attribute holding a lazy image's deferred source.
    pub lazy_source_attr: &'static str,
    /// Sections tracked by the nav highlight.
    pub section: &'static str,
    /// Navigation links highlighted on scroll.
    pub nav_link: &'static str,
    /// Class marking the active navigation link.
    pub active_class: &'static str,
    /// In-page anchor links that scroll smoothly.
    pub anchor: &'static str,
    /// Class added to the body once the page has loaded.
    pub loaded_class: &'static str,
    /// Hero elements whose CSS animation starts on load.
    pub hero_animation: &'static str,
}

impl Markers {
    /// Markup conventions of the stock landing page.
    #[must_use]
    pub const fn page_defaults() -> Self {
        Self {
            reveal: ".animate-on-scroll",
            animation_attr: "data-anim",
            stagger_item: ".stagger-item",
            revealed_class: "animated",
            default_animation: "animate-pop",
            counter: ".counter",
            counter_target_attr: "data-target",
            parallax: ".parallax-layer",
            parallax_speed_attr: "data-speed",
            hero_id: "hero",
            tilt: ".hover-lift",
            lazy_image: "img[data-src]",
            lazy_source_attr: "data-src",
            section: "section[id]",
            nav_link: "nav a[href^=\"#\"]",
            active_class: "active",
            anchor: "a[href^=\"#\"]",
            loaded_class: "loaded",
            hero_animation: "#hero .animate-fadeInUp",
        }
    }
}

/// Per-feature switches.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Features {
    /// Scroll reveal with staggered children.
    pub reveal: bool,
    /// Counting animation.
    pub counters: bool,
    /// Parallax layers.
    pub parallax: bool,
    /// Smooth scrolling for in-page anchors.
    pub smooth_scroll: bool,
    /// Cursor glow in the hero container.
    pub cursor_glow: bool,
    /// Card tilt on hover.
    pub tilt: bool,
    /// Scroll progress bar.
    pub progress_bar: bool,
    /// Nav link highlighting.
    pub nav_highlight: bool,
    /// Deferred image loading.
    pub lazy_images: bool,
    /// Reveal every stagger item at start, regardless of visibility.
    pub stagger_sweep: bool,
}

impl Features {
    /// Everything on except the start-time stagger sweep.
    #[must_use]
    pub const fn page_defaults() -> Self {
        Self {
            reveal: true,
            counters: true,
            parallax: true,
            smooth_scroll: true,
            cursor_glow: true,
            tilt: true,
            progress_bar: true,
            nav_highlight: true,
            lazy_images: true,
            stagger_sweep: false,
        }
    }
}

/// Counter timing.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CounterConfig {
    /// Nominal total duration in milliseconds.
    pub duration_ms: f64,
    /// Assumed frame interval in milliseconds; the per-frame increment is
    /// `target / (duration_ms / nominal_frame_ms)`.
    pub nominal_frame_ms: f64,
}

/// Configuration for the [`Effects`](crate::engine::Effects) engine.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EffectsConfig {
    /// Markup conventions.
    pub markers: Markers,
    /// Enabled features.
    pub features: Features,
    /// Visible fraction that triggers a reveal.
    pub reveal_threshold: f64,
    /// Visible fraction that triggers a counter.
    pub counter_threshold: f64,
    /// Visible fraction that loads a deferred image (0 = any intersection).
    pub lazy_threshold: f64,
    /// Delay between consecutive stagger items.
    pub stagger_interval: Duration,
    /// Counter timing.
    pub counter: CounterConfig,
    /// Parallax speed used when a layer declares none (or garbage).
    pub default_parallax_speed: f64,
    /// Side length of the square cursor glow layer, in px.
    pub glow_size: f64,
    /// Pointer offset (px) per degree of tilt.
    pub tilt_divisor: f64,
    /// Perspective distance for tilted cards, in px.
    pub tilt_perspective: f64,
    /// Lift applied to a tilted card, in px.
    pub tilt_lift: f64,
    /// Distance above a section's top at which it becomes current, in px.
    pub nav_offset: f64,
    /// Minimum interval between nav highlight updates.
    pub nav_throttle: Duration,
    /// Quiet period before a resize is acted on.
    pub resize_debounce: Duration,
    /// Default delay between typewriter characters.
    pub typewriter_interval: Duration,
}

impl EffectsConfig {
    /// Defaults for the stock landing page.
    #[must_use]
    pub const fn page_defaults() -> Self {
        Self {
            markers: Markers::page_defaults(),
            features: Features::page_defaults(),
            reveal_threshold: 0.1,
            counter_threshold: 0.5,
            lazy_threshold: 0.0,
            stagger_interval: Duration::from_millis(120),
            counter: CounterConfig {
                duration_ms: 2000.0,
                nominal_frame_ms: 16.0,
            },
            default_parallax_speed: 0.5,
            glow_size: 256.0,
            tilt_divisor: 20.0,
            tilt_perspective: 1000.0,
            tilt_lift: 5.0,
            nav_offset: 200.0,
            nav_throttle: Duration::from_millis(100),
            resize_debounce: Duration::from_millis(250),
            typewriter_interval: Duration::from_millis(100),
        }
    }
}

impl Default for EffectsConfig {
    fn default() -> Self {
        Self::page_defaults()
    }
}
