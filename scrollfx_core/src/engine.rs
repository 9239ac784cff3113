// Copyright 2026 the Scrollfx Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The effects orchestrator.
//!
//! [`Effects`] owns every trigger, pending task and discovered element for
//! one page. It never reads a clock or registers a listener itself: the host
//! forwards events (`on_scroll`, `on_frame`, pointer moves, clicks) with the
//! current [`HostTime`], then asks [`Effects::next_deadline`] and
//! [`Effects::needs_frame`] what to wake it up for next.
//!
//! # Lifecycle
//!
//! ```text
//!   new() ──► start() ──► on_*() / poll() ... ──► dispose()
//! ```
//!
//! [`start`](Effects::start) runs each enabled feature's initializer. A
//! failing initializer is logged at `warn` and reported in the returned
//! [`StartReport`]; the remaining features still start. Events delivered
//! before `start` or after `dispose` are ignored.

use alloc::string::{String, ToString};
use alloc::vec::Vec;
use core::fmt;

use kurbo::Point;

use crate::config::EffectsConfig;
use crate::counter::{CounterAnimation, CounterStep, parse_target};
use crate::error::EffectError;
use crate::page::Page;
use crate::passive::{
    Tilt, current_section, fragment_target, glow_offset, glow_transform, parallax_offset,
    parallax_transform, parse_speed, progress_percent, progress_width, tilt_reset,
};
use crate::rate_limit::{Debounce, Throttle};
use crate::reveal::{apply_reveal, plan_reveal};
use crate::time::{Duration, HostTime};
use crate::timer::TimerQueue;
use crate::trigger::VisibilityTrigger;
use crate::typewriter::Typewriter;

const GLOW_CLASS: &str =
    "pointer-events-none fixed w-64 h-64 rounded-full opacity-20 blur-3xl transition-transform duration-500";
const GLOW_BACKGROUND: &str = "radial-gradient(circle, rgba(99,102,241,0.4) 0%, transparent 70%)";
const PROGRESS_CLASS: &str = "fixed top-0 left-0 h-1 bg-primary z-50 transition-all duration-150";

/// A page effect that can be switched on and initialized independently.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Feature {
    /// Scroll reveal with staggered children.
    Reveal,
    /// Counting animation.
    Counters,
    /// Parallax layers.
    Parallax,
    /// Smooth scrolling for in-page anchors.
    SmoothScroll,
    /// Cursor glow in the hero container.
    CursorGlow,
    /// Card tilt on hover.
    Tilt,
    /// Scroll progress bar.
    ProgressBar,
    /// Nav link highlighting.
    NavHighlight,
    /// Deferred image loading.
    LazyImages,
    /// Start-time reveal of every stagger item.
    StaggerSweep,
}

impl Feature {
    /// All features, in initialization order.
    pub const ALL: [Self; 10] = [
        Self::Reveal,
        Self::SmoothScroll,
        Self::Counters,
        Self::Parallax,
        Self::CursorGlow,
        Self::Tilt,
        Self::ProgressBar,
        Self::StaggerSweep,
        Self::LazyImages,
        Self::NavHighlight,
    ];

    fn enabled(self, config: &EffectsConfig) -> bool {
        let f = &config.features;
        match self {
            Self::Reveal => f.reveal,
            Self::Counters => f.counters,
            Self::Parallax => f.parallax,
            Self::SmoothScroll => f.smooth_scroll,
            Self::CursorGlow => f.cursor_glow,
            Self::Tilt => f.tilt,
            Self::ProgressBar => f.progress_bar,
            Self::NavHighlight => f.nav_highlight,
            Self::LazyImages => f.lazy_images,
            Self::StaggerSweep => f.stagger_sweep,
        }
    }
}

/// Outcome of [`Effects::start`].
#[derive(Clone, Debug, Default, PartialEq)]
pub struct StartReport {
    /// Features that initialized.
    pub started: Vec<Feature>,
    /// Features whose initializer failed, with the reason.
    pub failed: Vec<(Feature, EffectError)>,
}

/// What an in-page link click did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AnchorClick {
    /// The fragment target was found and scrolled into view.
    Scrolled,
    /// The link is an in-page link but nothing matches its fragment.
    NoTarget,
    /// The link does not (or no longer) point at a fragment.
    NotInPage,
}

impl AnchorClick {
    /// Whether the host should suppress the browser's default navigation.
    #[must_use]
    pub const fn prevents_default(self) -> bool {
        !matches!(self, Self::NotInPage)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Lifecycle {
    Created,
    Running,
    Disposed,
}

#[derive(Clone, Debug)]
enum Task<E> {
    Reveal {
        element: E,
        animation: Option<String>,
    },
    Type(Typewriter<E>),
}

/// Scroll-driven effects for one page.
pub struct Effects<P: Page> {
    config: EffectsConfig,
    lifecycle: Lifecycle,
    reveal: VisibilityTrigger<P::Element>,
    counters: VisibilityTrigger<P::Element>,
    lazy: VisibilityTrigger<P::Element>,
    counting: Vec<(P::Element, CounterAnimation)>,
    timers: TimerQueue<Task<P::Element>>,
    parallax: Vec<P::Element>,
    anchors: Vec<P::Element>,
    hero: Option<P::Element>,
    glow: Option<P::Element>,
    tilt_cards: Vec<P::Element>,
    progress_bar: Option<P::Element>,
    sections: Vec<(P::Element, String)>,
    nav_links: Vec<P::Element>,
    nav_throttle: Throttle,
    resize: Debounce<()>,
}

impl<P: Page> fmt::Debug for Effects<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Effects")
            .field("lifecycle", &self.lifecycle)
            .field("pending_reveals", &self.reveal.pending())
            .field("pending_counters", &self.counters.pending())
            .field("pending_images", &self.lazy.pending())
            .field("counting", &self.counting.len())
            .field("timers", &self.timers.len())
            .field("parallax", &self.parallax.len())
            .field("anchors", &self.anchors.len())
            .field("tilt_cards", &self.tilt_cards.len())
            .field("sections", &self.sections.len())
            .finish_non_exhaustive()
    }
}

impl<P: Page> Effects<P> {
    /// Creates an engine that has not started.
    #[must_use]
    pub fn new(config: EffectsConfig) -> Self {
        Self {
            reveal: VisibilityTrigger::new(config.reveal_threshold),
            counters: VisibilityTrigger::new(config.counter_threshold),
            lazy: VisibilityTrigger::new(config.lazy_threshold),
            counting: Vec::new(),
            timers: TimerQueue::new(),
            parallax: Vec::new(),
            anchors: Vec::new(),
            hero: None,
            glow: None,
            tilt_cards: Vec::new(),
            progress_bar: None,
            sections: Vec::new(),
            nav_links: Vec::new(),
            nav_throttle: Throttle::new(config.nav_throttle),
            resize: Debounce::new(config.resize_debounce),
            lifecycle: Lifecycle::Created,
            config,
        }
    }

    /// The configuration in use.
    #[must_use]
    pub fn config(&self) -> &EffectsConfig {
        &self.config
    }

    /// Whether `start` succeeded and `dispose` has not been called.
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.lifecycle == Lifecycle::Running
    }

    /// Discovers the page's elements, initializes every enabled feature and
    /// applies the initial state (elements already in view fire now).
    ///
    /// Only lifecycle misuse is an error; feature failures are collected in
    /// the report.
    pub fn start(&mut self, page: &mut P, now: HostTime) -> Result<StartReport, EffectError> {
        match self.lifecycle {
            Lifecycle::Running => return Err(EffectError::AlreadyStarted),
            Lifecycle::Disposed => return Err(EffectError::Disposed),
            Lifecycle::Created => {}
        }

        let mut report = StartReport::default();
        for feature in Feature::ALL {
            if !feature.enabled(&self.config) {
                continue;
            }
            match self.init_feature(page, feature, now) {
                Ok(()) => report.started.push(feature),
                Err(err) => {
                    log::warn!("optional effect {feature:?} failed to initialize: {err}");
                    report.failed.push((feature, err));
                }
            }
        }
        self.lifecycle = Lifecycle::Running;
        log::debug!(
            "effects started: {} features, {} failed; {self:?}",
            report.started.len(),
            report.failed.len()
        );

        self.apply_scroll(page, now);
        self.run_due(page, now);
        Ok(report)
    }

    fn init_feature(
        &mut self,
        page: &mut P,
        feature: Feature,
        now: HostTime,
    ) -> Result<(), EffectError> {
        let markers = self.config.markers;
        match feature {
            Feature::Reveal => {
                for el in page.query_all(markers.reveal) {
                    self.reveal.watch(el);
                }
            }
            Feature::Counters => {
                for el in page.query_all(markers.counter) {
                    self.counters.watch(el);
                }
            }
            Feature::LazyImages => {
                for el in page.query_all(markers.lazy_image) {
                    self.lazy.watch(el);
                }
            }
            Feature::Parallax => self.parallax = page.query_all(markers.parallax),
            Feature::SmoothScroll => self.anchors = page.query_all(markers.anchor),
            Feature::Tilt => self.tilt_cards = page.query_all(markers.tilt),
            Feature::CursorGlow => self.init_glow(page)?,
            Feature::ProgressBar => self.init_progress_bar(page)?,
            Feature::NavHighlight => {
                self.sections = page
                    .query_all(markers.section)
                    .into_iter()
                    .filter_map(|el| {
                        let id = page.attribute(&el, "id")?;
                        Some((el, id))
                    })
                    .collect();
                self.nav_links = page.query_all(markers.nav_link);
            }
            Feature::StaggerSweep => {
                let mut at = now;
                for el in page.query_all(markers.stagger_item) {
                    self.timers.schedule(
                        at,
                        Task::Reveal {
                            element: el,
                            animation: None,
                        },
                    );
                    at = at.saturating_add(self.config.stagger_interval);
                }
            }
        }
        Ok(())
    }

    fn init_glow(&mut self, page: &mut P) -> Result<(), EffectError> {
        let Some(hero) = page.element_by_id(self.config.markers.hero_id) else {
            return Ok(());
        };
        let glow = page.create_element("div")?;
        page.set_attribute(&glow, "class", GLOW_CLASS);
        page.set_style(&glow, "background", GLOW_BACKGROUND);
        page.set_style(&glow, "z-index", "0");
        page.append_child(&hero, &glow)?;
        self.hero = Some(hero);
        self.glow = Some(glow);
        Ok(())
    }

    fn init_progress_bar(&mut self, page: &mut P) -> Result<(), EffectError> {
        let body = page.body().ok_or(EffectError::MissingBody)?;
        let bar = page.create_element("div")?;
        page.set_attribute(&bar, "class", PROGRESS_CLASS);
        page.set_style(&bar, "width", "0%");
        page.append_child(&body, &bar)?;
        self.progress_bar = Some(bar);
        Ok(())
    }

    /// Handles a scroll event: parallax, progress, nav highlight (throttled)
    /// and visibility triggers.
    pub fn on_scroll(&mut self, page: &mut P, now: HostTime) {
        if !self.is_running() {
            return;
        }
        self.apply_scroll(page, now);
        self.run_due(page, now);
    }

    /// Handles a resize event. Work happens once resizing has been quiet for
    /// the configured debounce period; see [`poll`](Self::poll).
    pub fn on_resize(&mut self, now: HostTime) {
        if !self.is_running() {
            return;
        }
        self.resize.call(now, ());
    }

    /// Handles an animation frame: advances running counters, then polls.
    pub fn on_frame(&mut self, page: &mut P, now: HostTime) {
        if !self.is_running() {
            return;
        }
        self.counting.retain_mut(|(el, anim)| {
            let step = anim.tick();
            page.set_text(el, &step.value().to_string());
            matches!(step, CounterStep::Running(_))
        });
        self.poll(page, now);
    }

    /// Runs timers and the resize debounce whose deadlines have passed.
    pub fn poll(&mut self, page: &mut P, now: HostTime) {
        if !self.is_running() {
            return;
        }
        if self.resize.poll(now).is_some() {
            log::trace!("resize settled; re-evaluating size-dependent effects");
            self.update_progress(page);
            self.evaluate_triggers(page, now);
        }
        self.run_due(page, now);
    }

    /// Moves the cursor glow to follow a pointer at `client` (viewport
    /// coordinates) over the hero container.
    pub fn on_hero_pointer_move(&mut self, page: &mut P, client: Point) {
        if !self.is_running() {
            return;
        }
        let (Some(hero), Some(glow)) = (&self.hero, &self.glow) else {
            return;
        };
        let Some(rect) = page.bounding_rect(hero) else {
            return;
        };
        let offset = glow_offset(client, rect, self.config.glow_size);
        page.set_style(glow, "transform", &glow_transform(offset));
    }

    /// Tilts `card` toward a pointer at `client` (viewport coordinates).
    pub fn on_card_pointer_move(&mut self, page: &mut P, card: &P::Element, client: Point) {
        if !self.is_running() || !self.tilt_cards.contains(card) {
            return;
        }
        let Some(rect) = page.bounding_rect(card) else {
            return;
        };
        let tilt = Tilt::from_pointer(client, rect, self.config.tilt_divisor);
        let css = tilt.transform(self.config.tilt_perspective, self.config.tilt_lift);
        page.set_style(card, "transform", &css);
    }

    /// Returns `card` to rest when the pointer leaves it.
    pub fn on_card_pointer_leave(&mut self, page: &mut P, card: &P::Element) {
        if !self.is_running() || !self.tilt_cards.contains(card) {
            return;
        }
        page.set_style(card, "transform", &tilt_reset(self.config.tilt_perspective));
    }

    /// Handles a click on an in-page link, smoothly scrolling its fragment
    /// target into view.
    ///
    /// The link's `href` is read at click time. The host should suppress
    /// default navigation when [`AnchorClick::prevents_default`] is true.
    pub fn on_anchor_click(&mut self, page: &mut P, anchor: &P::Element) -> AnchorClick {
        if !self.is_running() {
            return AnchorClick::NotInPage;
        }
        let Some(href) = page.attribute(anchor, "href") else {
            return AnchorClick::NotInPage;
        };
        if !href.starts_with('#') {
            return AnchorClick::NotInPage;
        }
        let Some(target) = fragment_target(&href).and_then(|id| page.element_by_id(id)) else {
            log::debug!("anchor {href:?} has no target; ignoring");
            return AnchorClick::NoTarget;
        };
        page.scroll_into_view(&target);
        AnchorClick::Scrolled
    }

    /// Handles the page's `load` event: marks the body loaded and starts the
    /// hero's paused CSS animations.
    pub fn on_load(&mut self, page: &mut P) {
        if !self.is_running() {
            return;
        }
        let markers = self.config.markers;
        if let Some(body) = page.body() {
            page.add_class(&body, markers.loaded_class);
        }
        for el in page.query_all(markers.hero_animation) {
            page.set_style(&el, "animation-play-state", "running");
        }
    }

    /// Clears `element` and types `text` into it one character at a time,
    /// `interval` apart (the configured default when `None`). The first
    /// character appears immediately.
    pub fn type_text(
        &mut self,
        page: &mut P,
        element: P::Element,
        text: &str,
        interval: Option<Duration>,
        now: HostTime,
    ) {
        if !self.is_running() {
            return;
        }
        page.set_text(&element, "");
        let interval = interval.unwrap_or(self.config.typewriter_interval);
        self.timers
            .schedule(now, Task::Type(Typewriter::new(element, text, interval)));
        self.run_due(page, now);
    }

    /// The earliest time [`poll`](Self::poll) has work to do.
    #[must_use]
    pub fn next_deadline(&self) -> Option<HostTime> {
        match (self.timers.next_deadline(), self.resize.deadline()) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }

    /// Whether a counter is running and wants animation frames.
    #[must_use]
    pub fn needs_frame(&self) -> bool {
        !self.counting.is_empty()
    }

    /// In-page links handled by smooth scrolling.
    #[must_use]
    pub fn anchors(&self) -> &[P::Element] {
        &self.anchors
    }

    /// Cards that tilt under the pointer.
    #[must_use]
    pub fn tilt_cards(&self) -> &[P::Element] {
        &self.tilt_cards
    }

    /// The hero container, when the cursor glow is active.
    #[must_use]
    pub fn hero(&self) -> Option<&P::Element> {
        self.glow.as_ref().and(self.hero.as_ref())
    }

    /// The generated glow layer, if any.
    #[must_use]
    pub fn glow_layer(&self) -> Option<&P::Element> {
        self.glow.as_ref()
    }

    /// The generated progress bar, if any.
    #[must_use]
    pub fn progress_bar(&self) -> Option<&P::Element> {
        self.progress_bar.as_ref()
    }

    /// Removes generated elements and drops all pending work. The engine
    /// cannot be started again.
    pub fn dispose(&mut self, page: &mut P) {
        if self.lifecycle == Lifecycle::Disposed {
            return;
        }
        if let Some(glow) = self.glow.take() {
            page.remove(&glow);
        }
        if let Some(bar) = self.progress_bar.take() {
            page.remove(&bar);
        }
        self.reveal.clear();
        self.counters.clear();
        self.lazy.clear();
        self.counting.clear();
        self.timers.clear();
        self.resize.cancel();
        self.nav_throttle.reset();
        self.parallax.clear();
        self.anchors.clear();
        self.tilt_cards.clear();
        self.sections.clear();
        self.nav_links.clear();
        self.hero = None;
        self.lifecycle = Lifecycle::Disposed;
        log::debug!("effects disposed");
    }

    fn apply_scroll(&mut self, page: &mut P, now: HostTime) {
        self.apply_parallax(page);
        self.update_progress(page);
        if !self.sections.is_empty() && self.nav_throttle.admit(now) {
            self.update_nav(page);
        }
        self.evaluate_triggers(page, now);
    }

    fn apply_parallax(&self, page: &mut P) {
        if self.parallax.is_empty() {
            return;
        }
        let scroll_y = page.viewport().scroll_y;
        let markers = &self.config.markers;
        for el in &self.parallax {
            let raw = page.attribute(el, markers.parallax_speed_attr);
            let speed = parse_speed(raw.as_deref(), self.config.default_parallax_speed);
            let css = parallax_transform(parallax_offset(scroll_y, speed));
            page.set_style(el, "transform", &css);
        }
    }

    fn update_progress(&self, page: &mut P) {
        let Some(bar) = &self.progress_bar else {
            return;
        };
        let vp = page.viewport();
        let pct = progress_percent(vp.scroll_y, vp.scroll_height, vp.height);
        page.set_style(bar, "width", &progress_width(pct));
    }

    fn update_nav(&self, page: &mut P) {
        let scroll_y = page.viewport().scroll_y;
        let tops: Vec<f64> = self
            .sections
            .iter()
            .map(|(el, _)| page.offset_top(el))
            .collect();
        let current = current_section(&tops, scroll_y, self.config.nav_offset)
            .map(|i| self.sections[i].1.as_str());
        let active = self.config.markers.active_class;
        for link in &self.nav_links {
            page.remove_class(link, active);
            let href = page.attribute(link, "href");
            if let (Some(current), Some(href)) = (current, href.as_deref())
                && href.strip_prefix('#') == Some(current)
            {
                page.add_class(link, active);
            }
        }
    }

    fn evaluate_triggers(&mut self, page: &mut P, now: HostTime) {
        for el in self.reveal.evaluate(&*page) {
            log::trace!("reveal triggered: {el:?}");
            let steps = plan_reveal(
                &*page,
                &el,
                &self.config.markers,
                self.config.stagger_interval,
            );
            for step in steps {
                self.timers.schedule(
                    now.saturating_add(step.delay),
                    Task::Reveal {
                        element: step.element,
                        animation: step.animation,
                    },
                );
            }
        }

        for el in self.counters.evaluate(&*page) {
            let raw = page.attribute(&el, self.config.markers.counter_target_attr);
            let mut anim = CounterAnimation::new(parse_target(raw.as_deref()), &self.config.counter);
            log::trace!("counter triggered: {el:?} -> {}", anim.target());
            let step = anim.tick();
            page.set_text(&el, &step.value().to_string());
            if let CounterStep::Running(_) = step {
                self.counting.push((el, anim));
            }
        }

        let source_attr = self.config.markers.lazy_source_attr;
        for img in self.lazy.evaluate(&*page) {
            if let Some(src) = page.attribute(&img, source_attr) {
                page.set_attribute(&img, "src", &src);
            }
            page.remove_attribute(&img, source_attr);
        }
    }

    fn run_due(&mut self, page: &mut P, now: HostTime) {
        while let Some((_, task)) = self.timers.pop_due(now) {
            match task {
                Task::Reveal { element, animation } => {
                    apply_reveal(page, &element, animation.as_deref(), &self.config.markers);
                }
                Task::Type(mut typewriter) => {
                    if let Some(text) = typewriter.step().map(String::from) {
                        page.set_text(typewriter.element(), &text);
                    }
                    if !typewriter.is_done() {
                        let next = now.saturating_add(typewriter.interval());
                        self.timers.schedule(next, Task::Type(typewriter));
                    }
                }
            }
        }
    }
}
