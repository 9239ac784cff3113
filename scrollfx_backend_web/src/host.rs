// Copyright 2026 the Scrollfx Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Wires an [`Effects`] engine to browser events.
//!
//! [`PageEffects`] owns the engine and its [`DomPage`], registers the
//! listeners the enabled features need and keeps exactly one timeout armed
//! for the engine's next deadline. A [`RafLoop`] runs only while a counter
//! is animating.
//!
//! Every JS closure holds a weak reference back to the shared state, so
//! dropping the `PageEffects` releases everything. Drop calls
//! [`dispose`](PageEffects::dispose), which removes the listeners and
//! cancels pending callbacks before the closures go away.

use alloc::boxed::Box;
use alloc::rc::{Rc, Weak};
use alloc::vec::Vec;
use core::cell::{Cell, RefCell};

use kurbo::Point;
use scrollfx_core::time::Duration;
use scrollfx_core::{EffectError, Effects, EffectsConfig, StartReport};
use wasm_bindgen::JsCast as _;
use wasm_bindgen::closure::Closure;
use web_sys::{AddEventListenerOptions, Element, Event, EventTarget, MouseEvent, Window};

use crate::dom::{DomPage, js_message};
use crate::now;
use crate::raf::RafLoop;

struct State {
    effects: Effects<DomPage>,
    page: DomPage,
}

struct Listener {
    target: EventTarget,
    kind: &'static str,
    closure: Closure<dyn FnMut(Event)>,
}

impl Listener {
    fn attach(
        target: &EventTarget,
        kind: &'static str,
        passive: bool,
        handler: impl FnMut(Event) + 'static,
    ) -> Result<Self, EffectError> {
        let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(Event)>);
        let options = AddEventListenerOptions::new();
        options.set_passive(passive);
        target
            .add_event_listener_with_callback_and_add_event_listener_options(
                kind,
                closure.as_ref().unchecked_ref(),
                &options,
            )
            .map_err(|err| EffectError::host("addEventListener", js_message(&err)))?;
        Ok(Self {
            target: target.clone(),
            kind,
            closure,
        })
    }

    fn detach(&self) {
        let _ = self
            .target
            .remove_event_listener_with_callback(self.kind, self.closure.as_ref().unchecked_ref());
    }
}

struct Shared {
    window: Window,
    state: RefCell<State>,
    listeners: RefCell<Vec<Listener>>,
    raf: RafLoop,
    timeout: Closure<dyn FnMut()>,
    timeout_id: Cell<Option<i32>>,
}

impl Shared {
    /// Runs `f` against the engine and page. Returns `None` when the state
    /// is already borrowed, which only happens if the DOM dispatches an
    /// event synchronously from inside another handler.
    fn with_state<R>(
        &self,
        f: impl FnOnce(&mut Effects<DomPage>, &mut DomPage) -> R,
    ) -> Option<R> {
        let Ok(mut state) = self.state.try_borrow_mut() else {
            log::debug!("re-entrant event dropped");
            return None;
        };
        let State { effects, page } = &mut *state;
        Some(f(effects, page))
    }

    /// Re-arms the deadline timeout and starts or stops frame delivery to
    /// match the engine's current needs.
    fn schedule(&self) {
        let Ok(state) = self.state.try_borrow() else {
            return;
        };
        let deadline = state.effects.next_deadline();
        let frames = state.effects.needs_frame();
        drop(state);

        if frames {
            self.raf.start();
        } else {
            self.raf.stop();
        }

        if let Some(id) = self.timeout_id.take() {
            self.window.clear_timeout_with_handle(id);
        }
        let Some(deadline) = deadline else {
            return;
        };
        let wait = deadline.saturating_duration_since(now());
        // Round up so the timeout never fires before the deadline.
        let delay_ms = wait.ticks().div_ceil(1000);
        let delay_ms = i32::try_from(delay_ms).unwrap_or(i32::MAX);
        match self
            .window
            .set_timeout_with_callback_and_timeout_and_arguments_0(
                self.timeout.as_ref().unchecked_ref(),
                delay_ms,
            ) {
            Ok(id) => self.timeout_id.set(Some(id)),
            Err(err) => log::warn!("setTimeout failed: {}", js_message(&err)),
        }
    }

    fn listen(
        self: &Rc<Self>,
        target: &EventTarget,
        kind: &'static str,
        passive: bool,
        mut handler: impl FnMut(&Self, &Event) + 'static,
    ) {
        let weak = Rc::downgrade(self);
        let listener = Listener::attach(target, kind, passive, move |event| {
            if let Some(shared) = weak.upgrade() {
                handler(&shared, &event);
            }
        });
        match listener {
            Ok(listener) => self.listeners.borrow_mut().push(listener),
            Err(err) => log::warn!("cannot listen for {kind}: {err}"),
        }
    }
}

fn client_point(event: &Event) -> Option<Point> {
    let event = event.dyn_ref::<MouseEvent>()?;
    Some(Point::new(
        f64::from(event.client_x()),
        f64::from(event.client_y()),
    ))
}

/// Scroll-driven effects running against the live document.
pub struct PageEffects {
    shared: Rc<Shared>,
}

impl core::fmt::Debug for PageEffects {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let mut s = f.debug_struct("PageEffects");
        if let Ok(state) = self.shared.state.try_borrow() {
            s.field("effects", &state.effects);
        }
        s.field("listeners", &self.shared.listeners.borrow().len())
            .field("raf", &self.shared.raf)
            .finish()
    }
}

impl PageEffects {
    /// Creates effects for `page` that have not started.
    #[must_use]
    pub fn new(page: DomPage, config: EffectsConfig) -> Self {
        let window = page.window().clone();
        let shared = Rc::new_cyclic(|weak: &Weak<Shared>| {
            let on_frame = weak.clone();
            let raf = RafLoop::new(move |time| {
                let Some(shared) = on_frame.upgrade() else {
                    return;
                };
                shared.with_state(|fx, page| fx.on_frame(page, time));
                shared.schedule();
            });

            let on_timeout = weak.clone();
            let timeout = Closure::wrap(Box::new(move || {
                let Some(shared) = on_timeout.upgrade() else {
                    return;
                };
                shared.timeout_id.set(None);
                shared.with_state(|fx, page| fx.poll(page, now()));
                shared.schedule();
            }) as Box<dyn FnMut()>);

            Shared {
                window,
                state: RefCell::new(State {
                    effects: Effects::new(config),
                    page,
                }),
                listeners: RefCell::new(Vec::new()),
                raf,
                timeout,
                timeout_id: Cell::new(None),
            }
        });
        Self { shared }
    }

    /// Creates effects for the global window's document.
    pub fn from_global(config: EffectsConfig) -> Result<Self, EffectError> {
        Ok(Self::new(DomPage::from_global()?, config))
    }

    /// Starts every enabled feature and registers the event listeners they
    /// need.
    ///
    /// Features that fail to initialize are listed in the report and logged;
    /// the others keep running.
    pub fn start(&self) -> Result<StartReport, EffectError> {
        let shared = &self.shared;
        let (report, hero, cards, anchors, document) = {
            let mut state = shared
                .state
                .try_borrow_mut()
                .map_err(|_| EffectError::host("start", "effects are busy"))?;
            let State { effects, page } = &mut *state;
            let report = effects.start(page, now())?;
            (
                report,
                effects.hero().cloned(),
                effects.tilt_cards().to_vec(),
                effects.anchors().to_vec(),
                page.document().clone(),
            )
        };

        let window: &EventTarget = shared.window.as_ref();
        shared.listen(window, "scroll", true, |shared, _| {
            shared.with_state(|fx, page| fx.on_scroll(page, now()));
            shared.schedule();
        });
        shared.listen(window, "resize", true, |shared, _| {
            shared.with_state(|fx, _| fx.on_resize(now()));
            shared.schedule();
        });
        if document.ready_state() == "complete" {
            shared.with_state(|fx, page| fx.on_load(page));
        } else {
            shared.listen(window, "load", true, |shared, _| {
                shared.with_state(|fx, page| fx.on_load(page));
            });
        }

        if let Some(hero) = hero {
            shared.listen(hero.as_ref(), "mousemove", true, |shared, event| {
                if let Some(point) = client_point(event) {
                    shared.with_state(|fx, page| fx.on_hero_pointer_move(page, point));
                }
            });
        }

        for card in cards {
            let target = card.clone();
            shared.listen(target.as_ref(), "mousemove", true, move |shared, event| {
                if let Some(point) = client_point(event) {
                    shared.with_state(|fx, page| fx.on_card_pointer_move(page, &card, point));
                }
            });
            let card = target.clone();
            shared.listen(target.as_ref(), "mouseleave", true, move |shared, _| {
                shared.with_state(|fx, page| fx.on_card_pointer_leave(page, &card));
            });
        }

        for anchor in anchors {
            let target = anchor.clone();
            shared.listen(target.as_ref(), "click", false, move |shared, event| {
                let outcome = shared.with_state(|fx, page| fx.on_anchor_click(page, &anchor));
                if outcome.is_some_and(|click| click.prevents_default()) {
                    event.prevent_default();
                }
            });
        }

        shared.schedule();
        log::info!(
            "page effects started ({} features, {} listeners)",
            report.started.len(),
            shared.listeners.borrow().len()
        );
        Ok(report)
    }

    /// Types `text` into `element` one character at a time. Uses the
    /// configured interval when `interval` is `None`.
    pub fn type_text(&self, element: &Element, text: &str, interval: Option<Duration>) {
        self.shared.with_state(|fx, page| {
            fx.type_text(page, element.clone(), text, interval, now());
        });
        self.shared.schedule();
    }

    /// Whether the effects have started and not been disposed.
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.shared
            .state
            .try_borrow()
            .is_ok_and(|state| state.effects.is_running())
    }

    /// Removes every listener, cancels pending callbacks and generated
    /// elements. Idempotent.
    pub fn dispose(&self) {
        let shared = &self.shared;
        for listener in shared.listeners.borrow_mut().drain(..) {
            listener.detach();
        }
        if let Some(id) = shared.timeout_id.take() {
            shared.window.clear_timeout_with_handle(id);
        }
        shared.raf.stop();
        shared.with_state(|fx, page| fx.dispose(page));
    }
}

impl Drop for PageEffects {
    fn drop(&mut self) {
        self.dispose();
    }
}
