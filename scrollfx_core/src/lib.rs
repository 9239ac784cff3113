// Copyright 2026 the Scrollfx Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Viewport-triggered reveal, counter and scroll-driven style effects.
//!
//! `scrollfx_core` holds everything about page effects that does not depend
//! on a browser: when elements trigger, how counters count, what parallax,
//! progress, glow and tilt styles should be, and the bookkeeping that keeps
//! each one-shot effect one-shot. It is `no_std` compatible (with `alloc`)
//! and fully deterministic: time comes in as an argument.
//!
//! # Architecture
//!
//! ```text
//!   Host events (scroll, resize, rAF, pointer, click, timeout)
//!       │
//!       ▼
//!   Effects::on_*(page, now) ──► VisibilityTrigger::evaluate()
//!       │                              │ fired elements
//!       │                              ▼
//!       │                   plan_reveal() / CounterAnimation
//!       │                              │
//!       ▼                              ▼
//!   passive formulas          TimerQueue / counting set
//!       │                              │
//!       └──────────► Page (style, class, text) ◄──┘
//!
//!   Effects::next_deadline() / needs_frame() ──► host arms timeout / rAF
//! ```
//!
//! **[`engine`]**: The [`Effects`](engine::Effects) orchestrator with its
//! `start`/`dispose` lifecycle.
//!
//! **[`page`]**: The [`Page`](page::Page) trait backends implement over a
//! real document.
//!
//! **[`trigger`]**: One-shot visibility triggering by visible fraction.
//!
//! **[`reveal`]**: Reveal planning with staggered children.
//!
//! **[`counter`]**: Frame-driven counting animation.
//!
//! **[`passive`]**: Parallax, progress, glow, tilt and nav formulas.
//!
//! **[`timer`]** and **[`rate_limit`]**: Deadline queue, throttle and
//! debounce.
//!
//! **[`memory`]**: [`MemoryPage`](memory::MemoryPage), an in-memory page
//! for headless runs and tests.
//!
//! # Crate features
//!
//! - `std` (disabled by default): Enables `std` support in dependencies.

#![no_std]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]

extern crate alloc;

pub mod config;
pub mod counter;
pub mod engine;
pub mod error;
pub mod memory;
pub mod page;
pub mod passive;
pub mod rate_limit;
pub mod reveal;
pub mod time;
pub mod timer;
pub mod trigger;
pub mod typewriter;

pub use config::EffectsConfig;
pub use engine::{AnchorClick, Effects, Feature, StartReport};
pub use error::EffectError;
pub use page::{Page, Viewport};
