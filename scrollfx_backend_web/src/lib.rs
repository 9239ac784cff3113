// Copyright 2026 the Scrollfx Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Web backend for scrollfx.
//!
//! This crate provides integration with browser APIs:
//!
//! - [`DomPage`]: [`Page`] over the live document via `web-sys`
//! - [`PageEffects`]: event listeners, deadline timeout and frame loop
//!   around an [`Effects`](scrollfx_core::Effects) engine
//! - [`RafLoop`]: `requestAnimationFrame` tick source
//! - [`ConsoleLogger`]: `log` output to the browser console
//!
//! ```no_run
//! use scrollfx_backend_web::{PageEffects, init_logging};
//! use scrollfx_core::EffectsConfig;
//!
//! # fn run() -> Result<(), scrollfx_core::EffectError> {
//! let _ = init_logging(log::LevelFilter::Info);
//! let effects = PageEffects::from_global(EffectsConfig::page_defaults())?;
//! effects.start()?;
//! // Keep the effects alive for the lifetime of the page.
//! core::mem::forget(effects);
//! # Ok(())
//! # }
//! ```

#![no_std]

extern crate alloc;

mod console;
mod dom;
mod host;
mod raf;

pub use console::{ConsoleLogger, init_logging};
pub use dom::DomPage;
pub use host::PageEffects;
pub use raf::RafLoop;
pub use scrollfx_core::Page;

use scrollfx_core::time::HostTime;

/// Returns the current host time from `performance.now()`.
///
/// The returned [`HostTime`] is in microsecond ticks, on the same clock as
/// the timestamps [`RafLoop`] delivers.
#[must_use]
pub fn now() -> HostTime {
    HostTime::from_millis_f64(raf::performance_now())
}
