// Copyright 2026 the Scrollfx Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Web demo: a landing page with scroll reveals, counters, parallax, cursor
//! glow, card tilt, reading progress, nav highlighting and lazy images, all
//! driven by `scrollfx_backend_web`.
//!
//! Build with: `wasm-pack build --target web demos/landing_page`
//!
//! Then serve `demos/landing_page/` and open `index.html` in a browser.

// This crate only runs in the browser; suppress dead-code warnings when
// cargo-checking on a native host target.
#![no_std]
#![cfg_attr(
    not(target_arch = "wasm32"),
    allow(dead_code, reason = "this crate only runs in the browser")
)]

extern crate alloc;

use alloc::string::ToString as _;

use wasm_bindgen::prelude::*;

use scrollfx_backend_web::{PageEffects, init_logging};
use scrollfx_core::EffectsConfig;
use scrollfx_core::time::Duration;

/// Element whose text the typewriter fills in.
const TAGLINE_ID: &str = "tagline";

/// Tagline typed out once the page is up.
const TAGLINE: &str = "Scroll down. Things happen.";

/// Entry point, called automatically by `wasm_bindgen(start)`.
#[wasm_bindgen(start)]
pub fn main() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    let _ = init_logging(log::LevelFilter::Info);

    let mut config = EffectsConfig::page_defaults();
    config.features.stagger_sweep = true;

    let effects = PageEffects::from_global(config).map_err(|err| err.to_string())?;
    let report = effects.start().map_err(|err| err.to_string())?;
    for (feature, err) in &report.failed {
        log::warn!("{feature:?} unavailable: {err}");
    }

    let tagline = web_sys::window()
        .and_then(|w| w.document())
        .and_then(|d| d.get_element_by_id(TAGLINE_ID));
    if let Some(tagline) = tagline {
        effects.type_text(&tagline, TAGLINE, Some(Duration::from_millis(60)));
    }

    // The effects live as long as the page.
    core::mem::forget(effects);
    Ok(())
}
