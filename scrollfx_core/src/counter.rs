// Copyright 2026 the Scrollfx Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Frame-driven counting animation.
//!
//! A [`CounterAnimation`] counts a displayed integer up from zero to a
//! target. The per-frame increment is fixed up front as
//! `target / (duration / nominal_frame)`, so progress is tied to the number
//! of frames delivered, not to wall-clock time: a throttled tab takes longer
//! than the nominal duration to finish.
//!
//! Displayed values never decrease and never exceed the target, and the last
//! displayed value is exactly the target.

use crate::config::CounterConfig;

/// Progress of a single counter.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CounterAnimation {
    target: i64,
    increment: f64,
    current: f64,
    finished: bool,
}

/// What a single [`CounterAnimation::tick`] produced.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CounterStep {
    /// Display this value and tick again next frame.
    Running(i64),
    /// Display this value (the target); the animation is over.
    Finished(i64),
}

impl CounterStep {
    /// The value to display.
    #[must_use]
    pub const fn value(self) -> i64 {
        match self {
            Self::Running(v) | Self::Finished(v) => v,
        }
    }
}

impl CounterAnimation {
    /// Creates an animation counting to `target`.
    #[must_use]
    pub fn new(target: i64, config: &CounterConfig) -> Self {
        let frames = config.duration_ms / config.nominal_frame_ms;
        let increment = if frames.is_finite() && frames > 0.0 {
            target as f64 / frames
        } else {
            target as f64
        };
        Self {
            target,
            increment,
            current: 0.0,
            finished: false,
        }
    }

    /// The value being counted to.
    #[must_use]
    pub const fn target(&self) -> i64 {
        self.target
    }

    /// Whether the target has been reached.
    #[must_use]
    pub const fn is_finished(&self) -> bool {
        self.finished
    }

    /// Advances one frame.
    ///
    /// A non-positive target (or increment) finishes on the first tick.
    /// Ticking a finished animation keeps returning the target.
    pub fn tick(&mut self) -> CounterStep {
        let target = self.target as f64;
        if self.finished || self.current >= target || self.increment <= 0.0 {
            self.finished = true;
            return CounterStep::Finished(self.target);
        }
        self.current += self.increment;
        if self.current >= target {
            self.finished = true;
            return CounterStep::Finished(self.target);
        }
        CounterStep::Running(round_half_up(self.current).min(self.target))
    }
}

/// Rounds a non-negative value to the nearest integer, halves up.
fn round_half_up(value: f64) -> i64 {
    #[expect(
        clippy::cast_possible_truncation,
        reason = "value is bounded by the i64 target"
    )]
    let rounded = (value + 0.5) as i64;
    rounded
}

/// Parses a counter target the way markup authors write it: optional
/// surrounding whitespace, an optional sign, then leading digits. Trailing
/// garbage (`"250+"`, `"99%"`) is ignored; no digits at all yields `0`.
#[must_use]
pub fn parse_target(raw: Option<&str>) -> i64 {
    let Some(raw) = raw else {
        return 0;
    };
    let s = raw.trim_start();
    let (negative, digits) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };
    let mut value: i64 = 0;
    for b in digits.bytes().take_while(u8::is_ascii_digit) {
        value = value.saturating_mul(10).saturating_add(i64::from(b - b'0'));
    }
    if negative { -value } else { value }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;

    const CONFIG: CounterConfig = CounterConfig {
        duration_ms: 2000.0,
        nominal_frame_ms: 16.0,
    };

    fn run(target: i64) -> Vec<i64> {
        let mut anim = CounterAnimation::new(target, &CONFIG);
        let mut shown = Vec::new();
        for _ in 0..10_000 {
            let step = anim.tick();
            shown.push(step.value());
            if let CounterStep::Finished(_) = step {
                return shown;
            }
        }
        panic!("counter to {target} never finished");
    }

    #[test]
    fn counts_monotonically_to_exact_target() {
        for target in [1, 7, 100, 250, 999, 12_345] {
            let shown = run(target);
            assert!(
                shown.windows(2).all(|w| w[0] <= w[1]),
                "non-monotonic for {target}"
            );
            assert!(shown.iter().all(|&v| v <= target), "overshoot for {target}");
            assert_eq!(shown.last(), Some(&target));
        }
    }

    #[test]
    fn takes_about_the_nominal_frame_count() {
        // 2000ms / 16ms = 125 frames.
        let frames = run(250).len();
        assert!((124..=126).contains(&frames), "took {frames} frames");
    }

    #[test]
    fn zero_and_negative_targets_finish_immediately() {
        let mut zero = CounterAnimation::new(0, &CONFIG);
        assert_eq!(zero.tick(), CounterStep::Finished(0));
        let mut negative = CounterAnimation::new(-5, &CONFIG);
        assert_eq!(negative.tick(), CounterStep::Finished(-5));
        assert!(negative.is_finished());
    }

    #[test]
    fn finished_counter_stays_on_target() {
        let mut anim = CounterAnimation::new(3, &CONFIG);
        while !anim.is_finished() {
            anim.tick();
        }
        assert_eq!(anim.tick(), CounterStep::Finished(3));
    }

    #[test]
    fn target_parsing_is_lenient() {
        assert_eq!(parse_target(Some("250")), 250);
        assert_eq!(parse_target(Some("  42 ")), 42);
        assert_eq!(parse_target(Some("99%")), 99);
        assert_eq!(parse_target(Some("-12")), -12);
        assert_eq!(parse_target(Some("abc")), 0);
        assert_eq!(parse_target(Some("")), 0);
        assert_eq!(parse_target(None), 0);
    }
}
