// Copyright 2026 the Scrollfx Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Rate limiters for high-frequency page events.
//!
//! Both limiters are plain state machines over [`HostTime`]; neither owns a
//! timer. [`Debounce`] exposes its deadline so the host can fold it into the
//! single timeout it arms for the engine.

use crate::time::{Duration, HostTime};

/// Leading-edge throttle: the first call in a window runs, the rest of the
/// window's calls are dropped.
#[derive(Clone, Copy, Debug)]
pub struct Throttle {
    limit: Duration,
    blocked_until: Option<HostTime>,
}

impl Throttle {
    /// Creates a throttle admitting at most one call per `limit`.
    #[must_use]
    pub const fn new(limit: Duration) -> Self {
        Self {
            limit,
            blocked_until: None,
        }
    }

    /// Returns `true` if a call at `now` should run, and opens a new window
    /// when it does.
    pub fn admit(&mut self, now: HostTime) -> bool {
        if let Some(until) = self.blocked_until
            && now < until
        {
            return false;
        }
        self.blocked_until = Some(now.saturating_add(self.limit));
        true
    }

    /// Forgets the current window.
    pub fn reset(&mut self) {
        self.blocked_until = None;
    }
}

/// Trailing-edge debounce: every call pushes the deadline back; the latest
/// value is released once `wait` passes without a new call.
#[derive(Clone, Debug)]
pub struct Debounce<T> {
    wait: Duration,
    pending: Option<(HostTime, T)>,
}

impl<T> Debounce<T> {
    /// Creates a debounce with the given quiet period.
    #[must_use]
    pub const fn new(wait: Duration) -> Self {
        Self {
            wait,
            pending: None,
        }
    }

    /// Records a call, replacing any pending value.
    pub fn call(&mut self, now: HostTime, value: T) {
        self.pending = Some((now.saturating_add(self.wait), value));
    }

    /// Releases the pending value if its quiet period has elapsed.
    pub fn poll(&mut self, now: HostTime) -> Option<T> {
        if self.deadline().is_some_and(|deadline| deadline <= now) {
            self.pending.take().map(|(_, v)| v)
        } else {
            None
        }
    }

    /// When the pending value will be released, if any.
    #[must_use]
    pub fn deadline(&self) -> Option<HostTime> {
        self.pending.as_ref().map(|&(deadline, _)| deadline)
    }

    /// Drops the pending value.
    pub fn cancel(&mut self) {
        self.pending = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(n: u64) -> HostTime {
        HostTime::from_millis(n)
    }

    #[test]
    fn throttle_admits_first_call_per_window() {
        let mut t = Throttle::new(Duration::from_millis(100));
        assert!(t.admit(ms(0)));
        assert!(!t.admit(ms(10)));
        assert!(!t.admit(ms(99)));
        assert!(t.admit(ms(100)));
        assert!(!t.admit(ms(150)));
        assert!(t.admit(ms(400)));
    }

    #[test]
    fn debounce_fires_once_with_latest_value() {
        let mut d = Debounce::new(Duration::from_millis(250));
        d.call(ms(0), 1);
        d.call(ms(100), 2);
        assert_eq!(d.poll(ms(300)), None, "deadline moved to 350ms");
        assert_eq!(d.deadline(), Some(ms(350)));
        assert_eq!(d.poll(ms(350)), Some(2));
        assert_eq!(d.poll(ms(1000)), None);
    }

    #[test]
    fn debounce_cancel_drops_pending() {
        let mut d = Debounce::new(Duration::from_millis(10));
        d.call(ms(0), ());
        d.cancel();
        assert_eq!(d.poll(ms(50)), None);
        assert_eq!(d.deadline(), None);
    }
}
