// Copyright 2026 the Scrollfx Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Deadline-ordered task queue.
//!
//! Stagger reveals, typewriter steps and the start-time sweep are all
//! "run this later" work. Instead of one host timer per task, the engine
//! keeps them in a [`TimerQueue`] and the host arms a single timeout for
//! [`next_deadline`](TimerQueue::next_deadline).
//!
//! Tasks with equal deadlines run in the order they were scheduled, so a
//! sequence scheduled at strictly increasing delays is delivered strictly
//! in order.

use alloc::collections::BTreeMap;

use crate::time::HostTime;

/// A queue of tasks keyed by deadline, then insertion order.
#[derive(Clone, Debug)]
pub struct TimerQueue<T> {
    tasks: BTreeMap<(HostTime, u64), T>,
    next_seq: u64,
}

impl<T> Default for TimerQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> TimerQueue<T> {
    /// Creates an empty queue.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            tasks: BTreeMap::new(),
            next_seq: 0,
        }
    }

    /// Schedules `task` to run at `deadline`.
    pub fn schedule(&mut self, deadline: HostTime, task: T) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.tasks.insert((deadline, seq), task);
    }

    /// Removes and returns the earliest task whose deadline is `<= now`.
    pub fn pop_due(&mut self, now: HostTime) -> Option<(HostTime, T)> {
        let entry = self.tasks.first_entry()?;
        if entry.key().0 > now {
            return None;
        }
        let ((deadline, _), task) = entry.remove_entry();
        Some((deadline, task))
    }

    /// The earliest pending deadline.
    #[must_use]
    pub fn next_deadline(&self) -> Option<HostTime> {
        self.tasks.keys().next().map(|&(deadline, _)| deadline)
    }

    /// Number of pending tasks.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    /// Whether no tasks are pending.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Drops every pending task.
    pub fn clear(&mut self) {
        self.tasks.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pops_in_deadline_order() {
        let mut q = TimerQueue::new();
        q.schedule(HostTime(300), 'c');
        q.schedule(HostTime(100), 'a');
        q.schedule(HostTime(200), 'b');

        assert_eq!(q.next_deadline(), Some(HostTime(100)));
        assert_eq!(q.pop_due(HostTime(250)), Some((HostTime(100), 'a')));
        assert_eq!(q.pop_due(HostTime(250)), Some((HostTime(200), 'b')));
        assert_eq!(q.pop_due(HostTime(250)), None);
        assert_eq!(q.len(), 1);
    }

    #[test]
    fn equal_deadlines_keep_insertion_order() {
        let mut q = TimerQueue::new();
        for n in 0..5 {
            q.schedule(HostTime(0), n);
        }
        let order: alloc::vec::Vec<_> =
            core::iter::from_fn(|| q.pop_due(HostTime(0)).map(|(_, n)| n)).collect();
        assert_eq!(order, [0, 1, 2, 3, 4]);
    }

    #[test]
    fn clear_drops_everything() {
        let mut q = TimerQueue::new();
        q.schedule(HostTime(5), ());
        q.clear();
        assert!(q.is_empty());
        assert_eq!(q.next_deadline(), None);
    }
}
