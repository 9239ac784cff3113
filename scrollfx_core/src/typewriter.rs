// Copyright 2026 the Scrollfx Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Character-by-character text reveal.

use alloc::string::String;

use crate::time::Duration;

/// Types `text` into an element one character per step.
#[derive(Clone, Debug, PartialEq)]
pub struct Typewriter<E> {
    element: E,
    text: String,
    shown: usize,
    interval: Duration,
}

impl<E> Typewriter<E> {
    /// Creates a typewriter that has shown nothing yet.
    #[must_use]
    pub fn new(element: E, text: impl Into<String>, interval: Duration) -> Self {
        Self {
            element,
            text: text.into(),
            shown: 0,
            interval,
        }
    }

    /// The element being typed into.
    #[must_use]
    pub fn element(&self) -> &E {
        &self.element
    }

    /// Delay between characters.
    #[must_use]
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Reveals one more character and returns the text to display, or
    /// `None` once everything is shown.
    pub fn step(&mut self) -> Option<&str> {
        let rest = &self.text[self.shown..];
        let next = rest.chars().next()?;
        self.shown += next.len_utf8();
        Some(&self.text[..self.shown])
    }

    /// Whether every character has been shown.
    #[must_use]
    pub fn is_done(&self) -> bool {
        self.shown >= self.text.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn steps_through_multibyte_text() {
        let mut tw = Typewriter::new((), "héllo", Duration::from_millis(100));
        assert_eq!(tw.step(), Some("h"));
        assert_eq!(tw.step(), Some("hé"));
        assert_eq!(tw.step(), Some("hél"));
        assert_eq!(tw.step(), Some("héll"));
        assert_eq!(tw.step(), Some("héllo"));
        assert!(tw.is_done());
        assert_eq!(tw.step(), None);
    }

    #[test]
    fn empty_text_is_done_immediately() {
        let mut tw = Typewriter::new((), "", Duration::from_millis(100));
        assert!(tw.is_done());
        assert_eq!(tw.step(), None);
    }
}
