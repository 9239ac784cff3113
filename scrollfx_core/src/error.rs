// Copyright 2026 the Scrollfx Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Error type shared by the effects engine and its page backends.
//!
//! Missing elements and malformed attributes are not errors: they are
//! no-ops or fall back to defaults. What remains are failing host
//! operations and lifecycle misuse.

use alloc::string::String;

/// Errors produced while initializing or driving page effects.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EffectError {
    /// The document has no `<body>` to attach generated elements to.
    #[error("document has no body")]
    MissingBody,

    /// A host (DOM) operation failed.
    #[error("host operation `{op}` failed: {message}")]
    Host {
        /// The operation that failed, e.g. `create_element`.
        op: &'static str,
        /// Host-provided detail.
        message: String,
    },

    /// `start` was called on an engine that is already running.
    #[error("effects already started")]
    AlreadyStarted,

    /// The engine has been disposed and cannot be restarted.
    #[error("effects have been disposed")]
    Disposed,
}

impl EffectError {
    /// Creates a [`EffectError::Host`] error.
    #[must_use]
    pub fn host(op: &'static str, message: impl Into<String>) -> Self {
        Self::Host {
            op,
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;

    #[test]
    fn host_error_names_the_operation() {
        let err = EffectError::host("create_element", "quota");
        assert_eq!(
            err.to_string(),
            "host operation `create_element` failed: quota"
        );
    }
}
