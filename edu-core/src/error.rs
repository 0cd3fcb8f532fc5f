//! Error classification shared by every fallible operation in the crate.
//!
//! Each module defines its own `thiserror` enum; [`ErrorClass`] tells the
//! presentation layer how to react to any of them.

use serde::{Deserialize, Serialize};

/// How a failure should be handled by whoever drives the UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorClass {
    /// The user must choose something before proceeding. Re-prompt.
    Validation,
    /// Catalog or cart data could not be joined or parsed. Show
    /// "unable to compute total" instead of a number.
    Data,
    /// The persisted profile is unreadable. Treat it as absent and prompt
    /// for re-entry.
    Deserialization,
    /// A fixed mapping was broken. Log, abort the operation, return to a
    /// safe step.
    InvariantViolation,
}

impl ErrorClass {
    pub fn is_fatal(&self) -> bool {
        matches!(self, ErrorClass::InvariantViolation)
    }
}
