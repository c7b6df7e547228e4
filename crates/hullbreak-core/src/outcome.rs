//! Results of health mutations.
//!
//! Callers that speak the integer protocol of older combat scripts can use
//! [`Outcome::sentinel`]:
//!
//! | Outcome              | Code |
//! |----------------------|------|
//! | `Applied(n)`         | `n`  |
//! | `AlreadyDestroyed`   | `1`  |
//! | `NotApplicable`      | `-1` |
//!
//! Note that `AlreadyDestroyed` and `Applied(1)` share a code; the enum keeps
//! them apart.

use serde::{Deserialize, Serialize};
use std::fmt;

/// What a damage or heal call did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    /// Amount actually applied (may be 0).
    Applied(u32),
    /// Single-part damage hit a part that was already at 0.
    AlreadyDestroyed,
    /// Hull disabled, part not found, nothing to heal, or blocked.
    NotApplicable,
}

impl Outcome {
    /// Integer code for this outcome.
    #[must_use]
    pub fn sentinel(self) -> i64 {
        match self {
            Self::Applied(amount) => i64::from(amount),
            Self::AlreadyDestroyed => 1,
            Self::NotApplicable => -1,
        }
    }

    /// Applied amount, if any.
    #[must_use]
    pub const fn applied(self) -> Option<u32> {
        match self {
            Self::Applied(amount) => Some(amount),
            Self::AlreadyDestroyed | Self::NotApplicable => None,
        }
    }

    /// Returns true if the call applied a positive amount.
    #[must_use]
    pub const fn is_positive(self) -> bool {
        matches!(self, Self::Applied(amount) if amount > 0)
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Applied(amount) => write!(f, "applied {amount}"),
            Self::AlreadyDestroyed => write!(f, "already destroyed"),
            Self::NotApplicable => write!(f, "not applicable"),
        }
    }
}
