//! Error types for the health core.
//!
//! Expected outcomes (part missing, already destroyed, nothing healed) are
//! reported through [`Outcome`](crate::outcome::Outcome), never as errors.
//! `HealthError` covers configuration faults and misuse.

use thiserror::Error;

use crate::entity::EntityId;

/// Health core errors.
#[derive(Debug, Error)]
pub enum HealthError {
    /// A module was configured with the name reserved for the hull.
    #[error("cannot have health module with name 'base'")]
    ReservedModuleName,

    /// Two modules share a name.
    #[error("duplicate health module: {0}")]
    DuplicateModule(String),

    /// Exactly one of the hull fields carries the disabled sentinel.
    #[error("hull must be disabled with both fields set to -1 (got default {default}, max {max})")]
    PartialHullSentinel {
        /// Configured default health
        default: i32,
        /// Configured maximum health
        max: i32,
    },

    /// A part's default health is out of range.
    #[error("invalid health range for '{part}': default {default}, max {max}")]
    InvalidHealthRange {
        /// Part name (`"base"` for the hull)
        part: String,
        /// Configured default health
        default: i64,
        /// Configured maximum health
        max: i64,
    },

    /// A bulk operation was asked to distribute nothing.
    #[error("{operation} amount must be greater than zero")]
    ZeroAmount {
        /// Operation that rejected the amount
        operation: &'static str,
    },

    /// The world holds no store for the entity.
    #[error("entity not found: {0}")]
    UnknownEntity(EntityId),

    /// The entity's store has no value for a part; `init` was never run.
    #[error("health part not initialized: {key}")]
    UninitializedPart {
        /// Store key that was read
        key: String,
    },

    /// Configuration JSON failed to parse.
    #[error("configuration error: {0}")]
    Config(#[from] serde_json::Error),
}

/// Result type for health operations.
pub type Result<T> = std::result::Result<T, HealthError>;
