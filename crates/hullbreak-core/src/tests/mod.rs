//! Cross-module tests for the health core.
//!
//! # Test Structure
//!
//! - `determinism.rs`: same seed, same outcomes
//! - `integration.rs`: end-to-end combat scenarios through the `Arena`
//! - `properties.rs`: invariants checked over random inputs with proptest
//! - `helpers.rs`: ship layouts and setup utilities

mod determinism;
mod helpers;

pub use helpers::*;
