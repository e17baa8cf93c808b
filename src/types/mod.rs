//! Core types for the keyfold library.
//!
//! This module contains the integer aliases shared across the crate and the
//! per-dimension bound analysis that construction is built on.

mod bounds;
mod primitives;

pub use bounds::*;
pub use primitives::*;
