//! # Keyfold - Mixed-radix composite key encoding
//!
//! Keyfold flattens a composite key, a fixed-length sequence of per-dimension
//! coordinate values, into a single `u64` using a mixed-radix positional
//! numbering system.
//!
//! ## Overview
//!
//! Each dimension is declared by the set of values it may take. The set can be
//! unsorted, non-contiguous and may contain duplicates. Construction reduces
//! every dimension to its inclusive `[min, max]` range and assigns it a
//! positional weight, the product of the spans of all earlier dimensions that
//! carry information:
//!
//! - **Dimension bounds** ([`types::DimensionBounds`]): minimum, maximum and
//!   span of one dimension's admissible values
//! - **Composite encoder** ([`encoders::CompositeEncoder`]): the frozen list of
//!   per-dimension linear terms, evaluated once per key
//!
//! Dimensions with zero or one admissible value contribute no term and are
//! never read during encoding.
//!
//! ## Quick Start
//!
//! ```rust
//! use keyfold::prelude::*;
//!
//! let encoder = CompositeEncoder::from_dimensions(&[
//!     vec![900],
//!     vec![0, 1, 9, 5],
//!     vec![900],
//!     vec![900, 832],
//! ])
//! .unwrap();
//!
//! assert_eq!(encoder.capacity(), 690);
//! assert_eq!(encoder.encode(&[900, 5, 900, 900]), 685);
//! assert_eq!(encoder.encode(&[900, 0, 900, 832]), 0);
//! ```
//!
//! ## Feature Flags
//!
//! - `serde`: Enable serialization of parameters and encoder layouts, and JSON
//!   configuration loading
//! - `cli`: Build the `perf_test` timing binary

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

pub mod encoders;
pub mod fixtures;
pub mod types;

/// Re-export of commonly used types and traits for convenience.
pub mod prelude {
    pub use crate::encoders::{
        CompositeEncoder, CompositeEncoderBuilder, CompositeEncoderParams, DimensionKind,
        DimensionTerm, KeyEncoder, RangeOverflowPolicy,
    };
    pub use crate::error::KeyfoldError;
    pub use crate::types::{DimensionBounds, DimIdx, Member, Packed};
}

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Error types for the library.
pub mod error {
    use crate::types::{DimIdx, Member, Packed};
    use thiserror::Error;

    /// Main error type for keyfold operations.
    #[derive(Error, Debug, Clone, PartialEq, Eq)]
    pub enum KeyfoldError {
        /// A dimension covers the whole 32-bit range, so its span does not fit
        /// the member width.
        #[error("Dimension {dimension} spans the full member range [{min}, {max}]")]
        RangeOverflow {
            /// Index of the offending dimension.
            dimension: DimIdx,
            /// Smallest declared value.
            min: Member,
            /// Largest declared value.
            max: Member,
        },

        /// The product of the kept spans does not fit in 64 bits.
        #[error("Capacity overflow at dimension {dimension}: carry {carry} * span {span} exceeds u64")]
        CapacityOverflow {
            /// Index of the dimension whose span overflowed the carry.
            dimension: DimIdx,
            /// Carry accumulated before this dimension.
            carry: Packed,
            /// Span of this dimension.
            span: Packed,
        },

        /// A coordinate value lies outside the bounds declared for its dimension.
        #[error("Value {value} at dimension {dimension} is outside [{min}, {max}]")]
        OutOfRange {
            /// Index of the offending dimension.
            dimension: DimIdx,
            /// The rejected value.
            value: Member,
            /// Smallest admissible value.
            min: Member,
            /// Largest admissible value.
            max: Member,
        },

        /// The coordinate does not reach every dimension that carries a term.
        #[error("Coordinate too short: need at least {required} values, got {actual}")]
        CoordinateTooShort {
            /// Minimum coordinate length.
            required: usize,
            /// Length of the supplied coordinate.
            actual: usize,
        },

        /// Invalid parameter value.
        #[error("Invalid parameter '{name}': {message}")]
        InvalidParameter {
            /// Name of the invalid parameter.
            name: &'static str,
            /// Description of the error.
            message: String,
        },

        /// Serialization error.
        #[cfg(feature = "serde")]
        #[error("Serialization error: {message}")]
        SerializationError {
            /// Description of the serialization error.
            message: String,
        },
    }

    /// Result type alias using KeyfoldError.
    pub type Result<T> = std::result::Result<T, KeyfoldError>;
}

pub use error::{KeyfoldError, Result};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }

    #[test]
    fn test_error_display() {
        let err = KeyfoldError::OutOfRange {
            dimension: 3,
            value: 12,
            min: 832,
            max: 900,
        };
        assert_eq!(
            err.to_string(),
            "Value 12 at dimension 3 is outside [832, 900]"
        );

        let err = KeyfoldError::CoordinateTooShort {
            required: 4,
            actual: 2,
        };
        assert!(err.to_string().contains("need at least 4"));
    }
}
