//! Encoders for packing composite keys into integers.
//!
//! # Available Encoders
//!
//! - [`CompositeEncoder`]: Mixed-radix encoder over per-dimension value sets
//!
//! All encoders implement [`KeyEncoder`].
//!
//! # Example
//!
//! ```rust
//! use keyfold::encoders::{CompositeEncoder, KeyEncoder};
//!
//! let encoder = CompositeEncoder::builder()
//!     .dimension(&[8, 7])
//!     .dimension(&[0, 1, 9, 5])
//!     .dimension(&[900])
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(encoder.capacity(), 20);
//! assert_eq!(encoder.encode(&[8, 9, 900]), 19);
//! assert!(encoder.encode_checked(&[6, 9, 900]).is_err());
//! ```

mod base;
mod composite;
mod term;

pub use base::KeyEncoder;
pub use composite::{
    CompositeEncoder, CompositeEncoderBuilder, CompositeEncoderParams, RangeOverflowPolicy,
};
pub use term::{DimensionKind, DimensionTerm};
