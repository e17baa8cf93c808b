//! Base encoder trait.

use crate::error::Result;
use crate::types::{Member, Packed};

/// Trait for composite key encoders.
///
/// A key encoder maps a coordinate, one member per dimension, to a packed
/// integer in `[0, capacity())`.
pub trait KeyEncoder {
    /// Exclusive upper bound on every key this encoder produces.
    fn capacity(&self) -> Packed;

    /// Encodes a coordinate without validating its values.
    ///
    /// Values outside their dimension's bounds produce an unspecified key.
    fn encode(&self, coordinate: &[Member]) -> Packed;

    /// Encodes a coordinate, rejecting short coordinates and values outside
    /// their dimension's bounds.
    fn encode_checked(&self, coordinate: &[Member]) -> Result<Packed>;

    /// Encodes every coordinate and collects the keys.
    fn encode_all<C>(&self, coordinates: &[C]) -> Vec<Packed>
    where
        C: AsRef<[Member]>,
        Self: Sized,
    {
        coordinates
            .iter()
            .map(|coordinate| self.encode(coordinate.as_ref()))
            .collect()
    }
}
