//! Primitive type definitions for mixed-radix encoding.

/// A single coordinate value of one dimension.
pub type Member = u32;

/// A packed composite key, and the width in which carries are accumulated.
pub type Packed = u64;

/// Position of a dimension within a coordinate.
pub type DimIdx = usize;

/// Smallest possible member value.
pub const MIN_MEMBER: Member = Member::MIN;

/// Largest possible member value.
pub const MAX_MEMBER: Member = Member::MAX;
