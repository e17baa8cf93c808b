//! Per-dimension bound analysis.
//!
//! Reduces one dimension's admissible values to the inclusive range they
//! occupy. The range, not the value set, decides how many positions the
//! dimension needs in a packed key: holes inside `[min, max]` still consume
//! capacity.

use crate::types::{Member, Packed, MAX_MEMBER, MIN_MEMBER};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Returns the smallest value, or `None` for an empty set.
pub fn min_of(values: &[Member]) -> Option<Member> {
    values.iter().copied().min()
}

/// Returns the largest value, or `None` for an empty set.
pub fn max_of(values: &[Member]) -> Option<Member> {
    values.iter().copied().max()
}

/// Number of positions needed for `[min, max]`, in member width.
///
/// Wraps to `0` when the range covers every member value
/// (`min == 0 && max == u32::MAX`). Callers treat that zero as the
/// range-overflow condition.
#[inline]
pub fn span(min: Member, max: Member) -> Member {
    max.wrapping_sub(min).wrapping_add(1)
}

/// Number of positions needed for `[min, max]`, in packed width.
///
/// Never wraps: the full member range yields `2^32`.
#[inline]
pub fn wide_span(min: Member, max: Member) -> Packed {
    Packed::from(max.wrapping_sub(min)) + 1
}

/// Inclusive bounds of one dimension's admissible values.
///
/// # Example
///
/// ```rust
/// use keyfold::types::DimensionBounds;
///
/// let bounds = DimensionBounds::of(&[0, 1, 9, 5]).unwrap();
/// assert_eq!(bounds.min(), 0);
/// assert_eq!(bounds.max(), 9);
/// assert_eq!(bounds.span(), 10);
/// assert!(bounds.contains(7)); // holes are still inside the range
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DimensionBounds {
    min: Member,
    max: Member,
}

impl DimensionBounds {
    /// Bounds covering every member value.
    pub const FULL: Self = Self {
        min: MIN_MEMBER,
        max: MAX_MEMBER,
    };

    /// Creates bounds from an explicit range, ordering the endpoints.
    pub fn new(a: Member, b: Member) -> Self {
        Self {
            min: a.min(b),
            max: a.max(b),
        }
    }

    /// Scans a value set once for its minimum and maximum.
    ///
    /// Returns `None` for an empty set.
    pub fn of(values: &[Member]) -> Option<Self> {
        let (&first, rest) = values.split_first()?;
        Some(rest.iter().fold(
            Self {
                min: first,
                max: first,
            },
            |bounds, &value| Self {
                min: bounds.min.min(value),
                max: bounds.max.max(value),
            },
        ))
    }

    /// Smallest admissible value.
    #[inline]
    pub fn min(&self) -> Member {
        self.min
    }

    /// Largest admissible value.
    #[inline]
    pub fn max(&self) -> Member {
        self.max
    }

    /// Span in member width; `0` for the full range.
    #[inline]
    pub fn span(&self) -> Member {
        span(self.min, self.max)
    }

    /// Span in packed width.
    #[inline]
    pub fn wide_span(&self) -> Packed {
        wide_span(self.min, self.max)
    }

    /// Returns true if the span wraps in member width.
    #[inline]
    pub fn is_full_range(&self) -> bool {
        self.span() == 0
    }

    /// Returns true if `value` lies in `[min, max]`.
    #[inline]
    pub fn contains(&self, value: Member) -> bool {
        (self.min..=self.max).contains(&value)
    }
}
