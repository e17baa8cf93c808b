//! Per-dimension terms of a composite encoder.

use crate::error::{KeyfoldError, Result};
use crate::types::{DimIdx, DimensionBounds, Member, Packed};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use std::fmt;

/// One linear term of a composite key: `weight * (coordinate[i] - min)`.
///
/// Created only for dimensions with at least two positions. The weight is the
/// product of the spans of every term created before it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DimensionTerm {
    /// Positional multiplier (the carry when this term was created).
    weight: Packed,

    /// Which coordinate slot this term reads.
    dimension_index: DimIdx,

    /// Smallest declared value.
    min_value: Member,

    /// Largest declared value.
    max_value: Member,

    /// Positions this term occupies, in packed width.
    span: Packed,
}

impl DimensionTerm {
    pub(crate) fn new(
        weight: Packed,
        dimension_index: DimIdx,
        bounds: DimensionBounds,
        span: Packed,
    ) -> Self {
        Self {
            weight,
            dimension_index,
            min_value: bounds.min(),
            max_value: bounds.max(),
            span,
        }
    }

    /// Returns the positional weight.
    pub fn weight(&self) -> Packed {
        self.weight
    }

    /// Returns the coordinate slot this term reads.
    pub fn dimension_index(&self) -> DimIdx {
        self.dimension_index
    }

    /// Returns the smallest declared value.
    pub fn min_value(&self) -> Member {
        self.min_value
    }

    /// Returns the largest declared value.
    pub fn max_value(&self) -> Member {
        self.max_value
    }

    /// Returns the number of positions this term occupies.
    pub fn span(&self) -> Packed {
        self.span
    }

    /// Returns the bounds of this term.
    pub fn bounds(&self) -> DimensionBounds {
        DimensionBounds::new(self.min_value, self.max_value)
    }

    /// Contribution of this term, without range checks.
    ///
    /// Arithmetic wraps, so an out-of-range value yields garbage rather than a
    /// panic.
    #[inline(always)]
    pub(crate) fn contribution(&self, coordinate: &[Member]) -> Packed {
        let offset = coordinate[self.dimension_index].wrapping_sub(self.min_value);
        self.weight.wrapping_mul(Packed::from(offset))
    }

    /// Contribution of this term, rejecting values outside `[min, max]`.
    pub(crate) fn checked_contribution(&self, coordinate: &[Member]) -> Result<Packed> {
        let value = *coordinate
            .get(self.dimension_index)
            .ok_or(KeyfoldError::CoordinateTooShort {
                required: self.dimension_index + 1,
                actual: coordinate.len(),
            })?;

        if value < self.min_value || value > self.max_value {
            return Err(KeyfoldError::OutOfRange {
                dimension: self.dimension_index,
                value,
                min: self.min_value,
                max: self.max_value,
            });
        }

        // weight * (span - 1) < capacity, so this cannot overflow.
        Ok(self.weight * Packed::from(value - self.min_value))
    }
}

impl fmt::Display for DimensionTerm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{{pos:{}, min:{}, max:{}, step:{}, carry:{}}}",
            self.dimension_index, self.min_value, self.max_value, self.span, self.weight
        )
    }
}

/// How construction classified one dimension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum DimensionKind {
    /// No admissible values were declared.
    Unconstrained,

    /// Exactly one admissible value.
    Fixed(Member),

    /// The dimension became the term at this index of
    /// [`CompositeEncoder::terms`](crate::encoders::CompositeEncoder::terms).
    Term(usize),

    /// The declared values cover the full member range and the dimension was
    /// collapsed to its first declared value.
    RangeOverflow(Member),
}

impl DimensionKind {
    /// Returns true if this dimension is read by `encode`.
    pub fn is_term(&self) -> bool {
        matches!(self, DimensionKind::Term(_))
    }

    /// Returns the constant held for a non-term dimension.
    pub fn fixed_value(&self) -> Option<Member> {
        match *self {
            DimensionKind::Fixed(value) | DimensionKind::RangeOverflow(value) => Some(value),
            DimensionKind::Unconstrained | DimensionKind::Term(_) => None,
        }
    }
}

impl fmt::Display for DimensionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DimensionKind::Unconstrained => write!(f, "unconstrained"),
            DimensionKind::Fixed(value) => write!(f, "fixed({value})"),
            DimensionKind::Term(index) => write!(f, "term#{index}"),
            DimensionKind::RangeOverflow(value) => write!(f, "range-overflow({value})"),
        }
    }
}
