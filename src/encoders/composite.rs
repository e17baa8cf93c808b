//! Composite Encoder implementation.
//!
//! The Composite Encoder packs an N-dimensional coordinate into one integer
//! using mixed-radix positional encoding. Each dimension that can take more
//! than one value becomes a digit whose base is the dimension's span; the
//! first kept dimension is the least significant digit.

use crate::encoders::{DimensionKind, DimensionTerm, KeyEncoder};
use crate::error::{KeyfoldError, Result};
use crate::types::{DimIdx, DimensionBounds, Member, Packed};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use std::fmt;
use std::str::FromStr;
use tracing::{debug, trace, warn};

/// What construction does with a dimension whose values cover the full
/// member range, where the span no longer fits in member width.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum RangeOverflowPolicy {
    /// Hold the dimension at its first declared value and drop its
    /// variability. The dimension is reported as
    /// [`DimensionKind::RangeOverflow`].
    #[default]
    Collapse,

    /// Fail construction with [`KeyfoldError::RangeOverflow`].
    Reject,

    /// Keep the dimension as a term with span `2^32`.
    Widen,
}

impl fmt::Display for RangeOverflowPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RangeOverflowPolicy::Collapse => write!(f, "collapse"),
            RangeOverflowPolicy::Reject => write!(f, "reject"),
            RangeOverflowPolicy::Widen => write!(f, "widen"),
        }
    }
}

impl FromStr for RangeOverflowPolicy {
    type Err = KeyfoldError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "collapse" => Ok(RangeOverflowPolicy::Collapse),
            "reject" => Ok(RangeOverflowPolicy::Reject),
            "widen" => Ok(RangeOverflowPolicy::Widen),
            _ => Err(KeyfoldError::InvalidParameter {
                name: "range_overflow",
                message: format!("Unknown policy '{s}'. Expected: collapse, reject, widen"),
            }),
        }
    }
}

/// Parameters for creating a Composite Encoder.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CompositeEncoderParams {
    /// Admissible values of each dimension, in coordinate order.
    pub dimensions: Vec<Vec<Member>>,

    /// Handling of dimensions that span the full member range.
    pub range_overflow: RangeOverflowPolicy,
}

#[cfg(feature = "serde")]
impl CompositeEncoderParams {
    /// Parses parameters from a JSON document.
    ///
    /// Missing fields take their default values.
    ///
    /// ```rust
    /// use keyfold::encoders::{CompositeEncoderParams, RangeOverflowPolicy};
    ///
    /// let params = CompositeEncoderParams::from_json(
    ///     r#"{"dimensions": [[900], [0, 1, 9, 5]], "range_overflow": "reject"}"#,
    /// ).unwrap();
    /// assert_eq!(params.dimensions.len(), 2);
    /// assert_eq!(params.range_overflow, RangeOverflowPolicy::Reject);
    /// ```
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| KeyfoldError::SerializationError {
            message: format!("Invalid encoder parameters: {e}"),
        })
    }

    /// Renders parameters as pretty-printed JSON.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| KeyfoldError::SerializationError {
            message: format!("JSON serialization failed: {e}"),
        })
    }
}

/// Packs N-dimensional coordinates into a single `u64`.
///
/// Built once from the admissible values of each dimension, then immutable.
/// Encoding reads only the dimensions that carry a term, so it costs one
/// multiply-add per kept dimension.
///
/// # Example
///
/// ```rust
/// use keyfold::encoders::{CompositeEncoder, CompositeEncoderParams};
///
/// let encoder = CompositeEncoder::new(CompositeEncoderParams {
///     dimensions: vec![vec![4, 7, 9], vec![1, 5], vec![100]],
///     ..Default::default()
/// }).unwrap();
///
/// // A spans 6 positions, B spans 5, C is fixed.
/// assert_eq!(encoder.capacity(), 30);
/// assert_eq!(encoder.encode(&[7, 5, 100]), (7 - 4) + 6 * (5 - 1));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct CompositeEncoder {
    /// Kept dimensions in ascending dimension order.
    terms: Vec<DimensionTerm>,

    /// Constant slot per dimension; zero for unconstrained and term dimensions.
    fixed_members: Vec<Member>,

    /// Classification per dimension.
    kinds: Vec<DimensionKind>,

    /// Product of all kept spans.
    capacity: Packed,

    /// Shortest coordinate that reaches every term.
    required_len: usize,
}

impl CompositeEncoder {
    /// Creates a new Composite Encoder.
    ///
    /// Dimensions are processed left to right. Empty dimensions and
    /// singletons contribute no term. Every other dimension becomes a term
    /// weighted by the carry accumulated so far, and multiplies the carry by
    /// its span.
    ///
    /// # Errors
    ///
    /// - [`KeyfoldError::CapacityOverflow`] if the product of spans exceeds
    ///   `u64`.
    /// - [`KeyfoldError::RangeOverflow`] if a dimension covers the full member
    ///   range and the policy is [`RangeOverflowPolicy::Reject`].
    pub fn new(params: CompositeEncoderParams) -> Result<Self> {
        Self::analyze(&params.dimensions, params.range_overflow)
    }

    /// Creates an encoder with the default range-overflow policy.
    pub fn from_dimensions<D: AsRef<[Member]>>(dimensions: &[D]) -> Result<Self> {
        Self::analyze(dimensions, RangeOverflowPolicy::default())
    }

    /// Creates a new Composite Encoder builder.
    pub fn builder() -> CompositeEncoderBuilder {
        CompositeEncoderBuilder::new()
    }

    fn analyze<D: AsRef<[Member]>>(
        dimensions: &[D],
        range_overflow: RangeOverflowPolicy,
    ) -> Result<Self> {
        let mut fixed_members = vec![0; dimensions.len()];
        let mut kinds = Vec::with_capacity(dimensions.len());
        let mut terms: Vec<DimensionTerm> = Vec::new();
        let mut carry: Packed = 1;

        for (i, dimension) in dimensions.iter().enumerate() {
            let values = dimension.as_ref();

            let bounds = match DimensionBounds::of(values) {
                None => {
                    kinds.push(DimensionKind::Unconstrained);
                    continue;
                }
                Some(_) if values.len() == 1 => {
                    fixed_members[i] = values[0];
                    kinds.push(DimensionKind::Fixed(values[0]));
                    continue;
                }
                Some(bounds) => bounds,
            };

            let span = match (bounds.is_full_range(), range_overflow) {
                (false, _) => Packed::from(bounds.span()),
                (true, RangeOverflowPolicy::Widen) => bounds.wide_span(),
                (true, RangeOverflowPolicy::Reject) => {
                    return Err(KeyfoldError::RangeOverflow {
                        dimension: i,
                        min: bounds.min(),
                        max: bounds.max(),
                    });
                }
                (true, RangeOverflowPolicy::Collapse) => {
                    warn!(
                        dimension = i,
                        value = values[0],
                        "Dimension spans the full member range, collapsing to its first value"
                    );
                    fixed_members[i] = values[0];
                    kinds.push(DimensionKind::RangeOverflow(values[0]));
                    continue;
                }
            };

            let next = carry
                .checked_mul(span)
                .ok_or(KeyfoldError::CapacityOverflow {
                    dimension: i,
                    carry,
                    span,
                })?;

            let term = DimensionTerm::new(carry, i, bounds, span);
            trace!(%term, "Created dimension term");

            kinds.push(DimensionKind::Term(terms.len()));
            terms.push(term);
            carry = next;
        }

        let required_len = terms.last().map_or(0, |t| t.dimension_index() + 1);

        debug!(
            dimensions = dimensions.len(),
            terms = terms.len(),
            capacity = carry,
            "Built composite encoder"
        );

        Ok(Self {
            terms,
            fixed_members,
            kinds,
            capacity: carry,
            required_len,
        })
    }

    /// Returns the number of dimensions the encoder was built from.
    pub fn num_dimensions(&self) -> usize {
        self.kinds.len()
    }

    /// Returns the kept dimensions in ascending dimension order.
    pub fn terms(&self) -> &[DimensionTerm] {
        &self.terms
    }

    /// Returns the constant slot of every dimension.
    pub fn fixed_members(&self) -> &[Member] {
        &self.fixed_members
    }

    /// Returns how each dimension was classified.
    pub fn dimension_kinds(&self) -> &[DimensionKind] {
        &self.kinds
    }

    /// Returns the term reading `dimension`, if any.
    pub fn term_for(&self, dimension: DimIdx) -> Option<&DimensionTerm> {
        match self.kinds.get(dimension)? {
            DimensionKind::Term(index) => self.terms.get(*index),
            _ => None,
        }
    }

    /// Exclusive upper bound on every key this encoder produces.
    ///
    /// `1` when no dimension carries a term: every coordinate encodes to `0`.
    pub fn capacity(&self) -> Packed {
        self.capacity
    }

    /// Shortest coordinate that reaches every term.
    pub fn required_len(&self) -> usize {
        self.required_len
    }

    /// Encodes a coordinate without validating it.
    ///
    /// Values outside a term's bounds wrap silently and produce a key that
    /// may collide with or exceed valid keys. Use
    /// [`encode_checked`](Self::encode_checked) when input is untrusted.
    ///
    /// # Panics
    ///
    /// Panics if `coordinate` is shorter than [`required_len`](Self::required_len).
    #[inline]
    pub fn encode(&self, coordinate: &[Member]) -> Packed {
        self.terms
            .iter()
            .fold(0, |key: Packed, term| key.wrapping_add(term.contribution(coordinate)))
    }

    /// Encodes a coordinate, validating length and bounds.
    ///
    /// # Errors
    ///
    /// - [`KeyfoldError::CoordinateTooShort`] if a term's slot is missing.
    /// - [`KeyfoldError::OutOfRange`] if a value lies outside its term's
    ///   bounds.
    pub fn encode_checked(&self, coordinate: &[Member]) -> Result<Packed> {
        if coordinate.len() < self.required_len {
            return Err(KeyfoldError::CoordinateTooShort {
                required: self.required_len,
                actual: coordinate.len(),
            });
        }

        self.terms.iter().try_fold(0, |key: Packed, term| -> Result<Packed> {
            Ok(key + term.checked_contribution(coordinate)?)
        })
    }

    /// Encodes many coordinates into `output` without validating them.
    ///
    /// # Errors
    ///
    /// [`KeyfoldError::InvalidParameter`] if `output` and `coordinates`
    /// differ in length.
    pub fn encode_batch<C: AsRef<[Member]>>(
        &self,
        coordinates: &[C],
        output: &mut [Packed],
    ) -> Result<()> {
        if coordinates.len() != output.len() {
            return Err(KeyfoldError::InvalidParameter {
                name: "output",
                message: format!(
                    "Expected {} slots, got {}",
                    coordinates.len(),
                    output.len()
                ),
            });
        }

        for (slot, coordinate) in output.iter_mut().zip(coordinates) {
            *slot = self.encode(coordinate.as_ref());
        }

        Ok(())
    }
}

impl KeyEncoder for CompositeEncoder {
    fn capacity(&self) -> Packed {
        self.capacity
    }

    fn encode(&self, coordinate: &[Member]) -> Packed {
        CompositeEncoder::encode(self, coordinate)
    }

    fn encode_checked(&self, coordinate: &[Member]) -> Result<Packed> {
        CompositeEncoder::encode_checked(self, coordinate)
    }
}

impl fmt::Display for CompositeEncoder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CompositeEncoder(capacity: {}, terms: [", self.capacity)?;
        for (i, term) in self.terms.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{term}")?;
        }
        write!(f, "])")
    }
}

/// Builder for constructing a CompositeEncoder.
#[derive(Debug, Default, Clone)]
pub struct CompositeEncoderBuilder {
    params: CompositeEncoderParams,
}

impl CompositeEncoderBuilder {
    /// Creates a new builder with no dimensions.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends one dimension.
    pub fn dimension(mut self, values: &[Member]) -> Self {
        self.params.dimensions.push(values.to_vec());
        self
    }

    /// Appends several dimensions in order.
    pub fn dimensions<I, D>(mut self, dimensions: I) -> Self
    where
        I: IntoIterator<Item = D>,
        D: AsRef<[Member]>,
    {
        self.params
            .dimensions
            .extend(dimensions.into_iter().map(|d| d.as_ref().to_vec()));
        self
    }

    /// Sets the range-overflow policy.
    pub fn range_overflow(mut self, policy: RangeOverflowPolicy) -> Self {
        self.params.range_overflow = policy;
        self
    }

    /// Builds the CompositeEncoder.
    ///
    /// # Errors
    ///
    /// See [`CompositeEncoder::new`].
    pub fn build(self) -> Result<CompositeEncoder> {
        CompositeEncoder::new(self.params)
    }
}
