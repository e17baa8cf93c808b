//! Sample dimension tables.
//!
//! Seven eleven-dimension tables of increasing width, used by the benches,
//! the `perf_test` binary and the integration tests. Table `n` starts from an
//! all-fixed layout (every dimension pinned to `900`) and opens the first `n`
//! dimensions listed in the table below.

use crate::types::Member;

/// Number of sample tables.
pub const SAMPLE_TABLE_COUNT: usize = 7;

/// Number of dimensions in every sample table.
pub const SAMPLE_DIMENSIONS: usize = 11;

/// Key the timing loop starts from. Slot 0 is overwritten on every iteration.
pub const SAMPLE_KEY: [Member; SAMPLE_DIMENSIONS] = [
    9, 5, 900, 832, 67, 800, 1_000_000, 10_000_001, 3, 4, 9,
];

const PINNED: Member = 900;

// Opened in this order; table n applies the first n entries.
const OPENED: [(usize, &[Member]); SAMPLE_TABLE_COUNT] = [
    (1, &[0, 1, 9, 5]),
    (3, &[900, 832]),
    (4, &[3, 6, 8, 4, 2, 2, 44, 56, 67, 32, 123]),
    (7, &[10_000_000, 10_000_002, 10_000_001]),
    (9, &[4, 9, 10]),
    (10, &[9, 4]),
    (0, &[8, 7]),
];

/// Returns sample table `table` (1-based), or `None` outside `1..=7`.
///
/// ```rust
/// use keyfold::fixtures::sample_dimensions;
///
/// let dims = sample_dimensions(2).unwrap();
/// assert_eq!(dims[1], vec![0, 1, 9, 5]);
/// assert_eq!(dims[3], vec![900, 832]);
/// assert_eq!(dims[4], vec![900]);
/// ```
pub fn sample_dimensions(table: usize) -> Option<Vec<Vec<Member>>> {
    if !(1..=SAMPLE_TABLE_COUNT).contains(&table) {
        return None;
    }

    let mut dimensions = vec![vec![PINNED]; SAMPLE_DIMENSIONS];
    for &(index, values) in &OPENED[..table] {
        dimensions[index] = values.to_vec();
    }
    Some(dimensions)
}

/// Returns all sample tables, paired with their 1-based number.
pub fn all_sample_dimensions() -> impl Iterator<Item = (usize, Vec<Vec<Member>>)> {
    (1..=SAMPLE_TABLE_COUNT).filter_map(|n| sample_dimensions(n).map(|d| (n, d)))
}
