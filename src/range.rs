// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Block-range parsing, super-chunking, and round-robin partitioning.
//!
//! A requested interval is first chopped into fixed-size super-chunks that
//! are processed sequentially, bounding per-run memory and limiting the
//! blast radius of a crash to one chunk. Within a chunk, block numbers are
//! dealt round-robin across the configured worker count, which balances
//! load evenly and avoids hammering a node endpoint with one contiguous
//! range per worker.

use std::fmt;
use std::num::{NonZeroU64, NonZeroUsize};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::RangeError;

/// A closed interval of block numbers, `bottom..=top`.
///
/// # Examples
///
/// ```rust
/// use semioindex::BlockRange;
///
/// let range: BlockRange = "100-103".parse()?;
/// assert_eq!(range.bottom(), 100);
/// assert_eq!(range.top(), 103);
/// assert_eq!(range.len(), 4);
/// # Ok::<(), semioindex::RangeError>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockRange {
    bottom: u64,
    top: u64,
}

impl BlockRange {
    /// Create a range from inclusive bounds.
    ///
    /// # Errors
    ///
    /// Returns [`RangeError::Inverted`] if `bottom > top`.
    pub fn new(bottom: u64, top: u64) -> Result<Self, RangeError> {
        if bottom > top {
            return Err(RangeError::Inverted { bottom, top });
        }
        Ok(Self { bottom, top })
    }

    /// Lower bound, inclusive.
    #[must_use]
    pub fn bottom(&self) -> u64 {
        self.bottom
    }

    /// Upper bound, inclusive.
    #[must_use]
    pub fn top(&self) -> u64 {
        self.top
    }

    /// Number of blocks in the range.
    #[must_use]
    pub fn len(&self) -> u64 {
        // A range can never be empty, so this cannot overflow for any
        // realistic chain height.
        self.top - self.bottom + 1
    }

    /// Always false: a constructed range contains at least one block.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Iterate the block numbers in ascending order.
    pub fn numbers(&self) -> impl Iterator<Item = u64> {
        self.bottom..=self.top
    }

    /// Split the range into consecutive sub-ranges of at most `chunk_size`
    /// blocks, ascending.
    ///
    /// The last chunk may be shorter. Chunks are processed sequentially by
    /// the pipeline; each is independently partitioned across workers.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use std::num::NonZeroU64;
    /// use semioindex::BlockRange;
    ///
    /// let range = BlockRange::new(0, 99)?;
    /// let chunks: Vec<_> = range
    ///     .super_chunks(NonZeroU64::new(30).unwrap())
    ///     .collect();
    /// assert_eq!(chunks.len(), 4);
    /// assert_eq!(chunks[0], BlockRange::new(0, 29)?);
    /// assert_eq!(chunks[3], BlockRange::new(90, 99)?);
    /// # Ok::<(), semioindex::RangeError>(())
    /// ```
    pub fn super_chunks(&self, chunk_size: NonZeroU64) -> SuperChunks {
        SuperChunks {
            next: Some(self.bottom),
            top: self.top,
            chunk_size: chunk_size.get(),
        }
    }

    /// Deal the range's block numbers round-robin across `workers` lists.
    ///
    /// Worker `i` receives the blocks at offsets `i, i + W, i + 2W, ...` of
    /// the ascending interval. The union of the returned lists equals the
    /// full integer set of the range and the lists are pairwise disjoint;
    /// lists may be empty when the worker count exceeds the range length.
    #[must_use]
    pub fn partition(&self, workers: NonZeroUsize) -> Vec<Vec<u64>> {
        let numbers: Vec<u64> = self.numbers().collect();
        partition_round_robin(&numbers, workers)
    }
}

impl fmt::Display for BlockRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.bottom, self.top)
    }
}

impl FromStr for BlockRange {
    type Err = RangeError;

    /// Parse a `BOTTOM-TOP` range string with inclusive integer bounds.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let spec: RangeSpec = s.parse()?;
        match spec.top {
            RangeEnd::Number(top) => BlockRange::new(spec.bottom, top),
            RangeEnd::Latest => Err(RangeError::malformed(
                s,
                "\"latest\" must be resolved against the node before use",
            )),
        }
    }
}

/// Iterator over the super-chunks of a [`BlockRange`].
#[derive(Debug, Clone)]
pub struct SuperChunks {
    next: Option<u64>,
    top: u64,
    chunk_size: u64,
}

impl Iterator for SuperChunks {
    type Item = BlockRange;

    fn next(&mut self) -> Option<Self::Item> {
        let bottom = self.next?;
        let top = bottom
            .checked_add(self.chunk_size - 1)
            .map_or(self.top, |t| t.min(self.top));
        self.next = if top < self.top { Some(top + 1) } else { None };
        Some(BlockRange { bottom, top })
    }
}

/// A range argument as written on the command line, before the upper bound
/// is resolved.
///
/// `"100-200"` parses to fixed bounds; `"100-latest"` leaves the top open
/// until [`RangeSpec::resolve`] is called with the node's current head.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RangeSpec {
    /// Lower bound, inclusive.
    pub bottom: u64,
    /// Upper bound, possibly symbolic.
    pub top: RangeEnd,
}

/// Upper bound of a [`RangeSpec`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RangeEnd {
    /// A fixed block number, inclusive.
    Number(u64),
    /// The node's current head at run start.
    Latest,
}

impl RangeSpec {
    /// Fix the upper bound, substituting the node head for `latest`.
    ///
    /// # Errors
    ///
    /// Returns [`RangeError::Inverted`] if the resolved top is below the
    /// bottom (including a node head behind the requested bottom).
    pub fn resolve(self, latest: u64) -> Result<BlockRange, RangeError> {
        match self.top {
            RangeEnd::Number(top) => BlockRange::new(self.bottom, top),
            RangeEnd::Latest => BlockRange::new(self.bottom, latest),
        }
    }

    /// True when the upper bound still needs the node head.
    #[must_use]
    pub fn needs_head(&self) -> bool {
        matches!(self.top, RangeEnd::Latest)
    }
}

impl FromStr for RangeSpec {
    type Err = RangeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (bottom, top) = s.split_once('-').ok_or_else(|| {
            RangeError::malformed(s, "expected BOTTOM-TOP with a single hyphen")
        })?;

        let bottom: u64 = bottom
            .trim()
            .parse()
            .map_err(|e| RangeError::malformed(s, format!("bottom bound: {e}")))?;

        let top = match top.trim() {
            "latest" => RangeEnd::Latest,
            raw => RangeEnd::Number(
                raw.parse()
                    .map_err(|e| RangeError::malformed(s, format!("top bound: {e}")))?,
            ),
        };

        if let RangeEnd::Number(t) = top {
            if bottom > t {
                return Err(RangeError::Inverted { bottom, top: t });
            }
        }

        Ok(Self { bottom, top })
    }
}

/// Deal an arbitrary list of block numbers round-robin across `workers`
/// lists, preserving relative order within each list.
///
/// Used by the pipeline after the gap checker has filtered a chunk, where
/// the surviving numbers are no longer contiguous.
#[must_use]
pub fn partition_round_robin(numbers: &[u64], workers: NonZeroUsize) -> Vec<Vec<u64>> {
    let w = workers.get();
    let mut lists: Vec<Vec<u64>> = (0..w)
        .map(|_| Vec::with_capacity(numbers.len().div_ceil(w)))
        .collect();
    for (index, number) in numbers.iter().enumerate() {
        lists[index % w].push(*number);
    }
    lists
}

#[cfg(test)]
mod tests {
    use super::*;

    fn nz(n: u64) -> NonZeroU64 {
        NonZeroU64::new(n).unwrap()
    }

    fn workers(n: usize) -> NonZeroUsize {
        NonZeroUsize::new(n).unwrap()
    }

    #[test]
    fn test_parse_simple_range() {
        let range: BlockRange = "100-103".parse().unwrap();
        assert_eq!(range.bottom(), 100);
        assert_eq!(range.top(), 103);
        assert_eq!(range.len(), 4);
    }

    #[test]
    fn test_parse_single_block_range() {
        let range: BlockRange = "100-100".parse().unwrap();
        assert_eq!(range.len(), 1);
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!("".parse::<BlockRange>().is_err());
        assert!("100".parse::<BlockRange>().is_err());
        assert!("abc-def".parse::<BlockRange>().is_err());
        assert!("100-abc".parse::<BlockRange>().is_err());
        assert!("-5-10".parse::<BlockRange>().is_err());
    }

    #[test]
    fn test_parse_rejects_inverted_bounds() {
        let err = "103-100".parse::<BlockRange>().unwrap_err();
        assert_eq!(
            err,
            RangeError::Inverted {
                bottom: 103,
                top: 100
            }
        );
    }

    #[test]
    fn test_parse_latest_spec() {
        let spec: RangeSpec = "100-latest".parse().unwrap();
        assert!(spec.needs_head());
        assert_eq!(spec.resolve(105).unwrap(), BlockRange::new(100, 105).unwrap());
    }

    #[test]
    fn test_resolve_latest_behind_bottom() {
        let spec: RangeSpec = "100-latest".parse().unwrap();
        assert!(spec.resolve(99).is_err());
    }

    #[test]
    fn test_latest_cannot_be_used_unresolved() {
        assert!("100-latest".parse::<BlockRange>().is_err());
    }

    #[test]
    fn test_super_chunks_exact_multiple() {
        let range = BlockRange::new(0, 99).unwrap();
        let chunks: Vec<_> = range.super_chunks(nz(50)).collect();
        assert_eq!(chunks.len(), 2);
        assert_eq!(chunks[0], BlockRange::new(0, 49).unwrap());
        assert_eq!(chunks[1], BlockRange::new(50, 99).unwrap());
    }

    #[test]
    fn test_super_chunks_remainder() {
        let range = BlockRange::new(0, 99).unwrap();
        let chunks: Vec<_> = range.super_chunks(nz(30)).collect();
        assert_eq!(chunks.len(), 4);
        assert_eq!(chunks[3], BlockRange::new(90, 99).unwrap());
    }

    #[test]
    fn test_super_chunks_larger_than_range() {
        let range = BlockRange::new(100, 103).unwrap();
        let chunks: Vec<_> = range.super_chunks(nz(1000)).collect();
        assert_eq!(chunks, vec![range]);
    }

    #[test]
    fn test_super_chunks_size_one() {
        let range = BlockRange::new(5, 7).unwrap();
        let chunks: Vec<_> = range.super_chunks(nz(1)).collect();
        assert_eq!(chunks.len(), 3);
        assert_eq!(chunks[1], BlockRange::new(6, 6).unwrap());
    }

    #[test]
    fn test_partition_round_robin_example() {
        // The documented assignment for 100-103 over two workers.
        let range = BlockRange::new(100, 103).unwrap();
        let lists = range.partition(workers(2));
        assert_eq!(lists, vec![vec![100, 102], vec![101, 103]]);
    }

    #[test]
    fn test_partition_single_worker_gets_everything() {
        let range = BlockRange::new(100, 102).unwrap();
        let lists = range.partition(workers(1));
        assert_eq!(lists, vec![vec![100, 101, 102]]);
    }

    #[test]
    fn test_partition_more_workers_than_blocks() {
        let range = BlockRange::new(10, 11).unwrap();
        let lists = range.partition(workers(4));
        assert_eq!(lists, vec![vec![10], vec![11], vec![], vec![]]);
    }

    #[test]
    fn test_partition_arbitrary_list_preserves_order() {
        let numbers = [7, 3, 9, 1, 5];
        let lists = partition_round_robin(&numbers, workers(2));
        assert_eq!(lists, vec![vec![7, 9, 5], vec![3, 1]]);
    }
}
