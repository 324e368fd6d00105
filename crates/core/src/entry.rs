//! Backing-store kinds
//!
//! A catalog handle is resolved to one of these kinds plus a local index into
//! the matching store. Regions and groupings have separate kind sets; the
//! order log records which `Add*` call produced each entry.

use crate::error::{Error, Result};

/// Where a region handle lives
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RegionEntry {
    /// Stored region added as a whole
    Whole,
    /// Stored region added as a subset
    Subset,
    /// Synthesized on demand by an array group
    ArrayGroup,
    /// Synthesized on demand by a matrix (one per cell)
    Matrix,
}

impl RegionEntry {
    /// Whether regions of this kind exist only when queried
    pub const fn is_synthesized(&self) -> bool {
        matches!(self, RegionEntry::ArrayGroup | RegionEntry::Matrix)
    }
}

/// Where a grouping handle lives
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GroupingEntry {
    /// Stored grouping
    Stored,
    /// The single grouping equivalent to an array group
    ArrayGroup,
    /// One of a matrix's row/column groupings
    Matrix,
}

/// One `Add*` call in the order log
///
/// Codes are part of the attribute form and must not change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OrderEntry {
    /// `add_whole`
    WholeRegion,
    /// `add_subset`
    SubsetRegion,
    /// `add_collection`
    Collection,
    /// `add_array_group`
    ArrayGroup,
    /// `add_matrix`
    Matrix,
}

impl OrderEntry {
    /// Stable wire code
    pub const fn code(&self) -> i32 {
        match self {
            OrderEntry::WholeRegion => 0,
            OrderEntry::SubsetRegion => 1,
            OrderEntry::Collection => 2,
            OrderEntry::ArrayGroup => 3,
            OrderEntry::Matrix => 4,
        }
    }

    /// Parse a wire code
    pub fn from_code(code: i32) -> Result<Self> {
        match code {
            0 => Ok(OrderEntry::WholeRegion),
            1 => Ok(OrderEntry::SubsetRegion),
            2 => Ok(OrderEntry::Collection),
            3 => Ok(OrderEntry::ArrayGroup),
            4 => Ok(OrderEntry::Matrix),
            other => Err(Error::Serialization(format!("unknown order code {}", other))),
        }
    }
}
