//! Handle type and wire conversions
//!
//! Handles are dense, zero-based and never reused. In memory they are
//! `usize`; on the wire (attribute form) they are `i32`, so every value read
//! from the wire goes through [`handle_from_wire`].

use crate::error::{Error, Result};

/// Dense, stable, zero-based index of a region or grouping
pub type Handle = usize;

/// Convert a wire value into a handle
///
/// Negative values are reported as `OutOfRange` against `count`.
pub fn handle_from_wire(value: i32, count: usize) -> Result<Handle> {
    usize::try_from(value).map_err(|_| Error::OutOfRange {
        handle: i64::from(value),
        count,
    })
}

/// Convert a handle (or count) into its wire value
pub fn handle_to_wire(handle: Handle) -> Result<i32> {
    i32::try_from(handle).map_err(|_| Error::out_of_range(handle, i32::MAX as usize))
}
