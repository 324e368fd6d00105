//! Core types for the structured index-list (SIL) catalog
//!
//! This crate defines the leaf types every catalog store is built from:
//! - Handle: Dense, stable, zero-based index of a region or grouping
//! - Region: Named unit of a mesh with inbound/outbound grouping references
//! - Grouping: Category + role bundle over a superset region and a member set
//! - MemberSet: Compact set of region handles (explicit list or ranges)
//! - Entry kinds: Which backing store a handle lives in
//! - Error: Error type hierarchy

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod entry;
pub mod error;
pub mod grouping;
pub mod member_set;
pub mod region;
pub mod types;

pub use entry::{GroupingEntry, OrderEntry, RegionEntry};
pub use error::{Error, Result};
pub use grouping::{Grouping, Role};
pub use member_set::MemberSet;
pub use region::{MapList, Region};
pub use types::{handle_from_wire, handle_to_wire, Handle};
