//! silcat - Structured index-list catalog
//!
//! A catalog describes how a scientific mesh decomposes into named, possibly
//! overlapping regions (domains, materials, species, ...) and how those
//! regions group into categories.
//!
//! # Quick Start
//!
//! ```
//! use silcat::{Catalog, Grouping, MemberSet, Region, Role};
//!
//! let mut catalog = Catalog::new();
//! let mesh = catalog.add_whole(Region::new("mesh", 0))?;
//! let steel = catalog.add_subset(Region::new("steel", 1))?;
//! catalog.add_collection(Grouping::new(
//!     "materials",
//!     Role::Material,
//!     mesh,
//!     MemberSet::enumerated(vec![steel]),
//! ))?;
//!
//! assert_eq!(catalog.region(steel)?.maps_in(), &[0]);
//! # Ok::<(), silcat::Error>(())
//! ```
//!
//! # Architecture
//!
//! Leaf types (regions, groupings, member sets, errors) live in `sil-core`.
//! The catalog, its handle tables, lazily materialized array groups and
//! matrices, and the attribute form live in `sil-catalog`. Both are
//! re-exported here.

pub use sil_catalog::*;
pub use sil_core::{
    handle_from_wire, handle_to_wire, Error, Grouping, GroupingEntry, Handle, MapList, MemberSet,
    OrderEntry, Region, RegionEntry, Result, Role,
};
pub use sil_core::member_set::{MemberSetKind, Members};
