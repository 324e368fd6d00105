//! Structured index-list catalog
//!
//! The catalog describes how a mesh decomposes into named, possibly
//! overlapping regions and how those regions group into categories. It
//! composes four backing stores behind two dense handle spaces:
//! - Stored regions (whole or subset) and stored groupings
//! - Array groups: region families synthesized on demand
//! - Matrices: cross products of two region lists, also synthesized
//!
//! Handles resolve to a store through running-total tables in
//! O(log entries). The attribute form is the serialization boundary used to
//! hand a built catalog to another process.
//!
//! # Example
//!
//! ```
//! use sil_catalog::{ArrayGroup, Catalog};
//! use sil_core::{Grouping, MemberSet, Region, Role};
//!
//! let mut catalog = Catalog::new();
//! let mesh = catalog.add_whole(Region::new("mesh", 0)).unwrap();
//! let steel = catalog.add_subset(Region::new("steel", 1)).unwrap();
//! catalog
//!     .add_collection(Grouping::new("materials", Role::Material, mesh, MemberSet::range(steel, 1)))
//!     .unwrap();
//! catalog
//!     .add_array_group(ArrayGroup::prefixed(mesh, "domain", 100).with_category("domains", Role::Domain))
//!     .unwrap();
//!
//! assert_eq!(catalog.num_regions(), 102);
//! assert_eq!(catalog.index_by_name("domain42", None).unwrap(), 44);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod array_group;
pub mod attributes;
pub mod catalog;
pub mod config;
pub mod dump;
pub mod matrix;
pub mod table;

pub use array_group::{ArrayGroup, NameScheme};
pub use attributes::{AttributeForm, ATTRIBUTE_FORMAT_VERSION};
pub use catalog::{Catalog, GroupingSource};
pub use config::{CatalogConfig, CONFIG_FILE_NAME};
pub use dump::DumpAnnotations;
pub use matrix::Matrix;
pub use table::{Resolved, RunningTotalTable, TableEntry};
