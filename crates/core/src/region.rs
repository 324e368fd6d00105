//! Region: a named, addressable subset (or the whole) of a mesh
//!
//! A region's handle is assigned by the catalog and never changes. Its map
//! lists only ever grow: each grouping added later that references the region
//! appends its own handle.

use crate::types::Handle;
use smallvec::SmallVec;
use std::fmt;

/// Append-only list of grouping handles
///
/// Most regions sit in a handful of groupings, so the list stays inline.
pub type MapList = SmallVec<[Handle; 4]>;

/// A named unit of the mesh
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Region {
    name: String,
    identifier: i32,
    /// Groupings that contain this region as a member
    maps_in: MapList,
    /// Groupings for which this region is the superset
    maps_out: MapList,
    /// Matrix groupings for which this region is the superset
    matrix_maps_out: MapList,
}

impl Region {
    /// Create a region with no map references
    pub fn new(name: impl Into<String>, identifier: i32) -> Self {
        Region {
            name: name.into(),
            identifier,
            maps_in: MapList::new(),
            maps_out: MapList::new(),
            matrix_maps_out: MapList::new(),
        }
    }

    /// Region name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Domain-specific numeric id (not the handle)
    pub fn identifier(&self) -> i32 {
        self.identifier
    }

    /// Groupings containing this region, in the order they were attached
    pub fn maps_in(&self) -> &[Handle] {
        &self.maps_in
    }

    /// Groupings (collections and array groups) this region is superset of
    pub fn maps_out(&self) -> &[Handle] {
        &self.maps_out
    }

    /// Matrix row/column groupings this region is superset of
    pub fn matrix_maps_out(&self) -> &[Handle] {
        &self.matrix_maps_out
    }

    /// Every outbound grouping: ordinary ones first, then matrix ones
    pub fn all_maps_out(&self) -> impl Iterator<Item = Handle> + '_ {
        self.maps_out
            .iter()
            .chain(self.matrix_maps_out.iter())
            .copied()
    }

    /// Whether any grouping uses this region as its superset
    pub fn has_maps_out(&self) -> bool {
        !self.maps_out.is_empty() || !self.matrix_maps_out.is_empty()
    }

    /// Whether any map list is non-empty
    pub fn has_maps(&self) -> bool {
        !self.maps_in.is_empty() || self.has_maps_out()
    }

    /// Record that `grouping` contains this region
    pub fn add_map_in(&mut self, grouping: Handle) {
        self.maps_in.push(grouping);
    }

    /// Record that this region is the superset of `grouping`
    pub fn add_map_out(&mut self, grouping: Handle) {
        self.maps_out.push(grouping);
    }

    /// Record that this region is the superset of a matrix `grouping`
    pub fn add_matrix_map_out(&mut self, grouping: Handle) {
        self.matrix_maps_out.push(grouping);
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (id {})", self.name, self.identifier)
    }
}
