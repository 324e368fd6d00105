//! Read-only catalog queries
//!
//! Queries never write to the catalog's stores. Regions and groupings that
//! live in an array group or a matrix are synthesized into owned values
//! (`Cow::Owned`); stored ones are borrowed.

use super::Catalog;
use crate::array_group::ArrayGroup;
use crate::matrix::Matrix;
use crate::table::{Resolved, RunningTotalTable};
use sil_core::{
    Error, Grouping, GroupingEntry, Handle, OrderEntry, Region, RegionEntry, Result,
};
use std::borrow::Cow;
use tracing::trace;

/// The store a grouping handle lives in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupingSource<'a> {
    /// Stored grouping at `index`
    Stored {
        /// Index into the grouping store
        index: usize,
    },
    /// Equivalent grouping of an array group
    ArrayGroup {
        /// The array group
        group: &'a ArrayGroup,
        /// Index into the array group store
        index: usize,
    },
    /// Row or column grouping of a matrix
    Matrix {
        /// The matrix
        matrix: &'a Matrix,
        /// Index into the matrix store
        index: usize,
        /// Row (`< rows`) or column (`rows + c`) position
        offset: usize,
    },
}

impl Catalog {
    /// Number of allocated region handles
    pub fn num_regions(&self) -> usize {
        self.region_table.total()
    }

    /// Number of allocated grouping handles
    pub fn num_groupings(&self) -> usize {
        self.grouping_table.total()
    }

    /// Interleaving of `add_*` calls
    pub fn order(&self) -> &[OrderEntry] {
        &self.order
    }

    /// Stored regions, in insertion order
    pub fn stored_regions(&self) -> &[Region] {
        &self.regions
    }

    /// Stored groupings, in insertion order
    pub fn stored_groupings(&self) -> &[Grouping] {
        &self.groupings
    }

    /// Array groups, in insertion order
    pub fn array_groups(&self) -> &[ArrayGroup] {
        &self.array_groups
    }

    /// Matrices, in insertion order
    pub fn matrices(&self) -> &[Matrix] {
        &self.matrices
    }

    /// Region handle table
    pub fn region_table(&self) -> &RunningTotalTable<RegionEntry> {
        &self.region_table
    }

    /// Grouping handle table
    pub fn grouping_table(&self) -> &RunningTotalTable<GroupingEntry> {
        &self.grouping_table
    }

    /// Resolve a region handle to its backing store
    pub fn resolve_region(&self, handle: Handle) -> Result<Resolved<RegionEntry>> {
        let resolved = self.region_table.resolve(handle)?;
        trace!(handle, kind = ?resolved.kind, local = resolved.local_index, "resolved region");
        Ok(resolved)
    }

    /// Resolve a grouping handle to its backing store
    pub fn resolve_grouping(&self, handle: Handle) -> Result<Resolved<GroupingEntry>> {
        let resolved = self.grouping_table.resolve(handle)?;
        trace!(handle, kind = ?resolved.kind, local = resolved.local_index, "resolved grouping");
        Ok(resolved)
    }

    /// Fetch a region
    ///
    /// Stored regions are borrowed. Array group members are synthesized and,
    /// unless disabled in the configuration, get `maps_in`/`maps_out`
    /// re-derived from every grouping, array group and matrix. Matrix cells
    /// only carry their own row and column groupings.
    pub fn region(&self, handle: Handle) -> Result<Cow<'_, Region>> {
        let resolved = self.resolve_region(handle)?;
        match resolved.kind {
            RegionEntry::ArrayGroup if self.config.attach_synthesized_maps => {
                let mut region = self.array_groups[resolved.local_index].region(resolved.offset);
                self.attach_synthesized_maps(handle, &mut region);
                Ok(Cow::Owned(region))
            }
            _ => self.materialize(resolved),
        }
    }

    /// Fetch a region without re-deriving maps for synthesized ones
    pub fn region_shallow(&self, handle: Handle) -> Result<Cow<'_, Region>> {
        let resolved = self.resolve_region(handle)?;
        self.materialize(resolved)
    }

    fn materialize(&self, resolved: Resolved<RegionEntry>) -> Result<Cow<'_, Region>> {
        match resolved.kind {
            RegionEntry::Whole | RegionEntry::Subset => {
                Ok(Cow::Borrowed(&self.regions[resolved.local_index]))
            }
            RegionEntry::ArrayGroup => Ok(Cow::Owned(
                self.array_groups[resolved.local_index].region(resolved.offset),
            )),
            RegionEntry::Matrix => Ok(Cow::Owned(self.matrices[resolved.local_index].region(
                self,
                resolved.offset,
                &self.config.matrix_cell_separator,
            )?)),
        }
    }

    /// Re-derive the map lists of a synthesized region
    ///
    /// Walks the grouping table in handle order, so the lists come out in
    /// the same order a stored region would have accumulated them.
    fn attach_synthesized_maps(&self, handle: Handle, region: &mut Region) {
        for entry in self.grouping_table.entries() {
            match entry.kind {
                GroupingEntry::Stored => {
                    let grouping = &self.groupings[entry.local_index];
                    if grouping.superset() == handle {
                        region.add_map_out(entry.start);
                    }
                    if grouping.contains(handle) {
                        region.add_map_in(entry.start);
                    }
                }
                GroupingEntry::ArrayGroup => {
                    let group = &self.array_groups[entry.local_index];
                    if group.parent() == handle {
                        region.add_map_out(group.collection());
                    }
                    if group.contains_region(handle) {
                        region.add_map_in(group.collection());
                    }
                }
                GroupingEntry::Matrix => {
                    for grouping in self.matrices[entry.local_index].groupings_with_superset(handle) {
                        region.add_matrix_map_out(grouping);
                    }
                }
            }
        }
    }

    /// Domain-specific identifier of a region
    pub fn region_id(&self, handle: Handle) -> Result<i32> {
        let resolved = self.resolve_region(handle)?;
        Ok(match resolved.kind {
            RegionEntry::Whole | RegionEntry::Subset => {
                self.regions[resolved.local_index].identifier()
            }
            RegionEntry::ArrayGroup => {
                self.array_groups[resolved.local_index].region_identifier(resolved.offset)
            }
            RegionEntry::Matrix => i32::try_from(resolved.offset).unwrap_or(i32::MAX),
        })
    }

    /// Whether any grouping uses the region as superset
    ///
    /// Does not build the region.
    pub fn region_has_outbound_maps(&self, handle: Handle) -> Result<bool> {
        let resolved = self.resolve_region(handle)?;
        Ok(match resolved.kind {
            RegionEntry::Whole | RegionEntry::Subset => {
                self.regions[resolved.local_index].has_maps_out()
            }
            RegionEntry::ArrayGroup => {
                self.grouping_table
                    .entries()
                    .iter()
                    .any(|entry| match entry.kind {
                        GroupingEntry::Stored => {
                            self.groupings[entry.local_index].superset() == handle
                        }
                        GroupingEntry::ArrayGroup => {
                            self.array_groups[entry.local_index].parent() == handle
                        }
                        GroupingEntry::Matrix => self.matrices[entry.local_index]
                            .groupings_with_superset(handle)
                            .next()
                            .is_some(),
                    })
            }
            RegionEntry::Matrix => false,
        })
    }

    /// Whether the region was added with `add_whole`
    pub fn is_whole(&self, handle: Handle) -> Result<bool> {
        Ok(self.resolve_region(handle)?.kind == RegionEntry::Whole)
    }

    /// Handles of every region added with `add_whole`
    pub fn whole_regions(&self) -> Vec<Handle> {
        self.region_table
            .entries()
            .iter()
            .filter(|entry| entry.kind == RegionEntry::Whole)
            .map(|entry| entry.start)
            .collect()
    }

    /// Fetch a grouping
    pub fn grouping(&self, handle: Handle) -> Result<Cow<'_, Grouping>> {
        let resolved = self.resolve_grouping(handle)?;
        match resolved.kind {
            GroupingEntry::Stored => Ok(Cow::Borrowed(&self.groupings[resolved.local_index])),
            GroupingEntry::ArrayGroup => {
                Ok(Cow::Owned(self.array_groups[resolved.local_index].grouping()))
            }
            GroupingEntry::Matrix => self.matrices[resolved.local_index]
                .grouping(resolved.offset)
                .map(Cow::Owned)
                .ok_or_else(|| {
                    Error::InvalidOperation(format!(
                        "matrix {} has no grouping at offset {}",
                        resolved.local_index, resolved.offset
                    ))
                }),
        }
    }

    /// Which store a grouping handle lives in
    pub fn grouping_source(&self, handle: Handle) -> Result<GroupingSource<'_>> {
        let resolved = self.resolve_grouping(handle)?;
        Ok(match resolved.kind {
            GroupingEntry::Stored => GroupingSource::Stored {
                index: resolved.local_index,
            },
            GroupingEntry::ArrayGroup => GroupingSource::ArrayGroup {
                group: &self.array_groups[resolved.local_index],
                index: resolved.local_index,
            },
            GroupingEntry::Matrix => GroupingSource::Matrix {
                matrix: &self.matrices[resolved.local_index],
                index: resolved.local_index,
                offset: resolved.offset,
            },
        })
    }

    /// Find a region by name
    ///
    /// Scans one table entry at a time and returns the first region named
    /// `name` that, when `within` is given, is a member of that grouping.
    /// Matrix cells are not searched.
    pub fn index_by_name(&self, name: &str, within: Option<Handle>) -> Result<Handle> {
        for (span, entry) in self.region_table.spans() {
            match entry.kind {
                RegionEntry::Whole | RegionEntry::Subset => {
                    let region = &self.regions[entry.local_index];
                    if region.name() == name
                        && within.map_or(true, |g| region.maps_in().contains(&g))
                    {
                        return Ok(span.start);
                    }
                }
                RegionEntry::ArrayGroup => {
                    let group = &self.array_groups[entry.local_index];
                    let Some(offset) = group.offset_of_name(name) else {
                        continue;
                    };
                    let handle = span.start + offset;
                    let accepted = match within {
                        None => true,
                        Some(g) => {
                            let mut region = group.region(offset);
                            self.attach_synthesized_maps(handle, &mut region);
                            region.maps_in().contains(&g)
                        }
                    };
                    if accepted {
                        return Ok(handle);
                    }
                }
                RegionEntry::Matrix => {}
            }
        }
        Err(Error::NotFound(match within {
            Some(g) => format!("region '{}' in grouping {}", name, g),
            None => format!("region '{}'", name),
        }))
    }

    /// Find the grouping with `category` over `superset`
    pub fn grouping_index(&self, category: &str, superset: Handle) -> Result<Handle> {
        for entry in self.grouping_table.entries() {
            let found = match entry.kind {
                GroupingEntry::Stored => {
                    let grouping = &self.groupings[entry.local_index];
                    (grouping.category() == category && grouping.superset() == superset)
                        .then_some(entry.start)
                }
                GroupingEntry::ArrayGroup => {
                    let group = &self.array_groups[entry.local_index];
                    (group.category() == category && group.parent() == superset)
                        .then(|| group.collection())
                }
                GroupingEntry::Matrix => {
                    self.matrices[entry.local_index].grouping_index(category, superset)
                }
            };
            if let Some(handle) = found {
                return Ok(handle);
            }
        }
        Err(Error::NotFound(format!(
            "grouping '{}' over region {}",
            category, superset
        )))
    }
}
