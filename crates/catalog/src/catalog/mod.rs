//! The catalog: owner of every region, grouping, array group and matrix
//!
//! All four stores are flat arenas. Cross references (`maps_in`,
//! `maps_out`, matrix rows and columns) are plain handles into the global
//! handle spaces, resolved through the two running-total tables.
//!
//! ## Build order
//!
//! Handles are only allocated through the `add_*` operations. Every region
//! a grouping refers to must exist before the grouping is added. Each
//! `add_*` either commits fully or returns an error before touching any
//! store, table or map list.

mod query;

pub use query::GroupingSource;

use crate::array_group::ArrayGroup;
use crate::config::CatalogConfig;
use crate::matrix::Matrix;
use crate::table::RunningTotalTable;
use sil_core::{
    Error, Grouping, GroupingEntry, Handle, OrderEntry, Region, RegionEntry, Result,
};
use tracing::{debug, warn};

/// Structured index-list catalog
///
/// Cloning yields an independent catalog. Matrices resolve their rows and
/// columns through whichever catalog they are queried from, so a clone
/// needs no re-pointing.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    regions: Vec<Region>,
    groupings: Vec<Grouping>,
    array_groups: Vec<ArrayGroup>,
    matrices: Vec<Matrix>,
    /// Interleaving of `add_*` calls, replayed by the attribute form
    order: Vec<OrderEntry>,
    region_table: RunningTotalTable<RegionEntry>,
    grouping_table: RunningTotalTable<GroupingEntry>,
    config: CatalogConfig,
}

impl Catalog {
    /// Create an empty catalog with default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty catalog with the given configuration
    pub fn with_config(config: CatalogConfig) -> Self {
        Catalog {
            config,
            ..Self::default()
        }
    }

    /// Active configuration
    pub fn config(&self) -> &CatalogConfig {
        &self.config
    }

    /// Add a region that represents a whole mesh
    pub fn add_whole(&mut self, region: Region) -> Result<Handle> {
        self.add_region(region, RegionEntry::Whole, OrderEntry::WholeRegion)
    }

    /// Add a region that is a subset of another region
    pub fn add_subset(&mut self, region: Region) -> Result<Handle> {
        self.add_region(region, RegionEntry::Subset, OrderEntry::SubsetRegion)
    }

    fn add_region(&mut self, region: Region, kind: RegionEntry, entry: OrderEntry) -> Result<Handle> {
        if region.has_maps() {
            return Err(rejected("region")(Error::InvalidOperation(format!(
                "region '{}' already carries map references",
                region.name()
            ))));
        }
        let handle = self
            .region_table
            .push(kind, self.regions.len(), 1)
            .map_err(rejected("region"))?;
        debug!(handle, name = region.name(), ?kind, "added region");
        self.regions.push(region);
        self.order.push(entry);
        Ok(handle)
    }

    /// Add a grouping
    ///
    /// The superset must be a stored region. Every member must be an
    /// allocated region handle; stored members get the new grouping appended
    /// to their `maps_in`, synthesized members pick it up when queried.
    /// A member listed more than once is recorded once.
    pub fn add_collection(&mut self, grouping: Grouping) -> Result<Handle> {
        let superset = self
            .stored_superset(grouping.superset(), "collection")
            .map_err(rejected("collection"))?;

        let count = self.num_regions();
        if let Some(max) = grouping.members().max_element() {
            if max >= count {
                return Err(rejected("collection")(Error::out_of_range(max, count)));
            }
        }
        let mut members = Vec::with_capacity(grouping.members().len());
        for member in grouping.members() {
            if let Some(local) = self.stored_local(member).map_err(rejected("collection"))? {
                members.push(local);
            }
        }
        members.sort_unstable();
        members.dedup();

        let handle = self
            .grouping_table
            .push(GroupingEntry::Stored, self.groupings.len(), 1)
            .map_err(rejected("collection"))?;
        self.regions[superset].add_map_out(handle);
        for local in members {
            self.regions[local].add_map_in(handle);
        }
        debug!(
            handle,
            category = grouping.category(),
            superset = grouping.superset(),
            members = grouping.members().len(),
            "added collection"
        );
        self.groupings.push(grouping);
        self.order.push(OrderEntry::Collection);
        Ok(handle)
    }

    /// Add an array group
    ///
    /// Reserves `group.count()` region handles and one grouping handle.
    /// Returns the handle of the equivalent grouping.
    pub fn add_array_group(&mut self, mut group: ArrayGroup) -> Result<Handle> {
        let parent = self
            .stored_superset(group.parent(), "array group")
            .map_err(rejected("array group"))?;
        self.region_table
            .check_capacity(group.count())
            .and_then(|()| self.grouping_table.check_capacity(1))
            .map_err(rejected("array group"))?;

        let local_index = self.array_groups.len();
        let first_region = self
            .region_table
            .push(RegionEntry::ArrayGroup, local_index, group.count())?;
        let collection = self
            .grouping_table
            .push(GroupingEntry::ArrayGroup, local_index, 1)?;
        group.assign_handles(first_region, collection);
        self.regions[parent].add_map_out(collection);
        debug!(
            first_region,
            count = group.count(),
            collection,
            parent = group.parent(),
            "added array group"
        );
        self.array_groups.push(group);
        self.order.push(OrderEntry::ArrayGroup);
        Ok(collection)
    }

    /// Add a matrix
    ///
    /// Reserves one region handle per cell and one grouping handle per row,
    /// then per column. Returns the first grouping handle.
    pub fn add_matrix(&mut self, mut matrix: Matrix) -> Result<Handle> {
        let mut row_locals = Vec::with_capacity(matrix.rows().len());
        for &row in matrix.rows() {
            row_locals.push(self.stored_local(row).map_err(rejected("matrix"))?);
        }
        let mut column_locals = Vec::with_capacity(matrix.columns().len());
        for &column in matrix.columns() {
            column_locals.push(self.stored_local(column).map_err(rejected("matrix"))?);
        }
        let region_count = matrix.region_count().ok_or_else(|| {
            rejected("matrix")(Error::InvalidOperation(format!(
                "{} x {} matrix has more cells than the handle space",
                matrix.rows().len(),
                matrix.columns().len()
            )))
        })?;
        self.region_table
            .check_capacity(region_count)
            .and_then(|()| self.grouping_table.check_capacity(matrix.grouping_count()))
            .map_err(rejected("matrix"))?;

        let local_index = self.matrices.len();
        let first_region = self
            .region_table
            .push(RegionEntry::Matrix, local_index, region_count)?;
        let first_grouping =
            self.grouping_table
                .push(GroupingEntry::Matrix, local_index, matrix.grouping_count())?;
        matrix.assign_handles(first_region, first_grouping);

        for (r, local) in row_locals.into_iter().enumerate() {
            if let Some(local) = local {
                self.regions[local].add_matrix_map_out(matrix.row_grouping(r));
            }
        }
        for (c, local) in column_locals.into_iter().enumerate() {
            if let Some(local) = local {
                self.regions[local].add_matrix_map_out(matrix.column_grouping(c));
            }
        }
        debug!(
            first_region,
            first_grouping,
            rows = matrix.rows().len(),
            columns = matrix.columns().len(),
            "added matrix"
        );
        self.matrices.push(matrix);
        self.order.push(OrderEntry::Matrix);
        Ok(first_grouping)
    }

    /// Local index of a stored region, `None` for a synthesized one
    fn stored_local(&self, handle: Handle) -> Result<Option<usize>> {
        let resolved = self.region_table.resolve(handle)?;
        Ok(match resolved.kind {
            RegionEntry::Whole | RegionEntry::Subset => Some(resolved.local_index),
            RegionEntry::ArrayGroup | RegionEntry::Matrix => None,
        })
    }

    /// Local index of a superset region, which must be stored
    fn stored_superset(&self, handle: Handle, what: &str) -> Result<usize> {
        self.stored_local(handle)?.ok_or_else(|| {
            Error::InvalidOperation(format!(
                "{} whose superset (region {}) is itself synthesized",
                what, handle
            ))
        })
    }
}

/// Log a rejected `add_*` call and pass the error through
fn rejected(what: &'static str) -> impl Fn(Error) -> Error {
    move |error| {
        warn!(what, %error, "rejected add");
        error
    }
}
