//! Matrices: cross-product relations between two region lists
//!
//! A matrix over `rows × columns` contributes one synthesized region per
//! cell and one grouping per row and per column. Row grouping `r` has
//! superset `rows[r]` and the cells of row `r` as members; since those cells
//! correspond one-to-one with the columns, it carries the column category.
//! Column groupings mirror this with the row category.
//!
//! A matrix stores no regions of its own. Row and column regions are looked
//! up through a `&Catalog` passed at call time, so copying a catalog never
//! leaves a matrix pointing at the wrong owner.
//!
//! Cells are not searchable by name and receive no map references beyond
//! their own row and column groupings.

use crate::catalog::Catalog;
use sil_core::{Error, Grouping, Handle, MemberSet, Region, Result, Role};

/// A cross-product relation between two ordered region lists
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Matrix {
    rows: Vec<Handle>,
    row_category: String,
    row_role: Role,
    columns: Vec<Handle>,
    column_category: String,
    column_role: Role,
    first_region: Handle,
    first_grouping: Handle,
}

impl Matrix {
    /// Create a matrix over `rows × columns`
    pub fn new(rows: Vec<Handle>, columns: Vec<Handle>) -> Self {
        Matrix {
            rows,
            row_category: String::new(),
            row_role: Role::Ordinary,
            columns,
            column_category: String::new(),
            column_role: Role::Ordinary,
            first_region: 0,
            first_grouping: 0,
        }
    }

    /// Category and role describing the row regions
    pub fn with_row_category(mut self, category: impl Into<String>, role: Role) -> Self {
        self.row_category = category.into();
        self.row_role = role;
        self
    }

    /// Category and role describing the column regions
    pub fn with_column_category(mut self, category: impl Into<String>, role: Role) -> Self {
        self.column_category = category.into();
        self.column_role = role;
        self
    }

    /// Row regions
    pub fn rows(&self) -> &[Handle] {
        &self.rows
    }

    /// Column regions
    pub fn columns(&self) -> &[Handle] {
        &self.columns
    }

    /// Category describing the row regions
    pub fn row_category(&self) -> &str {
        &self.row_category
    }

    /// Role describing the row regions
    pub fn row_role(&self) -> Role {
        self.row_role
    }

    /// Category describing the column regions
    pub fn column_category(&self) -> &str {
        &self.column_category
    }

    /// Role describing the column regions
    pub fn column_role(&self) -> Role {
        self.column_role
    }

    /// First cell region handle
    pub fn first_region(&self) -> Handle {
        self.first_region
    }

    /// First row grouping handle
    pub fn first_grouping(&self) -> Handle {
        self.first_grouping
    }

    pub(crate) fn assign_handles(&mut self, first_region: Handle, first_grouping: Handle) {
        self.first_region = first_region;
        self.first_grouping = first_grouping;
    }

    /// Number of cells, `None` if it does not fit in a handle
    pub fn region_count(&self) -> Option<usize> {
        self.rows.len().checked_mul(self.columns.len())
    }

    /// Number of row plus column groupings
    pub fn grouping_count(&self) -> usize {
        self.rows.len() + self.columns.len()
    }

    /// `(row, column)` of cell `offset`; only meaningful for a matrix with cells
    pub(crate) fn cell_position(&self, offset: usize) -> (usize, usize) {
        let ncols = self.columns.len();
        (offset / ncols, offset % ncols)
    }

    /// Grouping handle of row `r`
    pub fn row_grouping(&self, r: usize) -> Handle {
        self.first_grouping + r
    }

    /// Grouping handle of column `c`
    pub fn column_grouping(&self, c: usize) -> Handle {
        self.first_grouping + self.rows.len() + c
    }

    /// Groupings whose superset is `region`, rows first
    pub fn groupings_with_superset(&self, region: Handle) -> impl Iterator<Item = Handle> + '_ {
        let rows = self
            .rows
            .iter()
            .enumerate()
            .filter(move |&(_, &h)| h == region)
            .map(move |(r, _)| self.row_grouping(r));
        let columns = self
            .columns
            .iter()
            .enumerate()
            .filter(move |&(_, &h)| h == region)
            .map(move |(c, _)| self.column_grouping(c));
        rows.chain(columns)
    }

    /// Synthesize cell `offset`
    ///
    /// The cell's name joins the row and column region names with
    /// `separator`; its identifier is the cell offset.
    pub fn region(&self, catalog: &Catalog, offset: usize, separator: &str) -> Result<Region> {
        let cells = self.region_count().unwrap_or(usize::MAX);
        if offset >= cells {
            return Err(Error::out_of_range(offset, cells));
        }
        let (r, c) = self.cell_position(offset);
        let row = catalog.region_shallow(self.rows[r])?;
        let column = catalog.region_shallow(self.columns[c])?;
        let mut cell = Region::new(
            format!("{}{}{}", row.name(), separator, column.name()),
            i32::try_from(offset).unwrap_or(i32::MAX),
        );
        cell.add_map_in(self.row_grouping(r));
        cell.add_map_in(self.column_grouping(c));
        Ok(cell)
    }

    /// Synthesize grouping `offset` (rows first, then columns)
    pub fn grouping(&self, offset: usize) -> Option<Grouping> {
        let nrows = self.rows.len();
        let ncols = self.columns.len();
        if offset < nrows {
            Some(Grouping::new(
                self.column_category.clone(),
                self.column_role,
                self.rows[offset],
                MemberSet::range(self.first_region + offset * ncols, ncols),
            ))
        } else if offset < nrows + ncols {
            let c = offset - nrows;
            Some(Grouping::new(
                self.row_category.clone(),
                self.row_role,
                self.columns[c],
                MemberSet::strided(self.first_region + c, ncols, nrows).ok()?,
            ))
        } else {
            None
        }
    }

    /// Handle of the grouping with `category` over `superset`, if any
    pub fn grouping_index(&self, category: &str, superset: Handle) -> Option<Handle> {
        if category == self.column_category {
            if let Some(r) = self.rows.iter().position(|&h| h == superset) {
                return Some(self.row_grouping(r));
            }
        }
        if category == self.row_category {
            if let Some(c) = self.columns.iter().position(|&h| h == superset) {
                return Some(self.column_grouping(c));
            }
        }
        None
    }
}
