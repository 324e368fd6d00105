//! Attribute form: the catalog's serialization boundary
//!
//! A catalog is transferred between processes as flat per-kind payload
//! arrays plus the `order` log of `add_*` calls. Rebuilding replays the log,
//! pulling each call's arguments from the payload of its kind, and then
//! requires the rebuilt log to match the serialized one exactly.
//!
//! Field order, order codes, role codes and member-set codes are part of
//! the format. Map lists are never serialized; replay re-derives them.
//!
//! ## Per-kind payloads
//!
//! | Call | Payload fields consumed |
//! |------|-------------------------|
//! | WholeRegion / SubsetRegion | `region_names`, `region_ids` |
//! | Collection | `grouping_*`, `namespace_kinds`, `namespace_lengths`, `namespace_values` |
//! | ArrayGroup | `array_*` (`array_name_counts` is -1 for prefixed naming) |
//! | Matrix | `matrix_*` |

use crate::array_group::{ArrayGroup, NameScheme};
use crate::catalog::Catalog;
use crate::config::CatalogConfig;
use crate::matrix::Matrix;
use serde::{Deserialize, Serialize};
use sil_core::{
    handle_from_wire, handle_to_wire, Error, Grouping, Handle, MemberSet, OrderEntry, Region,
    Result, Role,
};
use tracing::{debug, error};

/// Current attribute form version
pub const ATTRIBUTE_FORMAT_VERSION: u32 = 1;

/// Flat, wire-stable representation of a catalog
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AttributeForm {
    /// Format version for forward compatibility
    pub format_version: u32,
    /// Order codes of every `add_*` call
    pub order: Vec<i32>,
    /// Stored region names
    pub region_names: Vec<String>,
    /// Stored region identifiers
    pub region_ids: Vec<i32>,
    /// Stored grouping categories
    pub grouping_categories: Vec<String>,
    /// Stored grouping role codes
    pub grouping_roles: Vec<i32>,
    /// Stored grouping superset handles
    pub grouping_supersets: Vec<i32>,
    /// Member set kind code per stored grouping
    pub namespace_kinds: Vec<i32>,
    /// Number of `namespace_values` per stored grouping
    pub namespace_lengths: Vec<i32>,
    /// Member set values, concatenated
    pub namespace_values: Vec<i32>,
    /// Array group parent handles
    pub array_parents: Vec<i32>,
    /// Array group member counts
    pub array_counts: Vec<i32>,
    /// Array group categories
    pub array_categories: Vec<String>,
    /// Array group role codes
    pub array_roles: Vec<i32>,
    /// Whether member identifiers are global handles
    pub array_unique_ids: Vec<bool>,
    /// Name prefixes (empty for explicit naming)
    pub array_prefixes: Vec<String>,
    /// Running number of the first member (0 for explicit naming)
    pub array_first_names: Vec<i32>,
    /// Explicit name count, or -1 for prefixed naming
    pub array_name_counts: Vec<i32>,
    /// Explicit member names, concatenated
    pub array_names: Vec<String>,
    /// Row count per matrix
    pub matrix_row_counts: Vec<i32>,
    /// Row region handles, concatenated
    pub matrix_rows: Vec<i32>,
    /// Row categories
    pub matrix_row_categories: Vec<String>,
    /// Row role codes
    pub matrix_row_roles: Vec<i32>,
    /// Column count per matrix
    pub matrix_column_counts: Vec<i32>,
    /// Column region handles, concatenated
    pub matrix_columns: Vec<i32>,
    /// Column categories
    pub matrix_column_categories: Vec<String>,
    /// Column role codes
    pub matrix_column_roles: Vec<i32>,
}

impl AttributeForm {
    /// Encode with bincode
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        Ok(bincode::serialize(self)?)
    }

    /// Decode with bincode, rejecting unknown format versions
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let form: AttributeForm = bincode::deserialize(bytes)?;
        if form.format_version != ATTRIBUTE_FORMAT_VERSION {
            return Err(Error::Serialization(format!(
                "unsupported attribute form version {}",
                form.format_version
            )));
        }
        Ok(form)
    }
}

/// Sequential reader over one payload array
struct Payload<'a, T> {
    field: &'static str,
    items: &'a [T],
    next: usize,
}

impl<'a, T> Payload<'a, T> {
    fn new(field: &'static str, items: &'a [T]) -> Self {
        Payload {
            field,
            items,
            next: 0,
        }
    }

    fn take(&mut self) -> Result<&'a T> {
        Ok(&self.take_n(1)?[0])
    }

    fn take_n(&mut self, n: usize) -> Result<&'a [T]> {
        let items = self
            .items
            .get(self.next..self.next + n)
            .ok_or_else(|| corrupt(format!("{} exhausted at {}", self.field, self.next)))?;
        self.next += n;
        Ok(items)
    }

    fn finish(&self) -> Result<()> {
        if self.next == self.items.len() {
            Ok(())
        } else {
            Err(corrupt(format!(
                "{} has {} unconsumed entries",
                self.field,
                self.items.len() - self.next
            )))
        }
    }
}

fn corrupt(message: String) -> Error {
    error!(%message, "attribute form replay diverged");
    Error::CorruptState(message)
}

fn count_from_wire(value: i32) -> Result<usize> {
    handle_from_wire(value, 0)
}

fn handles_to_wire(handles: &[Handle]) -> Result<Vec<i32>> {
    handles.iter().map(|&h| handle_to_wire(h)).collect()
}

impl Catalog {
    /// Flatten into the attribute form
    pub fn to_attribute_form(&self) -> Result<AttributeForm> {
        let mut form = AttributeForm {
            format_version: ATTRIBUTE_FORMAT_VERSION,
            order: self.order().iter().map(OrderEntry::code).collect(),
            ..AttributeForm::default()
        };

        for region in self.stored_regions() {
            form.region_names.push(region.name().to_string());
            form.region_ids.push(region.identifier());
        }

        for grouping in self.stored_groupings() {
            form.grouping_categories.push(grouping.category().to_string());
            form.grouping_roles.push(grouping.role().code());
            form.grouping_supersets.push(handle_to_wire(grouping.superset())?);
            let (kind, values) = grouping.members().to_wire()?;
            form.namespace_kinds.push(kind);
            form.namespace_lengths.push(handle_to_wire(values.len())?);
            form.namespace_values.extend(values);
        }

        for group in self.array_groups() {
            form.array_parents.push(handle_to_wire(group.parent())?);
            form.array_counts.push(handle_to_wire(group.count())?);
            form.array_categories.push(group.category().to_string());
            form.array_roles.push(group.role().code());
            form.array_unique_ids.push(group.use_unique_ids());
            match group.names() {
                NameScheme::Prefixed { prefix, first_name } => {
                    form.array_prefixes.push(prefix.clone());
                    form.array_first_names.push(*first_name);
                    form.array_name_counts.push(-1);
                }
                NameScheme::Explicit(names) => {
                    form.array_prefixes.push(String::new());
                    form.array_first_names.push(0);
                    form.array_name_counts.push(handle_to_wire(names.len())?);
                    form.array_names.extend(names.iter().cloned());
                }
            }
        }

        for matrix in self.matrices() {
            form.matrix_row_counts.push(handle_to_wire(matrix.rows().len())?);
            form.matrix_rows.extend(handles_to_wire(matrix.rows())?);
            form.matrix_row_categories.push(matrix.row_category().to_string());
            form.matrix_row_roles.push(matrix.row_role().code());
            form.matrix_column_counts
                .push(handle_to_wire(matrix.columns().len())?);
            form.matrix_columns.extend(handles_to_wire(matrix.columns())?);
            form.matrix_column_categories
                .push(matrix.column_category().to_string());
            form.matrix_column_roles.push(matrix.column_role().code());
        }

        Ok(form)
    }

    /// Rebuild a catalog from its attribute form with default configuration
    pub fn from_attribute_form(form: &AttributeForm) -> Result<Catalog> {
        Self::from_attribute_form_with_config(form, CatalogConfig::default())
    }

    /// Rebuild a catalog by replaying the attribute form
    ///
    /// # Errors
    ///
    /// Caller errors raised by a replayed `add_*` propagate unchanged.
    /// Running out of payload, leftover payload, or a rebuilt order log that
    /// differs from `form.order` is `CorruptState`; no catalog is returned.
    pub fn from_attribute_form_with_config(
        form: &AttributeForm,
        config: CatalogConfig,
    ) -> Result<Catalog> {
        let mut catalog = Catalog::with_config(config);
        let mut replay = Replay::new(form);

        for (position, &code) in form.order.iter().enumerate() {
            let entry = OrderEntry::from_code(code)?;
            replay.apply(&mut catalog, entry).map_err(|e| {
                debug!(position, ?entry, error = %e, "attribute form replay failed");
                e
            })?;
        }
        replay.finish()?;

        let rebuilt: Vec<i32> = catalog.order().iter().map(OrderEntry::code).collect();
        if rebuilt.len() != form.order.len() {
            return Err(corrupt(format!(
                "rebuilt order has {} entries, serialized order has {}",
                rebuilt.len(),
                form.order.len()
            )));
        }
        if let Some(position) = rebuilt.iter().zip(&form.order).position(|(a, b)| a != b) {
            return Err(corrupt(format!(
                "rebuilt order differs from serialized order at {}",
                position
            )));
        }

        debug!(
            regions = catalog.num_regions(),
            groupings = catalog.num_groupings(),
            "rebuilt catalog from attribute form"
        );
        Ok(catalog)
    }
}

/// Payload readers for one replay
struct Replay<'a> {
    region_names: Payload<'a, String>,
    region_ids: Payload<'a, i32>,
    grouping_categories: Payload<'a, String>,
    grouping_roles: Payload<'a, i32>,
    grouping_supersets: Payload<'a, i32>,
    namespace_kinds: Payload<'a, i32>,
    namespace_lengths: Payload<'a, i32>,
    namespace_values: Payload<'a, i32>,
    array_parents: Payload<'a, i32>,
    array_counts: Payload<'a, i32>,
    array_categories: Payload<'a, String>,
    array_roles: Payload<'a, i32>,
    array_unique_ids: Payload<'a, bool>,
    array_prefixes: Payload<'a, String>,
    array_first_names: Payload<'a, i32>,
    array_name_counts: Payload<'a, i32>,
    array_names: Payload<'a, String>,
    matrix_row_counts: Payload<'a, i32>,
    matrix_rows: Payload<'a, i32>,
    matrix_row_categories: Payload<'a, String>,
    matrix_row_roles: Payload<'a, i32>,
    matrix_column_counts: Payload<'a, i32>,
    matrix_columns: Payload<'a, i32>,
    matrix_column_categories: Payload<'a, String>,
    matrix_column_roles: Payload<'a, i32>,
}

macro_rules! payloads {
    ($form:ident; $($field:ident),* $(,)?) => {
        Replay {
            $($field: Payload::new(stringify!($field), &$form.$field),)*
        }
    };
}

impl<'a> Replay<'a> {
    fn new(form: &'a AttributeForm) -> Self {
        payloads!(form;
            region_names, region_ids,
            grouping_categories, grouping_roles, grouping_supersets,
            namespace_kinds, namespace_lengths, namespace_values,
            array_parents, array_counts, array_categories, array_roles, array_unique_ids,
            array_prefixes, array_first_names, array_name_counts, array_names,
            matrix_row_counts, matrix_rows, matrix_row_categories, matrix_row_roles,
            matrix_column_counts, matrix_columns, matrix_column_categories, matrix_column_roles,
        )
    }

    fn apply(&mut self, catalog: &mut Catalog, entry: OrderEntry) -> Result<()> {
        let count = catalog.num_regions();
        match entry {
            OrderEntry::WholeRegion | OrderEntry::SubsetRegion => {
                let region = Region::new(self.region_names.take()?.clone(), *self.region_ids.take()?);
                if entry == OrderEntry::WholeRegion {
                    catalog.add_whole(region)?;
                } else {
                    catalog.add_subset(region)?;
                }
            }
            OrderEntry::Collection => {
                let category = self.grouping_categories.take()?.clone();
                let role = Role::from_code(*self.grouping_roles.take()?)?;
                let superset = handle_from_wire(*self.grouping_supersets.take()?, count)?;
                let kind = *self.namespace_kinds.take()?;
                let len = count_from_wire(*self.namespace_lengths.take()?)?;
                let members = MemberSet::from_wire(kind, self.namespace_values.take_n(len)?)?;
                catalog.add_collection(Grouping::new(category, role, superset, members))?;
            }
            OrderEntry::ArrayGroup => {
                let parent = handle_from_wire(*self.array_parents.take()?, count)?;
                let member_count = count_from_wire(*self.array_counts.take()?)?;
                let category = self.array_categories.take()?.clone();
                let role = Role::from_code(*self.array_roles.take()?)?;
                let unique_ids = *self.array_unique_ids.take()?;
                let prefix = self.array_prefixes.take()?.clone();
                let first_name = *self.array_first_names.take()?;
                let name_count = *self.array_name_counts.take()?;
                let group = if name_count < 0 {
                    ArrayGroup::prefixed(parent, prefix, member_count).with_first_name(first_name)
                } else {
                    let names = self.array_names.take_n(count_from_wire(name_count)?)?;
                    if names.len() != member_count {
                        return Err(corrupt(format!(
                            "array group has {} names for {} members",
                            names.len(),
                            member_count
                        )));
                    }
                    ArrayGroup::named(parent, names.to_vec())
                };
                catalog.add_array_group(
                    group
                        .with_unique_ids(unique_ids)
                        .with_category(category, role),
                )?;
            }
            OrderEntry::Matrix => {
                let nrows = count_from_wire(*self.matrix_row_counts.take()?)?;
                let rows = self
                    .matrix_rows
                    .take_n(nrows)?
                    .iter()
                    .map(|&h| handle_from_wire(h, count))
                    .collect::<Result<Vec<_>>>()?;
                let row_category = self.matrix_row_categories.take()?.clone();
                let row_role = Role::from_code(*self.matrix_row_roles.take()?)?;
                let ncols = count_from_wire(*self.matrix_column_counts.take()?)?;
                let columns = self
                    .matrix_columns
                    .take_n(ncols)?
                    .iter()
                    .map(|&h| handle_from_wire(h, count))
                    .collect::<Result<Vec<_>>>()?;
                let column_category = self.matrix_column_categories.take()?.clone();
                let column_role = Role::from_code(*self.matrix_column_roles.take()?)?;
                catalog.add_matrix(
                    Matrix::new(rows, columns)
                        .with_row_category(row_category, row_role)
                        .with_column_category(column_category, column_role),
                )?;
            }
        }
        Ok(())
    }

    fn finish(&self) -> Result<()> {
        self.region_names.finish()?;
        self.region_ids.finish()?;
        self.grouping_categories.finish()?;
        self.grouping_roles.finish()?;
        self.grouping_supersets.finish()?;
        self.namespace_kinds.finish()?;
        self.namespace_lengths.finish()?;
        self.namespace_values.finish()?;
        self.array_parents.finish()?;
        self.array_counts.finish()?;
        self.array_categories.finish()?;
        self.array_roles.finish()?;
        self.array_unique_ids.finish()?;
        self.array_prefixes.finish()?;
        self.array_first_names.finish()?;
        self.array_name_counts.finish()?;
        self.array_names.finish()?;
        self.matrix_row_counts.finish()?;
        self.matrix_rows.finish()?;
        self.matrix_row_categories.finish()?;
        self.matrix_row_roles.finish()?;
        self.matrix_column_counts.finish()?;
        self.matrix_columns.finish()?;
        self.matrix_column_categories.finish()?;
        self.matrix_column_roles.finish()
    }
}
