//! Shared helpers for the catalog integration suite.

#![allow(dead_code)]

use proptest::prelude::*;
use silcat::{ArrayGroup, Catalog, Grouping, Handle, Matrix, MemberSet, Region, Role};
use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Install a test-writer subscriber once per test binary.
pub fn init_tracing() {
    INIT_TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_test_writer()
            .with_max_level(tracing::Level::DEBUG)
            .try_init();
    });
}

/// R0 "domain0", R1 "domain1", G0 = "domains" over R0 with members {R1}.
pub fn two_domains() -> Catalog {
    let mut catalog = Catalog::new();
    catalog.add_whole(Region::new("domain0", 0)).unwrap();
    catalog.add_whole(Region::new("domain1", 1)).unwrap();
    catalog
        .add_collection(Grouping::new(
            "domains",
            Role::Domain,
            0,
            MemberSet::enumerated(vec![1]),
        ))
        .unwrap();
    catalog
}

/// A mesh with materials, an array of domains and a domain x material matrix.
pub fn mixed_catalog() -> Catalog {
    let mut catalog = Catalog::new();
    let mesh = catalog.add_whole(Region::new("mesh", -1)).unwrap();
    let steel = catalog.add_subset(Region::new("steel", 0)).unwrap();
    let water = catalog.add_subset(Region::new("water", 1)).unwrap();
    catalog
        .add_collection(Grouping::new(
            "materials",
            Role::Material,
            mesh,
            MemberSet::range(steel, 2),
        ))
        .unwrap();
    catalog
        .add_array_group(
            ArrayGroup::prefixed(mesh, "domain", 4).with_category("domains", Role::Domain),
        )
        .unwrap();
    let first = catalog.array_groups()[0].first_region();
    catalog
        .add_matrix(
            Matrix::new((first..first + 4).collect(), vec![steel, water])
                .with_row_category("domains", Role::Domain)
                .with_column_category("materials", Role::Material),
        )
        .unwrap();
    catalog
}

/// One build step, with picks resolved against the catalog built so far.
#[derive(Debug, Clone)]
pub enum Op {
    Whole(i32),
    Subset(i32),
    Collection {
        superset: usize,
        members: Vec<usize>,
        role: usize,
    },
    Array {
        parent: usize,
        count: usize,
        named: bool,
    },
    Matrix {
        rows: Vec<usize>,
        columns: Vec<usize>,
    },
}

pub fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        3 => any::<i16>().prop_map(|id| Op::Whole(i32::from(id))),
        4 => any::<i16>().prop_map(|id| Op::Subset(i32::from(id))),
        3 => (any::<usize>(), prop::collection::vec(any::<usize>(), 0..6), 0usize..10)
            .prop_map(|(superset, members, role)| Op::Collection { superset, members, role }),
        2 => (any::<usize>(), 0usize..20, any::<bool>())
            .prop_map(|(parent, count, named)| Op::Array { parent, count, named }),
        1 => (prop::collection::vec(any::<usize>(), 0..4), prop::collection::vec(any::<usize>(), 0..4))
            .prop_map(|(rows, columns)| Op::Matrix { rows, columns }),
    ]
}

/// Apply ops, skipping those that have nothing to refer to yet.
pub fn build(ops: &[Op]) -> Catalog {
    let mut catalog = Catalog::new();
    let mut stored: Vec<Handle> = Vec::new();
    for (step, op) in ops.iter().enumerate() {
        let total = catalog.num_regions();
        match op {
            Op::Whole(id) => {
                let handle = catalog
                    .add_whole(Region::new(format!("w{}", step), *id))
                    .unwrap();
                stored.push(handle);
            }
            Op::Subset(id) => {
                let handle = catalog
                    .add_subset(Region::new(format!("s{}", step), *id))
                    .unwrap();
                stored.push(handle);
            }
            Op::Collection {
                superset,
                members,
                role,
            } => {
                if stored.is_empty() {
                    continue;
                }
                let mut members: Vec<Handle> = members.iter().map(|m| m % total).collect();
                members.sort_unstable();
                members.dedup();
                catalog
                    .add_collection(Grouping::new(
                        format!("c{}", step),
                        Role::ALL[*role],
                        stored[superset % stored.len()],
                        MemberSet::enumerated(members),
                    ))
                    .unwrap();
            }
            Op::Array {
                parent,
                count,
                named,
            } => {
                if stored.is_empty() {
                    continue;
                }
                let parent = stored[parent % stored.len()];
                let group = if *named {
                    ArrayGroup::named(
                        parent,
                        (0..*count).map(|i| format!("n{}_{}", step, i)).collect(),
                    )
                } else {
                    ArrayGroup::prefixed(parent, format!("a{}_", step), *count).with_first_name(1)
                };
                catalog
                    .add_array_group(group.with_category(format!("arr{}", step), Role::Block))
                    .unwrap();
            }
            Op::Matrix { rows, columns } => {
                if total == 0 {
                    continue;
                }
                catalog
                    .add_matrix(Matrix::new(
                        rows.iter().map(|r| r % total).collect(),
                        columns.iter().map(|c| c % total).collect(),
                    ))
                    .unwrap();
            }
        }
    }
    catalog
}
