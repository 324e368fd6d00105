//! Rejected adds must leave the catalog untouched

use crate::common::{init_tracing, mixed_catalog};
use silcat::{ArrayGroup, Catalog, Error, Grouping, Matrix, MemberSet, Region, Role};

/// Everything observable about a catalog that a failed add could disturb
fn snapshot(catalog: &Catalog) -> (String, Vec<i32>, usize, usize) {
    let form = catalog.to_attribute_form().unwrap();
    (
        catalog.to_string(),
        form.order,
        catalog.num_regions(),
        catalog.num_groupings(),
    )
}

#[test]
fn test_out_of_range_member_is_atomic() {
    init_tracing();
    let mut catalog = mixed_catalog();
    let before = snapshot(&catalog);
    let total = catalog.num_regions();

    let err = catalog
        .add_collection(Grouping::new(
            "broken",
            Role::Ordinary,
            0,
            MemberSet::enumerated(vec![1, 2, total]),
        ))
        .unwrap_err();
    assert!(matches!(err, Error::OutOfRange { .. }));
    assert_eq!(snapshot(&catalog), before);
    assert_eq!(catalog.region(1).unwrap().maps_in(), &[0]);
    assert_eq!(catalog.region(0).unwrap().maps_out(), &[0, 1]);
}

#[test]
fn test_out_of_range_superset_is_atomic() {
    let mut catalog = mixed_catalog();
    let before = snapshot(&catalog);
    let err = catalog
        .add_collection(Grouping::new(
            "broken",
            Role::Ordinary,
            10_000,
            MemberSet::range(1, 1),
        ))
        .unwrap_err();
    assert!(matches!(err, Error::OutOfRange { handle: 10_000, .. }));
    assert_eq!(snapshot(&catalog), before);
}

#[test]
fn test_synthesized_superset_is_atomic() {
    let mut catalog = mixed_catalog();
    let before = snapshot(&catalog);
    // Region 3 is an array group member
    let err = catalog
        .add_collection(Grouping::new("sub", Role::Ordinary, 3, MemberSet::range(1, 1)))
        .unwrap_err();
    assert!(matches!(err, Error::InvalidOperation(_)));
    let err = catalog
        .add_array_group(ArrayGroup::prefixed(3, "sub", 2))
        .unwrap_err();
    assert!(matches!(err, Error::InvalidOperation(_)));
    assert_eq!(snapshot(&catalog), before);
}

#[test]
fn test_matrix_with_bad_column_is_atomic() {
    let mut catalog = mixed_catalog();
    let before = snapshot(&catalog);
    let err = catalog
        .add_matrix(Matrix::new(vec![1, 2], vec![0, 99]))
        .unwrap_err();
    assert!(matches!(err, Error::OutOfRange { handle: 99, .. }));
    assert_eq!(snapshot(&catalog), before);
    // steel is column 0 of the existing matrix only
    assert_eq!(catalog.region(1).unwrap().matrix_maps_out(), &[6]);
}

#[test]
fn test_array_group_with_bad_parent_is_atomic() {
    let mut catalog = Catalog::new();
    catalog.add_whole(Region::new("mesh", 0)).unwrap();
    let before = snapshot(&catalog);
    assert!(catalog
        .add_array_group(ArrayGroup::prefixed(1, "d", 5))
        .is_err());
    assert_eq!(snapshot(&catalog), before);
}

#[test]
fn test_range_past_handle_space_is_out_of_range() {
    let mut catalog = mixed_catalog();
    let before = snapshot(&catalog);
    let err = catalog
        .add_collection(Grouping::new(
            "wide",
            Role::Ordinary,
            0,
            MemberSet::range(usize::MAX, 2),
        ))
        .unwrap_err();
    assert!(matches!(err, Error::OutOfRange { .. }));
    let err = catalog
        .add_collection(Grouping::new(
            "wide",
            Role::Ordinary,
            0,
            MemberSet::strided(1, usize::MAX / 2, 3).unwrap(),
        ))
        .unwrap_err();
    assert!(matches!(err, Error::OutOfRange { .. }));
    assert_eq!(snapshot(&catalog), before);
}

#[test]
fn test_oversized_array_group_is_atomic() {
    let mut catalog = Catalog::new();
    catalog.add_whole(Region::new("mesh", 0)).unwrap();
    let before = snapshot(&catalog);
    let err = catalog
        .add_array_group(ArrayGroup::prefixed(0, "p", usize::MAX))
        .unwrap_err();
    assert!(matches!(err, Error::InvalidOperation(_)));
    assert_eq!(snapshot(&catalog), before);
    assert!(catalog.region(0).unwrap().maps_out().is_empty());
}

#[test]
fn test_exhausted_handle_space_rejects_every_add() {
    let mut catalog = Catalog::new();
    catalog.add_whole(Region::new("mesh", 0)).unwrap();
    // Array members are never stored, so the whole handle space is cheap
    catalog
        .add_array_group(ArrayGroup::prefixed(0, "p", usize::MAX - 1))
        .unwrap();
    assert_eq!(catalog.num_regions(), usize::MAX);
    let order = catalog.order().to_vec();

    assert!(matches!(
        catalog.add_subset(Region::new("late", 1)),
        Err(Error::InvalidOperation(_))
    ));
    assert!(matches!(
        catalog.add_matrix(Matrix::new(vec![0], vec![0])),
        Err(Error::InvalidOperation(_))
    ));
    // Empty matrix reserves no cells, only its row grouping
    catalog.add_matrix(Matrix::new(vec![0], vec![])).unwrap();

    assert_eq!(catalog.num_regions(), usize::MAX);
    assert_eq!(catalog.num_groupings(), 2);
    assert_eq!(catalog.order().len(), order.len() + 1);
    assert_eq!(catalog.region(0).unwrap().matrix_maps_out(), &[1]);
    assert_eq!(catalog.region_id(usize::MAX - 1).unwrap(), i32::MAX);
}
