//! End-to-end build and query scenarios

use crate::common::{init_tracing, mixed_catalog, two_domains};
use silcat::{ArrayGroup, Error, Grouping, GroupingSource, Matrix, MemberSet, Region, Role};
use std::borrow::Cow;

#[test]
fn test_two_domains_one_grouping() {
    init_tracing();
    let catalog = two_domains();
    assert_eq!(catalog.num_regions(), 2);
    assert_eq!(catalog.num_groupings(), 1);
    assert_eq!(catalog.index_by_name("domain1", None).unwrap(), 1);
    assert_eq!(catalog.region(1).unwrap().maps_in(), &[0]);
    assert_eq!(catalog.region(0).unwrap().maps_out(), &[0]);
}

#[test]
fn test_array_group_after_grouping() {
    init_tracing();
    let mut catalog = two_domains();
    let collection = catalog
        .add_array_group(ArrayGroup::prefixed(0, "part", 3))
        .unwrap();
    assert_eq!(catalog.num_groupings(), 2);
    let first = catalog.array_groups()[0].first_region();
    assert_eq!(first, 2);

    let region = catalog.region(first + 1).unwrap();
    assert!(matches!(region, Cow::Owned(_)));
    assert!(region.maps_out().is_empty());
    assert_eq!(region.maps_in(), &[collection]);
    assert_eq!(catalog.region(0).unwrap().maps_out(), &[0, collection]);
}

#[test]
fn test_retroactive_maps_match_structure() {
    init_tracing();
    let mut catalog = two_domains();
    catalog
        .add_array_group(ArrayGroup::prefixed(0, "part", 3))
        .unwrap();
    // A later collection and a matrix both reference synthesized region 3
    let picked = catalog
        .add_collection(Grouping::new(
            "picked",
            Role::Ordinary,
            1,
            MemberSet::runs(vec![(0, 1), (3, 2)]).unwrap(),
        ))
        .unwrap();
    let first_matrix_grouping = catalog
        .add_matrix(Matrix::new(vec![3], vec![1]))
        .unwrap();

    let region = catalog.region(3).unwrap();
    assert_eq!(region.maps_in(), &[1, picked]);
    assert_eq!(region.matrix_maps_out(), &[first_matrix_grouping]);
    assert!(catalog.region_has_outbound_maps(3).unwrap());
    assert!(!catalog.region_has_outbound_maps(2).unwrap());

    // Every grouping that structurally contains 3 shows up in maps_in
    let containing: Vec<usize> = (0..catalog.num_groupings())
        .filter(|&g| catalog.grouping(g).unwrap().contains(3))
        .collect();
    assert_eq!(containing, region.maps_in());
}

#[test]
fn test_mixed_catalog_queries() {
    init_tracing();
    let catalog = mixed_catalog();
    // 3 stored + 4 domains + 8 cells
    assert_eq!(catalog.num_regions(), 15);
    // 1 collection + 1 array group + 4 rows + 2 columns
    assert_eq!(catalog.num_groupings(), 8);

    assert_eq!(catalog.index_by_name("domain2", None).unwrap(), 5);
    assert_eq!(catalog.index_by_name("domain2", Some(1)).unwrap(), 5);
    assert!(matches!(
        catalog.index_by_name("domain2", Some(0)),
        Err(Error::NotFound(_))
    ));
    assert_eq!(catalog.index_by_name("water", Some(0)).unwrap(), 2);

    assert_eq!(catalog.grouping_index("domains", 0).unwrap(), 1);
    assert_eq!(catalog.grouping_index("materials", 0).unwrap(), 0);
    assert_eq!(catalog.grouping_index("materials", 4).unwrap(), 3);
    assert_eq!(catalog.grouping_index("domains", 2).unwrap(), 7);

    let cell = catalog.region(7 + 3).unwrap();
    assert_eq!(cell.name(), "domain1/water");
    assert_eq!(cell.maps_in(), &[3, 7]);

    assert!(matches!(
        catalog.grouping_source(7).unwrap(),
        GroupingSource::Matrix { offset: 5, .. }
    ));
    assert_eq!(catalog.region_id(4).unwrap(), 1);
    assert_eq!(catalog.whole_regions(), vec![0]);
}

#[test]
fn test_custom_cell_separator() {
    let config = silcat::CatalogConfig {
        matrix_cell_separator: " x ".to_string(),
        ..silcat::CatalogConfig::default()
    };
    let mut catalog = silcat::Catalog::with_config(config);
    catalog.add_whole(Region::new("d0", 0)).unwrap();
    catalog.add_subset(Region::new("m0", 0)).unwrap();
    catalog.add_matrix(Matrix::new(vec![0], vec![1])).unwrap();
    assert_eq!(catalog.region(2).unwrap().name(), "d0 x m0");
}

#[test]
fn test_large_array_group_resolves_without_materializing() {
    let mut catalog = silcat::Catalog::new();
    catalog.add_whole(Region::new("mesh", 0)).unwrap();
    catalog
        .add_array_group(ArrayGroup::prefixed(0, "cell", 1_000_000).with_unique_ids(true))
        .unwrap();
    assert_eq!(catalog.num_regions(), 1_000_001);
    assert_eq!(catalog.region_id(999_999).unwrap(), 999_999);
    assert_eq!(catalog.index_by_name("cell123456", None).unwrap(), 123_457);
    assert_eq!(catalog.grouping(0).unwrap().members().len(), 1_000_000);
}

#[test]
fn test_dump_mentions_every_store() {
    let text = mixed_catalog().to_string();
    assert!(text.contains("Regions:"));
    assert!(text.contains("Groupings:"));
    assert!(text.contains("Matrices:"));
    assert!(text.contains("steel (id 0)"));
}
