//! Shared read-only access from many threads

use crate::common::mixed_catalog;
use silcat::Catalog;
use std::thread;

fn assert_send_sync<T: Send + Sync>() {}

#[test]
fn test_catalog_is_send_and_sync() {
    assert_send_sync::<Catalog>();
}

#[test]
fn test_parallel_queries_agree() {
    let catalog = mixed_catalog();
    let expected: Vec<(String, i32)> = (0..catalog.num_regions())
        .map(|h| {
            let region = catalog.region(h).unwrap();
            (region.name().to_string(), region.identifier())
        })
        .collect();

    thread::scope(|s| {
        for worker in 0..8 {
            let catalog = &catalog;
            let expected = &expected;
            s.spawn(move || {
                for round in 0..200 {
                    let h = (worker * 7 + round) % catalog.num_regions();
                    let region = catalog.region(h).unwrap();
                    assert_eq!(region.name(), expected[h].0);
                    assert_eq!(region.identifier(), expected[h].1);
                    assert_eq!(catalog.region_id(h).unwrap(), expected[h].1);
                    assert!(catalog.resolve_region(h).is_ok());
                }
                assert_eq!(catalog.index_by_name("domain3", None).unwrap(), 6);
                assert_eq!(catalog.grouping_index("materials", 0).unwrap(), 0);
            });
        }
    });
}

#[test]
fn test_clone_is_independent_of_original() {
    let original = mixed_catalog();
    let mut copy = original.clone();
    copy.add_whole(silcat::Region::new("extra", 99)).unwrap();
    assert_eq!(copy.num_regions(), original.num_regions() + 1);
    // Matrix cells in the clone still resolve against the clone
    assert_eq!(copy.region(7).unwrap().name(), "domain0/steel");
    assert_eq!(original.region(7).unwrap().name(), "domain0/steel");
}
