//! Attribute form round trip

use crate::common::{build, init_tracing, mixed_catalog, op_strategy};
use proptest::prelude::*;
use silcat::{AttributeForm, Catalog, CatalogConfig, Error};

fn assert_equivalent(original: &Catalog, rebuilt: &Catalog) {
    assert_eq!(rebuilt.order(), original.order());
    assert_eq!(rebuilt.num_regions(), original.num_regions());
    assert_eq!(rebuilt.num_groupings(), original.num_groupings());
    for h in 0..original.num_regions() {
        let a = original.region(h).unwrap();
        let b = rebuilt.region(h).unwrap();
        assert_eq!(a.name(), b.name(), "region {}", h);
        assert_eq!(a.identifier(), b.identifier(), "region {}", h);
        assert_eq!(a.maps_in(), b.maps_in(), "region {}", h);
        assert_eq!(a.maps_out(), b.maps_out(), "region {}", h);
    }
    for g in 0..original.num_groupings() {
        let a = original.grouping(g).unwrap();
        let b = rebuilt.grouping(g).unwrap();
        assert_eq!(a.category(), b.category(), "grouping {}", g);
        assert_eq!(a.role(), b.role(), "grouping {}", g);
        assert_eq!(a.superset(), b.superset(), "grouping {}", g);
        assert_eq!(a.members(), b.members(), "grouping {}", g);
    }
}

#[test]
fn test_mixed_catalog_roundtrip_through_bytes() {
    init_tracing();
    let original = mixed_catalog();
    let bytes = original.to_attribute_form().unwrap().to_bytes().unwrap();
    let form = AttributeForm::from_bytes(&bytes).unwrap();
    let rebuilt = Catalog::from_attribute_form(&form).unwrap();
    assert_equivalent(&original, &rebuilt);
    assert_eq!(rebuilt.to_attribute_form().unwrap(), form);
}

#[test]
fn test_receiver_config_is_independent() {
    let original = mixed_catalog();
    let form = original.to_attribute_form().unwrap();
    let config = CatalogConfig {
        matrix_cell_separator: ":".to_string(),
        ..CatalogConfig::default()
    };
    let rebuilt = Catalog::from_attribute_form_with_config(&form, config).unwrap();
    assert_eq!(rebuilt.region(7).unwrap().name(), "domain0:steel");
    assert_eq!(original.region(7).unwrap().name(), "domain0/steel");
}

#[test]
fn test_swapped_order_entries_are_rejected() {
    let original = mixed_catalog();
    let mut form = original.to_attribute_form().unwrap();
    // Matrix before the array group its rows belong to
    let n = form.order.len();
    form.order.swap(n - 1, n - 2);
    let err = Catalog::from_attribute_form(&form).unwrap_err();
    assert!(matches!(err, Error::OutOfRange { .. }));
}

#[test]
fn test_extra_order_entry_is_corrupt() {
    let mut form = mixed_catalog().to_attribute_form().unwrap();
    form.order.push(1);
    assert!(Catalog::from_attribute_form(&form).unwrap_err().is_fatal());
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_roundtrip_law(ops in prop::collection::vec(op_strategy(), 0..40)) {
        let original = build(&ops);
        let form = original.to_attribute_form().unwrap();
        let rebuilt = Catalog::from_attribute_form(&form).unwrap();
        assert_equivalent(&original, &rebuilt);
        prop_assert_eq!(rebuilt.to_attribute_form().unwrap(), form);
    }
}
