//! Property tests for projected record comparison.

use proptest::prelude::*;

use ckan_mirror::domain::entities::Package;
use ckan_mirror::domain::services::FieldSet;

fn text() -> impl Strategy<Value = Option<String>> {
    proptest::option::of("[a-z ]{0,12}")
}

fn package() -> impl Strategy<Value = Package> {
    (text(), text(), text(), text()).prop_map(|(title, notes, state, license)| {
        let mut package = Package::named("p");
        package.title = title;
        package.notes = notes;
        package.state = state;
        if let Some(license) = license {
            package
                .other
                .insert("license_id".to_string(), license.into());
        }
        package
    })
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 256,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: comparison is symmetric.
    #[test]
    fn property_same_is_symmetric(a in package(), b in package()) {
        prop_assert_eq!(FieldSet::PACKAGE.same(&a, &b), FieldSet::PACKAGE.same(&b, &a));
    }

    /// PROPERTY: a record is always in sync with itself.
    #[test]
    fn property_same_is_reflexive(a in package()) {
        prop_assert!(FieldSet::PACKAGE.same(&a, &a));
        prop_assert!(FieldSet::PACKAGE.differing(&a, &a).is_empty());
    }

    /// PROPERTY: fields outside the set never cause a difference.
    #[test]
    fn property_unlisted_fields_are_ignored(
        a in package(),
        state in text(),
        license in "[a-z]{1,8}",
    ) {
        let mut b = a.clone();
        b.state = state;
        b.other.insert("license_id".to_string(), license.into());
        prop_assert!(FieldSet::PACKAGE.same(&a, &b));
    }

    /// PROPERTY: `same` holds exactly when no field differs.
    #[test]
    fn property_same_matches_differing(a in package(), b in package()) {
        prop_assert_eq!(
            FieldSet::PACKAGE.same(&a, &b),
            FieldSet::PACKAGE.differing(&a, &b).is_empty()
        );
    }
}
