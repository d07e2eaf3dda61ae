//! Property tests for destination resource pruning.

use std::collections::HashSet;

use proptest::prelude::*;

use ckan_mirror::domain::entities::Resource;
use ckan_mirror::domain::services::Planner;

fn hash() -> impl Strategy<Value = Option<String>> {
    proptest::option::weighted(0.9, "[a-e]")
}

fn destination() -> impl Strategy<Value = Vec<Resource>> {
    proptest::collection::vec(hash(), 0..12).prop_map(|hashes| {
        hashes
            .into_iter()
            .enumerate()
            .map(|(i, hash)| Resource {
                hash,
                ..Resource::with_id(format!("d{}", i))
            })
            .collect()
    })
}

fn source() -> impl Strategy<Value = Vec<Resource>> {
    proptest::collection::hash_set("[a-e]", 0..5)
        .prop_map(|ids| ids.into_iter().map(Resource::with_id).collect())
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 256,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: nothing the source still has is pruned.
    #[test]
    fn property_prune_spares_source_ids(source in source(), destination in destination()) {
        let ids: HashSet<&str> = source.iter().map(|r| r.id.as_str()).collect();
        for orphan in Planner::prune(&source, &destination) {
            prop_assert!(!ids.contains(orphan.match_key()));
        }
    }

    /// PROPERTY: at most one resource is pruned per hash, and it is the last
    /// one carrying that hash.
    #[test]
    fn property_prune_takes_last_of_each_hash(source in source(), destination in destination()) {
        let pruned = Planner::prune(&source, &destination);

        let keys: HashSet<&str> = pruned.iter().map(|r| r.match_key()).collect();
        prop_assert_eq!(keys.len(), pruned.len());

        for orphan in &pruned {
            let last = destination
                .iter()
                .rev()
                .find(|r| r.match_key() == orphan.match_key())
                .unwrap();
            prop_assert_eq!(&last.id, &orphan.id);
        }
    }

    /// PROPERTY: pruning order is sorted by hash.
    #[test]
    fn property_prune_is_sorted(source in source(), destination in destination()) {
        let keys: Vec<&str> = Planner::prune(&source, &destination)
            .into_iter()
            .map(|r| r.match_key())
            .collect();
        let mut sorted = keys.clone();
        sorted.sort_unstable();
        prop_assert_eq!(keys, sorted);
    }

    /// PROPERTY: an empty source prunes one resource per distinct hash.
    #[test]
    fn property_empty_source_prunes_every_hash(destination in destination()) {
        let distinct: HashSet<&str> = destination.iter().map(|r| r.match_key()).collect();
        prop_assert_eq!(Planner::prune(&[], &destination).len(), distinct.len());
    }
}
