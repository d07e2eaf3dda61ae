//! Scenario: the destination has drifted away from the source.

use ckan_mirror::domain::entities::Extra;
use ckan_mirror::MemoryCatalog;

use crate::common::*;

#[test]
fn destination_only_package_is_deleted() {
    let mirror = Mirror::new(
        MemoryCatalog::new(SOURCE_URL),
        MemoryCatalog::new("destination")
            .with_package(package("orphan", "dst-orphan", "org1", Vec::new())),
    );

    let changes = mirror.use_case.sync_all().unwrap();

    assert_eq!(changes.packages.deleted, 1);
    assert_eq!(changes.total(), 1);
    assert!(mirror.destination().package("orphan").is_none());
}

#[test]
fn destination_only_organization_is_kept() {
    let mirror = Mirror::new(
        MemoryCatalog::new(SOURCE_URL),
        MemoryCatalog::new("destination").with_organization(organization("legacy", "Legacy")),
    );

    let changes = mirror.use_case.sync_all().unwrap();

    assert!(changes.is_empty());
    assert!(mirror.destination().organization("legacy").is_some());
}

#[test]
fn state_difference_alone_does_not_update_package() {
    let source_pkg = package("p1", "src-p1", "org1", Vec::new());
    let mut destination_pkg = package("p1", "dst-p1", "org1", Vec::new());
    destination_pkg.state = Some("draft".to_string());
    let mirror = Mirror::new(
        MemoryCatalog::new(SOURCE_URL).with_package(source_pkg),
        MemoryCatalog::new("destination").with_package(destination_pkg),
    );

    let changes = mirror.use_case.sync_package("p1").unwrap();

    assert_eq!(changes.packages.total(), 0);
    assert_eq!(
        mirror.destination().package("p1").unwrap().state.as_deref(),
        Some("draft")
    );
}

#[test]
fn changed_title_updates_package_in_place() {
    let source_pkg = package("p1", "src-p1", "org1", Vec::new());
    let mut destination_pkg = package("p1", "dst-p1", "org1", Vec::new());
    destination_pkg.title = Some("Stale title".to_string());
    destination_pkg.extras = vec![Extra::new("source", "src-p1")];
    let mirror = Mirror::new(
        MemoryCatalog::new(SOURCE_URL).with_package(source_pkg),
        MemoryCatalog::new("destination").with_package(destination_pkg),
    );

    let changes = mirror.use_case.sync_package("p1").unwrap();

    assert_eq!(changes.packages.updated, 1);
    assert_eq!(changes.total(), 1);
    let mirrored = mirror.destination().package("p1").unwrap();
    assert_eq!(mirrored.title.as_deref(), Some("p1 title"));
    assert_eq!(mirrored.id.as_deref(), Some("dst-p1"));
    assert_eq!(mirrored.provenance(), Some("src-p1"));
}

#[test]
fn resources_are_matched_by_hash_not_name() {
    let wanted = source_resource("p1", "abc", "f.csv", 0);
    let mut same_name = mirrored_resource("d-other", &wanted);
    same_name.hash = Some("other".to_string());

    let source = with_served_package(
        MemoryCatalog::new(SOURCE_URL),
        package("p1", "src-p1", "org1", vec![wanted]),
    );
    let destination = MemoryCatalog::new("destination")
        .with_package(package("p1", "dst-p1", "org1", vec![same_name]));
    let mirror = Mirror::new(source, destination);

    let changes = mirror.use_case.sync_package("p1").unwrap();

    assert_eq!(changes.resources.created, 1);
    assert_eq!(changes.resources.deleted, 1);
    let resources = mirror.destination().package("p1").unwrap().resources;
    assert_eq!(resources.len(), 1);
    assert_eq!(resources[0].hash.as_deref(), Some("abc"));
    assert_ne!(resources[0].id, "d-other");
}

#[test]
fn moved_resource_position_is_updated() {
    let first = source_resource("p1", "a", "a.csv", 0);
    let second = source_resource("p1", "b", "b.csv", 1);
    let mut stale_a = mirrored_resource("d-a", &first);
    stale_a.position = Some(1);
    let mut stale_b = mirrored_resource("d-b", &second);
    stale_b.position = Some(0);

    let source = with_served_package(
        MemoryCatalog::new(SOURCE_URL),
        package("p1", "src-p1", "org1", vec![first, second]),
    );
    let destination = MemoryCatalog::new("destination")
        .with_package(package("p1", "dst-p1", "org1", vec![stale_b, stale_a]));
    let mirror = Mirror::new(source, destination);

    let changes = mirror.use_case.sync_package("p1").unwrap();

    assert_eq!(changes.resources.updated, 2);
    assert_eq!(changes.resources.deleted, 0);
    assert_eq!(mirror.source().download_count(), 2);
}

#[test]
fn duplicate_orphan_hashes_collapse_to_the_last() {
    let keep = source_resource("p1", "abc", "f.csv", 0);
    let mirrored = mirrored_resource("d-abc", &keep);
    let mut gone_first = mirrored_resource("d-gone-1", &keep);
    gone_first.hash = Some("gone".to_string());
    let mut gone_last = mirrored_resource("d-gone-2", &keep);
    gone_last.hash = Some("gone".to_string());

    let source = with_served_package(
        MemoryCatalog::new(SOURCE_URL),
        package("p1", "src-p1", "org1", vec![keep]),
    );
    let destination = MemoryCatalog::new("destination").with_package(package(
        "p1",
        "dst-p1",
        "org1",
        vec![gone_first, mirrored, gone_last],
    ));
    let mirror = Mirror::new(source, destination);

    let changes = mirror.use_case.sync_package("p1").unwrap();

    assert_eq!(changes.total(), 1);
    let ids: Vec<String> = mirror
        .destination()
        .package("p1")
        .unwrap()
        .resources
        .into_iter()
        .map(|r| r.id)
        .collect();
    assert_eq!(ids, vec!["d-gone-1", "d-abc"]);
}
