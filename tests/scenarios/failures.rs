//! Scenario: catalog calls fail part-way through a run.

use ckan_mirror::domain::value_objects::Side;
use ckan_mirror::{MemoryCatalog, SyncError};

use crate::common::*;

fn source_with_one_file() -> MemoryCatalog {
    with_served_package(
        MemoryCatalog::new(SOURCE_URL),
        package(
            "p1",
            "src-p1",
            "org1",
            vec![source_resource("p1", "abc", "f.csv", 0)],
        ),
    )
}

#[test]
fn failed_upload_leaves_no_scratch_file() {
    let destination = MemoryCatalog::new("destination");
    destination.fail_on("resource_create");
    let mirror = Mirror::new(source_with_one_file(), destination);

    let err = mirror.use_case.sync_all().unwrap_err();

    assert!(matches!(
        err,
        SyncError::Catalog {
            side: Side::Destination,
            ..
        }
    ));
    assert_eq!(mirror.source().download_count(), 1);
    assert_eq!(mirror.leftover_files(), 0);
}

#[test]
fn unchanged_resource_is_never_downloaded() {
    let source = source_with_one_file();
    let existing = source.package("p1").unwrap().resources[0].clone();
    let destination = MemoryCatalog::new("destination").with_package(package(
        "p1",
        "dst-p1",
        "org1",
        vec![mirrored_resource("d1", &existing)],
    ));
    let mirror = Mirror::new(source, destination);

    let changes = mirror.use_case.sync_all().unwrap();

    assert!(changes.is_empty());
    assert_eq!(mirror.source().download_count(), 0);
}

#[test]
fn failure_keeps_earlier_writes() {
    let destination = MemoryCatalog::new("destination");
    destination.fail_on("package_delete");
    let destination =
        destination.with_package(package("orphan", "dst-orphan", "org1", Vec::new()));
    let mirror = Mirror::new(source_with_one_file(), destination);

    // No rollback: p1 is written before the delete fails.
    assert!(mirror.use_case.sync_all().is_err());
    assert!(mirror.destination().package("p1").is_some());
    assert!(mirror.destination().package("orphan").is_some());
}

#[test]
fn failing_source_listing_aborts_before_any_write() {
    let source = source_with_one_file();
    source.fail_on("organization_list");
    let mirror = Mirror::new(source, MemoryCatalog::new("destination"));

    let err = mirror.use_case.sync_all().unwrap_err();

    assert!(matches!(
        err,
        SyncError::Catalog {
            side: Side::Source,
            ..
        }
    ));
    assert_eq!(mirror.destination().write_count(), 0);
}
