//! Scenario: mirroring into an empty or already-converged destination.

use ckan_mirror::domain::services::FieldSet;
use ckan_mirror::MemoryCatalog;

use crate::common::*;

fn populated_source() -> MemoryCatalog {
    let source = MemoryCatalog::new(SOURCE_URL)
        .with_organization(organization("health", "Ministry of Health"))
        .with_organization(organization("transport", "Transport Agency"));
    let source = with_served_package(
        source,
        package(
            "hospital-beds",
            "src-beds",
            "health",
            vec![
                source_resource("hospital-beds", "r-2023", "2023.csv", 0),
                source_resource("hospital-beds", "r-2024", "2024.csv", 1),
            ],
        ),
    );
    with_served_package(
        source,
        package(
            "bus-stops",
            "src-stops",
            "transport",
            vec![source_resource("bus-stops", "r-stops", "stops.geojson", 0)],
        ),
    )
}

#[test]
fn empty_destination_receives_everything() {
    let mirror = Mirror::new(populated_source(), MemoryCatalog::new("destination"));

    let changes = mirror.use_case.sync_all().unwrap();

    assert_eq!(changes.organizations.created, 2);
    assert_eq!(changes.packages.created, 2);
    assert_eq!(changes.resources.created, 3);
    assert_eq!(changes.total(), 7);

    for name in ["health", "transport"] {
        let source = mirror.source().organization(name).unwrap();
        let mirrored = mirror.destination().organization(name).unwrap();
        assert!(FieldSet::ORGANIZATION.same(&source, &mirrored));
        assert_eq!(mirrored.kind.as_deref(), Some("organization"));
        assert_eq!(mirrored.approval_status.as_deref(), Some("approved"));
    }

    let beds = mirror.destination().package("hospital-beds").unwrap();
    assert_eq!(beds.owner_org.as_deref(), Some("health"));
    assert_eq!(beds.provenance(), Some("src-beds"));
    let hashes: Vec<_> = beds.resources.iter().map(|r| r.match_key()).collect();
    assert_eq!(hashes, vec!["r-2023", "r-2024"]);
    assert_eq!(
        mirror.destination().uploaded(&beds.resources[1].id),
        Some(b"payload of r-2024".to_vec())
    );
    assert_eq!(mirror.leftover_files(), 0);
}

#[test]
fn second_run_is_a_no_op() {
    let mirror = Mirror::new(populated_source(), MemoryCatalog::new("destination"));
    mirror.use_case.sync_all().unwrap();
    let writes = mirror.destination().write_count();
    let downloads = mirror.source().download_count();

    let changes = mirror.use_case.sync_all().unwrap();

    assert!(changes.is_empty());
    assert_eq!(mirror.destination().write_count(), writes);
    assert_eq!(mirror.source().download_count(), downloads);
}

#[test]
fn new_package_with_one_resource_counts_two_changes() {
    let source = with_served_package(
        MemoryCatalog::new(SOURCE_URL),
        package(
            "p1",
            "src-p1",
            "org1",
            vec![source_resource("p1", "abc", "f.csv", 0)],
        ),
    );
    let mirror = Mirror::new(source, MemoryCatalog::new("destination"));

    let changes = mirror.use_case.sync_package("p1").unwrap();

    assert_eq!(changes.total(), 2);
    let mirrored = mirror.destination().package("p1").unwrap();
    assert_eq!(mirrored.resources.len(), 1);
    assert_eq!(mirrored.resources[0].hash.as_deref(), Some("abc"));
}

#[test]
fn identical_organization_is_left_alone() {
    let mirror = Mirror::new(
        MemoryCatalog::new(SOURCE_URL).with_organization(organization("org1", "Org One")),
        MemoryCatalog::new("destination").with_organization(organization("org1", "Org One")),
    );

    let changes = mirror.use_case.sync_all().unwrap();

    assert_eq!(changes.total(), 0);
    assert_eq!(mirror.destination().write_count(), 0);
}

