//! Service-layer tests against files on disk.

use std::path::PathBuf;

use dh_features::{FeatureRecord, FeatureSnapshot};
use dh_geo::DistanceModel;
use dh_graph::NetworkConfig;
use dh_app::{
    AppError, NetworkReport, build_network, load_config, load_snapshot, lookup_building,
    lookup_pipe, save_config, save_snapshot,
};

fn demos_dir() -> PathBuf {
    let mut dir = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    dir.pop(); // crates
    dir.pop(); // repo root
    dir.push("demos");
    dir
}

fn temp_path(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("dh-app-{}-{name}", std::process::id()))
}

fn demo_network() -> dh_graph::Network {
    let config = load_config(&demos_dir().join("network.yaml")).unwrap();
    build_network(&demos_dir().join("small_network.json"), &config).unwrap()
}

#[test]
fn demo_config_loads() {
    let config = load_config(&demos_dir().join("network.yaml")).unwrap();
    assert_eq!(config.distance_model, DistanceModel::Euclidean);
    assert_eq!(config.tolerance, 0.01);
}

#[test]
fn demo_network_report() {
    let report = NetworkReport::from_network(&demo_network());

    assert_eq!(report.counts.pipes, 7);
    assert_eq!(report.counts.buildings, 6);
    assert_eq!(report.counts.connectors, 4);
    assert_eq!(report.counts.links, 3);
    assert_eq!(report.counts.nodes, 9);
    assert_eq!(report.counts.forks, 1);

    let fork = &report.forks[0];
    assert_eq!(fork.label.as_deref(), Some("N1"));
    assert_eq!((fork.x, fork.y, fork.links), (10.0, 0.0, 3));

    assert_eq!(report.pipes.with_multiple_buildings, vec!["C4"]);
    assert_eq!(report.buildings.without_connector, vec!["b4", "B5", "B6"]);
    assert_eq!(report.buildings.contested, vec!["B5", "B6"]);
    assert!(report.buildings.with_multiple_connectors.is_empty());
    assert!(report.has_problems());
}

#[test]
fn report_json_uses_diagnostic_keys() {
    let report = NetworkReport::from_network(&demo_network());
    let json = serde_json::to_value(&report).unwrap();

    assert_eq!(json["counts"]["forks"], 1);
    assert_eq!(json["pipes with multiple connected buildings"][0], "C4");
    assert_eq!(json["buildings without connector"][0], "b4");
    assert!(json["buildings with multiple connectors"].is_array());

    let back: NetworkReport = serde_json::from_value(json).unwrap();
    assert_eq!(back, report);
}

#[test]
fn report_text_lists_problems() {
    let text = NetworkReport::from_network(&demo_network()).to_text();
    assert!(text.contains("pipes:      7 (4 connectors, 3 links)"));
    assert!(text.contains("fork N1 at (10, 0) with 3 links"));
    assert!(text.contains("buildings without connector (3):"));
    assert!(!text.contains("buildings with multiple connectors"));
}

#[test]
fn lookups_resolve_relationships() {
    let network = demo_network();

    let c1 = lookup_pipe(&network, "C1").unwrap();
    assert!(c1.is_connector);
    assert_eq!(c1.connected_buildings, vec!["B1"]);
    assert_eq!(c1.end_node, Some([20.0, 5.0]));
    assert!((c1.diameter_mm.unwrap() - 32.0).abs() < 1e-9);

    let t3 = lookup_pipe(&network, "T3").unwrap();
    assert!(!t3.is_connector);
    assert!(t3.connected_buildings.is_empty());

    let plant = lookup_building(&network, "PLANT").unwrap();
    assert!(plant.is_supply);
    assert_eq!(plant.connector.as_deref(), Some("C2"));
    assert_eq!(plant.category.as_deref(), Some("Energy centre"));

    let b5 = lookup_building(&network, "B5").unwrap();
    assert_eq!(b5.connector, None);
}

#[test]
fn lookup_of_unknown_or_excluded_id_is_not_found() {
    let network = demo_network();
    let err = lookup_pipe(&network, "X1").unwrap_err();
    assert!(err.is_not_found());
    assert!(lookup_building(&network, "nope").unwrap_err().is_not_found());
}

#[test]
fn snapshot_roundtrips_through_yaml_and_json() {
    let snapshot = FeatureSnapshot::new(
        vec![
            FeatureRecord::line(vec![[0.0, 0.0], [1.0, 0.0]])
                .with_attr("id", "P1")
                .with_attr("solution/included", true),
        ],
        vec![],
    );
    for name in ["snap.yaml", "snap.json"] {
        let path = temp_path(name);
        save_snapshot(&path, &snapshot).unwrap();
        assert_eq!(load_snapshot(&path).unwrap(), snapshot);
        let _ = std::fs::remove_file(&path);
    }
}

#[test]
fn config_roundtrip_and_validation() {
    let path = temp_path("config.yaml");
    let config = NetworkConfig {
        tolerance: 0.5,
        distance_model: DistanceModel::Haversine,
        use_index: false,
        parallel: true,
    };
    save_config(&path, &config).unwrap();
    assert_eq!(load_config(&path).unwrap(), config);

    std::fs::write(&path, "tolerance: -2.0\n").unwrap();
    assert!(matches!(load_config(&path), Err(AppError::Validation(_))));
    let _ = std::fs::remove_file(&path);
}

#[test]
fn unreadable_inputs_are_reported() {
    assert!(matches!(
        load_snapshot(&temp_path("missing.json")),
        Err(AppError::FileRead { .. })
    ));
    assert!(matches!(
        load_snapshot(&PathBuf::from("snapshot.txt")),
        Err(AppError::UnsupportedFormat { .. })
    ));

    let path = temp_path("broken.json");
    std::fs::write(&path, "{ not json").unwrap();
    assert!(matches!(load_snapshot(&path), Err(AppError::Parse { .. })));
    let _ = std::fs::remove_file(&path);
}
