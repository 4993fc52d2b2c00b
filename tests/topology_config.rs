//! Loading network topologies from JSON files

use std::{fs, io::Cursor};

use searchlab::{
    Error,
    cli::{
        commands::network::{NetworkArgs, run},
        config::TopologyConfig,
    },
    network::{Graph, MAX_CAPACITY},
};

fn write_topology(dir: &tempfile::TempDir, json: &str) -> std::path::PathBuf {
    let path = dir.path().join("topology.json");
    fs::write(&path, json).unwrap();
    path
}

#[test]
fn loads_and_builds_a_topology_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_topology(
        &dir,
        r#"{
            "nodes": ["Hub", "Left", "Right", "Far"],
            "edges": [["Hub", "Left"], ["Hub", "Right"], ["Right", "Far"]]
        }"#,
    );

    let graph = TopologyConfig::load(&path).unwrap().build().unwrap();
    assert_eq!(graph.node_count(), 4);

    let result = graph.bfs(graph.lookup("Left").unwrap()).unwrap();
    assert_eq!(result.distance(graph.lookup("Far").unwrap()), Some(3));
}

#[test]
fn default_config_round_trips_through_a_file() {
    let dir = tempfile::tempdir().unwrap();
    let json = serde_json::to_string_pretty(&TopologyConfig::default()).unwrap();
    let path = write_topology(&dir, &json);

    let graph = TopologyConfig::load(&path).unwrap().build().unwrap();
    assert_eq!(graph, Graph::demo());
}

#[test]
fn missing_file_is_an_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = TopologyConfig::load(&dir.path().join("absent.json")).unwrap_err();
    assert!(matches!(err, Error::Io { .. }));
    assert!(err.to_string().contains("read topology file"));
}

#[test]
fn oversized_capacity_file_is_rejected_before_allocating() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_topology(&dir, r#"{"capacity": 8589934592, "nodes": ["A", "B"]}"#);

    let err = TopologyConfig::load(&path).unwrap().build().unwrap_err();
    assert!(matches!(err, Error::InvalidConfiguration { .. }));
    assert!(err.to_string().contains(&MAX_CAPACITY.to_string()));

    let args = NetworkArgs {
        topology: Some(path),
        source: Some("A".to_string()),
        target: Some("B".to_string()),
        json: false,
    };
    let mut output = Vec::new();
    assert!(run(&args, &mut Cursor::new(String::new()), &mut output).is_err());
}

#[test]
fn duplicate_names_are_rejected() {
    let config = TopologyConfig::from_json(r#"{"nodes": ["A", "A"]}"#).unwrap();
    assert!(matches!(config.build(), Err(Error::DuplicateNode { name }) if name == "A"));
}

#[test]
fn disconnected_target_cannot_receive_packets() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_topology(
        &dir,
        r#"{"nodes": ["A", "B", "Z"], "edges": [["A", "B"]]}"#,
    );
    let args = NetworkArgs {
        topology: Some(path),
        source: Some("A".to_string()),
        target: Some("Z".to_string()),
        json: false,
    };

    let mut output = Vec::new();
    run(&args, &mut Cursor::new(String::new()), &mut output).unwrap();
    let text = String::from_utf8(output).unwrap();

    assert!(text.contains("Z: Not reachable"));
    assert!(text.contains("No path exists from A to Z"));
    assert!(text.contains("Cannot send packet: No path exists from A to Z"));
    assert!(!text.contains("PACKET DELIVERED"));
}
