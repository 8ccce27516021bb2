use super::*;
use std::fs;
use std::io::Write;

use flate2::Compression;
use flate2::write::GzEncoder;
use serde_json::json;
use tempfile::TempDir;

use crate::input::config::load_run_config;
use crate::input::json::{read_trajectory_json, write_trajectory_json};

fn sample_set() -> TrajectorySet {
    TrajectorySet::new(
        vec!["run_a.csv".to_string(), "run_b.csv".to_string()],
        vec![
            Sequence::new(3, 2, vec![1.0, 0.0, 2.0, 0.5, 3.0, 1.0]).unwrap(),
            Sequence::new(1, 2, vec![-1.0, 4.0]).unwrap(),
        ],
        vec![
            Sequence::new(3, 2, vec![1.5, 0.0, 2.0, 0.25, 2.5, 1.0]).unwrap(),
            Sequence::new(1, 2, vec![-1.0, 3.0]).unwrap(),
        ],
    )
    .unwrap()
}

fn trajectory_json() -> serde_json::Value {
    json!({
        "file_names": ["run_a.csv", "run_b.csv"],
        "true": [[[1.0, 0.0], [2.0, 0.5], [3.0, 1.0]], [[-1.0, 4.0]]],
        "predicted": [[[1.5, 0.0], [2.0, 0.25], [2.5, 1.0]], [[-1.0, 3.0]]]
    })
}

#[test]
fn test_read_json() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("test-w_5-h_3.json");
    fs::write(&path, trajectory_json().to_string()).unwrap();

    let set = read_trajectory_json(&path).unwrap();
    assert_eq!(set, sample_set());
    assert_eq!(set.steps(), vec![3, 1]);
    assert_eq!(set.channels(), Some(2));
}

#[test]
fn test_read_json_gz() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("test-w_5-h_3.json.gz");
    let mut enc = GzEncoder::new(Vec::new(), Compression::default());
    enc.write_all(trajectory_json().to_string().as_bytes())
        .unwrap();
    fs::write(&path, enc.finish().unwrap()).unwrap();

    assert_eq!(load_trajectories(&path).unwrap(), sample_set());
}

#[test]
fn test_json_round_trip_through_writer() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("copy.json");
    write_trajectory_json(&path, &sample_set()).unwrap();
    assert_eq!(read_trajectory_json(&path).unwrap(), sample_set());
}

#[test]
fn test_ragged_rows_rejected() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("bad.json");
    let bad = json!({
        "file_names": ["x"],
        "true": [[[1.0, 2.0], [3.0]]],
        "predicted": [[[1.0, 2.0], [3.0, 4.0]]]
    });
    fs::write(&path, bad.to_string()).unwrap();

    let err = read_trajectory_json(&path).unwrap_err();
    assert!(matches!(
        err,
        InputError::Sequence {
            sample: 0,
            side: "true",
            ..
        }
    ));
}

#[test]
fn test_sample_count_mismatch_rejected() {
    let err = TrajectorySet::new(
        vec!["a".to_string()],
        Vec::new(),
        Vec::new(),
    )
    .unwrap_err();
    assert!(err.to_string().contains("sample count mismatch"));
}

#[test]
fn test_find_trajectory_path_prefers_bin() {
    let dir = TempDir::new().unwrap();
    let stem = trajectory_stem(EvalMode::Validation, 60, 900);
    assert_eq!(stem, "validation-w_60-h_900");
    assert!(matches!(
        find_trajectory_path(dir.path(), &stem),
        Err(InputError::MissingInput(_))
    ));

    fs::write(dir.path().join(format!("{stem}.json")), "{}").unwrap();
    assert_eq!(
        find_trajectory_path(dir.path(), &stem).unwrap(),
        dir.path().join(format!("{stem}.json"))
    );
    fs::write(dir.path().join(format!("{stem}.bin")), b"").unwrap();
    assert_eq!(
        find_trajectory_path(dir.path(), &stem).unwrap(),
        dir.path().join(format!("{stem}.bin"))
    );
}

#[test]
fn test_load_run_config_ignores_extra_fields() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.json");
    let cfg = json!({
        "window": 60,
        "horizon": 900,
        "state_names": ["u", "v", "r"],
        "train_sequence_files": ["a.csv"],
        "models": {}
    });
    fs::write(&path, cfg.to_string()).unwrap();

    let cfg = load_run_config(&path).unwrap();
    assert_eq!(cfg.window, 60);
    assert_eq!(cfg.horizon, 900);
    assert_eq!(cfg.state_names, ["u", "v", "r"]);
}

#[test]
fn test_load_run_config_requires_state_names() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.json");
    fs::write(&path, r#"{"window": 1, "horizon": 2, "state_names": []}"#).unwrap();
    assert!(matches!(
        load_run_config(&path),
        Err(InputError::InvalidInput(_))
    ));
}
