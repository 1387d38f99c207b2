//! Integration test for the file-tree backend.
//!
//! Builds a directory of survey run artifacts in a temporary location and queries it through
//! the `SpotDb` trait, the way downstream tooling does.

use chrono::{Duration, Utc};
use serde_json::{Value, json};
use spotdb::config::Config;
use spotdb::runs::RunId;
use spotdb::schema::AttrType;
use spotdb::{SpotDb, SurveyDb, connect};
use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

const RUN_COUNT: u32 = 6;

fn metadata_for(day: u32) -> Value {
    json!({
        "executable": {
            "executable_path": "/usr/workspace/bin/lulesh2.0",
            "launch_time": format!("2021/03/{day:02}, 10:00:00"),
            "num_ranks": 8,
            "num_threads": 4,
            "survey_arguments": ["--out", "/tmp"],
        },
        "machine": {
            "cluster": "quartz",
            "cpu_info": {"model_name": "Intel Xeon E5-2695", "sockets": 2, "hyperthreading": true},
            "mem": {"BLOCKS": [{"SIZE": "128G", "STATE": "online"}], "total_online": "128G"},
        },
        "user": {"user_name": format!("baseline-{day}"), "compilers": ["gcc-10.2.1"]},
        "problem": {"problem_size": 30 + day, "figure_of_merit": 1000.5},
    })
}

fn results_for(day: u32) -> Value {
    json!({
        "timing": {
            "time.duration": {"min": 1.0, "avg": 1.23, "max": 1.5},
            "iterations": {"value": 7 * day},
        },
        "AFFINITY": {"rank0": {"value": "0-3"}},
        "app_data": {"fom": {"value": 12}},
        "gpu_data": {"util": {"avg": 0.5}},
    })
}

fn write_survey(dir: &Path) {
    for day in 1..=RUN_COUNT {
        let run_dir = dir.join(format!("node{}", day % 2));
        fs::create_dir_all(&run_dir).unwrap();

        let prefix = format!("survey-{day}");
        fs::write(run_dir.join(format!("{prefix}-metadata.json")), metadata_for(day).to_string()).unwrap();
        fs::write(run_dir.join(format!("{prefix}-report.json")), results_for(day).to_string()).unwrap();
    }

    // A pair without a launch time and an orphan results file, both to be ignored
    let mut no_launch = metadata_for(20);
    let _ = no_launch["executable"].as_object_mut().unwrap().remove("launch_time");
    fs::write(dir.join("nolaunch-metadata.json"), no_launch.to_string()).unwrap();
    fs::write(dir.join("nolaunch-report.json"), results_for(20).to_string()).unwrap();
    fs::write(dir.join("orphan-report.json"), results_for(21).to_string()).unwrap();
}

fn open_survey() -> (tempfile::TempDir, Box<dyn SpotDb>) {
    let temp_dir = tempfile::tempdir().unwrap();
    write_survey(temp_dir.path());
    let db = connect(temp_dir.path().to_str().unwrap(), &Config::default()).unwrap();
    (temp_dir, db)
}

#[test]
fn test_all_run_ids_are_distinct() {
    let (_dir, mut db) = open_survey();
    let ids = db.get_all_run_ids().unwrap();

    let distinct: BTreeSet<_> = ids.iter().collect();
    assert_eq!(ids.len(), RUN_COUNT as usize);
    assert_eq!(distinct.len(), RUN_COUNT as usize);
    assert!(ids.contains(&RunId::from("lulesh2.0_1614852000.0")));
}

#[test]
fn test_run_without_launch_time_is_excluded() {
    let (_dir, mut db) = open_survey();

    let all = db.get_all_run_ids().unwrap();
    let new = db.get_new_runs(Utc::now() - Duration::days(1)).unwrap();

    for ids in [&all, &new] {
        assert!(ids.iter().all(|id| id.as_str().starts_with("lulesh2.0_")));
        assert_eq!(ids.len(), RUN_COUNT as usize);
    }
}

#[test]
fn test_no_new_runs_after_last_modification() {
    let (_dir, mut db) = open_survey();
    assert!(db.get_new_runs(Utc::now() + Duration::hours(1)).unwrap().is_empty());
}

#[test]
fn test_global_data_shape() {
    let (_dir, mut db) = open_survey();
    let ids = db.get_all_run_ids().unwrap();
    let data = db.get_global_data(&ids).unwrap();

    assert_eq!(data.keys().collect::<BTreeSet<_>>(), ids.iter().collect::<BTreeSet<_>>());

    let attrs = &data[&RunId::from("lulesh2.0_1614852000.0")];
    assert_eq!(attrs["launchdate"], json!(1_614_852_000));
    assert_eq!(attrs["launch_time"], json!("2021/03/04, 10:00:00"));
    assert_eq!(attrs["cluster"], json!("quartz"));
    assert_eq!(attrs["name"], json!("baseline-4"));
    assert_eq!(attrs["model_name"], json!("Intel Xeon E5-2695"));
    assert_eq!(attrs["total_online"], json!("128G"));
    assert_eq!(attrs["problem_size"], json!(34));
    assert!(!attrs.contains_key("survey_arguments"));
    assert!(!attrs.contains_key("hyperthreading"));

    let Value::String(compilers) = &attrs["compilers"] else {
        panic!("compilers should be serialized to text");
    };
    assert_eq!(serde_json::from_str::<Value>(compilers).unwrap(), json!(["gcc-10.2.1"]));

    let Value::String(blocks) = &attrs["mem_blocks"] else {
        panic!("mem_blocks should be serialized to text");
    };
    assert_eq!(
        serde_json::from_str::<Value>(blocks).unwrap(),
        json!([{"SIZE": "128G", "STATE": "online"}])
    );
}

#[test]
fn test_global_schema() {
    let (_dir, mut db) = open_survey();
    let _ = db.get_all_run_ids().unwrap();
    let schema = db.get_global_attribute_metadata().unwrap();

    assert_eq!(schema["launchdate"].attr_type, AttrType::Date);
    assert_eq!(schema["launch_time"].attr_type, AttrType::String);
    assert_eq!(schema["problem_size"].attr_type, AttrType::Int);
    assert_eq!(schema["figure_of_merit"].attr_type, AttrType::Float);
    assert_eq!(schema["sockets"].attr_type, AttrType::String);
    assert_eq!(schema["mem_blocks"].attr_type, AttrType::String);
    assert_eq!(schema["name"].attr_type, AttrType::String);
    assert!(!schema.contains_key("user_name"));

    // Asking again does not change the schema
    assert_eq!(db.get_global_attribute_metadata().unwrap(), schema);
}

#[test]
fn test_region_profiles_and_metric_schema() {
    let (_dir, mut db) = open_survey();
    let ids = db.get_all_run_ids().unwrap();
    let profiles = db.get_regionprofiles(&ids).unwrap();

    let runtime = &profiles[&RunId::from("lulesh2.0_1614852000.0")]["runtime"];
    assert_eq!(runtime["time.duration"], json!(1.23));
    assert_eq!(runtime["iterations"], json!(28));
    assert_eq!(runtime.len(), 2);

    let schema = db.get_metric_attribute_metadata().unwrap();
    assert_eq!(schema["time.duration"].attr_type, AttrType::Float);
    assert_eq!(schema["iterations"].attr_type, AttrType::Int);
    assert_eq!(schema.len(), 2);
}

#[test]
fn test_lookups_are_memoized() {
    let temp_dir = tempfile::tempdir().unwrap();
    write_survey(temp_dir.path());
    let mut db = SurveyDb::open(temp_dir.path(), &Config::default()).unwrap();

    let ids = db.get_all_run_ids().unwrap();
    let first_globals = db.get_global_data(&ids).unwrap();
    let first_profiles = db.get_regionprofiles(&ids).unwrap();
    let stats = db.stats();

    assert_eq!(db.get_global_data(&ids).unwrap(), first_globals);
    assert_eq!(db.get_regionprofiles(&ids).unwrap(), first_profiles);
    assert_eq!(db.stats(), stats);
    assert_eq!(stats.metadata_normalized, u64::from(RUN_COUNT));
    assert_eq!(stats.results_aggregated, u64::from(RUN_COUNT));
    assert_eq!(db.skipped().len(), 2);
}

#[test]
fn test_configured_statistic() {
    let temp_dir = tempfile::tempdir().unwrap();
    write_survey(temp_dir.path());

    let config = Config {
        statistic: "max".to_string(),
        ..Config::default()
    };
    let mut db = SurveyDb::open(temp_dir.path(), &config).unwrap();
    let ids = db.get_all_run_ids().unwrap();
    let profiles = db.get_regionprofiles(&ids[..1]).unwrap();

    assert_eq!(profiles[&ids[0]]["runtime"]["time.duration"], json!(1.5));
}

#[test]
fn test_channel_data_is_unsupported() {
    let (_dir, mut db) = open_survey();
    let ids = db.get_all_run_ids().unwrap();
    assert!(db.get_channel_data("timeseries", &ids).unwrap().is_empty());
}
