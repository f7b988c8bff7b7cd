use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use std::time::{SystemTime, UNIX_EPOCH};

fn unique_temp_dir(prefix: &str) -> PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("time went backwards")
        .as_nanos();
    let dir = std::env::temp_dir().join(format!(
        "flowsched-rs-{prefix}-{}-{nanos}",
        std::process::id()
    ));
    fs::create_dir_all(&dir).expect("create temp dir");
    dir
}

fn write_file(dir: &Path, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, contents).expect("write temp file");
    path
}

fn state_dist() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("data/state_dist.txt")
}

fn run_sim(args: &[&str]) -> Output {
    let dist = state_dist();
    let output = Command::new(env!("CARGO_BIN_EXE_flowsched_sim"))
        .arg("--state-dist")
        .arg(&dist)
        .args(args)
        .output()
        .expect("run flowsched_sim");
    assert!(
        output.status.success(),
        "flowsched_sim failed: stderr={}",
        String::from_utf8_lossy(&output.stderr)
    );
    output
}

fn parse_reports(output: &Output) -> Vec<Value> {
    let stdout = String::from_utf8_lossy(&output.stdout);
    let v: Value = serde_json::from_str(&stdout).expect("stdout must be JSON");
    v.as_array().expect("reports must be a JSON array").clone()
}

#[test]
fn flowsched_sim_reports_one_summary_per_episode() {
    let output = run_sim(&["--episodes", "3", "--seed", "5", "--json"]);
    let reports = parse_reports(&output);
    assert_eq!(reports.len(), 3);
    for (i, r) in reports.iter().enumerate() {
        assert_eq!(r["episode"].as_u64(), Some(i as u64 + 1));
        assert_eq!(r["done"].as_bool(), Some(true));
        assert!(r["steps"].as_u64().expect("steps") >= 10);
        assert!(r["link_flow_time"].as_f64().expect("link_flow_time") > 0.0);
        assert!(r["flow_completion_time"].as_f64().expect("flow_completion_time") > 0.0);
    }
}

#[test]
fn flowsched_sim_is_deterministic_for_a_seed() {
    let a = run_sim(&["--episodes", "2", "--seed", "11", "--random-policy", "--json"]);
    let b = run_sim(&["--episodes", "2", "--seed", "11", "--random-policy", "--json"]);
    assert_eq!(a.stdout, b.stdout);
}

#[test]
fn flowsched_sim_truncates_at_max_steps() {
    let output = run_sim(&["--max-steps", "3", "--json"]);
    let reports = parse_reports(&output);
    assert_eq!(reports.len(), 1);
    assert_eq!(reports[0]["steps"].as_u64(), Some(3));
    assert_eq!(reports[0]["done"].as_bool(), Some(false));
    assert!(reports[0]["link_flow_time"].is_null());
}

#[test]
fn flowsched_sim_writes_viz_json_with_meta_first() {
    let dir = unique_temp_dir("viz");
    let out_json = dir.join("viz.json");
    run_sim(&["--viz-json", out_json.to_str().unwrap()]);

    let raw = fs::read_to_string(&out_json).expect("read viz.json");
    let v: Value = serde_json::from_str(&raw).expect("parse viz.json");
    let arr = v.as_array().expect("viz.json must be a JSON array");
    assert_eq!(arr[0].get("kind").and_then(|k| k.as_str()), Some("meta"));
    assert_eq!(arr[0].get("seed").and_then(|s| s.as_u64()), Some(0));
    assert!(
        arr.iter()
            .any(|e| e.get("kind").and_then(|k| k.as_str()) == Some("episode_done"))
    );

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn flowsched_sim_accepts_config_json() {
    let dir = unique_temp_dir("config");
    let config = write_file(
        &dir,
        "config.json",
        r#"
{
    "n_flows": 4,
    "flow_size": { "kind": "uniform", "min": 2.0, "max": 10.0 }
}
        "#,
    );
    let out_json = dir.join("viz.json");
    run_sim(&[
        "--config",
        config.to_str().unwrap(),
        "--viz-json",
        out_json.to_str().unwrap(),
    ]);

    let raw = fs::read_to_string(&out_json).expect("read viz.json");
    let v: Value = serde_json::from_str(&raw).expect("parse viz.json");
    let arrivals = v
        .as_array()
        .expect("viz.json must be a JSON array")
        .iter()
        .filter(|e| e.get("kind").and_then(|k| k.as_str()) == Some("flow_arrive"))
        .count();
    assert_eq!(arrivals, 4);

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn flowsched_sim_rejects_malformed_state_dist() {
    let dir = unique_temp_dir("bad-dist");
    let bad = write_file(&dir, "dist.txt", "0.5\n0.4\n");
    let output = Command::new(env!("CARGO_BIN_EXE_flowsched_sim"))
        .arg("--state-dist")
        .arg(&bad)
        .output()
        .expect("run flowsched_sim");
    assert!(!output.status.success());

    let _ = fs::remove_dir_all(&dir);
}
