use std::fs;
use std::process::{Command, Output};

use serde_json::Value;

fn limes(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_limes"))
        .args(args)
        .output()
        .expect("run limes")
}

fn stdout_json(output: &Output) -> Value {
    assert!(
        output.status.success(),
        "limes failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    serde_json::from_slice(&output.stdout).expect("json")
}

#[test]
fn extrapolate_prints_report() {
    let output = limes(&["extrapolate", "--samples", "1,2,4", "--orders", "1,2"]);
    let report = stdout_json(&output);
    let value = report["value"].as_f64().expect("value");
    assert!((value - 7.0).abs() < 1e-8);
    assert!(report["report_hash"].as_str().is_some());
    assert_eq!(report["diagonal"].as_array().map(Vec::len), Some(3));
}

#[test]
fn extrapolate_with_uniform_order() {
    let output = limes(&["extrapolate", "--samples", "2,1", "--uniform-order", "1"]);
    let report = stdout_json(&output);
    assert!(report["value"].as_f64().expect("value").abs() < 1e-12);
}

#[test]
fn extrapolate_rejects_mismatched_orders() {
    let output = limes(&["extrapolate", "--samples", "1,2,4", "--orders", "1"]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("order-count-mismatch"), "{stderr}");
}

#[test]
fn stencil_accepts_negative_shifts() {
    let output = limes(&["stencil", "--shifts=-1,0,1", "--order", "1"]);
    let report = stdout_json(&output);
    let coefficients: Vec<f64> = report["coefficients"]
        .as_array()
        .expect("coefficients")
        .iter()
        .filter_map(Value::as_f64)
        .collect();
    assert_eq!(coefficients.len(), 3);
    for (actual, expected) in coefficients.iter().zip([-0.5_f64, 0.0, 0.5]) {
        assert!((actual - expected).abs() < 1e-12);
    }
    assert_eq!(report["truncation_order"].as_u64(), Some(2));
}

#[test]
fn stencil_reports_singular_systems() {
    let output = limes(&["stencil", "--shifts=0,1,1", "--order", "1"]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("singular-system"), "{stderr}");
}

#[test]
fn series_reads_yaml_and_writes_report() {
    let dir = tempfile::tempdir().expect("tempdir");
    let config = dir.path().join("series.yaml");
    fs::write(
        &config,
        "max_iters: 12\nmethod:\n  type: richardson\n  orders:\n    type: beta-shifted\n",
    )
    .expect("write config");
    let out = dir.path().join("out");
    let output = limes(&[
        "series",
        "--beta",
        "0.5",
        "--config",
        config.to_str().expect("utf8 path"),
        "--out",
        out.to_str().expect("utf8 path"),
    ]);
    assert!(output.status.success());
    let body = fs::read(out.join("series_report.json")).expect("report");
    let report: Value = serde_json::from_slice(&body).expect("json");
    assert_eq!(report["iterations"].as_u64(), Some(12));
    assert_eq!(report["converged"].as_bool(), Some(false));
    let value = report["value"].as_f64().expect("value");
    assert!((value - 0.667_691_457_189_609_2).abs() < 1e-9);
}

#[test]
fn series_cap_can_fail() {
    let output = limes(&[
        "series",
        "--beta",
        "1",
        "--max-iters",
        "6",
        "--fail-on-cap",
    ]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("iteration-cap"), "{stderr}");
}

#[test]
fn series_rejects_beta_out_of_range() {
    let output = limes(&["series", "--beta", "1.5"]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("beta-out-of-range"), "{stderr}");
}

#[test]
fn version_prints_crate_version() {
    let output = limes(&["version"]);
    assert!(output.status.success());
    let text = String::from_utf8(output.stdout).expect("utf8");
    assert_eq!(text.trim(), env!("CARGO_PKG_VERSION"));

    let long = stdout_json(&limes(&["version", "--long"]));
    assert_eq!(long["schema_version"]["major"].as_u64(), Some(1));
}
