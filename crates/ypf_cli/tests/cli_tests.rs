use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use std::fs;

fn fixture(name: &str) -> String {
    format!("{}/tests/fixtures/{}", env!("CARGO_MANIFEST_DIR"), name)
}

const KEEPER_ONLY_CATALOG: &str = r#"
schema_version: 1
positions:
  - id: goalkeeper
    primary: { q11: 1 }
    weights: { q11: 1.0 }
    description: "Any keeper"
"#;

#[test]
fn test_cli_help() {
    let mut cmd = cargo_bin_cmd!("ypf");
    cmd.arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Recommend a playing position"))
        .stdout(predicate::str::contains("analyze"))
        .stdout(predicate::str::contains("export"))
        .stdout(predicate::str::contains("batch"))
        .stdout(predicate::str::contains("positions"))
        .stdout(predicate::str::contains("attributes"));
}

#[test]
fn test_cli_analyze_text_report() {
    let mut cmd = cargo_bin_cmd!("ypf");
    cmd.args(["analyze", "--input", fixture("andi.json").as_str()])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("=== YOUTH POSITION FINDER - ANALYSIS REPORT ==="))
        .stdout(predicate::str::contains("Nama: Andi"))
        .stdout(predicate::str::contains("Tanggal Analisis: 9/3/2025"))
        .stdout(predicate::str::contains("PRIMARY POSITION: Right Winger (RW)"))
        .stdout(predicate::str::contains("Match Score: 88/100"))
        .stdout(predicate::str::contains("- Kelincahan: 5/5"));
}

#[test]
fn test_cli_analyze_json() {
    let mut cmd = cargo_bin_cmd!("ypf");
    let output = cmd
        .args(["analyze", "--input", fixture("andi.json").as_str(), "--json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["report"]["primary"]["position"], "right_winger");
    assert_eq!(value["report"]["primary"]["confidence"], 70);
    assert_eq!(value["report"]["player_profile"]["technical"], 47);
    assert_eq!(value["player"]["name"], "Andi");
}

#[test]
fn test_cli_analyze_stdin() {
    let mut cmd = cargo_bin_cmd!("ypf");
    cmd.args(["analyze", "--input", "-"])
        .write_stdin(fs::read_to_string(fixture("andi.json")).unwrap())
        .assert()
        .success()
        .stdout(predicate::str::contains("Confidence Score: 70%"));
}

#[test]
fn test_cli_rejects_out_of_range_rating() {
    let mut cmd = cargo_bin_cmd!("ypf");
    cmd.args(["analyze", "--input", fixture("invalid_rating.json").as_str()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid rating for q3: 9"));

    let request = fs::read_to_string(fixture("andi.json")).unwrap().replace("\"q1\": 5", "\"q1\": 300");
    let mut cmd = cargo_bin_cmd!("ypf");
    cmd.args(["analyze", "--input", "-"])
        .write_stdin(request)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid rating for q1: 300"));
}

#[test]
fn test_cli_analyze_details() {
    let mut cmd = cargo_bin_cmd!("ypf");
    cmd.args(["analyze", "--input", fixture("andi.json").as_str(), "--details"])
        .assert()
        .success()
        .stdout(predicate::str::contains("© 2025 YouthPositionFinder\n\nPRIMARY POSITION: Right Winger (RW)"))
        .stdout(predicate::str::contains("Match Score: 88/100 | Confidence: 70% | Recommended"))
        .stdout(predicate::str::contains("KEY ATTRIBUTES:\n- Kecepatan tinggi (90+ m/menit)"))
        .stdout(predicate::str::contains("TYPICAL WEAKNESSES:\n- Defensive workrate"))
        .stdout(predicate::str::contains("1. Week 1-2: Speed & Agility\n   - Cone dribbling"))
        .stdout(predicate::str::contains("4. Week 7-8: Match Simulation"))
        .stdout(predicate::str::contains("DEVELOPMENT PATH:\nFocus pada peningkatan stamina"));

    let mut cmd = cargo_bin_cmd!("ypf");
    cmd.args(["analyze", "--input", fixture("andi.json").as_str(), "--details", "--json"])
        .assert()
        .failure();
}

#[test]
fn test_cli_export_writes_report_file() {
    let dir = tempfile::tempdir().unwrap();
    let mut cmd = cargo_bin_cmd!("ypf");
    cmd.args(["export", "--input", fixture("andi.json").as_str(), "--out-dir"])
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("YPF-Report-Andi-"));

    let entries: Vec<_> = fs::read_dir(dir.path()).unwrap().map(|e| e.unwrap().path()).collect();
    assert_eq!(entries.len(), 1);
    let file_name = entries[0].file_name().unwrap().to_string_lossy().to_string();
    assert!(file_name.starts_with("YPF-Report-Andi-"));
    assert!(file_name.ends_with(".txt"));

    let contents = fs::read_to_string(&entries[0]).unwrap();
    assert!(contents.ends_with("© 2025 YouthPositionFinder"));
}

#[test]
fn test_cli_batch_ranked_summary() {
    let mut cmd = cargo_bin_cmd!("ypf");
    cmd.args(["batch", "--input", fixture("batch.json").as_str()])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "1. Dewi (15) - Right Winger (RW) 100/100, 100% Highly Recommended",
        ))
        .stdout(predicate::str::contains("2. Andi (12) - Right Winger (RW) 88/100, 70% Recommended"))
        .stdout(predicate::str::contains("3. Citra (14) - no eligible position"))
        .stdout(predicate::str::contains("Analyzed 3/3 players"));
}

#[test]
fn test_cli_batch_reports_invalid_entries() {
    let mut cmd = cargo_bin_cmd!("ypf");
    cmd.args(["batch", "--input", fixture("batch_with_invalid.json").as_str()])
        .assert()
        .failure()
        .stdout(predicate::str::contains("1. Andi (12) - Right Winger (RW) 88/100, 70% Recommended"))
        .stdout(predicate::str::contains("Analyzed 1/3 players"))
        .stderr(predicate::str::contains("skipped #1 Budi: Invalid rating for q1: 300"))
        .stderr(predicate::str::contains("skipped #2 <unnamed>:"))
        .stderr(predicate::str::contains("missing field `name`"))
        .stderr(predicate::str::contains("2 of 3 players could not be analyzed"));
}

#[test]
fn test_cli_batch_rejects_empty_and_wrong_schema() {
    let mut cmd = cargo_bin_cmd!("ypf");
    cmd.args(["batch", "--input", "-"])
        .write_stdin("[]")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Batch request cannot be empty"));

    let andi = fs::read_to_string(fixture("andi.json")).unwrap();
    let mut cmd = cargo_bin_cmd!("ypf");
    cmd.args(["batch", "--input", "-"])
        .write_stdin(format!(r#"{{"schema_version": 2, "players": [{}]}}"#, andi))
        .assert()
        .failure()
        .stderr(predicate::str::contains("UNSUPPORTED_SCHEMA"));
}

#[test]
fn test_cli_positions() {
    let mut cmd = cargo_bin_cmd!("ypf");
    cmd.arg("positions")
        .assert()
        .success()
        .stdout(predicate::str::contains("RW  Right Winger (RW)"))
        .stdout(predicate::str::contains("primary:   q1>=4, q2>=4, q5>=4"))
        .stdout(predicate::str::contains("Goalkeeper (GK)"));
}

#[test]
fn test_cli_attributes() {
    let mut cmd = cargo_bin_cmd!("ypf");
    cmd.arg("attributes")
        .assert()
        .success()
        .stdout(predicate::str::contains("q1   Kecepatan"))
        .stdout(predicate::str::contains("q15  Antisipasi Bola"));
}

#[test]
fn test_cli_catalog_override() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("keeper.yaml");
    fs::write(&path, KEEPER_ONLY_CATALOG).unwrap();

    let mut cmd = cargo_bin_cmd!("ypf");
    cmd.args(["analyze", "--input", fixture("andi.json").as_str(), "--catalog"])
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("PRIMARY POSITION: Goalkeeper (GK)"))
        .stdout(predicate::str::contains("Match Score: 20/100"));

    let mut cmd = cargo_bin_cmd!("ypf");
    cmd.arg("positions")
        .env("YPF_CATALOG_PATH", &path)
        .assert()
        .success()
        .stdout(predicate::str::contains("Goalkeeper (GK)"))
        .stdout(predicate::str::contains("Right Winger").not());
}

#[test]
fn test_cli_missing_input_file() {
    let mut cmd = cargo_bin_cmd!("ypf");
    cmd.args(["analyze", "--input", "does-not-exist.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read does-not-exist.json"));
}
