use assert_cmd::Command;
use predicates::prelude::*;
use predicates::str::contains;

fn cmd() -> Command {
    Command::cargo_bin("gut_brain_sim").unwrap()
}

#[test]
fn baseline_table() {
    cmd()
        .args(["--time-span", "10", "--samples", "11"])
        .assert()
        .success()
        .stdout(contains("Gut-Brain Axis Simulation"))
        .stdout(contains("brain_activity"))
        .stdout(contains("Final state:"));
}

#[test]
fn all_scenarios_announced() {
    cmd()
        .args(["--all", "--time-span", "5", "--samples", "6"])
        .assert()
        .success()
        .stdout(contains("Simulating effect of antibiotic"))
        .stdout(contains("Simulating effect of probiotic"))
        .stdout(contains("Simulating effect of stress"))
        .stdout(contains("Relative to baseline:"));
}

#[test]
fn csv_first_rows() {
    cmd()
        .args(["--format", "csv", "--perturbation", "antibiotic", "--time-span", "1", "--samples", "2"])
        .assert()
        .success()
        .stdout(contains("scenario,t,microbiota,serotonin,brain_activity"))
        .stdout(contains("antibiotic,0,50,50,10"))
        .stdout(contains("Gut-Brain").not());
}

#[test]
fn json_lines_per_scenario() {
    let out = cmd()
        .args(["--format", "json", "--all", "--time-span", "2", "--samples", "3"])
        .output()
        .unwrap();
    assert!(out.status.success());
    let text = String::from_utf8(out.stdout).unwrap();
    let scenarios: Vec<String> = text
        .lines()
        .map(|line| {
            let doc: serde_json::Value = serde_json::from_str(line).unwrap();
            doc["scenario"].as_str().unwrap().to_string()
        })
        .collect();
    assert_eq!(scenarios, vec!["none", "antibiotic", "probiotic", "stress"]);
}

#[test]
fn chart_has_legend() {
    cmd()
        .args(["--format", "chart", "--perturbation", "stress", "--time-span", "20", "--samples", "100"])
        .assert()
        .success()
        .stdout(contains("Gut-Brain Axis Simulation (stress)"))
        .stdout(contains("Concentration/Activity"))
        .stdout(contains("o Brain Activity"));
}

#[test]
fn rejects_non_positive_time_span() {
    cmd()
        .args(["--time-span", "0"])
        .assert()
        .failure()
        .stderr(contains("Invalid parameter 'time_span'"));
}

#[test]
fn rejects_single_sample() {
    cmd()
        .args(["--samples", "1"])
        .assert()
        .failure()
        .stderr(contains("Invalid parameter 'samples'"));
}

#[test]
fn rejects_unknown_perturbation() {
    cmd()
        .args(["--perturbation", "fasting"])
        .assert()
        .failure()
        .stderr(contains("fasting"));
}

#[test]
fn rejects_negative_rate() {
    cmd()
        .args(["--growth-rate=-0.1"])
        .assert()
        .failure()
        .stderr(contains("microbiota_growth"));
}

#[test]
fn overflow_is_reported() {
    cmd()
        .args(["--growth-rate", "50", "--format", "csv"])
        .assert()
        .failure()
        .stderr(contains("Numerical instability"));
}

#[test]
fn rejects_vanishing_max_step() {
    cmd()
        .args(["--max-step", "1e-300"])
        .timeout(std::time::Duration::from_secs(30))
        .assert()
        .failure()
        .stderr(contains("Invalid parameter 'max_step'"));
}

#[test]
fn rejects_oversized_sample_count() {
    cmd()
        .args(["--samples", "9223372036854775807"])
        .assert()
        .failure()
        .stderr(contains("Invalid parameter 'samples'"));
}
