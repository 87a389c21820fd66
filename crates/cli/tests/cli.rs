use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::tempdir;

const HEADER: &str = "seq_id,position,ref_base,new_base,new_cov,ref_cov,total_cov,frequency\n";

fn rrnevo() -> Command {
    Command::cargo_bin("rrnevo").unwrap()
}

fn write_calls(dir: &Path, name: &str, rows: &str) -> std::path::PathBuf {
    let path = dir.join(name);
    fs::write(&path, format!("{HEADER}{rows}")).unwrap();
    path
}

#[test]
fn test_presets_lists_strains() {
    rrnevo()
        .arg("presets")
        .assert()
        .success()
        .stdout(predicate::str::contains("normal"))
        .stdout(predicate::str::contains("mutator"))
        .stdout(predicate::str::contains("Ara+6"));
}

#[test]
fn test_init_writes_config() {
    let temp = tempdir().unwrap();
    let path = temp.path().join("run.json");

    rrnevo()
        .args(["init", "--strain", "mutator", "-n", "12", "--seed", "5", "-o"])
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("Configuration written"))
        .stdout(predicate::str::contains("Runs: 12"));

    let json: serde_json::Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(json["execution"]["runs"], 12);
    assert_eq!(json["execution"]["seed"], 5);
    assert_eq!(json["strain"], "mutator");
}

#[test]
fn test_simulate_csv_to_stdout() {
    let output = rrnevo()
        .args([
            "simulate", "-g", "200", "-i", "50", "-n", "4", "--seed", "9", "-m", "1e-5", "-c",
            "1e-3", "-f", "csv",
        ])
        .output()
        .unwrap();
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines[0], "generation,mean,median,q25,q75,min,max");
    assert_eq!(lines.len(), 6);
    assert!(lines[1].starts_with("0,"));
    assert!(lines[5].starts_with("200,"));
}

#[test]
fn test_simulate_is_reproducible_with_seed() {
    let run = || {
        rrnevo()
            .args(["simulate", "-g", "100", "-i", "25", "-n", "3", "--seed", "42", "-f", "json"])
            .output()
            .unwrap()
            .stdout
    };
    assert_eq!(run(), run());
}

#[test]
fn test_simulate_from_config_file() {
    let temp = tempdir().unwrap();
    let config = temp.path().join("run.json");
    let out = temp.path().join("summary.csv");

    rrnevo()
        .args(["init", "-g", "100", "-i", "50", "-n", "2", "-o"])
        .arg(&config)
        .assert()
        .success();

    rrnevo()
        .arg("simulate")
        .arg("--config")
        .arg(&config)
        .args(["--no-progress", "-f", "csv", "-o"])
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::contains("Runs: 2"));

    let csv = fs::read_to_string(&out).unwrap();
    assert_eq!(csv.lines().count(), 4);
}

#[test]
fn test_simulate_rejects_negative_rate() {
    rrnevo()
        .args(["simulate", "--mutation-rate=-1e-9", "-g", "10", "-i", "5", "-n", "1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid simulation parameters"));
}

#[test]
fn test_simulate_rejects_zero_runs() {
    rrnevo()
        .args(["simulate", "-n", "0"])
        .assert()
        .failure();
}

#[test]
fn test_observe_csv() {
    let temp = tempdir().unwrap();
    let a = write_calls(temp.path(), "Ara-1_500gen_A.csv", "rrsB,10,A,G,1,1,2,0.4\n");
    let b = write_calls(temp.path(), "Ara-1_500gen_B.csv", "rrsB,10,A,G,1,1,2,0.8\nrrlB,3,C,T,1,1,2,1\n");

    let output = rrnevo()
        .args(["observe", "-f", "csv"])
        .arg(&a)
        .arg(&b)
        .output()
        .unwrap();
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines.len(), 2);
    assert!(lines[1].starts_with("Ara-1,500,"));
    assert!(lines[1].ends_with(",2,1,1,2"));
}

#[test]
fn test_observe_requires_parsable_names() {
    let temp = tempdir().unwrap();
    let bad = write_calls(temp.path(), "sample.csv", "");

    rrnevo()
        .arg("observe")
        .arg(&bad)
        .assert()
        .failure()
        .stderr(predicate::str::contains("parsable name"));
}

#[test]
fn test_compare_reports_positions() {
    let temp = tempdir().unwrap();
    let early = write_calls(temp.path(), "Ara+1_0gen_A.csv", "");
    let late = write_calls(temp.path(), "Ara+1_100gen_A.csv", "rrsB,5,A,G,1,1,2,1\n");

    let output = rrnevo()
        .args(["compare", "-g", "100", "-i", "50", "-n", "3", "--seed", "1", "-f", "csv"])
        .arg(&early)
        .arg(&late)
        .output()
        .unwrap();
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(
        lines[0],
        "strain,preset,generation,band_generation,observed,min,q25,median,q75,max,position"
    );
    assert_eq!(lines.len(), 3);
    assert!(lines[1].starts_with("Ara+1,normal,0,0,0,"));
    assert!(lines[2].starts_with("Ara+1,normal,100,100,"));
}

#[test]
fn test_compare_keeps_config_rates() {
    let temp = tempdir().unwrap();
    let config = temp.path().join("custom.json");
    let normal = write_calls(temp.path(), "Ara+1_100gen_A.csv", "rrsB,5,A,G,1,1,2,0.5\n");
    let mutator = write_calls(temp.path(), "Ara-1_100gen_B.csv", "rrsB,5,A,G,1,1,2,0.5\n");

    rrnevo()
        .args([
            "init", "-m", "1e-3", "-c", "0", "-d", "0", "-g", "100", "-i", "50", "-n", "3",
            "--seed", "1", "-o",
        ])
        .arg(&config)
        .assert()
        .success();

    let output = rrnevo()
        .args(["compare", "-f", "csv", "--config"])
        .arg(&config)
        .arg(&normal)
        .arg(&mutator)
        .output()
        .unwrap();
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    let rows: Vec<Vec<&str>> = stdout.lines().skip(1).map(|l| l.split(',').collect()).collect();
    assert_eq!(rows.len(), 2);
    for row in &rows {
        // Every locus mutates each generation at 1e-3 per site
        assert_eq!(row[1], "custom");
        assert_eq!(row[3], "100");
        let band_min: f64 = row[5].parse().unwrap();
        assert!(band_min > 0.01, "band min {band_min}");
        assert_eq!(row[10], "below range");
    }
    // One band shared by both lineages
    assert_eq!(rows[0][5..10], rows[1][5..10]);
}
