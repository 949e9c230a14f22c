use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::PathBuf;

fn get_test_dir() -> PathBuf {
    let dir = PathBuf::from("target/tmp/tests");
    fs::create_dir_all(&dir).unwrap();
    dir
}

/// Star with hub H and four leaves.
fn write_star(name: &str) -> Result<PathBuf, Box<dyn std::error::Error>> {
    let file = get_test_dir().join(name);
    fs::write(&file, "H,A\nH,B\nH,C\nH,D\n")?;
    Ok(file)
}

#[test]
fn test_cli_stats() -> Result<(), Box<dyn std::error::Error>> {
    let file = write_star("stats_star.csv")?;

    let mut cmd = Command::cargo_bin("rinq")?;
    cmd.arg("stats").arg(&file);
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Nodes:          5"))
        .stdout(predicate::str::contains("Edges:          4"))
        .stdout(predicate::str::contains("Degree range:   1.00 .. 4.00"));

    fs::remove_file(file)?;
    Ok(())
}

#[test]
fn test_cli_centrality_ranks_hub_first() -> Result<(), Box<dyn std::error::Error>> {
    let file = write_star("centrality_star.csv")?;

    for measure in ["eigenvector", "estrada", "subgraph"] {
        let mut cmd = Command::cargo_bin("rinq")?;
        cmd.arg("centrality")
            .arg(&file)
            .arg("--measure")
            .arg(measure)
            .arg("--top")
            .arg("2");
        cmd.assert()
            .success()
            .stdout(predicate::str::contains("1. H ("))
            .stdout(predicate::str::contains("3. ").not());
    }

    fs::remove_file(file)?;
    Ok(())
}

#[test]
fn test_cli_select_discrete() -> Result<(), Box<dyn std::error::Error>> {
    let file = write_star("select_discrete.csv")?;

    let mut cmd = Command::cargo_bin("rinq")?;
    cmd.arg("select")
        .arg(&file)
        .arg("--tau")
        .arg("1")
        .arg("--reads")
        .arg("50")
        .arg("--sweeps")
        .arg("200");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Selected 1 nodes"))
        .stdout(predicate::str::contains("  H\n"));

    fs::remove_file(file)?;
    Ok(())
}

#[test]
fn test_cli_select_continuous_json() -> Result<(), Box<dyn std::error::Error>> {
    let file = write_star("select_continuous.csv")?;

    let mut cmd = Command::cargo_bin("rinq")?;
    cmd.arg("select")
        .arg(&file)
        .arg("--tau")
        .arg("1")
        .arg("--solver")
        .arg("continuous")
        .arg("--reads")
        .arg("20")
        .arg("--json");
    let output = cmd.assert().success().get_output().stdout.clone();

    let report: serde_json::Value = serde_json::from_slice(&output)?;
    assert_eq!(report["solver"], "continuous");
    assert_eq!(report["selected"], serde_json::json!(["H"]));
    assert_eq!(report["total_reads"], 20);
    assert_eq!(report["formulation"]["penalty_weight"], 50.0);

    fs::remove_file(file)?;
    Ok(())
}

#[test]
fn test_cli_select_no_reads_is_not_an_error() -> Result<(), Box<dyn std::error::Error>> {
    let file = write_star("select_no_reads.csv")?;

    let mut cmd = Command::cargo_bin("rinq")?;
    cmd.arg("select")
        .arg(&file)
        .arg("--tau")
        .arg("2")
        .arg("--reads")
        .arg("0");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("No feasible selection"));

    fs::remove_file(file)?;
    Ok(())
}

#[test]
fn test_cli_rejects_tau_above_node_count() -> Result<(), Box<dyn std::error::Error>> {
    let file = write_star("select_bad_tau.csv")?;

    let mut cmd = Command::cargo_bin("rinq")?;
    cmd.arg("select").arg(&file).arg("--tau").arg("9");
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Failed to formulate QUBO"));

    fs::remove_file(file)?;
    Ok(())
}

#[test]
fn test_cli_missing_file() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::cargo_bin("rinq")?;
    cmd.arg("stats").arg("target/tmp/tests/does_not_exist.csv");
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Failed to open"));
    Ok(())
}
