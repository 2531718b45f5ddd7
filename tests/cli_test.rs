mod common;

use assert_cmd::cargo_bin;
use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::process::Command;

#[test]
fn test_cli_end_to_end() -> Result<(), Box<dyn std::error::Error>> {
    let csv = common::requests_csv(&[("ACC1", "100.00"), ("ACC2", "250.5")])?;

    let mut cmd = Command::new(cargo_bin!("fincore"));
    cmd.arg("process")
        .arg(csv.path())
        .arg("--fraud-latency-ms")
        .arg("0");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("id,account_id,amount,status,timestamp"))
        .stdout(predicate::str::contains(",ACC1,100.00,APPROVED,"))
        .stdout(predicate::str::contains(",ACC2,250.50,APPROVED,"));

    Ok(())
}

#[test]
fn test_cli_reports_rule_violations() -> Result<(), Box<dyn std::error::Error>> {
    let csv = common::requests_csv(&[("ACC1", "15000.00"), ("ACC1", "10.00")])?;

    let mut cmd = Command::new(cargo_bin!("fincore"));
    cmd.arg("process")
        .arg(csv.path())
        .arg("--fraud-latency-ms")
        .arg("0");

    cmd.assert()
        .success()
        .stderr(predicate::str::contains(
            "Error processing transaction: Transaction amount exceeds maximum limit of 10000.00",
        ))
        .stdout(predicate::str::contains(",ACC1,10.00,APPROVED,"))
        .stdout(predicate::str::contains("15000").not());

    Ok(())
}

#[test]
fn test_cli_missing_input_fails() {
    let mut cmd = Command::new(cargo_bin!("fincore"));
    cmd.arg("process").arg("does/not/exist.csv");

    cmd.assert().failure();
}

#[test]
fn test_cli_rejects_invalid_configuration() -> Result<(), Box<dyn std::error::Error>> {
    let csv = common::requests_csv(&[("ACC1", "1.00")])?;

    let mut cmd = Command::new(cargo_bin!("fincore"));
    cmd.env("FINCORE_REJECTION_RATE", "2")
        .arg("process")
        .arg(csv.path());

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("FINCORE_REJECTION_RATE"));

    Ok(())
}

#[test]
fn test_cli_keeps_sub_cent_precision_over_limit() -> Result<(), Box<dyn std::error::Error>> {
    let csv = common::requests_csv(&[("ACC1", "10000.004")])?;

    let mut cmd = Command::new(cargo_bin!("fincore"));
    cmd.arg("process")
        .arg(csv.path())
        .arg("--fraud-latency-ms")
        .arg("0");

    cmd.assert()
        .success()
        .stderr(predicate::str::contains(
            "Transaction amount exceeds maximum limit of 10000.00",
        ))
        .stdout(predicate::str::contains("ACC1").not());

    Ok(())
}
