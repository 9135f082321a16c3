//! Integration tests for the `weather` binary.
#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use assert_cmd::Command;
use predicates::prelude::*;
use predicates::str::contains;
use tempfile::TempDir;

mod common;

use common::write_readings_csv;

type TestResult = Result<(), Box<dyn std::error::Error>>;

fn cli() -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("weather"));
    cmd.env_remove("WEATHER_DATA");
    cmd
}

fn cli_with_data(tmp: &TempDir) -> Result<Command, Box<dyn std::error::Error>> {
    let data = write_readings_csv(tmp.path())?;
    let mut cmd = cli();
    cmd.arg("--data").arg(data);
    Ok(cmd)
}

#[test]
fn count_prints_number_of_readings() -> TestResult {
    let tmp = TempDir::new()?;
    cli_with_data(&tmp)?
        .args(["--format", "csv", "count"])
        .assert()
        .success()
        .stdout("count\n9\n");
    Ok(())
}

#[test]
fn data_path_can_come_from_environment() -> TestResult {
    let tmp = TempDir::new()?;
    let data = write_readings_csv(tmp.path())?;
    cli()
        .env("WEATHER_DATA", &data)
        .args(["--format", "jsonl", "count"])
        .assert()
        .success()
        .stdout(contains("\"count\":9"));
    Ok(())
}

#[test]
fn reading_prints_source_order_row() -> TestResult {
    let tmp = TempDir::new()?;
    cli_with_data(&tmp)?
        .args(["--format", "csv", "reading", "--index", "3"])
        .assert()
        .success()
        .stdout(contains("Europe,Germany,,Berlin,1,1,1995,30.1"));
    Ok(())
}

#[test]
fn reading_out_of_range_fails() -> TestResult {
    let tmp = TempDir::new()?;
    cli_with_data(&tmp)?
        .args(["reading", "--index", "-1"])
        .assert()
        .failure()
        .stderr(contains("outside the 9 available readings"));

    cli_with_data(&tmp)?
        .args(["reading", "--index", "9"])
        .assert()
        .failure();
    Ok(())
}

#[test]
fn readings_filtered_by_day() -> TestResult {
    let tmp = TempDir::new()?;
    cli_with_data(&tmp)?
        .args([
            "--format", "csv", "readings", "--index", "0", "--count", "3", "--month", "1",
            "--day", "2",
        ])
        .assert()
        .success()
        .stdout("Region,Country,State,City,Month,Day,Year,AvgTemperature\nAfrica,Algeria,,Algiers,1,2,1995,49.4\n");
    Ok(())
}

#[test]
fn readings_rejects_invalid_month() -> TestResult {
    let tmp = TempDir::new()?;
    cli_with_data(&tmp)?
        .args([
            "readings", "--index", "0", "--count", "3", "--month", "13", "--day", "1",
        ])
        .assert()
        .failure()
        .stderr(contains("Invalid month"));
    Ok(())
}

#[test]
fn city_stats_reports_run() -> TestResult {
    let tmp = TempDir::new()?;
    cli_with_data(&tmp)?
        .args([
            "--format", "jsonl", "city-stats", "--country", "Algeria", "--city", "Algiers",
            "--years",
        ])
        .assert()
        .success()
        .stdout(
            contains("\"starting_index\":0")
                .and(contains("\"count\":3"))
                .and(contains("\"years\":[1995,1995,1996]")),
        );
    Ok(())
}

#[test]
fn city_stats_for_unknown_city_fails() -> TestResult {
    let tmp = TempDir::new()?;
    cli_with_data(&tmp)?
        .args(["city-stats", "--country", "France", "--city", "Paris"])
        .assert()
        .failure()
        .stderr(contains("No readings for"));
    Ok(())
}

#[test]
fn trend_skips_missing_temperatures() -> TestResult {
    let tmp = TempDir::new()?;
    cli_with_data(&tmp)?
        .args([
            "--format", "jsonl", "trend", "--country", "US", "--state", "Arizona", "--city",
            "Phoenix", "--month", "1", "--day", "1",
        ])
        .assert()
        .success()
        .stdout(contains("\"readings\":3").and(contains("\"slope\":2.0")));
    Ok(())
}

#[test]
fn fit_computes_slope_without_data() -> TestResult {
    cli()
        .args([
            "--format", "csv", "fit", "--x", "2000,2001,2002", "--y", "60,62,64",
        ])
        .assert()
        .success()
        .stdout("points,slope\n3,2.0\n");
    Ok(())
}

#[test]
fn fit_rejects_single_point() -> TestResult {
    cli()
        .args(["fit", "--x", "2000", "--y", "60"])
        .assert()
        .failure()
        .stderr(contains("Invalid x"));
    Ok(())
}

#[test]
fn missing_data_path_is_reported() -> TestResult {
    cli()
        .arg("count")
        .assert()
        .failure()
        .stderr(contains("No readings file given"));
    Ok(())
}

#[test]
fn malformed_csv_is_reported() -> TestResult {
    let tmp = TempDir::new()?;
    let data = tmp.path().join("bad.csv");
    std::fs::write(
        &data,
        "Region,Country,State,City,Month,Day,Year,AvgTemperature\nAfrica,Algeria\n",
    )?;

    cli()
        .arg("--data")
        .arg(&data)
        .arg("count")
        .assert()
        .failure()
        .stderr(contains("Failed to load readings"));
    Ok(())
}
