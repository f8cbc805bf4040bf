#![forbid(unsafe_code)]
use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::tempdir;

fn run(data: &str, args: &[&str]) -> assert_cmd::assert::Assert {
    let mut cmd = Command::cargo_bin("shiftplan-cli").unwrap();
    cmd.arg("--data").arg(data).args(args).assert()
}

#[test]
fn generate_refuses_incomplete_setup() {
    let dir = tempdir().unwrap();
    let data = dir.path().join("plan.json");
    run(
        data.to_str().unwrap(),
        &["generate", "--year", "2025", "--month", "7"],
    )
    .failure()
    .stderr(predicate::str::contains("setup"));
}

#[test]
fn full_flow_configures_and_generates_a_month() {
    let dir = tempdir().unwrap();
    let data = dir.path().join("plan.json");
    let data = data.to_str().unwrap();

    run(data, &["add-role", "--name", "Server"]).success();
    run(
        data,
        &[
            "add-shift",
            "--weekday",
            "1",
            "--name",
            "Morning",
            "--start",
            "09:00",
            "--end",
            "17:00",
            "--require",
            "1=1",
        ],
    )
    .success();
    run(
        data,
        &[
            "add-worker",
            "--name",
            "Alice",
            "--email",
            "alice@example.com",
            "--rating",
            "9",
            "--roles",
            "1",
        ],
    )
    .success();

    // disponibilité non soumise : génération bloquée en nommant Alice
    run(data, &["generate", "--year", "2025", "--month", "7"])
        .failure()
        .stderr(predicate::str::contains("Alice"));

    run(
        data,
        &[
            "submit-month",
            "--email",
            "alice@example.com",
            "--year",
            "2025",
            "--month",
            "7",
        ],
    )
    .success();

    run(data, &["generate", "--year", "2025", "--month", "7"])
        .success()
        .stdout(predicate::str::contains("Total shifts: 4"));

    run(data, &["stats", "--year", "2025", "--month", "7"])
        .success()
        .stdout(predicate::str::contains("Filled shifts: 4"));

    let out_csv = dir.path().join("schedule.csv");
    run(
        data,
        &[
            "export",
            "--year",
            "2025",
            "--month",
            "7",
            "--out-csv",
            out_csv.to_str().unwrap(),
        ],
    )
    .success();
    let csv = std::fs::read_to_string(&out_csv).unwrap();
    assert!(csv.contains("Alice"));
}

#[test]
fn generate_warns_with_code_2_when_understaffed() {
    let dir = tempdir().unwrap();
    let data = dir.path().join("plan.json");
    let data = data.to_str().unwrap();

    run(data, &["add-role", "--name", "Server"]).success();
    run(
        data,
        &[
            "add-shift",
            "--weekday",
            "1",
            "--name",
            "Morning",
            "--start",
            "09:00",
            "--end",
            "17:00",
            "--require",
            "1=2",
        ],
    )
    .success();
    run(
        data,
        &[
            "add-worker",
            "--name",
            "Alice",
            "--email",
            "alice@example.com",
            "--rating",
            "9",
            "--roles",
            "1",
        ],
    )
    .success();
    run(
        data,
        &[
            "submit-month",
            "--email",
            "alice@example.com",
            "--year",
            "2025",
            "--month",
            "7",
        ],
    )
    .success();

    run(data, &["generate", "--year", "2025", "--month", "7"]).code(2);
}
