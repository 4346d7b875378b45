use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::net::TcpListener;
use std::process::Command;

#[test]
fn cli_shows_help() {
    let mut cmd = Command::cargo_bin("pdash").unwrap();
    cmd.arg("--help");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("pdash"));
}

#[test]
fn show_reports_fetch_failure() {
    let port = TcpListener::bind("127.0.0.1:0").unwrap().local_addr().unwrap().port();
    let mut cmd = Command::cargo_bin("pdash").unwrap();
    cmd.args([
        "show",
        "--base-url",
        &format!("http://127.0.0.1:{port}"),
        "--timeout",
        "5",
        "--no-animate",
    ]);
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("fetch failed"));
}

#[test]
fn show_rejects_bad_base_url() {
    let mut cmd = Command::cargo_bin("pdash").unwrap();
    cmd.args(["show", "--base-url", "ftp://example.org"]);
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("base url"));
}

// Live test (opt-in): cargo test --features online
#[cfg(feature = "online")]
#[test]
fn show_online_global_with_plot() {
    let dir = tempfile::tempdir().unwrap();
    let plot = dir.path().join("daily.svg");
    let mut cmd = Command::cargo_bin("pdash").unwrap();
    cmd.args(["show", "--no-animate", "--stats", "--plot"]).arg(&plot);
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Total Cases"))
        .stdout(predicate::str::contains("Last updated:"));
    assert!(plot.exists());
}
