use assert_cmd::Command;
use predicates::prelude::*;

fn solace() -> Command {
    let mut cmd = Command::cargo_bin("solace_cli").expect("binary built");
    cmd.env_remove("BACKEND_URL").env("RUST_LOG", "off");
    cmd
}

#[test]
fn version_prints_name_and_version() {
    solace()
        .arg("version")
        .assert()
        .success()
        .stdout(predicate::str::contains(concat!("solace_cli ", env!("CARGO_PKG_VERSION"))));
}

#[test]
fn unreachable_backend_yields_apology() {
    solace()
        .args(["--backend-url", "http://127.0.0.1:9", "chat"])
        .write_stdin("Hello\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("you> Hello"))
        .stdout(predicate::str::contains(
            "solace> Sorry, I'm having trouble responding right now.",
        ));
}

#[test]
fn blank_lines_are_not_sent() {
    solace()
        .args(["--backend-url", "http://127.0.0.1:9"])
        .write_stdin("\n   \n")
        .assert()
        .success()
        .stdout(predicate::str::contains("you>").not());
}

#[test]
fn invalid_backend_url_fails() {
    solace()
        .args(["--backend-url", "not a url", "chat"])
        .write_stdin("")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid backend URL"));
}

#[test]
fn startup_error_is_reported_once_with_logging_enabled() {
    let output = solace()
        .env("RUST_LOG", "debug")
        .args(["--backend-url", "not a url", "chat"])
        .write_stdin("")
        .assert()
        .failure()
        .get_output()
        .stderr
        .clone();
    let stderr = String::from_utf8_lossy(&output);
    assert_eq!(stderr.matches("Invalid backend URL").count(), 1, "{stderr}");
}
