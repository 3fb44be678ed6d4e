//! CLI integration tests
//!
//! These run without a browser or network: every case fails validation
//! before the pipeline starts.
use predicates::prelude::*;
use tempfile::TempDir;

fn cmd() -> assert_cmd::Command {
    let mut cmd = assert_cmd::Command::cargo_bin("doclens").unwrap();
    // isolate from any developer .env in the working tree
    cmd.current_dir(std::env::temp_dir());
    cmd
}

#[test]
fn test_cli_help() {
    cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("doclens"))
        .stdout(predicate::str::contains("URL"));
}

#[test]
fn test_cli_version() {
    cmd().arg("--version").assert().success();
}

#[test]
fn test_cli_rejects_invalid_url() {
    cmd()
        .env("GEMINI_API_KEY", "test-key")
        .arg("example.com/docs")
        .assert()
        .failure()
        .stderr(predicate::str::contains("http://"));
}

#[test]
fn test_cli_requires_api_key() {
    cmd()
        .env_remove("GEMINI_API_KEY")
        .arg("https://example.com/docs")
        .assert()
        .failure()
        .stderr(predicate::str::contains("GEMINI_API_KEY"));
}

#[test]
fn test_cli_missing_prompts_dir_is_fatal() {
    let tmp = TempDir::new().unwrap();

    cmd()
        .env("GEMINI_API_KEY", "test-key")
        .args(["--prompts-dir", tmp.path().to_str().unwrap()])
        .arg("https://example.com/docs")
        .assert()
        .failure()
        .stderr(predicate::str::contains("template"));
}

#[test]
fn test_cli_url_is_required() {
    cmd().assert().failure();
}
