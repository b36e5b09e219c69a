#![allow(deprecated)] // Command::cargo_bin

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::json;
use std::path::Path;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Command isolated from the developer's own credentials and config files
fn dome9(home: &Path) -> Command {
    let mut cmd = Command::cargo_bin("dome9").unwrap();
    cmd.current_dir(home)
        .env("HOME", home)
        .env("XDG_CONFIG_HOME", home.join(".config"))
        .env_remove("DOME9_CONFIG_PATH")
        .env_remove("DOME9_ACCESS_ID")
        .env_remove("DOME9_SECRET_KEY")
        .env_remove("DOME9_BASE_URL")
        .env_remove("RUST_LOG");
    cmd
}

#[test]
fn test_cli_help() {
    let mut cmd = Command::cargo_bin("dome9").unwrap();
    cmd.arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("read"))
        .stdout(predicate::str::contains("create"))
        .stdout(predicate::str::contains("update"))
        .stdout(predicate::str::contains("delete"))
        .stdout(predicate::str::contains("data"));
}

#[test]
fn test_cli_version() {
    let mut cmd = Command::cargo_bin("dome9").unwrap();
    cmd.arg("version")
        .assert()
        .success()
        .stdout(predicate::str::contains("dome9"));
}

#[test]
fn test_update_help() {
    let mut cmd = Command::cargo_bin("dome9").unwrap();
    cmd.arg("update")
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("<TYPE_NAME>"))
        .stdout(predicate::str::contains("--prior"));
}

#[test]
fn test_missing_credentials() {
    let home = tempfile::tempdir().unwrap();

    dome9(home.path())
        .args(["read", "dome9_ip_list", "--id", "42"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Missing credential: access_id"));
}

#[test]
fn test_attribute_file_must_be_an_object() {
    let home = tempfile::tempdir().unwrap();
    let attributes = home.path().join("attributes.json");
    std::fs::write(&attributes, "[1, 2, 3]").unwrap();

    dome9(home.path())
        .args(["create", "dome9_ip_list", "--attributes"])
        .arg(&attributes)
        .assert()
        .failure()
        .stderr(predicate::str::contains("must contain a JSON object"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_read_against_api() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/iplist/42"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 42,
            "name": "office",
            "items": [{"ip": "10.0.0.1", "comment": "hq"}]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let home = tempfile::tempdir().unwrap();
    let mut cmd = dome9(home.path());
    cmd.env("DOME9_ACCESS_ID", "access-id")
        .env("DOME9_SECRET_KEY", "secret-key")
        .env("DOME9_BASE_URL", server.uri())
        .args(["read", "dome9_ip_list", "--id", "42"]);

    let output = tokio::task::spawn_blocking(move || cmd.output().unwrap())
        .await
        .unwrap();
    assert!(output.status.success());

    let state: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(state["id"], "42");
    assert_eq!(state["attributes"]["name"], "office");
    assert_eq!(state["attributes"]["items"][0]["ip"], "10.0.0.1");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_delete_of_missing_resource_succeeds() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/iplist/42"))
        .respond_with(ResponseTemplate::new(404))
        .expect(1)
        .mount(&server)
        .await;

    let home = tempfile::tempdir().unwrap();
    let mut cmd = dome9(home.path());
    cmd.env("DOME9_ACCESS_ID", "access-id")
        .env("DOME9_SECRET_KEY", "secret-key")
        .env("DOME9_BASE_URL", server.uri())
        .args(["delete", "dome9_ip_list", "--id", "42"]);

    let output = tokio::task::spawn_blocking(move || cmd.output().unwrap())
        .await
        .unwrap();
    assert!(output.status.success());

    let state: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(state["id"], "");
}

#[test]
fn test_unknown_type() {
    let home = tempfile::tempdir().unwrap();

    dome9(home.path())
        .env("DOME9_ACCESS_ID", "access-id")
        .env("DOME9_SECRET_KEY", "secret-key")
        .env("DOME9_BASE_URL", "http://127.0.0.1:9")
        .args(["read", "dome9_nothing", "--id", "1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown resource type: dome9_nothing"));
}
