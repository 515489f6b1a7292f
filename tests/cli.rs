//
//  bitbucket-rest-client
//  tests/cli.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::json;
use tempfile::TempDir;

/// `bbrest` isolated from the caller's environment and config file.
fn bbrest(config_dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("bbrest").unwrap();
    for var in [
        "BBREST_BASE_URL",
        "BBREST_USERNAME",
        "BBREST_PASSWORD",
        "BBREST_TOKEN",
        "BBREST_CONFIG",
    ] {
        cmd.env_remove(var);
    }
    cmd.arg("--config").arg(config_dir.path().join("config.toml"));
    cmd
}

#[test]
fn test_help_lists_commands() {
    let dir = TempDir::new().unwrap();

    bbrest(&dir)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("project"))
        .stdout(predicate::str::contains("ssh-key"));
}

#[test]
fn test_version() {
    let dir = TempDir::new().unwrap();

    bbrest(&dir)
        .arg("version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_missing_base_url_fails() {
    let dir = TempDir::new().unwrap();

    bbrest(&dir)
        .args(["project", "list"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("No server configured"));
}

#[test]
fn test_project_list_as_json() {
    let dir = TempDir::new().unwrap();
    let mut server = mockito::Server::new();
    let mock = server
        .mock("GET", "/rest/api/1.0/projects?start=0&limit=100")
        .match_header("authorization", "Bearer secret-token")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            json!({
                "start": 0,
                "limit": 100,
                "size": 1,
                "isLastPage": true,
                "values": [{"id": 1, "key": "PRJ", "name": "Project", "type": "NORMAL"}]
            })
            .to_string(),
        )
        .create();

    bbrest(&dir)
        .args(["--json", "--base-url", &server.url(), "project", "list"])
        .env("BBREST_TOKEN", "secret-token")
        .assert()
        .success()
        .stdout(predicate::str::contains("\"key\": \"PRJ\""));

    mock.assert();
}

#[test]
fn test_base_url_from_config_file() {
    let dir = TempDir::new().unwrap();
    let mut server = mockito::Server::new();
    let mock = server
        .mock("GET", "/rest/api/1.0/users?start=0&limit=5")
        .with_status(200)
        .with_body(json!({"isLastPage": true, "values": []}).to_string())
        .create();

    std::fs::write(
        dir.path().join("config.toml"),
        format!("base_url = \"{}/\"\n", server.url()),
    )
    .unwrap();

    bbrest(&dir)
        .args(["user", "list", "--limit", "5"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No results"));

    mock.assert();
}

#[test]
fn test_unknown_project_exits_with_not_found() {
    let dir = TempDir::new().unwrap();
    let mut server = mockito::Server::new();
    server
        .mock("GET", "/rest/api/1.0/projects/NOPE")
        .with_status(404)
        .with_body(r#"{"errors":[{"message":"Project NOPE does not exist."}]}"#)
        .create();

    bbrest(&dir)
        .args(["--base-url", &server.url(), "project", "view", "NOPE"])
        .assert()
        .code(8)
        .stderr(predicate::str::contains("NOPE"));
}

#[test]
fn test_mismatched_participant_filters_are_rejected() {
    let dir = TempDir::new().unwrap();
    let server = mockito::Server::new();

    bbrest(&dir)
        .args([
            "--base-url",
            &server.url(),
            "pr",
            "list",
            "PRJ/repo",
            "--user",
            "a",
            "--user",
            "b",
            "--role",
            "author",
        ])
        .assert()
        .code(2);
}

#[test]
fn test_delete_requires_confirmation() {
    let dir = TempDir::new().unwrap();

    bbrest(&dir)
        .args(["--base-url", "https://bitbucket.example.com", "project", "delete", "PRJ"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--confirm"));
}

#[test]
fn test_config_set_then_get() {
    let dir = TempDir::new().unwrap();

    bbrest(&dir)
        .args(["config", "set", "base_url", "bitbucket.example.com/"])
        .assert()
        .success();

    bbrest(&dir)
        .args(["config", "get", "base_url"])
        .assert()
        .success()
        .stdout(predicate::str::contains("https://bitbucket.example.com"));

    bbrest(&dir)
        .args(["config", "set", "editor", "vim"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown config key"));
}

#[test]
fn test_start_without_limit_is_rejected() {
    let dir = TempDir::new().unwrap();

    bbrest(&dir)
        .args(["--base-url", "https://bitbucket.example.com", "user", "list", "--start", "5"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("--limit"));
}
