//! Router-level tests against a fake juju executable.

#![cfg(unix)]

use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::Path;

use axum::http::StatusCode;
use axum_test::TestServer;
use juju_api::create_app;
use juju_workspace::Workspace;
use serde_json::json;

fn fake_tool(dir: &Path, name: &str, script: &str) -> String {
    let path = dir.join(name);
    fs::write(&path, format!("#!/bin/sh\n{}\n", script)).unwrap();
    let mut perms = fs::metadata(&path).unwrap().permissions();
    perms.set_mode(0o755);
    fs::set_permissions(&path, perms).unwrap();
    path.to_string_lossy().into_owned()
}

fn server_with_juju(root: &Path, script: &str) -> TestServer {
    let juju = fake_tool(root, "juju", script);
    let ws = Workspace::new(root.join("ws")).unwrap().with_juju_bin(juju);
    TestServer::new(create_app(ws)).unwrap()
}

#[tokio::test]
async fn test_health_reports_service() {
    let root = tempfile::tempdir().unwrap();
    let server = server_with_juju(root.path(), "exit 0");

    let res = server.get("/health").await;
    res.assert_status_ok();
    let body: serde_json::Value = res.json();
    assert_eq!(body["service"], "juju-api");
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn test_add_cloud_returns_created_with_stderr_body() {
    let root = tempfile::tempdir().unwrap();
    let server = server_with_juju(root.path(), r#"printf "cloud added" 1>&2; exit 0"#);

    let res = server
        .post("/cloud")
        .json(&json!({
            "name": "test",
            "regions": [{ "name": "RegionOne", "endPoint": "http://10.31.1.240:5000/v3" }]
        }))
        .await;

    assert_eq!(res.status_code(), StatusCode::CREATED);
    assert_eq!(res.text(), "cloud added");
}

#[tokio::test]
async fn test_cloud_detail_miss_is_200_with_stderr() {
    let root = tempfile::tempdir().unwrap();
    let server = server_with_juju(root.path(), r#"printf "cloud test not found" 1>&2; exit 1"#);

    let res = server.get("/cloud/test").await;
    res.assert_status_ok();
    assert_eq!(res.text(), "cloud test not found");
}

#[tokio::test]
async fn test_clouds_list_returns_stdout() {
    let root = tempfile::tempdir().unwrap();
    let server = server_with_juju(root.path(), r#"printf "cloud one\ncloud two\n""#);

    let res = server.get("/cloud").await;
    res.assert_status_ok();
    assert_eq!(res.text(), "cloud one\ncloud two\n");
}

#[tokio::test]
async fn test_readiness_follows_exit_code() {
    let root = tempfile::tempdir().unwrap();

    let server = server_with_juju(root.path(), "exit 0");
    let res = server.get("/isk8sready").await;
    res.assert_status_ok();
    assert!(res.json::<bool>());

    let root = tempfile::tempdir().unwrap();
    let server = server_with_juju(root.path(), "exit 2");
    let res = server.get("/isk8sready").await;
    res.assert_status_ok();
    assert!(!res.json::<bool>());
}

#[tokio::test]
async fn test_raw_command_relays_stdout() {
    let root = tempfile::tempdir().unwrap();
    let server = server_with_juju(root.path(), "exit 0");

    let res = server.post("/command").text("echo hello").await;
    res.assert_status_ok();
    assert_eq!(res.text(), "hello\n");
}

#[tokio::test]
async fn test_raw_command_relays_stdout_even_on_failure() {
    let root = tempfile::tempdir().unwrap();
    let server = server_with_juju(root.path(), "exit 0");

    // A failing command still answers with its stdout, not its stderr.
    let tool = fake_tool(root.path(), "failing-tool", r#"printf out; printf err 1>&2; exit 7"#);
    let res = server.post("/command").text(tool).await;
    res.assert_status_ok();
    assert_eq!(res.text(), "out");
}

#[tokio::test]
async fn test_missing_tool_surfaces_as_internal_error() {
    let root = tempfile::tempdir().unwrap();
    let ws = Workspace::new(root.path().join("ws"))
        .unwrap()
        .with_juju_bin("no-such-juju-binary");
    let server = TestServer::new(create_app(ws)).unwrap();

    let res = server.get("/status").await;
    assert_eq!(res.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: serde_json::Value = res.json();
    assert!(body["error"].as_str().unwrap().contains("no-such-juju-binary"));
}
