//! End-to-end engine tests against fake juju/helm executables.

#![cfg(unix)]

use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::Path;

use juju_core::ExecError;
use juju_workspace::{classify, OperationKind, Outcome, Workspace, WorkspaceError};

/// Write an executable shell script standing in for the external tool.
fn fake_tool(dir: &Path, name: &str, script: &str) -> String {
    let path = dir.join(name);
    fs::write(&path, format!("#!/bin/sh\n{}\n", script)).unwrap();
    let mut perms = fs::metadata(&path).unwrap().permissions();
    perms.set_mode(0o755);
    fs::set_permissions(&path, perms).unwrap();
    path.to_string_lossy().into_owned()
}

const CLOUD_YAML: &[u8] = b"clouds:\n    test:\n      type: openstack\n      auth-types: [userpass]\n      regions:\n";

#[test]
fn test_add_cloud_returns_process_result_verbatim() {
    let root = tempfile::tempdir().unwrap();
    let juju = fake_tool(root.path(), "juju", r#"printf "added: $*" 1>&2; exit 0"#);
    let ws = Workspace::new(root.path().join("ws"))
        .unwrap()
        .with_juju_bin(juju);

    let res = ws.add_cloud("test", CLOUD_YAML, "openstack-play.yaml").unwrap();

    assert_eq!(res.exit_code, 0);
    assert_eq!(
        res.stderr,
        "added: add-cloud test -f openstack-play.yaml --client"
    );
    // The payload was fully staged before the tool ran.
    assert_eq!(
        fs::read(ws.dir().join("openstack-play.yaml")).unwrap(),
        CLOUD_YAML
    );
    // Create classification surfaces stderr even on success.
    assert_eq!(
        classify(&res, OperationKind::Create),
        Outcome::Success("added: add-cloud test -f openstack-play.yaml --client".to_string())
    );
}

#[test]
fn test_cloud_detail_miss_surfaces_stderr_not_an_error() {
    let root = tempfile::tempdir().unwrap();
    let juju = fake_tool(
        root.path(),
        "juju",
        r#"printf "cloud test not found" 1>&2; exit 1"#,
    );
    let ws = Workspace::new(root.path().join("ws"))
        .unwrap()
        .with_juju_bin(juju);

    let res = ws.cloud_detail("test").unwrap();
    assert_eq!(res.exit_code, 1);

    match classify(&res, OperationKind::Detail) {
        Outcome::Success(body) => assert_eq!(body, "cloud test not found"),
        Outcome::Failure(body) => panic!("miss classified as failure: {}", body),
    }
}

#[test]
fn test_stage_failure_aborts_before_invocation() {
    let root = tempfile::tempdir().unwrap();
    let marker = root.path().join("invoked");
    let juju = fake_tool(
        root.path(),
        "juju",
        &format!("touch {}", marker.display()),
    );

    let ws_dir = root.path().join("ws");
    let ws = Workspace::new(&ws_dir).unwrap().with_juju_bin(juju);

    // Break the workspace directory: a regular file now sits at its path, so
    // staging fails regardless of the uid the tests run under.
    fs::remove_dir_all(&ws_dir).unwrap();
    fs::write(&ws_dir, b"not a directory").unwrap();

    let err = ws
        .add_cloud("test", CLOUD_YAML, "openstack-play.yaml")
        .unwrap_err();

    assert!(matches!(err, WorkspaceError::Stage { ref filename, .. } if filename == "openstack-play.yaml"));
    assert!(!marker.exists(), "tool must not run after a staging failure");
}

#[test]
fn test_missing_tool_is_a_distinct_spawn_failure() {
    let root = tempfile::tempdir().unwrap();
    let ws = Workspace::new(root.path().join("ws"))
        .unwrap()
        .with_juju_bin(root.path().join("no-such-juju").to_string_lossy().into_owned());

    let err = ws.clouds().unwrap_err();
    assert!(matches!(err, WorkspaceError::Exec(ExecError::Spawn { .. })));
}

#[test]
fn test_workspace_performs_no_exit_code_interpretation() {
    let root = tempfile::tempdir().unwrap();
    let juju = fake_tool(root.path(), "juju", r#"printf "boom" 1>&2; exit 5"#);
    let ws = Workspace::new(root.path().join("ws"))
        .unwrap()
        .with_juju_bin(juju);

    let res = ws.remove_model("m").unwrap();
    assert_eq!(res.exit_code, 5);
    assert_eq!(res.stderr, "boom");
}

#[test]
fn test_readiness_is_true_iff_exit_code_zero() {
    let root = tempfile::tempdir().unwrap();

    let ready = fake_tool(root.path(), "juju-ok", "printf noise; printf err 1>&2; exit 0");
    let ws = Workspace::new(root.path().join("ws1"))
        .unwrap()
        .with_juju_bin(ready);
    assert!(ws.is_k8s_ready());

    let not_ready = fake_tool(root.path(), "juju-bad", "exit 2");
    let ws = Workspace::new(root.path().join("ws2"))
        .unwrap()
        .with_juju_bin(not_ready);
    assert!(!ws.is_k8s_ready());

    // An unlaunchable tool is also "not ready" rather than an error.
    let ws = Workspace::new(root.path().join("ws3"))
        .unwrap()
        .with_juju_bin("no-such-tool-anywhere");
    assert!(!ws.is_k8s_ready());
}

#[test]
fn test_helm_archive_is_staged_under_release_name() {
    let root = tempfile::tempdir().unwrap();
    let helm = fake_tool(root.path(), "helm", r#"printf "helm: $*""#);
    let ws = Workspace::new(root.path().join("ws"))
        .unwrap()
        .with_helm_bin(helm);

    let res = ws.helm_install_archive("nginx", b"\x1f\x8b fake tgz").unwrap();

    assert_eq!(res.stdout, "helm: install nginx nginx.tgz");
    assert_eq!(
        fs::read(ws.dir().join("nginx.tgz")).unwrap(),
        b"\x1f\x8b fake tgz"
    );
}

#[test]
fn test_credential_flow_against_fake_tool() {
    let root = tempfile::tempdir().unwrap();
    let juju = fake_tool(root.path(), "juju", r#"printf "ok: $*"; exit 0"#);
    let ws = Workspace::new(root.path().join("ws"))
        .unwrap()
        .with_juju_bin(juju);

    let res = ws
        .add_credential("openstack", b"credentials:\n", "mycreds.yaml")
        .unwrap();
    assert_eq!(
        res.stdout,
        "ok: add-credential openstack -f mycreds.yaml --client"
    );
    assert_eq!(
        classify(&res, OperationKind::Credential),
        Outcome::Success("ok: add-credential openstack -f mycreds.yaml --client".to_string())
    );

    let res = ws.credential_detail("openstack", "admin").unwrap();
    assert_eq!(res.stdout, "ok: show-credential openstack admin");
}
