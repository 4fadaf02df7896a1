//! The workspace: an isolated working directory plus identity, composing
//! payload staging and process invocation into one method per resource
//! operation.
//!
//! Operations return the raw `ProcessResult` unmodified. Exit-code policy
//! lives in [`crate::classify`] so invocation semantics and classification
//! can evolve independently.

use std::collections::HashMap;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use tracing::{debug, info};
use uuid::Uuid;

use crate::error::{Result, WorkspaceError};
use juju_core::{run_command, ProcessResult};

/// Unit queried for cluster readiness and kubeconfig retrieval.
pub const K8S_CONTROL_PLANE_UNIT: &str = "kubernetes-control-plane/0";

/// Parameters for bootstrapping a controller on a cloud.
#[derive(Debug, Clone, Default)]
pub struct ControllerSpec {
    pub controller: String,
    pub region: String,
    pub image_id: String,
    pub os_series: String,
    pub constraints: String,
    pub network_id: String,
    pub metadata_path: String,
}

/// One workspace instance is constructed at startup and shared across
/// requests. All staged payloads land in its directory, and every command
/// runs with that directory as its cwd, so staged files are referenced by
/// bare filename and no command escapes the workspace.
pub struct Workspace {
    id: String,
    dir: PathBuf,
    juju_bin: String,
    helm_bin: String,
    timeout_secs: Option<u64>,
    // Stage-then-invoke runs as one critical section per staged filename,
    // otherwise two concurrent submissions to the same fixed-name manifest
    // could interleave and invocation N would consume payload N+1.
    stage_locks: Mutex<HashMap<String, Arc<Mutex<()>>>>,
}

impl Workspace {
    /// Create a workspace rooted at `dir`, creating the directory if needed.
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        let id = Uuid::new_v4().to_string();
        info!("Workspace {} rooted at {}", id, dir.display());

        Ok(Self {
            id,
            dir,
            juju_bin: "juju".to_string(),
            helm_bin: "helm".to_string(),
            timeout_secs: None,
            stage_locks: Mutex::new(HashMap::new()),
        })
    }

    pub fn with_juju_bin(mut self, bin: impl Into<String>) -> Self {
        self.juju_bin = bin.into();
        self
    }

    pub fn with_helm_bin(mut self, bin: impl Into<String>) -> Self {
        self.helm_bin = bin.into();
        self
    }

    /// Deadline applied to every invocation. `None` waits indefinitely.
    pub fn with_timeout(mut self, timeout_secs: Option<u64>) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    // ---- payload store ----

    /// Write `bytes` under `filename` in the workspace directory,
    /// overwriting any previous content (last write wins). The file is
    /// synced before this returns, so a payload is fully durable before any
    /// command that consumes it is launched.
    pub fn stage_payload(&self, bytes: &[u8], filename: &str) -> Result<PathBuf> {
        let lock = self.stage_lock(filename);
        let _guard = lock.lock().unwrap_or_else(|e| e.into_inner());
        self.write_payload(bytes, filename)
    }

    fn write_payload(&self, bytes: &[u8], filename: &str) -> Result<PathBuf> {
        let target = self.payload_target(filename)?;

        let write = |path: &Path| -> std::io::Result<()> {
            let mut file = File::create(path)?;
            file.write_all(bytes)?;
            file.sync_all()
        };

        write(&target).map_err(|source| WorkspaceError::Stage {
            filename: filename.to_string(),
            source,
        })?;

        debug!("{}: staged {} ({} bytes)", self.id, filename, bytes.len());
        Ok(target)
    }

    fn payload_target(&self, filename: &str) -> Result<PathBuf> {
        if filename.is_empty() || filename.contains(['/', '\\']) || filename.starts_with("..") {
            return Err(WorkspaceError::InvalidInput(format!(
                "payload filename must be a bare file name, got '{}'",
                filename
            )));
        }
        Ok(self.dir.join(filename))
    }

    fn stage_lock(&self, filename: &str) -> Arc<Mutex<()>> {
        let mut locks = self.stage_locks.lock().unwrap_or_else(|e| e.into_inner());
        // An entry is only needed while a stage-then-invoke holds a clone of
        // it; drop the idle ones so the registry does not grow with every
        // distinct filename ever staged.
        locks.retain(|_, lock| Arc::strong_count(lock) > 1);
        locks.entry(filename.to_string()).or_default().clone()
    }

    #[cfg(test)]
    fn stage_lock_count(&self) -> usize {
        self.stage_locks
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .len()
    }

    // ---- invocation ----

    fn juju(&self, args: &[&str]) -> Result<ProcessResult> {
        let args: Vec<String> = args.iter().map(|s| s.to_string()).collect();
        Ok(run_command(
            &self.juju_bin,
            &args,
            &self.dir,
            self.timeout_secs,
        )?)
    }

    fn helm(&self, args: &[&str]) -> Result<ProcessResult> {
        let args: Vec<String> = args.iter().map(|s| s.to_string()).collect();
        Ok(run_command(
            &self.helm_bin,
            &args,
            &self.dir,
            self.timeout_secs,
        )?)
    }

    /// Stage a payload and run juju with `args` without releasing the
    /// filename lock in between.
    fn stage_then_juju(
        &self,
        payload: &[u8],
        filename: &str,
        args: &[&str],
    ) -> Result<ProcessResult> {
        let lock = self.stage_lock(filename);
        let _guard = lock.lock().unwrap_or_else(|e| e.into_inner());
        self.write_payload(payload, filename)?;
        self.juju(args)
    }

    // ---- clouds ----

    pub fn add_cloud(&self, name: &str, payload: &[u8], filename: &str) -> Result<ProcessResult> {
        info!("{}: add-cloud {} from {}", self.id, name, filename);
        self.stage_then_juju(
            payload,
            filename,
            &["add-cloud", name, "-f", filename, "--client"],
        )
    }

    pub fn clouds(&self) -> Result<ProcessResult> {
        self.juju(&["clouds", "--client"])
    }

    pub fn cloud_detail(&self, name: &str) -> Result<ProcessResult> {
        self.juju(&["show-cloud", name])
    }

    pub fn remove_cloud(&self, name: &str) -> Result<ProcessResult> {
        self.juju(&["remove-cloud", name, "--client"])
    }

    // ---- credentials ----

    pub fn add_credential(
        &self,
        cloud: &str,
        payload: &[u8],
        filename: &str,
    ) -> Result<ProcessResult> {
        info!("{}: add-credential for {} from {}", self.id, cloud, filename);
        self.stage_then_juju(
            payload,
            filename,
            &["add-credential", cloud, "-f", filename, "--client"],
        )
    }

    pub fn credentials(&self) -> Result<ProcessResult> {
        self.juju(&["credentials", "--client"])
    }

    pub fn credential_detail(&self, cloud: &str, name: &str) -> Result<ProcessResult> {
        self.juju(&["show-credential", cloud, name])
    }

    pub fn update_credential(
        &self,
        cloud: &str,
        payload: &[u8],
        filename: &str,
    ) -> Result<ProcessResult> {
        self.stage_then_juju(
            payload,
            filename,
            &["update-credential", cloud, "-f", filename, "--client"],
        )
    }

    pub fn remove_credential(&self, cloud: &str, name: &str) -> Result<ProcessResult> {
        self.juju(&["remove-credential", cloud, name, "--client"])
    }

    // ---- metadata / controllers ----

    pub fn generate_metadata(
        &self,
        path: &str,
        image_id: &str,
        os_series: &str,
        region: &str,
        os_auth_url: &str,
    ) -> Result<ProcessResult> {
        self.juju(&[
            "metadata",
            "generate-image",
            "-d",
            path,
            "-i",
            image_id,
            "-s",
            os_series,
            "-r",
            region,
            "-u",
            os_auth_url,
        ])
    }

    pub fn add_controller(&self, cloud: &str, spec: &ControllerSpec) -> Result<ProcessResult> {
        let target = format!("{}/{}", cloud, spec.region);
        let network = format!("network={}", spec.network_id);
        info!("{}: bootstrap {} -> {}", self.id, target, spec.controller);
        self.juju(&[
            "bootstrap",
            &target,
            &spec.controller,
            "--bootstrap-image",
            &spec.image_id,
            "--bootstrap-series",
            &spec.os_series,
            "--bootstrap-constraints",
            &spec.constraints,
            "--metadata-source",
            &spec.metadata_path,
            "--config",
            &network,
        ])
    }

    pub fn controllers(&self) -> Result<ProcessResult> {
        self.juju(&["controllers"])
    }

    pub fn controller_detail(&self, name: &str) -> Result<ProcessResult> {
        self.juju(&["show-controller", name])
    }

    pub fn remove_controller(&self, name: &str) -> Result<ProcessResult> {
        self.juju(&["destroy-controller", name, "--destroy-all-models", "--no-prompt"])
    }

    // ---- models ----

    pub fn add_model(&self, name: &str) -> Result<ProcessResult> {
        self.juju(&["add-model", name])
    }

    pub fn models(&self) -> Result<ProcessResult> {
        self.juju(&["models"])
    }

    pub fn model_detail(&self, name: &str) -> Result<ProcessResult> {
        self.juju(&["show-model", name])
    }

    pub fn remove_model(&self, name: &str) -> Result<ProcessResult> {
        self.juju(&["destroy-model", name, "--no-prompt"])
    }

    // ---- applications ----

    pub fn deploy_application(&self, charm: &str, name: &str) -> Result<ProcessResult> {
        self.juju(&["deploy", charm, name])
    }

    pub fn application_detail(&self, name: &str) -> Result<ProcessResult> {
        self.juju(&["show-application", name])
    }

    pub fn remove_application(&self, name: &str) -> Result<ProcessResult> {
        self.juju(&["remove-application", name, "--no-prompt"])
    }

    // ---- cluster ----

    pub fn status(&self) -> Result<ProcessResult> {
        self.juju(&["status"])
    }

    /// True iff the readiness probe exits with code 0. Spawn failures,
    /// signals and timeouts all count as not ready; stdout/stderr are never
    /// surfaced.
    pub fn is_k8s_ready(&self) -> bool {
        matches!(
            self.juju(&["ssh", K8S_CONTROL_PLANE_UNIT, "--", "kubectl", "get", "nodes"]),
            Ok(res) if res.exit_code == 0
        )
    }

    pub fn kube_config(&self, unit: &str) -> Result<ProcessResult> {
        self.juju(&["ssh", unit, "--", "cat", "~/config"])
    }

    // ---- charts ----

    pub fn helm_install(&self, release: &str, filename: &str) -> Result<ProcessResult> {
        self.helm(&["install", release, filename])
    }

    /// Stage a chart archive as `<release>.tgz` and install it in one
    /// critical section.
    pub fn helm_install_archive(&self, release: &str, payload: &[u8]) -> Result<ProcessResult> {
        let filename = format!("{}.tgz", release);
        let lock = self.stage_lock(&filename);
        let _guard = lock.lock().unwrap_or_else(|e| e.into_inner());
        self.write_payload(payload, &filename)?;
        self.helm(&["install", release, &filename])
    }

    pub fn helm_list(&self) -> Result<ProcessResult> {
        self.helm(&["list"])
    }

    pub fn helm_uninstall(&self, release: &str) -> Result<ProcessResult> {
        self.helm(&["uninstall", release])
    }

    // ---- raw ----

    /// Run an arbitrary whitespace-separated command line inside the
    /// workspace directory. The first token is the program.
    pub fn raw(&self, command_line: &str) -> Result<ProcessResult> {
        let mut tokens = command_line.split_whitespace();
        let program = tokens
            .next()
            .ok_or_else(|| WorkspaceError::InvalidInput("empty command".to_string()))?;
        let args: Vec<String> = tokens.map(String::from).collect();
        info!("{}: raw command {}", self.id, program);
        Ok(run_command(program, &args, &self.dir, self.timeout_secs)?)
    }
}
