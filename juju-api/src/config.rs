use serde::Deserialize;
use std::path::PathBuf;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,

    #[serde(default = "default_workspace_dir")]
    pub workspace_dir: PathBuf,

    #[serde(default = "default_juju_bin")]
    pub juju_bin: String,

    #[serde(default = "default_helm_bin")]
    pub helm_bin: String,

    /// Deadline for every tool invocation, in seconds. `None` waits forever.
    #[serde(default = "default_command_timeout")]
    pub command_timeout_secs: Option<u64>,
}

fn default_bind_addr() -> String {
    std::env::var("JUJU_API_BIND").unwrap_or_else(|_| "0.0.0.0:3133".to_string())
}

fn default_workspace_dir() -> PathBuf {
    if let Ok(path) = std::env::var("JUJU_API_WORKSPACE_DIR") {
        return PathBuf::from(path);
    }

    let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
    PathBuf::from(home).join(".juju-api").join("workspace")
}

fn default_juju_bin() -> String {
    std::env::var("JUJU_API_JUJU_BIN").unwrap_or_else(|_| "juju".to_string())
}

fn default_helm_bin() -> String {
    std::env::var("JUJU_API_HELM_BIN").unwrap_or_else(|_| "helm".to_string())
}

fn default_command_timeout() -> Option<u64> {
    // JUJU_API_COMMAND_TIMEOUT=0 disables the deadline entirely.
    match std::env::var("JUJU_API_COMMAND_TIMEOUT")
        .ok()
        .and_then(|s| s.parse::<u64>().ok())
    {
        Some(0) => None,
        Some(secs) => Some(secs),
        None => Some(600), // 10 minutes; bootstrap is the slowest operation
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_addr: default_bind_addr(),
            workspace_dir: default_workspace_dir(),
            juju_bin: default_juju_bin(),
            helm_bin: default_helm_bin(),
            command_timeout_secs: default_command_timeout(),
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self::default()
    }
}
