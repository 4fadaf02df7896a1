use anyhow::Result;
use juju_api::{create_app, Config};
use juju_core::is_tool_installed;
use juju_workspace::Workspace;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter("juju_api=debug,juju_workspace=debug,tower_http=debug")
        .init();

    info!("Starting juju-api service...");

    let config = Config::from_env();
    info!(
        "Configuration loaded: bind_addr={}, workspace_dir={}",
        config.bind_addr,
        config.workspace_dir.display()
    );

    for tool in [config.juju_bin.as_str(), config.helm_bin.as_str()] {
        if !is_tool_installed(tool) {
            warn!("'{}' not found on PATH; operations that use it will fail", tool);
        }
    }

    let workspace = Workspace::new(&config.workspace_dir)?
        .with_juju_bin(config.juju_bin.clone())
        .with_helm_bin(config.helm_bin.clone())
        .with_timeout(config.command_timeout_secs);
    info!("Workspace {} ready", workspace.id());

    let app = create_app(workspace);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    info!("Listening on http://{}", config.bind_addr);

    axum::serve(listener, app).await?;

    Ok(())
}
