use std::sync::Arc;

use juju_workspace::Workspace;

#[derive(Clone)]
pub struct AppState {
    pub workspace: Arc<Workspace>,
}

impl AppState {
    pub fn new(workspace: Workspace) -> Self {
        Self {
            workspace: Arc::new(workspace),
        }
    }
}
