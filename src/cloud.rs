//! Cloud provider session context.

use std::sync::Arc;

use crate::hcloud::CloudApi;

/// The active provider session: the remote client plus the name of the node
/// this process manages.
#[derive(Clone)]
pub struct Cloud {
    client: Arc<dyn CloudApi>,
    node_name: String,
}

impl Cloud {
    pub fn new(client: Arc<dyn CloudApi>, node_name: impl Into<String>) -> Self {
        Self {
            client,
            node_name: node_name.into(),
        }
    }

    pub fn client(&self) -> &dyn CloudApi {
        self.client.as_ref()
    }

    /// Name of the current node, which is also the name of its server.
    pub fn node_name(&self) -> &str {
        &self.node_name
    }
}

impl std::fmt::Debug for Cloud {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Cloud")
            .field("node_name", &self.node_name)
            .finish_non_exhaustive()
    }
}
