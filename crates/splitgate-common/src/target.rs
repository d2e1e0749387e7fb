use std::fmt;

use serde::{Deserialize, Serialize};

/// Coordinates of a managed online endpoint.
///
/// The three names form a containment chain: the workspace lives in the
/// resource group and the endpoint lives in the workspace.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct EndpointTarget {
    pub resource_group: String,
    pub workspace_name: String,
    pub endpoint_name: String,
}

impl EndpointTarget {
    pub fn new(
        resource_group: impl Into<String>,
        workspace_name: impl Into<String>,
        endpoint_name: impl Into<String>,
    ) -> Self {
        Self {
            resource_group: resource_group.into(),
            workspace_name: workspace_name.into(),
            endpoint_name: endpoint_name.into(),
        }
    }
}

impl fmt::Display for EndpointTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}/{}/{}",
            self.resource_group, self.workspace_name, self.endpoint_name
        )
    }
}
