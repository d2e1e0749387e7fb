use thiserror::Error;

/// A missing link in the resource group → workspace → endpoint chain.
///
/// `detail` carries whatever the control plane wrote to stderr.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum GateFailure {
    #[error("Resource group '{resource_group}' does not exist.")]
    ResourceGroupMissing {
        resource_group: String,
        detail: String,
    },

    #[error("Workspace '{workspace_name}' does not exist in resource group '{resource_group}'.")]
    WorkspaceMissing {
        resource_group: String,
        workspace_name: String,
        detail: String,
    },

    #[error("Endpoint '{endpoint_name}' does not exist in resource group '{resource_group}' and workspace '{workspace_name}'.")]
    EndpointMissing {
        resource_group: String,
        workspace_name: String,
        endpoint_name: String,
        detail: String,
    },
}

impl GateFailure {
    pub fn detail(&self) -> &str {
        match self {
            GateFailure::ResourceGroupMissing { detail, .. }
            | GateFailure::WorkspaceMissing { detail, .. }
            | GateFailure::EndpointMissing { detail, .. } => detail,
        }
    }
}

/// Errors that end a run before any traffic is moved.
#[derive(Debug, Error)]
pub enum SplitgateError {
    #[error("{0} is required.")]
    MissingInput(&'static str),

    #[error("traffic specification is not a JSON object: {0}")]
    MalformedTrafficSpec(String),

    #[error(transparent)]
    Gate(#[from] GateFailure),
}

pub type SplitgateResult<T> = Result<T, SplitgateError>;
