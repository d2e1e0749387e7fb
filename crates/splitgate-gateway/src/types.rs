use std::fmt;

use async_trait::async_trait;
use splitgate_common::{EndpointTarget, TrafficKind, TrafficWeight};

/// One control-plane call the core wants made.
///
/// How an invocation becomes a concrete command line is up to the gateway.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Invocation {
    ResourceGroupShow {
        resource_group: String,
    },
    WorkspaceShow {
        resource_group: String,
        workspace_name: String,
    },
    EndpointShow {
        target: EndpointTarget,
    },
    UpdateTraffic {
        target: EndpointTarget,
        kind: TrafficKind,
        deployment: String,
        weight: TrafficWeight,
    },
}

impl Invocation {
    pub fn is_mutation(&self) -> bool {
        matches!(self, Invocation::UpdateTraffic { .. })
    }

    /// Deployment named by a traffic update, if this is one.
    pub fn deployment(&self) -> Option<&str> {
        match self {
            Invocation::UpdateTraffic { deployment, .. } => Some(deployment),
            _ => None,
        }
    }
}

impl fmt::Display for Invocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Invocation::ResourceGroupShow { resource_group } => {
                write!(f, "show resource group {resource_group}")
            }
            Invocation::WorkspaceShow {
                resource_group,
                workspace_name,
            } => write!(f, "show workspace {resource_group}/{workspace_name}"),
            Invocation::EndpointShow { target } => write!(f, "show endpoint {target}"),
            Invocation::UpdateTraffic {
                target,
                kind,
                deployment,
                weight,
            } => write!(
                f,
                "update {} traffic {deployment}={weight} on {target}",
                kind.label()
            ),
        }
    }
}

/// Captured result of one control-plane call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    pub succeeded: bool,
    pub stdout: String,
    pub stderr: String,
}

impl CommandOutput {
    pub fn success(stdout: impl Into<String>) -> Self {
        Self {
            succeeded: true,
            stdout: stdout.into(),
            stderr: String::new(),
        }
    }

    pub fn failure(stderr: impl Into<String>) -> Self {
        Self {
            succeeded: false,
            stdout: String::new(),
            stderr: stderr.into(),
        }
    }

    /// Best available explanation for a failed call: stderr, then stdout.
    pub fn failure_detail(&self) -> String {
        let stderr = self.stderr.trim();
        if !stderr.is_empty() {
            return stderr.to_string();
        }
        let stdout = self.stdout.trim();
        if !stdout.is_empty() {
            return stdout.to_string();
        }
        "command failed without output".to_string()
    }
}

/// Executes control-plane calls.
///
/// Callers await each call before issuing the next; implementations need
/// not support cancellation. Failures are reported through
/// [`CommandOutput::succeeded`], never as an error.
#[async_trait]
pub trait CommandGateway: Send + Sync {
    async fn run(&self, invocation: &Invocation) -> CommandOutput;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failure_detail_prefers_stderr() {
        let out = CommandOutput {
            succeeded: false,
            stdout: "partial".to_string(),
            stderr: "  ERROR: not found\n".to_string(),
        };
        assert_eq!(out.failure_detail(), "ERROR: not found");

        let out = CommandOutput {
            succeeded: false,
            stdout: "only stdout\n".to_string(),
            stderr: String::new(),
        };
        assert_eq!(out.failure_detail(), "only stdout");

        assert_eq!(
            CommandOutput::failure("").failure_detail(),
            "command failed without output"
        );
    }

    #[test]
    fn test_display() {
        let inv = Invocation::UpdateTraffic {
            target: EndpointTarget::new("rg1", "ws1", "ep1"),
            kind: TrafficKind::Mirror,
            deployment: "shadow".to_string(),
            weight: TrafficWeight::new("10"),
        };
        assert_eq!(inv.to_string(), "update mirror traffic shadow=10 on rg1/ws1/ep1");
        assert!(inv.is_mutation());
        assert_eq!(inv.deployment(), Some("shadow"));
    }
}
