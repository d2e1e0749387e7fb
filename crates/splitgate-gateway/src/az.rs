use std::process::Stdio;

use async_trait::async_trait;
use splitgate_common::{EndpointTarget, TrafficKind};
use tokio::process::Command;

use crate::types::{CommandGateway, CommandOutput, Invocation};

/// Runs invocations through the Azure CLI (`az ml ...`).
#[derive(Debug, Clone)]
pub struct AzCliGateway {
    program: String,
}

impl AzCliGateway {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    pub fn program(&self) -> &str {
        &self.program
    }
}

impl Default for AzCliGateway {
    fn default() -> Self {
        Self::new("az")
    }
}

fn endpoint_args(target: &EndpointTarget) -> Vec<String> {
    vec![
        "--name".to_string(),
        target.endpoint_name.clone(),
        "--resource-group".to_string(),
        target.resource_group.clone(),
        "--workspace-name".to_string(),
        target.workspace_name.clone(),
    ]
}

/// Arguments (without the program name) for an invocation.
pub fn command_args(invocation: &Invocation) -> Vec<String> {
    match invocation {
        Invocation::ResourceGroupShow { resource_group } => {
            let mut args: Vec<String> = ["group", "show", "--name"].map(String::from).into();
            args.push(resource_group.clone());
            args
        }
        Invocation::WorkspaceShow {
            resource_group,
            workspace_name,
        } => {
            let mut args: Vec<String> = ["ml", "workspace", "show", "--name"].map(String::from).into();
            args.push(workspace_name.clone());
            args.push("--resource-group".to_string());
            args.push(resource_group.clone());
            args
        }
        Invocation::EndpointShow { target } => {
            let mut args: Vec<String> = ["ml", "online-endpoint", "show"].map(String::from).into();
            args.extend(endpoint_args(target));
            args
        }
        Invocation::UpdateTraffic {
            target,
            kind,
            deployment,
            weight,
        } => {
            let mut args: Vec<String> = ["ml", "online-endpoint", "update"].map(String::from).into();
            args.extend(endpoint_args(target));
            let flag = match kind {
                TrafficKind::Mirror => "--mirror-traffic",
                TrafficKind::Production => "--traffic",
            };
            args.push(flag.to_string());
            args.push(format!("{deployment}={weight}"));
            args
        }
    }
}

#[async_trait]
impl CommandGateway for AzCliGateway {
    async fn run(&self, invocation: &Invocation) -> CommandOutput {
        let args = command_args(invocation);
        tracing::debug!(program = %self.program, args = ?args, "running control-plane command");

        let output = Command::new(&self.program)
            .args(&args)
            .stdin(Stdio::null())
            .output()
            .await;

        match output {
            Ok(o) => CommandOutput {
                succeeded: o.status.success(),
                stdout: String::from_utf8_lossy(&o.stdout).into_owned(),
                stderr: String::from_utf8_lossy(&o.stderr).into_owned(),
            },
            Err(e) => {
                tracing::warn!(program = %self.program, error = %e, "failed to spawn control-plane command");
                CommandOutput::failure(format!("failed to run '{}': {e}", self.program))
            }
        }
    }
}
