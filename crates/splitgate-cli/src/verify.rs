use splitgate_common::{EndpointTarget, GateFailure};
use splitgate_gateway::{CommandGateway, Invocation};

use crate::output::Progress;

/// Run one existence query; `Err` carries the control plane's explanation.
async fn probe(gateway: &dyn CommandGateway, invocation: Invocation) -> Result<(), String> {
    let out = gateway.run(&invocation).await;
    if out.succeeded {
        tracing::debug!(%invocation, stdout = %out.stdout.trim(), "existence check passed");
        Ok(())
    } else {
        let detail = out.failure_detail();
        tracing::warn!(%invocation, stderr = %detail, "existence check failed");
        Err(detail)
    }
}

/// Check resource group, then workspace, then endpoint.
///
/// Stops at the first missing resource; later checks are never issued.
pub async fn verify_chain(
    gateway: &dyn CommandGateway,
    target: &EndpointTarget,
    progress: &Progress,
) -> Result<(), GateFailure> {
    let EndpointTarget {
        resource_group,
        workspace_name,
        endpoint_name,
    } = target;

    progress.step(format!("Checking if resource group '{resource_group}' exists..."));
    probe(
        gateway,
        Invocation::ResourceGroupShow {
            resource_group: resource_group.clone(),
        },
    )
    .await
    .map_err(|detail| {
        progress.fail(format!("Resource group not found or error occurred: {detail}"));
        GateFailure::ResourceGroupMissing {
            resource_group: resource_group.clone(),
            detail,
        }
    })?;
    progress.ok(format!("Resource group '{resource_group}' exists."));

    progress.step(format!(
        "Checking if workspace '{workspace_name}' exists in resource group '{resource_group}'..."
    ));
    probe(
        gateway,
        Invocation::WorkspaceShow {
            resource_group: resource_group.clone(),
            workspace_name: workspace_name.clone(),
        },
    )
    .await
    .map_err(|detail| {
        progress.fail(format!("Workspace not found or error occurred: {detail}"));
        GateFailure::WorkspaceMissing {
            resource_group: resource_group.clone(),
            workspace_name: workspace_name.clone(),
            detail,
        }
    })?;
    progress.ok(format!(
        "Workspace '{workspace_name}' exists in resource group '{resource_group}'."
    ));

    progress.step(format!("Checking if endpoint '{endpoint_name}' exists..."));
    probe(
        gateway,
        Invocation::EndpointShow {
            target: target.clone(),
        },
    )
    .await
    .map_err(|detail| {
        progress.fail(format!("Endpoint not found or error occurred: {detail}"));
        GateFailure::EndpointMissing {
            resource_group: resource_group.clone(),
            workspace_name: workspace_name.clone(),
            endpoint_name: endpoint_name.clone(),
            detail,
        }
    })?;
    progress.ok(format!(
        "Endpoint '{endpoint_name}' exists in resource group '{resource_group}' and workspace '{workspace_name}'."
    ));

    Ok(())
}

#[cfg(test)]
mod tests {
    use splitgate_gateway::ScriptedGateway;

    use super::*;

    fn target() -> EndpointTarget {
        EndpointTarget::new("rg1", "ws1", "ep1")
    }

    fn is_rg(inv: &Invocation) -> bool {
        matches!(inv, Invocation::ResourceGroupShow { .. })
    }

    fn is_ws(inv: &Invocation) -> bool {
        matches!(inv, Invocation::WorkspaceShow { .. })
    }

    fn is_ep(inv: &Invocation) -> bool {
        matches!(inv, Invocation::EndpointShow { .. })
    }

    #[tokio::test]
    async fn test_all_present() {
        let gateway = ScriptedGateway::new();
        verify_chain(&gateway, &target(), &Progress::captured()).await.unwrap();

        let calls = gateway.invocations().await;
        assert_eq!(calls.len(), 3);
        assert!(is_rg(&calls[0]));
        assert!(is_ws(&calls[1]));
        assert!(is_ep(&calls[2]));
    }

    #[tokio::test]
    async fn test_missing_resource_group_stops_chain() {
        let gateway = ScriptedGateway::new().fail_when(is_rg, "ResourceGroupNotFound");
        let err = verify_chain(&gateway, &target(), &Progress::captured()).await.unwrap_err();

        assert_eq!(
            err,
            GateFailure::ResourceGroupMissing {
                resource_group: "rg1".to_string(),
                detail: "ResourceGroupNotFound".to_string(),
            }
        );
        assert_eq!(gateway.invocations().await.len(), 1);
    }

    #[tokio::test]
    async fn test_progress_reports_each_link() {
        let gateway = ScriptedGateway::new().fail_when(is_ep, "EndpointNotFound");
        let progress = Progress::captured();
        verify_chain(&gateway, &target(), &progress).await.unwrap_err();

        assert_eq!(
            progress.lines(),
            vec![
                "🔹 Checking if resource group 'rg1' exists...",
                "✅ Resource group 'rg1' exists.",
                "🔹 Checking if workspace 'ws1' exists in resource group 'rg1'...",
                "✅ Workspace 'ws1' exists in resource group 'rg1'.",
                "🔹 Checking if endpoint 'ep1' exists...",
                "❌ Endpoint not found or error occurred: EndpointNotFound",
            ]
        );
    }

    #[tokio::test]
    async fn test_missing_workspace_skips_endpoint_check() {
        let gateway = ScriptedGateway::new().fail_when(is_ws, "workspace not found");
        let err = verify_chain(&gateway, &target(), &Progress::captured()).await.unwrap_err();

        assert!(matches!(err, GateFailure::WorkspaceMissing { .. }));
        let calls = gateway.invocations().await;
        assert_eq!(calls.len(), 2);
        assert!(!calls.iter().any(is_ep));
    }

    #[tokio::test]
    async fn test_missing_endpoint() {
        let gateway = ScriptedGateway::new().fail_when(is_ep, "");
        let err = verify_chain(&gateway, &target(), &Progress::captured()).await.unwrap_err();

        assert_eq!(
            err.to_string(),
            "Endpoint 'ep1' does not exist in resource group 'rg1' and workspace 'ws1'."
        );
        assert_eq!(err.detail(), "command failed without output");
    }
}
