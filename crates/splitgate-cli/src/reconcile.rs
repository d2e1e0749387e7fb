use splitgate_common::{
    DeploymentUpdate, EndpointTarget, ReconcileReport, TrafficKind, TrafficSpec, TrafficWeight,
    UpdateOutcome,
};
use splitgate_gateway::{CommandGateway, Invocation};
use uuid::Uuid;

use crate::output::Progress;

/// Apply every entry of `spec`, mirror entries first.
///
/// Each entry gets exactly one gateway call. A failed update is recorded and
/// the loop moves on; nothing already applied is undone.
pub async fn reconcile(
    gateway: &dyn CommandGateway,
    target: &EndpointTarget,
    spec: &TrafficSpec,
    run_id: Uuid,
    progress: &Progress,
) -> ReconcileReport {
    let mut report = ReconcileReport::new(run_id);
    tracing::info!(planned = spec.update_count(), "applying traffic specification");

    match spec.mirror() {
        Some(entries) => {
            for (deployment, weight) in entries {
                let update = apply(
                    gateway,
                    target,
                    TrafficKind::Mirror,
                    deployment,
                    weight,
                    progress,
                )
                .await;
                report.record(update);
            }
        }
        None => progress.step("No mirror traffic specified."),
    }

    for (deployment, weight) in spec.production() {
        let update = apply(
            gateway,
            target,
            TrafficKind::Production,
            deployment,
            weight,
            progress,
        )
        .await;
        report.record(update);
    }

    report.finish();
    tracing::info!(
        attempted = report.updates.len(),
        succeeded = report.succeeded_count(),
        "traffic reconciliation finished"
    );
    report
}

async fn apply(
    gateway: &dyn CommandGateway,
    target: &EndpointTarget,
    kind: TrafficKind,
    deployment: &str,
    weight: &TrafficWeight,
    progress: &Progress,
) -> DeploymentUpdate {
    let subject = match kind {
        TrafficKind::Mirror => format!("Mirror traffic for '{deployment}'"),
        TrafficKind::Production => format!("Traffic for deployment '{deployment}'"),
    };
    progress.step(format!(
        "Updating deployment '{deployment}' with {} traffic '{weight}%'...",
        kind.label()
    ));

    let invocation = Invocation::UpdateTraffic {
        target: target.clone(),
        kind,
        deployment: deployment.to_string(),
        weight: weight.clone(),
    };
    let out = gateway.run(&invocation).await;

    let outcome = if out.succeeded {
        tracing::debug!(%invocation, stdout = %out.stdout.trim(), "traffic update applied");
        progress.ok(format!("{subject} updated successfully."));
        UpdateOutcome::Updated
    } else {
        let error = out.failure_detail();
        tracing::warn!(%invocation, stderr = %error, "traffic update failed");
        progress.fail(format!("{subject} update failed. Error: {error}"));
        UpdateOutcome::UpdateFailed {
            deployment: deployment.to_string(),
            error,
        }
    };

    DeploymentUpdate {
        kind,
        deployment: deployment.to_string(),
        weight: weight.clone(),
        outcome,
    }
}
