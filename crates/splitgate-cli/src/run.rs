use splitgate_common::{ReconcileReport, SplitgateResult};
use splitgate_gateway::CommandGateway;
use tracing::Instrument;
use uuid::Uuid;

use crate::config::RunConfig;
use crate::output::Progress;
use crate::reconcile::reconcile;
use crate::verify::verify_chain;

/// Gate on the existence chain, then reconcile traffic.
///
/// Only a gate failure is returned as an error; failed deployment updates
/// live in the report.
pub async fn run(
    gateway: &dyn CommandGateway,
    config: &RunConfig,
    run_id: Uuid,
    progress: &Progress,
) -> SplitgateResult<ReconcileReport> {
    let span = tracing::info_span!("splitgate_run", %run_id, target = %config.target);
    async move {
        verify_chain(gateway, &config.target, progress).await?;
        Ok(reconcile(gateway, &config.target, &config.traffic, run_id, progress).await)
    }
    .instrument(span)
    .await
}

#[cfg(test)]
mod tests {
    use splitgate_common::{SplitgateError, TrafficKind, UpdateOutcome};
    use splitgate_gateway::{Invocation, ScriptedGateway};

    use super::*;

    fn config(traffic: &str) -> RunConfig {
        RunConfig::new(Some("ep1"), Some("rg1"), Some("ws1"), Some(traffic)).unwrap()
    }

    #[tokio::test]
    async fn test_single_blue_deployment() {
        let gateway = ScriptedGateway::new();
        let progress = Progress::captured();
        let report = run(&gateway, &config(r#"{"blue":100}"#), Uuid::new_v4(), &progress)
            .await
            .unwrap();

        let mutations = gateway.mutations().await;
        assert_eq!(mutations.len(), 1);
        match &mutations[0] {
            Invocation::UpdateTraffic {
                kind,
                deployment,
                weight,
                target,
            } => {
                assert_eq!(*kind, TrafficKind::Production);
                assert_eq!(deployment, "blue");
                assert_eq!(weight.as_str(), "100");
                assert_eq!(target.endpoint_name, "ep1");
            }
            other => panic!("unexpected invocation {other:?}"),
        }
        assert!(report.all_succeeded());
        assert!(progress
            .lines()
            .contains(&"🔹 No mirror traffic specified.".to_string()));
    }

    #[tokio::test]
    async fn test_mirror_and_production_scenario() {
        let gateway = ScriptedGateway::new();
        let report = run(
            &gateway,
            &config(r#"{"mirror":{"shadow":10},"blue":90,"green":10}"#),
            Uuid::new_v4(),
            &Progress::captured(),
        )
        .await
        .unwrap();

        let order: Vec<(TrafficKind, &str)> = report
            .updates
            .iter()
            .map(|u| (u.kind, u.deployment.as_str()))
            .collect();
        assert_eq!(
            order,
            vec![
                (TrafficKind::Mirror, "shadow"),
                (TrafficKind::Production, "blue"),
                (TrafficKind::Production, "green"),
            ]
        );
        // three existence checks, then three updates
        assert_eq!(gateway.invocations().await.len(), 6);
    }

    #[tokio::test]
    async fn test_gate_failures_never_mutate() {
        let failing: [fn(&Invocation) -> bool; 3] = [
            |i| matches!(i, Invocation::ResourceGroupShow { .. }),
            |i| matches!(i, Invocation::WorkspaceShow { .. }),
            |i| matches!(i, Invocation::EndpointShow { .. }),
        ];
        for matcher in failing {
            let gateway = ScriptedGateway::new().fail_when(matcher, "not found");
            let traffic = config(r#"{"mirror":{"s":1},"blue":99}"#);
            let err = run(&gateway, &traffic, Uuid::new_v4(), &Progress::captured())
                .await
                .unwrap_err();
            assert!(matches!(err, SplitgateError::Gate(_)));
            assert!(gateway.mutations().await.is_empty());
        }
    }

    #[tokio::test]
    async fn test_partial_failure_is_still_success() {
        let gateway = ScriptedGateway::new().fail_deployment("green", "bad deployment");
        let traffic = config(r#"{"blue":50,"green":50}"#);
        let report = run(&gateway, &traffic, Uuid::new_v4(), &Progress::captured())
            .await
            .unwrap();

        assert_eq!(gateway.mutations().await.len(), 2);
        let failed: Vec<&UpdateOutcome> = report.failures().map(|u| &u.outcome).collect();
        assert_eq!(failed.len(), 1);
        assert!(matches!(
            failed[0],
            UpdateOutcome::UpdateFailed { deployment, .. } if deployment == "green"
        ));
    }
}
