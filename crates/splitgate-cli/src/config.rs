use splitgate_common::{EndpointTarget, SplitgateError, SplitgateResult, TrafficSpec};

use crate::args::Args;

/// Validated inputs for one run.
///
/// Building a `RunConfig` checks that every required input is present and
/// that the traffic specification decodes, so a bad input never reaches the
/// control plane.
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub target: EndpointTarget,
    pub traffic: TrafficSpec,
}

impl RunConfig {
    pub fn new(
        endpoint_name: Option<&str>,
        resource_group: Option<&str>,
        workspace_name: Option<&str>,
        traffic: Option<&str>,
    ) -> SplitgateResult<Self> {
        let endpoint_name = required(endpoint_name, "Endpoint name")?;
        let resource_group = required(resource_group, "Resource group")?;
        let workspace_name = required(workspace_name, "Workspace name")?;
        let traffic = required(traffic, "Traffic")?;

        Ok(Self {
            target: EndpointTarget::new(resource_group, workspace_name, endpoint_name),
            traffic: TrafficSpec::parse(traffic)?,
        })
    }

    pub fn from_args(args: &Args) -> SplitgateResult<Self> {
        Self::new(
            args.endpoint_name.as_deref(),
            args.resource_group.as_deref(),
            args.workspace_name.as_deref(),
            args.traffic.as_deref(),
        )
    }
}

fn required<'a>(value: Option<&'a str>, field: &'static str) -> SplitgateResult<&'a str> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .ok_or(SplitgateError::MissingInput(field))
}
