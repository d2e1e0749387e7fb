use clap::{Parser, ValueEnum};

#[derive(Debug, Parser)]
#[command(name = "splitgate")]
#[command(
    about = "Verify an online endpoint exists and apply a deployment traffic split",
    long_about = None
)]
pub struct Args {
    /// Online endpoint whose traffic is reallocated
    #[arg(long, env = "INPUT_ENDPOINT_NAME")]
    pub endpoint_name: Option<String>,

    /// Resource group holding the workspace
    #[arg(long, env = "INPUT_RESOURCE_GROUP")]
    pub resource_group: Option<String>,

    /// Machine learning workspace holding the endpoint
    #[arg(long, env = "INPUT_WORKSPACE_NAME")]
    pub workspace_name: Option<String>,

    /// Traffic split as JSON, e.g. '{"mirror":{"shadow":10},"blue":90,"green":10}'
    #[arg(long, env = "INPUT_TRAFFIC")]
    pub traffic: Option<String>,

    /// Azure CLI executable
    #[arg(long, env = "SPLITGATE_AZ_BIN", default_value = "az")]
    pub az_bin: String,

    /// How to print the final report
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// OTLP/HTTP endpoint for trace export
    #[arg(long, env = "SPLITGATE_OTLP_ENDPOINT")]
    pub otlp_endpoint: Option<String>,

    /// Bearer token for the OTLP endpoint
    #[arg(long, env = "SPLITGATE_OTLP_TOKEN")]
    pub otlp_token: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flags_parse() {
        let args = Args::try_parse_from([
            "splitgate",
            "--endpoint-name",
            "ep1",
            "--resource-group",
            "rg1",
            "--workspace-name",
            "ws1",
            "--traffic",
            r#"{"blue":100}"#,
            "--format",
            "json",
        ])
        .unwrap();
        assert_eq!(args.endpoint_name.as_deref(), Some("ep1"));
        assert_eq!(args.traffic.as_deref(), Some(r#"{"blue":100}"#));
        assert_eq!(args.format, OutputFormat::Json);
    }
}
