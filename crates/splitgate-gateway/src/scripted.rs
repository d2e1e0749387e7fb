use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::types::{CommandGateway, CommandOutput, Invocation};

type Matcher = Arc<dyn Fn(&Invocation) -> bool + Send + Sync>;

#[derive(Clone)]
struct Rule {
    matches: Matcher,
    output: CommandOutput,
}

/// In-process gateway that answers from a script and records every call.
///
/// Invocations succeed with empty output unless a rule registered with
/// [`ScriptedGateway::respond`] matches; the first matching rule wins.
#[derive(Clone, Default)]
pub struct ScriptedGateway {
    rules: Vec<Rule>,
    calls: Arc<Mutex<Vec<Invocation>>>,
}

impl ScriptedGateway {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond<F>(mut self, matches: F, output: CommandOutput) -> Self
    where
        F: Fn(&Invocation) -> bool + Send + Sync + 'static,
    {
        self.rules.push(Rule {
            matches: Arc::new(matches),
            output,
        });
        self
    }

    /// Fail every invocation accepted by `matches` with `stderr`.
    pub fn fail_when<F>(self, matches: F, stderr: &str) -> Self
    where
        F: Fn(&Invocation) -> bool + Send + Sync + 'static,
    {
        self.respond(matches, CommandOutput::failure(stderr))
    }

    /// Fail traffic updates naming `deployment`.
    pub fn fail_deployment(self, deployment: &str, stderr: &str) -> Self {
        let deployment = deployment.to_string();
        self.fail_when(
            move |inv| inv.deployment() == Some(deployment.as_str()),
            stderr,
        )
    }

    /// Invocations received so far, in call order.
    pub async fn invocations(&self) -> Vec<Invocation> {
        self.calls.lock().await.clone()
    }

    pub async fn mutations(&self) -> Vec<Invocation> {
        self.calls
            .lock()
            .await
            .iter()
            .filter(|inv| inv.is_mutation())
            .cloned()
            .collect()
    }
}

#[async_trait]
impl CommandGateway for ScriptedGateway {
    async fn run(&self, invocation: &Invocation) -> CommandOutput {
        self.calls.lock().await.push(invocation.clone());
        self.rules
            .iter()
            .find(|rule| (rule.matches)(invocation))
            .map(|rule| rule.output.clone())
            .unwrap_or_else(|| CommandOutput::success("{}"))
    }
}
