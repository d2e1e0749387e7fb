use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::traffic::TrafficWeight;

/// Which traffic split an update touches.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum TrafficKind {
    Mirror,
    Production,
}

impl TrafficKind {
    pub fn label(self) -> &'static str {
        match self {
            TrafficKind::Mirror => "mirror",
            TrafficKind::Production => "production",
        }
    }
}

/// Result of a single deployment traffic update.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum UpdateOutcome {
    Updated,
    UpdateFailed { deployment: String, error: String },
}

impl UpdateOutcome {
    pub fn is_updated(&self) -> bool {
        matches!(self, UpdateOutcome::Updated)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DeploymentUpdate {
    pub kind: TrafficKind,
    pub deployment: String,
    pub weight: TrafficWeight,
    pub outcome: UpdateOutcome,
}

/// Everything the reconciler attempted, in the order it attempted it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReconcileReport {
    pub run_id: Uuid,
    pub started_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub finished_at: Option<DateTime<Utc>>,
    pub updates: Vec<DeploymentUpdate>,
}

impl ReconcileReport {
    pub fn new(run_id: Uuid) -> Self {
        Self {
            run_id,
            started_at: Utc::now(),
            finished_at: None,
            updates: Vec::new(),
        }
    }

    pub fn record(&mut self, update: DeploymentUpdate) {
        self.updates.push(update);
    }

    pub fn finish(&mut self) {
        self.finished_at = Some(Utc::now());
    }

    pub fn failures(&self) -> impl Iterator<Item = &DeploymentUpdate> {
        self.updates.iter().filter(|u| !u.outcome.is_updated())
    }

    pub fn succeeded_count(&self) -> usize {
        self.updates.iter().filter(|u| u.outcome.is_updated()).count()
    }

    pub fn all_succeeded(&self) -> bool {
        self.failures().next().is_none()
    }
}
