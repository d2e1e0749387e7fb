pub mod error;
pub mod report;
pub mod target;
pub mod traffic;

pub use error::{GateFailure, SplitgateError, SplitgateResult};
pub use report::{DeploymentUpdate, ReconcileReport, TrafficKind, UpdateOutcome};
pub use target::EndpointTarget;
pub use traffic::{TrafficSpec, TrafficWeight, MIRROR_KEY};

pub mod telemetry;
