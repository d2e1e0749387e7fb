pub mod az;
pub mod scripted;
pub mod types;

pub use az::AzCliGateway;
pub use scripted::ScriptedGateway;
pub use types::{CommandGateway, CommandOutput, Invocation};
