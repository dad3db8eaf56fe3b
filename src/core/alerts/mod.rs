// Fraud alert registry: alerts raised by the detection pipeline and their
// triage state.

pub mod alert_models;
pub mod alert_registry;

pub use alert_models::*;
pub use alert_registry::{AlertRegistry, AlertStore};
