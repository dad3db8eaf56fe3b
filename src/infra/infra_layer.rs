// The infra module contains implementations of core traits.
// Each feature implementation goes in its own submodule.

#[path = "campaigns/mod.rs"]
pub mod campaigns;

#[path = "alerts/mod.rs"]
pub mod alerts;

#[path = "snapshot/mod.rs"]
pub mod snapshot;
