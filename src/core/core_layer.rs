// The core module contains all moderation and fraud-triage logic.
// Each concern gets its own submodule; none of them know about Discord.

#[path = "risk/risk_scoring.rs"]
pub mod risk;

#[path = "campaigns/mod.rs"]
pub mod campaigns;

#[path = "alerts/mod.rs"]
pub mod alerts;

#[path = "moderation/mod.rs"]
pub mod moderation;

#[path = "reporting/reporting_service.rs"]
pub mod reporting;
