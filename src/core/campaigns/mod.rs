// Campaign registry: records, moderation status and queue queries.

pub mod campaign_models;
pub mod campaign_registry;

pub use campaign_models::*;
pub use campaign_registry::{CampaignRegistry, CampaignStore};
