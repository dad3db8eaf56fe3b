// Discord layer - slash commands and embeds for the staff moderation surface.

#[path = "commands/command_catalog.rs"]
pub mod commands;

#[path = "embeds/moderation_embeds.rs"]
pub mod embeds;

use crate::core::moderation::ModerationCoordinator;
use crate::infra::alerts::InMemoryAlertStore;
use crate::infra::campaigns::InMemoryCampaignStore;
use crate::infra::snapshot::JsonSnapshotStore;
use std::sync::Arc;

pub type Coordinator = ModerationCoordinator<InMemoryCampaignStore, InMemoryAlertStore>;

/// Shared state handed to every command.
pub struct Data {
    pub moderation: Arc<Coordinator>,
    pub snapshots: Arc<JsonSnapshotStore>,
}

pub type Error = Box<dyn std::error::Error + Send + Sync>;
pub type Context<'a> = poise::Context<'a, Data, Error>;

/// Staff identity recorded on every moderation action.
pub fn actor(ctx: Context<'_>) -> String {
    let author = ctx.author();
    format!("{} ({})", author.name, author.id)
}
