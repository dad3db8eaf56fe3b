// This is the entry point of the campaign moderation bot.
//
// **Architecture Overview:**
// - `core/` = Moderation and fraud-triage logic (platform-agnostic)
// - `infra/` = Implementations of core traits (in-memory stores, JSON snapshots)
// - `discord/` = Discord-specific adapters (slash commands, embeds)
//
// This file's job is to:
// 1. Load configuration
// 2. Initialize services (dependency injection) and seed them
// 3. Set up the Discord framework
// 4. Register commands

// These attrs point each module declaration at a more descriptive root file
// so we don't end up with half a dozen mod.rs files that all look the same.
#[path = "core/core_layer.rs"]
mod core;
#[path = "discord/discord_layer.rs"]
mod discord;
#[path = "infra/infra_layer.rs"]
mod infra;

mod config;

use crate::config::AppConfig;
use crate::core::moderation::{
    CoordinatorPolicy, ModerationCoordinator, ModerationSnapshot, SnapshotStore,
};
use crate::discord::{Coordinator, Data, Error};
use crate::infra::alerts::InMemoryAlertStore;
use crate::infra::campaigns::InMemoryCampaignStore;
use crate::infra::snapshot::{demo_snapshot, JsonSnapshotStore};
use anyhow::Context as _;
use poise::serenity_prelude as serenity;
use std::sync::Arc;

/// Seed snapshot: the configured file if there is one, otherwise the demo set.
async fn load_seed(config: &AppConfig) -> anyhow::Result<ModerationSnapshot> {
    let Some(path) = &config.seed_file else {
        tracing::info!("No seed file configured, loading demo records");
        return Ok(demo_snapshot());
    };

    let snapshot = JsonSnapshotStore::new(path)
        .load()
        .await
        .with_context(|| format!("Failed to read seed file {}", path.display()))?;

    match snapshot {
        Some(snapshot) => Ok(snapshot),
        None => {
            tracing::warn!(path = %path.display(), "Seed file not found, loading demo records");
            Ok(demo_snapshot())
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging so we can see what's happening
    tracing_subscriber::fmt::init();

    // Load environment variables from .env file (if it exists)
    dotenv::dotenv().ok();

    let config = AppConfig::from_env()?;

    // ========================================================================
    // DEPENDENCY INJECTION
    // ========================================================================
    // This is the "composition root" where we wire everything together.

    let coordinator: Coordinator = ModerationCoordinator::new(
        InMemoryCampaignStore::new(),
        InMemoryAlertStore::new(),
        CoordinatorPolicy {
            require_actor: config.require_actor,
        },
    );

    let seed = load_seed(&config).await?;
    let restored = coordinator
        .restore(seed)
        .context("Seed data contains an invalid record")?;
    tracing::info!(
        campaigns = restored.campaigns,
        alerts = restored.alerts,
        "Moderation registries seeded"
    );

    let data = Data {
        moderation: Arc::new(coordinator),
        snapshots: Arc::new(JsonSnapshotStore::new(config.export_file.clone())),
    };

    // ========================================================================
    // DISCORD FRAMEWORK SETUP
    // ========================================================================

    // Slash commands only; no message content needed.
    let intents = serenity::GatewayIntents::GUILDS;
    let guild_id = config.guild_id;

    let framework = poise::Framework::builder()
        .options(poise::FrameworkOptions {
            commands: discord::commands::all(),
            pre_command: |ctx| {
                Box::pin(async move {
                    tracing::debug!(
                        command = %ctx.command().qualified_name,
                        user = %ctx.author().name,
                        "Running command"
                    );
                })
            },
            on_error: |error| {
                Box::pin(async move {
                    if let poise::FrameworkError::Command { error, ctx, .. } = &error {
                        tracing::error!(
                            command = %ctx.command().qualified_name,
                            "Command failed: {}",
                            error
                        );
                    }
                    if let Err(e) = poise::builtins::on_error(error).await {
                        tracing::error!("Error while handling error: {}", e);
                    }
                })
            },
            ..Default::default()
        })
        .setup(move |ctx, _ready, framework| {
            Box::pin(async move {
                tracing::info!("Bot is starting up...");

                match guild_id {
                    // Guild registration is instant; global can take up to an hour.
                    Some(guild_id) => {
                        poise::builtins::register_in_guild(
                            ctx,
                            &framework.options().commands,
                            serenity::GuildId::new(guild_id),
                        )
                        .await?;
                        tracing::info!(guild_id, "Commands registered in guild");
                    }
                    None => {
                        poise::builtins::register_globally(ctx, &framework.options().commands)
                            .await?;
                        tracing::info!("Commands registered globally");
                    }
                }

                Ok::<Data, Error>(data)
            })
        })
        .build();

    let mut client = serenity::ClientBuilder::new(&config.discord_token, intents)
        .framework(framework)
        .await
        .context("Error creating client")?;

    client.start().await.context("Error running bot")?;
    Ok(())
}
