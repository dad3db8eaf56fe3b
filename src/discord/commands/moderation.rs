// Dashboard-level commands: summary statistics and data export.

use crate::core::moderation::SnapshotStore;
use crate::discord::embeds::summary_embed;
use crate::discord::{Context, Error};

/// Moderation dashboard.
#[poise::command(
    slash_command,
    subcommands("summary", "export"),
    required_permissions = "MANAGE_MESSAGES",
    guild_only
)]
pub async fn moderation(_ctx: Context<'_>) -> Result<(), Error> {
    Ok(())
}

/// Pending reviews, open alerts and risk distribution at a glance.
#[poise::command(slash_command, guild_only, required_permissions = "MANAGE_MESSAGES")]
pub async fn summary(ctx: Context<'_>) -> Result<(), Error> {
    let summary = ctx.data().moderation.reporting().summary();
    ctx.send(poise::CreateReply::default().embed(summary_embed(&summary)))
        .await?;
    Ok(())
}

/// Export every campaign and alert to the configured JSON file.
#[poise::command(slash_command, guild_only, required_permissions = "MANAGE_MESSAGES")]
pub async fn export(ctx: Context<'_>) -> Result<(), Error> {
    ctx.defer_ephemeral().await?;

    let data = ctx.data();
    let snapshot = data.moderation.snapshot();
    data.snapshots
        .save(&snapshot)
        .await
        .map_err(|e| Error::from(e.to_string()))?;

    tracing::info!(
        user = %ctx.author().name,
        campaigns = snapshot.campaigns.len(),
        alerts = snapshot.alerts.len(),
        path = %data.snapshots.path().display(),
        "Moderation data exported"
    );

    ctx.say(format!(
        "💾 Exported {} campaigns and {} alerts to `{}`.",
        snapshot.campaigns.len(),
        snapshot.alerts.len(),
        data.snapshots.path().display()
    ))
    .await?;
    Ok(())
}
