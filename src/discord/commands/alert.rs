// Fraud alert triage commands.

use crate::core::alerts::{AlertDraft, AlertFilter, AlertStatus, AlertType, EntityKind, Severity};
use crate::core::risk::RiskSignals;
use crate::discord::commands::campaign::DocumentChoice;
use crate::discord::embeds::{alert_embed, alert_list_embed};
use crate::discord::{actor, Context, Error};

#[derive(Debug, Clone, Copy, poise::ChoiceParameter)]
pub enum AlertStatusChoice {
    Active,
    Investigating,
    Resolved,
}

impl From<AlertStatusChoice> for AlertStatus {
    fn from(choice: AlertStatusChoice) -> Self {
        match choice {
            AlertStatusChoice::Active => AlertStatus::Active,
            AlertStatusChoice::Investigating => AlertStatus::Investigating,
            AlertStatusChoice::Resolved => AlertStatus::Resolved,
        }
    }
}

#[derive(Debug, Clone, Copy, poise::ChoiceParameter)]
pub enum SeverityChoice {
    High,
    Medium,
    Low,
}

impl From<SeverityChoice> for Severity {
    fn from(choice: SeverityChoice) -> Self {
        match choice {
            SeverityChoice::High => Severity::High,
            SeverityChoice::Medium => Severity::Medium,
            SeverityChoice::Low => Severity::Low,
        }
    }
}

#[derive(Debug, Clone, Copy, poise::ChoiceParameter)]
pub enum EntityChoice {
    Campaign,
    User,
}

impl From<EntityChoice> for EntityKind {
    fn from(choice: EntityChoice) -> Self {
        match choice {
            EntityChoice::Campaign => EntityKind::Campaign,
            EntityChoice::User => EntityKind::User,
        }
    }
}

#[derive(Debug, Clone, Copy, poise::ChoiceParameter)]
pub enum AlertTypeChoice {
    #[name = "Duplicate Content"]
    DuplicateContent,
    #[name = "Suspicious Activity"]
    SuspiciousActivity,
    #[name = "Fake Documents"]
    FakeDocuments,
    #[name = "Rapid Campaigns"]
    RapidCampaigns,
}

impl From<AlertTypeChoice> for AlertType {
    fn from(choice: AlertTypeChoice) -> Self {
        match choice {
            AlertTypeChoice::DuplicateContent => AlertType::DuplicateContent,
            AlertTypeChoice::SuspiciousActivity => AlertType::SuspiciousActivity,
            AlertTypeChoice::FakeDocuments => AlertType::FakeDocuments,
            AlertTypeChoice::RapidCampaigns => AlertType::RapidCampaigns,
        }
    }
}

/// Triage fraud alerts.
#[poise::command(
    slash_command,
    subcommands("list", "show", "raise", "investigate", "escalate", "resolve"),
    required_permissions = "MANAGE_MESSAGES",
    guild_only
)]
pub async fn alert(_ctx: Context<'_>) -> Result<(), Error> {
    Ok(())
}

/// List fraud alerts.
#[poise::command(slash_command, guild_only, required_permissions = "MANAGE_MESSAGES")]
pub async fn list(
    ctx: Context<'_>,
    #[description = "Only alerts with this status"] status: Option<AlertStatusChoice>,
    #[description = "Only alerts with this severity"] severity: Option<SeverityChoice>,
    #[description = "Only alerts about campaigns or users"] entity: Option<EntityChoice>,
    #[description = "Only escalated alerts"] urgent: Option<bool>,
) -> Result<(), Error> {
    let filter = AlertFilter {
        status: status.map(Into::into),
        severity: severity.map(Into::into),
        entity_kind: entity.map(Into::into),
        escalated_only: urgent.unwrap_or(false),
    };

    let alerts = ctx.data().moderation.list_alerts(&filter);
    ctx.send(poise::CreateReply::default().embed(alert_list_embed(&alerts)))
        .await?;
    Ok(())
}

/// Show a single alert.
#[poise::command(slash_command, guild_only, required_permissions = "MANAGE_MESSAGES")]
pub async fn show(
    ctx: Context<'_>,
    #[description = "Alert id (e.g. alert_1)"] id: String,
) -> Result<(), Error> {
    match ctx.data().moderation.alert(id.trim()) {
        Ok(alert) => {
            ctx.send(poise::CreateReply::default().embed(alert_embed(&alert)))
                .await?;
        }
        Err(e) => {
            ctx.send(
                poise::CreateReply::default()
                    .content(format!("❌ {}", e))
                    .ephemeral(true),
            )
            .await?;
        }
    }
    Ok(())
}

/// Raise an alert by hand. Without a severity, it is taken from the signals.
#[poise::command(slash_command, guild_only, required_permissions = "MANAGE_MESSAGES")]
#[allow(clippy::too_many_arguments)]
pub async fn raise(
    ctx: Context<'_>,
    #[description = "What kind of fraud is suspected"] kind: AlertTypeChoice,
    #[description = "Short title"] title: String,
    #[description = "What was observed"] description: String,
    #[description = "Campaign or user id the alert is about"] entity_id: String,
    #[description = "Whether the id is a campaign or a user"] entity: EntityChoice,
    #[description = "Explicit severity"] severity: Option<SeverityChoice>,
    #[description = "Story similarity to existing campaigns, 0-100"] similarity: Option<f64>,
    #[description = "Donations per hour"] velocity: Option<f64>,
    #[description = "Document verification result"] documents: Option<DocumentChoice>,
    #[description = "Campaigns by this account in the last 24h"] recent_campaigns: Option<u32>,
) -> Result<(), Error> {
    let moderation = &ctx.data().moderation;
    let entity_id = entity_id.trim();

    let result = match severity {
        Some(severity) => moderation.raise_alert(AlertDraft {
            alert_type: kind.into(),
            severity: severity.into(),
            title,
            description,
            entity_id: entity_id.to_string(),
            entity_kind: entity.into(),
        }),
        None => moderation.raise_alert_from_signals(
            kind.into(),
            &title,
            &description,
            entity_id,
            entity.into(),
            &RiskSignals {
                content_similarity_pct: similarity,
                donation_velocity_per_hour: velocity,
                document_check: documents.map(Into::into),
                campaigns_last_24h: recent_campaigns,
            },
        ),
    };

    match result {
        Ok(alert) => {
            ctx.send(
                poise::CreateReply::default()
                    .content("🚨 Alert raised")
                    .embed(alert_embed(&alert)),
            )
            .await?;
        }
        Err(e) => {
            ctx.send(
                poise::CreateReply::default()
                    .content(format!("❌ {}", e))
                    .ephemeral(true),
            )
            .await?;
        }
    }
    Ok(())
}

#[derive(Debug, Clone, Copy)]
enum Triage {
    Investigate,
    Escalate,
    Resolve,
}

async fn triage(ctx: Context<'_>, id: &str, step: Triage) -> Result<(), Error> {
    let actor = actor(ctx);
    let moderation = &ctx.data().moderation;
    let id = id.trim();

    let result = match step {
        Triage::Investigate => moderation.investigate_alert(id, Some(&actor)),
        Triage::Escalate => moderation.escalate_alert(id, Some(&actor)),
        Triage::Resolve => moderation.resolve_alert(id, Some(&actor)),
    };

    match result {
        Ok(alert) => {
            let headline = match step {
                Triage::Investigate => "🔍 Alert under investigation",
                Triage::Escalate => "⚠️ Alert escalated",
                Triage::Resolve => "✅ Alert resolved",
            };
            ctx.send(
                poise::CreateReply::default()
                    .content(headline)
                    .embed(alert_embed(&alert)),
            )
            .await?;
        }
        Err(e) => {
            ctx.send(
                poise::CreateReply::default()
                    .content(format!("❌ {}", e))
                    .ephemeral(true),
            )
            .await?;
        }
    }
    Ok(())
}

/// Start investigating an active alert.
#[poise::command(slash_command, guild_only, required_permissions = "MANAGE_MESSAGES")]
pub async fn investigate(
    ctx: Context<'_>,
    #[description = "Alert id (e.g. alert_1)"] id: String,
) -> Result<(), Error> {
    triage(ctx, &id, Triage::Investigate).await
}

/// Escalate an active alert: investigate it and mark it urgent.
#[poise::command(slash_command, guild_only, required_permissions = "MANAGE_MESSAGES")]
pub async fn escalate(
    ctx: Context<'_>,
    #[description = "Alert id"] id: String,
) -> Result<(), Error> {
    triage(ctx, &id, Triage::Escalate).await
}

/// Resolve an alert that is under investigation.
#[poise::command(slash_command, guild_only, required_permissions = "MANAGE_MESSAGES")]
pub async fn resolve(
    ctx: Context<'_>,
    #[description = "Alert id"] id: String,
) -> Result<(), Error> {
    triage(ctx, &id, Triage::Resolve).await
}
