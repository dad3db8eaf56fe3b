// Campaign review commands: the moderation queue and approve/reject/flag.

use crate::core::campaigns::{
    CampaignDraft, CampaignFilter, CampaignQuery, CampaignSort, CampaignSortKey, CampaignStatus,
    SortOrder,
};
use crate::core::risk::{DocumentCheck, RiskSignals};
use crate::discord::embeds::{campaign_embed, queue_embed};
use crate::discord::{actor, Context, Error};

#[derive(Debug, Clone, Copy, poise::ChoiceParameter)]
pub enum StatusChoice {
    Pending,
    Approved,
    Rejected,
    Flagged,
}

impl From<StatusChoice> for CampaignStatus {
    fn from(choice: StatusChoice) -> Self {
        match choice {
            StatusChoice::Pending => CampaignStatus::Pending,
            StatusChoice::Approved => CampaignStatus::Approved,
            StatusChoice::Rejected => CampaignStatus::Rejected,
            StatusChoice::Flagged => CampaignStatus::Flagged,
        }
    }
}

#[derive(Debug, Clone, Copy, poise::ChoiceParameter)]
pub enum SortChoice {
    #[name = "Amount raised"]
    Raised,
    #[name = "Goal"]
    Goal,
    #[name = "Created"]
    CreatedAt,
    #[name = "Risk score"]
    RiskScore,
}

impl From<SortChoice> for CampaignSortKey {
    fn from(choice: SortChoice) -> Self {
        match choice {
            SortChoice::Raised => CampaignSortKey::Raised,
            SortChoice::Goal => CampaignSortKey::Goal,
            SortChoice::CreatedAt => CampaignSortKey::CreatedAt,
            SortChoice::RiskScore => CampaignSortKey::RiskScore,
        }
    }
}

#[derive(Debug, Clone, Copy, poise::ChoiceParameter)]
pub enum OrderChoice {
    Ascending,
    Descending,
}

impl From<OrderChoice> for SortOrder {
    fn from(choice: OrderChoice) -> Self {
        match choice {
            OrderChoice::Ascending => SortOrder::Ascending,
            OrderChoice::Descending => SortOrder::Descending,
        }
    }
}

#[derive(Debug, Clone, Copy, poise::ChoiceParameter)]
pub enum DocumentChoice {
    Verified,
    Pending,
    Failed,
}

impl From<DocumentChoice> for DocumentCheck {
    fn from(choice: DocumentChoice) -> Self {
        match choice {
            DocumentChoice::Verified => DocumentCheck::Verified,
            DocumentChoice::Pending => DocumentCheck::Pending,
            DocumentChoice::Failed => DocumentCheck::Failed,
        }
    }
}

/// Review fundraising campaigns.
#[poise::command(
    slash_command,
    subcommands("queue", "show", "submit", "approve", "reject", "flag"),
    required_permissions = "MANAGE_MESSAGES",
    guild_only
)]
pub async fn campaign(_ctx: Context<'_>) -> Result<(), Error> {
    Ok(())
}

/// Show the moderation queue.
#[poise::command(slash_command, guild_only, required_permissions = "MANAGE_MESSAGES")]
pub async fn queue(
    ctx: Context<'_>,
    #[description = "Only campaigns with this status"] status: Option<StatusChoice>,
    #[description = "Only this category (e.g. Medical)"] category: Option<String>,
    #[description = "Only flagged (or only unflagged) campaigns"] flagged: Option<bool>,
    #[description = "Search campaign titles"] search: Option<String>,
    #[description = "Sort by"] sort: Option<SortChoice>,
    #[description = "Sort direction (default: ascending)"] order: Option<OrderChoice>,
) -> Result<(), Error> {
    let query = CampaignQuery {
        filter: CampaignFilter {
            status: status.map(Into::into),
            category,
            flagged,
            search,
        },
        sort: sort.map(|key| CampaignSort {
            key: key.into(),
            order: order.map(Into::into).unwrap_or_default(),
        }),
    };

    let views = ctx.data().moderation.list_campaigns(&query);
    ctx.send(poise::CreateReply::default().embed(queue_embed(&views)))
        .await?;
    Ok(())
}

/// Show a campaign with its risk badge and review history.
#[poise::command(slash_command, guild_only, required_permissions = "MANAGE_MESSAGES")]
pub async fn show(
    ctx: Context<'_>,
    #[description = "Campaign id (e.g. camp_1)"] id: String,
) -> Result<(), Error> {
    match ctx.data().moderation.campaign(id.trim()) {
        Ok(view) => {
            ctx.send(poise::CreateReply::default().embed(campaign_embed(&view)))
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

/// Register a campaign for review, scoring it from the intake signals.
#[poise::command(slash_command, guild_only, required_permissions = "MANAGE_MESSAGES")]
#[allow(clippy::too_many_arguments)]
pub async fn submit(
    ctx: Context<'_>,
    #[description = "Campaign title"] title: String,
    #[description = "Campaign creator"] creator: String,
    #[description = "Category (e.g. Medical)"] category: String,
    #[description = "Fundraising goal"] goal: u64,
    #[description = "Amount raised so far"] raised: Option<u64>,
    #[description = "Story similarity to existing campaigns, 0-100"] similarity: Option<f64>,
    #[description = "Donations per hour"] velocity: Option<f64>,
    #[description = "Document verification result"] documents: Option<DocumentChoice>,
    #[description = "Campaigns by this creator in the last 24h"] recent_campaigns: Option<u32>,
) -> Result<(), Error> {
    let draft = CampaignDraft {
        title,
        creator,
        category,
        goal,
        raised: raised.unwrap_or(0),
    };
    let signals = RiskSignals {
        content_similarity_pct: similarity,
        donation_velocity_per_hour: velocity,
        document_check: documents.map(Into::into),
        campaigns_last_24h: recent_campaigns,
    };

    match ctx.data().moderation.submit_campaign(draft, &signals) {
        Ok(view) => {
            ctx.send(
                poise::CreateReply::default()
                    .content("📥 Campaign submitted for review")
                    .embed(campaign_embed(&view)),
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
enum Review {
    Approve,
    Reject,
    Flag,
}

async fn review(ctx: Context<'_>, id: &str, note: Option<&str>, review: Review) -> Result<(), Error> {
    let actor = actor(ctx);
    let moderation = &ctx.data().moderation;
    let id = id.trim();

    let result = match review {
        Review::Approve => moderation.approve_campaign(id, Some(&actor), note),
        Review::Reject => moderation.reject_campaign(id, Some(&actor), note),
        Review::Flag => moderation.flag_campaign(id, Some(&actor), note),
    };

    match result {
        Ok(view) => {
            let headline = match review {
                Review::Approve => "✅ Campaign approved",
                Review::Reject => "⛔ Campaign rejected",
                Review::Flag => "🚩 Campaign flagged for review",
            };
            ctx.send(
                poise::CreateReply::default()
                    .content(headline)
                    .embed(campaign_embed(&view)),
            )
            .await?;
        }
        // Refusals go back to the moderator only; the coordinator already logged them.
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

/// Approve a pending or flagged campaign.
#[poise::command(slash_command, guild_only, required_permissions = "MANAGE_MESSAGES")]
pub async fn approve(
    ctx: Context<'_>,
    #[description = "Campaign id"] id: String,
    #[description = "Optional review note"] note: Option<String>,
) -> Result<(), Error> {
    review(ctx, &id, note.as_deref(), Review::Approve).await
}

/// Reject a pending or flagged campaign. This is final.
#[poise::command(slash_command, guild_only, required_permissions = "MANAGE_MESSAGES")]
pub async fn reject(
    ctx: Context<'_>,
    #[description = "Campaign id"] id: String,
    #[description = "Optional review note"] note: Option<String>,
) -> Result<(), Error> {
    review(ctx, &id, note.as_deref(), Review::Reject).await
}

/// Flag a campaign for further review.
#[poise::command(slash_command, guild_only, required_permissions = "MANAGE_MESSAGES")]
pub async fn flag(
    ctx: Context<'_>,
    #[description = "Campaign id"] id: String,
    #[description = "Optional review note"] note: Option<String>,
) -> Result<(), Error> {
    review(ctx, &id, note.as_deref(), Review::Flag).await
}
