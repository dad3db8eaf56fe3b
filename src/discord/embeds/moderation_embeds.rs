use crate::core::alerts::{AlertStatus, FraudAlert, Severity};
use crate::core::campaigns::{CampaignStatus, CampaignView};
use crate::core::reporting::ModerationSummary;
use crate::core::risk::RiskBand;
use poise::serenity_prelude::{self as serenity, CreateEmbed, CreateEmbedFooter};

/// Discord caps an embed at 25 fields; keep a little headroom.
const MAX_LIST_FIELDS: usize = 20;

// Discord rejects the whole embed if any of these is exceeded.
const TITLE_LIMIT: usize = 256;
const DESCRIPTION_LIMIT: usize = 4096;
const FIELD_NAME_LIMIT: usize = 256;
const FIELD_VALUE_LIMIT: usize = 1024;

/// Longest review note shown per history line.
const NOTE_PREVIEW: usize = 200;

const GREEN: u32 = 0x2ECC71;
const ORANGE: u32 = 0xE67E22;
const RED: u32 = 0xE74C3C;
const GREY: u32 = 0x95A5A6;
const BLUE: u32 = 0x3498DB;

fn risk_color(band: RiskBand) -> u32 {
    match band {
        RiskBand::Low => GREEN,
        RiskBand::Medium => ORANGE,
        RiskBand::High => RED,
    }
}

fn status_badge(view: &CampaignView) -> String {
    let emoji = match view.campaign.status {
        CampaignStatus::Pending => "⏳",
        CampaignStatus::Approved => "✅",
        CampaignStatus::Rejected => "⛔",
        CampaignStatus::Flagged => "🚩",
    };
    // An open alert flags the campaign without changing its status.
    if view.flagged && view.campaign.status != CampaignStatus::Flagged {
        format!("{} {} 🚩", emoji, view.campaign.status)
    } else {
        format!("{} {}", emoji, view.campaign.status)
    }
}

fn severity_emoji(severity: Severity) -> &'static str {
    match severity {
        Severity::High => "🔴",
        Severity::Medium => "🟠",
        Severity::Low => "🟡",
    }
}

/// Cut `text` to at most `max` characters, marking the cut with an ellipsis.
fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let mut out: String = text.chars().take(max.saturating_sub(1)).collect();
    out.push('…');
    out
}

/// `1234567` -> `1,234,567`
pub fn format_amount(amount: u64) -> String {
    let digits = amount.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// `title (id)suffix`, shortening the title so the id always survives.
fn field_name(title: &str, id: &str, suffix: &str) -> String {
    let reserved = id.chars().count() + suffix.chars().count() + 3;
    let title = truncate(title, FIELD_NAME_LIMIT.saturating_sub(reserved).max(1));
    truncate(&format!("{} ({}){}", title, id, suffix), FIELD_NAME_LIMIT)
}

pub fn campaign_embed(view: &CampaignView) -> CreateEmbed {
    let campaign = &view.campaign;
    let band = campaign.risk_band();

    let mut embed = CreateEmbed::new()
        .title(truncate(&campaign.title, TITLE_LIMIT))
        .description(truncate(
            &format!(
                "by **{}** • {} • `{}`",
                campaign.creator, campaign.category, campaign.id
            ),
            DESCRIPTION_LIMIT,
        ))
        .color(risk_color(band))
        .field("Status", status_badge(view), true)
        .field(
            "Risk",
            format!("{} ({:.1})", band.label(), campaign.risk_score),
            true,
        )
        .field(
            "Raised",
            format!(
                "{} of {} ({:.1}%)",
                format_amount(campaign.raised),
                format_amount(campaign.goal),
                campaign.progress_percent()
            ),
            false,
        );

    if !campaign.review_log.is_empty() {
        let history = campaign
            .review_log
            .iter()
            .rev()
            .take(5)
            .map(|entry| {
                let mut line = format!(
                    "`{}` {} → {} by {}",
                    entry.at.format("%Y-%m-%d %H:%M"),
                    entry.from,
                    entry.to,
                    entry.actor.as_deref().unwrap_or("unknown")
                );
                if let Some(note) = &entry.note {
                    line.push_str(&format!(" ({})", truncate(note, NOTE_PREVIEW)));
                }
                line
            })
            .collect::<Vec<_>>()
            .join("\n");
        embed = embed.field(
            "Review History",
            truncate(&history, FIELD_VALUE_LIMIT),
            false,
        );
    }

    embed
        .footer(CreateEmbedFooter::new(format!(
            "Created {} • version {}",
            campaign.created_at.format("%Y-%m-%d"),
            campaign.version
        )))
        .timestamp(serenity::Timestamp::now())
}

pub fn queue_embed(views: &[CampaignView]) -> CreateEmbed {
    let pending = views
        .iter()
        .filter(|v| v.campaign.status == CampaignStatus::Pending)
        .count();

    let mut embed = CreateEmbed::new()
        .title("📋 Campaign Moderation Queue")
        .color(BLUE)
        .description(format!(
            "{} campaigns match, {} pending review",
            views.len(),
            pending
        ));

    if views.is_empty() {
        return embed.field("Nothing to review", "No campaigns match these filters.", false);
    }

    for view in views.iter().take(MAX_LIST_FIELDS) {
        let campaign = &view.campaign;
        embed = embed.field(
            field_name(&campaign.title, &campaign.id, ""),
            truncate(
                &format!(
                    "{} • {} • {}\n{} of {} • {}",
                    status_badge(view),
                    campaign.risk_band().label(),
                    campaign.category,
                    format_amount(campaign.raised),
                    format_amount(campaign.goal),
                    campaign.creator
                ),
                FIELD_VALUE_LIMIT,
            ),
            false,
        );
    }

    if views.len() > MAX_LIST_FIELDS {
        embed = embed.footer(CreateEmbedFooter::new(format!(
            "Showing {} of {}. Narrow the filters to see more.",
            MAX_LIST_FIELDS,
            views.len()
        )));
    }
    embed
}

pub fn alert_embed(alert: &FraudAlert) -> CreateEmbed {
    let color = match alert.status {
        AlertStatus::Resolved => GREY,
        _ if alert.escalated => RED,
        AlertStatus::Investigating => ORANGE,
        AlertStatus::Active => BLUE,
    };

    let mut embed = CreateEmbed::new()
        .title(truncate(
            &format!("{} {}", severity_emoji(alert.severity), alert.title),
            TITLE_LIMIT,
        ))
        .description(truncate(&alert.description, DESCRIPTION_LIMIT))
        .color(color)
        .field("Type", alert.alert_type.to_string(), true)
        .field("Severity", alert.severity.to_string(), true)
        .field("Status", alert.status.to_string(), true)
        .field(
            "Entity",
            truncate(
                &format!("{} `{}`", alert.entity_kind, alert.entity_id),
                FIELD_VALUE_LIMIT,
            ),
            true,
        );

    if alert.escalated {
        embed = embed.field("Escalated", "⚠️ Urgent", true);
    }
    if let Some(resolved_at) = alert.resolved_at {
        embed = embed.field(
            "Resolved",
            resolved_at.format("%Y-%m-%d %H:%M UTC").to_string(),
            true,
        );
    }

    embed.footer(CreateEmbedFooter::new(format!(
        "{} • raised {}",
        alert.id,
        alert.created_at.format("%Y-%m-%d %H:%M UTC")
    )))
}

pub fn alert_list_embed(alerts: &[FraudAlert]) -> CreateEmbed {
    let mut embed = CreateEmbed::new()
        .title("🛡️ Fraud Alerts")
        .color(RED)
        .description(format!("{} alerts match", alerts.len()));

    if alerts.is_empty() {
        return embed
            .color(GREEN)
            .field("All clear", "No alerts match these filters.", false);
    }

    for alert in alerts.iter().take(MAX_LIST_FIELDS) {
        let urgent = if alert.escalated { " ⚠️" } else { "" };
        embed = embed.field(
            field_name(
                &format!("{} {}", severity_emoji(alert.severity), alert.title),
                &alert.id,
                urgent,
            ),
            truncate(
                &format!(
                    "{} • {} • {} `{}`",
                    alert.alert_type, alert.status, alert.entity_kind, alert.entity_id
                ),
                FIELD_VALUE_LIMIT,
            ),
            false,
        );
    }

    if alerts.len() > MAX_LIST_FIELDS {
        embed = embed.footer(CreateEmbedFooter::new(format!(
            "Showing {} of {}",
            MAX_LIST_FIELDS,
            alerts.len()
        )));
    }
    embed
}

fn percent(ratio: f64) -> String {
    format!("{:.0}%", ratio * 100.0)
}

pub fn summary_embed(summary: &ModerationSummary) -> CreateEmbed {
    let overview = &summary.overview;
    let risk = &summary.risk_distribution;

    let alert_types = summary
        .alert_types
        .iter()
        .map(|t| format!("{}: {}", t.alert_type, t.count))
        .collect::<Vec<_>>()
        .join("\n");

    CreateEmbed::new()
        .title("📊 Moderation Summary")
        .color(BLUE)
        .field(
            "Campaigns",
            format!(
                "Total: {}\nPending: {}\nFlagged: {}",
                overview.total_campaigns, summary.pending_count, overview.flagged_campaigns
            ),
            true,
        )
        .field(
            "Alerts",
            format!(
                "Active: {}\nInvestigating: {}",
                summary.active_alert_count, summary.investigating_alert_count
            ),
            true,
        )
        .field(
            "Risk Distribution",
            format!(
                "🟢 Low: {}\n🟠 Medium: {}\n🔴 High: {}",
                risk.low, risk.medium, risk.high
            ),
            true,
        )
        .field(
            "Funds",
            format!(
                "{} raised of {}",
                format_amount(overview.total_raised),
                format_amount(overview.total_goal)
            ),
            false,
        )
        .field("Alert Types", alert_types, true)
        .field(
            "Triage",
            format!(
                "Resolved: {}\nEscalated: {}\nFlagged share: {}",
                percent(summary.triage.resolution_rate),
                percent(summary.triage.escalation_rate),
                percent(summary.triage.flagged_share)
            ),
            true,
        )
        .timestamp(serenity::Timestamp::now())
}
