// Fraud alert domain models.

use crate::core::risk::RiskBand;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// What the detection pipeline thinks happened.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertType {
    DuplicateContent,
    SuspiciousActivity,
    FakeDocuments,
    RapidCampaigns,
}

impl AlertType {
    pub const ALL: [AlertType; 4] = [
        AlertType::DuplicateContent,
        AlertType::SuspiciousActivity,
        AlertType::FakeDocuments,
        AlertType::RapidCampaigns,
    ];
}

impl std::fmt::Display for AlertType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AlertType::DuplicateContent => write!(f, "Duplicate Content"),
            AlertType::SuspiciousActivity => write!(f, "Suspicious Activity"),
            AlertType::FakeDocuments => write!(f, "Fake Documents"),
            AlertType::RapidCampaigns => write!(f, "Rapid Campaigns"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    High,
    Medium,
    Low,
}

impl Severity {
    /// Default severity for an alert raised off a scored signal bag. Uses the
    /// same bands as the campaign risk badge.
    pub fn from_band(band: RiskBand) -> Self {
        match band {
            RiskBand::High => Severity::High,
            RiskBand::Medium => Severity::Medium,
            RiskBand::Low => Severity::Low,
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::High => write!(f, "high"),
            Severity::Medium => write!(f, "medium"),
            Severity::Low => write!(f, "low"),
        }
    }
}

/// Kind of entity an alert points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    Campaign,
    User,
}

impl std::fmt::Display for EntityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EntityKind::Campaign => write!(f, "campaign"),
            EntityKind::User => write!(f, "user"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertStatus {
    Active,
    Investigating,
    Resolved,
}

impl AlertStatus {
    /// Triage edges. Investigate and escalate both leave `Active`; resolve
    /// is only reachable from `Investigating`, and `Resolved` is terminal.
    pub fn after(self, action: AlertAction) -> Option<AlertStatus> {
        match (self, action) {
            (AlertStatus::Active, AlertAction::Investigate) => Some(AlertStatus::Investigating),
            (AlertStatus::Active, AlertAction::Escalate) => Some(AlertStatus::Investigating),
            (AlertStatus::Investigating, AlertAction::Resolve) => Some(AlertStatus::Resolved),
            _ => None,
        }
    }

    pub fn is_open(self) -> bool {
        self != AlertStatus::Resolved
    }
}

impl std::fmt::Display for AlertStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AlertStatus::Active => write!(f, "active"),
            AlertStatus::Investigating => write!(f, "investigating"),
            AlertStatus::Resolved => write!(f, "resolved"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertAction {
    Investigate,
    Escalate,
    Resolve,
}

impl std::fmt::Display for AlertAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AlertAction::Investigate => write!(f, "investigate"),
            AlertAction::Escalate => write!(f, "escalate"),
            AlertAction::Resolve => write!(f, "resolve"),
        }
    }
}

/// A suspicion raised against a campaign or an account.
///
/// Cross-references are by id only; the alert never holds the campaign.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FraudAlert {
    pub id: String,
    pub alert_type: AlertType,
    pub severity: Severity,
    pub title: String,
    pub description: String,
    pub entity_id: String,
    pub entity_kind: EntityKind,
    pub created_at: DateTime<Utc>,
    pub status: AlertStatus,
    /// Set by `escalate`; surfaces the alert in the urgent view.
    #[serde(default)]
    pub escalated: bool,
    #[serde(default)]
    pub resolved_at: Option<DateTime<Utc>>,
    pub version: u64,
    pub seq: u64,
}

impl FraudAlert {
    /// True if this is an unresolved alert pointing at `campaign_id`.
    pub fn holds_campaign(&self, campaign_id: &str) -> bool {
        self.status.is_open()
            && self.entity_kind == EntityKind::Campaign
            && self.entity_id == campaign_id
    }

    /// Only status, the escalation marker and the resolution time ever
    /// change. Everything else is fixed at raise time.
    pub(crate) fn record_change(&mut self, change: &AlertChange) {
        self.status = change.to;
        if change.action == AlertAction::Escalate {
            self.escalated = true;
        }
        if change.to == AlertStatus::Resolved {
            self.resolved_at = Some(change.at);
        }
        self.version += 1;
    }
}

/// A triage step already checked by the coordinator.
#[derive(Debug, Clone, PartialEq)]
pub struct AlertChange {
    pub action: AlertAction,
    pub expected_version: u64,
    pub to: AlertStatus,
    pub at: DateTime<Utc>,
}

/// What the detection pipeline hands over when raising an alert.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlertDraft {
    pub alert_type: AlertType,
    pub severity: Severity,
    pub title: String,
    pub description: String,
    pub entity_id: String,
    pub entity_kind: EntityKind,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AlertFilter {
    pub status: Option<AlertStatus>,
    pub severity: Option<Severity>,
    pub entity_kind: Option<EntityKind>,
    /// Only escalated alerts (the urgent view).
    pub escalated_only: bool,
}

impl AlertFilter {
    pub fn matches(&self, alert: &FraudAlert) -> bool {
        self.status.map_or(true, |s| alert.status == s)
            && self.severity.map_or(true, |s| alert.severity == s)
            && self.entity_kind.map_or(true, |k| alert.entity_kind == k)
            && (!self.escalated_only || alert.escalated)
    }
}
