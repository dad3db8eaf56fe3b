// Campaign domain models.
//
// Status is authoritative; `flagged` is derived and only ever appears on
// `CampaignView`, computed from status plus open alert references.

use crate::core::risk::{RiskBand, RiskAssessment};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Moderation status of a campaign.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CampaignStatus {
    Pending,
    Approved,
    Rejected,
    Flagged,
}

impl CampaignStatus {
    /// Where `action` leads from this status, or `None` if the edge is not
    /// part of the review flow.
    ///
    /// `Rejected` is terminal. `Approved` can only be re-flagged, and a
    /// flagged campaign goes back to review via approve or reject.
    pub fn after(self, action: CampaignAction) -> Option<CampaignStatus> {
        use CampaignAction::*;
        use CampaignStatus::*;

        match (self, action) {
            (Pending, Approve) => Some(Approved),
            (Pending, Reject) => Some(Rejected),
            (Pending, Flag) => Some(Flagged),
            (Approved, Flag) => Some(Flagged),
            (Flagged, Approve) => Some(Approved),
            (Flagged, Reject) => Some(Rejected),
            _ => None,
        }
    }
}

impl std::fmt::Display for CampaignStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CampaignStatus::Pending => write!(f, "pending"),
            CampaignStatus::Approved => write!(f, "approved"),
            CampaignStatus::Rejected => write!(f, "rejected"),
            CampaignStatus::Flagged => write!(f, "flagged"),
        }
    }
}

/// Staff actions that move a campaign through review.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CampaignAction {
    Approve,
    Reject,
    Flag,
}

impl std::fmt::Display for CampaignAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CampaignAction::Approve => write!(f, "approve"),
            CampaignAction::Reject => write!(f, "reject"),
            CampaignAction::Flag => write!(f, "flag"),
        }
    }
}

/// One entry of a campaign's audit trail.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReviewEntry {
    pub action: CampaignAction,
    pub from: CampaignStatus,
    pub to: CampaignStatus,
    pub actor: Option<String>,
    pub note: Option<String>,
    pub at: DateTime<Utc>,
}

/// A fundraising campaign as owned by the campaign registry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Campaign {
    pub id: String,
    pub title: String,
    pub creator: String,
    pub category: String,
    /// Target amount, currency-agnostic whole units. Always > 0.
    pub goal: u64,
    /// Amount raised so far. May exceed `goal`.
    pub raised: u64,
    pub created_at: DateTime<Utc>,
    /// Nominally 0-10, computed at intake.
    pub risk_score: f64,
    pub status: CampaignStatus,
    /// Bumped on every status change; used to detect concurrent edits.
    pub version: u64,
    /// Insertion order, used to break sort ties.
    pub seq: u64,
    #[serde(default)]
    pub review_log: Vec<ReviewEntry>,
}

impl Campaign {
    /// Percentage of the goal raised so far (can exceed 100).
    pub fn progress_percent(&self) -> f64 {
        self.raised as f64 / self.goal as f64 * 100.0
    }

    pub fn risk_band(&self) -> RiskBand {
        RiskBand::classify(self.risk_score)
    }

    /// Apply an already-validated status change and append it to the log.
    pub(crate) fn record_change(&mut self, change: &StatusChange) {
        self.review_log.push(ReviewEntry {
            action: change.action,
            from: self.status,
            to: change.to,
            actor: change.actor.clone(),
            note: change.note.clone(),
            at: change.at,
        });
        self.status = change.to;
        self.version += 1;
    }
}

/// A status change the coordinator has already checked against the state
/// machine. Stores commit it only if the record is still at
/// `expected_version`.
#[derive(Debug, Clone, PartialEq)]
pub struct StatusChange {
    pub action: CampaignAction,
    pub expected_version: u64,
    pub to: CampaignStatus,
    pub actor: Option<String>,
    pub note: Option<String>,
    pub at: DateTime<Utc>,
}

/// Validated payload handed over by the intake flow.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CampaignDraft {
    pub title: String,
    pub creator: String,
    pub category: String,
    pub goal: u64,
    #[serde(default)]
    pub raised: u64,
}

impl CampaignDraft {
    pub(crate) fn into_campaign(
        self,
        id: String,
        seq: u64,
        risk: RiskAssessment,
        created_at: DateTime<Utc>,
    ) -> Campaign {
        Campaign {
            id,
            title: self.title,
            creator: self.creator,
            category: self.category,
            goal: self.goal,
            raised: self.raised,
            created_at,
            risk_score: risk.score,
            status: CampaignStatus::Pending,
            version: 1,
            seq,
            review_log: Vec::new(),
        }
    }
}

/// A campaign plus its derived `flagged` attribute, as shown to staff.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CampaignView {
    #[serde(flatten)]
    pub campaign: Campaign,
    pub flagged: bool,
}

impl CampaignView {
    /// `flagged` is true iff the status is `Flagged` or an unresolved alert
    /// still points at this campaign.
    pub fn derive(campaign: Campaign, has_open_alert: bool) -> Self {
        let flagged = campaign.status == CampaignStatus::Flagged || has_open_alert;
        Self { campaign, flagged }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CampaignSortKey {
    Raised,
    Goal,
    CreatedAt,
    RiskScore,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    #[default]
    Ascending,
    Descending,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CampaignSort {
    pub key: CampaignSortKey,
    pub order: SortOrder,
}

/// Filters for the moderation queue. `None` means "don't filter on this".
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CampaignFilter {
    pub status: Option<CampaignStatus>,
    /// Case-insensitive exact match.
    pub category: Option<String>,
    pub flagged: Option<bool>,
    /// Case-insensitive substring match against the title.
    pub search: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CampaignQuery {
    pub filter: CampaignFilter,
    /// `None` keeps insertion order.
    pub sort: Option<CampaignSort>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Campaign {
        CampaignDraft {
            title: "Emergency Surgery for Sarah".to_string(),
            creator: "John Smith".to_string(),
            category: "Medical".to_string(),
            goal: 500_000,
            raised: 325_000,
        }
        .into_campaign(
            "camp_1".to_string(),
            1,
            RiskAssessment::from_score(2.1).unwrap(),
            Utc::now(),
        )
    }

    #[test]
    fn test_progress_percentage() {
        assert_eq!(sample().progress_percent(), 65.0);
    }

    #[test]
    fn test_progress_can_exceed_goal() {
        let mut campaign = sample();
        campaign.raised = 750_000;
        assert_eq!(campaign.progress_percent(), 150.0);
    }

    #[test]
    fn test_transition_table() {
        use CampaignAction::*;
        use CampaignStatus::*;

        assert_eq!(Pending.after(Approve), Some(Approved));
        assert_eq!(Pending.after(Reject), Some(Rejected));
        assert_eq!(Pending.after(Flag), Some(Flagged));
        assert_eq!(Approved.after(Flag), Some(Flagged));
        assert_eq!(Flagged.after(Approve), Some(Approved));
        assert_eq!(Flagged.after(Reject), Some(Rejected));

        assert_eq!(Approved.after(Approve), None);
        assert_eq!(Approved.after(Reject), None);
        assert_eq!(Flagged.after(Flag), None);
        for action in [Approve, Reject, Flag] {
            assert_eq!(Rejected.after(action), None);
        }
    }

    #[test]
    fn test_record_change_appends_log_and_bumps_version() {
        let mut campaign = sample();
        let change = StatusChange {
            action: CampaignAction::Flag,
            expected_version: 1,
            to: CampaignStatus::Flagged,
            actor: Some("mod-1".to_string()),
            note: None,
            at: Utc::now(),
        };

        campaign.record_change(&change);

        assert_eq!(campaign.status, CampaignStatus::Flagged);
        assert_eq!(campaign.version, 2);
        assert_eq!(campaign.review_log.len(), 1);
        assert_eq!(campaign.review_log[0].from, CampaignStatus::Pending);
    }

    #[test]
    fn test_flagged_is_derived() {
        let campaign = sample();
        assert!(!CampaignView::derive(campaign.clone(), false).flagged);
        assert!(CampaignView::derive(campaign.clone(), true).flagged);

        let mut flagged = campaign;
        flagged.status = CampaignStatus::Flagged;
        assert!(CampaignView::derive(flagged, false).flagged);
    }

    #[test]
    fn test_status_serializes_as_snake_case() {
        let json = serde_json::to_string(&CampaignStatus::Flagged).unwrap();
        assert_eq!(json, "\"flagged\"");
    }
}
