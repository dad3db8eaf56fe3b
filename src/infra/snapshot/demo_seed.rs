// Built-in demo data: the four campaigns and four alerts the staff dashboard
// ships with. Used when no seed file is configured.

use crate::core::alerts::{AlertStatus, AlertType, EntityKind, FraudAlert, Severity};
use crate::core::campaigns::{Campaign, CampaignAction, CampaignStatus, ReviewEntry};
use crate::core::moderation::ModerationSnapshot;
use chrono::{DateTime, TimeZone, Utc};

const SEED_ACTOR: &str = "seed";

fn at(year: i32, month: u32, day: u32, hour: u32, minute: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, hour, minute, 0)
        .single()
        .unwrap_or_default()
}

struct SeedCampaign {
    seq: u64,
    title: &'static str,
    creator: &'static str,
    category: &'static str,
    goal: u64,
    raised: u64,
    day: u32,
    risk_score: f64,
    /// Review action already taken on the record, if any.
    reviewed: Option<CampaignAction>,
}

impl SeedCampaign {
    fn build(self) -> Campaign {
        let created_at = at(2024, 1, self.day, 0, 0);
        let mut campaign = Campaign {
            id: format!("camp_{}", self.seq),
            title: self.title.to_string(),
            creator: self.creator.to_string(),
            category: self.category.to_string(),
            goal: self.goal,
            raised: self.raised,
            created_at,
            risk_score: self.risk_score,
            status: CampaignStatus::Pending,
            version: 1,
            seq: self.seq,
            review_log: Vec::new(),
        };

        if let Some(action) = self.reviewed {
            if let Some(to) = campaign.status.after(action) {
                campaign.review_log.push(ReviewEntry {
                    action,
                    from: campaign.status,
                    to,
                    actor: Some(SEED_ACTOR.to_string()),
                    note: None,
                    at: created_at,
                });
                campaign.status = to;
                campaign.version += 1;
            }
        }
        campaign
    }
}

#[allow(clippy::too_many_arguments)]
fn alert(
    seq: u64,
    alert_type: AlertType,
    severity: Severity,
    title: &str,
    description: &str,
    entity: (&str, EntityKind),
    created_at: DateTime<Utc>,
    status: AlertStatus,
) -> FraudAlert {
    // Active -> Investigating -> Resolved, one version per step.
    let version = match status {
        AlertStatus::Active => 1,
        AlertStatus::Investigating => 2,
        AlertStatus::Resolved => 3,
    };

    FraudAlert {
        id: format!("alert_{seq}"),
        alert_type,
        severity,
        title: title.to_string(),
        description: description.to_string(),
        entity_id: entity.0.to_string(),
        entity_kind: entity.1,
        created_at,
        status,
        escalated: false,
        resolved_at: (status == AlertStatus::Resolved).then_some(created_at),
        version,
        seq,
    }
}

/// The demo data set as a snapshot ready for `ModerationCoordinator::restore`.
///
/// The duplicate-content alert points at the fire campaign, so that campaign
/// shows up flagged while still pending review.
pub fn demo_snapshot() -> ModerationSnapshot {
    let campaigns = vec![
        SeedCampaign {
            seq: 1,
            title: "Emergency Surgery for Sarah - Critical Heart Operation",
            creator: "John Smith",
            category: "Medical",
            goal: 500_000,
            raised: 325_000,
            day: 15,
            risk_score: 2.1,
            reviewed: None,
        },
        SeedCampaign {
            seq: 2,
            title: "Help Build School Library in Rural Kenya",
            creator: "Mary Johnson",
            category: "Education",
            goal: 250_000,
            raised: 187_500,
            day: 14,
            risk_score: 1.2,
            reviewed: Some(CampaignAction::Approve),
        },
        SeedCampaign {
            seq: 3,
            title: "Save the Stray Dogs - Animal Rescue Operation",
            creator: "Pet Rescue Inc",
            category: "Animals",
            goal: 150_000,
            raised: 85_000,
            day: 13,
            risk_score: 7.8,
            reviewed: Some(CampaignAction::Flag),
        },
        SeedCampaign {
            seq: 4,
            title: "Urgent: Family Lost Everything in Fire",
            creator: "Anonymous Helper",
            category: "Emergency",
            goal: 300_000,
            raised: 45_000,
            day: 12,
            risk_score: 8.5,
            reviewed: None,
        },
    ]
    .into_iter()
    .map(SeedCampaign::build)
    .collect();

    let alerts = vec![
        alert(
            1,
            AlertType::DuplicateContent,
            Severity::High,
            "Duplicate Campaign Content Detected",
            "Campaign story matches 85% with existing campaign from different user",
            ("camp_4", EntityKind::Campaign),
            at(2024, 1, 15, 10, 30),
            AlertStatus::Active,
        ),
        alert(
            2,
            AlertType::SuspiciousActivity,
            Severity::High,
            "Unusual Donation Pattern",
            "Multiple large donations from same IP address within 5 minutes",
            ("user_456", EntityKind::User),
            at(2024, 1, 15, 9, 15),
            AlertStatus::Investigating,
        ),
        alert(
            3,
            AlertType::FakeDocuments,
            Severity::Medium,
            "Document Verification Failed",
            "Uploaded medical documents appear to be digitally altered",
            ("camp_3", EntityKind::Campaign),
            at(2024, 1, 15, 8, 45),
            AlertStatus::Active,
        ),
        alert(
            4,
            AlertType::RapidCampaigns,
            Severity::Medium,
            "Rapid Campaign Creation",
            "User created 5 campaigns in 24 hours with similar content",
            ("user_321", EntityKind::User),
            at(2024, 1, 15, 7, 20),
            AlertStatus::Resolved,
        ),
    ];

    ModerationSnapshot {
        campaigns,
        alerts,
        exported_at: at(2024, 1, 15, 12, 0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::campaigns::{CampaignFilter, CampaignQuery};
    use crate::core::moderation::{CoordinatorPolicy, ModerationCoordinator};
    use crate::infra::alerts::InMemoryAlertStore;
    use crate::infra::campaigns::InMemoryCampaignStore;

    fn seeded() -> ModerationCoordinator<InMemoryCampaignStore, InMemoryAlertStore> {
        let coordinator = ModerationCoordinator::new(
            InMemoryCampaignStore::new(),
            InMemoryAlertStore::new(),
            CoordinatorPolicy::default(),
        );
        coordinator.restore(demo_snapshot()).unwrap();
        coordinator
    }

    #[test]
    fn test_demo_dashboard_counts() {
        let coordinator = seeded();
        let summary = coordinator.reporting().summary();

        assert_eq!(summary.pending_count, 2);
        assert_eq!(summary.active_alert_count, 2);
        assert_eq!(summary.investigating_alert_count, 1);
        assert_eq!(summary.risk_distribution.low, 2);
        assert_eq!(summary.risk_distribution.high, 2);
        assert_eq!(summary.overview.total_raised, 642_500);
    }

    #[test]
    fn test_demo_flagged_campaigns() {
        let coordinator = seeded();
        let query = CampaignQuery {
            filter: CampaignFilter {
                flagged: Some(true),
                ..Default::default()
            },
            sort: None,
        };

        let ids: Vec<String> = coordinator
            .list_campaigns(&query)
            .into_iter()
            .map(|view| view.campaign.id)
            .collect();
        assert_eq!(ids, vec!["camp_3", "camp_4"]);
    }

    #[test]
    fn test_new_ids_follow_the_seed() {
        let coordinator = seeded();
        let view = coordinator
            .submit_campaign(
                crate::core::campaigns::CampaignDraft {
                    title: "Flood Relief".to_string(),
                    creator: "Relief Org".to_string(),
                    category: "Emergency".to_string(),
                    goal: 100_000,
                    raised: 0,
                },
                &Default::default(),
            )
            .unwrap();

        assert_eq!(view.campaign.id, "camp_5");
    }
}
