// Aggregate reporting over the two registries.
//
// Everything is recomputed from the stores on each call, so a read right
// after a moderation action always sees it. Empty registries give zeros.

use crate::core::alerts::{AlertRegistry, AlertStatus, AlertStore, AlertType};
use crate::core::campaigns::{CampaignRegistry, CampaignStatus, CampaignStore};
use crate::core::risk::RiskBand;
use serde::Serialize;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RiskDistribution {
    pub low: usize,
    pub medium: usize,
    pub high: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AlertTypeCount {
    pub alert_type: AlertType,
    pub count: usize,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PlatformOverview {
    pub total_campaigns: usize,
    pub total_raised: u64,
    pub total_goal: u64,
    pub pending_approvals: usize,
    pub flagged_campaigns: usize,
}

/// Ratios in `[0, 1]`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct TriageMetrics {
    pub resolution_rate: f64,
    pub escalation_rate: f64,
    pub flagged_share: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModerationSummary {
    pub pending_count: usize,
    pub active_alert_count: usize,
    pub investigating_alert_count: usize,
    pub risk_distribution: RiskDistribution,
    pub alert_types: Vec<AlertTypeCount>,
    pub overview: PlatformOverview,
    pub triage: TriageMetrics,
}

pub struct ModerationReport<'a, C: CampaignStore, A: AlertStore> {
    campaigns: &'a CampaignRegistry<C>,
    alerts: &'a AlertRegistry<A>,
}

impl<'a, C: CampaignStore, A: AlertStore> ModerationReport<'a, C, A> {
    pub fn new(campaigns: &'a CampaignRegistry<C>, alerts: &'a AlertRegistry<A>) -> Self {
        Self { campaigns, alerts }
    }

    pub fn pending_count(&self) -> usize {
        self.campaigns
            .all()
            .iter()
            .filter(|c| c.status == CampaignStatus::Pending)
            .count()
    }

    pub fn active_alert_count(&self) -> usize {
        self.count_alerts(AlertStatus::Active)
    }

    pub fn investigating_alert_count(&self) -> usize {
        self.count_alerts(AlertStatus::Investigating)
    }

    fn count_alerts(&self, status: AlertStatus) -> usize {
        self.alerts
            .all()
            .iter()
            .filter(|a| a.status == status)
            .count()
    }

    pub fn risk_distribution(&self) -> RiskDistribution {
        let mut distribution = RiskDistribution::default();
        for campaign in self.campaigns.all() {
            match campaign.risk_band() {
                RiskBand::Low => distribution.low += 1,
                RiskBand::Medium => distribution.medium += 1,
                RiskBand::High => distribution.high += 1,
            }
        }
        distribution
    }

    /// Alerts per type, every type listed even at zero.
    pub fn alert_type_breakdown(&self) -> Vec<AlertTypeCount> {
        let alerts = self.alerts.all();
        AlertType::ALL
            .iter()
            .map(|&alert_type| AlertTypeCount {
                alert_type,
                count: alerts.iter().filter(|a| a.alert_type == alert_type).count(),
            })
            .collect()
    }

    pub fn platform_overview(&self) -> PlatformOverview {
        let open_refs = self.alerts.open_campaign_refs();
        let campaigns = self.campaigns.all();

        PlatformOverview {
            total_campaigns: campaigns.len(),
            // Amounts are unbounded; totals saturate instead of wrapping.
            total_raised: campaigns
                .iter()
                .map(|c| c.raised)
                .fold(0u64, u64::saturating_add),
            total_goal: campaigns
                .iter()
                .map(|c| c.goal)
                .fold(0u64, u64::saturating_add),
            pending_approvals: campaigns
                .iter()
                .filter(|c| c.status == CampaignStatus::Pending)
                .count(),
            flagged_campaigns: campaigns
                .iter()
                .filter(|c| c.status == CampaignStatus::Flagged || open_refs.contains(&c.id))
                .count(),
        }
    }

    pub fn triage_metrics(&self) -> TriageMetrics {
        let alerts = self.alerts.all();
        let overview = self.platform_overview();

        let resolved = alerts
            .iter()
            .filter(|a| a.status == AlertStatus::Resolved)
            .count();
        let escalated = alerts.iter().filter(|a| a.escalated).count();

        TriageMetrics {
            resolution_rate: ratio(resolved, alerts.len()),
            escalation_rate: ratio(escalated, alerts.len()),
            flagged_share: ratio(overview.flagged_campaigns, overview.total_campaigns),
        }
    }

    pub fn summary(&self) -> ModerationSummary {
        ModerationSummary {
            pending_count: self.pending_count(),
            active_alert_count: self.active_alert_count(),
            investigating_alert_count: self.investigating_alert_count(),
            risk_distribution: self.risk_distribution(),
            alert_types: self.alert_type_breakdown(),
            overview: self.platform_overview(),
            triage: self.triage_metrics(),
        }
    }
}

fn ratio(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        0.0
    } else {
        part as f64 / whole as f64
    }
}

#[cfg(test)]
mod tests {
    use crate::core::alerts::{AlertDraft, AlertType, EntityKind, Severity};
    use crate::core::campaigns::CampaignDraft;
    use crate::core::moderation::{CoordinatorPolicy, ModerationCoordinator};
    use crate::core::risk::{DocumentCheck, RiskSignals};
    use crate::infra::alerts::InMemoryAlertStore;
    use crate::infra::campaigns::InMemoryCampaignStore;

    type Coordinator = ModerationCoordinator<InMemoryCampaignStore, InMemoryAlertStore>;

    fn coordinator() -> Coordinator {
        ModerationCoordinator::new(
            InMemoryCampaignStore::new(),
            InMemoryAlertStore::new(),
            CoordinatorPolicy::default(),
        )
    }

    fn submit(coordinator: &Coordinator, raised: u64, signals: RiskSignals) -> String {
        coordinator
            .submit_campaign(
                CampaignDraft {
                    title: "Campaign".to_string(),
                    creator: "Creator".to_string(),
                    category: "Medical".to_string(),
                    goal: 100_000,
                    raised,
                },
                &signals,
            )
            .unwrap()
            .campaign
            .id
    }

    fn raise(coordinator: &Coordinator, alert_type: AlertType, entity_id: &str) -> String {
        coordinator
            .raise_alert(AlertDraft {
                alert_type,
                severity: Severity::Medium,
                title: "Alert".to_string(),
                description: "Something looks off".to_string(),
                entity_id: entity_id.to_string(),
                entity_kind: EntityKind::Campaign,
            })
            .unwrap()
            .id
    }

    #[test]
    fn test_empty_registries_report_zeros() {
        let coordinator = coordinator();
        let summary = coordinator.reporting().summary();

        assert_eq!(summary.pending_count, 0);
        assert_eq!(summary.active_alert_count, 0);
        assert_eq!(summary.risk_distribution, Default::default());
        assert_eq!(summary.triage.resolution_rate, 0.0);
        assert_eq!(summary.triage.flagged_share, 0.0);
        assert!(summary.alert_types.iter().all(|t| t.count == 0));
    }

    #[test]
    fn test_counts_follow_mutations() {
        let coordinator = coordinator();
        let a = submit(&coordinator, 10, RiskSignals::default());
        submit(&coordinator, 20, RiskSignals::default());
        let alert = raise(&coordinator, AlertType::FakeDocuments, &a);

        let report = coordinator.reporting();
        assert_eq!(report.pending_count(), 2);
        assert_eq!(report.active_alert_count(), 1);

        coordinator.approve_campaign(&a, Some("mod"), None).unwrap();
        coordinator.investigate_alert(&alert, Some("mod")).unwrap();

        let report = coordinator.reporting();
        assert_eq!(report.pending_count(), 1);
        assert_eq!(report.active_alert_count(), 0);
        assert_eq!(report.investigating_alert_count(), 1);
    }

    #[test]
    fn test_risk_distribution() {
        let coordinator = coordinator();
        submit(&coordinator, 0, RiskSignals::default());
        submit(
            &coordinator,
            0,
            RiskSignals {
                content_similarity_pct: Some(100.0),
                document_check: Some(DocumentCheck::Pending),
                ..Default::default()
            },
        );
        submit(
            &coordinator,
            0,
            RiskSignals {
                content_similarity_pct: Some(100.0),
                document_check: Some(DocumentCheck::Failed),
                campaigns_last_24h: Some(5),
                ..Default::default()
            },
        );

        let distribution = coordinator.reporting().risk_distribution();
        assert_eq!(distribution.low, 1);
        assert_eq!(distribution.medium, 1);
        assert_eq!(distribution.high, 1);
    }

    #[test]
    fn test_breakdown_overview_and_metrics() {
        let coordinator = coordinator();
        let a = submit(&coordinator, 40_000, RiskSignals::default());
        let b = submit(&coordinator, 60_000, RiskSignals::default());
        submit(&coordinator, 0, RiskSignals::default());
        submit(&coordinator, 0, RiskSignals::default());

        coordinator.flag_campaign(&a, Some("mod"), None).unwrap();
        let dup = raise(&coordinator, AlertType::DuplicateContent, &b);
        let copied = raise(&coordinator, AlertType::DuplicateContent, "camp_99");
        raise(&coordinator, AlertType::RapidCampaigns, "camp_98");
        raise(&coordinator, AlertType::FakeDocuments, "camp_97");

        coordinator.escalate_alert(&dup, Some("mod")).unwrap();
        coordinator.investigate_alert(&copied, Some("mod")).unwrap();
        coordinator.resolve_alert(&copied, Some("mod")).unwrap();

        let report = coordinator.reporting();

        let breakdown = report.alert_type_breakdown();
        assert_eq!(breakdown.len(), 4);
        assert_eq!(breakdown[0].alert_type, AlertType::DuplicateContent);
        assert_eq!(breakdown[0].count, 2);
        assert_eq!(breakdown[1].count, 0);

        let overview = report.platform_overview();
        assert_eq!(overview.total_campaigns, 4);
        assert_eq!(overview.total_raised, 100_000);
        assert_eq!(overview.total_goal, 400_000);
        assert_eq!(overview.pending_approvals, 3);
        assert_eq!(overview.flagged_campaigns, 2);

        let metrics = report.triage_metrics();
        assert_eq!(metrics.resolution_rate, 0.25);
        assert_eq!(metrics.escalation_rate, 0.25);
        assert_eq!(metrics.flagged_share, 0.5);
    }

    #[test]
    fn test_totals_saturate_on_huge_amounts() {
        let coordinator = coordinator();
        submit(&coordinator, u64::MAX / 2 + 1, RiskSignals::default());
        submit(&coordinator, u64::MAX / 2 + 1, RiskSignals::default());

        let summary = coordinator.reporting().summary();
        assert_eq!(summary.overview.total_campaigns, 2);
        assert_eq!(summary.overview.total_raised, u64::MAX);
        assert_eq!(summary.overview.total_goal, 200_000);
    }
}
