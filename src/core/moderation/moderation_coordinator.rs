// Moderation coordinator - the only way staff actions reach the registries.
//
// Each action runs as: read the current record, check the edge against the
// state machine, then commit with the version that was read. If another
// action got there first the commit fails with `Conflict` and nothing is
// written. Callers (the Discord layer, tests) never touch registry
// mutations directly.

use super::moderation_errors::ModerationError;
use super::moderation_snapshot::ModerationSnapshot;
use crate::core::alerts::{
    AlertAction, AlertChange, AlertDraft, AlertFilter, AlertRegistry, AlertStore, AlertType,
    EntityKind, FraudAlert, Severity,
};
use crate::core::campaigns::{
    Campaign, CampaignAction, CampaignDraft, CampaignQuery, CampaignRegistry, CampaignStore,
    CampaignView, StatusChange,
};
use crate::core::reporting::ModerationReport;
use crate::core::risk::{self, RiskSignals};
use chrono::Utc;

/// Proof that a registry mutation comes from the coordinator. It can't be
/// built outside this module.
pub struct TransitionAuthority {
    _sealed: (),
}

impl TransitionAuthority {
    fn new() -> Self {
        Self { _sealed: () }
    }

    #[cfg(test)]
    pub(crate) fn for_tests() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone, Copy)]
pub struct CoordinatorPolicy {
    /// Reject actions that carry no staff identity.
    pub require_actor: bool,
}

impl Default for CoordinatorPolicy {
    fn default() -> Self {
        Self {
            require_actor: true,
        }
    }
}

/// Counts of records loaded by `restore`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RestoreSummary {
    pub campaigns: usize,
    pub alerts: usize,
}

pub struct ModerationCoordinator<C: CampaignStore, A: AlertStore> {
    campaigns: CampaignRegistry<C>,
    alerts: AlertRegistry<A>,
    policy: CoordinatorPolicy,
    authority: TransitionAuthority,
}

impl<C: CampaignStore, A: AlertStore> ModerationCoordinator<C, A> {
    pub fn new(campaign_store: C, alert_store: A, policy: CoordinatorPolicy) -> Self {
        Self {
            campaigns: CampaignRegistry::new(campaign_store),
            alerts: AlertRegistry::new(alert_store),
            policy,
            authority: TransitionAuthority::new(),
        }
    }

    pub fn reporting(&self) -> ModerationReport<'_, C, A> {
        ModerationReport::new(&self.campaigns, &self.alerts)
    }

    // ------------------------------------------------------------------------
    // Campaigns
    // ------------------------------------------------------------------------

    /// Intake: score the signals and register the campaign as `pending`.
    pub fn submit_campaign(
        &self,
        draft: CampaignDraft,
        signals: &RiskSignals,
    ) -> Result<CampaignView, ModerationError> {
        let assessment = risk::score(signals)?;
        let campaign = self.campaigns.create(draft, assessment)?;
        Ok(self.view(campaign))
    }

    pub fn campaign(&self, id: &str) -> Result<CampaignView, ModerationError> {
        let campaign = self.campaigns.get(id)?;
        Ok(self.view(campaign))
    }

    pub fn list_campaigns(&self, query: &CampaignQuery) -> Vec<CampaignView> {
        let open_refs = self.alerts.open_campaign_refs();
        self.campaigns.list(query, &open_refs)
    }

    pub fn approve_campaign(
        &self,
        id: &str,
        actor: Option<&str>,
        note: Option<&str>,
    ) -> Result<CampaignView, ModerationError> {
        self.apply_campaign_action(id, CampaignAction::Approve, actor, note)
    }

    pub fn reject_campaign(
        &self,
        id: &str,
        actor: Option<&str>,
        note: Option<&str>,
    ) -> Result<CampaignView, ModerationError> {
        self.apply_campaign_action(id, CampaignAction::Reject, actor, note)
    }

    pub fn flag_campaign(
        &self,
        id: &str,
        actor: Option<&str>,
        note: Option<&str>,
    ) -> Result<CampaignView, ModerationError> {
        self.apply_campaign_action(id, CampaignAction::Flag, actor, note)
    }

    fn apply_campaign_action(
        &self,
        id: &str,
        action: CampaignAction,
        actor: Option<&str>,
        note: Option<&str>,
    ) -> Result<CampaignView, ModerationError> {
        let actor = self.check_actor(id, &action.to_string(), actor)?;
        let current = self.campaigns.get(id)?;

        let Some(to) = current.status.after(action) else {
            tracing::warn!(
                campaign_id = id,
                action = %action,
                from = %current.status,
                "Rejected illegal campaign transition"
            );
            return Err(ModerationError::IllegalTransition {
                kind: "campaign",
                id: id.to_string(),
                action: action.to_string(),
                from: current.status.to_string(),
            });
        };

        let change = StatusChange {
            action,
            expected_version: current.version,
            to,
            actor,
            note: non_blank(note),
            at: Utc::now(),
        };

        let updated = self
            .campaigns
            .transition_status(&self.authority, id, &change)
            .map_err(|e| {
                tracing::warn!(
                    campaign_id = id,
                    action = %action,
                    "Campaign transition failed: {e}"
                );
                e
            })?;

        tracing::info!(
            campaign_id = id,
            actor = change.actor.as_deref().unwrap_or("-"),
            from = %current.status,
            to = %updated.status,
            "Campaign moderated"
        );
        Ok(self.view(updated))
    }

    fn view(&self, campaign: Campaign) -> CampaignView {
        let has_open_alert = self
            .alerts
            .all()
            .iter()
            .any(|alert| alert.holds_campaign(&campaign.id));
        CampaignView::derive(campaign, has_open_alert)
    }

    // ------------------------------------------------------------------------
    // Alerts
    // ------------------------------------------------------------------------

    /// Entry point for the detection pipeline.
    pub fn raise_alert(&self, draft: AlertDraft) -> Result<FraudAlert, ModerationError> {
        self.alerts.raise(draft)
    }

    /// Raise an alert whose severity comes from scoring `signals`, so alert
    /// priority and the campaign risk badge agree.
    pub fn raise_alert_from_signals(
        &self,
        alert_type: AlertType,
        title: &str,
        description: &str,
        entity_id: &str,
        entity_kind: EntityKind,
        signals: &RiskSignals,
    ) -> Result<FraudAlert, ModerationError> {
        let assessment = risk::score(signals)?;
        self.alerts.raise(AlertDraft {
            alert_type,
            severity: Severity::from_band(assessment.band),
            title: title.to_string(),
            description: description.to_string(),
            entity_id: entity_id.to_string(),
            entity_kind,
        })
    }

    pub fn alert(&self, id: &str) -> Result<FraudAlert, ModerationError> {
        self.alerts.get(id)
    }

    pub fn list_alerts(&self, filter: &AlertFilter) -> Vec<FraudAlert> {
        self.alerts.list(filter)
    }

    pub fn investigate_alert(
        &self,
        id: &str,
        actor: Option<&str>,
    ) -> Result<FraudAlert, ModerationError> {
        self.apply_alert_action(id, AlertAction::Investigate, actor)
    }

    /// Same edge as investigate, but marks the alert urgent.
    pub fn escalate_alert(
        &self,
        id: &str,
        actor: Option<&str>,
    ) -> Result<FraudAlert, ModerationError> {
        self.apply_alert_action(id, AlertAction::Escalate, actor)
    }

    pub fn resolve_alert(&self, id: &str, actor: Option<&str>) -> Result<FraudAlert, ModerationError> {
        self.apply_alert_action(id, AlertAction::Resolve, actor)
    }

    fn apply_alert_action(
        &self,
        id: &str,
        action: AlertAction,
        actor: Option<&str>,
    ) -> Result<FraudAlert, ModerationError> {
        let actor = self.check_actor(id, &action.to_string(), actor)?;
        let current = self.alerts.get(id)?;

        let Some(to) = current.status.after(action) else {
            tracing::warn!(
                alert_id = id,
                action = %action,
                from = %current.status,
                "Rejected illegal alert transition"
            );
            return Err(ModerationError::IllegalTransition {
                kind: "alert",
                id: id.to_string(),
                action: action.to_string(),
                from: current.status.to_string(),
            });
        };

        let change = AlertChange {
            action,
            expected_version: current.version,
            to,
            at: Utc::now(),
        };

        let updated = self
            .alerts
            .transition_status(&self.authority, id, &change)
            .map_err(|e| {
                tracing::warn!(alert_id = id, action = %action, "Alert transition failed: {e}");
                e
            })?;

        tracing::info!(
            alert_id = id,
            actor = actor.as_deref().unwrap_or("-"),
            from = %current.status,
            to = %updated.status,
            escalated = updated.escalated,
            "Alert triaged"
        );
        Ok(updated)
    }

    // ------------------------------------------------------------------------
    // Snapshots
    // ------------------------------------------------------------------------

    pub fn snapshot(&self) -> ModerationSnapshot {
        ModerationSnapshot {
            campaigns: self.campaigns.all(),
            alerts: self.alerts.all(),
            exported_at: Utc::now(),
        }
    }

    /// Load every record from `snapshot`. Stops at the first invalid or
    /// duplicate record; records loaded before it stay loaded.
    pub fn restore(&self, snapshot: ModerationSnapshot) -> Result<RestoreSummary, ModerationError> {
        let summary = RestoreSummary {
            campaigns: snapshot.campaigns.len(),
            alerts: snapshot.alerts.len(),
        };
        for campaign in snapshot.campaigns {
            self.campaigns.restore(campaign)?;
        }
        for alert in snapshot.alerts {
            self.alerts.restore(alert)?;
        }
        Ok(summary)
    }

    fn check_actor(
        &self,
        id: &str,
        action: &str,
        actor: Option<&str>,
    ) -> Result<Option<String>, ModerationError> {
        let actor = non_blank(actor);
        if actor.is_none() && self.policy.require_actor {
            tracing::warn!(entity_id = id, action, "Rejected anonymous moderation action");
            return Err(ModerationError::Unauthorized {
                id: id.to_string(),
                action: action.to_string(),
            });
        }
        Ok(actor)
    }
}

fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}
