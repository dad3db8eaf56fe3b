// Campaign registry - the authoritative set of campaign records.
//
// Querying (filter + sort) lives here. Status changes are accepted only from
// the moderation coordinator, which proves itself with a `TransitionAuthority`.

use super::campaign_models::{
    Campaign, CampaignDraft, CampaignQuery, CampaignSortKey, CampaignView, SortOrder, StatusChange,
};
use crate::core::moderation::{ModerationError, TransitionAuthority};
use crate::core::risk::RiskAssessment;
use chrono::Utc;
use std::collections::HashSet;

// ============================================================================
// STORAGE TRAIT (PORT)
// ============================================================================

/// Storage for campaign records, keyed by id.
///
/// Implementations must make `commit_status` atomic per id: compare the
/// version and apply the change under one lock, so two staff members acting
/// on the same campaign can never both win.
pub trait CampaignStore: Send + Sync {
    /// Insert a new record. Fails if the id is already taken.
    fn insert(&self, campaign: Campaign) -> Result<(), ModerationError>;

    fn get(&self, id: &str) -> Option<Campaign>;

    /// Every record, in no particular order.
    fn all(&self) -> Vec<Campaign>;

    /// Reserve the next insertion sequence number.
    fn next_seq(&self) -> u64;

    /// Apply `change` if the record is still at `change.expected_version`.
    fn commit_status(&self, id: &str, change: &StatusChange) -> Result<Campaign, ModerationError>;
}

// ============================================================================
// REGISTRY
// ============================================================================

pub struct CampaignRegistry<S: CampaignStore> {
    store: S,
}

impl<S: CampaignStore> CampaignRegistry<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Accept a campaign from the intake flow. It starts `pending`.
    pub fn create(
        &self,
        draft: CampaignDraft,
        risk: RiskAssessment,
    ) -> Result<Campaign, ModerationError> {
        if draft.title.trim().is_empty() {
            return Err(ModerationError::InvalidCampaign(
                "title must not be empty".to_string(),
            ));
        }
        if draft.goal == 0 {
            return Err(ModerationError::InvalidCampaign(
                "goal must be greater than zero".to_string(),
            ));
        }

        // Restored records may already use an id we'd generate; skip past them.
        let campaign = loop {
            let seq = self.store.next_seq();
            let candidate = draft
                .clone()
                .into_campaign(format!("camp_{seq}"), seq, risk, Utc::now());
            match self.store.insert(candidate.clone()) {
                Ok(()) => break candidate,
                Err(ModerationError::AlreadyExists { .. }) => continue,
                Err(e) => return Err(e),
            }
        };

        tracing::info!(
            campaign_id = %campaign.id,
            risk_score = campaign.risk_score,
            "Campaign submitted for review"
        );
        Ok(campaign)
    }

    /// Load a record exactly as it was exported (status, version and log
    /// included).
    pub fn restore(&self, campaign: Campaign) -> Result<(), ModerationError> {
        if campaign.goal == 0 {
            return Err(ModerationError::InvalidCampaign(format!(
                "campaign `{}` has a zero goal",
                campaign.id
            )));
        }
        RiskAssessment::from_score(campaign.risk_score)?;
        self.store.insert(campaign)
    }

    pub fn get(&self, id: &str) -> Result<Campaign, ModerationError> {
        self.store
            .get(id)
            .ok_or_else(|| ModerationError::campaign_not_found(id))
    }

    /// All campaigns in insertion order.
    pub fn all(&self) -> Vec<Campaign> {
        let mut campaigns = self.store.all();
        campaigns.sort_by_key(|c| c.seq);
        campaigns
    }

    /// Filter and sort the queue.
    ///
    /// `open_alert_refs` holds the ids of campaigns with unresolved alerts;
    /// it feeds the derived `flagged` attribute. Ties keep insertion order.
    pub fn list(&self, query: &CampaignQuery, open_alert_refs: &HashSet<String>) -> Vec<CampaignView> {
        let filter = &query.filter;
        let category = filter.category.as_ref().map(|c| c.to_lowercase());
        let search = filter.search.as_ref().map(|s| s.to_lowercase());

        let mut views: Vec<CampaignView> = self
            .all()
            .into_iter()
            .map(|campaign| {
                let has_open_alert = open_alert_refs.contains(&campaign.id);
                CampaignView::derive(campaign, has_open_alert)
            })
            .filter(|view| {
                let c = &view.campaign;
                filter.status.map_or(true, |s| c.status == s)
                    && category
                        .as_ref()
                        .map_or(true, |cat| c.category.to_lowercase() == *cat)
                    && filter.flagged.map_or(true, |f| view.flagged == f)
                    && search
                        .as_ref()
                        .map_or(true, |needle| c.title.to_lowercase().contains(needle.as_str()))
            })
            .collect();

        if let Some(sort) = query.sort {
            // sort_by is stable, so equal keys stay in insertion order.
            views.sort_by(|a, b| {
                let (a, b) = (&a.campaign, &b.campaign);
                let ordering = match sort.key {
                    CampaignSortKey::Raised => a.raised.cmp(&b.raised),
                    CampaignSortKey::Goal => a.goal.cmp(&b.goal),
                    CampaignSortKey::CreatedAt => a.created_at.cmp(&b.created_at),
                    CampaignSortKey::RiskScore => a.risk_score.total_cmp(&b.risk_score),
                };
                match sort.order {
                    SortOrder::Ascending => ordering,
                    SortOrder::Descending => ordering.reverse(),
                }
            });
        }

        views
    }

    /// Commit a status change. Only the moderation coordinator can call this.
    pub fn transition_status(
        &self,
        _authority: &TransitionAuthority,
        id: &str,
        change: &StatusChange,
    ) -> Result<Campaign, ModerationError> {
        self.store.commit_status(id, change)
    }
}
