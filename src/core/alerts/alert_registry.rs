// Fraud alert registry - owns every alert ever raised.
//
// Raising is open to the detection pipeline and is not idempotent: two raises
// for the same event produce two alerts. Triage changes go through the
// moderation coordinator.

use super::alert_models::{
    AlertChange, AlertDraft, AlertFilter, AlertStatus, EntityKind, FraudAlert,
};
use crate::core::moderation::{ModerationError, TransitionAuthority};
use chrono::Utc;
use std::collections::HashSet;

/// Storage for alerts, keyed by id. Same atomicity contract as
/// `CampaignStore::commit_status`.
pub trait AlertStore: Send + Sync {
    fn insert(&self, alert: FraudAlert) -> Result<(), ModerationError>;
    fn get(&self, id: &str) -> Option<FraudAlert>;
    fn all(&self) -> Vec<FraudAlert>;
    fn next_seq(&self) -> u64;
    fn commit_status(&self, id: &str, change: &AlertChange) -> Result<FraudAlert, ModerationError>;
}

pub struct AlertRegistry<S: AlertStore> {
    store: S,
}

impl<S: AlertStore> AlertRegistry<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Raise a new alert in `active` state.
    pub fn raise(&self, draft: AlertDraft) -> Result<FraudAlert, ModerationError> {
        let alert = loop {
            let seq = self.store.next_seq();
            let candidate = FraudAlert {
                id: format!("alert_{seq}"),
                alert_type: draft.alert_type,
                severity: draft.severity,
                title: draft.title.clone(),
                description: draft.description.clone(),
                entity_id: draft.entity_id.clone(),
                entity_kind: draft.entity_kind,
                created_at: Utc::now(),
                status: AlertStatus::Active,
                escalated: false,
                resolved_at: None,
                version: 1,
                seq,
            };
            match self.store.insert(candidate.clone()) {
                Ok(()) => break candidate,
                Err(ModerationError::AlreadyExists { .. }) => continue,
                Err(e) => return Err(e),
            }
        };

        tracing::info!(
            alert_id = %alert.id,
            alert_type = ?alert.alert_type,
            severity = %alert.severity,
            entity = %alert.entity_id,
            "Fraud alert raised"
        );
        Ok(alert)
    }

    pub fn restore(&self, alert: FraudAlert) -> Result<(), ModerationError> {
        self.store.insert(alert)
    }

    pub fn get(&self, id: &str) -> Result<FraudAlert, ModerationError> {
        self.store
            .get(id)
            .ok_or_else(|| ModerationError::alert_not_found(id))
    }

    /// All alerts in the order they were raised.
    pub fn all(&self) -> Vec<FraudAlert> {
        let mut alerts = self.store.all();
        alerts.sort_by_key(|a| a.seq);
        alerts
    }

    pub fn list(&self, filter: &AlertFilter) -> Vec<FraudAlert> {
        self.all()
            .into_iter()
            .filter(|alert| filter.matches(alert))
            .collect()
    }

    /// Ids of campaigns that still have an unresolved alert.
    pub fn open_campaign_refs(&self) -> HashSet<String> {
        self.store
            .all()
            .into_iter()
            .filter(|a| a.status.is_open() && a.entity_kind == EntityKind::Campaign)
            .map(|a| a.entity_id)
            .collect()
    }

    /// Commit a triage step. Only the moderation coordinator can call this.
    pub fn transition_status(
        &self,
        _authority: &TransitionAuthority,
        id: &str,
        change: &AlertChange,
    ) -> Result<FraudAlert, ModerationError> {
        self.store.commit_status(id, change)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::alerts::{AlertAction, AlertType, Severity};
    use crate::infra::alerts::InMemoryAlertStore;

    fn draft(entity_id: &str, kind: EntityKind, severity: Severity) -> AlertDraft {
        AlertDraft {
            alert_type: AlertType::DuplicateContent,
            severity,
            title: "Duplicate Campaign Content Detected".to_string(),
            description: "Story matches 85% with an existing campaign".to_string(),
            entity_id: entity_id.to_string(),
            entity_kind: kind,
        }
    }

    #[test]
    fn test_raise_starts_active() {
        let registry = AlertRegistry::new(InMemoryAlertStore::new());
        let alert = registry
            .raise(draft("camp_1", EntityKind::Campaign, Severity::High))
            .unwrap();

        assert_eq!(alert.status, AlertStatus::Active);
        assert!(!alert.escalated);
        assert_eq!(registry.get(&alert.id).unwrap(), alert);
    }

    #[test]
    fn test_duplicate_raises_are_kept() {
        let registry = AlertRegistry::new(InMemoryAlertStore::new());
        let a = registry
            .raise(draft("camp_1", EntityKind::Campaign, Severity::High))
            .unwrap();
        let b = registry
            .raise(draft("camp_1", EntityKind::Campaign, Severity::High))
            .unwrap();

        assert_ne!(a.id, b.id);
        assert_eq!(registry.all().len(), 2);
    }

    #[test]
    fn test_list_filters() {
        let registry = AlertRegistry::new(InMemoryAlertStore::new());
        registry
            .raise(draft("camp_1", EntityKind::Campaign, Severity::High))
            .unwrap();
        registry
            .raise(draft("user_456", EntityKind::User, Severity::High))
            .unwrap();
        registry
            .raise(draft("camp_2", EntityKind::Campaign, Severity::Medium))
            .unwrap();

        let filter = AlertFilter {
            severity: Some(Severity::High),
            entity_kind: Some(EntityKind::Campaign),
            ..Default::default()
        };
        let alerts = registry.list(&filter);
        assert_eq!(alerts.len(), 1);
        assert_eq!(alerts[0].entity_id, "camp_1");

        let user_alert = registry.list(&AlertFilter {
            entity_kind: Some(EntityKind::User),
            ..Default::default()
        });
        let change = AlertChange {
            action: AlertAction::Investigate,
            expected_version: 1,
            to: AlertStatus::Investigating,
            at: Utc::now(),
        };
        registry
            .transition_status(
                &TransitionAuthority::for_tests(),
                &user_alert[0].id,
                &change,
            )
            .unwrap();

        let investigating = registry.list(&AlertFilter {
            status: Some(AlertStatus::Investigating),
            ..Default::default()
        });
        assert_eq!(investigating.len(), 1);
        assert_eq!(investigating[0].entity_id, "user_456");

        let active = registry.list(&AlertFilter {
            status: Some(AlertStatus::Active),
            ..Default::default()
        });
        assert_eq!(active.len(), 2);
        assert!(active.iter().all(|a| a.entity_id != "user_456"));
    }

    #[test]
    fn test_open_refs_skip_users_and_resolved() {
        let registry = AlertRegistry::new(InMemoryAlertStore::new());
        let authority = TransitionAuthority::for_tests();
        let alert = registry
            .raise(draft("camp_1", EntityKind::Campaign, Severity::High))
            .unwrap();
        registry
            .raise(draft("user_456", EntityKind::User, Severity::High))
            .unwrap();
        registry
            .raise(draft("camp_2", EntityKind::Campaign, Severity::Low))
            .unwrap();

        for (action, to, version) in [
            (AlertAction::Investigate, AlertStatus::Investigating, 1),
            (AlertAction::Resolve, AlertStatus::Resolved, 2),
        ] {
            let change = AlertChange {
                action,
                expected_version: version,
                to,
                at: Utc::now(),
            };
            registry
                .transition_status(&authority, &alert.id, &change)
                .unwrap();
        }

        let refs = registry.open_campaign_refs();
        assert_eq!(refs.len(), 1);
        assert!(refs.contains("camp_2"));
    }

    #[test]
    fn test_get_unknown_is_not_found() {
        let registry = AlertRegistry::new(InMemoryAlertStore::new());
        assert!(matches!(
            registry.get("alert_7"),
            Err(ModerationError::NotFound { kind: "alert", .. })
        ));
    }
}
