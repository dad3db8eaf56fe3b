// In-memory implementation of AlertStore. Same locking story as the
// campaign store: one shard lock per commit.

use crate::core::alerts::{AlertChange, AlertStore, FraudAlert};
use crate::core::moderation::ModerationError;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use std::sync::atomic::{AtomicU64, Ordering};

pub struct InMemoryAlertStore {
    data: DashMap<String, FraudAlert>,
    next_seq: AtomicU64,
}

impl InMemoryAlertStore {
    pub fn new() -> Self {
        Self {
            data: DashMap::new(),
            next_seq: AtomicU64::new(1),
        }
    }
}

impl AlertStore for InMemoryAlertStore {
    fn insert(&self, alert: FraudAlert) -> Result<(), ModerationError> {
        match self.data.entry(alert.id.clone()) {
            Entry::Occupied(_) => Err(ModerationError::AlreadyExists {
                kind: "alert",
                id: alert.id,
            }),
            Entry::Vacant(slot) => {
                self.next_seq.fetch_max(alert.seq.saturating_add(1), Ordering::SeqCst);
                slot.insert(alert);
                Ok(())
            }
        }
    }

    fn get(&self, id: &str) -> Option<FraudAlert> {
        self.data.get(id).map(|entry| entry.clone())
    }

    fn all(&self) -> Vec<FraudAlert> {
        self.data.iter().map(|entry| entry.value().clone()).collect()
    }

    fn next_seq(&self) -> u64 {
        self.next_seq.fetch_add(1, Ordering::SeqCst)
    }

    fn commit_status(&self, id: &str, change: &AlertChange) -> Result<FraudAlert, ModerationError> {
        let mut entry = self
            .data
            .get_mut(id)
            .ok_or_else(|| ModerationError::alert_not_found(id))?;

        if entry.version != change.expected_version {
            return Err(ModerationError::Conflict {
                kind: "alert",
                id: id.to_string(),
                action: change.action.to_string(),
                expected: change.expected_version,
                found: entry.version,
            });
        }

        entry.record_change(change);
        Ok(entry.clone())
    }
}

impl Default for InMemoryAlertStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::alerts::{AlertAction, AlertStatus, AlertType, EntityKind, Severity};
    use chrono::Utc;

    fn alert(id: &str) -> FraudAlert {
        FraudAlert {
            id: id.to_string(),
            alert_type: AlertType::SuspiciousActivity,
            severity: Severity::High,
            title: "Unusual Donation Pattern".to_string(),
            description: "Multiple large donations from one IP within 5 minutes".to_string(),
            entity_id: "user_456".to_string(),
            entity_kind: EntityKind::User,
            created_at: Utc::now(),
            status: AlertStatus::Active,
            escalated: false,
            resolved_at: None,
            version: 1,
            seq: 1,
        }
    }

    #[test]
    fn test_escalation_commit_sets_marker() {
        let store = InMemoryAlertStore::new();
        store.insert(alert("alert_1")).unwrap();

        let change = AlertChange {
            action: AlertAction::Escalate,
            expected_version: 1,
            to: AlertStatus::Investigating,
            at: Utc::now(),
        };
        let updated = store.commit_status("alert_1", &change).unwrap();

        assert!(updated.escalated);
        assert_eq!(updated.status, AlertStatus::Investigating);
        assert_eq!(store.get("alert_1").unwrap().version, 2);
    }

    #[test]
    fn test_stale_commit_is_a_conflict() {
        let store = InMemoryAlertStore::new();
        store.insert(alert("alert_1")).unwrap();

        let change = AlertChange {
            action: AlertAction::Investigate,
            expected_version: 3,
            to: AlertStatus::Investigating,
            at: Utc::now(),
        };
        assert!(matches!(
            store.commit_status("alert_1", &change),
            Err(ModerationError::Conflict { found: 1, .. })
        ));
        assert_eq!(store.get("alert_1").unwrap().status, AlertStatus::Active);
    }
}
