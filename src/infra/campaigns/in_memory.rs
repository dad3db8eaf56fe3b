// In-memory implementation of CampaignStore.
//
// DashMap shards its locks, so actions on different campaigns don't block
// each other while `get_mut` still serializes actions on the same campaign.

use crate::core::campaigns::{Campaign, CampaignStore, StatusChange};
use crate::core::moderation::ModerationError;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use std::sync::atomic::{AtomicU64, Ordering};

pub struct InMemoryCampaignStore {
    /// Maps campaign id -> record
    data: DashMap<String, Campaign>,
    next_seq: AtomicU64,
}

impl InMemoryCampaignStore {
    pub fn new() -> Self {
        Self {
            data: DashMap::new(),
            next_seq: AtomicU64::new(1),
        }
    }
}

impl CampaignStore for InMemoryCampaignStore {
    fn insert(&self, campaign: Campaign) -> Result<(), ModerationError> {
        match self.data.entry(campaign.id.clone()) {
            Entry::Occupied(_) => Err(ModerationError::AlreadyExists {
                kind: "campaign",
                id: campaign.id,
            }),
            Entry::Vacant(slot) => {
                // Restored records carry their own seq; never hand it out again.
                self.next_seq.fetch_max(campaign.seq.saturating_add(1), Ordering::SeqCst);
                slot.insert(campaign);
                Ok(())
            }
        }
    }

    fn get(&self, id: &str) -> Option<Campaign> {
        self.data.get(id).map(|entry| entry.clone())
    }

    fn all(&self) -> Vec<Campaign> {
        self.data.iter().map(|entry| entry.value().clone()).collect()
    }

    fn next_seq(&self) -> u64 {
        self.next_seq.fetch_add(1, Ordering::SeqCst)
    }

    fn commit_status(&self, id: &str, change: &StatusChange) -> Result<Campaign, ModerationError> {
        // The shard write lock is held until `entry` drops, so the version
        // check and the write can't interleave with another commit.
        let mut entry = self
            .data
            .get_mut(id)
            .ok_or_else(|| ModerationError::campaign_not_found(id))?;

        if entry.version != change.expected_version {
            return Err(ModerationError::Conflict {
                kind: "campaign",
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

impl Default for InMemoryCampaignStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::campaigns::{CampaignAction, CampaignDraft, CampaignStatus};
    use crate::core::risk::RiskAssessment;
    use chrono::Utc;

    fn campaign(id: &str, seq: u64) -> Campaign {
        CampaignDraft {
            title: "Help Build School Library".to_string(),
            creator: "Mary Johnson".to_string(),
            category: "Education".to_string(),
            goal: 250_000,
            raised: 187_500,
        }
        .into_campaign(
            id.to_string(),
            seq,
            RiskAssessment::from_score(1.2).unwrap(),
            Utc::now(),
        )
    }

    #[test]
    fn test_insert_and_get() {
        let store = InMemoryCampaignStore::new();
        store.insert(campaign("camp_1", 1)).unwrap();

        assert_eq!(store.get("camp_1").unwrap().raised, 187_500);
        assert!(store.get("camp_2").is_none());
    }

    #[test]
    fn test_duplicate_insert_is_rejected() {
        let store = InMemoryCampaignStore::new();
        store.insert(campaign("camp_1", 1)).unwrap();

        let err = store.insert(campaign("camp_1", 2)).unwrap_err();
        assert!(matches!(err, ModerationError::AlreadyExists { .. }));
    }

    #[test]
    fn test_seq_skips_restored_records() {
        let store = InMemoryCampaignStore::new();
        assert_eq!(store.next_seq(), 1);

        store.insert(campaign("camp_10", 10)).unwrap();
        assert_eq!(store.next_seq(), 11);
    }

    #[test]
    fn test_restoring_max_seq_does_not_overflow() {
        let store = InMemoryCampaignStore::new();
        store.insert(campaign("camp_max", u64::MAX)).unwrap();
        assert_eq!(store.next_seq(), u64::MAX);
    }

    #[test]
    fn test_commit_checks_version() {
        let store = InMemoryCampaignStore::new();
        store.insert(campaign("camp_1", 1)).unwrap();

        let mut change = StatusChange {
            action: CampaignAction::Approve,
            expected_version: 1,
            to: CampaignStatus::Approved,
            actor: None,
            note: None,
            at: Utc::now(),
        };
        let updated = store.commit_status("camp_1", &change).unwrap();
        assert_eq!(updated.version, 2);

        change.expected_version = 1;
        assert!(matches!(
            store.commit_status("camp_1", &change),
            Err(ModerationError::Conflict { .. })
        ));
        assert!(matches!(
            store.commit_status("camp_2", &change),
            Err(ModerationError::NotFound { .. })
        ));
    }
}
