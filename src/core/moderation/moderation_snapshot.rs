// Point-in-time export of both registries.
//
// Used for the dashboard's data export and for seeding a fresh process.

use crate::core::alerts::FraudAlert;
use crate::core::campaigns::Campaign;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModerationSnapshot {
    pub campaigns: Vec<Campaign>,
    pub alerts: Vec<FraudAlert>,
    pub exported_at: DateTime<Utc>,
}

#[derive(Debug, thiserror::Error)]
pub enum SnapshotError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Where snapshots are written to and read back from.
#[async_trait]
pub trait SnapshotStore: Send + Sync {
    async fn save(&self, snapshot: &ModerationSnapshot) -> Result<(), SnapshotError>;

    /// `None` if nothing has been saved yet.
    async fn load(&self) -> Result<Option<ModerationSnapshot>, SnapshotError>;
}
