// Error taxonomy shared by the registries and the coordinator.
//
// Every variant names the entity and the attempted action so the staff
// surface can report exactly what was refused. None of these are transient;
// callers should not retry them blindly.

use crate::core::risk::RiskError;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ModerationError {
    #[error("{kind} `{id}` not found")]
    NotFound { kind: &'static str, id: String },

    #[error("Cannot {action} {kind} `{id}` while it is {from}")]
    IllegalTransition {
        kind: &'static str,
        id: String,
        action: String,
        from: String,
    },

    #[error(transparent)]
    InvalidSignal(#[from] RiskError),

    #[error("{kind} `{id}` changed during {action} (expected version {expected}, found {found})")]
    Conflict {
        kind: &'static str,
        id: String,
        action: String,
        expected: u64,
        found: u64,
    },

    #[error("Refusing to {action} `{id}` without an acting staff identity")]
    Unauthorized { id: String, action: String },

    #[error("Invalid campaign submission: {0}")]
    InvalidCampaign(String),

    #[error("{kind} `{id}` already exists")]
    AlreadyExists { kind: &'static str, id: String },
}

impl ModerationError {
    pub(crate) fn campaign_not_found(id: &str) -> Self {
        ModerationError::NotFound {
            kind: "campaign",
            id: id.to_string(),
        }
    }

    pub(crate) fn alert_not_found(id: &str) -> Self {
        ModerationError::NotFound {
            kind: "alert",
            id: id.to_string(),
        }
    }
}
