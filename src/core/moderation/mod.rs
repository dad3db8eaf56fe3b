// Core moderation module - the coordinator that sequences staff actions,
// the shared error taxonomy and the snapshot port.

pub mod moderation_coordinator;
pub mod moderation_errors;
pub mod moderation_snapshot;

pub use moderation_coordinator::*;
pub use moderation_errors::ModerationError;
pub use moderation_snapshot::{ModerationSnapshot, SnapshotError, SnapshotStore};
