// Snapshot persistence and the built-in demo data set.

pub mod demo_seed;
pub mod json_store;

pub use demo_seed::demo_snapshot;
pub use json_store::JsonSnapshotStore;
