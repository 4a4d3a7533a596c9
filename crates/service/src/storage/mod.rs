//! Storage abstractions for service layer
//!
//! The persistence gateway stores each collection as a whole snapshot; the
//! registry service loads, mutates, and writes back a full collection per
//! operation.

use async_trait::async_trait;
use models::Association;

use crate::errors::ServiceError;

pub mod json_snapshot_store;

pub use json_snapshot_store::JsonSnapshotStore;

/// Snapshot collection holding approved associations.
pub const REGISTRY: &str = "registry";
/// Snapshot collection holding submitted-but-unapproved requests.
pub const PENDING: &str = "pending";

/// Whole-collection persistence gateway.
#[async_trait]
pub trait SnapshotStore: Send + Sync {
    /// Load a collection snapshot. A collection with no prior snapshot
    /// loads as an empty sequence.
    async fn load(&self, collection: &str) -> Result<Vec<Association>, ServiceError>;

    /// Replace the prior snapshot of a collection with `items`.
    async fn save(&self, collection: &str, items: &[Association]) -> Result<(), ServiceError>;
}
