//! Placement class tag carried by actor interface descriptors.

use serde::{Deserialize, Serialize};

/// Placement class of an actor interface, decided once at registration time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ActorKind {
  /// Single-owner actor whose placement is arbitrated through the shared directory.
  Stateful,
  /// Load-balanced worker with no authoritative owner; placement is advisory per call.
  StatelessWorker,
}

impl ActorKind {
  /// Returns true for stateless-worker interfaces.
  #[must_use]
  pub const fn is_stateless_worker(self) -> bool {
    matches!(self, Self::StatelessWorker)
  }
}
