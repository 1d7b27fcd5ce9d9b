//! Liveness state of a cluster node.

use serde::{Deserialize, Serialize};

/// Coarse node state broadcast between peers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum NodeState {
  /// The node accepts activations and invocations.
  Running,
  /// The node is draining; no new activations are placed on it.
  Stopping,
  /// The node has left or finished shutting down.
  Stopped,
}

impl NodeState {
  /// Returns true when the node accepts new activations.
  #[must_use]
  pub const fn is_running(self) -> bool {
    matches!(self, Self::Running)
  }
}
