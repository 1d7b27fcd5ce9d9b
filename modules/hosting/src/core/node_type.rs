//! Role of the local node within the cluster.

use serde::{Deserialize, Serialize};

/// Configured role of a node process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum NodeType {
  /// Hosts actor activations.
  Server,
  /// Issues invocations only; never hosts activations.
  Client,
}

impl NodeType {
  /// Returns true for server-mode nodes.
  #[must_use]
  pub const fn is_server(self) -> bool {
    matches!(self, Self::Server)
  }

  /// Returns true for client-mode nodes.
  #[must_use]
  pub const fn is_client(self) -> bool {
    matches!(self, Self::Client)
  }
}
