//! Execution-layer contract consumed during placement.

use std::sync::Arc;

use crate::{
  core::{NodeAddress, NodeState},
  std::node_capabilities::NodeCapabilities,
};

/// Hooks into the activation and execution layer of the local node.
pub trait ActivationExecutor: Send + Sync {
  /// Static check: whether this node can activate the given interface.
  fn can_activate_actor(&self, interface: &str) -> bool;

  /// Current state of the local node.
  fn state(&self) -> NodeState;

  /// Produces the capability RPC handle for a peer node.
  fn capability_client(&self, address: &NodeAddress) -> Arc<dyn NodeCapabilities>;
}
