//! Capability query contract between cluster nodes.

use std::{boxed::Box, future::Future, pin::Pin};

use crate::core::{CapabilityAnswer, CapabilityQueryError, NodeAddress, NodeState};

/// Boxed future returned by the async node contracts.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Remote capability surface exposed by every node.
///
/// Implementations are references produced by the messaging layer; calls are
/// plain actor-style RPCs with no bespoke wire format.
pub trait NodeCapabilities: Send + Sync {
  /// Asks whether the node can activate the given actor interface.
  ///
  /// # Errors
  ///
  /// Returns [`CapabilityQueryError`] when the probe cannot reach the node
  /// or the transport fails.
  fn can_activate<'a>(&'a self, interface: &'a str) -> BoxFuture<'a, Result<CapabilityAnswer, CapabilityQueryError>>;

  /// Notifies the node that the given peer changed state.
  ///
  /// # Errors
  ///
  /// Returns [`CapabilityQueryError`] when the notification cannot be
  /// delivered.
  fn node_mode_changed<'a>(
    &'a self,
    address: NodeAddress,
    state: NodeState,
  ) -> BoxFuture<'a, Result<(), CapabilityQueryError>>;
}
