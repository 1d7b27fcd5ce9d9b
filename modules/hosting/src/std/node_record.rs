//! Per-node record tracked by the hosting subsystem.


use std::sync::Arc;

use hashbrown::HashMap;
use parking_lot::Mutex;
use portable_atomic::{AtomicBool, Ordering};

use crate::{
  core::{CapabilityAnswer, NodeAddress, NodeState},
  std::node_capabilities::NodeCapabilities,
};

/// Mutable view of one currently-or-recently-known cluster member.
///
/// Records are created on first sighting and never removed: a departed node
/// is flipped inactive so in-flight resolutions holding a reference observe
/// "inactive" rather than a missing entry. The `cannot_host_actors` flag is
/// sticky for the life of the record.
pub struct NodeRecord {
  address:            NodeAddress,
  capabilities:       Arc<dyn NodeCapabilities>,
  active:             AtomicBool,
  state:              Mutex<NodeState>,
  cannot_host_actors: AtomicBool,
  can_activate:       Mutex<HashMap<String, CapabilityAnswer>>,
}

impl NodeRecord {
  /// Creates a record for a freshly sighted node.
  #[must_use]
  pub fn new(address: NodeAddress, capabilities: Arc<dyn NodeCapabilities>) -> Self {
    Self {
      address,
      capabilities,
      active: AtomicBool::new(true),
      state: Mutex::new(NodeState::Running),
      cannot_host_actors: AtomicBool::new(false),
      can_activate: Mutex::new(HashMap::new()),
    }
  }

  /// Returns the node address.
  #[must_use]
  pub const fn address(&self) -> &NodeAddress {
    &self.address
  }

  /// Returns the capability RPC handle for this node.
  #[must_use]
  pub const fn capabilities(&self) -> &Arc<dyn NodeCapabilities> {
    &self.capabilities
  }

  /// Returns whether the node is in the current membership view.
  #[must_use]
  pub fn is_active(&self) -> bool {
    self.active.load(Ordering::Acquire)
  }

  /// Marks the node as departed and drops its cached answers.
  pub fn mark_departed(&self) {
    self.active.store(false, Ordering::Release);
    self.can_activate.lock().clear();
  }

  /// Marks a previously departed node as present again.
  ///
  /// The sticky `cannot_host_actors` flag survives the rejoin.
  pub fn mark_rejoined(&self) {
    *self.state.lock() = NodeState::Running;
    self.active.store(true, Ordering::Release);
  }

  /// Returns the last known state.
  #[must_use]
  pub fn state(&self) -> NodeState {
    *self.state.lock()
  }

  /// Applies a state change; leaving `Running` drops the cached answers.
  pub fn set_state(&self, state: NodeState) {
    *self.state.lock() = state;
    if !state.is_running() {
      self.can_activate.lock().clear();
    }
  }

  /// Returns the sticky "hosts nothing" flag.
  #[must_use]
  pub fn cannot_host_actors(&self) -> bool {
    self.cannot_host_actors.load(Ordering::Acquire)
  }

  /// Returns the memoized answer for the interface, if any.
  #[must_use]
  pub fn cached_answer(&self, interface: &str) -> Option<CapabilityAnswer> {
    self.can_activate.lock().get(interface).copied()
  }

  /// Memoizes a probe answer.
  ///
  /// `NoneSupported` flips the sticky flag and is additionally recorded as
  /// `No` for the probed interface.
  pub fn record_answer(&self, interface: &str, answer: CapabilityAnswer) {
    if answer.is_none_supported() {
      self.cannot_host_actors.store(true, Ordering::Release);
      self.can_activate.lock().insert(String::from(interface), CapabilityAnswer::No);
    } else {
      self.can_activate.lock().insert(String::from(interface), answer);
    }
  }

  /// Returns whether the node qualifies for selection for the interface.
  ///
  /// Unknown capability qualifies; only an explicit `No` disqualifies.
  #[must_use]
  pub fn is_candidate_for(&self, interface: &str) -> bool {
    self.is_active()
      && self.state().is_running()
      && !self.cannot_host_actors()
      && self.cached_answer(interface) != Some(CapabilityAnswer::No)
  }
}
