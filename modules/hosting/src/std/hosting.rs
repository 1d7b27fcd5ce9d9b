//! Placement facade: resolver, capability responder, membership reaction.

#[cfg(test)]
mod tests;

use std::sync::{Arc, OnceLock};

use hashbrown::HashMap;
use parking_lot::{Mutex, RwLock};
use tokio::{
  sync::Notify,
  time::{Instant, sleep},
};
use tracing::{debug, error, warn};

use crate::{
  core::{
    ActorKey, ActorRef, CapabilityAnswer, CapabilityQueryError, HostingConfig, HostingError, NodeAddress, NodeState,
    NodeType, SelectionRng,
  },
  std::{
    activation_executor::ActivationExecutor, cluster_peer::ClusterPeer, distributed_directory::DistributedDirectory,
    node_record::NodeRecord,
  },
};

/// Name of the cluster-shared map holding stateful placements.
const DIRECTORY_NAME: &str = "distributed-directory";

/// Placement and directory facade of one cluster node.
///
/// Tracks the membership view, resolves actor references to owning nodes,
/// and answers capability queries issued by peers. Many tasks may resolve
/// placements concurrently; the only blocking point is the bounded
/// wait-for-servers loop inside candidate selection.
pub struct Hosting {
  node_type:     NodeType,
  config:        HostingConfig,
  peer:          Arc<dyn ClusterPeer>,
  executor:      Arc<dyn ActivationExecutor>,
  nodes:         RwLock<Arc<HashMap<NodeAddress, Arc<NodeRecord>>>>,
  server_nodes:  RwLock<Arc<Vec<Arc<NodeRecord>>>>,
  server_update: Mutex<()>,
  server_signal: Notify,
  local_cache:   Mutex<HashMap<ActorKey, NodeAddress>>,
  directory:     OnceLock<Arc<dyn DistributedDirectory>>,
  random:        SelectionRng,
}

impl Hosting {
  /// Creates the facade for one node.
  #[must_use]
  pub fn new(
    node_type: NodeType,
    config: HostingConfig,
    peer: Arc<dyn ClusterPeer>,
    executor: Arc<dyn ActivationExecutor>,
  ) -> Self {
    let random = SelectionRng::new(config.selection_seed());
    Self {
      node_type,
      config,
      peer,
      executor,
      nodes: RwLock::new(Arc::new(HashMap::new())),
      server_nodes: RwLock::new(Arc::new(Vec::new())),
      server_update: Mutex::new(()),
      server_signal: Notify::new(),
      local_cache: Mutex::new(HashMap::new()),
      directory: OnceLock::new(),
      random,
    }
  }

  /// Registers the membership view listener. Call once at node startup.
  pub fn start(self: &Arc<Self>) {
    let hosting = Arc::clone(self);
    self.peer.register_view_listener(Arc::new(move |members| {
      hosting.on_cluster_view_changed(members);
    }));
  }

  /// Returns the addresses of every node in the current view.
  #[must_use]
  pub fn all_nodes(&self) -> Vec<NodeAddress> {
    let nodes = self.nodes.read().clone();
    nodes.values().filter(|record| record.is_active()).map(|record| record.address().clone()).collect()
  }

  /// Returns the addresses of the current server-list snapshot.
  #[must_use]
  pub fn server_nodes(&self) -> Vec<NodeAddress> {
    let servers = self.server_nodes.read().clone();
    servers.iter().map(|record| record.address().clone()).collect()
  }

  /// Answers a capability query for the local node.
  ///
  /// Client-mode nodes and nodes that are not running host nothing.
  #[must_use]
  pub fn can_activate(&self, interface: &str) -> CapabilityAnswer {
    if self.node_type.is_client() || !self.executor.state().is_running() {
      return CapabilityAnswer::NoneSupported;
    }
    if self.executor.can_activate_actor(interface) { CapabilityAnswer::Yes } else { CapabilityAnswer::No }
  }

  /// Applies a peer's state change notification.
  ///
  /// A node that is no longer running loses its cached capability answers;
  /// a restarted node may host a different set of interfaces.
  pub fn node_mode_changed(&self, address: &NodeAddress, state: NodeState) {
    let nodes = self.nodes.read().clone();
    if let Some(record) = nodes.get(address) {
      debug!(address = ?address, state = ?state, "peer state changed");
      record.set_state(state);
    }
  }

  /// Broadcasts the local node's current state to every active peer.
  ///
  /// Every peer is attempted; individual failures are logged and the first
  /// one is returned after the fan-out completes.
  ///
  /// # Errors
  ///
  /// Returns the first per-peer [`CapabilityQueryError`] encountered.
  pub async fn notify_state_change(&self) -> Result<(), CapabilityQueryError> {
    let local = self.peer.local_address();
    let state = self.executor.state();
    let nodes = self.nodes.read().clone();
    let mut first_error = None;
    for record in nodes.values().filter(|record| record.is_active()) {
      let capabilities = Arc::clone(record.capabilities());
      if let Err(err) = capabilities.node_mode_changed(local.clone(), state).await {
        warn!(address = ?record.address(), error = ?err, "state change notification failed");
        if first_error.is_none() {
          first_error = Some(err);
        }
      }
    }
    match first_error {
      | Some(err) => Err(err),
      | None => Ok(()),
    }
  }

  /// Resolves the node that does or should host the referenced actor.
  ///
  /// With `force_activation = false` only the local cache is consulted; the
  /// call never blocks, never touches the network, and reports `None` for
  /// an unknown or stale placement. With `true` a new owner may be selected
  /// and, for stateful actors, recorded in the shared directory.
  ///
  /// # Errors
  ///
  /// Returns [`HostingError::PlacementTimeout`] when no eligible server
  /// appears within the configured wait budget.
  pub async fn locate_actor(
    &self,
    reference: &ActorRef,
    force_activation: bool,
  ) -> Result<Option<NodeAddress>, HostingError> {
    if force_activation { self.locate_and_activate(reference).await } else { Ok(self.locate_active_actor(reference)) }
  }

  fn locate_active_actor(&self, reference: &ActorRef) -> Option<NodeAddress> {
    self.cached_active_owner(&reference.key())
  }

  async fn locate_and_activate(&self, reference: &ActorRef) -> Result<Option<NodeAddress>, HostingError> {
    let key = reference.key();
    if let Some(owner) = self.cached_active_owner(&key) {
      return Ok(Some(owner));
    }

    let interface = reference.interface();
    if interface.kind().is_stateless_worker() {
      if self.node_type.is_server()
        && self.executor.state().is_running()
        && self.executor.can_activate_actor(interface.name())
      {
        if self.random.roll_percent(self.config.local_worker_bias()) {
          return Ok(Some(self.peer.local_address()));
        }
        if let Some(owner) = self.select_node(interface.name(), false).await? {
          return Ok(Some(owner));
        }
      }
      return self.select_node(interface.name(), true).await;
    }

    self.resolve_stateful(&key, interface.name()).await
  }

  async fn resolve_stateful(&self, key: &ActorKey, interface: &str) -> Result<Option<NodeAddress>, HostingError> {
    // race window since the fast path: another task may have resolved by now
    if let Some(owner) = self.cached_active_owner(key) {
      return Ok(Some(owner));
    }

    let directory = self.directory();
    if let Some(owner) = directory.get(key).await {
      if self.is_node_active(&owner) {
        self.local_cache.lock().insert(key.clone(), owner.clone());
        return Ok(Some(owner));
      }
      warn!(key = ?key, owner = ?owner, "evicting placement owned by an inactive node");
      // best effort: a concurrent resolver may already have removed it
      let _ = directory.remove_if_equals(key, &owner).await;
    }

    let Some(selected) = self.select_node(interface, true).await? else {
      return Ok(None);
    };
    match directory.set_if_absent(key, selected.clone()).await {
      | Some(winner) => {
        // another resolver published first; adopt its choice
        self.local_cache.lock().insert(key.clone(), winner.clone());
        Ok(Some(winner))
      },
      | None => {
        debug!(key = ?key, owner = ?selected, "placement recorded");
        self.local_cache.lock().insert(key.clone(), selected.clone());
        Ok(Some(selected))
      },
    }
  }

  /// Picks an eligible server for the interface.
  ///
  /// With `allow_to_block = true` an empty candidate set waits for the
  /// server list to fill, bounded by the configured budget; with `false` it
  /// reports `None` right away.
  async fn select_node(&self, interface: &str, allow_to_block: bool) -> Result<Option<NodeAddress>, HostingError> {
    let started = Instant::now();
    loop {
      if started.elapsed() > self.config.time_to_wait_for_servers() {
        error!(interface, "timeout waiting for a server capable of handling the interface");
        return Err(HostingError::PlacementTimeout { interface: String::from(interface) });
      }

      let servers = self.server_nodes.read().clone();
      let candidates: Vec<Arc<NodeRecord>> =
        servers.iter().filter(|record| record.is_candidate_for(interface)).cloned().collect();

      if candidates.is_empty() {
        if !allow_to_block {
          return Ok(None);
        }
        self.wait_for_server_change().await;
        continue;
      }

      let picked = Arc::clone(&candidates[self.random.next_index(candidates.len())]);
      let answer = match picked.cached_answer(interface) {
        | Some(answer) => answer,
        | None => match picked.capabilities().can_activate(interface).await {
          | Ok(answer) => {
            picked.record_answer(interface, answer);
            answer
          },
          | Err(err) => {
            error!(interface, address = ?picked.address(), error = ?err, "capability query failed");
            continue;
          },
        },
      };
      if answer.is_yes() {
        return Ok(Some(picked.address().clone()));
      }
    }
  }

  async fn wait_for_server_change(&self) {
    tokio::select! {
      () = self.server_signal.notified() => {},
      () = sleep(self.config.server_poll_interval()) => {},
    }
  }

  fn on_cluster_view_changed(&self, members: &[NodeAddress]) {
    let current = self.nodes.read().clone();
    let mut remaining: HashMap<NodeAddress, Arc<NodeRecord>> = (*current).clone();
    let mut next: HashMap<NodeAddress, Arc<NodeRecord>> = HashMap::with_capacity(members.len());
    let mut added = 0_usize;

    for address in members {
      let record = match remaining.remove(address) {
        | Some(existing) => {
          if !existing.is_active() {
            existing.mark_rejoined();
          }
          existing
        },
        | None => {
          added += 1;
          let capabilities = self.executor.capability_client(address);
          Arc::new(NodeRecord::new(address.clone(), capabilities))
        },
      };
      next.insert(address.clone(), record);
    }

    let mut departed = 0_usize;
    for (address, record) in remaining {
      if record.is_active() {
        departed += 1;
        record.mark_departed();
      }
      // departed records stay reachable for in-flight resolutions
      next.insert(address, record);
    }

    if added > 0 || departed > 0 {
      debug!(added, departed, members = members.len(), "cluster view changed");
    }
    *self.nodes.write() = Arc::new(next);
    self.update_server_nodes();
  }

  fn update_server_nodes(&self) {
    let _guard = self.server_update.lock();
    let nodes = self.nodes.read().clone();
    let servers: Vec<Arc<NodeRecord>> =
      nodes.values().filter(|record| record.is_active() && !record.cannot_host_actors()).cloned().collect();
    let has_servers = !servers.is_empty();
    *self.server_nodes.write() = Arc::new(servers);
    if has_servers {
      self.server_signal.notify_waiters();
    }
  }

  fn cached_active_owner(&self, key: &ActorKey) -> Option<NodeAddress> {
    let cached = self.local_cache.lock().get(key).cloned()?;
    if self.is_node_active(&cached) { Some(cached) } else { None }
  }

  fn is_node_active(&self, address: &NodeAddress) -> bool {
    let nodes = self.nodes.read().clone();
    nodes.get(address).is_some_and(|record| record.is_active())
  }

  fn directory(&self) -> Arc<dyn DistributedDirectory> {
    Arc::clone(self.directory.get_or_init(|| self.peer.directory(DIRECTORY_NAME)))
  }
}
