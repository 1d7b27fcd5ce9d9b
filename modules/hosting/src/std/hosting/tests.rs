use std::sync::{
  Arc,
  atomic::{AtomicUsize, Ordering},
};

use hashbrown::HashMap;
use parking_lot::Mutex;

use super::{DIRECTORY_NAME, Hosting};
use crate::{
  core::{
    ActorInterface, ActorKey, ActorRef, CapabilityAnswer, CapabilityQueryError, HostingConfig, NodeAddress, NodeState,
    NodeType,
  },
  std::{
    activation_executor::ActivationExecutor,
    distributed_directory::DistributedDirectory,
    local_cluster_network::LocalClusterNetwork,
    local_cluster_peer::LocalClusterPeer,
    node_capabilities::{BoxFuture, NodeCapabilities},
  },
};

struct StaticCapabilities {
  answer: CapabilityAnswer,
  calls:  AtomicUsize,
}

impl StaticCapabilities {
  fn new(answer: CapabilityAnswer) -> Arc<Self> {
    Arc::new(Self { answer, calls: AtomicUsize::new(0) })
  }

  fn calls(&self) -> usize {
    self.calls.load(Ordering::SeqCst)
  }
}

impl NodeCapabilities for StaticCapabilities {
  fn can_activate<'a>(&'a self, _interface: &'a str) -> BoxFuture<'a, Result<CapabilityAnswer, CapabilityQueryError>> {
    self.calls.fetch_add(1, Ordering::SeqCst);
    Box::pin(async move { Ok(self.answer) })
  }

  fn node_mode_changed<'a>(
    &'a self,
    _address: NodeAddress,
    _state: NodeState,
  ) -> BoxFuture<'a, Result<(), CapabilityQueryError>> {
    Box::pin(async { Ok(()) })
  }
}

struct FailingCapabilities;

impl NodeCapabilities for FailingCapabilities {
  fn can_activate<'a>(&'a self, _interface: &'a str) -> BoxFuture<'a, Result<CapabilityAnswer, CapabilityQueryError>> {
    Box::pin(async { Err(CapabilityQueryError::Unreachable) })
  }

  fn node_mode_changed<'a>(
    &'a self,
    _address: NodeAddress,
    _state: NodeState,
  ) -> BoxFuture<'a, Result<(), CapabilityQueryError>> {
    Box::pin(async { Err(CapabilityQueryError::Unreachable) })
  }
}

struct TestExecutor {
  hostable: bool,
  state:    Mutex<NodeState>,
  clients:  Mutex<HashMap<NodeAddress, Arc<dyn NodeCapabilities>>>,
}

impl TestExecutor {
  fn new(hostable: bool) -> Arc<Self> {
    Arc::new(Self { hostable, state: Mutex::new(NodeState::Running), clients: Mutex::new(HashMap::new()) })
  }

  fn set_state(&self, state: NodeState) {
    *self.state.lock() = state;
  }

  fn set_client(&self, address: &NodeAddress, client: Arc<dyn NodeCapabilities>) {
    self.clients.lock().insert(address.clone(), client);
  }
}

impl ActivationExecutor for TestExecutor {
  fn can_activate_actor(&self, _interface: &str) -> bool {
    self.hostable
  }

  fn state(&self) -> NodeState {
    *self.state.lock()
  }

  fn capability_client(&self, address: &NodeAddress) -> Arc<dyn NodeCapabilities> {
    self.clients.lock().get(address).cloned().unwrap_or_else(|| StaticCapabilities::new(CapabilityAnswer::Yes))
  }
}

fn address(name: &str) -> NodeAddress {
  NodeAddress::new(String::from(name))
}

fn stateful_ref(identity: &str) -> ActorRef {
  ActorRef::new(ActorInterface::stateful(String::from("game.Player")), identity)
}

fn worker_ref(identity: &str) -> ActorRef {
  ActorRef::new(ActorInterface::stateless_worker(String::from("game.MatchScorer")), identity)
}

fn start_hosting(
  node_type: NodeType,
  config: HostingConfig,
  network: &Arc<LocalClusterNetwork>,
  local: &NodeAddress,
  executor: &Arc<TestExecutor>,
) -> Arc<Hosting> {
  let peer = Arc::new(LocalClusterPeer::new(Arc::clone(network), local.clone()));
  let executor: Arc<dyn ActivationExecutor> = executor.clone();
  let hosting = Arc::new(Hosting::new(node_type, config, peer, executor));
  hosting.start();
  hosting
}

#[test]
fn client_mode_node_answers_none_supported() {
  let network = LocalClusterNetwork::new();
  let executor = TestExecutor::new(true);
  let hosting = start_hosting(NodeType::Client, HostingConfig::new(), &network, &address("local"), &executor);

  assert_eq!(hosting.can_activate("game.Player"), CapabilityAnswer::NoneSupported);
}

#[test]
fn non_running_node_answers_none_supported() {
  let network = LocalClusterNetwork::new();
  let executor = TestExecutor::new(true);
  let hosting = start_hosting(NodeType::Server, HostingConfig::new(), &network, &address("local"), &executor);

  executor.set_state(NodeState::Stopping);

  assert_eq!(hosting.can_activate("game.Player"), CapabilityAnswer::NoneSupported);
}

#[test]
fn running_server_defers_to_the_static_check() {
  let network = LocalClusterNetwork::new();
  let hostable = TestExecutor::new(true);
  let bare = TestExecutor::new(false);
  let hosting = start_hosting(NodeType::Server, HostingConfig::new(), &network, &address("local"), &hostable);
  let other = start_hosting(NodeType::Server, HostingConfig::new(), &network, &address("other"), &bare);

  assert_eq!(hosting.can_activate("game.Player"), CapabilityAnswer::Yes);
  assert_eq!(other.can_activate("game.Player"), CapabilityAnswer::No);
}

#[test]
fn view_changes_track_added_and_departed_nodes() {
  let network = LocalClusterNetwork::new();
  let executor = TestExecutor::new(true);
  let hosting = start_hosting(NodeType::Server, HostingConfig::new(), &network, &address("node-a"), &executor);

  network.update_view(vec![address("node-a"), address("node-b")]);
  assert_eq!(hosting.all_nodes().len(), 2);
  assert_eq!(hosting.server_nodes().len(), 2);

  network.update_view(vec![address("node-a")]);
  assert_eq!(hosting.all_nodes(), vec![address("node-a")]);
  assert_eq!(hosting.server_nodes(), vec![address("node-a")]);
}

#[test]
fn repeating_an_identical_view_is_a_no_op() {
  let network = LocalClusterNetwork::new();
  let executor = TestExecutor::new(true);
  let hosting = start_hosting(NodeType::Server, HostingConfig::new(), &network, &address("node-a"), &executor);

  network.update_view(vec![address("node-a"), address("node-b")]);
  network.update_view(vec![address("node-a"), address("node-b")]);

  assert_eq!(hosting.all_nodes().len(), 2);
  assert_eq!(hosting.server_nodes().len(), 2);
}

#[tokio::test]
async fn lookup_only_reports_unknown_without_blocking() {
  let network = LocalClusterNetwork::new();
  let executor = TestExecutor::new(true);
  let hosting = start_hosting(NodeType::Server, HostingConfig::new(), &network, &address("node-a"), &executor);
  network.update_view(vec![address("node-a")]);

  let unresolved = hosting.locate_actor(&stateful_ref("42"), false).await;

  assert_eq!(unresolved, Ok(None));
}

#[tokio::test]
async fn lookup_only_sees_a_previously_resolved_placement() {
  let network = LocalClusterNetwork::new();
  let executor = TestExecutor::new(true);
  let hosting = start_hosting(NodeType::Server, HostingConfig::new(), &network, &address("node-a"), &executor);
  network.update_view(vec![address("node-a")]);

  let resolved = hosting.locate_actor(&stateful_ref("42"), true).await.expect("resolution");
  let looked_up = hosting.locate_actor(&stateful_ref("42"), false).await.expect("lookup");

  assert_eq!(looked_up, resolved);
}

#[tokio::test]
async fn full_bias_keeps_stateless_workers_local() {
  let network = LocalClusterNetwork::new();
  let executor = TestExecutor::new(true);
  let config = HostingConfig::new().with_local_worker_bias(100);
  let hosting = start_hosting(NodeType::Server, config, &network, &address("node-a"), &executor);
  network.update_view(vec![address("node-a"), address("node-b")]);

  for identity in 0..10 {
    let owner = hosting.locate_actor(&worker_ref(&identity.to_string()), true).await.expect("resolution");
    assert_eq!(owner, Some(address("node-a")));
  }
  assert!(network.directory(DIRECTORY_NAME).is_empty());
}

#[tokio::test]
async fn worker_selection_never_writes_the_shared_directory() {
  let network = LocalClusterNetwork::new();
  let executor = TestExecutor::new(false);
  let config = HostingConfig::new().with_local_worker_bias(0);
  let hosting = start_hosting(NodeType::Server, config, &network, &address("local"), &executor);
  network.update_view(vec![address("node-b"), address("node-c")]);

  for identity in 0..10 {
    let owner = hosting.locate_actor(&worker_ref(&identity.to_string()), true).await.expect("resolution");
    let owner = owner.expect("a worker owner");
    assert!(owner == address("node-b") || owner == address("node-c"));
  }
  assert!(network.directory(DIRECTORY_NAME).is_empty());
}

#[tokio::test]
async fn stateful_resolution_records_the_owner_in_the_directory() {
  let network = LocalClusterNetwork::new();
  let executor = TestExecutor::new(true);
  let hosting = start_hosting(NodeType::Server, HostingConfig::new(), &network, &address("node-a"), &executor);
  network.update_view(vec![address("node-a")]);

  let owner = hosting.locate_actor(&stateful_ref("42"), true).await.expect("resolution");

  assert_eq!(owner, Some(address("node-a")));
  assert_eq!(network.directory(DIRECTORY_NAME).owner_of(&stateful_ref("42").key()), Some(address("node-a")));
}

#[tokio::test]
async fn a_placement_published_by_a_peer_is_adopted() {
  let network = LocalClusterNetwork::new();
  let executor = TestExecutor::new(true);
  let hosting = start_hosting(NodeType::Server, HostingConfig::new(), &network, &address("node-a"), &executor);
  network.update_view(vec![address("node-a"), address("node-b")]);

  let key = stateful_ref("42").key();
  network.directory(DIRECTORY_NAME).set_if_absent(&key, address("node-b")).await;

  let owner = hosting.locate_actor(&stateful_ref("42"), true).await.expect("resolution");

  assert_eq!(owner, Some(address("node-b")));
}

#[tokio::test]
async fn a_stale_directory_entry_is_evicted_and_replaced() {
  let network = LocalClusterNetwork::new();
  let executor = TestExecutor::new(true);
  let hosting = start_hosting(NodeType::Server, HostingConfig::new(), &network, &address("node-a"), &executor);
  network.update_view(vec![address("node-a")]);

  let key = stateful_ref("42").key();
  network.directory(DIRECTORY_NAME).set_if_absent(&key, address("node-gone")).await;

  let owner = hosting.locate_actor(&stateful_ref("42"), true).await.expect("resolution");

  assert_eq!(owner, Some(address("node-a")));
  assert_eq!(network.directory(DIRECTORY_NAME).owner_of(&key), Some(address("node-a")));
}

#[tokio::test]
async fn probe_failures_skip_the_node_instead_of_failing_the_resolution() {
  let network = LocalClusterNetwork::new();
  let executor = TestExecutor::new(false);
  executor.set_client(&address("node-flaky"), Arc::new(FailingCapabilities));
  let hosting = start_hosting(NodeType::Server, HostingConfig::new(), &network, &address("local"), &executor);
  network.update_view(vec![address("node-flaky"), address("node-good")]);

  let owner = hosting.locate_actor(&stateful_ref("42"), true).await.expect("resolution");

  assert_eq!(owner, Some(address("node-good")));
}

#[tokio::test]
async fn capability_answers_are_memoized_until_a_state_change() {
  let network = LocalClusterNetwork::new();
  let executor = TestExecutor::new(false);
  let probe = StaticCapabilities::new(CapabilityAnswer::Yes);
  executor.set_client(&address("node-b"), Arc::clone(&probe) as Arc<dyn NodeCapabilities>);
  let hosting = start_hosting(NodeType::Server, HostingConfig::new(), &network, &address("local"), &executor);
  network.update_view(vec![address("node-b")]);

  hosting.locate_actor(&stateful_ref("1"), true).await.expect("resolution");
  hosting.locate_actor(&stateful_ref("2"), true).await.expect("resolution");
  assert_eq!(probe.calls(), 1);

  hosting.node_mode_changed(&address("node-b"), NodeState::Stopped);
  hosting.node_mode_changed(&address("node-b"), NodeState::Running);

  hosting.locate_actor(&stateful_ref("3"), true).await.expect("resolution");
  assert_eq!(probe.calls(), 2);
}

#[tokio::test]
async fn none_supported_marks_the_node_and_short_circuits_later_probes() {
  let network = LocalClusterNetwork::new();
  let executor = TestExecutor::new(false);
  let client_probe = StaticCapabilities::new(CapabilityAnswer::NoneSupported);
  executor.set_client(&address("node-client"), Arc::clone(&client_probe) as Arc<dyn NodeCapabilities>);
  let hosting = start_hosting(NodeType::Server, HostingConfig::new(), &network, &address("local"), &executor);
  network.update_view(vec![address("node-client"), address("node-server")]);

  for identity in 0..10 {
    let owner = hosting.locate_actor(&stateful_ref(&identity.to_string()), true).await.expect("resolution");
    assert_eq!(owner, Some(address("node-server")));
  }

  assert!(client_probe.calls() <= 1);
}

#[tokio::test]
async fn notify_state_change_reaches_every_active_peer() {
  let network = LocalClusterNetwork::new();
  let executor = TestExecutor::new(true);
  let b = StaticCapabilities::new(CapabilityAnswer::Yes);
  let c = StaticCapabilities::new(CapabilityAnswer::Yes);
  executor.set_client(&address("node-b"), Arc::clone(&b) as Arc<dyn NodeCapabilities>);
  executor.set_client(&address("node-c"), Arc::clone(&c) as Arc<dyn NodeCapabilities>);
  let hosting = start_hosting(NodeType::Server, HostingConfig::new(), &network, &address("node-a"), &executor);
  network.update_view(vec![address("node-a"), address("node-b"), address("node-c")]);

  hosting.notify_state_change().await.expect("broadcast");
}

#[tokio::test]
async fn notify_state_change_reports_the_first_failure_after_the_fan_out() {
  let network = LocalClusterNetwork::new();
  let executor = TestExecutor::new(true);
  executor.set_client(&address("node-b"), Arc::new(FailingCapabilities));
  let hosting = start_hosting(NodeType::Server, HostingConfig::new(), &network, &address("node-a"), &executor);
  network.update_view(vec![address("node-a"), address("node-b")]);

  let result = hosting.notify_state_change().await;

  assert_eq!(result, Err(CapabilityQueryError::Unreachable));
}

#[tokio::test]
async fn resolving_through_a_departed_owner_picks_a_live_node() {
  let network = LocalClusterNetwork::new();
  let executor = TestExecutor::new(true);
  let hosting = start_hosting(NodeType::Server, HostingConfig::new(), &network, &address("node-a"), &executor);
  network.update_view(vec![address("node-a"), address("node-b")]);

  let key = ActorKey::new(String::from("game.Player"), String::from("42"));
  network.directory(DIRECTORY_NAME).set_if_absent(&key, address("node-b")).await;
  hosting.locate_actor(&stateful_ref("42"), true).await.expect("first resolution");

  network.update_view(vec![address("node-a")]);

  let owner = hosting.locate_actor(&stateful_ref("42"), true).await.expect("second resolution");

  assert_eq!(owner, Some(address("node-a")));
  assert_eq!(network.directory(DIRECTORY_NAME).owner_of(&key), Some(address("node-a")));
}
