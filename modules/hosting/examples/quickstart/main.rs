#![allow(clippy::print_stdout)]

//! Hosting quickstart: three in-process nodes resolving stateful actors and
//! stateless workers over a shared local cluster network.

use std::sync::Arc;

use anyhow::{Result, anyhow};
use hashbrown::HashMap;
use helios_hosting_rs::{
  core::{
    ActorInterface, ActorRef, CapabilityAnswer, CapabilityQueryError, HostingConfig, NodeAddress, NodeState, NodeType,
  },
  std::{ActivationExecutor, BoxFuture, Hosting, LocalClusterNetwork, LocalClusterPeer, NodeCapabilities},
};
use parking_lot::Mutex;

const PLAYER_INTERFACE: &str = "demo.Player";
const SCORER_INTERFACE: &str = "demo.MatchScorer";

type HostingRegistry = Arc<Mutex<HashMap<NodeAddress, Arc<Hosting>>>>;

struct DemoCapabilities {
  registry: HostingRegistry,
  target:   NodeAddress,
}

impl NodeCapabilities for DemoCapabilities {
  fn can_activate<'a>(&'a self, interface: &'a str) -> BoxFuture<'a, Result<CapabilityAnswer, CapabilityQueryError>> {
    Box::pin(async move {
      let target = self.registry.lock().get(&self.target).cloned();
      match target {
        | Some(hosting) => Ok(hosting.can_activate(interface)),
        | None => Err(CapabilityQueryError::Unreachable),
      }
    })
  }

  fn node_mode_changed<'a>(
    &'a self,
    address: NodeAddress,
    state: NodeState,
  ) -> BoxFuture<'a, Result<(), CapabilityQueryError>> {
    Box::pin(async move {
      let target = self.registry.lock().get(&self.target).cloned();
      match target {
        | Some(hosting) => {
          hosting.node_mode_changed(&address, state);
          Ok(())
        },
        | None => Err(CapabilityQueryError::Unreachable),
      }
    })
  }
}

struct DemoExecutor {
  hostable: bool,
  registry: HostingRegistry,
}

impl ActivationExecutor for DemoExecutor {
  fn can_activate_actor(&self, _interface: &str) -> bool {
    self.hostable
  }

  fn state(&self) -> NodeState {
    NodeState::Running
  }

  fn capability_client(&self, address: &NodeAddress) -> Arc<dyn NodeCapabilities> {
    Arc::new(DemoCapabilities { registry: Arc::clone(&self.registry), target: address.clone() })
  }
}

fn add_node(
  network: &Arc<LocalClusterNetwork>,
  registry: &HostingRegistry,
  name: &str,
  node_type: NodeType,
  hostable: bool,
) -> Arc<Hosting> {
  let address = NodeAddress::new(String::from(name));
  let executor = Arc::new(DemoExecutor { hostable, registry: Arc::clone(registry) });
  let peer = Arc::new(LocalClusterPeer::new(Arc::clone(network), address.clone()));
  let hosting = Arc::new(Hosting::new(node_type, HostingConfig::new(), peer, executor));
  hosting.start();
  registry.lock().insert(address, Arc::clone(&hosting));
  hosting
}

#[tokio::main]
async fn main() -> Result<()> {
  tracing_subscriber::fmt().with_env_filter("debug").init();

  let network = LocalClusterNetwork::new();
  let registry: HostingRegistry = Arc::new(Mutex::new(HashMap::new()));

  let node_a = add_node(&network, &registry, "node-a", NodeType::Server, true);
  let node_b = add_node(&network, &registry, "node-b", NodeType::Server, true);
  let client = add_node(&network, &registry, "client", NodeType::Client, false);
  network.update_view(vec![
    NodeAddress::new(String::from("node-a")),
    NodeAddress::new(String::from("node-b")),
    NodeAddress::new(String::from("client")),
  ]);

  println!("server nodes seen by node-a: {:?}", node_a.server_nodes());

  let alice = ActorRef::new(ActorInterface::stateful(String::from(PLAYER_INTERFACE)), "alice");
  let owner_seen_by_client =
    client.locate_actor(&alice, true).await.map_err(|err| anyhow!("{err:?}"))?.ok_or_else(|| anyhow!("no owner"))?;
  let owner_seen_by_b =
    node_b.locate_actor(&alice, true).await.map_err(|err| anyhow!("{err:?}"))?.ok_or_else(|| anyhow!("no owner"))?;
  println!(
    "player/alice owned by {} (client view) and {} (node-b view)",
    owner_seen_by_client.value(),
    owner_seen_by_b.value()
  );

  let scorer = ActorRef::new(ActorInterface::stateless_worker(String::from(SCORER_INTERFACE)), "shared");
  for round in 0..3 {
    let worker =
      node_b.locate_actor(&scorer, true).await.map_err(|err| anyhow!("{err:?}"))?.ok_or_else(|| anyhow!("no worker"))?;
    println!("scorer round {round} runs on {}", worker.value());
  }

  node_a.notify_state_change().await.map_err(|err| anyhow!("{err:?}"))?;
  println!("state broadcast from node-a delivered");

  Ok(())
}
