//! Cluster peer bound to an in-process network.

use std::sync::Arc;

use crate::{
  core::NodeAddress,
  std::{
    cluster_peer::{ClusterPeer, ViewListener},
    distributed_directory::DistributedDirectory,
    local_cluster_network::LocalClusterNetwork,
  },
};

/// One node's view of a [`LocalClusterNetwork`].
pub struct LocalClusterPeer {
  network: Arc<LocalClusterNetwork>,
  address: NodeAddress,
}

impl LocalClusterPeer {
  /// Creates a peer for the given address on the shared network.
  #[must_use]
  pub const fn new(network: Arc<LocalClusterNetwork>, address: NodeAddress) -> Self {
    Self { network, address }
  }
}

impl ClusterPeer for LocalClusterPeer {
  fn register_view_listener(&self, listener: ViewListener) {
    self.network.register_listener(listener);
  }

  fn local_address(&self) -> NodeAddress {
    self.address.clone()
  }

  fn directory(&self, name: &str) -> Arc<dyn DistributedDirectory> {
    self.network.directory(name)
  }
}
