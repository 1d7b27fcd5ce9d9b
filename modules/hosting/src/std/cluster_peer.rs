//! Membership transport contract consumed by the hosting subsystem.

use std::sync::Arc;

use crate::{core::NodeAddress, std::distributed_directory::DistributedDirectory};

/// Callback invoked with the full member set after every view change.
pub type ViewListener = Arc<dyn Fn(&[NodeAddress]) + Send + Sync>;

/// Integrates the hosting subsystem with an external membership transport.
pub trait ClusterPeer: Send + Sync {
  /// Registers a listener invoked with every new membership view.
  fn register_view_listener(&self, listener: ViewListener);

  /// Returns the local node address.
  fn local_address(&self) -> NodeAddress;

  /// Returns the named cluster-shared directory.
  fn directory(&self, name: &str) -> Arc<dyn DistributedDirectory>;
}
