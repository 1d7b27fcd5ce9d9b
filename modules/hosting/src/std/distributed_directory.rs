//! Cluster-shared directory contract.

use crate::{
  core::{ActorKey, NodeAddress},
  std::node_capabilities::BoxFuture,
};

/// Minimal distributed key-value contract backing stateful placement.
///
/// Each operation must be atomic across the cluster; the set-if-absent write
/// is the linearization point for actor ownership. Any consensus-backed or
/// gossip-backed store providing these three primitives is substitutable.
pub trait DistributedDirectory: Send + Sync {
  /// Reads the owner currently recorded for the key.
  fn get<'a>(&'a self, key: &'a ActorKey) -> BoxFuture<'a, Option<NodeAddress>>;

  /// Atomically installs `owner` when the key has no entry.
  ///
  /// Returns the previously recorded owner when another writer got there
  /// first, `None` when the install succeeded.
  fn set_if_absent<'a>(&'a self, key: &'a ActorKey, owner: NodeAddress) -> BoxFuture<'a, Option<NodeAddress>>;

  /// Atomically removes the entry while it still maps to `owner`.
  ///
  /// Returns whether an entry was removed.
  fn remove_if_equals<'a>(&'a self, key: &'a ActorKey, owner: &'a NodeAddress) -> BoxFuture<'a, bool>;
}
