//! In-process distributed directory adapter.


use hashbrown::HashMap;
use parking_lot::Mutex;

use crate::{
  core::{ActorKey, NodeAddress},
  std::{distributed_directory::DistributedDirectory, node_capabilities::BoxFuture},
};

/// Directory backed by a single in-process map.
///
/// Provides the full atomic contract within one process; local clusters and
/// tests share one instance across every peer of a logical cluster.
#[derive(Debug, Default)]
pub struct InMemoryDirectory {
  entries: Mutex<HashMap<ActorKey, NodeAddress>>,
}

impl InMemoryDirectory {
  /// Creates an empty directory.
  #[must_use]
  pub fn new() -> Self {
    Self::default()
  }

  /// Returns the number of recorded placements.
  #[must_use]
  pub fn len(&self) -> usize {
    self.entries.lock().len()
  }

  /// Returns true when no placement is recorded.
  #[must_use]
  pub fn is_empty(&self) -> bool {
    self.entries.lock().is_empty()
  }

  /// Returns the owner recorded for the key, without going through the
  /// async contract. Observability helper for local clusters.
  #[must_use]
  pub fn owner_of(&self, key: &ActorKey) -> Option<NodeAddress> {
    self.entries.lock().get(key).cloned()
  }
}

impl DistributedDirectory for InMemoryDirectory {
  fn get<'a>(&'a self, key: &'a ActorKey) -> BoxFuture<'a, Option<NodeAddress>> {
    Box::pin(async move { self.entries.lock().get(key).cloned() })
  }

  fn set_if_absent<'a>(&'a self, key: &'a ActorKey, owner: NodeAddress) -> BoxFuture<'a, Option<NodeAddress>> {
    Box::pin(async move {
      let mut entries = self.entries.lock();
      match entries.get(key) {
        | Some(existing) => Some(existing.clone()),
        | None => {
          entries.insert(key.clone(), owner);
          None
        },
      }
    })
  }

  fn remove_if_equals<'a>(&'a self, key: &'a ActorKey, owner: &'a NodeAddress) -> BoxFuture<'a, bool> {
    Box::pin(async move {
      let mut entries = self.entries.lock();
      match entries.get(key) {
        | Some(current) if current == owner => {
          entries.remove(key);
          true
        },
        | _ => false,
      }
    })
  }
}
