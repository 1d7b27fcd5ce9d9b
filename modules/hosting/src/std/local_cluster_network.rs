//! Shared in-process fabric for local cluster peers.


use std::sync::Arc;

use hashbrown::HashMap;
use parking_lot::Mutex;

use crate::{
  core::NodeAddress,
  std::{cluster_peer::ViewListener, in_memory_directory::InMemoryDirectory},
};

/// In-process stand-in for a membership transport.
///
/// Peers of one logical cluster share a network: every named directory is a
/// single [`InMemoryDirectory`] instance, and a view update fans out to the
/// listeners of every peer. The view is driven programmatically, which is
/// what placement tests need to stage joins and departures.
#[derive(Default)]
pub struct LocalClusterNetwork {
  directories: Mutex<HashMap<String, Arc<InMemoryDirectory>>>,
  listeners:   Mutex<Vec<ViewListener>>,
  members:     Mutex<Vec<NodeAddress>>,
}

impl LocalClusterNetwork {
  /// Creates an empty network.
  #[must_use]
  pub fn new() -> Arc<Self> {
    Arc::new(Self::default())
  }

  /// Returns the named shared directory, creating it on first use.
  #[must_use]
  pub fn directory(&self, name: &str) -> Arc<InMemoryDirectory> {
    let mut directories = self.directories.lock();
    if let Some(existing) = directories.get(name) {
      return Arc::clone(existing);
    }
    let created = Arc::new(InMemoryDirectory::new());
    directories.insert(String::from(name), Arc::clone(&created));
    created
  }

  /// Registers a peer's view listener.
  pub fn register_listener(&self, listener: ViewListener) {
    self.listeners.lock().push(listener);
  }

  /// Replaces the membership view and fans it out to every listener.
  pub fn update_view(&self, members: Vec<NodeAddress>) {
    *self.members.lock() = members.clone();
    let listeners: Vec<ViewListener> = self.listeners.lock().clone();
    for listener in listeners {
      listener(&members);
    }
  }

  /// Returns the current membership view.
  #[must_use]
  pub fn members(&self) -> Vec<NodeAddress> {
    self.members.lock().clone()
  }
}
