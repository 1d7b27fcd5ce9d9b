//! Primary key of the placement directory.

use alloc::string::String;

use serde::{Deserialize, Serialize};


/// Immutable (interface, identity) pair identifying one virtual actor.
///
/// Equality and hashing are stable across the cluster; the key crosses the
/// cluster-shared directory, hence the serde derives.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ActorKey {
  interface: String,
  identity:  String,
}

impl ActorKey {
  /// Creates a new key.
  #[must_use]
  pub const fn new(interface: String, identity: String) -> Self {
    Self { interface, identity }
  }

  /// Returns the interface name component.
  #[must_use]
  pub fn interface(&self) -> &str {
    &self.interface
  }

  /// Returns the stringified identity component.
  #[must_use]
  pub fn identity(&self) -> &str {
    &self.identity
  }
}
