//! Location-transparent actor reference.

use alloc::string::String;

use crate::core::{actor_interface::ActorInterface, actor_key::ActorKey};


/// Reference to a virtual actor, as handed to placement resolution.
///
/// The interface descriptor carries the placement class; the identity is the
/// caller-supplied key, already stringified.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ActorRef {
  interface: ActorInterface,
  identity:  String,
}

impl ActorRef {
  /// Creates a reference for the given interface and identity.
  #[must_use]
  pub fn new(interface: ActorInterface, identity: impl Into<String>) -> Self {
    Self { interface, identity: identity.into() }
  }

  /// Returns the interface descriptor.
  #[must_use]
  pub const fn interface(&self) -> &ActorInterface {
    &self.interface
  }

  /// Returns the identity component.
  #[must_use]
  pub fn identity(&self) -> &str {
    &self.identity
  }

  /// Returns the directory key for this reference.
  #[must_use]
  pub fn key(&self) -> ActorKey {
    ActorKey::new(String::from(self.interface.name()), self.identity.clone())
  }
}
