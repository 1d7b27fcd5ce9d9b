//! Actor interface descriptor.

use alloc::string::String;

use serde::{Deserialize, Serialize};

use crate::core::actor_kind::ActorKind;


/// Describes one actor interface known to the runtime.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ActorInterface {
  name: String,
  kind: ActorKind,
}

impl ActorInterface {
  /// Creates a stateful interface descriptor.
  #[must_use]
  pub const fn stateful(name: String) -> Self {
    Self { name, kind: ActorKind::Stateful }
  }

  /// Creates a stateless-worker interface descriptor.
  #[must_use]
  pub const fn stateless_worker(name: String) -> Self {
    Self { name, kind: ActorKind::StatelessWorker }
  }

  /// Returns the fully qualified interface name.
  #[must_use]
  pub fn name(&self) -> &str {
    &self.name
  }

  /// Returns the placement class.
  #[must_use]
  pub const fn kind(&self) -> ActorKind {
    self.kind
  }
}
