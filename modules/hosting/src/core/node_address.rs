//! Opaque cluster member identifier.

use alloc::string::String;

use serde::{Deserialize, Serialize};

/// Comparable, hashable address of a cluster member.
///
/// This subsystem treats the value as opaque: it is a map key and a
/// directory value, never parsed for content.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct NodeAddress {
  value: String,
}

impl NodeAddress {
  /// Creates an address from the transport-supplied value.
  #[must_use]
  pub const fn new(value: String) -> Self {
    Self { value }
  }

  /// Returns the underlying string.
  #[must_use]
  pub fn value(&self) -> &str {
    &self.value
  }
}
