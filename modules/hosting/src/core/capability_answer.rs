//! Result of a capability query against one node.

use serde::{Deserialize, Serialize};


/// Answer to "can this node activate the given actor interface".
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum CapabilityAnswer {
  /// The interface is activatable on the answering node.
  Yes,
  /// The interface is not activatable on the answering node.
  No,
  /// The node hosts no actor types at all. Sticky and terminal for that
  /// node across every interface.
  NoneSupported,
}

impl CapabilityAnswer {
  /// Returns true when the answer accepts the interface.
  #[must_use]
  pub const fn is_yes(self) -> bool {
    matches!(self, Self::Yes)
  }

  /// Returns true for the sticky "hosts nothing" answer.
  #[must_use]
  pub const fn is_none_supported(self) -> bool {
    matches!(self, Self::NoneSupported)
  }
}
