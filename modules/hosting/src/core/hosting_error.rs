//! Errors surfaced by placement resolution.

use alloc::string::String;

/// Failures that reach the caller of a resolve-or-activate operation.
///
/// Everything else the resolver encounters (stale owners, lost placement
/// races, individual probe failures) is recovered internally and never
/// surfaced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostingError {
  /// No server capable of hosting the interface appeared within the
  /// configured wait budget.
  PlacementTimeout {
    /// Interface name the resolution was for.
    interface: String,
  },
}
