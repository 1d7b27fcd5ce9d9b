//! Tunables for the hosting subsystem.

use core::time::Duration;


/// Configuration consumed by the hosting runtime.
///
/// The local worker bias and the poll interval are tuning knobs inherited
/// from operational experience, not correctness requirements.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostingConfig {
  time_to_wait_for_servers: Duration,
  server_poll_interval:     Duration,
  local_worker_bias:        u8,
  selection_seed:           u64,
}

impl HostingConfig {
  /// Creates the default configuration.
  #[must_use]
  pub const fn new() -> Self {
    Self {
      time_to_wait_for_servers: Duration::from_millis(30_000),
      server_poll_interval:     Duration::from_millis(5),
      local_worker_bias:        90,
      selection_seed:           0,
    }
  }

  /// Sets the wait budget for resolve-or-activate operations.
  #[must_use]
  pub const fn with_time_to_wait_for_servers(mut self, value: Duration) -> Self {
    self.time_to_wait_for_servers = value;
    self
  }

  /// Sets the re-check interval of the wait-for-servers loop.
  #[must_use]
  pub const fn with_server_poll_interval(mut self, value: Duration) -> Self {
    self.server_poll_interval = value;
    self
  }

  /// Sets the percentage of stateless-worker calls kept on the local node.
  ///
  /// Values above 100 are clamped to 100.
  #[must_use]
  pub const fn with_local_worker_bias(mut self, percent: u8) -> Self {
    self.local_worker_bias = if percent > 100 { 100 } else { percent };
    self
  }

  /// Sets the seed of the candidate selection sequence.
  #[must_use]
  pub const fn with_selection_seed(mut self, seed: u64) -> Self {
    self.selection_seed = seed;
    self
  }

  /// Returns the wait budget for resolve-or-activate operations.
  #[must_use]
  pub const fn time_to_wait_for_servers(&self) -> Duration {
    self.time_to_wait_for_servers
  }

  /// Returns the re-check interval of the wait-for-servers loop.
  #[must_use]
  pub const fn server_poll_interval(&self) -> Duration {
    self.server_poll_interval
  }

  /// Returns the local stateless-worker bias in percent.
  #[must_use]
  pub const fn local_worker_bias(&self) -> u8 {
    self.local_worker_bias
  }

  /// Returns the seed of the candidate selection sequence.
  #[must_use]
  pub const fn selection_seed(&self) -> u64 {
    self.selection_seed
  }
}

impl Default for HostingConfig {
  fn default() -> Self {
    Self::new()
  }
}
