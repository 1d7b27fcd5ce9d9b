//! Actor placement and directory runtime for the Helios virtual-actor cluster.
//!
//! Actors are location-transparent entities addressed by an interface
//! descriptor and an identity key. This crate answers "which node currently
//! owns this actor": it tracks the membership view, lazily probes peers for
//! activation capabilities, and arbitrates stateful placement through a
//! cluster-shared directory whose set-if-absent write is the single
//! linearization point per actor key.
//!
//! `core` holds the alloc-only domain model; `std` (default feature) holds
//! the tokio-based [`crate::std::Hosting`] runtime and the contracts it
//! consumes from the membership transport and the execution layer.
#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

pub mod core;
#[cfg(feature = "std")]
pub mod std;
