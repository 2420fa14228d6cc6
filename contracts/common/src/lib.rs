//! Shared storage helpers for the treatment escrow contracts.
//!
//! - [`settlement_lock`]: scope guard that rejects re-entrant calls into
//!   token-moving entry points.
//! - [`ttl`]: time-to-live thresholds and bump helpers for instance and
//!   persistent storage.

#![cfg_attr(not(feature = "std"), no_std)]
#![cfg_attr(test, allow(clippy::expect_used, clippy::unwrap_used))]

pub mod settlement_lock;
pub mod ttl;

pub use settlement_lock::*;
pub use ttl::*;
