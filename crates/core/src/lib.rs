//! Dematfolio Core - stock split preview and conservation checks.
//!
//! This crate contains the split workflow used when a security held in a
//! demat account undergoes a split or consolidation: parsing the ratio,
//! recomputing every holding lot, checking that each lot's value is
//! conserved, and driving the preview/submit session. It performs no I/O of
//! its own; lot fetching, submission and settings storage are traits
//! implemented by the host application.

pub mod constants;
pub mod errors;
pub mod holdings;
pub mod settings;
pub mod splits;

pub use holdings::{HoldingLot, RawHoldingLot};
pub use splits::*;

// Re-export error types
pub use errors::Error;
pub use errors::Result;
