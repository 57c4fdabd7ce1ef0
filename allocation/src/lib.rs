//! Allocation engine — splits a base-unit balance across destinations.
//!
//! `amount_i = floor(B / 10000 × share_i)`
//!
//! This crate handles:
//! - Share table validation (shares must total exactly 10000 bps)
//! - Per-entry allocation with exact integer or legacy floating-point arithmetic
//! - Complement share pairs derived from two observed token supplies
//! - Rendering of human-readable lines and the `sendTokens` payload

pub mod engine;
pub mod error;
pub mod payload;
pub mod ratio;
pub mod table;

pub use engine::{allocate_amount, Allocation, AllocationEngine, Arithmetic};
pub use error::AllocationError;
pub use payload::{AllocationReport, TransferRecord};
pub use ratio::{complement_pair, supply_fraction, RatioRounding};
pub use table::{ShareEntry, ShareTable};
