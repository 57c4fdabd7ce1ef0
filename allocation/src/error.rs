//! Allocation errors.

use splitcalc_types::TypesError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AllocationError {
    #[error("expected total shares: {expected}, received: {actual}")]
    InvalidShareTotal { expected: u32, actual: u32 },

    #[error("cannot split by supply ratio: both supplies are zero")]
    EmptySupply,

    #[error(transparent)]
    Types(#[from] TypesError),

    #[error("payload serialization failed: {0}")]
    Serialization(String),
}
