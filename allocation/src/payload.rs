//! Rendering of allocation results.
//!
//! Two forms are produced from the same allocations:
//! - human-readable lines (`12% => acc://… : 1200.00000000 ACME`)
//! - the `sendTokens` instruction consumed by the transfer CLI, whose
//!   amounts are exact base-unit strings

use serde::{Deserialize, Serialize};
use splitcalc_types::Balance;

use crate::engine::Allocation;
use crate::error::AllocationError;

/// One `{url, amount}` record of the `sendTokens` payload.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferRecord {
    pub url: String,
    /// Base units as a decimal string.
    pub amount: String,
}

impl From<&Allocation> for TransferRecord {
    fn from(a: &Allocation) -> Self {
        Self {
            url: a.destination.to_string(),
            amount: a.amount.to_string(),
        }
    }
}

/// A balance together with the allocations computed from it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct AllocationReport {
    pub balance: Balance,
    pub allocations: Vec<Allocation>,
}

impl AllocationReport {
    pub fn new(balance: Balance, allocations: Vec<Allocation>) -> Self {
        Self {
            balance,
            allocations,
        }
    }

    /// Total handed out across all allocations.
    pub fn allocated(&self) -> Balance {
        Balance::new(self.allocations.iter().map(|a| a.amount.base_units()).sum())
    }

    /// Base units left behind by floor rounding.
    pub fn remainder(&self) -> Balance {
        Balance::new(
            self.balance
                .base_units()
                .saturating_sub(self.allocated().base_units()),
        )
    }

    pub fn transfer_records(&self) -> Vec<TransferRecord> {
        self.allocations.iter().map(TransferRecord::from).collect()
    }

    /// JSON array of transfer records.
    pub fn payload_json(&self) -> Result<String, AllocationError> {
        serde_json::to_string(&self.transfer_records())
            .map_err(|e| AllocationError::Serialization(e.to_string()))
    }

    /// The `sendTokens` instruction line, quoted for a shell.
    pub fn send_tokens_line(&self) -> Result<String, AllocationError> {
        Ok(format!(
            "'{{ type: sendTokens, to: {} }}'",
            self.payload_json()?
        ))
    }

    pub fn balance_line(&self, symbol: &str) -> String {
        format!("Balance: {} {}", self.balance.human(), symbol)
    }

    pub fn allocation_lines(&self, symbol: &str) -> Vec<String> {
        self.allocations
            .iter()
            .map(|a| allocation_line(a, symbol))
            .collect()
    }
}

/// `<whole percent>% => <destination> : <amount> <symbol>`
pub fn allocation_line(allocation: &Allocation, symbol: &str) -> String {
    format!(
        "{}% => {} : {} {}",
        allocation.share.whole_percent(),
        allocation.destination,
        allocation.amount.human(),
        symbol
    )
}
