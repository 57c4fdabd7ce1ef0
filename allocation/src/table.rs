//! Share tables — ordered (destination, bps) pairs.

use serde::{Deserialize, Serialize};
use splitcalc_types::{Bps, Destination, BPS_DENOMINATOR};

use crate::error::AllocationError;

/// One row of a share table.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShareEntry {
    pub destination: Destination,
    #[serde(rename = "bps")]
    pub share: Bps,
}

impl ShareEntry {
    pub fn new(destination: Destination, share: Bps) -> Self {
        Self { destination, share }
    }
}

/// An ordered distribution of a whole across destinations.
///
/// Order is significant: allocations come back in table order, and the same
/// destination may appear more than once.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ShareTable {
    entries: Vec<ShareEntry>,
}

impl ShareTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, destination: Destination, share: Bps) {
        self.entries.push(ShareEntry::new(destination, share));
    }

    pub fn entries(&self) -> &[ShareEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sum of all shares. Cannot overflow: each share is at most 10000.
    pub fn total_bps(&self) -> u32 {
        self.entries.iter().map(|e| e.share.get()).sum()
    }

    /// Check that the shares total exactly 10000 bps.
    pub fn validate(&self) -> Result<(), AllocationError> {
        let actual = self.total_bps();
        if actual != BPS_DENOMINATOR {
            return Err(AllocationError::InvalidShareTotal {
                expected: BPS_DENOMINATOR,
                actual,
            });
        }
        Ok(())
    }
}

impl From<Vec<ShareEntry>> for ShareTable {
    fn from(entries: Vec<ShareEntry>) -> Self {
        Self { entries }
    }
}

impl FromIterator<ShareEntry> for ShareTable {
    fn from_iter<I: IntoIterator<Item = ShareEntry>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}
