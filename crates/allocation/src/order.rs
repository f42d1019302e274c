//! Stock selection order.

use core::str::FromStr;

use serde::{Deserialize, Serialize};

use stockalloc_core::DomainError;

use crate::stock::Stock;

/// Order in which an inventory offers its stocks to a line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SelectionOrder {
    /// Earliest availability date first; equal dates keep insertion order.
    #[default]
    DateAscending,
    /// A fixed pool: stocks are tried in the order they were added.
    InsertionOrder,
}

impl SelectionOrder {
    pub fn as_str(self) -> &'static str {
        match self {
            SelectionOrder::DateAscending => "date-ascending",
            SelectionOrder::InsertionOrder => "insertion-order",
        }
    }

    /// Arrange an initial collection (stable).
    pub(crate) fn arrange(self, stocks: &mut [Stock]) {
        match self {
            SelectionOrder::DateAscending => stocks.sort_by_key(Stock::availability_date),
            SelectionOrder::InsertionOrder => {}
        }
    }

    /// Index at which `incoming` keeps `stocks` arranged. Ties land after
    /// existing stocks with the same date.
    pub(crate) fn insert_position(self, stocks: &[Stock], incoming: &Stock) -> usize {
        match self {
            SelectionOrder::DateAscending => {
                let date = incoming.availability_date();
                stocks.partition_point(|s| s.availability_date() <= date)
            }
            SelectionOrder::InsertionOrder => stocks.len(),
        }
    }
}

impl core::fmt::Display for SelectionOrder {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SelectionOrder {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "date-ascending" => Ok(SelectionOrder::DateAscending),
            "insertion-order" => Ok(SelectionOrder::InsertionOrder),
            other => Err(DomainError::validation(format!(
                "unknown selection order '{other}' (expected date-ascending or insertion-order)"
            ))),
        }
    }
}
