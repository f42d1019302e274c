//! Allocation configuration.

use serde::{Deserialize, Serialize};

use stockalloc_core::DomainResult;

use crate::order::SelectionOrder;

/// Environment variable selecting the stock selection order.
pub const SELECTION_ORDER_ENV: &str = "STOCKALLOC_SELECTION_ORDER";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AllocationConfig {
    pub order: SelectionOrder,
}

impl AllocationConfig {
    /// Read configuration from the process environment.
    ///
    /// Unset variables fall back to defaults; malformed values are rejected.
    pub fn from_env() -> DomainResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> DomainResult<Self> {
        let order = match lookup(SELECTION_ORDER_ENV) {
            Some(raw) => raw.parse()?,
            None => SelectionOrder::default(),
        };
        Ok(Self { order })
    }
}
