use serde::{Deserialize, Serialize};

use stockalloc_core::{DomainError, DomainResult, Entity, EntityId};

use crate::sku::Sku;
use crate::stock::StockId;

/// Demand line identifier.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LineId(pub EntityId);

impl LineId {
    pub fn new(id: EntityId) -> Self {
        Self(id)
    }
}

impl core::fmt::Display for LineId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

/// A unit of demand (e.g. a sale order line) waiting to be satisfied by stock.
///
/// `allocated_stock` is a non-owning back-reference: it names the stock that
/// currently accounts for this line and is only ever changed by that stock's
/// `allocate`/`cancel`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
    id: LineId,
    sku: Sku,
    quantity: u64,
    allocated_stock: Option<StockId>,
}

impl Line {
    /// Create an unallocated line with a fresh identifier.
    pub fn new(sku: Sku, quantity: u64) -> DomainResult<Self> {
        Self::with_id(LineId::new(EntityId::new()), sku, quantity)
    }

    pub fn with_id(id: LineId, sku: Sku, quantity: u64) -> DomainResult<Self> {
        if quantity == 0 {
            return Err(DomainError::validation("quantity must be positive"));
        }
        Ok(Self {
            id,
            sku,
            quantity,
            allocated_stock: None,
        })
    }

    pub fn id_typed(&self) -> LineId {
        self.id
    }

    pub fn sku(&self) -> &Sku {
        &self.sku
    }

    pub fn quantity(&self) -> u64 {
        self.quantity
    }

    pub fn allocated_stock(&self) -> Option<StockId> {
        self.allocated_stock
    }

    pub fn is_allocated(&self) -> bool {
        self.allocated_stock.is_some()
    }

    pub fn is_allocated_to(&self, stock_id: StockId) -> bool {
        self.allocated_stock == Some(stock_id)
    }

    pub(crate) fn allocate_to(&mut self, stock_id: StockId) {
        self.allocated_stock = Some(stock_id);
    }

    pub(crate) fn deallocate(&mut self) {
        self.allocated_stock = None;
    }
}

impl Entity for Line {
    type Id = LineId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}
