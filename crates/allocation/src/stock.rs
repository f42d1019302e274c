use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::debug;

use stockalloc_core::{DomainError, Entity, EntityId};

use crate::error::{AllocationError, AllocationResult};
use crate::line::{Line, LineId};
use crate::sku::Sku;

/// Stock batch identifier.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StockId(pub EntityId);

impl StockId {
    pub fn new(id: EntityId) -> Self {
        Self(id)
    }
}

impl core::fmt::Display for StockId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

/// A dated, finite supply unit (a warehouse batch or an incoming shipment).
///
/// Capacity and availability date are fixed at creation. The stock keeps the
/// quantity of every line it currently satisfies; residual quantity is derived
/// from those entries and never drops below zero.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stock {
    id: StockId,
    sku: Sku,
    capacity: u64,
    availability_date: NaiveDate,
    allocations: BTreeMap<LineId, u64>,
}

impl Stock {
    pub fn new(sku: Sku, capacity: u64, availability_date: NaiveDate) -> Self {
        Self::with_id(StockId::new(EntityId::new()), sku, capacity, availability_date)
    }

    pub fn with_id(id: StockId, sku: Sku, capacity: u64, availability_date: NaiveDate) -> Self {
        Self {
            id,
            sku,
            capacity,
            availability_date,
            allocations: BTreeMap::new(),
        }
    }

    pub fn id_typed(&self) -> StockId {
        self.id
    }

    pub fn sku(&self) -> &Sku {
        &self.sku
    }

    pub fn capacity(&self) -> u64 {
        self.capacity
    }

    pub fn availability_date(&self) -> NaiveDate {
        self.availability_date
    }

    /// Quantity consumed by the lines currently allocated here.
    pub fn allocated_quantity(&self) -> u64 {
        self.allocations.values().sum()
    }

    /// `capacity - allocated_quantity`.
    pub fn residual_quantity(&self) -> u64 {
        self.capacity - self.allocated_quantity()
    }

    /// Lines currently satisfied by this stock, with their quantities.
    pub fn allocations(&self) -> impl Iterator<Item = (LineId, u64)> + '_ {
        self.allocations.iter().map(|(id, qty)| (*id, *qty))
    }

    pub fn is_allocated(&self, line: &Line) -> bool {
        self.holds(line.id_typed())
    }

    pub fn holds(&self, line_id: LineId) -> bool {
        self.allocations.contains_key(&line_id)
    }

    /// True iff this stock holds the line's SKU with enough residual quantity.
    pub fn can_satisfy(&self, line: &Line) -> bool {
        self.sku == *line.sku() && self.residual_quantity() >= line.quantity()
    }

    /// Allocate `line` to this stock.
    ///
    /// A line that already has an owning stock is left untouched, so calling
    /// this twice never double-counts. A different line value reusing an id
    /// this stock already holds is rejected.
    pub fn allocate(&mut self, line: &mut Line) -> AllocationResult<()> {
        if self.sku != *line.sku() {
            return Err(AllocationError::SkuMismatch {
                expected: self.sku.clone(),
                actual: line.sku().clone(),
            });
        }
        if self.residual_quantity() < line.quantity() {
            return Err(AllocationError::insufficient_stock(line.sku(), line.quantity()));
        }
        if line.is_allocated() {
            debug!(line_id = %line.id_typed(), stock_id = %self.id, "line already allocated; skipping");
            return Ok(());
        }
        if self.holds(line.id_typed()) {
            return Err(DomainError::invariant(format!(
                "line id {} is already held by stock {}",
                line.id_typed(),
                self.id
            ))
            .into());
        }

        self.allocations.insert(line.id_typed(), line.quantity());
        line.allocate_to(self.id);
        debug!(
            line_id = %line.id_typed(),
            stock_id = %self.id,
            quantity = line.quantity(),
            residual = self.residual_quantity(),
            "line allocated to stock"
        );
        Ok(())
    }

    /// Release `line` from this stock, restoring its quantity.
    pub fn cancel(&mut self, line: &mut Line) -> AllocationResult<()> {
        if self.allocations.remove(&line.id_typed()).is_none() {
            return Err(AllocationError::line_not_allocated(line.id_typed()));
        }
        line.deallocate();
        debug!(
            line_id = %line.id_typed(),
            stock_id = %self.id,
            residual = self.residual_quantity(),
            "line released from stock"
        );
        Ok(())
    }
}

impl Entity for Stock {
    type Id = StockId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}
