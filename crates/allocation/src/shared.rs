//! Lock-guarded inventory handle for concurrent hosts.
//!
//! `Inventory::allocate` reads residual quantities and then writes them. Two
//! unsynchronized callers could both see enough stock and both succeed, so
//! every mutating call here runs under the write lock for the whole
//! check-then-act sequence.

use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::error::{AllocationError, AllocationResult};
use crate::event::AllocationEvent;
use crate::inventory::Inventory;
use crate::line::Line;
use crate::sku::Sku;
use crate::stock::{Stock, StockId};

/// Cloneable handle to a single inventory shared across threads.
#[derive(Debug, Clone, Default)]
pub struct SharedInventory {
    inner: Arc<RwLock<Inventory>>,
}

impl SharedInventory {
    pub fn new(inventory: Inventory) -> Self {
        Self {
            inner: Arc::new(RwLock::new(inventory)),
        }
    }

    fn read(&self) -> AllocationResult<RwLockReadGuard<'_, Inventory>> {
        self.inner.read().map_err(|_| AllocationError::Poisoned)
    }

    fn write(&self) -> AllocationResult<RwLockWriteGuard<'_, Inventory>> {
        self.inner.write().map_err(|_| AllocationError::Poisoned)
    }

    pub fn allocate(&self, line: &mut Line) -> AllocationResult<StockId> {
        self.write()?.allocate(line)
    }

    pub fn cancel(&self, line: &mut Line) -> AllocationResult<StockId> {
        self.write()?.cancel(line)
    }

    pub fn expect(&self, stock: Stock) -> AllocationResult<()> {
        self.write()?.expect(stock)
    }

    pub fn total_available(&self) -> AllocationResult<u64> {
        Ok(self.read()?.total_available())
    }

    pub fn available_for(&self, sku: &Sku) -> AllocationResult<u64> {
        Ok(self.read()?.available_for(sku))
    }

    pub fn take_events(&self) -> AllocationResult<Vec<AllocationEvent>> {
        Ok(self.write()?.take_events())
    }

    /// Run a read-only query against a consistent view of the inventory.
    pub fn with_inventory<R>(&self, f: impl FnOnce(&Inventory) -> R) -> AllocationResult<R> {
        let guard = self.read()?;
        Ok(f(&guard))
    }
}
