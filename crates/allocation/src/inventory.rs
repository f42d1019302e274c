use std::collections::BTreeSet;

use tracing::{debug, info};

use stockalloc_core::DomainError;
use stockalloc_events::EventRecorder;

use crate::config::AllocationConfig;
use crate::error::{AllocationError, AllocationResult};
use crate::event::{AllocationEvent, LineAllocated, LineCancelled, StockExpected};
use crate::line::Line;
use crate::order::SelectionOrder;
use crate::sku::Sku;
use crate::stock::{Stock, StockId};

/// An ordered collection of stocks that picks which one satisfies a line.
///
/// Stocks are kept arranged by the inventory's [`SelectionOrder`] at all times,
/// so an allocation is a single forward scan for the first stock that
/// `can_satisfy` the line. The inventory only ever grows, and stock ids are
/// unique within it.
///
/// Successful `allocate`, `cancel` and `expect` calls queue an
/// [`AllocationEvent`]. The queue is unbounded: hosts must drain it with
/// [`Inventory::take_events`] after each unit of work.
#[derive(Debug, Clone, Default)]
pub struct Inventory {
    stocks: Vec<Stock>,
    order: SelectionOrder,
    events: EventRecorder<AllocationEvent>,
}

impl Inventory {
    /// Inventory that prefers the earliest available stock.
    pub fn new(stocks: impl IntoIterator<Item = Stock>) -> AllocationResult<Self> {
        Self::with_order(stocks, SelectionOrder::DateAscending)
    }

    /// Fails when two stocks share an id.
    pub fn with_order(
        stocks: impl IntoIterator<Item = Stock>,
        order: SelectionOrder,
    ) -> AllocationResult<Self> {
        let mut stocks: Vec<Stock> = stocks.into_iter().collect();
        let mut seen = BTreeSet::new();
        for stock in &stocks {
            if !seen.insert(stock.id_typed()) {
                return Err(duplicate_stock(stock.id_typed()));
            }
        }
        order.arrange(&mut stocks);
        Ok(Self {
            stocks,
            order,
            events: EventRecorder::new(),
        })
    }

    pub fn from_config(
        stocks: impl IntoIterator<Item = Stock>,
        config: &AllocationConfig,
    ) -> AllocationResult<Self> {
        Self::with_order(stocks, config.order)
    }

    pub fn order(&self) -> SelectionOrder {
        self.order
    }

    /// Stocks in selection order.
    pub fn stocks(&self) -> &[Stock] {
        &self.stocks
    }

    pub fn stock(&self, id: StockId) -> Option<&Stock> {
        self.stocks.iter().find(|s| s.id_typed() == id)
    }

    pub fn len(&self) -> usize {
        self.stocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stocks.is_empty()
    }

    /// Sum of residual quantity over every stock, saturating at `u64::MAX`.
    pub fn total_available(&self) -> u64 {
        self.stocks
            .iter()
            .map(Stock::residual_quantity)
            .fold(0, u64::saturating_add)
    }

    /// Residual quantity held for one SKU, saturating at `u64::MAX`.
    pub fn available_for(&self, sku: &Sku) -> u64 {
        self.stocks
            .iter()
            .filter(|s| s.sku() == sku)
            .map(Stock::residual_quantity)
            .fold(0, u64::saturating_add)
    }

    /// Allocate `line` to the first stock, in selection order, that can satisfy it.
    ///
    /// A line that is already allocated is returned as-is with its current stock.
    pub fn allocate(&mut self, line: &mut Line) -> AllocationResult<StockId> {
        if let Some(stock_id) = line.allocated_stock() {
            debug!(line_id = %line.id_typed(), %stock_id, "line already allocated");
            return Ok(stock_id);
        }
        if let Some(holder) = self.stocks.iter().find(|s| s.holds(line.id_typed())) {
            return Err(DomainError::invariant(format!(
                "line id {} is already held by stock {}",
                line.id_typed(),
                holder.id_typed()
            ))
            .into());
        }

        let Some(stock) = self.stocks.iter_mut().find(|s| s.can_satisfy(line)) else {
            debug!(
                line_id = %line.id_typed(),
                sku = %line.sku(),
                quantity = line.quantity(),
                "no stock can satisfy line"
            );
            return Err(AllocationError::insufficient_stock(line.sku(), line.quantity()));
        };

        stock.allocate(line)?;
        let stock_id = stock.id_typed();

        info!(
            line_id = %line.id_typed(),
            %stock_id,
            sku = %line.sku(),
            quantity = line.quantity(),
            "line allocated"
        );
        self.events.record(AllocationEvent::LineAllocated(LineAllocated {
            line_id: line.id_typed(),
            stock_id,
            sku: line.sku().clone(),
            quantity: line.quantity(),
        }));
        Ok(stock_id)
    }

    /// Release `line` from the stock it is allocated to.
    ///
    /// Fails with `LineNotAllocated` when the line has no stock, or when its
    /// stock does not belong to this inventory.
    pub fn cancel(&mut self, line: &mut Line) -> AllocationResult<StockId> {
        let line_id = line.id_typed();
        let stock_id = line
            .allocated_stock()
            .ok_or_else(|| AllocationError::line_not_allocated(line_id))?;
        let stock = self
            .stocks
            .iter_mut()
            .find(|s| s.id_typed() == stock_id)
            .ok_or_else(|| AllocationError::line_not_allocated(line_id))?;

        stock.cancel(line)?;

        info!(%line_id, %stock_id, quantity = line.quantity(), "line cancelled");
        self.events.record(AllocationEvent::LineCancelled(LineCancelled {
            line_id,
            stock_id,
            sku: line.sku().clone(),
            quantity: line.quantity(),
        }));
        Ok(stock_id)
    }

    /// Register newly expected supply. Fails, leaving the inventory unchanged,
    /// when a stock with the same id is already present.
    pub fn expect(&mut self, stock: Stock) -> AllocationResult<()> {
        if self.stock(stock.id_typed()).is_some() {
            return Err(duplicate_stock(stock.id_typed()));
        }

        let event = StockExpected {
            stock_id: stock.id_typed(),
            sku: stock.sku().clone(),
            capacity: stock.capacity(),
            availability_date: stock.availability_date(),
        };

        let position = self.order.insert_position(&self.stocks, &stock);
        self.stocks.insert(position, stock);

        info!(
            stock_id = %event.stock_id,
            sku = %event.sku,
            capacity = event.capacity,
            availability_date = %event.availability_date,
            position,
            "stock expected"
        );
        self.events.record(AllocationEvent::StockExpected(event));
        Ok(())
    }

    /// Events recorded since the last [`Inventory::take_events`].
    pub fn pending_events(&self) -> &[AllocationEvent] {
        self.events.pending()
    }

    pub fn take_events(&mut self) -> Vec<AllocationEvent> {
        self.events.drain()
    }
}

fn duplicate_stock(id: StockId) -> AllocationError {
    DomainError::invariant(format!("stock id {id} is already in the inventory")).into()
}
