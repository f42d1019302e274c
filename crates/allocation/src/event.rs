use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use stockalloc_events::Event;

use crate::line::LineId;
use crate::sku::Sku;
use crate::stock::StockId;

/// Event: LineAllocated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineAllocated {
    pub line_id: LineId,
    pub stock_id: StockId,
    pub sku: Sku,
    pub quantity: u64,
}

/// Event: LineCancelled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineCancelled {
    pub line_id: LineId,
    pub stock_id: StockId,
    pub sku: Sku,
    pub quantity: u64,
}

/// Event: StockExpected (new supply registered with an inventory).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockExpected {
    pub stock_id: StockId,
    pub sku: Sku,
    pub capacity: u64,
    pub availability_date: NaiveDate,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum AllocationEvent {
    LineAllocated(LineAllocated),
    LineCancelled(LineCancelled),
    StockExpected(StockExpected),
}

impl Event for AllocationEvent {
    fn event_type(&self) -> &'static str {
        match self {
            AllocationEvent::LineAllocated(_) => "allocation.line.allocated",
            AllocationEvent::LineCancelled(_) => "allocation.line.cancelled",
            AllocationEvent::StockExpected(_) => "allocation.stock.expected",
        }
    }

    fn version(&self) -> u32 {
        1
    }
}
