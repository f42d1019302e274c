//! Stock allocation domain module.
//!
//! This crate decides which dated stock batch satisfies a demand line,
//! implemented purely as deterministic domain logic (no IO, no HTTP, no storage).
//!
//! - [`Stock`]: a dated, finite supply unit that tracks the lines it satisfies.
//! - [`Line`]: a unit of demand with a back-reference to its stock.
//! - [`Inventory`]: an ordered collection of stocks that selects and delegates.
//! - [`SharedInventory`]: the same inventory behind a lock for concurrent hosts.

pub mod config;
pub mod error;
pub mod event;
pub mod inventory;
pub mod line;
pub mod order;
pub mod shared;
pub mod sku;
pub mod stock;

pub use config::{AllocationConfig, SELECTION_ORDER_ENV};
pub use error::{AllocationError, AllocationResult};
pub use event::{AllocationEvent, LineAllocated, LineCancelled, StockExpected};
pub use inventory::Inventory;
pub use line::{Line, LineId};
pub use order::SelectionOrder;
pub use shared::SharedInventory;
pub use sku::Sku;
pub use stock::{Stock, StockId};
