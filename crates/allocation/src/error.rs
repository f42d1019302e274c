//! Allocation error model.

use thiserror::Error;

use stockalloc_core::DomainError;

use crate::line::LineId;
use crate::sku::Sku;

/// Result type used by allocation operations.
pub type AllocationResult<T> = Result<T, AllocationError>;

/// Why an allocation or cancellation was refused.
///
/// Every variant is raised before any state changes: a failed call leaves
/// stocks and lines exactly as they were.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AllocationError {
    /// No candidate stock has enough residual quantity for the line.
    #[error("insufficient stock: {requested} x {sku} requested")]
    InsufficientStock { sku: Sku, requested: u64 },

    /// Cancellation was attempted on a line this stock/inventory does not hold.
    #[error("line {line_id} is not allocated")]
    LineNotAllocated { line_id: LineId },

    /// A stock was asked to satisfy a line for a different product.
    #[error("sku mismatch: stock holds {expected}, line requests {actual}")]
    SkuMismatch { expected: Sku, actual: Sku },

    /// An identity invariant would break (a line or stock id already in use).
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// The lock guarding a shared inventory was poisoned by a panicking writer.
    #[error("inventory lock poisoned")]
    Poisoned,
}

impl AllocationError {
    pub fn insufficient_stock(sku: &Sku, requested: u64) -> Self {
        Self::InsufficientStock {
            sku: sku.clone(),
            requested,
        }
    }

    pub fn line_not_allocated(line_id: LineId) -> Self {
        Self::LineNotAllocated { line_id }
    }
}
