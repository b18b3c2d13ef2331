//! # Error Types
//!
//! Domain-specific error types for maktaba-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                 │
//! │                                                                     │
//! │  maktaba-core errors (this file)                                    │
//! │  ├── CoreError        - Domain / state-machine errors               │
//! │  └── ValidationError  - Input validation failures                   │
//! │                                                                     │
//! │  maktaba-db errors (separate crate)                                 │
//! │  └── DbError          - Database operation failures                 │
//! │                                                                     │
//! │  Flow: ValidationError → CoreError → DbError → caller               │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (order id, status pair, etc.)
//! 3. Errors are enum variants, never String

use thiserror::Error;

use crate::types::OrderStatus;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
///
/// These errors represent business rule violations or domain logic failures.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Book cannot be found.
    #[error("Book not found: {0}")]
    BookNotFound(String),

    /// Customer cannot be found.
    #[error("Customer not found: {0}")]
    CustomerNotFound(String),

    /// Order cannot be found.
    #[error("Order not found: {0}")]
    OrderNotFound(String),

    /// The requested status change is not a legal edge of the lifecycle.
    ///
    /// ## When This Occurs
    /// - Transitioning out of a terminal state (`delivered`, `returned`)
    /// - Skipping a state (`pending` → `delivered`)
    ///
    /// Same-state requests are NOT errors; they are accepted as no-ops so
    /// that retries stay idempotent.
    #[error("Illegal status transition: {from:?} -> {to:?}")]
    InvalidTransition { from: OrderStatus, to: OrderStatus },

    /// Unknown status string from an external caller.
    #[error("Unknown order status: '{0}'")]
    UnknownStatus(String),

    /// Order has no line items.
    #[error("Order must contain at least one item")]
    EmptyOrder,

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These errors occur when caller-supplied input doesn't meet requirements.
/// Used for early validation before any mutation runs.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Invalid format (e.g., invalid UUID, invalid phone).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
