//! # maktaba-core: Pure Business Logic for Maktaba
//!
//! This crate is the **heart** of the bookstore order system. It contains
//! all business logic as pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                      Maktaba Architecture                           │
//! │                                                                     │
//! │  ┌───────────────────────────────────────────────────────────────┐  │
//! │  │            HTTP / UI layer (external collaborator)            │  │
//! │  └──────────────────────────────┬────────────────────────────────┘  │
//! │                                 │                                   │
//! │  ┌──────────────────────────────▼────────────────────────────────┐  │
//! │  │              ★ maktaba-core (THIS CRATE) ★                    │  │
//! │  │                                                               │  │
//! │  │  ┌─────────┐ ┌─────────┐ ┌─────────┐ ┌──────────┐ ┌────────┐ │  │
//! │  │  │  types  │ │  money  │ │  stock  │ │validation│ │ wilaya │ │  │
//! │  │  │  Book   │ │  Money  │ │ deltas  │ │  rules   │ │ table  │ │  │
//! │  │  │  Order  │ │ amounts │ │  edges  │ │  checks  │ │        │ │  │
//! │  │  └─────────┘ └─────────┘ └─────────┘ └──────────┘ └────────┘ │  │
//! │  │                                                               │  │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS          │  │
//! │  └──────────────────────────────┬────────────────────────────────┘  │
//! │                                 │                                   │
//! │  ┌──────────────────────────────▼────────────────────────────────┐  │
//! │  │                 maktaba-db (Database Layer)                   │  │
//! │  │        SQLite ledger transactions, analytics queries          │  │
//! │  └───────────────────────────────────────────────────────────────┘  │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Book, Order, Customer, etc.)
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`stock`] - The order-lifecycle stock transition table
//! - [`error`] - Domain error types
//! - [`validation`] - Business rule validation
//! - [`wilaya`] - Static region reference table
//! - [`export`] - Courier delivery-slip row mapping
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: Every function is deterministic
//! 2. **No I/O**: Database, network, file system access is FORBIDDEN here
//! 3. **Integer Money**: All monetary values are centimes (i64)
//! 4. **Explicit Errors**: All errors are typed, never strings or panics

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod export;
pub mod money;
pub mod stock;
pub mod types;
pub mod validation;
pub mod wilaya;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use maktaba_core::Money` instead of
// `use maktaba_core::money::Money`

pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum line items allowed in a single order.
///
/// ## Business Reason
/// Prevents runaway imports and keeps delivery parcels realistic.
pub const MAX_ORDER_ITEMS: usize = 100;

/// Maximum quantity of a single item in an order.
///
/// ## Business Reason
/// Prevents accidental over-ordering (e.g., typing 1000 instead of 10).
pub const MAX_ITEM_QUANTITY: i64 = 999;
