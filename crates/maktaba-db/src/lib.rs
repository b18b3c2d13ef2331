//! # maktaba-db: Database Layer for Maktaba
//!
//! This crate provides database access for the Maktaba bookstore system.
//! It uses SQLite for local storage with sqlx for async operations.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                       Maktaba Data Flow                             │
//! │                                                                     │
//! │  Caller (order entry, dashboard, delivery-slip export)              │
//! │       │                                                             │
//! │       ▼                                                             │
//! │  ┌─────────────────────────────────────────────────────────────┐   │
//! │  │                  maktaba-db (THIS CRATE)                    │   │
//! │  │                                                             │   │
//! │  │  ┌─────────────┐   ┌────────────────┐   ┌──────────────┐   │   │
//! │  │  │  Database   │   │  Repositories  │   │  Migrations  │   │   │
//! │  │  │  (pool.rs)  │   │  (order.rs,    │   │  (embedded)  │   │   │
//! │  │  │             │   │   book.rs, …)  │   │              │   │   │
//! │  │  │ SqlitePool  │◄──│ OrderRepo      │   │ 001_init.sql │   │   │
//! │  │  │ WAL mode    │   │ BookRepo       │   │ 002_idx.sql  │   │   │
//! │  │  └─────────────┘   │ AnalyticsRepo  │   └──────────────┘   │   │
//! │  │                    └────────────────┘                       │   │
//! │  └─────────────────────────────────────────────────────────────┘   │
//! │       │                                                             │
//! │       ▼                                                             │
//! │  SQLite Database (maktaba.db)                                       │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`pool`] - Connection pool creation and configuration
//! - [`migrations`] - Embedded database migrations
//! - [`error`] - Database error types
//! - [`repository`] - Repository implementations (order, book, etc.)
//!
//! ## Usage
//!
//! ```rust,ignore
//! use maktaba_db::{Database, DbConfig};
//!
//! let db = Database::new(DbConfig::new("path/to/maktaba.db")).await?;
//!
//! let order = db.orders().create_order(header, items).await?;
//! db.orders().transition_status(&order.id, OrderStatus::Delivering).await?;
//!
//! let stats = db.analytics().dashboard_stats(None, 5).await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{DbError, DbResult};
pub use pool::{Database, DbConfig};

// Repository re-exports for convenience
pub use repository::analytics::AnalyticsRepository;
pub use repository::book::BookRepository;
pub use repository::customer::{CustomerRepository, NewCustomer};
pub use repository::delivery::DeliveryPriceRepository;
pub use repository::order::OrderRepository;
