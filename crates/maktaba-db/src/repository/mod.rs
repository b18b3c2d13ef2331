//! # Repository Module
//!
//! Database repository implementations for Maktaba.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                   Repository Pattern Explained                      │
//! │                                                                     │
//! │  The Repository pattern abstracts database access behind a clean   │
//! │  API.                                                               │
//! │                                                                     │
//! │  Caller                                                             │
//! │       │                                                             │
//! │       │  db.orders().create_order(header, items)                    │
//! │       │  ↓                                                          │
//! │       ▼                                                             │
//! │  OrderRepository                                                    │
//! │  ├── create_order(&self, header, items)                             │
//! │  ├── transition_status(&self, id, status)                           │
//! │  ├── get_by_id(&self, id)                                           │
//! │  └── get_items(&self, order_id)                                     │
//! │       │                                                             │
//! │       │  SQL (single transaction per mutation)                      │
//! │       ▼                                                             │
//! │  SQLite Database                                                    │
//! │                                                                     │
//! │  Benefits:                                                          │
//! │  • SQL is isolated in one place                                     │
//! │  • Stock side effects live next to the status changes that cause   │
//! │    them                                                             │
//! │  • Easy to test against an in-memory database                      │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`book::BookRepository`] - Catalog CRUD
//! - [`customer::CustomerRepository`] - Customers with phone dedup
//! - [`order::OrderRepository`] - The order ledger and its stock effects
//! - [`delivery::DeliveryPriceRepository`] - Per-wilaya tariffs
//! - [`analytics::AnalyticsRepository`] - Dashboard and series aggregation

pub mod analytics;
pub mod book;
pub mod customer;
pub mod delivery;
pub mod order;
