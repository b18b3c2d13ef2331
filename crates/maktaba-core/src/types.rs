//! # Domain Types
//!
//! Core domain types used throughout Maktaba.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                │
//! │                                                                     │
//! │  ┌────────────────┐   ┌────────────────┐   ┌────────────────┐      │
//! │  │     Book       │   │     Order      │   │   OrderItem    │      │
//! │  │  ────────────  │   │  ────────────  │   │  ────────────  │      │
//! │  │  id (UUID)     │   │  id (UUID)     │   │  order_id (FK) │      │
//! │  │  title         │   │  reference     │   │  book_id (FK)  │      │
//! │  │  quantity_left │   │  status        │   │  quantity      │      │
//! │  │  delivering    │   │  total_cents   │   │  unit price    │      │
//! │  │  sold          │   │  final_cents   │   │  (snapshot)    │      │
//! │  └────────────────┘   └────────────────┘   └────────────────┘      │
//! │                                                                     │
//! │  ┌────────────────┐   ┌────────────────┐   ┌────────────────┐      │
//! │  │   Customer     │   │  OrderStatus   │   │ DeliveryPrice  │      │
//! │  │  ────────────  │   │  ────────────  │   │  ────────────  │      │
//! │  │  phone (dedup) │   │  Pending       │   │  wilaya_id     │      │
//! │  │  wilaya_id     │   │  Delivering    │   │  doorstep      │      │
//! │  │  loyalty       │   │  Delivered     │   │  stop-desk     │      │
//! │  └────────────────┘   │  Returned      │   └────────────────┘      │
//! │                       └────────────────┘                            │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Dual-Key Identity Pattern
//! Orders carry two identifiers:
//! - `id`: UUID v4 - immutable, used for database relations
//! - `reference`: human-readable code printed on delivery slips, derived
//!   from a random short code so it never leaks order volume

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::CoreError;
use crate::money::Money;

// =============================================================================
// Order Status
// =============================================================================

/// The lifecycle status of an order.
///
/// ```text
/// pending ──► delivering ──► delivered   (terminal success)
///    │             │
///    └─────────────┴───────► returned    (terminal failure)
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "lowercase"))]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    /// Order recorded, stock already taken from the available pool.
    Pending,
    /// Order handed to the courier; stock counted as reserved.
    Delivering,
    /// Order delivered and paid (terminal).
    Delivered,
    /// Order cancelled or came back (terminal).
    Returned,
}

impl OrderStatus {
    /// True for states with no outgoing transitions.
    #[inline]
    pub const fn is_terminal(&self) -> bool {
        matches!(self, OrderStatus::Delivered | OrderStatus::Returned)
    }

    /// Lowercase wire representation (matches the database encoding).
    pub const fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Delivering => "delivering",
            OrderStatus::Delivered => "delivered",
            OrderStatus::Returned => "returned",
        }
    }
}

impl Default for OrderStatus {
    fn default() -> Self {
        OrderStatus::Pending
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parses a status from its wire form.
///
/// Accepts the legacy alias `"reactionary"` for `Returned`; old data
/// exports used that spelling and imported files still carry it.
impl FromStr for OrderStatus {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "pending" => Ok(OrderStatus::Pending),
            "delivering" => Ok(OrderStatus::Delivering),
            "delivered" => Ok(OrderStatus::Delivered),
            "returned" | "reactionary" => Ok(OrderStatus::Returned),
            other => Err(CoreError::UnknownStatus(other.to_string())),
        }
    }
}

// =============================================================================
// Delivery Mode
// =============================================================================

/// How an order reaches the customer; the two modes are priced separately
/// per wilaya.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeliveryMode {
    /// Courier brings the parcel to the customer's address.
    Doorstep,
    /// Customer picks the parcel up at the courier's regional desk.
    StopDesk,
}

// =============================================================================
// Book
// =============================================================================

/// A catalog entry.
///
/// The three stock counters model a pipeline:
/// `quantity_left` (available) → `delivering_stock` (reserved) →
/// `sold_stock` (cumulative delivered). They are mutated only by the order
/// ledger and are non-negative at all times.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Book {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// Display title, printed on delivery slips.
    pub title: String,

    pub author: Option<String>,
    pub publisher: Option<String>,

    /// Sale price in centimes.
    pub price_cents: i64,

    /// Buy price (cost) in centimes, for profit calculations.
    pub cost_cents: i64,

    /// Copies available for new orders.
    pub quantity_left: i64,

    /// Copies reserved for orders currently with the courier.
    pub delivering_stock: i64,

    /// Cumulative copies delivered.
    pub sold_stock: i64,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Book {
    /// Returns the sale price as Money.
    #[inline]
    pub fn price(&self) -> Money {
        Money::from_centimes(self.price_cents)
    }

    /// Returns the buy price as Money.
    #[inline]
    pub fn cost(&self) -> Money {
        Money::from_centimes(self.cost_cents)
    }
}

// =============================================================================
// Customer
// =============================================================================

/// A customer record.
///
/// The phone number is the deduplication key: creating an order for a phone
/// that already exists reuses the existing row instead of inserting a
/// duplicate.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Customer {
    pub id: String,
    pub name: String,

    /// Primary phone - unique dedup key.
    pub phone: String,

    /// Secondary phone, if any.
    pub phone2: Option<String>,

    /// Street address.
    pub address: Option<String>,

    /// Wilaya (region) code, 1..=58. See [`crate::wilaya`].
    pub wilaya_id: Option<i64>,

    /// Commune name within the wilaya.
    pub commune: Option<String>,

    /// Loyalty program state. Accrual is handled by the loyalty subsystem,
    /// not the order ledger; the fields are persisted here.
    pub loyalty_points: i64,
    pub loyalty_tier: Option<String>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// =============================================================================
// Order
// =============================================================================

/// An order header.
///
/// Status is mutated only through `OrderRepository::transition_status`;
/// every change is an explicit, validated edge of the lifecycle.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Order {
    pub id: String,

    /// Human-readable unique reference, e.g. `CMD-8F3KQZ1D`.
    pub reference: String,

    pub customer_id: String,
    pub status: OrderStatus,

    /// Sum of line items before delivery and discounts.
    pub total_cents: i64,

    /// Delivery fee charged to the customer (0 when free_delivery is set).
    pub delivery_cents: i64,

    /// Fixed discount in centimes.
    pub discount_cents: i64,

    /// Percentage discount in basis points (1000 = 10%).
    pub discount_bps: i64,

    /// Derived: total - discounts + delivery, clamped at 0.
    pub final_cents: i64,

    pub free_delivery: bool,
    pub fragile: bool,
    pub exchange: bool,
    pub pickup: bool,
    pub stop_desk: bool,
    pub cash_on_delivery: bool,

    pub notes: Option<String>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Order {
    /// Returns the pre-discount item total as Money.
    #[inline]
    pub fn total(&self) -> Money {
        Money::from_centimes(self.total_cents)
    }

    /// Returns the final billed amount as Money.
    #[inline]
    pub fn final_amount(&self) -> Money {
        Money::from_centimes(self.final_cents)
    }

    /// Delivery mode implied by the stop_desk flag.
    #[inline]
    pub fn delivery_mode(&self) -> DeliveryMode {
        if self.stop_desk {
            DeliveryMode::StopDesk
        } else {
            DeliveryMode::Doorstep
        }
    }
}

// =============================================================================
// Order Item
// =============================================================================

/// A line item in an order.
///
/// Uses the snapshot pattern: title and unit price are frozen at order time
/// and never change when the catalog entry is edited or deleted later.
/// Items are immutable after creation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct OrderItem {
    pub id: String,
    pub order_id: String,
    pub book_id: String,

    /// Book title at order time (frozen).
    pub title_snapshot: String,

    /// Unit price in centimes at order time (frozen).
    pub unit_price_cents: i64,

    /// Copies ordered (positive).
    pub quantity: i64,

    pub created_at: DateTime<Utc>,
}

impl OrderItem {
    /// Line total (unit price × quantity).
    #[inline]
    pub fn line_total(&self) -> Money {
        Money::from_centimes(self.unit_price_cents).multiply_quantity(self.quantity)
    }
}

// =============================================================================
// Delivery Price
// =============================================================================

/// Per-wilaya delivery tariff, independently editable.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct DeliveryPrice {
    /// Wilaya code, 1..=58. Primary key.
    pub wilaya_id: i64,

    /// Doorstep delivery price in centimes.
    pub doorstep_cents: i64,

    /// Stop-desk delivery price in centimes.
    pub stop_desk_cents: i64,

    pub updated_at: DateTime<Utc>,
}

impl DeliveryPrice {
    /// Price for the given delivery mode.
    pub fn for_mode(&self, mode: DeliveryMode) -> Money {
        match mode {
            DeliveryMode::Doorstep => Money::from_centimes(self.doorstep_cents),
            DeliveryMode::StopDesk => Money::from_centimes(self.stop_desk_cents),
        }
    }
}

// =============================================================================
// Input DTOs
// =============================================================================

/// Header fields for a new order, validated before any mutation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewOrder {
    pub customer_id: String,
    pub delivery_cents: i64,
    pub discount_cents: i64,
    /// Percentage discount in basis points (1000 = 10%).
    pub discount_bps: i64,
    #[serde(default)]
    pub free_delivery: bool,
    #[serde(default)]
    pub fragile: bool,
    #[serde(default)]
    pub exchange: bool,
    #[serde(default)]
    pub pickup: bool,
    #[serde(default)]
    pub stop_desk: bool,
    #[serde(default)]
    pub cash_on_delivery: bool,
    #[serde(default)]
    pub notes: Option<String>,
}

/// A line item for a new order.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewOrderItem {
    pub book_id: String,
    pub quantity: i64,
    /// Price snapshotted by the caller (catalog price at order time).
    pub unit_price_cents: i64,
}

// =============================================================================
// Analytics DTOs
// =============================================================================

/// Optional time window for analytics queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Period {
    /// Last 24 hours.
    Day,
    /// Last 7 days.
    Week,
    /// Last 30 days.
    Month,
}

impl Period {
    /// Window length in days.
    pub const fn days(&self) -> i64 {
        match self {
            Period::Day => 1,
            Period::Week => 7,
            Period::Month => 30,
        }
    }
}

/// Calendar bucket granularity for the sales series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SeriesBucket {
    Day,
    Week,
    Month,
}

/// One best-selling book row.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BestSeller {
    pub book_id: String,
    pub title: String,
    pub total_quantity: i64,
}

/// Order count for one status.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusCount {
    pub status: OrderStatus,
    pub count: i64,
}

/// Order count for one wilaya.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WilayaCount {
    pub wilaya_id: i64,
    /// Resolved from the static wilaya table; None for unknown codes.
    pub wilaya_name: Option<String>,
    pub count: i64,
}

/// The dashboard headline figures.
///
/// Every field is zero/empty on an empty store; the aggregator never fails
/// for lack of data.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub orders_count: i64,
    /// Pre-discount, pre-delivery revenue (sum of order totals).
    pub total_sales_cents: i64,
    /// Revenue of delivered orders minus item cost of all windowed orders.
    pub profit_cents: i64,
    /// Fixed + percentage-derived discounts.
    pub discounts_cents: i64,
    pub best_selling_books: Vec<BestSeller>,
    pub orders_by_status: Vec<StatusCount>,
    pub orders_by_wilaya: Vec<WilayaCount>,
}

/// One time bucket of the sales series.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SalesPoint {
    /// Bucket label, e.g. `2026-08-27`, `2026-W34`, `2026-08`.
    pub period: String,
    pub sales_cents: i64,
    pub orders_count: i64,
    /// Total copies across the bucket's order items.
    pub books_count: i64,
    pub avg_order_value_cents: i64,
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_default() {
        assert_eq!(OrderStatus::default(), OrderStatus::Pending);
    }

    #[test]
    fn test_status_parse() {
        assert_eq!("pending".parse::<OrderStatus>().unwrap(), OrderStatus::Pending);
        assert_eq!("Delivered".parse::<OrderStatus>().unwrap(), OrderStatus::Delivered);
        assert_eq!(" returned ".parse::<OrderStatus>().unwrap(), OrderStatus::Returned);
        assert!("shipped".parse::<OrderStatus>().is_err());
    }

    #[test]
    fn test_status_legacy_alias() {
        // Old exports spelled "returned" as "reactionary".
        assert_eq!(
            "reactionary".parse::<OrderStatus>().unwrap(),
            OrderStatus::Returned
        );
    }

    #[test]
    fn test_status_terminal() {
        assert!(!OrderStatus::Pending.is_terminal());
        assert!(!OrderStatus::Delivering.is_terminal());
        assert!(OrderStatus::Delivered.is_terminal());
        assert!(OrderStatus::Returned.is_terminal());
    }

    #[test]
    fn test_delivery_price_mode() {
        let price = DeliveryPrice {
            wilaya_id: 16,
            doorstep_cents: 60_000,
            stop_desk_cents: 40_000,
            updated_at: Utc::now(),
        };
        assert_eq!(price.for_mode(DeliveryMode::Doorstep).centimes(), 60_000);
        assert_eq!(price.for_mode(DeliveryMode::StopDesk).centimes(), 40_000);
    }

    #[test]
    fn test_item_line_total() {
        let item = OrderItem {
            id: "i".into(),
            order_id: "o".into(),
            book_id: "b".into(),
            title_snapshot: "Title".into(),
            unit_price_cents: 95_000,
            quantity: 3,
            created_at: Utc::now(),
        };
        assert_eq!(item.line_total().centimes(), 285_000);
    }
}
