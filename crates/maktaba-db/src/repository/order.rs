//! # Order Ledger
//!
//! Database operations for orders, line items, and the stock side effects
//! of the order lifecycle.
//!
//! ## Order Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                       Order Lifecycle                               │
//! │                                                                     │
//! │  1. CREATE                                                          │
//! │     └── create_order() → Order { status: Pending }                  │
//! │         (one transaction: header + items + quantity_left -= qty)    │
//! │                                                                     │
//! │  2. HAND TO COURIER                                                 │
//! │     └── transition_status(Delivering) → delivering_stock += qty     │
//! │                                                                     │
//! │  3. DELIVERED                                                       │
//! │     └── transition_status(Delivered) → delivering -= qty,           │
//! │                                        sold += qty                  │
//! │                                                                     │
//! │  3'. RETURNED (from Pending or Delivering)                          │
//! │     └── transition_status(Returned) → quantity_left += qty          │
//! │                                                                     │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Concurrency
//! Two concurrent transitions on the same order must not both apply their
//! stock deltas. Every transition runs in one transaction and flips the
//! status with a compare-and-set (`WHERE id = ? AND status = ?`); the loser
//! of a race matches zero rows, the transaction rolls back untouched, and
//! the caller gets a retryable [`DbError::Conflict`].

use chrono::Utc;
use rand::distr::Alphanumeric;
use rand::Rng;
use sqlx::{Sqlite, SqlitePool, Transaction};
use tracing::{debug, info};
use uuid::Uuid;

use crate::error::{DbError, DbResult};
use maktaba_core::money::compute_final_amount;
use maktaba_core::stock::{self, StockDelta, Transition};
use maktaba_core::validation::validate_new_order;
use maktaba_core::{Money, NewOrder, NewOrderItem, Order, OrderItem, OrderStatus};

/// Repository for the order ledger.
#[derive(Debug, Clone)]
pub struct OrderRepository {
    pool: SqlitePool,
}

const SELECT_ORDER: &str = r#"
    SELECT id, reference, customer_id, status,
           total_cents, delivery_cents, discount_cents, discount_bps, final_cents,
           free_delivery, fragile, exchange, pickup, stop_desk, cash_on_delivery,
           notes, created_at, updated_at
    FROM orders
"#;

impl OrderRepository {
    /// Creates a new OrderRepository.
    pub fn new(pool: SqlitePool) -> Self {
        OrderRepository { pool }
    }

    /// Gets an order by ID.
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<Order>> {
        let order = sqlx::query_as::<_, Order>(&format!("{SELECT_ORDER} WHERE id = ?1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(order)
    }

    /// Gets an order by its human-readable reference.
    pub async fn get_by_reference(&self, reference: &str) -> DbResult<Option<Order>> {
        let order = sqlx::query_as::<_, Order>(&format!("{SELECT_ORDER} WHERE reference = ?1"))
            .bind(reference)
            .fetch_optional(&self.pool)
            .await?;

        Ok(order)
    }

    /// Gets all items for an order, oldest first.
    pub async fn get_items(&self, order_id: &str) -> DbResult<Vec<OrderItem>> {
        let items = sqlx::query_as::<_, OrderItem>(
            r#"
            SELECT id, order_id, book_id, title_snapshot,
                   unit_price_cents, quantity, created_at
            FROM order_items
            WHERE order_id = ?1
            ORDER BY created_at
            "#,
        )
        .bind(order_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(items)
    }

    /// Lists recent orders, optionally filtered by status.
    pub async fn list_recent(&self, status: Option<OrderStatus>, limit: u32) -> DbResult<Vec<Order>> {
        let orders = match status {
            Some(status) => {
                sqlx::query_as::<_, Order>(&format!(
                    "{SELECT_ORDER} WHERE status = ?1 ORDER BY created_at DESC LIMIT ?2"
                ))
                .bind(status)
                .bind(limit)
                .fetch_all(&self.pool)
                .await?
            }
            None => {
                sqlx::query_as::<_, Order>(&format!(
                    "{SELECT_ORDER} ORDER BY created_at DESC LIMIT ?1"
                ))
                .bind(limit)
                .fetch_all(&self.pool)
                .await?
            }
        };

        Ok(orders)
    }

    /// Creates an order with its items as a single atomic unit.
    ///
    /// ## What This Does (one transaction)
    /// 1. Validates the payload - bad input is rejected before any write
    /// 2. Verifies the customer and every referenced book exist
    /// 3. Inserts the order header (status Pending, generated reference)
    ///    and all line items
    /// 4. Decrements each book's `quantity_left`, floored at zero
    ///
    /// If anything fails, the transaction rolls back: no header without
    /// items, no items without stock adjustment.
    ///
    /// ## Overselling
    /// A quantity above the available stock is NOT an error: the decrement
    /// floors at zero and the order goes through. Pending orders are
    /// reviewed by a human before handing to the courier, which is where
    /// oversold orders get caught.
    pub async fn create_order(&self, header: NewOrder, items: Vec<NewOrderItem>) -> DbResult<Order> {
        validate_new_order(&header, &items)?;

        let mut tx = self.pool.begin().await?;

        // Customer must exist before we persist anything.
        let customer_exists: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM customers WHERE id = ?1")
                .bind(&header.customer_id)
                .fetch_one(&mut *tx)
                .await?;
        if customer_exists == 0 {
            return Err(DbError::not_found("Customer", &header.customer_id));
        }

        // Resolve every book up front: an unknown book id rejects the whole
        // order before any row is written, and the titles become snapshots.
        let mut titles = Vec::with_capacity(items.len());
        for item in &items {
            let title: Option<String> = sqlx::query_scalar("SELECT title FROM books WHERE id = ?1")
                .bind(&item.book_id)
                .fetch_optional(&mut *tx)
                .await?;
            match title {
                Some(title) => titles.push(title),
                None => return Err(DbError::not_found("Book", &item.book_id)),
            }
        }

        let now = Utc::now();
        let order_id = Uuid::new_v4().to_string();
        let reference = generate_order_reference();

        let total: Money = items
            .iter()
            .map(|i| Money::from_centimes(i.unit_price_cents).multiply_quantity(i.quantity))
            .fold(Money::zero(), |acc, m| acc + m);

        let delivery = if header.free_delivery {
            Money::zero()
        } else {
            Money::from_centimes(header.delivery_cents)
        };

        let final_amount = compute_final_amount(
            total,
            Money::from_centimes(header.discount_cents),
            header.discount_bps as u32,
            delivery,
        );

        debug!(order_id = %order_id, reference = %reference, items = items.len(), "Creating order");

        sqlx::query(
            r#"
            INSERT INTO orders (
                id, reference, customer_id, status,
                total_cents, delivery_cents, discount_cents, discount_bps, final_cents,
                free_delivery, fragile, exchange, pickup, stop_desk, cash_on_delivery,
                notes, created_at, updated_at
            ) VALUES (
                ?1, ?2, ?3, ?4,
                ?5, ?6, ?7, ?8, ?9,
                ?10, ?11, ?12, ?13, ?14, ?15,
                ?16, ?17, ?18
            )
            "#,
        )
        .bind(&order_id)
        .bind(&reference)
        .bind(&header.customer_id)
        .bind(OrderStatus::Pending)
        .bind(total.centimes())
        .bind(delivery.centimes())
        .bind(header.discount_cents)
        .bind(header.discount_bps)
        .bind(final_amount.centimes())
        .bind(header.free_delivery)
        .bind(header.fragile)
        .bind(header.exchange)
        .bind(header.pickup)
        .bind(header.stop_desk)
        .bind(header.cash_on_delivery)
        .bind(&header.notes)
        .bind(now)
        .bind(now)
        .execute(&mut *tx)
        .await?;

        for (item, title) in items.iter().zip(&titles) {
            sqlx::query(
                r#"
                INSERT INTO order_items (
                    id, order_id, book_id, title_snapshot,
                    unit_price_cents, quantity, created_at
                ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
                "#,
            )
            .bind(Uuid::new_v4().to_string())
            .bind(&order_id)
            .bind(&item.book_id)
            .bind(title)
            .bind(item.unit_price_cents)
            .bind(item.quantity)
            .bind(now)
            .execute(&mut *tx)
            .await?;

            // Take copies out of the available pool, floored at zero.
            apply_stock_delta(&mut tx, &item.book_id, stock::creation_delta(), item.quantity)
                .await?;
        }

        tx.commit().await?;

        info!(order_id = %order_id, reference = %reference, total = %total, "Order created");

        Ok(Order {
            id: order_id,
            reference,
            customer_id: header.customer_id,
            status: OrderStatus::Pending,
            total_cents: total.centimes(),
            delivery_cents: delivery.centimes(),
            discount_cents: header.discount_cents,
            discount_bps: header.discount_bps,
            final_cents: final_amount.centimes(),
            free_delivery: header.free_delivery,
            fragile: header.fragile,
            exchange: header.exchange,
            pickup: header.pickup,
            stop_desk: header.stop_desk,
            cash_on_delivery: header.cash_on_delivery,
            notes: header.notes,
            created_at: now,
            updated_at: now,
        })
    }

    /// Moves an order to a new lifecycle status and applies the matching
    /// stock deltas to every book in the order, all in one transaction.
    ///
    /// ## Semantics
    /// - Same-state requests succeed without touching anything (idempotent)
    /// - Illegal edges (out of a terminal state, skipping a state) return
    ///   `DbError::Core(CoreError::InvalidTransition)`
    /// - A lost race against a concurrent transition returns a retryable
    ///   `DbError::Conflict` with nothing applied
    pub async fn transition_status(
        &self,
        order_id: &str,
        new_status: OrderStatus,
    ) -> DbResult<Order> {
        let mut tx = self.pool.begin().await?;

        let order = sqlx::query_as::<_, Order>(&format!("{SELECT_ORDER} WHERE id = ?1"))
            .bind(order_id)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or_else(|| DbError::not_found("Order", order_id))?;

        let delta = match stock::transition(order.status, new_status)? {
            Transition::NoOp => {
                debug!(order_id = %order_id, status = %new_status, "Status unchanged, no-op");
                return Ok(order);
            }
            Transition::Apply(delta) => delta,
        };

        let now = Utc::now();

        // Compare-and-set: only wins if the status we read is still current.
        let result = sqlx::query(
            r#"
            UPDATE orders SET status = ?3, updated_at = ?4
            WHERE id = ?1 AND status = ?2
            "#,
        )
        .bind(order_id)
        .bind(order.status)
        .bind(new_status)
        .bind(now)
        .execute(&mut *tx)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::conflict("Order", order_id));
        }

        let items = sqlx::query_as::<_, OrderItem>(
            r#"
            SELECT id, order_id, book_id, title_snapshot,
                   unit_price_cents, quantity, created_at
            FROM order_items
            WHERE order_id = ?1
            "#,
        )
        .bind(order_id)
        .fetch_all(&mut *tx)
        .await?;

        for item in &items {
            apply_stock_delta(&mut tx, &item.book_id, delta, item.quantity).await?;
        }

        tx.commit().await?;

        info!(
            order_id = %order_id,
            from = %order.status,
            to = %new_status,
            items = items.len(),
            "Order status transitioned"
        );

        Ok(Order {
            status: new_status,
            updated_at: now,
            ..order
        })
    }

    /// [`Self::transition_status`] for a status given in wire form.
    ///
    /// Accepts the legacy `"reactionary"` alias for `returned`.
    pub async fn transition_status_str(&self, order_id: &str, status: &str) -> DbResult<Order> {
        let new_status: OrderStatus = status.parse().map_err(DbError::Core)?;
        self.transition_status(order_id, new_status).await
    }
}

/// Applies one book's per-unit stock delta, scaled by quantity.
///
/// Decrements floor at zero (`MAX(x + d, 0)`): data drift from manual
/// catalog edits must never push a counter negative or abort a transition.
async fn apply_stock_delta(
    tx: &mut Transaction<'_, Sqlite>,
    book_id: &str,
    delta: StockDelta,
    quantity: i64,
) -> DbResult<()> {
    if delta.is_none() {
        return Ok(());
    }

    let result = sqlx::query(
        r#"
        UPDATE books SET
            quantity_left    = MAX(quantity_left    + ?2, 0),
            delivering_stock = MAX(delivering_stock + ?3, 0),
            sold_stock       = MAX(sold_stock       + ?4, 0),
            updated_at       = ?5
        WHERE id = ?1
        "#,
    )
    .bind(book_id)
    .bind(delta.available * quantity)
    .bind(delta.delivering * quantity)
    .bind(delta.sold * quantity)
    .bind(Utc::now())
    .execute(&mut **tx)
    .await?;

    // A book deleted after the order was placed: the snapshot keeps the
    // history intact and there is no counter left to move.
    if result.rows_affected() == 0 {
        debug!(book_id = %book_id, "Book gone, skipping stock adjustment");
    }

    Ok(())
}

/// Generates a human-readable order reference: `CMD-` plus 8 random
/// alphanumeric characters.
///
/// Random, not sequential: references appear on delivery slips and a
/// sequence would leak order volume to anyone holding two parcels. With
/// 36^8 combinations, collisions are negligible (and the UNIQUE index
/// turns one into a retryable insert error rather than silent reuse).
fn generate_order_reference() -> String {
    let code: String = rand::rng()
        .sample_iter(&Alphanumeric)
        .take(8)
        .map(char::from)
        .collect();
    format!("CMD-{}", code.to_uppercase())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};
    use crate::repository::book::generate_book_id;
    use crate::repository::customer::NewCustomer;
    use maktaba_core::{Book, CoreError};

    async fn test_db() -> Database {
        Database::new(DbConfig::in_memory()).await.unwrap()
    }

    async fn seed_book(db: &Database, quantity: i64) -> Book {
        let now = Utc::now();
        let book = Book {
            id: generate_book_id(),
            title: "Nedjma".to_string(),
            author: None,
            publisher: None,
            price_cents: 95_000,
            cost_cents: 60_000,
            quantity_left: quantity,
            delivering_stock: 0,
            sold_stock: 0,
            created_at: now,
            updated_at: now,
        };
        db.books().insert(&book).await.unwrap()
    }

    async fn seed_customer(db: &Database) -> String {
        db.customers()
            .find_or_create(&NewCustomer {
                name: "Amine B.".to_string(),
                phone: "0550123456".to_string(),
                phone2: None,
                address: None,
                wilaya_id: Some(31),
                commune: None,
            })
            .await
            .unwrap()
            .id
    }

    fn header(customer_id: &str) -> NewOrder {
        NewOrder {
            customer_id: customer_id.to_string(),
            delivery_cents: 60_000,
            discount_cents: 0,
            discount_bps: 0,
            free_delivery: false,
            fragile: false,
            exchange: false,
            pickup: false,
            stop_desk: false,
            cash_on_delivery: true,
            notes: None,
        }
    }

    fn item(book: &Book, qty: i64) -> NewOrderItem {
        NewOrderItem {
            book_id: book.id.clone(),
            quantity: qty,
            unit_price_cents: book.price_cents,
        }
    }

    async fn stock_of(db: &Database, book_id: &str) -> (i64, i64, i64) {
        let b = db.books().get_by_id(book_id).await.unwrap().unwrap();
        (b.quantity_left, b.delivering_stock, b.sold_stock)
    }

    #[tokio::test]
    async fn test_create_order_decrements_stock() {
        let db = test_db().await;
        let book = seed_book(&db, 10).await;
        let customer = seed_customer(&db).await;

        let order = db
            .orders()
            .create_order(header(&customer), vec![item(&book, 3)])
            .await
            .unwrap();

        assert_eq!(order.status, OrderStatus::Pending);
        assert!(order.reference.starts_with("CMD-"));
        assert_eq!(order.total_cents, 285_000);
        // 285000 items + 60000 delivery
        assert_eq!(order.final_cents, 345_000);
        assert_eq!(stock_of(&db, &book.id).await, (7, 0, 0));

        let items = db.orders().get_items(&order.id).await.unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].title_snapshot, "Nedjma");
        assert_eq!(items[0].quantity, 3);
    }

    #[tokio::test]
    async fn test_create_order_free_delivery_prices_at_zero() {
        let db = test_db().await;
        let book = seed_book(&db, 10).await;
        let customer = seed_customer(&db).await;

        let mut h = header(&customer);
        h.free_delivery = true;
        let order = db.orders().create_order(h, vec![item(&book, 1)]).await.unwrap();

        assert_eq!(order.delivery_cents, 0);
        assert_eq!(order.final_cents, order.total_cents);
    }

    #[tokio::test]
    async fn test_oversell_floors_at_zero() {
        let db = test_db().await;
        let book = seed_book(&db, 2).await;
        let customer = seed_customer(&db).await;

        // Requesting 5 of 2 is allowed by policy; the pool just empties.
        db.orders()
            .create_order(header(&customer), vec![item(&book, 5)])
            .await
            .unwrap();

        assert_eq!(stock_of(&db, &book.id).await, (0, 0, 0));
    }

    #[tokio::test]
    async fn test_create_order_rejects_empty_items() {
        let db = test_db().await;
        let customer = seed_customer(&db).await;

        let err = db.orders().create_order(header(&customer), vec![]).await.unwrap_err();
        assert!(matches!(err, DbError::Core(CoreError::Validation(_))));
    }

    #[tokio::test]
    async fn test_create_order_atomic_on_unknown_book() {
        let db = test_db().await;
        let book = seed_book(&db, 10).await;
        let customer = seed_customer(&db).await;

        let ghost = NewOrderItem {
            book_id: Uuid::new_v4().to_string(),
            quantity: 1,
            unit_price_cents: 100,
        };

        let err = db
            .orders()
            .create_order(header(&customer), vec![item(&book, 3), ghost])
            .await
            .unwrap_err();
        assert!(matches!(err, DbError::NotFound { .. }));

        // Nothing persisted, nothing decremented.
        let orders: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM orders")
            .fetch_one(db.pool())
            .await
            .unwrap();
        let items: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM order_items")
            .fetch_one(db.pool())
            .await
            .unwrap();
        assert_eq!(orders, 0);
        assert_eq!(items, 0);
        assert_eq!(stock_of(&db, &book.id).await, (10, 0, 0));
    }

    #[tokio::test]
    async fn test_create_order_rejects_unknown_customer() {
        let db = test_db().await;
        let book = seed_book(&db, 10).await;

        let err = db
            .orders()
            .create_order(header(&Uuid::new_v4().to_string()), vec![item(&book, 1)])
            .await
            .unwrap_err();
        assert!(matches!(err, DbError::NotFound { .. }));
    }

    /// Happy path: 10 copies, order 3, deliver them.
    #[tokio::test]
    async fn test_full_lifecycle_round_trip() {
        let db = test_db().await;
        let book = seed_book(&db, 10).await;
        let customer = seed_customer(&db).await;

        let order = db
            .orders()
            .create_order(header(&customer), vec![item(&book, 3)])
            .await
            .unwrap();
        assert_eq!(stock_of(&db, &book.id).await, (7, 0, 0));

        let order = db
            .orders()
            .transition_status(&order.id, OrderStatus::Delivering)
            .await
            .unwrap();
        assert_eq!(order.status, OrderStatus::Delivering);
        assert_eq!(stock_of(&db, &book.id).await, (7, 3, 0));

        let order = db
            .orders()
            .transition_status(&order.id, OrderStatus::Delivered)
            .await
            .unwrap();
        assert_eq!(order.status, OrderStatus::Delivered);
        assert_eq!(stock_of(&db, &book.id).await, (7, 0, 3));
    }

    /// Alternative path: return straight from pending restores the pool.
    #[tokio::test]
    async fn test_pending_return_restores_stock() {
        let db = test_db().await;
        let book = seed_book(&db, 10).await;
        let customer = seed_customer(&db).await;

        let order = db
            .orders()
            .create_order(header(&customer), vec![item(&book, 3)])
            .await
            .unwrap();
        assert_eq!(stock_of(&db, &book.id).await, (7, 0, 0));

        db.orders()
            .transition_status(&order.id, OrderStatus::Returned)
            .await
            .unwrap();
        assert_eq!(stock_of(&db, &book.id).await, (10, 0, 0));
    }

    #[tokio::test]
    async fn test_delivering_return_unreserves() {
        let db = test_db().await;
        let book = seed_book(&db, 10).await;
        let customer = seed_customer(&db).await;

        let order = db
            .orders()
            .create_order(header(&customer), vec![item(&book, 4)])
            .await
            .unwrap();
        db.orders()
            .transition_status(&order.id, OrderStatus::Delivering)
            .await
            .unwrap();
        assert_eq!(stock_of(&db, &book.id).await, (6, 4, 0));

        db.orders()
            .transition_status(&order.id, OrderStatus::Returned)
            .await
            .unwrap();
        assert_eq!(stock_of(&db, &book.id).await, (10, 0, 0));
    }

    /// Terminal idempotence: repeating a terminal transition moves nothing.
    #[tokio::test]
    async fn test_terminal_transition_is_idempotent() {
        let db = test_db().await;
        let book = seed_book(&db, 10).await;
        let customer = seed_customer(&db).await;

        let order = db
            .orders()
            .create_order(header(&customer), vec![item(&book, 3)])
            .await
            .unwrap();
        db.orders()
            .transition_status(&order.id, OrderStatus::Delivering)
            .await
            .unwrap();
        db.orders()
            .transition_status(&order.id, OrderStatus::Delivered)
            .await
            .unwrap();
        let before = stock_of(&db, &book.id).await;

        let again = db
            .orders()
            .transition_status(&order.id, OrderStatus::Delivered)
            .await
            .unwrap();
        assert_eq!(again.status, OrderStatus::Delivered);
        assert_eq!(stock_of(&db, &book.id).await, before);
    }

    #[tokio::test]
    async fn test_illegal_transition_rejected_without_side_effects() {
        let db = test_db().await;
        let book = seed_book(&db, 10).await;
        let customer = seed_customer(&db).await;

        let order = db
            .orders()
            .create_order(header(&customer), vec![item(&book, 3)])
            .await
            .unwrap();

        // pending -> delivered skips the courier step
        let err = db
            .orders()
            .transition_status(&order.id, OrderStatus::Delivered)
            .await
            .unwrap_err();
        assert!(matches!(err, DbError::Core(CoreError::InvalidTransition { .. })));

        // Order and stock untouched
        let loaded = db.orders().get_by_id(&order.id).await.unwrap().unwrap();
        assert_eq!(loaded.status, OrderStatus::Pending);
        assert_eq!(stock_of(&db, &book.id).await, (7, 0, 0));
    }

    #[tokio::test]
    async fn test_transition_unknown_order() {
        let db = test_db().await;
        let err = db
            .orders()
            .transition_status(&Uuid::new_v4().to_string(), OrderStatus::Delivering)
            .await
            .unwrap_err();
        assert!(matches!(err, DbError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_legacy_returned_alias() {
        let db = test_db().await;
        let book = seed_book(&db, 10).await;
        let customer = seed_customer(&db).await;

        let order = db
            .orders()
            .create_order(header(&customer), vec![item(&book, 2)])
            .await
            .unwrap();

        let order = db
            .orders()
            .transition_status_str(&order.id, "reactionary")
            .await
            .unwrap();
        assert_eq!(order.status, OrderStatus::Returned);
        assert_eq!(stock_of(&db, &book.id).await, (10, 0, 0));
    }

    #[tokio::test]
    async fn test_unknown_status_string() {
        let db = test_db().await;
        let err = db
            .orders()
            .transition_status_str("whatever", "shipped")
            .await
            .unwrap_err();
        assert!(matches!(err, DbError::Core(CoreError::UnknownStatus(_))));
    }

    #[tokio::test]
    async fn test_lookup_by_reference_and_listing() {
        let db = test_db().await;
        let book = seed_book(&db, 10).await;
        let customer = seed_customer(&db).await;

        let order = db
            .orders()
            .create_order(header(&customer), vec![item(&book, 1)])
            .await
            .unwrap();

        let found = db
            .orders()
            .get_by_reference(&order.reference)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(found.id, order.id);

        let pending = db
            .orders()
            .list_recent(Some(OrderStatus::Pending), 10)
            .await
            .unwrap();
        assert_eq!(pending.len(), 1);

        let delivered = db
            .orders()
            .list_recent(Some(OrderStatus::Delivered), 10)
            .await
            .unwrap();
        assert!(delivered.is_empty());
    }

    #[test]
    fn test_reference_format() {
        let reference = generate_order_reference();
        assert!(reference.starts_with("CMD-"));
        assert_eq!(reference.len(), 12);
        assert!(reference[4..].chars().all(|c| c.is_ascii_alphanumeric()));
    }
}
