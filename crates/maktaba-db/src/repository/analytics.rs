//! # Analytics Aggregator
//!
//! Read-only aggregation queries over the order ledger: the dashboard
//! headline figures and the bucketed sales series.
//!
//! ## Design Notes
//! - Aggregation happens in SQL, not by loading orders into memory
//! - Every aggregate COALESCEs to zero: an empty store produces a valid,
//!   all-zero dashboard rather than an error
//! - Best-seller titles come from the item snapshots, so books deleted from
//!   the catalog still show up in historical rankings
//!
//! ## Profit
//! ```text
//! profit = revenue(delivered orders in window)
//!        - item cost(ALL orders in window)
//! ```
//! Cost is committed the moment an order exists (the copies left the
//! shelf), revenue only once the courier confirms delivery. Pending and
//! returned orders therefore drag profit down until they resolve.

use chrono::{DateTime, Duration, Utc};
use sqlx::SqlitePool;
use tracing::debug;

use crate::error::DbResult;
use maktaba_core::wilaya::wilaya_name;
use maktaba_core::{
    BestSeller, DashboardStats, OrderStatus, Period, SalesPoint, SeriesBucket, StatusCount,
    WilayaCount,
};

/// Repository for analytics queries.
#[derive(Debug, Clone)]
pub struct AnalyticsRepository {
    pool: SqlitePool,
}

impl AnalyticsRepository {
    /// Creates a new AnalyticsRepository.
    pub fn new(pool: SqlitePool) -> Self {
        AnalyticsRepository { pool }
    }

    /// Computes the dashboard headline figures.
    ///
    /// `period` of `None` means all time; otherwise orders are filtered on
    /// `created_at` within the trailing window. `top_n` caps the
    /// best-seller list.
    pub async fn dashboard_stats(
        &self,
        period: Option<Period>,
        top_n: u32,
    ) -> DbResult<DashboardStats> {
        let cutoff = window_cutoff(period);

        debug!(?period, top_n, "Computing dashboard stats");

        let (orders_count, total_sales_cents, delivered_sales_cents, discounts_cents): (
            i64,
            i64,
            i64,
            i64,
        ) = sqlx::query_as(
            r#"
            SELECT
                COUNT(*),
                COALESCE(SUM(total_cents), 0),
                COALESCE(SUM(CASE WHEN status = 'delivered' THEN total_cents ELSE 0 END), 0),
                COALESCE(SUM(discount_cents + total_cents * discount_bps / 10000), 0)
            FROM orders
            WHERE created_at >= COALESCE(?1, created_at)
            "#,
        )
        .bind(cutoff)
        .fetch_one(&self.pool)
        .await?;

        // Item cost of every windowed order, delivered or not. Books deleted
        // since then drop out of the join; their cost is unknowable.
        let cost_cents: i64 = sqlx::query_scalar(
            r#"
            SELECT COALESCE(SUM(oi.quantity * b.cost_cents), 0)
            FROM order_items oi
            JOIN orders o ON o.id = oi.order_id
            JOIN books b ON b.id = oi.book_id
            WHERE o.created_at >= COALESCE(?1, o.created_at)
            "#,
        )
        .bind(cutoff)
        .fetch_one(&self.pool)
        .await?;

        // Ties break on book id so the ranking is stable across refreshes.
        let best_selling_books: Vec<BestSeller> = sqlx::query_as::<_, (String, String, i64)>(
            r#"
            SELECT oi.book_id, MIN(oi.title_snapshot), SUM(oi.quantity) AS qty
            FROM order_items oi
            JOIN orders o ON o.id = oi.order_id
            WHERE o.created_at >= COALESCE(?1, o.created_at)
            GROUP BY oi.book_id
            ORDER BY qty DESC, oi.book_id ASC
            LIMIT ?2
            "#,
        )
        .bind(cutoff)
        .bind(top_n)
        .fetch_all(&self.pool)
        .await?
        .into_iter()
        .map(|(book_id, title, total_quantity)| BestSeller {
            book_id,
            title,
            total_quantity,
        })
        .collect();

        let orders_by_status: Vec<StatusCount> = sqlx::query_as::<_, (OrderStatus, i64)>(
            r#"
            SELECT status, COUNT(*) AS n
            FROM orders
            WHERE created_at >= COALESCE(?1, created_at)
            GROUP BY status
            ORDER BY n DESC
            "#,
        )
        .bind(cutoff)
        .fetch_all(&self.pool)
        .await?
        .into_iter()
        .map(|(status, count)| StatusCount { status, count })
        .collect();

        let orders_by_wilaya: Vec<WilayaCount> = sqlx::query_as::<_, (i64, i64)>(
            r#"
            SELECT c.wilaya_id, COUNT(*) AS n
            FROM orders o
            JOIN customers c ON c.id = o.customer_id
            WHERE c.wilaya_id IS NOT NULL
              AND o.created_at >= COALESCE(?1, o.created_at)
            GROUP BY c.wilaya_id
            ORDER BY n DESC, c.wilaya_id ASC
            "#,
        )
        .bind(cutoff)
        .fetch_all(&self.pool)
        .await?
        .into_iter()
        .map(|(wilaya_id, count)| WilayaCount {
            wilaya_id,
            wilaya_name: wilaya_name(wilaya_id).map(str::to_string),
            count,
        })
        .collect();

        Ok(DashboardStats {
            orders_count,
            total_sales_cents,
            profit_cents: delivered_sales_cents - cost_cents,
            discounts_cents,
            best_selling_books,
            orders_by_status,
            orders_by_wilaya,
        })
    }

    /// Sales grouped into calendar buckets, oldest bucket first.
    ///
    /// `range` of `None` means all time. Buckets with no orders are simply
    /// absent; the caller decides whether to zero-fill for charting.
    pub async fn sales_series(
        &self,
        range: Option<Period>,
        bucket: SeriesBucket,
    ) -> DbResult<Vec<SalesPoint>> {
        let cutoff = window_cutoff(range);
        let fmt = bucket_format(bucket);

        debug!(?range, ?bucket, "Computing sales series");

        let rows: Vec<(String, i64, i64, i64)> = sqlx::query_as(&format!(
            r#"
            SELECT strftime('{fmt}', o.created_at) AS period,
                   COALESCE(SUM(o.total_cents), 0),
                   COUNT(*),
                   COALESCE(SUM(ic.qty), 0)
            FROM orders o
            LEFT JOIN (
                SELECT order_id, SUM(quantity) AS qty
                FROM order_items
                GROUP BY order_id
            ) ic ON ic.order_id = o.id
            WHERE o.created_at >= COALESCE(?1, o.created_at)
            GROUP BY period
            ORDER BY period ASC
            "#
        ))
        .bind(cutoff)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|(period, sales_cents, orders_count, books_count)| SalesPoint {
                period,
                sales_cents,
                orders_count,
                books_count,
                avg_order_value_cents: if orders_count > 0 {
                    sales_cents / orders_count
                } else {
                    0
                },
            })
            .collect())
    }
}

/// Start of the trailing window, or None for all time.
fn window_cutoff(period: Option<Period>) -> Option<DateTime<Utc>> {
    period.map(|p| Utc::now() - Duration::days(p.days()))
}

/// strftime format for a bucket granularity.
///
/// Week uses `%W` (Monday-first week number), so a week label reads
/// `2026-W34`.
const fn bucket_format(bucket: SeriesBucket) -> &'static str {
    match bucket {
        SeriesBucket::Day => "%Y-%m-%d",
        SeriesBucket::Week => "%Y-W%W",
        SeriesBucket::Month => "%Y-%m",
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
