//! # Delivery Price Repository
//!
//! Per-wilaya delivery tariffs, looked up when pricing an order.

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::debug;

use crate::error::DbResult;
use maktaba_core::validation::validate_wilaya_id;
use maktaba_core::{DeliveryMode, DeliveryPrice, Money};

/// Repository for delivery price operations.
#[derive(Debug, Clone)]
pub struct DeliveryPriceRepository {
    pool: SqlitePool,
}

impl DeliveryPriceRepository {
    /// Creates a new DeliveryPriceRepository.
    pub fn new(pool: SqlitePool) -> Self {
        DeliveryPriceRepository { pool }
    }

    /// Gets the tariff for a wilaya.
    pub async fn get(&self, wilaya_id: i64) -> DbResult<Option<DeliveryPrice>> {
        let price = sqlx::query_as::<_, DeliveryPrice>(
            r#"
            SELECT wilaya_id, doorstep_cents, stop_desk_cents, updated_at
            FROM delivery_prices
            WHERE wilaya_id = ?1
            "#,
        )
        .bind(wilaya_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(price)
    }

    /// Lists all tariffs ordered by wilaya code.
    pub async fn list(&self) -> DbResult<Vec<DeliveryPrice>> {
        let prices = sqlx::query_as::<_, DeliveryPrice>(
            r#"
            SELECT wilaya_id, doorstep_cents, stop_desk_cents, updated_at
            FROM delivery_prices
            ORDER BY wilaya_id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(prices)
    }

    /// Creates or replaces the tariff for a wilaya.
    pub async fn upsert(
        &self,
        wilaya_id: i64,
        doorstep_cents: i64,
        stop_desk_cents: i64,
    ) -> DbResult<()> {
        validate_wilaya_id(wilaya_id)?;

        debug!(wilaya_id, doorstep_cents, stop_desk_cents, "Upserting delivery price");

        let now = Utc::now();

        sqlx::query(
            r#"
            INSERT INTO delivery_prices (wilaya_id, doorstep_cents, stop_desk_cents, updated_at)
            VALUES (?1, ?2, ?3, ?4)
            ON CONFLICT (wilaya_id) DO UPDATE SET
                doorstep_cents = excluded.doorstep_cents,
                stop_desk_cents = excluded.stop_desk_cents,
                updated_at = excluded.updated_at
            "#,
        )
        .bind(wilaya_id)
        .bind(doorstep_cents)
        .bind(stop_desk_cents)
        .bind(now)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Delivery cost for a wilaya and mode; zero when no tariff is set.
    ///
    /// Missing tariffs price at zero rather than failing: pricing gaps are
    /// a data-entry problem, not a reason to block an order.
    pub async fn price_for(&self, wilaya_id: i64, mode: DeliveryMode) -> DbResult<Money> {
        let price = self.get(wilaya_id).await?;
        Ok(price.map(|p| p.for_mode(mode)).unwrap_or_else(Money::zero))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};

    #[tokio::test]
    async fn test_upsert_and_lookup() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let repo = db.delivery_prices();

        repo.upsert(31, 60_000, 40_000).await.unwrap();

        let price = repo.get(31).await.unwrap().unwrap();
        assert_eq!(price.doorstep_cents, 60_000);
        assert_eq!(price.stop_desk_cents, 40_000);

        // Replace
        repo.upsert(31, 70_000, 45_000).await.unwrap();
        let price = repo.get(31).await.unwrap().unwrap();
        assert_eq!(price.doorstep_cents, 70_000);
    }

    #[tokio::test]
    async fn test_price_for_mode() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let repo = db.delivery_prices();
        repo.upsert(16, 50_000, 30_000).await.unwrap();

        assert_eq!(
            repo.price_for(16, DeliveryMode::Doorstep).await.unwrap().centimes(),
            50_000
        );
        assert_eq!(
            repo.price_for(16, DeliveryMode::StopDesk).await.unwrap().centimes(),
            30_000
        );
    }

    #[tokio::test]
    async fn test_missing_tariff_prices_at_zero() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let price = db
            .delivery_prices()
            .price_for(45, DeliveryMode::Doorstep)
            .await
            .unwrap();
        assert!(price.is_zero());
    }

    #[tokio::test]
    async fn test_rejects_unknown_wilaya() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        assert!(db.delivery_prices().upsert(99, 0, 0).await.is_err());
    }
}
