//! # Customer Repository
//!
//! Database operations for customers.
//!
//! The phone number is the deduplication key: `find_or_create` is what the
//! order-entry flow calls, so a returning customer never gets a second row.

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::debug;
use uuid::Uuid;

use crate::error::{DbError, DbResult};
use maktaba_core::validation::{validate_phone, validate_wilaya_id};
use maktaba_core::Customer;

/// Fields for a new (or looked-up) customer.
#[derive(Debug, Clone)]
pub struct NewCustomer {
    pub name: String,
    pub phone: String,
    pub phone2: Option<String>,
    pub address: Option<String>,
    pub wilaya_id: Option<i64>,
    pub commune: Option<String>,
}

/// Repository for customer database operations.
#[derive(Debug, Clone)]
pub struct CustomerRepository {
    pool: SqlitePool,
}

impl CustomerRepository {
    /// Creates a new CustomerRepository.
    pub fn new(pool: SqlitePool) -> Self {
        CustomerRepository { pool }
    }

    /// Gets a customer by ID.
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<Customer>> {
        let customer = sqlx::query_as::<_, Customer>(
            r#"
            SELECT id, name, phone, phone2, address, wilaya_id, commune,
                   loyalty_points, loyalty_tier, created_at, updated_at
            FROM customers
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(customer)
    }

    /// Gets a customer by phone number (the dedup key).
    pub async fn get_by_phone(&self, phone: &str) -> DbResult<Option<Customer>> {
        let customer = sqlx::query_as::<_, Customer>(
            r#"
            SELECT id, name, phone, phone2, address, wilaya_id, commune,
                   loyalty_points, loyalty_tier, created_at, updated_at
            FROM customers
            WHERE phone = ?1
            "#,
        )
        .bind(phone.trim())
        .fetch_optional(&self.pool)
        .await?;

        Ok(customer)
    }

    /// Returns the existing customer with this phone, or creates one.
    ///
    /// ## Dedup Policy
    /// The phone is the identity; name/address differences on a match do
    /// NOT update the stored row (address edits are an explicit operation).
    pub async fn find_or_create(&self, new: &NewCustomer) -> DbResult<Customer> {
        validate_phone(&new.phone)?;
        if let Some(wilaya_id) = new.wilaya_id {
            validate_wilaya_id(wilaya_id)?;
        }

        if let Some(existing) = self.get_by_phone(&new.phone).await? {
            debug!(id = %existing.id, phone = %existing.phone, "Reusing existing customer");
            return Ok(existing);
        }

        let now = Utc::now();
        let customer = Customer {
            id: Uuid::new_v4().to_string(),
            name: new.name.trim().to_string(),
            phone: new.phone.trim().to_string(),
            phone2: new.phone2.clone(),
            address: new.address.clone(),
            wilaya_id: new.wilaya_id,
            commune: new.commune.clone(),
            loyalty_points: 0,
            loyalty_tier: None,
            created_at: now,
            updated_at: now,
        };

        debug!(id = %customer.id, phone = %customer.phone, "Creating customer");

        sqlx::query(
            r#"
            INSERT INTO customers (
                id, name, phone, phone2, address, wilaya_id, commune,
                loyalty_points, loyalty_tier, created_at, updated_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)
            "#,
        )
        .bind(&customer.id)
        .bind(&customer.name)
        .bind(&customer.phone)
        .bind(&customer.phone2)
        .bind(&customer.address)
        .bind(customer.wilaya_id)
        .bind(&customer.commune)
        .bind(customer.loyalty_points)
        .bind(&customer.loyalty_tier)
        .bind(customer.created_at)
        .bind(customer.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(customer)
    }

    /// Updates a customer's contact and address fields.
    pub async fn update_contact(
        &self,
        id: &str,
        name: &str,
        phone2: Option<&str>,
        address: Option<&str>,
        wilaya_id: Option<i64>,
        commune: Option<&str>,
    ) -> DbResult<()> {
        if let Some(wilaya_id) = wilaya_id {
            validate_wilaya_id(wilaya_id)?;
        }

        let now = Utc::now();

        let result = sqlx::query(
            r#"
            UPDATE customers SET
                name = ?2,
                phone2 = ?3,
                address = ?4,
                wilaya_id = ?5,
                commune = ?6,
                updated_at = ?7
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .bind(name)
        .bind(phone2)
        .bind(address)
        .bind(wilaya_id)
        .bind(commune)
        .bind(now)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Customer", id));
        }

        Ok(())
    }

    /// Lists customers ordered by creation time, newest first.
    pub async fn list(&self, limit: u32) -> DbResult<Vec<Customer>> {
        let customers = sqlx::query_as::<_, Customer>(
            r#"
            SELECT id, name, phone, phone2, address, wilaya_id, commune,
                   loyalty_points, loyalty_tier, created_at, updated_at
            FROM customers
            ORDER BY created_at DESC
            LIMIT ?1
            "#,
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(customers)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};

    fn sample(phone: &str) -> NewCustomer {
        NewCustomer {
            name: "Amine B.".to_string(),
            phone: phone.to_string(),
            phone2: None,
            address: Some("Cité 200 logements".to_string()),
            wilaya_id: Some(31),
            commune: Some("Bir El Djir".to_string()),
        }
    }

    #[tokio::test]
    async fn test_find_or_create_dedups_on_phone() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();

        let first = db.customers().find_or_create(&sample("0550123456")).await.unwrap();
        let second = db.customers().find_or_create(&sample("0550123456")).await.unwrap();

        assert_eq!(first.id, second.id);
        assert_eq!(db.customers().list(10).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_different_phones_create_rows() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();

        db.customers().find_or_create(&sample("0550123456")).await.unwrap();
        db.customers().find_or_create(&sample("0660123456")).await.unwrap();

        assert_eq!(db.customers().list(10).await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_rejects_invalid_phone() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();

        let err = db.customers().find_or_create(&sample("abc")).await.unwrap_err();
        assert!(matches!(err, DbError::Core(_)));
    }

    #[tokio::test]
    async fn test_update_contact() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let customer = db.customers().find_or_create(&sample("0550123456")).await.unwrap();

        db.customers()
            .update_contact(&customer.id, "Amine Benali", None, Some("Rue Didouche"), Some(16), None)
            .await
            .unwrap();

        let loaded = db.customers().get_by_id(&customer.id).await.unwrap().unwrap();
        assert_eq!(loaded.name, "Amine Benali");
        assert_eq!(loaded.wilaya_id, Some(16));
    }
}
