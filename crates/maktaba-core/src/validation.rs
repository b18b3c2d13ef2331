//! # Validation Module
//!
//! Input validation for order and catalog payloads.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                              │
//! │                                                                     │
//! │  Layer 1: Caller (HTTP layer, out of scope)                         │
//! │  └── Deserialization into typed DTOs                                │
//! │           │                                                         │
//! │           ▼                                                         │
//! │  Layer 2: THIS MODULE - field and business rule validation,         │
//! │           always before any mutation                                │
//! │           │                                                         │
//! │           ▼                                                         │
//! │  Layer 3: Database (SQLite)                                         │
//! │  ├── NOT NULL / UNIQUE / FK constraints                             │
//! │  └── CHECK constraints keeping stock counters non-negative          │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```

use crate::error::ValidationError;
use crate::types::{NewOrder, NewOrderItem};
use crate::{MAX_ITEM_QUANTITY, MAX_ORDER_ITEMS};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// String Validators
// =============================================================================

/// Validates a book title.
///
/// ## Rules
/// - Must not be empty
/// - At most 300 characters
pub fn validate_title(title: &str) -> ValidationResult<()> {
    let title = title.trim();

    if title.is_empty() {
        return Err(ValidationError::Required {
            field: "title".to_string(),
        });
    }

    if title.len() > 300 {
        return Err(ValidationError::TooLong {
            field: "title".to_string(),
            max: 300,
        });
    }

    Ok(())
}

/// Validates a customer phone number.
///
/// ## Rules
/// - Must not be empty (it is the dedup key)
/// - 5 to 20 characters, digits with optional leading `+` and separators
pub fn validate_phone(phone: &str) -> ValidationResult<()> {
    let phone = phone.trim();

    if phone.is_empty() {
        return Err(ValidationError::Required {
            field: "phone".to_string(),
        });
    }

    if phone.len() < 5 || phone.len() > 20 {
        return Err(ValidationError::OutOfRange {
            field: "phone".to_string(),
            min: 5,
            max: 20,
        });
    }

    if !phone
        .chars()
        .enumerate()
        .all(|(i, c)| c.is_ascii_digit() || c == ' ' || c == '-' || (c == '+' && i == 0))
    {
        return Err(ValidationError::InvalidFormat {
            field: "phone".to_string(),
            reason: "must contain only digits, spaces, hyphens, and a leading +".to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates an item quantity.
///
/// ## Rules
/// - Must be positive (> 0)
/// - Must not exceed MAX_ITEM_QUANTITY
pub fn validate_quantity(qty: i64) -> ValidationResult<()> {
    if qty <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }

    if qty > MAX_ITEM_QUANTITY {
        return Err(ValidationError::OutOfRange {
            field: "quantity".to_string(),
            min: 1,
            max: MAX_ITEM_QUANTITY,
        });
    }

    Ok(())
}

/// Validates a price/amount in centimes. Zero is allowed (free items,
/// free delivery); negatives are not.
pub fn validate_amount_cents(cents: i64) -> ValidationResult<()> {
    if cents < 0 {
        return Err(ValidationError::OutOfRange {
            field: "amount".to_string(),
            min: 0,
            max: i64::MAX,
        });
    }

    Ok(())
}

/// Validates a percentage discount in basis points (0% to 100%).
pub fn validate_discount_bps(bps: i64) -> ValidationResult<()> {
    if !(0..=10_000).contains(&bps) {
        return Err(ValidationError::OutOfRange {
            field: "discount_bps".to_string(),
            min: 0,
            max: 10_000,
        });
    }

    Ok(())
}

/// Validates a wilaya code (1..=58).
pub fn validate_wilaya_id(id: i64) -> ValidationResult<()> {
    if !(1..=crate::wilaya::WILAYA_COUNT as i64).contains(&id) {
        return Err(ValidationError::OutOfRange {
            field: "wilaya_id".to_string(),
            min: 1,
            max: crate::wilaya::WILAYA_COUNT as i64,
        });
    }

    Ok(())
}

// =============================================================================
// UUID Validators
// =============================================================================

/// Validates a UUID string format.
pub fn validate_uuid(field: &str, id: &str) -> ValidationResult<()> {
    if id.trim().is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    uuid::Uuid::parse_str(id).map_err(|_| ValidationError::InvalidFormat {
        field: field.to_string(),
        reason: "must be a valid UUID".to_string(),
    })?;

    Ok(())
}

// =============================================================================
// Order Payload Validation
// =============================================================================

/// Validates a full order payload (header + items) before any mutation.
///
/// The item list must be non-empty with positive quantities and known-shaped
/// book ids; bad input is rejected here so the ledger never starts a
/// transaction it would have to abort for malformed data.
pub fn validate_new_order(header: &NewOrder, items: &[NewOrderItem]) -> ValidationResult<()> {
    validate_uuid("customer_id", &header.customer_id)?;
    validate_amount_cents(header.delivery_cents)?;
    validate_amount_cents(header.discount_cents)?;
    validate_discount_bps(header.discount_bps)?;

    if items.is_empty() {
        return Err(ValidationError::Required {
            field: "items".to_string(),
        });
    }

    if items.len() > MAX_ORDER_ITEMS {
        return Err(ValidationError::OutOfRange {
            field: "items".to_string(),
            min: 1,
            max: MAX_ORDER_ITEMS as i64,
        });
    }

    for item in items {
        validate_uuid("book_id", &item.book_id)?;
        validate_quantity(item.quantity)?;
        validate_amount_cents(item.unit_price_cents)?;
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn header() -> NewOrder {
        NewOrder {
            customer_id: uuid::Uuid::new_v4().to_string(),
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

    fn item(qty: i64) -> NewOrderItem {
        NewOrderItem {
            book_id: uuid::Uuid::new_v4().to_string(),
            quantity: qty,
            unit_price_cents: 95_000,
        }
    }

    #[test]
    fn test_validate_title() {
        assert!(validate_title("L'Étranger").is_ok());
        assert!(validate_title("").is_err());
        assert!(validate_title("   ").is_err());
        assert!(validate_title(&"A".repeat(400)).is_err());
    }

    #[test]
    fn test_validate_phone() {
        assert!(validate_phone("0550123456").is_ok());
        assert!(validate_phone("+213 550 12 34 56").is_ok());
        assert!(validate_phone("").is_err());
        assert!(validate_phone("abc").is_err());
        assert!(validate_phone("055+0123").is_err());
    }

    #[test]
    fn test_validate_quantity() {
        assert!(validate_quantity(1).is_ok());
        assert!(validate_quantity(999).is_ok());
        assert!(validate_quantity(0).is_err());
        assert!(validate_quantity(-1).is_err());
        assert!(validate_quantity(1000).is_err());
    }

    #[test]
    fn test_validate_wilaya_id() {
        assert!(validate_wilaya_id(1).is_ok());
        assert!(validate_wilaya_id(58).is_ok());
        assert!(validate_wilaya_id(0).is_err());
        assert!(validate_wilaya_id(59).is_err());
    }

    #[test]
    fn test_validate_new_order_ok() {
        assert!(validate_new_order(&header(), &[item(2)]).is_ok());
    }

    #[test]
    fn test_validate_new_order_rejects_empty_items() {
        let err = validate_new_order(&header(), &[]).unwrap_err();
        assert!(matches!(err, ValidationError::Required { .. }));
    }

    #[test]
    fn test_validate_new_order_rejects_bad_quantity() {
        assert!(validate_new_order(&header(), &[item(0)]).is_err());
        assert!(validate_new_order(&header(), &[item(1), item(-2)]).is_err());
    }

    #[test]
    fn test_validate_new_order_rejects_bad_discount() {
        let mut h = header();
        h.discount_bps = 20_000;
        assert!(validate_new_order(&h, &[item(1)]).is_err());
    }
}
