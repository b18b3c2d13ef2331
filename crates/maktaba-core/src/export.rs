//! # Delivery Slip Export
//!
//! Pure mapping of an order into the courier's 18-column delivery-slip row.
//! Writing the actual spreadsheet (and reading import files) is the job of
//! the excluded file-handling layer; this module only shapes the data.
//!
//! Column layout follows the courier template: reference, recipient,
//! phones, wilaya code/name, commune, address, product summary, weight,
//! amount, remark, then the handling flags and an optional map link.

use serde::{Deserialize, Serialize};

use crate::types::{Customer, Order, OrderItem};
use crate::wilaya;

/// Assumed weight of one book in grams.
///
/// The courier bills by weight; the store ships books only, so a flat
/// half-kilo per copy is close enough.
pub const BOOK_WEIGHT_GRAMS: i64 = 500;

/// One row of the courier export.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeliverySlipRow {
    pub reference: String,
    pub recipient_name: String,
    pub phone: String,
    pub phone2: String,
    pub wilaya_code: String,
    pub wilaya_name: String,
    pub commune: String,
    pub address: String,
    /// "Title (x2), Other Title (x1)"
    pub products: String,
    /// Parcel weight in kilograms.
    pub weight_kg: f64,
    /// Amount to collect, in whole dinars.
    pub amount: i64,
    pub remark: String,
    pub fragile: bool,
    pub exchange: bool,
    pub pickup: bool,
    pub cash_on_delivery: bool,
    pub stop_desk: bool,
    pub map_link: String,
}

/// Builds the export row for one order.
///
/// Missing customer fields become empty strings, never placeholders - the
/// courier template treats blank and absent the same way.
pub fn delivery_slip_row(order: &Order, customer: &Customer, items: &[OrderItem]) -> DeliverySlipRow {
    let products = items
        .iter()
        .map(|i| format!("{} (x{})", i.title_snapshot, i.quantity))
        .collect::<Vec<_>>()
        .join(", ");

    let total_copies: i64 = items.iter().map(|i| i.quantity).sum();
    let weight_kg = (total_copies * BOOK_WEIGHT_GRAMS) as f64 / 1000.0;

    let (wilaya_code, wilaya_name) = match customer.wilaya_id {
        Some(id) => (
            id.to_string(),
            wilaya::wilaya_name(id).unwrap_or_default().to_string(),
        ),
        None => (String::new(), String::new()),
    };

    DeliverySlipRow {
        reference: order.reference.clone(),
        recipient_name: customer.name.clone(),
        phone: customer.phone.clone(),
        phone2: customer.phone2.clone().unwrap_or_default(),
        wilaya_code,
        wilaya_name,
        commune: customer.commune.clone().unwrap_or_default(),
        address: customer.address.clone().unwrap_or_default(),
        products,
        weight_kg,
        // The courier collects the final amount (after discounts + delivery).
        amount: order.final_amount().dinars(),
        remark: order.notes.clone().unwrap_or_default(),
        fragile: order.fragile,
        exchange: order.exchange,
        pickup: order.pickup,
        cash_on_delivery: order.cash_on_delivery,
        stop_desk: order.stop_desk,
        map_link: String::new(),
    }
}
