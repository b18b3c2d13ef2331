//! # Stock Transition Rules
//!
//! The order-lifecycle / inventory state machine, expressed as pure
//! functions. The database layer applies these deltas inside a transaction;
//! this module owns the *what*, never the *how*.
//!
//! ## The Pipeline
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │              Book Stock Counters as a Pipeline                      │
//! │                                                                     │
//! │   quantity_left ────► delivering_stock ────► sold_stock             │
//! │   (available)         (with courier)         (delivered)            │
//! │        ▲                    │                                       │
//! │        └────── returned ◄───┘                                       │
//! │                                                                     │
//! │   create order:            quantity_left -= qty  (floor 0)          │
//! │   pending → delivering:    delivering    += qty                     │
//! │   delivering → delivered:  delivering    -= qty, sold += qty        │
//! │   pending → returned:      quantity_left += qty                     │
//! │   delivering → returned:   quantity_left += qty, delivering -= qty  │
//! │                                                                     │
//! │   Every decrement floors at zero: drift from manual catalog edits   │
//! │   must never push a counter negative.                               │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Strict Edges
//! Only the edges drawn above are accepted. A same-state request is an
//! explicit no-op (safe to retry); any other pair is rejected as
//! [`CoreError::InvalidTransition`].

use crate::error::{CoreError, CoreResult};
use crate::types::OrderStatus;

// =============================================================================
// Stock Delta
// =============================================================================

/// Per-unit stock adjustment for one book.
///
/// Each field is multiplied by the item quantity when applied. Negative
/// components are floored at zero by the applier (`MAX(x + d, 0)` in SQL).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StockDelta {
    pub available: i64,
    pub delivering: i64,
    pub sold: i64,
}

impl StockDelta {
    /// No stock movement.
    pub const NONE: StockDelta = StockDelta {
        available: 0,
        delivering: 0,
        sold: 0,
    };

    /// True when applying this delta changes nothing.
    #[inline]
    pub const fn is_none(&self) -> bool {
        self.available == 0 && self.delivering == 0 && self.sold == 0
    }
}

/// Outcome of validating a requested status change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// Target equals the current status: accept, touch nothing.
    ///
    /// This is what makes retries of terminal transitions idempotent -
    /// a second `delivered → delivered` call must not move stock again.
    NoOp,
    /// A legal edge with its per-unit stock effect.
    Apply(StockDelta),
}

// =============================================================================
// Transition Table
// =============================================================================

/// Per-unit stock delta applied when an order is created.
///
/// Creation takes copies out of the available pool immediately, floored at
/// zero. Overselling is a deliberate policy, not an error: availability wins
/// over strict enforcement, and a human reviews pending orders downstream.
pub const fn creation_delta() -> StockDelta {
    StockDelta {
        available: -1,
        delivering: 0,
        sold: 0,
    }
}

/// Validates a status change and returns its stock effect.
///
/// ## Errors
/// [`CoreError::InvalidTransition`] for any pair that is not an edge of the
/// lifecycle diagram (including anything out of a terminal state).
pub fn transition(from: OrderStatus, to: OrderStatus) -> CoreResult<Transition> {
    use OrderStatus::*;

    if from == to {
        return Ok(Transition::NoOp);
    }

    let delta = match (from, to) {
        (Pending, Delivering) => StockDelta {
            available: 0,
            delivering: 1,
            sold: 0,
        },
        (Delivering, Delivered) => StockDelta {
            available: 0,
            delivering: -1,
            sold: 1,
        },
        (Pending, Returned) => StockDelta {
            available: 1,
            delivering: 0,
            sold: 0,
        },
        (Delivering, Returned) => StockDelta {
            available: 1,
            delivering: -1,
            sold: 0,
        },
        _ => return Err(CoreError::InvalidTransition { from, to }),
    };

    Ok(Transition::Apply(delta))
}

/// True when `to` is reachable from `from` in one step (or equal).
pub fn is_reachable(from: OrderStatus, to: OrderStatus) -> bool {
    transition(from, to).is_ok()
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use OrderStatus::*;

    fn delta_of(from: OrderStatus, to: OrderStatus) -> StockDelta {
        match transition(from, to).unwrap() {
            Transition::Apply(d) => d,
            Transition::NoOp => panic!("expected Apply for {from:?} -> {to:?}"),
        }
    }

    #[test]
    fn test_creation_takes_from_available() {
        let d = creation_delta();
        assert_eq!(d.available, -1);
        assert_eq!(d.delivering, 0);
        assert_eq!(d.sold, 0);
    }

    #[test]
    fn test_pending_to_delivering_reserves() {
        let d = delta_of(Pending, Delivering);
        // quantity_left untouched - it was already decremented at creation.
        assert_eq!(d, StockDelta { available: 0, delivering: 1, sold: 0 });
    }

    #[test]
    fn test_delivering_to_delivered_sells() {
        let d = delta_of(Delivering, Delivered);
        assert_eq!(d, StockDelta { available: 0, delivering: -1, sold: 1 });
    }

    #[test]
    fn test_pending_return_restores_availability() {
        let d = delta_of(Pending, Returned);
        assert_eq!(d, StockDelta { available: 1, delivering: 0, sold: 0 });
    }

    #[test]
    fn test_delivering_return_restores_and_unreserves() {
        let d = delta_of(Delivering, Returned);
        assert_eq!(d, StockDelta { available: 1, delivering: -1, sold: 0 });
    }

    #[test]
    fn test_same_state_is_noop() {
        for s in [Pending, Delivering, Delivered, Returned] {
            assert_eq!(transition(s, s).unwrap(), Transition::NoOp);
        }
    }

    #[test]
    fn test_terminal_states_absorb() {
        for from in [Delivered, Returned] {
            for to in [Pending, Delivering, Delivered, Returned] {
                if from == to {
                    continue;
                }
                assert!(
                    matches!(
                        transition(from, to),
                        Err(CoreError::InvalidTransition { .. })
                    ),
                    "{from:?} -> {to:?} should be rejected"
                );
            }
        }
    }

    #[test]
    fn test_skipping_delivering_is_rejected() {
        assert!(transition(Pending, Delivered).is_err());
    }

    #[test]
    fn test_regression_is_rejected() {
        assert!(transition(Delivering, Pending).is_err());
    }

    /// Walk the happy path and check the counters sum consistently:
    /// whatever leaves one pool enters the next.
    #[test]
    fn test_pipeline_conservation() {
        let mut available: i64 = 10;
        let mut delivering: i64 = 0;
        let mut sold: i64 = 0;
        let qty = 3;

        let apply = |counter: &mut i64, per_unit: i64| {
            *counter = (*counter + per_unit * qty).max(0);
        };

        // create
        let d = creation_delta();
        apply(&mut available, d.available);
        assert_eq!((available, delivering, sold), (7, 0, 0));

        // pending -> delivering
        let d = delta_of(Pending, Delivering);
        apply(&mut available, d.available);
        apply(&mut delivering, d.delivering);
        apply(&mut sold, d.sold);
        assert_eq!((available, delivering, sold), (7, 3, 0));

        // delivering -> delivered
        let d = delta_of(Delivering, Delivered);
        apply(&mut available, d.available);
        apply(&mut delivering, d.delivering);
        apply(&mut sold, d.sold);
        assert_eq!((available, delivering, sold), (7, 0, 3));

        // 7 available + 3 sold == the 10 we started with
        assert_eq!(available + delivering + sold, 10);
    }

    /// Alternative path: return straight from pending restores the pool.
    #[test]
    fn test_pending_return_roundtrip() {
        let mut available: i64 = 10;
        let qty = 3;

        available = (available + creation_delta().available * qty).max(0);
        assert_eq!(available, 7);

        let d = delta_of(Pending, Returned);
        available = (available + d.available * qty).max(0);
        assert_eq!(available, 10);
        assert_eq!(d.delivering, 0);
        assert_eq!(d.sold, 0);
    }
}
