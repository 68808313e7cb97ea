//! Stock mutation tests
//!
//! Tests for the three write paths that touch the stock counter:
//! - delivery creation (decrement, clamped at zero)
//! - adjustment creation (overwrite to the counted value)
//! - receipt received (increment)

use proptest::prelude::*;

use shared::models::{adjustment_change, quantity_after_delivery};

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod unit_tests {
    use super::*;

    /// Delivering 5 of 50 leaves 45
    #[test]
    fn test_delivery_decrements() {
        assert_eq!(quantity_after_delivery(50, 5), 45);
    }

    /// Delivering more than on hand clamps at zero
    #[test]
    fn test_delivery_clamps_at_zero() {
        assert_eq!(quantity_after_delivery(3, 10), 0);
    }

    /// Delivering the exact stock empties it
    #[test]
    fn test_delivery_exact_stock() {
        assert_eq!(quantity_after_delivery(10, 10), 0);
    }

    /// Count below the counter records a negative change
    #[test]
    fn test_adjustment_shrinkage() {
        assert_eq!(adjustment_change(40, 50), -10);
    }

    /// Count above the counter records a positive change
    #[test]
    fn test_adjustment_surplus() {
        assert_eq!(adjustment_change(60, 50), 10);
    }

    /// Count matching the counter records no change
    #[test]
    fn test_adjustment_no_drift() {
        assert_eq!(adjustment_change(50, 50), 0);
    }

    /// Receiving a waiting receipt adds its quantity once
    #[test]
    fn test_receipt_received_adds_stock() {
        let on_hand = 15;
        let receipt_quantity = 10;
        assert_eq!(on_hand + receipt_quantity, 25);
    }
}

// ============================================================================
// Property-Based Tests
// ============================================================================

#[cfg(test)]
mod property_tests {
    use super::*;

    fn stock_strategy() -> impl Strategy<Value = i32> {
        0i32..100_000
    }

    fn quantity_strategy() -> impl Strategy<Value = i32> {
        1i32..100_000
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        /// Stock after a delivery equals max(0, on_hand - delivered)
        #[test]
        fn prop_delivery_formula(on_hand in stock_strategy(), delivered in quantity_strategy()) {
            let after = quantity_after_delivery(on_hand, delivered);
            prop_assert_eq!(after, (on_hand - delivered).max(0));
        }

        /// Stock never goes negative
        #[test]
        fn prop_delivery_non_negative(on_hand in stock_strategy(), delivered in quantity_strategy()) {
            prop_assert!(quantity_after_delivery(on_hand, delivered) >= 0);
        }

        /// A delivery never increases stock
        #[test]
        fn prop_delivery_never_increases(on_hand in stock_strategy(), delivered in quantity_strategy()) {
            prop_assert!(quantity_after_delivery(on_hand, delivered) <= on_hand);
        }

        /// Applying the recorded change to the old counter reproduces the count
        #[test]
        fn prop_adjustment_reconciles(counted in stock_strategy(), on_hand in stock_strategy()) {
            let change = adjustment_change(counted, on_hand);
            prop_assert_eq!(on_hand + change, counted);
        }

        /// Adjustment change sign matches the direction of the correction
        #[test]
        fn prop_adjustment_sign(counted in stock_strategy(), on_hand in stock_strategy()) {
            let change = adjustment_change(counted, on_hand);
            if counted > on_hand {
                prop_assert!(change > 0);
            } else if counted < on_hand {
                prop_assert!(change < 0);
            } else {
                prop_assert_eq!(change, 0);
            }
        }

        /// A sequence of deliveries drains stock monotonically to zero
        #[test]
        fn prop_deliveries_drain_monotonically(
            start in stock_strategy(),
            deliveries in prop::collection::vec(quantity_strategy(), 1..20)
        ) {
            let mut on_hand = start;
            for delivered in deliveries {
                let after = quantity_after_delivery(on_hand, delivered);
                prop_assert!(after <= on_hand);
                prop_assert!(after >= 0);
                on_hand = after;
            }
        }
    }
}
