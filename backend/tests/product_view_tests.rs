//! Product listing view tests
//!
//! Tests for the derived fields of the product listing:
//! - stock status (Low at or below the limit, OK above)
//! - current location (destination of the latest transfer, with fallback)

use chrono::{TimeZone, Utc};
use proptest::prelude::*;

use shared::models::{resolve_location, StockStatus, DEFAULT_LOCATION};

/// Latest destination from (date, to_location) pairs, the way the listing
/// query resolves it: most recent transfer by date wins.
fn latest_destination(transfers: &[(chrono::DateTime<Utc>, &str)]) -> Option<String> {
    transfers
        .iter()
        .max_by_key(|(date, _)| *date)
        .map(|(_, dest)| dest.to_string())
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod unit_tests {
    use super::*;

    /// Below the limit is Low
    #[test]
    fn test_status_low() {
        assert_eq!(StockStatus::derive(5, 10), StockStatus::Low);
    }

    /// Above the limit is OK
    #[test]
    fn test_status_ok() {
        assert_eq!(StockStatus::derive(15, 5), StockStatus::Ok);
    }

    /// Exactly at the limit is Low
    #[test]
    fn test_status_boundary() {
        assert_eq!(StockStatus::derive(10, 10), StockStatus::Low);
    }

    #[test]
    fn test_status_labels() {
        assert_eq!(StockStatus::Low.as_str(), "Low");
        assert_eq!(StockStatus::Ok.as_str(), "OK");
    }

    /// No transfers means the fallback warehouse
    #[test]
    fn test_location_fallback() {
        assert_eq!(resolve_location(None), DEFAULT_LOCATION);
        assert_eq!(resolve_location(None), "Warehouse A");
    }

    /// The latest transfer's destination wins
    #[test]
    fn test_location_latest_transfer() {
        let transfers = vec![
            (Utc.with_ymd_and_hms(2024, 1, 10, 0, 0, 0).unwrap(), "Store A"),
            (Utc.with_ymd_and_hms(2024, 3, 2, 0, 0, 0).unwrap(), "Store B"),
            (Utc.with_ymd_and_hms(2024, 2, 15, 0, 0, 0).unwrap(), "Store C"),
        ];
        let location = resolve_location(latest_destination(&transfers));
        assert_eq!(location, "Store B");
    }

    #[test]
    fn test_location_single_transfer() {
        let transfers = vec![(
            Utc.with_ymd_and_hms(2024, 5, 1, 0, 0, 0).unwrap(),
            "Store B",
        )];
        assert_eq!(resolve_location(latest_destination(&transfers)), "Store B");
    }
}

// ============================================================================
// Property-Based Tests
// ============================================================================

#[cfg(test)]
mod property_tests {
    use super::*;

    fn stock_strategy() -> impl Strategy<Value = i32> {
        0i32..10_000
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        /// Low exactly when quantity <= limit
        #[test]
        fn prop_status_threshold(quantity in stock_strategy(), limit in stock_strategy()) {
            let status = StockStatus::derive(quantity, limit);
            if quantity <= limit {
                prop_assert_eq!(status, StockStatus::Low);
            } else {
                prop_assert_eq!(status, StockStatus::Ok);
            }
        }

        /// The fallback appears exactly when there are no transfers
        #[test]
        fn prop_location_fallback_iff_empty(
            dates in prop::collection::vec(0i64..1_000_000, 0..10)
        ) {
            let transfers: Vec<_> = dates
                .iter()
                .map(|&offset| (Utc.timestamp_opt(offset, 0).unwrap(), "Store X"))
                .collect();
            let location = resolve_location(latest_destination(&transfers));
            if transfers.is_empty() {
                prop_assert_eq!(location, DEFAULT_LOCATION);
            } else {
                prop_assert_eq!(location, "Store X");
            }
        }

        /// The selected destination always belongs to a maximal-date transfer
        #[test]
        fn prop_latest_selection_is_maximal(
            entries in prop::collection::vec((0i64..1_000_000, 0usize..5), 1..10)
        ) {
            let names = ["Store A", "Store B", "Store C", "Store D", "Store E"];
            let transfers: Vec<_> = entries
                .iter()
                .map(|&(offset, idx)| (Utc.timestamp_opt(offset, 0).unwrap(), names[idx]))
                .collect();

            let max_date = transfers.iter().map(|(d, _)| *d).max().unwrap();
            let selected = latest_destination(&transfers).unwrap();
            prop_assert!(transfers
                .iter()
                .any(|&(d, dest)| d == max_date && dest == selected));
        }
    }
}
