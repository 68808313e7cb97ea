//! Status state machine tests
//!
//! Every operational record carries a status with an explicit transition set;
//! records are created in an initial state and can only advance along the
//! machine. Illegal moves are rejected.

use std::str::FromStr;

use proptest::prelude::*;

use shared::models::{AdjustmentStatus, DeliveryStatus, ReceiptStatus, TransferStatus};

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod unit_tests {
    use super::*;

    #[test]
    fn test_receipt_transitions() {
        assert!(ReceiptStatus::Waiting.can_transition_to(ReceiptStatus::Received));
        assert!(ReceiptStatus::Waiting.can_transition_to(ReceiptStatus::Cancelled));
        assert!(!ReceiptStatus::Received.can_transition_to(ReceiptStatus::Waiting));
        assert!(!ReceiptStatus::Cancelled.can_transition_to(ReceiptStatus::Received));
    }

    #[test]
    fn test_delivery_transitions() {
        assert!(DeliveryStatus::Draft.can_transition_to(DeliveryStatus::InTransit));
        assert!(DeliveryStatus::InTransit.can_transition_to(DeliveryStatus::Delivered));
        assert!(DeliveryStatus::Draft.can_transition_to(DeliveryStatus::Cancelled));
        assert!(DeliveryStatus::InTransit.can_transition_to(DeliveryStatus::Cancelled));
        // No skipping or moving backward
        assert!(!DeliveryStatus::Draft.can_transition_to(DeliveryStatus::Delivered));
        assert!(!DeliveryStatus::Delivered.can_transition_to(DeliveryStatus::Draft));
        assert!(!DeliveryStatus::Cancelled.can_transition_to(DeliveryStatus::InTransit));
    }

    #[test]
    fn test_transfer_transitions() {
        assert!(TransferStatus::Waiting.can_transition_to(TransferStatus::InTransit));
        assert!(TransferStatus::InTransit.can_transition_to(TransferStatus::Completed));
        assert!(TransferStatus::Waiting.can_transition_to(TransferStatus::Cancelled));
        assert!(!TransferStatus::Waiting.can_transition_to(TransferStatus::Completed));
        assert!(!TransferStatus::Completed.can_transition_to(TransferStatus::Waiting));
    }

    #[test]
    fn test_transition_to_reports_states() {
        let err = DeliveryStatus::Draft
            .transition_to(DeliveryStatus::Delivered)
            .unwrap_err();
        assert_eq!(err.from, "draft");
        assert_eq!(err.to, "delivered");

        let ok = DeliveryStatus::Draft.transition_to(DeliveryStatus::InTransit);
        assert_eq!(ok, Ok(DeliveryStatus::InTransit));
    }

    #[test]
    fn test_adjustment_is_terminal() {
        assert!(AdjustmentStatus::Completed.is_terminal());
    }

    #[test]
    fn test_status_string_roundtrip() {
        for status in [
            ReceiptStatus::Waiting,
            ReceiptStatus::Received,
            ReceiptStatus::Cancelled,
        ] {
            assert_eq!(ReceiptStatus::from_str(status.as_str()), Ok(status));
        }
        for status in [
            DeliveryStatus::Draft,
            DeliveryStatus::InTransit,
            DeliveryStatus::Delivered,
            DeliveryStatus::Cancelled,
        ] {
            assert_eq!(DeliveryStatus::from_str(status.as_str()), Ok(status));
        }
        for status in [
            TransferStatus::Waiting,
            TransferStatus::InTransit,
            TransferStatus::Completed,
            TransferStatus::Cancelled,
        ] {
            assert_eq!(TransferStatus::from_str(status.as_str()), Ok(status));
        }
    }

    #[test]
    fn test_unknown_status_rejected() {
        assert!(ReceiptStatus::from_str("Received").is_err()); // case-sensitive
        assert!(DeliveryStatus::from_str("shipped").is_err());
        assert!(TransferStatus::from_str("").is_err());
    }
}

// ============================================================================
// Property-Based Tests
// ============================================================================

#[cfg(test)]
mod property_tests {
    use super::*;

    fn delivery_status_strategy() -> impl Strategy<Value = DeliveryStatus> {
        prop_oneof![
            Just(DeliveryStatus::Draft),
            Just(DeliveryStatus::InTransit),
            Just(DeliveryStatus::Delivered),
            Just(DeliveryStatus::Cancelled),
        ]
    }

    fn transfer_status_strategy() -> impl Strategy<Value = TransferStatus> {
        prop_oneof![
            Just(TransferStatus::Waiting),
            Just(TransferStatus::InTransit),
            Just(TransferStatus::Completed),
            Just(TransferStatus::Cancelled),
        ]
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        /// transition_to succeeds exactly when can_transition_to allows it
        #[test]
        fn prop_transition_agrees_with_predicate(
            from in delivery_status_strategy(),
            to in delivery_status_strategy()
        ) {
            let allowed = from.can_transition_to(to);
            prop_assert_eq!(from.transition_to(to).is_ok(), allowed);
        }

        /// Terminal states admit no outgoing transition
        #[test]
        fn prop_terminal_states_are_final(
            from in delivery_status_strategy(),
            to in delivery_status_strategy()
        ) {
            if from.is_terminal() {
                prop_assert!(!from.can_transition_to(to));
            }
        }

        /// No state transitions to itself
        #[test]
        fn prop_no_self_transitions(status in transfer_status_strategy()) {
            prop_assert!(!status.can_transition_to(status));
        }

        /// Transfers can always be resolved from a non-terminal state
        #[test]
        fn prop_non_terminal_has_exit(status in transfer_status_strategy()) {
            if !status.is_terminal() {
                let exits = [
                    TransferStatus::Waiting,
                    TransferStatus::InTransit,
                    TransferStatus::Completed,
                    TransferStatus::Cancelled,
                ];
                prop_assert!(exits.iter().any(|&next| status.can_transition_to(next)));
            }
        }
    }
}
