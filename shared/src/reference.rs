//! Reference-code helpers
//!
//! Operational records are stamped with a human-readable code of the form
//! `<PREFIX>-<YEAR>-<NNN>` (e.g. `REC-2024-003`). The backend allocates the
//! sequence number from an atomic per-owner counter; these helpers cover the
//! pure parts: formatting and recovering the trailing sequence from an
//! existing code.

use crate::models::OperationKind;

/// Format a reference code. The sequence is zero-padded to three digits and
/// grows past `999` without truncation.
pub fn format_reference(kind: OperationKind, year: i32, sequence: i64) -> String {
    format!("{}-{}-{:03}", kind.reference_prefix(), year, sequence)
}

/// Trailing digit run of a reference code (`"REC-2024-003"` -> `3`).
///
/// Returns `None` for a code with no trailing digits; callers treat that as
/// sequence zero, so the next allocated code ends in `-001`.
pub fn trailing_sequence(reference: &str) -> Option<i64> {
    let digits = reference
        .chars()
        .rev()
        .take_while(|c| c.is_ascii_digit())
        .collect::<Vec<_>>();
    if digits.is_empty() {
        return None;
    }
    digits.into_iter().rev().collect::<String>().parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_with_three_digit_padding() {
        assert_eq!(
            format_reference(OperationKind::Receipt, 2024, 1),
            "REC-2024-001"
        );
        assert_eq!(
            format_reference(OperationKind::Adjustment, 2025, 42),
            "ADJ-2025-042"
        );
    }

    #[test]
    fn formats_beyond_three_digits() {
        assert_eq!(
            format_reference(OperationKind::Delivery, 2024, 1000),
            "DEL-2024-1000"
        );
    }

    #[test]
    fn parses_trailing_digits() {
        assert_eq!(trailing_sequence("REC-2024-003"), Some(3));
        assert_eq!(trailing_sequence("TRF-2024-120"), Some(120));
    }

    #[test]
    fn malformed_references_yield_none() {
        assert_eq!(trailing_sequence("REC-2024-"), None);
        assert_eq!(trailing_sequence("no digits here"), None);
        assert_eq!(trailing_sequence(""), None);
    }

    #[test]
    fn parse_then_increment_produces_next_code() {
        let next = trailing_sequence("REC-2024-003").unwrap_or(0) + 1;
        assert_eq!(
            format_reference(OperationKind::Receipt, 2024, next),
            "REC-2024-004"
        );
    }

    #[test]
    fn prefixes_match_record_kinds() {
        assert_eq!(OperationKind::Receipt.reference_prefix(), "REC");
        assert_eq!(OperationKind::Delivery.reference_prefix(), "DEL");
        assert_eq!(OperationKind::Transfer.reference_prefix(), "TRF");
        assert_eq!(OperationKind::Adjustment.reference_prefix(), "ADJ");
    }
}
