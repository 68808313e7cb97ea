//! Sequence-backed reference code allocation
//!
//! Every operational record is stamped with a code like `REC-2024-003`. The
//! sequence lives in a `reference_sequences` row per (owner, kind, year) and
//! is advanced with a single upsert, so concurrent creations cannot hand out
//! the same number. A counter that does not exist yet seeds itself from the
//! newest existing record of that kind, which keeps legacy parse-and-increment
//! behavior: after `REC-2024-003`, the next code is `REC-2024-004`.

use chrono::{DateTime, Datelike, Utc};
use sqlx::PgConnection;
use uuid::Uuid;

use crate::error::AppResult;
use crate::models::OperationKind;
use shared::reference::{format_reference, trailing_sequence};

/// Allocate the next reference code for `kind`, scoped to the owner and the
/// year of `date`.
///
/// Takes a connection rather than a pool so allocation joins the caller's
/// transaction.
pub async fn allocate_reference(
    conn: &mut PgConnection,
    owner_id: Uuid,
    kind: OperationKind,
    date: DateTime<Utc>,
) -> AppResult<String> {
    let year = date.year();
    seed_from_latest(conn, owner_id, kind, year).await?;

    let sequence = sqlx::query_scalar::<_, i64>(
        r#"
        INSERT INTO reference_sequences (owner_id, kind, year, last_number)
        VALUES ($1, $2, $3, 1)
        ON CONFLICT (owner_id, kind, year)
        DO UPDATE SET last_number = reference_sequences.last_number + 1
        RETURNING last_number
        "#,
    )
    .bind(owner_id)
    .bind(kind.as_str())
    .bind(year)
    .fetch_one(&mut *conn)
    .await?;

    Ok(format_reference(kind, year, sequence))
}

/// Seed a missing counter from the trailing digits of the owner's newest
/// reference of this kind. Malformed or missing digits seed zero, so the next
/// allocated code ends in `-001`.
async fn seed_from_latest(
    conn: &mut PgConnection,
    owner_id: Uuid,
    kind: OperationKind,
    year: i32,
) -> AppResult<()> {
    let exists = sqlx::query_scalar::<_, bool>(
        "SELECT EXISTS(SELECT 1 FROM reference_sequences WHERE owner_id = $1 AND kind = $2 AND year = $3)",
    )
    .bind(owner_id)
    .bind(kind.as_str())
    .bind(year)
    .fetch_one(&mut *conn)
    .await?;

    if exists {
        return Ok(());
    }

    let query = format!(
        "SELECT reference FROM {} WHERE owner_id = $1 ORDER BY created_at DESC LIMIT 1",
        table_for(kind)
    );
    let latest = sqlx::query_scalar::<_, String>(&query)
        .bind(owner_id)
        .fetch_optional(&mut *conn)
        .await?;

    let seed = latest.as_deref().and_then(trailing_sequence).unwrap_or(0);
    if seed > 0 {
        // A concurrent first allocation may have created the row already;
        // losing that race just means the counter was seeded by the winner.
        sqlx::query(
            r#"
            INSERT INTO reference_sequences (owner_id, kind, year, last_number)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (owner_id, kind, year) DO NOTHING
            "#,
        )
        .bind(owner_id)
        .bind(kind.as_str())
        .bind(year)
        .bind(seed)
        .execute(&mut *conn)
        .await?;
    }

    Ok(())
}

fn table_for(kind: OperationKind) -> &'static str {
    match kind {
        OperationKind::Receipt => "receipts",
        OperationKind::Delivery => "deliveries",
        OperationKind::Transfer => "transfers",
        OperationKind::Adjustment => "adjustments",
    }
}
