//! Repository for the `user_credits` table.
//!
//! All ledger mutations are single conditional statements so that two
//! requests racing on the same user cannot both pass a balance check
//! that only one of them should survive.

use sqlx::PgPool;

use artifex_core::types::{DbId, Timestamp};

use crate::models::credit_ledger::CreditLedger;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, user_id, credits_remaining, last_refill_at, created_at, updated_at";

/// Provides atomic operations on per-user credit ledgers.
pub struct CreditLedgerRepo;

impl CreditLedgerRepo {
    /// Fetch the ledger for a user, creating a default one (full daily
    /// allowance, `last_refill_at = now()`) if none exists.
    ///
    /// Uses `INSERT .. ON CONFLICT DO NOTHING` followed by a plain read,
    /// so two concurrent first requests from a new user converge on the
    /// same single row.
    pub async fn get_or_create(pool: &PgPool, user_id: DbId) -> Result<CreditLedger, sqlx::Error> {
        let inserted = sqlx::query(
            "INSERT INTO user_credits (user_id)
             VALUES ($1)
             ON CONFLICT (user_id) DO NOTHING",
        )
        .bind(user_id)
        .execute(pool)
        .await?;
        if inserted.rows_affected() > 0 {
            tracing::info!(user_id, "Seeded default credit ledger");
        }

        let query = format!("SELECT {COLUMNS} FROM user_credits WHERE user_id = $1");
        sqlx::query_as::<_, CreditLedger>(&query)
            .bind(user_id)
            .fetch_one(pool)
            .await
    }

    /// Reset a user's balance and refill timestamp, returning the updated row.
    ///
    /// Applied by the broker when the refill policy says a reset is due.
    pub async fn apply_refill(
        pool: &PgPool,
        user_id: DbId,
        balance: i32,
        refill_at: Timestamp,
    ) -> Result<CreditLedger, sqlx::Error> {
        let query = format!(
            "UPDATE user_credits
             SET credits_remaining = $2, last_refill_at = $3, updated_at = now()
             WHERE user_id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, CreditLedger>(&query)
            .bind(user_id)
            .bind(balance)
            .bind(refill_at)
            .fetch_one(pool)
            .await
    }

    /// Atomically debit credits from a user's balance.
    ///
    /// The decrement and the balance check are one conditional UPDATE:
    /// when the current balance is below `amount` no row matches and
    /// `None` is returned. Concurrent debits at balance 1 therefore
    /// yield exactly one `Some` and one `None`, never two successes.
    pub async fn debit(
        pool: &PgPool,
        user_id: DbId,
        amount: i32,
    ) -> Result<Option<CreditLedger>, sqlx::Error> {
        let query = format!(
            "UPDATE user_credits
             SET credits_remaining = credits_remaining - $2, updated_at = now()
             WHERE user_id = $1 AND credits_remaining >= $2
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, CreditLedger>(&query)
            .bind(user_id)
            .bind(amount)
            .fetch_optional(pool)
            .await
    }

    /// Return previously debited credits to a user's balance.
    ///
    /// Used to release a reservation when the upstream call fails after
    /// the debit already went through.
    pub async fn refund(
        pool: &PgPool,
        user_id: DbId,
        amount: i32,
    ) -> Result<CreditLedger, sqlx::Error> {
        let query = format!(
            "UPDATE user_credits
             SET credits_remaining = credits_remaining + $2, updated_at = now()
             WHERE user_id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, CreditLedger>(&query)
            .bind(user_id)
            .bind(amount)
            .fetch_one(pool)
            .await
    }

    /// Fetch a ledger without creating one. `None` for unknown users.
    pub async fn find_by_user(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Option<CreditLedger>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM user_credits WHERE user_id = $1");
        sqlx::query_as::<_, CreditLedger>(&query)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }
}
