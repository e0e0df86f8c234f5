//! Integration tests for the credit ledger repository.
//!
//! Exercises the repository against a real database to verify that:
//! - First sight of a user creates a default ledger exactly once
//! - The conditional debit never over-spends, even under concurrency
//! - Refill application resets balance and timestamp together

use assert_matches::assert_matches;
use chrono::{Duration, Utc};
use sqlx::PgPool;

use artifex_core::credits::DAILY_ALLOWANCE;
use artifex_db::repositories::CreditLedgerRepo;

#[sqlx::test(migrations = "./migrations")]
async fn get_or_create_seeds_default_allowance(pool: PgPool) {
    let ledger = CreditLedgerRepo::get_or_create(&pool, 1)
        .await
        .expect("get_or_create should succeed");

    assert_eq!(ledger.user_id, 1);
    assert_eq!(ledger.credits_remaining, DAILY_ALLOWANCE);
    // A freshly created ledger has a refill timestamp at creation time.
    assert!(Utc::now() - ledger.last_refill_at < Duration::minutes(1));
}

#[sqlx::test(migrations = "./migrations")]
async fn get_or_create_is_stable_across_calls(pool: PgPool) {
    let first = CreditLedgerRepo::get_or_create(&pool, 7).await.unwrap();
    CreditLedgerRepo::debit(&pool, 7, 5).await.unwrap();
    let second = CreditLedgerRepo::get_or_create(&pool, 7).await.unwrap();

    assert_eq!(first.id, second.id, "must not create a second row");
    assert_eq!(second.credits_remaining, DAILY_ALLOWANCE - 5);
}

#[sqlx::test(migrations = "./migrations")]
async fn debit_decrements_by_exactly_one(pool: PgPool) {
    CreditLedgerRepo::get_or_create(&pool, 2).await.unwrap();

    let after = CreditLedgerRepo::debit(&pool, 2, 1)
        .await
        .expect("debit query should succeed")
        .expect("debit should match a row");

    assert_eq!(after.credits_remaining, DAILY_ALLOWANCE - 1);
}

#[sqlx::test(migrations = "./migrations")]
async fn debit_fails_at_zero_balance(pool: PgPool) {
    CreditLedgerRepo::get_or_create(&pool, 3).await.unwrap();
    CreditLedgerRepo::apply_refill(&pool, 3, 0, Utc::now())
        .await
        .unwrap();

    let result = CreditLedgerRepo::debit(&pool, 3, 1).await.unwrap();
    assert_matches!(result, None, "debit at zero balance must not match");
}

/// Two racing debits against a balance of 1 must produce exactly one
/// success. The balance check and decrement are a single conditional
/// UPDATE, so the database serializes them.
#[sqlx::test(migrations = "./migrations")]
async fn concurrent_debits_never_over_spend(pool: PgPool) {
    CreditLedgerRepo::get_or_create(&pool, 4).await.unwrap();
    CreditLedgerRepo::apply_refill(&pool, 4, 1, Utc::now())
        .await
        .unwrap();

    let (a, b) = tokio::join!(
        CreditLedgerRepo::debit(&pool, 4, 1),
        CreditLedgerRepo::debit(&pool, 4, 1),
    );
    let a = a.unwrap();
    let b = b.unwrap();

    assert!(
        a.is_some() ^ b.is_some(),
        "exactly one of two racing debits must succeed, got {a:?} / {b:?}"
    );
    let survivor = a.or(b).unwrap();
    assert_eq!(survivor.credits_remaining, 0);
}

/// A refund undoes a prior debit, restoring the exact balance.
#[sqlx::test(migrations = "./migrations")]
async fn refund_restores_debited_credit(pool: PgPool) {
    CreditLedgerRepo::get_or_create(&pool, 6).await.unwrap();
    CreditLedgerRepo::debit(&pool, 6, 1).await.unwrap();

    let ledger = CreditLedgerRepo::refund(&pool, 6, 1).await.unwrap();

    assert_eq!(ledger.credits_remaining, DAILY_ALLOWANCE);
}

#[sqlx::test(migrations = "./migrations")]
async fn apply_refill_resets_balance_and_timestamp(pool: PgPool) {
    CreditLedgerRepo::get_or_create(&pool, 5).await.unwrap();
    // Drain most of the balance first.
    CreditLedgerRepo::debit(&pool, 5, 29).await.unwrap();

    let refill_at = Utc::now();
    let ledger = CreditLedgerRepo::apply_refill(&pool, 5, DAILY_ALLOWANCE, refill_at)
        .await
        .unwrap();

    assert_eq!(ledger.credits_remaining, DAILY_ALLOWANCE);
    // Postgres stores microseconds; allow for sub-millisecond truncation.
    assert!((ledger.last_refill_at - refill_at).num_milliseconds().abs() < 1);
}

#[sqlx::test(migrations = "./migrations")]
async fn find_by_user_returns_none_for_unknown_user(pool: PgPool) {
    let found = CreditLedgerRepo::find_by_user(&pool, 999).await.unwrap();
    assert!(found.is_none());
}
