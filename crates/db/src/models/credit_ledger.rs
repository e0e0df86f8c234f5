//! Credit ledger entity model.

use artifex_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// Full row from the `user_credits` table.
///
/// One row per user; created implicitly on a user's first generation
/// request with the default daily allowance. Never deleted by this
/// service (account lifecycle is an external concern).
#[derive(Debug, Clone, FromRow)]
pub struct CreditLedger {
    pub id: DbId,
    pub user_id: DbId,
    pub credits_remaining: i32,
    pub last_refill_at: Timestamp,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Balance projection for `GET /credits`.
#[derive(Debug, Clone, Serialize)]
pub struct CreditBalance {
    pub credits_remaining: i32,
    pub last_refill_at: Timestamp,
}
