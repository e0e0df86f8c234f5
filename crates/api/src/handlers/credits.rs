//! Handler for the `/credits` read model.

use axum::extract::State;
use axum::Json;

use artifex_db::models::credit_ledger::CreditBalance;

use crate::broker;
use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/credits
///
/// Current balance for the caller's header badge. Read-only: reports
/// the post-refill balance when a refill is due, but never writes; the
/// generation path is the only ledger mutator.
pub async fn get_credits(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<DataResponse<CreditBalance>>> {
    let (credits_remaining, last_refill_at) =
        broker::current_balance(&state, user.user_id).await?;
    Ok(Json(DataResponse {
        data: CreditBalance {
            credits_remaining,
            last_refill_at,
        },
    }))
}
