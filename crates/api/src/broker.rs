//! The generation broker: the quota-gated path from prompt to artifact.
//!
//! Each call runs a fixed sequence of hard gates; the first failure
//! short-circuits the request:
//!
//! 1. validate the prompt
//! 2. load (or seed) the caller's credit ledger and apply the refill
//!    policy, persisting a reset before any balance check
//! 3. reserve one credit with a conditional debit; the debit is the
//!    quota gate, so two requests racing on the last credit cannot
//!    both pass
//! 4. call the external generator; on failure the reservation is
//!    returned to the ledger and the error surfaces
//! 5. on success, persist the artifact
//!
//! Once step 4 succeeds the caller always gets their image: a failed
//! artifact insert is logged and swallowed, trading strict bookkeeping
//! for availability.

use serde::{Deserialize, Serialize};

use artifex_core::credits::{self, evaluate_refill};
use artifex_core::error::CoreError;
use artifex_core::size::SizeClass;
use artifex_core::types::DbId;
use artifex_db::models::credit_ledger::CreditLedger;
use artifex_db::models::generated_image::NewGeneratedImage;
use artifex_db::repositories::{CreditLedgerRepo, GeneratedImageRepo};

use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// Quota message when the balance is empty and the next refill is still
/// in the future.
const MSG_NO_CREDITS_REFRESH: &str = "No credits remaining. Credits refresh every 24 hours.";
/// Quota message for the defensive case: a refill was just applied and
/// the balance is still empty.
const MSG_NO_CREDITS: &str = "No credits remaining";

/// Inbound generation request body. Field names are the external
/// contract, hence the camelCase rename.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateRequest {
    pub prompt: String,
    /// Aspect ratio as a wire string; unrecognized values map to square.
    #[serde(default)]
    pub aspect_ratio: Option<String>,
    /// Opaque quality label, stored with the artifact, never interpreted.
    #[serde(default)]
    pub quality: Option<String>,
}

/// Successful generation response. Field names are the external
/// contract, hence the camelCase rename.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateResponse {
    pub image_url: String,
    pub credits_remaining: i32,
}

/// Run the full generation flow for an authenticated user.
pub async fn generate(
    state: &AppState,
    user_id: DbId,
    request: GenerateRequest,
) -> AppResult<GenerateResponse> {
    let prompt = request.prompt.trim();
    if prompt.is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "prompt must not be empty".to_string(),
        )));
    }

    // Reconcile the ledger with the refill policy before any balance
    // check. The reset is persisted first so a crash between refill and
    // debit never loses the refill.
    reconcile_ledger(state, user_id).await?;

    // Reserve the credit before touching the upstream service. The
    // conditional UPDATE is the quota gate: it matches no row when the
    // balance is empty, including when a concurrent request just spent
    // the last credit.
    let Some(reserved) = CreditLedgerRepo::debit(&state.pool, user_id, 1).await? else {
        return Err(AppError::Core(CoreError::QuotaExhausted(
            MSG_NO_CREDITS_REFRESH.to_string(),
        )));
    };

    let size_class = SizeClass::parse(request.aspect_ratio.as_deref().unwrap_or("square"));
    let (width, height) = size_class.dimensions();

    tracing::info!(user_id, size = %size_class.as_str(), "Generating image");

    let artifact = match state.generator.generate(prompt, width, height).await {
        Ok(artifact) => artifact,
        Err(e) => {
            // Return the reservation so a failed upstream call never
            // spends quota. A failed restore is logged rather than
            // masking the upstream error.
            if let Err(restore) = CreditLedgerRepo::refund(&state.pool, user_id, 1).await {
                tracing::error!(user_id, error = %restore, "Failed to restore reserved credit");
            }
            return Err(e.into());
        }
    };

    // From here on the user gets their image regardless of bookkeeping
    // failures; the artifact insert is best-effort and logged on error.
    let image = NewGeneratedImage {
        user_id,
        prompt: prompt.to_string(),
        aspect_ratio: size_class.as_str().to_string(),
        quality: request.quality,
        image_url: artifact.image_url.clone(),
    };
    match GeneratedImageRepo::insert(&state.pool, &image).await {
        Ok(row) => {
            tracing::debug!(user_id, image_id = row.id, "Saved generated image");
        }
        Err(e) => {
            tracing::error!(user_id, error = %e, "Failed to save generated image");
        }
    }

    Ok(GenerateResponse {
        image_url: artifact.image_url,
        // The balance the debit returned, i.e. the pre-call balance
        // minus one.
        credits_remaining: reserved.credits_remaining,
    })
}

/// Load the user's ledger (seeding a default on first sight) and apply
/// the refill policy, so the subsequent debit sees a refreshed balance.
///
/// Fails with [`CoreError::QuotaExhausted`] in the defensive case where
/// a refill was just applied and the balance is still empty.
async fn reconcile_ledger(state: &AppState, user_id: DbId) -> AppResult<CreditLedger> {
    let ledger = CreditLedgerRepo::get_or_create(&state.pool, user_id).await?;

    let decision = evaluate_refill(ledger.last_refill_at, chrono::Utc::now());
    if !decision.should_refill {
        return Ok(ledger);
    }

    let refreshed = CreditLedgerRepo::apply_refill(
        &state.pool,
        user_id,
        decision.new_balance,
        decision.new_refill_at,
    )
    .await?;
    tracing::info!(
        user_id,
        balance = refreshed.credits_remaining,
        "Refilled credits"
    );

    if refreshed.credits_remaining <= 0 {
        // Cannot happen with a positive allowance; kept so a
        // misconfigured allowance degrades to a quota error instead of
        // a free generation.
        return Err(AppError::Core(CoreError::QuotaExhausted(
            MSG_NO_CREDITS.to_string(),
        )));
    }
    Ok(refreshed)
}

/// Read-only balance view for `GET /credits`.
///
/// Reports the post-refill balance when a refill is due without
/// persisting it; only the generation path mutates the ledger.
pub async fn current_balance(
    state: &AppState,
    user_id: DbId,
) -> AppResult<(i32, artifex_core::types::Timestamp)> {
    let ledger = CreditLedgerRepo::get_or_create(&state.pool, user_id).await?;
    let decision = evaluate_refill(ledger.last_refill_at, chrono::Utc::now());
    if decision.should_refill {
        Ok((credits::DAILY_ALLOWANCE, ledger.last_refill_at))
    } else {
        Ok((ledger.credits_remaining, ledger.last_refill_at))
    }
}
