//! Subscription handlers

use std::time::Instant;

use aitopia_types::{SubscriptionSummary, SubscriptionView};
use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use serde::Deserialize;
use serde_json::Value;
use tracing::instrument;

use crate::error::ApiResult;
use crate::extractors::AuthUser;
use crate::handlers::shared::{record_op_duration, record_subscription_update, subscription_request};
use crate::state::AppState;

// ============================================================================
// Request/Response Types
// ============================================================================

/// Body of `PATCH /subscription`
///
/// Fields stay untyped so that shape errors are reported in validation order.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateSubscriptionRequest {
    #[serde(default)]
    pub plan: Option<Value>,
    #[serde(default)]
    pub selected_tools: Option<Value>,
}

// ============================================================================
// Handlers
// ============================================================================

/// PATCH /subscription
#[instrument(skip(state, user, body), fields(account_id = %user.account_id))]
pub async fn update_subscription(
    State(state): State<AppState>,
    user: AuthUser,
    body: Result<Json<UpdateSubscriptionRequest>, JsonRejection>,
) -> ApiResult<Json<SubscriptionView>> {
    let start = Instant::now();

    let Json(body) = body?;
    let request = subscription_request(body.plan, body.selected_tools);

    let result = state
        .billing
        .update_subscription(&user.account_id, request)
        .await;
    record_op_duration("update_subscription", start, result.is_ok());

    let outcome = result?;
    record_subscription_update(outcome.subscription.plan, outcome.invoice.is_some());

    Ok(Json(outcome.subscription.to_view()))
}

/// GET /subscription
#[instrument(skip(state, user), fields(account_id = %user.account_id))]
pub async fn get_subscription(
    State(state): State<AppState>,
    user: AuthUser,
) -> ApiResult<Json<SubscriptionSummary>> {
    let start = Instant::now();

    let result = state.billing.get_subscription(&user.account_id).await;
    record_op_duration("get_subscription", start, result.is_ok());

    Ok(Json(result?.to_summary()))
}
