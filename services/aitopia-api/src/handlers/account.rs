//! Account lifecycle handlers

use std::time::Instant;

use aitopia_billing_core::BillingError;
use aitopia_types::Account;
use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use tracing::instrument;

use crate::error::{ApiError, ApiResult};
use crate::extractors::AuthUser;
use crate::handlers::shared::record_op_duration;
use crate::state::AppState;

// ============================================================================
// Request/Response Types
// ============================================================================

/// Body of `POST /account`; fields default to the token claims
#[derive(Debug, Default, Deserialize)]
pub struct ProvisionAccountRequest {
    pub email: Option<String>,
    pub name: Option<String>,
}

/// Body of `PATCH /account`
#[derive(Debug, Default, Deserialize)]
pub struct UpdateAccountRequest {
    pub email: Option<String>,
    pub name: Option<String>,
}

fn body_error(rejection: JsonRejection) -> ApiError {
    tracing::debug!(error = %rejection, "Rejected account body");
    ApiError::BadRequest("Request body must be a JSON object".to_string())
}

// ============================================================================
// Handlers
// ============================================================================

/// POST /account
#[instrument(skip(state, user, body), fields(account_id = %user.account_id))]
pub async fn provision_account(
    State(state): State<AppState>,
    user: AuthUser,
    body: Result<Json<ProvisionAccountRequest>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<Account>)> {
    let start = Instant::now();

    // An empty POST falls back to the token claims
    let body = match body {
        Ok(Json(body)) => body,
        Err(JsonRejection::MissingJsonContentType(_)) => ProvisionAccountRequest::default(),
        Err(rejection) => return Err(body_error(rejection)),
    };
    let email = body.email.unwrap_or(user.email);
    let name = body.name.or(user.name).ok_or_else(|| {
        BillingError::InvalidInput("Name must not be empty".to_string())
    })?;

    let result = state
        .billing
        .provision_account(&user.account_id, &email, &name)
        .await;
    record_op_duration("provision_account", start, result.is_ok());

    let (account, created) = result?;
    let status = if created {
        StatusCode::CREATED
    } else {
        StatusCode::OK
    };

    Ok((status, Json(account)))
}

/// GET /account
#[instrument(skip(state, user), fields(account_id = %user.account_id))]
pub async fn get_account(State(state): State<AppState>, user: AuthUser) -> ApiResult<Json<Account>> {
    let start = Instant::now();

    let result = state.billing.get_account(&user.account_id).await;
    record_op_duration("get_account", start, result.is_ok());

    Ok(Json(result?))
}

/// PATCH /account
#[instrument(skip(state, user, body), fields(account_id = %user.account_id))]
pub async fn update_account(
    State(state): State<AppState>,
    user: AuthUser,
    body: Result<Json<UpdateAccountRequest>, JsonRejection>,
) -> ApiResult<Json<Account>> {
    let start = Instant::now();

    let Json(body) = body.map_err(body_error)?;

    let result = state
        .billing
        .update_profile(&user.account_id, body.name, body.email)
        .await;
    record_op_duration("update_account", start, result.is_ok());

    Ok(Json(result?))
}

/// DELETE /account
#[instrument(skip(state, user), fields(account_id = %user.account_id))]
pub async fn delete_account(State(state): State<AppState>, user: AuthUser) -> ApiResult<StatusCode> {
    let start = Instant::now();

    let result = state.billing.delete_account(&user.account_id).await;
    record_op_duration("delete_account", start, result.is_ok());

    result?;
    Ok(StatusCode::NO_CONTENT)
}
