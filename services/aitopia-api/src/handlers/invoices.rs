//! Invoice handlers

use std::time::Instant;

use aitopia_types::InvoiceView;
use axum::extract::State;
use axum::Json;
use tracing::instrument;

use crate::error::ApiResult;
use crate::extractors::AuthUser;
use crate::handlers::shared::record_op_duration;
use crate::state::AppState;

/// GET /invoices
#[instrument(skip(state, user), fields(account_id = %user.account_id))]
pub async fn list_invoices(
    State(state): State<AppState>,
    user: AuthUser,
) -> ApiResult<Json<Vec<InvoiceView>>> {
    let start = Instant::now();

    let result = state.billing.get_invoices(&user.account_id).await;
    record_op_duration("list_invoices", start, result.is_ok());

    Ok(Json(result?.iter().map(|inv| inv.to_view()).collect()))
}
