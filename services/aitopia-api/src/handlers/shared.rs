//! Shared handler utilities
//!
//! Request-shape normalization and metrics helpers used across handlers.

use std::time::Instant;

use aitopia_billing_core::SubscriptionRequest;
use aitopia_types::Plan;
use serde_json::Value;

// ============================================================================
// Input Normalization
// ============================================================================

/// Turn loosely-typed JSON fields into a subscription request
///
/// `plan` must be a non-empty string and `selectedTools` an array; anything
/// else is treated as absent so the service reports it as missing. Array items
/// that are not strings keep their JSON text and fail the catalog check.
pub fn subscription_request(plan: Option<Value>, selected_tools: Option<Value>) -> SubscriptionRequest {
    let plan = match plan {
        Some(Value::String(s)) if !s.is_empty() => Some(s),
        _ => None,
    };

    let selected_tools = match selected_tools {
        Some(Value::Array(items)) => Some(
            items
                .into_iter()
                .map(|item| match item {
                    Value::String(s) => s,
                    other => other.to_string(),
                })
                .collect(),
        ),
        _ => None,
    };

    SubscriptionRequest {
        plan,
        selected_tools,
    }
}

// ============================================================================
// Metrics Helpers
// ============================================================================

/// Record operation duration with result label.
///
/// Labels: operation, result (ok/err)
#[inline]
pub fn record_op_duration(operation: &'static str, start: Instant, success: bool) {
    let result = if success { "ok" } else { "err" };
    metrics::histogram!(
        "billing_operation_duration_seconds",
        "operation" => operation,
        "result" => result
    )
    .record(start.elapsed().as_secs_f64());
}

/// Count a committed subscription update
#[inline]
pub fn record_subscription_update(plan: Plan, invoiced: bool) {
    metrics::counter!("subscription_updates_total", "plan" => plan.as_str()).increment(1);
    if invoiced {
        metrics::counter!("invoices_created_total", "plan" => plan.as_str()).increment(1);
    }
}

// ============================================================================
// Tests
// ============================================================================
