//! Billing errors

use aitopia_types::Plan;
use thiserror::Error;

/// Message for a request missing `plan` or a string array of `selectedTools`
pub const REQUIRED_FIELDS_MESSAGE: &str = "Plan and selectedTools array are required";

/// Billing errors
#[derive(Error, Debug)]
pub enum BillingError {
    /// No authenticated account
    #[error("Unauthorized")]
    Unauthorized,

    /// Account does not exist
    #[error("User not found")]
    NotFound,

    /// Request is missing required fields or has the wrong shape
    #[error("{0}")]
    InvalidInput(String),

    /// Plan name is not one of the known plans
    #[error("Invalid plan. Must be one of: starter, pro, enterprise")]
    InvalidPlan,

    /// One or more tool names are not in the catalog
    #[error("Invalid tools: {}", .0.join(", "))]
    InvalidTools(Vec<String>),

    /// Selection exceeds the plan's tool limit
    #[error("Cannot select more than {limit} tools for {plan} plan")]
    TooManyTools {
        /// Plan limit
        limit: usize,
        /// Requested plan
        plan: Plan,
    },

    /// Unique field already taken
    #[error("{0}")]
    Conflict(String),

    /// Database error
    #[error("database error: {0}")]
    Database(#[from] aitopia_db::DbError),

    /// Internal error
    #[error("internal error: {0}")]
    Internal(String),
}

impl BillingError {
    /// Missing `plan` / `selectedTools`
    pub fn missing_fields() -> Self {
        Self::InvalidInput(REQUIRED_FIELDS_MESSAGE.to_string())
    }

    /// Check if this is a server-side failure
    pub fn is_internal(&self) -> bool {
        matches!(self, Self::Database(_) | Self::Internal(_))
    }
}
