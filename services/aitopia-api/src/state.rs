//! Application state for the AItopia API service.

use std::sync::Arc;

use aitopia_auth_core::TokenValidator;
use aitopia_billing_core::BillingService;
use aitopia_db::DbPool;

use crate::config::Config;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    /// Billing service (subscriptions, invoices, accounts)
    pub billing: Arc<BillingService>,
    /// Bearer token validator
    pub tokens: Arc<TokenValidator>,
    /// Database pool (readiness checks)
    pub pool: DbPool,
    /// Configuration
    pub config: Arc<Config>,
}

impl AppState {
    /// Create new application state
    pub fn new(billing: BillingService, pool: DbPool, config: Config) -> Self {
        Self {
            billing: Arc::new(billing),
            tokens: Arc::new(TokenValidator::new(config.auth.clone())),
            pool,
            config: Arc::new(config),
        }
    }

    /// Get request timeout from config
    pub fn request_timeout(&self) -> std::time::Duration {
        self.config.request_timeout
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
