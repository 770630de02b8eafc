//! Common test utilities for aitopia-billing-core integration tests

use std::sync::Arc;

use aitopia_billing_core::{BillingService, PlanTable, SubscriptionRequest};
use aitopia_db::memory::MemoryStore;
use aitopia_types::AccountId;

/// Billing service over a fresh in-memory store
pub fn service() -> (BillingService, MemoryStore) {
    service_with_table(PlanTable::default())
}

/// Billing service over a fresh in-memory store with a custom plan table
pub fn service_with_table(table: PlanTable) -> (BillingService, MemoryStore) {
    let store = MemoryStore::new();
    let repos = store.repositories();
    let service = BillingService::new(
        Arc::new(repos.accounts),
        Arc::new(repos.subscriptions),
        Arc::new(repos.invoices),
        table,
    );
    (service, store)
}

/// Seed an account in its signup state
pub fn seed_account(store: &MemoryStore) -> AccountId {
    let id = AccountId::new();
    store.insert_account(
        id.0,
        &format!("test-{}@example.com", id),
        "starter",
        Vec::new(),
        Some("inactive"),
    );
    id
}

/// Build a request from literals
pub fn request(plan: &str, tools: &[&str]) -> SubscriptionRequest {
    SubscriptionRequest {
        plan: Some(plan.to_string()),
        selected_tools: Some(tools.iter().map(|t| t.to_string()).collect()),
    }
}
