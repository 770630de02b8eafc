//! AItopia Billing Core - Entitlement and billing logic
//!
//! Owns the subscription state machine: which plan an account is on, which
//! catalog tools it has selected, its billing cycle, and the invoices paid
//! plans generate.
//!
//! # Example
//!
//! ```rust,ignore
//! use aitopia_billing_core::{BillingService, PlanTable, SubscriptionRequest};
//! use aitopia_db::Repositories;
//!
//! let billing = BillingService::from_repositories(&repos, PlanTable::default());
//!
//! let outcome = billing
//!     .update_subscription(&account_id, SubscriptionRequest {
//!         plan: Some("pro".into()),
//!         selected_tools: Some(vec!["VoiceCraft".into(), "NeuroChat".into()]),
//!     })
//!     .await?;
//! ```

pub mod config;
pub mod entitlement;
pub mod error;
pub mod service;

pub use config::{PlanTable, PlanTerms};
pub use entitlement::{billing_period, EntitlementPolicy, ValidatedSelection};
pub use error::BillingError;
pub use service::{BillingService, SubscriptionRequest, UpdateOutcome};
