//! AItopia API
//!
//! HTTP service exposing subscription management, tool entitlements and
//! invoices for authenticated accounts.
//!
//! ## REST Endpoints
//!
//! - `PATCH /subscription` - Change plan and selected tools
//! - `GET /subscription` - Current plan, tools and status
//! - `GET /invoices` - Invoice history, newest first
//! - `POST /account` - Provision the caller's account
//! - `GET /account` - Account profile
//! - `PATCH /account` - Update name or email
//! - `DELETE /account` - Delete the account and its invoices
//!
//! ## Health Endpoints
//!
//! - `GET /health` - Liveness probe
//! - `GET /ready` - Readiness probe
//! - `GET /metrics` - Prometheus metrics

pub mod config;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod routes;
pub mod state;

pub use config::{Config, ConfigError};
pub use routes::build_router;
pub use state::AppState;
