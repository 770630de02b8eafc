//! AItopia Types - Shared domain types
//!
//! This crate contains domain types used across AItopia crates:
//! - Account identity
//! - Subscription plans and the tool catalog
//! - Subscription state and invoices

pub mod account;
pub mod billing;
pub mod plan;
pub mod subscription;
pub mod tool;

pub use account::*;
pub use billing::*;
pub use plan::*;
pub use subscription::*;
pub use tool::*;
