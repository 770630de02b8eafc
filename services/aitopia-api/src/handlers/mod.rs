//! REST API handlers

pub mod account;
pub mod health;
pub mod invoices;
pub mod shared;
pub mod subscription;

pub use account::*;
pub use health::*;
pub use invoices::*;
pub use subscription::*;
