//! AItopia DB - Database abstractions
//!
//! SQLx-based database layer for the AItopia entitlement service. The
//! subscription lives on the account row; invoices are a child table.
//!
//! # Example
//!
//! ```rust,ignore
//! use aitopia_db::{create_pool, run_migrations, Repositories};
//!
//! let pool = create_pool("postgres://localhost/aitopia").await?;
//! run_migrations(&pool).await?;
//! let repos = Repositories::new(pool);
//!
//! let invoices = repos.invoices.find_by_account_id(account_id).await?;
//! ```

pub mod error;
#[cfg(feature = "memory")]
pub mod memory;
pub mod models;
pub mod pg;
pub mod pool;
pub mod repo;

pub use error::{DbError, DbResult};
pub use models::*;
pub use pg::Repositories;
pub use pool::{create_pool, run_migrations, DbPool, MIGRATOR};
pub use repo::*;
