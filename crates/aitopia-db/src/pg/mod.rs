//! PostgreSQL repository implementations

mod account;
mod invoice;
mod subscription;

pub use account::PgAccountRepository;
pub use invoice::PgInvoiceRepository;
pub use subscription::PgSubscriptionRepository;

use crate::DbPool;

/// All repositories bundled together
#[derive(Clone)]
pub struct Repositories {
    pub accounts: PgAccountRepository,
    pub subscriptions: PgSubscriptionRepository,
    pub invoices: PgInvoiceRepository,
}

impl Repositories {
    /// Create all repositories from a database pool
    pub fn new(pool: DbPool) -> Self {
        Self {
            accounts: PgAccountRepository::new(pool.clone()),
            subscriptions: PgSubscriptionRepository::new(pool.clone()),
            invoices: PgInvoiceRepository::new(pool),
        }
    }
}
