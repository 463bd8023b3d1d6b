/// Database access layer
///
/// Store traits with two implementations each: Postgres for production and
/// an in-memory store backing tests and `DATABASE_URL`-less local runs.
pub mod memory;
pub mod post_store;
pub mod user_store;

use thiserror::Error;

pub use memory::{MemoryPostStore, MemoryUserStore};
pub use post_store::{PgPostStore, PostStore};
pub use user_store::{PgUserStore, UserStore};

/// Failures crossing the store boundary. Anything that is not a uniqueness
/// conflict is classified `Backend` and wrapped as an internal error by the
/// calling service.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("duplicate key")]
    Duplicate,

    #[error("{0}")]
    Backend(String),
}
