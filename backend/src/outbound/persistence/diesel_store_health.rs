//! Diesel-backed `StoreHealth` adapter.

use async_trait::async_trait;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{StoreHealth, StoreHealthError};

use super::pool::DbPool;

/// Liveness probe running `SELECT 1` over a pooled connection.
#[derive(Clone)]
pub struct DieselStoreHealth {
    pool: DbPool,
}

impl DieselStoreHealth {
    /// Create a probe over the shared pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl StoreHealth for DieselStoreHealth {
    async fn ping(&self) -> Result<(), StoreHealthError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|error| StoreHealthError::unavailable(error.message().to_owned()))?;

        diesel::sql_query("SELECT 1")
            .execute(&mut conn)
            .await
            .map_err(|error| StoreHealthError::unavailable(error.to_string()))?;
        Ok(())
    }
}
