//! Port abstraction for the store liveness probe.

use async_trait::async_trait;

use super::macros::define_port_error;

define_port_error! {
    /// Failures reported by the liveness probe.
    pub enum StoreHealthError {
        /// The store rejected or never answered the probe query.
        Unavailable { message: String } => "store unavailable: {message}",
    }
}

/// Driven port executing a trivial query against the backing store.
#[async_trait]
pub trait StoreHealth: Send + Sync {
    /// Run the probe; success means the store answered.
    async fn ping(&self) -> Result<(), StoreHealthError>;
}
