//! Port abstraction for discussion board persistence.

use async_trait::async_trait;

use crate::domain::page::{Page, PageRequest};
use crate::domain::post::{BoardPost, NewPost};

use super::macros::define_port_error;

define_port_error! {
    /// Persistence errors raised by board repository adapters.
    pub enum PostPersistenceError {
        /// Repository connection could not be established.
        Connection { message: String } => "post repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "post repository query failed: {message}",
    }
}

/// Driven port for board post storage.
#[async_trait]
pub trait PostRepository: Send + Sync {
    /// Insert a new post.
    async fn insert(&self, post: &NewPost) -> Result<(), PostPersistenceError>;

    /// List one page of posts in creation order, joined with author handles.
    async fn list(&self, request: PageRequest) -> Result<Page<BoardPost>, PostPersistenceError>;
}
