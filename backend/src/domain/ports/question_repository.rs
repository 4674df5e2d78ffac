//! Port abstraction for question/answer persistence.

use async_trait::async_trait;

use crate::domain::page::{Page, PageRequest};
use crate::domain::question::{AnswerBody, NewQuestion, Question, QuestionId};

use super::macros::define_port_error;

define_port_error! {
    /// Persistence errors raised by question repository adapters.
    pub enum QuestionPersistenceError {
        /// Repository connection could not be established.
        Connection { message: String } => "question repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "question repository query failed: {message}",
        /// The targeted question does not exist.
        NotFound => "question not found",
    }
}

/// Driven port for question storage.
#[async_trait]
pub trait QuestionRepository: Send + Sync {
    /// Insert a new, unanswered question.
    async fn insert(&self, question: &NewQuestion) -> Result<(), QuestionPersistenceError>;

    /// List one page of questions in creation order.
    async fn list(&self, request: PageRequest)
    -> Result<Page<Question>, QuestionPersistenceError>;

    /// Fetch one question by identifier.
    async fn find(&self, id: QuestionId) -> Result<Option<Question>, QuestionPersistenceError>;

    /// Store an answer and mark the question answered.
    ///
    /// The flag only ever moves false→true; answering an already answered
    /// question overwrites the text and leaves the flag set. The first
    /// answer's timestamp is preserved.
    async fn store_answer(
        &self,
        id: QuestionId,
        answer: &AnswerBody,
    ) -> Result<(), QuestionPersistenceError>;
}
