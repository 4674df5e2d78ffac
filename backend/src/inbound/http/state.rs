//! Shared HTTP adapter state.
//!
//! Handlers accept this state via `actix_web::web::Data`, so they depend
//! only on domain ports and stay testable with in-memory doubles.

use std::sync::Arc;

use crate::domain::ports::{PostRepository, QuestionRepository, StoreHealth};
use crate::domain::{AccountService, ProjectCatalogue};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    /// Registration and credential checks.
    pub accounts: AccountService,
    /// Board post storage.
    pub posts: Arc<dyn PostRepository>,
    /// Question storage.
    pub questions: Arc<dyn QuestionRepository>,
    /// Store liveness probe.
    pub health: Arc<dyn StoreHealth>,
    /// Showcase catalogue consulted by the portfolio pages.
    pub projects: ProjectCatalogue,
}

impl HttpState {
    /// Bundle the given port implementations.
    pub fn new(
        accounts: AccountService,
        posts: Arc<dyn PostRepository>,
        questions: Arc<dyn QuestionRepository>,
        health: Arc<dyn StoreHealth>,
    ) -> Self {
        Self {
            accounts,
            posts,
            questions,
            health,
            projects: ProjectCatalogue,
        }
    }
}
