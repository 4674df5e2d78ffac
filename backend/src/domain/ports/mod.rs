//! Driven ports: traits the domain depends on, implemented by adapters.

pub(crate) mod macros;
mod password_hasher;
mod post_repository;
mod question_repository;
mod store_health;
mod user_repository;

pub use password_hasher::{Argon2PasswordHasher, PasswordHashError, PasswordHasher};
pub use post_repository::{PostPersistenceError, PostRepository};
pub use question_repository::{QuestionPersistenceError, QuestionRepository};
pub use store_health::{StoreHealth, StoreHealthError};
pub use user_repository::{UserPersistenceError, UserRepository};
