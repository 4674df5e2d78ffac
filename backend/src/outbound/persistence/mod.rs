//! PostgreSQL persistence adapters using Diesel ORM.
//!
//! Concrete implementations of the domain repository ports, backed by
//! PostgreSQL via `diesel-async` with `bb8` connection pooling.
//!
//! - **Thin adapters**: repositories only translate between Diesel row
//!   structs and domain types; no business rules live here.
//! - **Internal models**: row structs (`models.rs`) and schema definitions
//!   (`schema.rs`) never leak to the domain layer.
//! - **Strongly typed errors**: database failures are mapped to the port
//!   error types, including structured unique-violation conflicts.

mod diesel_post_repository;
mod diesel_question_repository;
mod diesel_store_health;
mod diesel_user_repository;
mod error_mapping;
mod models;
mod pool;
mod schema;

pub use diesel_post_repository::DieselPostRepository;
pub use diesel_question_repository::DieselQuestionRepository;
pub use diesel_store_health::DieselStoreHealth;
pub use diesel_user_repository::DieselUserRepository;
pub use pool::{DbPool, PoolConfig, PoolError};
