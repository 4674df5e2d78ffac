//! Diesel-backed `UserRepository` adapter.

use async_trait::async_trait;

use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{UserPersistenceError, UserRepository};
use crate::domain::{Email, NewUser, PasswordHashString, User, UserId, Username};

use super::error_mapping::{map_diesel_error, map_pool_error, map_user_insert_error};
use super::models::{NewUserRow, UserRow};
use super::pool::DbPool;
use super::schema::users;

/// PostgreSQL implementation of the user repository port.
#[derive(Clone)]
pub struct DieselUserRepository {
    pool: DbPool,
}

impl DieselUserRepository {
    /// Create a repository over the shared pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn to_domain(row: UserRow) -> Result<User, UserPersistenceError> {
    let username = Username::new(row.username)
        .map_err(|error| UserPersistenceError::query(format!("stored username invalid: {error}")))?;
    let email = Email::new(row.email)
        .map_err(|error| UserPersistenceError::query(format!("stored email invalid: {error}")))?;
    Ok(User {
        id: UserId::from(row.id),
        username,
        email,
        password_hash: PasswordHashString::new(row.password_hash),
        created_at: row.created_at,
    })
}

#[async_trait]
impl UserRepository for DieselUserRepository {
    async fn insert(&self, user: &NewUser) -> Result<(), UserPersistenceError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|error| map_pool_error(error, UserPersistenceError::connection))?;

        let row = NewUserRow {
            id: *user.id.as_uuid(),
            username: user.username.as_ref(),
            email: user.email.as_ref(),
            password_hash: user.password_hash.as_str(),
        };

        diesel::insert_into(users::table)
            .values(&row)
            .execute(&mut conn)
            .await
            .map_err(map_user_insert_error)?;
        Ok(())
    }

    async fn find_by_email(&self, email: &Email) -> Result<Option<User>, UserPersistenceError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|error| map_pool_error(error, UserPersistenceError::connection))?;

        let row = users::table
            .filter(users::email.eq(email.as_ref()))
            .select(UserRow::as_select())
            .first::<UserRow>(&mut conn)
            .await
            .optional()
            .map_err(|error| {
                map_diesel_error(
                    error,
                    UserPersistenceError::query,
                    UserPersistenceError::connection,
                )
            })?;

        row.map(to_domain).transpose()
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserPersistenceError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|error| map_pool_error(error, UserPersistenceError::connection))?;

        let row = users::table
            .find(id.as_uuid())
            .select(UserRow::as_select())
            .first::<UserRow>(&mut conn)
            .await
            .optional()
            .map_err(|error| {
                map_diesel_error(
                    error,
                    UserPersistenceError::query,
                    UserPersistenceError::connection,
                )
            })?;

        row.map(to_domain).transpose()
    }
}
