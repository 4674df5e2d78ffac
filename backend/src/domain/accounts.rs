//! Account use-cases: registration and credential authentication.
//!
//! Handlers call this service instead of touching repositories directly, so
//! credential rules live in one place and handler tests can substitute the
//! ports with doubles.

use std::sync::Arc;

use tracing::warn;

use crate::domain::error::Error;
use crate::domain::ports::{PasswordHasher, UserPersistenceError, UserRepository};
use crate::domain::user::{Email, NewUser, Password, User, UserId, Username};

/// Outcome of a registration attempt that passed shape validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistrationOutcome {
    /// The account was created.
    Registered,
    /// The store's unique constraint rejected the username.
    UsernameTaken,
    /// The store's unique constraint rejected the email.
    EmailTaken,
}

/// Validated registration data.
#[derive(Debug, Clone)]
pub struct Registration {
    /// Requested unique handle.
    pub username: Username,
    /// Requested login email.
    pub email: Email,
    /// Plaintext password, hashed before it reaches any port.
    pub password: Password,
}

/// Account service bundling the user repository and password hasher ports.
#[derive(Clone)]
pub struct AccountService {
    users: Arc<dyn UserRepository>,
    hasher: Arc<dyn PasswordHasher>,
}

impl AccountService {
    /// Create a service over the given ports.
    pub fn new(users: Arc<dyn UserRepository>, hasher: Arc<dyn PasswordHasher>) -> Self {
        Self { users, hasher }
    }

    /// Create an account.
    ///
    /// Uniqueness is settled by the store: the insert either lands or comes
    /// back as a structured duplicate error, so two racing registrations can
    /// never both succeed.
    pub async fn register(&self, registration: Registration) -> Result<RegistrationOutcome, Error> {
        let password_hash = self
            .hasher
            .hash(&registration.password)
            .map_err(|error| Error::internal(error.to_string()))?;

        let user = NewUser {
            id: UserId::random(),
            username: registration.username,
            email: registration.email,
            password_hash,
        };

        match self.users.insert(&user).await {
            Ok(()) => Ok(RegistrationOutcome::Registered),
            Err(UserPersistenceError::DuplicateUsername) => Ok(RegistrationOutcome::UsernameTaken),
            Err(UserPersistenceError::DuplicateEmail) => Ok(RegistrationOutcome::EmailTaken),
            Err(error) => Err(map_user_persistence_error(error)),
        }
    }

    /// Check credentials against the stored account.
    ///
    /// Returns `Ok(None)` for both unknown email and wrong password; callers
    /// surface one generic failure message so responses never reveal which
    /// half was wrong.
    pub async fn authenticate(
        &self,
        email: &Email,
        password: &Password,
    ) -> Result<Option<User>, Error> {
        let Some(user) = self
            .users
            .find_by_email(email)
            .await
            .map_err(map_user_persistence_error)?
        else {
            return Ok(None);
        };

        let matches = self
            .hasher
            .verify(password, &user.password_hash)
            .map_err(|error| {
                warn!(user_id = %user.id, "password verification failed to run: {error}");
                Error::internal(error.to_string())
            })?;

        Ok(matches.then_some(user))
    }

    /// Fetch an account by identifier, for resolving session identities.
    pub async fn find_user(&self, id: &UserId) -> Result<Option<User>, Error> {
        self.users
            .find_by_id(id)
            .await
            .map_err(map_user_persistence_error)
    }
}

fn map_user_persistence_error(error: UserPersistenceError) -> Error {
    match error {
        UserPersistenceError::Connection { message } => Error::service_unavailable(message),
        UserPersistenceError::Query { message } => Error::internal(message),
        UserPersistenceError::DuplicateUsername | UserPersistenceError::DuplicateEmail => {
            Error::conflict(error.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    //! Service behaviour against stubbed ports.
    use std::sync::Mutex;

    use async_trait::async_trait;
    use rstest::rstest;

    use super::*;
    use crate::domain::error::ErrorCode;
    use crate::domain::ports::{Argon2PasswordHasher, PasswordHashError};
    use crate::domain::user::PasswordHashString;

    #[derive(Default)]
    struct StubState {
        stored: Vec<User>,
        insert_failure: Option<UserPersistenceError>,
        find_failure: Option<UserPersistenceError>,
    }

    #[derive(Default)]
    struct StubUserRepository {
        state: Mutex<StubState>,
    }

    impl StubUserRepository {
        fn with_insert_failure(failure: UserPersistenceError) -> Self {
            Self {
                state: Mutex::new(StubState {
                    insert_failure: Some(failure),
                    ..StubState::default()
                }),
            }
        }

        fn stored_count(&self) -> usize {
            self.state.lock().expect("state lock").stored.len()
        }
    }

    #[async_trait]
    impl UserRepository for StubUserRepository {
        async fn insert(&self, user: &NewUser) -> Result<(), UserPersistenceError> {
            let mut state = self.state.lock().expect("state lock");
            if let Some(failure) = state.insert_failure.clone() {
                return Err(failure);
            }
            state.stored.push(User {
                id: user.id,
                username: user.username.clone(),
                email: user.email.clone(),
                password_hash: user.password_hash.clone(),
                created_at: chrono::Utc::now(),
            });
            Ok(())
        }

        async fn find_by_email(
            &self,
            email: &Email,
        ) -> Result<Option<User>, UserPersistenceError> {
            let state = self.state.lock().expect("state lock");
            if let Some(failure) = state.find_failure.clone() {
                return Err(failure);
            }
            Ok(state.stored.iter().find(|u| &u.email == email).cloned())
        }

        async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserPersistenceError> {
            let state = self.state.lock().expect("state lock");
            Ok(state.stored.iter().find(|u| &u.id == id).cloned())
        }
    }

    /// Cheap deterministic hasher so tests avoid Argon2's work factor.
    struct PlainHasher;

    impl PasswordHasher for PlainHasher {
        fn hash(&self, password: &Password) -> Result<PasswordHashString, PasswordHashError> {
            Ok(PasswordHashString::new(format!(
                "plain:{}",
                String::from_utf8_lossy(password.as_bytes())
            )))
        }

        fn verify(
            &self,
            password: &Password,
            hash: &PasswordHashString,
        ) -> Result<bool, PasswordHashError> {
            Ok(hash.as_str()
                == format!("plain:{}", String::from_utf8_lossy(password.as_bytes())))
        }
    }

    fn registration(username: &str, email: &str, password: &str) -> Registration {
        Registration {
            username: Username::new(username).expect("valid username"),
            email: Email::new(email).expect("valid email"),
            password: Password::new(password).expect("valid password"),
        }
    }

    fn service(repo: Arc<StubUserRepository>) -> AccountService {
        AccountService::new(repo, Arc::new(PlainHasher))
    }

    #[rstest]
    #[tokio::test]
    async fn register_then_authenticate_succeeds() {
        let repo = Arc::new(StubUserRepository::default());
        let accounts = service(Arc::clone(&repo));

        let outcome = accounts
            .register(registration("alice", "a@x.com", "p1-p1-p1"))
            .await
            .expect("registration runs");
        assert_eq!(outcome, RegistrationOutcome::Registered);
        assert_eq!(repo.stored_count(), 1);

        let email = Email::new("a@x.com").expect("valid email");
        let password = Password::new("p1-p1-p1").expect("valid password");
        let user = accounts
            .authenticate(&email, &password)
            .await
            .expect("authentication runs")
            .expect("credentials accepted");
        assert_eq!(user.username.as_ref(), "alice");
    }

    #[rstest]
    #[case(UserPersistenceError::duplicate_username(), RegistrationOutcome::UsernameTaken)]
    #[case(UserPersistenceError::duplicate_email(), RegistrationOutcome::EmailTaken)]
    #[tokio::test]
    async fn duplicate_insert_maps_to_conflict_outcome(
        #[case] failure: UserPersistenceError,
        #[case] expected: RegistrationOutcome,
    ) {
        let repo = Arc::new(StubUserRepository::with_insert_failure(failure));
        let accounts = service(Arc::clone(&repo));

        let outcome = accounts
            .register(registration("alice", "a@x.com", "p1-p1-p1"))
            .await
            .expect("registration runs");
        assert_eq!(outcome, expected);
        assert_eq!(repo.stored_count(), 0);
    }

    #[rstest]
    #[tokio::test]
    async fn wrong_password_and_unknown_email_look_identical() {
        let repo = Arc::new(StubUserRepository::default());
        let accounts = service(Arc::clone(&repo));
        accounts
            .register(registration("alice", "a@x.com", "p1-p1-p1"))
            .await
            .expect("registration runs");

        let email = Email::new("a@x.com").expect("valid email");
        let wrong = Password::new("wrong-wrong").expect("valid password");
        assert_eq!(
            accounts
                .authenticate(&email, &wrong)
                .await
                .expect("authentication runs"),
            None
        );

        let unknown = Email::new("b@x.com").expect("valid email");
        let password = Password::new("p1-p1-p1").expect("valid password");
        assert_eq!(
            accounts
                .authenticate(&unknown, &password)
                .await
                .expect("authentication runs"),
            None
        );
    }

    #[rstest]
    #[tokio::test]
    async fn connection_failure_surfaces_service_unavailable() {
        let repo = Arc::new(StubUserRepository::with_insert_failure(
            UserPersistenceError::connection("refused"),
        ));
        let accounts = service(repo);

        let error = accounts
            .register(registration("alice", "a@x.com", "p1-p1-p1"))
            .await
            .expect_err("failure propagates");
        assert_eq!(error.code(), ErrorCode::ServiceUnavailable);
    }

    #[rstest]
    #[tokio::test]
    async fn real_hasher_round_trips_through_service() {
        let repo = Arc::new(StubUserRepository::default());
        let accounts = AccountService::new(repo, Arc::new(Argon2PasswordHasher));
        accounts
            .register(registration("alice", "a@x.com", "p1-p1-p1"))
            .await
            .expect("registration runs");

        let email = Email::new("a@x.com").expect("valid email");
        let password = Password::new("p1-p1-p1").expect("valid password");
        assert!(accounts
            .authenticate(&email, &password)
            .await
            .expect("authentication runs")
            .is_some());
    }
}
