//! User account data model.

use std::fmt;
use std::sync::OnceLock;

use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use zeroize::Zeroizing;

/// Validation errors returned by the account value constructors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserValidationError {
    /// The identifier string is empty or not a UUID.
    InvalidId,
    /// The username is empty once trimmed.
    EmptyUsername,
    /// The username is shorter than the minimum.
    UsernameTooShort {
        /// Minimum accepted length.
        min: usize,
    },
    /// The username exceeds the maximum.
    UsernameTooLong {
        /// Maximum accepted length.
        max: usize,
    },
    /// The username contains characters outside the allowed set.
    UsernameInvalidCharacters,
    /// The email is empty once trimmed.
    EmptyEmail,
    /// The email does not look like `local@host`.
    InvalidEmail,
    /// The email exceeds the maximum.
    EmailTooLong {
        /// Maximum accepted length.
        max: usize,
    },
    /// The password is empty.
    EmptyPassword,
    /// The password is shorter than the minimum.
    PasswordTooShort {
        /// Minimum accepted length.
        min: usize,
    },
}

impl fmt::Display for UserValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidId => write!(f, "user id must be a valid UUID"),
            Self::EmptyUsername => write!(f, "username must not be empty"),
            Self::UsernameTooShort { min } => {
                write!(f, "username must be at least {min} characters")
            }
            Self::UsernameTooLong { max } => {
                write!(f, "username must be at most {max} characters")
            }
            Self::UsernameInvalidCharacters => write!(
                f,
                "username may only contain letters, numbers, underscores, or hyphens",
            ),
            Self::EmptyEmail => write!(f, "email must not be empty"),
            Self::InvalidEmail => write!(f, "email must look like name@example.com"),
            Self::EmailTooLong { max } => write!(f, "email must be at most {max} characters"),
            Self::EmptyPassword => write!(f, "password must not be empty"),
            Self::PasswordTooShort { min } => {
                write!(f, "password must be at least {min} characters")
            }
        }
    }
}

impl std::error::Error for UserValidationError {}

/// Stable user identifier stored as a UUID.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(Uuid);

impl UserId {
    /// Validate and construct a [`UserId`] from string input.
    pub fn parse(id: impl AsRef<str>) -> Result<Self, UserValidationError> {
        Uuid::parse_str(id.as_ref())
            .map(Self)
            .map_err(|_| UserValidationError::InvalidId)
    }

    /// Generate a new random [`UserId`].
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Access the underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl From<Uuid> for UserId {
    fn from(value: Uuid) -> Self {
        Self(value)
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Minimum allowed length for a username.
pub const USERNAME_MIN: usize = 3;
/// Maximum allowed length for a username.
pub const USERNAME_MAX: usize = 32;
/// Maximum allowed length for an email address.
pub const EMAIL_MAX: usize = 254;
/// Minimum allowed length for a password.
pub const PASSWORD_MIN: usize = 8;

static USERNAME_RE: OnceLock<Regex> = OnceLock::new();

fn username_regex() -> &'static Regex {
    USERNAME_RE.get_or_init(|| {
        // Length is enforced separately; this regex constrains allowed characters.
        let pattern = "^[A-Za-z0-9_-]+$";
        Regex::new(pattern)
            .unwrap_or_else(|error| panic!("username regex failed to compile: {error}"))
    })
}

/// Unique login/display handle for a user.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Username(String);

impl Username {
    /// Validate and construct a [`Username`].
    pub fn new(username: impl Into<String>) -> Result<Self, UserValidationError> {
        let username = username.into();
        if username.trim().is_empty() {
            return Err(UserValidationError::EmptyUsername);
        }
        let length = username.chars().count();
        if length < USERNAME_MIN {
            return Err(UserValidationError::UsernameTooShort { min: USERNAME_MIN });
        }
        if length > USERNAME_MAX {
            return Err(UserValidationError::UsernameTooLong { max: USERNAME_MAX });
        }
        if !username_regex().is_match(&username) {
            return Err(UserValidationError::UsernameInvalidCharacters);
        }
        Ok(Self(username))
    }
}

impl AsRef<str> for Username {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<Username> for String {
    fn from(value: Username) -> Self {
        value.0
    }
}

impl TryFrom<String> for Username {
    type Error = UserValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Email address used as the login identifier.
///
/// The check is a shape check only (`local@host`, no whitespace); full
/// RFC 5321 validation is out of scope for a login form.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Email(String);

impl Email {
    /// Validate and construct an [`Email`].
    pub fn new(email: impl Into<String>) -> Result<Self, UserValidationError> {
        let email = email.into();
        if email.trim().is_empty() {
            return Err(UserValidationError::EmptyEmail);
        }
        if email.chars().count() > EMAIL_MAX {
            return Err(UserValidationError::EmailTooLong { max: EMAIL_MAX });
        }
        let mut parts = email.split('@');
        let local = parts.next().unwrap_or_default();
        let host = parts.next().unwrap_or_default();
        let extra = parts.next();
        if local.is_empty() || host.is_empty() || extra.is_some() {
            return Err(UserValidationError::InvalidEmail);
        }
        if email.chars().any(char::is_whitespace) {
            return Err(UserValidationError::InvalidEmail);
        }
        Ok(Self(email))
    }
}

impl AsRef<str> for Email {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for Email {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<Email> for String {
    fn from(value: Email) -> Self {
        value.0
    }
}

impl TryFrom<String> for Email {
    type Error = UserValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Plaintext password wrapper that zeroes its memory on drop.
///
/// The plaintext never leaves the registration/login path; only the derived
/// [`PasswordHash`] is persisted.
#[derive(Clone)]
pub struct Password(Zeroizing<String>);

impl Password {
    /// Validate and construct a [`Password`].
    pub fn new(password: impl Into<String>) -> Result<Self, UserValidationError> {
        let password = Zeroizing::new(password.into());
        if password.is_empty() {
            return Err(UserValidationError::EmptyPassword);
        }
        if password.chars().count() < PASSWORD_MIN {
            return Err(UserValidationError::PasswordTooShort { min: PASSWORD_MIN });
        }
        Ok(Self(password))
    }

    /// Construct a [`Password`] for verification against a stored hash.
    ///
    /// Login only checks that the field is present; the length policy
    /// applies when accounts are created, not when they are used.
    pub fn for_verification(password: impl Into<String>) -> Result<Self, UserValidationError> {
        let password = Zeroizing::new(password.into());
        if password.is_empty() {
            return Err(UserValidationError::EmptyPassword);
        }
        Ok(Self(password))
    }

    /// Borrow the plaintext bytes for hashing or verification.
    pub fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }
}

impl fmt::Debug for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Password(<redacted>)")
    }
}

/// Opaque encoded password hash (PHC string) produced by the hasher port.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PasswordHashString(String);

impl PasswordHashString {
    /// Wrap an encoded hash string loaded from the store or the hasher.
    pub fn new(encoded: impl Into<String>) -> Self {
        Self(encoded.into())
    }

    /// Borrow the encoded PHC string.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

/// A registered user account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    /// Stable identifier.
    pub id: UserId,
    /// Unique handle shown next to board posts.
    pub username: Username,
    /// Unique login identifier.
    pub email: Email,
    /// Encoded password hash; never the plaintext.
    pub password_hash: PasswordHashString,
    /// Creation timestamp assigned by the store.
    pub created_at: DateTime<Utc>,
}

/// Account data accepted by the repository insert operation.
#[derive(Debug, Clone)]
pub struct NewUser {
    /// Identifier generated by the caller.
    pub id: UserId,
    /// Validated unique handle.
    pub username: Username,
    /// Validated unique login identifier.
    pub email: Email,
    /// Hash derived from the submitted password.
    pub password_hash: PasswordHashString,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("alice", true)]
    #[case("al", false)]
    #[case("", false)]
    #[case("a_very-long_name_that_keeps_going_on", false)]
    #[case("with space", false)]
    #[case("emoji🦀", false)]
    #[case("ok_name-42", true)]
    fn username_validation(#[case] input: &str, #[case] ok: bool) {
        assert_eq!(Username::new(input).is_ok(), ok, "input: {input:?}");
    }

    #[rstest]
    #[case("a@x.com", true)]
    #[case("", false)]
    #[case("no-at-sign", false)]
    #[case("two@@signs", false)]
    #[case("@host", false)]
    #[case("local@", false)]
    #[case("sp ace@x.com", false)]
    fn email_validation(#[case] input: &str, #[case] ok: bool) {
        assert_eq!(Email::new(input).is_ok(), ok, "input: {input:?}");
    }

    #[rstest]
    #[case("longenough1", true)]
    #[case("short", false)]
    #[case("", false)]
    fn password_validation(#[case] input: &str, #[case] ok: bool) {
        assert_eq!(Password::new(input).is_ok(), ok, "input: {input:?}");
    }

    #[rstest]
    fn user_id_round_trips_through_display() {
        let id = UserId::random();
        let parsed = UserId::parse(id.to_string()).expect("round trip");
        assert_eq!(parsed, id);
    }

    #[rstest]
    fn user_id_rejects_garbage() {
        assert_eq!(
            UserId::parse("not-a-uuid"),
            Err(UserValidationError::InvalidId)
        );
    }

    #[rstest]
    fn password_debug_is_redacted() {
        let password = Password::new("hunter2hunter2").expect("valid password");
        assert_eq!(format!("{password:?}"), "Password(<redacted>)");
    }
}
