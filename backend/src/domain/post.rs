//! Discussion board data model.

use std::fmt;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::user::{UserId, Username};

/// Validation errors returned by the board value constructors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PostValidationError {
    /// The title is empty once trimmed.
    EmptyTitle,
    /// The title exceeds the maximum.
    TitleTooLong {
        /// Maximum accepted length.
        max: usize,
    },
    /// The body is empty once trimmed.
    EmptyBody,
    /// The body exceeds the maximum.
    BodyTooLong {
        /// Maximum accepted length.
        max: usize,
    },
}

impl fmt::Display for PostValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyTitle => write!(f, "title must not be empty"),
            Self::TitleTooLong { max } => write!(f, "title must be at most {max} characters"),
            Self::EmptyBody => write!(f, "content must not be empty"),
            Self::BodyTooLong { max } => write!(f, "content must be at most {max} characters"),
        }
    }
}

impl std::error::Error for PostValidationError {}

/// Stable post identifier stored as a UUID.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PostId(Uuid);

impl PostId {
    /// Generate a new random [`PostId`].
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Access the underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl From<Uuid> for PostId {
    fn from(value: Uuid) -> Self {
        Self(value)
    }
}

impl fmt::Display for PostId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Maximum allowed length for a post title.
pub const POST_TITLE_MAX: usize = 120;
/// Maximum allowed length for a post body.
pub const POST_BODY_MAX: usize = 4000;

/// Validated board post title.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostTitle(String);

impl PostTitle {
    /// Validate and construct a [`PostTitle`].
    pub fn new(title: impl Into<String>) -> Result<Self, PostValidationError> {
        let title = title.into();
        if title.trim().is_empty() {
            return Err(PostValidationError::EmptyTitle);
        }
        if title.chars().count() > POST_TITLE_MAX {
            return Err(PostValidationError::TitleTooLong {
                max: POST_TITLE_MAX,
            });
        }
        Ok(Self(title))
    }
}

impl AsRef<str> for PostTitle {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for PostTitle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

/// Validated board post body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostBody(String);

impl PostBody {
    /// Validate and construct a [`PostBody`].
    pub fn new(body: impl Into<String>) -> Result<Self, PostValidationError> {
        let body = body.into();
        if body.trim().is_empty() {
            return Err(PostValidationError::EmptyBody);
        }
        if body.chars().count() > POST_BODY_MAX {
            return Err(PostValidationError::BodyTooLong { max: POST_BODY_MAX });
        }
        Ok(Self(body))
    }
}

impl AsRef<str> for PostBody {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for PostBody {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

/// A stored board post joined with its author's username for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardPost {
    /// Stable identifier.
    pub id: PostId,
    /// Validated title.
    pub title: PostTitle,
    /// Validated body.
    pub body: PostBody,
    /// Identifier of the authenticated author.
    pub author: UserId,
    /// Author handle shown on the board.
    pub author_username: Username,
    /// Creation timestamp assigned by the store; listings order by it.
    pub created_at: DateTime<Utc>,
}

/// Post data accepted by the repository insert operation.
#[derive(Debug, Clone)]
pub struct NewPost {
    /// Identifier generated by the caller.
    pub id: PostId,
    /// Validated title.
    pub title: PostTitle,
    /// Validated body.
    pub body: PostBody,
    /// Identifier of the authenticated author.
    pub author: UserId,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("hello board", true)]
    #[case("", false)]
    #[case("   ", false)]
    fn title_validation(#[case] input: &str, #[case] ok: bool) {
        assert_eq!(PostTitle::new(input).is_ok(), ok, "input: {input:?}");
    }

    #[rstest]
    fn title_rejects_over_limit() {
        let long = "x".repeat(POST_TITLE_MAX + 1);
        assert_eq!(
            PostTitle::new(long),
            Err(PostValidationError::TitleTooLong {
                max: POST_TITLE_MAX
            })
        );
    }

    #[rstest]
    fn body_rejects_over_limit() {
        let long = "x".repeat(POST_BODY_MAX + 1);
        assert_eq!(
            PostBody::new(long),
            Err(PostValidationError::BodyTooLong { max: POST_BODY_MAX })
        );
    }

    #[rstest]
    fn body_accepts_multiline_content() {
        let body = PostBody::new("first line\nsecond line").expect("valid body");
        assert_eq!(body.as_ref(), "first line\nsecond line");
    }
}
