//! Question/answer data model.
//!
//! Questions are submitted without authentication. Answering stores the
//! answer text and flips the `answered` flag to true; the flag is monotonic
//! and never returns to false, although the answer text may be overwritten.

use std::fmt;

use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Validation errors returned by the question value constructors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuestionValidationError {
    /// The title is empty once trimmed.
    EmptyTitle,
    /// The title exceeds the maximum.
    TitleTooLong {
        /// Maximum accepted length.
        max: usize,
    },
    /// The question text is empty once trimmed.
    EmptyBody,
    /// The question text exceeds the maximum.
    BodyTooLong {
        /// Maximum accepted length.
        max: usize,
    },
    /// The answer text is empty once trimmed.
    EmptyAnswer,
    /// The answer text exceeds the maximum.
    AnswerTooLong {
        /// Maximum accepted length.
        max: usize,
    },
}

impl fmt::Display for QuestionValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyTitle => write!(f, "title must not be empty"),
            Self::TitleTooLong { max } => write!(f, "title must be at most {max} characters"),
            Self::EmptyBody => write!(f, "question must not be empty"),
            Self::BodyTooLong { max } => write!(f, "question must be at most {max} characters"),
            Self::EmptyAnswer => write!(f, "answer must not be empty"),
            Self::AnswerTooLong { max } => write!(f, "answer must be at most {max} characters"),
        }
    }
}

impl std::error::Error for QuestionValidationError {}

/// Stable question identifier stored as a UUID.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct QuestionId(Uuid);

impl QuestionId {
    /// Validate and construct a [`QuestionId`] from string input.
    ///
    /// Used by the `/qa/{id}` route; malformed ids are treated the same as
    /// unknown ids (not found) by the caller.
    pub fn parse(id: impl AsRef<str>) -> Option<Self> {
        Uuid::parse_str(id.as_ref()).ok().map(Self)
    }

    /// Generate a new random [`QuestionId`].
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Access the underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl From<Uuid> for QuestionId {
    fn from(value: Uuid) -> Self {
        Self(value)
    }
}

impl fmt::Display for QuestionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Maximum allowed length for a question title.
pub const QUESTION_TITLE_MAX: usize = 120;
/// Maximum allowed length for question and answer text.
pub const QUESTION_BODY_MAX: usize = 4000;

/// Validated question title.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionTitle(String);

impl QuestionTitle {
    /// Validate and construct a [`QuestionTitle`].
    pub fn new(title: impl Into<String>) -> Result<Self, QuestionValidationError> {
        let title = title.into();
        if title.trim().is_empty() {
            return Err(QuestionValidationError::EmptyTitle);
        }
        if title.chars().count() > QUESTION_TITLE_MAX {
            return Err(QuestionValidationError::TitleTooLong {
                max: QUESTION_TITLE_MAX,
            });
        }
        Ok(Self(title))
    }
}

impl AsRef<str> for QuestionTitle {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for QuestionTitle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

/// Validated question text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionBody(String);

impl QuestionBody {
    /// Validate and construct a [`QuestionBody`].
    pub fn new(body: impl Into<String>) -> Result<Self, QuestionValidationError> {
        let body = body.into();
        if body.trim().is_empty() {
            return Err(QuestionValidationError::EmptyBody);
        }
        if body.chars().count() > QUESTION_BODY_MAX {
            return Err(QuestionValidationError::BodyTooLong {
                max: QUESTION_BODY_MAX,
            });
        }
        Ok(Self(body))
    }
}

impl AsRef<str> for QuestionBody {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for QuestionBody {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

/// Validated answer text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnswerBody(String);

impl AnswerBody {
    /// Validate and construct an [`AnswerBody`].
    pub fn new(answer: impl Into<String>) -> Result<Self, QuestionValidationError> {
        let answer = answer.into();
        if answer.trim().is_empty() {
            return Err(QuestionValidationError::EmptyAnswer);
        }
        if answer.chars().count() > QUESTION_BODY_MAX {
            return Err(QuestionValidationError::AnswerTooLong {
                max: QUESTION_BODY_MAX,
            });
        }
        Ok(Self(answer))
    }
}

impl AsRef<str> for AnswerBody {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for AnswerBody {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

/// A stored question, possibly answered.
///
/// ## Invariants
/// - `answered` implies `answer` and `answered_at` are present.
/// - `answered` is monotonic: once true it never returns to false.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    /// Stable identifier.
    pub id: QuestionId,
    /// Validated title.
    pub title: QuestionTitle,
    /// Validated question text.
    pub body: QuestionBody,
    /// Stored answer, present once answered.
    pub answer: Option<AnswerBody>,
    /// Whether an answer has been submitted.
    pub answered: bool,
    /// Creation timestamp assigned by the store.
    pub created_at: DateTime<Utc>,
    /// Timestamp of the first answer submission.
    pub answered_at: Option<DateTime<Utc>>,
}

/// Question data accepted by the repository insert operation.
#[derive(Debug, Clone)]
pub struct NewQuestion {
    /// Identifier generated by the caller.
    pub id: QuestionId,
    /// Validated title.
    pub title: QuestionTitle,
    /// Validated question text.
    pub body: QuestionBody,
}
