//! Form payloads and shape validation for the HTML surface.
//!
//! Each form either yields validated domain values or a list of per-field
//! error messages which the handler feeds back into the re-rendered form.
//! Uniqueness is not checked here; that is the store's job.

use serde::Deserialize;

use crate::domain::{
    AnswerBody, Email, NewPost, NewQuestion, Password, PostBody, PostId, PostTitle, QuestionBody,
    QuestionId, QuestionTitle, Registration, UserId, Username,
};

/// One validation failure tied to a form field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    /// Form field name the message belongs to.
    pub field: &'static str,
    /// Human-readable message shown next to the form.
    pub message: String,
}

/// Accumulated validation failures for one submission.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormErrors(Vec<FieldError>);

impl FormErrors {
    /// Record a failure for a field.
    pub fn push(&mut self, field: &'static str, message: impl Into<String>) {
        self.0.push(FieldError {
            field,
            message: message.into(),
        });
    }

    /// Whether any failure was recorded.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Positive form of [`FormErrors::is_empty`], for template conditions.
    pub fn has_messages(&self) -> bool {
        !self.0.is_empty()
    }

    /// All failures in submission order.
    pub fn items(&self) -> &[FieldError] {
        &self.0
    }

    /// Build a single-failure list.
    pub fn single(field: &'static str, message: impl Into<String>) -> Self {
        let mut errors = Self::default();
        errors.push(field, message);
        errors
    }
}

/// Registration form body.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RegisterForm {
    /// Requested unique handle.
    #[serde(default)]
    pub username: String,
    /// Requested login email.
    #[serde(default)]
    pub email: String,
    /// Plaintext password.
    #[serde(default)]
    pub password: String,
    /// Password confirmation; must equal `password`.
    #[serde(default)]
    pub confirm: String,
}

impl RegisterForm {
    /// Validate the submission shape into a [`Registration`].
    pub fn validate(&self) -> Result<Registration, FormErrors> {
        let mut errors = FormErrors::default();

        let username = match Username::new(self.username.clone()) {
            Ok(username) => Some(username),
            Err(error) => {
                errors.push("username", error.to_string());
                None
            }
        };
        let email = match Email::new(self.email.clone()) {
            Ok(email) => Some(email),
            Err(error) => {
                errors.push("email", error.to_string());
                None
            }
        };
        let password = match Password::new(self.password.clone()) {
            Ok(password) => Some(password),
            Err(error) => {
                errors.push("password", error.to_string());
                None
            }
        };
        if self.password != self.confirm {
            errors.push("confirm", "passwords do not match");
        }

        match (username, email, password, errors.is_empty()) {
            (Some(username), Some(email), Some(password), true) => Ok(Registration {
                username,
                email,
                password,
            }),
            _ => Err(errors),
        }
    }
}

/// Login form body.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LoginForm {
    /// Login email.
    #[serde(default)]
    pub email: String,
    /// Plaintext password.
    #[serde(default)]
    pub password: String,
    /// Checkbox: keep the session across browser restarts.
    #[serde(default)]
    pub remember: Option<String>,
    /// Originally requested path, carried through the form.
    #[serde(default)]
    pub next: Option<String>,
}

/// Validated login submission.
#[derive(Debug, Clone)]
pub struct LoginAttempt {
    /// Login email.
    pub email: Email,
    /// Plaintext password for verification.
    pub password: Password,
    /// Whether the session should outlive the login deadline.
    pub remember: bool,
}

impl LoginForm {
    /// Validate the submission shape into a [`LoginAttempt`].
    pub fn validate(&self) -> Result<LoginAttempt, FormErrors> {
        let mut errors = FormErrors::default();

        let email = match Email::new(self.email.clone()) {
            Ok(email) => Some(email),
            Err(error) => {
                errors.push("email", error.to_string());
                None
            }
        };
        let password = match Password::for_verification(self.password.clone()) {
            Ok(password) => Some(password),
            Err(error) => {
                errors.push("password", error.to_string());
                None
            }
        };

        match (email, password) {
            (Some(email), Some(password)) => Ok(LoginAttempt {
                email,
                password,
                remember: self.remember.is_some(),
            }),
            _ => Err(errors),
        }
    }
}

/// Board post form body.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PostForm {
    /// Post title.
    #[serde(default)]
    pub title: String,
    /// Post body text.
    #[serde(default)]
    pub content: String,
}

impl PostForm {
    /// Validate the submission shape into a [`NewPost`] owned by `author`.
    pub fn validate(&self, author: UserId) -> Result<NewPost, FormErrors> {
        let mut errors = FormErrors::default();

        let title = match PostTitle::new(self.title.clone()) {
            Ok(title) => Some(title),
            Err(error) => {
                errors.push("title", error.to_string());
                None
            }
        };
        let body = match PostBody::new(self.content.clone()) {
            Ok(body) => Some(body),
            Err(error) => {
                errors.push("content", error.to_string());
                None
            }
        };

        match (title, body) {
            (Some(title), Some(body)) => Ok(NewPost {
                id: PostId::random(),
                title,
                body,
                author,
            }),
            _ => Err(errors),
        }
    }
}

/// Question form body.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct QuestionForm {
    /// Question title.
    #[serde(default)]
    pub title: String,
    /// Question text.
    #[serde(default)]
    pub content: String,
}

impl QuestionForm {
    /// Validate the submission shape into a [`NewQuestion`].
    pub fn validate(&self) -> Result<NewQuestion, FormErrors> {
        let mut errors = FormErrors::default();

        let title = match QuestionTitle::new(self.title.clone()) {
            Ok(title) => Some(title),
            Err(error) => {
                errors.push("title", error.to_string());
                None
            }
        };
        let body = match QuestionBody::new(self.content.clone()) {
            Ok(body) => Some(body),
            Err(error) => {
                errors.push("content", error.to_string());
                None
            }
        };

        match (title, body) {
            (Some(title), Some(body)) => Ok(NewQuestion {
                id: QuestionId::random(),
                title,
                body,
            }),
            _ => Err(errors),
        }
    }
}

/// Answer form body.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AnswerForm {
    /// Answer text.
    #[serde(default)]
    pub answer: String,
}

impl AnswerForm {
    /// Validate the submission shape into an [`AnswerBody`].
    pub fn validate(&self) -> Result<AnswerBody, FormErrors> {
        AnswerBody::new(self.answer.clone())
            .map_err(|error| FormErrors::single("answer", error.to_string()))
    }
}
