//! Askama templates for the HTML surface.
//!
//! Handlers build these structs and hand them to [`render`]; the template
//! files live under `templates/`. Row types are converted into small view
//! structs so the templates only deal with display-ready strings.

use actix_web::http::StatusCode;
use actix_web::HttpResponse;
use askama::Template;
use tracing::error;

use crate::domain::{BoardPost, Error, Page, Project, Question};

use super::forms::FormErrors;

/// Render a template into a `text/html` response with the given status.
pub fn render_with_status<T: Template>(
    status: StatusCode,
    template: &T,
) -> Result<HttpResponse, Error> {
    let html = template.render().map_err(|err| {
        error!(error = %err, "template rendering failed");
        Error::internal("template rendering failed")
    })?;
    Ok(HttpResponse::build(status)
        .content_type("text/html; charset=utf-8")
        .body(html))
}

/// Render a template into a `200 OK` HTML response.
pub fn render<T: Template>(template: &T) -> Result<HttpResponse, Error> {
    render_with_status(StatusCode::OK, template)
}

/// Paging links derived from a listing page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pager {
    /// Current 1-based page.
    pub page: u32,
    /// Previous page, when one exists.
    pub prev: Option<u32>,
    /// Next page, when one exists.
    pub next: Option<u32>,
}

impl Pager {
    /// Derive links from page metadata.
    pub fn from_page<T>(page: &Page<T>) -> Self {
        Self {
            page: page.page,
            prev: page.page.checked_sub(1).filter(|p| *p >= 1),
            next: page.has_next.then(|| page.page + 1),
        }
    }
}

/// Display-ready board post.
#[derive(Debug, Clone)]
pub struct PostView {
    /// Post title.
    pub title: String,
    /// Post body text.
    pub body: String,
    /// Author handle.
    pub author: String,
    /// Formatted creation timestamp.
    pub posted_at: String,
}

impl From<BoardPost> for PostView {
    fn from(post: BoardPost) -> Self {
        Self {
            title: post.title.to_string(),
            body: post.body.to_string(),
            author: post.author_username.to_string(),
            posted_at: post.created_at.format("%Y-%m-%d %H:%M").to_string(),
        }
    }
}

/// Display-ready question row for the listing page.
#[derive(Debug, Clone)]
pub struct QuestionSummaryView {
    /// Identifier used in `/qa/{id}` links.
    pub id: String,
    /// Question title.
    pub title: String,
    /// Whether an answer exists.
    pub answered: bool,
    /// Formatted creation timestamp.
    pub asked_at: String,
}

impl From<Question> for QuestionSummaryView {
    fn from(question: Question) -> Self {
        Self {
            id: question.id.to_string(),
            title: question.title.to_string(),
            answered: question.answered,
            asked_at: question.created_at.format("%Y-%m-%d %H:%M").to_string(),
        }
    }
}

/// Display-ready question detail.
#[derive(Debug, Clone)]
pub struct QuestionView {
    /// Identifier used in the answer form action.
    pub id: String,
    /// Question title.
    pub title: String,
    /// Question text.
    pub body: String,
    /// Stored answer, when present.
    pub answer: Option<String>,
    /// Whether an answer exists.
    pub answered: bool,
    /// Formatted creation timestamp.
    pub asked_at: String,
}

impl From<Question> for QuestionView {
    fn from(question: Question) -> Self {
        Self {
            id: question.id.to_string(),
            title: question.title.to_string(),
            body: question.body.to_string(),
            answer: question.answer.map(|a| a.to_string()),
            answered: question.answered,
            asked_at: question.created_at.format("%Y-%m-%d %H:%M").to_string(),
        }
    }
}

/// Home page.
#[derive(Template)]
#[template(path = "home.html")]
pub struct HomePage;

/// Intro/about page.
#[derive(Template)]
#[template(path = "intro.html")]
pub struct IntroPage;

/// Project index listing the showcase catalogue.
#[derive(Template)]
#[template(path = "projects.html")]
pub struct ProjectIndexPage {
    /// Catalogue entries in display order.
    pub projects: &'static [Project],
}

/// Per-project detail page.
#[derive(Template)]
#[template(path = "project_detail.html")]
pub struct ProjectDetailPage {
    /// The resolved catalogue entry.
    pub project: &'static Project,
}

/// Registration form page.
#[derive(Template)]
#[template(path = "register.html")]
pub struct RegisterPage {
    /// Validation or conflict messages from the last submission.
    pub errors: FormErrors,
    /// Previously entered username, for re-rendering.
    pub username: String,
    /// Previously entered email, for re-rendering.
    pub email: String,
}

/// Login form page.
#[derive(Template)]
#[template(path = "login.html")]
pub struct LoginPage {
    /// Shape validation messages from the last submission.
    pub errors: FormErrors,
    /// Generic credential failure message, when credentials were rejected.
    pub failure: Option<String>,
    /// Previously entered email, for re-rendering.
    pub email: String,
    /// Validated post-login target carried through the form.
    pub next: Option<String>,
}

/// Discussion board page.
#[derive(Template)]
#[template(path = "board.html")]
pub struct BoardPage {
    /// Handle of the authenticated viewer.
    pub username: String,
    /// One page of posts in creation order.
    pub posts: Vec<PostView>,
    /// Paging links.
    pub pager: Pager,
    /// Validation messages from the last submission.
    pub errors: FormErrors,
    /// Previously entered title, for re-rendering.
    pub title_draft: String,
    /// Previously entered content, for re-rendering.
    pub content_draft: String,
}

/// Question listing and submission page.
#[derive(Template)]
#[template(path = "qa.html")]
pub struct QaPage {
    /// One page of questions in creation order.
    pub questions: Vec<QuestionSummaryView>,
    /// Paging links.
    pub pager: Pager,
    /// Validation messages from the last submission.
    pub errors: FormErrors,
    /// Previously entered title, for re-rendering.
    pub title_draft: String,
    /// Previously entered content, for re-rendering.
    pub content_draft: String,
}

/// Single-question page with the answer form.
#[derive(Template)]
#[template(path = "qa_detail.html")]
pub struct QaDetailPage {
    /// The resolved question.
    pub question: QuestionView,
    /// Validation messages from the last answer submission.
    pub errors: FormErrors,
    /// Previously entered answer, for re-rendering.
    pub answer_draft: String,
}

/// Error page used for 404s and redacted failures.
#[derive(Template)]
#[template(path = "error.html")]
pub struct ErrorPage {
    /// HTTP status code shown on the page.
    pub status: u16,
    /// Short heading.
    pub title: String,
    /// Safe, human-readable description.
    pub message: String,
}
