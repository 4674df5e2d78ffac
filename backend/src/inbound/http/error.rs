//! HTTP adapter mapping for domain errors.
//!
//! Keeps the domain error type HTTP-agnostic while letting Actix handlers
//! turn failures into consistent HTML error pages and status codes.

use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use askama::Template;
use tracing::error;

use crate::domain::{Error, ErrorCode};

use super::templates::ErrorPage;

/// Convenient result alias for HTTP handlers.
pub type ApiResult<T> = Result<T, Error>;

fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::InvalidRequest => StatusCode::BAD_REQUEST,
        ErrorCode::Unauthorized => StatusCode::UNAUTHORIZED,
        ErrorCode::NotFound => StatusCode::NOT_FOUND,
        ErrorCode::Conflict => StatusCode::CONFLICT,
        ErrorCode::ServiceUnavailable => StatusCode::SERVICE_UNAVAILABLE,
        ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Title and user-safe message for the error page.
///
/// Store and internal failure details stay in the logs; the page gets a
/// generic description.
fn page_content(error: &Error) -> (String, String) {
    match error.code() {
        ErrorCode::InvalidRequest => ("Bad request".into(), error.message().to_owned()),
        ErrorCode::Unauthorized => ("Login required".into(), error.message().to_owned()),
        ErrorCode::NotFound => ("Page not found".into(), error.message().to_owned()),
        ErrorCode::Conflict => ("Conflict".into(), error.message().to_owned()),
        ErrorCode::ServiceUnavailable => (
            "Service unavailable".into(),
            "A backing service is not reachable right now. Please try again shortly.".into(),
        ),
        ErrorCode::InternalError => (
            "Something went wrong".into(),
            "An unexpected error occurred. It has been logged.".into(),
        ),
    }
}

impl ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        status_for(self.code())
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        if status.is_server_error() {
            error!(code = self.code().as_str(), message = self.message(), "request failed");
        }
        let (title, message) = page_content(self);
        let page = ErrorPage {
            status: status.as_u16(),
            title,
            message,
        };
        match page.render() {
            Ok(html) => HttpResponse::build(status)
                .content_type("text/html; charset=utf-8")
                .body(html),
            Err(render_error) => {
                error!(error = %render_error, "error page rendering failed");
                HttpResponse::build(status).body(page.message)
            }
        }
    }
}

impl From<actix_web::Error> for Error {
    fn from(err: actix_web::Error) -> Self {
        // Do not leak implementation details to clients.
        error!(error = %err, "actix error promoted to domain error");
        Self::internal("Internal server error")
    }
}
