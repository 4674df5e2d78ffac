//! Static portfolio pages and the project showcase.

use actix_web::{get, web, HttpResponse};

use crate::domain::{Error, ProjectSlug};

use super::templates::{render, render_with_status, ErrorPage, HomePage, IntroPage,
    ProjectDetailPage, ProjectIndexPage};
use super::{ApiResult, HttpState};

/// Home page at `/`.
#[get("/")]
pub async fn home() -> ApiResult<HttpResponse> {
    render(&HomePage)
}

/// Home page alias at `/home`.
#[get("/home")]
pub async fn home_alias() -> ApiResult<HttpResponse> {
    render(&HomePage)
}

/// Intro/about page.
#[get("/intro")]
pub async fn intro() -> ApiResult<HttpResponse> {
    render(&IntroPage)
}

/// Project index listing the showcase catalogue.
#[get("/project")]
pub async fn project_index(state: web::Data<HttpState>) -> ApiResult<HttpResponse> {
    render(&ProjectIndexPage {
        projects: state.projects.all(),
    })
}

/// Per-project detail page.
///
/// The path segment is validated and resolved against the compiled-in
/// catalogue; it is never interpolated into a template or file path, so an
/// unknown or malformed id can only ever produce a 404.
#[get("/project/{id}")]
pub async fn project_detail(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let raw = path.into_inner();
    let project = ProjectSlug::parse(&raw)
        .and_then(|slug| state.projects.find(&slug))
        .ok_or_else(|| Error::not_found("no such project"))?;
    render(&ProjectDetailPage { project })
}

/// Fallback handler for unmatched routes.
pub async fn not_found() -> ApiResult<HttpResponse> {
    render_with_status(
        actix_web::http::StatusCode::NOT_FOUND,
        &ErrorPage {
            status: 404,
            title: "Page not found".into(),
            message: "Nothing lives at this address.".into(),
        },
    )
}
