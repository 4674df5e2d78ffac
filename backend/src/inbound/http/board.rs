//! Discussion board handlers. Authentication required.

use actix_web::{get, post, web, HttpRequest, HttpResponse};
use serde::Deserialize;
use tracing::info;

use crate::domain::ports::PostPersistenceError;
use crate::domain::{Error, PageRequest, User};

use super::forms::{FormErrors, PostForm};
use super::nav::{login_redirect, see_other};
use super::session::SessionContext;
use super::templates::{render, BoardPage, Pager, PostView};
use super::{ApiResult, HttpState};

/// Query parameters accepted by the listing pages.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PageQuery {
    /// 1-based page selector.
    #[serde(default)]
    pub page: Option<u32>,
}

fn map_post_persistence_error(error: PostPersistenceError) -> Error {
    match error {
        PostPersistenceError::Connection { message } => Error::service_unavailable(message),
        PostPersistenceError::Query { message } => Error::internal(message),
    }
}

/// Resolve the session identity to a stored account, or produce the login
/// redirect for anonymous (and stale) sessions.
async fn require_account(
    state: &HttpState,
    session: &SessionContext,
    next: &str,
) -> ApiResult<Result<User, HttpResponse>> {
    let Some(user_id) = session.user_id()? else {
        return Ok(Err(login_redirect(next)));
    };
    match state.accounts.find_user(&user_id).await? {
        Some(user) => Ok(Ok(user)),
        None => {
            // The account behind this session no longer resolves; drop the
            // session rather than serving a half-authenticated page.
            session.clear();
            Ok(Err(login_redirect(next)))
        }
    }
}

async fn board_page_response(
    state: &HttpState,
    user: &User,
    request: PageRequest,
    errors: FormErrors,
    title_draft: String,
    content_draft: String,
) -> ApiResult<HttpResponse> {
    let posts = state
        .posts
        .list(request)
        .await
        .map_err(map_post_persistence_error)?;
    let pager = Pager::from_page(&posts);
    render(&BoardPage {
        username: user.username.to_string(),
        posts: posts.items.into_iter().map(PostView::from).collect(),
        pager,
        errors,
        title_draft,
        content_draft,
    })
}

/// Board listing.
#[get("/board")]
pub async fn board_page(
    state: web::Data<HttpState>,
    session: SessionContext,
    query: web::Query<PageQuery>,
    req: HttpRequest,
) -> ApiResult<HttpResponse> {
    let next = req
        .uri()
        .path_and_query()
        .map_or("/board", |pq| pq.as_str());
    let user = match require_account(&state, &session, next).await? {
        Ok(user) => user,
        Err(redirect) => return Ok(redirect),
    };

    board_page_response(
        &state,
        &user,
        PageRequest::from_query(query.page),
        FormErrors::default(),
        String::new(),
        String::new(),
    )
    .await
}

/// Board post submission.
///
/// Valid posts are written and answered with a redirect back to the list so
/// a refresh cannot resubmit; invalid ones re-render the first page with
/// messages and the drafts intact.
#[post("/board")]
pub async fn board_submit(
    state: web::Data<HttpState>,
    session: SessionContext,
    form: web::Form<PostForm>,
) -> ApiResult<HttpResponse> {
    let user = match require_account(&state, &session, "/board").await? {
        Ok(user) => user,
        Err(redirect) => return Ok(redirect),
    };

    let form = form.into_inner();
    match form.validate(user.id) {
        Ok(new_post) => {
            state
                .posts
                .insert(&new_post)
                .await
                .map_err(map_post_persistence_error)?;
            info!(post_id = %new_post.id, author = %user.id, "board post created");
            Ok(see_other("/board"))
        }
        Err(errors) => {
            board_page_response(
                &state,
                &user,
                PageRequest::first(),
                errors,
                form.title,
                form.content,
            )
            .await
        }
    }
}
