//! Registration, login, and logout handlers.

use actix_web::{get, post, web, HttpResponse};
use serde::Deserialize;
use tracing::info;

use crate::domain::RegistrationOutcome;

use super::forms::{FormErrors, LoginForm, RegisterForm};
use super::nav::{login_redirect, safe_next, see_other};
use super::session::SessionContext;
use super::templates::{render, LoginPage, RegisterPage};
use super::{ApiResult, HttpState};

/// One generic message for every credential failure, so responses never
/// reveal whether the email or the password was wrong.
const LOGIN_FAILURE_MESSAGE: &str = "invalid email or password";

/// Query parameters accepted by the login form.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NextQuery {
    /// Originally requested path, set by the login redirect.
    #[serde(default)]
    pub next: Option<String>,
}

/// Registration form.
#[get("/register")]
pub async fn register_form() -> ApiResult<HttpResponse> {
    render(&RegisterPage {
        errors: FormErrors::default(),
        username: String::new(),
        email: String::new(),
    })
}

/// Registration submission.
///
/// Shape failures and store conflicts both re-render the form with messages
/// and mutate nothing; success redirects to the login form.
#[post("/register")]
pub async fn register_submit(
    state: web::Data<HttpState>,
    form: web::Form<RegisterForm>,
) -> ApiResult<HttpResponse> {
    let form = form.into_inner();
    let rerender = |errors: FormErrors| {
        render(&RegisterPage {
            errors,
            username: form.username.clone(),
            email: form.email.clone(),
        })
    };

    let registration = match form.validate() {
        Ok(registration) => registration,
        Err(errors) => return rerender(errors),
    };

    match state.accounts.register(registration).await? {
        RegistrationOutcome::Registered => {
            info!(username = %form.username, "account registered");
            Ok(see_other("/login"))
        }
        RegistrationOutcome::UsernameTaken => {
            rerender(FormErrors::single("username", "username already exists"))
        }
        RegistrationOutcome::EmailTaken => {
            rerender(FormErrors::single("email", "email already registered"))
        }
    }
}

/// Login form. An already-authenticated visitor is sent home.
#[get("/login")]
pub async fn login_form(
    session: SessionContext,
    query: web::Query<NextQuery>,
) -> ApiResult<HttpResponse> {
    if session.user_id()?.is_some() {
        return Ok(see_other("/"));
    }
    render(&LoginPage {
        errors: FormErrors::default(),
        failure: None,
        email: String::new(),
        next: safe_next(query.next.as_deref()).map(str::to_owned),
    })
}

/// Login submission.
#[post("/login")]
pub async fn login_submit(
    state: web::Data<HttpState>,
    session: SessionContext,
    form: web::Form<LoginForm>,
) -> ApiResult<HttpResponse> {
    if session.user_id()?.is_some() {
        return Ok(see_other("/"));
    }

    let form = form.into_inner();
    let next = safe_next(form.next.as_deref()).map(str::to_owned);
    let rerender = |errors: FormErrors, failure: Option<String>| {
        render(&LoginPage {
            errors,
            failure,
            email: form.email.clone(),
            next: next.clone(),
        })
    };

    let attempt = match form.validate() {
        Ok(attempt) => attempt,
        Err(errors) => return rerender(errors, None),
    };

    let Some(user) = state
        .accounts
        .authenticate(&attempt.email, &attempt.password)
        .await?
    else {
        return rerender(FormErrors::default(), Some(LOGIN_FAILURE_MESSAGE.into()));
    };

    session.persist_user(&user.id, attempt.remember)?;
    info!(user_id = %user.id, "login succeeded");
    Ok(see_other(next.as_deref().unwrap_or("/")))
}

/// Clear the session and go home. Anonymous requests are sent to login
/// first, like every other gated route.
#[get("/logout")]
pub async fn logout(session: SessionContext) -> ApiResult<HttpResponse> {
    if session.user_id()?.is_none() {
        return Ok(login_redirect("/logout"));
    }
    session.clear();
    Ok(see_other("/"))
}
