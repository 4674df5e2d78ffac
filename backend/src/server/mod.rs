//! Server construction and middleware wiring.
//!
//! Everything the application needs at runtime is built here from explicit
//! configuration values; there are no module-level singletons. `build_app`
//! is also the entry point for integration tests, which pass a state bundle
//! backed by in-memory doubles instead of the Diesel adapters.

mod config;
mod fingerprint;

pub use config::{AppSettings, ServerConfig, DEFAULT_SESSION_TTL_SECS};
pub use fingerprint::key_fingerprint;

use std::sync::Arc;

use actix_files::Files;
use actix_session::{
    config::{CookieContentSecurity, PersistentSession},
    storage::CookieSessionStore,
    SessionMiddleware,
};
use actix_web::cookie::time::Duration;
use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{web, App, HttpServer};
use tracing::info;

use crate::domain::ports::Argon2PasswordHasher;
use crate::domain::AccountService;
use crate::inbound::http::{accounts, board, health, pages, qa, HttpState};
use crate::middleware::RequestLog;
use crate::outbound::persistence::{
    DbPool, DieselPostRepository, DieselQuestionRepository, DieselStoreHealth,
    DieselUserRepository,
};

/// Wire the Diesel adapters and domain services over a database pool.
#[must_use]
pub fn build_http_state(pool: &DbPool) -> HttpState {
    let accounts = AccountService::new(
        Arc::new(DieselUserRepository::new(pool.clone())),
        Arc::new(Argon2PasswordHasher),
    );
    HttpState::new(
        accounts,
        Arc::new(DieselPostRepository::new(pool.clone())),
        Arc::new(DieselQuestionRepository::new(pool.clone())),
        Arc::new(DieselStoreHealth::new(pool.clone())),
    )
}

/// Assemble the application: middleware, session handling, every route, the
/// static file service, and the 404 fallback.
pub fn build_app(
    state: web::Data<HttpState>,
    settings: &AppSettings,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    > + use<>,
> {
    let session = SessionMiddleware::builder(CookieSessionStore::default(), settings.key.clone())
        .cookie_name("session".into())
        .cookie_path("/".into())
        .cookie_secure(settings.cookie_secure)
        .cookie_http_only(true)
        .cookie_content_security(CookieContentSecurity::Private)
        .cookie_same_site(settings.same_site)
        .session_lifecycle(
            PersistentSession::default().session_ttl(Duration::seconds(settings.session_ttl_secs)),
        )
        .build();

    App::new()
        .app_data(state)
        .wrap(session)
        .wrap(RequestLog)
        .service(pages::home)
        .service(pages::home_alias)
        .service(pages::intro)
        .service(pages::project_index)
        .service(pages::project_detail)
        .service(accounts::register_form)
        .service(accounts::register_submit)
        .service(accounts::login_form)
        .service(accounts::login_submit)
        .service(accounts::logout)
        .service(board::board_page)
        .service(board::board_submit)
        .service(qa::qa_page)
        .service(qa::qa_submit)
        .service(qa::qa_detail)
        .service(qa::qa_answer_submit)
        .service(health::check_db)
        .service(Files::new("/static", settings.static_dir.clone()))
        .default_service(web::route().to(pages::not_found))
}

/// Run the HTTP server until shutdown.
///
/// # Errors
/// Returns [`std::io::Error`] when binding the listener fails.
pub async fn run(config: ServerConfig) -> std::io::Result<()> {
    let state = web::Data::new(build_http_state(&config.db_pool));
    let settings = config.app.clone();

    info!(
        addr = %config.bind_addr,
        session_key = %key_fingerprint(settings.key()),
        "starting http server"
    );

    HttpServer::new(move || build_app(state.clone(), &settings))
        .bind(config.bind_addr)?
        .run()
        .await
}
