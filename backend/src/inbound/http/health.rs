//! Store liveness probe.

use actix_web::{get, web, HttpResponse};

use super::HttpState;

/// Run a trivial query against the store and report the outcome as plain
/// text. Failures include the store error text; this route exists for
/// operators checking connectivity, not for end users.
#[get("/check_db")]
pub async fn check_db(state: web::Data<HttpState>) -> HttpResponse {
    match state.health.ping().await {
        Ok(()) => HttpResponse::Ok()
            .content_type("text/plain; charset=utf-8")
            .body("database connection successful"),
        Err(error) => HttpResponse::InternalServerError()
            .content_type("text/plain; charset=utf-8")
            .body(format!("database connection failed: {error}")),
    }
}
