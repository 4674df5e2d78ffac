//! Session adapter keeping HTTP handlers free of framework-specific logic.
//!
//! Wraps the Actix cookie session so handlers only deal with domain-shaped
//! operations: persist an identity, read it back, clear it. Tampered or
//! expired values read back as anonymous rather than erroring.

use actix_session::Session;
use actix_web::{dev::Payload, FromRequest, HttpRequest};
use chrono::{DateTime, Duration, Utc};
use futures_util::future::LocalBoxFuture;

use crate::domain::{Error, UserId};

pub(crate) const USER_ID_KEY: &str = "user_id";
pub(crate) const DEADLINE_KEY: &str = "login_deadline";

/// How long a non-remembered login stays valid.
///
/// The cookie itself persists for the middleware TTL; this deadline is what
/// distinguishes a "remember me" login from a plain one under a single
/// cookie store.
const LOGIN_DEADLINE_HOURS: i64 = 12;

/// Newtype wrapper exposing higher-level session operations.
#[derive(Clone)]
pub struct SessionContext(Session);

impl SessionContext {
    /// Construct a new wrapper from the underlying Actix session.
    pub fn new(session: Session) -> Self {
        Self(session)
    }

    /// Persist the authenticated user's id in the session cookie.
    ///
    /// Remembered logins carry no deadline and live for the cookie TTL;
    /// plain logins lapse after [`LOGIN_DEADLINE_HOURS`].
    pub fn persist_user(&self, user_id: &UserId, remember: bool) -> Result<(), Error> {
        self.0
            .insert(USER_ID_KEY, user_id.to_string())
            .map_err(|error| Error::internal(format!("failed to persist session: {error}")))?;
        if remember {
            self.0.remove(DEADLINE_KEY);
        } else {
            let deadline = Utc::now() + Duration::hours(LOGIN_DEADLINE_HOURS);
            self.0
                .insert(DEADLINE_KEY, deadline.to_rfc3339())
                .map_err(|error| {
                    Error::internal(format!("failed to persist session deadline: {error}"))
                })?;
        }
        // Rotate the cookie so a pre-login session id never survives login.
        self.0.renew();
        Ok(())
    }

    /// Fetch the current user id from the session, if present and not lapsed.
    pub fn user_id(&self) -> Result<Option<UserId>, Error> {
        let raw = self
            .0
            .get::<String>(USER_ID_KEY)
            .map_err(|error| Error::internal(format!("failed to read session: {error}")))?;
        let Some(raw) = raw else {
            return Ok(None);
        };

        let id = match UserId::parse(&raw) {
            Ok(id) => id,
            Err(error) => {
                tracing::warn!("invalid user id in session cookie: {error}");
                self.clear();
                return Ok(None);
            }
        };

        if self.deadline_passed()? {
            self.clear();
            return Ok(None);
        }
        Ok(Some(id))
    }

    /// Drop all session state.
    pub fn clear(&self) {
        self.0.purge();
    }

    fn deadline_passed(&self) -> Result<bool, Error> {
        let raw = self
            .0
            .get::<String>(DEADLINE_KEY)
            .map_err(|error| Error::internal(format!("failed to read session: {error}")))?;
        let Some(raw) = raw else {
            return Ok(false);
        };
        match DateTime::parse_from_rfc3339(&raw) {
            Ok(deadline) => Ok(deadline.with_timezone(&Utc) < Utc::now()),
            Err(error) => {
                tracing::warn!("invalid login deadline in session cookie: {error}");
                Ok(true)
            }
        }
    }
}

impl FromRequest for SessionContext {
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let fut = Session::from_request(req, payload);
        Box::pin(async move { fut.await.map(SessionContext::new) })
    }
}
