//! HTTP server configuration objects.

use std::net::SocketAddr;
use std::path::PathBuf;

use actix_web::cookie::{Key, SameSite};

use crate::outbound::persistence::DbPool;

/// Default cookie TTL for remembered sessions: 14 days.
pub const DEFAULT_SESSION_TTL_SECS: i64 = 14 * 24 * 60 * 60;

/// Settings consumed by `build_app`: session cookie behaviour and the
/// static asset directory. Shared between the real server and test
/// harnesses, which is why it is separate from [`ServerConfig`].
#[derive(Clone)]
pub struct AppSettings {
    pub(crate) key: Key,
    pub(crate) cookie_secure: bool,
    pub(crate) same_site: SameSite,
    pub(crate) session_ttl_secs: i64,
    pub(crate) static_dir: PathBuf,
}

impl AppSettings {
    /// Construct settings with production defaults: `SameSite=Lax`, a
    /// 14-day cookie TTL, and `static/` next to the working directory.
    #[must_use]
    pub fn new(key: Key, cookie_secure: bool) -> Self {
        Self {
            key,
            cookie_secure,
            same_site: SameSite::Lax,
            session_ttl_secs: DEFAULT_SESSION_TTL_SECS,
            static_dir: PathBuf::from("static"),
        }
    }

    /// Override the cookie `SameSite` attribute.
    #[must_use]
    pub fn with_same_site(mut self, same_site: SameSite) -> Self {
        self.same_site = same_site;
        self
    }

    /// Override the cookie TTL.
    #[must_use]
    pub fn with_session_ttl_secs(mut self, secs: i64) -> Self {
        self.session_ttl_secs = secs;
        self
    }

    /// Override the static asset directory.
    #[must_use]
    pub fn with_static_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.static_dir = dir.into();
        self
    }

    /// The session signing key.
    pub fn key(&self) -> &Key {
        &self.key
    }
}

/// Complete configuration for running the HTTP server.
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) db_pool: DbPool,
    pub(crate) app: AppSettings,
}

impl ServerConfig {
    /// Bundle the bind address, database pool, and app settings.
    #[must_use]
    pub fn new(bind_addr: SocketAddr, db_pool: DbPool, app: AppSettings) -> Self {
        Self {
            bind_addr,
            db_pool,
            app,
        }
    }

    /// Return the socket address the server will bind to.
    #[must_use]
    pub fn bind_addr(&self) -> SocketAddr {
        self.bind_addr
    }
}
