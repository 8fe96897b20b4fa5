//! Signed-cookie authentication gate.

use std::sync::Arc;

use waypoint_router::{Handler, Response};

use crate::chain::Middleware;
use crate::sign;

/// Requires a validly signed cookie before letting a request downstream.
///
/// Paths starting with one of the ignore prefixes pass through unchecked.
/// Everything else must carry the configured cookie holding a token
/// produced by [`sign::sign`] with the same secret; a missing cookie or a
/// failed verification redirects to the login path instead of erroring.
#[derive(Clone)]
pub struct CookieAuth {
    secret: Vec<u8>,
    cookie_name: String,
    login_path: String,
    ignore: Vec<String>,
}

impl CookieAuth {
    /// Creates an auth gate with the given secret and login redirect path.
    ///
    /// The login path itself is always ignored, so the login flow can
    /// reach its own handlers.
    pub fn new(secret: impl Into<Vec<u8>>, login_path: impl Into<String>) -> Self {
        let login_path = login_path.into();
        Self {
            secret: secret.into(),
            cookie_name: "session".to_string(),
            ignore: vec![login_path.clone()],
            login_path,
        }
    }

    /// Adds path prefixes to skip authentication for.
    #[must_use]
    pub fn ignore(mut self, prefixes: &[&str]) -> Self {
        self.ignore
            .extend(prefixes.iter().map(|s| (*s).to_string()));
        self
    }

    /// Overrides the cookie name (default `session`).
    #[must_use]
    pub fn cookie_name(mut self, name: impl Into<String>) -> Self {
        self.cookie_name = name.into();
        self
    }

    fn is_ignored(&self, path: &str) -> bool {
        self.ignore.iter().any(|p| path.starts_with(p))
    }
}

impl Middleware for CookieAuth {
    fn wrap(&self, next: Handler) -> Handler {
        let auth = self.clone();

        Arc::new(move |ctx| {
            let next = Arc::clone(&next);
            let auth = auth.clone();

            Box::pin(async move {
                if auth.is_ignored(&ctx.request.path) {
                    return next(ctx).await;
                }

                let verified = ctx
                    .request
                    .cookie(&auth.cookie_name)
                    .and_then(|token| sign::verify(&auth.secret, token));

                match verified {
                    Some(_) => next(ctx).await,
                    None => Ok(Response::redirect(&auth.login_path)),
                }
            })
        })
    }
}
