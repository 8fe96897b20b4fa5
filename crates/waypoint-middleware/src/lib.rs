//! # waypoint-middleware
//!
//! Cross-cutting behavior for `waypoint-router`, composed as a chain of
//! handler transformations around dispatch.
//!
//! A [`Middleware`] turns one [`Handler`](waypoint_router::Handler) into
//! another; the [`MiddlewareChain`] folds a registered sequence and a
//! terminal handler into the single pipeline entry point, once, at
//! startup. Composition order is request order: the first middleware
//! pushed wraps everything that follows.
//!
//! ```
//! use waypoint_middleware::{MiddlewareChain, ParseForm, ParseJson, Recovery, RequestLogger};
//! use waypoint_router::{Context, Request, Response, Router};
//! use waypoint_router::Method;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let mut router = Router::new();
//! router.register(Method::Post, "/users", |ctx: Context| async move {
//!     let name = ctx.param("name").unwrap_or("anonymous").to_string();
//!     Ok(Response::text(format!("created {name}")))
//! });
//!
//! let mut chain = MiddlewareChain::new();
//! chain.push(RequestLogger);
//! chain.push(Recovery);
//! chain.push(ParseForm);
//! chain.push(ParseJson);
//!
//! let entry = chain.build(router.into_handler());
//! let request = Request::post("/users").body(r#"{"name":"alice"}"#);
//! let response = entry(Context::new(request)).await.unwrap();
//! assert_eq!(response.body_string(), Some("created alice".to_string()));
//! # }
//! ```
//!
//! Built-ins, in the order a typical application stacks them:
//!
//! - [`RequestLogger`] — method, target and elapsed time, after completion
//! - [`Recovery`] — converts handler errors and panics into a generic 500
//! - [`ParseForm`] / [`ParseJson`] — merge body fields into the params map
//! - [`StaticFiles`] — GET/HEAD file fallback under a root directory
//! - [`CookieAuth`] — signed-cookie gate with ignore prefixes
//!
//! The [`sign`] module holds the HMAC-backed token format [`CookieAuth`]
//! verifies; login handlers use it to issue the cookie.

mod auth;
mod body;
mod chain;
mod logging;
mod recovery;
pub mod sign;
mod static_files;

pub use auth::CookieAuth;
pub use body::{ParseForm, ParseJson};
pub use chain::{Middleware, MiddlewareChain};
pub use logging::RequestLogger;
pub use recovery::Recovery;
pub use static_files::StaticFiles;
