//! # waypoint-router
//!
//! A minimal HTTP request dispatcher: maps (method, path) to a registered
//! handler and extracts named path parameters from URL patterns.
//!
//! This crate provides:
//! - Segment-wise path pattern matching with `:name` captures
//! - HTTP method-based routing with deterministic, registration-order
//!   match precedence
//! - A per-request [`Context`] carrying the request and accumulated
//!   parameters
//! - Plain-data [`Request`] and [`Response`] types, transport-agnostic
//!
//! ## Quick Start
//!
//! ```
//! use waypoint_router::{Context, Method, Request, Response, Result, Router};
//!
//! async fn hello_handler(_ctx: Context) -> Result<Response> {
//!     Ok(Response::text("Hello, World!"))
//! }
//!
//! async fn user_handler(ctx: Context) -> Result<Response> {
//!     let id = ctx.param("id").unwrap_or("unknown");
//!     Ok(Response::text(format!("user {id}")))
//! }
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let mut router = Router::new();
//! router.register(Method::Get, "/", hello_handler);
//! router.register(Method::Get, "/users/:id", user_handler);
//!
//! let handler = router.into_handler();
//! let response = handler(Context::new(Request::get("/users/42")))
//!     .await
//!     .unwrap();
//! assert_eq!(response.body_string(), Some("user 42".to_string()));
//! # }
//! ```
//!
//! ## Path Parameters
//!
//! A pattern segment starting with `:` captures the corresponding path
//! segment's literal text:
//!
//! ```
//! use waypoint_router::RoutePattern;
//!
//! let pattern = RoutePattern::new("/users/:user_id/addresses/:address_id");
//! let params = pattern.matches("/users/7/addresses/9").unwrap();
//! assert_eq!(params.get("user_id"), Some("7"));
//! assert_eq!(params.get("address_id"), Some("9"));
//! ```
//!
//! Matching is exact segment comparison — no trailing-slash tolerance, no
//! wildcards, no regexes. Cross-cutting behavior (logging, recovery, body
//! parsing, static files, auth) lives in `waypoint-middleware`, composed
//! around [`Router::into_handler`].

mod context;
mod error;
mod pattern;
mod request;
mod response;
mod router;

pub use context::{Context, Params};
pub use error::{Result, RouteError};
pub use pattern::{RoutePattern, Segment};
pub use request::{Method, Request};
pub use response::Response;
pub use router::{into_handler, BoxFuture, DispatchOutcome, Handler, Route, Router};
