//! # waypoint-app
//!
//! The application surface for waypoint: route registration and
//! middleware stacking at startup, a one-time [`App::build`] that folds
//! everything into an immutable [`Pipeline`], and a minimal HTTP/1.1
//! [`serve`] loop over tokio — one spawned task per connection, the
//! shared pipeline behind cheap clones.
//!
//! ```no_run
//! use waypoint_app::{serve, App};
//! use waypoint_middleware::{Recovery, RequestLogger};
//! use waypoint_router::{Context, Response};
//!
//! #[tokio::main]
//! async fn main() -> std::io::Result<()> {
//!     let app = App::new()
//!         .middleware(RequestLogger)
//!         .middleware(Recovery)
//!         .get("/", |_ctx| async { Ok(Response::text("welcome")) })
//!         .get("/users/:id", |ctx: Context| async move {
//!             let id = ctx.param("id").unwrap_or("unknown").to_string();
//!             Ok(Response::text(format!("user {id}")))
//!         });
//!
//!     serve("127.0.0.1:8082", app.build()).await
//! }
//! ```

mod app;
mod http1;

pub use app::{App, Pipeline};
pub use http1::serve;
