//! Failure recovery middleware.

use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use futures::FutureExt;
use waypoint_router::{Handler, Response};

use crate::chain::Middleware;

/// Converts any abnormal termination of the downstream chain into a
/// generic 500 response.
///
/// Both failure signals are covered: an `Err` returned by a handler and a
/// genuine panic unwinding out of the downstream future. The detail is
/// logged server-side and never reaches the client. Without this
/// middleware in the chain, failures propagate to the serving boundary
/// and end that request's task only.
pub struct Recovery;

impl Middleware for Recovery {
    fn wrap(&self, next: Handler) -> Handler {
        Arc::new(move |ctx| {
            let next = Arc::clone(&next);
            Box::pin(async move {
                match AssertUnwindSafe(next(ctx)).catch_unwind().await {
                    Ok(Ok(response)) => Ok(response),
                    Ok(Err(err)) => {
                        tracing::error!(error = %err, "handler failed");
                        Ok(Response::internal_server_error())
                    }
                    Err(panic) => {
                        tracing::error!(panic = panic_message(&panic), "handler panicked");
                        Ok(Response::internal_server_error())
                    }
                }
            })
        })
    }
}

fn panic_message(panic: &Box<dyn Any + Send>) -> &str {
    if let Some(message) = panic.downcast_ref::<&str>() {
        message
    } else if let Some(message) = panic.downcast_ref::<String>() {
        message
    } else {
        "non-string panic payload"
    }
}

#[cfg(test)]
mod tests {
    use waypoint_router::{into_handler, Context, Request, RouteError};

    use super::*;

    #[tokio::test]
    async fn test_recovers_from_handler_error() {
        let handler = Recovery.wrap(into_handler(|_ctx: Context| async {
            Err(RouteError::handler("id is zero"))
        }));

        let res = handler(Context::new(Request::get("/users/0"))).await.unwrap();
        assert_eq!(res.status, 500);
        assert_eq!(res.body_string(), Some("Internal Server Error".to_string()));
    }

    #[tokio::test]
    async fn test_recovers_from_panic() {
        let handler = Recovery.wrap(into_handler(|_ctx: Context| async {
            panic!("boom");
        }));

        let res = handler(Context::new(Request::get("/"))).await.unwrap();
        assert_eq!(res.status, 500);
    }

    #[tokio::test]
    async fn test_subsequent_requests_still_served() {
        let handler = Recovery.wrap(into_handler(|ctx: Context| async move {
            if ctx.request.path == "/bad" {
                panic!("boom");
            }
            Ok(Response::text("fine"))
        }));

        let res = handler(Context::new(Request::get("/bad"))).await.unwrap();
        assert_eq!(res.status, 500);

        let res = handler(Context::new(Request::get("/good"))).await.unwrap();
        assert_eq!(res.status, 200);
        assert_eq!(res.body_string(), Some("fine".to_string()));
    }

    #[tokio::test]
    async fn test_success_passes_through() {
        let handler = Recovery.wrap(into_handler(|_ctx: Context| async {
            Ok(Response::text("untouched"))
        }));

        let res = handler(Context::new(Request::get("/"))).await.unwrap();
        assert_eq!(res.body_string(), Some("untouched".to_string()));
    }
}
