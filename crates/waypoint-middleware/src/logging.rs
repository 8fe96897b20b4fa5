//! Request logging middleware.

use std::sync::Arc;
use std::time::Instant;

use waypoint_router::Handler;

use crate::chain::Middleware;

/// Logs method, request target and elapsed wall-clock time of the
/// downstream chain, after it completes.
pub struct RequestLogger;

impl Middleware for RequestLogger {
    fn wrap(&self, next: Handler) -> Handler {
        Arc::new(move |ctx| {
            let next = Arc::clone(&next);
            Box::pin(async move {
                let method = ctx.request.method;
                let target = ctx.request.target();
                let started = Instant::now();

                let result = next(ctx).await;

                tracing::info!(
                    %method,
                    %target,
                    elapsed = ?started.elapsed(),
                    "request completed"
                );
                result
            })
        })
    }
}

#[cfg(test)]
mod tests {
    use waypoint_router::{into_handler, Context, Request, Response};

    use super::*;

    #[tokio::test]
    async fn test_logger_passes_result_through() {
        let handler = RequestLogger.wrap(into_handler(|_ctx: Context| async {
            Ok(Response::text("downstream"))
        }));

        let res = handler(Context::new(Request::get("/users/1"))).await.unwrap();
        assert_eq!(res.body_string(), Some("downstream".to_string()));
    }
}
