//! Middleware trait and chain composition.

use waypoint_router::Handler;

/// A composable transformation from one handler into another.
///
/// A middleware wraps the downstream handler it is given and returns a new
/// handler layering its own behavior around the call to `next`. Wrapping
/// happens once, at composition time; any configuration a middleware needs
/// (a secret key, a root directory, an ignore list) is owned by the value
/// and fixed before the first request.
pub trait Middleware: Send + Sync {
    /// Wraps the downstream handler.
    fn wrap(&self, next: Handler) -> Handler;
}

/// An ordered middleware sequence folded into a single handler.
///
/// Registration order is request order: composing `[m1, m2]` around a
/// terminal handler `h` builds `m1(m2(h))`, so `m1`'s pre-logic runs first
/// on the way in and last on the way out.
#[derive(Default)]
pub struct MiddlewareChain {
    middlewares: Vec<Box<dyn Middleware>>,
}

impl MiddlewareChain {
    /// Creates an empty chain.
    pub fn new() -> Self {
        Self {
            middlewares: Vec::new(),
        }
    }

    /// Appends a middleware to the chain.
    pub fn push(&mut self, middleware: impl Middleware + 'static) {
        self.middlewares.push(Box::new(middleware));
    }

    /// Returns the number of registered middleware.
    pub fn len(&self) -> usize {
        self.middlewares.len()
    }

    /// Returns whether the chain is empty.
    pub fn is_empty(&self) -> bool {
        self.middlewares.is_empty()
    }

    /// Folds the chain around a terminal handler.
    ///
    /// Runs once at startup; the returned handler is the pipeline entry
    /// point invoked per request.
    pub fn build(&self, terminal: Handler) -> Handler {
        let mut handler = terminal;
        for middleware in self.middlewares.iter().rev() {
            handler = middleware.wrap(handler);
        }
        handler
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use waypoint_router::{into_handler, Context, Request, Response};

    use super::*;

    struct Tracer {
        name: &'static str,
        log: Arc<Mutex<Vec<String>>>,
    }

    impl Middleware for Tracer {
        fn wrap(&self, next: Handler) -> Handler {
            let name = self.name;
            let log = Arc::clone(&self.log);
            Arc::new(move |ctx| {
                let next = Arc::clone(&next);
                let log = Arc::clone(&log);
                Box::pin(async move {
                    log.lock().unwrap().push(format!("{name}:pre"));
                    let result = next(ctx).await;
                    log.lock().unwrap().push(format!("{name}:post"));
                    result
                })
            })
        }
    }

    #[tokio::test]
    async fn test_wrap_order_is_outer_to_inner() {
        let log = Arc::new(Mutex::new(Vec::new()));

        let mut chain = MiddlewareChain::new();
        chain.push(Tracer {
            name: "A",
            log: Arc::clone(&log),
        });
        chain.push(Tracer {
            name: "B",
            log: Arc::clone(&log),
        });

        let terminal_log = Arc::clone(&log);
        let terminal = into_handler(move |_ctx: Context| {
            let log = Arc::clone(&terminal_log);
            async move {
                log.lock().unwrap().push("handler".to_string());
                Ok(Response::ok())
            }
        });

        let entry = chain.build(terminal);
        entry(Context::new(Request::get("/"))).await.unwrap();

        assert_eq!(
            *log.lock().unwrap(),
            vec!["A:pre", "B:pre", "handler", "B:post", "A:post"]
        );
    }

    #[tokio::test]
    async fn test_empty_chain_is_the_terminal_handler() {
        let chain = MiddlewareChain::new();
        assert!(chain.is_empty());

        let entry = chain.build(into_handler(|_ctx: Context| async {
            Ok(Response::text("terminal"))
        }));
        let res = entry(Context::new(Request::get("/"))).await.unwrap();
        assert_eq!(res.body_string(), Some("terminal".to_string()));
    }
}
