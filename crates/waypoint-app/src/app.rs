//! Application builder and composed pipeline.

use std::future::Future;

use waypoint_middleware::{Middleware, MiddlewareChain};
use waypoint_router::{Context, Handler, Method, Request, Response, Result, Router};

/// Collects routes and middleware at startup.
///
/// Both registration calls are startup-only; [`App::build`] seals the
/// registry and folds the middleware chain around dispatch exactly once,
/// producing the immutable [`Pipeline`] the server invokes per request.
#[derive(Default)]
pub struct App {
    router: Router,
    chain: MiddlewareChain,
}

impl App {
    /// Creates an empty application.
    pub fn new() -> Self {
        Self {
            router: Router::new(),
            chain: MiddlewareChain::new(),
        }
    }

    /// Registers a handler under a (method, pattern) key.
    #[must_use]
    pub fn route<F, Fut>(mut self, method: Method, pattern: &str, handler: F) -> Self
    where
        F: Fn(Context) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<Response>> + Send + 'static,
    {
        self.router.register(method, pattern, handler);
        self
    }

    /// Registers a GET route.
    #[must_use]
    pub fn get<F, Fut>(self, pattern: &str, handler: F) -> Self
    where
        F: Fn(Context) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<Response>> + Send + 'static,
    {
        self.route(Method::Get, pattern, handler)
    }

    /// Registers a POST route.
    #[must_use]
    pub fn post<F, Fut>(self, pattern: &str, handler: F) -> Self
    where
        F: Fn(Context) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<Response>> + Send + 'static,
    {
        self.route(Method::Post, pattern, handler)
    }

    /// Registers a PUT route.
    #[must_use]
    pub fn put<F, Fut>(self, pattern: &str, handler: F) -> Self
    where
        F: Fn(Context) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<Response>> + Send + 'static,
    {
        self.route(Method::Put, pattern, handler)
    }

    /// Registers a DELETE route.
    #[must_use]
    pub fn delete<F, Fut>(self, pattern: &str, handler: F) -> Self
    where
        F: Fn(Context) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<Response>> + Send + 'static,
    {
        self.route(Method::Delete, pattern, handler)
    }

    /// Appends a middleware; first appended runs outermost.
    #[must_use]
    pub fn middleware(mut self, middleware: impl Middleware + 'static) -> Self {
        self.chain.push(middleware);
        self
    }

    /// Seals registration and composes the pipeline.
    pub fn build(self) -> Pipeline {
        Pipeline {
            entry: self.chain.build(self.router.into_handler()),
        }
    }
}

/// The composed, immutable entry point for request processing.
///
/// Cheap to clone; every request task shares the same underlying chain
/// and registry, created once and never mutated afterwards.
#[derive(Clone)]
pub struct Pipeline {
    entry: Handler,
}

impl Pipeline {
    /// Runs one request through the full chain and dispatch.
    ///
    /// A fresh [`Context`] is created here and owned by this call for the
    /// request's whole lifetime. An `Err` means a handler failure that no
    /// recovery middleware translated; the serving boundary decides what
    /// to do with it.
    pub async fn handle(&self, request: Request) -> Result<Response> {
        (self.entry)(Context::new(request)).await
    }
}
