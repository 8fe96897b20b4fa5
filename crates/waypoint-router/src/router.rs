//! Route registry and dispatch.

use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use crate::context::Context;
use crate::error::Result;
use crate::pattern::RoutePattern;
use crate::request::Method;
use crate::response::Response;

/// A boxed future, the return value of boxed handlers.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// A boxed request handler.
///
/// Handlers consume the request's context and produce the response value,
/// or an error for the recovery layer to translate.
pub type Handler = Arc<dyn Fn(Context) -> BoxFuture<'static, Result<Response>> + Send + Sync>;

/// Boxes a closure or async fn into a [`Handler`].
pub fn into_handler<F, Fut>(f: F) -> Handler
where
    F: Fn(Context) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<Response>> + Send + 'static,
{
    Arc::new(move |ctx| Box::pin(f(ctx)))
}

/// A single route definition.
#[derive(Clone)]
pub struct Route {
    /// HTTP method.
    pub method: Method,
    /// Path pattern.
    pub pattern: RoutePattern,
    /// Request handler.
    pub handler: Handler,
}

impl Route {
    /// Creates a new route.
    pub fn new<F, Fut>(method: Method, pattern: &str, handler: F) -> Self
    where
        F: Fn(Context) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<Response>> + Send + 'static,
    {
        Self {
            method,
            pattern: RoutePattern::new(pattern),
            handler: into_handler(handler),
        }
    }
}

/// The result of resolving one request.
pub enum DispatchOutcome {
    /// A route matched and its handler ran; this is what it produced.
    Handled(Result<Response>),
    /// No registered pattern matched; the caller translates this into a
    /// 404-equivalent response.
    NotFound,
}

/// Maps (method, pattern) keys to handlers and dispatches requests.
///
/// The registry is built once at startup and read-only afterwards; routes
/// for a method are tried in registration order and the first match wins.
/// Registering the same (method, pattern) key again replaces the handler
/// in place, keeping the route's original position.
pub struct Router {
    routes: HashMap<Method, Vec<Route>>,
}

impl Default for Router {
    fn default() -> Self {
        Self::new()
    }
}

impl Router {
    /// Creates a new empty router.
    pub fn new() -> Self {
        Self {
            routes: HashMap::new(),
        }
    }

    /// Registers a handler for a (method, pattern) key.
    ///
    /// Pattern syntax is not validated beyond what the matcher tolerates;
    /// duplicate capture names within one pattern are legal.
    pub fn register<F, Fut>(&mut self, method: Method, pattern: &str, handler: F)
    where
        F: Fn(Context) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<Response>> + Send + 'static,
    {
        let route = Route::new(method, pattern, handler);
        let routes = self.routes.entry(method).or_default();
        if let Some(existing) = routes.iter_mut().find(|r| r.pattern.pattern() == pattern) {
            existing.handler = route.handler;
        } else {
            routes.push(route);
        }
    }

    /// Resolves the context's request to a handler and runs it.
    ///
    /// Merges captured path parameters into the context before invoking
    /// the handler. Invokes at most one handler; on [`DispatchOutcome::NotFound`]
    /// none ran.
    pub async fn dispatch(&self, mut ctx: Context) -> DispatchOutcome {
        let Some(routes) = self.routes.get(&ctx.request.method) else {
            return DispatchOutcome::NotFound;
        };

        for route in routes {
            if let Some(params) = route.pattern.matches(&ctx.request.path) {
                ctx.params.merge(params);
                return DispatchOutcome::Handled((route.handler)(ctx).await);
            }
        }

        DispatchOutcome::NotFound
    }

    /// Adapts the finished router into a terminal pipeline handler.
    ///
    /// This is where the not-found outcome becomes a 404 response; the
    /// router itself only signals the outcome.
    pub fn into_handler(self) -> Handler {
        let router = Arc::new(self);
        Arc::new(move |ctx| {
            let router = Arc::clone(&router);
            Box::pin(async move {
                match router.dispatch(ctx).await {
                    DispatchOutcome::Handled(result) => result,
                    DispatchOutcome::NotFound => Ok(Response::not_found()),
                }
            })
        })
    }
}
