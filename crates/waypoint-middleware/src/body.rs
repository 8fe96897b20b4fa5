//! Body-parsing middleware.
//!
//! Both parsers merge top-level fields of the request body into the
//! context's parameter map before calling downstream. Parse failures are
//! never fatal: the request proceeds with whatever parameters it already
//! had. Path captures are merged later, at dispatch, so an overlapping
//! key is ultimately won by the path capture.

use std::sync::Arc;

use serde_json::Value;
use waypoint_router::Handler;

use crate::chain::Middleware;

/// Merges URL-encoded form fields into the parameter map.
pub struct ParseForm;

impl Middleware for ParseForm {
    fn wrap(&self, next: Handler) -> Handler {
        Arc::new(move |mut ctx| {
            let next = Arc::clone(&next);
            Box::pin(async move {
                if let Some(form) = ctx.request.form() {
                    for (key, value) in form {
                        ctx.params.insert(key, value);
                    }
                }
                next(ctx).await
            })
        })
    }
}

/// Merges top-level keys of a JSON object body into the parameter map.
///
/// String values are taken verbatim; other scalars keep their JSON
/// rendering (`42`, `true`). Bodies that are not a JSON object contribute
/// nothing.
pub struct ParseJson;

impl Middleware for ParseJson {
    fn wrap(&self, next: Handler) -> Handler {
        Arc::new(move |mut ctx| {
            let next = Arc::clone(&next);
            Box::pin(async move {
                if !ctx.request.body.is_empty() {
                    if let Ok(Value::Object(fields)) =
                        serde_json::from_slice::<Value>(&ctx.request.body)
                    {
                        for (key, value) in fields {
                            let rendered = match value {
                                Value::String(s) => s,
                                other => other.to_string(),
                            };
                            ctx.params.insert(key, rendered);
                        }
                    }
                }
                next(ctx).await
            })
        })
    }
}
