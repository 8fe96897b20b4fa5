//! Per-request state passed through the pipeline.

use std::collections::HashMap;

use crate::request::Request;

/// Parameters accumulated for one request.
///
/// Path captures land here at dispatch time; body-parsing middleware may
/// merge form or JSON fields into the same map earlier in the chain. The
/// map is last-writer-wins: a later insert under an existing key silently
/// replaces the value.
#[derive(Debug, Clone, Default)]
pub struct Params {
    params: HashMap<String, String>,
}

impl Params {
    /// Creates an empty parameter map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a parameter.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.params.insert(key.into(), value.into());
    }

    /// Gets a parameter value.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.params.get(key).map(String::as_str)
    }

    /// Parses a parameter as a specific type.
    pub fn parse<T: std::str::FromStr>(&self, key: &str) -> Option<T> {
        self.get(key).and_then(|v| v.parse().ok())
    }

    /// Merges another parameter map into this one, newest values winning.
    pub fn merge(&mut self, other: Self) {
        self.params.extend(other.params);
    }

    /// Returns the number of parameters.
    pub fn len(&self) -> usize {
        self.params.len()
    }

    /// Returns whether the map is empty.
    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    /// Returns an iterator over the parameters.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.params.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

/// Per-request context.
///
/// Created fresh for each incoming request and owned exclusively by that
/// request's task until a handler produces its response. Never shared
/// between requests.
#[derive(Debug, Clone)]
pub struct Context {
    /// Parameters captured from the path and merged by middleware.
    pub params: Params,
    /// The inbound request.
    pub request: Request,
}

impl Context {
    /// Creates a fresh context around an inbound request.
    pub fn new(request: Request) -> Self {
        Self {
            params: Params::new(),
            request,
        }
    }

    /// Looks up a parameter by name.
    pub fn param(&self, name: &str) -> Option<&str> {
        self.params.get(name)
    }
}
