//! Path pattern matching.

use crate::context::Params;

/// A segment in a route pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    /// A literal segment that must compare equal to the path segment.
    Literal(String),
    /// A named capture segment (e.g. `:id`).
    Param(String),
}

/// A parsed route pattern.
///
/// Patterns are `/`-delimited segment sequences; a segment starting with
/// `:` captures the corresponding path segment under the remainder of its
/// name, any other segment must match literally. Splitting keeps empty
/// segments, so leading, trailing and doubled slashes are significant:
/// `/users` does not match `/users/`.
#[derive(Debug, Clone)]
pub struct RoutePattern {
    pattern: String,
    segments: Vec<Segment>,
}

impl RoutePattern {
    /// Parses a pattern string.
    ///
    /// # Example
    ///
    /// ```
    /// use waypoint_router::RoutePattern;
    ///
    /// let pattern = RoutePattern::new("/users/:id");
    /// let params = pattern.matches("/users/42").unwrap();
    /// assert_eq!(params.get("id"), Some("42"));
    /// ```
    pub fn new(pattern: &str) -> Self {
        let segments = pattern
            .split('/')
            .map(|part| match part.strip_prefix(':') {
                Some(name) => Segment::Param(name.to_string()),
                None => Segment::Literal(part.to_string()),
            })
            .collect();

        Self {
            pattern: pattern.to_string(),
            segments,
        }
    }

    /// Attempts to match a path against this pattern.
    ///
    /// Returns the captured parameters on a match, `None` otherwise. This
    /// is a pure function: case-sensitive literal comparison, no
    /// normalization or decoding, no I/O. Duplicate capture names are
    /// legal; the last occurrence wins.
    pub fn matches(&self, path: &str) -> Option<Params> {
        if self.pattern == path {
            return Some(Params::new());
        }

        let parts: Vec<&str> = path.split('/').collect();
        if parts.len() != self.segments.len() {
            return None;
        }

        let mut params = Params::new();
        for (segment, part) in self.segments.iter().zip(&parts) {
            match segment {
                Segment::Literal(literal) if literal == part => {}
                Segment::Literal(_) => return None,
                Segment::Param(name) => params.insert(name.clone(), *part),
            }
        }

        Some(params)
    }

    /// Returns the original pattern string.
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// Returns the parsed segments.
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }
}
