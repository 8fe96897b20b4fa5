//! Static-file fallback middleware.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use waypoint_router::{Handler, Method, Response};

use crate::chain::Middleware;

/// Serves files under a root directory for GET/HEAD requests, falling
/// through to the next middleware whenever resolution fails.
///
/// A URL path naming a directory requires a trailing slash (302 redirect
/// when absent) and serves the configured index filename inside it. Any
/// miss — unknown path, unreadable file, missing index — falls through
/// instead of producing an error response.
pub struct StaticFiles {
    root: PathBuf,
    index_file: String,
}

impl StaticFiles {
    /// Creates the middleware over a root directory, serving `index.html`
    /// inside directories.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            index_file: "index.html".to_string(),
        }
    }

    /// Overrides the index filename served for directory paths.
    #[must_use]
    pub fn index_file(mut self, name: impl Into<String>) -> Self {
        self.index_file = name.into();
        self
    }
}

impl Middleware for StaticFiles {
    fn wrap(&self, next: Handler) -> Handler {
        let root = self.root.clone();
        let index_file = self.index_file.clone();

        Arc::new(move |ctx| {
            let next = Arc::clone(&next);
            let root = root.clone();
            let index_file = index_file.clone();

            Box::pin(async move {
                if ctx.request.method != Method::Get && ctx.request.method != Method::Head {
                    return next(ctx).await;
                }

                let Some(mut file_path) = resolve(&root, &ctx.request.path) else {
                    return next(ctx).await;
                };

                let Ok(metadata) = tokio::fs::metadata(&file_path).await else {
                    return next(ctx).await;
                };

                if metadata.is_dir() {
                    if !ctx.request.path.ends_with('/') {
                        return Ok(Response::redirect(format!("{}/", ctx.request.path)));
                    }

                    file_path = file_path.join(&index_file);
                    match tokio::fs::metadata(&file_path).await {
                        Ok(meta) if meta.is_file() => {}
                        _ => return next(ctx).await,
                    }
                }

                match tokio::fs::read(&file_path).await {
                    Ok(contents) => {
                        let mut response =
                            Response::ok().header("Content-Type", content_type(&file_path));
                        if ctx.request.method == Method::Get {
                            response = response.body(contents);
                        }
                        Ok(response)
                    }
                    Err(_) => next(ctx).await,
                }
            })
        })
    }
}

/// Maps a URL path onto the root directory.
///
/// `..` components are rejected outright so a request can never escape
/// the root.
fn resolve(root: &Path, url_path: &str) -> Option<PathBuf> {
    let mut path = root.to_path_buf();
    for part in url_path.split('/') {
        match part {
            "" | "." => continue,
            ".." => return None,
            part => path.push(part),
        }
    }
    Some(path)
}

fn content_type(path: &Path) -> &'static str {
    match path.extension().and_then(|e| e.to_str()) {
        Some("html") => "text/html; charset=utf-8",
        Some("css") => "text/css",
        Some("js") => "text/javascript",
        Some("json") => "application/json",
        Some("txt") => "text/plain; charset=utf-8",
        Some("png") => "image/png",
        Some("jpg" | "jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("svg") => "image/svg+xml",
        Some("ico") => "image/x-icon",
        _ => "application/octet-stream",
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;
    use waypoint_router::{into_handler, Context, Request};

    use super::*;

    fn fixture_tree() -> TempDir {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("hello.txt"), "hello from disk").unwrap();
        fs::create_dir(dir.path().join("docs")).unwrap();
        fs::write(dir.path().join("docs/index.html"), "<h1>docs</h1>").unwrap();
        fs::create_dir(dir.path().join("empty")).unwrap();
        dir
    }

    fn pipeline(root: &Path) -> Handler {
        StaticFiles::new(root).wrap(into_handler(|_ctx: Context| async {
            Ok(Response::text("fell through"))
        }))
    }

    #[tokio::test]
    async fn test_serves_existing_file() {
        let dir = fixture_tree();
        let handler = pipeline(dir.path());

        let res = handler(Context::new(Request::get("/hello.txt"))).await.unwrap();
        assert_eq!(res.status, 200);
        assert_eq!(res.body_string(), Some("hello from disk".to_string()));
        assert_eq!(
            res.headers.get("Content-Type"),
            Some(&"text/plain; charset=utf-8".to_string())
        );
    }

    #[tokio::test]
    async fn test_head_serves_headers_only() {
        let dir = fixture_tree();
        let handler = pipeline(dir.path());

        let res = handler(Context::new(Request::head("/hello.txt"))).await.unwrap();
        assert_eq!(res.status, 200);
        assert!(res.body.is_empty());
        assert!(res.headers.contains_key("Content-Type"));
    }

    #[tokio::test]
    async fn test_directory_without_slash_redirects() {
        let dir = fixture_tree();
        let handler = pipeline(dir.path());

        let res = handler(Context::new(Request::get("/docs"))).await.unwrap();
        assert_eq!(res.status, 302);
        assert_eq!(res.headers.get("Location"), Some(&"/docs/".to_string()));
    }

    #[tokio::test]
    async fn test_directory_serves_index() {
        let dir = fixture_tree();
        let handler = pipeline(dir.path());

        let res = handler(Context::new(Request::get("/docs/"))).await.unwrap();
        assert_eq!(res.status, 200);
        assert_eq!(res.body_string(), Some("<h1>docs</h1>".to_string()));
        assert_eq!(
            res.headers.get("Content-Type"),
            Some(&"text/html; charset=utf-8".to_string())
        );
    }

    #[tokio::test]
    async fn test_missing_index_falls_through() {
        let dir = fixture_tree();
        let handler = pipeline(dir.path());

        let res = handler(Context::new(Request::get("/empty/"))).await.unwrap();
        assert_eq!(res.body_string(), Some("fell through".to_string()));
    }

    #[tokio::test]
    async fn test_unknown_path_falls_through() {
        let dir = fixture_tree();
        let handler = pipeline(dir.path());

        let res = handler(Context::new(Request::get("/nope.txt"))).await.unwrap();
        assert_eq!(res.body_string(), Some("fell through".to_string()));
    }

    #[tokio::test]
    async fn test_non_get_falls_through() {
        let dir = fixture_tree();
        let handler = pipeline(dir.path());

        let res = handler(Context::new(Request::post("/hello.txt"))).await.unwrap();
        assert_eq!(res.body_string(), Some("fell through".to_string()));
    }

    #[tokio::test]
    async fn test_traversal_never_escapes_root() {
        let dir = fixture_tree();
        let handler = pipeline(dir.path());

        let res = handler(Context::new(Request::get("/../hello.txt"))).await.unwrap();
        assert_eq!(res.body_string(), Some("fell through".to_string()));
    }

    #[test]
    fn test_resolve_rejects_parent_components() {
        assert!(resolve(Path::new("/srv"), "/a/../b").is_none());
        assert_eq!(
            resolve(Path::new("/srv"), "/a/b.txt"),
            Some(PathBuf::from("/srv/a/b.txt"))
        );
    }
}
