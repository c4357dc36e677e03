//! Static asset serving
//!
//! Resolves request paths against the document root, refuses anything that
//! would escape it and derives the content type from the file extension.

use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use std::path::{Component, Path, PathBuf};

/// Content type by extension; unmapped extensions fall back to text/plain
pub fn mime_type(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or_default()
        .to_ascii_lowercase();
    match ext.as_str() {
        "html" => "text/html",
        "css" => "text/css",
        "js" => "application/javascript",
        "json" => "application/json",
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "svg" => "image/svg+xml",
        _ => "text/plain",
    }
}

/// Map a request path onto the document root. `/` becomes `index.html`;
/// None means the path tried to escape the root.
pub fn resolve(root: &Path, request_path: &str) -> Option<PathBuf> {
    let relative = request_path.trim_start_matches('/');
    let relative = if relative.is_empty() {
        "index.html"
    } else {
        relative
    };

    let candidate = Path::new(relative);
    for component in candidate.components() {
        match component {
            Component::Normal(_) => {}
            _ => return None,
        }
    }
    Some(root.join(candidate))
}

/// Serve one GET request for a static asset
pub async fn serve(root: &Path, request_path: &str) -> Response {
    let Some(path) = resolve(root, request_path) else {
        return (StatusCode::FORBIDDEN, "Forbidden").into_response();
    };

    match tokio::fs::read(&path).await {
        Ok(data) => {
            let mime = mime_type(&path);
            ([(header::CONTENT_TYPE, mime)], data).into_response()
        }
        Err(_) => (StatusCode::NOT_FOUND, "Not found").into_response(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mime_lookup() {
        assert_eq!(mime_type(Path::new("index.html")), "text/html");
        assert_eq!(mime_type(Path::new("style.css")), "text/css");
        assert_eq!(mime_type(Path::new("script.js")), "application/javascript");
        assert_eq!(mime_type(Path::new("logo.PNG")), "image/png");
        assert_eq!(mime_type(Path::new("photo.jpeg")), "image/jpeg");
    }

    #[test]
    fn test_unmapped_extension_defaults_to_text() {
        assert_eq!(mime_type(Path::new("archive.tar.xz")), "text/plain");
        assert_eq!(mime_type(Path::new("LICENSE")), "text/plain");
    }

    #[test]
    fn test_root_path_serves_index() {
        let resolved = resolve(Path::new("docs"), "/").unwrap();
        assert_eq!(resolved, PathBuf::from("docs/index.html"));
    }

    #[test]
    fn test_normal_path_resolves_under_root() {
        let resolved = resolve(Path::new("docs"), "/css/site.css").unwrap();
        assert_eq!(resolved, PathBuf::from("docs/css/site.css"));
    }

    #[test]
    fn test_traversal_is_rejected() {
        assert!(resolve(Path::new("docs"), "/../secret.txt").is_none());
        assert!(resolve(Path::new("docs"), "/css/../../secret.txt").is_none());
    }

    #[tokio::test]
    async fn test_missing_file_is_not_found() {
        let dir = tempfile::TempDir::new().unwrap();
        let response = serve(dir.path(), "/nope.html").await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_existing_file_is_served_with_content_type() {
        let dir = tempfile::TempDir::new().unwrap();
        std::fs::write(dir.path().join("index.html"), "<html></html>").unwrap();

        let response = serve(dir.path(), "/").await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers().get(header::CONTENT_TYPE).unwrap(),
            "text/html"
        );
    }
}
