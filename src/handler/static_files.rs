//! Static file serving module
//!
//! File loading, page and asset serving, and the not-found responder.

use std::io::ErrorKind;
use std::path::Path;

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::Response;
use tokio::fs;

use crate::config::SiteConfig;
use crate::handler::{resolve, LoadError};
use crate::http::{self, cache, mime};
use crate::logger;

/// Read a file as raw bytes (images and other binary assets).
pub async fn load_bytes(path: &Path) -> Result<Vec<u8>, LoadError> {
    Ok(fs::read(path).await?)
}

/// Read a file as UTF-8 text (HTML pages).
pub async fn load_text(path: &Path) -> Result<String, LoadError> {
    Ok(fs::read_to_string(path).await?)
}

/// Serve a named page from its pre-resolved path.
pub async fn serve_page(site: &SiteConfig, path: &Path) -> Response<Full<Bytes>> {
    match load_text(path).await {
        Ok(html) => http::build_page_response(html),
        Err(e) => {
            logger::log_error(&format!("page '{}' unavailable: {e}", path.display()));
            serve_not_found(site).await
        }
    }
}

/// Serve a static asset from its pre-resolved path.
///
/// A matching `If-None-Match` short-circuits to 304 before any body is built.
pub async fn serve_asset(
    site: &SiteConfig,
    path: &Path,
    content_type: &str,
    if_none_match: Option<&str>,
) -> Response<Full<Bytes>> {
    match load_bytes(path).await {
        Ok(data) => {
            let etag = cache::generate_etag(&data);
            if cache::check_etag_match(if_none_match, &etag) {
                return http::build_304_response(&etag, site.asset_cache_max_age);
            }
            http::build_asset_response(data, content_type, &etag, site.asset_cache_max_age)
        }
        Err(e) => {
            // A missing asset is an ordinary 404; anything else is worth a log line
            if !matches!(&e, LoadError::Read(io) if io.kind() == ErrorKind::NotFound) {
                logger::log_error(&format!("asset '{}' unavailable: {e}", path.display()));
            }
            serve_not_found(site).await
        }
    }
}

/// Respond 404 with the custom not-found page, or the static fallback when
/// that page is itself missing or unreadable.
///
/// The fallback arm uses only const strings and the infallible builder; this
/// is the terminal error path and cannot fail.
pub async fn serve_not_found(site: &SiteConfig) -> Response<Full<Bytes>> {
    if let Ok(path) = resolve::resolve_under_root(site.root_path(), &site.not_found_page) {
        if let Ok(html) = load_text(&path).await {
            return http::build_not_found_page(html);
        }
    }
    http::build_not_found_fallback()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn temp_site(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "pageserve-static-{}-{name}",
            std::process::id()
        ));
        let _ = std::fs::remove_dir_all(&dir);
        std::fs::create_dir_all(dir.join("pages")).unwrap();
        std::fs::create_dir_all(dir.join("styles")).unwrap();
        dir
    }

    fn site_config(root: &Path) -> SiteConfig {
        SiteConfig {
            root: root.display().to_string(),
            ..SiteConfig::default()
        }
    }

    #[tokio::test]
    async fn test_load_text_reads_file() {
        let root = temp_site("load-text");
        std::fs::write(root.join("pages/home.html"), "<h1>Home</h1>").unwrap();

        let content = load_text(&root.join("pages/home.html")).await.unwrap();
        assert_eq!(content, "<h1>Home</h1>");
    }

    #[tokio::test]
    async fn test_load_bytes_missing_file_is_read_error() {
        let root = temp_site("load-missing");
        let err = load_bytes(&root.join("styles/nope.css")).await.unwrap_err();
        assert!(matches!(err, LoadError::Read(_)));
    }

    #[tokio::test]
    async fn test_serve_asset_twice_is_byte_identical() {
        use http_body_util::BodyExt;

        let root = temp_site("idempotent");
        std::fs::write(root.join("styles/style.css"), "body { margin: 0 }").unwrap();
        let site = site_config(&root);
        let path = root.join("styles/style.css");

        let first = serve_asset(&site, &path, "text/css", None).await;
        let second = serve_asset(&site, &path, "text/css", None).await;
        assert_eq!(
            first.headers()["etag"].to_str().unwrap(),
            second.headers()["etag"].to_str().unwrap()
        );

        let a = first.into_body().collect().await.unwrap().to_bytes();
        let b = second.into_body().collect().await.unwrap().to_bytes();
        assert_eq!(a, b);
        assert_eq!(a, Bytes::from("body { margin: 0 }"));
    }

    #[tokio::test]
    async fn test_serve_asset_conditional_304() {
        let root = temp_site("conditional");
        std::fs::write(root.join("styles/style.css"), "body { margin: 0 }").unwrap();
        let site = site_config(&root);
        let path = root.join("styles/style.css");

        let full = serve_asset(&site, &path, "text/css", None).await;
        let etag = full.headers()["etag"].to_str().unwrap().to_string();

        let not_modified = serve_asset(&site, &path, "text/css", Some(&etag)).await;
        assert_eq!(not_modified.status(), 304);
    }

    #[tokio::test]
    async fn test_not_found_uses_custom_page_when_present() {
        use http_body_util::BodyExt;

        let root = temp_site("custom-404");
        std::fs::write(root.join("pages/404.html"), "<h1>Lost?</h1>").unwrap();
        let site = site_config(&root);

        let resp = serve_not_found(&site).await;
        assert_eq!(resp.status(), 404);
        assert_eq!(resp.headers()["content-type"], "text/html");
        let body = resp.into_body().collect().await.unwrap().to_bytes();
        assert_eq!(body, Bytes::from("<h1>Lost?</h1>"));
    }

    #[tokio::test]
    async fn test_not_found_falls_back_when_page_missing() {
        use http_body_util::BodyExt;

        let root = temp_site("fallback-404");
        let site = site_config(&root);

        let resp = serve_not_found(&site).await;
        assert_eq!(resp.status(), 404);
        assert_eq!(resp.headers()["content-type"], "text/plain");
        let body = resp.into_body().collect().await.unwrap().to_bytes();
        let body = std::str::from_utf8(&body).unwrap();
        assert!(!body.is_empty());
        for route in ["/home", "/about", "/services", "/contact"] {
            assert!(body.contains(route), "fallback should list {route}");
        }
    }
}
