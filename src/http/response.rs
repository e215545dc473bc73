//! HTTP response building module
//!
//! Builders for every response shape the server emits, decoupled from routing
//! and file loading. All header values produced here are statically known, so
//! the builders degrade to a bare response instead of erroring; the plain-text
//! 404 fallback in particular is the terminal error path and must not be able
//! to fail.

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::Response;

use crate::http::cache::CachePolicy;

/// Fixed body for the terminal 404 path, used when the custom not-found page
/// itself cannot be read.
pub const NOT_FOUND_FALLBACK: &str = "404 Not Found\n\nValid routes:\n  /home     - Home page\n  /about    - About page\n  /services - Services page\n  /contact  - Contact page\n";

/// Build a 200 response for a named page.
///
/// Pages are re-read on every request, so clients are told not to cache them.
pub fn build_page_response(html: String) -> Response<Full<Bytes>> {
    let content_length = html.len();
    Response::builder()
        .status(200)
        .header("Content-Type", "text/html")
        .header("Content-Length", content_length)
        .header("Cache-Control", CachePolicy::NoCache.to_header_value())
        .body(Full::new(Bytes::from(html)))
        .unwrap_or_else(|e| {
            log_build_error("200 page", &e);
            Response::new(Full::new(Bytes::new()))
        })
}

/// Build a 200 response for a static asset with cache-friendly headers.
pub fn build_asset_response(
    data: Vec<u8>,
    content_type: &str,
    etag: &str,
    max_age: u32,
) -> Response<Full<Bytes>> {
    let content_length = data.len();
    Response::builder()
        .status(200)
        .header("Content-Type", content_type)
        .header("Content-Length", content_length)
        .header("ETag", etag)
        .header("Cache-Control", CachePolicy::Public(max_age).to_header_value())
        .body(Full::new(Bytes::from(data)))
        .unwrap_or_else(|e| {
            log_build_error("200 asset", &e);
            Response::new(Full::new(Bytes::new()))
        })
}

/// Build a 304 Not Modified response for a matching `If-None-Match`.
pub fn build_304_response(etag: &str, max_age: u32) -> Response<Full<Bytes>> {
    Response::builder()
        .status(304)
        .header("ETag", etag)
        .header("Cache-Control", CachePolicy::Public(max_age).to_header_value())
        .body(Full::new(Bytes::new()))
        .unwrap_or_else(|e| {
            log_build_error("304", &e);
            Response::new(Full::new(Bytes::new()))
        })
}

/// Build a 404 response carrying the custom not-found page.
pub fn build_not_found_page(html: String) -> Response<Full<Bytes>> {
    let content_length = html.len();
    Response::builder()
        .status(404)
        .header("Content-Type", "text/html")
        .header("Content-Length", content_length)
        .header("Cache-Control", CachePolicy::NoCache.to_header_value())
        .body(Full::new(Bytes::from(html)))
        .unwrap_or_else(|e| {
            log_build_error("404 page", &e);
            Response::new(Full::new(Bytes::from(NOT_FOUND_FALLBACK)))
        })
}

/// Build the plain-text 404 fallback listing the known routes.
///
/// Static strings only: this builder backs every other failure path and has
/// no failure mode of its own.
pub fn build_not_found_fallback() -> Response<Full<Bytes>> {
    Response::builder()
        .status(404)
        .header("Content-Type", "text/plain")
        .header("Content-Length", NOT_FOUND_FALLBACK.len())
        .body(Full::new(Bytes::from(NOT_FOUND_FALLBACK)))
        .unwrap_or_else(|e| {
            log_build_error("404 fallback", &e);
            Response::new(Full::new(Bytes::from(NOT_FOUND_FALLBACK)))
        })
}

/// Log response build error
fn log_build_error(status: &str, error: &hyper::http::Error) {
    crate::logger::log_error(&format!("Failed to build {status} response: {error}"));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_response_headers() {
        let resp = build_page_response("<h1>hi</h1>".to_string());
        assert_eq!(resp.status(), 200);
        assert_eq!(resp.headers()["content-type"], "text/html");
        assert_eq!(resp.headers()["cache-control"], "no-cache");
        assert_eq!(resp.headers()["content-length"], "11");
    }

    #[test]
    fn test_asset_response_headers() {
        let resp = build_asset_response(vec![1, 2, 3], "image/png", "\"abc\"", 3600);
        assert_eq!(resp.status(), 200);
        assert_eq!(resp.headers()["content-type"], "image/png");
        assert_eq!(resp.headers()["cache-control"], "public, max-age=3600");
        assert_eq!(resp.headers()["etag"], "\"abc\"");
    }

    #[test]
    fn test_not_modified_response() {
        let resp = build_304_response("\"abc\"", 3600);
        assert_eq!(resp.status(), 304);
        assert_eq!(resp.headers()["etag"], "\"abc\"");
    }

    #[test]
    fn test_fallback_lists_routes() {
        let resp = build_not_found_fallback();
        assert_eq!(resp.status(), 404);
        assert_eq!(resp.headers()["content-type"], "text/plain");
        for route in ["/home", "/about", "/services", "/contact"] {
            assert!(NOT_FOUND_FALLBACK.contains(route));
        }
    }
}
