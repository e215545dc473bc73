//! Request routing dispatch module
//!
//! Classifies each request path and dispatches to page, asset, or not-found
//! serving. Matching is by path alone: the HTTP method is recorded in the
//! access log but never consulted.

use std::convert::Infallible;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

use http_body_util::Full;
use hyper::body::{Body as _, Bytes};
use hyper::{Request, Response};

use crate::config::{AppState, SiteConfig};
use crate::handler::{resolve, static_files};
use crate::http::mime;
use crate::logger::{self, AccessLogEntry};

/// What the router decided to do with a request path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteKind {
    StaticPage,
    StaticAsset,
    NotFound,
}

/// Route decision derived once per request, immutable thereafter.
///
/// A present `resolved_path` always lies within the document root: it only
/// ever comes out of the traversal guard, and dispatch never touches the
/// file loader without one.
#[derive(Debug)]
pub struct RouteDecision {
    pub kind: RouteKind,
    pub resolved_path: Option<PathBuf>,
    pub content_type: &'static str,
}

impl RouteDecision {
    fn not_found() -> Self {
        Self {
            kind: RouteKind::NotFound,
            resolved_path: None,
            content_type: "text/plain",
        }
    }
}

/// Main entry point for HTTP request handling
pub async fn handle_request(
    req: Request<hyper::body::Incoming>,
    state: Arc<AppState>,
    peer_addr: std::net::SocketAddr,
) -> Result<Response<Full<Bytes>>, Infallible> {
    let started = Instant::now();
    let path = req.uri().path().to_string();

    // Stamp the entry before routing so the logged time is arrival time
    let mut entry = state.config.logging.access_log.then(|| {
        let mut entry = AccessLogEntry::new(
            peer_addr.ip().to_string(),
            req.method().to_string(),
            path.clone(),
        );
        entry.query = req.uri().query().map(ToString::to_string);
        entry.http_version = match req.version() {
            hyper::Version::HTTP_10 => "1.0".to_string(),
            hyper::Version::HTTP_2 => "2".to_string(),
            _ => "1.1".to_string(),
        };
        entry
    });

    let if_none_match = req
        .headers()
        .get("if-none-match")
        .and_then(|v| v.to_str().ok())
        .map(ToString::to_string);

    let response = route_request(&state, &path, if_none_match.as_deref()).await;

    if let Some(entry) = entry.as_mut() {
        entry.status = response.status().as_u16();
        entry.body_bytes = response.body().size_hint().exact().unwrap_or(0);
        entry.request_time_us =
            u64::try_from(started.elapsed().as_micros()).unwrap_or(u64::MAX);
        logger::log_access(entry, &state.config.logging.access_log_format);
    }

    Ok(response)
}

/// Route a request path and produce the response.
async fn route_request(
    state: &Arc<AppState>,
    path: &str,
    if_none_match: Option<&str>,
) -> Response<Full<Bytes>> {
    let site = &state.config.site;
    let decision = classify(site, path);

    match (decision.kind, decision.resolved_path) {
        (RouteKind::StaticPage, Some(resolved)) => {
            static_files::serve_page(site, &resolved).await
        }
        (RouteKind::StaticAsset, Some(resolved)) => {
            static_files::serve_asset(site, &resolved, decision.content_type, if_none_match).await
        }
        _ => static_files::serve_not_found(site).await,
    }
}

/// Classify a request path against the page table and asset rules.
pub fn classify(site: &SiteConfig, raw_path: &str) -> RouteDecision {
    let path = strip_query(raw_path);

    // 1. Named pages (exact match) take precedence
    if let Some(page_file) = site.pages.get(path) {
        return match resolve::resolve_under_root(site.root_path(), page_file) {
            Ok(resolved) => RouteDecision {
                kind: RouteKind::StaticPage,
                resolved_path: Some(resolved),
                content_type: "text/html",
            },
            Err(e) => {
                logger::log_warning(&format!("page file '{page_file}' rejected: {e}"));
                RouteDecision::not_found()
            }
        };
    }

    // 2. Static assets by prefix or extension
    if matches_asset_prefix(path, &site.asset_prefix) || mime::is_asset_extension(path) {
        return match resolve::resolve_under_root(site.root_path(), path) {
            Ok(resolved) => {
                let content_type = mime::content_type_for(&resolved);
                RouteDecision {
                    kind: RouteKind::StaticAsset,
                    resolved_path: Some(resolved),
                    content_type,
                }
            }
            Err(e) => {
                logger::log_warning(&format!("traversal attempt blocked: '{path}': {e}"));
                RouteDecision::not_found()
            }
        };
    }

    // 3. Everything else is a 404
    RouteDecision::not_found()
}

/// Drop the query string and fragment before matching.
fn strip_query(path: &str) -> &str {
    path.split(['?', '#']).next().unwrap_or(path)
}

/// Prefix match on a path-segment boundary, so `/stylesheets` is not a child
/// of `/styles`.
fn matches_asset_prefix(path: &str, prefix: &str) -> bool {
    let prefix = prefix.trim_end_matches('/');
    if prefix.is_empty() {
        return false;
    }
    path.strip_prefix(prefix)
        .is_some_and(|rest| rest.is_empty() || rest.starts_with('/'))
}
