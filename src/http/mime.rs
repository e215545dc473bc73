//! MIME type detection module
//!
//! Returns the Content-Type for a servable file based on its extension.

use std::path::Path;

/// Extensions the router recognizes as static assets.
pub const ASSET_EXTENSIONS: &[&str] = &["css", "js", "png", "jpg", "jpeg", "gif", "ico"];

/// Get the MIME Content-Type for a file path.
///
/// The table covers exactly the asset types this site ships (stylesheets,
/// scripts, images). Anything else, including paths without an extension,
/// falls back to `text/plain`.
pub fn content_type_for(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);

    match ext.as_deref() {
        Some("css") => "text/css",
        Some("js") => "application/javascript",
        Some("png") => "image/png",
        Some("jpg" | "jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("ico") => "image/x-icon",
        _ => "text/plain",
    }
}

/// Whether the path's extension marks it as a static asset.
pub fn is_asset_extension(path: &str) -> bool {
    Path::new(path)
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| {
            let ext = ext.to_ascii_lowercase();
            ASSET_EXTENSIONS.contains(&ext.as_str())
        })
}
