//! Path resolution and traversal guard
//!
//! Maps raw request paths onto the document root. Resolution is lexical:
//! empty and `.` segments are dropped, `..` pops the previous segment, and
//! popping past the root fails. The result is assembled from accepted
//! segments only, so it cannot name anything outside the root — prefix
//! confusion between siblings like `/root` and `/rootevil` never arises.

use std::path::{Path, PathBuf};

use crate::handler::LoadError;

/// Resolve a raw request path to a filesystem path beneath `root`.
///
/// Fails with `LoadError::PathEscape` when the path tries to climb out of
/// the root or smuggles a NUL byte. Callers must treat that failure exactly
/// like a missing file.
pub fn resolve_under_root(root: &Path, raw_path: &str) -> Result<PathBuf, LoadError> {
    let mut segments: Vec<&str> = Vec::new();

    for segment in raw_path.trim_start_matches('/').split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                if segments.pop().is_none() {
                    return Err(LoadError::PathEscape);
                }
            }
            seg if seg.contains('\0') => return Err(LoadError::PathEscape),
            seg => segments.push(seg),
        }
    }

    let mut resolved = root.to_path_buf();
    for segment in segments {
        resolved.push(segment);
    }
    Ok(resolved)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_paths_resolve() {
        let root = Path::new("/srv/site");
        assert_eq!(
            resolve_under_root(root, "/pages/home.html").unwrap(),
            root.join("pages/home.html")
        );
        assert_eq!(
            resolve_under_root(root, "styles/style.css").unwrap(),
            root.join("styles/style.css")
        );
    }

    #[test]
    fn test_dot_and_empty_segments_collapse() {
        let root = Path::new("/srv/site");
        assert_eq!(
            resolve_under_root(root, "/./pages//home.html").unwrap(),
            root.join("pages/home.html")
        );
        assert_eq!(resolve_under_root(root, "").unwrap(), root.to_path_buf());
        assert_eq!(resolve_under_root(root, "/").unwrap(), root.to_path_buf());
    }

    #[test]
    fn test_interior_parent_segments_pop() {
        let root = Path::new("/srv/site");
        assert_eq!(
            resolve_under_root(root, "/pages/../styles/style.css").unwrap(),
            root.join("styles/style.css")
        );
    }

    #[test]
    fn test_traversal_above_root_fails() {
        let root = Path::new("/srv/site");
        assert!(resolve_under_root(root, "/../../etc/passwd").is_err());
        assert!(resolve_under_root(root, "/..").is_err());
        assert!(resolve_under_root(root, "/pages/../../etc/passwd").is_err());
        assert!(resolve_under_root(root, "/./../secret").is_err());
    }

    #[test]
    fn test_nul_byte_rejected() {
        let root = Path::new("/srv/site");
        assert!(resolve_under_root(root, "/pages/\0home.html").is_err());
    }

    #[test]
    fn test_containment_property() {
        let root = Path::new("/srv/site");
        let attempts = [
            "/../../etc/passwd",
            "//etc/passwd",
            "/styles/../../../etc/shadow",
            "/a/b/../../../x",
            "/%2e%2e/%2e%2e/etc/passwd",
            "/..%2f..%2fetc/passwd",
            "/pages/./../styles/app.css",
        ];
        for raw in attempts {
            match resolve_under_root(root, raw) {
                Ok(resolved) => assert!(
                    resolved.starts_with(root),
                    "{raw} escaped to {}",
                    resolved.display()
                ),
                Err(LoadError::PathEscape) => {}
                Err(e) => panic!("unexpected error for {raw}: {e}"),
            }
        }
    }
}
