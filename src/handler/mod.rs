//! Request handler module
//!
//! Routing dispatch, path resolution, and static file serving.

pub mod resolve;
pub mod router;
pub mod static_files;

// Re-export main entry point
pub use router::handle_request;

use std::fmt;
use std::io;

/// Why a file could not be produced for a request.
///
/// Both variants collapse to the same generic 404 for the client; the
/// distinction exists only for server-side logging.
#[derive(Debug)]
pub enum LoadError {
    /// The request path resolved outside the document root
    PathEscape,
    /// The file could not be read (missing, unreadable, is a directory)
    Read(io::Error),
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PathEscape => write!(f, "path escapes document root"),
            Self::Read(e) => write!(f, "file read failed: {e}"),
        }
    }
}

impl std::error::Error for LoadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::PathEscape => None,
            Self::Read(e) => Some(e),
        }
    }
}

impl From<io::Error> for LoadError {
    fn from(e: io::Error) -> Self {
        Self::Read(e)
    }
}
