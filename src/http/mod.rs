//! HTTP protocol layer module
//!
//! Response construction, MIME lookup, and cache headers, decoupled from
//! routing and file loading.

pub mod cache;
pub mod mime;
pub mod response;

// Re-export commonly used builders
pub use response::{
    build_304_response, build_asset_response, build_not_found_fallback, build_not_found_page,
    build_page_response,
};
