//! HTTP protocol layer module
//!
//! Provides HTTP protocol-related base functionality, decoupled from file system access.

pub mod cache;
pub mod headers;
pub mod mime;
pub mod response;

// Re-export commonly used items
pub use headers::apply_isolation_headers;
pub use response::{
    build_304_response, build_404_response, build_error_response, build_file_response,
    build_html_response, build_redirect_response,
};
