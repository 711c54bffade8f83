//! Cross-origin isolation header decorator
//!
//! `SharedArrayBuffer` (and with it threaded WebAssembly) is only exposed to
//! pages that are cross-origin isolated, which requires COEP + COOP on every
//! document and subresource. The CORS trio lets other local origins fetch
//! the same files.

use hyper::header::{HeaderMap, HeaderName, HeaderValue};

/// Headers injected into every response, in emission order
pub const ISOLATION_HEADERS: [(&str, &str); 5] = [
    ("cross-origin-embedder-policy", "require-corp"),
    ("cross-origin-opener-policy", "same-origin"),
    ("access-control-allow-origin", "*"),
    ("access-control-allow-methods", "GET, POST, OPTIONS"),
    ("access-control-allow-headers", "Content-Type"),
];

/// Insert the fixed headers, replacing any value already present
pub fn apply_isolation_headers(headers: &mut HeaderMap) {
    for (name, value) in ISOLATION_HEADERS {
        headers.insert(
            HeaderName::from_static(name),
            HeaderValue::from_static(value),
        );
    }
}
