//! Local development file server for WebAssembly applications.
//!
//! Serves a directory over HTTP/1.1 with `application/wasm` /
//! `application/javascript` content types and the cross-origin isolation
//! headers (COEP/COOP) needed for `SharedArrayBuffer`.

pub mod config;
pub mod handler;
pub mod http;
pub mod logger;
pub mod server;

#[cfg(test)]
mod test_support;
