// Connection handling module
// Serves a single accepted TCP connection

use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper_util::rt::TokioIo;
use std::sync::Arc;

use crate::config::Config;
use crate::handler;
use crate::logger;

/// Handle a single connection in a spawned task.
///
/// This function:
/// 1. Wraps the TCP stream in `TokioIo`
/// 2. Serves HTTP/1.1 with keep-alive, one request at a time
/// 3. Logs connection-level errors (malformed requests, resets)
///
/// A failing connection never affects the accept loop or other connections.
///
/// # Arguments
///
/// * `stream` - The TCP stream to handle
/// * `peer_addr` - The peer's socket address, for the request echo
/// * `config` - Shared immutable configuration
pub fn handle_connection(
    stream: tokio::net::TcpStream,
    peer_addr: std::net::SocketAddr,
    config: Arc<Config>,
) {
    tokio::spawn(async move {
        let io = TokioIo::new(stream);

        let mut builder = http1::Builder::new();
        builder.keep_alive(true);

        // Requests hyper rejects before the service runs (e.g. a malformed
        // request line gets 400) never pass through the header decorator.
        let conn = builder.serve_connection(
            io,
            service_fn(move |req| handler::handle_request(req, Arc::clone(&config), peer_addr)),
        );

        if let Err(err) = conn.await {
            if !err.is_incomplete_message() {
                logger::log_connection_error(&err);
            }
        }
    });
}
