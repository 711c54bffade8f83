// Server loop module
// Accepts connections until the shutdown signal fires

use std::sync::Arc;
use tokio::net::TcpListener;

use super::connection::handle_connection;
use super::signal::Shutdown;
use crate::config::Config;
use crate::logger;

/// Accept connections on `listener` until `shutdown` is triggered.
///
/// The shutdown signal is checked between iterations and raced against
/// `accept()`, so a pending accept never delays shutdown. The listener is
/// dropped (socket closed) before this returns; connections already being
/// served keep running on their own tasks.
pub async fn start_server_loop(
    listener: TcpListener,
    config: Arc<Config>,
    shutdown: Arc<Shutdown>,
) {
    while !shutdown.is_requested() {
        tokio::select! {
            accept_result = listener.accept() => {
                match accept_result {
                    Ok((stream, peer_addr)) => {
                        handle_connection(stream, peer_addr, Arc::clone(&config));
                    }
                    Err(e) => {
                        logger::log_error(&format!("Failed to accept connection: {e}"));
                    }
                }
            }

            () = shutdown.wait() => break,
        }
    }

    drop(listener);
}
