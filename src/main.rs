use std::process::ExitCode;
use std::sync::Arc;

use wasm_devserver::config::Config;
use wasm_devserver::{logger, server};

fn main() -> ExitCode {
    let cfg = match Config::from_args(std::env::args().skip(1)) {
        Ok(cfg) => cfg,
        Err(e) => {
            logger::log_error(&e.to_string());
            eprintln!("Usage: wasm-devserver [PORT]");
            return ExitCode::from(2);
        }
    };

    let runtime = match tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(e) => {
            logger::log_error(&format!("Failed to start runtime: {e}"));
            return ExitCode::FAILURE;
        }
    };

    match runtime.block_on(async_main(cfg)) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            logger::log_error(&e.to_string());
            ExitCode::FAILURE
        }
    }
}

async fn async_main(cfg: Config) -> Result<(), Box<dyn std::error::Error>> {
    let addr = cfg.get_socket_addr()?;

    let shutdown = Arc::new(server::Shutdown::new());
    server::start_signal_handler(Arc::clone(&shutdown))?;

    let listener =
        server::create_listener(addr).map_err(|e| format!("Failed to bind {addr}: {e}"))?;
    let local_addr = listener.local_addr()?;

    if !cfg.server.root.is_dir() {
        logger::log_warning(&format!(
            "Root directory not found or inaccessible: {}",
            cfg.server.root.display()
        ));
    }
    logger::log_server_start(&local_addr, &cfg);

    server::start_server_loop(listener, Arc::new(cfg), shutdown).await;

    logger::log_server_stopped();
    Ok(())
}
