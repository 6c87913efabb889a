mod cli;
mod logging;
mod routes;

pub use cli::ServeOptions;
pub use routes::router;

use crate::directory::Directory;
use crate::prelude::{eprintln, *};

pub async fn run(options: ServeOptions, global: crate::Global) -> Result<()> {
    if global.verbose {
        eprintln!(
            "Starting phonebook on {}:{} with {:?} storage...",
            options.host, options.port, options.store
        );
    }

    let store = crate::store::open(options.store, &options.database, !options.no_seed)?;
    let directory = Directory::new(store);

    let addr = format!("{}:{}", options.host, options.port);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| eyre!("Failed to bind to {}: {}", addr, e))?;

    if global.verbose {
        eprintln!("Persons endpoint: http://{}/api/persons", addr);
        eprintln!("Info endpoint: http://{}/api/info", addr);
    }

    log::info!("Server running on port {}", options.port);

    axum::serve(listener, router(directory))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| eyre!("Server error: {e}"))?;

    log::info!("Server stopped");

    Ok(())
}

/// Resolves on Ctrl-C, or on SIGTERM on Unix. A signal whose handler cannot
/// be installed is logged and never fires.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            log::error!("Failed to listen for Ctrl-C: {e}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};

        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                log::error!("Failed to listen for SIGTERM: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {}
        _ = terminate => {}
    }

    log::info!("Shutting down");
}
