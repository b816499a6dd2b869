//! Server lifecycle
//!
//! Serves until a shutdown future resolves, then gives in-flight turns a
//! bounded time to finish before the connections are abandoned.

use std::{future::Future, io, sync::Arc, time::Duration};

use axum::Router;
use tokio::{net::TcpListener, sync::Notify};
use tracing::{info, warn};

/// How the server stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShutdownOutcome {
    /// Every in-flight request finished before the drain timeout
    Drained,
    /// The drain timeout elapsed with requests still running
    TimedOut,
}

/// Serve `router` on `listener` until `shutdown` resolves
///
/// After the signal no new connections are accepted and in-flight requests
/// get `drain_timeout` to complete.
///
/// # Errors
/// Returns an error if accepting connections fails.
pub async fn serve<F>(
    listener: TcpListener,
    router: Router,
    shutdown: F,
    drain_timeout: Duration,
) -> io::Result<ShutdownOutcome>
where
    F: Future<Output = ()> + Send + 'static,
{
    let signalled = Arc::new(Notify::new());
    let notifier = Arc::clone(&signalled);

    let server = axum::serve(listener, router).with_graceful_shutdown(async move {
        shutdown.await;
        notifier.notify_one();
    });
    let mut server = std::pin::pin!(std::future::IntoFuture::into_future(server));

    tokio::select! {
        result = &mut server => return result.map(|()| ShutdownOutcome::Drained),
        () = signalled.notified() => {},
    }

    info!(timeout = ?drain_timeout, "Waiting for in-flight turns");

    match tokio::time::timeout(drain_timeout, &mut server).await {
        Ok(result) => result.map(|()| ShutdownOutcome::Drained),
        Err(_) => {
            warn!(timeout = ?drain_timeout, "In-flight turns did not finish, abandoning them");
            Ok(ShutdownOutcome::TimedOut)
        },
    }
}
