// Server loop module
// Accepts connections until a shutdown is requested

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;

use super::connection::accept_connection;
use super::signal::SignalHandler;
use crate::config;
use crate::logger;

/// Longest wait for in-flight connections after the listener closes
const DRAIN_TIMEOUT: Duration = Duration::from_secs(10);
const DRAIN_POLL: Duration = Duration::from_millis(20);

/// Accept connections until `signals` requests shutdown
///
/// Returns once the listener is closed and in-flight connections have
/// finished, or after `DRAIN_TIMEOUT`.
pub async fn start_server_loop(
    listener: TcpListener,
    state: Arc<config::AppState>,
    active_connections: Arc<AtomicUsize>,
    signals: Arc<SignalHandler>,
) -> std::io::Result<()> {
    // Register interest before checking the flag so a shutdown between the
    // two is not lost
    let shutdown = signals.shutdown.notified();
    tokio::pin!(shutdown);

    if signals.is_shutdown_requested() {
        return Ok(());
    }

    loop {
        tokio::select! {
            accept_result = listener.accept() => {
                match accept_result {
                    Ok((stream, peer_addr)) => {
                        accept_connection(stream, peer_addr, &state, &active_connections);
                    }
                    Err(e) => {
                        logger::log_error(&format!("Failed to accept connection: {e}"));
                    }
                }
            }

            () = &mut shutdown => {
                break;
            }
        }
    }

    drop(listener);
    let remaining = wait_for_drain(&active_connections, DRAIN_TIMEOUT).await;
    logger::log_shutdown(remaining);
    Ok(())
}

/// Wait until no connection is active or `timeout` elapses
///
/// Returns the number of connections still open.
async fn wait_for_drain(active_connections: &AtomicUsize, timeout: Duration) -> usize {
    let deadline = tokio::time::Instant::now() + timeout;
    loop {
        let active = active_connections.load(Ordering::SeqCst);
        if active == 0 || tokio::time::Instant::now() >= deadline {
            return active;
        }
        tokio::time::sleep(DRAIN_POLL).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_drain_returns_immediately_when_idle() {
        let active = AtomicUsize::new(0);
        assert_eq!(wait_for_drain(&active, Duration::from_secs(5)).await, 0);
    }

    #[tokio::test]
    async fn test_drain_waits_for_connections_to_finish() {
        let active = Arc::new(AtomicUsize::new(2));
        let finishing = Arc::clone(&active);
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(50)).await;
            finishing.fetch_sub(1, Ordering::SeqCst);
            tokio::time::sleep(Duration::from_millis(50)).await;
            finishing.fetch_sub(1, Ordering::SeqCst);
        });

        assert_eq!(wait_for_drain(&active, Duration::from_secs(5)).await, 0);
    }

    #[tokio::test]
    async fn test_drain_gives_up_after_timeout() {
        let active = AtomicUsize::new(1);
        assert_eq!(wait_for_drain(&active, Duration::from_millis(60)).await, 1);
    }
}
