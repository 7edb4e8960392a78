// Server loop module
// Accepts connections until the shutdown future resolves

use std::future::Future;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::net::TcpListener;

use super::connection::accept_connection;
use crate::config::AppState;
use crate::logger;

/// Run the accept loop
///
/// Accept errors are logged and the loop keeps going; a single bad
/// connection never stops the server. When `shutdown` resolves the listener
/// is closed and the function returns. Connections still in flight are left
/// to their tasks.
pub async fn run_server<S>(listener: TcpListener, state: Arc<AppState>, shutdown: S)
where
    S: Future<Output = &'static str>,
{
    let active_connections = Arc::new(AtomicUsize::new(0));
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            accept_result = listener.accept() => {
                match accept_result {
                    Ok((stream, peer_addr)) => {
                        accept_connection(stream, peer_addr, &state, &active_connections);
                    }
                    Err(e) => logger::log_listener_error(&e),
                }
            }

            signal = &mut shutdown => {
                logger::log_shutdown_requested(
                    signal,
                    active_connections.load(Ordering::SeqCst),
                );
                break;
            }
        }
    }

    drop(listener);
    logger::log_server_stopped();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::server::create_reusable_listener;
    use std::net::SocketAddr;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpStream;
    use tokio::sync::oneshot;

    async fn raw_get(addr: SocketAddr, target: &str) -> String {
        let mut stream = TcpStream::connect(addr).await.unwrap();
        let request =
            format!("GET {target} HTTP/1.1\r\nHost: localhost\r\nConnection: close\r\n\r\n");
        stream.write_all(request.as_bytes()).await.unwrap();

        let mut raw = Vec::new();
        stream.read_to_end(&mut raw).await.unwrap();
        String::from_utf8_lossy(&raw).to_lowercase()
    }

    #[tokio::test]
    async fn test_serves_bundle_until_shutdown() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("index.html"), "<html></html>").unwrap();
        std::fs::write(dir.path().join("game.wasm.br"), b"wasm").unwrap();

        let state = Arc::new(AppState::new(Config::default(), dir.path().to_path_buf()));
        let listener = create_reusable_listener("127.0.0.1:0".parse().unwrap()).unwrap();
        let addr = listener.local_addr().unwrap();

        let (stop_tx, stop_rx) = oneshot::channel::<()>();
        let server = tokio::spawn(run_server(listener, state, async move {
            let _ = stop_rx.await;
            "test"
        }));

        let index = raw_get(addr, "/").await;
        assert!(index.starts_with("http/1.1 200 ok"), "{index}");
        assert!(index.contains("cross-origin-opener-policy: same-origin"));
        assert!(index.contains("cross-origin-embedder-policy: require-corp"));
        assert!(index.contains("cross-origin-resource-policy: cross-origin"));
        assert!(index.contains("access-control-allow-origin: *"));
        assert!(index.ends_with("<html></html>"));

        let wasm = raw_get(addr, "/game.wasm.br").await;
        assert!(wasm.contains("content-encoding: br"));
        assert!(wasm.contains("content-type: application/wasm"));
        assert!(!wasm.contains("cross-origin-opener-policy"));

        let missing = raw_get(addr, "/missing.js").await;
        assert!(missing.starts_with("http/1.1 404 not found"), "{missing}");
        assert!(missing.contains("access-control-allow-origin: *"));

        stop_tx.send(()).unwrap();
        server.await.unwrap();
        assert!(TcpStream::connect(addr).await.is_err());
    }
}
