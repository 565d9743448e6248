// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Web server lifecycle: bind, serve in a background task, stop gracefully.

use std::net::SocketAddr;
use std::sync::Arc;

use tokio::net::TcpListener;
use tokio::sync::Notify;
use tokio::task::JoinHandle;
use tracing::{debug, error, info};

use toonwerk_core::AppConfig;
use toonwerk_core::error::{Result, ToonwerkError};
use toonwerk_core::types::ServerStatus;

use crate::routes::{AppState, router};
use crate::storage::UploadStore;

/// The upload web server.
///
/// Created in `Stopped` state. [`start`](Self::start) binds the listener and
/// spawns the serving task; [`stop`](Self::stop) signals a graceful shutdown
/// and waits for in-flight requests to finish.
pub struct WebServer {
    config: AppConfig,
    status: ServerStatus,
    /// Notification handle used to signal a graceful shutdown.
    shutdown_signal: Arc<Notify>,
    /// Handle to the Tokio task running `axum::serve`.
    task_handle: Option<JoinHandle<()>>,
    /// Address actually bound; differs from the config when port 0 is used.
    local_addr: Option<SocketAddr>,
}

impl WebServer {
    pub fn new(config: AppConfig) -> Self {
        Self {
            config,
            status: ServerStatus::Stopped,
            shutdown_signal: Arc::new(Notify::new()),
            task_handle: None,
            local_addr: None,
        }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn status(&self) -> ServerStatus {
        self.status
    }

    /// Bound address while running.
    pub fn local_addr(&self) -> Option<SocketAddr> {
        self.local_addr
    }

    /// Open the upload store, bind the listener and start serving.
    ///
    /// # Errors
    ///
    /// Returns an error if the upload directory cannot be created or the
    /// address cannot be bound. The server is left in `Error` state.
    pub async fn start(&mut self) -> Result<()> {
        if self.status == ServerStatus::Running {
            debug!(addr = ?self.local_addr, "Web server already running");
            return Ok(());
        }

        self.status = ServerStatus::Starting;
        match self.bind_and_spawn().await {
            Ok(addr) => {
                self.local_addr = Some(addr);
                self.status = ServerStatus::Running;
                info!(addr = %addr, "Toonwerk listening");
                Ok(())
            }
            Err(err) => {
                self.status = ServerStatus::Error;
                error!(error = %err, "Web server failed to start");
                Err(err)
            }
        }
    }

    async fn bind_and_spawn(&mut self) -> Result<SocketAddr> {
        let store = UploadStore::open(&self.config.upload_dir)?
            .with_retention(self.config.max_stored_results);
        let app = router(AppState::new(self.config.clone(), store));

        let bind_addr = self.config.bind_addr();
        let listener = TcpListener::bind(bind_addr)
            .await
            .map_err(|e| ToonwerkError::Server(format!("bind {bind_addr}: {e}")))?;
        let addr = listener
            .local_addr()
            .map_err(|e| ToonwerkError::Server(format!("local address: {e}")))?;

        let shutdown = Arc::clone(&self.shutdown_signal);
        let handle = tokio::spawn(async move {
            let served = axum::serve(listener, app)
                .with_graceful_shutdown(async move { shutdown.notified().await })
                .await;
            if let Err(e) = served {
                error!(error = %e, "Web server terminated with an error");
            }
        });

        self.task_handle = Some(handle);
        Ok(addr)
    }

    /// Gracefully stop the server.
    pub async fn stop(&mut self) -> Result<()> {
        if self.status != ServerStatus::Running {
            return Ok(());
        }

        info!(addr = ?self.local_addr, "Stopping web server");
        self.shutdown_signal.notify_one();

        if let Some(handle) = self.task_handle.take() {
            handle
                .await
                .map_err(|e| ToonwerkError::Server(format!("task join: {e}")))?;
        }

        self.local_addr = None;
        self.status = ServerStatus::Stopped;
        info!("Web server stopped");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::{IpAddr, Ipv4Addr};
    use tokio::io::{AsyncReadExt, AsyncWriteExt};

    fn local_config(dir: &std::path::Path) -> AppConfig {
        AppConfig {
            host: IpAddr::V4(Ipv4Addr::LOCALHOST),
            port: 0,
            upload_dir: dir.join("uploads"),
            ..AppConfig::default()
        }
    }

    #[test]
    fn initial_status_is_stopped() {
        let server = WebServer::new(AppConfig::default());
        assert_eq!(server.status(), ServerStatus::Stopped);
        assert!(server.local_addr().is_none());
    }

    #[tokio::test]
    async fn start_serves_the_page_and_stop_shuts_down() {
        let dir = tempfile::tempdir().unwrap();
        let mut server = WebServer::new(local_config(dir.path()));
        server.start().await.unwrap();
        assert_eq!(server.status(), ServerStatus::Running);
        assert!(dir.path().join("uploads").is_dir());

        let addr = server.local_addr().unwrap();
        let mut stream = tokio::net::TcpStream::connect(addr).await.unwrap();
        stream
            .write_all(b"GET / HTTP/1.1\r\nHost: localhost\r\nConnection: close\r\n\r\n")
            .await
            .unwrap();
        let mut response = String::new();
        stream.read_to_string(&mut response).await.unwrap();
        assert!(response.starts_with("HTTP/1.1 200"));
        assert!(response.contains("uploadForm"));

        server.stop().await.unwrap();
        assert_eq!(server.status(), ServerStatus::Stopped);
        assert!(server.local_addr().is_none());
    }

    #[tokio::test]
    async fn stop_when_stopped_is_a_no_op() {
        let mut server = WebServer::new(AppConfig::default());
        server.stop().await.unwrap();
        assert_eq!(server.status(), ServerStatus::Stopped);
    }

    #[tokio::test]
    async fn bind_failure_sets_error_status() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let taken = blocker.local_addr().unwrap();

        let mut config = local_config(dir.path());
        config.port = taken.port();
        let mut server = WebServer::new(config);
        let err = server.start().await.unwrap_err();
        assert!(matches!(err, ToonwerkError::Server(_)));
        assert_eq!(server.status(), ServerStatus::Error);
    }
}
