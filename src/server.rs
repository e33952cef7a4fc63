//! TCP front end: one session per telnet connection.

use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;

use chrono::Utc;
use tokio::net::{TcpListener, TcpStream};
use tracing::{debug, info, warn};

use crate::app::{AppContext, Result};
use crate::session::{run_session, SessionState};
use crate::terminal::line::LineTerminal;
use crate::terminal::Terminal;

/// Accepts connections and runs a session task for each.
pub struct Server {
    ctx: Arc<AppContext>,
    listener: TcpListener,
}

impl Server {
    /// Binds the listening socket. Failing to bind is fatal to the caller.
    pub async fn bind(ctx: Arc<AppContext>, addr: &str) -> Result<Self> {
        let listener = TcpListener::bind(addr).await?;
        Ok(Self { ctx, listener })
    }

    pub fn local_addr(&self) -> Result<SocketAddr> {
        Ok(self.listener.local_addr()?)
    }

    /// Serves until SIGINT or SIGTERM.
    pub async fn run(self) -> Result<()> {
        self.run_until(shutdown_signal()).await
    }

    /// Serves until `shutdown` completes. Sessions already running are not
    /// waited for.
    pub async fn run_until(self, shutdown: impl Future<Output = ()>) -> Result<()> {
        tokio::pin!(shutdown);
        info!(
            addr = %self.local_addr()?,
            feeds = self.ctx.catalog.len(),
            default_feed = self.ctx.catalog.default_url(),
            "Server listening"
        );

        loop {
            tokio::select! {
                _ = &mut shutdown => {
                    info!("Server shutting down");
                    return Ok(());
                }
                accepted = self.listener.accept() => match accepted {
                    Ok((stream, peer)) => {
                        tokio::spawn(handle_connection(stream, peer, self.ctx.clone()));
                    }
                    Err(e) => warn!(error = %e, "Failed to accept connection"),
                },
            }
        }
    }
}

async fn handle_connection(stream: TcpStream, peer: SocketAddr, ctx: Arc<AppContext>) {
    info!(peer = %peer, at = %Utc::now().to_rfc3339(), "Client connected");

    let mut terminal = LineTerminal::new(stream);
    let outcome = async {
        let device = terminal.negotiate().await?;
        debug!(
            peer = %peer,
            terminal = %device.terminal_type,
            rows = device.rows,
            cols = device.cols,
            "Terminal negotiated"
        );
        run_session(&mut terminal, &ctx, SessionState::new(ctx.catalog.default_url())).await
    }
    .await;

    match outcome {
        Ok(state) => info!(
            peer = %peer,
            at = %Utc::now().to_rfc3339(),
            last_feed = %state.current_url,
            "Client disconnected"
        ),
        Err(e) => info!(
            peer = %peer,
            at = %Utc::now().to_rfc3339(),
            reason = %e,
            "Client disconnected"
        ),
    }
}

async fn shutdown_signal() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};

        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                tokio::select! {
                    _ = sigterm.recv() => {},
                    _ = tokio::signal::ctrl_c() => {},
                }
            }
            Err(e) => {
                warn!(error = %e, "Failed to set up SIGTERM handler");
                let _ = tokio::signal::ctrl_c().await;
            }
        }
    }

    #[cfg(not(unix))]
    {
        let _ = tokio::signal::ctrl_c().await;
    }
}
